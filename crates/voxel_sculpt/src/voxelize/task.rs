//! Background conversion on rayon's thread pool.
//!
//! ```ignore
//! let mut task = VoxelizeTask::spawn(mesh, VoxelizeConfig::new(0.05));
//!
//! // Poll each frame
//! if let Some(progress) = task.latest_progress() {
//!   println!("{:?} {:.0}%", progress.phase, progress.percent());
//! }
//! if let Some(result) = task.poll() {
//!   let shape = result?;
//! }
//! ```

use crossbeam_channel::{self as channel, Receiver, TryRecvError};

use super::monitor::{CancelToken, ConvertMonitor, VoxelizeProgress};
use super::{TriangleMesh, VoxelShape, VoxelizeConfig, Voxelizer};
use crate::error::VoxelizeError;

pub type VoxelizeResult = Result<Option<VoxelShape>, VoxelizeError>;

/// Handle to a conversion running on the rayon pool.
pub struct VoxelizeTask {
  cancel: CancelToken,
  progress: Receiver<VoxelizeProgress>,
  latest: Option<VoxelizeProgress>,
  result: Receiver<VoxelizeResult>,
}

impl VoxelizeTask {
  /// Start converting `mesh` (non-blocking).
  pub fn spawn(mesh: TriangleMesh, config: VoxelizeConfig) -> Self {
    let cancel = CancelToken::new();
    let (progress_tx, progress) = channel::unbounded();
    let (result_tx, result) = channel::bounded(1);

    let monitor = ConvertMonitor::new()
      .with_cancel(cancel.clone())
      .with_progress(progress_tx);
    rayon::spawn(move || {
      let outcome = Voxelizer::new(config).convert(&mesh, &monitor);
      // Handle dropped = nobody wants the result.
      let _ = result_tx.send(outcome);
    });

    Self {
      cancel,
      progress,
      latest: None,
      result,
    }
  }

  /// Ask the worker to stop; it finishes with `Ok(None)`.
  pub fn cancel(&self) {
    self.cancel.cancel();
  }

  /// Most recent progress report received so far.
  pub fn latest_progress(&mut self) -> Option<VoxelizeProgress> {
    if let Some(last) = self.progress.try_iter().last() {
      self.latest = Some(last);
    }
    self.latest
  }

  /// Result if the worker is done, `None` while it is still running.
  ///
  /// The result is handed out once; polling again reports `WorkerLost`.
  pub fn poll(&mut self) -> Option<VoxelizeResult> {
    match self.result.try_recv() {
      Ok(result) => Some(result),
      Err(TryRecvError::Empty) => None,
      Err(TryRecvError::Disconnected) => Some(Err(VoxelizeError::WorkerLost)),
    }
  }

  /// Block until the worker is done.
  pub fn wait(self) -> VoxelizeResult {
    self.result.recv().unwrap_or(Err(VoxelizeError::WorkerLost))
  }
}
