//! Cancellation and progress reporting for long conversions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cancel(&self) {
    self.0.store(true, Ordering::Relaxed);
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool {
    self.0.load(Ordering::Relaxed)
  }
}

/// Conversion stage a progress report belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoxelizePhase {
  /// Inside/outside classification of sample columns.
  Classify,
  /// Distance evaluation and grid writes.
  Assign,
}

/// Advisory progress report, counted in sampling rows (one row per x).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoxelizeProgress {
  pub phase: VoxelizePhase,
  pub rows_done: u32,
  pub rows_total: u32,
}

impl VoxelizeProgress {
  /// Completion of the current phase in `[0, 100]`.
  pub fn percent(&self) -> f32 {
    if self.rows_total == 0 {
      return 100.0;
    }
    self.rows_done as f32 * 100.0 / self.rows_total as f32
  }
}

/// Hooks a caller passes into a conversion.
#[derive(Clone, Debug, Default)]
pub struct ConvertMonitor {
  cancel: CancelToken,
  progress: Option<Sender<VoxelizeProgress>>,
}

impl ConvertMonitor {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
    self.cancel = cancel;
    self
  }

  pub fn with_progress(mut self, sender: Sender<VoxelizeProgress>) -> Self {
    self.progress = Some(sender);
    self
  }

  pub fn cancel_token(&self) -> &CancelToken {
    &self.cancel
  }

  #[inline]
  pub fn is_cancelled(&self) -> bool {
    self.cancel.is_cancelled()
  }

  pub(crate) fn report(&self, progress: VoxelizeProgress) {
    if let Some(sender) = &self.progress {
      // Nobody listening is fine.
      let _ = sender.send(progress);
    }
  }
}
