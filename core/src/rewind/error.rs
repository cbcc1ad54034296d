//! Rewind transition errors

/// Rejected operation on the rewind state machine.
///
/// Every error leaves the controller unchanged, so the caller can safely
/// re-issue the same call on a later tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RewindError {
    /// `start_rewind` with nothing recorded yet
    #[error("no recorded history to rewind")]
    EmptyHistory,

    /// `start_rewind` while a rewind is in progress
    #[error("a rewind is already in progress")]
    AlreadyRewinding,

    /// `step_rewind` or `stop_rewind` while recording
    #[error("not rewinding")]
    NotRewinding,

    /// A recording call while the history is being played back
    #[error("cannot record while rewinding")]
    Rewinding,
}
