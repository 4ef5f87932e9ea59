use super::view::FeedbackCue;

/// Receives audio/haptic cues after each selection.
///
/// The engine only signals; playing a sound is up to the host.
pub trait CueSink: Send + Sync {
    fn cue(&self, cue: FeedbackCue);
}

/// Sink that drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCues;

impl CueSink for NoopCues {
    fn cue(&self, _cue: FeedbackCue) {}
}
