use crate::core::{
    Card,
    Grade,
    HayaoshiError,
};

/// Host scheduler contract. The spaced-repetition algorithm stays a black
/// box behind this trait; the session only fetches due cards and reports
/// grades.
pub trait SchedulerPort {
    /// Every card in the active deck scope, fetched once to seed the
    /// distractor pools.
    fn active_cards(&mut self) -> Result<Vec<Card>, HayaoshiError>;

    /// The next card due for review, or `None` when the queue is exhausted.
    /// Stays `None` once exhausted.
    fn next_due_card(&mut self) -> Option<Card>;

    /// Fire-and-forget grade report.
    fn submit_grade(&mut self, card: &Card, grade: Grade);
}

/// Pronunciation playback. Playback itself is owned by the host; the session
/// only signals when a file should start.
pub trait AudioPort {
    fn play(&mut self, file: &str);
}

/// Stand-in when no audio backend is wired up.
#[derive(Default)]
pub struct NullAudio;

impl AudioPort for NullAudio {
    fn play(&mut self, _file: &str) {}
}
