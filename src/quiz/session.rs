use std::{
    collections::HashSet,
    time::Duration,
};

use rand::rngs::ThreadRng;

use super::{
    clock::Clock,
    distractors::DistractorPool,
    ports::{
        AudioPort,
        SchedulerPort,
    },
    question::QuizQuestion,
};
use crate::core::{
    AnswerField,
    Card,
    Grade,
    HayaoshiError,
    QuizConfig,
};

/// Which quiz variant the session runs, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    MeaningOnly,
    ReadingThenMeaning,
}

/// Session states. `Initial` and `Done` ignore user input and are the only
/// states with no armed timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initial,
    Countdown,
    Answer,
    New,
    Done,
}

/// Which half of a card the current question asks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Single,
    Reading,
    Meaning,
}

/// How the last question concluded, kept for the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Wrong(usize),
    GaveUp,
    TimedOut,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

enum AnswerEvent {
    Selected(usize),
    GaveUp,
    TimedOut,
}

struct ActiveQuestion {
    card: Card,
    question: QuizQuestion,
}

/// The review state machine. One instance owns the shared timer exclusively;
/// every transition is driven by one of three external stimuli — the
/// periodic timer fire, an option selection, or the new-card confirmation.
pub struct QuizSession<S: SchedulerPort, C: Clock> {
    config: QuizConfig,
    mode: Mode,
    state: SessionState,
    scheduler: S,
    clock: C,
    audio: Box<dyn AudioPort>,
    rng: ThreadRng,
    meanings: DistractorPool,
    readings: DistractorPool,
    current: Option<ActiveQuestion>,
    phase: QuizPhase,
    /// Card ids already shown once as new this session. Only grows; a
    /// recorded id is never treated as new again.
    seen_new: HashSet<u64>,
    /// Set when the reading half concluded and the meaning half of the same
    /// card is still pending.
    meaning_pending: bool,
    reading_correct: bool,
    time_left_sec: u32,
    last_outcome: Option<Outcome>,
}

impl<S: SchedulerPort, C: Clock> QuizSession<S, C> {
    /// Validates the configuration and the whole corpus, builds both
    /// distractor pools, then loads the first question. Everything that can
    /// fail fails here, before anything is shown; a failed start leaves no
    /// timer armed.
    pub fn start(
        mode: Mode,
        config: QuizConfig,
        mut scheduler: S,
        clock: C,
        audio: Box<dyn AudioPort>,
    ) -> Result<Self, HayaoshiError> {
        config.validate()?;

        let cards = scheduler.active_cards()?;
        let meanings = DistractorPool::build(&cards, &config.meaning_field, &config)?;
        let readings = DistractorPool::build(&cards, &config.reading_field, &config)?;
        println!(
            "Seeded distractor pools: {} meanings, {} readings from {} cards",
            meanings.len(),
            readings.len(),
            cards.len()
        );

        let mut session = Self {
            config,
            mode,
            state: SessionState::Initial,
            scheduler,
            clock,
            audio,
            rng: rand::rng(),
            meanings,
            readings,
            current: None,
            phase: QuizPhase::Single,
            seen_new: HashSet::new(),
            meaning_pending: false,
            reading_correct: false,
            time_left_sec: 0,
            last_outcome: None,
        };
        session.advance();
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn question(&self) -> Option<&QuizQuestion> {
        self.current.as_ref().map(|active| &active.question)
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current.as_ref().map(|active| &active.card)
    }

    pub fn time_left_sec(&self) -> u32 {
        self.time_left_sec
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// The reading line stays hidden while the reading half itself is being
    /// asked.
    pub fn show_reading(&self) -> bool {
        if self.state == SessionState::New {
            return true;
        }
        !matches!(self.question().map(|q| q.answer_field), Some(AnswerField::Reading))
    }

    /// Periodic fire of the shared timer. Counts the answer window down in
    /// `Countdown` and auto-advances out of `Answer`; a stale fire in any
    /// other state is a no-op.
    pub fn on_timer(&mut self) {
        match self.state {
            SessionState::Countdown => {
                self.time_left_sec = self.time_left_sec.saturating_sub(1);
                if self.time_left_sec == 0 {
                    self.conclude(AnswerEvent::TimedOut);
                }
            }
            SessionState::Answer => self.advance(),
            _ => {}
        }
    }

    /// Option `index` picked. Only valid during the countdown; a padded
    /// empty slot counts as a wrong answer, anything past the option rows is
    /// ignored.
    pub fn select_answer(&mut self, index: usize) {
        if self.state != SessionState::Countdown || index >= self.config.option_count {
            return;
        }
        self.conclude(AnswerEvent::Selected(index));
    }

    /// Explicit "don't know": concluded as wrong with nothing selected.
    pub fn give_up(&mut self) {
        if self.state != SessionState::Countdown {
            return;
        }
        self.conclude(AnswerEvent::GaveUp);
    }

    /// Confirms a new card's first exposure. The same card is re-asked as a
    /// regular question; its id was recorded when it was shown, so `New`
    /// cannot trigger twice for it.
    pub fn acknowledge_new(&mut self) {
        if self.state != SessionState::New {
            return;
        }
        if let Some(active) = self.current.take() {
            self.present(active.card);
        }
    }

    /// Stops the timer and abandons any question in progress without
    /// grading it.
    pub fn shutdown(&mut self) {
        self.clock.stop();
        self.current = None;
        self.last_outcome = None;
        self.state = SessionState::Done;
    }

    /// The central transition: pulls the next question — the meaning half of
    /// the current card when one is pending, the next due card otherwise.
    fn advance(&mut self) {
        self.clock.stop();
        self.last_outcome = None;

        let held = if self.mode == Mode::ReadingThenMeaning && self.meaning_pending {
            self.current.take().map(|active| active.card)
        } else {
            None
        };

        match held.or_else(|| self.scheduler.next_due_card()) {
            Some(card) => self.present(card),
            None => self.finish_session(),
        }
    }

    fn present(&mut self, card: Card) {
        let is_new = card.is_new && !self.seen_new.contains(&card.id);

        let answer_field = match self.mode {
            Mode::MeaningOnly => AnswerField::Meaning,
            Mode::ReadingThenMeaning => {
                if self.meaning_pending || is_new {
                    AnswerField::Meaning
                } else {
                    AnswerField::Reading
                }
            }
        };

        self.phase = match self.mode {
            Mode::MeaningOnly => QuizPhase::Single,
            Mode::ReadingThenMeaning => {
                if self.meaning_pending {
                    QuizPhase::Meaning
                } else {
                    QuizPhase::Reading
                }
            }
        };

        let pool = match answer_field {
            AnswerField::Reading => &self.readings,
            AnswerField::Meaning => &self.meanings,
        };

        let question =
            match QuizQuestion::build(&card, answer_field, &self.config, pool, &mut self.rng) {
                Ok(question) => question,
                Err(err) => {
                    // The corpus was validated at start; only a card outside
                    // that snapshot can land here.
                    eprintln!("Failed to build a question for card {}: {}", card.id, err);
                    self.finish_session();
                    return;
                }
            };

        if is_new {
            // First exposure: answer revealed, no countdown, no grade.
            self.seen_new.insert(card.id);
            if let Some(file) = &question.audio_file {
                self.audio.play(file);
            }
            self.current = Some(ActiveQuestion { card, question });
            self.state = SessionState::New;
            return;
        }

        if answer_field == AnswerField::Meaning {
            if let Some(file) = &question.audio_file {
                self.audio.play(file);
            }
        }

        self.current = Some(ActiveQuestion { card, question });
        self.time_left_sec = self.config.answer_time_sec;
        self.state = SessionState::Countdown;
        self.clock.start(Duration::from_secs(1));
    }

    fn conclude(&mut self, event: AnswerEvent) {
        self.clock.stop();

        let Some(active) = self.current.as_ref() else {
            return;
        };
        let card = active.card.clone();

        let selected = match event {
            AnswerEvent::Selected(index) => Some(index),
            _ => None,
        };
        let is_correct = selected == Some(active.question.correct_index);

        self.apply_grade(&card, is_correct);

        self.last_outcome = Some(match event {
            AnswerEvent::Selected(_) if is_correct => Outcome::Correct,
            AnswerEvent::Selected(index) => Outcome::Wrong(index),
            AnswerEvent::GaveUp => Outcome::GaveUp,
            AnswerEvent::TimedOut => Outcome::TimedOut,
        });

        self.state = SessionState::Answer;
        let pause_ms =
            if is_correct { self.config.correct_pause_ms } else { self.config.failed_pause_ms };
        self.clock.start(Duration::from_millis(pause_ms));
    }

    /// Exactly one grade per card. `MeaningOnly` submits per question; the
    /// two-phase mode records the reading half and submits at the end of the
    /// meaning half, failing the card when either half failed.
    fn apply_grade(&mut self, card: &Card, is_correct: bool) {
        match self.mode {
            Mode::MeaningOnly => {
                let grade = if is_correct { Grade::Easy } else { Grade::Again };
                self.scheduler.submit_grade(card, grade);
            }
            Mode::ReadingThenMeaning => {
                if self.phase == QuizPhase::Meaning {
                    self.meaning_pending = false;
                    let grade = if is_correct && self.reading_correct {
                        Grade::Easy
                    } else {
                        Grade::Again
                    };
                    self.scheduler.submit_grade(card, grade);
                } else {
                    self.meaning_pending = true;
                    self.reading_correct = is_correct;
                }
            }
        }
    }

    fn finish_session(&mut self) {
        self.clock.stop();
        self.current = None;
        self.last_outcome = None;
        self.state = SessionState::Done;
    }
}

impl<S: SchedulerPort, C: Clock> Drop for QuizSession<S, C> {
    fn drop(&mut self) {
        self.clock.stop();
    }
}
