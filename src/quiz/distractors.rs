use std::collections::HashSet;

use rand::{
    seq::IndexedRandom,
    Rng,
};

use crate::core::{
    utils::strip_html,
    Card,
    HayaoshiError,
    QuizConfig,
};

/// Candidate wrong answers for one target field, drawn from every card in
/// the active deck scope. Built once per session and never mutated, so a
/// question's correct answer is always present in the pool it samples from.
pub struct DistractorPool {
    entries: Vec<String>,
}

impl DistractorPool {
    /// Collects `field` from every note, checking each one for the
    /// essential fields. Validation runs here, eagerly, over the whole
    /// corpus — a malformed note can never surface mid-quiz.
    pub fn build(cards: &[Card], field: &str, config: &QuizConfig) -> Result<Self, HayaoshiError> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for card in cards {
            for required in [field, config.word_field.as_str(), config.reading_field.as_str()] {
                if card.note.field(required).is_none() {
                    return Err(HayaoshiError::MissingField(required.to_string()));
                }
            }

            let value = strip_html(card.note.field(field).unwrap_or_default());
            if seen.insert(value.clone()) {
                entries.push(value);
            }
        }

        if entries.is_empty() {
            return Err(HayaoshiError::EmptyPool);
        }

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `count` entries drawn uniformly without replacement from the
    /// pool minus the correct answer. A short pool returns everything it
    /// has; the presentation layer pads the leftover slots.
    pub fn sample<R: Rng>(&self, correct: &str, count: usize, rng: &mut R) -> Vec<String> {
        let candidates: Vec<&String> =
            self.entries.iter().filter(|entry| entry.as_str() != correct).collect();

        candidates.choose_multiple(rng, count).map(|entry| (*entry).clone()).collect()
    }
}
