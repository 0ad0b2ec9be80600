use std::collections::HashMap;

use super::{
    api::AnkiClient,
    types::{
        CardInfo,
        Field,
    },
};
use crate::{
    core::{
        Card,
        Grade,
        HayaoshiError,
        Note,
    },
    quiz::ports::SchedulerPort,
};

/// `SchedulerPort` backed by a running Anki instance over AnkiConnect. Anki
/// keeps all scheduling state; this adapter drives its reviewer.
pub struct AnkiScheduler {
    client: AnkiClient,
    deck: String,
    exhausted: bool,
}

impl AnkiScheduler {
    /// Probes the connection and opens the review screen for `deck`.
    pub fn connect(client: AnkiClient, deck: impl Into<String>) -> Result<Self, HayaoshiError> {
        let deck = deck.into();
        let version = client.version()?;
        println!("AnkiConnect is online. Version: {}", version);

        client.gui_deck_review(&deck)?;
        Ok(Self { client, deck, exhausted: false })
    }

    fn field_values(fields: HashMap<String, Field>) -> Note {
        Note::new(fields.into_iter().map(|(name, field)| (name, field.value)).collect())
    }

    fn to_card(info: CardInfo) -> Card {
        let is_new = info.queue == 0;
        Card { id: info.card_id, is_new, note: Self::field_values(info.fields) }
    }
}

impl SchedulerPort for AnkiScheduler {
    fn active_cards(&mut self) -> Result<Vec<Card>, HayaoshiError> {
        let query = format!("deck:\"{}\"", self.deck.replace('"', "\\\""));
        let card_ids = self.client.find_cards(&query)?;
        let infos = self.client.cards_info(&card_ids)?;
        Ok(infos.into_iter().map(Self::to_card).collect())
    }

    fn next_due_card(&mut self) -> Option<Card> {
        if self.exhausted {
            return None;
        }

        let current = match self.client.gui_current_card() {
            Ok(Some(current)) => current,
            Ok(None) => {
                self.exhausted = true;
                return None;
            }
            Err(err) => {
                eprintln!("Failed to fetch the current card: {}", err);
                self.exhausted = true;
                return None;
            }
        };

        // `guiCurrentCard` does not report the queue, so fetch it separately.
        let is_new = match self.client.cards_info(&[current.card_id]) {
            Ok(infos) => infos.first().map(|info| info.queue == 0).unwrap_or(false),
            Err(_) => false,
        };

        Some(Card {
            id: current.card_id,
            is_new,
            note: Self::field_values(current.fields),
        })
    }

    fn submit_grade(&mut self, card: &Card, grade: Grade) {
        // Anki only accepts an ease once the answer side is visible.
        if let Err(err) = self.client.gui_show_answer() {
            eprintln!("Failed to reveal the answer for card {}: {}", card.id, err);
            return;
        }
        if let Err(err) = self.client.gui_answer_card(grade.ease()) {
            eprintln!("Failed to answer card {}: {}", card.id, err);
        }
    }
}
