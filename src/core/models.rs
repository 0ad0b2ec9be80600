use std::collections::HashMap;

/// Coarse review outcome reported back to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Again,
    Easy,
}

impl Grade {
    /// Anki ease value: 1 lapses the card, 3 passes it.
    pub fn ease(&self) -> u8 {
        match self {
            Grade::Again => 1,
            Grade::Easy => 3,
        }
    }
}

/// Which note field a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerField {
    Reading,
    Meaning,
}

/// Field name to field value mapping of one note.
#[derive(Debug, Clone, Default)]
pub struct Note {
    fields: HashMap<String, String>,
}

impl Note {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Read-only view of a scheduler card. `is_new` marks a card that has never
/// been reviewed.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: u64,
    pub is_new: bool,
    pub note: Note,
}
