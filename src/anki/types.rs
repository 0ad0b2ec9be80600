use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::HayaoshiError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Field {
    pub value: String,
    order: u32,
}

/// Subset of the `cardsInfo` payload the quiz needs. `queue` 0 marks a card
/// that has never been reviewed.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: u64,
    pub fields: HashMap<String, Field>,
    pub queue: i32,
    pub deck_name: String,
}

/// The card Anki's reviewer is currently showing (`guiCurrentCard`).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CurrentCard {
    pub card_id: u64,
    pub fields: HashMap<String, Field>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Logs the error half, if any, and yields the result half.
    pub fn unwrap_result(self) -> Option<T> {
        if let Some(error) = &self.error {
            eprintln!("AnkiConnect error: {:?}", error);
        }
        self.result
    }

    pub fn into_result(self) -> Result<T, HayaoshiError> {
        match self.error {
            Some(error) => Err(HayaoshiError::AnkiConnect(error)),
            None => self
                .result
                .ok_or_else(|| HayaoshiError::AnkiConnect("empty response".to_string())),
        }
    }
}
