use reqwest::blocking::Client;
use serde::Deserialize;

use super::types::{
    ApiResponse,
    CardInfo,
    CurrentCard,
};
use crate::core::HayaoshiError;

const ANKI_CONNECT_URL: &str = "http://localhost:8765/";

/// Blocking AnkiConnect client. Every call is a short local HTTP round trip;
/// the session model treats them as synchronous and non-blocking.
pub struct AnkiClient {
    client: Client,
    url: String,
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnkiClient {
    pub fn new() -> Self {
        Self { client: Client::new(), url: ANKI_CONNECT_URL.to_string() }
    }

    fn request<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        params: Option<serde_json::Value>,
    ) -> Result<ApiResponse<T>, HayaoshiError> {
        let mut body = serde_json::Map::new();
        body.insert("action".to_string(), serde_json::Value::String(action.to_string()));
        body.insert("version".to_string(), serde_json::Value::Number((6).into()));

        if let Some(params) = params {
            body.insert("params".to_string(), params);
        }

        let response: ApiResponse<T> =
            self.client.post(&self.url).json(&body).send()?.json()?;

        Ok(response)
    }

    //Will just use to check if ankiconnect is online
    pub fn version(&self) -> Result<u32, HayaoshiError> {
        let response: ApiResponse<u32> = self.request("version", None)?;
        response.into_result()
    }

    pub fn deck_names(&self) -> Result<Vec<String>, HayaoshiError> {
        let response: ApiResponse<Vec<String>> = self.request("deckNames", None)?;
        response.into_result()
    }

    pub fn find_cards(&self, query: &str) -> Result<Vec<u64>, HayaoshiError> {
        let params = serde_json::json!({ "query": query });
        let response: ApiResponse<Vec<u64>> = self.request("findCards", Some(params))?;
        response.into_result()
    }

    pub fn cards_info(&self, card_ids: &[u64]) -> Result<Vec<CardInfo>, HayaoshiError> {
        let params = serde_json::json!({ "cards": card_ids });
        let response: ApiResponse<Vec<CardInfo>> = self.request("cardsInfo", Some(params))?;
        response.into_result()
    }

    /// Opens Anki's review screen for `deck` so `guiCurrentCard` has a card
    /// to report.
    pub fn gui_deck_review(&self, deck: &str) -> Result<bool, HayaoshiError> {
        let params = serde_json::json!({ "name": deck });
        let response: ApiResponse<bool> = self.request("guiDeckReview", Some(params))?;
        response.into_result()
    }

    /// The card the reviewer currently shows, `None` when the queue is empty
    /// or the review screen is closed.
    pub fn gui_current_card(&self) -> Result<Option<CurrentCard>, HayaoshiError> {
        let response: ApiResponse<CurrentCard> = self.request("guiCurrentCard", None)?;
        Ok(response.unwrap_result())
    }

    pub fn gui_show_answer(&self) -> Result<bool, HayaoshiError> {
        let response: ApiResponse<bool> = self.request("guiShowAnswer", None)?;
        response.into_result()
    }

    pub fn gui_answer_card(&self, ease: u8) -> Result<bool, HayaoshiError> {
        let params = serde_json::json!({ "ease": ease });
        let response: ApiResponse<bool> = self.request("guiAnswerCard", Some(params))?;
        response.into_result()
    }
}
