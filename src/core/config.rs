use serde::{
    Deserialize,
    Serialize,
};

use super::errors::HayaoshiError;

/// Quiz settings, read once when a session is constructed. Field bindings
/// name the note fields holding the word, its reading, its meaning and an
/// optional pronunciation audio tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub word_field: String,
    pub reading_field: String,
    pub meaning_field: String,
    pub audio_field: String,

    /// Option rows per question, the correct answer included.
    pub option_count: usize,
    /// Answer window in seconds.
    pub answer_time_sec: u32,
    /// Result pause after a correct answer.
    pub correct_pause_ms: u64,
    /// Result pause after a wrong answer, long enough to read the fix.
    pub failed_pause_ms: u64,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            word_field: "Word".to_string(),
            reading_field: "Reading".to_string(),
            meaning_field: "Meaning".to_string(),
            audio_field: "Audio".to_string(),
            option_count: 5,
            answer_time_sec: 8,
            correct_pause_ms: 700,
            failed_pause_ms: 3000,
        }
    }
}

impl QuizConfig {
    /// Construction-time validation; a session never starts on a bad config.
    pub fn validate(&self) -> Result<(), HayaoshiError> {
        for (name, value) in [
            ("word_field", &self.word_field),
            ("reading_field", &self.reading_field),
            ("meaning_field", &self.meaning_field),
        ] {
            if value.trim().is_empty() {
                return Err(HayaoshiError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }

        if self.option_count < 2 {
            return Err(HayaoshiError::InvalidConfig(format!(
                "option_count must be at least 2, got {}",
                self.option_count
            )));
        }

        if self.answer_time_sec == 0 {
            return Err(HayaoshiError::InvalidConfig(
                "answer_time_sec must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(QuizConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_single_option() {
        let config = QuizConfig { option_count: 1, ..Default::default() };
        assert!(matches!(config.validate(), Err(HayaoshiError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_answer_time() {
        let config = QuizConfig { answer_time_sec: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(HayaoshiError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_blank_field_binding() {
        let config = QuizConfig { meaning_field: "  ".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(HayaoshiError::InvalidConfig(_))));
    }

    #[test]
    fn audio_binding_may_be_blank() {
        let config = QuizConfig { audio_field: String::new(), ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
