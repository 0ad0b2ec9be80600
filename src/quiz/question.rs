use rand::Rng;

use super::distractors::DistractorPool;
use crate::core::{
    utils::{
        sound_filename,
        strip_html,
    },
    AnswerField,
    Card,
    HayaoshiError,
    QuizConfig,
};

/// One rendered quiz question. Built fresh per question and discarded after
/// grading. The correct answer sits at `correct_index` among the option
/// slots; distractors fill the remaining slots in encounter order.
#[derive(Debug, Clone)]
pub struct QuizQuestion {
    pub prompt: String,
    pub reading: String,
    pub answer_field: AnswerField,
    pub correct_answer: String,
    pub distractors: Vec<String>,
    pub correct_index: usize,
    pub audio_file: Option<String>,
}

impl QuizQuestion {
    pub fn build<R: Rng>(
        card: &Card,
        answer_field: AnswerField,
        config: &QuizConfig,
        pool: &DistractorPool,
        rng: &mut R,
    ) -> Result<Self, HayaoshiError> {
        let answer_name = match answer_field {
            AnswerField::Reading => &config.reading_field,
            AnswerField::Meaning => &config.meaning_field,
        };

        let correct_answer = strip_html(
            card.note
                .field(answer_name)
                .ok_or_else(|| HayaoshiError::MissingField(answer_name.clone()))?,
        );
        let prompt = strip_html(
            card.note
                .field(&config.word_field)
                .ok_or_else(|| HayaoshiError::MissingField(config.word_field.clone()))?,
        );
        let reading = strip_html(
            card.note
                .field(&config.reading_field)
                .ok_or_else(|| HayaoshiError::MissingField(config.reading_field.clone()))?,
        );

        let distractors = pool.sample(&correct_answer, config.option_count - 1, rng);
        let correct_index = rng.random_range(0..=distractors.len());

        let audio_file = card.note.field(&config.audio_field).and_then(sound_filename);

        Ok(Self {
            prompt,
            reading,
            answer_field,
            correct_answer,
            distractors,
            correct_index,
            audio_file,
        })
    }

    /// Filled option slots: the correct answer plus the sampled distractors.
    pub fn filled_options(&self) -> usize {
        self.distractors.len() + 1
    }

    /// Text for option slot `index`, `None` for padded slots past the
    /// sampled set.
    pub fn option_at(&self, index: usize) -> Option<&str> {
        if index == self.correct_index {
            return Some(&self.correct_answer);
        }

        let distractor_index = if index < self.correct_index { index } else { index.checked_sub(1)? };
        self.distractors.get(distractor_index).map(String::as_str)
    }

    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::core::Note;

    fn card(word: &str, reading: &str, meaning: &str, audio: Option<&str>) -> Card {
        let mut fields = HashMap::new();
        fields.insert("Word".to_string(), word.to_string());
        fields.insert("Reading".to_string(), reading.to_string());
        fields.insert("Meaning".to_string(), meaning.to_string());
        if let Some(audio) = audio {
            fields.insert("Audio".to_string(), audio.to_string());
        }
        Card { id: 1, is_new: false, note: Note::new(fields) }
    }

    fn corpus(n: usize) -> Vec<Card> {
        (0..n)
            .map(|i| {
                card(
                    &format!("word{}", i),
                    &format!("reading{}", i),
                    &format!("meaning{}", i),
                    None,
                )
            })
            .collect()
    }

    #[test]
    fn exactly_one_option_is_the_correct_answer() {
        let config = QuizConfig::default();
        let cards = corpus(10);
        let pool = DistractorPool::build(&cards, "Meaning", &config).unwrap();
        let mut rng = rand::rng();

        for _ in 0..50 {
            let question =
                QuizQuestion::build(&cards[2], AnswerField::Meaning, &config, &pool, &mut rng)
                    .unwrap();

            let hits: Vec<usize> = (0..config.option_count)
                .filter(|&i| question.option_at(i) == Some(question.correct_answer.as_str()))
                .collect();
            assert_eq!(hits, vec![question.correct_index]);
            assert_eq!(question.filled_options(), config.option_count);
        }
    }

    #[test]
    fn short_pool_pads_trailing_slots() {
        let config = QuizConfig::default();
        let cards = corpus(2);
        let pool = DistractorPool::build(&cards, "Meaning", &config).unwrap();
        let mut rng = rand::rng();

        let question =
            QuizQuestion::build(&cards[0], AnswerField::Meaning, &config, &pool, &mut rng).unwrap();

        assert_eq!(question.filled_options(), 2);
        assert!(question.option_at(2).is_none());
        assert!(question.option_at(config.option_count - 1).is_none());
    }

    #[test]
    fn audio_tag_is_unwrapped() {
        let config = QuizConfig::default();
        let cards = corpus(4);
        let pool = DistractorPool::build(&cards, "Meaning", &config).unwrap();
        let mut rng = rand::rng();

        let with_audio = card("word", "reading", "meaning", Some("[sound:word.mp3]"));
        let question =
            QuizQuestion::build(&with_audio, AnswerField::Meaning, &config, &pool, &mut rng)
                .unwrap();
        assert_eq!(question.audio_file.as_deref(), Some("word.mp3"));

        let without_audio = &cards[0];
        let question =
            QuizQuestion::build(without_audio, AnswerField::Meaning, &config, &pool, &mut rng)
                .unwrap();
        assert!(question.audio_file.is_none());
    }
}
