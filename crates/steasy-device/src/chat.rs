//! Canned-reply chat assistant

use std::time::Duration;

use serde::Serialize;

/// Delay before a reply is appended to the transcript
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// Which canned reply to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKey {
    Train,
    Food,
    Restroom,
    Default,
}

impl ReplyKey {
    /// Locale key of the reply text
    pub fn translation_key(&self) -> &'static str {
        match self {
            ReplyKey::Train => "chatTrainResponse",
            ReplyKey::Food => "chatFoodResponse",
            ReplyKey::Restroom => "chatRestroomResponse",
            ReplyKey::Default => "chatDefaultResponse",
        }
    }
}

/// Maps free text to a canned reply
#[cfg_attr(any(test, feature = "test-helpers"), mockall::automock)]
pub trait ChatResponder: Send + Sync {
    fn reply_for(&self, text: &str) -> ReplyKey;
}

const TRAIN_KEYWORDS: &[&str] = &["train", "schedule", "ട്രെയിൻ", "ट्रेन", "ரயில்", "തീവണ്ടി"];

const FOOD_KEYWORDS: &[&str] = &[
    "food", "cafe", "snack", "ഭക്ഷണം", "खाना", "உணவு", "bhojan", "saapadu",
];

const RESTROOM_KEYWORDS: &[&str] = &[
    "toilet",
    "restroom",
    "washroom",
    "bathroom",
    "വിശ്രമമുറി",
    "शौचालय",
    "கழிவறை",
];

/// Keyword-set matcher across English, Malayalam, Hindi and Tamil.
///
/// Sets are checked in order: train, food, restroom. Matching is a
/// lowercase substring test.
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    intents: Vec<(ReplyKey, Vec<String>)>,
}

impl KeywordResponder {
    pub fn new() -> Self {
        let set = |words: &[&str]| words.iter().map(|w| w.to_lowercase()).collect();
        Self {
            intents: vec![
                (ReplyKey::Train, set(TRAIN_KEYWORDS)),
                (ReplyKey::Food, set(FOOD_KEYWORDS)),
                (ReplyKey::Restroom, set(RESTROOM_KEYWORDS)),
            ],
        }
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatResponder for KeywordResponder {
    fn reply_for(&self, text: &str) -> ReplyKey {
        let lower = text.to_lowercase();
        self.intents
            .iter()
            .find(|(_, words)| words.iter().any(|w| lower.contains(w.as_str())))
            .map(|(key, _)| *key)
            .unwrap_or(ReplyKey::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_intents() {
        let r = KeywordResponder::new();
        assert_eq!(r.reply_for("When is the next TRAIN?"), ReplyKey::Train);
        assert_eq!(r.reply_for("any snacks around"), ReplyKey::Food);
        assert_eq!(r.reply_for("where is the washroom"), ReplyKey::Restroom);
        assert_eq!(r.reply_for("hello"), ReplyKey::Default);
    }

    #[test]
    fn test_indic_keywords() {
        let r = KeywordResponder::new();
        assert_eq!(r.reply_for("अगली ट्रेन कब है"), ReplyKey::Train);
        assert_eq!(r.reply_for("உணவு எங்கே"), ReplyKey::Food);
        assert_eq!(r.reply_for("शौचालय कहाँ है"), ReplyKey::Restroom);
        assert_eq!(r.reply_for("തീവണ്ടി"), ReplyKey::Train);
    }

    #[test]
    fn test_train_wins_over_food() {
        let r = KeywordResponder::new();
        assert_eq!(r.reply_for("food on the train"), ReplyKey::Train);
    }

    #[test]
    fn test_reply_keys_map_to_locale_keys() {
        assert_eq!(ReplyKey::Default.translation_key(), "chatDefaultResponse");
        assert_eq!(ReplyKey::Restroom.translation_key(), "chatRestroomResponse");
    }
}
