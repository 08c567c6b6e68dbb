//! One record per line, fields separated by `|`.
//!
//! ```text
//! Task:      id|title|description|priority|difficulty|completed|created|completed_at
//! MoodEntry: id|content|mood|timestamp|keyword,keyword|sentiment_score
//! ```
//!
//! Enums are written as their numeric codes, booleans as `1`/`0` and timestamps as
//! epoch seconds with `0` meaning unset. Nothing is escaped: a free-text field that
//! contains `|` or a newline corrupts its line. [`check_text_field`] lets callers
//! refuse such input before it reaches the store.

use jiff::Timestamp;
use thiserror::Error;

use crate::models::{
    coded::Coded,
    mood::{Mood, MoodEntry},
    now,
    task::{Difficulty, Priority, Task},
};

pub const FIELD_DELIMITER: &str = "|";
pub const KEYWORD_DELIMITER: &str = ",";

/// Layout of a stored line, told apart by its field count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    /// Tasks without difficulty, mood entries without sentiment score
    Legacy,
    Current,
}

pub trait Record: Clone {
    const KIND: &'static str;
    /// Field count of a line from before the last column was added
    const LEGACY_FIELDS: usize;

    fn id(&self) -> u64;
    fn encode(&self) -> String;
    /// Never fails: unreadable fields fall back to their defaults.
    fn decode(line: &str) -> Self;

    fn schema_of(line: &str) -> SchemaVersion {
        if line.split(FIELD_DELIMITER).count() == Self::LEGACY_FIELDS {
            SchemaVersion::Legacy
        } else {
            SchemaVersion::Current
        }
    }
}

struct Fields<'a> {
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(line: &'a str) -> Self {
        Self {
            parts: line.split(FIELD_DELIMITER).collect(),
        }
    }

    fn raw(&self, index: usize) -> &'a str {
        self.parts.get(index).copied().unwrap_or("")
    }

    fn text(&self, index: usize) -> String {
        self.raw(index).to_string()
    }

    fn id(&self, index: usize) -> u64 {
        self.raw(index).parse().unwrap_or(0)
    }

    fn flag(&self, index: usize) -> bool {
        self.raw(index) == "1"
    }

    fn code<T: Coded>(&self, index: usize) -> T {
        T::from_code(self.raw(index))
    }

    fn time(&self, index: usize) -> Timestamp {
        parse_time(self.raw(index)).unwrap_or_else(now)
    }

    fn optional_time(&self, index: usize) -> Option<Timestamp> {
        match self.raw(index) {
            "0" => None,
            raw => Some(parse_time(raw).unwrap_or_else(now)),
        }
    }

    fn keywords(&self, index: usize) -> Vec<String> {
        self.raw(index)
            .split(KEYWORD_DELIMITER)
            .filter(|keyword| !keyword.is_empty())
            .map(String::from)
            .collect()
    }

    /// Non-finite values count as unreadable; finite ones are clamped to [-1, 1].
    fn score(&self, index: usize) -> f64 {
        self.raw(index)
            .parse::<f64>()
            .ok()
            .filter(|score| score.is_finite())
            .map_or(0.0, |score| score.clamp(-1.0, 1.0))
    }
}

fn parse_time(raw: &str) -> Option<Timestamp> {
    raw.parse::<i64>()
        .ok()
        .and_then(|seconds| Timestamp::from_second(seconds).ok())
}

fn encode_time(timestamp: Option<Timestamp>) -> String {
    timestamp.map_or(0, |t| t.as_second()).to_string()
}

impl Record for Task {
    const KIND: &'static str = "task";
    const LEGACY_FIELDS: usize = 7;

    fn id(&self) -> u64 {
        self.id
    }

    fn encode(&self) -> String {
        [
            self.id.to_string(),
            self.title.clone(),
            self.description.clone(),
            self.priority.code().to_string(),
            self.difficulty.code().to_string(),
            if self.completed { "1" } else { "0" }.to_string(),
            encode_time(Some(self.created)),
            encode_time(self.completed_at),
        ]
        .join(FIELD_DELIMITER)
    }

    fn decode(line: &str) -> Self {
        let fields = Fields::split(line);
        // Legacy lines lack the difficulty column, shifting the tail left by one.
        let (difficulty, tail) = match Self::schema_of(line) {
            SchemaVersion::Legacy => (Difficulty::default(), 4),
            SchemaVersion::Current => (fields.code(4), 5),
        };
        let completed = fields.flag(tail);

        Task {
            id: fields.id(0),
            title: fields.text(1),
            description: fields.text(2),
            priority: fields.code::<Priority>(3),
            difficulty,
            completed,
            created: fields.time(tail + 1),
            completed_at: if completed {
                fields.optional_time(tail + 2)
            } else {
                None
            },
        }
    }
}

impl Record for MoodEntry {
    const KIND: &'static str = "mood entry";
    const LEGACY_FIELDS: usize = 5;

    fn id(&self) -> u64 {
        self.id
    }

    fn encode(&self) -> String {
        [
            self.id.to_string(),
            self.content.clone(),
            self.mood.code().to_string(),
            encode_time(Some(self.timestamp)),
            self.keywords.join(KEYWORD_DELIMITER),
            self.sentiment_score.to_string(),
        ]
        .join(FIELD_DELIMITER)
    }

    fn decode(line: &str) -> Self {
        let fields = Fields::split(line);
        let sentiment_score = match Self::schema_of(line) {
            SchemaVersion::Legacy => 0.0,
            SchemaVersion::Current => fields.score(5),
        };

        MoodEntry {
            id: fields.id(0),
            content: fields.text(1),
            mood: fields.code::<Mood>(2),
            timestamp: fields.time(3),
            keywords: fields.keywords(4),
            sentiment_score,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("The {field} cannot contain '{delimiter}'")]
    ContainsDelimiter {
        field: &'static str,
        delimiter: &'static str,
    },

    #[error("The {field} cannot span multiple lines")]
    ContainsNewline { field: &'static str },
}

/// Checks that a free-text value survives a round trip through the codec.
pub fn check_text_field(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.contains(['\n', '\r']) {
        return Err(FieldError::ContainsNewline { field });
    }
    if value.contains(FIELD_DELIMITER) {
        return Err(FieldError::ContainsDelimiter {
            field,
            delimiter: FIELD_DELIMITER,
        });
    }
    Ok(())
}

/// Like [`check_text_field`], but keywords also may not contain the keyword separator.
pub fn check_keyword(value: &str) -> Result<(), FieldError> {
    check_text_field("keyword", value)?;
    if value.contains(KEYWORD_DELIMITER) {
        return Err(FieldError::ContainsDelimiter {
            field: "keyword",
            delimiter: KEYWORD_DELIMITER,
        });
    }
    Ok(())
}
