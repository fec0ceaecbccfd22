use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const EMAIL_COLUMN: &str = "email";
pub const REVIEW_COLUMN: &str = "review text";
pub const RATE_COLUMN: &str = "rate";

/// One CSV row. `rate` stays 0 until the merge step assigns the
/// estimated happiness score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub fields: HashMap<String, String>,
    pub rate: i64,
}

impl Record {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields, rate: 0 }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn email(&self) -> &str {
        self.field(EMAIL_COLUMN).unwrap_or_default()
    }
}

/// Loaded review file: the header row in input column order plus the
/// record sequence in input row order.
#[derive(Debug, Clone, Default)]
pub struct ReviewTable {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl ReviewTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Email to happiness score, parsed from the completion response.
/// Scores are 1..=10 per the prompt contract but the range is not
/// enforced; on duplicate emails the last parsed entry wins.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    scores: HashMap<String, i64>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, email: String, score: i64) {
        self.scores.insert(email, score);
    }

    pub fn get(&self, email: &str) -> Option<i64> {
        self.scores.get(email).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
