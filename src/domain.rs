//! Domain models: questions, categories, and the quiz category filter.

use serde::{Deserialize, Serialize};

/// A stored trivia question. `id` is assigned by the store on insert.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub id: i64,
  pub question: String,
  pub answer: String,
  pub difficulty: i32,
  pub category: i64,
}

/// A question before the store has assigned it an id.
#[derive(Clone, Debug, Deserialize)]
pub struct NewQuestion {
  pub question: String,
  pub answer: String,
  pub difficulty: i32,
  pub category: i64,
}

impl NewQuestion {
  pub fn with_id(self, id: i64) -> Question {
    Question {
      id,
      question: self.question,
      answer: self.answer,
      difficulty: self.difficulty,
      category: self.category,
    }
  }
}

/// Category label. Serialized with `type` as the field name, as the front end expects.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
  pub id: i64,
  #[serde(rename = "type")]
  pub kind: String,
}

/// Which questions a quiz draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryFilter {
  All,
  Only(i64),
}

impl CategoryFilter {
  /// Id 0 is what the front end sends for "ALL"; so is the `click` type label.
  pub fn from_quiz_category(id: i64, kind: Option<&str>) -> Self {
    if id == 0 || kind.is_some_and(|k| k.eq_ignore_ascii_case("click")) {
      CategoryFilter::All
    } else {
      CategoryFilter::Only(id)
    }
  }
}

impl std::fmt::Display for CategoryFilter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      CategoryFilter::All => f.write_str("all"),
      CategoryFilter::Only(id) => write!(f, "{id}"),
    }
  }
}
