//! Public request/response structs for the HTTP endpoints (serde ready).
//! Field names follow what the trivia front end sends and reads.

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::{Category, Question};

/// `{id: type}` map. serde_json writes the integer keys as strings.
pub type CategoryMap = BTreeMap<i64, String>;

pub fn category_map(categories: &[Category]) -> CategoryMap {
    categories.iter().map(|c| (c.id, c.kind.clone())).collect()
}

//
// Queries / request bodies
//

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NewQuestionIn {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "loose_int")]
    pub difficulty: i64,
    #[serde(deserialize_with = "loose_int")]
    pub category: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchIn {
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizCategoryIn {
    #[serde(deserialize_with = "loose_int")]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuizIn {
    pub quiz_category: QuizCategoryIn,
    #[serde(default, deserialize_with = "loose_int_list")]
    pub previous_questions: Vec<i64>,
}

/// The front end sends select values as strings ("3"); accept both forms.
fn loose_int<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    int_from_value(serde_json::Value::deserialize(d)?)
}

/// Same leniency for every element of an id list.
fn loose_int_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i64>, D::Error> {
    Vec::<serde_json::Value>::deserialize(d)?
        .into_iter()
        .map(int_from_value)
        .collect()
}

fn int_from_value<E: de::Error>(v: serde_json::Value) -> Result<i64, E> {
    match v {
        serde_json::Value::Number(n) => n.as_i64().ok_or_else(|| E::custom("expected an integer")),
        serde_json::Value::String(s) => s.trim().parse().map_err(E::custom),
        other => Err(E::custom(format!("expected an integer, got {other}"))),
    }
}

//
// Responses
//

#[derive(Debug, Serialize)]
pub struct SuccessOut {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoriesOut {
    pub success: bool,
    pub categories: CategoryMap,
}

/// Listing shape shared by `/questions` and `/categories/{id}/questions`.
#[derive(Debug, Serialize)]
pub struct QuestionsOut {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchOut {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedOut {
    pub success: bool,
    pub created: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedOut {
    pub success: bool,
    pub deleted: i64,
}

/// `question: null` means the quiz is over for this history.
#[derive(Debug, Serialize)]
pub struct QuizOut {
    pub success: bool,
    pub question: Option<Question>,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}
