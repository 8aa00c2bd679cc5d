//! Question and category stores.
//!
//! The HTTP layer only sees the `QuestionStore` / `CategoryStore` traits; every
//! operation returns `Result<_, StoreError>` and the boundary decides which
//! HTTP status a failure becomes. `MemoryStore` is the in-process backend:
//! ordered maps behind tokio RwLocks, ids handed out monotonically and never reused.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::domain::{Category, NewQuestion, Question};
use crate::util::contains_ignore_case;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("no question with id {0}")]
  NotFound(i64),
  #[error("rejected: {0}")]
  Rejected(String),
  /// Backend unreachable. `MemoryStore` never produces it.
  #[allow(dead_code)]
  #[error("store unavailable: {0}")]
  Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait QuestionStore: Send + Sync {
  /// Every question, ascending by id.
  async fn all(&self) -> StoreResult<Vec<Question>>;

  /// Questions of one category, ascending by id.
  async fn by_category(&self, category: i64) -> StoreResult<Vec<Question>>;

  /// Questions whose text contains `term` ignoring case, ascending by id.
  async fn search(&self, term: &str) -> StoreResult<Vec<Question>>;

  async fn get(&self, id: i64) -> StoreResult<Option<Question>>;

  /// Store a new question and return it with its assigned id.
  async fn insert(&self, new: NewQuestion) -> StoreResult<Question>;

  async fn delete(&self, id: i64) -> StoreResult<()>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
  /// Every category, ascending by id.
  async fn categories(&self) -> StoreResult<Vec<Category>>;

  async fn category(&self, id: i64) -> StoreResult<Option<Category>>;
}

pub struct MemoryStore {
  questions: RwLock<BTreeMap<i64, Question>>,
  categories: RwLock<BTreeMap<i64, Category>>,
  next_id: AtomicI64,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self {
      questions: RwLock::new(BTreeMap::new()),
      categories: RwLock::new(BTreeMap::new()),
      next_id: AtomicI64::new(1),
    }
  }

  /// Build a store from categories and questions. Questions the store rejects
  /// are skipped with a warning so one bad bank entry cannot block startup.
  pub async fn with_bank(categories: Vec<Category>, questions: Vec<NewQuestion>) -> Self {
    let store = Self::new();
    {
      let mut cats = store.categories.write().await;
      for c in categories {
        cats.insert(c.id, c);
      }
    }
    let mut loaded = 0usize;
    for q in questions {
      match store.insert(q).await {
        Ok(_) => loaded += 1,
        Err(e) => tracing::warn!(target: "trivia_backend", error = %e, "Skipping bank question"),
      }
    }
    info!(target: "trivia_backend", questions = loaded, categories = store.categories.read().await.len(), "Question bank loaded");
    store
  }

  fn validate(&self, new: &NewQuestion, cats: &BTreeMap<i64, Category>) -> StoreResult<()> {
    if new.question.trim().is_empty() {
      return Err(StoreError::Rejected("question text is empty".into()));
    }
    if new.answer.trim().is_empty() {
      return Err(StoreError::Rejected("answer text is empty".into()));
    }
    if !(1..=5).contains(&new.difficulty) {
      return Err(StoreError::Rejected(format!("difficulty {} outside 1..=5", new.difficulty)));
    }
    if !cats.contains_key(&new.category) {
      return Err(StoreError::Rejected(format!("unknown category {}", new.category)));
    }
    Ok(())
  }
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

#[async_trait]
impl QuestionStore for MemoryStore {
  async fn all(&self) -> StoreResult<Vec<Question>> {
    Ok(self.questions.read().await.values().cloned().collect())
  }

  async fn by_category(&self, category: i64) -> StoreResult<Vec<Question>> {
    let qs = self.questions.read().await;
    Ok(qs.values().filter(|q| q.category == category).cloned().collect())
  }

  async fn search(&self, term: &str) -> StoreResult<Vec<Question>> {
    let qs = self.questions.read().await;
    Ok(qs.values().filter(|q| contains_ignore_case(&q.question, term)).cloned().collect())
  }

  async fn get(&self, id: i64) -> StoreResult<Option<Question>> {
    Ok(self.questions.read().await.get(&id).cloned())
  }

  #[instrument(level = "debug", skip(self, new), fields(category = new.category, difficulty = new.difficulty))]
  async fn insert(&self, new: NewQuestion) -> StoreResult<Question> {
    // Hold the category lock across the write so a category can't vanish mid-insert.
    let cats = self.categories.read().await;
    self.validate(&new, &cats)?;
    let id = self.next_id.fetch_add(1, Ordering::SeqCst);
    let q = new.with_id(id);
    self.questions.write().await.insert(id, q.clone());
    debug!(target: "trivia", id, "Question stored");
    Ok(q)
  }

  async fn delete(&self, id: i64) -> StoreResult<()> {
    match self.questions.write().await.remove(&id) {
      Some(_) => Ok(()),
      None => Err(StoreError::NotFound(id)),
    }
  }
}

#[async_trait]
impl CategoryStore for MemoryStore {
  async fn categories(&self) -> StoreResult<Vec<Category>> {
    Ok(self.categories.read().await.values().cloned().collect())
  }

  async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
    Ok(self.categories.read().await.get(&id).cloned())
  }
}
