//! Application state: the question/category stores plus the few knobs the
//! handlers need (page size, optional quiz seed).
//!
//! Nothing here is mutated per request; the stores own their own locking.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::TriviaConfig;
use crate::paginate::PageRequest;
use crate::quiz::quiz_rng;
use crate::seeds::{seed_categories, seed_questions};
use crate::store::{CategoryStore, MemoryStore, QuestionStore};

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<dyn QuestionStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub page_size: usize,
    pub quiz_seed: Option<u64>,
}

impl AppState {
    /// Build state from config: built-in bank (unless disabled) followed by config entries.
    #[instrument(level = "info", skip_all)]
    pub async fn from_config(cfg: TriviaConfig) -> Self {
        let mut categories = if cfg.use_seed_bank { seed_categories() } else { Vec::new() };
        let mut questions = if cfg.use_seed_bank { seed_questions() } else { Vec::new() };
        categories.extend(cfg.categories);
        questions.extend(cfg.questions);

        let store = Arc::new(MemoryStore::with_bank(categories, questions).await);
        info!(target: "trivia_backend", page_size = cfg.page_size, seeded_quiz = cfg.quiz_seed.is_some(), "State ready");
        Self::with_store(store, cfg.page_size, cfg.quiz_seed)
    }

    /// One backend serving both traits.
    pub fn with_store<S>(store: Arc<S>, page_size: usize, quiz_seed: Option<u64>) -> Self
    where
        S: QuestionStore + CategoryStore + 'static,
    {
        Self {
            questions: store.clone(),
            categories: store,
            page_size,
            quiz_seed,
        }
    }

    /// Page request with the configured page size; `None` for a non-positive page.
    pub fn page_request(&self, page: i64) -> Option<PageRequest> {
        PageRequest::new(page, self.page_size)
    }

    pub fn rng(&self) -> rand::rngs::StdRng {
        quiz_rng(self.quiz_seed)
    }
}
