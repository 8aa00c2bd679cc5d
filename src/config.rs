//! Loading service configuration (page size, quiz seed, extra question bank) from TOML.
//!
//! See `TriviaConfig` for the expected schema. Every field is optional.

use serde::{Deserialize, Deserializer};
use tracing::{error, info, warn};

use crate::domain::{Category, NewQuestion};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone, Debug, Deserialize)]
pub struct TriviaConfig {
  /// Values below 1 fall back to `DEFAULT_PAGE_SIZE` instead of failing the whole file.
  #[serde(default = "default_page_size", deserialize_with = "clamped_page_size")]
  pub page_size: usize,
  /// Fixed seed for quiz draws. Unset means a fresh entropy seed per draw.
  #[serde(default)]
  pub quiz_seed: Option<u64>,
  #[serde(default = "default_true")]
  pub use_seed_bank: bool,
  #[serde(default)]
  pub categories: Vec<Category>,
  #[serde(default)]
  pub questions: Vec<NewQuestion>,
}

fn default_page_size() -> usize { DEFAULT_PAGE_SIZE }
fn default_true() -> bool { true }

fn clamped_page_size<'de, D: Deserializer<'de>>(d: D) -> Result<usize, D::Error> {
  let raw = i64::deserialize(d)?;
  match usize::try_from(raw) {
    Ok(n) if n >= 1 => Ok(n),
    _ => {
      warn!(target: "trivia_backend", page_size = raw, "page_size must be >= 1; using {}", DEFAULT_PAGE_SIZE);
      Ok(DEFAULT_PAGE_SIZE)
    }
  }
}

impl Default for TriviaConfig {
  fn default() -> Self {
    Self {
      page_size: DEFAULT_PAGE_SIZE,
      quiz_seed: None,
      use_seed_bank: true,
      categories: Vec::new(),
      questions: Vec::new(),
    }
  }
}

impl TriviaConfig {
  pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(s)
  }
}

/// Load `TriviaConfig` from TRIVIA_CONFIG_PATH; defaults when the variable is unset.
pub fn load_config_from_env() -> TriviaConfig {
  match std::env::var("TRIVIA_CONFIG_PATH") {
    Ok(path) => load_config_from_path(&path),
    Err(_) => TriviaConfig::default(),
  }
}

/// Read and parse one config file. IO or parse errors are logged and yield defaults.
pub fn load_config_from_path(path: &str) -> TriviaConfig {
  match std::fs::read_to_string(path) {
    Ok(s) => match TriviaConfig::from_toml_str(&s) {
      Ok(cfg) => {
        info!(target: "trivia_backend", %path, page_size = cfg.page_size, extra_questions = cfg.questions.len(), "Loaded trivia config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "trivia_backend", %path, error = %e, "Failed to parse TOML config");
        TriviaConfig::default()
      }
    },
    Err(e) => {
      error!(target: "trivia_backend", %path, error = %e, "Failed to read TOML config file");
      TriviaConfig::default()
    }
  }
}

/// Listening port from PORT, falling back to the default on absence or garbage.
pub fn port_from_env() -> u16 {
  std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .unwrap_or(DEFAULT_PORT)
}
