//! Small utility helpers used across modules.

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  if needle.is_empty() { return true; }
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Log-safe truncation for user-supplied strings (search terms, question text).
pub fn trunc_for_log(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    None => s.to_string(),
    Some((cut, _)) => format!("{}… ({} bytes total)", &s[..cut], s.len()),
  }
}
