//! Quiz selection: one uniformly random question the player hasn't seen yet.
//!
//! The server keeps no quiz state. The client sends back every id it has been
//! served, and each draw is independent of the previous ones.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::Question;

/// Outcome of a draw, keeping "nothing to draw from" apart from "all drawn already".
#[derive(Debug, PartialEq, Eq)]
pub enum Draw {
  Next(Question),
  /// Candidates exist but every one is in the history.
  Exhausted,
  /// The category has no questions at all.
  NoCandidates,
}

/// Pick uniformly among `candidates` whose id is not in `previous`. `None` when none remain.
pub fn next_question<R: Rng + ?Sized>(
  candidates: &[Question],
  previous: &HashSet<i64>,
  rng: &mut R,
) -> Option<Question> {
  let remaining: Vec<&Question> = candidates.iter().filter(|q| !previous.contains(&q.id)).collect();
  remaining.choose(rng).map(|q| (*q).clone())
}

/// `next_question` plus the empty-category distinction the HTTP layer needs.
pub fn draw<R: Rng + ?Sized>(candidates: &[Question], previous: &HashSet<i64>, rng: &mut R) -> Draw {
  if candidates.is_empty() {
    return Draw::NoCandidates;
  }
  match next_question(candidates, previous, rng) {
    Some(q) => Draw::Next(q),
    None => Draw::Exhausted,
  }
}

/// Fixed seed for reproducible draws, otherwise fresh entropy.
pub fn quiz_rng(seed: Option<u64>) -> StdRng {
  match seed {
    Some(s) => StdRng::seed_from_u64(s),
    None => StdRng::from_entropy(),
  }
}
