//! Shooter high score
//!
//! A single value, stored as a plain decimal string under a fixed key.

use crate::ArcadeError;
use crate::consts::HIGH_SCORE_KEY;
use crate::persistence::KeyValueStore;

/// Best shooter score seen across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Check if a score beats the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Read the stored best, treating missing or unreadable data as zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best = match store.get(HIGH_SCORE_KEY) {
            Some(raw) => parse_score(&raw).unwrap_or_else(|| {
                log::warn!("Unreadable high score {:?}, starting from 0", raw);
                0
            }),
            None => 0,
        };
        log::info!("High score: {}", best);
        Self { best }
    }

    /// Record a score; persists and returns true only for a new best
    pub fn submit(&mut self, score: u64, store: &mut dyn KeyValueStore) -> Result<bool, ArcadeError> {
        if !self.qualifies(score) {
            return Ok(false);
        }
        self.best = score;
        store.set(HIGH_SCORE_KEY, &score.to_string())?;
        log::info!("New high score saved: {}", score);
        Ok(true)
    }
}

/// Accepts integer strings and the float form a JS `String(n)` may produce
fn parse_score(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.floor() as u64)
    })
}
