//! Session leaderboard
//!
//! Owned by the presentation layer and kept in memory only. The engine never
//! sees it.

/// Number of finished runs remembered per session
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq)]
pub struct HighScoreEntry {
    /// Food eaten
    pub score: u32,
    /// Snake length when the episode ended
    pub length: usize,
    /// Unix time in ms
    pub timestamp: f64,
}

/// Best runs of the session, highest score first
#[derive(Debug, Clone, Default)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run earns a slot if it scored at all and the board has room or it
    /// beats the weakest entry
    pub fn qualifies(&self, score: u32) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_some_and(|weakest| score > weakest.score))
    }

    /// Record a finished run. Returns its 1-based rank, or `None` if it did
    /// not make the board.
    pub fn add_score(&mut self, score: u32, length: usize, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        // Equal scores rank behind the run that got there first
        let slot = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            slot,
            HighScoreEntry {
                score,
                length,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);

        log::info!("Score {} is #{} this session", score, slot + 1);
        Some(slot + 1)
    }

    /// Highest score so far, 0 before any scoring run
    pub fn best(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }

    pub fn is_new_best(&self, score: u32) -> bool {
        score > self.best()
    }
}
