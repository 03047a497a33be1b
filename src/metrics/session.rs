use std::time::{Duration, Instant};

use crate::game::GameStatus;

/// In-memory statistics for one run of the program
pub struct SessionStats {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub rounds_played: u32,
    pub boards_cleared: u32,
    round_open: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            rounds_played: 0,
            boards_cleared: 0,
            round_open: true,
        }
    }

    /// Refresh the round timer; frozen once the round has ended
    pub fn update(&mut self) {
        if self.round_open {
            self.elapsed_time = self.round_start.elapsed();
        }
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.round_open = true;
    }

    /// Record a finished round. Only the first call per round counts.
    pub fn on_round_end(&mut self, status: GameStatus, final_score: u32) {
        if !self.round_open || status.is_running() {
            return;
        }
        self.update();
        self.round_open = false;

        self.rounds_played += 1;
        if status == GameStatus::Cleared {
            self.boards_cleared += 1;
        }
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
