use std::time::{Duration, Instant};

/// Session counters shown in the header line
pub struct GameMetrics {
    pub round_started: Instant,
    pub elapsed_time: Duration,
    pub games_finished: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            games_finished: 0,
        }
    }

    /// Refresh the round clock; it stops while the game is over
    pub fn update(&mut self, game_over: bool) {
        if !game_over {
            self.elapsed_time = self.round_started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.round_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self) {
        self.games_finished += 1;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
