use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Serialize, Debug, Clone, PartialEq, Deserialize)]
pub struct RunStats {
    pub countries_listed: usize,
    pub countries_fetched: usize,
    pub countries_skipped: usize,
    pub leaders_written: usize,
    pub leaders_without_url: usize,
    pub start_time: u64, // Time in milliseconds since UNIX_EPOCH
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            countries_listed: 0,
            countries_fetched: 0,
            countries_skipped: 0,
            leaders_written: 0,
            leaders_without_url: 0,
            start_time: current_time_millis(),
        }
    }

    pub fn elapsed_millis(&self) -> u64 {
        current_time_millis().saturating_sub(self.start_time)
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_and_now() {
        let stats = RunStats::new();
        assert_eq!(stats.countries_fetched + stats.countries_skipped, 0);
        assert_eq!(stats.leaders_written, 0);
        assert!(stats.start_time > 0);
        assert!(stats.elapsed_millis() < 60_000);
    }
}
