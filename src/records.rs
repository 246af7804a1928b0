//! In-process session records
//!
//! The game loops sessions until the process quits; this tracks how far each
//! session got. Nothing here is written to disk: state does not persist
//! across process runs.

/// Outcome of one finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEntry {
    /// Wave the session ended on
    pub wave: u32,
    /// Ticks survived
    pub ticks: u64,
}

/// Finished-session log for the current process run
#[derive(Debug, Clone, Default)]
pub struct SessionRecords {
    entries: Vec<SessionEntry>,
}

impl SessionRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished session
    pub fn push(&mut self, wave: u32, ticks: u64) {
        self.entries.push(SessionEntry { wave, ticks });
    }

    pub fn sessions(&self) -> usize {
        self.entries.len()
    }

    /// Highest wave reached across all finished sessions
    pub fn best_wave(&self) -> Option<u32> {
        self.entries.iter().map(|e| e.wave).max()
    }

    /// Entries sorted best-first (wave, then survival time)
    pub fn ranked(&self) -> Vec<SessionEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.wave.cmp(&a.wave).then(b.ticks.cmp(&a.ticks)));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_records() {
        let records = SessionRecords::new();
        assert_eq!(records.sessions(), 0);
        assert_eq!(records.best_wave(), None);
        assert!(records.ranked().is_empty());
    }

    #[test]
    fn test_best_wave() {
        let mut records = SessionRecords::new();
        records.push(2, 1000);
        records.push(5, 4000);
        records.push(3, 2500);
        assert_eq!(records.sessions(), 3);
        assert_eq!(records.best_wave(), Some(5));
    }

    #[test]
    fn test_ranked_order() {
        let mut records = SessionRecords::new();
        records.push(3, 100);
        records.push(3, 900);
        records.push(1, 50);
        let ranked = records.ranked();
        assert_eq!(ranked[0], SessionEntry { wave: 3, ticks: 900 });
        assert_eq!(ranked[1], SessionEntry { wave: 3, ticks: 100 });
        assert_eq!(ranked[2], SessionEntry { wave: 1, ticks: 50 });
    }
}
