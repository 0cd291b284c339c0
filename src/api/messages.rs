//! Shared, append-only message log
//!
//! The user-facing side of failure reporting: every wrapped call appends one
//! short line here. Handles are cheap clones of the same underlying log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line to the log
    pub fn append(&self, line: impl Into<String>) {
        self.lock().push(line.into());
    }

    /// Snapshot of every line appended so far, oldest first
    pub fn lines(&self) -> Vec<String> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave a Vec half-pushed, so a
    // poisoned log is still usable.
    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_clear() {
        let log = MessageLog::new();
        assert!(log.is_empty());

        log.append("HeroService: fetched heroes");
        log.append("HeroService: fetched hero id=11");
        assert_eq!(log.len(), 2);
        assert_eq!(
            log.lines(),
            vec!["HeroService: fetched heroes", "HeroService: fetched hero id=11"]
        );

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_clones_share_the_same_log() {
        let log = MessageLog::new();
        let other = log.clone();

        other.append("from the clone");
        assert_eq!(log.lines(), vec!["from the clone"]);
    }

    #[test]
    fn test_appends_from_many_threads() {
        let log = MessageLog::new();
        let handles: Vec<_> = (0..8)
            .map(|n| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        log.append(format!("{}-{}", n, i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.len(), 200);
    }
}
