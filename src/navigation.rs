//! Client-side navigation.
//!
//! `History` is an entry stack like a browser tab's. A hard navigation wipes
//! it and starts a new generation: anything that captured the previous
//! generation (a view waiting on a response, say) is stale and must drop its
//! result.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

pub trait Navigator: Send + Sync {
    /// Add an entry on top of the current one.
    fn push(&self, path: &str);
    /// Swap the current entry, so going back skips it.
    fn replace(&self, path: &str);
    /// Full reload at `path`: every entry and all in-memory view state is discarded.
    fn hard_navigate(&self, path: &str);
    fn current(&self) -> Option<String>;
    /// Bumped on every hard navigation.
    fn generation(&self) -> u64;
}

#[derive(Debug, Default)]
struct HistoryState {
    entries: Vec<String>,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct History {
    state: Mutex<HistoryState>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Start at `path`, generation zero.
    pub fn starting_at(path: &str) -> Self {
        let history = History::new();
        history.state().entries.push(path.to_string());
        history
    }

    /// Snapshot of the entry stack, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.state().entries.clone()
    }

    /// Pop the current entry, returning where we land.
    pub fn back(&self) -> Option<String> {
        let mut state = self.state();
        if state.entries.len() > 1 {
            state.entries.pop();
        }
        state.entries.last().cloned()
    }

    fn state(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Navigator for History {
    fn push(&self, path: &str) {
        let mut state = self.state();
        if state.entries.last().map(String::as_str) != Some(path) {
            state.entries.push(path.to_string());
        }
    }

    fn replace(&self, path: &str) {
        let mut state = self.state();
        state.entries.pop();
        state.entries.push(path.to_string());
    }

    fn hard_navigate(&self, path: &str) {
        let mut state = self.state();
        state.entries.clear();
        state.entries.push(path.to_string());
        state.generation += 1;
        debug!(
            event_name = "navigation.reload",
            generation = state.generation,
            "hard navigation to {}",
            path
        );
    }

    fn current(&self) -> Option<String> {
        self.state().entries.last().cloned()
    }

    fn generation(&self) -> u64 {
        self.state().generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_hides_entry_from_back() {
        let history = History::starting_at("/dashboard");
        history.push("/messages");
        history.replace("/login");

        assert_eq!(history.current().as_deref(), Some("/login"));
        assert_eq!(history.back().as_deref(), Some("/dashboard"));
    }

    #[test]
    fn test_hard_navigate_discards_everything() {
        let history = History::starting_at("/dashboard");
        history.push("/properties");
        history.push("/properties/add");

        history.hard_navigate("/login");

        assert_eq!(history.entries(), vec!["/login".to_string()]);
        assert_eq!(history.generation(), 1);
        assert_eq!(history.back().as_deref(), Some("/login"));
    }

    #[test]
    fn test_push_same_path_twice_is_one_entry() {
        let history = History::new();
        history.push("/messages");
        history.push("/messages");
        assert_eq!(history.entries().len(), 1);
    }
}
