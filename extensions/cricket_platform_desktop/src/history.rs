//! Top-level history tracking for engines that do not expose their back stack.

/// Committed top-level URLs, oldest first.
///
/// The engine reports finished loads; a load that completes while a back step
/// is pending is the engine landing on the previous entry and is not recorded
/// as a new one. A pending back is dropped as soon as the engine accepts a
/// navigation to anywhere other than the expected landing page.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HistoryTracker {
    entries: Vec<String>,
    pending_back: Option<String>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished top-level load.
    pub fn record_finished(&mut self, url: &str) {
        if self.pending_back.take().is_some() {
            if let Some(last) = self.entries.last_mut() {
                if last.as_str() != url {
                    // Landed somewhere other than expected (redirect); trust the engine.
                    *last = url.to_string();
                }
                return;
            }
        }
        if self.entries.last().map(String::as_str) != Some(url) {
            self.entries.push(url.to_string());
        }
    }

    /// Record that the engine accepted a top-level navigation request.
    pub fn note_navigation(&mut self, url: &str) {
        if self
            .pending_back
            .as_deref()
            .is_some_and(|expected| expected != url)
        {
            self.pending_back = None;
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    /// Drop the current entry ahead of asking the engine to go back. Returns
    /// the URL the engine is expected to land on.
    pub fn begin_back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.entries.pop();
        self.pending_back = self.entries.last().cloned();
        self.entries.last().map(String::as_str)
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "https://anujloomba.github.io/bccb_refactored/";
    const TEAMS: &str = "https://anujloomba.github.io/bccb_refactored/teams";

    #[test]
    fn records_distinct_loads_and_ignores_reloads() {
        let mut history = HistoryTracker::new();
        history.record_finished(HOME);
        history.record_finished(HOME);
        history.record_finished(TEAMS);

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(TEAMS));
        assert!(history.can_go_back());
    }

    #[test]
    fn back_pops_and_swallows_landing_load() {
        let mut history = HistoryTracker::new();
        history.record_finished(HOME);
        history.record_finished(TEAMS);

        assert_eq!(history.begin_back(), Some(HOME));
        history.record_finished(HOME);

        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), Some(HOME));
        assert!(!history.can_go_back());
    }

    #[test]
    fn back_landing_elsewhere_replaces_entry() {
        let mut history = HistoryTracker::new();
        history.record_finished(HOME);
        history.record_finished(TEAMS);

        history.begin_back();
        history.record_finished("https://anujloomba.github.io/bccb_refactored/?from=back");

        assert_eq!(history.len(), 1);
        assert_eq!(
            history.current(),
            Some("https://anujloomba.github.io/bccb_refactored/?from=back")
        );
    }

    #[test]
    fn new_navigation_cancels_back_that_never_landed() {
        const LEAGUE: &str = "https://anujloomba.github.io/bccb_refactored/league";
        let mut history = HistoryTracker::new();
        history.record_finished(HOME);
        history.record_finished(TEAMS);

        // The engine ignores history.back(); the user follows a link instead.
        assert_eq!(history.begin_back(), Some(HOME));
        history.note_navigation(LEAGUE);
        history.record_finished(LEAGUE);

        assert_eq!(history.len(), 2);
        assert_eq!(history.current(), Some(LEAGUE));
        assert!(history.can_go_back());
    }

    #[test]
    fn back_navigation_request_keeps_pending_back() {
        let mut history = HistoryTracker::new();
        history.record_finished(HOME);
        history.record_finished(TEAMS);

        history.begin_back();
        history.note_navigation(HOME);
        history.record_finished(HOME);

        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
    }

    #[test]
    fn single_entry_cannot_go_back() {
        let mut history = HistoryTracker::new();
        assert!(history.is_empty());
        assert_eq!(history.begin_back(), None);

        history.record_finished(HOME);
        assert_eq!(history.begin_back(), None);
        assert_eq!(history.len(), 1);
    }
}
