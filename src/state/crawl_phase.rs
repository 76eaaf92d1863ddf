/// Crawl phase definitions for the scheduler's state machine
///
/// A run moves `Idle → Running`, bounces between `Running` and `Draining` while
/// the last pending URL keeps discovering new ones, and ends in `Done`.
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Seeded but not started
    Idle,

    /// Processing URLs with more still pending
    Running,

    /// Processing the last pending URL
    Draining,

    /// Frontier is empty; the run is over
    Done,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Running)
                | (Self::Draining, Self::Done)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(CrawlPhase::Idle.can_transition_to(CrawlPhase::Running));
        assert!(CrawlPhase::Running.can_transition_to(CrawlPhase::Draining));
        assert!(CrawlPhase::Draining.can_transition_to(CrawlPhase::Running));
        assert!(CrawlPhase::Draining.can_transition_to(CrawlPhase::Done));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!CrawlPhase::Idle.can_transition_to(CrawlPhase::Done));
        assert!(!CrawlPhase::Running.can_transition_to(CrawlPhase::Done));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Running));
        assert!(!CrawlPhase::Done.can_transition_to(CrawlPhase::Idle));
        assert!(!CrawlPhase::Running.can_transition_to(CrawlPhase::Running));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlPhase::Idle), "idle");
        assert_eq!(format!("{}", CrawlPhase::Draining), "draining");
        assert_eq!(CrawlPhase::Done.as_str(), "done");
    }
}
