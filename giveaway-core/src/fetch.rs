use std::fmt;

use crate::error::FetchError;

/// Identifier of one issued request. Allocated per resource, strictly
/// increasing; `RequestId(0)` is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle of one remotely loaded resource.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FetchState<T> {
    #[default]
    Idle,
    Pending,
    Ready(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A resource's state together with the id of its latest issued request.
#[derive(Debug)]
pub(crate) struct Tracked<T> {
    state: FetchState<T>,
    latest: RequestId,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            latest: RequestId(0),
        }
    }
}

impl<T> Tracked<T> {
    pub(crate) fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub(crate) fn latest(&self) -> RequestId {
        self.latest
    }

    /// Issues a new request id and moves to `Pending`, whatever the prior state.
    pub(crate) fn begin(&mut self) -> RequestId {
        self.latest = RequestId(self.latest.0 + 1);
        self.state = FetchState::Pending;
        self.latest
    }

    /// Back to `Idle`; any in-flight response becomes stale.
    pub(crate) fn reset(&mut self) {
        self.latest = RequestId(self.latest.0 + 1);
        self.state = FetchState::Idle;
    }

    /// Applies `result` only if `request` is still the latest issued id.
    pub(crate) fn settle(&mut self, request: RequestId, result: Result<T, FetchError>) -> bool {
        if request != self.latest || !self.state.is_pending() {
            return false;
        }
        self.state = match result {
            Ok(value) => FetchState::Ready(value),
            Err(err) => FetchState::Failed(err),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_clears_failure_and_allocates_increasing_ids() {
        let mut tracked: Tracked<u32> = Tracked::default();
        let first = tracked.begin();
        assert!(tracked.settle(first, Err(FetchError::Network("down".into()))));
        assert!(tracked.state().error().is_some());

        let second = tracked.begin();
        assert!(second > first);
        assert_eq!(tracked.state(), &FetchState::Pending);
    }

    #[test]
    fn stale_results_are_discarded() {
        let mut tracked: Tracked<&str> = Tracked::default();
        let old = tracked.begin();
        let new = tracked.begin();

        assert!(tracked.settle(new, Ok("new")));
        assert!(!tracked.settle(old, Ok("old")));
        assert_eq!(tracked.state(), &FetchState::Ready("new"));
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut tracked: Tracked<&str> = Tracked::default();
        let request = tracked.begin();
        tracked.reset();

        assert!(!tracked.settle(request, Ok("late")));
        assert_eq!(tracked.state(), &FetchState::Idle);
    }
}
