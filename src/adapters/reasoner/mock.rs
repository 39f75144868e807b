//! Mock reasoner for testing.
//!
//! Configurable to return queued records, inject transport errors, and
//! capture every request for verification - all without touching a real
//! provider.
//!
//! # Example
//!
//! ```ignore
//! let reasoner = MockReasoner::new()
//!     .with_record(RawClassification::reply_only("Bom dia!"))
//!     .with_error(ReasonerError::Timeout { timeout_secs: 30 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::classification::RawClassification;
use crate::ports::{Reasoner, ReasonerError, ReasonerInfo, ReasonerRequest};

/// A queued mock outcome.
#[derive(Debug)]
enum MockOutcome {
    Record(RawClassification),
    Error(ReasonerError),
}

/// Mock reasoner for testing.
#[derive(Debug, Clone, Default)]
pub struct MockReasoner {
    /// Queued outcomes, consumed in order.
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Captured requests for verification.
    calls: Arc<Mutex<Vec<ReasonerRequest>>>,
    /// Simulated latency per request.
    delay: Duration,
}

impl MockReasoner {
    /// Creates a mock with an empty queue.
    ///
    /// An exhausted queue yields empty records, so flows under test never
    /// see a transport error they did not ask for.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful record.
    pub fn with_record(self, record: RawClassification) -> Self {
        self.outcomes
            .lock()
            .expect("mock queue lock poisoned")
            .push_back(MockOutcome::Record(record));
        self
    }

    /// Queues a transport error.
    pub fn with_error(self, error: ReasonerError) -> Self {
        self.outcomes
            .lock()
            .expect("mock queue lock poisoned")
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets a simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call lock poisoned").len()
    }

    /// Snapshot of all captured requests.
    pub fn calls(&self) -> Vec<ReasonerRequest> {
        self.calls
            .lock()
            .expect("mock call lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Reasoner for MockReasoner {
    async fn infer(&self, request: ReasonerRequest) -> Result<RawClassification, ReasonerError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.calls
            .lock()
            .expect("mock call lock poisoned")
            .push(request);

        let outcome = self
            .outcomes
            .lock()
            .expect("mock queue lock poisoned")
            .pop_front();

        match outcome {
            Some(MockOutcome::Record(record)) => Ok(record),
            Some(MockOutcome::Error(error)) => Err(error),
            None => Ok(RawClassification::default()),
        }
    }

    fn info(&self) -> ReasonerInfo {
        ReasonerInfo::new("mock", "mock-reasoner-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ReasonerStep;

    fn request() -> ReasonerRequest {
        ReasonerRequest::new(ReasonerStep::Classify, "directive")
    }

    #[tokio::test]
    async fn returns_queued_records_in_order() {
        let reasoner = MockReasoner::new()
            .with_record(RawClassification::reply_only("first"))
            .with_record(RawClassification::reply_only("second"));

        let a = reasoner.infer(request()).await.unwrap();
        let b = reasoner.infer(request()).await.unwrap();

        assert_eq!(a.reply.as_deref(), Some("first"));
        assert_eq!(b.reply.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn returns_queued_errors() {
        let reasoner =
            MockReasoner::new().with_error(ReasonerError::Timeout { timeout_secs: 30 });

        let result = reasoner.infer(request()).await;

        assert!(matches!(result, Err(ReasonerError::Timeout { .. })));
    }

    #[tokio::test]
    async fn exhausted_queue_yields_empty_records() {
        let reasoner = MockReasoner::new();

        let record = reasoner.infer(request()).await.unwrap();

        assert!(record.reply.is_none());
        assert!(record.stage.is_none());
    }

    #[tokio::test]
    async fn captures_requests_for_verification() {
        let reasoner = MockReasoner::new();

        reasoner
            .infer(request().with_input("latest_message", "oi"))
            .await
            .unwrap();

        assert_eq!(reasoner.call_count(), 1);
        let calls = reasoner.calls();
        assert_eq!(calls[0].inputs[0].value, "oi");
    }

    #[tokio::test]
    async fn clones_share_the_queue() {
        let reasoner = MockReasoner::new().with_record(RawClassification::reply_only("only"));
        let clone = reasoner.clone();

        let a = clone.infer(request()).await.unwrap();
        let b = reasoner.infer(request()).await.unwrap();

        assert_eq!(a.reply.as_deref(), Some("only"));
        assert!(b.reply.is_none());
        assert_eq!(reasoner.call_count(), 2);
    }
}
