use std::future::Future;

use crate::error::FetchError;

const FALLBACK_MESSAGE: &str = "request failed";

/// Phase of an asynchronous fetch. The terminal states are mutually
/// exclusive: a settled fetch is either `Success` or `Error`, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Minimal state machine around one asynchronous producer:
/// `Idle -> Loading -> (Success | Error)`.
///
/// The container performs no I/O of its own and does not suppress
/// overlapping runs; the loaders that embed it own that guard.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    status: FetchStatus,
    value: Option<T>,
    error: Option<String>,
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self {
            status: FetchStatus::Idle,
            value: None,
            error: None,
        }
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    /// Last successfully fetched value, retained across later runs.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the last successful value, leaving the status untouched.
    pub fn take_value(&mut self) -> Option<T> {
        self.value.take()
    }

    /// Present only while `status == Error`.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a fetch as dispatched. Clears any previous error so the two
    /// terminal states never coexist.
    pub fn begin(&mut self) {
        self.status = FetchStatus::Loading;
        self.error = None;
    }

    pub fn succeed(&mut self, value: T) {
        self.status = FetchStatus::Success;
        self.value = Some(value);
        self.error = None;
    }

    /// Records a failure. Empty messages fall back to a generic one so the
    /// rendering layer always has something to display.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status = FetchStatus::Error;
        self.error = Some(if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        });
    }

    /// Drives one producer through the machine and reports its outcome.
    pub async fn run<F, Fut>(&mut self, producer: F) -> Result<(), FetchError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        self.begin();
        match producer().await {
            Ok(value) => {
                self.succeed(value);
                Ok(())
            }
            Err(err) => {
                self.fail(err.to_string());
                Err(err)
            }
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_no_value_or_error() {
        let state = FetchState::<u32>::new();
        assert_eq!(state.status(), FetchStatus::Idle);
        assert!(state.value().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut state = FetchState::<u32>::new();
        state.fail("boom");
        assert_eq!(state.status(), FetchStatus::Error);

        state.begin();
        assert_eq!(state.status(), FetchStatus::Loading);
        assert!(state.error().is_none());
    }

    #[test]
    fn empty_failure_message_falls_back_to_generic() {
        let mut state = FetchState::<u32>::new();
        state.fail("  ");
        assert_eq!(state.error(), Some("request failed"));
    }

    #[test]
    fn success_retains_value_after_a_later_failure() {
        let mut state = FetchState::new();
        state.succeed(42u32);
        state.fail("boom");
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.value(), Some(&42));
    }

    #[tokio::test]
    async fn run_settles_to_success() {
        let mut state = FetchState::new();
        let outcome = state.run(|| async { Ok(3u32) }).await;
        assert!(outcome.is_ok());
        assert_eq!(state.status(), FetchStatus::Success);
        assert_eq!(state.value(), Some(&3));
    }

    #[tokio::test]
    async fn run_settles_to_error_and_keeps_message() {
        let mut state = FetchState::<u32>::new();
        let outcome = state
            .run(|| async { Err(FetchError::transient("offline")) })
            .await;
        assert!(outcome.is_err());
        assert_eq!(state.status(), FetchStatus::Error);
        assert_eq!(state.error(), Some("offline"));
    }
}
