//
//  satellite-link
//  api/context.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Per-call cancellation and deadlines.
//!
//! Every operation has a `*_with_context` variant taking a [`CallContext`]. The
//! plain variant uses [`CallContext::background`], which never expires and cannot
//! be cancelled. A context only governs the call it is passed to.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::api::common::Error;

/// Cancellation and deadline signal for a single call.
///
/// The deadline covers the whole call, including every retry attempt and the
/// backoff sleeps between them.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use satellite_link::CallContext;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let ctx = CallContext::background()
///     .with_timeout(Duration::from_secs(5))
///     .with_cancellation(token.clone());
/// assert!(ctx.deadline().is_some());
///
/// // Cancelling the token aborts the call, including any pending retry.
/// token.cancel();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancellation: Option<CancellationToken>,
}

impl CallContext {
    /// A context with no deadline and no cancellation.
    pub fn background() -> Self {
        Self::default()
    }

    /// Sets a deadline `timeout` from now.
    ///
    /// A timeout too large to be represented as an instant leaves the context
    /// without a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Sets an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Attaches a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The deadline of this context, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` if the attached token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    /// Runs `call` under this context.
    ///
    /// Cancellation wins over completion when both are ready, so an already
    /// cancelled context never starts the call.
    pub(crate) async fn run<T, F>(&self, call: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        let cancelled = async {
            match &self.cancellation {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };

        let bounded = async {
            match self.deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
                    Ok(result) => result,
                    Err(_) => Err(Error::Timeout("context deadline exceeded".to_string())),
                },
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Err(Error::Cancelled),
            result = bounded => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let result = CallContext::background().run(async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = CallContext::background().with_timeout(Duration::from_millis(20));
        let result: Result<(), Error> = ctx
            .run(async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            })
            .await;
        match result {
            Err(Error::Timeout(message)) => assert!(message.contains("deadline exceeded")),
            other => panic!("expected timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancelled_context_never_runs() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = CallContext::background().with_cancellation(token);
        assert!(ctx.is_cancelled());

        let ran = AtomicBool::new(false);
        let result: Result<(), Error> = ctx
            .run(async {
                ran.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(Error::Cancelled)));
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_means_no_deadline() {
        let ctx = CallContext::background().with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());

        let result = ctx.run(async { Ok("done") }).await;
        assert_eq!(result.unwrap(), "done");
    }
}
