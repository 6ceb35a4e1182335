use std::time::Duration;

use tracing::{debug, warn};

use crate::{ChatModel, LlmRequest, LlmResponse, RolecheckError};

/// How many times a model call is attempted and how long to wait in between.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// One initial attempt plus one immediate retry.
    pub fn single_retry() -> Self {
        Self::new(2, Duration::ZERO)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single_retry()
    }
}

/// Final result of a retried call together with the number of attempts made.
#[derive(Debug)]
pub struct RetryOutcome {
    pub result: Result<LlmResponse, RolecheckError>,
    pub attempts: usize,
}

pub struct Retrying<M> {
    model: M,
    policy: RetryPolicy,
}

impl<M> Retrying<M> {
    pub fn new(model: M, policy: RetryPolicy) -> Self {
        Self { model, policy }
    }
}

impl<M: ChatModel> Retrying<M> {
    /// Runs the call until it succeeds or the policy is exhausted.
    ///
    /// Every failure is retried regardless of its kind; each failed attempt is
    /// logged at `warn` level.
    pub async fn invoke_tracked(&self, request: LlmRequest) -> RetryOutcome {
        let max_attempts = self.policy.max_attempts;
        if max_attempts == 0 {
            return RetryOutcome {
                result: Err(RolecheckError::MaxRetriesExceeded {
                    max: 0,
                    last_error: "no attempts permitted".to_string(),
                }),
                attempts: 0,
            };
        }

        let mut last_error = String::new();
        for attempt in 1..=max_attempts {
            match self.model.invoke(request.clone()).await {
                Ok(response) => {
                    debug!(attempt, max_attempts, "model call succeeded");
                    return RetryOutcome {
                        result: Ok(response),
                        attempts: attempt,
                    };
                }
                Err(error) => {
                    warn!(attempt, max_attempts, error = %error, "model call failed");
                    last_error = error.to_string();
                    if attempt < max_attempts && !self.policy.delay.is_zero() {
                        tokio::time::sleep(self.policy.delay).await;
                    }
                }
            }
        }

        RetryOutcome {
            result: Err(RolecheckError::MaxRetriesExceeded {
                max: max_attempts,
                last_error,
            }),
            attempts: max_attempts,
        }
    }
}

#[async_trait::async_trait]
impl<M: ChatModel> ChatModel for Retrying<M> {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        self.invoke_tracked(request).await.result
    }
}

pub trait ChatModelExt: ChatModel + Sized {
    fn with_retries(self, policy: RetryPolicy) -> Retrying<Self> {
        Retrying::new(self, policy)
    }
}

impl<T: ChatModel> ChatModelExt for T {}
