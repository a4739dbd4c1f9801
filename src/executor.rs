use tokio::time::sleep;

use crate::{
    AttemptKind, CancelSignal, ExecutorError, FetchError, RequestSpec, Response, Result,
    RetryDecision, RetryPolicy, Transport,
};

/// Drives the attempt loop: send, classify, sleep, repeat.
///
/// Holds no mutable state, so one executor can serve concurrent calls.
#[derive(Clone, Debug)]
pub struct RetryExecutor<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T> RetryExecutor<T> {
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl<T: Transport> RetryExecutor<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Performs `spec`, retrying per the policy.
    pub async fn execute(&self, spec: &RequestSpec) -> Result<Response> {
        self.execute_with_cancel(spec, None).await
    }

    /// Like [`RetryExecutor::execute`], but gives up with
    /// [`FetchError::Cancelled`] as soon as `cancel` fires, whether a request
    /// is in flight or the executor is waiting to retry.
    pub async fn execute_with_cancel(
        &self,
        spec: &RequestSpec,
        mut cancel: Option<CancelSignal>,
    ) -> Result<Response> {
        let mut trail = Vec::new();
        let mut attempt = 1usize;

        loop {
            if cancel.as_ref().is_some_and(CancelSignal::is_cancelled) {
                return Err(self.cancelled(spec, attempt - 1, trail));
            }

            tracing::debug!(method = %spec.method, url = %spec.url, attempt, "sending request");

            let sent = match cancel.as_mut() {
                Some(signal) => tokio::select! {
                    biased;
                    _ = signal.cancelled() => return Err(self.cancelled(spec, attempt, trail)),
                    sent = self.transport.send(spec) => sent,
                },
                None => self.transport.send(spec).await,
            };

            let outcome = match sent {
                Ok(outcome) => outcome,
                Err(err) => {
                    tracing::warn!(
                        method = %spec.method,
                        url = %spec.url,
                        attempt,
                        error = %err,
                        "request rejected by transport"
                    );
                    return Err(failure(spec, attempt, trail, FetchError::InvalidRequest(err)));
                }
            };

            let kind = outcome.kind();
            trail.push(kind);

            match self.policy.decide(attempt, outcome) {
                RetryDecision::Succeed(response) => {
                    tracing::debug!(
                        method = %spec.method,
                        url = %spec.url,
                        attempt,
                        status = response.status,
                        "request succeeded"
                    );
                    return Ok(response);
                }
                RetryDecision::Fail(cause) => {
                    tracing::warn!(
                        method = %spec.method,
                        url = %spec.url,
                        attempt,
                        outcome = %kind,
                        "request failed"
                    );
                    return Err(failure(spec, attempt, trail, cause));
                }
                RetryDecision::Retry(delay) => {
                    tracing::warn!(
                        method = %spec.method,
                        url = %spec.url,
                        attempt,
                        outcome = %kind,
                        delay_ms = delay.as_millis() as u64,
                        "retrying request"
                    );
                    match cancel.as_mut() {
                        Some(signal) => tokio::select! {
                            biased;
                            _ = signal.cancelled() => return Err(self.cancelled(spec, attempt, trail)),
                            _ = sleep(delay) => {}
                        },
                        None => sleep(delay).await,
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn cancelled(
        &self,
        spec: &RequestSpec,
        attempts: usize,
        trail: Vec<AttemptKind>,
    ) -> ExecutorError {
        tracing::debug!(method = %spec.method, url = %spec.url, attempts, "request cancelled");
        failure(spec, attempts, trail, FetchError::Cancelled)
    }
}

fn failure(
    spec: &RequestSpec,
    attempts: usize,
    trail: Vec<AttemptKind>,
    cause: FetchError,
) -> ExecutorError {
    ExecutorError {
        method: spec.method,
        url: spec.url.clone(),
        attempts,
        trail,
        cause,
    }
}
