use std::time::Duration;

use crate::{
    CancelSignal, ClientOptions, Method, ReqwestTransport, RequestArgs, RequestSpec, Response,
    Result, RetryExecutor, RetryPolicy, Transport,
};

/// Per-verb HTTP entry points sharing one retry policy.
#[derive(Clone, Debug)]
pub struct RestClient<T = ReqwestTransport> {
    executor: RetryExecutor<T>,
}

impl RestClient<ReqwestTransport> {
    /// Creates a client with the default timeout and `[1s, 3s, 10s]` retry schedule.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::default())
    }

    /// Creates a client configured from the environment.
    ///
    /// See [`ClientOptions::from_env`] for the variables read.
    pub fn from_env() -> std::result::Result<Self, String> {
        Ok(Self::new().with_options(ClientOptions::from_env()?))
    }

    /// Applies timeout and retry options.
    pub fn with_options(self, opts: ClientOptions) -> Self {
        let transport = ReqwestTransport::with_client(
            self.executor.transport().client().clone(),
            Duration::from_millis(opts.timeout_ms),
        );
        Self {
            executor: RetryExecutor::new(transport, RetryPolicy::from(&opts)),
        }
    }
}

impl Default for RestClient<ReqwestTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> RestClient<T> {
    /// Creates a client over a custom transport with the default policy.
    pub fn with_transport(transport: T) -> Self {
        Self {
            executor: RetryExecutor::new(transport, RetryPolicy::default()),
        }
    }

    /// Replaces the retry policy.
    pub fn with_policy(self, policy: RetryPolicy) -> Self {
        Self {
            executor: self.executor.with_policy(policy),
        }
    }

    pub fn executor(&self) -> &RetryExecutor<T> {
        &self.executor
    }

    pub async fn get(&self, args: impl Into<RequestArgs>) -> Result<Response> {
        self.send(Method::Get, args, None).await
    }

    pub async fn post(&self, args: impl Into<RequestArgs>) -> Result<Response> {
        self.send(Method::Post, args, None).await
    }

    pub async fn put(&self, args: impl Into<RequestArgs>) -> Result<Response> {
        self.send(Method::Put, args, None).await
    }

    pub async fn delete(&self, args: impl Into<RequestArgs>) -> Result<Response> {
        self.send(Method::Delete, args, None).await
    }

    /// Builds a [`RequestSpec`] and runs it through the executor.
    pub async fn send(
        &self,
        method: Method,
        args: impl Into<RequestArgs>,
        cancel: Option<CancelSignal>,
    ) -> Result<Response> {
        let spec = RequestSpec::from_args(method, args.into());
        self.executor.execute_with_cancel(&spec, cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::RestClient;
    use crate::ClientOptions;

    #[test]
    fn with_options_applies_timeout_and_schedule() {
        let client = RestClient::new().with_options(ClientOptions {
            timeout_ms: 250,
            retry_delays_ms: vec![5, 10],
            non_retryable_statuses: vec![400],
        });

        let executor = client.executor();
        assert_eq!(executor.transport().timeout().as_millis(), 250);
        assert_eq!(executor.policy().schedule().max_attempts(), 3);
        assert!(executor.policy().is_non_retryable(400));
        assert!(!executor.policy().is_non_retryable(404));
    }

    #[test]
    fn debug_lists_policy() {
        let debug = format!("{:?}", RestClient::new());
        assert!(debug.contains("RestClient"));
        assert!(debug.contains("policy"));
    }
}
