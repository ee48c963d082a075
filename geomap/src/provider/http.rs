//! HTTP client abstraction for testability

use std::time::Duration;

use bytes::Bytes;
use futures::future::BoxFuture;

use super::types::ProviderError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default `User-Agent` sent with tile requests.
pub const DEFAULT_USER_AGENT: &str = concat!("geomap/", env!("CARGO_PKG_VERSION"));

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests. The boxed future keeps the trait
/// usable as `Arc<dyn AsyncHttpClient>` and spawnable on a multi-threaded
/// runtime.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body, or an error for transport failures and
    /// non-success statuses.
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes, ProviderError>>;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_options(Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_USER_AGENT)
    }

    /// Creates a new ReqwestClient with a custom timeout and user agent.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                ProviderError::HttpError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| ProviderError::HttpError(format!("Request failed: {}", e)))?;

            // Check HTTP status
            let status = response.status();
            if !status.is_success() {
                return Err(ProviderError::HttpStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                });
            }

            response
                .bytes()
                .await
                .map_err(|e| ProviderError::HttpError(format!("Failed to read response: {}", e)))
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Semaphore;

    /// Mock HTTP client for testing.
    ///
    /// Counts calls, records requested URLs and can hold responses behind a
    /// gate until the test releases them.
    pub struct MockHttpClient {
        response: Mutex<Result<Bytes, ProviderError>>,
        calls: AtomicUsize,
        urls: Mutex<Vec<String>>,
        gate: Option<Arc<Semaphore>>,
        delay: Option<Duration>,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl MockHttpClient {
        pub fn new(response: Result<Vec<u8>, ProviderError>) -> Self {
            Self {
                response: Mutex::new(response.map(Bytes::from)),
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
                gate: None,
                delay: None,
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
            }
        }

        /// Responses wait for a permit on `gate` before completing.
        pub fn gated(mut self, gate: Arc<Semaphore>) -> Self {
            self.gate = Some(gate);
            self
        }

        /// Responses complete after `delay`.
        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Replace the canned response for subsequent calls.
        pub fn set_response(&self, response: Result<Vec<u8>, ProviderError>) {
            *self.response.lock() = response.map(Bytes::from);
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn urls(&self) -> Vec<String> {
            self.urls.lock().clone()
        }

        /// Highest number of requests observed running at the same time.
        pub fn peak_in_flight(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        fn get<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Bytes, ProviderError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                self.urls.lock().push(url.to_string());
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

                if let Some(gate) = &self.gate {
                    if let Ok(permit) = gate.acquire().await {
                        permit.forget();
                    }
                }
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }

                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                self.response.lock().clone()
            })
        }
    }

    #[tokio::test]
    async fn test_mock_client_success() {
        let mock = MockHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com").await;
        assert_eq!(result.unwrap(), Bytes::from_static(&[1, 2, 3, 4]));
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.urls(), vec!["http://example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_client_error() {
        let mock = MockHttpClient::new(Err(ProviderError::HttpError("Test error".to_string())));

        let result = mock.get("http://example.com").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_client_gate_releases() {
        let gate = Arc::new(Semaphore::new(0));
        let mock = Arc::new(MockHttpClient::new(Ok(vec![9])).gated(Arc::clone(&gate)));

        let task = {
            let mock = Arc::clone(&mock);
            tokio::spawn(async move { mock.get("http://example.com").await })
        };

        tokio::task::yield_now().await;
        assert!(!task.is_finished());

        gate.add_permits(1);
        let result = task.await.unwrap();
        assert!(result.is_ok());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::new().is_ok());
    }
}
