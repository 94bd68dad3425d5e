use std::fmt;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;
use url::Url;

use crate::classify::{Operation, classify};
use crate::error::{ClientError, DomainError, RemoteFailure};
use crate::problem;
use crate::types::{CustomerId, CustomerInformation, StockTradeRequest, StockTradeResponse};

/// Async HTTP client for the customer service
///
/// Failed calls never surface transport errors; they are resolved into a
/// [`DomainError`] before returning. Dropping a returned future cancels the
/// in-flight request without logging or producing an error.
#[derive(Clone)]
pub struct CustomerServiceClient {
    http: reqwest::Client,
    base_url: Url,
}

/// Builder for [`CustomerServiceClient`]
#[derive(Debug)]
pub struct CustomerServiceClientBuilder {
    base_url: Url,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CustomerServiceClientBuilder {
    /// Total time allowed for a call, including reading the body
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Time allowed to establish the connection
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry request paths or the
    /// HTTP client cannot be built
    pub fn build(self) -> Result<CustomerServiceClient, ClientError> {
        if self.base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(self.base_url));
        }

        let mut http = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        if let Some(timeout) = self.connect_timeout {
            http = http.connect_timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            http = http.user_agent(user_agent);
        }

        let http = http.build().map_err(ClientError::Build)?;

        Ok(CustomerServiceClient::with_http_client(self.base_url, http))
    }
}

impl CustomerServiceClient {
    /// Create a client with default HTTP settings
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry request paths or the
    /// HTTP client cannot be built
    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        Self::builder(base_url).build()
    }

    pub const fn builder(base_url: Url) -> CustomerServiceClientBuilder {
        CustomerServiceClientBuilder {
            base_url,
            timeout: None,
            connect_timeout: None,
            user_agent: None,
        }
    }

    /// Create a client around an existing `reqwest` client
    pub fn with_http_client(base_url: Url, http: reqwest::Client) -> Self {
        Self { http, base_url }
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Look up a customer
    ///
    /// GET `/customers/:customerId`
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` when the service answers 404 and
    /// `RemoteServiceFault` for every other failure
    pub async fn customer_information(&self, customer_id: CustomerId) -> Result<CustomerInformation, DomainError> {
        let id = customer_id.to_string();

        self.call(Operation::Lookup, customer_id, Method::GET, &["customers", id.as_str()], None::<&()>)
            .await
    }

    /// Execute a trade for a customer
    ///
    /// POST `/customers/:customerId/trade`
    ///
    /// # Errors
    ///
    /// Returns `CustomerNotFound` on 404, `InvalidTradeRequest` on 400 and
    /// `RemoteServiceFault` on 500 or any other failure
    pub async fn trade(
        &self,
        customer_id: CustomerId,
        request: &StockTradeRequest,
    ) -> Result<StockTradeResponse, DomainError> {
        let id = customer_id.to_string();

        self.call(
            Operation::Trade,
            customer_id,
            Method::POST,
            &["customers", id.as_str(), "trade"],
            Some(request),
        )
        .await
    }

    async fn call<T, B>(
        &self,
        operation: Operation,
        customer_id: CustomerId,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T, DomainError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let span = tracing::debug_span!(
            "customer_service_call",
            base_url = %self.base_url,
            ?operation,
            %customer_id
        );

        async {
            let outcome = match self.endpoint(segments) {
                Ok(url) => self.execute(method, url, body).await,
                Err(failure) => Err(failure),
            };

            outcome.map_err(|failure| recover(operation, customer_id, &failure))
        }
        .instrument(span)
        .await
    }

    /// Send the request and decode a successful body
    async fn execute<T, B>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, RemoteFailure>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method.clone(), url.clone());

        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(%method, %url, "dispatching request");

        let response = request
            .send()
            .await
            .map_err(|e| RemoteFailure::from_transport(&e))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(RemoteFailure::from_response(&method, &url, status, body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteFailure::from_transport(&e))?;

        serde_json::from_slice(&bytes).map_err(|e| RemoteFailure::Other {
            status: Some(status),
            message: format!("failed to decode {status} response from {method} {url}: {e}"),
            body: None,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteFailure> {
        let mut url = self.base_url.clone();

        {
            let mut path = url.path_segments_mut().map_err(|()| RemoteFailure::Other {
                status: None,
                message: format!("cannot append a path to {}", self.base_url),
                body: None,
            })?;
            path.pop_if_empty().extend(segments);
        }

        Ok(url)
    }
}

/// Turn a failure into the domain error reported for `operation`
fn recover(operation: Operation, customer_id: CustomerId, failure: &RemoteFailure) -> DomainError {
    let message = problem::extract(failure);
    let error = classify(operation, customer_id, failure, message);

    tracing::error!(kind = ?failure.kind(), error = %error, "customer service call failed");

    error
}

impl fmt::Debug for CustomerServiceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomerServiceClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
