use crate::errors::{AppError, ResultExt};
use crate::models::{Credentials, NormalizedResult, SearchInfo, SearchRequest};
use crate::normalizer::normalize;
use crate::observer::{LookupEvent, LookupObserver, NoopObserver, TracingObserver};
use crate::request;
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use std::sync::Arc;
use std::time::Duration;

/// Production endpoint of the RgWsPublic2 service.
pub const DEFAULT_ENDPOINT: &str = "https://www1.gsis.gr/wsaade/RgWsPublic2/RgWsPublic2";

const SOAP_CONTENT_TYPE: &str = "application/soap+xml; charset=utf-8";

/// Transport settings for [`PublicityClient`].
#[derive(Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    /// Advertise `Accept-Encoding: gzip`. Gzip bodies are decoded either way.
    pub accept_gzip: bool,
    /// Request timeout. `None` leaves it to the transport defaults.
    pub timeout: Option<Duration>,
    pub observer: Arc<dyn LookupObserver>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept_gzip: true,
            timeout: None,
            observer: Arc::new(NoopObserver),
        }
    }
}

/// Client for the AADE publicity ("RgWsPublic2") SOAP service.
///
/// Holds no per-call state; clones share the underlying connection pool and
/// can run searches concurrently.
#[derive(Clone)]
pub struct PublicityClient {
    client: reqwest::Client,
    endpoint: String,
    accept_gzip: bool,
    observer: Arc<dyn LookupObserver>,
}

impl PublicityClient {
    /// Creates a new `PublicityClient`.
    pub fn new(options: ClientOptions) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder().gzip(true);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::Internal(format!("Failed to create AADE client: {}", e))
        })?;

        Ok(Self {
            client,
            endpoint: options.endpoint,
            accept_gzip: options.accept_gzip,
            observer: options.observer,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs one publicity search.
    ///
    /// AADE business errors are returned as `Ok` with `has_errors = true`.
    /// Validation, transport and malformed-response failures are `Err`.
    pub async fn search(&self, search: &SearchRequest) -> Result<NormalizedResult, AppError> {
        self.run(search)
            .await
            .with_context(|| format!("AADE publicity search for {} failed", search.target_id))
    }

    async fn run(&self, search: &SearchRequest) -> Result<NormalizedResult, AppError> {
        self.observer.on_event(&LookupEvent::Started {
            target_id: search.target_id.clone(),
        });

        request::validate(search)?;
        self.observer.on_event(&LookupEvent::Validated);

        let envelope = request::build_envelope(search)?;
        let requester = search.effective_requester().map(str::to_string);
        self.observer.on_event(&LookupEvent::EnvelopeBuilt {
            with_requester: requester.is_some(),
        });

        tracing::info!("Querying AADE publicity for {}", search.effective_target());
        self.observer.on_event(&LookupEvent::RequestSent {
            endpoint: self.endpoint.clone(),
        });
        let mut builder = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, SOAP_CONTENT_TYPE);
        // An explicit header stops reqwest from advertising gzip itself
        if !self.accept_gzip {
            builder = builder.header(ACCEPT_ENCODING, "identity");
        }
        let response = builder
            .body(envelope)
            .send()
            .await
            .context("AADE request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read AADE response body")?;
        self.observer.on_event(&LookupEvent::ResponseReceived {
            status: status.as_u16(),
            bytes: body.len(),
        });

        if !status.is_success() {
            tracing::error!("AADE returned error {}: {}", status, body);
            return Err(AppError::Transport(format!(
                "AADE returned status {}: {}",
                status, body
            )));
        }

        let mut result = normalize(&body)?;
        self.observer.on_event(&LookupEvent::Parsed {
            has_errors: result.has_errors,
        });

        result.search_info = Some(SearchInfo {
            searched_id: search.effective_target().to_string(),
            requester_id: requester,
        });

        if result.has_errors {
            tracing::warn!(
                "AADE reported {:?} for {} (call {})",
                result.errors_info.code,
                search.target_id,
                result.call_seq_id
            );
        } else {
            tracing::info!(
                "✓ Publicity record fetched for {} (call {})",
                search.target_id,
                result.call_seq_id
            );
        }

        self.observer.on_event(&LookupEvent::Finished);
        Ok(result)
    }
}

/// One-shot lookup against the production endpoint.
///
/// `debug` routes progress events to `tracing` at debug level.
pub async fn get_company_publicity(
    search_vatid: &str,
    username: &str,
    password: &str,
    searched_by_vatid: Option<&str>,
    debug: bool,
) -> Result<NormalizedResult, AppError> {
    let observer: Arc<dyn LookupObserver> = if debug {
        Arc::new(TracingObserver)
    } else {
        Arc::new(NoopObserver)
    };
    let client = PublicityClient::new(ClientOptions {
        observer,
        ..ClientOptions::default()
    })?;

    let mut search = SearchRequest::new(search_vatid, Credentials::new(username, password));
    search.requester_id = searched_by_vatid.map(str::to_string);

    client.search(&search).await
}
