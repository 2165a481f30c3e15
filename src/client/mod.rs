//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::domain::{
    AccountUser, ApiKey, AreaCode, CcvCode, ErrorCode, GenerateReport, RateCenterName,
    RawPhoneNumber, RefillAmount, ReportEntry, ReportFilename, SipCredentials, StateCode,
    ValidationError,
};
use crate::transport::{self, Outcome, RemoteFailure, TransportError};

const DEFAULT_WSDL_URL: &str = "http://connect.voicepulse.com/secure/services/Api0605.asmx?WSDL";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn post_soap<'a>(
        &'a self,
        url: &'a str,
        soap_action: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: &'a str,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn post_soap<'a>(
        &'a self,
        url: &'a str,
        soap_action: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header("Content-Type", "text/xml; charset=utf-8")
                .header("SOAPAction", soap_action)
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`VoicePulseClient`].
///
/// This error keeps the three failure planes distinct:
/// - remote operation failures (the provider ran the call and returned a
///   non-zero error code),
/// - transport failures (DNS, TLS, timeouts, non-2xx HTTP statuses),
/// - contract failures (service description unavailable or a response missing
///   a field the contract promises).
pub enum VoicePulseError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The provider executed the call and reported a failure.
    #[error("{operation} failed with code {code}: {message}")]
    Api {
        operation: &'static str,
        code: ErrorCode,
        message: String,
    },

    /// The server answered with a SOAP fault instead of a result envelope.
    #[error("SOAP fault from {operation}: {fault_string}")]
    Fault {
        operation: &'static str,
        fault_code: Option<String>,
        fault_string: String,
    },

    /// Response body could not be parsed as XML.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The service description could not be loaded or a response is missing a
    /// field the WSDL contract promises.
    #[error("contract error: {reason}")]
    Contract { reason: String },

    /// `get_report` found no generated report under the requested filename.
    #[error("report {filename} is not in the generated report list")]
    ReportNotFound { filename: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`VoicePulseClient`].
///
/// Use this to override the service-description location, bind directly to a
/// known endpoint, or set a timeout and user-agent.
pub struct VoicePulseClientBuilder {
    api_key: ApiKey,
    wsdl_url: String,
    endpoint: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl VoicePulseClientBuilder {
    /// Create a builder bound to the default service-description URL.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            wsdl_url: DEFAULT_WSDL_URL.to_owned(),
            endpoint: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override where the service description (WSDL) is fetched from.
    pub fn wsdl_url(mut self, wsdl_url: impl Into<String>) -> Self {
        self.wsdl_url = wsdl_url.into();
        self
    }

    /// Bind directly to a known endpoint URL, skipping the service-description
    /// fetch entirely.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set an HTTP client timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Bind the client to the remote service.
    ///
    /// Unless an explicit endpoint was given, this fetches and parses the
    /// service description; any failure there is
    /// [`VoicePulseError::Contract`] and no client is produced.
    pub async fn connect(self) -> Result<VoicePulseClient, VoicePulseError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| VoicePulseError::Transport(Box::new(err)))?;
        let http: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport { client });

        let endpoint = match self.endpoint {
            Some(endpoint) => {
                Url::parse(&endpoint).map_err(|err| VoicePulseError::Contract {
                    reason: format!("invalid endpoint URL {endpoint}: {err}"),
                })?;
                endpoint
            }
            None => fetch_service_endpoint(http.as_ref(), &self.wsdl_url).await?,
        };

        Ok(VoicePulseClient {
            api_key: self.api_key,
            endpoint,
            http,
        })
    }
}

async fn fetch_service_endpoint(
    http: &dyn HttpTransport,
    wsdl_url: &str,
) -> Result<String, VoicePulseError> {
    let response = http
        .get(wsdl_url)
        .await
        .map_err(|err| VoicePulseError::Contract {
            reason: format!("service description fetch failed: {err}"),
        })?;
    if !(200..=299).contains(&response.status) {
        return Err(VoicePulseError::Contract {
            reason: format!(
                "service description request returned HTTP {}",
                response.status
            ),
        });
    }
    let endpoint = transport::wsdl::service_endpoint(&response.body)
        .map_err(|err| VoicePulseError::Contract {
            reason: err.to_string(),
        })?;
    Ok(endpoint.to_string())
}

#[derive(Clone)]
/// High-level VoicePulse Connect! client.
///
/// One instance holds the API key and the bound SOAP endpoint; every method
/// is a single synchronous request/response exchange (awaited, one call at a
/// time per invocation). The client keeps no mutable state between calls.
pub struct VoicePulseClient {
    api_key: ApiKey,
    endpoint: String,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for VoicePulseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoicePulseClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl VoicePulseClient {
    /// Bind a client using the default service-description URL.
    ///
    /// For more customization, use [`VoicePulseClient::builder`].
    pub async fn connect(api_key: ApiKey) -> Result<Self, VoicePulseError> {
        Self::builder(api_key).connect().await
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> VoicePulseClientBuilder {
        VoicePulseClientBuilder::new(api_key)
    }

    /// The SOAP endpoint this client is bound to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the provider to generate a usage report over a date range.
    ///
    /// Returns the filename the provider created; it always ends in `.zip`
    /// regardless of the requested name. Fetch the download URL afterwards
    /// with [`VoicePulseClient::get_report`].
    pub async fn generate_report(
        &self,
        request: &GenerateReport,
    ) -> Result<String, VoicePulseError> {
        let body = self
            .call(
                transport::GENERATE_REPORT,
                transport::encode_generate_report(request),
            )
            .await?;
        unwrap_outcome(
            transport::GENERATE_REPORT,
            transport::decode_generate_report(&body),
        )
    }

    /// List every report the provider has generated for this account.
    pub async fn get_generated_reports(&self) -> Result<Vec<ReportEntry>, VoicePulseError> {
        let body = self
            .call(
                transport::GET_GENERATED_REPORTS,
                transport::encode_get_generated_reports(),
            )
            .await?;
        unwrap_outcome(
            transport::GET_GENERATED_REPORTS,
            transport::decode_get_generated_reports(&body),
        )
    }

    /// Fetch the download URL for a previously generated report.
    ///
    /// Fetches the full report list and looks the filename up locally; a miss
    /// is [`VoicePulseError::ReportNotFound`], never an empty string.
    pub async fn get_report(&self, filename: &ReportFilename) -> Result<String, VoicePulseError> {
        let reports = self.get_generated_reports().await?;
        reports
            .into_iter()
            .find(|entry| entry.filename == filename.as_str())
            .map(|entry| entry.full_path)
            .ok_or_else(|| VoicePulseError::ReportNotFound {
                filename: filename.as_str().to_owned(),
            })
    }

    /// Current account balance, preserved as the provider's wire text.
    pub async fn get_balance(&self) -> Result<String, VoicePulseError> {
        let body = self
            .call(transport::GET_BALANCE, transport::encode_get_balance())
            .await?;
        unwrap_outcome(transport::GET_BALANCE, transport::decode_get_balance(&body))
    }

    /// Per-minute rate for calling the given number.
    pub async fn get_rate(&self, number: &RawPhoneNumber) -> Result<String, VoicePulseError> {
        let body = self
            .call(transport::GET_FLEX_RATE, transport::encode_get_rate(number))
            .await?;
        unwrap_outcome(transport::GET_FLEX_RATE, transport::decode_get_rate(&body))
    }

    /// Refill the account balance from the card on file.
    ///
    /// The provider's result text is passed through unnormalized; `RefillNow`
    /// carries no error-code envelope.
    pub async fn refill(
        &self,
        code: &CcvCode,
        amount: &RefillAmount,
    ) -> Result<String, VoicePulseError> {
        let body = self
            .call(transport::REFILL_NOW, transport::encode_refill(code, amount))
            .await?;
        transport::decode_refill(&body)
            .map_err(|err| map_transport_error(transport::REFILL_NOW, err))
    }

    /// Area codes with numbers available in the given state.
    pub async fn get_available_phone_number_area_codes(
        &self,
        state: &StateCode,
    ) -> Result<Vec<String>, VoicePulseError> {
        let body = self
            .call(
                transport::GET_AVAILABLE_AREA_CODES,
                transport::encode_get_area_codes(state),
            )
            .await?;
        unwrap_outcome(
            transport::GET_AVAILABLE_AREA_CODES,
            transport::decode_get_area_codes(&body),
        )
    }

    /// Rate centers with numbers available in the given state and area code,
    /// as a rate center → city mapping.
    pub async fn get_available_phone_number_rate_centers(
        &self,
        state: &StateCode,
        area_code: &AreaCode,
    ) -> Result<BTreeMap<String, String>, VoicePulseError> {
        let body = self
            .call(
                transport::GET_AVAILABLE_RATE_CENTERS,
                transport::encode_get_rate_centers(state, area_code),
            )
            .await?;
        let entries = unwrap_outcome(
            transport::GET_AVAILABLE_RATE_CENTERS,
            transport::decode_get_rate_centers(&body),
        )?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.rate_center, entry.city))
            .collect())
    }

    /// Two-letter codes of states with available numbers.
    pub async fn get_available_phone_number_states(
        &self,
    ) -> Result<Vec<String>, VoicePulseError> {
        let body = self
            .call(
                transport::GET_AVAILABLE_STATES,
                transport::encode_get_states(),
            )
            .await?;
        unwrap_outcome(
            transport::GET_AVAILABLE_STATES,
            transport::decode_get_states(&body),
        )
    }

    /// Phone numbers available in the given state, area code, and rate center.
    pub async fn get_available_phone_numbers(
        &self,
        state: &StateCode,
        area_code: &AreaCode,
        rate_center: &RateCenterName,
    ) -> Result<Vec<String>, VoicePulseError> {
        let body = self
            .call(
                transport::GET_AVAILABLE_NUMBERS,
                transport::encode_get_numbers(state, area_code, rate_center),
            )
            .await?;
        unwrap_outcome(
            transport::GET_AVAILABLE_NUMBERS,
            transport::decode_get_numbers(&body),
        )
    }

    /// SIP/IAX login and password for this account, for use in `sip.conf` or
    /// `iax2.conf`.
    pub async fn get_credentials(&self) -> Result<SipCredentials, VoicePulseError> {
        let body = self
            .call(
                transport::GET_CREDENTIALS,
                transport::encode_get_credentials(),
            )
            .await?;
        unwrap_outcome(
            transport::GET_CREDENTIALS,
            transport::decode_get_credentials(&body),
        )
    }

    /// Username and email of the account holder.
    pub async fn get_user(&self) -> Result<AccountUser, VoicePulseError> {
        let body = self
            .call(transport::GET_USER, transport::encode_get_user())
            .await?;
        unwrap_outcome(transport::GET_USER, transport::decode_get_user(&body))
    }

    async fn call(
        &self,
        operation: &'static str,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<String, VoicePulseError> {
        params.insert(0, (ApiKey::FIELD, self.api_key.as_str().to_owned()));
        let envelope = transport::build_envelope(operation, &params);
        let action = transport::soap_action(operation);

        let response = self
            .http
            .post_soap(&self.endpoint, &action, envelope)
            .await
            .map_err(VoicePulseError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(VoicePulseError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

fn unwrap_outcome<T>(
    operation: &'static str,
    decoded: Result<Outcome<T>, TransportError>,
) -> Result<T, VoicePulseError> {
    match decoded.map_err(|err| map_transport_error(operation, err))? {
        Outcome::Success(payload) => Ok(payload),
        Outcome::Failure(failure) => Err(api_error(operation, failure)),
    }
}

fn api_error(operation: &'static str, failure: RemoteFailure) -> VoicePulseError {
    VoicePulseError::Api {
        operation,
        code: failure.code,
        message: failure.message,
    }
}

fn map_transport_error(operation: &'static str, err: TransportError) -> VoicePulseError {
    match err {
        TransportError::Xml { .. } => VoicePulseError::Parse(Box::new(err)),
        TransportError::MissingField { .. } => VoicePulseError::Contract {
            reason: err.to_string(),
        },
        TransportError::Fault {
            fault_code,
            fault_string,
        } => VoicePulseError::Fault {
            operation,
            fault_code,
            fault_string,
        },
    }
}
