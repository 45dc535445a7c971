//! Client layer: encodes requests, dispatches them with failover and decodes responses.

use std::error::Error as StdError;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::domain::{
    Credentials, DeliveryStatus, EncodingError, GatewayResponse, Host, HttpMethod, MessageId,
    PriceList, RawResponse, RequestOptions, ResponseCode, SendSms, StartVerification,
    ValidationError, VerifyPin,
};
use crate::signature::SignatureError;
use crate::transport::{
    ApiMethod, UrlBuildError, build_url, decode_delivery_status, decode_response,
    encode_delivery_status_form, encode_price_list_form, encode_query, encode_send_sms_form,
    encode_start_verification_form, encode_verify_pin_form, is_success_body,
};

pub const DEFAULT_SERVER: &str = "api2.messente.com";
pub const DEFAULT_BACKUP_SERVER: &str = "api3.messente.com";

const USER_AGENT: &str = "Messente-SDK";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const HTTP_OK: u16 = 200;
const OK_PREFIX: &str = "OK ";

type BoxError = Box<dyn StdError + Send + Sync>;

trait HttpTransport: Send + Sync {
    fn send(&self, url: &Url, method: HttpMethod) -> Result<RawResponse, BoxError>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, url: &Url, method: HttpMethod) -> Result<RawResponse, BoxError> {
        let request = match method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self
                .client
                .post(url.clone())
                .body(url.query().unwrap_or_default().to_owned()),
        };
        let response = request
            .header(reqwest::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .send()?;
        let http_status = response.status().as_u16();
        let body = response.text()?;
        Ok(RawResponse {
            body: body.trim_end_matches(['\r', '\n']).to_owned(),
            http_status,
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`MessenteClient`].
///
/// A request the gateway rejected (`ERROR n`, `FAILED n`) is not an error: it
/// comes back as a [`GatewayResponse`] with `success == false`.
pub enum MessenteError {
    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A value has no representation in the requested charset.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// Substituting the parameters produced an invalid URL.
    #[error("invalid request URL {url}: {source}")]
    UrlBuild {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The gateway could not be reached or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("signature error: {0}")]
    Signature(#[from] SignatureError),
}

impl MessenteError {
    /// Whether the service could not be reached, as opposed to invalid input.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<UrlBuildError> for MessenteError {
    fn from(value: UrlBuildError) -> Self {
        Self::UrlBuild {
            url: value.url,
            source: value.source,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
/// Declarative client configuration, loadable from any serde source.
///
/// A missing `server` means [`DEFAULT_SERVER`]; a missing `backup_server` means
/// [`DEFAULT_BACKUP_SERVER`] and an explicit `null` disables failover.
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_backup_server")]
    pub backup_server: Option<String>,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_owned()
}

fn default_backup_server() -> Option<String> {
    Some(DEFAULT_BACKUP_SERVER.to_owned())
}

#[derive(Debug, Clone)]
/// Builder for [`MessenteClient`].
pub struct MessenteClientBuilder {
    credentials: Credentials,
    server: String,
    backup_server: Option<String>,
    options: RequestOptions,
}

impl MessenteClientBuilder {
    /// Default hosts, HTTPS and POST.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            server: DEFAULT_SERVER.to_owned(),
            backup_server: Some(DEFAULT_BACKUP_SERVER.to_owned()),
            options: RequestOptions::default(),
        }
    }

    /// Override the primary host (bare hostname, optionally with a port).
    pub fn server(mut self, host: impl Into<String>) -> Self {
        self.server = host.into();
        self
    }

    /// Override the backup host used for failover.
    pub fn backup_server(mut self, host: impl Into<String>) -> Self {
        self.backup_server = Some(host.into());
        self
    }

    /// Disable failover.
    pub fn without_backup(mut self) -> Self {
        self.backup_server = None;
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate the hosts and build a [`MessenteClient`].
    pub fn build(self) -> Result<MessenteClient, MessenteError> {
        let server = Host::new(self.server)?;
        let backup_server = self.backup_server.map(Host::new).transpose()?;
        // Hosts like `name:99999` only fail once they are part of a URL.
        for host in std::iter::once(&server).chain(backup_server.as_ref()) {
            build_url(
                self.options.protocol,
                host,
                ApiMethod::GetBalance,
                &self.credentials,
                "",
            )?;
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| MessenteError::Transport(Box::new(err)))?;

        Ok(MessenteClient {
            credentials: self.credentials,
            server,
            backup_server,
            options: self.options,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Blocking Messente client.
///
/// Every call goes to the primary host first. When the gateway answers with a
/// server failure (`FAILED 209`) or a non-200 status, or the primary cannot be
/// reached, the identical request is sent once to the backup host and that
/// result is returned as is.
pub struct MessenteClient {
    credentials: Credentials,
    server: Host,
    backup_server: Option<Host>,
    options: RequestOptions,
    http: Arc<dyn HttpTransport>,
}

impl MessenteClient {
    /// Client with the default hosts and request options.
    pub fn new(credentials: Credentials) -> Result<Self, MessenteError> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> MessenteClientBuilder {
        MessenteClientBuilder::new(credentials)
    }

    /// Build a client from a [`ClientConfig`], validating every field.
    pub fn from_config(config: ClientConfig) -> Result<Self, MessenteError> {
        let credentials = Credentials::new(config.username, config.password)?;
        let mut builder = Self::builder(credentials).server(config.server);
        builder = match config.backup_server {
            Some(host) => builder.backup_server(host),
            None => builder.without_backup(),
        };
        builder.build()
    }

    pub fn server(&self) -> &Host {
        &self.server
    }

    pub fn backup_server(&self) -> Option<&Host> {
        self.backup_server.as_ref()
    }

    /// Send an SMS. On success `result` holds the message id (`sms_unique_id`).
    pub fn send_sms(&self, request: &SendSms) -> Result<GatewayResponse, MessenteError> {
        let params = encode_query(&encode_send_sms_form(request))?;
        let raw = self.dispatch(ApiMethod::SendSms, &params)?;
        Ok(decode_response(raw))
    }

    /// Poll the delivery report of a sent message.
    pub fn delivery_status(&self, message_id: &MessageId) -> Result<DeliveryStatus, MessenteError> {
        let params = encode_query(&encode_delivery_status_form(message_id))?;
        let raw = self.dispatch(ApiMethod::GetDlrResponse, &params)?;
        Ok(decode_delivery_status(raw))
    }

    /// Fetch the price list of one country; `result` holds the list in the requested format.
    pub fn price_list(&self, request: &PriceList) -> Result<GatewayResponse, MessenteError> {
        let params = encode_query(&encode_price_list_form(request))?;
        let raw = self.dispatch(ApiMethod::Prices, &params)?;
        Ok(decode_response(raw))
    }

    /// Account balance in EUR.
    pub fn balance(&self) -> Result<GatewayResponse, MessenteError> {
        let raw = self.dispatch(ApiMethod::GetBalance, "")?;
        Ok(decode_response(raw))
    }

    /// Send a PIN to the user. On success `result` holds the verification id.
    pub fn start_verification(
        &self,
        request: &StartVerification,
    ) -> Result<GatewayResponse, MessenteError> {
        let params = encode_query(&encode_start_verification_form(request))?;
        let raw = self.dispatch(ApiMethod::VerifyStart, &params)?;
        Ok(decode_response(raw))
    }

    /// Check a PIN entered by the user.
    pub fn verify_pin(&self, request: &VerifyPin) -> Result<GatewayResponse, MessenteError> {
        let params = encode_query(&encode_verify_pin_form(request))?;
        let raw = self.dispatch(ApiMethod::VerifyPin, &params)?;
        Ok(decode_response(raw))
    }

    pub fn send_sms_url(&self, request: &SendSms) -> Result<Url, MessenteError> {
        let params = encode_query(&encode_send_sms_form(request))?;
        self.url(&self.server, ApiMethod::SendSms, &params)
    }

    pub fn delivery_status_url(&self, message_id: &MessageId) -> Result<Url, MessenteError> {
        let params = encode_query(&encode_delivery_status_form(message_id))?;
        self.url(&self.server, ApiMethod::GetDlrResponse, &params)
    }

    pub fn price_list_url(&self, request: &PriceList) -> Result<Url, MessenteError> {
        let params = encode_query(&encode_price_list_form(request))?;
        self.url(&self.server, ApiMethod::Prices, &params)
    }

    pub fn balance_url(&self) -> Result<Url, MessenteError> {
        self.url(&self.server, ApiMethod::GetBalance, "")
    }

    pub fn start_verification_url(&self, request: &StartVerification) -> Result<Url, MessenteError> {
        let params = encode_query(&encode_start_verification_form(request))?;
        self.url(&self.server, ApiMethod::VerifyStart, &params)
    }

    pub fn verify_pin_url(&self, request: &VerifyPin) -> Result<Url, MessenteError> {
        let params = encode_query(&encode_verify_pin_form(request))?;
        self.url(&self.server, ApiMethod::VerifyPin, &params)
    }

    fn url(&self, host: &Host, method: ApiMethod, params: &str) -> Result<Url, MessenteError> {
        Ok(build_url(
            self.options.protocol,
            host,
            method,
            &self.credentials,
            params,
        )?)
    }

    #[instrument(skip(self, params), fields(server = self.server.as_str()))]
    fn dispatch(&self, method: ApiMethod, params: &str) -> Result<RawResponse, MessenteError> {
        let primary = self.send_to(&self.server, method, params);
        let Some(backup) = self.backup_server.as_ref() else {
            return primary;
        };

        let reason = match &primary {
            Ok(raw) => match failover_reason(raw) {
                Some(reason) => reason,
                None => return primary,
            },
            Err(MessenteError::Transport(err)) => {
                debug!(error = %err, "primary server unreachable");
                "transport error"
            }
            Err(_) => return primary,
        };

        warn!(
            backup = backup.as_str(),
            reason, "primary server failed, retrying on backup server"
        );
        let result = self.send_to(backup, method, params);
        match &result {
            Ok(raw) => info!(
                backup = backup.as_str(),
                http_status = raw.http_status,
                "backup server responded"
            ),
            Err(err) => warn!(backup = backup.as_str(), error = %err, "backup server failed"),
        }
        result
    }

    fn send_to(
        &self,
        host: &Host,
        method: ApiMethod,
        params: &str,
    ) -> Result<RawResponse, MessenteError> {
        let url = self.url(host, method, params)?;
        debug!(
            host = host.as_str(),
            path = method.path(),
            http_method = self.options.method.as_str(),
            "dispatching request"
        );
        let raw = self
            .http
            .send(&url, self.options.method)
            .map_err(MessenteError::Transport)?;
        debug!(
            host = host.as_str(),
            http_status = raw.http_status,
            "received response"
        );
        Ok(raw)
    }
}

/// Why a response from the primary host should be retried on the backup host.
///
/// A non-200 response only counts as a success when its body is `OK <payload>`.
fn failover_reason(raw: &RawResponse) -> Option<&'static str> {
    let success = if raw.http_status == HTTP_OK {
        is_success_body(&raw.body)
    } else {
        raw.body.starts_with(OK_PREFIX)
    };
    if success {
        return None;
    }
    if ResponseCode::from_body(&raw.body).is_some_and(ResponseCode::is_server_failure) {
        Some("server failure")
    } else if raw.http_status != HTTP_OK {
        Some("unexpected HTTP status")
    } else {
        None
    }
}
