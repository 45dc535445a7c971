use url::Url;

use crate::domain::{Credentials, Host, HttpProtocol};
use crate::transport::codec::encode_credentials;

#[derive(Debug, thiserror::Error)]
#[error("invalid request URL {url}: {source}")]
pub struct UrlBuildError {
    pub url: String,
    #[source]
    pub source: url::ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Gateway API method; each maps to a fixed path.
pub enum ApiMethod {
    SendSms,
    GetDlrResponse,
    Prices,
    GetBalance,
    VerifyStart,
    VerifyPin,
}

impl ApiMethod {
    pub fn path(self) -> &'static str {
        match self {
            Self::SendSms => "/send_sms/",
            Self::GetDlrResponse => "/get_dlr_response/",
            Self::Prices => "/prices/",
            Self::GetBalance => "/get_balance/",
            Self::VerifyStart => "/verify/start/",
            Self::VerifyPin => "/verify/pin/",
        }
    }
}

/// `scheme://host/path?username=..&password=..[&params]`.
///
/// `params` must already be percent-encoded.
pub fn build_url(
    protocol: HttpProtocol,
    host: &Host,
    method: ApiMethod,
    credentials: &Credentials,
    params: &str,
) -> Result<Url, UrlBuildError> {
    let mut raw = format!(
        "{}://{}{}?{}",
        protocol.as_str(),
        host.as_str(),
        method.path(),
        encode_credentials(credentials)
    );
    if !params.is_empty() {
        raw.push('&');
        raw.push_str(params);
    }
    Url::parse(&raw).map_err(|source| UrlBuildError { url: raw, source })
}
