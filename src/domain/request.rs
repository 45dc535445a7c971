use std::net::IpAddr;

use url::Url;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    Charset, Cookie, CountryCode, MessageTemplate, MessageText, Pin, RawPhoneNumber, SenderId,
    UnixTimestamp, VerificationId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpProtocol {
    Http,
    #[default]
    Https,
}

impl HttpProtocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    Get,
    #[default]
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Protocol and HTTP method used for every API call of a client.
///
/// Defaults to HTTPS + POST.
pub struct RequestOptions {
    pub protocol: HttpProtocol,
    pub method: HttpMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Character replacement mode for message text (`autoconvert`).
pub enum Autoconvert {
    /// Replace Unicode look-alikes with GSM characters when possible.
    On,
    /// Send the text as is.
    Off,
    /// Replace every non-GSM character, transliterating where needed.
    Full,
}

impl Autoconvert {
    pub const FIELD: &'static str = "autoconvert";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Full => "full",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Response format of the pricing API (`format`).
pub enum PriceFormat {
    Json,
    Xml,
}

impl PriceFormat {
    pub const FIELD: &'static str = "format";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Optional parameters of `send_sms`.
///
/// `charset` is always sent (default `UTF-8`) and also selects how `from` and
/// `text` are percent-encoded.
pub struct SendOptions {
    pub charset: Charset,
    pub autoconvert: Option<Autoconvert>,
    pub time_to_send: Option<UnixTimestamp>,
    /// URL the gateway posts delivery reports to (`dlr-url`).
    pub dlr_url: Option<Url>,
    /// Minutes the gateway keeps retrying while the handset is unreachable.
    pub validity: Option<u32>,
    /// User data header, hex encoded.
    pub udh: Option<String>,
}

#[derive(Debug, Clone)]
/// A single outbound SMS.
pub struct SendSms {
    from: Option<SenderId>,
    to: RawPhoneNumber,
    text: MessageText,
    options: SendOptions,
}

impl SendSms {
    pub fn new(to: RawPhoneNumber, text: MessageText, options: SendOptions) -> Self {
        Self {
            from: None,
            to,
            text,
            options,
        }
    }

    /// Send from an activated sender name instead of the account default.
    pub fn with_sender(mut self, from: SenderId) -> Self {
        self.from = Some(from);
        self
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Price list request for one destination country.
pub struct PriceList {
    country: CountryCode,
    format: Option<PriceFormat>,
}

impl PriceList {
    pub fn new(country: CountryCode) -> Self {
        Self {
            country,
            format: None,
        }
    }

    pub fn with_format(mut self, format: PriceFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn country(&self) -> CountryCode {
        self.country
    }

    pub fn format(&self) -> Option<PriceFormat> {
        self.format
    }
}

#[derive(Debug, Clone, Default)]
/// Optional parameters of `verify/start`.
pub struct StartVerificationOptions {
    /// Charset used to percent-encode `from` (not sent as a parameter).
    pub charset: Charset,
    /// End user's IP address.
    pub ip: Option<IpAddr>,
    /// End user's browser identification.
    pub browser: Option<String>,
    pub max_tries: Option<u32>,
    /// Seconds before the user may request a new PIN.
    pub retry_delay: Option<u32>,
    /// Seconds the PIN stays valid.
    pub validity: Option<u32>,
}

#[derive(Debug, Clone)]
/// Starts a PIN verification session for a phone number.
pub struct StartVerification {
    to: RawPhoneNumber,
    from: Option<SenderId>,
    template: Option<MessageTemplate>,
    cookie: Option<Cookie>,
    options: StartVerificationOptions,
}

impl StartVerification {
    /// Create a verification request; the recipient must contain at least one digit.
    pub fn new(to: RawPhoneNumber) -> Result<Self, ValidationError> {
        if !to.has_digits() {
            return Err(ValidationError::InvalidPhoneNumber {
                input: to.raw().to_owned(),
            });
        }
        Ok(Self {
            to,
            from: None,
            template: None,
            cookie: None,
            options: StartVerificationOptions::default(),
        })
    }

    pub fn with_sender(mut self, from: SenderId) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_template(mut self, template: MessageTemplate) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookie = Some(cookie);
        self
    }

    pub fn with_options(mut self, options: StartVerificationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn from(&self) -> Option<&SenderId> {
        self.from.as_ref()
    }

    pub fn template(&self) -> Option<&MessageTemplate> {
        self.template.as_ref()
    }

    pub fn cookie(&self) -> Option<&Cookie> {
        self.cookie.as_ref()
    }

    pub fn options(&self) -> &StartVerificationOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// Checks a PIN entered by the user against a verification session.
pub struct VerifyPin {
    verification_id: VerificationId,
    pin: Pin,
    cookie: Option<Cookie>,
}

impl VerifyPin {
    pub fn new(verification_id: VerificationId, pin: Pin) -> Self {
        Self {
            verification_id,
            pin,
            cookie: None,
        }
    }

    pub fn with_cookie(mut self, cookie: Cookie) -> Self {
        self.cookie = Some(cookie);
        self
    }

    pub fn verification_id(&self) -> &VerificationId {
        &self.verification_id
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn cookie(&self) -> Option<&Cookie> {
        self.cookie.as_ref()
    }
}
