//! Typed blocking Rust client for the Messente SMS gateway HTTP API.
//!
//! The crate is split into a domain layer of validated types (including SMS
//! length calculation), a transport layer for the wire format, and a small
//! client layer that dispatches requests with one-shot failover to a backup
//! host. [`signature`] authenticates verification widget callbacks.
//!
//! ```rust,no_run
//! use messente::{Credentials, MessageText, MessenteClient, RawPhoneNumber, SendOptions, SendSms};
//!
//! fn main() -> Result<(), messente::MessenteError> {
//!     let client = MessenteClient::new(Credentials::new("username", "password")?)?;
//!     let to = RawPhoneNumber::new("+3725123456")?;
//!     let text = MessageText::new("hello")?;
//!     let response = client.send_sms(&SendSms::new(to, text, SendOptions::default()))?;
//!     if response.success {
//!         println!("sent, id {:?}", response.result);
//!     } else {
//!         println!("rejected: {}", response.message);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod signature;
mod transport;

pub use client::{
    ClientConfig, DEFAULT_BACKUP_SERVER, DEFAULT_SERVER, MessenteClient, MessenteClientBuilder,
    MessenteError,
};
pub use domain::{
    Autoconvert, Charset, Cookie, CountryCode, Credentials, DeliveryState, DeliveryStatus,
    EncodingError, GatewayResponse, Host, HttpMethod, HttpProtocol, MessageId, MessageTemplate,
    MessageText, Password, PhoneNumber, Pin, PriceFormat, PriceList, RawPhoneNumber, RawResponse,
    RequestOptions, ResponseCode, SendOptions, SendSms, SenderId, SmsCharset, SmsLength,
    StartVerification, StartVerificationOptions, UnixTimestamp, Username, ValidationError,
    VerificationId, VerifyPin, normalize_phone_number,
};
pub use signature::SignatureError;
