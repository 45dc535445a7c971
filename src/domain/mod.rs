//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
pub mod sms_length;
mod validation;
mod value;

pub use request::{
    Autoconvert, HttpMethod, HttpProtocol, PriceFormat, PriceList, RequestOptions, SendOptions,
    SendSms, StartVerification, StartVerificationOptions, VerifyPin,
};
pub use response::{DeliveryState, DeliveryStatus, GatewayResponse, RawResponse, ResponseCode};
pub use sms_length::{SmsCharset, SmsLength};
pub use validation::{EncodingError, ValidationError};
pub use value::{
    Charset, Cookie, CountryCode, Credentials, Host, MessageId, MessageTemplate, MessageText,
    Password, PhoneNumber, Pin, RawPhoneNumber, SenderId, UnixTimestamp, Username,
    VerificationId, normalize_phone_number,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new("   "),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn phone_number_parses_with_region_and_converts_to_e164() {
        let pn = PhoneNumber::parse(Some(phonenumber::country::Id::EE), " 5123456 ").unwrap();
        assert_eq!(pn.raw(), "5123456");
        let raw: RawPhoneNumber = pn.into();
        assert_eq!(raw.raw(), "+3725123456");
        assert_eq!(raw.normalized(), "+3725123456");
    }

    #[test]
    fn start_verification_requires_digits_in_recipient() {
        let err = StartVerification::new(RawPhoneNumber::new("no digits").unwrap()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
        assert!(StartVerification::new(RawPhoneNumber::new("+372 5123456").unwrap()).is_ok());
    }

    #[test]
    fn request_options_default_to_https_post() {
        let options = RequestOptions::default();
        assert_eq!(options.protocol, HttpProtocol::Https);
        assert_eq!(options.method, HttpMethod::Post);
        assert_eq!(SendOptions::default().charset.label(), "UTF-8");
    }

    #[test]
    fn send_sms_keeps_optional_sender() {
        let to = RawPhoneNumber::new("+3725123456").unwrap();
        let text = MessageText::new("hello").unwrap();
        let request = SendSms::new(to, text, SendOptions::default());
        assert!(request.from().is_none());

        let request = request.with_sender(SenderId::new("Sender").unwrap());
        assert_eq!(request.from().map(SenderId::as_str), Some("Sender"));
    }

    #[test]
    fn sms_length_summary_matches_helpers() {
        let length = SmsLength::of("Hello [world]");
        assert_eq!(length.charset, SmsCharset::Basic7Bit);
        assert_eq!(length.characters, 15);
        assert_eq!(length.parts, 1);
    }
}
