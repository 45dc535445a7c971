use crate::domain::{
    Cookie, MessageTemplate, Pin, RawPhoneNumber, SenderId, StartVerification, VerificationId,
    VerifyPin,
};
use crate::transport::codec::FormParam;

const IP_FIELD: &str = "ip";
const BROWSER_FIELD: &str = "browser";
const MAX_TRIES_FIELD: &str = "max_tries";
const RETRY_DELAY_FIELD: &str = "retry_delay";
const VALIDITY_FIELD: &str = "validity";

pub fn encode_start_verification_form(request: &StartVerification) -> Vec<FormParam<'_>> {
    let options = request.options();
    let mut params = Vec::<FormParam<'_>>::new();

    if let Some(ip) = options.ip {
        params.push(FormParam::utf8(IP_FIELD, ip.to_string()));
    }
    if let Some(browser) = options
        .browser
        .as_deref()
        .filter(|browser| !browser.trim().is_empty())
    {
        params.push(FormParam::utf8(BROWSER_FIELD, browser));
    }
    if let Some(max_tries) = options.max_tries {
        params.push(FormParam::utf8(MAX_TRIES_FIELD, max_tries.to_string()));
    }
    if let Some(retry_delay) = options.retry_delay {
        params.push(FormParam::utf8(RETRY_DELAY_FIELD, retry_delay.to_string()));
    }
    if let Some(validity) = options.validity {
        params.push(FormParam::utf8(VALIDITY_FIELD, validity.to_string()));
    }
    if let Some(from) = request.from() {
        params.push(FormParam::with_charset(
            SenderId::FIELD,
            from.as_str(),
            &options.charset,
        ));
    }
    if let Some(template) = request.template() {
        params.push(FormParam::utf8(MessageTemplate::FIELD, template.as_str()));
    }
    if let Some(cookie) = request.cookie() {
        params.push(FormParam::utf8(Cookie::FIELD, cookie.as_str()));
    }
    params.push(FormParam::utf8(
        RawPhoneNumber::FIELD,
        request.to().normalized(),
    ));

    params
}

pub fn encode_verify_pin_form(request: &VerifyPin) -> Vec<FormParam<'_>> {
    let mut params = Vec::<FormParam<'_>>::with_capacity(3);
    if let Some(cookie) = request.cookie() {
        params.push(FormParam::utf8(Cookie::FIELD, cookie.as_str()));
    }
    params.push(FormParam::utf8(Pin::FIELD, request.pin().as_str()));
    params.push(FormParam::utf8(
        VerificationId::FIELD,
        request.verification_id().as_str(),
    ));
    params
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;
    use crate::domain::StartVerificationOptions;
    use crate::transport::codec::encode_query;

    #[test]
    fn start_verification_minimal_sends_normalized_recipient() {
        let request = StartVerification::new(RawPhoneNumber::new("+372 5123-456").unwrap()).unwrap();
        assert_eq!(
            encode_query(&encode_start_verification_form(&request)).unwrap(),
            "to=%2B3725123456"
        );
    }

    #[test]
    fn start_verification_full_keeps_fixed_order() {
        let options = StartVerificationOptions {
            ip: Some(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 1))),
            browser: Some("Mozilla/5.0".to_owned()),
            max_tries: Some(3),
            retry_delay: Some(30),
            validity: Some(300),
            ..StartVerificationOptions::default()
        };
        let request = StartVerification::new(RawPhoneNumber::new("3725123456").unwrap())
            .unwrap()
            .with_sender(SenderId::new("Verify").unwrap())
            .with_template(MessageTemplate::new("Your code: <PIN>").unwrap())
            .with_cookie(Cookie::new("abc123").unwrap())
            .with_options(options);

        assert_eq!(
            encode_query(&encode_start_verification_form(&request)).unwrap(),
            "ip=192.168.0.1&browser=Mozilla%2F5.0&max_tries=3&retry_delay=30&validity=300\
             &from=Verify&template=Your+code%3A+%3CPIN%3E&cookie=abc123&to=%2B3725123456"
        );
    }

    #[test]
    fn blank_browser_is_skipped() {
        let options = StartVerificationOptions {
            browser: Some(" ".to_owned()),
            ..StartVerificationOptions::default()
        };
        let request = StartVerification::new(RawPhoneNumber::new("3725123456").unwrap())
            .unwrap()
            .with_options(options);
        let params = encode_start_verification_form(&request);
        assert!(params.iter().all(|param| param.name != BROWSER_FIELD));
    }

    #[test]
    fn verify_pin_puts_cookie_first() {
        let request = VerifyPin::new(
            VerificationId::new("ver-1").unwrap(),
            Pin::new("1234").unwrap(),
        );
        assert_eq!(
            encode_query(&encode_verify_pin_form(&request)).unwrap(),
            "pin=1234&verification_id=ver-1"
        );

        let request = request.with_cookie(Cookie::new("abc").unwrap());
        assert_eq!(
            encode_query(&encode_verify_pin_form(&request)).unwrap(),
            "cookie=abc&pin=1234&verification_id=ver-1"
        );
    }
}
