//! Signatures of verification widget callbacks.
//!
//! The gateway signs callback parameters with the account's API password:
//! whitelisted parameters plus `pass=<secret>` are sorted by name, concatenated
//! as `name` immediately followed by `value`, and hashed with MD5 (lower-case hex).

use std::collections::{BTreeMap, HashMap};

use crate::domain::{RawPhoneNumber, normalize_phone_number};

/// Parameter carrying the signature in callbacks.
pub const SIGNATURE_PARAM: &str = "sig";

const SECRET_PARAM: &str = "pass";
const SIGNED_PARAMS: [&str; 5] = ["user", "phone", "version", "callback_url", "status"];
const REQUIRED_PARAMS: [&str; 2] = ["user", "version"];
const PHONE_PARAM: &str = "phone";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("`{name}` parameter is missing; can't compute signature")]
    MissingParameter { name: &'static str },

    #[error("API password is not set; can't compute signature")]
    MissingSecret,
}

/// Compute the signature of `params` with the account's API password.
///
/// Parameters outside the signed set (including `sig`) are ignored.
pub fn sign(params: &HashMap<String, String>, secret: &str) -> Result<String, SignatureError> {
    if secret.trim().is_empty() {
        return Err(SignatureError::MissingSecret);
    }
    for name in REQUIRED_PARAMS {
        require(params, name)?;
    }

    let mut signed = BTreeMap::<&str, &str>::new();
    for (name, value) in params {
        if SIGNED_PARAMS.contains(&name.as_str()) {
            signed.insert(name, value);
        }
    }
    signed.insert(SECRET_PARAM, secret);

    let canonical = signed
        .into_iter()
        .fold(String::new(), |mut acc, (name, value)| {
            acc.push_str(name);
            acc.push_str(value);
            acc
        });
    Ok(hex::encode(md5::compute(canonical.as_bytes()).0))
}

/// Whether the `sig` parameter matches the signature of the other parameters.
pub fn verify(params: &HashMap<String, String>, secret: &str) -> Result<bool, SignatureError> {
    let provided = require(params, SIGNATURE_PARAM)?;
    if secret.trim().is_empty() {
        return Err(SignatureError::MissingSecret);
    }
    let expected = sign(params, secret)?;
    Ok(constant_time_eq(provided.as_bytes(), expected.as_bytes()))
}

/// [`verify`] plus a check that the callback is about `expected_phone`.
///
/// Phone numbers are compared in normalized form, so `+372 5123456` matches `3725123456`.
pub fn verify_callback(
    params: &HashMap<String, String>,
    secret: &str,
    expected_phone: &RawPhoneNumber,
) -> Result<bool, SignatureError> {
    if !verify(params, secret)? {
        return Ok(false);
    }
    let phone = require(params, PHONE_PARAM)?;
    Ok(normalize_phone_number(phone) == expected_phone.normalized())
}

fn require<'a>(
    params: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, SignatureError> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or(SignatureError::MissingParameter { name })
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    fn callback() -> HashMap<String, String> {
        params(&[
            ("user", "demo"),
            ("version", "1"),
            ("phone", "+3725123456"),
            ("callback_url", "https://example.com/cb"),
            ("status", "VERIFIED"),
        ])
    }

    #[test]
    fn sign_sorts_whitelisted_params_and_secret() {
        assert_eq!(
            sign(&callback(), "secret").unwrap(),
            "2c41f0d878928a1a1a189a9fc3acc052"
        );
    }

    #[test]
    fn sign_ignores_unlisted_params_and_sig() {
        let mut with_noise = params(&[("user", "demo"), ("version", "1")]);
        with_noise.insert("sig".to_owned(), "whatever".to_owned());
        with_noise.insert("lang".to_owned(), "et".to_owned());
        with_noise.insert("pass".to_owned(), "spoofed".to_owned());
        assert_eq!(
            sign(&with_noise, "secret").unwrap(),
            "3ad77e5b703528028cc6ecc5938e00fd"
        );
    }

    #[test]
    fn sign_requires_user_version_and_secret() {
        let missing_user = params(&[("version", "1")]);
        assert_eq!(
            sign(&missing_user, "secret"),
            Err(SignatureError::MissingParameter { name: "user" })
        );

        let blank_version = params(&[("user", "demo"), ("version", " ")]);
        assert_eq!(
            sign(&blank_version, "secret"),
            Err(SignatureError::MissingParameter { name: "version" })
        );

        assert_eq!(sign(&callback(), "  "), Err(SignatureError::MissingSecret));
    }

    #[test]
    fn verify_accepts_matching_signature() {
        let mut params = callback();
        let sig = sign(&params, "secret").unwrap();
        params.insert(SIGNATURE_PARAM.to_owned(), sig);
        assert_eq!(verify(&params, "secret"), Ok(true));
        assert_eq!(verify(&params, "other"), Ok(false));
    }

    #[test]
    fn verify_detects_tampered_params() {
        let mut params = callback();
        let sig = sign(&params, "secret").unwrap();
        params.insert(SIGNATURE_PARAM.to_owned(), sig);

        for name in SIGNED_PARAMS {
            let mut tampered = params.clone();
            tampered.insert(name.to_owned(), "tampered".to_owned());
            assert_eq!(verify(&tampered, "secret"), Ok(false), "{name}");
        }
    }

    #[test]
    fn verify_requires_sig() {
        assert_eq!(
            verify(&callback(), "secret"),
            Err(SignatureError::MissingParameter { name: "sig" })
        );
    }

    #[test]
    fn verify_callback_compares_normalized_phone() {
        let mut params = params(&[("user", "demo"), ("version", "1"), ("phone", "+372 5123456")]);
        let sig = sign(&params, "secret").unwrap();
        assert_eq!(sig, "6b01f17c8ae07001523679c5a65a7746");
        params.insert(SIGNATURE_PARAM.to_owned(), sig);

        let expected = RawPhoneNumber::new("3725123456").unwrap();
        assert_eq!(verify_callback(&params, "secret", &expected), Ok(true));

        let other = RawPhoneNumber::new("+3725000000").unwrap();
        assert_eq!(verify_callback(&params, "secret", &other), Ok(false));
    }

    #[test]
    fn verify_callback_requires_phone() {
        let mut params = params(&[("user", "demo"), ("version", "1")]);
        let sig = sign(&params, "secret").unwrap();
        params.insert(SIGNATURE_PARAM.to_owned(), sig);

        let expected = RawPhoneNumber::new("3725123456").unwrap();
        assert_eq!(
            verify_callback(&params, "secret", &expected),
            Err(SignatureError::MissingParameter { name: "phone" })
        );
    }

    #[test]
    fn constant_time_eq_checks_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
