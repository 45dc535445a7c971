use std::borrow::Cow;

use encoding_rs::Encoding;
use phonenumber::country;

use crate::domain::validation::{EncodingError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Messente API username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Query parameter name used by Messente (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Messente API password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by Messente (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Username/password pair sent with every API call.
///
/// Immutable once constructed; there is no default account.
pub struct Credentials {
    username: Username,
    password: Password,
}

impl Credentials {
    /// Validate and pair a username with a password.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password(&self) -> &Password {
        &self.password
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Bare gateway hostname, optionally with a port (`api2.messente.com`, `127.0.0.1:8080`).
///
/// Invariant: non-empty, no scheme, path, query, fragment, userinfo or whitespace.
pub struct Host(String);

impl Host {
    /// Create a validated [`Host`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "host" });
        }
        let forbidden = |c: char| matches!(c, '/' | '?' | '#' | '@') || c.is_whitespace();
        if trimmed.contains("://") || trimmed.contains(forbidden) {
            return Err(ValidationError::InvalidHost {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the hostname.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender name (`from`).
///
/// Invariant: non-empty after trimming. The sender must be activated on messente.com.
pub struct SenderId(String);

impl SenderId {
    /// Query parameter name used by Messente (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The value is kept as given, whitespace included.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by Messente (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id (`sms_unique_id`) returned by `send_sms`.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Query parameter name used by Messente (`sms_unique_id`).
    pub const FIELD: &'static str = "sms_unique_id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Verification session id (`verification_id`) returned by `verify/start`.
pub struct VerificationId(String);

impl VerificationId {
    pub const FIELD: &'static str = "verification_id";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// PIN code entered by the end user (`pin`).
pub struct Pin(String);

impl Pin {
    pub const FIELD: &'static str = "pin";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Browser session cookie tying a verification session to a client (`cookie`).
///
/// Invariant: non-empty after trimming. An absent cookie is expressed with `Option::None`.
pub struct Cookie(String);

impl Cookie {
    /// Query parameter name used by Messente (`cookie`).
    pub const FIELD: &'static str = "cookie";

    /// Create a validated [`Cookie`]; a blank value is rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the cookie as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Verification SMS template (`template`).
///
/// Invariant: non-blank and contains the [`MessageTemplate::PLACEHOLDER`] token.
pub struct MessageTemplate(String);

impl MessageTemplate {
    /// Query parameter name used by Messente (`template`).
    pub const FIELD: &'static str = "template";

    /// Token replaced by the gateway with the generated PIN.
    pub const PLACEHOLDER: &'static str = "<PIN>";

    /// Create a validated template.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !value.contains(Self::PLACEHOLDER) {
            return Err(ValidationError::MissingPinPlaceholder {
                placeholder: Self::PLACEHOLDER,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the template as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// ISO 3166-1 alpha-2 country code used by the pricing API (`country`).
///
/// Invariant: exactly two ASCII letters, stored upper-case.
pub struct CountryCode([u8; 2]);

impl CountryCode {
    /// Query parameter name used by Messente (`country`).
    pub const FIELD: &'static str = "country";

    /// Create a validated country code (`"hu"` and `" HU "` both become `HU`).
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        match trimmed.as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Ok(Self([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => Err(ValidationError::InvalidCountryCode {
                input: trimmed.to_owned(),
            }),
        }
    }

    /// Borrow the upper-case code.
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII letters by construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

/// Strip every non-digit character and prepend a single `+`.
///
/// Idempotent: normalizing an already-normalized number yields the same value.
pub fn normalize_phone_number(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len() + 1);
    normalized.push('+');
    normalized.extend(input.chars().filter(char::is_ascii_digit));
    normalized
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Phone number as provided by the caller (`to`).
///
/// Invariant: non-empty after trimming. The value is normalized with
/// [`normalize_phone_number`] only when it goes on the wire; parse into
/// [`PhoneNumber`] for full E.164 validation.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query parameter name used by Messente (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as provided.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// `+` followed by the digits of the raw value.
    pub fn normalized(&self) -> String {
        normalize_phone_number(&self.0)
    }

    /// Whether the raw value contains at least one digit.
    pub fn has_digits(&self) -> bool {
        self.0.chars().any(|c| c.is_ascii_digit())
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to its E.164 form.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Query parameter name used by Messente (`to`).
    pub const FIELD: &'static str = "to";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Unix timestamp in seconds for delayed sending (`time_to_send`).
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// Query parameter name used by Messente (`time_to_send`).
    pub const FIELD: &'static str = "time_to_send";

    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Character set used for `from` and `text` (`charset`).
///
/// The caller's label is preserved as sent on the wire; the encoder is resolved
/// through the WHATWG label table.
pub struct Charset {
    label: String,
    encoding: &'static Encoding,
    /// Highest code point the charset maps one-to-one onto a single byte.
    ///
    /// Set for labels the WHATWG table folds into windows-1252 (`US-ASCII`,
    /// `ISO-8859-1`), whose real repertoires are smaller.
    byte_limit: Option<u32>,
}

const ASCII_LABELS: [&str; 3] = ["ansi_x3.4-1968", "ascii", "us-ascii"];
const LATIN1_LABELS: [&str; 11] = [
    "cp819",
    "csisolatin1",
    "ibm819",
    "iso-8859-1",
    "iso-ir-100",
    "iso8859-1",
    "iso88591",
    "iso_8859-1",
    "iso_8859-1:1987",
    "l1",
    "latin1",
];

fn byte_limit(label: &str) -> Option<u32> {
    let label = label.to_ascii_lowercase();
    if ASCII_LABELS.contains(&label.as_str()) {
        Some(0x7F)
    } else if LATIN1_LABELS.contains(&label.as_str()) {
        Some(0xFF)
    } else {
        None
    }
}

impl Charset {
    /// Query parameter name used by Messente (`charset`).
    pub const FIELD: &'static str = "charset";

    /// Resolve a charset label such as `UTF-8` or `ISO-8859-1`.
    pub fn new(label: impl Into<String>) -> Result<Self, EncodingError> {
        let label = label.into().trim().to_owned();
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| EncodingError::UnknownCharset {
                label: label.clone(),
            })?;
        // UTF-16 and `replacement` cannot produce bytes of their own.
        if encoding.output_encoding() != encoding {
            return Err(EncodingError::UnsupportedCharset { label });
        }
        let byte_limit = byte_limit(&label);
        Ok(Self {
            label,
            encoding,
            byte_limit,
        })
    }

    /// The default charset (`UTF-8`).
    pub fn utf8() -> Self {
        Self {
            label: "UTF-8".to_owned(),
            encoding: encoding_rs::UTF_8,
            byte_limit: None,
        }
    }

    /// The label as provided by the caller.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Encode `value` into this charset; unmappable characters are an error.
    pub fn encode<'a>(
        &self,
        field: &'static str,
        value: &'a str,
    ) -> Result<Cow<'a, [u8]>, EncodingError> {
        if let Some(limit) = self.byte_limit {
            return value
                .chars()
                .map(|c| u8::try_from(c).ok().filter(|b| u32::from(*b) <= limit))
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned)
                .ok_or_else(|| EncodingError::Unmappable {
                    field,
                    charset: self.label.clone(),
                });
        }
        let (bytes, _, had_errors) = self.encoding.encode(value);
        if had_errors {
            return Err(EncodingError::Unmappable {
                field,
                charset: self.label.clone(),
            });
        }
        Ok(bytes)
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::utf8()
    }
}
