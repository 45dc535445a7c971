use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    InvalidHost { input: String },
    InvalidCountryCode { input: String },
    MissingPinPlaceholder { placeholder: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidHost { input } => {
                write!(f, "invalid host: {input} (expected a bare hostname)")
            }
            Self::InvalidCountryCode { input } => {
                write!(f, "invalid country code: {input} (expected ISO 3166-1 alpha-2)")
            }
            Self::MissingPinPlaceholder { placeholder } => {
                write!(f, "verification template is missing the {placeholder} placeholder")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    UnknownCharset { label: String },
    UnsupportedCharset { label: String },
    Unmappable { field: &'static str, charset: String },
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCharset { label } => write!(f, "unknown charset: {label}"),
            Self::UnsupportedCharset { label } => {
                write!(f, "charset {label} can't be used for url encoding")
            }
            Self::Unmappable { field, charset } => {
                write!(f, "{field} can't be encoded to {charset}")
            }
        }
    }
}

impl std::error::Error for EncodingError {}
