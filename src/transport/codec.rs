use std::borrow::Cow;

use url::form_urlencoded;

use crate::domain::{Charset, Credentials, EncodingError, Password, Username};

/// One query parameter before percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormParam<'a> {
    pub name: &'static str,
    pub value: Cow<'a, str>,
    /// `None` encodes the value as UTF-8.
    pub charset: Option<&'a Charset>,
}

impl<'a> FormParam<'a> {
    pub fn utf8(name: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name,
            value: value.into(),
            charset: None,
        }
    }

    pub fn with_charset(
        name: &'static str,
        value: impl Into<Cow<'a, str>>,
        charset: &'a Charset,
    ) -> Self {
        Self {
            name,
            value: value.into(),
            charset: Some(charset),
        }
    }
}

/// Join `params` into an `&`-separated, form-urlencoded query string.
///
/// Order is preserved. Fails when a value has no representation in its charset.
pub fn encode_query(params: &[FormParam<'_>]) -> Result<String, EncodingError> {
    let mut query = String::new();
    for param in params {
        let bytes = match param.charset {
            Some(charset) => charset.encode(param.name, &param.value)?,
            None => Cow::Borrowed(param.value.as_bytes()),
        };
        push_pair(&mut query, param.name, &bytes);
    }
    Ok(query)
}

/// `username=...&password=...`, always in this order.
pub fn encode_credentials(credentials: &Credentials) -> String {
    let mut query = String::new();
    push_pair(
        &mut query,
        Username::FIELD,
        credentials.username().as_str().as_bytes(),
    );
    push_pair(
        &mut query,
        Password::FIELD,
        credentials.password().as_str().as_bytes(),
    );
    query
}

fn push_pair(query: &mut String, name: &str, value: &[u8]) {
    if !query.is_empty() {
        query.push('&');
    }
    query.push_str(name);
    query.push('=');
    query.extend(form_urlencoded::byte_serialize(value));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_like_html_forms() {
        let params = [
            FormParam::utf8("to", "+3725123456"),
            FormParam::utf8("text", "This is a dummy SMS!"),
            FormParam::utf8("dlr-url", "http://www.yourdomain.com/process_dlr.php"),
            FormParam::utf8("safe", "a-b_c.d*e"),
        ];
        assert_eq!(
            encode_query(&params).unwrap(),
            "to=%2B3725123456&text=This+is+a+dummy+SMS%21\
             &dlr-url=http%3A%2F%2Fwww.yourdomain.com%2Fprocess_dlr.php&safe=a-b_c.d*e"
        );
    }

    #[test]
    fn encodes_in_requested_charset() {
        let utf8 = Charset::utf8();
        let latin1 = Charset::new("ISO-8859-1").unwrap();
        let params = [
            FormParam::with_charset("text", "é€", &utf8),
            FormParam::with_charset("from", "é", &latin1),
        ];
        assert_eq!(
            encode_query(&params).unwrap(),
            "text=%C3%A9%E2%82%AC&from=%E9"
        );
    }

    #[test]
    fn unmappable_value_is_an_encoding_error() {
        let latin1 = Charset::new("ISO-8859-1").unwrap();
        let params = [FormParam::with_charset("text", "Привет", &latin1)];
        assert_eq!(
            encode_query(&params),
            Err(EncodingError::Unmappable {
                field: "text",
                charset: "ISO-8859-1".to_owned(),
            })
        );
    }

    #[test]
    fn credentials_come_first_in_fixed_order() {
        let credentials = Credentials::new("user", "p&ss word").unwrap();
        assert_eq!(
            encode_credentials(&credentials),
            "username=user&password=p%26ss+word"
        );
    }

    #[test]
    fn empty_param_list_encodes_to_empty_string() {
        assert_eq!(encode_query(&[]).unwrap(), "");
    }
}
