#[derive(Debug, Clone, PartialEq, Eq)]
/// Unmodified response body and HTTP status of one exchange with the gateway.
pub struct RawResponse {
    pub body: String,
    pub http_status: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded view over a [`RawResponse`].
///
/// A gateway rejection (`ERROR n` / `FAILED n`) is not an error of the client:
/// it is reported here with `success == false`.
pub struct GatewayResponse {
    pub raw: RawResponse,
    pub success: bool,
    /// Payload after the `OK ` prefix; `None` when the call was not successful.
    pub result: Option<String>,
    /// Human-readable explanation of the response.
    pub message: String,
}

impl GatewayResponse {
    pub fn body(&self) -> &str {
        &self.raw.body
    }

    pub fn http_status(&self) -> u16 {
        self.raw.http_status
    }

    /// Known response code for this body, if any.
    pub fn code(&self) -> Option<ResponseCode> {
        ResponseCode::from_body(&self.raw.body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Delivery state reported by `get_dlr_response`.
pub enum DeliveryState {
    /// Submitted to the operator, no delivery information yet.
    Sent,
    Delivered,
    Failed,
    /// The gateway has no delivery report yet (`FAILED 102`).
    NotYetAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded delivery report.
///
/// `response.success` is also `true` for `FAILED 102` ("no report yet"), which
/// differs from the generic rule that every `FAILED` body is a failure; in that
/// case `response.result` holds the literal `FAILED 102`.
pub struct DeliveryStatus {
    pub response: GatewayResponse,
    /// `None` when the body is not one of the known delivery states.
    pub state: Option<DeliveryState>,
}

impl DeliveryStatus {
    pub fn is_success(&self) -> bool {
        self.response.success
    }
}

impl DeliveryState {
    /// Map an exact delivery-report body to its state.
    pub fn from_body(body: &str) -> Option<Self> {
        Some(match body {
            "OK SENT" => Self::Sent,
            "OK DELIVERED" => Self::Delivered,
            "OK FAILED" => Self::Failed,
            "FAILED 102" => Self::NotYetAvailable,
            _ => return None,
        })
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Sent => {
                "Message has been submitted but does not yet have any delivery information"
            }
            Self::Delivered => "SMS was successfully delivered to recipient",
            Self::Failed => "Message delivery failed!",
            Self::NotYetAvailable => ResponseCode::NoDeliveryReportYet.message(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known `ERROR n` / `FAILED n` bodies returned by the gateway.
///
/// Unknown codes are kept verbatim in [`RawResponse::body`].
pub enum ResponseCode {
    AccessRestricted,
    ParametersWrongOrMissing,
    InvalidIp,
    UnknownCountry,
    CountryNotSupported,
    InvalidFormat,
    UnknownMessageId,
    BlacklistedNumber,
    InvalidSender,
    NoDeliveryReportYet,
    ServerFailure,
}

impl ResponseCode {
    /// Map an exact response body to a known code.
    pub fn from_body(body: &str) -> Option<Self> {
        Some(match body {
            "ERROR 101" => Self::AccessRestricted,
            "ERROR 102" => Self::ParametersWrongOrMissing,
            "ERROR 103" => Self::InvalidIp,
            "ERROR 104" => Self::UnknownCountry,
            "ERROR 105" => Self::CountryNotSupported,
            "ERROR 106" => Self::InvalidFormat,
            "ERROR 107" => Self::UnknownMessageId,
            "ERROR 108" => Self::BlacklistedNumber,
            "ERROR 111" => Self::InvalidSender,
            "FAILED 102" => Self::NoDeliveryReportYet,
            "FAILED 209" => Self::ServerFailure,
            _ => return None,
        })
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::AccessRestricted => {
                "Access is restricted, wrong credentials. Check the username and password values."
            }
            Self::ParametersWrongOrMissing => {
                "Parameters are wrong or missing. Check that all the required parameters are present."
            }
            Self::InvalidIp => {
                "Invalid IP address. The IP address you made the request from, is not in the API settings whitelist."
            }
            Self::UnknownCountry => "Country was not found.",
            Self::CountryNotSupported => "This country is not supported",
            Self::InvalidFormat => "Invalid format provided - only json or xml is allowed.",
            Self::UnknownMessageId => "Could not find the message with sms_unique_id",
            Self::BlacklistedNumber => "Number is in blacklist.",
            Self::InvalidSender => {
                "Sender parameter \"from\" is invalid. You have not activated this sender name on messente.com"
            }
            Self::NoDeliveryReportYet => "No Delivery report yet, try again later.",
            Self::ServerFailure => {
                "Server failure. Try again after a few seconds or try the api3.messente.com backup server."
            }
        }
    }

    /// Whether the gateway asks the caller to retry against the backup host.
    pub fn is_server_failure(self) -> bool {
        matches!(self, Self::ServerFailure)
    }

    /// Whether the credentials were rejected.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::AccessRestricted | Self::InvalidIp)
    }
}
