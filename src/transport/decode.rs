use crate::domain::{DeliveryState, DeliveryStatus, GatewayResponse, RawResponse, ResponseCode};

const OK_PREFIX: &str = "OK ";
const ERROR_PREFIX: &str = "ERROR ";
const FAILED_PREFIX: &str = "FAILED ";
const NO_DELIVERY_REPORT_YET: &str = "FAILED 102";

/// Decode an `OK <payload>` / `ERROR <code>` / `FAILED <code>` body.
pub fn decode_response(raw: RawResponse) -> GatewayResponse {
    let body = raw.body.as_str();
    let success = is_success_body(body);

    let result = success.then(|| body.strip_prefix(OK_PREFIX).unwrap_or(body).to_owned());
    let known = if success {
        DeliveryState::from_body(body).map(DeliveryState::message)
    } else {
        ResponseCode::from_body(body).map(ResponseCode::message)
    };
    let message = known.unwrap_or(body).to_owned();

    GatewayResponse {
        raw,
        success,
        result,
        message,
    }
}

/// Decode a `get_dlr_response` body.
///
/// `FAILED 102` (no report yet) also counts as success and is kept verbatim as the result.
pub fn decode_delivery_status(raw: RawResponse) -> DeliveryStatus {
    let state = DeliveryState::from_body(&raw.body);
    let mut response = decode_response(raw);
    if response.raw.body == NO_DELIVERY_REPORT_YET {
        response.success = true;
        response.result = Some(NO_DELIVERY_REPORT_YET.to_owned());
    }
    DeliveryStatus { response, state }
}

/// `true` unless the body is blank or starts with `ERROR ` / `FAILED `.
pub fn is_success_body(body: &str) -> bool {
    !body.trim().is_empty() && !body.starts_with(ERROR_PREFIX) && !body.starts_with(FAILED_PREFIX)
}
