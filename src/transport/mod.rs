//! Transport layer: wire-format details (parameter encoding, URLs, response decoding).

mod codec;
mod decode;
mod delivery_status;
mod endpoint;
mod prices;
mod send_sms;
mod verification;

pub use codec::encode_query;
pub use decode::{decode_delivery_status, decode_response, is_success_body};
pub use delivery_status::encode_delivery_status_form;
pub use endpoint::{ApiMethod, UrlBuildError, build_url};
pub use prices::encode_price_list_form;
pub use send_sms::encode_send_sms_form;
pub use verification::{encode_start_verification_form, encode_verify_pin_form};
