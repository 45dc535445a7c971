use crate::domain::{
    Autoconvert, Charset, MessageText, RawPhoneNumber, SendSms, SenderId, UnixTimestamp,
};
use crate::transport::codec::FormParam;

const DLR_URL_FIELD: &str = "dlr-url";
const VALIDITY_FIELD: &str = "validity";
const UDH_FIELD: &str = "udh";

pub fn encode_send_sms_form(request: &SendSms) -> Vec<FormParam<'_>> {
    let options = request.options();
    let charset = &options.charset;
    let mut params = Vec::<FormParam<'_>>::new();

    if let Some(from) = request.from() {
        params.push(FormParam::with_charset(
            SenderId::FIELD,
            from.as_str(),
            charset,
        ));
    }
    params.push(FormParam::utf8(
        RawPhoneNumber::FIELD,
        request.to().normalized(),
    ));
    params.push(FormParam::with_charset(
        MessageText::FIELD,
        request.text().as_str(),
        charset,
    ));
    params.push(FormParam::utf8(Charset::FIELD, charset.label()));

    if let Some(autoconvert) = options.autoconvert {
        params.push(FormParam::utf8(Autoconvert::FIELD, autoconvert.as_str()));
    }
    if let Some(time) = options.time_to_send {
        params.push(FormParam::utf8(
            UnixTimestamp::FIELD,
            time.value().to_string(),
        ));
    }
    if let Some(dlr_url) = options.dlr_url.as_ref() {
        params.push(FormParam::utf8(DLR_URL_FIELD, dlr_url.as_str()));
    }
    if let Some(validity) = options.validity {
        params.push(FormParam::utf8(VALIDITY_FIELD, validity.to_string()));
    }
    if let Some(udh) = options.udh.as_deref().filter(|udh| !udh.trim().is_empty()) {
        params.push(FormParam::utf8(UDH_FIELD, udh));
    }

    params
}
