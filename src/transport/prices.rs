use crate::domain::{CountryCode, PriceFormat, PriceList};
use crate::transport::codec::FormParam;

pub fn encode_price_list_form(request: &PriceList) -> Vec<FormParam<'static>> {
    let mut params = vec![FormParam::utf8(
        CountryCode::FIELD,
        request.country().as_str().to_owned(),
    )];
    if let Some(format) = request.format() {
        params.push(FormParam::utf8(PriceFormat::FIELD, format.as_str()));
    }
    params
}
