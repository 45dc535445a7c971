use crate::domain::MessageId;
use crate::transport::codec::FormParam;

pub fn encode_delivery_status_form(message_id: &MessageId) -> Vec<FormParam<'_>> {
    vec![FormParam::utf8(MessageId::FIELD, message_id.as_str())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::codec::encode_query;

    #[test]
    fn encodes_message_id() {
        let id = MessageId::new("23i42o35hl3hh352").unwrap();
        assert_eq!(
            encode_query(&encode_delivery_status_form(&id)).unwrap(),
            "sms_unique_id=23i42o35hl3hh352"
        );
    }
}
