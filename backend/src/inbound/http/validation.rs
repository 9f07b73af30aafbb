//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

pub(crate) fn invalid_uuid_error(field: &'static str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn missing_field_carries_structured_details() {
        let error = missing_field_error("idToken");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let details = error
            .details()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("field").and_then(|v| v.as_str()),
            Some("idToken")
        );
    }

    #[test]
    fn parse_uuid_reports_the_offending_value() {
        let error = parse_uuid("not-a-uuid", "restaurantId").expect_err("invalid uuid");
        let details = error
            .details()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(
            details.get("value").and_then(|v| v.as_str()),
            Some("not-a-uuid")
        );
    }

    #[test]
    fn parse_uuid_accepts_canonical_form() {
        assert!(parse_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6", "id").is_ok());
    }
}
