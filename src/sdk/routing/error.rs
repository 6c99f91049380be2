use serde::Deserialize;
use thiserror::Error;

// Helper structs to parse the JSON error bodies returned by TomTom.
// Routing errors carry `error.description`, search errors carry `errorText`;
// both usually carry a `detailedError` with a machine readable code.
#[derive(Deserialize, Debug)]
pub struct DetailedError {
    pub code: String,
    pub message: String,
}

#[derive(Deserialize, Debug)]
pub struct ErrorDescription {
    pub description: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TomTomErrorPayload {
    pub detailed_error: Option<DetailedError>,
    pub error: Option<ErrorDescription>,
    pub error_text: Option<String>,
}

impl TomTomErrorPayload {
    /// Turns the payload into the most specific error it can describe,
    /// or `None` when it carries nothing usable.
    pub fn into_error(self) -> Option<RoutingError> {
        if let Some(detail) = self.detailed_error {
            if UNROUTABLE_CODES.contains(&detail.code.as_str()) {
                return Some(RoutingError::UnroutablePoint);
            }
            return Some(RoutingError::ApiError {
                code: detail.code,
                message: detail.message,
            });
        }
        self.error
            .map(|e| e.description)
            .or(self.error_text)
            .map(RoutingError::RawApiError)
    }
}

const UNROUTABLE_CODES: &[&str] = &["MAP_MATCHING_FAILURE", "NO_ROUTE_FOUND"];

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("A point was not routable on the road network")]
    UnroutablePoint,

    // This variant holds the structured error from the API
    #[error("API Error (Code {code}): {message}")]
    ApiError { code: String, message: String },

    // A fallback for when we get an error that isn't in the expected JSON format
    #[error("Unstructured API Error: {0}")]
    RawApiError(String),

    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("The routing service returned a route without geometry")]
    EmptyRoute,

    #[error("Generic error: {0}")]
    Generic(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing_error_body_with_detail_maps_to_api_error() {
        let body = r#"{
            "formatVersion": "0.0.12",
            "error": { "description": "Invalid request: invalid vehicleMaxSpeed" },
            "detailedError": { "code": "BAD_INPUT", "message": "invalid vehicleMaxSpeed" }
        }"#;
        let payload: TomTomErrorPayload = serde_json::from_str(body).unwrap();
        match payload.into_error() {
            Some(RoutingError::ApiError { code, message }) => {
                assert_eq!(code, "BAD_INPUT");
                assert_eq!(message, "invalid vehicleMaxSpeed");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn no_route_code_maps_to_unroutable() {
        let body = r#"{"detailedError": {"code": "NO_ROUTE_FOUND", "message": "none"}}"#;
        let payload: TomTomErrorPayload = serde_json::from_str(body).unwrap();
        assert!(matches!(
            payload.into_error(),
            Some(RoutingError::UnroutablePoint)
        ));
    }

    #[test]
    fn search_error_text_is_kept_raw() {
        let body = r#"{"errorText": "Error parsing 'lat'", "httpStatusCode": 400}"#;
        let payload: TomTomErrorPayload = serde_json::from_str(body).unwrap();
        match payload.into_error() {
            Some(RoutingError::RawApiError(text)) => assert_eq!(text, "Error parsing 'lat'"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_payload_describes_nothing() {
        let payload: TomTomErrorPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.into_error().is_none());
    }
}
