use axum::http::StatusCode;
use common::domain::DomainError;

/// Convert a domain error to its transport status and detail body.
///
/// Validation-class failures (bad request shape, unresolvable device or
/// sub-service, rejected fleet credential) map to 400; everything else,
/// including every registry failure, maps to 500.
pub fn domain_error_to_response(error: DomainError) -> (StatusCode, String) {
    let status = match &error {
        DomainError::BadRequest(_)
        | DomainError::DeviceNotFound(_)
        | DomainError::AuthFailure(_) => StatusCode::BAD_REQUEST,

        DomainError::RegistryDeviceNotFound(_)
        | DomainError::RegistryDeviceAlreadyExists(_)
        | DomainError::RegistryFailure(_)
        | DomainError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_class_maps_to_400() {
        for error in [
            DomainError::BadRequest("missing handle".to_string()),
            DomainError::DeviceNotFound("abc123".to_string()),
            DomainError::AuthFailure("rejected".to_string()),
        ] {
            let (status, _) = domain_error_to_response(error);
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_registry_and_unexpected_map_to_500() {
        for error in [
            DomainError::RegistryDeviceNotFound("balena-abc123".to_string()),
            DomainError::RegistryDeviceAlreadyExists("balena-abc123".to_string()),
            DomainError::RegistryFailure("unavailable".to_string()),
            DomainError::Unexpected(anyhow::anyhow!("boom")),
        ] {
            let (status, _) = domain_error_to_response(error);
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_body_carries_error_detail() {
        let (_, body) =
            domain_error_to_response(DomainError::DeviceNotFound("abc123".to_string()));
        assert!(body.contains("abc123"));
    }
}
