//! DTOs for registration and login endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::SafeUser;
use crate::utils::validation::{EMAIL_REGEX, PHONE_REGEX, validate_password_strength};

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters long"))]
    pub name: String,

    #[validate(regex(path = "*EMAIL_REGEX", message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = "*PHONE_REGEX", message = "Phone number must be exactly 10 digits"))]
    pub phone: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
///
/// Every field is optional at the deserialization layer so that a
/// missing one yields a 400 validation error rather than a rejected
/// body. At least one of `email` / `phone` must be present; that rule
/// spans two fields, so the handler checks it (and the password's
/// presence) after field validation.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(regex(path = "*EMAIL_REGEX", message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(regex(path = "*PHONE_REGEX", message = "Phone must be exactly 10 digits"))]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
}

/// Response body for successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: SafeUser,
}

/// Response body for successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: SafeUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            phone: "9876543210".to_string(),
            password: "Ab1!abcd".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_fields() {
        let req = RegisterRequest {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            phone: "123".to_string(),
            password: "weak".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_login_request_optional_identifiers() {
        let req = LoginRequest {
            email: None,
            phone: Some("9876543210".to_string()),
            password: Some("whatever".to_string()),
        };
        assert!(req.validate().is_ok());

        let req = LoginRequest {
            email: Some("bad".to_string()),
            phone: None,
            password: Some("whatever".to_string()),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request_tolerates_missing_password() {
        // The handler turns the absent password into a 400; the DTO must
        // deserialize without it rather than reject the body outright.
        let req: LoginRequest =
            serde_json::from_value(serde_json::json!({ "email": "ann@x.com" })).unwrap();
        assert!(req.password.is_none());

        let empty = LoginRequest {
            email: Some("ann@x.com".to_string()),
            phone: None,
            password: Some(String::new()),
        };
        assert!(empty.validate().is_err());
    }
}
