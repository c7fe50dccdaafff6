//! Account registration, login, and session token verification.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{NewUser, SafeUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// JWT claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iat: i64,
    exp: i64,
}

/// Verified caller identity extracted from a session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// Validated input for registration.
///
/// Field shapes are checked by the request DTO before this is built;
/// the service handles normalization and duplicate detection.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Service for account management and session tokens.
///
/// Passwords are stored as salted argon2 hashes. Session tokens are
/// HS256 JWTs carrying the user id and email with a fixed expiry; there
/// is no server-side session store.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl_secs: u64,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository for DB operations
    /// - `jwt_secret` - HMAC key for signing and verifying session tokens
    /// - `token_ttl_secs` - token lifetime in seconds
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: String, token_ttl_secs: u64) -> Self {
        Self {
            users,
            jwt_secret,
            token_ttl_secs,
        }
    }

    /// Registers a new user.
    ///
    /// The email is lowercased before the duplicate check and storage so
    /// lookups are case-insensitive. The returned projection never
    /// contains the password hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a user with the same email or
    /// phone already exists. Returns [`AppError::Internal`] on hashing or
    /// database failures.
    pub async fn register(&self, input: RegisterInput) -> Result<SafeUser, AppError> {
        let email = input.email.to_lowercase();

        if self
            .users
            .exists_by_email_or_phone(&email, &input.phone)
            .await?
        {
            return Err(AppError::conflict("User already exists", json!({})));
        }

        let password_hash = hash_password(&input.password)?;

        let user = self
            .users
            .create(NewUser {
                name: input.name,
                email,
                phone: input.phone,
                password_hash,
            })
            .await?;

        Ok(SafeUser::from(user))
    }

    /// Authenticates a user by email or phone and issues a session token.
    ///
    /// Email takes precedence when both identifiers are supplied. An
    /// unknown identifier and a wrong password produce the identical
    /// generic error so accounts cannot be enumerated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if neither identifier is present,
    /// [`AppError::Unauthorized`] on credential failure, and
    /// [`AppError::Internal`] on database errors.
    pub async fn login(
        &self,
        email: Option<String>,
        phone: Option<String>,
        password: &str,
    ) -> Result<(String, SafeUser), AppError> {
        let user = if let Some(email) = email {
            self.users.find_by_email(&email.to_lowercase()).await?
        } else if let Some(phone) = phone {
            self.users.find_by_phone(&phone).await?
        } else {
            return Err(AppError::bad_request(
                "Either email or phone is required",
                json!({}),
            ));
        };

        let Some(user) = user else {
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &user.password_hash) {
            return Err(AppError::invalid_credentials());
        }

        let token = self.issue_token(&user)?;

        Ok((token, SafeUser::from(user)))
    }

    /// Verifies a bearer token and extracts the caller identity.
    ///
    /// A missing, malformed, expired, or tampered token all map to the
    /// same [`AppError::Unauthorized`] before any protected handler runs.
    pub fn verify_token(&self, token: &str) -> Result<AuthUser, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| {
            AppError::unauthorized("Invalid or expired token", json!({}))
        })?;

        let id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| AppError::unauthorized("Invalid or expired token", json!({})))?;

        Ok(AuthUser {
            id,
            email: data.claims.email,
        })
    }

    fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now,
            exp: now + self.token_ttl_secs as i64,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, "Token signing failed");
            AppError::internal("Internal server error", json!({}))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;

    fn test_secret() -> String {
        "test-jwt-secret".to_string()
    }

    fn stored_user(email: &str, phone: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn register_input() -> RegisterInput {
        RegisterInput {
            name: "Ann".to_string(),
            email: "Ann@X.com".to_string(),
            phone: "9876543210".to_string(),
            password: "Ab1!abcd".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success_lowercases_email() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_exists_by_email_or_phone()
            .withf(|email, phone| email == "ann@x.com" && phone == "9876543210")
            .times(1)
            .returning(|_, _| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_user| {
                new_user.email == "ann@x.com"
                    && new_user.password_hash != "Ab1!abcd"
                    && new_user.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: Uuid::new_v4(),
                    name: new_user.name,
                    email: new_user.email,
                    phone: new_user.phone,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let safe = service.register(register_input()).await.unwrap();
        assert_eq!(safe.email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_conflict() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_exists_by_email_or_phone()
            .times(1)
            .returning(|_, _| Ok(true));

        mock_repo.expect_create().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let result = service.register(register_input()).await;
        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_success_token_verifies() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("ann@x.com", "9876543210", "Ab1!abcd");
        let user_id = user.id;

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "ann@x.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let (token, safe) = service
            .login(Some("Ann@X.com".to_string()), None, "Ab1!abcd")
            .await
            .unwrap();

        assert_eq!(safe.id, user_id);

        let identity = service.verify_token(&token).unwrap();
        assert_eq!(identity.id, user_id);
        assert_eq!(identity.email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_login_email_takes_precedence() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("ann@x.com", "9876543210", "Ab1!abcd");

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        mock_repo.expect_find_by_phone().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let result = service
            .login(
                Some("ann@x.com".to_string()),
                Some("9876543210".to_string()),
                "Ab1!abcd",
            )
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_by_phone() {
        let mut mock_repo = MockUserRepository::new();
        let user = stored_user("ann@x.com", "9876543210", "Ab1!abcd");

        mock_repo
            .expect_find_by_phone()
            .withf(|phone| phone == "9876543210")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let result = service
            .login(None, Some("9876543210".to_string()), "Ab1!abcd")
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut unknown_repo = MockUserRepository::new();
        unknown_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(unknown_repo), test_secret(), 3600);
        let unknown_err = service
            .login(Some("ghost@x.com".to_string()), None, "Ab1!abcd")
            .await
            .unwrap_err();

        let mut wrong_pw_repo = MockUserRepository::new();
        let user = stored_user("ann@x.com", "9876543210", "Ab1!abcd");
        wrong_pw_repo
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(wrong_pw_repo), test_secret(), 3600);
        let wrong_pw_err = service
            .login(Some("ann@x.com".to_string()), None, "WRONG1!x")
            .await
            .unwrap_err();

        assert_eq!(unknown_err.to_string(), wrong_pw_err.to_string());
        assert!(matches!(unknown_err, AppError::Unauthorized { .. }));
        assert!(matches!(wrong_pw_err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_missing_identifier_is_validation_error() {
        let mock_repo = MockUserRepository::new();
        let service = AuthService::new(Arc::new(mock_repo), test_secret(), 3600);

        let result = service.login(None, None, "Ab1!abcd").await;
        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret(), 3600);

        // Expired beyond jsonwebtoken's default 60s leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "ann@x.com".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(test_secret().as_bytes()),
        )
        .unwrap();

        let result = service.verify_token(&token);
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_verify_rejects_wrong_signature() {
        let issuer = AuthService::new(
            Arc::new(MockUserRepository::new()),
            "other-secret".to_string(),
            3600,
        );
        let verifier =
            AuthService::new(Arc::new(MockUserRepository::new()), test_secret(), 3600);

        let user = stored_user("ann@x.com", "9876543210", "Ab1!abcd");
        let token = issuer.issue_token(&user).unwrap();

        assert!(verifier.verify_token(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let service = AuthService::new(Arc::new(MockUserRepository::new()), test_secret(), 3600);
        assert!(service.verify_token("not.a.jwt").is_err());
        assert!(service.verify_token("").is_err());
    }
}
