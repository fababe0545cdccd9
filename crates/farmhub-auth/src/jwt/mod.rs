//! Bearer-token encoding and decoding.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use farmhub_core::ErrorKind;
    use farmhub_core::config::AuthConfig;
    use farmhub_core::types::UserId;
    use farmhub_entity::user::{Role, User};

    use super::*;

    fn user() -> User {
        User {
            id: UserId(7),
            username: "farmer_sunamganj".into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: Role::Farmer,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            password_hash: String::new(),
            date_joined: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_issued_token_decodes_to_same_subject() {
        let config = AuthConfig::default();
        let (token, _) = JwtEncoder::new(&config).issue(&user()).unwrap();
        let claims = JwtDecoder::new(&config).decode(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), UserId(7));
        assert_eq!(claims.username, "farmer_sunamganj");
    }

    #[test]
    fn test_foreign_secret_is_rejected() {
        let (token, _) = JwtEncoder::new(&AuthConfig::default())
            .issue(&user())
            .unwrap();
        let other = AuthConfig {
            jwt_secret: "another-secret".into(),
            ..AuthConfig::default()
        };
        let err = JwtDecoder::new(&other).decode(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = JwtDecoder::new(&AuthConfig::default())
            .decode("not.a.jwt")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}
