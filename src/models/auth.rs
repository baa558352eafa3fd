//! Authenticated user claims carried in the identity cookie.
//!
//! The portal does not manage passwords itself; an external auth service
//! issues a JWT which the session cookie stores. The extractor verifies the
//! token on every request, so handlers always see validated claims.

use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::profile::{NewProfile, Role};
use crate::models::config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Subject: the user's email address.
    pub sub: String,
    /// First name as issued by the auth service.
    pub first_name: String,
    /// Last name as issued by the auth service.
    pub last_name: String,
    /// Role label (applicant / expert / executive).
    pub role: String,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Decodes and validates a JWT into claims.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let decoded = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(decoded.claims)
    }

    /// Signs the claims into a JWT.
    pub fn to_jwt(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parses the role label carried in the token.
    pub fn parsed_role(&self) -> Option<Role> {
        Role::try_from(self.role.as_str()).ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&AuthenticatedUser> for NewProfile {
    /// Profile rows are refreshed from the verified claims on access.
    fn from(user: &AuthenticatedUser) -> Self {
        NewProfile::new(
            user.first_name.clone(),
            user.last_name.clone(),
            user.sub.clone(),
            user.parsed_role().unwrap_or(Role::Applicant),
        )
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let identity = Identity::from_request(req, payload).into_inner();
        let config = req.app_data::<web::Data<ServerConfig>>().cloned();

        ready((|| {
            let identity = identity.map_err(|_| ErrorUnauthorized("no identity"))?;
            let token = identity.id().map_err(|_| ErrorUnauthorized("no identity"))?;
            let config =
                config.ok_or_else(|| ErrorInternalServerError("server config missing"))?;
            AuthenticatedUser::from_jwt(&token, &config.secret)
                .map_err(|_| ErrorUnauthorized("invalid token"))
        })())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "Reviewer@Example.com".to_string(),
            first_name: "Besa".to_string(),
            last_name: "Kelmendi".to_string(),
            role: "executive".to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        }
    }

    #[test]
    fn jwt_round_trip() {
        let user = claims();
        let token = user.to_jwt("secret").unwrap();
        let decoded = AuthenticatedUser::from_jwt(&token, "secret").unwrap();
        assert_eq!(decoded.sub, user.sub);
        assert_eq!(decoded.parsed_role(), Some(Role::Executive));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = claims().to_jwt("secret").unwrap();
        assert!(AuthenticatedUser::from_jwt(&token, "other").is_err());
    }

    #[test]
    fn profile_refresh_normalizes_email() {
        let profile = NewProfile::from(&claims());
        assert_eq!(profile.email, "reviewer@example.com");
        assert_eq!(profile.role, Role::Executive);
    }
}
