use std::future::{Ready, ready};

use actix_identity::Identity;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized};
use serde::{Deserialize, Serialize};

/// Identity of the signed-in admin, stored as JSON in the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn new(email: impl Into<String>, name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            roles,
        }
    }

    /// Serialize for storage in the identity cookie.
    pub fn to_session_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn from_session_string(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Whether `roles` grants the named role.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|granted| granted == role)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let user = Identity::from_request(req, payload)
            .into_inner()
            .and_then(|identity| {
                identity
                    .id()
                    .map_err(|err| ErrorUnauthorized(err.to_string()))
            })
            .and_then(|raw| {
                Self::from_session_string(&raw)
                    .map_err(|_| ErrorUnauthorized("authentication required"))
            });
        ready(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_role_matches_exactly() {
        let roles = vec!["admin".to_string(), "editor".to_string()];
        assert!(check_role("admin", &roles));
        assert!(check_role("editor", &roles));
        assert!(!check_role("adm", &roles));
        assert!(!check_role("admin", &[]));
    }

    #[test]
    fn session_string_round_trips() {
        let user = AuthenticatedUser::new(
            "admin@example.com",
            "Admin",
            vec!["admin".to_string()],
        );

        let raw = user.to_session_string().expect("serialize");
        let restored = AuthenticatedUser::from_session_string(&raw).expect("deserialize");

        assert_eq!(restored.email, user.email);
        assert_eq!(restored.name, user.name);
        assert_eq!(restored.roles, user.roles);
    }
}
