//! Credential gate.
//!
//! Validates the raw `Authorization` header value against a static
//! user/password table and a separate admin password.

use std::collections::HashMap;
use std::fmt;

const BASIC_PREFIX: &str = "Basic ";

/// Static credential tables, built once at startup.
///
/// `Default` carries the built-in accounts; tests and alternative
/// deployments can construct their own via [`AuthConfig::new`].
#[derive(Debug, Clone)]
pub struct AuthConfig {
    users: HashMap<String, String>,
    admin_password: String,
}

impl AuthConfig {
    pub fn new(users: HashMap<String, String>, admin_password: impl Into<String>) -> Self {
        Self {
            users,
            admin_password: admin_password.into(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        let users = HashMap::from([
            ("alice".to_string(), "wonderland".to_string()),
            ("bob".to_string(), "builder".to_string()),
            ("clementine".to_string(), "mandarine".to_string()),
        ]);
        Self::new(users, "4dm1N")
    }
}

/// Result of a successful credential check. Recomputed per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

/// Reasons a credential check can fail. All map to a 401 rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No `Authorization` header was supplied.
    MissingHeader,
    /// The header does not start with the literal `Basic ` scheme token.
    MalformedScheme,
    /// The credential payload has no colon separating username and password.
    MalformedCredentials,
    /// Username/password pair matched neither the user table nor the admin
    /// password.
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "Missing Authorization header"),
            AuthError::MalformedScheme => {
                write!(f, "Authorization must start with 'Basic '")
            }
            AuthError::MalformedCredentials => {
                write!(f, "Invalid credential format, expected username:password")
            }
            AuthError::InvalidCredentials => write!(f, "Invalid username or password"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Validate a raw `Authorization` header value.
///
/// The expected shape is the literal `"Basic <username>:<password>"`: the
/// colon-joined text in plain form, not a transport-encoded blob. The
/// payload splits on the first colon, so passwords may contain colons.
///
/// Anyone presenting the admin password is an admin, whatever username they
/// supply. This universal override is intentional; see DESIGN.md for the
/// caveats.
pub fn authenticate(config: &AuthConfig, header: Option<&str>) -> Result<Identity, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let credentials = header
        .strip_prefix(BASIC_PREFIX)
        .ok_or(AuthError::MalformedScheme)?
        .trim();
    let (username, password) = credentials
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;

    if password == config.admin_password {
        return Ok(Identity {
            username: username.to_string(),
            is_admin: true,
        });
    }

    match config.users.get(username) {
        Some(expected) if expected == password => Ok(Identity {
            username: username.to_string(),
            is_admin: false,
        }),
        _ => Err(AuthError::InvalidCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user() {
        let config = AuthConfig::default();
        let identity = authenticate(&config, Some("Basic alice:wonderland")).unwrap();
        assert_eq!(identity.username, "alice");
        assert!(!identity.is_admin);
    }

    #[test]
    fn test_admin_password_grants_admin_to_any_username() {
        let config = AuthConfig::default();
        let identity = authenticate(&config, Some("Basic anything:4dm1N")).unwrap();
        assert_eq!(identity.username, "anything");
        assert!(identity.is_admin);

        // Even a username from the user table becomes admin this way.
        let identity = authenticate(&config, Some("Basic alice:4dm1N")).unwrap();
        assert!(identity.is_admin);
    }

    #[test]
    fn test_wrong_password() {
        let config = AuthConfig::default();
        assert_eq!(
            authenticate(&config, Some("Basic alice:wrong")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_unknown_username() {
        let config = AuthConfig::default();
        assert_eq!(
            authenticate(&config, Some("Basic mallory:wonderland")),
            Err(AuthError::InvalidCredentials)
        );
    }

    #[test]
    fn test_missing_header() {
        let config = AuthConfig::default();
        assert_eq!(authenticate(&config, None), Err(AuthError::MissingHeader));
    }

    #[test]
    fn test_wrong_scheme() {
        let config = AuthConfig::default();
        assert_eq!(
            authenticate(&config, Some("Bearer x:y")),
            Err(AuthError::MalformedScheme)
        );
        // The scheme token is case-sensitive.
        assert_eq!(
            authenticate(&config, Some("basic alice:wonderland")),
            Err(AuthError::MalformedScheme)
        );
    }

    #[test]
    fn test_no_colon() {
        let config = AuthConfig::default();
        assert_eq!(
            authenticate(&config, Some("Basic alicewonderland")),
            Err(AuthError::MalformedCredentials)
        );
    }

    #[test]
    fn test_password_may_contain_colons() {
        let config = AuthConfig::new(
            HashMap::from([("eve".to_string(), "pa:ss".to_string())]),
            "root",
        );
        let identity = authenticate(&config, Some("Basic eve:pa:ss")).unwrap();
        assert_eq!(identity.username, "eve");
        assert!(!identity.is_admin);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let config = AuthConfig::default();
        let identity = authenticate(&config, Some("Basic  alice:wonderland ")).unwrap();
        assert_eq!(identity.username, "alice");
    }
}
