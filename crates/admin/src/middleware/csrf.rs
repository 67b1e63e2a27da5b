//! Per-session form tokens.
//!
//! Settings forms embed the token as `_token`; write endpoints compare it to
//! the value held in the session.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use tower_sessions::Session;

use crate::models::session_keys;

/// Form field carrying the token.
pub const CSRF_FIELD: &str = "_token";

/// Get the session's form token, creating one on first use.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn csrf_token(session: &Session) -> Result<String, tower_sessions::session::Error> {
    if let Some(token) = session.get::<String>(session_keys::CSRF_TOKEN).await? {
        return Ok(token);
    }

    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    let token = URL_SAFE_NO_PAD.encode(bytes);
    session.insert(session_keys::CSRF_TOKEN, &token).await?;
    Ok(token)
}

/// Whether `submitted` matches the session's form token.
///
/// A session without a token never matches.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn verify_csrf_token(
    session: &Session,
    submitted: Option<&str>,
) -> Result<bool, tower_sessions::session::Error> {
    let expected = session.get::<String>(session_keys::CSRF_TOKEN).await?;
    Ok(match (expected, submitted) {
        (Some(expected), Some(submitted)) => constant_time_eq(&expected, submitted),
        _ => false,
    })
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
        assert!(!constant_time_eq("", "a"));
    }
}
