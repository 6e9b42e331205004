use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, models::User, states::AppState, store::UserRepo};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    pub sub: String, // Subject (user ID)
    pub exp: usize,
}

pub fn create_token(user_id: i64, secret: &str) -> Result<String, ApiError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| ApiError::InternalError("Failed to calculate expiration".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::InternalError(format!("Token creation failed: {}", e)))
}

/// Resolves a raw cookie value to a user id; any failure means anonymous.
pub fn decode_token(token: &str, secret: &str) -> Option<i64> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .and_then(|data| data.claims.sub.parse().ok())
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .build()
}

/// Replaces whatever session the client held with one for `user_id`.
///
/// Clears first so a login can never inherit state from a previous user on
/// the same client.
pub fn establish(jar: CookieJar, user_id: i64, secret: &str) -> Result<CookieJar, ApiError> {
    let jar = clear(jar);
    let token = create_token(user_id, secret)?;
    Ok(jar.add(session_cookie(token)))
}

/// Drops the session cookie. Calling this with no session is a no-op.
pub fn clear(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

/// The request's resolved user; `None` is an anonymous caller.
///
/// Resolution happens once, before the handler body runs. A missing,
/// invalid or expired token, or a token whose user row is gone, degrades
/// to anonymous rather than erroring.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Self(None));
        };
        let Some(user_id) = decode_token(cookie.value(), &state.session_secret) else {
            return Ok(Self(None));
        };

        // A stale reference is anonymous; a store failure is still an error.
        let user = UserRepo::find_by_id(&state.pool, user_id).await?;
        Ok(Self(user))
    }
}

/// Login gate: handlers that take this only ever see authenticated callers.
/// Anonymous requests are redirected to the login form.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        user.map(Self).ok_or(ApiError::Unauthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn token_round_trip() {
        let token = create_token(17, SECRET).unwrap();
        assert_eq!(decode_token(&token, SECRET), Some(17));
    }

    #[test]
    fn tampered_token_is_anonymous() {
        let mut token = create_token(17, SECRET).unwrap();
        token.push('x');
        assert_eq!(decode_token(&token, SECRET), None);
        assert_eq!(decode_token("not-a-token", SECRET), None);
    }

    #[test]
    fn wrong_secret_is_anonymous() {
        let token = create_token(17, SECRET).unwrap();
        assert_eq!(decode_token(&token, "other-secret"), None);
    }

    #[test]
    fn establish_replaces_and_clear_removes() {
        let jar = CookieJar::new();

        let jar = establish(jar, 1, SECRET).unwrap();
        let first = jar.get(SESSION_COOKIE).unwrap().value().to_string();
        assert_eq!(decode_token(&first, SECRET), Some(1));

        // Logging in as someone else replaces the old reference outright.
        let jar = establish(jar, 2, SECRET).unwrap();
        let second = jar.get(SESSION_COOKIE).unwrap().value().to_string();
        assert_eq!(decode_token(&second, SECRET), Some(2));

        let jar = clear(jar);
        assert!(jar.get(SESSION_COOKIE).is_none());
    }
}
