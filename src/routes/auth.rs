use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use bcrypt::{DEFAULT_COST, hash, verify};
use tracing::info;

use crate::{
    dto::{LoginRequest, RegisterRequest},
    errors::ApiError,
    session,
    states::AppState,
    store::UserRepo,
};

/// GET /register
pub async fn register_form() -> Html<&'static str> {
    Html(REGISTER_FORM)
}

/// POST /register
/// Body: username=...&password=...
pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterRequest>,
) -> Result<Redirect, ApiError> {
    payload.validated()?;

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| ApiError::InternalError(format!("Password hashing failed: {}", e)))?;

    UserRepo::create(&state.pool, &payload.username, &password_hash).await?;

    info!("New user registered: {}", payload.username);

    // No auto-login; the new user signs in explicitly.
    Ok(Redirect::to("/login"))
}

/// GET /login
pub async fn login_form() -> Html<&'static str> {
    Html(LOGIN_FORM)
}

/// POST /login
/// Body: username=...&password=...
///
/// The error text tells unknown usernames apart from wrong passwords,
/// matching the upstream user-facing messages.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<LoginRequest>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let user = UserRepo::find_by_username(&state.pool, &payload.username)
        .await?
        .ok_or_else(|| ApiError::Validation("Incorrect username.".into()))?;

    // Verify password
    let valid = verify(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::InternalError(format!("Password verification failed: {}", e)))?;

    if !valid {
        return Err(ApiError::Validation("Incorrect password.".into()));
    }

    let jar = session::establish(jar, user.id, &state.session_secret)?;

    info!("User logged in: {}", user.username);

    Ok((jar, Redirect::to("/")))
}

/// GET /logout
///
/// Idempotent; logging out without a session is a no-op.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (session::clear(jar), Redirect::to("/"))
}

const REGISTER_FORM: &str = r#"<!doctype html>
<title>Register</title>
<form method="post" action="/register">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <input type="submit" value="Register">
</form>"#;

const LOGIN_FORM: &str = r#"<!doctype html>
<title>Log In</title>
<form method="post" action="/login">
  <label>Username <input name="username" required></label>
  <label>Password <input name="password" type="password" required></label>
  <input type="submit" value="Log In">
</form>"#;
