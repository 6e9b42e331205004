use axum::{
    Form, Json,
    extract::{Path, State},
    response::{Html, Redirect},
};
use tracing::info;

use crate::{
    dto::PostForm,
    errors::ApiError,
    models::{Post, PostWithAuthor, User},
    session::AuthUser,
    states::AppState,
    store::PostRepo,
};

/// GET /
/// Open to anonymous and authenticated callers alike.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<PostWithAuthor>>, ApiError> {
    Ok(Json(PostRepo::list(&state.pool).await?))
}

/// GET /{id}
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Post>, ApiError> {
    let post = PostRepo::get(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(post))
}

/// GET /create
pub async fn create_form(_user: AuthUser) -> Html<&'static str> {
    Html(POST_FORM)
}

/// POST /create
/// Body: title=...&body=...
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Form(payload): Form<PostForm>,
) -> Result<Redirect, ApiError> {
    payload.validated()?;

    let id = PostRepo::create(&state.pool, user.id, &payload.title, &payload.body).await?;

    info!("Post {} created by user {}", id, user.id);

    Ok(Redirect::to("/"))
}

/// GET /{id}/update
pub async fn update_form(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Html<&'static str>, ApiError> {
    load_owned(&state, &user, id).await?;

    Ok(Html(POST_FORM))
}

/// POST /{id}/update
/// Body: title=...&body=...
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Form(payload): Form<PostForm>,
) -> Result<Redirect, ApiError> {
    load_owned(&state, &user, id).await?;
    payload.validated()?;

    if !PostRepo::update(&state.pool, id, &payload.title, &payload.body).await? {
        return Err(ApiError::NotFound);
    }

    info!("Post {} updated by user {}", id, user.id);

    Ok(Redirect::to("/"))
}

/// POST /{id}/delete
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    load_owned(&state, &user, id).await?;

    if !PostRepo::delete(&state.pool, id).await? {
        return Err(ApiError::NotFound);
    }

    info!("Post {} deleted by user {}", id, user.id);

    Ok(Redirect::to("/"))
}

/// Fetches a post and runs the owner check shared by the update form,
/// update and delete. A missing post is `NotFound` before ownership is
/// even considered.
async fn load_owned(state: &AppState, user: &User, id: i64) -> Result<Post, ApiError> {
    let post = PostRepo::get(&state.pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    if post.author_id != user.id {
        return Err(ApiError::Forbidden);
    }

    Ok(post)
}

const POST_FORM: &str = r#"<!doctype html>
<title>Post</title>
<form method="post">
  <label>Title <input name="title" required></label>
  <label>Body <textarea name="body"></textarea></label>
  <input type="submit" value="Save">
</form>"#;
