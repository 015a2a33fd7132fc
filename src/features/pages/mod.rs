pub mod model;

use crate::domain::{validate_title, Page};
use crate::error::WikiError;
use crate::render;
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};
use model::SaveForm;

pub fn pages_router() -> Router<AppState> {
    Router::new()
        .route("/view/{title}", get(view_handler))
        .route("/edit/{title}", get(edit_handler))
        .route("/save/{title}", post(save_handler))
        .route("/top/", get(top_handler))
        .route("/top", get(|| async { found("/top/") }))
        .route("/", get(|| async { found("/top/") }))
}

/// The `{title}` path segment, already checked by [`validate_title`].
///
/// Rejection is a plain 404 so a bad title never reaches a handler or the store.
pub struct ValidTitle(pub String);

impl<S> FromRequestParts<S> for ValidTitle
where
    S: Send + Sync,
{
    type Rejection = WikiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(title) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| WikiError::InvalidTitle(e.body_text()))?;

        if !validate_title(&title) {
            return Err(WikiError::InvalidTitle(title));
        }

        Ok(ValidTitle(title))
    }
}

async fn view_handler(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Result<Response, WikiError> {
    match state.store.load_page(&title).await? {
        // nothing to show yet, send the user to the editor instead
        None => Ok(found(&format!("/edit/{}", title))),
        Some(page) => {
            let html = state.templates.render_page(render::VIEW, &page)?;
            Ok(Html(html).into_response())
        }
    }
}

async fn edit_handler(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Result<Html<String>, WikiError> {
    let page = state
        .store
        .load_page(&title)
        .await?
        .unwrap_or_else(|| Page::blank(&title));

    let html = state.templates.render_page(render::EDIT, &page)?;
    Ok(Html(html))
}

async fn save_handler(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
    Form(form): Form<SaveForm>,
) -> Result<Response, WikiError> {
    let page = Page::new(&title, form.body);
    state.store.save_page(&page).await?;

    tracing::info!(%title, bytes = page.body.len(), "Saved page");
    Ok(found(&format!("/view/{}", title)))
}

async fn top_handler(State(state): State<AppState>) -> Result<Html<String>, WikiError> {
    let titles = state.store.list_titles().await?;

    tracing::debug!(count = titles.len(), "Listing pages");
    let html = state.templates.render_titles(render::TOP, &titles)?;
    Ok(Html(html))
}

// 302 Found, the status browsers follow with a GET
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
