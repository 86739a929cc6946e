use crate::services::console_service::Action;
use crate::state::AppState;
use crate::views::{ConsolePage, render_results};
use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use promotion_shared::FormState;
use tracing::{error, info};

pub async fn get_console(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, console) = state.sessions.open(jar).await;
    let console = console.snapshot().await;
    match ConsolePage::from_console(&console) {
        Ok(page) => (jar, page).into_response(),
        Err(e) => {
            error!("Failed to render console page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render console").into_response()
        }
    }
}

/// Results fragment only, for partial refreshes.
pub async fn get_results(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (jar, console) = state.sessions.open(jar).await;
    let console = console.snapshot().await;
    match render_results(console.results()) {
        Ok(html) => (jar, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render results table: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render results").into_response()
        }
    }
}

/// One button press: the action runs against the fields posted with it.
pub async fn run_action(
    Path(action): Path<Action>,
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<FormState>,
) -> (CookieJar, Redirect) {
    let (jar, console) = state.sessions.open(jar).await;
    let completion = console.run(action, form).await;
    info!(%action, ?completion, "console action finished");
    (jar, Redirect::to("/"))
}
