//! Page and API handlers.

use super::error::ApiError;
use super::session::SessionId;
use super::state::AppState;
use crate::actions::{TodoAction, TodoCommand};
use crate::view::TodoView;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Serve the single page.
///
/// ```text
/// GET /
/// ```
#[allow(clippy::unused_async)]
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Current view of the caller's list.
///
/// ```text
/// GET /api/todos
/// X-Session-ID: <uuid>
/// ```
///
/// # Errors
///
/// - 400 without a valid session header
/// - 503 while the server is shutting down
pub async fn get_todos(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<TodoView>, ApiError> {
    let store = state.sessions.store_for(session).await?;
    Ok(Json(store.state(|todos| TodoView::from(todos)).await))
}

/// Apply one command to the caller's list and return the resulting view.
///
/// ```text
/// POST /api/commands
/// X-Session-ID: <uuid>
/// {"type": "toggle_completed", "id": "..."}
/// ```
///
/// # Errors
///
/// - 400 for a missing session header or a body that is not a valid command
/// - 404 when the command names a missing item
/// - 409 when a new item's id is already taken
/// - 422 for an unknown filter value
/// - 503 while the server is shutting down
pub async fn post_command(
    State(state): State<AppState>,
    session: SessionId,
    payload: Result<Json<TodoCommand>, JsonRejection>,
) -> Result<Json<TodoView>, ApiError> {
    let Json(command) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let action = TodoAction::from(command);
    let name = action.name();

    metrics::counter!("todo.commands.received", "action" => name).increment(1);

    let store = state.sessions.store_for(session).await?;
    let (view, rejected) = store
        .send_with(action, |todos| {
            (TodoView::from(todos), todos.last_error().cloned())
        })
        .await?;

    match rejected {
        Some(error) => Err(error.into()),
        None => {
            tracing::info!(%session, action = name, total = view.total, "Command applied");
            Ok(Json(view))
        },
    }
}
