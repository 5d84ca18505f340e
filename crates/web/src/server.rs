//! Web server implementation
//!
//! Every page is rendered on the server. The new-player form posts to
//! `/players` and each card's delete button posts to `/players/:id/delete`;
//! both answer with the re-rendered page, so a mutation costs exactly one
//! follow-up fetch.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use roster_common::render::html::HtmlContainer;
use roster_common::{PlayerForm, PlayerId, Refresh, RosterApp, WorkflowError};

use crate::page::render_page;

/// Web server state
#[derive(Clone)]
pub struct WebServer {
    state: Arc<WebServerState>,
}

struct WebServerState {
    app: RosterApp,
}

impl WebServer {
    /// Create a new web server around an application context
    pub fn new(app: RosterApp) -> Self {
        Self {
            state: Arc::new(WebServerState { app }),
        }
    }

    /// Initial fetch so the first page load has data even if the API is
    /// slow to answer later. A failure is logged and the server still starts.
    pub async fn bootstrap(&self) {
        let mut scratch = HtmlContainer::new();
        match self.state.app.refresh(&mut scratch).await {
            Ok(Refresh::Rendered { count }) => info!("Loaded {} players", count),
            Ok(Refresh::Stale) => {}
            Err(e) => warn!("Starting without players: {}", e),
        }
    }

    /// Create router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/players", post(create_player_handler))
            .route("/players/:id", get(show_player_handler))
            .route("/players/:id/delete", post(delete_player_handler))
            .route("/health", get(health_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the web server
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("Roster console starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "roster-web",
        "version": roster_common::VERSION
    }))
}

async fn index_handler(State(state): State<Arc<WebServerState>>) -> Response {
    let mut container = HtmlContainer::new();
    let result = state.app.refresh(&mut container).await.map(|_| ());
    respond(&state.app, PlayerForm::default(), container, result)
}

async fn create_player_handler(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<PlayerForm>,
) -> Response {
    let mut container = HtmlContainer::new();
    let submission = state.app.submit_form(&form, &mut container).await;
    let form = if submission.reset {
        PlayerForm::default()
    } else {
        form
    };
    respond(&state.app, form, container, submission.outcome.map(|_| ()))
}

async fn delete_player_handler(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> Response {
    let mut container = HtmlContainer::new();
    let result = state
        .app
        .remove_player(&PlayerId::from(id), &mut container)
        .await;
    respond(&state.app, PlayerForm::default(), container, result)
}

async fn show_player_handler(
    State(state): State<Arc<WebServerState>>,
    Path(id): Path<String>,
) -> Response {
    let mut container = HtmlContainer::new();
    let result = state
        .app
        .show_player(&PlayerId::from(id), &mut container)
        .await
        .map(|_| ());
    respond(&state.app, PlayerForm::default(), container, result)
}

/// Build the page for a finished workflow
///
/// When the workflow rendered nothing (it failed, or its fetch was
/// overtaken) the container shows the committed players instead.
fn respond(
    app: &RosterApp,
    form: PlayerForm,
    mut container: HtmlContainer,
    result: Result<(), WorkflowError>,
) -> Response {
    if container.markup().is_empty() {
        app.render_current(&mut container);
    }

    let (status, notice) = match result {
        Ok(()) => (StatusCode::OK, None),
        Err(e) => (StatusCode::BAD_GATEWAY, Some(e.to_string())),
    };

    match render_page(&form, &container, notice.as_deref()) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Template render error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.").into_response()
        }
    }
}
