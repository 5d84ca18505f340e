//! Roster application context
//!
//! Owns the API client and the player state, and runs the fetch/render and
//! mutate-then-refresh workflows against an injected [`RenderTarget`].
//! Workflows never panic or propagate raw errors: every failure is logged at
//! the boundary and handed back as a [`WorkflowError`] naming the stage that
//! failed.

use std::fmt;
use thiserror::Error;
use tracing::{error, info};

use crate::client::RosterClient;
use crate::error::Error;
use crate::form::{PlayerForm, ResetPolicy};
use crate::render::{render_all, render_single, RenderTarget};
use crate::state::{AppState, Commit};
use crate::types::{Player, PlayerDraft, PlayerId};

/// Step of a workflow that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Create,
    Remove,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Fetch => f.write_str("fetching players"),
            Stage::Create => f.write_str("adding player"),
            Stage::Remove => f.write_str("removing player"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct WorkflowError {
    pub stage: Stage,
    pub source: Error,
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;

/// Result of a successful refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// State was replaced and rendered
    Rendered { count: usize },
    /// A newer fetch was issued meanwhile; nothing was committed or rendered
    Stale,
}

/// Outcome of a form submission plus whether the inputs should be cleared
#[derive(Debug)]
pub struct FormSubmission {
    /// The created player, when the API echoed one back
    pub outcome: WorkflowResult<Option<Player>>,
    pub reset: bool,
}

/// Application context
pub struct RosterApp {
    client: RosterClient,
    state: AppState,
    reset_policy: ResetPolicy,
}

impl RosterApp {
    pub fn new(client: RosterClient, reset_policy: ResetPolicy) -> Self {
        Self {
            client,
            state: AppState::new(),
            reset_policy,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Fetch all players, commit them if still current, and render
    pub async fn refresh(&self, target: &mut dyn RenderTarget) -> WorkflowResult<Refresh> {
        let ticket = self.state.begin_fetch();
        let players = self
            .client
            .fetch_all()
            .await
            .map_err(|e| fail(Stage::Fetch, e))?;

        match self.state.commit(ticket, players) {
            Commit::Applied => {
                let count = self.state.with_players(|players| {
                    render_all(players, target);
                    players.len()
                });
                Ok(Refresh::Rendered { count })
            }
            Commit::Stale { .. } => Ok(Refresh::Stale),
        }
    }

    /// Render the committed players without fetching
    pub fn render_current(&self, target: &mut dyn RenderTarget) {
        self.state.with_players(|players| render_all(players, target));
    }

    /// Create a player, then refresh once
    ///
    /// Any successful create is followed by the refresh, whether or not the
    /// response echoed the player. If the create fails nothing is re-fetched
    /// and the state is untouched.
    pub async fn add_player(
        &self,
        draft: PlayerDraft,
        target: &mut dyn RenderTarget,
    ) -> WorkflowResult<Option<Player>> {
        let name = draft.name.clone();
        let created = self
            .client
            .create(draft)
            .await
            .map_err(|e| fail(Stage::Create, e))?;
        match &created {
            Some(player) => info!("Added player '{}' ({})", name, player.id),
            None => info!("Added player '{}'", name),
        }

        self.refresh(target).await?;
        Ok(created)
    }

    /// Delete a player, then refresh once
    pub async fn remove_player(
        &self,
        id: &PlayerId,
        target: &mut dyn RenderTarget,
    ) -> WorkflowResult<()> {
        self.client
            .remove(id)
            .await
            .map_err(|e| fail(Stage::Remove, e))?;
        info!("Removed player #{}", id);

        self.refresh(target).await?;
        Ok(())
    }

    /// Fetch one player and render it alone
    pub async fn show_player(
        &self,
        id: &PlayerId,
        target: &mut dyn RenderTarget,
    ) -> WorkflowResult<Player> {
        let player = self
            .client
            .fetch_one(id)
            .await
            .map_err(|e| fail(Stage::Fetch, e))?;
        render_single(&player, target);
        Ok(player)
    }

    /// Submit the new-player form
    pub async fn submit_form(
        &self,
        form: &PlayerForm,
        target: &mut dyn RenderTarget,
    ) -> FormSubmission {
        let outcome = self.add_player(form.to_draft(), target).await;
        let reset = self.reset_policy.should_reset(outcome.is_ok());
        FormSubmission { outcome, reset }
    }
}

fn fail(stage: Stage, source: Error) -> WorkflowError {
    error!("Trouble {}: {}", stage, source);
    WorkflowError { stage, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedTransport;
    use crate::client::{ApiEndpoint, HttpRequest, HttpResponse, Method, Transport};
    use crate::render::html::HtmlContainer;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Notify;

    fn app_with(transport: Arc<dyn Transport>, policy: ResetPolicy) -> RosterApp {
        let endpoint = ApiEndpoint::new("https://api.example.test/api", "c1").unwrap();
        RosterApp::new(RosterClient::new(transport, endpoint), policy)
    }

    fn scripted() -> (Arc<ScriptedTransport>, RosterApp) {
        let transport = Arc::new(ScriptedTransport::new());
        let app = app_with(transport.clone(), ResetPolicy::Always);
        (transport, app)
    }

    fn fido_form() -> PlayerForm {
        PlayerForm {
            name: "Fido".to_string(),
            image_url: "x.png".to_string(),
            breed: "Lab".to_string(),
            status: "field".to_string(),
            team_id: "7".to_string(),
            cohort_id: "9".to_string(),
        }
    }

    #[tokio::test]
    async fn test_refresh_empty_renders_placeholder() {
        let (transport, app) = scripted();
        transport.push_json(200, json!({ "data": { "players": [] } }));

        let mut container = HtmlContainer::new();
        let refreshed = app.refresh(&mut container).await.unwrap();
        assert_eq!(refreshed, Refresh::Rendered { count: 0 });
        assert_eq!(container.markup(), "<h3>No players found.</h3>");
    }

    #[tokio::test]
    async fn test_refresh_renders_every_player_in_order() {
        let (transport, app) = scripted();
        transport.push_players(json!([
            { "id": 3, "name": "Cleo" },
            { "id": 1, "name": "Ace" },
            { "id": 2, "name": "Bo" }
        ]));

        let mut container = HtmlContainer::new();
        app.refresh(&mut container).await.unwrap();

        assert_eq!(container.card_count(), 3);
        let html = container.markup();
        let cleo = html.find("Cleo").unwrap();
        let ace = html.find("Ace").unwrap();
        let bo = html.find("Bo").unwrap();
        assert!(cleo < ace && ace < bo);
        assert_eq!(app.state().players().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_refresh_leaves_state_and_display() {
        let (transport, app) = scripted();
        transport.push_players(json!([{ "id": 1, "name": "Fido" }]));
        transport.push_raw(200, "not json");

        let mut container = HtmlContainer::new();
        app.refresh(&mut container).await.unwrap();
        let before = container.clone();

        let err = app.refresh(&mut container).await.unwrap_err();
        assert_eq!(err.stage, Stage::Fetch);
        assert!(matches!(err.source, Error::Decode(_)));
        assert_eq!(container, before);
        assert_eq!(app.state().players()[0].name, "Fido");
    }

    #[tokio::test]
    async fn test_add_refreshes_exactly_once() {
        let (transport, app) = scripted();
        transport.push_json(200, json!({ "data": { "newPlayer": { "id": 5, "name": "Fido" } } }));
        transport.push_players(json!([{ "id": 5, "name": "Fido" }]));

        let mut container = HtmlContainer::new();
        let created = app
            .add_player(fido_form().to_draft(), &mut container)
            .await
            .unwrap();

        assert_eq!(created.unwrap().id, PlayerId::from(5));
        assert_eq!(transport.count(Method::Post), 1);
        assert_eq!(transport.count(Method::Get), 1);
        assert_eq!(container.card_count(), 1);
        assert_eq!(transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_add_refreshes_when_create_echoes_no_player() {
        let (transport, app) = scripted();
        transport.push_json(201, json!({ "success": true, "data": { "newPlayer": { "id": 5 } } }));
        transport.push_players(json!([{ "id": 5, "name": "Fido" }]));

        let mut container = HtmlContainer::new();
        let created = app
            .add_player(fido_form().to_draft(), &mut container)
            .await
            .unwrap();

        assert!(created.is_some());
        assert_eq!(transport.count(Method::Get), 1);
        assert_eq!(container.card_count(), 1);
        assert_eq!(app.state().players()[0].name, "Fido");
    }

    #[tokio::test]
    async fn test_add_refreshes_after_bare_success_body() {
        let (transport, app) = scripted();
        transport.push_json(200, json!({ "success": true }));
        transport.push_players(json!([{ "id": 6, "name": "Rex" }]));

        let mut container = HtmlContainer::new();
        let created = app
            .add_player(fido_form().to_draft(), &mut container)
            .await
            .unwrap();

        assert_eq!(created, None);
        assert_eq!(transport.count(Method::Get), 1);
        assert_eq!(container.card_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_create_skips_refresh() {
        let (transport, app) = scripted();
        transport.push_players(json!([{ "id": 1, "name": "Fido" }]));
        transport.push_json(500, json!({ "error": "boom" }));

        let mut container = HtmlContainer::new();
        app.refresh(&mut container).await.unwrap();
        let generation = app.state().committed_generation();

        let err = app
            .add_player(fido_form().to_draft(), &mut container)
            .await
            .unwrap_err();

        assert_eq!(err.stage, Stage::Create);
        assert_eq!(err.source.status(), Some(500));
        assert_eq!(transport.count(Method::Get), 1);
        assert_eq!(app.state().committed_generation(), generation);
        assert_eq!(app.state().players().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_issues_delete_then_one_fetch() {
        let (transport, app) = scripted();
        transport.push_json(200, json!({ "success": true }));
        transport.push_players(json!([]));

        let mut container = HtmlContainer::new();
        app.remove_player(&PlayerId::from("42"), &mut container)
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Delete);
        assert!(requests[0].url.ends_with("/players/42"));
        assert_eq!(requests[1].method, Method::Get);
        assert_eq!(container.markup(), "<h3>No players found.</h3>");
    }

    #[tokio::test]
    async fn test_remove_network_failure_skips_refresh() {
        let (transport, app) = scripted();
        transport.push_failure("connection reset");

        let mut container = HtmlContainer::new();
        let err = app
            .remove_player(&PlayerId::from(42), &mut container)
            .await
            .unwrap_err();
        assert_eq!(err.stage, Stage::Remove);
        assert_eq!(transport.count(Method::Get), 0);
    }

    #[tokio::test]
    async fn test_show_player_renders_single_card() {
        let (transport, app) = scripted();
        transport.push_json(200, json!({ "data": { "player": { "id": 8, "name": "Hex" } } }));

        let mut container = HtmlContainer::new();
        let player = app.show_player(&PlayerId::from(8), &mut container).await.unwrap();
        assert_eq!(player.name, "Hex");
        assert_eq!(container.card_count(), 1);
        assert!(app.state().players().is_empty());
    }

    #[tokio::test]
    async fn test_submit_form_sends_integer_ids() {
        let (transport, app) = scripted();
        transport.push_json(200, json!({ "data": { "newPlayer": { "id": 5, "name": "Fido" } } }));
        transport.push_players(json!([{ "id": 5, "name": "Fido" }]));

        let mut container = HtmlContainer::new();
        let submission = app.submit_form(&fido_form(), &mut container).await;
        assert!(submission.outcome.is_ok());
        assert!(submission.reset);

        let body = transport.requests()[0].body.clone().unwrap();
        assert_eq!(body["teamID"], json!(7));
        assert_eq!(body["cohortID"], json!(9));
    }

    #[tokio::test]
    async fn test_submit_form_reset_policy_on_failure() {
        let always = Arc::new(ScriptedTransport::new());
        always.push_json(500, json!({}));
        let app = app_with(always.clone(), ResetPolicy::Always);
        let submission = app.submit_form(&fido_form(), &mut HtmlContainer::new()).await;
        assert!(submission.outcome.is_err());
        assert!(submission.reset);

        let keep = Arc::new(ScriptedTransport::new());
        keep.push_json(500, json!({}));
        let app = app_with(keep.clone(), ResetPolicy::OnSuccess);
        let submission = app.submit_form(&fido_form(), &mut HtmlContainer::new()).await;
        assert!(submission.outcome.is_err());
        assert!(!submission.reset);
    }

    /// Holds the first request until released; later requests answer at once
    struct GatedTransport {
        gate: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, _request: HttpRequest) -> crate::Result<HttpResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            let name = if call == 0 {
                self.gate.notified().await;
                "old"
            } else {
                "new"
            };
            let body = json!({ "data": { "players": [{ "id": call, "name": name }] } });
            Ok(HttpResponse {
                status: 200,
                body: body.to_string().into_bytes(),
            })
        }
    }

    #[tokio::test]
    async fn test_overlapping_refresh_discards_stale_response() {
        let transport = Arc::new(GatedTransport {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let app = app_with(transport.clone(), ResetPolicy::Always);

        let mut slow_target = HtmlContainer::new();
        let mut fast_target = HtmlContainer::new();

        let (slow, fast) = tokio::join!(app.refresh(&mut slow_target), async {
            let result = app.refresh(&mut fast_target).await;
            transport.gate.notify_one();
            result
        });

        assert_eq!(slow.unwrap(), Refresh::Stale);
        assert_eq!(fast.unwrap(), Refresh::Rendered { count: 1 });
        assert_eq!(slow_target.markup(), "");
        assert!(fast_target.markup().contains("new"));
        assert_eq!(app.state().players()[0].name, "new");
    }
}
