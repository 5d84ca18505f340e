//! Rendering
//!
//! Projects the player list onto a [`RenderTarget`]. Targets decide the
//! concrete output (HTML for the web console, a table for the CLI); the
//! projection and ordering rules live here.

pub mod html;

use serde::Serialize;

use crate::types::{Player, PlayerId};

/// Placeholder shown when there is nothing to list
pub const EMPTY_PLACEHOLDER: &str = "No players found.";

/// Text shown for an absent optional field
const MISSING: &str = "none";

/// Surface the renderer writes to
pub trait RenderTarget: Send {
    /// Replace everything with a single placeholder message
    fn show_placeholder(&mut self, message: &str);

    /// Remove all cards
    fn clear(&mut self);

    /// Append one card after the existing ones
    fn append_card(&mut self, card: &PlayerCard);
}

/// Control on a card that removes its player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAffordance {
    pub player_id: PlayerId,
}

/// Display projection of one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerCard {
    pub image_url: String,
    pub name: String,
    pub breed: String,
    pub status: String,
    pub team_id: String,
    pub cohort_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub delete: DeleteAffordance,
}

impl From<&Player> for PlayerCard {
    fn from(player: &Player) -> Self {
        Self {
            image_url: player.image_url.clone(),
            name: player.name.clone(),
            breed: player.breed.clone(),
            status: player.status.clone(),
            team_id: or_missing(player.team_id.map(|v| v.to_string())),
            cohort_id: or_missing(player.cohort_id.map(|v| v.to_string())),
            created_at: or_missing(player.created_at.clone()),
            updated_at: or_missing(player.updated_at.clone()),
            delete: DeleteAffordance {
                player_id: player.id.clone(),
            },
        }
    }
}

fn or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING.to_string())
}

/// Render every player in order, or the placeholder when there are none
pub fn render_all(players: &[Player], target: &mut dyn RenderTarget) {
    if players.is_empty() {
        target.show_placeholder(EMPTY_PLACEHOLDER);
        return;
    }

    target.clear();
    for player in players {
        target.append_card(&PlayerCard::from(player));
    }
}

/// Render exactly one player
pub fn render_single(player: &Player, target: &mut dyn RenderTarget) {
    target.clear();
    target.append_card(&PlayerCard::from(player));
}
