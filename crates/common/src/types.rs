//! Core types for Roster
//!
//! Mirrors the JSON shapes exchanged with the players API. The hosted API
//! answers with `teamId`/`cohortId` while clients post `teamID`/`cohortID`,
//! so decoding accepts both spellings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque player identifier assigned by the remote API
///
/// The API hands out numbers, but delete controls and URL paths carry the id
/// as text, so both forms decode into the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for PlayerId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for PlayerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => PlayerId::from(n),
            RawId::Text(s) => PlayerId(s),
        })
    }
}

// ============================================================================
// Player
// ============================================================================

/// A player as reported by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,

    /// Empty when the API reports no name, so one bad record cannot fail
    /// the whole listing
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub image_url: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub breed: String,

    /// Server-side enumeration (e.g. `field`, `bench`); not validated here
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,

    #[serde(default, rename = "teamID", alias = "teamId")]
    pub team_id: Option<i64>,

    #[serde(default, rename = "cohortID", alias = "cohortId")]
    pub cohort_id: Option<i64>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A player that has not been created yet
///
/// `team_id`/`cohort_id` are `None` when the form text did not parse as an
/// integer; they go over the wire as JSON `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDraft {
    pub name: String,

    pub image_url: String,

    pub breed: String,

    pub status: String,

    #[serde(rename = "teamID")]
    pub team_id: Option<i64>,

    #[serde(rename = "cohortID")]
    pub cohort_id: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PlayerDraft {
    /// Stamp both timestamps with the same instant
    pub fn stamp(&mut self, now: &str) {
        self.created_at = Some(now.to_string());
        self.updated_at = Some(now.to_string());
    }
}

// ============================================================================
// Response envelopes
// ============================================================================

/// `GET /players` body: `{ "data": { "players": [...] } }`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayersEnvelope {
    pub data: PlayersData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayersData {
    pub players: Vec<Player>,
}

/// `GET /players/{id}` body: `{ "data": { "player": {...} } }`
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEnvelope {
    pub data: PlayerData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerData {
    pub player: Player,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
