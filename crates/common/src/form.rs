//! New-player form handling
//!
//! Turns the raw text of the six form inputs into a [`PlayerDraft`]. Integer
//! fields follow JavaScript `parseInt` rules, so `" 7kg"` is 7 and `"abc"` is
//! no value at all.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::PlayerDraft;

/// Raw values of the new-player form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerForm {
    pub name: String,

    #[serde(rename = "imageUrl")]
    pub image_url: String,

    pub breed: String,

    pub status: String,

    #[serde(rename = "teamID")]
    pub team_id: String,

    #[serde(rename = "cohortID")]
    pub cohort_id: String,
}

impl PlayerForm {
    /// Build the draft this form describes. Never fails: unparseable
    /// integers become `None`.
    pub fn to_draft(&self) -> PlayerDraft {
        PlayerDraft {
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            breed: self.breed.clone(),
            status: self.status.clone(),
            team_id: parse_int(&self.team_id),
            cohort_id: parse_int(&self.cohort_id),
            created_at: None,
            updated_at: None,
        }
    }
}

/// JavaScript `parseInt(text)` without a radix
///
/// Leading whitespace and an optional sign are skipped, a `0x` prefix
/// switches to hexadecimal, and the longest run of digits is taken. `None`
/// where JavaScript would produce `NaN` or where the value overflows `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
    let mut rest = text.trim_start();
    let negative = match rest.as_bytes().first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = if rest.len() >= 2 && (rest.starts_with("0x") || rest.starts_with("0X")) {
        rest = &rest[2..];
        16
    } else {
        10
    };

    let end = rest
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&rest[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Whether the form is cleared after a submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResetPolicy {
    /// Clear the inputs whatever the outcome
    #[default]
    Always,
    /// Keep the inputs when the add failed so the user can retry
    OnSuccess,
}

impl ResetPolicy {
    pub fn should_reset(self, succeeded: bool) -> bool {
        match self {
            ResetPolicy::Always => true,
            ResetPolicy::OnSuccess => succeeded,
        }
    }
}

impl FromStr for ResetPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(ResetPolicy::Always),
            "on-success" | "on_success" => Ok(ResetPolicy::OnSuccess),
            other => Err(Error::InvalidConfig(format!(
                "unknown reset policy '{}' (expected always or on-success)",
                other
            ))),
        }
    }
}

impl fmt::Display for ResetPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetPolicy::Always => f.write_str("always"),
            ResetPolicy::OnSuccess => f.write_str("on-success"),
        }
    }
}
