//! HTML render target
//!
//! Produces the markup of the players container: one `player-card` div per
//! player, each with a `delete-button` that carries the player id in
//! `data-id` and posts to `/players/{id}/delete`.

use askama::Template;
use tracing::error;

use super::{PlayerCard, RenderTarget};
use crate::form::PlayerForm;

#[derive(Template)]
#[template(source = "<h3>{{ message }}</h3>", ext = "html")]
struct PlaceholderTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "player_card.html")]
struct PlayerCardTemplate<'a> {
    card: &'a PlayerCard,
    path_id: String,
}

/// The new-player form
#[derive(Template)]
#[template(path = "player_form.html")]
struct PlayerFormTemplate<'a> {
    form: &'a PlayerForm,
}

/// In-memory players container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlContainer {
    markup: String,
    cards: usize,
}

impl HtmlContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn card_count(&self) -> usize {
        self.cards
    }
}

impl RenderTarget for HtmlContainer {
    fn show_placeholder(&mut self, message: &str) {
        self.clear();
        let template = PlaceholderTemplate { message };
        if let Err(e) = template.render_into(&mut self.markup) {
            error!("Placeholder render error: {}", e);
        }
    }

    fn clear(&mut self) {
        self.markup.clear();
        self.cards = 0;
    }

    fn append_card(&mut self, card: &PlayerCard) {
        let template = PlayerCardTemplate {
            card,
            path_id: urlencoding::encode(card.delete.player_id.as_str()).into_owned(),
        };
        match template.render_into(&mut self.markup) {
            Ok(()) => self.cards += 1,
            Err(e) => error!("Card render error for player {}: {}", card.delete.player_id, e),
        }
    }
}

/// The new-player form, pre-filled with `values`
pub fn new_player_form(values: &PlayerForm) -> askama::Result<String> {
    PlayerFormTemplate { form: values }.render()
}
