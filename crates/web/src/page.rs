//! Page shell around the players container

use askama::Template;

use roster_common::render::html::{new_player_form, HtmlContainer};
use roster_common::PlayerForm;

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    notice: Option<&'a str>,
    form: String,
    players: &'a str,
}

/// Full HTML document: optional notice, the form, and the container
pub fn render_page(
    form: &PlayerForm,
    container: &HtmlContainer,
    notice: Option<&str>,
) -> askama::Result<String> {
    PageTemplate {
        notice,
        form: new_player_form(form)?,
        players: container.markup(),
    }
    .render()
}
