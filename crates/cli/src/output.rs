//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use roster_common::{PlayerCard, RenderTarget};

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Render target that collects cards for terminal output
#[derive(Debug, Default)]
pub struct CardList {
    placeholder: Option<String>,
    cards: Vec<PlayerCard>,
}

impl CardList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[PlayerCard] {
        &self.cards
    }

    /// Format the collected cards
    pub fn render(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.cards).unwrap_or_default()
            }
            _ if self.cards.is_empty() => self.placeholder.clone().unwrap_or_default(),
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic);

                table.set_header(headers());
                for card in &self.cards {
                    table.add_row(row(card));
                }

                table.to_string()
            }
            OutputFormat::Plain => self
                .cards
                .iter()
                .map(|card| {
                    headers()
                        .iter()
                        .zip(row(card))
                        .map(|(header, value)| format!("{}: {}", header, value))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
                .collect::<Vec<_>>()
                .join("\n---\n"),
        }
    }

    pub fn print(&self, format: OutputFormat) {
        println!("{}", self.render(format));
    }
}

impl RenderTarget for CardList {
    fn show_placeholder(&mut self, message: &str) {
        self.cards.clear();
        self.placeholder = Some(message.to_string());
    }

    fn clear(&mut self) {
        self.cards.clear();
        self.placeholder = None;
    }

    fn append_card(&mut self, card: &PlayerCard) {
        self.cards.push(card.clone());
    }
}

fn headers() -> Vec<&'static str> {
    vec!["ID", "Name", "Breed", "Status", "Team ID", "Cohort ID", "Image", "Created At", "Updated At"]
}

fn row(card: &PlayerCard) -> Vec<String> {
    vec![
        card.delete.player_id.to_string(),
        card.name.clone(),
        card.breed.clone(),
        card.status.clone(),
        card.team_id.clone(),
        card.cohort_id.clone(),
        card.image_url.chars().take(40).collect::<String>(),
        card.created_at.clone(),
        card.updated_at.clone(),
    ]
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_common::{render_all, Player};

    fn players() -> Vec<Player> {
        serde_json::from_value(serde_json::json!([
            { "id": 1, "name": "Fido", "breed": "Lab", "teamId": 2 },
            { "id": 2, "name": "Rex", "breed": "Pug" }
        ]))
        .unwrap()
    }

    #[test]
    fn test_placeholder_for_empty_list() {
        let mut list = CardList::new();
        render_all(&[], &mut list);
        assert_eq!(list.render(OutputFormat::Table), "No players found.");
        assert_eq!(list.render(OutputFormat::Plain), "No players found.");
        assert_eq!(list.render(OutputFormat::Json), "[]");
    }

    #[test]
    fn test_table_lists_every_player() {
        let mut list = CardList::new();
        render_all(&players(), &mut list);
        assert_eq!(list.cards().len(), 2);

        let table = list.render(OutputFormat::Table);
        assert!(table.contains("Fido"));
        assert!(table.contains("Pug"));
        assert!(table.find("Fido").unwrap() < table.find("Rex").unwrap());
    }

    #[test]
    fn test_plain_and_json() {
        let mut list = CardList::new();
        render_all(&players(), &mut list);

        let plain = list.render(OutputFormat::Plain);
        assert!(plain.contains("Name: Fido"));
        assert!(plain.contains("Team ID: 2"));
        assert!(plain.contains("Team ID: none"));
        assert_eq!(plain.matches("---").count(), 1);

        let json: serde_json::Value =
            serde_json::from_str(&list.render(OutputFormat::Json)).unwrap();
        assert_eq!(json[1]["name"], "Rex");
        assert_eq!(json[0]["delete"]["playerId"], 1);
    }
}
