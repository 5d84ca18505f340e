//! Player Commands

use anyhow::Result;
use clap::Subcommand;

use tracing::debug;

use roster_common::{PlayerForm, PlayerId, RosterApp};

use crate::output::{print_success, CardList, OutputFormat};

#[derive(Subcommand)]
pub enum PlayerCommands {
    /// List all players
    List,

    /// Show one player
    Show {
        /// Player ID
        id: String,
    },

    /// Add a player
    Add {
        /// Player name
        #[arg(short, long)]
        name: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Breed
        #[arg(short, long, default_value = "")]
        breed: String,

        /// Status (e.g. bench, field)
        #[arg(short, long, default_value = "")]
        status: String,

        /// Team ID; parsed like a form field, so non-numbers are sent as null
        #[arg(long, default_value = "")]
        team_id: String,

        /// Cohort ID; parsed like a form field
        #[arg(long, default_value = "")]
        cohort_id: String,
    },

    /// Remove a player
    Remove {
        /// Player ID
        id: String,
    },
}

pub async fn execute(cmd: PlayerCommands, app: &RosterApp, format: OutputFormat) -> Result<()> {
    let mut list = CardList::new();

    match cmd {
        PlayerCommands::List => {
            app.refresh(&mut list).await?;
        }

        PlayerCommands::Show { id } => {
            app.show_player(&PlayerId::from(id), &mut list).await?;
        }

        PlayerCommands::Add {
            name,
            image_url,
            breed,
            status,
            team_id,
            cohort_id,
        } => {
            let form = PlayerForm {
                name,
                image_url,
                breed,
                status,
                team_id,
                cohort_id,
            };
            let name = form.name.clone();
            match app.submit_form(&form, &mut list).await.outcome? {
                Some(player) => {
                    print_success(&format!("Player '{}' added (#{})", player.name, player.id))
                }
                None => print_success(&format!("Player '{}' added", name)),
            }
        }

        PlayerCommands::Remove { id } => {
            let id = PlayerId::from(id);
            app.remove_player(&id, &mut list).await?;
            print_success(&format!("Player #{} removed", id));
        }
    }

    debug!("Printing {} player cards", list.cards().len());
    list.print(format);
    Ok(())
}
