//! Config Command

use anyhow::Result;
use clap::Args;
use std::path::Path;

use roster_common::RosterConfig;

use crate::output::print_success;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective configuration back to the config file
    #[arg(long)]
    pub save: bool,
}

pub fn execute(args: ConfigArgs, config: &RosterConfig, path: &Path) -> Result<()> {
    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(config)?);

    if args.save {
        config.save(path)?;
        print_success(&format!("Configuration saved to {}", path.display()));
    }
    Ok(())
}
