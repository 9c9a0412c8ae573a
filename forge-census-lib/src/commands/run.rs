//! Command dispatch logic for census

use super::{HarvestArgs, InitArgs, init_config, process_harvest};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "census", bin_name = "census", version, author, long_about = None)]
#[command(about = "Harvest project facts and statistics from a GitLab instance")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CensusSubcommand,
}

#[derive(Subcommand, Debug)]
enum CensusSubcommand {
    /// List and enrich every visible project, then print the report
    Harvest(Box<HarvestArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        CensusSubcommand::Harvest(harvest_args) => process_harvest(host, harvest_args).await,
        CensusSubcommand::Init(init_args) => init_config(host, init_args),
    }
}
