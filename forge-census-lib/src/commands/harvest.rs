use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::facts::{Collector, HarvestConfig};
use crate::reports::{generate_json, generate_yaml};
use camino::Utf8PathBuf;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   harvest";

/// Serialization used for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,

    /// YAML
    Yaml,
}

#[derive(Parser, Debug)]
pub struct HarvestArgs {
    /// Report serialization format
    #[arg(long, short = 'o', value_name = "FORMAT")]
    pub output: OutputFormat,

    /// Write the report to this file instead of standard output
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<Utf8PathBuf>,

    /// GitLab personal access token, sent with pipeline and detail lookups
    #[arg(long, value_name = "TOKEN", env = "GITLAB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Root of the GitLab REST API (overrides the configuration file)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Projects requested per listing page (overrides the configuration file)
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub page_size: Option<u8>,

    /// Projects enriched at the same time (overrides the configuration file)
    #[arg(long, value_name = "COUNT", value_parser = RangedU64ValueParser::<usize>::new().range(1..=64))]
    pub concurrency: Option<usize>,

    /// Path to configuration file (default is `census.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

impl HarvestArgs {
    /// Command-line values win over the configuration file.
    fn harvest_config(&self, config: Config) -> HarvestConfig {
        let mut harvest = HarvestConfig::new(self.base_url.clone().unwrap_or(config.base_url))
            .with_page_size(self.page_size.unwrap_or(config.page_size))
            .with_concurrency(self.concurrency.unwrap_or(config.concurrency));

        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            harvest = harvest.with_token(token);
        }

        harvest
    }
}

pub async fn process_harvest<H: Host>(host: &mut H, args: &HarvestArgs) -> Result<()> {
    init_logging(args.log_level);

    let cwd = std::env::current_dir().into_app_err("determining the current directory")?;
    let base_dir = Utf8PathBuf::try_from(cwd).into_app_err("current directory is not valid UTF-8")?;
    let config = Config::load(&base_dir, args.config.as_ref())?;
    let harvest_config = args.harvest_config(config);

    log::debug!(target: LOG_TARGET, "Harvesting with {harvest_config:?}");

    let delay = if args.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_hours(365 * 24)
    };

    let progress = ProgressReporter::new(delay, args.color.use_colors_on_stderr());
    let report = Collector::new(&harvest_config, progress)?
        .collect()
        .await
        .map_err(|e| e.enrich_with(|| format!("harvesting projects from {}", harvest_config.base_url)))?;

    let mut text = String::new();
    match args.output {
        OutputFormat::Json => generate_json(&report, &mut text)?,
        OutputFormat::Yaml => generate_yaml(&report, &mut text)?,
    }

    if let Some(path) = &args.output_file {
        fs::write(path, text).into_app_err_with(|| format!("writing report to '{path}'"))?;
        log::info!(target: LOG_TARGET, "Wrote report on {} project(s) to '{path}'", report.projects.len());
    } else {
        host.output()
            .write_all(text.as_bytes())
            .into_app_err("writing report to standard output")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> HarvestArgs {
        let mut args = vec!["harvest", "--output", "json"];
        args.extend_from_slice(extra);
        HarvestArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_config_values_used_without_overrides() {
        let args = parse(&[]);
        let config = Config {
            base_url: "https://gitlab.example/api/v4".into(),
            page_size: 20,
            concurrency: 3,
        };

        let harvest = args.harvest_config(config);
        assert_eq!(harvest.base_url, "https://gitlab.example/api/v4");
        assert_eq!(harvest.page_size, 20);
        assert_eq!(harvest.concurrency, 3);
    }

    #[test]
    fn test_command_line_overrides_config() {
        let args = parse(&["--base-url", "http://localhost:1/api/v4", "--page-size", "5", "--concurrency", "8", "--token", "abc"]);
        let harvest = args.harvest_config(Config::default());
        assert_eq!(harvest.base_url, "http://localhost:1/api/v4");
        assert_eq!(harvest.page_size, 5);
        assert_eq!(harvest.concurrency, 8);
        assert_eq!(harvest.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let args = parse(&["--token", ""]);
        assert!(args.harvest_config(Config::default()).token.is_none());
    }

    #[test]
    fn test_page_size_out_of_range_rejected() {
        let _ = HarvestArgs::try_parse_from(["harvest", "--output", "json", "--page-size", "0"]).unwrap_err();
        let _ = HarvestArgs::try_parse_from(["harvest", "--output", "json", "--page-size", "101"]).unwrap_err();
    }

    #[test]
    fn test_concurrency_out_of_range_rejected() {
        let _ = HarvestArgs::try_parse_from(["harvest", "--output", "json", "--concurrency", "0"]).unwrap_err();
        let _ = HarvestArgs::try_parse_from(["harvest", "--output", "json", "--concurrency", "65"]).unwrap_err();
    }

    #[test]
    fn test_output_format_required() {
        let _ = HarvestArgs::try_parse_from(["harvest"]).unwrap_err();
        let args = HarvestArgs::try_parse_from(["harvest", "-o", "yaml"]).unwrap();
        assert_eq!(args.output, OutputFormat::Yaml);
    }
}
