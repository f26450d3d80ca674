//! folio terminal preview - Entry Point

use clap::Parser;
use folio::config::{self, CliOverrides};
use folio::media::Carousel;
use folio::model::{AppError, Language};
use folio::state::Site;
use std::path::PathBuf;
use tracing::info;

/// folio - terminal preview of the portfolio navigation engine
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Drive the portfolio page-navigation engine from a terminal")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Initial language (en or zh)
    #[arg(long)]
    pub lang: Option<Language>,

    /// Number of content pages (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: Option<u32>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            language: self.lang,
            pages: self.pages.map(|n| n as usize),
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

fn run(args: Args) -> Result<(), AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        config::apply_cli_overrides(with_env, args.overrides())
    };

    folio::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );
    config.validate()?;

    let media = Carousel::new(&config.nav.media, 0);
    let site = Site::builder(config.nav)
        .language(config.language)
        .media(Box::new(media))
        .build()?;

    folio::view::run_with_site(site)?;

    Ok(())
}
