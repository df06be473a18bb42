//! PROS site preview - Entry Point

use clap::Parser;
use pros_site::config::ResolvedConfig;
use pros_site::engine::HostCapabilities;
use pros_site::model::{AppError, Route, SiteContent};
use pros_site::state::{SessionOptions, SiteSession};
use pros_site::view::ColorConfig;
use std::path::PathBuf;
use tracing::info;

/// PROS site preview - responsive site UI engine in the terminal
#[derive(Parser, Debug)]
#[command(name = "pros-site")]
#[command(version)]
#[command(about = "Terminal preview of the PROS customs office site and its responsive UI engine")]
pub struct Args {
    /// Start page (/, /about, /about/location, /services)
    #[arg(long)]
    pub page: Option<Route>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to a TOML content override
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Logical pixels per terminal column
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub px_per_column: Option<u32>,

    /// Reveal everything immediately instead of on scroll
    #[arg(long)]
    pub no_animations: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Print a JSON snapshot of the engine mounted at this width and exit
    #[arg(long, value_name = "WIDTH_PX")]
    pub dump: Option<u32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = pros_site::config::load_config_with_precedence(args.config.clone())?;
        let merged = pros_site::config::merge_config(config_file);
        let with_env = pros_site::config::apply_env_overrides(merged);
        pros_site::config::apply_cli_overrides(
            with_env,
            args.page,
            args.px_per_column,
            args.content.clone(),
            args.no_animations,
        )
    };

    pros_site::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let content = load_content(&config)?;

    if let Some(width_px) = args.dump {
        let json = dump_snapshot(&config, content, width_px)?;
        println!("{json}");
        return Ok(());
    }

    let colors = ColorConfig::from_env_and_args(args.no_color);
    pros_site::view::run_site(&config, content, colors)?;

    Ok(())
}

fn load_content(config: &ResolvedConfig) -> Result<SiteContent, AppError> {
    let content = match &config.content_path {
        Some(path) => {
            info!(path = %path.display(), "loading content override");
            SiteContent::load(path)?
        }
        None => {
            let content = SiteContent::default();
            content.validate()?;
            content
        }
    };
    Ok(content)
}

/// Mount a headless session at `width_px` and serialize its state.
fn dump_snapshot(
    config: &ResolvedConfig,
    content: SiteContent,
    width_px: u32,
) -> Result<String, AppError> {
    let capabilities = if config.animations {
        HostCapabilities::FULL
    } else {
        HostCapabilities::FULL.without_intersection()
    };
    let session = SiteSession::mount(
        SessionOptions {
            capabilities,
            initial_width_px: Some(width_px),
            route: config.start_page,
            spy_offset_px: config.spy_offset_px,
        },
        content,
    );
    Ok(serde_json::to_string_pretty(&session.snapshot())?)
}
