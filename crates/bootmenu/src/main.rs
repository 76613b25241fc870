mod canvas;
mod config;
mod device;
mod input;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use bootmenu_core::{Background, MenuResult, Ui};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use canvas::HeadlessCanvas;
use config::{BootmenuConfig, DEFAULT_CONFIG};
use device::KeyPolicy;
use input::EvdevSource;

/// Exit status when the user leaves the menu without choosing
const EXIT_GO_BACK: u8 = 2;

#[derive(Parser)]
#[command(name = "bootmenu")]
#[command(about = "Touch and key driven recovery boot menu")]
#[command(version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the menu and print the chosen entry id (default)
    Run,
    /// Parse the configuration and print a summary
    CheckConfig,
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr, stdout carries the selection
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("bootmenu=info,bootmenu_core=info"))?,
        )
        .init();

    let cli = Cli::parse();
    let config = BootmenuConfig::load(&cli.config)?;

    match cli.command {
        Some(Command::Run) | None => run(&config),
        Some(Command::CheckConfig) => {
            check_config(&cli.config, &config);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(config: &BootmenuConfig) -> anyhow::Result<ExitCode> {
    let canvas = HeadlessCanvas::new(config.screen.width, config.screen.height);
    let source = EvdevSource::open(&config.input.devices)?;
    let policy = Arc::new(KeyPolicy::new(config.keys.clone()));

    let (ui, _runtime) = Ui::spawn(&config.ui, Box::new(canvas), Box::new(source), policy.clone())
        .context("Failed to start UI")?;
    ui.set_background(Some(Background::Default));

    let mut tab = config.menu.populated_tab(0);
    loop {
        ui.set_active_tab(tab);
        let (request, ids) = config.menu.request(tab);
        match ui.menu_selection(request, policy.as_ref()) {
            MenuResult::Selected(index) => {
                let id = ids.get(index).context("Selection out of range")?;
                info!("Selected {}", id);
                println!("{}", id);
                return Ok(ExitCode::SUCCESS);
            }
            MenuResult::GoBack => {
                info!("Menu dismissed");
                return Ok(ExitCode::from(EXIT_GO_BACK));
            }
            MenuResult::NextTab(next) => tab = config.menu.populated_tab(next),
        }
    }
}

fn check_config(path: &std::path::Path, config: &BootmenuConfig) {
    println!("Configuration: {}", path.display());
    println!("  screen:  {}x{}", config.screen.width, config.screen.height);
    if config.input.devices.is_empty() {
        println!("  devices: autodetect");
    } else {
        for device in &config.input.devices {
            println!("  device:  {}", device.display());
        }
    }
    println!(
        "  redraw:  {} fps, progress {} fps",
        config.ui.timing.redraw_fps, config.ui.timing.progress_fps
    );

    for (index, name) in config.menu.tabs.iter().enumerate() {
        let (request, _) = config.menu.request(index);
        println!("  tab {}: {} ({} entries)", index, name, request.items.len());
    }
    for name in config.menu.empty_tabs() {
        warn!("Tab {} has no entries", name);
    }
}
