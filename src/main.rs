use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use log::{info, warn};
use rust_i18n::t;
use sora_video_gen::cli::{Cli, run_command};
use sora_video_gen::config::Settings;
use sora_video_gen::init;
use sora_video_gen::menu::show_main_menu;
use sora_video_gen::signal::setup_shutdown_signal;

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en-US");

fn main() -> Result<()> {
    init::init();
    let cli = Cli::parse();
    let term = Term::stdout();
    let shutdown_signal = setup_shutdown_signal();

    // Load settings once and set locale
    let settings = Settings::load();
    rust_i18n::set_locale(settings.language.as_str());

    // Direct subcommand: run it and exit non-zero on failure
    if let Some(command) = cli.command {
        if let Err(e) = run_command(command, &settings, &shutdown_signal) {
            eprintln!("{} {e}", style(t!("main_menu.error_prefix")).red().bold());
            std::process::exit(1);
        }
        return Ok(());
    }

    loop {
        match show_main_menu(&term, &shutdown_signal, &settings) {
            Ok(true) => {}
            Ok(false) => {
                term.clear_screen()?;
                println!("\n{}", style(t!("main_menu.goodbye")).green().bold());
                info!("Program exited normally");
                break;
            }
            Err(e) => {
                warn!("Program error: {e}");
                eprintln!("{} {}", style(t!("main_menu.error_prefix")).red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}
