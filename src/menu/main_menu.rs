use crate::config::Settings;
use crate::menu::handlers::{
    run_frame_exporter, run_show_config, run_video_concat, run_video_generator,
};
use anyhow::Result;
use console::{Term, style};
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use rust_i18n::t;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    settings: &Settings,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style(t!("main_menu.title")).cyan().bold());
    println!("{}", style(t!("common.esc_hint")).dim());

    let options = vec![
        t!("main_menu.opt_generate"),
        t!("main_menu.opt_concat"),
        t!("main_menu.opt_frame"),
        t!("main_menu.opt_config"),
        t!("main_menu.exit"),
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(t!("main_menu.prompt"))
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_video_generator(term, shutdown_signal, settings)?;
            Ok(true)
        }
        Some(1) => {
            run_video_concat(term, settings)?;
            Ok(true)
        }
        Some(2) => {
            run_frame_exporter(term)?;
            Ok(true)
        }
        Some(3) => {
            run_show_config(term, settings)?;
            Ok(true)
        }
        Some(4) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}
