//! Terminal presentation of stage outcomes.

use std::time::Duration;

use colored::Colorize;
use fakebiz_core::stage::{BrandIdentity, Guidance, LandingPage, Logo, StageFailure};
use fakebiz_core::{SessionState, StageKind, StageState};
use indicatif::{ProgressBar, ProgressStyle};

use crate::command::COMMANDS;
use crate::logging;

pub const BRAND_SPINNER: &str = "Thinking like a brand guru...";
pub const LOGO_SPINNER: &str = "Generating image...";
pub const PAGE_SPINNER: &str = "Coding like a frontend dev...";

/// Spinner shown while a remote call is in flight.
///
/// Log lines are written around it while it is alive; it is cleared on
/// [`Spinner::finish`] or drop.
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        logging::detach_spinner();
        self.bar.finish_and_clear();
    }
}

pub fn spinner(message: &'static str) -> Spinner {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
            .template("{spinner:.magenta} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(80));
    logging::attach_spinner(&bar);
    Spinner { bar }
}

pub fn welcome() {
    println!("{}", "Fake Business Generator".bright_magenta().bold());
    println!(
        "{}",
        "Brand identity, logo, and landing page from a few inputs.".dimmed()
    );
    println!("Type {} for commands, {} to leave.\n", "/help".bright_cyan(), "quit".bright_cyan());
}

pub fn help() {
    println!("{}", "Commands:".bold());
    for (name, description) in COMMANDS {
        println!("  {:<10} {}", name.bright_cyan(), description);
    }
    println!("  {:<10} {}", "quit".bright_cyan(), "Exit the session");
}

pub fn brand(identity: &BrandIdentity) {
    println!("\n{}", "Brand Identity".bright_green().bold());
    println!("{}\n", identity.markdown);
}

pub fn logo(logo: &Logo) {
    let (width, height) = logo.dimensions();
    println!(
        "\n{} {}",
        logo.caption().bright_green().bold(),
        format!("({width}x{height})").dimmed()
    );
    println!("{} {}", "Prompt:".dimmed(), logo.prompt);
}

pub fn landing_page(page: &LandingPage) {
    println!("\n{}", "Landing Page".bright_green().bold());
    println!("```html\n{}\n```", page.html);
    println!("{}\n", page.download_link().dimmed());
}

pub fn failure(failure: &StageFailure) {
    eprintln!("{} {}", "Error:".red().bold(), failure.message.red());
    if let Some(detail) = &failure.detail {
        eprintln!("  {}", detail.red());
    }
}

pub fn guidance(guidance: &Guidance) {
    println!("{}", guidance.message.yellow());
}

pub fn status(session: &SessionState) {
    println!("{}", "Stages:".bold());
    for stage in StageKind::ALL {
        let state = match session.stage_state(stage) {
            StageState::Idle => "idle".dimmed(),
            StageState::Requesting => "requesting".yellow(),
            StageState::Succeeded => "done".bright_green(),
        };
        println!("  {:<14} {}", stage.label(), state);
    }
    if session.has_brand_record() {
        println!(
            "  {:<14} {}",
            "brand name",
            fakebiz_core::extract_brand_name(session.brand_record()).bright_white()
        );
    }
}

pub fn saved(path: &std::path::Path) {
    println!("{} {}", "Saved".bright_green(), path.display());
}
