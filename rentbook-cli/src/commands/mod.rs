//! CLI command implementations.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rentbook::views::Notice;
use rentbook::{App, RentbookApi};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::error::{CliError, CliResult};

pub mod account;
pub mod bookings;
pub mod health;
pub mod listings;
pub mod open;
pub mod reservations;

/// Shared state for one invocation.
pub struct Context {
    pub app: App,
    pub quiet: bool,
}

impl Context {
    pub fn new(app: App, quiet: bool) -> Self {
        Self { app, quiet }
    }

    pub fn api(&self) -> RentbookApi {
        self.app.api().clone()
    }

    /// Await `fut` behind a spinner. The spinner is the loading indicator
    /// and is cleared before the view renders.
    pub async fn spin<F: Future>(&self, msg: &str, fut: F) -> F::Output {
        if self.quiet {
            return fut.await;
        }
        let pb = create_spinner(msg);
        let output = fut.await;
        pb.finish_and_clear();
        output
    }
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn render(view: &impl Display) {
    println!("{}", view.to_string().trim_end());
}

pub fn success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg.green());
}

pub fn warn(msg: &str) {
    println!("  {} {}", "⚠".yellow().bold(), msg.yellow());
}

pub fn info(msg: &str) {
    println!("  {} {}", "→".cyan(), msg);
}

/// Report a view's notice; an error notice fails the command.
pub fn report(notice: Option<&Notice>) -> CliResult<()> {
    match notice {
        Some(Notice::Success(msg)) => {
            success(msg);
            Ok(())
        }
        Some(Notice::Error(msg)) => Err(CliError::Failed(msg.clone())),
        None => Ok(()),
    }
}

/// Fail with the inline load error, if any.
pub fn check_loaded(error: Option<&str>) -> CliResult<()> {
    match error {
        Some(msg) => Err(CliError::Failed(msg.to_string())),
        None => Ok(()),
    }
}

pub fn confirm(prompt: &str, assume_yes: bool) -> CliResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    let theme = dialoguer::theme::ColorfulTheme::default();
    Ok(dialoguer::Confirm::with_theme(&theme)
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
