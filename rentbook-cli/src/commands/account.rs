//! Login, register, logout and whoami.

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use rentbook::session::SessionState;
use rentbook::views::{LoginView, RegisterView};

use super::{Context, render, success};
use crate::error::{CliError, CliResult};

fn prompt_text(theme: &ColorfulTheme, value: Option<String>, prompt: &str) -> CliResult<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::with_theme(theme)
            .with_prompt(prompt)
            .interact_text()?),
    }
}

fn prompt_password(theme: &ColorfulTheme, value: Option<String>) -> CliResult<String> {
    match value {
        Some(value) => Ok(value),
        None => Ok(Password::with_theme(theme)
            .with_prompt("Password")
            .interact()?),
    }
}

fn signed_in(ctx: &Context) {
    if let Some(user) = ctx.app.session().read_session() {
        success(&format!("Signed in as {}", user.display_name()));
    }
}

pub async fn login(ctx: &Context, email: Option<String>, password: Option<String>) -> CliResult<()> {
    let theme = ColorfulTheme::default();
    let email = prompt_text(&theme, email, "Email")?;
    let password = prompt_password(&theme, password)?;

    let mut view = LoginView::new(ctx.api());
    let next = ctx.spin("Signing in...", view.submit(&email, &password)).await;
    if next.is_none() {
        let msg = view.error().unwrap_or("Login failed").to_string();
        return Err(CliError::Failed(msg));
    }
    signed_in(ctx);
    Ok(())
}

pub async fn register(
    ctx: &Context,
    email: Option<String>,
    name: Option<String>,
    password: Option<String>,
) -> CliResult<()> {
    let theme = ColorfulTheme::default();
    let name = prompt_text(&theme, name, "Name")?;
    let email = prompt_text(&theme, email, "Email")?;
    let password = prompt_password(&theme, password)?;

    let mut view = RegisterView::new(ctx.api());
    let next = ctx
        .spin("Registering...", view.submit(&email, &name, &password))
        .await;
    if next.is_none() {
        let msg = view.error().unwrap_or("Registration failed").to_string();
        return Err(CliError::Failed(msg));
    }
    signed_in(ctx);
    Ok(())
}

pub async fn logout(ctx: &Context) -> CliResult<()> {
    ctx.app.logout().await?;
    success("Signed out");
    Ok(())
}

pub fn whoami(ctx: &Context) -> CliResult<()> {
    match ctx.app.session().state() {
        SessionState::Anonymous => println!("  {}", "Not signed in".dimmed()),
        SessionState::Authenticated { user, role } => {
            println!(
                "  {} {} ({})",
                user.display_name().bright_white().bold(),
                format!("#{}", user.id).dimmed(),
                role.as_str().unwrap_or("no role").cyan()
            );
        }
    }
    render(&ctx.app.nav());
    Ok(())
}
