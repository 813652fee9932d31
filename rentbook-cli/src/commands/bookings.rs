//! Booking flow and the admin booking table.

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use rentbook::Route;
use rentbook::domain::{BookingFilter, Id};
use rentbook::views::book::NOT_AVAILABLE;
use rentbook::views::{BookView, BookingAction, BookingsView, ReservationsView};

use super::{Context, check_loaded, confirm, info, render, report, success};
use crate::error::{CliError, CliResult};

/// Check one listing on one date.
pub async fn availability(ctx: &Context, listing: Id, date: &str) -> CliResult<()> {
    let mut view = BookView::new(ctx.api());
    view.select(listing).await;
    ctx.spin("Checking availability...", view.set_date(date)).await;

    match view.availability_label() {
        Some(label) if view.can_submit() => success(label),
        Some(label) => println!("  {} {}", "✗".red().bold(), label.red()),
        None => {
            return Err(CliError::Failed(
                "Could not check availability for that product and date".to_string(),
            ));
        }
    }
    Ok(())
}

/// Book a listing. Missing arguments are prompted for.
pub async fn book(
    ctx: &Context,
    listing: Option<Id>,
    date: Option<String>,
    notes: Option<String>,
) -> CliResult<()> {
    let mut view = BookView::new(ctx.api());
    let theme = ColorfulTheme::default();

    let listing = match listing {
        Some(id) => id,
        None => {
            ctx.spin("Loading products...", view.load()).await;
            let names: Vec<String> = view.listings().iter().map(|l| l.name.clone()).collect();
            if names.is_empty() {
                return Err(CliError::Failed("No products to book".to_string()));
            }
            let index = Select::with_theme(&theme)
                .with_prompt("Product")
                .items(&names)
                .default(0)
                .interact()?;
            view.listings()[index].id
        }
    };

    let date = match date {
        Some(date) => date,
        None => Input::<String>::with_theme(&theme)
            .with_prompt("Date (YYYY-MM-DD)")
            .interact_text()?,
    };

    view.select(listing).await;
    ctx.spin("Checking availability...", view.set_date(&date)).await;
    if !view.can_submit() {
        let reason = view.availability_label().unwrap_or(NOT_AVAILABLE);
        return Err(CliError::Failed(reason.to_string()));
    }
    if let Some(notes) = notes {
        view.set_notes(&notes);
    }

    let next = ctx.spin("Booking...", view.submit()).await;
    report(view.notice())?;
    if next == Some(Route::MyReservations) {
        let mut reservations = ReservationsView::new(ctx.api());
        ctx.spin("Loading reservations...", reservations.load()).await;
        render(&reservations);
    }
    Ok(())
}

/// The admin table opens only when the gate lets the session through.
fn gate(ctx: &Context) -> CliResult<()> {
    match ctx.app.navigate(&Route::Bookings.path()) {
        Route::Bookings => Ok(()),
        redirected => Err(CliError::Forbidden(format!(
            "Bookings are for admins only (redirected to {})",
            redirected
        ))),
    }
}

pub async fn list(ctx: &Context, filter: BookingFilter) -> CliResult<()> {
    gate(ctx)?;
    let mut view = BookingsView::new(ctx.api());
    if filter.is_empty() {
        ctx.spin("Loading bookings...", view.load()).await;
    } else {
        ctx.spin("Loading bookings...", view.apply_filters(filter)).await;
    }
    check_loaded(view.state().error())?;
    report(view.notice())?;

    render(&view);
    let flagged = view.rows().iter().filter(|b| view.is_overlapping(b.id)).count();
    if flagged > 0 {
        info(&format!("{} booking(s) overlap another booking (marked !)", flagged));
    }
    Ok(())
}

pub async fn act(ctx: &Context, id: Id, action: BookingAction, yes: bool) -> CliResult<()> {
    gate(ctx)?;
    if action == BookingAction::Delete && !confirm(&format!("Delete booking #{}?", id), yes)? {
        return Ok(());
    }

    let mut view = BookingsView::new(ctx.api());
    ctx.spin(&format!("{}...", action.label()), view.perform(id, action))
        .await;
    report(view.notice())?;
    render(&view);
    Ok(())
}
