//! The signed-in user's reservations.

use rentbook::domain::Id;
use rentbook::views::ReservationsView;

use super::{Context, check_loaded, confirm, render, report};
use crate::error::CliResult;

pub async fn list(ctx: &Context) -> CliResult<()> {
    let mut view = ReservationsView::new(ctx.api());
    ctx.spin("Loading reservations...", view.load()).await;
    check_loaded(view.state().error())?;
    render(&view);
    Ok(())
}

pub async fn cancel(ctx: &Context, id: Id, yes: bool) -> CliResult<()> {
    if !confirm("Cancel reservation?", yes)? {
        return Ok(());
    }

    let mut view = ReservationsView::new(ctx.api());
    ctx.spin("Cancelling reservation...", view.cancel(id)).await;
    report(view.notice())?;
    render(&view);
    Ok(())
}
