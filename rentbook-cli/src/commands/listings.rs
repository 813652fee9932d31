//! Listing commands: list, show, create, update, delete.

use rentbook::domain::{Id, ListingUpdate};
use rentbook::views::{ListingDetailView, ListingsView};

use super::{Context, check_loaded, confirm, render, report};
use crate::error::{CliError, CliResult};

async fn loaded(ctx: &Context) -> CliResult<ListingsView> {
    let mut view = ListingsView::new(ctx.api());
    ctx.spin("Loading products...", view.load()).await;
    check_loaded(view.state().error())?;
    Ok(view)
}

fn require_admin(view: &ListingsView) -> CliResult<()> {
    if view.shows_admin_controls() {
        Ok(())
    } else {
        Err(CliError::Forbidden(
            "Only admins can add, edit or delete products".to_string(),
        ))
    }
}

pub async fn list(ctx: &Context) -> CliResult<()> {
    render(&loaded(ctx).await?);
    Ok(())
}

pub async fn show(ctx: &Context, id: Id) -> CliResult<()> {
    let mut view = ListingDetailView::new(ctx.api(), id);
    ctx.spin("Loading product...", view.load()).await;
    check_loaded(view.state().error())?;
    render(&view);
    Ok(())
}

pub async fn create(
    ctx: &Context,
    name: &str,
    description: Option<&str>,
    capacity: Option<i64>,
) -> CliResult<()> {
    let mut view = ListingsView::new(ctx.api());
    require_admin(&view)?;

    ctx.spin("Creating product...", view.create(name, description, capacity))
        .await;
    report(view.notice())?;
    render(&view);
    Ok(())
}

pub async fn update(ctx: &Context, id: Id, update: ListingUpdate) -> CliResult<()> {
    if update.is_empty() {
        return Err(CliError::InvalidArgument(
            "pass at least one of --name, --description, --capacity".to_string(),
        ));
    }

    let mut view = ListingsView::new(ctx.api());
    require_admin(&view)?;
    ctx.spin("Saving product...", view.update(id, &update)).await;
    report(view.notice())?;
    render(&view);
    Ok(())
}

pub async fn delete(ctx: &Context, id: Id, yes: bool) -> CliResult<()> {
    let mut view = ListingsView::new(ctx.api());
    require_admin(&view)?;
    if !confirm(&format!("Delete product #{}?", id), yes)? {
        return Ok(());
    }

    ctx.spin("Deleting product...", view.delete(id)).await;
    report(view.notice())?;
    render(&view);
    Ok(())
}
