//! Open any page by path, the way the browser router would.

use rentbook::Route;
use rentbook::views::{
    BookView, BookingsView, HomeView, ListingDetailView, ListingsView, LoginView, RegisterView,
    ReservationsView,
};

use super::{Context, health, info, render, warn};
use crate::error::CliResult;

pub async fn run(ctx: &Context, path: &str) -> CliResult<()> {
    let route = ctx.app.navigate(path);
    if Route::parse(path) != route {
        warn(&format!("Redirected to {}", route));
    }

    render(&ctx.app.nav());
    println!();

    match route {
        Route::Home => render(&HomeView),
        Route::Login => {
            render(&LoginView::new(ctx.api()));
            info("Sign in with `rentbook login`");
        }
        Route::Register => {
            render(&RegisterView::new(ctx.api()));
            info("Create an account with `rentbook register`");
        }
        Route::Listings => {
            let mut view = ListingsView::new(ctx.api());
            ctx.spin("Loading products...", view.load()).await;
            render(&view);
        }
        Route::ListingDetail(id) => {
            let mut view = ListingDetailView::new(ctx.api(), id);
            ctx.spin("Loading product...", view.load()).await;
            render(&view);
        }
        Route::Bookings => {
            let mut view = BookingsView::new(ctx.api());
            ctx.spin("Loading bookings...", view.load()).await;
            render(&view);
        }
        Route::BookListing => {
            let mut view = BookView::new(ctx.api());
            ctx.spin("Loading products...", view.load()).await;
            render(&view);
        }
        Route::MyReservations => {
            let mut view = ReservationsView::new(ctx.api());
            ctx.spin("Loading reservations...", view.load()).await;
            render(&view);
        }
        Route::Health => return health::run(ctx).await,
    }
    Ok(())
}
