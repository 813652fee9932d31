//! Listing cards with admin add/edit/delete.

use crate::views::{LOADING, Notice, ViewState, write_notice};
use rentbook_api::RentbookApi;
use rentbook_core::{Id, Listing, ListingDraft, ListingUpdate};
use std::fmt;

const LOAD_ERROR: &str = "Error loading rooms";

pub struct ListingsView {
    api: RentbookApi,
    state: ViewState<Vec<Listing>>,
    notice: Option<Notice>,
}

impl ListingsView {
    pub fn new(api: RentbookApi) -> Self {
        Self {
            api,
            state: ViewState::Loading,
            notice: None,
        }
    }

    pub async fn load(&mut self) {
        let result = self.api.listings().await;
        self.state = ViewState::from_result(result, LOAD_ERROR, LOAD_ERROR);
    }

    pub fn state(&self) -> &ViewState<Vec<Listing>> {
        &self.state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Loaded listings; empty while loading or after an error.
    pub fn cards(&self) -> &[Listing] {
        self.state.ready().map(Vec::as_slice).unwrap_or_default()
    }

    /// Add, edit and delete controls are shown to admins only.
    pub fn shows_admin_controls(&self) -> bool {
        self.api.session().state().is_admin()
    }

    /// Create from raw form input, then reload.
    ///
    /// A blank name is rejected locally; no request is made.
    pub async fn create(
        &mut self,
        name: &str,
        description: Option<&str>,
        capacity: Option<i64>,
    ) -> Option<Listing> {
        let draft = match ListingDraft::new(name, description, capacity) {
            Ok(draft) => draft,
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
                return None;
            }
        };

        match self.api.create_listing(&draft).await {
            Ok(created) => {
                self.notice = Some(Notice::success("Product created"));
                self.load().await;
                created
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.user_message("Failed to create product")));
                None
            }
        }
    }

    pub async fn update(&mut self, id: Id, update: &ListingUpdate) {
        if update.is_empty() {
            return;
        }
        match self.api.update_listing(id, update).await {
            Ok(_) => {
                self.notice = Some(Notice::success("Product updated"));
                self.load().await;
            }
            Err(e) => self.notice = Some(Notice::error(e.user_message("Failed to update product"))),
        }
    }

    pub async fn delete(&mut self, id: Id) {
        match self.api.delete_listing(id).await {
            Ok(()) => {
                self.notice = Some(Notice::success("Product deleted"));
                self.load().await;
            }
            Err(e) => self.notice = Some(Notice::error(e.user_message("Failed to delete product"))),
        }
    }
}

impl fmt::Display for ListingsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listings = match &self.state {
            ViewState::Loading => return writeln!(f, "{}", LOADING),
            ViewState::Failed(msg) => return writeln!(f, "{}", msg),
            ViewState::Ready(listings) => listings,
        };

        let admin = self.shows_admin_controls();
        if admin {
            writeln!(f, "Products  [Add]")?;
        } else {
            writeln!(f, "Products")?;
        }

        for listing in listings {
            writeln!(f)?;
            writeln!(f, "  #{} {}", listing.id, listing.name)?;
            if let Some(description) = listing.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(f, "     {}", description)?;
            }
            writeln!(f, "     Capacity: {}", listing.capacity)?;
            if admin {
                writeln!(f, "     [Edit] [Delete]")?;
            }
        }

        write_notice(f, self.notice.as_ref())
    }
}
