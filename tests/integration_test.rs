//! End-to-end view tests against a mocked backend.

use rentbook::prelude::*;
use rentbook::views::book::{AVAILABLE, NOT_AVAILABLE};
use rentbook::views::LOADING;
use rentbook_api::TIMEOUT_MESSAGE;
use rentbook_http_client::{HttpClient, HttpClientConfig};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer, session: SessionContext) -> RentbookApi {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    let http = HttpClient::with_session(config, session.clone()).unwrap();
    RentbookApi::new(http, session)
}

fn admin_session() -> SessionContext {
    let session = SessionContext::in_memory();
    session
        .write_session(&User::new(1).with_name("Ada").with_role("admin"))
        .unwrap();
    session
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_listings_render_after_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "MacBook", "description": "Laptop", "capacity": 1}
        ])))
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, SessionContext::in_memory()));
    assert!(view.to_string().contains(LOADING));

    view.load().await;
    let rendered = view.to_string();
    assert!(rendered.contains("MacBook"));
    assert!(!rendered.contains(LOADING));
    assert!(!rendered.contains("[Edit]"));
}

#[tokio::test]
async fn test_listings_tolerate_null_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "MacBook", "description": null, "capacity": null}
        ])))
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;

    assert!(view.state().error().is_none());
    assert_eq!(view.cards().len(), 1);
    assert_eq!(view.cards()[0].capacity, 1);
    assert_eq!(view.cards()[0].description, None);
    assert!(view.to_string().contains("MacBook"));
}

#[tokio::test]
async fn test_empty_listings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;

    assert!(view.cards().is_empty());
    assert!(view.state().error().is_none());
    assert!(!view.to_string().contains("Error"));
}

#[tokio::test]
async fn test_listings_error_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "db down"})))
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;
    assert_eq!(view.state().error(), Some("Error loading rooms: db down"));
    assert!(view.cards().is_empty());
}

#[tokio::test]
async fn test_listings_error_without_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;
    assert_eq!(
        view.state().error(),
        Some("Error loading rooms: Request failed with status code 502")
    );
}

#[tokio::test]
async fn test_create_refetches_superset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "MacBook"}])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({"name": "Projector", "description": "", "capacity": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "name": "Projector"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, admin_session()));
    view.load().await;
    assert_eq!(view.cards().len(), 1);
    assert!(view.shows_admin_controls());

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "MacBook"},
            {"id": 2, "name": "Projector"}
        ])))
        .mount(&server)
        .await;

    let created = view.create("  Projector ", None, None).await;
    assert_eq!(created.map(|l| l.id), Some(2));
    assert_eq!(view.notice(), Some(&Notice::success("Product created")));
    assert_eq!(view.cards().len(), 2);
    assert!(view.to_string().contains("[Edit] [Delete]"));
}

#[tokio::test]
async fn test_blank_name_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = ListingsView::new(api_for(&server, admin_session()));
    assert!(view.create("   ", Some("desc"), Some(3)).await.is_none());
    assert_eq!(view.notice(), Some(&Notice::error("Name is required")));
}

// =============================================================================
// Listing detail
// =============================================================================

#[tokio::test]
async fn test_listing_detail_flags_overlaps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Studio"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .and(query_param("room_id", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "room_id": 4, "start_time": "2025-03-05T09:00:00Z", "end_time": "2025-03-05T11:00:00Z"},
            {"id": 2, "room_id": 4, "start_time": "2025-03-05T10:00:00Z", "end_time": "2025-03-05T12:00:00Z"},
            {"id": 3, "room_id": 4, "start_time": "2025-03-05T12:00:00Z", "end_time": "2025-03-05T13:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let mut view = ListingDetailView::new(api_for(&server, SessionContext::in_memory()), 4);
    view.load().await;

    assert_eq!(view.listing().map(|l| l.name.as_str()), Some("Studio"));
    assert_eq!(view.overlaps().iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert!(view.to_string().contains("March 5, 2025, 09:00"));
}

#[tokio::test]
async fn test_listing_detail_save_refetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Studio"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/products/4"))
        .and(body_json(json!({"name": "Big Studio"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Big Studio"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = ListingDetailView::new(api_for(&server, admin_session()), 4);
    view.load().await;
    assert_eq!(view.listing().map(|l| l.name.as_str()), Some("Studio"));

    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Big Studio"})))
        .mount(&server)
        .await;

    view.save(" Big Studio ", "").await;
    assert_eq!(view.notice(), Some(&Notice::success("Product updated")));
    assert_eq!(view.listing().map(|l| l.name.as_str()), Some("Big Studio"));
}

// =============================================================================
// Bookings admin table
// =============================================================================

#[tokio::test]
async fn test_bookings_status_toast_and_refetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "room_id": 1, "room_name": "MacBook", "user_email": "bo@example.com",
             "start_time": "2025-03-05T09:00:00Z", "end_time": "2025-03-05T10:00:00Z"}
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/book/5/status"))
        .and(body_json(json!({"status": "confirmed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "status": "confirmed"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut view = BookingsView::new(api_for(&server, admin_session()));
    view.load().await;
    assert_eq!(view.rows().len(), 1);
    assert!(view.to_string().contains("Approve Reject Delete"));

    view.perform(5, BookingAction::Approve).await;
    assert_eq!(view.notice(), Some(&Notice::success("Status updated: confirmed")));
}

#[tokio::test]
async fn test_bookings_filters_apply_and_reset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .and(query_param("status", "rejected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "room_id": 1, "start_time": "2025-03-05T09:00:00Z", "end_time": "2025-03-05T10:00:00Z"}
        ])))
        .mount(&server)
        .await;

    let mut view = BookingsView::new(api_for(&server, admin_session()));
    view.apply_filters(BookingFilter {
        status: Some(BookingStatus::Rejected),
        ..BookingFilter::default()
    })
    .await;
    assert_eq!(view.notice(), Some(&Notice::success("Filters applied")));
    assert!(view.rows().is_empty());

    view.reset_filters().await;
    assert_eq!(view.notice(), Some(&Notice::success("Filters reset")));
    assert_eq!(view.rows().len(), 1);
}

#[tokio::test]
async fn test_bookings_error_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Admins only"})))
        .mount(&server)
        .await;

    let mut view = BookingsView::new(api_for(&server, admin_session()));
    view.load().await;
    assert_eq!(view.to_string().trim(), "Error loading bookings: Admins only");
}

// =============================================================================
// Reservations
// =============================================================================

#[tokio::test]
async fn test_no_reservations() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/my"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut view = ReservationsView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;
    assert!(view.to_string().contains("No reservations found."));
}

#[tokio::test]
async fn test_cancel_reservation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/my"))
        .and(query_param("user_id", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "room_id": 1, "start_time": "2025-03-05T09:00:00Z", "end_time": "2025-03-05T10:00:00Z", "notes": "late"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/book/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    session.write_session(&User::new(7)).unwrap();
    let mut view = ReservationsView::new(api_for(&server, session));
    view.load().await;
    assert!(view.to_string().contains("Notes:   late"));

    view.cancel(9).await;
    assert_eq!(view.notice(), Some(&Notice::success("Reservation cancelled")));
}

#[tokio::test]
async fn test_reservations_error_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/my"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let mut view = ReservationsView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;
    assert_eq!(view.state().error(), Some("Failed to load reservations: boom"));
}

// =============================================================================
// Booking flow
// =============================================================================

#[tokio::test]
async fn test_unavailable_date_blocks_submit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": false})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut view = BookView::new(api_for(&server, SessionContext::in_memory()));
    view.select(3).await;
    assert_eq!(view.available(), None);

    view.set_date("2025-03-05").await;
    assert_eq!(view.availability_label(), Some(NOT_AVAILABLE));
    assert!(!view.can_submit());
    assert_eq!(view.submit().await, None);
}

#[tokio::test]
async fn test_truthy_but_not_true_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": "yes"})))
        .mount(&server)
        .await;

    let mut view = BookView::new(api_for(&server, SessionContext::in_memory()));
    view.select(3).await;
    view.set_date("2025-03-05").await;
    assert!(!view.can_submit());
}

#[tokio::test]
async fn test_available_date_books_and_moves_on() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/availability"))
        .and(query_param("room_id", "3"))
        .and(query_param("date", "2025-03-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": true})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/book"))
        .and(body_json(json!({"room_id": 3, "date": "2025-03-05", "user_id": 7, "notes": "two people"})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    session.write_session(&User::new(7)).unwrap();
    let mut view = BookView::new(api_for(&server, session));
    view.select(3).await;
    view.set_date("2025-03-05").await;
    view.set_notes("two people");

    assert_eq!(view.availability_label(), Some(AVAILABLE));
    assert_eq!(view.submit().await, Some(Route::MyReservations));
}

#[tokio::test]
async fn test_booking_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/availability"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": true})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/book"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "Already booked"})))
        .mount(&server)
        .await;

    let mut view = BookView::new(api_for(&server, SessionContext::in_memory()));
    view.select(3).await;
    view.set_date("2025-03-05").await;
    assert_eq!(view.submit().await, None);
    assert_eq!(view.notice(), Some(&Notice::error("Already booked")));
}

// =============================================================================
// Auth, health, navigation
// =============================================================================

#[tokio::test]
async fn test_login_updates_nav() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "name": "Ada", "role": "admin"},
            "token": "jwt"
        })))
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let api = api_for(&server, session.clone());
    let app = App::new(AppConfig::default(), api.clone());
    assert_eq!(app.nav().labels(), vec!["Products"]);
    assert_eq!(app.navigate("/bookings"), Route::Listings);

    let mut login = LoginView::new(api);
    assert_eq!(login.submit("ada@example.com", "pw").await, Some(Route::Home));
    assert_eq!(
        app.nav().labels(),
        vec!["Products", "Bookings", "Rent Product", "My Reservations"]
    );
    assert_eq!(app.navigate("/bookings"), Route::Bookings);

    assert_eq!(app.logout().await.unwrap(), Route::Home);
    assert_eq!(app.navigate("/bookings"), Route::Listings);
    assert_eq!(session.read_token(), None);
}

#[tokio::test]
async fn test_login_timeout_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build();
    let http = HttpClient::with_session(config, session.clone()).unwrap();
    let mut login = LoginView::new(RentbookApi::new(http, session));

    assert_eq!(login.submit("ada@example.com", "pw").await, None);
    assert_eq!(login.error(), Some(TIMEOUT_MESSAGE));
}

#[tokio::test]
async fn test_register_reports_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Email taken"})))
        .mount(&server)
        .await;

    let mut register = RegisterView::new(api_for(&server, SessionContext::in_memory()));
    assert_eq!(register.submit("ada@example.com", "Ada", "pw").await, None);
    assert_eq!(register.error(), Some("Email taken"));
}

#[tokio::test]
async fn test_health_unreachable_renders_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut view = HealthView::new(api_for(&server, SessionContext::in_memory()));
    assert!(view.to_string().contains("Loading health..."));
    view.load().await;
    assert_eq!(view.info().and_then(|i| i.status_text()), Some("error"));
    assert!(view.to_string().contains("Application Health"));
}

#[tokio::test]
async fn test_health_keeps_status_with_non_string_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "db": true,
            "backend_image": "api:1.4"
        })))
        .mount(&server)
        .await;

    let mut view = HealthView::new(api_for(&server, SessionContext::in_memory()));
    view.load().await;

    assert_eq!(view.info().and_then(|i| i.status_text()), Some("ok"));
    let rendered = view.to_string();
    assert!(rendered.contains("Status:         ok"));
    assert!(rendered.contains("Database:       true"));
    assert!(rendered.contains("api:1.4"));
}

#[test]
fn test_home_links() {
    let rendered = HomeView.to_string();
    assert!(rendered.starts_with("Product Rental App"));
    assert!(rendered.contains("/products"));
}
