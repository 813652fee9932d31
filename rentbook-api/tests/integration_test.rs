//! Integration tests for rentbook-api

use rentbook_api::*;
use rentbook_cache::{QueryKey, Resource};
use rentbook_core::*;
use rentbook_http_client::{HttpClient, HttpClientConfig};
use rentbook_session::SessionContext;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api_for(server: &MockServer, session: SessionContext) -> RentbookApi {
    let config = HttpClientConfig::builder().base_url(server.uri()).build();
    let http = HttpClient::with_session(config, session.clone()).unwrap();
    RentbookApi::new(http, session)
}

#[tokio::test]
async fn test_listings_cached_until_create() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "MacBook"}])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/products"))
        .and(body_json(json!({"name": "Projector", "description": "", "capacity": 1})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 2, "name": "Projector"})))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory()).await;
    assert_eq!(api.listings().await.unwrap().len(), 1);
    assert_eq!(api.listings().await.unwrap().len(), 1);

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "MacBook"},
            {"id": 2, "name": "Projector"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let created = api
        .create_listing(&ListingDraft::new("Projector", None, None).unwrap())
        .await
        .unwrap();
    assert_eq!(created.map(|l| l.id), Some(2));

    let names: Vec<String> = api.listings().await.unwrap().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["MacBook", "Projector"]);
}

#[tokio::test]
async fn test_failed_write_keeps_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "name": "MacBook"}])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/products/1"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Admins only"})))
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory()).await;
    api.listings().await.unwrap();

    let err = api.delete_listing(1).await.unwrap_err();
    assert_eq!(err.user_message("Delete failed"), "Admins only");
    assert!(
        api.cache()
            .contains(&QueryKey::new(Resource::Listings))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_rooms_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rooms/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "Studio", "capacity": 3})))
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory())
        .await
        .with_listings_path("rooms/");
    let listing = api.listing(4).await.unwrap();
    assert_eq!(listing.capacity, 3);
}

#[tokio::test]
async fn test_availability_is_never_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/availability"))
        .and(query_param("room_id", "3"))
        .and(query_param("date", "2025-03-05"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"available": true})))
        .expect(2)
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory()).await;
    assert!(api.availability(3, "2025-03-05").await.unwrap().is_available());
    assert!(api.availability(3, "2025-03-05").await.unwrap().is_available());
}

#[tokio::test]
async fn test_book_attaches_session_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/book"))
        .and(body_json(json!({"room_id": 3, "date": "2025-03-05", "user_id": 12})))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    session.write_session(&User::new(12)).unwrap();
    let api = api_for(&server, session).await;

    let request = BookingRequest::new(Some(3), "2025-03-05").unwrap();
    assert_eq!(api.book(request).await.unwrap(), None);
}

#[tokio::test]
async fn test_my_bookings_keyed_by_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book/my"))
        .and(query_param("user_id", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    session.write_session(&User::new(12)).unwrap();
    let api = api_for(&server, session).await;

    assert!(api.my_bookings().await.unwrap().is_empty());
    assert_eq!(
        api.cache().keys_for(Resource::MyBookings).await,
        vec!["my-bookings?user_id=12".to_string()]
    );
}

#[tokio::test]
async fn test_status_change_invalidates_bookings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/book"))
        .and(query_param("status", "pending"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 5, "room_id": 1, "start_time": "2025-03-05T09:00:00Z", "end_time": "2025-03-05T10:00:00Z"}
        ])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/book/5/status"))
        .and(body_json(json!({"status": "confirmed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "status": "confirmed"})))
        .mount(&server)
        .await;

    let api = api_for(&server, SessionContext::in_memory()).await;
    let filter = BookingFilter {
        status: Some(BookingStatus::Pending),
        ..BookingFilter::default()
    };
    api.bookings(&filter).await.unwrap();
    api.bookings(&filter).await.unwrap();

    let status = api.set_booking_status(5, BookingStatus::Confirmed).await.unwrap();
    assert_eq!(status, BookingStatus::Confirmed);

    api.bookings(&filter).await.unwrap();
}

#[tokio::test]
async fn test_login_persists_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "ada@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 1, "email": "ada@example.com", "role": "admin"},
            "token": "jwt"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("authorization", "Bearer jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "db": "up"})))
        .mount(&server)
        .await;

    let session = SessionContext::in_memory();
    let api = api_for(&server, session.clone()).await;

    api.login(&Credentials::new("ada@example.com", "pw").unwrap())
        .await
        .unwrap();
    assert!(session.state().is_admin());
    assert_eq!(session.read_token().as_deref(), Some("jwt"));

    let health = api.health().await.unwrap();
    assert_eq!(health.db, Some(json!("up")));

    api.logout().await.unwrap();
    assert!(!session.state().is_authenticated());
    assert_eq!(session.read_token(), None);
}

#[tokio::test]
async fn test_invalid_filter_rejected_locally() {
    let server = MockServer::start().await;
    let api = api_for(&server, SessionContext::in_memory()).await;
    let filter = BookingFilter {
        date_from: Some("yesterday".to_string()),
        ..BookingFilter::default()
    };
    let err = api.bookings(&filter).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation(ValidationError::InvalidDate(_))));
}
