//! Integration tests for the A Wee Adventure backend.

use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::auth::SessionStore;
use crate::config::Config;
use crate::db::{init_database, Repository};
use crate::photos::PhotoStore;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    /// Fixture with the edit gate off (no password configured).
    async fn new() -> Self {
        Self::with_password(None).await
    }

    async fn with_password(password: Option<String>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");
        let photo_dir = temp_dir.path().join("photos");

        // Initialize database
        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let repo = Arc::new(Repository::new(pool));

        // Initialize photo storage
        let photos = Arc::new(PhotoStore::open(&photo_dir).await.expect("Failed to init photos"));

        // Create config
        let config = Config {
            edit_password: password,
            session_ttl_hours: 24,
            db_path,
            photo_dir,
            public_base_url: None,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
        };

        let state = AppState {
            repo,
            sessions: Arc::new(SessionStore::new()),
            photos,
            config: Arc::new(config),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create_entry(&self, title: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/api/journal"))
            .json(&json!({ "title": title, "entryDate": "2026-06-01" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body["data"].clone()
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_ping() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/ping"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "pong");
}

#[tokio::test]
async fn test_journal_crud() {
    let fixture = TestFixture::new().await;

    // Create
    let resp = fixture
        .client
        .post(fixture.url("/api/journal"))
        .json(&json!({
            "title": "Picnic at Loch Lomond",
            "content": "Sunny for once",
            "entryDate": "2026-06-14",
            "location": "Loch Lomond",
            "weather": "sunny",
            "distanceMiles": 42.5,
            "dogFriendly": true,
            "tags": ["picnic", "loch"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    let entry = &body["data"];
    assert_eq!(entry["title"], "Picnic at Loch Lomond");
    assert_eq!(entry["distanceMiles"], 42.5);
    assert_eq!(entry["likeCount"], 0);
    assert_eq!(entry["version"], 1);
    let id = entry["id"].as_str().unwrap().to_string();

    // List
    let resp = fixture
        .client
        .get(fixture.url("/api/journal"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Update
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/journal/{}", id)))
        .json(&json!({ "mood": "cheerful", "expectedVersion": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["mood"], "cheerful");
    assert_eq!(body["data"]["version"], 2);
    // Unchanged fields survive a partial update
    assert_eq!(body["data"]["title"], "Picnic at Loch Lomond");

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/journal/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/journal/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_journal_requires_title_and_date() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/journal"))
        .json(&json!({ "title": "  ", "entryDate": "2026-06-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let resp = fixture
        .client
        .post(fixture.url("/api/journal"))
        .json(&json!({ "title": "No date", "entryDate": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_journal_version_conflict() {
    let fixture = TestFixture::new().await;
    let entry = fixture.create_entry("Conflicted").await;
    let id = entry["id"].as_str().unwrap();

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/journal/{}", id)))
        .json(&json!({ "title": "Stale edit", "expectedVersion": 99 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VERSION_MISMATCH");
    assert_eq!(body["error"]["details"]["currentVersion"], 1);
}

#[tokio::test]
async fn test_like_toggle_round_trip() {
    let fixture = TestFixture::new().await;
    let entry = fixture.create_entry("Likeable").await;
    let id = entry["id"].as_str().unwrap();

    // First toggle likes
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/journal/{}/likes", id)))
        .json(&json!({ "visitorName": "Gran" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["data"]["likeCount"], 1);

    // Same visitor, different spelling, unlikes
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/journal/{}/likes", id)))
        .json(&json!({ "visitorName": " gran " }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["likeCount"], 0);
}

#[tokio::test]
async fn test_revision_increments_on_write() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/revision"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let before = body["data"]["revisionId"].as_i64().unwrap();

    fixture.create_entry("Bump").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/revision"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let after = body["data"]["revisionId"].as_i64().unwrap();
    assert!(after > before);
}

#[tokio::test]
async fn test_milestones_track_journal() {
    let fixture = TestFixture::new().await;

    // Empty journal: everything at zero
    let resp = fixture
        .client
        .get(fixture.url("/api/milestones"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    for m in body["data"].as_array().unwrap() {
        assert_eq!(m["currentValue"], 0.0);
        assert_eq!(m["progressPercentage"], 0.0);
        assert_eq!(m["completed"], false);
    }

    for i in 0..5 {
        fixture.create_entry(&format!("Trip {}", i)).await;
    }

    let resp = fixture
        .client
        .get(fixture.url("/api/milestones"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let explorer = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == "explorer")
        .unwrap();
    assert_eq!(explorer["currentValue"], 5.0);
    assert_eq!(explorer["completed"], true);
    assert_eq!(explorer["progressPercentage"], 100.0);
    assert_eq!(explorer["status"], "completed");
}

#[tokio::test]
async fn test_place_visit_upsert() {
    let fixture = TestFixture::new().await;

    // Seeded catalog is present
    let resp = fixture
        .client
        .get(fixture.url("/api/places/castles"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let castles = body["data"].as_array().unwrap();
    assert!(!castles.is_empty());
    let id = castles[0]["id"].as_str().unwrap().to_string();

    // Record a visit
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/places/castles/{}/visit", id)))
        .json(&json!({ "visitedOn": "2026-07-01", "notes": "Windy!", "recommended": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["visit"]["visitedOn"], "2026-07-01");
    assert_eq!(body["data"]["visit"]["recommended"], true);

    // Re-recording replaces, never duplicates
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/places/castles/{}/visit", id)))
        .json(&json!({ "visitedOn": "2026-07-08" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["visit"]["visitedOn"], "2026-07-08");

    // Remove the visit
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/places/castles/{}/visit", id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"]["visit"].is_null());
}

#[tokio::test]
async fn test_unknown_place_kind_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/places/volcanoes"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
async fn test_munro_completion_and_summary() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/munros"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let munros = body["data"].as_array().unwrap();
    assert!(!munros.is_empty());
    // Seeded list is ordered by height; Ben Nevis first
    assert_eq!(munros[0]["name"], "Ben Nevis");
    let id = munros[0]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/munros/{}/completion", id)))
        .json(&json!({ "climbedOn": "2026-08-01", "notes": "Clouds all the way up" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["completion"]["climbedOn"], "2026-08-01");

    let resp = fixture
        .client
        .get(fixture.url("/api/munros/summary"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["climbed"], 1);
    assert!(body["data"]["total"].as_i64().unwrap() > 1);
}

#[tokio::test]
async fn test_wishlist_votes() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/wishlist"))
        .json(&json!({ "title": "Orkney ferry trip", "priority": "high" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "idea");
    assert_eq!(body["data"]["votes"], 0);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/wishlist/{}/vote", id)))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["votes"], 1);

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/wishlist/{}", id)))
        .json(&json!({ "status": "planned" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["status"], "planned");
    assert_eq!(body["data"]["votes"], 1);
}

#[tokio::test]
async fn test_family_crud() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/family"))
        .json(&json!({ "name": "Isla", "role": "Chief Puddle Jumper" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/family/{}", id)))
        .json(&json!({ "bio": "Loves castles and ice cream" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Isla");
    assert_eq!(body["data"]["bio"], "Loves castles and ice cream");

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/family/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/family"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_photo_upload_and_delete() {
    let fixture = TestFixture::new().await;

    let form = reqwest::multipart::Form::new().part(
        "photo",
        reqwest::multipart::Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
            .file_name("beach.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/photos/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let url = body["data"]["url"].as_str().unwrap().to_string();
    assert_eq!(url, format!("/api/photos/{}", id));
    assert_eq!(body["data"]["tier"], "small");

    // Bytes round-trip
    let resp = fixture.client.get(fixture.url(&url)).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/png");
    assert_eq!(resp.bytes().await.unwrap().to_vec(), vec![0x89, 0x50, 0x4e, 0x47]);

    // Status counts it
    let resp = fixture
        .client
        .get(fixture.url("/api/photos/status"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["configured"], true);
    assert_eq!(body["data"]["photoCount"], 1);
    assert_eq!(body["data"]["totalBytes"], 4);

    // Delete
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/photos/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture.client.get(fixture.url(&url)).send().await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_photo_upload_rejects_wrong_type() {
    let fixture = TestFixture::new().await;

    let form = reqwest::multipart::Form::new().part(
        "photo",
        reqwest::multipart::Part::bytes(b"not an image".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );

    let resp = fixture
        .client
        .post(fixture.url("/api/photos/upload"))
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 415);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
}

#[tokio::test]
async fn test_photo_placeholder() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/photos/placeholder/some-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "image/svg+xml");
    assert!(resp.text().await.unwrap().starts_with("<svg"));
}

#[tokio::test]
async fn test_spin_wheel() {
    let fixture = TestFixture::new().await;
    fixture.create_entry("Before the spin").await;

    let resp = fixture
        .client
        .get(fixture.url("/api/spin"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let category = body["data"]["category"].as_str().unwrap();
    assert!(crate::api::WHEEL_CATEGORIES.contains(&category));
    let rotation = body["data"]["rotation"].as_u64().unwrap();
    assert!(rotation >= 4 * 360);

    // The envelope carries the live revision, same as every other endpoint.
    let resp = fixture
        .client
        .get(fixture.url("/api/revision"))
        .send()
        .await
        .unwrap();
    let revision: Value = resp.json().await.unwrap();
    assert_eq!(body["revisionId"], revision["data"]["revisionId"]);
    assert!(body["revisionId"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/settings"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());

    // Store, then overwrite
    let resp = fixture
        .client
        .put(fixture.url("/api/settings/theme"))
        .json(&json!({ "value": "tartan" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["key"], "theme");
    assert_eq!(body["data"]["value"], "tartan");

    let resp = fixture
        .client
        .put(fixture.url("/api/settings/theme"))
        .json(&json!({ "value": "heather" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["value"], "heather");

    let resp = fixture
        .client
        .get(fixture.url("/api/settings"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let settings = body["data"].as_array().unwrap();
    assert_eq!(settings.len(), 1);
    assert_eq!(settings[0]["value"], "heather");

    let resp = fixture
        .client
        .delete(fixture.url("/api/settings/theme"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .delete(fixture.url("/api/settings/theme"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_map_pins() {
    let fixture = TestFixture::new().await;

    // Out-of-range coordinates are rejected
    let resp = fixture
        .client
        .post(fixture.url("/api/pins"))
        .json(&json!({ "label": "Nowhere", "latitude": 123.0, "longitude": 0.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let resp = fixture
        .client
        .post(fixture.url("/api/pins"))
        .json(&json!({
            "label": "Eilean Donan",
            "latitude": 57.274,
            "longitude": -5.516,
            "kind": "castle"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["label"], "Eilean Donan");
    assert_eq!(body["data"]["kind"], "castle");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .get(fixture.url("/api/pins"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/pins/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/pins"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_gate_blocks_writes_without_session() {
    let fixture = TestFixture::with_password(Some("haggis".to_string())).await;

    // Reads stay open
    let resp = fixture
        .client
        .get(fixture.url("/api/journal"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Writes do not
    let resp = fixture
        .client
        .post(fixture.url("/api/journal"))
        .json(&json!({ "title": "Blocked", "entryDate": "2026-06-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_edit_gate_unlock_flow() {
    let fixture = TestFixture::with_password(Some("haggis".to_string())).await;

    // Wrong password
    let resp = fixture
        .client
        .post(fixture.url("/api/auth/unlock"))
        .json(&json!({ "password": "neeps" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Right password mints a token
    let resp = fixture
        .client
        .post(fixture.url("/api/auth/unlock"))
        .json(&json!({ "password": "haggis" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // Token opens the gate
    let resp = fixture
        .client
        .post(fixture.url("/api/journal"))
        .header("x-session-token", &token)
        .json(&json!({ "title": "Unlocked", "entryDate": "2026-06-01" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Session check reports validity
    let resp = fixture
        .client
        .get(fixture.url("/api/auth/session"))
        .header("x-session-token", &token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["valid"], true);
}

#[tokio::test]
async fn test_likes_open_despite_edit_gate() {
    let fixture = TestFixture::with_password(Some("haggis".to_string())).await;

    // Unlock to create an entry
    let resp = fixture
        .client
        .post(fixture.url("/api/auth/unlock"))
        .json(&json!({ "password": "haggis" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let resp = fixture
        .client
        .post(fixture.url("/api/journal"))
        .header("x-session-token", &token)
        .json(&json!({ "title": "Visited by Gran", "entryDate": "2026-06-01" }))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // A visitor can like without any session
    let resp = fixture
        .client
        .post(fixture.url(&format!("/api/journal/{}/likes", id)))
        .json(&json!({ "visitorName": "Gran" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}
