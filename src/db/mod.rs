//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for all application data.

mod repository;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Create tables if they don't exist
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS meta (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            schema_version INTEGER NOT NULL DEFAULT 1,
            revision_id INTEGER NOT NULL DEFAULT 0,
            generated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        INSERT OR IGNORE INTO meta (id, schema_version, revision_id, generated_at)
        VALUES (1, 1, 0, datetime('now'));
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL DEFAULT '',
            entry_date TEXT NOT NULL,
            location TEXT,
            weather TEXT,
            mood TEXT,
            distance_miles REAL NOT NULL DEFAULT 0,
            ticket_info TEXT,
            dog_friendly INTEGER NOT NULL DEFAULT 0,
            tags TEXT,
            photo_urls TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS journal_likes (
            entry_id TEXT NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
            visitor TEXT NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (entry_id, visitor)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS places (
            id TEXT PRIMARY KEY,
            kind TEXT NOT NULL,
            name TEXT NOT NULL,
            region TEXT,
            description TEXT,
            latitude REAL,
            longitude REAL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS place_visits (
            place_id TEXT PRIMARY KEY REFERENCES places(id) ON DELETE CASCADE,
            visited_on TEXT NOT NULL,
            notes TEXT,
            recommended INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS munros (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            height_m REAL NOT NULL,
            region TEXT NOT NULL,
            difficulty INTEGER NOT NULL DEFAULT 1,
            latitude REAL,
            longitude REAL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS munro_completions (
            munro_id TEXT PRIMARY KEY REFERENCES munros(id) ON DELETE CASCADE,
            climbed_on TEXT NOT NULL,
            notes TEXT,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS wishlist_items (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            notes TEXT,
            priority TEXT NOT NULL DEFAULT 'medium',
            status TEXT NOT NULL DEFAULT 'idea',
            votes INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS family_members (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            role TEXT,
            avatar_url TEXT,
            bio TEXT,
            updated_at TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id TEXT PRIMARY KEY,
            file_name TEXT NOT NULL,
            original_name TEXT,
            content_type TEXT NOT NULL,
            size_bytes INTEGER NOT NULL,
            tier TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS app_settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS map_pins (
            id TEXT PRIMARY KEY,
            label TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            kind TEXT,
            entry_id TEXT,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS milestone_progress (
            milestone_id TEXT PRIMARY KEY,
            current_value REAL NOT NULL DEFAULT 0,
            completed INTEGER NOT NULL DEFAULT 0,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_journal_entry_date ON journal_entries(entry_date);
        CREATE INDEX IF NOT EXISTS idx_journal_updated_at ON journal_entries(updated_at);
        CREATE INDEX IF NOT EXISTS idx_places_kind ON places(kind);
        CREATE INDEX IF NOT EXISTS idx_munros_region ON munros(region);
        CREATE INDEX IF NOT EXISTS idx_wishlist_status ON wishlist_items(status);
        "#,
    )
    .execute(pool)
    .await?;

    seed_catalogs(pool).await?;

    Ok(())
}

/// Seed starter catalog rows. Idempotent; the full Munro list and more places
/// come in through the catalog create endpoints.
async fn seed_catalogs(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let places: &[(&str, &str, &str, &str)] = &[
        ("seed-edinburgh-castle", "castle", "Edinburgh Castle", "Lothian"),
        ("seed-stirling-castle", "castle", "Stirling Castle", "Stirlingshire"),
        ("seed-eilean-donan", "castle", "Eilean Donan Castle", "Highlands"),
        ("seed-dunnottar-castle", "castle", "Dunnottar Castle", "Aberdeenshire"),
        ("seed-loch-ness", "loch", "Loch Ness", "Highlands"),
        ("seed-loch-lomond", "loch", "Loch Lomond", "Argyll"),
        ("seed-loch-katrine", "loch", "Loch Katrine", "Trossachs"),
        ("seed-fairy-pools", "hidden-gem", "Fairy Pools", "Isle of Skye"),
        ("seed-finnich-glen", "hidden-gem", "Finnich Glen", "Stirlingshire"),
        ("seed-st-abbs", "hidden-gem", "St Abbs Head", "Borders"),
    ];

    for (id, kind, name, region) in places {
        sqlx::query(
            "INSERT OR IGNORE INTO places (id, kind, name, region, created_at) VALUES (?, ?, ?, ?, datetime('now'))",
        )
        .bind(id)
        .bind(kind)
        .bind(name)
        .bind(region)
        .execute(pool)
        .await?;
    }

    let munros: &[(&str, &str, f64, &str, i32)] = &[
        ("seed-ben-nevis", "Ben Nevis", 1345.0, "Lochaber", 3),
        ("seed-ben-macdui", "Ben Macdui", 1309.0, "Cairngorms", 3),
        ("seed-braeriach", "Braeriach", 1296.0, "Cairngorms", 4),
        ("seed-cairn-gorm", "Cairn Gorm", 1245.0, "Cairngorms", 2),
        ("seed-ben-lawers", "Ben Lawers", 1214.0, "Perthshire", 2),
        ("seed-ben-more", "Ben More", 1174.0, "Crianlarich", 3),
        ("seed-ben-lomond", "Ben Lomond", 974.0, "Loch Lomond", 1),
        ("seed-schiehallion", "Schiehallion", 1083.0, "Perthshire", 2),
        ("seed-buachaille-etive-mor", "Buachaille Etive Mor", 1022.0, "Glen Coe", 4),
        ("seed-ben-vorlich", "Ben Vorlich", 985.0, "Loch Earn", 2),
        ("seed-cairn-toul", "Cairn Toul", 1291.0, "Cairngorms", 4),
        ("seed-sgurr-alasdair", "Sgurr Alasdair", 992.0, "Isle of Skye", 5),
    ];

    for (id, name, height_m, region, difficulty) in munros {
        sqlx::query(
            "INSERT OR IGNORE INTO munros (id, name, height_m, region, difficulty) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(height_m)
        .bind(region)
        .bind(difficulty)
        .execute(pool)
        .await?;
    }

    Ok(())
}
