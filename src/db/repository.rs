//! Database repository for CRUD operations.
//!
//! Uses prepared statements and upserts for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateFamilyMemberRequest, CreateJournalEntryRequest, CreateMapPinRequest, CreateMunroRequest,
    CreatePlaceRequest, CreateWishlistItemRequest, FamilyMember, JournalEntry, LikeStatus, MapPin,
    MilestoneProgress, Munro, MunroCompletion, MunroSummary, Photo, Place, PlaceKind, PlaceVisit,
    RecordCompletionRequest, RecordVisitRequest, RevisionInfo, Setting, UpdateFamilyMemberRequest,
    UpdateJournalEntryRequest, UpdateWishlistItemRequest, WishPriority, WishStatus, WishlistItem,
};

const ENTRY_COLUMNS: &str = r#"id, title, content, entry_date, location, weather, mood,
       distance_miles, ticket_info, dog_friendly, tags, photo_urls,
       created_at, updated_at, version,
       (SELECT COUNT(*) FROM journal_likes WHERE entry_id = journal_entries.id) AS like_count"#;

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    // ==================== JOURNAL OPERATIONS ====================

    /// List all journal entries, newest adventure first.
    pub async fn list_entries(&self) -> Result<Vec<JournalEntry>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM journal_entries ORDER BY entry_date DESC, created_at DESC",
            ENTRY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(entry_from_row).collect())
    }

    /// Get a journal entry by ID.
    pub async fn get_entry(&self, id: &str) -> Result<Option<JournalEntry>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM journal_entries WHERE id = ?",
            ENTRY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(entry_from_row))
    }

    /// Create a new journal entry.
    pub async fn create_entry(
        &self,
        request: &CreateJournalEntryRequest,
    ) -> Result<JournalEntry, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let tags = request.tags.clone().unwrap_or_default();
        let photo_urls = request.photo_urls.clone().unwrap_or_default();
        let tags_json = serde_json::to_string(&tags).unwrap_or_default();
        let photos_json = serde_json::to_string(&photo_urls).unwrap_or_default();
        // Numeric fallback: unparsable or absent distance is recorded as 0.
        let distance = request.distance_miles.filter(|d| d.is_finite()).unwrap_or(0.0);

        sqlx::query(
            r#"INSERT INTO journal_entries (
                id, title, content, entry_date, location, weather, mood,
                distance_miles, ticket_info, dog_friendly, tags, photo_urls,
                created_at, updated_at, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 1)"#,
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.entry_date)
        .bind(&request.location)
        .bind(&request.weather)
        .bind(&request.mood)
        .bind(distance)
        .bind(&request.ticket_info)
        .bind(request.dog_friendly as i32)
        .bind(&tags_json)
        .bind(&photos_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(JournalEntry {
            id,
            title: request.title.clone(),
            content: request.content.clone(),
            entry_date: request.entry_date.clone(),
            location: request.location.clone(),
            weather: request.weather.clone(),
            mood: request.mood.clone(),
            distance_miles: distance,
            ticket_info: request.ticket_info.clone(),
            dog_friendly: request.dog_friendly,
            tags,
            photo_urls,
            like_count: 0,
            created_at: now.clone(),
            updated_at: now,
            version: 1,
        })
    }

    /// Update a journal entry with optimistic concurrency control.
    pub async fn update_entry(
        &self,
        id: &str,
        request: &UpdateJournalEntryRequest,
    ) -> Result<JournalEntry, AppError> {
        let existing = self
            .get_entry(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journal entry {} not found", id)))?;

        // Check version for optimistic concurrency
        if let Some(expected) = request.expected_version {
            if existing.version != expected {
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, existing.version
                    ),
                    current_version: existing.version,
                });
            }
        }

        let now = Utc::now().to_rfc3339();
        let new_version = existing.version + 1;

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let content = request.content.as_ref().unwrap_or(&existing.content);
        let entry_date = request.entry_date.as_ref().unwrap_or(&existing.entry_date);
        let location = request.location.clone().or(existing.location.clone());
        let weather = request.weather.clone().or(existing.weather.clone());
        let mood = request.mood.clone().or(existing.mood.clone());
        let distance = request
            .distance_miles
            .filter(|d| d.is_finite())
            .unwrap_or(existing.distance_miles);
        let ticket_info = request.ticket_info.clone().or(existing.ticket_info.clone());
        let dog_friendly = request.dog_friendly.unwrap_or(existing.dog_friendly);
        let tags = request.tags.clone().unwrap_or(existing.tags.clone());
        let photo_urls = request.photo_urls.clone().unwrap_or(existing.photo_urls.clone());
        let tags_json = serde_json::to_string(&tags).unwrap_or_default();
        let photos_json = serde_json::to_string(&photo_urls).unwrap_or_default();

        // Use conditional UPDATE with version check to prevent race conditions
        let result = sqlx::query(
            r#"UPDATE journal_entries SET
                title = ?, content = ?, entry_date = ?, location = ?, weather = ?, mood = ?,
                distance_miles = ?, ticket_info = ?, dog_friendly = ?, tags = ?, photo_urls = ?,
                updated_at = ?, version = ?
            WHERE id = ? AND version = ?"#,
        )
        .bind(title)
        .bind(content)
        .bind(entry_date)
        .bind(&location)
        .bind(&weather)
        .bind(&mood)
        .bind(distance)
        .bind(&ticket_info)
        .bind(dog_friendly as i32)
        .bind(&tags_json)
        .bind(&photos_json)
        .bind(&now)
        .bind(new_version)
        .bind(id)
        .bind(existing.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Race condition - version changed between read and write
            let current = self.get_entry(id).await?;
            return Err(AppError::Conflict {
                message: "Concurrent modification detected".to_string(),
                current_version: current.map(|e| e.version).unwrap_or(0),
            });
        }

        self.increment_revision().await?;

        Ok(JournalEntry {
            id: id.to_string(),
            title: title.clone(),
            content: content.clone(),
            entry_date: entry_date.clone(),
            location,
            weather,
            mood,
            distance_miles: distance,
            ticket_info,
            dog_friendly,
            tags,
            photo_urls,
            like_count: existing.like_count,
            created_at: existing.created_at,
            updated_at: now,
            version: new_version,
        })
    }

    /// Delete a journal entry.
    pub async fn delete_entry(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Journal entry {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    /// Toggle a visitor's like on an entry. The visitor name is the only
    /// identity there is; it is normalized so "Gran" and " gran " agree.
    pub async fn toggle_like(&self, entry_id: &str, visitor: &str) -> Result<LikeStatus, AppError> {
        let visitor = visitor.trim().to_lowercase();
        if visitor.is_empty() {
            return Err(AppError::Validation("Visitor name is required".to_string()));
        }

        self.get_entry(entry_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Journal entry {} not found", entry_id)))?;

        let existing = sqlx::query(
            "SELECT 1 AS present FROM journal_likes WHERE entry_id = ? AND visitor = ?",
        )
        .bind(entry_id)
        .bind(&visitor)
        .fetch_optional(&self.pool)
        .await?;

        let liked = if existing.is_some() {
            sqlx::query("DELETE FROM journal_likes WHERE entry_id = ? AND visitor = ?")
                .bind(entry_id)
                .bind(&visitor)
                .execute(&self.pool)
                .await?;
            false
        } else {
            let now = Utc::now().to_rfc3339();
            sqlx::query("INSERT INTO journal_likes (entry_id, visitor, created_at) VALUES (?, ?, ?)")
                .bind(entry_id)
                .bind(&visitor)
                .bind(&now)
                .execute(&self.pool)
                .await?;
            true
        };

        let row = sqlx::query("SELECT COUNT(*) AS n FROM journal_likes WHERE entry_id = ?")
            .bind(entry_id)
            .fetch_one(&self.pool)
            .await?;

        self.increment_revision().await?;

        Ok(LikeStatus {
            like_count: row.get("n"),
            liked,
        })
    }

    // ==================== PLACE OPERATIONS ====================

    /// List catalog places of one kind with their visits.
    pub async fn list_places(&self, kind: PlaceKind) -> Result<Vec<Place>, AppError> {
        let rows = sqlx::query(
            r#"SELECT p.id, p.kind, p.name, p.region, p.description, p.latitude, p.longitude,
                      p.created_at, v.visited_on, v.notes, v.recommended, v.updated_at
               FROM places p LEFT JOIN place_visits v ON v.place_id = p.id
               WHERE p.kind = ? ORDER BY p.name"#,
        )
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(place_from_row).collect())
    }

    /// Get a place by ID, constrained to a kind.
    pub async fn get_place(&self, kind: PlaceKind, id: &str) -> Result<Option<Place>, AppError> {
        let row = sqlx::query(
            r#"SELECT p.id, p.kind, p.name, p.region, p.description, p.latitude, p.longitude,
                      p.created_at, v.visited_on, v.notes, v.recommended, v.updated_at
               FROM places p LEFT JOIN place_visits v ON v.place_id = p.id
               WHERE p.id = ? AND p.kind = ?"#,
        )
        .bind(id)
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(place_from_row))
    }

    /// Add a place to the catalog.
    pub async fn create_place(
        &self,
        kind: PlaceKind,
        request: &CreatePlaceRequest,
    ) -> Result<Place, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO places (id, kind, name, region, description, latitude, longitude, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(kind.as_str())
        .bind(&request.name)
        .bind(&request.region)
        .bind(&request.description)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Place {
            id,
            kind,
            name: request.name.clone(),
            region: request.region.clone(),
            description: request.description.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            created_at: now,
            visit: None,
        })
    }

    /// Record a visit for a place. One visit per place; re-recording replaces it.
    pub async fn upsert_visit(
        &self,
        kind: PlaceKind,
        place_id: &str,
        request: &RecordVisitRequest,
    ) -> Result<Place, AppError> {
        self.get_place(kind, place_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} {} not found", kind.as_str(), place_id))
        })?;

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO place_visits (place_id, visited_on, notes, recommended, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(place_id) DO UPDATE SET
                   visited_on = excluded.visited_on,
                   notes = excluded.notes,
                   recommended = excluded.recommended,
                   updated_at = excluded.updated_at"#,
        )
        .bind(place_id)
        .bind(&request.visited_on)
        .bind(&request.notes)
        .bind(request.recommended as i32)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        // Re-read so the response carries the stored visit.
        self.get_place(kind, place_id).await?.ok_or_else(|| {
            AppError::Internal(format!("Place {} vanished during visit upsert", place_id))
        })
    }

    /// Remove the visit record for a place.
    pub async fn delete_visit(&self, kind: PlaceKind, place_id: &str) -> Result<Place, AppError> {
        let place = self.get_place(kind, place_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("{} {} not found", kind.as_str(), place_id))
        })?;

        let result = sqlx::query("DELETE FROM place_visits WHERE place_id = ?")
            .bind(place_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No visit recorded for {} {}",
                kind.as_str(),
                place_id
            )));
        }

        self.increment_revision().await?;

        Ok(Place {
            visit: None,
            ..place
        })
    }

    // ==================== MUNRO OPERATIONS ====================

    /// List the Munro catalog with completion records.
    pub async fn list_munros(&self) -> Result<Vec<Munro>, AppError> {
        let rows = sqlx::query(
            r#"SELECT m.id, m.name, m.height_m, m.region, m.difficulty, m.latitude, m.longitude,
                      c.climbed_on, c.notes, c.updated_at
               FROM munros m LEFT JOIN munro_completions c ON c.munro_id = m.id
               ORDER BY m.height_m DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(munro_from_row).collect())
    }

    /// Get a Munro by ID.
    pub async fn get_munro(&self, id: &str) -> Result<Option<Munro>, AppError> {
        let row = sqlx::query(
            r#"SELECT m.id, m.name, m.height_m, m.region, m.difficulty, m.latitude, m.longitude,
                      c.climbed_on, c.notes, c.updated_at
               FROM munros m LEFT JOIN munro_completions c ON c.munro_id = m.id
               WHERE m.id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(munro_from_row))
    }

    /// Add a Munro to the catalog (used to import the full list of 282).
    pub async fn create_munro(&self, request: &CreateMunroRequest) -> Result<Munro, AppError> {
        let id = uuid::Uuid::new_v4().to_string();

        sqlx::query(
            "INSERT INTO munros (id, name, height_m, region, difficulty, latitude, longitude) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(request.height_m)
        .bind(&request.region)
        .bind(request.difficulty)
        .bind(request.latitude)
        .bind(request.longitude)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Munro {
            id,
            name: request.name.clone(),
            height_m: request.height_m,
            region: request.region.clone(),
            difficulty: request.difficulty,
            latitude: request.latitude,
            longitude: request.longitude,
            completion: None,
        })
    }

    /// Record a completed climb. One completion per peak; re-recording replaces it.
    pub async fn upsert_completion(
        &self,
        munro_id: &str,
        request: &RecordCompletionRequest,
    ) -> Result<Munro, AppError> {
        self.get_munro(munro_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Munro {} not found", munro_id)))?;

        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO munro_completions (munro_id, climbed_on, notes, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(munro_id) DO UPDATE SET
                   climbed_on = excluded.climbed_on,
                   notes = excluded.notes,
                   updated_at = excluded.updated_at"#,
        )
        .bind(munro_id)
        .bind(&request.climbed_on)
        .bind(&request.notes)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        self.get_munro(munro_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Munro {} vanished during upsert", munro_id)))
    }

    /// Remove a completion record.
    pub async fn delete_completion(&self, munro_id: &str) -> Result<Munro, AppError> {
        let munro = self
            .get_munro(munro_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Munro {} not found", munro_id)))?;

        let result = sqlx::query("DELETE FROM munro_completions WHERE munro_id = ?")
            .bind(munro_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "No completion recorded for Munro {}",
                munro_id
            )));
        }

        self.increment_revision().await?;

        Ok(Munro {
            completion: None,
            ..munro
        })
    }

    /// Bagging progress across the catalog.
    pub async fn munro_summary(&self) -> Result<MunroSummary, AppError> {
        let row = sqlx::query(
            "SELECT (SELECT COUNT(*) FROM munros) AS total, (SELECT COUNT(*) FROM munro_completions) AS climbed",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(MunroSummary {
            total: row.get("total"),
            climbed: row.get("climbed"),
        })
    }

    // ==================== WISHLIST OPERATIONS ====================

    /// List wishlist items, most voted first.
    pub async fn list_wishlist(&self) -> Result<Vec<WishlistItem>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, notes, priority, status, votes, created_at, updated_at, version FROM wishlist_items ORDER BY votes DESC, created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(wishlist_from_row).collect())
    }

    /// Get a wishlist item by ID.
    pub async fn get_wishlist_item(&self, id: &str) -> Result<Option<WishlistItem>, AppError> {
        let row = sqlx::query(
            "SELECT id, title, notes, priority, status, votes, created_at, updated_at, version FROM wishlist_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(wishlist_from_row))
    }

    /// Create a new wishlist item.
    pub async fn create_wishlist_item(
        &self,
        request: &CreateWishlistItemRequest,
    ) -> Result<WishlistItem, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO wishlist_items (id, title, notes, priority, status, votes, created_at, updated_at, version) VALUES (?, ?, ?, ?, ?, 0, ?, ?, 1)",
        )
        .bind(&id)
        .bind(&request.title)
        .bind(&request.notes)
        .bind(request.priority.as_str())
        .bind(request.status.as_str())
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(WishlistItem {
            id,
            title: request.title.clone(),
            notes: request.notes.clone(),
            priority: request.priority,
            status: request.status,
            votes: 0,
            created_at: now.clone(),
            updated_at: now,
            version: 1,
        })
    }

    /// Update a wishlist item with optimistic concurrency control.
    pub async fn update_wishlist_item(
        &self,
        id: &str,
        request: &UpdateWishlistItemRequest,
    ) -> Result<WishlistItem, AppError> {
        let existing = self
            .get_wishlist_item(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Wishlist item {} not found", id)))?;

        if let Some(expected) = request.expected_version {
            if existing.version != expected {
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, existing.version
                    ),
                    current_version: existing.version,
                });
            }
        }

        let now = Utc::now().to_rfc3339();
        let new_version = existing.version + 1;

        let title = request.title.as_ref().unwrap_or(&existing.title);
        let notes = request.notes.clone().or(existing.notes.clone());
        let priority = request.priority.unwrap_or(existing.priority);
        let status = request.status.unwrap_or(existing.status);

        let result = sqlx::query(
            "UPDATE wishlist_items SET title = ?, notes = ?, priority = ?, status = ?, updated_at = ?, version = ? WHERE id = ? AND version = ?",
        )
        .bind(title)
        .bind(&notes)
        .bind(priority.as_str())
        .bind(status.as_str())
        .bind(&now)
        .bind(new_version)
        .bind(id)
        .bind(existing.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current = self.get_wishlist_item(id).await?;
            return Err(AppError::Conflict {
                message: "Concurrent modification detected".to_string(),
                current_version: current.map(|i| i.version).unwrap_or(0),
            });
        }

        self.increment_revision().await?;

        Ok(WishlistItem {
            id: id.to_string(),
            title: title.clone(),
            notes,
            priority,
            status,
            votes: existing.votes,
            created_at: existing.created_at,
            updated_at: now,
            version: new_version,
        })
    }

    /// Delete a wishlist item.
    pub async fn delete_wishlist_item(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM wishlist_items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Wishlist item {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    /// Add one vote to a wishlist item.
    pub async fn vote_wishlist_item(&self, id: &str) -> Result<WishlistItem, AppError> {
        let now = Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE wishlist_items SET votes = votes + 1, updated_at = ? WHERE id = ?",
        )
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Wishlist item {} not found", id)));
        }

        self.increment_revision().await?;

        self.get_wishlist_item(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Wishlist item {} vanished during vote", id)))
    }

    // ==================== FAMILY MEMBER OPERATIONS ====================

    /// List all family members.
    pub async fn list_family(&self) -> Result<Vec<FamilyMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, role, avatar_url, bio, updated_at, version FROM family_members ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(family_from_row).collect())
    }

    /// Get a family member by ID.
    pub async fn get_family_member(&self, id: &str) -> Result<Option<FamilyMember>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, role, avatar_url, bio, updated_at, version FROM family_members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(family_from_row))
    }

    /// Create a new family member.
    pub async fn create_family_member(
        &self,
        request: &CreateFamilyMemberRequest,
    ) -> Result<FamilyMember, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO family_members (id, name, role, avatar_url, bio, updated_at, version) VALUES (?, ?, ?, ?, ?, ?, 1)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.role)
        .bind(&request.avatar_url)
        .bind(&request.bio)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(FamilyMember {
            id,
            name: request.name.clone(),
            role: request.role.clone(),
            avatar_url: request.avatar_url.clone(),
            bio: request.bio.clone(),
            updated_at: now,
            version: 1,
        })
    }

    /// Update a family member with optimistic concurrency control.
    pub async fn update_family_member(
        &self,
        id: &str,
        request: &UpdateFamilyMemberRequest,
    ) -> Result<FamilyMember, AppError> {
        let existing = self
            .get_family_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Family member {} not found", id)))?;

        if let Some(expected) = request.expected_version {
            if existing.version != expected {
                return Err(AppError::Conflict {
                    message: format!(
                        "Version mismatch: expected {}, current {}",
                        expected, existing.version
                    ),
                    current_version: existing.version,
                });
            }
        }

        let now = Utc::now().to_rfc3339();
        let new_version = existing.version + 1;

        let name = request.name.as_ref().unwrap_or(&existing.name);
        let role = request.role.clone().or(existing.role.clone());
        let avatar_url = request.avatar_url.clone().or(existing.avatar_url.clone());
        let bio = request.bio.clone().or(existing.bio.clone());

        let result = sqlx::query(
            "UPDATE family_members SET name = ?, role = ?, avatar_url = ?, bio = ?, updated_at = ?, version = ? WHERE id = ? AND version = ?",
        )
        .bind(name)
        .bind(&role)
        .bind(&avatar_url)
        .bind(&bio)
        .bind(&now)
        .bind(new_version)
        .bind(id)
        .bind(existing.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let current = self.get_family_member(id).await?;
            return Err(AppError::Conflict {
                message: "Concurrent modification detected".to_string(),
                current_version: current.map(|m| m.version).unwrap_or(0),
            });
        }

        self.increment_revision().await?;

        Ok(FamilyMember {
            id: id.to_string(),
            name: name.clone(),
            role,
            avatar_url,
            bio,
            updated_at: now,
            version: new_version,
        })
    }

    /// Delete a family member.
    pub async fn delete_family_member(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM family_members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Family member {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    // ==================== PHOTO OPERATIONS ====================

    /// Record metadata for a stored photo.
    pub async fn insert_photo(
        &self,
        id: &str,
        file_name: &str,
        original_name: Option<&str>,
        content_type: &str,
        size_bytes: i64,
        tier: &str,
        url: &str,
    ) -> Result<Photo, AppError> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO photos (id, file_name, original_name, content_type, size_bytes, tier, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(file_name)
        .bind(original_name)
        .bind(content_type)
        .bind(size_bytes)
        .bind(tier)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Photo {
            id: id.to_string(),
            url: url.to_string(),
            original_name: original_name.map(|s| s.to_string()),
            content_type: content_type.to_string(),
            size_bytes,
            tier: tier.to_string(),
            created_at: now,
        })
    }

    /// Raw photo metadata: (file_name, content_type) for serving bytes.
    pub async fn get_photo_file(&self, id: &str) -> Result<Option<(String, String)>, AppError> {
        let row = sqlx::query("SELECT file_name, content_type FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| (r.get("file_name"), r.get("content_type"))))
    }

    /// List stored photos, newest first. `url_for` builds the public URL.
    pub async fn list_photos(
        &self,
        url_for: impl Fn(&str) -> String,
    ) -> Result<Vec<Photo>, AppError> {
        let rows = sqlx::query(
            "SELECT id, file_name, original_name, content_type, size_bytes, tier, created_at FROM photos ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let id: String = row.get("id");
                Photo {
                    url: url_for(&id),
                    id,
                    original_name: row.get("original_name"),
                    content_type: row.get("content_type"),
                    size_bytes: row.get("size_bytes"),
                    tier: row.get("tier"),
                    created_at: row.get("created_at"),
                }
            })
            .collect())
    }

    /// Delete a photo's metadata row; returns its file name for disk cleanup.
    pub async fn delete_photo(&self, id: &str) -> Result<String, AppError> {
        let row = sqlx::query("SELECT file_name FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Photo {} not found", id)))?;

        let file_name: String = row.get("file_name");

        sqlx::query("DELETE FROM photos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.increment_revision().await?;
        Ok(file_name)
    }

    /// Photo count and total stored bytes.
    pub async fn photo_stats(&self) -> Result<(i64, i64), AppError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n, COALESCE(SUM(size_bytes), 0) AS total FROM photos",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok((row.get("n"), row.get("total")))
    }

    // ==================== APP SETTINGS ====================

    /// List all stored settings.
    pub async fn list_settings(&self) -> Result<Vec<Setting>, AppError> {
        let rows = sqlx::query("SELECT key, value, updated_at FROM app_settings ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(setting_from_row).collect())
    }

    /// Store a setting value, replacing any previous one.
    pub async fn upsert_setting(&self, key: &str, value: &str) -> Result<Setting, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            r#"INSERT INTO app_settings (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET
                   value = excluded.value,
                   updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(Setting {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: now,
        })
    }

    /// Remove a stored setting.
    pub async fn delete_setting(&self, key: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM app_settings WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Setting {} not found", key)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    // ==================== MAP PIN OPERATIONS ====================

    /// List all map pins, newest first.
    pub async fn list_pins(&self) -> Result<Vec<MapPin>, AppError> {
        let rows = sqlx::query(
            "SELECT id, label, latitude, longitude, kind, entry_id, created_at FROM map_pins ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(pin_from_row).collect())
    }

    /// Drop a new pin on the map.
    pub async fn create_pin(&self, request: &CreateMapPinRequest) -> Result<MapPin, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO map_pins (id, label, latitude, longitude, kind, entry_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.label)
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(&request.kind)
        .bind(&request.entry_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(MapPin {
            id,
            label: request.label.clone(),
            latitude: request.latitude,
            longitude: request.longitude,
            kind: request.kind.clone(),
            entry_id: request.entry_id.clone(),
            created_at: now,
        })
    }

    /// Remove a map pin.
    pub async fn delete_pin(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM map_pins WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Map pin {} not found", id)));
        }

        self.increment_revision().await?;
        Ok(())
    }

    // ==================== MILESTONE PROGRESS ====================

    /// Persist recomputed milestone progress. Plain upsert per row; invoked as
    /// a side effect of journal mutations.
    pub async fn upsert_milestone_progress(
        &self,
        progress: &[MilestoneProgress],
    ) -> Result<(), AppError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        for p in progress {
            sqlx::query(
                r#"INSERT INTO milestone_progress (milestone_id, current_value, completed, updated_at)
                   VALUES (?, ?, ?, ?)
                   ON CONFLICT(milestone_id) DO UPDATE SET
                       current_value = excluded.current_value,
                       completed = excluded.completed,
                       updated_at = excluded.updated_at"#,
            )
            .bind(&p.id)
            .bind(p.current_value)
            .bind(p.completed as i32)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

// Helper functions for row conversion

fn entry_from_row(row: &sqlx::sqlite::SqliteRow) -> JournalEntry {
    let dog_friendly: i32 = row.get("dog_friendly");
    let tags_str: Option<String> = row.get("tags");
    let photos_str: Option<String> = row.get("photo_urls");

    JournalEntry {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        entry_date: row.get("entry_date"),
        location: row.get("location"),
        weather: row.get("weather"),
        mood: row.get("mood"),
        distance_miles: row.get("distance_miles"),
        ticket_info: row.get("ticket_info"),
        dog_friendly: dog_friendly != 0,
        tags: tags_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        photo_urls: photos_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        like_count: row.get("like_count"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    }
}

fn place_from_row(row: &sqlx::sqlite::SqliteRow) -> Place {
    let kind_str: String = row.get("kind");
    let visited_on: Option<String> = row.get("visited_on");

    let visit = visited_on.map(|visited_on| {
        let recommended: i32 = row.get("recommended");
        PlaceVisit {
            visited_on,
            notes: row.get("notes"),
            recommended: recommended != 0,
            updated_at: row.get("updated_at"),
        }
    });

    Place {
        id: row.get("id"),
        kind: PlaceKind::from_str(&kind_str).unwrap_or(PlaceKind::HiddenGem),
        name: row.get("name"),
        region: row.get("region"),
        description: row.get("description"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        created_at: row.get("created_at"),
        visit,
    }
}

fn munro_from_row(row: &sqlx::sqlite::SqliteRow) -> Munro {
    let climbed_on: Option<String> = row.get("climbed_on");

    let completion = climbed_on.map(|climbed_on| MunroCompletion {
        climbed_on,
        notes: row.get("notes"),
        updated_at: row.get("updated_at"),
    });

    Munro {
        id: row.get("id"),
        name: row.get("name"),
        height_m: row.get("height_m"),
        region: row.get("region"),
        difficulty: row.get("difficulty"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        completion,
    }
}

fn wishlist_from_row(row: &sqlx::sqlite::SqliteRow) -> WishlistItem {
    let priority_str: String = row.get("priority");
    let status_str: String = row.get("status");

    WishlistItem {
        id: row.get("id"),
        title: row.get("title"),
        notes: row.get("notes"),
        priority: WishPriority::from_str(&priority_str).unwrap_or(WishPriority::Medium),
        status: WishStatus::from_str(&status_str).unwrap_or(WishStatus::Idea),
        votes: row.get("votes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    }
}

fn family_from_row(row: &sqlx::sqlite::SqliteRow) -> FamilyMember {
    FamilyMember {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        avatar_url: row.get("avatar_url"),
        bio: row.get("bio"),
        updated_at: row.get("updated_at"),
        version: row.get("version"),
    }
}

fn setting_from_row(row: &sqlx::sqlite::SqliteRow) -> Setting {
    Setting {
        key: row.get("key"),
        value: row.get("value"),
        updated_at: row.get("updated_at"),
    }
}

fn pin_from_row(row: &sqlx::sqlite::SqliteRow) -> MapPin {
    MapPin {
        id: row.get("id"),
        label: row.get("label"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        kind: row.get("kind"),
        entry_id: row.get("entry_id"),
        created_at: row.get("created_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
