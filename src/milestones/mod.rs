//! Milestone engine.
//!
//! Derives gamification progress from the full journal-entry list. The
//! achievement catalog is fixed in code; persisted progress rows are refreshed
//! as a side effect of journal mutations and this module stays pure.

use std::collections::HashSet;

use crate::models::{JournalEntry, MilestoneProgress, MilestoneStatus};

/// How a template's current value is derived from the entry list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    /// Total number of entries.
    EntryCount,
    /// Sum of miles traveled.
    DistanceSum,
    /// Number of distinct locations (case- and trim-insensitive).
    UniqueLocations,
    /// Number of distinct weather descriptions.
    UniqueWeather,
    /// Number of distinct tags.
    UniqueTags,
    /// Total number of attached photos.
    PhotoCount,
    /// Entries whose title, content or tags mention the keyword.
    Keyword(&'static str),
    /// Entries flagged dog-friendly.
    DogFriendlyCount,
}

/// A fixed achievement definition.
#[derive(Debug, Clone, Copy)]
pub struct MilestoneTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub target_value: i64,
    pub xp_reward: i64,
    pub aggregation: Aggregation,
    /// Tiered track membership: (track name, tier). Tier N is locked until
    /// tier N-1 of the same track completes.
    pub track: Option<(&'static str, u32)>,
}

/// The achievement catalog.
pub const TEMPLATES: &[MilestoneTemplate] = &[
    MilestoneTemplate {
        id: "first-steps",
        title: "First Steps",
        description: "Record your first adventure",
        target_value: 1,
        xp_reward: 50,
        aggregation: Aggregation::EntryCount,
        track: Some(("adventures", 1)),
    },
    MilestoneTemplate {
        id: "explorer",
        title: "Explorer",
        description: "Record 5 adventures",
        target_value: 5,
        xp_reward: 100,
        aggregation: Aggregation::EntryCount,
        track: Some(("adventures", 2)),
    },
    MilestoneTemplate {
        id: "adventurer",
        title: "Adventurer",
        description: "Record 15 adventures",
        target_value: 15,
        xp_reward: 250,
        aggregation: Aggregation::EntryCount,
        track: Some(("adventures", 3)),
    },
    MilestoneTemplate {
        id: "wanderer",
        title: "Wanderer",
        description: "Record 30 adventures",
        target_value: 30,
        xp_reward: 500,
        aggregation: Aggregation::EntryCount,
        track: Some(("adventures", 4)),
    },
    MilestoneTemplate {
        id: "photo-collector",
        title: "Photo Collector",
        description: "Attach 25 photos to your journal",
        target_value: 25,
        xp_reward: 150,
        aggregation: Aggregation::PhotoCount,
        track: Some(("photos", 1)),
    },
    MilestoneTemplate {
        id: "shutterbug",
        title: "Shutterbug",
        description: "Attach 100 photos to your journal",
        target_value: 100,
        xp_reward: 400,
        aggregation: Aggregation::PhotoCount,
        track: Some(("photos", 2)),
    },
    MilestoneTemplate {
        id: "map-maker",
        title: "Map Maker",
        description: "Visit 10 different places",
        target_value: 10,
        xp_reward: 200,
        aggregation: Aggregation::UniqueLocations,
        track: None,
    },
    MilestoneTemplate {
        id: "weather-watcher",
        title: "Weather Watcher",
        description: "Adventure through 5 kinds of weather",
        target_value: 5,
        xp_reward: 100,
        aggregation: Aggregation::UniqueWeather,
        track: None,
    },
    MilestoneTemplate {
        id: "tag-collector",
        title: "Tag Collector",
        description: "Use 15 different tags",
        target_value: 15,
        xp_reward: 150,
        aggregation: Aggregation::UniqueTags,
        track: None,
    },
    MilestoneTemplate {
        id: "road-warrior",
        title: "Road Warrior",
        description: "Travel 100 miles on adventures",
        target_value: 100,
        xp_reward: 200,
        aggregation: Aggregation::DistanceSum,
        track: None,
    },
    MilestoneTemplate {
        id: "castle-seeker",
        title: "Castle Seeker",
        description: "Record 5 castle adventures",
        target_value: 5,
        xp_reward: 150,
        aggregation: Aggregation::Keyword("castle"),
        track: None,
    },
    MilestoneTemplate {
        id: "munro-bagger",
        title: "Munro Bagger",
        description: "Record 5 Munro adventures",
        target_value: 5,
        xp_reward: 200,
        aggregation: Aggregation::Keyword("munro"),
        track: None,
    },
    MilestoneTemplate {
        id: "loch-explorer",
        title: "Loch Explorer",
        description: "Record 5 loch adventures",
        target_value: 5,
        xp_reward: 150,
        aggregation: Aggregation::Keyword("loch"),
        track: None,
    },
    MilestoneTemplate {
        id: "dog-days",
        title: "Dog Days",
        description: "Take the dog on 5 adventures",
        target_value: 5,
        xp_reward: 100,
        aggregation: Aggregation::DogFriendlyCount,
        track: None,
    },
];

/// Normalize a free-text value for uniqueness counting.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Count of distinct normalized values, ignoring empties.
fn unique_count<'a, I>(values: I) -> usize
where
    I: Iterator<Item = &'a str>,
{
    let set: HashSet<String> = values
        .map(normalize)
        .filter(|v| !v.is_empty())
        .collect();
    set.len()
}

/// Entries whose title, content or tags contain the keyword.
fn keyword_count(entries: &[JournalEntry], keyword: &str) -> usize {
    entries
        .iter()
        .filter(|e| {
            let haystack = format!("{} {} {}", e.title, e.content, e.tags.join(" ")).to_lowercase();
            haystack.contains(keyword)
        })
        .count()
}

/// Current value for one template.
fn current_value(template: &MilestoneTemplate, entries: &[JournalEntry]) -> f64 {
    match template.aggregation {
        Aggregation::EntryCount => entries.len() as f64,
        Aggregation::DistanceSum => entries.iter().map(|e| e.distance_miles).sum(),
        Aggregation::UniqueLocations => {
            unique_count(entries.iter().filter_map(|e| e.location.as_deref())) as f64
        }
        Aggregation::UniqueWeather => {
            unique_count(entries.iter().filter_map(|e| e.weather.as_deref())) as f64
        }
        Aggregation::UniqueTags => {
            unique_count(entries.iter().flat_map(|e| e.tags.iter().map(|t| t.as_str()))) as f64
        }
        Aggregation::PhotoCount => entries.iter().map(|e| e.photo_urls.len()).sum::<usize>() as f64,
        Aggregation::Keyword(keyword) => keyword_count(entries, keyword) as f64,
        Aggregation::DogFriendlyCount => entries.iter().filter(|e| e.dog_friendly).count() as f64,
    }
}

/// Compute progress for every catalog template from the full entry list.
pub fn compute_progress(entries: &[JournalEntry]) -> Vec<MilestoneProgress> {
    progress_for_templates(TEMPLATES, entries)
}

/// Compute progress for an arbitrary template list.
pub fn progress_for_templates(
    templates: &[MilestoneTemplate],
    entries: &[JournalEntry],
) -> Vec<MilestoneProgress> {
    // First pass: raw values and completion per template.
    let computed: Vec<(MilestoneTemplate, f64, bool)> = templates
        .iter()
        .map(|t| {
            let current = current_value(t, entries);
            // Guard: a template with target <= 0 can never complete and
            // reports 0% rather than dividing by zero.
            let completed = t.target_value > 0 && current >= t.target_value as f64;
            (*t, current, completed)
        })
        .collect();

    computed
        .iter()
        .map(|(t, current, completed)| {
            let percentage = if t.target_value > 0 {
                (current / t.target_value as f64 * 100.0).min(100.0)
            } else {
                0.0
            };

            let status = if *completed {
                MilestoneStatus::Completed
            } else if is_locked(t, &computed) {
                MilestoneStatus::Locked
            } else if *current > 0.0 {
                MilestoneStatus::InProgress
            } else {
                MilestoneStatus::Available
            };

            MilestoneProgress {
                id: t.id.to_string(),
                title: t.title.to_string(),
                description: t.description.to_string(),
                target_value: t.target_value,
                xp_reward: t.xp_reward,
                current_value: *current,
                completed: *completed,
                progress_percentage: percentage,
                status,
            }
        })
        .collect()
}

/// A tiered milestone is locked until the previous tier of its track completes.
fn is_locked(template: &MilestoneTemplate, computed: &[(MilestoneTemplate, f64, bool)]) -> bool {
    let Some((track, tier)) = template.track else {
        return false;
    };
    if tier <= 1 {
        return false;
    }
    !computed
        .iter()
        .any(|(t, _, completed)| t.track == Some((track, tier - 1)) && *completed)
}

/// Validate the catalog at startup; logs a warning for any zero-target template.
pub fn validate_catalog() {
    for t in TEMPLATES {
        if t.target_value <= 0 {
            tracing::warn!(
                "Milestone {} has non-positive target {}; it will never complete",
                t.id,
                t.target_value
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, location: Option<&str>) -> JournalEntry {
        JournalEntry {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            content: String::new(),
            entry_date: "2026-05-01".to_string(),
            location: location.map(|s| s.to_string()),
            weather: None,
            mood: None,
            distance_miles: 0.0,
            ticket_info: None,
            dog_friendly: false,
            tags: Vec::new(),
            photo_urls: Vec::new(),
            like_count: 0,
            created_at: "2026-05-01T00:00:00Z".to_string(),
            updated_at: "2026-05-01T00:00:00Z".to_string(),
            version: 1,
        }
    }

    fn progress_for<'a>(all: &'a [MilestoneProgress], id: &str) -> &'a MilestoneProgress {
        all.iter().find(|p| p.id == id).unwrap()
    }

    #[test]
    fn test_empty_entries_all_zero() {
        let progress = compute_progress(&[]);
        assert_eq!(progress.len(), TEMPLATES.len());
        for p in &progress {
            assert_eq!(p.current_value, 0.0);
            assert_eq!(p.progress_percentage, 0.0);
            assert!(!p.completed);
        }
    }

    #[test]
    fn test_target_reached_is_completed_at_100() {
        let entries: Vec<JournalEntry> = (0..5).map(|i| entry(&format!("Trip {}", i), None)).collect();
        let progress = compute_progress(&entries);
        let explorer = progress_for(&progress, "explorer");
        assert_eq!(explorer.current_value, 5.0);
        assert!(explorer.completed);
        assert_eq!(explorer.progress_percentage, 100.0);
        assert_eq!(explorer.status, MilestoneStatus::Completed);
    }

    #[test]
    fn test_percentage_capped_at_100() {
        let entries: Vec<JournalEntry> = (0..9).map(|i| entry(&format!("Trip {}", i), None)).collect();
        let progress = compute_progress(&entries);
        let explorer = progress_for(&progress, "explorer");
        assert_eq!(explorer.current_value, 9.0);
        assert_eq!(explorer.progress_percentage, 100.0);
    }

    #[test]
    fn test_unique_locations_case_and_trim_insensitive() {
        let entries = vec![
            entry("One", Some("Skye")),
            entry("Two", Some(" skye ")),
            entry("Three", Some("SKYE")),
            entry("Four", Some("Glencoe")),
        ];
        let progress = compute_progress(&entries);
        let map_maker = progress_for(&progress, "map-maker");
        assert_eq!(map_maker.current_value, 2.0);
    }

    #[test]
    fn test_keyword_matches_title_content_and_tags() {
        let mut a = entry("Eilean Donan Castle", None);
        a.tags = vec!["daytrip".to_string()];
        let mut b = entry("Rainy Monday", None);
        b.content = "Sheltered in a wee castle courtyard".to_string();
        let mut c = entry("Hill walk", None);
        c.tags = vec!["Castle".to_string()];
        let d = entry("Beach day", None);

        let progress = compute_progress(&[a, b, c, d]);
        let seeker = progress_for(&progress, "castle-seeker");
        assert_eq!(seeker.current_value, 3.0);
    }

    #[test]
    fn test_distance_sum_and_photo_count() {
        let mut a = entry("Long drive", None);
        a.distance_miles = 60.5;
        a.photo_urls = vec!["/api/photos/a".to_string(), "/api/photos/b".to_string()];
        let mut b = entry("Short walk", None);
        b.distance_miles = 2.0;

        let progress = compute_progress(&[a, b]);
        assert_eq!(progress_for(&progress, "road-warrior").current_value, 62.5);
        assert_eq!(progress_for(&progress, "photo-collector").current_value, 2.0);
    }

    #[test]
    fn test_tiered_track_locking() {
        // No entries: tier 1 available, tier 2+ locked.
        let progress = compute_progress(&[]);
        assert_eq!(progress_for(&progress, "first-steps").status, MilestoneStatus::Available);
        assert_eq!(progress_for(&progress, "explorer").status, MilestoneStatus::Locked);

        // One entry: tier 1 completed, tier 2 unlocked and in progress.
        let entries = vec![entry("First", None)];
        let progress = compute_progress(&entries);
        assert_eq!(progress_for(&progress, "first-steps").status, MilestoneStatus::Completed);
        assert_eq!(progress_for(&progress, "explorer").status, MilestoneStatus::InProgress);
        assert_eq!(progress_for(&progress, "adventurer").status, MilestoneStatus::Locked);
    }

    #[test]
    fn test_dog_friendly_count() {
        let mut a = entry("Beach", None);
        a.dog_friendly = true;
        let b = entry("Museum", None);
        let progress = compute_progress(&[a, b]);
        assert_eq!(progress_for(&progress, "dog-days").current_value, 1.0);
    }

    #[test]
    fn test_zero_target_reports_zero_percent() {
        let template = MilestoneTemplate {
            id: "unreachable",
            title: "Unreachable",
            description: "A template with no target",
            target_value: 0,
            xp_reward: 10,
            aggregation: Aggregation::EntryCount,
            track: None,
        };
        let entries = vec![entry("One", None)];
        let progress = progress_for_templates(&[template], &entries);

        assert_eq!(progress.len(), 1);
        let p = &progress[0];
        assert_eq!(p.current_value, 1.0);
        assert_eq!(p.progress_percentage, 0.0);
        assert!(p.progress_percentage.is_finite());
        assert!(!p.completed);
        assert_eq!(p.status, MilestoneStatus::InProgress);
    }

    #[test]
    fn test_catalog_targets_positive() {
        for t in TEMPLATES {
            assert!(t.target_value > 0, "{} has non-positive target", t.id);
        }
    }
}
