// src/trip.rs
use crate::error::StoryError;
use crate::playlist::Track;
use crate::timeline::PhotoTimeline;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

// --- DATA STRUCTURES ---

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Photo,
    Video,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, rename = "type")]
    pub media_type: MediaType,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MusicConfig {
    pub enabled: bool,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default)]
    pub track_id: Option<String>,
}

fn default_volume() -> f64 {
    0.3
}

/// One photo/video story. Photo array order defines slideshow order;
/// everything is immutable once loaded.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub photos: Vec<Photo>,
    pub total_duration: f64,
    #[serde(default)]
    pub photo_timeline: Option<PhotoTimeline>,
    #[serde(default)]
    pub background_music: Option<MusicConfig>,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

impl Trip {
    /// A pre-authored timeline in the trip file wins over recomputation.
    pub fn has_authored_timeline(&self) -> bool {
        self.photo_timeline
            .as_ref()
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }
}

/// Home-screen listing entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub photo_count: usize,
    pub duration: f64,
    #[serde(default)]
    pub has_audio: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TripIndex {
    pub trips: Vec<TripSummary>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct TrackPool {
    pub tracks: Vec<Track>,
}

// --- STORE ---
// Flat JSON layout under a data directory:
//   trips.json           index of all trips
//   trips/<id>.json      full trip data
//   music/tracks.json    track pool

pub struct TripStore {
    data_dir: PathBuf,
}

impl TripStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    pub fn load_index(&self) -> Result<TripIndex, StoryError> {
        let path = self.data_dir.join("trips.json");
        if !path.exists() {
            return Ok(TripIndex::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_trip(&self, trip_id: &str) -> Result<Trip, StoryError> {
        let path = self.data_dir.join("trips").join(format!("{}.json", trip_id));
        if !path.exists() {
            return Err(StoryError::TripNotFound(trip_id.to_string()));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Missing pool file means "no music available", not an error.
    pub fn load_track_pool(&self) -> Result<TrackPool, StoryError> {
        let path = self.data_dir.join("music").join("tracks.json");
        if !path.exists() {
            log::warn!("No track pool at {:?}, music disabled", path);
            return Ok(TrackPool::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the trip file and upsert its entry in the index.
    pub fn save_trip(&self, trip: &Trip) -> Result<(), StoryError> {
        let trips_dir = self.data_dir.join("trips");
        if !trips_dir.exists() {
            fs::create_dir_all(&trips_dir)?;
        }

        let trip_path = trips_dir.join(format!("{}.json", trip.id));
        fs::write(&trip_path, serde_json::to_string_pretty(trip)?)?;

        let mut index = self.load_index()?;
        let summary = TripSummary {
            id: trip.id.clone(),
            title: trip.title.clone(),
            description: trip.description.clone(),
            photo_count: trip.photos.len(),
            duration: trip.total_duration,
            has_audio: trip
                .background_music
                .as_ref()
                .map(|m| m.enabled)
                .unwrap_or(false),
        };
        match index.trips.iter_mut().find(|t| t.id == trip.id) {
            Some(existing) => *existing = summary,
            None => index.trips.push(summary),
        }
        fs::write(
            self.data_dir.join("trips.json"),
            serde_json::to_string_pretty(&index)?,
        )?;

        Ok(())
    }
}

// --- FIXTURES ---

/// Synthetic photos for tests and the `demo` command.
pub fn demo_photos(count: usize) -> Vec<Photo> {
    (0..count)
        .map(|i| Photo {
            id: Uuid::new_v4().to_string(),
            url: format!("/photos/demo/{}.jpg", i + 1),
            caption: format!("Demo photo {}", i + 1),
            timestamp: String::new(),
            media_type: MediaType::Photo,
        })
        .collect()
}

/// A complete synthetic trip, `photo_duration` seconds per photo.
pub fn demo_trip(photo_count: usize, photo_duration: f64) -> Trip {
    Trip {
        id: format!("demo-{}", &Uuid::new_v4().to_string()[..8]),
        title: "Demo Trip".to_string(),
        description: "Synthetic trip for testing the slideshow".to_string(),
        photos: demo_photos(photo_count),
        total_duration: photo_count as f64 * photo_duration,
        photo_timeline: None,
        background_music: Some(MusicConfig {
            enabled: true,
            volume: 0.3,
            track_id: None,
        }),
        created_date: Some(Utc::now()),
    }
}
