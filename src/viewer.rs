// src/viewer.rs
use crate::config::AppConfig;
use crate::error::StoryError;
use crate::playback::{Phase, SlideshowState};
use crate::playlist::{current_track, generate_playlist, Track};
use crate::timeline::{
    calculate_photo_timeline, current_photo_index, format_time, preload_range, PhotoTimeline,
};
use crate::trip::Trip;
use serde::Serialize;
use std::ops::Range;
use thiserror::Error;

// --- COMPOSITION ROOT ---
// Wires one trip into a renderable session: resolves the effective
// timeline (pre-authored wins), generates the playlist when music is on,
// and turns engine state into a plain view value. Rendering returns a
// Result the host matches on; a fallback view replaces the exception-style
// error boundary.

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("This trip doesn't have any photos yet")]
    NoPhotos,
    #[error("No timeline entry for photo '{0}'")]
    MissingWindow(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub volume: f64,
    pub track_elapsed: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PhotoFrame {
    pub photo_index: usize,
    pub photo_count: usize,
    pub url: String,
    pub caption: String,
    pub is_playing: bool,
    pub elapsed: String, // M:SS for the on-screen clock
    pub total: String,
    pub now_playing: Option<NowPlaying>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum View {
    Idle,
    Countdown { remaining: u32 },
    Frame(PhotoFrame),
}

pub struct SlideshowViewer {
    trip: Trip,
    timeline: PhotoTimeline,
    playlist: Vec<Track>,
    music_volume: f64,
    preload_count: usize,
}

impl SlideshowViewer {
    pub fn new(trip: Trip, track_pool: &[Track], config: &AppConfig) -> Result<Self, StoryError> {
        // Use the authored timeline verbatim when the trip ships one
        let timeline = if trip.has_authored_timeline() {
            trip.photo_timeline.clone().unwrap_or_default()
        } else {
            calculate_photo_timeline(&trip.photos, trip.total_duration)?
        };

        let (playlist, music_volume) = match &trip.background_music {
            Some(music) if music.enabled => (
                generate_playlist(track_pool, trip.total_duration)?,
                music.volume,
            ),
            _ => (Vec::new(), config.default_music_volume),
        };

        if playlist.is_empty() {
            log::debug!("Trip '{}' plays without music", trip.id);
        }

        Ok(Self {
            trip,
            timeline,
            playlist,
            music_volume,
            preload_count: config.preload_count,
        })
    }

    pub fn trip(&self) -> &Trip {
        &self.trip
    }

    pub fn timeline(&self) -> &PhotoTimeline {
        &self.timeline
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    /// Photo indices the host should have prefetched for the current
    /// position.
    pub fn preload_indices(&self, state: &SlideshowState) -> Range<usize> {
        let index = current_photo_index(state.current_time, &self.timeline, &self.trip.photos);
        preload_range(&self.trip.photos, index, self.preload_count)
    }

    /// Resolve what should be on screen for the given playback state.
    pub fn render(&self, state: &SlideshowState) -> Result<View, RenderError> {
        if self.trip.photos.is_empty() {
            return Err(RenderError::NoPhotos);
        }

        match state.phase {
            Phase::Idle => Ok(View::Idle),
            Phase::Countdown { remaining } => Ok(View::Countdown { remaining }),
            Phase::Playing | Phase::Paused => {
                let photo_index =
                    current_photo_index(state.current_time, &self.timeline, &self.trip.photos);
                let photo = &self.trip.photos[photo_index];
                if !self.timeline.contains_key(&photo.id) {
                    return Err(RenderError::MissingWindow(photo.id.clone()));
                }

                let now_playing =
                    current_track(&self.playlist, state.current_time).map(|current| NowPlaying {
                        title: current.track.title.clone(),
                        artist: current.track.artist.clone(),
                        volume: self.music_volume,
                        track_elapsed: current.track_elapsed_time,
                    });

                Ok(View::Frame(PhotoFrame {
                    photo_index,
                    photo_count: self.trip.photos.len(),
                    url: photo.url.clone(),
                    caption: photo.caption.clone(),
                    is_playing: state.phase == Phase::Playing,
                    elapsed: format_time(state.current_time),
                    total: format_time(state.total_duration),
                    now_playing,
                }))
            }
        }
    }
}
