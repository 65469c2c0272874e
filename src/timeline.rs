// src/timeline.rs
use crate::error::StoryError;
use crate::trip::Photo;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

// --- PHOTO TIMELINE ---
// Maps each photo id to its time window on the playback clock. Windows are
// abutting half-open intervals [start, end); queries never fail, they cap
// at the last photo so playback can't crash on clock overrun.

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PhotoWindow {
    pub start: f64,    // Seconds from slideshow start
    pub end: f64,      // Exclusive
    pub duration: f64, // Length of the window (seconds)
}

pub type PhotoTimeline = HashMap<String, PhotoWindow>;

/// Distribute `total_duration` evenly across the photos, in array order.
///
/// An empty photo list yields an empty timeline. Negative durations are
/// rejected up front; everything downstream assumes a non-negative clock.
pub fn calculate_photo_timeline(
    photos: &[Photo],
    total_duration: f64,
) -> Result<PhotoTimeline, StoryError> {
    if total_duration < 0.0 {
        return Err(StoryError::InvalidDuration(total_duration));
    }

    let mut timeline = PhotoTimeline::new();
    if photos.is_empty() {
        return Ok(timeline);
    }

    let base_duration = total_duration / photos.len() as f64;
    let mut current_time = 0.0;

    for photo in photos {
        timeline.insert(
            photo.id.clone(),
            PhotoWindow {
                start: current_time,
                end: current_time + base_duration,
                duration: base_duration,
            },
        );
        current_time += base_duration;
    }

    Ok(timeline)
}

/// Resolve which photo is on screen at `current_time`.
///
/// Past the final window (clock overrun or float rounding) this returns the
/// last index instead of failing. An empty photo list returns 0.
pub fn current_photo_index(current_time: f64, timeline: &PhotoTimeline, photos: &[Photo]) -> usize {
    if photos.is_empty() {
        return 0;
    }

    for (i, photo) in photos.iter().enumerate() {
        if let Some(window) = timeline.get(&photo.id) {
            if current_time >= window.start && current_time < window.end {
                return i;
            }
        }
    }

    photos.len() - 1
}

/// Window start for a photo index; 0 when the index is out of range or the
/// photo has no timeline entry. Used by previous/next navigation to seek.
pub fn photo_start_time(index: usize, timeline: &PhotoTimeline, photos: &[Photo]) -> f64 {
    let Some(photo) = photos.get(index) else {
        return 0.0;
    };

    timeline.get(&photo.id).map(|w| w.start).unwrap_or(0.0)
}

/// Format seconds as M:SS for the on-screen clock.
pub fn format_time(seconds: f64) -> String {
    let mins = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", mins, secs)
}

/// Indices the host should prefetch: the current photo plus up to
/// `preload_count - 1` photos ahead, clamped to the end of the list.
pub fn preload_range(photos: &[Photo], current_index: usize, preload_count: usize) -> Range<usize> {
    let start = current_index.min(photos.len());
    let end = current_index
        .saturating_add(preload_count)
        .min(photos.len());
    start..end
}
