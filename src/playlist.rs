// src/playlist.rs
use crate::error::StoryError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

// --- MUSIC PLAYLIST ---
// Builds a playlist covering the whole slideshow from one shuffle of the
// track pool: no repeats until the pool is exhausted, and the same
// permutation is reused for every full cycle and the partial tail.

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub file: String,
    pub duration: f64, // Seconds
    #[serde(default)]
    pub artist: String,
}

/// Which track is active at a point on the playback clock. Derived per
/// query, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentTrack<'a> {
    pub track: &'a Track,
    pub track_index: usize,
    pub track_start_time: f64,
    pub track_elapsed_time: f64,
}

/// Generate a playlist whose summed duration covers `total_duration`.
///
/// An empty pool yields an empty playlist (the caller treats that as "no
/// music"). A `total_duration` of 0 still yields one track.
pub fn generate_playlist(tracks: &[Track], total_duration: f64) -> Result<Vec<Track>, StoryError> {
    generate_playlist_with_rng(tracks, total_duration, &mut rand::rng())
}

/// Same as [`generate_playlist`] with the RNG injected, so tests can seed it.
pub fn generate_playlist_with_rng<R: Rng + ?Sized>(
    tracks: &[Track],
    total_duration: f64,
    rng: &mut R,
) -> Result<Vec<Track>, StoryError> {
    if total_duration < 0.0 {
        return Err(StoryError::InvalidDuration(total_duration));
    }
    if tracks.is_empty() {
        return Ok(Vec::new());
    }

    // One Fisher-Yates pass; this single permutation drives the whole playlist
    let mut shuffled: Vec<Track> = tracks.to_vec();
    shuffled.shuffle(rng);

    let cycle_duration: f64 = shuffled.iter().map(|t| t.duration).sum();
    let complete_cycles = if cycle_duration > 0.0 {
        (total_duration / cycle_duration).floor() as usize
    } else {
        0
    };
    let remaining_time = total_duration - complete_cycles as f64 * cycle_duration;

    let mut playlist = Vec::new();

    for _ in 0..complete_cycles {
        playlist.extend(shuffled.iter().cloned());
    }

    // Partial cycle walks the same order from the start again, including the
    // track that crosses the remaining-time boundary
    let mut accumulated_time = 0.0;
    for track in &shuffled {
        if accumulated_time >= remaining_time {
            break;
        }
        playlist.push(track.clone());
        accumulated_time += track.duration;
    }

    if playlist.is_empty() {
        playlist.push(shuffled[0].clone());
    }

    Ok(playlist)
}

/// Cumulative-duration scan for the track containing `current_time`.
///
/// Returns `None` only for an empty playlist. At or past the playlist's
/// total duration the last track is reported as fully elapsed rather than
/// failing mid-playback.
pub fn current_track(playlist: &[Track], current_time: f64) -> Option<CurrentTrack<'_>> {
    if playlist.is_empty() {
        return None;
    }

    let mut accumulated_time = 0.0;

    for (i, track) in playlist.iter().enumerate() {
        let track_end_time = accumulated_time + track.duration;

        if current_time >= accumulated_time && current_time < track_end_time {
            return Some(CurrentTrack {
                track,
                track_index: i,
                track_start_time: accumulated_time,
                track_elapsed_time: current_time - accumulated_time,
            });
        }

        accumulated_time = track_end_time;
    }

    let track_index = playlist.len() - 1;
    let last = &playlist[track_index];
    Some(CurrentTrack {
        track: last,
        track_index,
        track_start_time: accumulated_time - last.duration,
        track_elapsed_time: last.duration,
    })
}

/// Summed duration of the playlist, i.e. how much clock it covers.
pub fn playlist_duration(playlist: &[Track]) -> f64 {
    playlist.iter().map(|t| t.duration).sum()
}
