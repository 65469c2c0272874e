// src/playback.rs
use crate::device::DeviceType;
use crate::timeline::{photo_start_time, PhotoTimeline};
use crate::trip::Photo;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

// --- PLAYBACK STATE MACHINE ---
// idle -> countdown (TV only) -> playing <-> paused -> idle.
// The clock is advanced by an external fixed-interval tick (0.1s every
// 100ms); reaching the end loops back to the start, paused.

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase", tag = "phase")]
pub enum Phase {
    Idle,
    Countdown { remaining: u32 },
    Playing,
    Paused,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SlideshowState {
    pub phase: Phase,
    pub current_time: f64,
    pub total_duration: f64,
}

// Holds the session's playback state safely behind a lock, like any other
// engine the host queries on every tick.
pub struct SlideshowEngine {
    pub state: Mutex<SlideshowState>,
}

impl SlideshowEngine {
    pub fn new(total_duration: f64) -> Self {
        Self {
            state: Mutex::new(SlideshowState {
                phase: Phase::Idle,
                current_time: 0.0,
                total_duration,
            }),
        }
    }

    /// Leave idle. TVs get an auto-play countdown; everything else starts
    /// playing immediately.
    pub fn start(&self, device: DeviceType, countdown_duration: u32) {
        let mut state = self.state.lock().unwrap();
        state.phase = match device {
            DeviceType::Tv if countdown_duration > 0 => Phase::Countdown {
                remaining: countdown_duration,
            },
            _ => Phase::Playing,
        };
    }

    /// One-second countdown step; hitting zero starts playback.
    pub fn countdown_tick(&self) {
        let mut state = self.state.lock().unwrap();
        if let Phase::Countdown { remaining } = state.phase {
            state.phase = if remaining <= 1 {
                Phase::Playing
            } else {
                Phase::Countdown {
                    remaining: remaining - 1,
                }
            };
        }
    }

    /// Skipping the countdown starts playback right away.
    pub fn cancel_countdown(&self) {
        let mut state = self.state.lock().unwrap();
        if matches!(state.phase, Phase::Countdown { .. }) {
            state.phase = Phase::Playing;
        }
    }

    pub fn toggle(&self) {
        let mut state = self.state.lock().unwrap();
        state.phase = match state.phase {
            Phase::Playing => Phase::Paused,
            Phase::Paused => Phase::Playing,
            other => other,
        };
    }

    /// Advance the clock by `delta` seconds while playing. Reaching the end
    /// rewinds to 0 and pauses (loop-to-start, not auto-repeat).
    pub fn tick(&self, delta: f64) {
        let mut state = self.state.lock().unwrap();
        if state.phase != Phase::Playing {
            return;
        }
        if state.current_time >= state.total_duration {
            state.phase = Phase::Paused;
            state.current_time = 0.0;
            return;
        }
        state.current_time += delta;
    }

    /// Jump the clock to the start of a photo's window (previous/next
    /// navigation).
    pub fn seek_to_photo(&self, index: usize, timeline: &PhotoTimeline, photos: &[Photo]) {
        let mut state = self.state.lock().unwrap();
        state.current_time = photo_start_time(index, timeline, photos);
    }

    pub fn stop(&self) {
        let mut state = self.state.lock().unwrap();
        state.phase = Phase::Idle;
        state.current_time = 0.0;
    }

    pub fn snapshot(&self) -> SlideshowState {
        self.state.lock().unwrap().clone()
    }
}
