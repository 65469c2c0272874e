// src/lib.rs

pub mod config;
pub mod device;
pub mod error;
pub mod playback;
pub mod playlist;
pub mod session;
pub mod timeline;
pub mod trip;
pub mod viewer;

#[cfg(test)]
mod playlist_tests;
