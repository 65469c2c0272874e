// src/main.rs
use chrono::Utc;
use photo_stories::config::AppConfig;
use photo_stories::device::DeviceType;
use photo_stories::error::StoryError;
use photo_stories::playback::{Phase, SlideshowEngine};
use photo_stories::playlist::{current_track, playlist_duration};
use photo_stories::session::Session;
use photo_stories::timeline::format_time;
use photo_stories::trip::{demo_trip, TripStore};
use photo_stories::viewer::{SlideshowViewer, View};
use std::env;
use std::process;
use std::thread;
use std::time::Duration;

// The external playback driver: one tick every 100ms, advancing 0.1s.
const TICK_SECONDS: f64 = 0.1;
const TICK_INTERVAL_MS: u64 = 100;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let data_dir = flag_value(&args, "--data").unwrap_or_else(|| "data".to_string());
    let store = TripStore::new(&data_dir);
    let config = AppConfig::load(store.data_dir());

    let result = match args[1].as_str() {
        "list" => run_list(&store),
        "schedule" => match positional(&args, 2) {
            Some(trip_id) => run_schedule(&store, &config, trip_id),
            None => {
                eprintln!("Usage: photo-stories schedule <trip-id> [--data <dir>]");
                process::exit(1);
            }
        },
        "play" => match positional(&args, 2) {
            Some(trip_id) => run_play(&args, &store, &config, trip_id),
            None => {
                eprintln!("Usage: photo-stories play <trip-id> [--data <dir>] [--pin N] [--width W] [--ua STR] [--fast]");
                process::exit(1);
            }
        },
        "demo" => run_demo(&args, &store, &config),
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: photo-stories <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                     List all trips in the index");
    eprintln!("  schedule <trip-id>       Print the photo timeline and music plan for a trip");
    eprintln!("  play <trip-id>           Simulate slideshow playback tick by tick");
    eprintln!("  demo [--photos N]        Generate a synthetic demo trip");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --data <dir>             Data directory (default: data)");
    eprintln!("  --pin <pin>              6-digit PIN (or set PHOTO_STORIES_PIN)");
    eprintln!("  --width <px>             Screen width for device detection (default: 1280)");
    eprintln!("  --ua <string>            User agent for device detection");
    eprintln!("  --fast                   Skip real-time sleeps while playing");
}

// --- ARGUMENT HELPERS ---

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn positional(args: &[String], index: usize) -> Option<&str> {
    args.get(index)
        .filter(|a| !a.starts_with("--"))
        .map(|a| a.as_str())
}

// --- COMMANDS ---

fn run_list(store: &TripStore) -> Result<(), StoryError> {
    let index = store.load_index()?;

    if index.trips.is_empty() {
        println!("No trips yet. Run `photo-stories demo` to generate one.");
        return Ok(());
    }

    println!("📚 Photo Stories ({} trips)", index.trips.len());
    for (i, trip) in index.trips.iter().enumerate() {
        let audio = if trip.has_audio { " 🎵" } else { "" };
        println!(
            "  {}. {} - {} photos, {}{}",
            i + 1,
            trip.title,
            trip.photo_count,
            format_time(trip.duration),
            audio
        );
        if !trip.description.is_empty() {
            println!("     {}", trip.description);
        }
    }

    Ok(())
}

fn run_schedule(store: &TripStore, config: &AppConfig, trip_id: &str) -> Result<(), StoryError> {
    let trip = store.load_trip(trip_id)?;
    let pool = store.load_track_pool()?;
    let viewer = SlideshowViewer::new(trip, &pool.tracks, config)?;
    let trip = viewer.trip();

    println!("🎬 {} ({})", trip.title, format_time(trip.total_duration));
    println!();
    println!("Photo timeline:");
    for (i, photo) in trip.photos.iter().enumerate() {
        match viewer.timeline().get(&photo.id) {
            Some(window) => println!(
                "  {:>3}. [{} - {}] {}",
                i + 1,
                format_time(window.start),
                format_time(window.end),
                photo.caption
            ),
            None => println!("  {:>3}. [no window] {}", i + 1, photo.caption),
        }
    }

    println!();
    if viewer.playlist().is_empty() {
        println!("Music: none");
    } else {
        println!(
            "Music plan ({} tracks, covers {}):",
            viewer.playlist().len(),
            format_time(playlist_duration(viewer.playlist()))
        );
        let mut start = 0.0;
        for (i, track) in viewer.playlist().iter().enumerate() {
            println!(
                "  {:>3}. [{}] \"{}\" by {}",
                i + 1,
                format_time(start),
                track.title,
                track.artist
            );
            start += track.duration;
        }
    }

    Ok(())
}

fn run_play(
    args: &[String],
    store: &TripStore,
    config: &AppConfig,
    trip_id: &str,
) -> Result<(), StoryError> {
    let fast = has_flag(args, "--fast");

    // PIN gate first; the session object carries its own expiry
    let pin = flag_value(args, "--pin")
        .or_else(|| env::var("PHOTO_STORIES_PIN").ok())
        .unwrap_or_default();
    let session = Session::authenticate(&pin, config, Utc::now())?;
    log::info!("Session valid until {}", session.expires_at);

    let user_agent = flag_value(args, "--ua").unwrap_or_default();
    let screen_width: u32 = flag_value(args, "--width")
        .and_then(|w| w.parse().ok())
        .unwrap_or(1280);
    let device = DeviceType::detect(&user_agent, screen_width, config);
    println!("📺 Device: {}", device);

    let trip = store.load_trip(trip_id)?;
    let pool = store.load_track_pool()?;
    let viewer = SlideshowViewer::new(trip, &pool.tracks, config)?;
    println!(
        "🎬 Playing \"{}\" ({} photos, {})",
        viewer.trip().title,
        viewer.trip().photos.len(),
        format_time(viewer.trip().total_duration)
    );

    let engine = SlideshowEngine::new(viewer.trip().total_duration);
    engine.start(device, config.countdown_duration);

    while let Phase::Countdown { remaining } = engine.snapshot().phase {
        println!("⏳ Starting slideshow in {}...", remaining);
        if !fast {
            thread::sleep(Duration::from_secs(1));
        }
        engine.countdown_tick();
    }

    let mut last_photo = usize::MAX;
    let mut last_track = usize::MAX;

    loop {
        let state = engine.snapshot();
        match viewer.render(&state) {
            Ok(View::Frame(frame)) => {
                if frame.photo_index != last_photo {
                    println!(
                        "🖼  [{}] {}/{} {}",
                        frame.elapsed,
                        frame.photo_index + 1,
                        frame.photo_count,
                        frame.caption
                    );
                    last_photo = frame.photo_index;
                }
                if let Some(current) = current_track(viewer.playlist(), state.current_time) {
                    if current.track_index != last_track {
                        println!(
                            "🎵 [{}] \"{}\" by {}",
                            frame.elapsed, current.track.title, current.track.artist
                        );
                        last_track = current.track_index;
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                // Fallback view: never let a render problem kill playback
                eprintln!("⚠️ {}. Returning to home.", e);
                break;
            }
        }

        engine.tick(TICK_SECONDS);
        if !fast {
            thread::sleep(Duration::from_millis(TICK_INTERVAL_MS));
        }

        let after = engine.snapshot();
        if after.phase == Phase::Paused && after.current_time == 0.0 {
            println!(
                "🏁 Slideshow finished, paused back at the start ({} played)",
                format_time(viewer.trip().total_duration)
            );
            break;
        }
    }

    engine.stop();
    Ok(())
}

fn run_demo(args: &[String], store: &TripStore, config: &AppConfig) -> Result<(), StoryError> {
    let photo_count: usize = flag_value(args, "--photos")
        .and_then(|n| n.parse().ok())
        .unwrap_or(12);

    let trip = demo_trip(photo_count, config.default_photo_duration);
    store.save_trip(&trip)?;

    println!(
        "✅ Generated demo trip '{}' with {} photos ({})",
        trip.id,
        trip.photos.len(),
        format_time(trip.total_duration)
    );
    println!("   Play it with: photo-stories play {} --pin {}", trip.id, config.pin);

    Ok(())
}
