// src/config/consts.rs

// Net config
pub const MARKERS_URL: &str = "https://map.stoneworks.gg/abex1/maps/abexilas/live/markers.json";
pub const USER_AGENT: &str = "lands_scrape/0.3";
pub const FETCH_TIMEOUT_SECS: u64 = 15;

// Feed layout
pub const LANDS_MARKER_SET: &str = "me.angeschossen.lands";
pub const MARKERS_FIELD: &str = "markers";

// World
pub const GROUND_Y: f64 = 62.0;
pub const CHUNK_AREA: u64 = 16 * 16;
pub const UNKNOWN_TERRITORY: &str = "Unknown";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const FEED_CACHE_FILE: &str = "markers.json";
pub const LOG_FILE: &str = "debug.log";
