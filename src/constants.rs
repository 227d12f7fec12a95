/// User agent string for HTTP requests
pub const USER_AGENT: &str = concat!("mcp-current-weather/", env!("CARGO_PKG_VERSION"));

/// Open-Meteo API base URL
pub const OPEN_METEO_API_BASE: &str = "https://api.open-meteo.com/v1";

/// Compass points, one every 22.5 degrees starting at north
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Degrees covered by one compass point
pub const COMPASS_SECTOR_DEGREES: f64 = 22.5;

/// Description used for weather codes outside the known table
pub const UNKNOWN_CONDITIONS: &str = "Unknown conditions";
