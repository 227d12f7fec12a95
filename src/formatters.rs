use crate::constants::{COMPASS_POINTS, COMPASS_SECTOR_DEGREES, UNKNOWN_CONDITIONS};
use crate::models::CurrentConditions;

/// Formats current conditions into the four-line weather report
pub fn format_current_weather(conditions: &CurrentConditions) -> String {
    [
        "Current Weather Report:".to_string(),
        format!(
            "Temperature: {}\u{00b0}C",
            format_temperature(conditions.temperature_celsius)
        ),
        format!(
            "Conditions: {}",
            weather_code_to_description(conditions.weather_code)
        ),
        format!(
            "Wind: {} km/h from {}",
            format_wind_speed(conditions.wind_speed_kmh),
            wind_direction_to_compass(conditions.wind_direction_degrees)
        ),
    ]
    .join("\n")
}

/// Plain numeric rendering, no forced decimals
pub fn format_temperature(celsius: f64) -> String {
    // -0.0 would otherwise print as "-0"
    let celsius = if celsius == 0.0 { 0.0 } else { celsius };
    celsius.to_string()
}

/// Wind speed with exactly one decimal, exact ties rounded away from zero
pub fn format_wind_speed(kmh: f64) -> String {
    // `{:.1}` breaks exact ties to even. A value can only sit exactly on a
    // tie when it is an odd number of quarters, e.g. 12.25.
    let quarters = kmh * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (kmh * 10.0).round() / 10.0);
    }
    format!("{:.1}", kmh)
}

/// Converts WMO weather code to human-readable description
pub fn weather_code_to_description(code: f64) -> &'static str {
    if code.fract() != 0.0 || !code.is_finite() {
        return UNKNOWN_CONDITIONS;
    }
    describe_weather_code(code as i64)
}

fn describe_weather_code(code: i64) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_CONDITIONS,
    }
}

/// Maps a bearing in degrees to one of the 16 compass points.
///
/// The bearing is wrapped into [0, 360) first, so out-of-range values from
/// the provider still land on a valid point. Non-finite input maps to "N".
pub fn wind_direction_to_compass(degrees: f64) -> &'static str {
    let degrees = if degrees.is_finite() {
        degrees.rem_euclid(360.0)
    } else {
        0.0
    };
    let index = (degrees / COMPASS_SECTOR_DEGREES).round() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}
