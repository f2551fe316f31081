/// Shown for icon codes not in the table.
pub const FALLBACK_GLYPH: &str = "🤷";

/// Glyph for an OpenWeatherMap icon code such as "01d" or "10n".
pub fn icon_glyph(code: &str) -> &'static str {
    match code {
        "01d" => "🌞",
        "01n" => "🌚",
        "02d" => "🌤️",
        "02n" => "💨🌚",
        "03d" | "03n" | "04d" | "04n" => "💨",
        "09d" | "09n" => "🌧️",
        "10d" => "🌦️",
        "10n" => "🌦️🌚",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "🌨️",
        "50d" | "50n" => "🌫️",
        _ => FALLBACK_GLYPH,
    }
}
