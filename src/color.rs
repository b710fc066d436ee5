use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Bar colour of the filtered series.
pub const FILTERED_HEX: &str = "#B18FCF";
/// Bar colour of the whole-population series.
pub const TOTAL_HEX: &str = "#8AB6D6";
/// Pie slices: Yes, No, Maybe.
pub const SUNSET_HEX: [&str; 3] = ["#ffbf69", "#cbf3f0", "#2ec4b6"];

/// Parse a `#rrggbb` string. Unparsable input falls back to grey.
pub fn from_hex(hex: &str) -> Color32 {
    match Srgb::<u8>::from_str(hex) {
        Ok(rgb) => Color32::from_rgb(rgb.red, rgb.green, rgb.blue),
        Err(e) => {
            log::warn!("invalid colour {hex:?}: {e}");
            Color32::GRAY
        }
    }
}

/// The three pie colours in slice order.
pub fn sunset_palette() -> [Color32; 3] {
    SUNSET_HEX.map(from_hex)
}
