//! Text formatting helpers for cards and the detail view

use owo_colors::OwoColorize;

/// Stat value that fills a bar completely
pub const STAT_SCALE: u32 = 200;

/// Fallback color for categories missing from the table
const UNKNOWN_CATEGORY_COLOR: (u8, u8, u8) = (156, 163, 175);

const CATEGORY_COLORS: [(&str, (u8, u8, u8)); 18] = [
    ("normal", (156, 163, 175)),
    ("fire", (239, 68, 68)),
    ("water", (59, 130, 246)),
    ("electric", (250, 204, 21)),
    ("grass", (34, 197, 94)),
    ("ice", (147, 197, 253)),
    ("fighting", (185, 28, 28)),
    ("poison", (168, 85, 247)),
    ("ground", (202, 138, 4)),
    ("flying", (129, 140, 248)),
    ("psychic", (236, 72, 153)),
    ("bug", (74, 222, 128)),
    ("rock", (133, 77, 14)),
    ("ghost", (126, 34, 206)),
    ("dragon", (67, 56, 202)),
    ("dark", (31, 41, 55)),
    ("steel", (107, 114, 128)),
    ("fairy", (249, 168, 212)),
];

/// RGB color of a category tag
pub fn category_color(name: &str) -> (u8, u8, u8) {
    CATEGORY_COLORS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, rgb)| *rgb)
        .unwrap_or(UNKNOWN_CATEGORY_COLOR)
}

/// `[fire]`, colored when `color` is set
pub fn category_badge(name: &str, color: bool) -> String {
    let badge = format!("[{name}]");
    if color {
        let (r, g, b) = category_color(name);
        badge.truecolor(r, g, b).bold().to_string()
    } else {
        badge
    }
}

/// `#025`
pub fn format_id(id: u32) -> String {
    format!("#{id:03}")
}

/// API names are kebab-case; display them as words
pub fn humanize(name: &str) -> String {
    name.replace('-', " ")
}

/// Uppercase the first letter of every word
pub fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Display name of an entity: `mr-mime` becomes `Mr Mime`
pub fn display_name(name: &str) -> String {
    capitalize(&humanize(name))
}

/// Decimetres to metres
pub fn format_height(decimetres: u32) -> String {
    format!("{} m", f64::from(decimetres) / 10.0)
}

/// Hectograms to kilograms
pub fn format_weight(hectograms: u32) -> String {
    format!("{} kg", f64::from(hectograms) / 10.0)
}

/// Share of [`STAT_SCALE`] reached by `value`, capped at 100
pub fn stat_percentage(value: u32) -> f64 {
    (f64::from(value) / f64::from(STAT_SCALE) * 100.0).min(100.0)
}

/// Fixed-width bar proportional to [`stat_percentage`]
pub fn stat_bar(value: u32, width: usize) -> String {
    let filled = ((stat_percentage(value) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
