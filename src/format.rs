//! Pure display helpers shared by the client and the CLI.

use std::fmt;

pub const DIMENSION_STEP: u32 = 64;

const ELLIPSIS: &str = "...";
const BYTE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Rounds `value` to the nearest multiple of `multiple`, halves rounding up.
///
/// Does not mutate anything: callers decide whether to auto-correct input or
/// only report the rounded value. A `multiple` of zero returns `value`.
pub fn round_to_multiple(value: u32, multiple: u32) -> u32 {
    if multiple == 0 {
        return value;
    }
    let step = u64::from(multiple);
    let rounded = (u64::from(value) + step / 2) / step * step;
    u32::try_from(rounded).unwrap_or(u32::MAX / multiple * multiple)
}

pub fn round_to_step(value: u32) -> u32 {
    round_to_multiple(value, DIMENSION_STEP)
}

/// Keeps the first `max_chars` characters and appends `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}{}", &text[..idx], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Human-readable size using 1024-based units and two decimals.
pub fn format_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", scaled, BYTE_UNITS[unit])
}

/// Seconds with two decimals, or `unknown` when the server did not report it.
pub fn format_duration(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) if s.is_finite() => format!("{:.2}", s),
        _ => "unknown".to_string(),
    }
}

/// Informational summary of a requested canvas size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeInfo {
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: f64,
    pub megapixels: f64,
}

impl SizeInfo {
    pub fn new(width: u32, height: u32) -> Self {
        let aspect_ratio = if height == 0 {
            0.0
        } else {
            f64::from(width) / f64::from(height)
        };
        Self {
            width,
            height,
            aspect_ratio,
            megapixels: f64::from(width) * f64::from(height) / 1_000_000.0,
        }
    }

    /// Both sides already sit on the 64px grid.
    pub fn is_aligned(&self) -> bool {
        self.width % DIMENSION_STEP == 0 && self.height % DIMENSION_STEP == 0
    }
}

impl fmt::Display for SizeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Size: {} x {} pixels, aspect ratio {:.2}:1, {:.1} MP",
            self.width, self.height, self.aspect_ratio, self.megapixels
        )
    }
}
