use std::sync::OnceLock;

use regex::Regex;

pub const DEFAULT_ACCENT: &str = "#6366f1";
const HOVER_DELTA: i32 = 20;
const SECONDARY_DELTA: i32 = -10;
const GLOW_ALPHA: &str = "40";

/// Accent plus the three variables derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColors {
    pub accent: String,
    pub hover: String,
    pub secondary: String,
    pub glow: String,
}

impl ThemeColors {
    /// `None` when `accent` is not a six-digit hex color.
    pub fn derive(accent: &str) -> Option<Self> {
        Some(ThemeColors {
            accent: accent.to_string(),
            hover: adjust_brightness(accent, HOVER_DELTA)?,
            secondary: adjust_brightness(accent, SECONDARY_DELTA)?,
            // Literal suffix, the accent is not re-parsed.
            glow: format!("{}{}", accent, GLOW_ALPHA),
        })
    }

    pub fn css_variables(&self) -> String {
        format!(
            ":root {{\n    --accent: {};\n    --accent-hover: {};\n    --accent-secondary: {};\n    --accent-glow: {};\n}}",
            self.accent, self.hover, self.secondary, self.glow
        )
    }
}

/// Add `delta` to each RGB channel of `#RRGGBB`, clamping to [0, 255].
/// The leading `#` is optional on input and always present on output;
/// output digits are lowercase.
pub fn adjust_brightness(hex: &str, delta: i32) -> Option<String> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let num = u32::from_str_radix(digits, 16).ok()?;

    let channel = |shift: u32| -> u32 {
        let c = ((num >> shift) & 0xff) as i32;
        (c + delta).clamp(0, 255) as u32
    };
    let (r, g, b) = (channel(16), channel(8), channel(0));

    Some(format!("#{:06x}", (r << 16) | (g << 8) | b))
}

/// Strict `#RRGGBB` check used by the editor's accent text input.
pub fn is_hex_color(value: &str) -> bool {
    static HEX: OnceLock<Regex> = OnceLock::new();
    HEX.get_or_init(|| Regex::new(r"(?i)^#[0-9a-f]{6}$").expect("static regex"))
        .is_match(value)
}
