//! `#rrggbb` colour helpers for course swatches.

/// Relative luminance above which dark text is used.
const LUMINANCE_THRESHOLD: f64 = 0.46;

fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// Lighten (positive `amount`) or darken (negative) every channel of a
/// `#rrggbb` colour, clamping each to 0..=255.
///
/// Returns `None` if `color` is not a six-digit hex colour.
pub fn adjust_color(color: &str, amount: i32) -> Option<String> {
    let rgb = parse_hex(color)?;
    let shifted = rgb.map(|c| (i32::from(c) + amount).clamp(0, 255));
    Some(format!(
        "#{:02x}{:02x}{:02x}",
        shifted[0], shifted[1], shifted[2]
    ))
}

/// WCAG relative luminance of a `#rrggbb` colour.
pub fn relative_luminance(color: &str) -> Option<f64> {
    let [r, g, b] = parse_hex(color)?.map(|c| {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    });
    Some(0.2126 * r + 0.7152 * g + 0.0722 * b)
}

/// Choose `dark` text on light backgrounds and `light` text otherwise.
///
/// Unparseable backgrounds get `light`.
pub fn pick_text_color<'a>(background: &str, light: &'a str, dark: &'a str) -> &'a str {
    match relative_luminance(background) {
        Some(l) if l > LUMINANCE_THRESHOLD => dark,
        _ => light,
    }
}
