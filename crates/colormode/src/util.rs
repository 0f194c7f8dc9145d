//! Color value helpers for previewing palettes in a terminal.

/// Parses a `#rgb` or `#rrggbb` hex color.
///
/// Returns `None` for anything else, including named CSS colors and
/// `var(...)` references, which cannot be previewed without a browser.
///
/// ```rust
/// use colormode::parse_hex_color;
///
/// assert_eq!(parse_hex_color("#ff6b35"), Some((255, 107, 53)));
/// assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
/// assert_eq!(parse_hex_color("tomato"), None);
/// ```
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    let digits = hex
        .bytes()
        .map(|b| (b as char).to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;
    match digits[..] {
        // #rgb -> #rrggbb
        [r, g, b] => Some((r * 17, g * 17, b * 17)),
        [r1, r0, g1, g0, b1, b0] => Some((r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
        _ => None,
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// ```rust
/// use colormode::rgb_to_ansi256;
///
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    // 6x6x6 cube level of one channel
    let level = |c: u8| (u16::from(c) * 5 / 255) as u8;

    match (r == g && g == b, r) {
        (true, 0..=7) => 16,
        (true, 249..=255) => 231,
        // 24-step gray ramp at 232..=255
        (true, gray) => 232 + ((u16::from(gray) - 8) * 24 / 247) as u8,
        (false, _) => 16 + 36 * level(r) + 6 * level(g) + level(b),
    }
}
