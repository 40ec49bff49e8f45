use crate::error::AffectError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 8-bit RGB color. Channel math truncates toward zero after every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Depth-1 palette, handed out round-robin by [`PaletteCursor`].
pub const PALETTE: [Rgb; 5] = [
    Rgb::new(0x4C, 0xC3, 0xD9),
    Rgb::new(0xFF, 0xC6, 0x5D),
    Rgb::new(0x7B, 0xC8, 0xA4),
    Rgb::new(0x93, 0x64, 0x8D),
    Rgb::new(0x40, 0x40, 0x40),
];

/// Per-ring brightness deltas, indexed by `round(100 * |value| mod 3)`.
pub const BRIGHTNESS_DELTAS: [f64; 3] = [-0.1, -0.05, 0.0];

/// Below this luminance, text drawn on the color should be light.
pub const LIGHT_TEXT_THRESHOLD: f64 = 150.0;

const BRIGHTER_BASE: f64 = 0.7;
const BRIGHTER_FLOOR: f64 = 30.0;
const FLOOR_GREY: Rgb = Rgb::new(30, 30, 30);

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn from_hex(literal: &str) -> Result<Self, AffectError> {
        let invalid = || AffectError::InvalidColor(literal.to_string());
        let digits = literal.strip_prefix('#').ok_or_else(invalid)?;
        let expanded: String = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid()),
        };
        let value = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
        Ok(Rgb::new(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        ))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn as_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Lighten by `amount` steps of 1/0.7. Channels below 30 (but non-zero)
    /// are lifted to 30 first. Pure black always becomes `(30, 30, 30)`,
    /// whatever the amount.
    pub fn brighter(self, amount: f64) -> Rgb {
        if self == Rgb::BLACK {
            return FLOOR_GREY;
        }
        let k = BRIGHTER_BASE.powf(amount);
        let lift = |c: u8| {
            let c = f64::from(c);
            if c > 0.0 && c < BRIGHTER_FLOOR {
                BRIGHTER_FLOOR
            } else {
                c
            }
        };
        Rgb::new(
            channel((lift(self.r) / k).min(255.0)),
            channel((lift(self.g) / k).min(255.0)),
            channel((lift(self.b) / k).min(255.0)),
        )
    }

    /// Perceived brightness, `0.299r + 0.587g + 0.114b`.
    pub fn luminance(self) -> f64 {
        0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)
    }

    pub fn text_tone(self) -> TextTone {
        if self.luminance() < LIGHT_TEXT_THRESHOLD {
            TextTone::Light
        } else {
            TextTone::Dark
        }
    }
}

fn channel(v: f64) -> u8 {
    if v.is_nan() {
        0
    } else {
        v.clamp(0.0, 255.0).trunc() as u8
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        Rgb::from_hex(&literal).map_err(serde::de::Error::custom)
    }
}

/// Text color to use on top of a filled shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    Light,
    Dark,
}

/// Bucket for [`BRIGHTNESS_DELTAS`]: `round(100 * |value| mod 3)`, in
/// `0..=3`. Bucket 3 has no delta.
pub fn delta_index(value: f64) -> usize {
    let raw = ((100.0 * value.abs()) % 3.0).round();
    if raw.is_finite() {
        raw as usize
    } else {
        BRIGHTNESS_DELTAS.len()
    }
}

/// `0.2 * depth + delta * depth`, or `None` when the value falls in the
/// bucket without a delta.
pub fn brightness_amount(value: f64, depth: usize) -> Option<f64> {
    let depth = depth as f64;
    let delta = BRIGHTNESS_DELTAS.get(delta_index(value))?;
    Some(0.2 * depth + delta * depth)
}

/// Color of a node below the first ring, derived from its parent.
///
/// Without a delta the shade collapses to black, except that a black
/// parent still yields the floor grey.
pub fn derive_color(parent: Rgb, value: f64, depth: usize) -> Rgb {
    match brightness_amount(value, depth) {
        Some(amount) => parent.brighter(amount),
        None if parent == Rgb::BLACK => FLOOR_GREY,
        None => Rgb::BLACK,
    }
}

/// Round-robin palette counter for first-ring nodes.
///
/// One cursor lives for the whole process and is never reset by a chart
/// refresh, so the same group can pick up a different palette entry on the
/// next rebuild.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteCursor {
    issued: usize,
}

impl PaletteCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_color(&mut self) -> Rgb {
        let color = PALETTE[self.issued % PALETTE.len()];
        self.issued = self.issued.wrapping_add(1);
        color
    }

    /// Colors handed out so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_value_at_depth_two_uses_zero_delta() {
        assert_eq!(delta_index(0.5), 2);
        assert!((brightness_amount(0.5, 2).unwrap() - 0.4).abs() < 1e-12);
        let parent = Rgb::from_hex("#93648D").unwrap();
        assert_eq!(derive_color(parent, 0.5, 2).to_hex(), "#a973a2");
    }

    #[test]
    fn round_up_bucket_has_no_delta() {
        assert_eq!(delta_index(0.026), 3);
        assert_eq!(delta_index(0.029), 3);
        assert_eq!(delta_index(0.3), 0);
        assert_eq!(delta_index(-0.5), 2);
        assert_eq!(delta_index(0.01), 1);
        assert_eq!(brightness_amount(0.026, 2), None);
    }

    #[test]
    fn missing_delta_collapses_to_black() {
        let parent = Rgb::from_hex("#93648D").unwrap();
        assert_eq!(derive_color(parent, 0.026, 2), Rgb::BLACK);
        // a black parent lifts its children to the floor grey
        assert_eq!(derive_color(Rgb::BLACK, 0.5, 3).to_hex(), "#1e1e1e");
        assert_eq!(derive_color(Rgb::BLACK, 0.026, 3).to_hex(), "#1e1e1e");
    }

    #[test]
    fn brighter_lifts_black_and_dark_channels() {
        assert_eq!(Rgb::BLACK.brighter(0.4).to_hex(), "#1e1e1e");
        assert_eq!(Rgb::BLACK.brighter(3.0), Rgb::new(30, 30, 30));
        assert_eq!(Rgb::new(10, 0, 0).brighter(0.0), Rgb::new(30, 0, 0));
        assert_eq!(Rgb::new(0x40, 0x40, 0x40).brighter(0.6), Rgb::new(79, 79, 79));
        assert_eq!(Rgb::new(255, 255, 255).brighter(3.0), Rgb::new(255, 255, 255));
    }

    #[test]
    fn text_tone_follows_luminance() {
        assert_eq!(Rgb::from_hex("#93648D").unwrap().text_tone(), TextTone::Light);
        assert_eq!(Rgb::from_hex("#4CC3D9").unwrap().text_tone(), TextTone::Dark);
        assert_eq!(Rgb::from_hex("#404040").unwrap().text_tone(), TextTone::Light);
    }

    #[test]
    fn cursor_rotates_through_palette() {
        let mut cursor = PaletteCursor::new();
        let first: Vec<_> = (0..PALETTE.len()).map(|_| cursor.next_color()).collect();
        assert_eq!(first, PALETTE.to_vec());
        assert_eq!(cursor.next_color(), PALETTE[0]);
        assert_eq!(cursor.issued(), 6);
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::new(255, 255, 255));
        assert_eq!(Rgb::from_hex("#7BC8A4").unwrap().as_u32(), 0x7BC8A4);
        assert!(Rgb::from_hex("7BC8A4").is_err());
        assert!(Rgb::from_hex("#zzzzzz").is_err());
    }
}
