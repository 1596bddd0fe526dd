//! Decomposition of CSS color strings into hue, saturation and lightness

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Errors that can occur when parsing a color string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not a supported color notation
    #[error("Unsupported color notation: {0}")]
    Unsupported(String),
}

/// A color in HSLA space
///
/// Hue is in degrees, saturation and lightness in percent, alpha in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

fn hsl_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^hsla?\(\s*(-?[\d.]+)(?:deg)?\s*,\s*([\d.]+)%\s*,\s*([\d.]+)%\s*(?:,\s*([\d.]+)\s*)?\)$",
        )
        .expect("valid hsl regex")
    })
}

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$").expect("valid hex regex")
    })
}

/// Parse `hsl(..)`, `hsla(..)` or `#rrggbb` into its HSLA components
pub fn parse_color(text: &str) -> Result<Hsla, ColorError> {
    let text = text.trim();
    let unsupported = || ColorError::Unsupported(text.to_string());

    if let Some(caps) = hsl_pattern().captures(text) {
        let number = |i: usize| -> Result<f64, ColorError> {
            caps[i].parse::<f64>().map_err(|_| unsupported())
        };
        let alpha = match caps.get(4) {
            Some(m) => m.as_str().parse::<f64>().map_err(|_| unsupported())?,
            None => 1.0,
        };
        return Ok(Hsla {
            h: number(1)?.rem_euclid(360.0),
            s: number(2)?,
            l: number(3)?,
            a: alpha,
        });
    }

    if let Some(caps) = hex_pattern().captures(text) {
        let channel = |i: usize| -> Result<f64, ColorError> {
            u8::from_str_radix(&caps[i], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| unsupported())
        };
        return Ok(rgb_to_hsla(channel(1)?, channel(2)?, channel(3)?));
    }

    Err(unsupported())
}

fn rgb_to_hsla(r: f64, g: f64, b: f64) -> Hsla {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta == 0.0 {
        return Hsla {
            h: 0.0,
            s: 0.0,
            l: l * 100.0,
            a: 1.0,
        };
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsla {
        h,
        s: s * 100.0,
        l: l * 100.0,
        a: 1.0,
    }
}

/// Format a component without a trailing `.0` for whole numbers
pub fn format_component(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
