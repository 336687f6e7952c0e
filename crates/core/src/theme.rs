//! Built-in color themes.
//!
//! A [`Theme`] names the five colors the renderer needs: page/body
//! background, trail head, trail tail, and the two stops of the water
//! gradient. Exactly one theme is active at a time; callers copy the value
//! out per frame, so switching can never produce a partially-applied
//! palette.

use crate::color::Srgb;
use crate::error::EngineError;
use serde::Serialize;

/// A named set of scene colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    /// Page background behind the canvas.
    pub body: Srgb,
    /// Color of the trail near the head.
    pub head: Srgb,
    /// Color of the trail away from the head.
    pub tail: Srgb,
    /// Top stop of the water gradient.
    pub water_top: Srgb,
    /// Bottom stop of the water gradient.
    pub water_bottom: Srgb,
}

/// The built-in themes, in cycling order.
const THEMES: [Theme; 4] = [
    Theme {
        name: "Abyss",
        body: Srgb::from_u8(0x07, 0x12, 0x25),
        head: Srgb::from_u8(0x69, 0xe3, 0xff),
        tail: Srgb::from_u8(0x2d, 0xd4, 0xbf),
        water_top: Srgb::from_u8(0x0b, 0x20, 0x3f),
        water_bottom: Srgb::from_u8(0x05, 0x10, 0x24),
    },
    Theme {
        name: "Noctiluca",
        body: Srgb::from_u8(0x02, 0x08, 0x13),
        head: Srgb::from_u8(0xa1, 0xa6, 0xff),
        tail: Srgb::from_u8(0x7a, 0xc8, 0xff),
        water_top: Srgb::from_u8(0x0b, 0x10, 0x36),
        water_bottom: Srgb::from_u8(0x05, 0x08, 0x17),
    },
    Theme {
        name: "Sunset",
        body: Srgb::from_u8(0x0b, 0x10, 0x22),
        head: Srgb::from_u8(0xff, 0xd0, 0x7a),
        tail: Srgb::from_u8(0xff, 0x8f, 0x5a),
        water_top: Srgb::from_u8(0x1a, 0x1a, 0x3f),
        water_bottom: Srgb::from_u8(0x0b, 0x0b, 0x1e),
    },
    Theme {
        name: "Emerald",
        body: Srgb::from_u8(0x04, 0x15, 0x13),
        head: Srgb::from_u8(0x7b, 0xff, 0xd4),
        tail: Srgb::from_u8(0x37, 0xf0, 0xa4),
        water_top: Srgb::from_u8(0x0b, 0x23, 0x30),
        water_bottom: Srgb::from_u8(0x03, 0x10, 0x15),
    },
];

impl Theme {
    /// Number of built-in themes.
    pub fn count() -> usize {
        THEMES.len()
    }

    /// Returns the theme at `index`, wrapping past the end.
    pub fn by_index(index: usize) -> Theme {
        THEMES[index % THEMES.len()]
    }

    /// Looks up a theme by name (case insensitive).
    ///
    /// Returns `EngineError::UnknownTheme` if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Theme, EngineError> {
        THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| EngineError::UnknownTheme(name.to_string()))
    }

    /// Returns the names of all built-in themes, in cycling order.
    pub fn list_names() -> Vec<&'static str> {
        THEMES.iter().map(|t| t.name).collect()
    }

    /// Returns the cycling index of this theme.
    pub fn index(&self) -> usize {
        THEMES
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0)
    }
}
