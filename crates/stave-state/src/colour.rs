//! ARGB colour value, round-tripped through its canonical string encoding.
//!
//! Colours travel inside serialized payloads as `#AARRGGBB` strings. Parsing
//! also accepts `#RRGGBB` (alpha defaults to opaque). Equality is value
//! equality on the packed ARGB word, which is what skip-if-unchanged guards
//! compare.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StateError;

/// A packed ARGB colour.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour(u32);

impl Colour {
    /// Build from an ARGB word.
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Build an opaque colour from RGB components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The packed ARGB word.
    pub const fn argb(&self) -> u32 {
        self.0
    }

    pub const fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(&self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl fmt::Debug for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Colour({self})")
    }
}

impl FromStr for Colour {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| StateError::InvalidColour(s.to_string()))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StateError::InvalidColour(s.to_string()));
        }
        match hex.len() {
            8 => {
                let argb = u32::from_str_radix(hex, 16)
                    .map_err(|_| StateError::InvalidColour(s.to_string()))?;
                Ok(Self(argb))
            }
            6 => {
                let rgb = u32::from_str_radix(hex, 16)
                    .map_err(|_| StateError::InvalidColour(s.to_string()))?;
                Ok(Self(0xFF00_0000 | rgb))
            }
            _ => Err(StateError::InvalidColour(s.to_string())),
        }
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl TryFrom<String> for Colour {
    type Error = StateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_full_argb() {
        let c: Colour = "#80FF0000".parse().unwrap();
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.red(), 0xFF);
        assert_eq!(c.green(), 0);
        assert_eq!(c.blue(), 0);
    }

    #[test]
    fn short_form_defaults_to_opaque() {
        let c: Colour = "#00FF00".parse().unwrap();
        assert_eq!(c, Colour::from_rgb(0, 0xFF, 0));
        assert_eq!(c.alpha(), 0xFF);
    }

    #[test]
    fn display_is_canonical_uppercase() {
        let c = Colour::from_argb(0xFF00_FF00);
        assert_eq!(c.to_string(), "#FF00FF00");
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in ["", "FF0000", "#F00", "#GG0000FF", "#12345", "#1234567"] {
            assert!(
                bad.parse::<Colour>().is_err(),
                "expected parse failure for {bad:?}"
            );
        }
    }

    #[test]
    fn lowercase_input_accepted() {
        let c: Colour = "#ff8040c0".parse().unwrap();
        assert_eq!(c.to_string(), "#FF8040C0");
    }

    proptest! {
        #[test]
        fn string_encoding_round_trips(argb in any::<u32>()) {
            let colour = Colour::from_argb(argb);
            let parsed: Colour = colour.to_string().parse().unwrap();
            prop_assert_eq!(colour, parsed);
        }
    }
}
