use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque RGB display attribute. Physics never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour(pub [u8; 3]);

/// Palette used for randomly generated particles.
pub const DEFAULT_PALETTE: [Colour; 4] = [
    Colour([0xe6, 0x7e, 0x22]),
    Colour([0x2e, 0xcc, 0x71]),
    Colour([0x8e, 0x44, 0xad]),
    Colour([0x1a, 0xbc, 0x9c]),
];

impl Colour {
    /// Parse a `#rrggbb` (or `rrggbb`) hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(Error::InvalidParam(format!(
                "colour must be 6 hex digits, got {s:?}"
            )));
        }
        let mut rgb = [0u8; 3];
        for (k, c) in rgb.iter_mut().enumerate() {
            *c = u8::from_str_radix(&hex[2 * k..2 * k + 2], 16)
                .map_err(|_| Error::InvalidParam(format!("invalid hex colour {s:?}")))?;
        }
        Ok(Self(rgb))
    }

    /// Pick a colour uniformly from [`DEFAULT_PALETTE`].
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        DEFAULT_PALETTE[rng.random_range(0..DEFAULT_PALETTE.len())]
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn hex_parse_and_display() -> Result<()> {
        let c = Colour::from_hex("#e67e22")?;
        assert_eq!(c, DEFAULT_PALETTE[0]);
        assert_eq!(c.to_string(), "#e67e22");
        assert_eq!(Colour::from_hex("2ecc71")?, DEFAULT_PALETTE[1]);
        Ok(())
    }

    #[test]
    fn bad_hex_rejected() {
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn random_is_from_palette() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..32 {
            assert!(DEFAULT_PALETTE.contains(&Colour::random(&mut rng)));
        }
    }
}
