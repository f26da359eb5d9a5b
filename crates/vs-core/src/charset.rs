use crate::error::CoreError;

/// 10 caractères — compact, bon contraste. Rampe par défaut.
pub const RAMP_COMPACT: &str = " .:-=+*#%@";

/// 70 caractères — Paul Bourke extended, bon équilibre.
pub const RAMP_STANDARD: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Blocs Unicode — pseudo-pixels.
pub const RAMP_BLOCKS: &str = " ░▒▓█";

/// Résout un nom de preset vers sa rampe.
///
/// # Example
/// ```
/// use vs_core::charset::ramp_by_name;
/// assert!(ramp_by_name("compact").is_some());
/// assert!(ramp_by_name("nope").is_none());
/// ```
#[must_use]
pub fn ramp_by_name(name: &str) -> Option<&'static str> {
    match name {
        "compact" => Some(RAMP_COMPACT),
        "standard" => Some(RAMP_STANDARD),
        "blocks" => Some(RAMP_BLOCKS),
        _ => None,
    }
}

/// Rampe de glyphes ordonnée du plus sombre au plus dense, avec LUT
/// luminance [0..255] → caractère pré-calculée au démarrage.
///
/// La quantisation est linéaire (pas de correction gamma) :
/// `index = floor(b / 255 × (N − 1))`, exact aux bornes.
///
/// # Example
/// ```
/// use vs_core::charset::GlyphRamp;
/// let ramp = GlyphRamp::new(" .:#@").unwrap();
/// assert_eq!(ramp.map(0), ' ');
/// assert_eq!(ramp.map(255), '@');
/// ```
pub struct GlyphRamp {
    lut: [char; 256],
    len: usize,
}

impl GlyphRamp {
    /// Construit une rampe depuis un charset ordonné sombre→dense.
    ///
    /// # Errors
    /// `CoreError::RampTooShort` si le charset compte moins de 2 caractères.
    pub fn new(charset: &str) -> Result<Self, CoreError> {
        let chars: Vec<char> = charset.chars().collect();
        let len = chars.len();
        if len < 2 {
            return Err(CoreError::RampTooShort { len });
        }
        let mut lut = [' '; 256];
        for (b, slot) in lut.iter_mut().enumerate() {
            *slot = chars[b * (len - 1) / 255];
        }
        Ok(Self { lut, len })
    }

    /// Map une luminance [0..255] vers un caractère de la rampe.
    ///
    /// Totale : aucune entrée n'échoue, bornes exactes
    /// (`0 → rampe[0]`, `255 → rampe[N−1]`).
    #[inline(always)]
    #[must_use]
    pub fn map(&self, luminance: u8) -> char {
        self.lut[luminance as usize]
    }

    /// Nombre de caractères de la rampe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Toujours `false` — une rampe valide compte au moins 2 caractères.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_maps_extremes() {
        let ramp = GlyphRamp::new(RAMP_COMPACT).unwrap();
        assert_eq!(ramp.map(0), ' ');
        assert_eq!(ramp.map(255), '@');
    }

    #[test]
    fn ramp_maps_extremes_all_lengths() {
        for n in 2..=16usize {
            let charset: String = ('a'..).take(n).collect();
            let first = charset.chars().next().unwrap();
            let last = charset.chars().last().unwrap();
            let ramp = GlyphRamp::new(&charset).unwrap();
            assert_eq!(ramp.map(0), first, "borne basse pour N={n}");
            assert_eq!(ramp.map(255), last, "borne haute pour N={n}");
        }
    }

    #[test]
    fn ramp_monotonic() {
        let ramp = GlyphRamp::new(RAMP_COMPACT).unwrap();
        let chars: Vec<char> = RAMP_COMPACT.chars().collect();
        let mut prev_idx = 0usize;
        for b in 0..=255u8 {
            let ch = ramp.map(b);
            let idx = chars.iter().position(|&c| c == ch).unwrap();
            assert!(idx >= prev_idx, "rampe non monotone à luminance {b}");
            prev_idx = idx;
        }
    }

    #[test]
    fn ramp_rejects_too_short() {
        assert!(matches!(
            GlyphRamp::new("@"),
            Err(CoreError::RampTooShort { len: 1 })
        ));
        assert!(matches!(
            GlyphRamp::new(""),
            Err(CoreError::RampTooShort { len: 0 })
        ));
    }

    #[test]
    fn preset_lookup() {
        assert_eq!(ramp_by_name("compact"), Some(RAMP_COMPACT));
        assert_eq!(ramp_by_name("standard"), Some(RAMP_STANDARD));
        assert_eq!(ramp_by_name("blocks"), Some(RAMP_BLOCKS));
        assert_eq!(ramp_by_name(""), None);
    }
}
