use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Glyph ramp shorter than the 2-character minimum.
    #[error("Jeu de caractères trop court : {len} caractère(s), minimum 2")]
    RampTooShort {
        /// Number of characters in the rejected ramp.
        len: usize,
    },

    /// Invalid width/height dimensions on a decoded frame.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Raster target parameters out of range.
    #[error("Cible de rastérisation invalide : largeur {out_w}, height_scale {height_scale}")]
    InvalidTarget {
        /// Requested output width in columns.
        out_w: u16,
        /// Requested vertical correction factor.
        height_scale: f32,
    },
}
