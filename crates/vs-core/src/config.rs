use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::{GlyphRamp, RAMP_COMPACT};
use crate::error::CoreError;

/// Configuration du rendu et de la lecture.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine ;
/// les flags CLI priment sur le fichier.
///
/// # Example
/// ```
/// use vs_core::config::PlayerConfig;
/// let config = PlayerConfig::default();
/// assert_eq!(config.width, 100);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// Largeur de sortie en colonnes.
    pub width: u16,
    /// Correction verticale pour cellules de terminal non carrées.
    /// Typiquement 2.0–2.4 selon la police.
    pub height_scale: f32,
    /// Rampe de glyphes, du plus sombre au plus dense.
    pub charset: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height_scale: 2.4,
            charset: RAMP_COMPACT.to_string(),
        }
    }
}

impl PlayerConfig {
    /// Vérifie les invariants de la configuration.
    ///
    /// # Errors
    /// `CoreError::Config` si `width == 0` ou `height_scale <= 0`,
    /// `CoreError::RampTooShort` si le charset compte moins de 2 caractères.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.width == 0 {
            return Err(CoreError::Config("width doit être ≥ 1".to_string()));
        }
        if self.height_scale <= 0.0 {
            return Err(CoreError::Config(format!(
                "height_scale doit être > 0 (reçu {})",
                self.height_scale
            )));
        }
        let len = self.charset.chars().count();
        if len < 2 {
            return Err(CoreError::RampTooShort { len });
        }
        Ok(())
    }

    /// Construit la rampe de glyphes depuis le charset configuré.
    ///
    /// # Errors
    /// `CoreError::RampTooShort` si le charset est trop court.
    pub fn ramp(&self) -> Result<GlyphRamp, CoreError> {
        GlyphRamp::new(&self.charset)
    }
}

/// Structure du fichier TOML, tous champs optionnels.
#[derive(Deserialize)]
struct ConfigFile {
    player: Option<PlayerSection>,
}

/// Section `[player]` du fichier TOML.
#[derive(Deserialize)]
struct PlayerSection {
    width: Option<u16>,
    height_scale: Option<f32>,
    charset: Option<String>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use vs_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("vidscii.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PlayerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut config = PlayerConfig::default();

    if let Some(p) = file.player {
        if let Some(v) = p.width {
            config.width = v;
        }
        if let Some(v) = p.height_scale {
            config.height_scale = v;
        }
        if let Some(v) = p.charset {
            config.charset = v;
        }
    }

    Ok(config)
}
