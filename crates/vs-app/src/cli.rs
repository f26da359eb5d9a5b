use std::path::PathBuf;

use clap::Parser;

use vs_core::charset::ramp_by_name;
use vs_core::config::PlayerConfig;

/// vidscii — Terminal ASCII video player.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source vidéo : URL (téléchargée via yt-dlp) ou chemin local.
    pub source: String,

    /// Largeur de sortie en colonnes.
    #[arg(long)]
    pub width: Option<u16>,

    /// Correction verticale pour cellules de terminal non carrées.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// Rampe de glyphes : "compact", "standard", "blocks".
    #[arg(long)]
    pub charset: Option<String>,

    /// Fichier de configuration TOML.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Applique les flags CLI par-dessus la configuration chargée.
    pub fn apply_overrides(&self, config: &mut PlayerConfig) {
        if let Some(w) = self.width {
            config.width = w;
        }
        if let Some(hs) = self.height_scale {
            config.height_scale = hs;
        }
        if let Some(ref name) = self.charset {
            if let Some(ramp) = ramp_by_name(name) {
                config.charset = ramp.to_string();
            } else {
                log::warn!("Charset inconnu '{name}', utilisation du charset configuré.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn source_is_required() {
        assert!(Cli::try_parse_from(["vidscii"]).is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_defaults() {
        let cli = parse(&[
            "vidscii",
            "clip.mp4",
            "--width",
            "80",
            "--height-scale",
            "2.0",
            "--charset",
            "blocks",
        ]);
        let mut config = PlayerConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.width, 80);
        assert!((config.height_scale - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.charset, vs_core::charset::RAMP_BLOCKS);
    }

    #[test]
    fn unknown_charset_keeps_configured_ramp() {
        let cli = parse(&["vidscii", "clip.mp4", "--charset", "nope"]);
        let mut config = PlayerConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.charset, vs_core::charset::RAMP_COMPACT);
    }

    #[test]
    fn defaults_leave_config_untouched() {
        let cli = parse(&["vidscii", "clip.mp4"]);
        let mut config = PlayerConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.width, 100);
        assert!((config.height_scale - 2.4).abs() < f32::EPSILON);
    }
}
