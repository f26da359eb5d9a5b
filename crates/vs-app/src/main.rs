use anyhow::Result;
use clap::Parser;

use vs_core::config::PlayerConfig;
use vs_core::stop::stop_pair;

pub mod cli;
pub mod player;
pub mod term;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config et appliquer les overrides CLI
    let config = resolve_config(&cli)?;
    config.validate()?;
    let ramp = config.ramp()?;

    // 4. Installer le handler Ctrl-C (interruption = sortie normale)
    let (stop_handle, stop_token) = stop_pair();
    ctrlc::set_handler(move || stop_handle.raise())?;

    // 5. Acquisition (URL → yt-dlp) puis ouverture du décodeur
    let video_path = vs_source::resolve_source(&cli.source)?;
    let source = vs_source::VideoSource::open(&video_path)?;

    // 6. Préparer le terminal et jouer
    let mut sink = term::TermSink::new();
    sink.clear()?;
    let mut player = player::Player::new(&config, ramp, sink, stop_token);
    match player.play(Box::new(source))? {
        player::PlaybackEnd::Exhausted => log::info!("Fin de flux, lecture terminée."),
        player::PlaybackEnd::Interrupted => println!("\nArrêté par l'utilisateur."),
    }

    Ok(())
}

/// Resolve config: fichier TOML si fourni, défauts sinon, flags CLI
/// par-dessus.
fn resolve_config(cli: &cli::Cli) -> Result<PlayerConfig> {
    let mut config = match cli.config {
        Some(ref path) => vs_core::config::load_config(path)?,
        None => PlayerConfig::default(),
    };
    cli.apply_overrides(&mut config);
    Ok(config)
}
