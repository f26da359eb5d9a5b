use std::time::{Duration, Instant};

use anyhow::Result;

use vs_ascii::raster::rasterize;
use vs_core::charset::GlyphRamp;
use vs_core::config::PlayerConfig;
use vs_core::stop::StopToken;
use vs_core::traits::{DisplaySink, FrameSource};

/// Cadence substituée quand le conteneur ne rapporte rien d'exploitable.
const DEFAULT_FRAME_RATE: f64 = 24.0;

/// Période du rapport de débit, en frames.
const STATUS_EVERY: u64 = 30;

/// Issue d'une lecture terminée. Les deux cas sont des sorties normales,
/// code de sortie 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEnd {
    /// Fin de flux — la source n'a plus de frame.
    Exhausted,
    /// Signal d'arrêt reçu pendant la lecture.
    Interrupted,
}

/// Scheduler de lecture : possède la boucle, le timing et les compteurs.
///
/// Monothread et coopératif — rastérisation, affichage et pacing
/// s'exécutent dans le même flot de contrôle ; le seul point de
/// suspension est l'attente de pacing en fin d'itération. Les compteurs
/// sont des champs de l'instance, pas d'état ambiant : plusieurs
/// sessions indépendantes restent possibles et les tests déterministes.
pub struct Player<S: DisplaySink> {
    out_w: u16,
    height_scale: f32,
    ramp: GlyphRamp,
    sink: S,
    stop: StopToken,
    /// Frames affichées depuis l'entrée en lecture.
    frames_rendered: u64,
}

impl<S: DisplaySink> Player<S> {
    /// Construit un scheduler prêt à jouer. La config est supposée
    /// validée en amont.
    pub fn new(config: &PlayerConfig, ramp: GlyphRamp, sink: S, stop: StopToken) -> Self {
        Self {
            out_w: config.width,
            height_scale: config.height_scale,
            ramp,
            sink,
            stop,
            frames_rendered: 0,
        }
    }

    /// Joue la source jusqu'à épuisement ou interruption.
    ///
    /// Prend possession de la source ; le handle est libéré exactement
    /// une fois au retour, sur tous les chemins, erreur comprise.
    ///
    /// Chaque itération mesure son coût réel et dort le reliquat de
    /// l'intervalle de frame. Pas de rattrapage : une frame lente
    /// retarde toutes les suivantes au lieu d'en sauter.
    ///
    /// # Errors
    /// Erreur de rastérisation ou erreur I/O du sink — fatales, le
    /// handle de la source est tout de même libéré.
    pub fn play(&mut self, mut source: Box<dyn FrameSource>) -> Result<PlaybackEnd> {
        let reported = source.frame_rate();
        let rate = if reported > 0.0 {
            reported
        } else {
            log::warn!(
                "Cadence rapportée inexploitable ({reported}), défaut {DEFAULT_FRAME_RATE} fps"
            );
            DEFAULT_FRAME_RATE
        };
        let frame_interval = Duration::from_secs_f64(1.0 / rate);
        log::info!("Lecture à {rate:.3} fps");

        self.frames_rendered = 0;
        let loop_start = Instant::now();

        loop {
            // Annulation coopérative, honorée entre les itérations : une
            // frame en cours de rendu est abandonnée sans être affichée.
            if self.stop.is_raised() {
                return Ok(PlaybackEnd::Interrupted);
            }
            let iteration_start = Instant::now();

            let Some(frame) = source.next_frame() else {
                return Ok(PlaybackEnd::Exhausted);
            };

            let text = rasterize(&frame, &self.ramp, self.out_w, self.height_scale)?;

            // Reset + write dos à dos : une seule mise à jour visible.
            self.sink.reset_cursor()?;
            self.sink.write(&text)?;

            self.frames_rendered += 1;
            if self.frames_rendered % STATUS_EVERY == 0 {
                self.report_throughput(loop_start);
            }

            let elapsed = iteration_start.elapsed();
            if let Some(remaining) = frame_interval.checked_sub(elapsed) {
                // Attente annulable : une interruption pendant le sleep
                // sort immédiatement, sans write supplémentaire.
                if self.stop.sleep(remaining) {
                    return Ok(PlaybackEnd::Interrupted);
                }
            }
            // elapsed >= frame_interval : on enchaîne sans dormir.
        }
    }

    /// Ligne de statut débit, best-effort : un échec d'écriture est
    /// logué et n'affecte jamais le timing de la frame suivante.
    fn report_throughput(&mut self, loop_start: Instant) {
        let elapsed = loop_start.elapsed().as_secs_f64();
        if elapsed <= 0.0 {
            return;
        }
        let fps = self.frames_rendered as f64 / elapsed;
        if let Err(e) = self.sink.write(&format!("\nFPS : {fps:.2}")) {
            log::debug!("Rapport de débit ignoré : {e}");
        }
    }
}
