// Décodage via ffmpeg en subprocess (std::process::Command) : aucun
// binding C requis, seuls `ffmpeg` et `ffprobe` doivent être en PATH.
//
// Architecture :
//   - `probe_video` : interroge ffprobe pour obtenir width/height/fps
//   - `VideoSource` : lance ffmpeg → flux gray brut sur stdout, lu
//     frame par frame de façon synchrone par le scheduler

use std::io::Read;
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

use anyhow::{Context, Result};

use vs_core::frame::GrayFrame;
use vs_core::traits::FrameSource;

/// Métadonnées extraites via ffprobe.
#[derive(Clone, Copy, Debug)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Images par seconde (ex: 23.976, 24.0, 30.0). `0.0` si inconnue.
    pub fps: f64,
}

/// Parse un `r_frame_rate` rationnel ("24/1", "30000/1001") en fps.
///
/// Retourne `0.0` si la valeur est inexploitable — le scheduler
/// substitue alors sa cadence par défaut.
fn parse_rate(value: &str) -> f64 {
    let mut parts = value.trim().splitn(2, '/');
    let num: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0.0);
    let den: f64 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1.0);
    if den > 0.0 && num > 0.0 { num / den } else { 0.0 }
}

/// Interroge `ffprobe` pour obtenir les métadonnées du flux vidéo principal.
///
/// # Errors
/// Retourne une erreur si `ffprobe` est introuvable ou si le fichier
/// ne contient aucun flux vidéo décodable.
///
/// # Example
/// ```no_run
/// use vs_source::video::probe_video;
/// use std::path::Path;
/// let info = probe_video(Path::new("video.mp4")).unwrap();
/// assert!(info.width > 0);
/// ```
pub fn probe_video(path: &Path) -> Result<VideoInfo> {
    let path_str = path.to_str().context("Chemin vidéo invalide (non-UTF8)")?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate",
            "-of",
            "default=noprint_wrappers=1",
            "-i",
            path_str,
        ])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .context(
            "Impossible de lancer ffprobe. Vérifiez que ffprobe est installé et dans le PATH.",
        )?;

    let text = String::from_utf8_lossy(&output.stdout);

    let mut width: u32 = 0;
    let mut height: u32 = 0;
    let mut fps: f64 = 0.0;

    for line in text.lines() {
        if let Some(val) = line.strip_prefix("width=") {
            width = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("height=") {
            height = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("r_frame_rate=") {
            fps = parse_rate(val);
        }
    }

    if width == 0 || height == 0 {
        anyhow::bail!("ffprobe n'a trouvé aucun flux vidéo dans {}", path.display());
    }

    log::info!(
        "probe_video: {width}x{height} @ {fps:.3}fps — {}",
        path.display()
    );

    Ok(VideoInfo { width, height, fps })
}

/// Source vidéo décodée par un subprocess `ffmpeg`.
///
/// Chaque frame = `width × height` bytes (gray 8 bits, row-major, sans
/// padding), lue de façon synchrone depuis stdout du subprocess. La
/// conversion en niveaux de gris est déléguée au décodeur
/// (`-pix_fmt gray`). Le handle est libéré exactement une fois, par
/// `Drop`, quel que soit le chemin de sortie.
pub struct VideoSource {
    child: Child,
    stdout: ChildStdout,
    info: VideoInfo,
    frame_bytes: usize,
}

impl VideoSource {
    /// Probe le fichier puis lance le pipe de décodage.
    ///
    /// `-an` supprime l'audio, `-loglevel error` garde stderr muet en
    /// fonctionnement normal.
    ///
    /// # Errors
    /// Retourne une erreur si le probe échoue ou si `ffmpeg` ne peut pas
    /// être lancé.
    pub fn open(path: &Path) -> Result<Self> {
        let info = probe_video(path)?;
        let path_str = path.to_str().context("Chemin vidéo invalide (non-UTF8)")?;

        let mut child = Command::new("ffmpeg")
            .args([
                "-i",
                path_str,
                "-f",
                "rawvideo",
                "-pix_fmt",
                "gray", // 1 byte/pixel, conversion gray côté décodeur
                "-an",
                "-hide_banner",
                "-loglevel",
                "error",
                "pipe:1",
            ])
            .stdout(Stdio::piped())
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context(
                "Impossible de lancer ffmpeg. Vérifiez que ffmpeg est installé et dans le PATH.",
            )?;

        let stdout = child
            .stdout
            .take()
            .context("Pipe stdout de ffmpeg indisponible")?;

        log::debug!("ffmpeg lancé : {}x{} gray", info.width, info.height);

        Ok(Self {
            child,
            stdout,
            info,
            frame_bytes: (info.width * info.height) as usize,
        })
    }

    /// Métadonnées du flux ouvert.
    #[must_use]
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Option<GrayFrame> {
        let mut buf = vec![0u8; self.frame_bytes];
        match read_exact_or_eof(&mut self.stdout, &mut buf) {
            Ok(true) => GrayFrame::from_data(buf, self.info.width, self.info.height).ok(),
            Ok(false) => None, // EOF : fin de flux normale
            Err(e) => {
                // Anomalie mi-flux : traitée comme une fin de flux, mais
                // distinguée dans les logs d'un EOF ordinaire.
                log::warn!("Anomalie de lecture du pipe ffmpeg, fin de lecture : {e}");
                None
            }
        }
    }

    fn frame_rate(&self) -> f64 {
        self.info.fps
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        log::debug!("Subprocess ffmpeg libéré.");
    }
}

/// Lit exactement `buf.len()` bytes depuis `reader`.
///
/// Retourne `Ok(true)` si lu avec succès, `Ok(false)` sur EOF avant
/// complétion, `Err` sur erreur I/O fatale.
fn read_exact_or_eof<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<bool> {
    let mut total = 0usize;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => return Ok(false), // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(true)
}
