use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// `true` si la source désigne une URL à télécharger plutôt qu'un
/// fichier local.
#[must_use]
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Nom de fichier de téléchargement dérivé de l'URL.
///
/// Stable entre invocations : une URL déjà téléchargée réutilise le même
/// fichier au lieu de re-télécharger.
///
/// # Example
/// ```
/// use vs_source::fetch::download_filename;
/// let name = download_filename("https://example.com/v/42");
/// assert!(name.starts_with("video_"));
/// assert!(name.ends_with(".mp4"));
/// ```
#[must_use]
pub fn download_filename(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    format!("video_{}.mp4", hex::encode(&digest[..4]))
}

/// Télécharge la vidéo via `yt-dlp` vers son fichier dérivé.
///
/// Fichier déjà présent : réutilisé tel quel, pas de re-téléchargement.
/// Pas de retry — tout échec (réseau, URL invalide, yt-dlp absent) est
/// fatal et remonte avec sa cause.
///
/// # Errors
/// Returns an error if `yt-dlp` cannot be launched or exits non-zero.
pub fn fetch(url: &str) -> Result<PathBuf> {
    let output = PathBuf::from(download_filename(url));
    if output.exists() {
        log::info!("Vidéo déjà téléchargée : {}", output.display());
        return Ok(output);
    }

    log::info!("Téléchargement de {url} vers {}", output.display());
    let path_str = output
        .to_str()
        .context("Chemin de téléchargement invalide (non-UTF8)")?;

    let status = Command::new("yt-dlp")
        .args(["-f", "mp4", "-o", path_str, url])
        .stdin(Stdio::null())
        .status()
        .context("Impossible de lancer yt-dlp. Vérifiez que yt-dlp est installé et dans le PATH.")?;

    if !status.success() {
        anyhow::bail!("yt-dlp a échoué pour {url} (code {status})");
    }

    log::info!("Vidéo téléchargée : {}", output.display());
    Ok(output)
}

/// Résout l'argument source vers un fichier vidéo local décodable.
///
/// URL → téléchargement via [`fetch`] ; chemin local → vérifié existant.
///
/// # Errors
/// Returns an error if the download fails or the local path does not exist.
pub fn resolve_source(source: &str) -> Result<PathBuf> {
    if is_remote(source) {
        return fetch(source);
    }
    let path = Path::new(source);
    if !path.exists() {
        anyhow::bail!("Fichier vidéo introuvable : {source}");
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_detection() {
        assert!(is_remote("https://www.tiktok.com/@user/video/42"));
        assert!(is_remote("http://example.com/clip.mp4"));
        assert!(!is_remote("clip.mp4"));
        assert!(!is_remote("/tmp/clip.mp4"));
        assert!(!is_remote("ftp://example.com/clip.mp4"));
    }

    #[test]
    fn download_filename_is_stable_and_distinct() {
        let a = download_filename("https://example.com/a");
        let b = download_filename("https://example.com/a");
        let c = download_filename("https://example.com/b");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn download_filename_shape() {
        let name = download_filename("https://example.com/a");
        let digest = name
            .strip_prefix("video_")
            .and_then(|s| s.strip_suffix(".mp4"))
            .unwrap();
        assert_eq!(digest.len(), 8);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn resolve_rejects_missing_local_path() {
        assert!(resolve_source("/nonexistent/clip.mp4").is_err());
    }

    #[test]
    fn resolve_accepts_existing_local_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let resolved = resolve_source(file.path().to_str().unwrap()).unwrap();
        assert_eq!(resolved, file.path());
    }
}
