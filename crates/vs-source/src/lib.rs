/// Collaborateurs externes de vidscii : acquisition et décodage.
///
/// Acquisition via `yt-dlp` en subprocess, décodage via `ffmpeg`/`ffprobe`
/// en subprocess (frames gray brutes sur stdout). Prérequis runtime :
/// les trois binaires accessibles dans le PATH.
pub mod fetch;
pub mod video;

pub use fetch::resolve_source;
pub use video::{VideoInfo, VideoSource, probe_video};
