/// Types, contrats et configuration partagés de vidscii.
///
/// This crate contains the shared types, capability traits, and
/// configuration logic used across the vidscii workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod stop;
pub mod traits;

pub use charset::GlyphRamp;
pub use config::PlayerConfig;
pub use error::CoreError;
pub use frame::GrayFrame;
pub use stop::{StopHandle, StopToken, stop_pair};
pub use traits::{DisplaySink, FrameSource};
