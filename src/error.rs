//! Error types for configuration loading and audio playback
//!
//! Neither kind ever stops the simulation: config errors fall back to
//! defaults, audio errors are logged and the cue is skipped.

use core::fmt;
use std::path::PathBuf;

use crate::audio::SoundEffect;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(problems) => write!(f, "invalid config: {}", problems.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioError {
    /// No sample is loaded for this effect
    MissingAsset(SoundEffect),
    /// Output device could not be opened or went away
    DeviceUnavailable(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAsset(effect) => write!(f, "no sound loaded for {effect:?}"),
            Self::DeviceUnavailable(reason) => write!(f, "audio device unavailable: {reason}"),
        }
    }
}

impl std::error::Error for AudioError {}
