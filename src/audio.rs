use macroquad::audio::{load_sound, play_sound, PlaySoundParams, Sound};
use tracing::{info, warn};

use crate::config::ConfigError;

const MUSIC_VOLUME: f32 = 0.6;

/// Looping background track. Playback waits for the first click.
pub struct BackgroundMusic {
    sound: Option<Sound>,
    started: bool,
}

impl BackgroundMusic {
    pub fn silent() -> Self {
        Self {
            sound: None,
            started: false,
        }
    }

    pub async fn load(path: &str) -> Result<Self, ConfigError> {
        let sound = load_sound(path).await.map_err(|e| ConfigError::Audio {
            path: path.to_string(),
            message: format!("{e:?}"),
        })?;
        info!(path, "music loaded");
        Ok(Self {
            sound: Some(sound),
            started: false,
        })
    }

    /// Load if a path was given; fall back to silence on failure.
    pub async fn load_optional(path: Option<&str>) -> Self {
        match path {
            Some(path) => match Self::load(path).await {
                Ok(music) => music,
                Err(err) => {
                    warn!(%err, "continuing without music");
                    Self::silent()
                }
            },
            None => Self::silent(),
        }
    }

    pub fn start(&mut self) {
        if self.started {
            return;
        }
        if let Some(sound) = &self.sound {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: true,
                    volume: MUSIC_VOLUME,
                },
            );
            self.started = true;
            info!("music started");
        }
    }
}
