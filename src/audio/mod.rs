use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundSettings},
    Volume,
};

/// Preloaded sound clips and the device they play on.
pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<String, StaticSoundData>,
    pub volume: f64,
}

impl AudioContext {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("failed to initialize audio manager: {e}; audio disabled");
                None
            }
        };
        Self { manager, sounds: HashMap::new(), volume: 1.0 }
    }

    /// A context that never touches the audio device.
    pub fn disabled() -> Self {
        Self { manager: None, sounds: HashMap::new(), volume: 1.0 }
    }

    /// Returns true if audio hardware is available.
    pub fn is_available(&self) -> bool { self.manager.is_some() }

    pub fn has_sound(&self, name: &str) -> bool { self.sounds.contains_key(name) }

    /// Load a sound file (OGG, WAV) into memory under `name`.
    pub fn load_sound<P: AsRef<Path>>(&mut self, name: &str, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let sound = StaticSoundData::from_file(path)
            .with_context(|| format!("loading sound '{name}' from {}", path.display()))?;
        self.sounds.insert(name.to_string(), sound);
        Ok(())
    }

    /// Play a loaded clip once. Unknown names and a missing device are
    /// silently ignored.
    pub fn play(&mut self, name: &str) {
        let Some(manager) = self.manager.as_mut() else { return; };
        let Some(data) = self.sounds.get(name) else {
            log::debug!("no sound named '{name}'");
            return;
        };
        let mut settings = StaticSoundSettings::new();
        settings.volume = Volume::Amplitude(self.volume).into();
        if let Err(e) = manager.play(data.clone().with_settings(settings)) {
            log::warn!("failed to play '{name}': {e}");
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new() }
}
