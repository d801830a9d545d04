/// Effect toggles handed to the pipeline host
///
/// The host never reads process-wide state; the playback engine builds an
/// `EffectsConfig`, passes it in at construction, and pushes later changes
/// through the host's setters.
use crate::error::{EffectsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable prefix, e.g. `CIRRUS__BASS_BOOST=true`
pub const ENV_PREFIX: &str = "CIRRUS";

/// Which effects are switched on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Stereo auto-pan ("8D audio")
    pub auto_pan: bool,

    /// 800 Hz low-pass (takes priority over bass boost)
    pub muffled: bool,

    /// +10 dB low-shelf at 100 Hz
    pub bass_boost: bool,

    /// 150 ms feedback echo
    pub reverb: bool,
}

impl EffectsConfig {
    /// Everything off
    pub fn none() -> Self {
        Self::default()
    }

    /// Everything on (muffled overrides bass boost in the filter)
    pub fn all() -> Self {
        Self {
            auto_pan: true,
            muffled: true,
            bass_boost: true,
            reverb: true,
        }
    }

    /// True when no effect would touch the audio
    pub fn is_bypass(&self) -> bool {
        !(self.auto_pan || self.muffled || self.bass_boost || self.reverb)
    }

    /// Load configuration from an optional TOML file and the environment
    ///
    /// Environment variables (`CIRRUS__AUTO_PAN`, `CIRRUS__MUFFLED`, ...)
    /// override values from the file. A missing file is skipped.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            if path.exists() {
                settings = settings.add_source(config::File::from(path));
            } else {
                debug!("Effects config {:?} not found, using defaults", path);
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| EffectsError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| EffectsError::Config(e.to_string()))
    }

    /// Parse configuration from an in-memory TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| EffectsError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_is_bypass() {
        let config = EffectsConfig::default();
        assert!(config.is_bypass());
        assert_eq!(config, EffectsConfig::none());
        assert!(!EffectsConfig::all().is_bypass());
    }

    #[test]
    fn parse_partial_toml() {
        let config = EffectsConfig::from_toml_str("bass_boost = true\nreverb = true\n").unwrap();

        assert!(config.bass_boost);
        assert!(config.reverb);
        assert!(!config.muffled);
        assert!(!config.auto_pan);
    }

    #[test]
    fn parse_empty_toml() {
        let config = EffectsConfig::from_toml_str("").unwrap();
        assert!(config.is_bypass());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = EffectsConfig::from_toml_str("muffled = \"loud\"").unwrap_err();
        assert!(matches!(err, EffectsError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effects.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "auto_pan = true").unwrap();
        writeln!(file, "muffled = true").unwrap();
        drop(file);

        let config = EffectsConfig::load(Some(&path)).unwrap();

        assert!(config.auto_pan);
        assert!(config.muffled);
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EffectsConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.reverb, EffectsConfig::default().reverb);
    }

    #[test]
    fn environment_overrides_file() {
        // Only this test touches bass_boost, so parallel load tests are unaffected
        let key = format!("{ENV_PREFIX}__BASS_BOOST");
        let previous = std::env::var(&key).ok();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("effects.toml");
        std::fs::write(&path, "bass_boost = false\n").unwrap();

        std::env::set_var(&key, "true");
        let loaded = EffectsConfig::load(Some(&path));
        match previous {
            Some(value) => std::env::set_var(&key, value),
            None => std::env::remove_var(&key),
        }

        assert!(loaded.unwrap().bass_boost);
    }
}
