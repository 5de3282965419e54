//! User configuration stored as TOML under the platform config directory

use std::path::{Path, PathBuf};

use fretwise_core::{BoxGenerator, BoxOptions, Fretboard, TriadEngine, TriadOptions, Tuning};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FretwiseConfig {
    /// Open-string note names, lowest string first
    pub tuning: Vec<String>,
    pub fretboard_max_fret: u8,
    pub triads: TriadOptions,
    pub boxes: BoxOptions,
}

impl Default for FretwiseConfig {
    fn default() -> Self {
        Self {
            tuning: ["E", "A", "D", "G", "B", "E"].map(String::from).to_vec(),
            fretboard_max_fret: Fretboard::DEFAULT_MAX_FRET,
            triads: TriadOptions::default(),
            boxes: BoxOptions::default(),
        }
    }
}

impl FretwiseConfig {
    pub fn tuning(&self) -> Result<Tuning> {
        Ok(Tuning::from_names(self.tuning.as_slice())?)
    }

    pub fn fretboard(&self) -> Result<Fretboard> {
        Ok(Fretboard::new(self.tuning()?, self.fretboard_max_fret))
    }

    pub fn triad_engine(&self) -> Result<TriadEngine> {
        let triads = &self.triads;
        if triads.practical_max_fret > triads.max_fret {
            warn!(
                "triads.practical_max_fret ({}) is above triads.max_fret ({}) and has no effect",
                triads.practical_max_fret, triads.max_fret
            );
        }
        if triads.max_fret > self.fretboard_max_fret {
            warn!(
                "triads.max_fret ({}) reaches past fretboard_max_fret ({})",
                triads.max_fret, self.fretboard_max_fret
            );
        }
        Ok(TriadEngine::new(self.tuning()?, triads.clone()))
    }

    pub fn box_generator(&self) -> Result<BoxGenerator> {
        Ok(BoxGenerator::with_fretboard(self.fretboard()?, self.boxes.clone()))
    }
}

/// `<config_dir>/fretwise/config.toml`, or `./fretwise/config.toml` when the
/// platform has no config directory.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fretwise")
        .join("config.toml")
}

/// Load the user config. A missing file yields defaults.
pub fn load_config() -> Result<FretwiseConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<FretwiseConfig> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(FretwiseConfig::default());
    }
    let text = std::fs::read_to_string(path)?;
    let config = toml::from_str(&text)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn save_config(config: &FretwiseConfig) -> Result<PathBuf> {
    let path = config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

pub fn save_config_to(config: &FretwiseConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(config)?)?;
    info!("Saved config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use fretwise_core::{FretwiseError, TonalCenter};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, FretwiseConfig::default());
        assert_eq!(config.tuning().unwrap(), Tuning::standard());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = FretwiseConfig::default();
        config.tuning = ["D", "A", "D", "G", "B", "E"].map(String::from).to_vec();
        config.boxes.experimental_blues_box = true;
        config.triads.max_stretch = 4;

        save_config_to(&config, &path).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fretboard_max_fret = 22\n\n[boxes]\nexperimental_blues_box = true\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.fretboard_max_fret, 22);
        assert!(config.boxes.experimental_blues_box);
        assert_eq!(config.triads, TriadOptions::default());
        assert_eq!(config.tuning.len(), 6);
    }

    #[test]
    fn test_box_generator_uses_configured_board() {
        let config = FretwiseConfig {
            fretboard_max_fret: 21,
            ..FretwiseConfig::default()
        };
        let generator = config.box_generator().unwrap();
        assert_eq!(generator.fretboard().max_fret(), 21);
        assert_eq!(generator.fretboard().tuning(), &Tuning::standard());
    }

    #[test]
    fn test_tonal_center_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[boxes]\ntonal_center = \"major\"\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.boxes.tonal_center, TonalCenter::Major);
        assert!(!config.boxes.experimental_blues_box);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fretboard_max_fret = \"lots\"").unwrap();
        assert!(matches!(load_config_from(&path), Err(ServiceError::Parse(_))));
    }

    #[test]
    fn test_bad_tuning() {
        let config = FretwiseConfig {
            tuning: vec!["E".into(), "Q".into()],
            ..FretwiseConfig::default()
        };
        assert!(matches!(
            config.tuning(),
            Err(ServiceError::Engine(FretwiseError::UnknownNote(_)))
        ));
    }
}
