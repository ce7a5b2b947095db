use crate::gui::wheel::DEFAULT_SIZE;
use crate::gui::wheel::widget::DEFAULT_LABEL_FONT;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::Deserialize;
use serde_with::DeserializeFromStr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// An `#rrggbb` or `#rrggbbaa` color.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct HexColor(pub Srgba<f64>);

#[derive(Debug, Error, PartialEq)]
#[error("Invalid color '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| -> Result<f64, ColorParseError> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| err())
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self(Srgba::new(channel(0)?, channel(2)?, channel(4)?, alpha)))
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(Srgba::new(1.0, 0.0, 0.0, 1.0))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub size: i32,
    pub highlight: HexColor,
    pub label_font: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            highlight: HexColor::default(),
            label_font: DEFAULT_LABEL_FONT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssetConfig {
    /// Directory holding `ks00.png` .. `ks11.png`.
    pub key_signatures: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub socket: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            socket: PathBuf::from("/tmp/fifths.sock"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub assets: AssetConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fifths", "fifths").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config_from(path: PathBuf) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("FIFTHS").separator("__"))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(get_config_path()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
        }
    }
}

/// Writes the commented default config to the user's config path unless a file is
/// already there, so the watcher has something to edit.
pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    write_default_config_to(&path)?;
    Ok(path)
}

/// Returns whether a new file was written. An existing file is never touched.
pub fn write_default_config_to(path: &Path) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, DEFAULT_CONFIG)?;
    Ok(true)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let cases = vec![
            ("\"#ff0000\"", Srgba::new(1.0, 0.0, 0.0, 1.0)),
            ("\"#00FF0080\"", Srgba::new(0.0, 1.0, 0.0, 128.0 / 255.0)),
            ("\" #000000 \"", Srgba::new(0.0, 0.0, 0.0, 1.0)),
        ];

        for (json, expected) in cases {
            let deserialized: HexColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized.0, expected);
        }
    }

    #[test]
    fn test_hex_color_rejects_garbage() {
        for s in ["ff0000", "#ff00", "#gg0000", "#ff00000", "#ff\u{266f}000"] {
            assert!(s.parse::<HexColor>().is_err(), "{s}");
        }
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r##"{ "wheel": { "highlight": "#0000ff" } }"##;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.wheel.size, DEFAULT_SIZE);
        assert_eq!(config.wheel.label_font, DEFAULT_LABEL_FONT);
        assert_eq!(config.wheel.highlight.0, Srgba::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(config.sync.socket, PathBuf::from("/tmp/fifths.sock"));
        assert!(config.assets.key_signatures.is_none());
    }

    #[test]
    fn test_default_config_file_parses() {
        let dir = std::env::temp_dir().join(format!("fifths-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        assert!(write_default_config_to(&path).unwrap());
        let config = load_config_from(path.clone()).unwrap();
        fs_err::remove_dir_all(&dir).unwrap();

        assert_eq!(config.wheel.size, DEFAULT_SIZE);
        assert_eq!(config.wheel.highlight, HexColor::default());
    }

    #[test]
    fn test_default_config_keeps_existing_file() {
        let path =
            std::env::temp_dir().join(format!("fifths-user-config-{}.toml", std::process::id()));
        fs_err::write(&path, "[wheel]\nsize = 480\n").unwrap();
        assert!(!write_default_config_to(&path).unwrap());
        let config = load_config_from(path.clone()).unwrap();
        fs_err::remove_file(&path).unwrap();

        assert_eq!(config.wheel.size, 480);
    }
}
