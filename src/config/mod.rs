use anyhow::{anyhow, Result};
use festmap_core::{editor::EditorConfig, entities::MapPoint, style::MapMode};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "festmap.toml";

const ENV_NAME_DB_DIR: &str = "FESTMAP_DB_DIR";

pub struct Config {
    pub db: Db,
    pub map: Map,
    pub editor: EditorConfig,
    pub feed: Feed,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(dir) = env::var(ENV_NAME_DB_DIR) {
            cfg.db.dir = dir.into();
        }
        Ok(cfg)
    }
}

pub struct Db {
    /// File system directory of the booth store.
    pub dir: PathBuf,
}

pub struct Map {
    pub center: MapPoint,
    pub level: u8,
    pub mode: MapMode,
}

pub struct Feed {
    pub poll_interval: Duration,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            map,
            editor,
            feed,
        } = from;

        let raw::Db { dir } = db.unwrap_or_default();
        let db = Db { dir };

        let raw::Map {
            center_lat,
            center_lng,
            level,
            admin,
        } = map.unwrap_or_default();
        let center = MapPoint::try_from_lat_lng_deg(center_lat, center_lng)
            .ok_or_else(|| anyhow!("Invalid map center {center_lat},{center_lng}"))?;
        let mode = if admin {
            MapMode::Admin
        } else {
            MapMode::Visitor
        };
        let map = Map {
            center,
            level,
            mode,
        };

        let raw::Editor {
            drag_throttle,
            click_debounce,
        } = editor.unwrap_or_default();
        let editor = EditorConfig {
            drag_interval: drag_throttle,
            click_debounce,
        };

        let raw::Feed { poll_interval } = feed.unwrap_or_default();
        if poll_interval.is_zero() {
            return Err(anyhow!("The poll interval must not be zero"));
        }
        let feed = Feed { poll_interval };

        Ok(Self {
            db,
            map,
            editor,
            feed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let cfg: Config = Config::try_load_from_file_or_default(file).unwrap();
        assert_eq!(cfg.map.mode, MapMode::Visitor);
        assert_eq!(cfg.editor, EditorConfig::default());
    }

    #[test]
    fn reject_invalid_map_center() {
        let raw: raw::Config =
            toml::from_str("[map]\ncenter-lat = 95.0\ncenter-lng = 2.0\nlevel = 3\n").unwrap();
        assert!(Config::try_from(raw).is_err());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let raw: raw::Config = toml::from_str("[db]\ndir = \"/tmp/booths\"\n").unwrap();
        let cfg = Config::try_from(raw).unwrap();
        assert_eq!(cfg.db.dir, Path::new("/tmp/booths"));
        assert_eq!(cfg.map.level, 3);
        assert_eq!(cfg.feed.poll_interval, Duration::from_secs(3));
    }
}
