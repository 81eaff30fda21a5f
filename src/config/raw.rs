use duration_str::deserialize_duration;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

const DEFAULT_CONFIG_FILE: &str = include_str!("festmap.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub map: Option<Map>,
    pub editor: Option<Editor>,
    pub feed: Option<Feed>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg: Self = toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration");
        cfg
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub dir: PathBuf,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub center_lat: f64,
    pub center_lng: f64,
    pub level: u8,
    #[serde(default)]
    pub admin: bool,
}

impl Default for Map {
    fn default() -> Self {
        Config::default().map.expect("Map configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Editor {
    #[serde(deserialize_with = "deserialize_duration")]
    pub drag_throttle: Duration,
    #[serde(deserialize_with = "deserialize_duration")]
    pub click_debounce: Duration,
}

impl Default for Editor {
    fn default() -> Self {
        Config::default().editor.expect("Editor configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Feed {
    #[serde(deserialize_with = "deserialize_duration")]
    pub poll_interval: Duration,
}

impl Default for Feed {
    fn default() -> Self {
        Config::default().feed.expect("Feed configuration")
    }
}
