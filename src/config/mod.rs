use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::element::PointF;
use crate::menu::{DEFAULT_WIDTH, ItemColors, ItemId, Menu, MenuError, MenuItem};

/// Configuration file name.
pub const CONFIG_FILE: &str = ".samenurc.json";

/// Default safe zone size (no inset).
pub const DEFAULT_SAFE_ZONE: f32 = 1.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid menu definition: {0}")]
    Build(#[from] MenuError),
}

/// Offset of the menu from the top left corner of the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
}

impl From<Offset> for PointF {
    fn from(offset: Offset) -> Self {
        PointF::new(offset.x, offset.y)
    }
}

/// A single menu row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Stable id. A fresh one is generated when missing.
    #[serde(default)]
    pub id: Option<Uuid>,

    pub title: String,

    #[serde(default, deserialize_with = "deserialize_subtitle")]
    pub subtitle: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl ItemConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            subtitle: String::new(),
            enabled: true,
        }
    }

    /// Create the item this entry describes.
    pub fn build(&self, colors: ItemColors) -> MenuItem {
        let id = self.id.map(ItemId::from).unwrap_or_default();
        let mut item = MenuItem::with_id(id, self.title.as_str()).with_subtitle(self.subtitle.as_str());
        item.set_colors(colors);
        item.set_enabled(self.enabled);
        item
    }
}

fn default_enabled() -> bool {
    true
}

/// The menu shown by the demo binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default)]
    pub offset: Offset,

    /// Move the menu inside the safe zone.
    #[serde(default)]
    pub safe_zone_aware: bool,

    /// Optional section label above the items.
    #[serde(default)]
    pub header: Option<ItemConfig>,

    #[serde(default)]
    pub items: Vec<ItemConfig>,

    #[serde(default)]
    pub colors: ItemColors,
}

fn default_width() -> f32 {
    DEFAULT_WIDTH
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: default_width(),
            offset: Offset::default(),
            safe_zone_aware: false,
            header: None,
            items: Vec::new(),
            colors: ItemColors::default(),
        }
    }
}

impl MenuConfig {
    /// Build a menu from this definition.
    ///
    /// Fails if two items share an id.
    pub fn build(&self) -> Result<Menu, ConfigError> {
        let mut menu = Menu::new(self.title.as_str());
        menu.set_width(self.width);
        menu.set_offset(self.offset.into());
        menu.set_safe_zone_aware(self.safe_zone_aware);
        menu.set_header(self.header.as_ref().map(|header| header.build(self.colors)));

        for item in &self.items {
            menu.add(item.build(self.colors))?;
        }
        Ok(menu)
    }
}

/// Application configuration loaded from .samenurc.json.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub menu: MenuConfig,

    /// Safe zone size between 0.9 and 1.0.
    #[serde(default = "default_safe_zone")]
    pub safe_zone: f32,
}

fn default_safe_zone() -> f32 {
    DEFAULT_SAFE_ZONE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            menu: MenuConfig::default(),
            safe_zone: default_safe_zone(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default file inside a directory.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self, ConfigError> {
        Self::load(dir.as_ref().join(CONFIG_FILE))
    }
}

fn deserialize_subtitle<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom(
            "subtitle must be a string or a number",
        )),
    }
}
