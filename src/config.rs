use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub meter: MeterConfig,
}

#[derive(Debug, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    #[serde(default = "default_q")]
    pub q: f32,
}

#[derive(Debug, Deserialize)]
pub struct MeterConfig {
    #[serde(default = "default_range")]
    pub range: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            q: default_q(),
        }
    }
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            range: default_range(),
        }
    }
}

fn default_frequency() -> f32 { 960.0 }
fn default_q() -> f32 { 1.5 }
fn default_range() -> f32 { 60.0 }

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
