use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::feed::{clamp_probability, DEFAULT_ZONES};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub emission_period_secs: u64,
    pub emission_probability: f64,
    pub zones: Vec<String>,
    pub total_zones: usize,
    pub active_students: usize,
    pub compliant_zones: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            emission_period_secs: 8,
            emission_probability: 0.3,
            zones: DEFAULT_ZONES.iter().map(|z| z.to_string()).collect(),
            total_zones: 32,
            active_students: 28,
            compliant_zones: 26,
        }
    }
}

impl FeedConfig {
    /// Never shorter than a second, whatever the file says
    pub fn emission_period(&self) -> Duration {
        Duration::from_secs(self.emission_period_secs.max(1))
    }

    /// Chance of an event per draw, in `0.0..=1.0`; non-finite values count as zero
    pub fn emission_probability(&self) -> f64 {
        clamp_probability(self.emission_probability).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub exam_duration_secs: u64,
    pub tick_rate_ms: u64,
    pub toast_secs: u64,
    pub redirect_delay_ms: u64,
    pub feed: FeedConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exam_duration_secs: 3600,
            tick_rate_ms: 100,
            toast_secs: 4,
            redirect_delay_ms: 1000,
            feed: FeedConfig::default(),
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    pub fn toast_lifetime(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "labguard") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("labguard_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed config")
                }
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
