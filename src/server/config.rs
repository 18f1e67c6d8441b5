use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use parking_lot::RwLock;
use notify::{RecommendedWatcher, RecursiveMode, Watcher, Config as NotifyConfig};
use log::{error, warn};

use frontline::game::Rules;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rules: Rules,
    pub tick_ms: f64,
    pub bind_addr: String,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: Rules::default(),
            tick_ms: 250.0,
            bind_addr: "127.0.0.1:1812".to_string(),
        }
    }
}

pub type SharedConfig = Arc<RwLock<Config>>;

/// Loads the config (or falls back to defaults) and hot-reloads it on file
/// change. A reloaded config applies to subsequent matches; the running
/// match keeps the rules it started with.
pub fn create_shared_config(path: Option<impl AsRef<Path> + Clone>) -> SharedConfig {
    let config = if let Some(path) = path.clone() {
        Config::load(&path).unwrap_or_else(|e| {
            warn!("failed to load config: {}, using default", e);
            Config::default()
        })
    } else {
        Config::default()
    };
    let shared_config = Arc::new(RwLock::new(config));

    // Set up hot reloading if a path is provided
    if let Some(path) = path {
        let path = path.as_ref().canonicalize().unwrap_or_else(|e| {
            warn!("failed to canonicalize path: {}, using as-is", e);
            path.as_ref().to_path_buf()
        });
        let config_clone = shared_config.clone();

        tokio::spawn(async move {
            let (tx, mut rx) = tokio::sync::mpsc::channel(1);

            let mut watcher = match RecommendedWatcher::new(
                move |res| {
                    let _ = tx.blocking_send(res);
                },
                NotifyConfig::default(),
            ) {
                Ok(watcher) => watcher,
                Err(e) => {
                    error!("failed to create config watcher: {}", e);
                    return;
                }
            };

            // Watch the directory containing the config file
            let watch_path = if let Some(parent) = path.parent() {
                if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                }
            } else {
                Path::new(".")
            };
            if let Err(e) = watcher.watch(watch_path, RecursiveMode::NonRecursive) {
                error!("failed to watch config: {}", e);
                return;
            }

            while let Some(res) = rx.recv().await {
                match res {
                    Ok(event) => {
                        let changed = event
                            .paths
                            .iter()
                            .any(|p| p.canonicalize().ok().as_deref() == Some(path.as_path()));
                        if changed {
                            match Config::load(&path) {
                                Ok(new_config) => {
                                    *config_clone.write() = new_config;
                                }
                                Err(e) => {
                                    warn!("failed to reload config: {}", e);
                                }
                            }
                        }
                    }
                    Err(e) => warn!("watch error: {}", e),
                }
            }
        });
    }

    shared_config
}
