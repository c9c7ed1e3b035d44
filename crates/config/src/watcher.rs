//! Hot-reload configuration watcher

use crate::{validate_config, AppConfig, ConfigError, ConfigLoader, Result};
use checkout_router_resolver::Resolver;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Watches a config file and keeps an in-memory [`AppConfig`] current.
///
/// Edits to the file take effect without a restart; the next resolver
/// built via [`ConfigWatcher::resolver`] picks up the new flag set and
/// country list. A file that fails to parse or validate is ignored and
/// the previous configuration stays in force.
pub struct ConfigWatcher {
    config: Arc<RwLock<AppConfig>>,
    path: PathBuf,
}

impl ConfigWatcher {
    /// Load the configuration at `path` and prepare it for watching.
    ///
    /// The initial load is strict: both a parse failure and a validation
    /// failure are errors. Only subsequent reloads fall back.
    pub fn new(path: PathBuf) -> Result<Self> {
        let config = ConfigLoader::from_file(&path)?;
        validate_config(&config)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            path,
        })
    }

    /// Snapshot of the current configuration.
    pub fn get_config(&self) -> AppConfig {
        self.config.read().expect("Config lock poisoned").clone()
    }

    /// Build a resolver from the current configuration snapshot.
    ///
    /// Resolvers are cheap to build; callers that want fresh flags after
    /// a reload should build one per resolution or per request batch.
    pub fn resolver(&self) -> Resolver {
        self.get_config().resolver()
    }

    /// Start the background reload task.
    ///
    /// The returned handle runs until dropped or aborted.
    pub fn start_watching(&self) -> Result<JoinHandle<()>> {
        let config = Arc::clone(&self.config);
        let path = self.path.clone();

        let (tx, mut rx) = mpsc::channel(100);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if let Err(e) = tx.blocking_send(event) {
                        error!("Failed to send file event: {}", e);
                    }
                }
                Err(e) => error!("File watch error: {}", e),
            },
            notify::Config::default().with_poll_interval(Duration::from_secs(2)),
        )
        .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|e| ConfigError::WatchError(e.to_string()))?;

        info!("Started watching config file: {:?}", path);

        let handle = tokio::spawn(async move {
            // Keep the watcher alive by moving it into the task
            let _watcher = watcher;

            while let Some(event) = rx.recv().await {
                if !matches!(event.kind, EventKind::Modify(_)) {
                    continue;
                }
                debug!("Config file modified, reloading");

                match Self::reload(&path) {
                    Ok(new_config) => match config.write() {
                        Ok(mut guard) => {
                            *guard = new_config;
                            info!("Config reloaded");
                        }
                        Err(e) => {
                            error!("Failed to acquire write lock for config reload: {}", e);
                        }
                    },
                    Err(e) => {
                        warn!("Rejected config reload: {}. Keeping old config.", e);
                    }
                }
            }

            debug!("Config watcher task stopped");
        });

        Ok(handle)
    }

    fn reload(path: &Path) -> Result<AppConfig> {
        let config = ConfigLoader::from_file(path)?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Create a watcher and start watching immediately.
    pub fn watch(path: PathBuf) -> Result<(Self, JoinHandle<()>)> {
        let watcher = Self::new(path)?;
        let handle = watcher.start_watching()?;
        Ok((watcher, handle))
    }
}
