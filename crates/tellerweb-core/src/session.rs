//! Session state: configuration plus the latest fetched snapshot

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tellerweb_config::Config;

use crate::error::{CoreError, CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::BankSnapshot;

/// Where snapshots come from
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch a complete snapshot from `path`
    async fn fetch(&self, path: &Path) -> CoreResult<BankSnapshot>;
}

/// Source reference type
pub type SourceRef = Arc<dyn SnapshotSource>;

/// Reads a JSON snapshot file
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSnapshotSource;

#[async_trait]
impl SnapshotSource for FileSnapshotSource {
    async fn fetch(&self, path: &Path) -> CoreResult<BankSnapshot> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = tokio::fs::read_to_string(path).await?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}

/// Loaded session
///
/// Holds no derived values; every view is recomputed from [`Session::snapshot`].
pub struct Session {
    config: Config,
    source: SourceRef,
    snapshot: Option<BankSnapshot>,
    path: Option<PathBuf>,
    loaded_at: Option<NaiveDateTime>,
}

impl Session {
    pub fn new(config: Config, source: SourceRef) -> Self {
        Self {
            config,
            source,
            snapshot: None,
            path: None,
            loaded_at: None,
        }
    }

    /// Session reading snapshots from disk
    pub fn with_file_source(config: Config) -> Self {
        Self::new(config, Arc::new(FileSnapshotSource))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Latest snapshot, or `NotLoaded` before the first successful load
    pub fn snapshot(&self) -> CoreResult<&BankSnapshot> {
        self.snapshot.as_ref().ok_or(CoreError::NotLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn loaded_at(&self) -> Option<NaiveDateTime> {
        self.loaded_at
    }

    /// Load a snapshot, replacing the current one only on success
    ///
    /// The path is remembered even when fetching fails so `reload` can retry.
    pub async fn load(&mut self, path: PathBuf) -> CoreResult<()> {
        log::info!(target: "tellerweb::session", "Loading snapshot from {}", path.display());
        self.path = Some(path.clone());

        let snapshot = match self.source.fetch(&path).await {
            Ok(snapshot) => snapshot,
            Err(error) => {
                let context = ErrorContext::new("load_snapshot")
                    .with_data("path", serde_json::json!(path.display().to_string()));
                DefaultErrorLogger.log_error(&error, &context);
                return Err(error);
            }
        };

        log::info!(
            target: "tellerweb::session",
            "Loaded {} accounts, {} cards, {} beneficiaries, {} transactions",
            snapshot.accounts.len(),
            snapshot.cards.len(),
            snapshot.beneficiaries.len(),
            snapshot.transactions.len()
        );

        self.snapshot = Some(snapshot);
        self.loaded_at = Some(Local::now().naive_local());
        Ok(())
    }

    /// Load from the configured `data.snapshot_path`
    pub async fn load_configured(&mut self) -> CoreResult<()> {
        let path = self.config.data.snapshot_path.clone();
        self.load(path).await
    }

    /// Re-read the last loaded source
    pub async fn reload(&mut self) -> CoreResult<()> {
        match self.path.clone() {
            Some(path) => self.load(path).await,
            None => Err(CoreError::NotLoaded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail_after: usize,
    }

    #[async_trait]
    impl SnapshotSource for CountingSource {
        async fn fetch(&self, _path: &Path) -> CoreResult<BankSnapshot> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= self.fail_after {
                return Err(CoreError::ParseError {
                    message: "truncated".to_string(),
                });
            }
            Ok(BankSnapshot::default())
        }
    }

    #[tokio::test]
    async fn test_snapshot_before_load() {
        let session = Session::with_file_source(Config::default());
        assert!(matches!(session.snapshot(), Err(CoreError::NotLoaded)));
    }

    #[tokio::test]
    async fn test_reload_without_load() {
        let mut session = Session::with_file_source(Config::default());
        assert!(matches!(session.reload().await, Err(CoreError::NotLoaded)));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_snapshot() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_after: 1,
        });
        let mut session = Session::new(Config::default(), source);
        session.load(PathBuf::from("memory")).await.unwrap();
        assert!(session.is_loaded());

        let result = session.reload().await;
        assert!(matches!(result, Err(CoreError::ParseError { .. })));
        assert!(session.snapshot().is_ok());
        assert_eq!(session.source_path(), Some(Path::new("memory")));
    }

    #[tokio::test]
    async fn test_reload_retries_failed_path() {
        let mut session = Session::with_file_source(Config::default());
        let path = PathBuf::from("/nonexistent/tellerweb/snapshot.json");
        assert!(session.load(path.clone()).await.is_err());
        assert_eq!(session.source_path(), Some(path.as_path()));
        assert!(matches!(session.reload().await, Err(CoreError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let result = FileSnapshotSource
            .fetch(Path::new("/nonexistent/tellerweb/snapshot.json"))
            .await;
        assert!(matches!(result, Err(CoreError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_file_source_reads_json() {
        let path = std::env::temp_dir().join(format!("tellerweb-session-{}.json", std::process::id()));
        tokio::fs::write(
            &path,
            r#"{"accounts":[{"id":1,"accountNumber":"1234567890","accountType":"SAVINGS","balance":10}]}"#,
        )
        .await
        .unwrap();

        let mut session = Session::with_file_source(Config::default());
        session.load(path.clone()).await.unwrap();
        assert_eq!(session.snapshot().unwrap().accounts.len(), 1);
        assert!(session.loaded_at().is_some());

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
