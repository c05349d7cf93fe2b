use std::sync::Arc;

use crate::auth::store::{MemoryUserStore, UserStore};
use crate::config::AppConfig;
use crate::uploads::{DiskUploads, UploadStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub uploads: Arc<dyn UploadStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the process-lifetime collaborators: the in-memory user store and
    /// the disk-backed upload area. Records live exactly as long as the
    /// process; only uploaded files survive a restart.
    pub fn init(config: AppConfig) -> Self {
        let uploads = Arc::new(DiskUploads::new(&config.uploads_dir)) as Arc<dyn UploadStore>;
        Self {
            users: Arc::new(MemoryUserStore::new()),
            uploads,
            config: Arc::new(config),
        }
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        uploads: Arc<dyn UploadStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            users,
            uploads,
            config,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use async_trait::async_trait;
        use bytes::Bytes;

        struct NullUploads;

        #[async_trait]
        impl UploadStore for NullUploads {
            async fn save(&self, _filename: &str, _body: Bytes) -> anyhow::Result<()> {
                Ok(())
            }
            async fn delete(&self, _filename: &str) -> anyhow::Result<()> {
                Ok(())
            }
        }

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            uploads_dir: "target/test-uploads".into(),
            mongodb_uri: None,
            mongodb_database: "database".into(),
        });

        Self {
            users: Arc::new(MemoryUserStore::new()),
            uploads: Arc::new(NullUploads),
            config,
        }
    }
}
