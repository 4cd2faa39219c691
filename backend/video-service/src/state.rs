use tokio::sync::RwLock;
use video_core::VideoStore;

use crate::config::StoreConfig;

/// Shared application state handed to every handler via `web::Data`.
///
/// Mutations take the write lock, which keeps id assignment and
/// replace-merge serialized across workers.
#[derive(Debug)]
pub struct AppState {
    pub store: RwLock<VideoStore>,
}

impl AppState {
    pub fn new(store: VideoStore) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        if config.seed_sample_video {
            Self::new(VideoStore::with_sample())
        } else {
            Self::new(VideoStore::new())
        }
    }
}
