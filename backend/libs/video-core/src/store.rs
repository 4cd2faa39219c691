//! In-memory video collection

use chrono::{DateTime, Duration, Utc};

use crate::constants::{DEFAULT_PUBLICATION_DELAY_DAYS, SAMPLE_VIDEO_AUTHOR, SAMPLE_VIDEO_TITLE};
use crate::error::StoreError;
use crate::models::{NewVideo, Resolution, Video, VideoUpdate};

/// Owns the video collection in insertion order.
///
/// Ids are handed out from a high-water mark, so an id is never issued twice
/// even after the record holding it was deleted or the store was cleared.
#[derive(Debug, Default)]
pub struct VideoStore {
    videos: Vec<Video>,
    last_id: u64,
}

impl VideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the sample record (id 1)
    pub fn with_sample() -> Self {
        let mut store = Self::new();
        store.seed_sample(Utc::now());
        store
    }

    pub fn seed_sample(&mut self, now: DateTime<Utc>) -> Video {
        let video = Video {
            id: self.next_id(),
            title: SAMPLE_VIDEO_TITLE.to_string(),
            author: SAMPLE_VIDEO_AUTHOR.to_string(),
            can_be_downloaded: true,
            min_age_restriction: None,
            created_at: now,
            publication_date: now,
            available_resolutions: vec![Resolution::P144, Resolution::P240, Resolution::P360],
        };
        self.push(video)
    }

    pub fn list(&self) -> Vec<Video> {
        self.videos.clone()
    }

    pub fn len(&self) -> usize {
        self.videos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }

    pub fn get(&self, id: u64) -> Result<Video, StoreError> {
        self.videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    pub fn insert(&mut self, fields: NewVideo) -> Video {
        self.insert_at(fields, Utc::now())
    }

    /// Insert with an explicit creation time.
    pub fn insert_at(&mut self, fields: NewVideo, now: DateTime<Utc>) -> Video {
        let video = Video {
            id: self.next_id(),
            title: fields.title,
            author: fields.author,
            can_be_downloaded: false,
            min_age_restriction: None,
            created_at: now,
            publication_date: now + Duration::days(DEFAULT_PUBLICATION_DELAY_DAYS),
            available_resolutions: fields.available_resolutions,
        };
        self.push(video)
    }

    /// Overwrite the required fields and merge the optional ones.
    /// `created_at` and `id` are left as they were.
    pub fn replace(&mut self, id: u64, fields: VideoUpdate) -> Result<Video, StoreError> {
        let video = self
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(StoreError::NotFound(id))?;

        video.title = fields.title;
        video.author = fields.author;
        video.available_resolutions = fields.available_resolutions;
        video.can_be_downloaded = fields.can_be_downloaded.apply(video.can_be_downloaded);
        video.min_age_restriction = fields.min_age_restriction.apply(video.min_age_restriction);
        video.publication_date = fields.publication_date.apply(video.publication_date);

        tracing::info!(video_id = id, "Video replaced");
        Ok(video.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        let index = self
            .videos
            .iter()
            .position(|v| v.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.videos.remove(index);

        tracing::info!(video_id = id, "Video deleted");
        Ok(())
    }

    pub fn clear(&mut self) {
        let removed = self.videos.len();
        self.videos.clear();
        tracing::info!(removed, "Video store cleared");
    }

    fn next_id(&self) -> u64 {
        let max_existing = self.videos.iter().map(|v| v.id).max().unwrap_or(0);
        self.last_id.max(max_existing) + 1
    }

    fn push(&mut self, video: Video) -> Video {
        self.last_id = video.id;
        self.videos.push(video.clone());
        tracing::info!(video_id = video.id, "Video created");
        video
    }
}
