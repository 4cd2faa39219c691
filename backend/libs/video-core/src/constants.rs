//! Video resource constants

/// Maximum video title length (characters)
pub const MAX_TITLE_LENGTH: usize = 40;

/// Maximum author name length (characters)
pub const MAX_AUTHOR_LENGTH: usize = 20;

/// Lowest accepted age restriction
pub const MIN_AGE_RESTRICTION: i64 = 1;

/// Highest accepted age restriction
pub const MAX_AGE_RESTRICTION: i64 = 18;

/// Delay between creation and the default publication date (1 day)
pub const DEFAULT_PUBLICATION_DELAY_DAYS: i64 = 1;

/// Sample record inserted at startup when seeding is enabled
pub const SAMPLE_VIDEO_TITLE: &str = "My First Video";
pub const SAMPLE_VIDEO_AUTHOR: &str = "John Doe";
