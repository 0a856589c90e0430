use async_trait::async_trait;
use eyre::Result;

use crate::{Segment, VideoId};

/// Remote store of timed caption segments, keyed by video ID.
///
/// Implementations return segments in chronological order and fail with a
/// descriptive error for anything that prevents retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SegmentSource: Send + Sync {
    async fn fetch_segments(&self, video_id: &VideoId) -> Result<Vec<Segment>>;
}
