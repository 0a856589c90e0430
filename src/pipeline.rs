use log::info;

use crate::fetch::{FetchError, get_transcript};
use crate::source::SegmentSource;
use crate::{Transcript, extract_video_id};

pub const INVALID_URL_DETAIL: &str = "Invalid YouTube URL";

/// Terminal state of one URL-to-transcript request
#[derive(Debug, Clone)]
pub enum Outcome {
    InvalidUrl,
    FetchFailed(FetchError),
    Success(Transcript),
}

impl Outcome {
    /// Error text shown to the caller, or `None` on success
    pub fn error_detail(&self) -> Option<String> {
        match self {
            Outcome::InvalidUrl => Some(INVALID_URL_DETAIL.to_string()),
            Outcome::FetchFailed(err) => Some(fetch_failed_detail(err)),
            Outcome::Success(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Transcript, String> {
        match self {
            Outcome::Success(transcript) => Ok(transcript),
            other => Err(other.error_detail().unwrap_or_default()),
        }
    }
}

pub fn fetch_failed_detail(err: &FetchError) -> String {
    format!("Error fetching transcript: {}", err.message)
}

/// Resolve `url` to a video and fetch its transcript.
///
/// The source is never consulted when the URL does not yield a video ID.
pub async fn transcribe_url(source: &dyn SegmentSource, url: &str) -> Outcome {
    let Some(video_id) = extract_video_id(url) else {
        info!("Rejected URL without a video ID: {url}");
        return Outcome::InvalidUrl;
    };

    match get_transcript(source, &video_id).await {
        Ok(transcript) => {
            info!(
                "Fetched transcript for {video_id}: {} segments, {} bytes",
                transcript.segment_count,
                transcript.text.len()
            );
            Outcome::Success(transcript)
        }
        Err(err) => Outcome::FetchFailed(err),
    }
}
