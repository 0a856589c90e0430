use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::output::render_text;
use crate::source::SegmentSource;
use crate::youtube::CaptionError;
use crate::{Transcript, VideoId};

/// Broad category of a failed fetch, recovered from the provider error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    VideoUnavailable,
    TranscriptsDisabled,
    NoTranscriptFound,
    RequestBlocked,
    Network,
    Provider,
}

/// Why a transcript could not be retrieved.
///
/// Displays as the provider's message, unchanged.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct FetchError {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl From<eyre::Report> for FetchError {
    fn from(report: eyre::Report) -> Self {
        Self {
            kind: classify(&report),
            message: format!("{report:#}"),
        }
    }
}

fn classify(report: &eyre::Report) -> FetchErrorKind {
    for cause in report.chain() {
        if let Some(err) = cause.downcast_ref::<CaptionError>() {
            return match err {
                CaptionError::RequestBlocked(_) => FetchErrorKind::RequestBlocked,
                CaptionError::VideoUnavailable(_) | CaptionError::Unplayable { .. } => {
                    FetchErrorKind::VideoUnavailable
                }
                CaptionError::TranscriptsDisabled(_) => FetchErrorKind::TranscriptsDisabled,
                CaptionError::NoTranscriptFound { .. } => FetchErrorKind::NoTranscriptFound,
                CaptionError::MissingApiKey => FetchErrorKind::Provider,
            };
        }
        if cause.downcast_ref::<reqwest::Error>().is_some() {
            return FetchErrorKind::Network;
        }
    }
    FetchErrorKind::Provider
}

/// Fetch every segment for `video_id` and join them into one transcript.
///
/// All provider failures stop here and come back as a [`FetchError`]; a
/// failure discards whatever the provider had produced.
pub async fn get_transcript(source: &dyn SegmentSource, video_id: &VideoId) -> Result<Transcript, FetchError> {
    debug!("Fetching segments for {video_id}");

    match source.fetch_segments(video_id).await {
        Ok(segments) => {
            debug!("Fetched {} segments for {video_id}", segments.len());
            Ok(Transcript {
                video_id: video_id.clone(),
                text: render_text(&segments),
                segment_count: segments.len(),
            })
        }
        Err(report) => {
            let err = FetchError::from(report);
            warn!("Transcript fetch failed for {video_id} ({:?}): {}", err.kind, err.message);
            Err(err)
        }
    }
}
