use async_trait::async_trait;
use eyre::Result;
use log::debug;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::source::SegmentSource;
use crate::{Segment, VideoId};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

const INNERTUBE_CLIENT_NAME: &str = "ANDROID";
const INNERTUBE_CLIENT_VERSION: &str = "20.10.38";

/// Reasons YouTube refuses to hand out a transcript
#[derive(Debug, Error)]
pub enum CaptionError {
    #[error("YouTube is blocking requests for video {0} (too many requests or bot check)")]
    RequestBlocked(String),

    #[error("video {0} is unavailable")]
    VideoUnavailable(String),

    #[error("video {video_id} is unplayable: {reason}")]
    Unplayable { video_id: String, reason: String },

    #[error("subtitles are disabled for video {0}")]
    TranscriptsDisabled(String),

    #[error("no transcript found for video {video_id} in [{requested}]; available: [{available}]")]
    NoTranscriptFound {
        video_id: String,
        requested: String,
        available: String,
    },

    #[error("could not extract InnerTube API key from watch page")]
    MissingApiKey,
}

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    captions: Option<CaptionsData>,
    #[serde(rename = "playabilityStatus")]
    playability_status: Option<PlayabilityStatus>,
}

#[derive(Debug, Deserialize)]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// Caption segments straight from YouTube via the InnerTube API
#[derive(Debug, Clone)]
pub struct YouTubeSource {
    client: reqwest::Client,
    languages: Vec<String>,
    user_agent: String,
}

impl YouTubeSource {
    /// `languages` is the caption language preference, most wanted first.
    pub fn new(client: reqwest::Client, languages: Vec<String>) -> Self {
        let languages = if languages.is_empty() {
            vec!["en".to_string()]
        } else {
            languages
        };
        Self {
            client,
            languages,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }
}

#[async_trait]
impl SegmentSource for YouTubeSource {
    async fn fetch_segments(&self, video_id: &VideoId) -> Result<Vec<Segment>> {
        // Step 1: Fetch the watch page to get the InnerTube API key
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
        debug!("Fetching watch page: {watch_url}");

        let page_html = self
            .client
            .get(&watch_url)
            .header("User-Agent", &self.user_agent)
            .header("Accept-Language", "en-US")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        if page_html.contains("class=\"g-recaptcha\"") {
            return Err(CaptionError::RequestBlocked(video_id.to_string()).into());
        }

        let api_key = extract_api_key(&page_html)?;
        debug!("Extracted InnerTube API key: {api_key}");

        // Step 2: Call InnerTube player endpoint
        let player_url = format!("https://www.youtube.com/youtubei/v1/player?key={api_key}&prettyPrint=false");

        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": self.languages[0],
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION
                }
            },
            "videoId": video_id.as_str()
        });

        let resp: InnerTubePlayerResponse = self
            .client
            .post(&player_url)
            .header("User-Agent", &self.user_agent)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        check_playability(video_id.as_str(), resp.playability_status.as_ref())?;

        let tracks = resp
            .captions
            .and_then(|c| c.player_captions_tracklist_renderer)
            .and_then(|r| r.caption_tracks)
            .unwrap_or_default();

        let track = select_track(video_id.as_str(), &tracks, &self.languages)?;
        debug!(
            "Using caption track: lang={} generated={}",
            track.language_code,
            track.is_generated()
        );

        // Step 3: Fetch the caption XML
        let caption_url = track.base_url.replace("&fmt=srv3", "");
        let caption_xml = self
            .client
            .get(&caption_url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let segments = parse_caption_xml(&caption_xml)?;
        debug!("Parsed {} caption segments for {video_id}", segments.len());
        Ok(segments)
    }
}

fn check_playability(video_id: &str, status: Option<&PlayabilityStatus>) -> Result<(), CaptionError> {
    let Some(status) = status else {
        return Ok(());
    };
    let reason = status.reason.clone().unwrap_or_default();

    match status.status.as_str() {
        "OK" => Ok(()),
        "LOGIN_REQUIRED" if reason.to_lowercase().contains("bot") => {
            Err(CaptionError::RequestBlocked(video_id.to_string()))
        }
        "ERROR" => Err(CaptionError::VideoUnavailable(video_id.to_string())),
        other => Err(CaptionError::Unplayable {
            video_id: video_id.to_string(),
            reason: if reason.is_empty() { other.to_string() } else { reason },
        }),
    }
}

/// Pick a track for the first requested language that has one, preferring
/// manually created captions over auto-generated ones.
fn select_track<'a>(
    video_id: &str,
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Result<&'a CaptionTrack, CaptionError> {
    if tracks.is_empty() {
        return Err(CaptionError::TranscriptsDisabled(video_id.to_string()));
    }

    for lang in languages {
        let mut matching = tracks.iter().filter(|t| &t.language_code == lang);
        let manual = matching.clone().find(|t| !t.is_generated());
        if let Some(track) = manual.or_else(|| matching.next()) {
            return Ok(track);
        }
    }

    Err(CaptionError::NoTranscriptFound {
        video_id: video_id.to_string(),
        requested: languages.join(", "),
        available: tracks
            .iter()
            .map(|t| {
                if t.is_generated() {
                    format!("{} (generated)", t.language_code)
                } else {
                    t.language_code.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
    })
}

fn extract_api_key(html: &str) -> Result<String> {
    let re = Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#)?;
    if let Some(caps) = re.captures(html) {
        return Ok(caps[1].to_string());
    }

    // Fallback: try the newer pattern
    let re2 = Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#)?;
    if let Some(caps) = re2.captures(html) {
        return Ok(caps[1].to_string());
    }

    Err(CaptionError::MissingApiKey.into())
}

fn parse_caption_xml(xml: &str) -> Result<Vec<Segment>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut current_start: Option<f64> = None;
    let mut current_dur: Option<f64> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                let mut start = None;
                let mut dur = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"start" => {
                            start = String::from_utf8_lossy(&attr.value).parse::<f64>().ok();
                        }
                        b"dur" => {
                            dur = String::from_utf8_lossy(&attr.value).parse::<f64>().ok();
                        }
                        _ => {}
                    }
                }
                current_start = start;
                // Some tracks omit dur on the final cue
                current_dur = Some(dur.unwrap_or(0.0));
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"text" => {
                // An empty <text></text> cue must not claim the whitespace that follows it
                current_start = None;
                current_dur = None;
            }
            Ok(Event::Empty(_)) => {
                // Self-closing <text .../> has no content
            }
            Ok(Event::Text(ref e)) => {
                if let (Some(start), Some(dur)) = (current_start.take(), current_dur.take()) {
                    // Cue text is escaped twice (`&amp;#39;`) and may use HTML-only entities like `&nbsp;`
                    let raw_text = std::str::from_utf8(e)?;
                    let once = html_escape::decode_html_entities(raw_text);
                    let text = html_escape::decode_html_entities(&once).to_string();
                    if !text.is_empty() {
                        segments.push(Segment {
                            text,
                            start,
                            duration: dur,
                        });
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => eyre::bail!("error parsing caption XML: {e}"),
            _ => {}
        }
    }

    Ok(segments)
}
