use crate::Segment;

/// File name offered for transcript downloads
pub const DOWNLOAD_FILE_NAME: &str = "transcript.txt";

/// Media type of downloaded transcripts
pub const DOWNLOAD_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Render segments as plain text: each segment's text followed by a newline
pub fn render_text(segments: &[Segment]) -> String {
    segments.iter().fold(String::new(), |mut out, s| {
        out.push_str(&s.text);
        out.push('\n');
        out
    })
}

/// `Content-Disposition` header value for a transcript download
pub fn attachment_disposition() -> String {
    format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\"")
}
