use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::output::DOWNLOAD_FILE_NAME;
use crate::pipeline::Outcome;

const TITLE: &str = "YouTube Video Transcript Extractor";

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; max-width: 760px; margin: 40px auto; padding: 0 16px; color: #262730; }
input[type=text] { width: 100%; padding: 8px; font-size: 1rem; box-sizing: border-box; }
.error { background: #ffe9e9; color: #7d353b; padding: 12px; border-radius: 6px; }
.success { background: #e8f9ee; color: #177233; padding: 12px; border-radius: 6px; }
textarea { width: 100%; height: 400px; font-family: monospace; box-sizing: border-box; }
.spinner { display: none; margin: 12px 0; }
.spinner.active { display: block; }
.download { display: inline-block; margin-top: 12px; padding: 8px 14px; border: 1px solid #ccc; border-radius: 6px; text-decoration: none; color: inherit; }
pre { background: #f5f5f5; padding: 10px; }
"#;

const SCRIPT: &str = r#"
document.getElementById("url-form").addEventListener("submit", function () {
  document.getElementById("spinner").classList.add("active");
});
"#;

const API_DOCS: &str = r#"
<hr>
<h3>API Usage</h3>
<p>This app also provides an API endpoint that you can use:</p>
<p><strong>Endpoint:</strong> <code>/get-transcript</code></p>
<p><strong>Method:</strong> POST</p>
<p><strong>Request Body:</strong></p>
<pre>{
    "url": "https://www.youtube.com/watch?v=your_video_id"
}</pre>
<p><strong>Response:</strong></p>
<pre>{
    "transcript": "... transcript text ..."
}</pre>
<h3>Instructions:</h3>
<ol>
<li>Paste a YouTube video URL in the input field above</li>
<li>The app will fetch available transcript</li>
<li>You can view and download the transcript</li>
</ol>
<h3>Note:</h3>
<ul>
<li>Only videos with available transcripts/subtitles can be processed</li>
<li>Some videos may have transcripts disabled by the creator</li>
</ul>
"#;

/// Render the interactive page, with the result for `url` when one was submitted.
pub fn render_page(url: Option<&str>, outcome: Option<&Outcome>) -> String {
    let value = encode_double_quoted_attribute(url.unwrap_or_default());
    let result = match (url, outcome) {
        (Some(url), Some(outcome)) => render_outcome(url, outcome),
        _ => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{TITLE}</h1>
<form id="url-form" method="get" action="/">
<label for="url">Enter YouTube Video URL:</label>
<input type="text" id="url" name="url" value="{value}" autofocus>
</form>
<div id="spinner" class="spinner">Fetching transcript...</div>
{result}
{API_DOCS}
<script>{SCRIPT}</script>
</body>
</html>
"#
    )
}

fn render_outcome(url: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::InvalidUrl => {
            r#"<div class="error">Invalid YouTube URL. Please check the URL and try again.</div>"#.to_string()
        }
        Outcome::FetchFailed(err) => format!(
            r#"<div class="error">Error fetching transcript: {}</div>"#,
            encode_text(&err.message)
        ),
        Outcome::Success(transcript) => {
            let href = format!("/download?url={}", urlencoding::encode(url));
            format!(
                r#"<div class="success">Transcript fetched successfully!</div>
<details open>
<summary>View Transcript</summary>
<textarea readonly>
{text}</textarea>
</details>
<a class="download" href="{href}" download="{DOWNLOAD_FILE_NAME}">Download Transcript</a>"#,
                text = encode_text(&transcript.text),
                href = encode_double_quoted_attribute(&href),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, FetchErrorKind};
    use crate::{Transcript, video_id};

    #[test]
    fn test_render_empty_page() {
        let html = render_page(None, None);
        assert!(html.contains("<h1>YouTube Video Transcript Extractor</h1>"));
        assert!(html.contains(r#"name="url" value="""#));
        assert!(html.contains("/get-transcript"));
        assert!(!html.contains("class=\"error\""));
        assert!(!html.contains("<details"));
    }

    #[test]
    fn test_render_invalid_url() {
        let html = render_page(Some("nope"), Some(&Outcome::InvalidUrl));
        assert!(html.contains("Invalid YouTube URL. Please check the URL and try again."));
        assert!(html.contains(r#"value="nope""#));
    }

    #[test]
    fn test_render_fetch_failure_is_escaped() {
        let outcome = Outcome::FetchFailed(FetchError {
            kind: FetchErrorKind::Provider,
            message: "<script>boom</script>".to_string(),
        });
        let html = render_page(Some("https://youtu.be/abc12345678"), Some(&outcome));
        assert!(html.contains("Error fetching transcript: &lt;script&gt;boom&lt;/script&gt;"));
    }

    #[test]
    fn test_render_success() {
        let outcome = Outcome::Success(Transcript {
            video_id: video_id("abc12345678"),
            text: "Hello & goodbye\n".to_string(),
            segment_count: 1,
        });
        let html = render_page(Some("https://www.youtube.com/watch?v=abc12345678&t=5"), Some(&outcome));
        assert!(html.contains("Transcript fetched successfully!"));
        assert!(html.contains("<details open>"));
        assert!(html.contains("<textarea readonly>\nHello &amp; goodbye\n</textarea>"));
        assert!(html.contains(
            r#"href="/download?url=https%3A%2F%2Fwww.youtube.com%2Fwatch%3Fv%3Dabc12345678%26t%3D5""#
        ));
        assert!(html.contains(r#"download="transcript.txt""#));
    }

    #[test]
    fn test_render_keeps_leading_newline() {
        let outcome = Outcome::Success(Transcript {
            video_id: video_id("abc12345678"),
            text: "\nafter a blank cue\n".to_string(),
            segment_count: 2,
        });
        let html = render_page(Some("https://youtu.be/abc12345678"), Some(&outcome));
        // Browsers drop one newline right after <textarea>, so the first one is padding
        assert!(html.contains("<textarea readonly>\n\nafter a blank cue\n</textarea>"));
    }

    #[test]
    fn test_render_escapes_input_value() {
        let html = render_page(Some(r#""><b>x"#), Some(&Outcome::InvalidUrl));
        assert!(html.contains(r#"value="&quot;&gt;&lt;b&gt;x""#));
    }
}
