use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "yt-transcript",
    about = "YouTube transcript extractor",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL (not needed with --serve)
    #[arg(required_unless_present = "serve")]
    pub url: Option<String>,

    /// Preferred caption languages, most wanted first (e.g. -l de,en)
    #[arg(short, long = "lang", value_delimiter = ',')]
    pub langs: Vec<String>,

    /// Write the transcript to a file instead of stdout
    #[arg(short, long, conflicts_with = "serve")]
    pub output: Option<PathBuf>,

    /// Run the HTTP endpoint and web UI instead of a one-off fetch
    #[arg(long)]
    pub serve: bool,

    /// Address for --serve [default: 127.0.0.1:8000]
    #[arg(long, requires = "serve")]
    pub listen: Option<String>,

    /// Show video ID, languages and segment count on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        let cli = Cli::try_parse_from(["yt-transcript", "https://youtu.be/dQw4w9WgXcQ"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://youtu.be/dQw4w9WgXcQ"));
        assert!(!cli.serve);
        assert!(cli.langs.is_empty());
    }

    #[test]
    fn test_parse_langs() {
        let cli = Cli::try_parse_from(["yt-transcript", "-l", "de,en", "https://youtu.be/dQw4w9WgXcQ"]).unwrap();
        assert_eq!(cli.langs, vec!["de".to_string(), "en".to_string()]);
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["yt-transcript", "--serve", "--listen", "0.0.0.0:9000"]).unwrap();
        assert!(cli.serve);
        assert_eq!(cli.listen.as_deref(), Some("0.0.0.0:9000"));
        assert!(cli.url.is_none());
    }

    #[test]
    fn test_url_required_without_serve() {
        assert!(Cli::try_parse_from(["yt-transcript"]).is_err());
    }

    #[test]
    fn test_listen_requires_serve() {
        assert!(Cli::try_parse_from(["yt-transcript", "--listen", "0.0.0.0:9000", "https://youtu.be/x"]).is_err());
    }
}
