use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use eyre::{Result, WrapErr, bail};
use log::{debug, info, warn};

mod cli;

use cli::Cli;
use yt_transcript::config::{Config, config_path};
use yt_transcript::pipeline::{Outcome, transcribe_url};
use yt_transcript::server::{self, AppState};
use yt_transcript::youtube::YouTubeSource;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("yt-transcript.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yt-transcript")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nSUPPORTED URLS:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n\nConfig is read from: {}\nLogs are written to: {}",
        config_path().display(),
        log_dir().join("yt-transcript.log").display()
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Ignoring config file {}: {e}", config_path().display());
        Config::default()
    });

    let languages = config.resolve_languages(&cli.langs);
    debug!("Caption languages: {languages:?}");

    let mut source = YouTubeSource::new(reqwest::Client::new(), languages.clone());
    if let Some(ref user_agent) = config.user_agent {
        source = source.with_user_agent(user_agent.clone());
    }

    if cli.serve {
        let listen = config.resolve_listen_addr(cli.listen.as_deref());
        let addr: SocketAddr = listen
            .parse()
            .wrap_err_with(|| format!("invalid listen address: {listen}"))?;
        return server::serve(AppState::new(Arc::new(source)), addr).await;
    }

    let Some(url) = cli.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
        bail!("no URL provided\n\nUsage: yt-transcript <URL>\n       yt-transcript --serve");
    };

    let transcript = match transcribe_url(&source, url).await {
        Outcome::Success(transcript) => transcript,
        failed => bail!("{}", failed.error_detail().unwrap_or_default()),
    };

    if cli.verbose {
        eprintln!(
            "Video: {}\nLanguages: {}\nSegments: {}",
            transcript.video_id,
            languages.join(", "),
            transcript.segment_count,
        );
    }

    if let Some(ref path) = cli.output {
        std::fs::write(path, &transcript.text)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        print!("{}", transcript.text);
    }

    Ok(())
}
