#![warn(missing_docs)]
//! # ppatcher binary
//!
//! Prints the effective launcher configuration and replays recorded updater
//! event transcripts.
//!
//! ```text
//! ppatcher                 show version and configuration
//! ppatcher replay <file>   render each event of an NDJSON transcript
//! ```

use std::fs::File;
use std::io::BufReader;

use ppatcher_app::{
    AppError, app_version, config_path, format_frame, load_effective_config, logging,
    replay_transcript,
};
use ppatcher_config::AppConfig;

/// CLI entry point.
fn main() {
    logging::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(error) = run(&args) {
        log::error!("{error}");
        eprintln!("ppatcher: {error}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), AppError> {
    let env = |key: &str| std::env::var(key).ok();
    let path = config_path(env);
    let payload = load_effective_config(&path, env);
    let config = AppConfig::from_payload(&payload);

    println!("ppatcher {}", app_version());
    println!(
        "config={} palette={} start_offered={} footer=\"{}\"",
        path.display(),
        config.color_palette.key(),
        config.has_executable,
        config.footer()
    );

    match args.first().map(String::as_str) {
        None => Ok(()),
        Some("replay") => {
            let transcript = args
                .get(1)
                .ok_or_else(|| AppError::Usage("replay <transcript.ndjson>".to_string()))?;
            let file = File::open(transcript)?;
            for view in replay_transcript(BufReader::new(file), &config)? {
                println!("{}", format_frame(&view));
            }
            Ok(())
        }
        Some(other) => Err(AppError::Usage(format!("unknown command `{other}`"))),
    }
}
