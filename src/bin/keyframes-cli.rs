use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use keyframes::{
    ExtractOptions, ProgressCallback, ProgressInfo, output_format_from_extension,
    parse_frame_count,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  keyframes walk.gif 8 walk\n  keyframes walk.gif 12 walk --create-dir --ext jpg --progress\n  keyframes walk.gif 4 walk --json";

#[derive(Debug, Parser)]
#[command(
    name = "keyframes",
    version,
    about = "Extract evenly spaced frames from an animated image",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    /// Animated image to sample (GIF, APNG or animated WebP).
    source: PathBuf,

    /// Number of frames to extract.
    #[arg(value_parser = parse_frame_count)]
    frame_count: u64,

    /// Output name, used as both the directory and the file prefix.
    name: String,

    /// Print each frame as it is written.
    #[arg(long)]
    verbose: bool,

    /// Show a progress bar.
    #[arg(long)]
    progress: bool,

    /// Create ./<NAME> if it does not exist.
    #[arg(long)]
    create_dir: bool,

    /// Output image extension (png, jpg, jpeg, bmp, tiff, gif, webp).
    #[arg(long, default_value = "png")]
    ext: String,

    /// Print the written files as JSON.
    #[arg(long)]
    json: bool,
}

struct TerminalProgress {
    bar: Option<ProgressBar>,
    verbose: bool,
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        if let Some(bar) = &self.bar {
            bar.set_length(info.total);
            bar.set_position(info.current);
        }

        if !self.verbose {
            return;
        }
        let Some(frame) = info.current_frame else {
            return;
        };
        let line = format!(
            "saved frame {frame} ({:.2}s) [{}/{}]",
            info.current_timestamp.unwrap_or_default().as_secs_f64(),
            info.current,
            info.total,
        );
        match &self.bar {
            Some(bar) => bar.println(line),
            None => eprintln!("{line}"),
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let format = output_format_from_extension(&cli.ext)?;

    let bar = if cli.progress {
        let bar = ProgressBar::new(cli.frame_count);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Some(bar)
    } else {
        None
    };

    let mut options = ExtractOptions::new()
        .with_format(format)
        .with_create_directory(cli.create_dir);
    if bar.is_some() || cli.verbose {
        options = options.with_progress(Arc::new(TerminalProgress {
            bar: bar.clone(),
            verbose: cli.verbose,
        }));
    }

    let written =
        keyframes::extract_keyframes_with_options(&cli.source, cli.frame_count, &cli.name, &options)?;

    if let Some(bar) = bar {
        bar.finish_with_message("done");
    }

    if cli.json {
        let payload = json!({
            "source": cli.source.display().to_string(),
            "name": cli.name,
            "frame_count": cli.frame_count,
            "files": written
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {}",
            "success:".green().bold(),
            format!(
                "Extracted {} frame(s) to {}",
                written.len(),
                options.output_directory(&cli.name).display()
            )
            .green()
        );
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
