use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use subselect::{
    DEFAULT_AUDIO_BITRATE, FfmpegLogLevel, FileReport, Heuristics, MediaProbe, ProcessOptions,
    SelectionOptions, SubtitleSource, process_file, select,
};

const CLI_AFTER_HELP: &str = "Examples:\n  subselect 'Season 1/*.mkv'\n  subselect episode01.mkv --clean-only --overwrite\n  subselect --progress --fail-fast '*.mkv' '*.mp4'\n  subselect inspect episode01.mkv --json\n  subselect completions zsh > _subselect";

#[derive(Debug, Parser)]
#[command(
    name = "subselect",
    version,
    about = "Pick the full Japanese subtitle track, clean it, and embed it into MP4",
    after_help = CLI_AFTER_HELP,
    subcommand_negates_reqs = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Input files or glob patterns (e.g. '*.mkv').
    #[arg(required = true)]
    patterns: Vec<String>,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Only write the cleaned SRT; skip embedding into MP4.
    #[arg(long)]
    clean_only: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,

    /// Show additional logging output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Show a progress bar over the batch.
    #[arg(long)]
    progress: bool,

    /// Stop at the first file that fails.
    #[arg(long)]
    fail_fast: bool,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[arg(long, global = true)]
    log_level: Option<FfmpegLogLevel>,

    /// Path to the ffmpeg executable used for embedding.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// AAC bitrate for the embedded audio track.
    #[arg(long, default_value = DEFAULT_AUDIO_BITRATE)]
    audio_bitrate: String,

    /// JSON file overriding the title markers and ranking weights.
    #[arg(long, global = true)]
    heuristics: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show subtitle streams and the selection decision without writing files.
    #[command(
        about = "Inspect subtitle streams",
        visible_alias = "probe",
        after_help = "Examples:\n  subselect inspect episode01.mkv\n  subselect inspect episode01.mkv --json"
    )]
    Inspect {
        /// Input media path.
        input: PathBuf,

        /// Output machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

fn init_logging(global: &GlobalOptions) {
    let default_filter = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn apply_global_options(global: &GlobalOptions) {
    match global.log_level {
        Some(level) => subselect::set_ffmpeg_log_level(level),
        // The decoder is chatty about malformed ASS lines; keep it quiet
        // unless asked.
        None if !global.verbose => subselect::set_ffmpeg_log_level(FfmpegLogLevel::Error),
        None => {}
    }
}

fn selection_options(
    global: &GlobalOptions,
) -> Result<SelectionOptions, Box<dyn std::error::Error>> {
    let mut options = SelectionOptions::new();
    if let Some(path) = &global.heuristics {
        options = options.with_heuristics(Heuristics::from_json_file(path)?);
    }
    Ok(options)
}

fn process_options(global: &GlobalOptions) -> Result<ProcessOptions, Box<dyn std::error::Error>> {
    Ok(ProcessOptions::new()
        .with_selection(selection_options(global)?)
        .with_clean_only(global.clean_only)
        .with_overwrite(global.overwrite)
        .with_ffmpeg_program(&global.ffmpeg)
        .with_audio_bitrate(&global.audio_bitrate)
        // ffmpeg's own statistics line would fight with the progress bar.
        .with_show_stats(!global.progress))
}

fn warn(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

/// Expand glob patterns into a sorted, de-duplicated list of files.
///
/// A pattern naming an existing file is taken literally, so release names
/// such as `[Group] Show - 01.mkv` are not misread as character classes.
/// Returns the files and the patterns that matched nothing.
fn expand_patterns(patterns: &[String]) -> (Vec<PathBuf>, Vec<String>) {
    let mut files = BTreeSet::new();
    let mut unmatched = Vec::new();

    for pattern in patterns {
        let literal = Path::new(pattern);
        if literal.is_file() {
            files.insert(literal.to_path_buf());
            continue;
        }

        let matches: Vec<PathBuf> = match glob::glob(pattern) {
            Ok(paths) => paths
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(error) => {
                        log::warn!("Skipping unreadable path: {error}");
                        None
                    }
                })
                .filter(|path| path.is_file())
                .collect(),
            Err(error) => {
                log::warn!("Invalid glob pattern '{pattern}': {error}");
                Vec::new()
            }
        };

        if matches.is_empty() {
            unmatched.push(pattern.clone());
        }
        files.extend(matches);
    }

    (files.into_iter().collect(), unmatched)
}

fn inspect(
    input: &Path,
    json: bool,
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata = MediaProbe::probe(input)?;
    let selection = select(&metadata.subtitle_streams, &selection_options(global)?);

    if json {
        let payload = json!({
            "input": input.display().to_string(),
            "format": metadata.format,
            "duration_seconds": metadata.duration.as_secs_f64(),
            "subtitle_streams": metadata.subtitle_streams,
            "selection": {
                "index": selection.index(),
                "rejection": selection.rejection().map(|rejection| rejection.to_string()),
                "reason": selection.reason(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("Format: {}", metadata.format);
    println!("Duration: {:.2}s", metadata.duration.as_secs_f64());
    println!("Subtitle streams: {}", metadata.subtitle_streams.len());
    for stream in &metadata.subtitle_streams {
        let mut flags = Vec::new();
        if stream.disposition.default {
            flags.push("default");
        }
        if stream.disposition.forced {
            flags.push("forced");
        }
        let line = format!(
            "  #{} [{}] lang={} title={}{}",
            stream.index,
            if stream.codec_name.is_empty() { "?" } else { stream.codec_name.as_str() },
            stream.language.as_deref().unwrap_or("-"),
            stream.title.as_deref().map_or("-".to_string(), |title| format!("{title:?}")),
            if flags.is_empty() { String::new() } else { format!(" ({})", flags.join(", ")) },
        );
        if selection.index() == Some(stream.index) {
            println!("{}", line.green().bold());
        } else {
            println!("{line}");
        }
    }

    match selection.index() {
        Some(_) => println!("{} {selection}", "Selection:".green().bold()),
        None => println!("{} {selection}", "Selection:".yellow().bold()),
    }
    Ok(())
}

fn report_lines(report: &FileReport) -> Vec<String> {
    let mut lines = Vec::new();
    if let SubtitleSource::Sidecar(path) = &report.source {
        lines.push(format!(" • Using sidecar subtitles {}", path.display()));
    }
    lines.push(format!(" • Cleaned subtitles → {}", report.cleaned_path.display()));
    if let Some(output) = &report.embedded_path {
        lines.push(format!(" → Done: {}", output.display()).green().to_string());
    }
    lines
}

fn process_batch(
    patterns: &[String],
    global: &GlobalOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let (files, unmatched) = expand_patterns(patterns);
    for pattern in &unmatched {
        warn(&format!("no files match '{pattern}'"));
    }
    if files.is_empty() {
        return Err("no input files found".into());
    }

    let options = process_options(global)?;

    let progress_bar = if global.progress {
        let pb = ProgressBar::new(files.len() as u64);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        pb.set_style(style.progress_chars("##-"));
        Some(pb)
    } else {
        None
    };
    let emit = |line: String| match &progress_bar {
        Some(pb) => pb.println(line),
        None => println!("{line}"),
    };

    let mut failures = 0_usize;
    for file in &files {
        emit(format!("Processing '{}'...", file.display()));
        if let Some(pb) = &progress_bar {
            let name = file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            pb.set_message(name);
        }

        match process_file(file, &options) {
            Ok(report) => {
                log::debug!("{}: {} from {}", file.display(), report.selection, report.source);
                for line in report_lines(&report) {
                    emit(line);
                }
            }
            Err(error) => {
                failures += 1;
                let line = format!("{} {}: {error}", "error:".red().bold(), file.display());
                match &progress_bar {
                    Some(pb) => pb.suspend(|| eprintln!("{line}")),
                    None => eprintln!("{line}"),
                }
                if global.fail_fast {
                    if let Some(pb) = &progress_bar {
                        pb.abandon();
                    }
                    return Err(format!("stopping after failure on {}", file.display()).into());
                }
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress_bar {
        pb.finish_with_message("done");
    }

    if failures > 0 {
        return Err(format!("{failures} of {} files failed", files.len()).into());
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);
    apply_global_options(&cli.global);

    match cli.command {
        Some(Commands::Inspect { input, json }) => inspect(&input, json, &cli.global),
        Some(Commands::Completions { shell }) => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "subselect", &mut std::io::stdout());
            Ok(())
        }
        None => process_batch(&cli.patterns, &cli.global),
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
