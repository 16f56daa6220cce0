//! shorts-assembly CLI entry point.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use shorts_assembly::cli::{Args, Command, EngineKind};
use shorts_assembly::config::Config;
use shorts_assembly::doctor;
use shorts_assembly::engine::VoiceoverGenerator;
use shorts_assembly::library::{self, LibraryError, MusicLibrary};
use shorts_assembly::notify::{EmailNotifier, create_mailer};
use shorts_assembly::runner::DailyRunner;
use shorts_assembly::scripts;
use shorts_assembly::speech::build_engines;
use shorts_assembly::video::{FfmpegToolkit, VideoBuilder};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;

    match args.command {
        Command::Scripts {
            count,
            seed,
            output,
        } => generate_scripts(&config, count, seed, output),
        Command::Notify { scripts } => notify(&config, scripts),
        Command::Voice {
            text,
            file,
            name,
            engine,
        } => voice(&config, text, file, &name, engine),
        Command::Video { audio, music, name } => video(&config, &audio, &music, &name),
        Command::Run { skip_video } => run(&config, skip_video),
        Command::Template { force } => template(&config, force),
        Command::Doctor => run_doctor(&config, args.config.as_deref()),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate_scripts(
    config: &Config,
    count: usize,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let output = output.unwrap_or_else(|| config.paths.scripts_file.clone());

    let candidates = scripts::generate_candidates(&mut rng, count);
    scripts::save_scripts(&output, &candidates)
        .with_context(|| format!("Failed to save scripts to {}", output.display()))?;

    for (i, script) in candidates.iter().enumerate() {
        println!("Option {}: {}", i + 1, script.title);
    }
    println!("Scripts saved to: {}", output.display());
    Ok(())
}

fn notify(config: &Config, scripts_path: Option<PathBuf>) -> Result<()> {
    let path = scripts_path.unwrap_or_else(|| config.paths.scripts_file.clone());
    let candidates = scripts::load_scripts_or_sample(&path)
        .with_context(|| format!("Failed to load scripts from {}", path.display()))?;

    let mailer = create_mailer(&config.email).context("Cannot send email")?;
    let notifier = EmailNotifier::new(mailer, config.email.clone());
    let message = notifier
        .send_script_approval(&candidates, Local::now().date_naive())
        .context("Failed to send approval email")?;

    println!("Email sent to: {}", message.to);
    println!("  Subject: {}", message.subject);
    Ok(())
}

fn voice(
    config: &Config,
    text: Option<String>,
    file: Option<PathBuf>,
    name: &str,
    engines: Vec<EngineKind>,
) -> Result<()> {
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(file)) => std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?,
        (None, None) => anyhow::bail!("Provide --text or --file"),
    };

    let kinds = if engines.is_empty() {
        config.voice.engines.clone()
    } else {
        engines
    };

    let generator = VoiceoverGenerator::new(
        build_engines(&kinds, &config.voice),
        config.voice.clone(),
        config.paths.audio_dir.clone(),
    );
    let voiceover = generator
        .generate(&text, name)
        .context("Failed to generate voiceover")?;

    println!("Audio saved to: {}", voiceover.path.display());
    println!("  Engine: {}", voiceover.engine);
    if let Some(voice) = &voiceover.voice {
        println!("  Voice: {voice}");
    }
    println!("  Size: {:.1} KB", voiceover.bytes as f64 / 1024.0);
    Ok(())
}

fn video(config: &Config, audio: &Path, music: &Path, name: &str) -> Result<()> {
    let toolkit = FfmpegToolkit::new().context("ffmpeg is required to build videos")?;
    let builder = VideoBuilder::new(
        toolkit,
        config.video.clone(),
        config.paths.video_dir.clone(),
    );

    let output = builder
        .create_video(audio, music, name)
        .context("Failed to create video")?;

    println!("Video saved to: {}", output.display());
    Ok(())
}

fn run(config: &Config, skip_video: bool) -> Result<()> {
    info!("Daily run started at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let video = if skip_video {
        None
    } else {
        let toolkit = FfmpegToolkit::new().context("ffmpeg is required to build videos")?;
        Some(VideoBuilder::new(
            toolkit,
            config.video.clone(),
            config.paths.video_dir.clone(),
        ))
    };

    let voiceover = VoiceoverGenerator::new(
        build_engines(&config.voice.engines, &config.voice),
        config.voice.clone(),
        config.paths.audio_dir.clone(),
    );

    let mut runner = DailyRunner::new(
        config.paths.clone(),
        MusicLibrary::new(&config.paths.music_dir),
        voiceover,
        video,
    );
    let report = runner
        .run(Local::now().naive_local())
        .context("Daily run failed")?;

    println!("Script: {} characters", report.script_chars);
    println!("Music: {}", report.music.display());
    println!(
        "Voiceover: {} ({})",
        report.voiceover.path.display(),
        report.voiceover.engine
    );
    if let Some(video) = &report.video {
        println!("Video: {}", video.display());
    }
    Ok(())
}

fn template(config: &Config, force: bool) -> Result<()> {
    let path = &config.paths.approved_script;
    match library::write_template(path, force) {
        Ok(()) => {
            println!("Template written to: {}", path.display());
            Ok(())
        }
        Err(LibraryError::AlreadyExists(path)) => {
            println!("Script already exists: {} (use --force to overwrite)", path.display());
            Ok(())
        }
        Err(e) => Err(e).context("Failed to write template"),
    }
}

fn run_doctor(config: &Config, explicit: Option<&Path>) -> Result<()> {
    let source = explicit
        .map(Path::to_path_buf)
        .or_else(Config::discover_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "built-in defaults".to_string());
    let cwd = std::env::current_dir().context("Cannot read working directory")?;

    println!("shorts-assembly {}", env!("CARGO_PKG_VERSION"));
    println!("  Working dir: {}", cwd.display());
    println!("  Config: {source}");
    println!();

    let checks = doctor::run_checks(config, doctor::locate_on_path);
    for check in &checks {
        let mark = if check.ok { "ok" } else { "--" };
        println!("  [{mark}] {:<16} {}", check.label, check.detail);
    }

    let failing = checks.iter().filter(|c| !c.ok).count();
    println!();
    println!("{} checks, {} not ok", checks.len(), failing);
    Ok(())
}
