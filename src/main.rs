// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use barscroll::ui::{App, KeyAction, TerminalViewFactory, TransportClock};
use barscroll::{EditorConfig, EditorCore, SongFile};

type Editor = EditorCore<TerminalViewFactory, TransportClock>;

#[derive(Parser)]
#[command(name = "barscroll")]
#[command(author, version, about = "Bar timeline editor with tempo-locked playback")]
struct Cli {
    /// Editor configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Song file to open and save on quit (YAML)
    #[arg(short, long)]
    song: Option<PathBuf>,

    /// Musical key for a new song
    #[arg(short, long, default_value = "C")]
    key: String,

    /// Run without the terminal UI for this many seconds
    #[arg(long, value_name = "SECONDS")]
    headless: Option<f64>,

    /// Frames per second for the tick loop
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Start in playback mode
    #[arg(long)]
    play: bool,
}

fn init_logging(config: &EditorConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if to_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.logging.file)
            .with_context(|| format!("Failed to open log file: {}", config.logging.file))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

fn load_song(cli: &Cli) -> Result<SongFile> {
    match &cli.song {
        Some(path) if path.exists() => SongFile::load(path),
        _ => Ok(SongFile::new(cli.key.clone())),
    }
}

fn save_song(cli: &Cli, editor: &Editor) -> Result<()> {
    let Some(path) = &cli.song else {
        return Ok(());
    };
    let song = editor.song().cloned().unwrap_or_default();
    let file = SongFile {
        song,
        track: editor.track(),
    };
    file.save(path)?;
    info!(path = %path.display(), bars = file.track.len(), "song saved");
    Ok(())
}

fn run_headless(editor: &mut Editor, seconds: f64, fps: u32) {
    let frame = 1.0 / fps.max(1) as f64;
    let frames = (seconds / frame).round() as u64;
    for _ in 0..frames {
        editor.tick(frame);
    }

    println!("Mode:     {:?}", editor.mode());
    println!("Bars:     {}", editor.bar_count());
    println!("Offset:   {:.2}", editor.offset());
    println!("Position: bar {} beat {}", editor.current_bar() + 1, editor.current_beat() + 1);
    println!(
        "Played:   {} ({} frames)",
        editor.sink().format_time(),
        editor.sink().frames()
    );
}

fn run_tui(editor: &mut Editor, fps: u32) -> Result<()> {
    let mut app = App::new().context("Failed to initialize terminal")?;
    app.set_frame_rate(fps);

    let mut last = Instant::now();
    while app.is_running() {
        let now = Instant::now();
        editor.tick(now.duration_since(last).as_secs_f64());
        last = now;

        app.state_mut().update_from_editor(editor);
        app.draw()?;

        if let Some((code, modifiers)) = app.poll_key()? {
            let action = app.handle_key(code, modifiers);
            if action != KeyAction::None {
                app.dispatch(editor, action);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };
    init_logging(&config, cli.headless.is_none())?;

    let song = load_song(&cli)?;
    let mut editor = EditorCore::new(
        config,
        TerminalViewFactory::default(),
        TransportClock::default(),
    );
    editor.init(song.track, song.song)?;
    editor.load_bars()?;

    if cli.play {
        editor.play()?;
    }

    match cli.headless {
        Some(seconds) => run_headless(&mut editor, seconds, cli.fps),
        None => run_tui(&mut editor, cli.fps)?,
    }

    save_song(&cli, &editor)
}
