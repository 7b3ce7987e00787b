use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use midi_file_sequence::config::{AppConfig, DEFAULT_CONFIG_PATH};
use midi_file_sequence::engine::{SoundEngine, StubPlatform};
use midi_file_sequence::status::{
    exit_on_error, parse_status, report_if_error, KnownStatus, OSStatus, StatusSummary,
};

#[derive(Parser, Debug)]
#[command(
    name = "midiseq",
    about = "Play MIDI notes and files, and explain audio/MIDI status codes"
)]
struct Cli {
    /// Log level for diagnostics on stderr
    #[arg(long, value_enum, global = true, default_value_t = LogLevel::Warn)]
    log_level: LogLevel,
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report a status the way a failing platform call would, exiting 1 if nonzero
    Check {
        /// Decimal, 0x-prefixed hex, or a quoted four-char code like 'noEr'
        #[arg(allow_hyphen_values = true, value_parser = parse_status)]
        status: OSStatus,
        /// Operation description printed in the diagnostic line
        #[arg(long, default_value = "status check")]
        operation: String,
    },
    /// Describe a status without exiting
    Explain {
        #[arg(allow_hyphen_values = true, value_parser = parse_status)]
        status: OSStatus,
        #[arg(long)]
        json: bool,
    },
    /// List every known status code
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Press the play button: start the MIDI file, pressing again stops it
    Tap {
        /// MIDI file to play (defaults to the config value)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Number of presses
        #[arg(long, default_value_t = 1)]
        count: u32,
    },
    /// Send a note-on/note-off pair
    Note {
        note: u32,
        #[arg(long)]
        velocity: Option<u32>,
        /// Instrument preset (defaults to the config value)
        #[arg(long)]
        preset: Option<u8>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::from(level))
        .with_target(false)
        .try_init();
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match cli.command {
        Commands::Check { status, operation } => {
            report_if_error(status, &operation);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Explain { status, json } => run_explain(status, json),
        Commands::Catalog { json } => run_catalog(json),
        Commands::Tap { file, count } => {
            let config = AppConfig::load_from_file(&cli.config);
            let file = file.unwrap_or(config.playback.midi_file);
            run_tap(file, count)
        }
        Commands::Note {
            note,
            velocity,
            preset,
        } => {
            let config = AppConfig::load_from_file(&cli.config);
            let velocity = velocity.unwrap_or(u32::from(config.playback.default_velocity));
            let preset = preset.unwrap_or(config.playback.preset_number);
            run_note(note, velocity, preset)
        }
    }
}

fn run_explain(status: OSStatus, json: bool) -> Result<ExitCode> {
    let summary = StatusSummary::new(status);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("status:   {}", summary.status);
    println!("rendered: {}", summary.rendered);
    println!("category: {}", summary.category);
    if let Some(family) = summary.family {
        println!("family:   {}", family);
    }
    if summary.symbolic_names.len() > 1 {
        println!("aliases:  {}", summary.symbolic_names.join(", "));
    }
    Ok(ExitCode::SUCCESS)
}

fn run_catalog(json: bool) -> Result<ExitCode> {
    let entries: Vec<StatusSummary> = KnownStatus::ALL
        .iter()
        .map(|known| StatusSummary::new(known.code()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(ExitCode::SUCCESS);
    }

    for known in KnownStatus::ALL {
        println!("{:>7}  {:<11} {}", known.code(), known.family(), known.symbolic_name());
    }
    Ok(ExitCode::SUCCESS)
}

fn run_tap(file: PathBuf, count: u32) -> Result<ExitCode> {
    let mut engine = SoundEngine::new(StubPlatform::new());
    for press in 1..=count {
        let playing = exit_on_error(engine.toggle(&file));
        println!(
            "tap {}: {} {}",
            press,
            if playing { "playing" } else { "stopped" },
            file.display()
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn run_note(note: u32, velocity: u32, preset: u8) -> Result<ExitCode> {
    let mut engine = SoundEngine::new(StubPlatform::new());
    exit_on_error(engine.set_preset(preset));
    exit_on_error(engine.play_note_on(note, velocity));
    exit_on_error(engine.play_note_off(note));

    let sent = engine.platform().sent_messages();
    for message in sent {
        let line = serde_json::json!({
            "status": format!("{:#04x}", message.status),
            "data1": message.data1,
            "data2": message.data2,
        });
        println!("{}", serde_json::to_string(&line).context("encoding MIDI message")?);
    }
    Ok(ExitCode::SUCCESS)
}
