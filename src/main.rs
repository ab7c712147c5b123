//! hwcheck - terminal hardware testing suite
//!
//! One binary, two surfaces:
//! - a fullscreen TUI with keyboard/mouse/audio/benchmark/metrics test
//!   screens behind a card dashboard
//! - plain console commands (`info`, `watch`, `bench`, `config`) for
//!   scripts and non-interactive terminals

mod audio;
mod bench;
mod config;
mod metrics;
mod tui;

use std::io::{self, IsTerminal, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use tracing_subscriber::EnvFilter;

use crate::bench::BenchOptions;
use crate::config::Config;
use crate::metrics::HardwareSnapshot;

#[cfg(target_os = "windows")]
use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
#[cfg(target_os = "windows")]
use windows_sys::Win32::System::Console::{
    GetConsoleMode, GetStdHandle, SetConsoleCP, SetConsoleMode, SetConsoleOutputCP,
    ENABLE_PROCESSED_OUTPUT, ENABLE_VIRTUAL_TERMINAL_PROCESSING, ENABLE_WRAP_AT_EOL_OUTPUT,
    STD_ERROR_HANDLE, STD_OUTPUT_HANDLE,
};

/// hwcheck - check your hardware from the terminal
#[derive(Parser)]
#[command(name = "hwcheck")]
#[command(version)]
#[command(about = "Terminal hardware testing suite with live CPU/RAM metrics")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the fullscreen test suite (default)
    Suite,

    /// Print a one-shot hardware snapshot
    Info {
        /// Emit JSON instead of the console summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Re-print the snapshot on a timer (R refreshes, Q quits)
    Watch {
        /// Seconds between automatic refreshes
        #[arg(long)]
        interval_secs: Option<u64>,
    },

    /// Run the CPU benchmark without the TUI
    Bench {
        /// Stress duration in seconds
        #[arg(long)]
        duration_secs: Option<u64>,

        /// Emit the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the config file path and effective values
    Config,
}

#[cfg(target_os = "windows")]
fn init_windows_console() {
    // Best-effort enabling of ANSI/VT sequences for nicer output in legacy hosts.
    // If the handle isn't a console (e.g., redirected), these calls will fail harmlessly.
    unsafe {
        let _ = SetConsoleOutputCP(65001);
        let _ = SetConsoleCP(65001);

        for handle_id in [STD_OUTPUT_HANDLE, STD_ERROR_HANDLE] {
            let handle = GetStdHandle(handle_id);
            if handle.is_null() || handle == INVALID_HANDLE_VALUE {
                continue;
            }

            let mut mode: u32 = 0;
            if GetConsoleMode(handle, &mut mode) == 0 {
                continue;
            }

            let desired = mode
                | ENABLE_PROCESSED_OUTPUT
                | ENABLE_WRAP_AT_EOL_OUTPUT
                | ENABLE_VIRTUAL_TERMINAL_PROCESSING;
            let _ = SetConsoleMode(handle, desired);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("HWCHECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn is_interactive() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

fn main() -> Result<()> {
    #[cfg(target_os = "windows")]
    init_windows_console();

    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Suite) | None => {
            // Fullscreen suite needs a real terminal; redirected streams
            // get the one-shot snapshot instead.
            if is_interactive() {
                tui::run_tui()?;
            } else {
                println!("{}", HardwareSnapshot::capture().render_text());
            }
        }
        Some(Commands::Info { json }) => cmd_info(json)?,
        Some(Commands::Watch { interval_secs }) => cmd_watch(interval_secs)?,
        Some(Commands::Bench {
            duration_secs,
            json,
        }) => cmd_bench(duration_secs, json)?,
        Some(Commands::Config) => cmd_config()?,
    }

    Ok(())
}

fn cmd_info(json: bool) -> Result<()> {
    let snapshot = HardwareSnapshot::capture();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?
        );
    } else {
        println!("{}", snapshot.render_text());
    }
    Ok(())
}

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn cmd_watch(interval_secs: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let interval = Duration::from_secs(interval_secs.unwrap_or(config.metrics.refresh_secs).max(1));

    if !is_interactive() {
        // No keys to read; just print once
        println!("{}", HardwareSnapshot::capture().render_text());
        return Ok(());
    }

    let _guard = RawModeGuard::enter()?;
    let mut snapshot = HardwareSnapshot::capture();

    loop {
        let mut stdout = io::stdout();
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

        // Raw mode needs explicit carriage returns
        let text = snapshot.render_text().replace('\n', "\r\n");
        write!(stdout, "{text}\r\n\r\n")?;
        write!(
            stdout,
            "{}",
            format!(
                "R refresh now · Q quit · auto-refresh every {}s\r\n",
                interval.as_secs()
            )
            .dimmed()
        )?;
        stdout.flush()?;

        let deadline = Instant::now() + interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() {
                break;
            }

            if !event::poll(timeout)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('r') | KeyCode::Char('R') => break,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => {}
                }
            }
        }

        snapshot.refresh();
    }
}

fn cmd_bench(duration_secs: Option<u64>, json: bool) -> Result<()> {
    let config = Config::load()?;
    let options = BenchOptions::new(
        duration_secs.unwrap_or(config.benchmark.duration_secs),
        config.benchmark.slice_ms,
    );

    if !json {
        println!(
            "{} ({}s single-core prime count)",
            "Running CPU benchmark...".bright_cyan(),
            options.duration.as_secs()
        );
    }

    let result = bench::run(options, |progress| {
        if !json {
            let ratio = progress.ratio();
            let filled = (ratio * 30.0) as usize;
            let bar = format!("{}{}", "█".repeat(filled), "░".repeat(30 - filled));
            print!("\r[{bar}] {:>3.0}%", ratio * 100.0);
            let _ = io::stdout().flush();
        }
        true
    });

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        println!();
        println!(
            "{} {}",
            "Score:".bright_white(),
            result.score.to_string().bright_cyan().bold()
        );
        println!(
            "{} iterations, {} primes in {:.2}s",
            result.iterations, result.primes_found, result.duration_secs
        );
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let path = Config::config_path()?;
    let config = Config::load()?;

    println!("{} {}", "Config file:".bright_white(), path.display());
    if !path.exists() {
        println!("{}", "(not written yet; showing defaults)".dimmed());
    }
    println!();
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to serialize config")?
    );

    Ok(())
}
