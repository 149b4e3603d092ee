//! termfolio CLI
//!
//! A personal page for the terminal: scroll it, toggle its theme,
//! send a (simulated) message.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use termfolio::content::Page;
use termfolio::export::{format_page, OutputFormat};
use termfolio::platform::detect_background;
use termfolio::prefs::{resolve_initial, PrefStore, ThemeMode};
use termfolio::tui;

#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "A personal page for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved theme, or change the stored preference
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Print the page content without entering the TUI
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Persist a theme preference
    Set {
        mode: ThemeModeArg,
    },
    /// Delete the stored preference
    Clear,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ThemeModeArg {
    Light,
    Dark,
}

impl From<ThemeModeArg> for ThemeMode {
    fn from(arg: ThemeModeArg) -> Self {
        match arg {
            ThemeModeArg::Light => ThemeMode::Light,
            ThemeModeArg::Dark => ThemeMode::Dark,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_run(),
        Some(Commands::Theme { command: None }) => cmd_theme_show(),
        Some(Commands::Theme { command: Some(ThemeCommands::Set { mode }) }) => {
            cmd_theme_set(mode.into())
        }
        Some(Commands::Theme { command: Some(ThemeCommands::Clear) }) => cmd_theme_clear(),
        Some(Commands::Export { format }) => cmd_export(format.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run() -> Result<(), String> {
    let store = PrefStore::open_default().map_err(|e| e.to_string())?;
    tui::run(store).map_err(|e| e.to_string())
}

fn cmd_theme_show() -> Result<(), String> {
    let store = PrefStore::open_default().map_err(|e| e.to_string())?;
    let background = detect_background();
    let resolved = resolve_initial(store.get(), background.prefers_light());

    let source = match store.get() {
        Some(_) => "stored preference",
        None if background.prefers_light() => "terminal background",
        None => "default",
    };

    println!("Theme:    {}", resolved);
    println!("Source:   {}", source);
    println!("Terminal: {}", background);
    println!("Store:    {}", store.path().display());

    Ok(())
}

fn cmd_theme_set(mode: ThemeMode) -> Result<(), String> {
    let mut store = PrefStore::open_default().map_err(|e| e.to_string())?;
    store.set(mode).map_err(|e| e.to_string())?;
    println!("Stored theme: {}", mode);
    Ok(())
}

fn cmd_theme_clear() -> Result<(), String> {
    let mut store = PrefStore::open_default().map_err(|e| e.to_string())?;
    store.clear().map_err(|e| e.to_string())?;
    println!("Stored preference cleared.");
    Ok(())
}

fn cmd_export(format: OutputFormat) -> Result<(), String> {
    print!("{}", format_page(&Page::builtin(), format));
    Ok(())
}
