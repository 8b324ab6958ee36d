//! termask demo
//!
//! Walks through every prompt, or runs a single one, and reports the
//! answers as a table or as JSON.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use humansize::{BINARY, format_size};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use termask::output;
use termask::prompt::{self, Browser, run_prompt};
use termask::spinner::Spinner;
use termask::table;
use termask::theme::LATTE;
use termask::{ColorCapability, Context, Error, Result, Rgb};

const COLORS: [&str; 12] = [
    "Red", "Orange", "Yellow", "Green", "Cyan", "Blue", "Purple", "Pink", "Magenta", "White",
    "Black", "Gray",
];

const CONFIG_EXTENSIONS: [&str; 4] = [".json", ".yaml", ".toml", ".yml"];

#[derive(Parser)]
#[command(name = "termask")]
#[command(about = "Interactive terminal prompts demo")]
#[command(version)]
struct Cli {
    /// Use the light palette
    #[arg(long, short = 'l', global = true)]
    light: bool,

    /// Color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorArg,

    /// Accent color as #rrggbb
    #[arg(long, value_parser = parse_accent, global = true)]
    accent: Option<Rgb>,

    /// Output format for the answers
    #[arg(long, value_enum, default_value = "human", global = true)]
    format: OutputFormatArg,

    /// Run one prompt instead of the full tour
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a yes/no question
    Confirm {
        label: String,

        /// Make "no" the answer for Enter
        #[arg(long)]
        default_no: bool,
    },

    /// Read one line of text
    Input {
        label: String,

        /// Value used when nothing is typed
        #[arg(long, default_value = "")]
        placeholder: String,
    },

    /// Read several lines of text (Ctrl-D submits)
    Text { label: String },

    /// Pick one item from a list
    Select {
        label: String,

        #[arg(required = true)]
        items: Vec<String>,

        /// Rows shown before scrolling
        #[arg(long, default_value_t = prompt::state::DEFAULT_VISIBLE_ROWS)]
        rows: usize,
    },

    /// Browse the filesystem and pick a file
    File {
        label: String,

        /// Allowed extension (repeatable), e.g. --ext .json
        #[arg(long = "ext")]
        extensions: Vec<String>,

        /// Directory to start in (default: current directory)
        #[arg(long)]
        start: Option<PathBuf>,
    },

    /// Show a spinner while sleeping
    Spin {
        title: String,

        /// How long the simulated work takes
        #[arg(long, default_value_t = 2000)]
        millis: u64,

        /// Make the simulated work fail
        #[arg(long)]
        fail: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    None,
    #[value(name = "256")]
    Palette256,
    Truecolor,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

fn parse_accent(value: &str) -> std::result::Result<Rgb, String> {
    Rgb::from_hex(value).ok_or_else(|| format!("expected #rrggbb, got '{}'", value))
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let ctx = build_context(&cli);
    debug!(capability = %ctx.capability, light = cli.light, "context ready");

    let result = match cli.command {
        None => cmd_tour(&ctx, cli.format),
        Some(Commands::Confirm { label, default_no }) => {
            cmd_confirm(&ctx, cli.format, &label, !default_no)
        }
        Some(Commands::Input { label, placeholder }) => {
            cmd_input(&ctx, cli.format, &label, &placeholder)
        }
        Some(Commands::Text { label }) => cmd_text(&ctx, cli.format, &label),
        Some(Commands::Select { label, items, rows }) => {
            cmd_select(&ctx, cli.format, &label, &items, rows)
        }
        Some(Commands::File { label, extensions, start }) => {
            cmd_file(&ctx, cli.format, &label, &extensions, start)
        }
        Some(Commands::Spin { title, millis, fail }) => {
            cmd_spin(&ctx, cli.format, &title, millis, fail)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&ctx, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// SETUP
// ============================================================================

/// Log to stderr so diagnostics never land inside a prompt frame.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn build_context(cli: &Cli) -> Context {
    let mut ctx = Context::from_env();
    if cli.light {
        ctx = ctx.with_theme(LATTE);
    }
    if let Some(accent) = cli.accent {
        let mut theme = ctx.theme;
        theme.blue = accent;
        ctx = ctx.with_theme(theme);
    }
    match cli.color {
        ColorArg::Auto => ctx,
        ColorArg::None => ctx.with_capability(ColorCapability::None),
        ColorArg::Palette256 => ctx.with_capability(ColorCapability::Palette256),
        ColorArg::Truecolor => ctx.with_capability(ColorCapability::TrueColor),
    }
}

// ============================================================================
// REPORTING
// ============================================================================

/// One answer, as emitted with `--format json`.
#[derive(Serialize)]
#[serde(tag = "prompt", rename_all = "lowercase")]
enum Answer {
    Confirm { value: bool },
    Input { value: String },
    Text { value: String },
    Select { index: usize, value: String },
    File { path: PathBuf, size: Option<String> },
    Spin { ok: bool, elapsed_ms: u64 },
}

/// Everything the tour collected.
#[derive(Serialize)]
struct Summary {
    name: String,
    color: String,
    description: String,
    config_file: Option<PathBuf>,
    config_size: Option<String>,
    capability: ColorCapability,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn emit(format: OutputFormatArg, answer: &Answer) -> Result<()> {
    match format {
        // The prompt's own summary line already shows the answer
        OutputFormatArg::Human => Ok(()),
        OutputFormatArg::Json => print_json(answer),
    }
}

fn file_size(path: &Path) -> Option<String> {
    fs::metadata(path).ok().map(|m| format_size(m.len(), BINARY))
}

/// Cut `text` to `max` characters, marking the cut with `...`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_confirm(ctx: &Context, format: OutputFormatArg, label: &str, default: bool) -> Result<()> {
    let value = prompt::confirm(ctx, label, default)?;
    emit(format, &Answer::Confirm { value })
}

fn cmd_input(ctx: &Context, format: OutputFormatArg, label: &str, placeholder: &str) -> Result<()> {
    let value = prompt::input(ctx, label, placeholder)?;
    emit(format, &Answer::Input { value })
}

fn cmd_text(ctx: &Context, format: OutputFormatArg, label: &str) -> Result<()> {
    let value = prompt::text(ctx, label, "")?;
    emit(format, &Answer::Text { value })
}

fn cmd_select(
    ctx: &Context,
    format: OutputFormatArg,
    label: &str,
    items: &[String],
    rows: usize,
) -> Result<()> {
    let mut model = prompt::Select::new(label, items)?.max_visible(rows);
    let (index, value) = run_prompt(ctx, &mut model)?;
    emit(format, &Answer::Select { index, value })
}

fn cmd_file(
    ctx: &Context,
    format: OutputFormatArg,
    label: &str,
    extensions: &[String],
    start: Option<PathBuf>,
) -> Result<()> {
    let mut browser = Browser::new(label, extensions);
    if let Some(dir) = start {
        browser = browser.start_in(dir);
    }
    let path = run_prompt(ctx, &mut browser)?;
    let size = file_size(&path);
    if format == OutputFormatArg::Human {
        if let Some(size) = &size {
            output::info(ctx, &format!("Size: {}", size));
        }
    }
    emit(format, &Answer::File { path, size })
}

fn cmd_spin(
    ctx: &Context,
    format: OutputFormatArg,
    title: &str,
    millis: u64,
    fail: bool,
) -> Result<()> {
    let started = Instant::now();
    let outcome = Spinner::new(ctx, title).run(|| {
        thread::sleep(Duration::from_millis(millis));
        if fail {
            Err(io::Error::other("simulated failure"))
        } else {
            Ok(())
        }
    });
    let elapsed_ms = started.elapsed().as_millis() as u64;
    emit(format, &Answer::Spin { ok: outcome.is_ok(), elapsed_ms })?;
    outcome.map_err(Error::from)
}

/// The full walkthrough: every prompt in turn, then a summary.
fn cmd_tour(ctx: &Context, format: OutputFormatArg) -> Result<()> {
    if format == OutputFormatArg::Human {
        output::title(ctx, "termask demo");
        println!();
    }

    let name = prompt::input(ctx, "What is your name?", "anonymous")?;
    let (_, color) = prompt::select(ctx, "Pick your favorite color (type to filter):", &COLORS)?;

    if !prompt::confirm(ctx, "Do you want to continue?", true)? {
        output::warn(ctx, "Cancelled by user");
        return Ok(());
    }

    let description = prompt::text(ctx, "Enter a description:", "")?;

    let config_file = match prompt::file(ctx, "Select a config file:", &CONFIG_EXTENSIONS) {
        Ok(path) => Some(path),
        Err(Error::UserAborted) => {
            output::warn(ctx, "File selection skipped");
            None
        }
        Err(e) => return Err(e),
    };
    let config_size = config_file.as_deref().and_then(file_size);

    println!();
    let processed: std::result::Result<(), Error> =
        Spinner::new(ctx, "Processing your data...").run(|| {
            thread::sleep(Duration::from_secs(2));
            Ok(())
        });
    processed?;

    let summary = Summary {
        name,
        color,
        description,
        config_file,
        config_size,
        capability: ctx.capability,
    };

    match format {
        OutputFormatArg::Json => print_json(&summary),
        OutputFormatArg::Human => {
            println!();
            output::info(ctx, "✓ Processing complete!");
            println!();
            output::title(ctx, "Summary");
            println!();
            print_summary_table(ctx, &summary);
            println!();
            output::info(ctx, "Thank you for trying the termask demo!");
            Ok(())
        }
    }
}

fn print_summary_table(ctx: &Context, summary: &Summary) {
    let file = match (&summary.config_file, &summary.config_size) {
        (Some(path), Some(size)) => format!("{} ({})", path.display(), size),
        (Some(path), None) => path.display().to_string(),
        (None, _) => "(none)".to_string(),
    };
    let rows = vec![
        vec!["Name".to_string(), summary.name.clone()],
        vec!["Favorite Color".to_string(), summary.color.clone()],
        vec!["Description".to_string(), truncate(&summary.description, 40)],
        vec!["Config File".to_string(), file],
        vec!["Colors".to_string(), summary.capability.to_string()],
    ];
    table::print(ctx, &["Field", "Value"], &rows);
}
