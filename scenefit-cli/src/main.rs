use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use scenefit::{EngineConfig, LayoutMode, SceneDef};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scenefit", version)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate, correct and finalize a scene; prints the outcome as JSON.
    Sanitize(SanitizeArgs),
    /// Print what a layout mode allows.
    Describe(DescribeArgs),
}

#[derive(Parser, Debug)]
struct SanitizeArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Override the scene's layout mode (e.g. `full`, `split`, `step_by_step:4`, `grid:2x3`).
    #[arg(long)]
    mode: Option<LayoutMode>,

    /// Engine config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also fail when warnings remain after sanitization.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print single-line JSON.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(Parser, Debug)]
struct DescribeArgs {
    /// Layout mode to describe.
    #[arg(long)]
    mode: LayoutMode,

    /// Engine config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the guidance block instead of JSON.
    #[arg(long, default_value_t = false)]
    text: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Sanitize(args) => cmd_sanitize(args),
        Command::Describe(args) => cmd_describe(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => EngineConfig::from_path(p)
            .with_context(|| format!("load engine config '{}'", p.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn cmd_sanitize(args: SanitizeArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_ref())?;
    let mut def = SceneDef::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    if let Some(mode) = args.mode {
        def.layout_mode = mode;
    }

    let outcome = scenefit::process(&config, def)?;
    let json = if args.compact {
        serde_json::to_string(&outcome)?
    } else {
        serde_json::to_string_pretty(&outcome)?
    };
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}").context("write outcome")?;

    tracing::info!(
        corrections = outcome.log.corrections.len(),
        unresolved = outcome.log.unresolved.len(),
        "sanitized '{}'",
        args.in_path.display()
    );
    for issue in &outcome.log.unresolved {
        eprintln!("unresolved: {issue}");
    }

    let failed = outcome.has_unresolved_errors()
        || (args.strict && outcome.has_unresolved_warnings());
    Ok(if failed {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    })
}

fn cmd_describe(args: DescribeArgs) -> anyhow::Result<ExitCode> {
    let config = load_config(args.config.as_ref())?;
    let desc = scenefit::describe(&config.geometry, args.mode);
    if args.text {
        print!("{}", desc.to_prompt_text());
    } else {
        println!("{}", serde_json::to_string_pretty(&desc)?);
    }
    Ok(ExitCode::SUCCESS)
}
