#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use coachmark::{Result, Size, WalkthroughConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::runner::{CommandSource, RunSummary, Session, run_session};
use crate::script::{ScriptCommand, default_script};
use crate::steps::resolve_steps;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "coachmark=info";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "coachmark-demo",
    about = "Walk through a bank home screen and print each coachmark overlay as ASCII",
    version
)]
pub struct Cli {
    /// JSON step declarations; falls back to built-in steps when unreadable.
    #[arg(long)]
    pub steps: Option<PathBuf>,

    /// JSON walkthrough config merged over the defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Viewport width in px.
    #[arg(long, default_value_t = 400.0)]
    pub width: f32,

    /// Viewport height in px.
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,

    /// Comma-separated commands: n, p, f, d, s, g<N>.
    #[arg(long, value_delimiter = ',')]
    pub script: Vec<ScriptCommand>,

    /// Read commands from stdin instead of a script.
    #[arg(long, conflicts_with = "script")]
    pub interactive: bool,

    /// Frame width in characters.
    #[arg(long, default_value_t = 40)]
    pub cols: usize,

    /// Frame height in characters.
    #[arg(long, default_value_t = 40)]
    pub rows: usize,

    /// Leave a home-screen element unmounted (repeatable).
    #[arg(long = "hide", value_name = "KEY")]
    pub hidden: Vec<String>,

    /// Emit logs as JSON lines.
    #[arg(long)]
    pub log_json: bool,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            steps: None,
            config: None,
            width: 400.0,
            height: 800.0,
            script: Vec::new(),
            interactive: false,
            cols: 40,
            rows: 40,
            hidden: Vec::new(),
            log_json: false,
        }
    }
}

/// Install the global subscriber: `RUST_LOG` or [`DEFAULT_LOG_FILTER`],
/// written to stderr so frames on stdout stay clean.
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if installed.is_err() {
        eprintln!("tracing subscriber already installed");
    }
}

pub fn run_from_env() -> Result<RunSummary> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut input, &mut out)
}

pub fn run(cli: Cli, input: &mut dyn std::io::BufRead, out: &mut impl Write) -> Result<RunSummary> {
    let config = cli
        .config
        .as_deref()
        .map(WalkthroughConfig::load_or_default)
        .unwrap_or_default();
    let (steps, origin) = resolve_steps(cli.steps.as_deref());
    info!(steps = steps.len(), %origin, "walkthrough loaded");

    let source = if cli.interactive {
        CommandSource::Interactive(input)
    } else if cli.script.is_empty() {
        CommandSource::Script(default_script(steps.len()))
    } else {
        CommandSource::Script(cli.script)
    };
    let session = Session {
        viewport: Size::new(cli.width, cli.height),
        cols: cli.cols,
        rows: cli.rows,
        config,
        hidden: cli.hidden,
    };
    run_session(steps, origin, session, source, out)
}
