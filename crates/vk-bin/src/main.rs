//! vikey entrypoint.
use anyhow::{Result, bail};
use clap::Parser;
use core_config::load_from;
use core_input::{map_key_event, parse_keys};
use crossterm::event::{self, Event as TermEvent, KeyCode as TermKeyCode, KeyModifiers};
use crossterm::terminal;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use vikey::Session;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vikey", version, about = "Replay modal key sequences against a text file")]
struct Args {
    /// UTF-8 text file to load.
    pub path: PathBuf,
    /// Keys to replay in key notation, e.g. `12j$` or `gg<C-f>`.
    #[arg(long, short = 'k', conflicts_with = "interactive")]
    pub keys: Option<String>,
    /// Read keys from the terminal until Ctrl-C.
    #[arg(long)]
    pub interactive: bool,
    /// Optional configuration file path (overrides discovery of `vikey.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("vikey.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "vikey.log");
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = terminal::disable_raw_mode();
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Leaves raw mode on drop, including early returns through `?`.
struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn run_interactive(session: &mut Session) -> Result<()> {
    let _raw = RawModeGuard::enter()?;
    let mut out = std::io::stdout();
    write!(out, "{}\r\n", session.report())?;
    out.flush()?;
    loop {
        let TermEvent::Key(key) = event::read()? else {
            continue;
        };
        if key.code == TermKeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }
        let Some(ev) = map_key_event(&key) else {
            continue;
        };
        let outcome = session.apply(&ev);
        let key_text = ev.to_string();
        let outcome_text = format!("{outcome:?}");
        write!(out, "{key_text:<8} {outcome_text:<24} {}\r\n", session.report())?;
        out.flush()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let mut session = Session::open(&args.path, config.dispatch())?;

    match (&args.keys, args.interactive) {
        (Some(keys), _) => {
            let keys = parse_keys(keys)?;
            info!(target: "runtime", keys = keys.len(), "replay");
            session.replay(&keys);
            println!("{}", session.report());
        }
        (None, true) => run_interactive(&mut session)?,
        (None, false) => bail!("nothing to do: pass --keys <KEYS> or --interactive"),
    }

    info!(target: "runtime", "shutdown");
    Ok(())
}
