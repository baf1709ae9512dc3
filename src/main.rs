mod cmd;
mod theme;

use anyhow::{Result, anyhow};
use std::env;
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = entry() {
        eprintln!("Error: {e:#}");
        exit(1);
    }
}

fn entry() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        return cmd::help::run();
    };
    let rest = &args[2..];

    match command.as_str() {
        "ls" => cmd::ls::run(rest),
        "cat" => cmd::cat::run(rest),
        "stat" => cmd::stat::run(rest),
        "exists" => cmd::exists::run(rest),
        "put" => cmd::put::run(rest),
        "get" => cmd::get::run(rest),
        "mkdir" => cmd::mkdir::run(rest),
        "rm" => cmd::rm::run(rest),
        "rmdir" => cmd::rmdir::run(rest),
        "cp" => cmd::cp::run(rest),
        "mv" => cmd::mv::run(rest),
        "help" | "-h" | "--help" => cmd::help::run(),
        "-V" | "--version" => {
            println!("graphfs {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(anyhow!(
            "unknown command: {other}\nRun `graphfs help` for usage"
        )),
    }
}

/// Diagnostics go to stderr so command output stays pipeable. Silent unless
/// `RUST_LOG` asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
