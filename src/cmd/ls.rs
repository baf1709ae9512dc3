use anyhow::{Result, anyhow};
use graphfs::Filesystem;

const USAGE: &str = "Usage: graphfs ls [-l|--long] [-R|--recursive] [path]";

#[derive(Debug, PartialEq, Eq)]
struct LsArgs {
    path: String,
    long: bool,
    recursive: bool,
}

fn parse_args(args: &[String]) -> Result<LsArgs> {
    let mut path: Option<String> = None;
    let mut long = false;
    let mut recursive = false;
    let mut options_done = false;

    for arg in args {
        if !options_done {
            match arg.as_str() {
                "-l" | "--long" => {
                    long = true;
                    continue;
                }
                "-R" | "--recursive" => {
                    recursive = true;
                    continue;
                }
                "-lR" | "-Rl" => {
                    long = true;
                    recursive = true;
                    continue;
                }
                "--" => {
                    options_done = true;
                    continue;
                }
                _ if arg.starts_with('-') => {
                    return Err(anyhow!("unknown option for ls: {arg}\n{USAGE}"));
                }
                _ => {}
            }
        }

        if path.is_some() {
            return Err(anyhow!("ls accepts at most one path\n{USAGE}"));
        }
        path = Some(arg.clone());
    }

    Ok(LsArgs {
        path: path.unwrap_or_else(|| "/".to_string()),
        long,
        recursive,
    })
}

pub fn run(args: &[String]) -> Result<()> {
    let parsed = parse_args(args)?;
    let cfg = super::cli_config()?;
    let fs = super::adapter_from(&cfg)?;
    let entries = fs.list_contents(&parsed.path, parsed.recursive)?;

    if entries.is_empty() {
        println!("(empty)");
        return Ok(());
    }

    if parsed.long {
        super::print_entries_long(&entries, &parsed.path, cfg.nerd_font);
    } else {
        super::print_entries_short(&entries, &parsed.path, cfg.nerd_font);
    }
    Ok(())
}
