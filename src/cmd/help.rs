use anyhow::Result;

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

pub fn run() -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{BOLD}{CYAN}graphfs{RESET} {DIM}v{version}{RESET}  {DIM}-{RESET}  OneDrive files from the command line"
    );
    println!();
    println!("{BOLD}Usage:{RESET}  {GREEN}graphfs{RESET} {DIM}<command> [args...]{RESET}");
    println!();
    println!("{BOLD}Commands:{RESET}");

    let commands: &[(&str, &str)] = &[
        ("ls [-l] [-R] [path]",      "List a folder (grid; long with -l, recursive with -R)"),
        ("cat <path>",               "Print a file to stdout"),
        ("stat <path>",              "Show size, modification time and MIME type"),
        ("exists <path>",            "Check whether a file or folder exists"),
        ("get <remote> [local]",     "Download a file"),
        ("put <local> [remote]",     "Upload a local file (chunked when large)"),
        ("mkdir <path>",             "Create a folder"),
        ("rm <path>",                "Delete a file"),
        ("rmdir <path>",             "Delete a folder and everything in it"),
        ("cp <src> <dst>",           "Copy a file or folder"),
        ("mv <src> <dst>",           "Move or rename a file or folder"),
    ];

    for (cmd, desc) in commands {
        let (name, args) = match cmd.find(' ') {
            Some(i) => (&cmd[..i], &cmd[i..]),
            None => (*cmd, ""),
        };
        println!(
            "  {GREEN}{name}{RESET}{DIM}{args}{RESET}  {:>width$}{DIM}{desc}{RESET}",
            "",
            width = 24usize.saturating_sub(cmd.len()),
        );
    }

    println!();
    println!("{BOLD}Options:{RESET}");
    println!("  {GREEN}-h{RESET}, {GREEN}--help{RESET}                   Show this help message");
    println!("  {GREEN}-V{RESET}, {GREEN}--version{RESET}                Show version");
    println!();
    println!("{BOLD}Environment:{RESET}");
    println!("  {GREEN}GRAPHFS_ACCESS_TOKEN{RESET}    OAuth bearer token (overrides config.toml)");
    println!("  {GREEN}GRAPHFS_API_BASE_URL{RESET}    Graph endpoint (default https://graph.microsoft.com/v1.0)");
    println!("  {GREEN}RUST_LOG{RESET}                Diagnostic verbosity, e.g. graphfs=debug");

    Ok(())
}
