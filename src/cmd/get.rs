use anyhow::{Context, Result};
use graphfs::Filesystem;
use std::fs::File;
use std::io;
use std::path::PathBuf;

pub fn run(args: &[String]) -> Result<()> {
    let remote = super::required(args, 0, "get <remote_path> [local_path]")?;
    let (_, name) = graphfs::path::split_parent_name(remote);

    let dest = match args.get(1) {
        Some(local) => PathBuf::from(local),
        None => PathBuf::from(&name),
    };

    let fs = super::cli_adapter()?;
    let mut stream = fs.read_stream(remote)?;
    let mut file =
        File::create(&dest).with_context(|| format!("failed to create {}", dest.display()))?;
    let total = io::copy(&mut stream, &mut file)
        .with_context(|| format!("failed to write {}", dest.display()))?;

    println!(
        "Downloaded '{}' -> '{}' ({})",
        remote,
        dest.display(),
        super::format_size(total)
    );
    Ok(())
}
