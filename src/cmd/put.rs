use anyhow::{Context, Result, anyhow};
use graphfs::Filesystem;
use std::fs::File;
use std::path::Path;

pub fn run(args: &[String]) -> Result<()> {
    let local = super::required(args, 0, "put <local_path> [remote_path]")?;
    let local_path = Path::new(local);

    let remote = match args.get(1) {
        Some(remote) => remote.clone(),
        None => local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("cannot derive a remote name from '{}'", local))?,
    };

    let mut file =
        File::open(local_path).with_context(|| format!("failed to open {}", local))?;
    let size = file.metadata()?.len();

    let fs = super::cli_adapter()?;
    fs.write_stream(&remote, &mut file)?;
    println!(
        "Uploaded '{}' -> '{}' ({})",
        local,
        remote,
        super::format_size(size)
    );
    Ok(())
}
