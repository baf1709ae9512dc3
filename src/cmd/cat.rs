use anyhow::{Context, Result};
use graphfs::Filesystem;
use std::io::{self, Write};

pub fn run(args: &[String]) -> Result<()> {
    let path = super::required(args, 0, "cat <path>")?;
    let fs = super::cli_adapter()?;

    let mut stream = fs.read_stream(path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    io::copy(&mut stream, &mut out).context("failed to write to stdout")?;
    out.flush()?;
    Ok(())
}
