use anyhow::{Result, anyhow};
use graphfs::Filesystem;

pub fn run(args: &[String]) -> Result<()> {
    let path = super::required(args, 0, "exists <path>")?;
    let fs = super::cli_adapter()?;
    if fs.file_exists(path) {
        println!("'{}' exists", path);
        Ok(())
    } else {
        Err(anyhow!("'{}' not found", path))
    }
}
