use anyhow::Result;
use graphfs::Filesystem;

pub fn run(args: &[String]) -> Result<()> {
    let path = super::required(args, 0, "rm <file_path>")?;
    let fs = super::cli_adapter()?;
    fs.delete(path)?;
    println!("Removed '{}'", path);
    Ok(())
}
