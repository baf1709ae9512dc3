use anyhow::Result;
use graphfs::Filesystem;

pub fn run(args: &[String]) -> Result<()> {
    let path = super::required(args, 0, "mkdir <path>")?;
    let fs = super::cli_adapter()?;
    fs.create_directory(path)?;
    println!("Created folder '{}'", path);
    Ok(())
}
