use anyhow::Result;
use graphfs::Filesystem;

pub fn run(args: &[String]) -> Result<()> {
    const USAGE: &str = "mv <source_path> <dest_path>";
    let source = super::required(args, 0, USAGE)?;
    let destination = super::required(args, 1, USAGE)?;

    let fs = super::cli_adapter()?;
    fs.move_file(source, destination)?;
    println!("Moved '{}' -> '{}'", source, destination);
    Ok(())
}
