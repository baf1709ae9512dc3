use anyhow::Result;
use graphfs::Filesystem;

pub fn run(args: &[String]) -> Result<()> {
    let path = super::required(args, 0, "rmdir <folder_path>")?;
    let fs = super::cli_adapter()?;
    fs.delete_directory(path)?;
    println!("Removed folder '{}' and its contents", path);
    Ok(())
}
