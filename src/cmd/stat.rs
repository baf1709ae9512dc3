use anyhow::Result;
use graphfs::Filesystem;

pub fn run(args: &[String]) -> Result<()> {
    let path = super::required(args, 0, "stat <path>")?;
    let fs = super::cli_adapter()?;

    let size = fs.file_size(path)?.file_size.unwrap_or(0);
    let modified = fs.last_modified(path)?.last_modified;
    // Unknown extensions simply have no MIME type to show.
    let mime = fs.mime_type(path).ok().and_then(|a| a.mime_type);
    let visibility = fs.visibility(path)?.visibility;

    println!("Path:       {}", graphfs::path::clean(path));
    println!("Size:       {} ({} bytes)", super::format_size(size), size);
    println!("Modified:   {}", super::format_date(modified));
    println!("MIME:       {}", mime.as_deref().unwrap_or("-"));
    match visibility {
        Some(v) => println!("Visibility: {:?}", v),
        None => println!("Visibility: -"),
    }
    Ok(())
}
