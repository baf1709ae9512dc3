use graphfs::StorageAttributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Folder,
    Archive,
    Image,
    Video,
    Audio,
    Document,
    Code,
    Default,
}

/// Category of a listing entry, derived from its detected MIME type.
pub fn categorize(entry: &StorageAttributes) -> FileCategory {
    let mime = match entry {
        StorageAttributes::Directory(_) => return FileCategory::Folder,
        StorageAttributes::File(f) => f.mime_type.as_deref().unwrap_or(""),
    };

    let (top, sub) = mime.split_once('/').unwrap_or((mime, ""));
    match top {
        "image" => FileCategory::Image,
        "video" => FileCategory::Video,
        "audio" => FileCategory::Audio,
        "text" if sub == "plain" || sub == "markdown" || sub == "csv" => FileCategory::Document,
        "text" => FileCategory::Code,
        "application" => match sub {
            "zip" | "gzip" | "x-tar" | "x-bzip2" | "x-xz" | "x-7z-compressed"
            | "vnd.rar" | "zstd" => FileCategory::Archive,
            "json" | "xml" | "toml" | "yaml" | "javascript" | "sql" | "x-sh" => {
                FileCategory::Code
            }
            "pdf" | "rtf" | "epub+zip" | "msword" => FileCategory::Document,
            _ if sub.starts_with("vnd.openxmlformats") || sub.starts_with("vnd.ms-")
                || sub.starts_with("vnd.oasis") =>
            {
                FileCategory::Document
            }
            _ => FileCategory::Default,
        },
        _ => FileCategory::Default,
    }
}

pub fn icon(category: FileCategory, nerd_font: bool) -> &'static str {
    if !nerd_font {
        return "";
    }
    match category {
        FileCategory::Folder => "\u{f07b} ",   //
        FileCategory::Archive => "\u{f1c6} ",  //
        FileCategory::Image => "\u{f1c5} ",    //
        FileCategory::Video => "\u{f03d} ",    //
        FileCategory::Audio => "\u{f001} ",    //
        FileCategory::Document => "\u{f15c} ", //
        FileCategory::Code => "\u{f121} ",     //
        FileCategory::Default => "\u{f15b} ",  //
    }
}

/// ANSI colored text for CLI output, using eza-style colors.
pub fn colored(text: &str, category: FileCategory) -> String {
    let code = match category {
        FileCategory::Folder => "1;34",   // bold blue
        FileCategory::Archive => "1;31",  // bold red
        FileCategory::Image => "35",      // magenta
        FileCategory::Video => "1;35",    // bold magenta
        FileCategory::Audio => "36",      // cyan
        FileCategory::Document => "1;33", // bold yellow
        FileCategory::Code => "1;32",     // bold green
        FileCategory::Default => "0",     // reset
    };
    format!("\x1b[{}m{}\x1b[0m", code, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphfs::{DirectoryAttributes, FileAttributes};

    fn file(path: &str, mime: Option<&str>) -> StorageAttributes {
        StorageAttributes::File(FileAttributes {
            mime_type: mime.map(str::to_string),
            ..FileAttributes::new(path)
        })
    }

    #[test]
    fn categories_follow_mime_type() {
        let dir = StorageAttributes::Directory(DirectoryAttributes {
            path: "docs".into(),
            last_modified: None,
        });
        assert_eq!(categorize(&dir), FileCategory::Folder);
        assert_eq!(categorize(&file("a.png", Some("image/png"))), FileCategory::Image);
        assert_eq!(categorize(&file("a.zip", Some("application/zip"))), FileCategory::Archive);
        assert_eq!(categorize(&file("a.md", Some("text/markdown"))), FileCategory::Document);
        assert_eq!(categorize(&file("a.rs", Some("text/x-rust"))), FileCategory::Code);
        assert_eq!(categorize(&file("README", None)), FileCategory::Default);
    }

    #[test]
    fn plain_icons_are_empty() {
        assert_eq!(icon(FileCategory::Folder, false), "");
        assert!(!icon(FileCategory::Folder, true).is_empty());
    }
}
