pub mod cat;
pub mod cp;
pub mod exists;
pub mod get;
pub mod help;
pub mod ls;
pub mod mkdir;
pub mod mv;
pub mod put;
pub mod rm;
pub mod rmdir;
pub mod stat;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, TimeZone};
use graphfs::{AppConfig, Filesystem, GraphTransport, GraphTransportConfig, OneDriveAdapter, StorageAttributes};
use unicode_width::UnicodeWidthStr;

use crate::theme;

pub fn cli_config() -> Result<AppConfig> {
    AppConfig::load()
}

pub fn cli_adapter() -> Result<OneDriveAdapter> {
    adapter_from(&cli_config()?)
}

/// Adapter for an already loaded config.
pub fn adapter_from(cfg: &AppConfig) -> Result<OneDriveAdapter> {
    let transport = GraphTransport::from_config(GraphTransportConfig {
        api_base_url: cfg.api_base_url().to_string(),
        access_token: cfg.access_token()?.to_string(),
        request_timeout: cfg.request_timeout(),
    })
    .context("failed to set up the Graph client")?;
    let api = transport.api_base_url().to_string();

    let fs = OneDriveAdapter::with_config(Arc::new(transport), cfg.adapter.clone());
    tracing::debug!(backend = fs.name(), api = %api, "adapter ready");
    Ok(fs)
}

/// Positional argument `index`, or a usage error.
pub fn required<'a>(args: &'a [String], index: usize, usage: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Usage: graphfs {usage}"))
}

/// Text shown for an entry: its path relative to the listed directory.
pub fn entry_label(entry: &StorageAttributes, listed: &str) -> String {
    let listed = graphfs::path::clean(listed);
    let path = entry.path();
    if listed.is_empty() {
        return path.to_string();
    }
    path.strip_prefix(&listed)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
        .to_string()
}

/// eza-style grid output (column-major) for a list of entries.
pub fn print_entries_short(entries: &[StorageAttributes], listed: &str, nerd_font: bool) {
    let term_width = crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80);

    let labels: Vec<String> = entries
        .iter()
        .map(|e| {
            let cat = theme::categorize(e);
            format!("{}{}", theme::icon(cat, nerd_font), entry_label(e, listed))
        })
        .collect();
    let display_widths: Vec<usize> = labels
        .iter()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .collect();

    let max_width = display_widths.iter().copied().max().unwrap_or(1);
    let col_width = max_width + 2;
    let num_cols = (term_width / col_width).max(1);
    let num_rows = entries.len().div_ceil(num_cols);

    for row in 0..num_rows {
        for col in 0..num_cols {
            let idx = col * num_rows + row;
            if idx >= entries.len() {
                break;
            }
            let colored = theme::colored(&labels[idx], theme::categorize(&entries[idx]));
            let is_last_col = col + 1 == num_cols || (col + 1) * num_rows + row >= entries.len();
            if is_last_col {
                print!("{}", colored);
            } else {
                let padding = col_width.saturating_sub(display_widths[idx]);
                print!("{}{}", colored, " ".repeat(padding));
            }
        }
        println!();
    }
}

/// eza-style long format output: size, date, icon+name.
pub fn print_entries_long(entries: &[StorageAttributes], listed: &str, nerd_font: bool) {
    for e in entries {
        let size_str = match e {
            StorageAttributes::File(f) => {
                let size = f.file_size.map(format_size).unwrap_or_else(|| "?".into());
                format!("{:>9}", size)
            }
            StorageAttributes::Directory(_) => format!("{:>9}", "-"),
        };
        let date = format_date(e.last_modified());
        let cat = theme::categorize(e);
        let name = format!("{}{}", theme::icon(cat, nerd_font), entry_label(e, listed));

        println!(
            "\x1b[1;32m{}\x1b[0m  \x1b[34m{:16}\x1b[0m  {}",
            size_str,
            date,
            theme::colored(&name, cat)
        );
    }
}

/// Local time as `YYYY-MM-DD HH:MM`, or `-` when unknown.
pub fn format_date(epoch_secs: Option<i64>) -> String {
    epoch_secs
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphfs::{DirectoryAttributes, FileAttributes};

    #[test]
    fn sizes() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(60 * 1024 * 1024), "60.0 MB");
    }

    #[test]
    fn unknown_date() {
        assert_eq!(format_date(None), "-");
        assert_eq!(format_date(Some(0)).len(), 16);
    }

    #[test]
    fn labels_are_relative_to_listing() {
        let file = StorageAttributes::File(FileAttributes::new("docs/sub/a.txt"));
        let dir = StorageAttributes::Directory(DirectoryAttributes {
            path: "docs/sub".into(),
            last_modified: None,
        });
        assert_eq!(entry_label(&file, "/docs/"), "sub/a.txt");
        assert_eq!(entry_label(&dir, "docs"), "sub");
        assert_eq!(entry_label(&file, ""), "docs/sub/a.txt");
        assert_eq!(entry_label(&file, "other"), "docs/sub/a.txt");
    }

    #[test]
    fn adapter_from_reuses_the_loaded_config() {
        let cfg = AppConfig::from_toml(r#"access_token = "tok""#).unwrap();
        let fs = adapter_from(&cfg).unwrap();
        assert_eq!(fs.name(), "onedrive");

        let missing = AppConfig::from_toml("").unwrap();
        assert!(adapter_from(&missing).is_err());
    }

    #[test]
    fn required_args() {
        let args = vec!["a".to_string()];
        assert_eq!(required(&args, 0, "rm <path>").unwrap(), "a");
        let err = required(&args, 1, "cp <src> <dst>").unwrap_err();
        assert_eq!(err.to_string(), "Usage: graphfs cp <src> <dst>");
    }
}
