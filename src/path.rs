//! Translation between logical paths and Graph drive addresses.
//!
//! A logical path like `docs/report.pdf` is addressed on the drive as
//! `/me/drive/root:/docs/report.pdf` when path addressing is on. The same
//! prefix is stripped off again when listing responses are turned back into
//! logical paths.

/// Maps logical paths onto remote item addresses under a fixed prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPrefixer {
    /// Always starts and ends with `/`.
    prefix: String,
    use_path: bool,
}

impl PathPrefixer {
    /// Build a prefixer from the configured base path and subdirectory.
    /// In path mode a `:` separator is appended, so the drive treats what
    /// follows as a path relative to the base item.
    pub fn new(base_path: &str, subdirectory: &str, use_path: bool) -> Self {
        let raw = format!(
            "{}{}{}",
            base_path,
            subdirectory,
            if use_path { ":" } else { "" }
        );
        let trimmed = raw.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
        Self { prefix, use_path }
    }

    /// Remote address of a logical path: one leading slash, no trailing slash.
    pub fn to_remote(&self, logical: &str) -> String {
        let joined = format!("{}{}", self.prefix, clean(logical));
        format!("/{}", joined.trim_matches('/'))
    }

    /// Inverse of [`to_remote`](Self::to_remote). Addresses outside the
    /// prefix come back unchanged apart from surrounding slashes.
    pub fn from_remote(&self, remote: &str) -> String {
        let bare = self.prefix.trim_end_matches('/');
        let rest = match remote.strip_prefix(&self.prefix) {
            Some(rest) => rest,
            None if remote == bare => "",
            None => remote,
        };
        rest.trim_matches('/').to_string()
    }

    /// Address of an item used as the base of an action segment such as
    /// `/content` or `/copy`.
    pub fn item(&self, logical: &str) -> String {
        let remote = self.to_remote(logical);
        if self.use_path {
            format!("{}:", remote)
        } else {
            remote
        }
    }

    /// Children collection of a logical directory.
    pub fn children(&self, logical: &str) -> String {
        if self.use_path && clean(logical).is_empty() {
            // the drive root is addressed without the path separator
            return format!("{}//children", self.to_remote("")).replace(":/", "");
        }
        format!("{}/children", self.item(logical))
    }

    /// `parentReference.path` for an item placed under `parent`.
    ///
    /// Drives disagree on whether the reference includes the `/me` style
    /// leading segment, so an alternate encoding without it is available.
    pub fn parent_reference(&self, parent: &str, alternate: bool) -> String {
        let root = self.to_remote("");
        let root = if alternate {
            strip_leading_segment(&root)
        } else {
            root.as_str()
        };
        let parent = clean(parent);
        if parent.is_empty() {
            root.to_string()
        } else {
            format!("{}/{}", root, parent)
        }
    }
}

fn strip_leading_segment(path: &str) -> &str {
    match path.get(1..).and_then(|rest| rest.find('/')) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Normalize a logical path: drop empty and `.` segments and resolve `..`
/// lexically without ever climbing above the root.
pub fn clean(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Split a logical path into its parent directory and final name.
/// Top-level entries have an empty parent.
pub fn split_parent_name(path: &str) -> (String, String) {
    let cleaned = clean(path);
    match cleaned.rsplit_once('/') {
        Some((parent, name)) => (parent.to_string(), name.to_string()),
        None => (String::new(), cleaned),
    }
}

/// Join a logical directory and an entry name.
pub fn join(parent: &str, name: &str) -> String {
    let parent = clean(parent);
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_prefixer() -> PathPrefixer {
        PathPrefixer::new("/me/drive/root", "", true)
    }

    #[test]
    fn path_mode_inserts_separator() {
        let p = default_prefixer();
        assert_eq!(p.to_remote("docs/a.txt"), "/me/drive/root:/docs/a.txt");
        assert_eq!(p.to_remote("/docs/a.txt/"), "/me/drive/root:/docs/a.txt");
        assert_eq!(p.to_remote(""), "/me/drive/root:");
    }

    #[test]
    fn id_mode_has_no_separator() {
        let p = PathPrefixer::new("/drives/b!x/items/", "01ABC", false);
        assert_eq!(p.to_remote("a.txt"), "/drives/b!x/items/01ABC/a.txt");
        assert_eq!(p.item("a.txt"), "/drives/b!x/items/01ABC/a.txt");
        assert_eq!(p.children(""), "/drives/b!x/items/01ABC/children");
    }

    #[test]
    fn cleaning_collapses_and_resolves() {
        assert_eq!(clean("//a///b/./c/"), "a/b/c");
        assert_eq!(clean("a/b/../c"), "a/c");
        assert_eq!(clean("../../etc"), "etc");
        assert_eq!(clean("/"), "");
    }

    #[test]
    fn round_trip_is_stable() {
        let prefixers = [
            default_prefixer(),
            PathPrefixer::new("/me/drive/root", "", false),
            PathPrefixer::new("", "", true),
            PathPrefixer::new("/drives/abc/root", "/team", true),
        ];
        let paths = ["", "/", "a.txt", "/docs/a.txt", "docs//b/", "x/../y", "./z"];
        for p in &prefixers {
            for path in paths {
                let remote = p.to_remote(path);
                assert_eq!(p.to_remote(&p.from_remote(&remote)), remote, "{p:?} {path}");
                assert!(remote.starts_with('/'));
                assert!(remote.len() == 1 || !remote.ends_with('/'));
            }
        }
    }

    #[test]
    fn from_remote_strips_prefix() {
        let p = default_prefixer();
        assert_eq!(p.from_remote("/me/drive/root:/docs/a.txt"), "docs/a.txt");
        assert_eq!(p.from_remote("/me/drive/root:"), "");
        assert_eq!(p.from_remote("/other/place/"), "other/place");
    }

    #[test]
    fn children_endpoints() {
        let p = default_prefixer();
        assert_eq!(p.children(""), "/me/drive/root/children");
        assert_eq!(p.children("/"), "/me/drive/root/children");
        assert_eq!(p.children("docs"), "/me/drive/root:/docs:/children");
    }

    #[test]
    fn parent_reference_encodings() {
        let p = default_prefixer();
        assert_eq!(p.parent_reference("", false), "/me/drive/root:");
        assert_eq!(p.parent_reference("a/b/", false), "/me/drive/root:/a/b");
        assert_eq!(p.parent_reference("", true), "/drive/root:");
        assert_eq!(p.parent_reference("a", true), "/drive/root:/a");
    }

    #[test]
    fn split_and_join() {
        assert_eq!(
            split_parent_name("/a/b.txt"),
            ("a".to_string(), "b.txt".to_string())
        );
        assert_eq!(
            split_parent_name("c.txt"),
            (String::new(), "c.txt".to_string())
        );
        assert_eq!(join("", "x"), "x");
        assert_eq!(join("/docs/", "x"), "docs/x");
    }
}
