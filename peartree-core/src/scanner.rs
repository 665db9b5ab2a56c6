use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::RawPage;
use crate::validate::{ValidationError, Violation};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("could not walk content directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

/// A raw page and the file it came from.
#[derive(Debug, Clone)]
pub struct SourcedPage {
    pub source: String,
    pub raw: RawPage,
}

impl SourcedPage {
    pub fn inline(source: impl Into<String>, raw: RawPage) -> Self {
        Self {
            source: source.into(),
            raw,
        }
    }
}

/// Result of a scan: the pages that parsed, and one error per file that did
/// not. Unparseable files are reported alongside invalid pages rather than
/// stopping the scan.
#[derive(Debug, Default)]
pub struct ScannedContent {
    pub pages: Vec<SourcedPage>,
    pub unreadable: Vec<ValidationError>,
}

pub struct ContentScanner {
    source_dir: PathBuf,
}

impl ContentScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
        }
    }

    /// Every `*.toml` and `*.json` page below the content directory, sorted
    /// by path. Files and directories starting with `_` or `.` are skipped.
    ///
    /// Only I/O failures abort the scan. A file that does not parse lands in
    /// [`ScannedContent::unreadable`].
    pub fn scan(&self) -> Result<ScannedContent, ScanError> {
        info!("Scanning: {}", self.source_dir.display());

        let mut content = ScannedContent::default();
        let walker = WalkDir::new(&self.source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            match get_extension(path).as_str() {
                "toml" | "json" => match self.scan_page(path) {
                    Ok(page) => {
                        debug!(source = %page.source, slug = %page.raw.slug, "found page");
                        content.pages.push(page);
                    }
                    Err(err @ (ScanError::Toml { .. } | ScanError::Json { .. })) => {
                        warn!("Could not parse {}: {err}", path.display());
                        content.unreadable.push(self.unreadable(path, &err));
                    }
                    Err(err) => return Err(err),
                },
                _ => warn!("Skipping non-content file: {}", path.display()),
            }
        }

        Ok(content)
    }

    fn unreadable(&self, path: &Path, err: &ScanError) -> ValidationError {
        let relative = path.strip_prefix(&self.source_dir).unwrap_or(path);
        let message = match err {
            ScanError::Toml { source, .. } => source.to_string(),
            ScanError::Json { source, .. } => source.to_string(),
            other => other.to_string(),
        };
        ValidationError::new(
            relative.display().to_string(),
            vec![Violation {
                field: "file".into(),
                message: message.trim_end().to_string(),
            }],
        )
    }

    fn scan_page(&self, path: &Path) -> Result<SourcedPage, ScanError> {
        let mut raw = parse_page_file(path)?;
        let relative_path = path
            .strip_prefix(&self.source_dir)
            .map_err(|_| ScanError::InvalidPath(path.to_path_buf()))?;

        if raw.slug.trim().is_empty() {
            raw.slug = slug_from_path(relative_path);
        }

        Ok(SourcedPage {
            source: relative_path.display().to_string(),
            raw,
        })
    }
}

pub fn parse_page_file(path: &Path) -> Result<RawPage, ScanError> {
    let data = std::fs::read_to_string(path)?;
    if get_extension(path) == "json" {
        serde_json::from_str(&data).map_err(|source| ScanError::Json {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&data).map_err(|source| ScanError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// `reviews/arnold.toml` -> `reviews/arnold`, `reviews/index.toml` -> `reviews`.
fn slug_from_path(relative_path: &Path) -> String {
    let without_ext = relative_path.with_extension("");
    let path = if without_ext.file_name().is_some_and(|name| name == "index") {
        without_ext.with_file_name("")
    } else {
        without_ext
    };

    path.components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .map(|s| s.starts_with('.') || s.starts_with('_'))
        .unwrap_or(false)
}

fn get_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => ext.to_string_lossy().to_lowercase(),
        None => "Unknown".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn slugs_come_from_paths_when_not_authored() {
        assert_eq!(slug_from_path(Path::new("reviews/arnold.toml")), "reviews/arnold");
        assert_eq!(slug_from_path(Path::new("reviews/index.toml")), "reviews");
        assert_eq!(slug_from_path(Path::new("composite-bonding.json")), "composite-bonding");
    }

    #[test]
    fn scans_toml_and_json_and_skips_drafts() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "reviews/arnold.toml", "title = \"Arnold\"\n");
        write(
            dir.path(),
            "services/veneers.json",
            r#"{"slug": "veneers", "title": "Veneers"}"#,
        );
        write(dir.path(), "_drafts/mapperley.toml", "title = \"Draft\"\n");
        write(dir.path(), "notes.md", "# not content");

        let content = ContentScanner::new(dir.path()).scan().unwrap();
        let slugs: Vec<&str> = content.pages.iter().map(|p| p.raw.slug.as_str()).collect();
        assert_eq!(slugs, ["reviews/arnold", "veneers"]);
        assert_eq!(content.pages[0].source, "reviews/arnold.toml");
        assert!(content.unreadable.is_empty());
    }

    #[test]
    fn parse_errors_name_the_file_and_do_not_stop_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.toml", "title = 5\n");
        write(dir.path(), "b.toml", "title = \"\"\n");
        write(dir.path(), "c.json", "{\"title\": ");

        let content = ContentScanner::new(dir.path()).scan().unwrap();
        assert_eq!(content.pages.len(), 1);
        assert_eq!(content.pages[0].source, "b.toml");

        let failed: Vec<&str> = content.unreadable.iter().map(|e| e.page()).collect();
        assert_eq!(failed, ["a.toml", "c.json"]);
        assert_eq!(content.unreadable[0].violations()[0].field, "file");
        assert!(content.unreadable[0].violations()[0].message.contains("expected a string"));
    }
}
