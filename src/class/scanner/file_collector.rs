use std::path::{Path, PathBuf};
use anyhow::Result;
use log::{debug, trace};
use walkdir::WalkDir;

/// Markup and template extensions collected by default
const MARKUP_EXTENSIONS: &[&str] = &[
    "html", "htm", "xhtml", "vue", "svelte", "jsx", "tsx", "php", "twig", "erb", "hbs",
];

/// File collector for finding markup files
#[derive(Debug, Default)]
pub struct FileCollector {
    /// Valid file extensions to collect
    valid_extensions: Vec<String>,
}

impl FileCollector {
    /// Create a new file collector for the common markup extensions
    pub fn new() -> Self {
        Self {
            valid_extensions: MARKUP_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    /// Create a new file collector with custom file extensions
    pub fn with_extensions(extensions: Vec<String>) -> Self {
        Self {
            valid_extensions: extensions,
        }
    }

    /// Collect `input` itself if it is a file, otherwise every markup file below it.
    /// Results are sorted so repeated runs see the same class order.
    pub fn collect_files(&self, input: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let input = input.as_ref();
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }

        debug!("Collecting markup files from directory: {}", input.display());
        let mut files = Vec::new();

        for entry in WalkDir::new(input)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if self.accepts(entry.path()) {
                trace!("Found file: {}", entry.path().display());
                files.push(entry.path().to_owned());
            }
        }

        debug!("Collected {} files for processing", files.len());
        Ok(files)
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.valid_extensions
                    .iter()
                    .any(|valid_ext| ext.eq_ignore_ascii_case(valid_ext))
            })
            .unwrap_or(false)
    }

    /// Add a valid file extension
    pub fn add_extension(&mut self, extension: &str) {
        if !self.valid_extensions.iter().any(|ext| ext == extension) {
            self.valid_extensions.push(extension.to_string());
        }
    }

    /// Get the list of valid file extensions
    pub fn extensions(&self) -> &[String] {
        &self.valid_extensions
    }
}
