use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::class::types::Destination;
use crate::utils::file_utils;

/// Message shown after a successful clipboard copy
pub const CLIPBOARD_CONFIRMATION: &str = "Copied CSS format to clipboard";

/// Receives the rendered stylesheet
pub trait OutputSink {
    fn deliver(&self, text: &str) -> Result<()>;
}

/// Copies the stylesheet to the system clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct ClipboardSink;

impl OutputSink for ClipboardSink {
    #[cfg(feature = "clipboard")]
    fn deliver(&self, text: &str) -> Result<()> {
        cli_clipboard::set_contents(text.to_string())
            .map_err(|e| anyhow::anyhow!("Failed to copy to clipboard: {}", e))?;
        info!("{}", CLIPBOARD_CONFIRMATION);
        Ok(())
    }

    #[cfg(not(feature = "clipboard"))]
    fn deliver(&self, _text: &str) -> Result<()> {
        anyhow::bail!("Clipboard support is not compiled in (enable the `clipboard` feature)")
    }
}

/// Writes the stylesheet to a new document: a file, or stdout without a path
#[derive(Debug, Default, Clone)]
pub struct DocumentSink {
    path: Option<PathBuf>,
}

impl DocumentSink {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl OutputSink for DocumentSink {
    fn deliver(&self, text: &str) -> Result<()> {
        match &self.path {
            Some(path) => {
                file_utils::write_string_to_file(path, text)?;
                info!("Wrote stylesheet to {}", path.display());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", text).context("Failed to write to stdout")?;
                debug!("Wrote {} bytes to stdout", text.len());
            }
        }
        Ok(())
    }
}

/// Pick the sink for a destination
pub fn sink_for(destination: Destination, path: Option<PathBuf>) -> Box<dyn OutputSink> {
    match destination {
        Destination::Clipboard => Box::new(ClipboardSink),
        Destination::NewDocument => Box::new(DocumentSink::new(path)),
    }
}

/// Hand `text` to `sink`; empty text is a no-op
pub fn deliver(sink: &dyn OutputSink, text: &str) -> Result<bool> {
    if text.is_empty() {
        debug!("Nothing to deliver");
        return Ok(false);
    }
    sink.deliver(text)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recording(RefCell<Vec<String>>);

    impl OutputSink for Recording {
        fn deliver(&self, text: &str) -> Result<()> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_empty_text_skips_sink() -> Result<()> {
        let sink = Recording::default();

        assert!(!deliver(&sink, "")?);
        assert!(deliver(&sink, ".a {}")?);
        assert_eq!(sink.0.borrow().as_slice(), &[".a {}".to_string()]);
        Ok(())
    }

    #[test]
    fn test_document_sink_writes_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("out.css");

        let sink = sink_for(Destination::NewDocument, Some(path.clone()));
        sink.deliver(".a {}")?;

        assert_eq!(file_utils::read_file_to_string(&path)?, ".a {}");
        Ok(())
    }

    #[cfg(not(feature = "clipboard"))]
    #[test]
    fn test_clipboard_without_feature_fails() {
        let err = ClipboardSink.deliver(".a {}").unwrap_err();
        assert!(err.to_string().contains("clipboard"));
    }
}
