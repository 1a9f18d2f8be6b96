//! Extension-based file classification.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Coarse file category derived from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Portable Document Format.
    Pdf,
    /// Raster images (jpg, jpeg, png, gif).
    Image,
    /// Plain text and Markdown.
    Text,
    /// Word-processor documents.
    Document,
    /// Anything without a dedicated strategy.
    Other,
}

/// Extension table, lower-case and without the leading dot.
const EXTENSION_TABLE: &[(Category, &[&str])] = &[
    (Category::Pdf, &["pdf"]),
    (Category::Image, &["jpg", "jpeg", "png", "gif"]),
    (Category::Text, &["txt", "md"]),
    (Category::Document, &["doc", "docx"]),
];

impl Category {
    /// Every category, in table order with the fallback last.
    pub const ALL: [Self; 5] = [
        Self::Pdf,
        Self::Image,
        Self::Text,
        Self::Document,
        Self::Other,
    ];

    /// Classify a file by its name.
    ///
    /// Unmatched or missing extensions always fall through to [`Category::Other`].
    pub fn from_file_name(name: &str) -> Self {
        Self::from_extension(&extension_of(name))
    }

    /// Classify a dotted extension such as `.PDF` or `.md`.
    pub fn from_extension(extension: &str) -> Self {
        let bare = extension.trim_start_matches('.').to_ascii_lowercase();
        EXTENSION_TABLE
            .iter()
            .find(|(_, extensions)| extensions.contains(&bare.as_str()))
            .map_or(Self::Other, |(category, _)| *category)
    }

    /// Lower-case tag used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Text => "text",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased extension of `name` including the leading dot, or an empty
/// string when the name has none (dotfiles like `.bashrc` have none).
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension() {
        assert_eq!(Category::from_file_name("paper.pdf"), Category::Pdf);
        assert_eq!(Category::from_file_name("PAPER.PDF"), Category::Pdf);
    }

    #[test]
    fn test_image_extensions() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.gif", "a.JPG"] {
            assert_eq!(Category::from_file_name(name), Category::Image, "{name}");
        }
    }

    #[test]
    fn test_text_extensions() {
        assert_eq!(Category::from_file_name("notes.txt"), Category::Text);
        assert_eq!(Category::from_file_name("README.md"), Category::Text);
    }

    #[test]
    fn test_document_extensions() {
        assert_eq!(Category::from_file_name("essay.doc"), Category::Document);
        assert_eq!(Category::from_file_name("essay.Docx"), Category::Document);
    }

    #[test]
    fn test_unmatched_falls_through_to_other() {
        for name in ["archive.zip", "main.rs", "Makefile", ".bashrc", "data.tar.gz", ""] {
            assert_eq!(Category::from_file_name(name), Category::Other, "{name}");
        }
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(Category::from_file_name("scan.pdf.png"), Category::Image);
        assert_eq!(Category::from_file_name("notes.txt.zip"), Category::Other);
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Report.DOCX"), ".docx");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
    }

    #[test]
    fn test_from_extension_accepts_bare_and_dotted() {
        assert_eq!(Category::from_extension("md"), Category::Text);
        assert_eq!(Category::from_extension(".MD"), Category::Text);
        assert_eq!(Category::from_extension(""), Category::Other);
    }
}
