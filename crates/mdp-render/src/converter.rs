//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

/// Converts Markdown source into an HTML fragment.
///
/// The output is untrusted: inline HTML in the source is passed through
/// verbatim, so it must go through [`Sanitizer`](crate::Sanitizer) before it
/// is embedded in a page.
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    gfm: bool,
}

impl MarkdownConverter {
    /// Create a new converter with GFM enabled by default.
    #[must_use]
    pub fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }

    /// Convert raw Markdown bytes to an HTML fragment.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing.
    pub fn convert(&self, source: &[u8]) -> String {
        let markdown = String::from_utf8_lossy(source);
        let parser = Parser::new_ext(&markdown, self.parser_options());

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_convert_paragraph_with_emphasis() {
        let html = MarkdownConverter::new().convert(b"Some *text*.");
        assert_eq!(html, "<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn test_convert_keeps_heading() {
        let html = MarkdownConverter::new().convert(b"# Title\n\nBody");
        assert_eq!(html, "<h1>Title</h1>\n<p>Body</p>\n");
    }

    #[test]
    fn test_convert_passes_raw_html_through() {
        let html = MarkdownConverter::new().convert(b"<script>alert(1)</script>\n");
        assert!(html.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_convert_gfm_table() {
        let html = MarkdownConverter::new().convert(b"| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_convert_gfm_disabled() {
        let converter = MarkdownConverter::new().with_gfm(false);
        let html = converter.convert(b"~~gone~~");
        assert!(!html.contains("<del>"));
        assert!(html.contains("~~gone~~"));
    }

    #[test]
    fn test_convert_strikethrough() {
        let html = MarkdownConverter::new().convert(b"~~gone~~");
        assert_eq!(html, "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_convert_invalid_utf8_is_lossy() {
        let html = MarkdownConverter::new().convert(b"caf\xff");
        assert_eq!(html, "<p>caf\u{FFFD}</p>\n");
    }

    #[test]
    fn test_convert_empty_input() {
        assert_eq!(MarkdownConverter::new().convert(b""), "");
    }
}
