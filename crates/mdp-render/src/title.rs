//! Page title resolution.
//!
//! A title is derived by asking a list of [`TitleStrategy`] implementations in
//! order; the first non-empty candidate wins. When every strategy comes up
//! empty, the resolver's fallback title is used.
//!
//! The default order is:
//! 1. [`HeadingTitle`]: first `# ` heading in the document
//! 2. [`FileNameTitle`]: file name without directory and extension

use std::borrow::Cow;
use std::path::Path;

/// Title used when neither a heading nor a file name is available.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Level-1 ATX heading prefix.
const HEADING_PREFIX: &str = "# ";

/// Produces a title candidate for a document.
pub trait TitleStrategy: Send + Sync {
    /// Return a candidate title, or `None` if this strategy does not apply.
    fn candidate(&self, source: &str, file_name: Option<&str>) -> Option<String>;
}

/// Takes the text of the first level-1 heading.
///
/// Lines are trimmed before matching, and only an exact `"# "` prefix counts:
/// `## Section` and `#hashtag` are not headings. Scanning stops at the first
/// match.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadingTitle;

impl TitleStrategy for HeadingTitle {
    fn candidate(&self, source: &str, _file_name: Option<&str>) -> Option<String> {
        source
            .lines()
            .map(str::trim)
            .find_map(|line| line.strip_prefix(HEADING_PREFIX))
            .map(|title| title.trim().to_owned())
    }
}

/// Takes the file name hint, stripped of its directory and final extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileNameTitle;

impl TitleStrategy for FileNameTitle {
    fn candidate(&self, _source: &str, file_name: Option<&str>) -> Option<String> {
        let stem = Path::new(file_name?).file_stem()?;
        Some(stem.to_string_lossy().into_owned())
    }
}

/// Resolves a page title through an ordered list of strategies.
pub struct TitleResolver {
    strategies: Vec<Box<dyn TitleStrategy>>,
    fallback: String,
}

impl TitleResolver {
    /// Create a resolver with the default strategy order and fallback.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: vec![Box::new(HeadingTitle), Box::new(FileNameTitle)],
            fallback: DEFAULT_TITLE.to_owned(),
        }
    }

    /// Create a resolver with no strategies, returning only the fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
            fallback: DEFAULT_TITLE.to_owned(),
        }
    }

    /// Append a strategy after the existing ones.
    #[must_use]
    pub fn with_strategy<S: TitleStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Set the title used when no strategy produces one.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Title used when no strategy produces one.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolve the title for raw document bytes and an optional file name.
    pub fn resolve(&self, source: &[u8], file_name: Option<&str>) -> String {
        let source: Cow<'_, str> = String::from_utf8_lossy(source);
        self.strategies
            .iter()
            .filter_map(|strategy| strategy.candidate(&source, file_name))
            .find(|title| !title.is_empty())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for TitleResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_heading_first_line() {
        let title = HeadingTitle.candidate("# Hello World\n\nText", None);
        assert_eq!(title.as_deref(), Some("Hello World"));
    }

    #[test]
    fn test_heading_trimmed() {
        let title = HeadingTitle.candidate("   #   Spaced Out   \r\n", None);
        assert_eq!(title.as_deref(), Some("Spaced Out"));
    }

    #[test]
    fn test_heading_first_match_wins() {
        let title = HeadingTitle.candidate("intro\n# First\n# Second\n", None);
        assert_eq!(title.as_deref(), Some("First"));
    }

    #[test]
    fn test_heading_ignores_level_two() {
        let title = HeadingTitle.candidate("## Section\n### Sub\n", None);
        assert_eq!(title, None);
    }

    #[test]
    fn test_heading_requires_space() {
        assert_eq!(HeadingTitle.candidate("#hashtag\n#\n", None), None);
    }

    #[test]
    fn test_heading_after_level_two() {
        let title = HeadingTitle.candidate("## Section\n# Real Title\n", None);
        assert_eq!(title.as_deref(), Some("Real Title"));
    }

    #[test]
    fn test_file_name_strips_extension() {
        assert_eq!(
            FileNameTitle.candidate("", Some("notes.md")).as_deref(),
            Some("notes")
        );
    }

    #[test]
    fn test_file_name_strips_directory() {
        assert_eq!(
            FileNameTitle
                .candidate("", Some("docs/guide/setup.markdown"))
                .as_deref(),
            Some("setup")
        );
    }

    #[test]
    fn test_file_name_strips_final_extension_only() {
        assert_eq!(
            FileNameTitle.candidate("", Some("archive.tar.md")).as_deref(),
            Some("archive.tar")
        );
    }

    #[test]
    fn test_file_name_without_extension() {
        assert_eq!(
            FileNameTitle.candidate("", Some("README")).as_deref(),
            Some("README")
        );
    }

    #[test]
    fn test_file_name_absent() {
        assert_eq!(FileNameTitle.candidate("", None), None);
    }

    #[test]
    fn test_resolve_heading_beats_file_name() {
        let resolver = TitleResolver::new();
        assert_eq!(
            resolver.resolve(b"# Hello World\n", Some("notes.md")),
            "Hello World"
        );
    }

    #[test]
    fn test_resolve_file_name_without_heading() {
        let resolver = TitleResolver::new();
        assert_eq!(resolver.resolve(b"Just text\n", Some("notes.md")), "notes");
    }

    #[test]
    fn test_resolve_fallback() {
        let resolver = TitleResolver::new();
        assert_eq!(resolver.resolve(b"Just text\n", None), DEFAULT_TITLE);
    }

    #[test]
    fn test_resolve_custom_fallback() {
        let resolver = TitleResolver::new().with_fallback("Preview");
        assert_eq!(resolver.resolve(b"", None), "Preview");
        assert_eq!(resolver.fallback(), "Preview");
    }

    #[test]
    fn test_resolve_skips_empty_candidates() {
        struct Blank;

        impl TitleStrategy for Blank {
            fn candidate(&self, _source: &str, _file_name: Option<&str>) -> Option<String> {
                Some(String::new())
            }
        }

        let resolver = TitleResolver::empty()
            .with_strategy(Blank)
            .with_strategy(FileNameTitle);
        assert_eq!(resolver.resolve(b"", Some("doc.md")), "doc");
    }

    #[test]
    fn test_resolve_empty_resolver_uses_fallback() {
        let resolver = TitleResolver::empty();
        assert_eq!(resolver.resolve(b"# Ignored\n", Some("doc.md")), DEFAULT_TITLE);
    }
}
