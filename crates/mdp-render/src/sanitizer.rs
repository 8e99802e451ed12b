//! HTML sanitization.
//!
//! [`Sanitizer`] is the trust boundary of the pipeline: whatever the Markdown
//! converter produced, only markup that passes the sanitizer policy ends up in
//! a page body.

use std::borrow::Cow;

/// Link relation added to every `<a>` element.
const LINK_REL: &str = "nofollow noopener noreferrer";

/// Class prefix emitted by the converter for fenced code block languages.
const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// The only `<input>` type kept, used by task list items.
const CHECKBOX_TYPE: &str = "checkbox";

/// HTML fragment that has passed sanitization.
///
/// Can only be constructed by [`Sanitizer::sanitize`], and is inserted into
/// page templates without escaping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    /// Borrow the sanitized markup.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether sanitization left no markup at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Sanitizes untrusted HTML for user-generated content.
///
/// Starts from ammonia's default whitelist of formatting tags and attributes,
/// which already strips `<script>`/`<style>` (including their content), inline
/// event handlers, and non-whitelisted URL schemes such as `javascript:`.
/// On top of that:
///
/// - `class` is kept on `<code>` only when it names a language
///   (`language-rust`), so fenced code blocks keep their highlighting hook
/// - every link gets `rel="nofollow noopener noreferrer"`
/// - `<input>` survives only as a task list checkbox (`type`, `checked`,
///   `disabled`), so `- [x]` items keep their state
pub struct Sanitizer {
    policy: ammonia::Builder<'static>,
}

impl Sanitizer {
    /// Create a sanitizer with the user-generated content policy.
    #[must_use]
    pub fn new() -> Self {
        let mut policy = ammonia::Builder::default();
        policy
            .add_tags(&["input"])
            .add_tag_attributes("code", &["class"])
            .add_tag_attributes("input", &["type", "checked", "disabled"])
            .attribute_filter(|element, attribute, value| match (element, attribute) {
                ("code", "class") => language_class(value).map(Cow::Borrowed),
                ("input", "type") => (value == CHECKBOX_TYPE).then_some(Cow::Borrowed(value)),
                _ => Some(Cow::Borrowed(value)),
            })
            .link_rel(Some(LINK_REL));
        Self { policy }
    }

    /// Sanitize an untrusted HTML fragment.
    ///
    /// Never fails; markup that cannot be made safe is dropped, so the result
    /// may be empty.
    pub fn sanitize(&self, html: &str) -> TrustedHtml {
        TrustedHtml(self.policy.clean(html).to_string())
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep only `language-*` class values.
fn language_class(value: &str) -> Option<&str> {
    let mut classes = value.split_whitespace();
    let class = classes.next()?;
    if classes.next().is_none()
        && class.len() > LANGUAGE_CLASS_PREFIX.len()
        && class.starts_with(LANGUAGE_CLASS_PREFIX)
    {
        Some(class)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_sanitize_keeps_formatting() {
        let html = "<h1>Title</h1>\n<p>Some <em>text</em> and <strong>bold</strong>.</p>\n";
        assert_eq!(Sanitizer::new().sanitize(html).as_str(), html);
    }

    #[test]
    fn test_sanitize_strips_script() {
        let clean = Sanitizer::new().sanitize("<p>Hi</p><script>alert(1)</script>");
        assert!(!clean.as_str().contains("<script"));
        assert!(!clean.as_str().contains("alert(1)"));
        assert!(clean.as_str().contains("<p>Hi</p>"));
    }

    #[test]
    fn test_sanitize_strips_style() {
        let clean = Sanitizer::new().sanitize("<style>body { display: none }</style><p>x</p>");
        assert!(!clean.as_str().contains("<style"));
        assert!(!clean.as_str().contains("display"));
    }

    #[test]
    fn test_sanitize_strips_event_handlers() {
        let clean = Sanitizer::new().sanitize(r#"<img src="a.png" onerror="alert(1)">"#);
        assert!(!clean.as_str().contains("onerror"));
        assert!(clean.as_str().contains(r#"src="a.png""#));
    }

    #[test]
    fn test_sanitize_strips_javascript_links() {
        let clean = Sanitizer::new().sanitize(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!clean.as_str().contains("javascript:"));
        assert!(clean.as_str().contains(">x</a>"));
    }

    #[test]
    fn test_sanitize_strips_iframe() {
        let clean = Sanitizer::new().sanitize(r#"<iframe src="https://evil.example"></iframe>"#);
        assert!(!clean.as_str().contains("iframe"));
    }

    #[test]
    fn test_sanitize_adds_link_rel() {
        let clean = Sanitizer::new().sanitize(r#"<a href="https://example.com">x</a>"#);
        assert!(clean.as_str().contains(r#"href="https://example.com""#));
        assert!(
            clean
                .as_str()
                .contains(r#"rel="nofollow noopener noreferrer""#)
        );
    }

    #[test]
    fn test_sanitize_keeps_language_class_on_code() {
        let html = "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n";
        assert_eq!(Sanitizer::new().sanitize(html).as_str(), html);
    }

    #[test]
    fn test_sanitize_drops_other_classes_on_code() {
        let clean = Sanitizer::new().sanitize(r#"<code class="evil">x</code>"#);
        assert_eq!(clean.as_str(), "<code>x</code>");
    }

    #[test]
    fn test_sanitize_drops_class_on_other_elements() {
        let clean = Sanitizer::new().sanitize(r#"<p class="language-rust">x</p>"#);
        assert_eq!(clean.as_str(), "<p>x</p>");
    }

    #[test]
    fn test_sanitize_keeps_task_checkbox() {
        let clean = Sanitizer::new()
            .sanitize(r#"<li><input disabled="" type="checkbox" checked=""/>done</li>"#);
        assert!(clean.as_str().contains("<input"));
        assert!(clean.as_str().contains(r#"type="checkbox""#));
        assert!(clean.as_str().contains("checked"));
        assert!(clean.as_str().contains("disabled"));
    }

    #[test]
    fn test_sanitize_restricts_input() {
        let clean = Sanitizer::new()
            .sanitize(r#"<input type="text" name="q" value="x" onfocus="alert(1)">"#);
        assert!(!clean.as_str().contains("text"));
        assert!(!clean.as_str().contains("name"));
        assert!(!clean.as_str().contains("value"));
        assert!(!clean.as_str().contains("onfocus"));
    }

    #[test]
    fn test_sanitize_empty() {
        assert!(Sanitizer::new().sanitize("").is_empty());
    }

    #[test]
    fn test_language_class() {
        assert_eq!(language_class("language-rust"), Some("language-rust"));
        assert_eq!(language_class("language-"), None);
        assert_eq!(language_class("language-rust evil"), None);
        assert_eq!(language_class("highlight"), None);
    }
}
