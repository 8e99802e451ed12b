//! Page rendering pipeline.
//!
//! Provides [`PageRenderer`], which turns raw Markdown bytes into a complete
//! HTML page: convert, sanitize, resolve the title, resolve the template, bind
//! a [`RenderContext`] and execute the template.

use std::sync::Arc;

use minijinja::{Value, context};

use crate::converter::MarkdownConverter;
use crate::sanitizer::{Sanitizer, TrustedHtml};
use crate::template::{TemplateError, TemplateRegistry, TemplateSelector};
use crate::title::{DEFAULT_TITLE, TitleResolver};

/// Values a page template is rendered with.
///
/// The body is [`TrustedHtml`], so it is always sanitizer output.
#[derive(Clone, Debug)]
pub struct RenderContext {
    title: String,
    body: TrustedHtml,
    file_name: String,
}

impl RenderContext {
    /// Create a render context.
    pub fn new(title: impl Into<String>, body: TrustedHtml, file_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body,
            file_name: file_name.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &TrustedHtml {
        &self.body
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Template context: `Title` and `FileName` are escaped, `Body` is marked safe.
    pub(crate) fn to_value(&self) -> Value {
        context! {
            Title => &self.title,
            Body => Value::from_safe_string(self.body.as_str().to_owned()),
            FileName => &self.file_name,
        }
    }
}

/// Error returned when page rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Requested template could not be resolved.
    #[error(transparent)]
    Template(#[from] TemplateError),
    /// Template failed while rendering the page.
    #[error("Failed to render template '{selector}': {source}")]
    Execute {
        selector: TemplateSelector,
        #[source]
        source: minijinja::Error,
    },
}

/// Configuration for [`PageRenderer`].
#[derive(Clone, Debug)]
pub struct PageRendererConfig {
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Title used when the document has no heading and no file name is known.
    pub fallback_title: String,
}

impl Default for PageRendererConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            fallback_title: DEFAULT_TITLE.to_owned(),
        }
    }
}

/// Renders Markdown documents into standalone HTML pages.
///
/// The template registry is injected so one set of parsed built-ins can be
/// shared between renderers.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mdp_render::{PageRenderer, PageRendererConfig, TemplateRegistry};
///
/// let registry = Arc::new(TemplateRegistry::new().unwrap());
/// let config = PageRendererConfig {
///     fallback_title: "Preview".to_owned(),
///     ..Default::default()
/// };
/// let renderer = PageRenderer::with_config(registry, config);
/// let page = renderer.render(b"no heading here", "minimal", None).unwrap();
/// assert!(String::from_utf8(page).unwrap().contains("<title>Preview</title>"));
/// ```
pub struct PageRenderer {
    registry: Arc<TemplateRegistry>,
    converter: MarkdownConverter,
    sanitizer: Sanitizer,
    titles: TitleResolver,
}

impl PageRenderer {
    /// Create a renderer with default configuration.
    #[must_use]
    pub fn new(registry: Arc<TemplateRegistry>) -> Self {
        Self::with_config(registry, PageRendererConfig::default())
    }

    /// Create a renderer with explicit configuration.
    #[must_use]
    pub fn with_config(registry: Arc<TemplateRegistry>, config: PageRendererConfig) -> Self {
        Self {
            registry,
            converter: MarkdownConverter::new().with_gfm(config.gfm),
            sanitizer: Sanitizer::new(),
            titles: TitleResolver::new().with_fallback(config.fallback_title),
        }
    }

    /// Replace the title resolver.
    #[must_use]
    pub fn with_title_resolver(mut self, titles: TitleResolver) -> Self {
        self.titles = titles;
        self
    }

    /// Render a Markdown document into a complete HTML page.
    ///
    /// # Arguments
    ///
    /// * `source` - Raw Markdown bytes
    /// * `selector` - Template selector: empty, a built-in name, or a file path
    /// * `file_name` - Name of the document, used for the title and page header
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the template cannot be resolved and
    /// [`RenderError::Execute`] if it fails while rendering. No partial page is
    /// returned in either case.
    pub fn render(
        &self,
        source: &[u8],
        selector: &str,
        file_name: Option<&str>,
    ) -> Result<Vec<u8>, RenderError> {
        let html = self.converter.convert(source);
        let body = self.sanitizer.sanitize(&html);
        let title = self.titles.resolve(source, file_name);
        tracing::debug!(
            title = %title,
            body_len = body.as_str().len(),
            "Converted markdown"
        );

        let template = self.registry.resolve(selector)?;
        let context = RenderContext::new(title, body, file_name.unwrap_or_default());

        let mut page = Vec::with_capacity(context.body().as_str().len() + 1024);
        template
            .render_to(&context, &mut page)
            .map_err(|source| RenderError::Execute {
                selector: template.selector(),
                source,
            })?;

        Ok(page)
    }
}
