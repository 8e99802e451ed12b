//! Markdown to standalone HTML page rendering.
//!
//! This crate turns one Markdown document into a complete, sanitized HTML page:
//!
//! - [`MarkdownConverter`]: Markdown to (untrusted) HTML fragment
//! - [`Sanitizer`]: untrusted HTML to [`TrustedHtml`]
//! - [`TitleResolver`]: page title from the first `# ` heading or the file name
//! - [`TemplateRegistry`]: built-in and external page templates
//! - [`PageRenderer`]: drives all of the above and executes the template
//!
//! The only way to obtain [`TrustedHtml`] is through [`Sanitizer::sanitize`],
//! so a page body can never contain markup that skipped sanitization.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mdp_render::{PageRenderer, TemplateRegistry};
//!
//! let registry = Arc::new(TemplateRegistry::new().unwrap());
//! let renderer = PageRenderer::new(registry);
//! let page = renderer
//!     .render(b"# Hello\n\n**Bold** text", "", Some("hello.md"))
//!     .unwrap();
//! let html = String::from_utf8(page).unwrap();
//! assert!(html.contains("<title>Hello</title>"));
//! ```

mod converter;
mod page;
mod sanitizer;
mod template;
mod title;

pub use converter::MarkdownConverter;
pub use page::{PageRenderer, PageRendererConfig, RenderContext, RenderError};
pub use sanitizer::{Sanitizer, TrustedHtml};
pub use template::{BoundTemplate, BuiltinTemplate, TemplateError, TemplateRegistry, TemplateSelector};
pub use title::{DEFAULT_TITLE, FileNameTitle, HeadingTitle, TitleResolver, TitleStrategy};
