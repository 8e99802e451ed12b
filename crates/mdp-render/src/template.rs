//! Page templates.
//!
//! Templates are minijinja sources with three context values: `Title`, `Body`
//! and `FileName`. Every template is HTML auto-escaped, whatever its file
//! extension, and referencing any other value is an error.
//!
//! Selectors resolve in this order:
//! 1. empty selector: the `default` built-in
//! 2. exact built-in name (`default`, `minimal`, `dark`): that built-in
//! 3. anything else: a template file path, parsed on every resolution
//!
//! Built-in names always win, so a file called `default` in the working
//! directory is never reachable through the bare name (use `./default`).

use std::fmt;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, Template, UndefinedBehavior};

use crate::page::RenderContext;

/// Templates compiled into the binary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinTemplate {
    /// Plain page with a header naming the previewed file.
    Default,
    /// Bare page without header or styling.
    Minimal,
    /// Dark color scheme.
    Dark,
}

impl BuiltinTemplate {
    /// All built-in templates, in listing order.
    pub const ALL: [Self; 3] = [Self::Default, Self::Minimal, Self::Dark];

    /// Selector name of the template.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Minimal => "minimal",
            Self::Dark => "dark",
        }
    }

    /// Look up a built-in template by exact selector name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|template| template.name() == name)
    }

    /// Template source.
    #[must_use]
    pub fn source(self) -> &'static str {
        match self {
            Self::Default => include_str!("../templates/default.html"),
            Self::Minimal => include_str!("../templates/minimal.html"),
            Self::Dark => include_str!("../templates/dark.html"),
        }
    }
}

impl fmt::Display for BuiltinTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classified template selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSelector {
    /// One of the built-in templates.
    BuiltIn(BuiltinTemplate),
    /// Template file on disk.
    External(PathBuf),
}

impl TemplateSelector {
    /// Classify a selector string by membership in the built-in set.
    #[must_use]
    pub fn parse(selector: &str) -> Self {
        if selector.is_empty() {
            return Self::BuiltIn(BuiltinTemplate::Default);
        }
        match BuiltinTemplate::from_name(selector) {
            Some(builtin) => Self::BuiltIn(builtin),
            None => Self::External(PathBuf::from(selector)),
        }
    }
}

impl fmt::Display for TemplateSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn(builtin) => builtin.fmt(f),
            Self::External(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Error returned when a template cannot be prepared.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// Template file could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Template file is not a valid template.
    #[error("Failed to parse template {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: minijinja::Error,
    },
    /// Built-in template is broken.
    #[error("Built-in template '{name}' is invalid: {source}")]
    BuiltIn {
        name: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

/// A resolved template, ready to be executed against a [`RenderContext`].
pub enum BoundTemplate<'r> {
    /// Pre-parsed built-in, borrowed from the registry.
    BuiltIn {
        builtin: BuiltinTemplate,
        template: Template<'r, 'r>,
    },
    /// Freshly parsed template file with its own environment.
    External {
        path: PathBuf,
        env: Environment<'static>,
    },
}

impl BoundTemplate<'_> {
    /// Human-readable selector of the template, for messages.
    #[must_use]
    pub fn selector(&self) -> TemplateSelector {
        match self {
            Self::BuiltIn { builtin, .. } => TemplateSelector::BuiltIn(*builtin),
            Self::External { path, .. } => TemplateSelector::External(path.clone()),
        }
    }

    /// Execute the template into `out`.
    ///
    /// On error `out` may hold partial output and must be discarded.
    pub fn render_to(
        &self,
        context: &RenderContext,
        out: &mut Vec<u8>,
    ) -> Result<(), minijinja::Error> {
        match self {
            Self::BuiltIn { template, .. } => {
                template.render_to_write(context.to_value(), out)?;
            }
            Self::External { path, env } => {
                env.get_template(&external_name(path))?
                    .render_to_write(context.to_value(), out)?;
            }
        }
        Ok(())
    }
}

/// Registry of page templates.
///
/// Built-ins are parsed once in [`TemplateRegistry::new`] and never change
/// afterwards, so one registry can be shared by concurrent renders.
pub struct TemplateRegistry {
    env: Environment<'static>,
}

impl TemplateRegistry {
    /// Create a registry with all built-in templates parsed.
    ///
    /// A built-in that fails to parse is a startup fault: no render can be
    /// served without them.
    pub fn new() -> Result<Self, TemplateError> {
        Self::from_sources(
            BuiltinTemplate::ALL
                .into_iter()
                .map(|builtin| (builtin, builtin.source())),
        )
    }

    /// Create a registry from explicit built-in sources.
    pub(crate) fn from_sources<I>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (BuiltinTemplate, &'static str)>,
    {
        let mut env = new_environment();
        for (builtin, source) in sources {
            env.add_template(builtin.name(), source)
                .map_err(|source| TemplateError::BuiltIn {
                    name: builtin.name(),
                    source,
                })?;
        }
        Ok(Self { env })
    }

    /// Names of the built-in templates.
    pub fn builtin_names(&self) -> impl Iterator<Item = &'static str> {
        BuiltinTemplate::ALL.into_iter().map(BuiltinTemplate::name)
    }

    /// Resolve a selector string to a bound template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Read`] or [`TemplateError::Parse`] when the
    /// selector names a template file that cannot be used. There is no
    /// fallback to the default template.
    pub fn resolve(&self, selector: &str) -> Result<BoundTemplate<'_>, TemplateError> {
        self.resolve_selector(&TemplateSelector::parse(selector))
    }

    /// Resolve an already classified selector.
    pub fn resolve_selector(
        &self,
        selector: &TemplateSelector,
    ) -> Result<BoundTemplate<'_>, TemplateError> {
        match selector {
            TemplateSelector::BuiltIn(builtin) => {
                tracing::debug!(template = %builtin, "Using built-in template");
                let template =
                    self.env
                        .get_template(builtin.name())
                        .map_err(|source| TemplateError::BuiltIn {
                            name: builtin.name(),
                            source,
                        })?;
                Ok(BoundTemplate::BuiltIn {
                    builtin: *builtin,
                    template,
                })
            }
            TemplateSelector::External(path) => load_external(path),
        }
    }
}

/// Read and parse a template file into its own environment.
fn load_external(path: &Path) -> Result<BoundTemplate<'static>, TemplateError> {
    let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut env = new_environment();
    env.add_template_owned(external_name(path), source)
        .map_err(|source| TemplateError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Loaded template file");
    Ok(BoundTemplate::External {
        path: path.to_path_buf(),
        env,
    })
}

/// Name an external template is registered under.
fn external_name(path: &Path) -> String {
    path.display().to_string()
}

/// Environment shared by built-in and external templates.
fn new_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}
