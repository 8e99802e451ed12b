//! `mdp` render command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use mdp_config::{CliSettings, Config};
use mdp_render::{PageRenderer, PageRendererConfig, TemplateRegistry};

use crate::error::CliError;
use crate::output::Output;
use crate::preview;

/// Prefix of generated page file names.
const PAGE_PREFIX: &str = "mdp";

/// Suffix of generated page file names.
const PAGE_SUFFIX: &str = ".html";

/// Arguments for rendering a Markdown file.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown file to preview.
    #[arg(short, long, required_unless_present = "list_templates")]
    file: Option<PathBuf>,

    /// Template: built-in name (default, minimal, dark) or template file path.
    #[arg(short, long)]
    template: Option<String>,

    /// Skip opening the generated page in the default viewer.
    #[arg(short, long)]
    skip_preview: bool,

    /// Directory for the generated page (default: system temp directory).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover mdp.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// List built-in templates and exit.
    #[arg(long)]
    list_templates: bool,
}

impl RenderArgs {
    /// Execute the render command, writing the generated page path to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, rendering, writing, or
    /// launching the viewer fails.
    pub(crate) fn execute(self, out: &mut dyn Write) -> Result<(), CliError> {
        let output = Output::new();
        let registry = Arc::new(TemplateRegistry::new()?);

        if self.list_templates {
            for name in registry.builtin_names() {
                writeln!(out, "{name}")?;
            }
            return Ok(());
        }

        let Some(file) = self.file else {
            return Err(CliError::Validation("--file is required".to_owned()));
        };

        let cli_settings = CliSettings {
            template: self.template,
            output_dir: self.output_dir,
            preview_enabled: self.skip_preview.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let source = std::fs::read(&file).map_err(|source| CliError::Read {
            path: file.clone(),
            source,
        })?;

        let renderer = PageRenderer::with_config(
            registry,
            PageRendererConfig {
                gfm: config.render.gfm,
                fallback_title: config.render.fallback_title.clone(),
            },
        );
        let selector = config.render.template_selector();
        let file_name = file.to_string_lossy();
        let page = renderer.render(&source, selector, Some(file_name.as_ref()))?;

        let page_path = save_page(&config.preview_resolved.output_dir_or_temp(), &page)?;
        writeln!(out, "{}", page_path.display())?;

        if self.verbose {
            let template = if selector.is_empty() { "default" } else { selector };
            output.info(&format!("Rendered {} with template '{template}'", file.display()));
        }

        if config.preview_resolved.enabled {
            preview::open_in_viewer(&page_path)?;
            output.success(&format!("Opened {}", page_path.display()));
        }

        Ok(())
    }
}

/// Write the page to a new `mdp*.html` file in `dir` and keep it on disk.
fn save_page(dir: &Path, page: &[u8]) -> Result<PathBuf, CliError> {
    let dir_error = |source: std::io::Error| CliError::Write {
        path: dir.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(dir_error)?;
    let mut file = tempfile::Builder::new()
        .prefix(PAGE_PREFIX)
        .suffix(PAGE_SUFFIX)
        .tempfile_in(dir)
        .map_err(dir_error)?;

    let page_path = file.path().to_path_buf();
    write_page(&mut file, &page_path, page)?;

    let (_, path) = file.keep().map_err(|e| CliError::Write {
        path: page_path,
        source: e.error,
    })?;
    tracing::debug!(path = %path.display(), bytes = page.len(), "Saved page");
    Ok(path)
}

/// Write the page bytes, reporting failures against the page file.
fn write_page(writer: &mut impl Write, path: &Path, page: &[u8]) -> Result<(), CliError> {
    writer
        .write_all(page)
        .and_then(|()| writer.flush())
        .map_err(|source| CliError::Write {
            path: path.to_path_buf(),
            source,
        })
}
