//! Output formatting for CLI commands
//!
//! Stdout carries only the JSON contract. Diagnostics go to stderr, and only
//! with `--verbose`.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::Page;
use crate::render::{prune, Envelope, Truncation};

/// Output helper for consistent formatting
pub struct Output {
    truncation: Truncation,
    verbose: bool,
}

impl Output {
    pub fn new(truncation: Truncation, verbose: bool) -> Self {
        Self {
            truncation,
            verbose,
        }
    }

    pub fn truncation(&self) -> &Truncation {
        &self.truncation
    }

    /// Renders a single payload: prune, then truncate
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        let value = serde_json::to_value(data).context("Failed to serialize output")?;
        let shaped = self.truncation.apply(prune(value));
        serde_json::to_string_pretty(&shaped).context("Failed to serialize output")
    }

    /// Renders one page of a list as `{ items, pagination? }`
    pub fn render_page<T: Serialize>(&self, page: &Page<T>) -> Result<String> {
        let items = page
            .nodes
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to serialize output")?;
        let envelope = Envelope::build(items, &page.page_info, &self.truncation);
        serde_json::to_string_pretty(&envelope).context("Failed to serialize output")
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) -> Result<()> {
        let rendered = self.render(data)?;
        println!("{}", rendered);
        Ok(())
    }

    /// Prints a page of list results
    pub fn page<T: Serialize>(&self, page: &Page<T>) -> Result<()> {
        self.verbose_ctx(
            "page",
            &format!(
                "{} item(s), more: {}",
                page.nodes.len(),
                page.page_info.has_next_page
            ),
        );
        let rendered = self.render_page(page)?;
        println!("{}", rendered);
        Ok(())
    }

    /// Prints a failure as a single JSON line on stderr
    pub fn error(message: &str) {
        eprintln!("{}", serde_json::json!({ "error": message }));
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
