//! Theme engine with Tera templates and suggestion resolution.
//!
//! The kernel loads its own template directory plus every plugin's
//! template directory into one engine, so plugin pages can extend the
//! kernel's base templates.

use std::path::PathBuf;

use anyhow::{Context, Result};
use dashmap::DashMap;
use tera::Tera;
use tracing::debug;

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    /// Tera template engine instance.
    tera: Tera,
    /// Cache mapping suggestion lists to resolved template names.
    suggestion_cache: DashMap<String, String>,
}

impl ThemeEngine {
    /// Create a new theme engine loading templates from the given directories.
    pub fn new(template_dirs: &[PathBuf]) -> Result<Self> {
        let mut tera = Tera::default();
        for dir in template_dirs {
            let pattern = dir.join("**/*.html");
            let pattern_str = pattern
                .to_str()
                .context("invalid template directory path")?;
            let loaded = Tera::new(pattern_str)
                .with_context(|| format!("failed to load templates from {}", dir.display()))?;
            tera.extend(&loaded)
                .with_context(|| format!("conflicting templates in {}", dir.display()))?;
        }

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self {
            tera,
            suggestion_cache: DashMap::new(),
        })
    }

    /// Create a theme engine with no templates (for testing).
    pub fn empty() -> Self {
        Self {
            tera: Tera::default(),
            suggestion_cache: DashMap::new(),
        }
    }

    /// Get the underlying Tera instance for custom operations.
    pub fn tera(&self) -> &Tera {
        &self.tera
    }

    /// Resolve the best template from a list of suggestions.
    ///
    /// Templates are tried in order; the first one that exists is returned.
    /// Results are cached for performance.
    ///
    /// Example suggestions: `["page--hmlab", "page"]`
    pub fn resolve_template(&self, suggestions: &[&str]) -> Option<String> {
        if suggestions.is_empty() {
            return None;
        }

        let cache_key = suggestions.join("|");

        if let Some(cached) = self.suggestion_cache.get(&cache_key) {
            return Some(cached.clone());
        }

        for suggestion in suggestions {
            let template_name = format!("{suggestion}.html");
            if self.tera.get_template(&template_name).is_ok() {
                self.suggestion_cache
                    .insert(cache_key, template_name.clone());
                return Some(template_name);
            }

            // Also try without .html extension (in case suggestion already has it)
            if self.tera.get_template(suggestion).is_ok() {
                let name = (*suggestion).to_string();
                self.suggestion_cache.insert(cache_key, name.clone());
                return Some(name);
            }
        }

        // Don't cache negative results to allow hot-reload
        None
    }

    /// Get page template suggestions based on path.
    ///
    /// `/hmlab` resolves to `page--hmlab` before falling back to `page`.
    pub fn page_suggestions(path: &str) -> Vec<String> {
        let mut suggestions = Vec::new();

        let normalized = path.trim_start_matches('/').replace('/', "--");
        if !normalized.is_empty() {
            suggestions.push(format!("page--{normalized}"));
        }

        suggestions.push("page".to_string());

        suggestions
    }

    /// Render a full page with content.
    pub fn render_page(
        &self,
        path: &str,
        title: &str,
        content: &str,
        context: &mut tera::Context,
    ) -> Result<String> {
        let suggestions = Self::page_suggestions(path);
        let suggestion_refs: Vec<&str> = suggestions.iter().map(|s| s.as_str()).collect();

        let template = self
            .resolve_template(&suggestion_refs)
            .unwrap_or_else(|| "page.html".to_string());

        context.insert("title", title);
        context.insert("content", content);
        context.insert("path", path);

        self.tera
            .render(&template, context)
            .context("failed to render page template")
    }

    /// Clear the suggestion cache (useful for development hot-reload).
    pub fn clear_cache(&self) {
        self.suggestion_cache.clear();
    }
}

impl std::fmt::Debug for ThemeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeEngine")
            .field("template_count", &self.tera.get_template_names().count())
            .field("cache_size", &self.suggestion_cache.len())
            .finish()
    }
}
