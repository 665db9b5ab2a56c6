use std::path::Path;

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

/// Template every page is rendered through.
pub const PAGE_TEMPLATE: &str = "page.html";

const DEFAULT_PAGE_LAYOUT: &str = include_str!("../templates/page.html");

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template error: {0}")]
    TeraError(#[from] tera::Error),
}

pub struct TemplateRenderer {
    tera: Tera,
    context: Context,
}

impl TemplateRenderer {
    /// Loads `*.html` templates from `theme_dir` when given. A theme that does
    /// not provide `page.html` falls back to the built-in layout.
    pub fn new(theme_dir: Option<&Path>) -> Result<Self, TemplateError> {
        let mut tera = match theme_dir {
            Some(dir) if dir.is_dir() => {
                let glob = format!("{}/**/*.html", dir.display());
                debug!(theme = %dir.display(), "loading theme templates");
                Tera::new(&glob)?
            }
            _ => Tera::default(),
        };

        if !tera.get_template_names().any(|name| name == PAGE_TEMPLATE) {
            tera.add_raw_template(PAGE_TEMPLATE, DEFAULT_PAGE_LAYOUT)?;
        }

        Ok(Self {
            tera,
            context: Context::new(),
        })
    }

    /// Add a value to the context shared by every render
    pub fn add_to_context<T: Serialize>(&mut self, key: &str, value: &T) {
        self.context.insert(key, value);
    }

    /// Render a template with the shared context plus `page`
    pub fn render_page<T: Serialize>(&self, template: &str, page: &T) -> Result<String, TemplateError> {
        let mut context = self.context.clone();
        context.insert("page", page);
        Ok(self.tera.render(template, &context)?)
    }
}
