use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::business::BusinessFacts;
use crate::composer::ComposeError;
use crate::config::SiteConfig;
use crate::content::{PageContent, RawPage};
use crate::metadata::canonical_url;
use crate::renderer::{RenderedPage, render_page_linked};
use crate::scanner::{ScannedContent, SourcedPage};
use crate::sections::{RendererRegistry, SectionRenderer};
use crate::sitemap::render_sitemap;
use crate::template::{PAGE_TEMPLATE, TemplateError, TemplateRenderer};
use crate::validate::{ValidationError, Violation, validate};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no business facts were supplied")]
    MissingBusinessFacts,
    #[error("business facts are invalid: {0}")]
    InvalidBusinessFacts(ValidationError),
    #[error("{} page(s) failed validation:\n{}", .0.len(), list_errors(.0))]
    InvalidPages(Vec<ValidationError>),
    #[error(transparent)]
    TemplateError(#[from] TemplateError),
}

impl BuildError {
    /// Page-level validation failures, if that is what this is.
    pub fn page_errors(&self) -> &[ValidationError] {
        match self {
            BuildError::InvalidPages(errors) => errors,
            _ => &[],
        }
    }
}

fn list_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error(transparent)]
    TemplateError(#[from] TemplateError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub struct SiteBuilder {
    theme_dir: Option<PathBuf>,
    site: SiteConfig,
    business: Option<BusinessFacts>,
    pages: Vec<SourcedPage>,
    unreadable: Vec<ValidationError>,
    registry: RendererRegistry,
}

impl Default for SiteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self {
            theme_dir: None,
            site: SiteConfig::default(),
            business: None,
            pages: Vec::new(),
            unreadable: Vec::new(),
            registry: RendererRegistry::default(),
        }
    }

    pub fn theme_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.theme_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn site_config(mut self, config: SiteConfig) -> Self {
        self.site = config;
        self
    }

    pub fn business_facts(mut self, facts: BusinessFacts) -> Self {
        self.business = Some(facts);
        self
    }

    /// Replaces the default renderer for the renderer's kind.
    pub fn renderer(mut self, renderer: Box<dyn SectionRenderer>) -> Self {
        self.registry.register(renderer);
        self
    }

    pub fn add_page(mut self, page: SourcedPage) -> Self {
        self.pages.push(page);
        self
    }

    pub fn add_pages(mut self, pages: Vec<SourcedPage>) -> Self {
        self.pages.extend(pages);
        self
    }

    /// Adds every scanned page. Files that failed to parse are reported by
    /// [`SiteBuilder::build`] together with invalid pages.
    pub fn add_scanned(mut self, content: ScannedContent) -> Self {
        self.unreadable.extend(content.unreadable);
        self.add_pages(content.pages)
    }

    pub fn add_raw(self, raw: RawPage) -> Self {
        let source = format!("<inline:{}>", raw.slug);
        self.add_page(SourcedPage::inline(source, raw))
    }

    /// Validates every page, collecting all failures, and checks that no two
    /// pages share a slug.
    pub fn build(self) -> Result<Site, BuildError> {
        let business = self.business.ok_or(BuildError::MissingBusinessFacts)?;
        business.check().map_err(BuildError::InvalidBusinessFacts)?;
        let business = business.shared();

        info!(pages = self.pages.len(), "validating content");
        let mut errors = self.unreadable;
        let mut valid = Vec::new();
        for sourced in &self.pages {
            match validate(&sourced.raw, &business) {
                Ok(page) => valid.push((sourced.source.clone(), page)),
                Err(err) => errors.push(ValidationError::new(
                    format!("{} ({})", sourced.source, err.page()),
                    err.violations().to_vec(),
                )),
            }
        }
        errors.extend(duplicate_slugs(&valid));

        if !errors.is_empty() {
            return Err(BuildError::InvalidPages(errors));
        }

        let mut templates = TemplateRenderer::new(self.theme_dir.as_deref())?;
        templates.add_to_context("site", &self.site);
        templates.add_to_context("business", business.as_ref());
        templates.add_to_context("lang", &self.site.language());

        Ok(Site {
            pages: valid.into_iter().map(|(_, page)| page).collect(),
            site: self.site,
            business,
            registry: self.registry,
            templates,
        })
    }
}

fn duplicate_slugs(pages: &[(String, PageContent)]) -> Vec<ValidationError> {
    let mut by_slug: HashMap<&str, Vec<&str>> = HashMap::new();
    for (source, page) in pages {
        by_slug.entry(page.slug()).or_default().push(source);
    }

    let mut duplicates: Vec<_> = by_slug.into_iter().filter(|(_, sources)| sources.len() > 1).collect();
    duplicates.sort();
    duplicates
        .into_iter()
        .map(|(slug, sources)| {
            ValidationError::new(
                slug,
                vec![Violation {
                    field: "slug".into(),
                    message: format!("`{slug}` is used by {}", sources.join(", ")),
                }],
            )
        })
        .collect()
}

/// A validated site, ready to render.
pub struct Site {
    pages: Vec<PageContent>,
    site: SiteConfig,
    business: Arc<BusinessFacts>,
    registry: RendererRegistry,
    templates: TemplateRenderer,
}

impl Site {
    pub fn pages(&self) -> &[PageContent] {
        &self.pages
    }

    pub fn page(&self, slug: &str) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.slug() == slug)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.site
    }

    pub fn business(&self) -> &BusinessFacts {
        &self.business
    }

    pub fn render_page(&self, page: &PageContent) -> Result<RenderedPage, ComposeError> {
        render_page_linked(&self.registry, page, &self.site, &self.business, |slug| {
            self.page(slug).is_some()
        })
    }

    /// Full HTML document for `page` through the layout template.
    pub fn render_document(&self, page: &PageContent) -> Result<String, OutputError> {
        let rendered = self.render_page(page)?;
        Ok(self.templates.render_page(PAGE_TEMPLATE, &rendered.view())?)
    }

    fn page_out_path(&self, page: &PageContent) -> PathBuf {
        page.slug().split('/').collect::<PathBuf>().join("index.html")
    }

    /// Writes `<slug>/index.html` for every page and a `sitemap.xml`.
    ///
    /// Every page is rendered before anything is written, so a failing page
    /// leaves the output directory untouched.
    ///
    /// Canonical URLs are `base_url + slug` with no trailing slash. The host
    /// is expected to serve `<slug>/index.html` at `/<slug>` directly (as
    /// Netlify and Cloudflare Pages do with pretty URLs) rather than
    /// redirecting to `/<slug>/`.
    pub fn render_all(&self, output_dir: &Path) -> Result<(), OutputError> {
        let documents = self
            .pages
            .iter()
            .map(|page| Ok((self.page_out_path(page), self.render_document(page)?)))
            .collect::<Result<Vec<_>, OutputError>>()?;

        std::fs::create_dir_all(output_dir)?;
        for (out_path, html) in documents {
            let output_path = output_dir.join(out_path);
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            debug!(path = %output_path.display(), "writing page");
            std::fs::write(output_path, html)?;
        }

        let sitemap = render_sitemap(self.pages.iter().map(|p| canonical_url(p.slug(), &self.site)));
        std::fs::write(output_dir.join("sitemap.xml"), sitemap)?;

        info!(pages = self.pages.len(), out = %output_dir.display(), "site written");
        Ok(())
    }
}
