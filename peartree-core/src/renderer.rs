use serde::Serialize;

use crate::business::BusinessFacts;
use crate::composer::{ComposeError, compose};
use crate::config::SiteConfig;
use crate::content::PageContent;
use crate::metadata::{Metadata, resolve_metadata};
use crate::schema::{JsonLd, synthesize_linked};
use crate::sections::{RenderContext, RendererRegistry};

/// Everything a hosting framework needs for one page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub markup: String,
    pub json_ld: JsonLd,
    pub metadata: Metadata,
}

/// Serializable view of a [`RenderedPage`] for templates.
#[derive(Debug, Serialize)]
pub struct RenderedView<'a> {
    pub markup: &'a str,
    pub json_ld: String,
    pub head: String,
    pub metadata: &'a Metadata,
}

impl RenderedPage {
    pub fn view(&self) -> RenderedView<'_> {
        RenderedView {
            markup: &self.markup,
            json_ld: self.json_ld.to_script_tag(),
            head: self.metadata.head_nodes().iter().map(|node| node.to_html()).collect(),
            metadata: &self.metadata,
        }
    }
}

pub fn render_page(
    page: &PageContent,
    site: &SiteConfig,
    business: &BusinessFacts,
) -> Result<RenderedPage, ComposeError> {
    render_page_with(&RendererRegistry::default(), page, site, business)
}

/// Composes the body, then derives metadata and structured data from the
/// same record. Nothing is returned unless all three succeed.
pub fn render_page_with(
    registry: &RendererRegistry,
    page: &PageContent,
    site: &SiteConfig,
    business: &BusinessFacts,
) -> Result<RenderedPage, ComposeError> {
    render_page_linked(registry, page, site, business, |_| true)
}

/// [`render_page_with`] for a page inside a known site: breadcrumbs only
/// link to slugs for which `has_page` is true.
pub fn render_page_linked(
    registry: &RendererRegistry,
    page: &PageContent,
    site: &SiteConfig,
    business: &BusinessFacts,
    has_page: impl Fn(&str) -> bool,
) -> Result<RenderedPage, ComposeError> {
    let ctx = RenderContext::new(site).with_business(business);
    let body = compose(page, registry, &ctx)?;

    Ok(RenderedPage {
        markup: body.to_html(),
        json_ld: synthesize_linked(page, site, business, has_page),
        metadata: resolve_metadata(page, site),
    })
}
