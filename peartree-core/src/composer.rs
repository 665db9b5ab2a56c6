use thiserror::Error;
use tracing::debug;

use crate::content::{PageContent, SectionKind};
use crate::markup::{Node, render_nodes_to_html};
use crate::sections::{RenderContext, RenderError, RendererRegistry, render_faqs};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("page `{slug}` has {count} hero section(s); exactly one is required")]
    HeroCount { slug: String, count: usize },
    #[error("page `{slug}` has {count} call-to-action section(s); exactly one is required")]
    CtaCount { slug: String, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error(transparent)]
    Structure(#[from] StructureError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A composed page body: rendered sections in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    slug: String,
    sections: Vec<Node>,
}

impl Page {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn sections(&self) -> &[Node] {
        &self.sections
    }

    pub fn to_html(&self) -> String {
        render_nodes_to_html(&self.sections)
    }
}

pub fn check_structure(page: &PageContent) -> Result<(), StructureError> {
    let heroes = page.count_of(SectionKind::Hero);
    if heroes != 1 {
        return Err(StructureError::HeroCount {
            slug: page.slug().to_string(),
            count: heroes,
        });
    }

    let ctas = page.count_of(SectionKind::Cta);
    if ctas != 1 {
        return Err(StructureError::CtaCount {
            slug: page.slug().to_string(),
            count: ctas,
        });
    }

    Ok(())
}

/// Renders every section of `page` in authored order.
///
/// The FAQ accordion is built from `page.faqs()` and placed directly before
/// the call to action. Any failure aborts the whole page; a partial page is
/// never returned.
pub fn compose(
    page: &PageContent,
    registry: &RendererRegistry,
    ctx: &RenderContext<'_>,
) -> Result<Page, ComposeError> {
    check_structure(page)?;

    let mut faq = render_faqs(page.faqs());
    let mut sections = Vec::with_capacity(page.sections().len() + 1);

    for section in page.sections() {
        if section.kind() == SectionKind::Cta
            && let Some(faq) = faq.take()
        {
            sections.push(faq);
        }
        if let Some(node) = registry.render(section, ctx)? {
            sections.push(node);
        }
    }

    debug!(page = page.slug(), sections = sections.len(), "composed page");

    Ok(Page {
        slug: page.slug().to_string(),
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::SectionContent;
    use crate::sections::SectionRenderer;
    use crate::test_support::{arnold, arnold_raw, business, raw_section, site};
    use crate::validate::validate;
    use serde_json::json;

    fn kinds_of(page: &Page) -> Vec<String> {
        page.sections()
            .iter()
            .map(|node| match node {
                Node::Element(element) => element.get_attr("class").unwrap_or_default().to_string(),
                Node::Text(_) => String::new(),
            })
            .collect()
    }

    #[test]
    fn keeps_authored_order_with_faq_before_cta() {
        let (site, business) = (site(), business());
        let ctx = RenderContext::new(&site).with_business(&business);
        let page = compose(&arnold(), &RendererRegistry::default(), &ctx).unwrap();

        assert_eq!(
            kinds_of(&page),
            [
                "section section-hero",
                "section section-benefit-grid",
                "section section-comparison-table",
                "section section-directions",
                "section section-faq",
                "section section-cta",
            ]
        );
    }

    #[test]
    fn no_faqs_means_no_faq_section() {
        let (site, business) = (site(), business());
        let ctx = RenderContext::new(&site).with_business(&business);
        let mut raw = arnold_raw();
        raw.faqs.clear();
        let content = validate(&raw, &business).unwrap();

        let html = compose(&content, &RendererRegistry::default(), &ctx)
            .unwrap()
            .to_html();
        assert!(!html.contains("faq"));
        assert!(!html.contains(crate::sections::FAQ_HEADING));
    }

    #[test]
    fn two_ctas_is_a_structure_error() {
        let (site, business) = (site(), business());
        let ctx = RenderContext::new(&site).with_business(&business);
        let mut raw = arnold_raw();
        raw.sections
            .push(raw_section("cta", json!({"heading": "Again", "body": "Book again"})));
        let content = validate(&raw, &business).unwrap();

        let err = compose(&content, &RendererRegistry::default(), &ctx).unwrap_err();
        assert_eq!(
            err,
            ComposeError::Structure(StructureError::CtaCount {
                slug: "reviews/arnold".into(),
                count: 2
            })
        );
    }

    #[test]
    fn missing_cta_is_a_structure_error() {
        let business = business();
        let mut raw = arnold_raw();
        raw.sections.retain(|s| s.kind != "cta");
        let content = validate(&raw, &business).unwrap();
        assert!(matches!(
            check_structure(&content),
            Err(StructureError::CtaCount { count: 0, .. })
        ));
    }

    struct Refusing;

    impl SectionRenderer for Refusing {
        fn kind(&self) -> SectionKind {
            SectionKind::Directions
        }

        fn render(
            &self,
            section: &SectionContent,
            _ctx: &RenderContext<'_>,
        ) -> Result<Option<Node>, RenderError> {
            Err(RenderError::unexpected(SectionKind::Cta, section))
        }
    }

    #[test]
    fn renderer_failure_aborts_the_page() {
        let (site, business) = (site(), business());
        let ctx = RenderContext::new(&site).with_business(&business);
        let mut registry = RendererRegistry::default();
        registry.register(Box::new(Refusing));

        let err = compose(&arnold(), &registry, &ctx).unwrap_err();
        assert!(matches!(err, ComposeError::Render(RenderError::UnexpectedVariant { .. })));
    }

    #[test]
    fn unregistered_kind_aborts_the_page() {
        let (site, business) = (site(), business());
        let ctx = RenderContext::new(&site).with_business(&business);
        let err = compose(&arnold(), &RendererRegistry::empty(), &ctx).unwrap_err();
        assert_eq!(
            err,
            ComposeError::Render(RenderError::MissingRenderer(SectionKind::Hero))
        );
    }
}
