//! Section renderers.
//!
//! One renderer per [`SectionKind`], looked up through a
//! [`RendererRegistry`]. Renderers are pure: they read their own variant and,
//! for kinds that need it, the business facts on the [`RenderContext`].
//! `Ok(None)` means the section has nothing to show and is left out.

mod before_after;
mod benefits;
mod comparison;
mod cta;
mod directions;
mod faq;
mod hero;
mod priorities;
mod testimonial;

use std::collections::HashMap;

use thiserror::Error;

use crate::business::BusinessFacts;
use crate::config::SiteConfig;
use crate::content::{SectionContent, SectionKind};
use crate::markup::{Element, Node};

pub use before_after::BeforeAfterRenderer;
pub use benefits::BenefitGridRenderer;
pub use comparison::ComparisonTableRenderer;
pub use cta::CtaRenderer;
pub use directions::DirectionsRenderer;
pub use faq::{FAQ_HEADING, render_faqs};
pub use hero::HeroRenderer;
pub use priorities::PriorityListRenderer;
pub use testimonial::TestimonialRenderer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("no renderer is registered for `{0}` sections")]
    MissingRenderer(SectionKind),
    #[error("the `{expected}` renderer was handed a `{found}` section")]
    UnexpectedVariant {
        expected: SectionKind,
        found: SectionKind,
    },
    #[error("`{0}` sections need the practice's business facts but none were supplied")]
    MissingBusinessFacts(SectionKind),
}

impl RenderError {
    pub fn unexpected(expected: SectionKind, section: &SectionContent) -> Self {
        RenderError::UnexpectedVariant {
            expected,
            found: section.kind(),
        }
    }
}

/// What a renderer may read besides its own section.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub site: &'a SiteConfig,
    business: Option<&'a BusinessFacts>,
}

impl<'a> RenderContext<'a> {
    pub fn new(site: &'a SiteConfig) -> Self {
        Self { site, business: None }
    }

    pub fn with_business(mut self, business: &'a BusinessFacts) -> Self {
        self.business = Some(business);
        self
    }

    /// The context handed to a single section: business facts are only
    /// passed through to kinds that display them.
    pub fn scoped_for(&self, kind: SectionKind) -> Self {
        Self {
            site: self.site,
            business: self.business.filter(|_| kind.requires_business_facts()),
        }
    }

    pub fn business(&self, kind: SectionKind) -> Result<&'a BusinessFacts, RenderError> {
        self.business.ok_or(RenderError::MissingBusinessFacts(kind))
    }
}

pub trait SectionRenderer: Send + Sync {
    fn kind(&self) -> SectionKind;

    fn render(
        &self,
        section: &SectionContent,
        ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError>;
}

pub struct RendererRegistry {
    renderers: HashMap<SectionKind, Box<dyn SectionRenderer>>,
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RendererRegistry {
    /// A registry with nothing in it. Mostly useful for tests and for sites
    /// that replace every renderer.
    pub fn empty() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(HeroRenderer));
        registry.register(Box::new(BenefitGridRenderer));
        registry.register(Box::new(ComparisonTableRenderer));
        registry.register(Box::new(PriorityListRenderer));
        registry.register(Box::new(TestimonialRenderer));
        registry.register(Box::new(BeforeAfterRenderer));
        registry.register(Box::new(DirectionsRenderer));
        registry.register(Box::new(CtaRenderer));
        registry
    }

    /// Registers `renderer` for its kind, replacing any earlier one.
    pub fn register(&mut self, renderer: Box<dyn SectionRenderer>) {
        self.renderers.insert(renderer.kind(), renderer);
    }

    pub fn get(&self, kind: SectionKind) -> Result<&dyn SectionRenderer, RenderError> {
        self.renderers
            .get(&kind)
            .map(|renderer| renderer.as_ref())
            .ok_or(RenderError::MissingRenderer(kind))
    }

    pub fn render(
        &self,
        section: &SectionContent,
        ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let kind = section.kind();
        self.get(kind)?.render(section, &ctx.scoped_for(kind))
    }
}

/// Outer `<section>` shared by every renderer.
pub(crate) fn section_shell(kind: SectionKind) -> Element {
    Element::new("section").class(format!("section section-{}", kind.as_str().replace('_', "-")))
}

pub(crate) fn heading(level: &'static str, content: &str) -> Element {
    Element::new(level).text(content)
}

pub(crate) fn optional_heading(content: Option<&String>) -> Option<Element> {
    content.filter(|c| !c.is_empty()).map(|c| heading("h2", c))
}
