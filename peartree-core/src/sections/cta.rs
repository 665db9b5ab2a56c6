use crate::business::BusinessFacts;
use crate::content::{CtaSection, SectionContent, SectionKind};
use crate::markup::{Element, Node};

use super::{RenderContext, RenderError, SectionRenderer, heading, section_shell};

const DEFAULT_BUTTON_LABEL: &str = "Book an appointment";

pub struct CtaRenderer;

impl SectionRenderer for CtaRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::Cta
    }

    fn render(
        &self,
        section: &SectionContent,
        ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::Cta(cta) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        let business = ctx.business(self.kind())?;
        Ok(Some(render_cta(cta, business)))
    }
}

fn render_cta(cta: &CtaSection, business: &BusinessFacts) -> Node {
    let label = cta.button_label.as_deref().unwrap_or(DEFAULT_BUTTON_LABEL);

    let actions = Element::new("div")
        .class("cta-actions")
        .child(
            Element::new("a")
                .class("button button-primary")
                .attr("href", &business.booking_url)
                .text(label),
        )
        .child(
            Element::new("a")
                .class("button button-secondary")
                .attr("href", business.phone_href())
                .text(format!("Call {}", business.phone)),
        );

    section_shell(SectionKind::Cta)
        .child(heading("h2", &cta.heading))
        .child(Element::new("p").text(&cta.body))
        .child(actions)
        .into()
}
