use crate::content::{BenefitGridSection, SectionContent, SectionKind};
use crate::markup::{Element, Node};

use super::{RenderContext, RenderError, SectionRenderer, heading, optional_heading, section_shell};

pub struct BenefitGridRenderer;

impl SectionRenderer for BenefitGridRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::BenefitGrid
    }

    fn render(
        &self,
        section: &SectionContent,
        _ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::BenefitGrid(grid) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        Ok(render_benefits(grid))
    }
}

fn render_benefits(grid: &BenefitGridSection) -> Option<Node> {
    if grid.benefits.is_empty() {
        return None;
    }

    let cards = grid.benefits.iter().map(|benefit| {
        Element::new("article")
            .class("benefit-card")
            .child(
                Element::new("span")
                    .class(format!("icon icon-{}", benefit.icon.as_str()))
                    .attr("aria-hidden", "true"),
            )
            .child(heading("h3", &benefit.title))
            .child(Element::new("p").text(&benefit.body))
    });

    let node = section_shell(SectionKind::BenefitGrid)
        .maybe_child(optional_heading(grid.heading.as_ref()))
        .maybe_child(
            grid.intro
                .as_ref()
                .map(|intro| Element::new("p").class("section-intro").text(intro)),
        )
        .child(Element::new("div").class("benefit-grid").children(cards));

    Some(node.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Benefit, Icon};

    #[test]
    fn empty_grid_renders_nothing() {
        let grid = BenefitGridSection {
            heading: Some("Why patients choose us".into()),
            intro: None,
            benefits: Vec::new(),
        };
        assert!(render_benefits(&grid).is_none());
    }

    #[test]
    fn cards_carry_their_icon_class() {
        let grid = BenefitGridSection {
            heading: None,
            intro: None,
            benefits: vec![Benefit {
                title: "Evening appointments".into(),
                body: "Open until 7pm on Thursdays.".into(),
                icon: Icon::Clock,
            }],
        };
        let node = render_benefits(&grid).unwrap();
        assert_eq!(node.find_by_class("benefit-card").len(), 1);
        assert_eq!(node.find_by_class("icon-clock").len(), 1);
        assert!(!node.to_html().contains("<h2>"));
    }
}
