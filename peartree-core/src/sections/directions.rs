use crate::business::BusinessFacts;
use crate::content::{DirectionsSection, SectionContent, SectionKind};
use crate::markup::{Element, Node, text};

use super::{RenderContext, RenderError, SectionRenderer, heading, section_shell};

pub struct DirectionsRenderer;

impl SectionRenderer for DirectionsRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::Directions
    }

    fn render(
        &self,
        section: &SectionContent,
        ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::Directions(directions) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        let business = ctx.business(self.kind())?;
        Ok(Some(render_directions(directions, business)))
    }
}

fn render_directions(directions: &DirectionsSection, business: &BusinessFacts) -> Node {
    let title = directions
        .heading
        .clone()
        .unwrap_or_else(|| format!("Finding us from {}", directions.from));

    let mut address = Element::new("address").child(
        Element::new("strong").text(&business.name),
    );
    for line in business.address_lines() {
        address = address.child(Element::new("br")).child(text(line));
    }

    let travel_time = directions
        .travel_time
        .as_ref()
        .map(|time| Element::new("p").class("travel-time").text(time));

    let steps = (!directions.steps.is_empty()).then(|| {
        Element::new("ol")
            .class("directions-steps")
            .children(directions.steps.iter().map(|step| Element::new("li").text(step)))
    });

    section_shell(SectionKind::Directions)
        .child(heading("h2", &title))
        .child(address)
        .maybe_child(travel_time)
        .maybe_child(steps)
        .child(
            Element::new("a")
                .class("map-link")
                .attr("href", business.map_url())
                .attr("rel", "noopener")
                .text("Open in maps"),
        )
        .into()
}
