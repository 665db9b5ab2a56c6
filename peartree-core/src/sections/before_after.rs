use crate::content::{BeforeAfterSection, Image, SectionContent, SectionKind};
use crate::markup::{Element, Node};

use super::{RenderContext, RenderError, SectionRenderer, optional_heading, section_shell};

pub struct BeforeAfterRenderer;

impl SectionRenderer for BeforeAfterRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::BeforeAfter
    }

    fn render(
        &self,
        section: &SectionContent,
        _ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::BeforeAfter(before_after) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        Ok(Some(render_before_after(before_after)))
    }
}

fn slide(class: &'static str, image: &Image) -> Element {
    Element::new("img")
        .class(class)
        .attr("src", &image.src)
        .attr("alt", &image.alt)
        .attr("loading", "lazy")
}

fn render_before_after(section: &BeforeAfterSection) -> Node {
    let slider = Element::new("div")
        .class("before-after-slider")
        .child(slide("before", &section.before))
        .child(slide("after", &section.after))
        .child(
            Element::new("input")
                .class("before-after-handle")
                .attr("type", "range")
                .attr("min", "0")
                .attr("max", "100")
                .attr("value", "50")
                .attr("aria-label", "Drag to compare before and after"),
        );

    let figure = Element::new("figure")
        .class("before-after")
        .child(slider)
        .maybe_child(
            section
                .caption
                .as_ref()
                .map(|caption| Element::new("figcaption").text(caption)),
        );

    section_shell(SectionKind::BeforeAfter)
        .maybe_child(optional_heading(section.heading.as_ref()))
        .child(figure)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_images_in_order() {
        let node = render_before_after(&BeforeAfterSection {
            heading: None,
            before: Image {
                src: "/img/bonding-before.jpg".into(),
                alt: "Chipped front teeth".into(),
            },
            after: Image {
                src: "/img/bonding-after.jpg".into(),
                alt: "Repaired with composite bonding".into(),
            },
            caption: Some("Two visits, no drilling.".into()),
        });
        let html = node.to_html();
        let before = html.find("bonding-before").unwrap();
        let after = html.find("bonding-after").unwrap();
        assert!(before < after);
        assert!(html.contains("<figcaption>Two visits, no drilling.</figcaption>"));
    }
}
