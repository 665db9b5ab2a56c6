use crate::content::{SectionContent, SectionKind, TestimonialSection};
use crate::markup::{Element, Node, text};

use super::{RenderContext, RenderError, SectionRenderer, section_shell};

pub struct TestimonialRenderer;

impl SectionRenderer for TestimonialRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::Testimonial
    }

    fn render(
        &self,
        section: &SectionContent,
        _ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::Testimonial(testimonial) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        Ok(Some(render_testimonial(testimonial)))
    }
}

fn render_testimonial(testimonial: &TestimonialSection) -> Node {
    let mut caption = Element::new("figcaption").child(
        Element::new("span")
            .class("testimonial-author")
            .text(&testimonial.author),
    );
    if let Some(locality) = &testimonial.locality {
        caption = caption.child(text(", ")).child(
            Element::new("span")
                .class("testimonial-locality")
                .text(locality),
        );
    }

    let rating = testimonial.rating.map(|stars| {
        Element::new("p")
            .class("rating")
            .attr("aria-label", format!("Rated {stars} out of 5"))
            .text("★".repeat(usize::from(stars)))
    });

    let figure = Element::new("figure")
        .class("testimonial")
        .child(Element::new("blockquote").child(Element::new("p").text(&testimonial.quote)))
        .child(caption)
        .maybe_child(rating);

    section_shell(SectionKind::Testimonial).child(figure).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_quote_author_and_rating() {
        let node = render_testimonial(&TestimonialSection {
            quote: "I actually look forward to check-ups now.".into(),
            author: "Helen".into(),
            locality: Some("Arnold".into()),
            rating: Some(5),
        });
        let html = node.to_html();
        assert!(html.contains("<blockquote><p>I actually look forward to check-ups now.</p></blockquote>"));
        assert!(html.contains("<span class=\"testimonial-author\">Helen</span>, <span class=\"testimonial-locality\">Arnold</span>"));
        assert!(html.contains("aria-label=\"Rated 5 out of 5\">★★★★★</p>"));
    }

    #[test]
    fn rating_is_optional() {
        let node = render_testimonial(&TestimonialSection {
            quote: "Quick and kind.".into(),
            author: "Raj".into(),
            locality: None,
            rating: None,
        });
        assert!(node.find_by_class("rating").is_empty());
        assert!(node.find_by_class("testimonial-locality").is_empty());
    }
}
