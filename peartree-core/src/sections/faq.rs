use crate::content::FaqEntry;
use crate::markup::{Element, Node};

use super::heading;

pub const FAQ_HEADING: &str = "Frequently asked questions";

/// The FAQ accordion. Reads the page's FAQ list directly, the same list the
/// structured data is built from. No FAQs, no section.
pub fn render_faqs(faqs: &[FaqEntry]) -> Option<Node> {
    if faqs.is_empty() {
        return None;
    }

    let items = faqs.iter().map(|faq| {
        Element::new("details")
            .class("faq-item")
            .child(Element::new("summary").class("faq-question").text(&faq.question))
            .child(
                Element::new("div")
                    .class("faq-answer")
                    .child(Element::new("p").text(&faq.answer)),
            )
    });

    let node = Element::new("section")
        .class("section section-faq")
        .attr("id", "faq")
        .child(heading("h2", FAQ_HEADING))
        .child(Element::new("div").class("faq-accordion").children(items));

    Some(node.into())
}
