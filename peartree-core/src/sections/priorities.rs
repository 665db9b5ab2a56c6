use crate::content::{PriorityListSection, SectionContent, SectionKind};
use crate::markup::{Element, Node};

use super::{RenderContext, RenderError, SectionRenderer, heading, optional_heading, section_shell};

pub struct PriorityListRenderer;

impl SectionRenderer for PriorityListRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::PriorityList
    }

    fn render(
        &self,
        section: &SectionContent,
        _ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::PriorityList(list) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        Ok(render_priorities(list))
    }
}

fn render_priorities(list: &PriorityListSection) -> Option<Node> {
    if list.items.is_empty() {
        return None;
    }

    let items = list.items.iter().map(|item| {
        Element::new("li")
            .class("priority-item")
            .child(heading("h3", &item.title))
            .child(Element::new("p").text(&item.body))
    });

    let node = section_shell(SectionKind::PriorityList)
        .maybe_child(optional_heading(list.heading.as_ref()))
        .child(Element::new("ol").class("priority-list").children(items));

    Some(node.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PriorityItem;

    #[test]
    fn renders_an_ordered_list() {
        let list = PriorityListSection {
            heading: Some("What we check first".into()),
            items: vec![
                PriorityItem {
                    title: "Pain".into(),
                    body: "We treat discomfort the same day.".into(),
                },
                PriorityItem {
                    title: "Gum health".into(),
                    body: "Before any cosmetic work.".into(),
                },
            ],
        };
        let node = render_priorities(&list).unwrap();
        assert_eq!(node.find_by_class("priority-item").len(), 2);
        assert!(node.to_html().contains("<ol class=\"priority-list\">"));
    }

    #[test]
    fn heading_alone_is_not_rendered() {
        let list = PriorityListSection {
            heading: Some("Nothing here".into()),
            items: Vec::new(),
        };
        assert!(render_priorities(&list).is_none());
    }
}
