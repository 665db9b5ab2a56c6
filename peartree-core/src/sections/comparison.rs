use crate::content::{ComparisonTableSection, SectionContent, SectionKind};
use crate::markup::{Element, Node};

use super::{RenderContext, RenderError, SectionRenderer, optional_heading, section_shell};

pub struct ComparisonTableRenderer;

impl SectionRenderer for ComparisonTableRenderer {
    fn kind(&self) -> SectionKind {
        SectionKind::ComparisonTable
    }

    fn render(
        &self,
        section: &SectionContent,
        _ctx: &RenderContext<'_>,
    ) -> Result<Option<Node>, RenderError> {
        let SectionContent::ComparisonTable(table) = section else {
            return Err(RenderError::unexpected(self.kind(), section));
        };
        Ok(render_comparison(table))
    }
}

fn render_comparison(table: &ComparisonTableSection) -> Option<Node> {
    if table.rows.is_empty() {
        return None;
    }

    let header = Element::new("tr")
        .child(Element::new("th").attr("scope", "col").text("Factor"))
        .children(
            table
                .options
                .iter()
                .map(|option| Element::new("th").attr("scope", "col").text(option)),
        );

    let rows = table.rows.iter().map(|row| {
        let cells = table.options.iter().zip(&row.values).map(|(option, value)| {
            let cell = Element::new("td").attr("data-option", option);
            if row.is_winner(option) {
                cell.class("is-winner").text(value)
            } else {
                cell.text(value)
            }
        });
        Element::new("tr")
            .child(Element::new("th").attr("scope", "row").text(&row.factor))
            .children(cells)
    });

    let node = section_shell(SectionKind::ComparisonTable)
        .maybe_child(optional_heading(table.heading.as_ref()))
        .child(
            Element::new("table")
                .class("comparison-table")
                .child(Element::new("thead").child(header))
                .child(Element::new("tbody").children(rows)),
        );

    Some(node.into())
}
