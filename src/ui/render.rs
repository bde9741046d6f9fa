use crate::terminal::CursorPos;
use crate::ui::span::{Span, SpanLine};
use crate::ui::style::{Color, Style};
use crate::widget::container::ResultsContainer;
use crate::widget::element::{InputElement, SearchField};
use unicode_width::UnicodeWidthStr;

const ACTIVE_MARKER: &str = "> ";
const INACTIVE_MARKER: &str = "  ";
const HINT: &str = "up/down: navigate  click: select  enter: submit  esc: cancel";

#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub lines: Vec<SpanLine>,
    pub cursor: Option<CursorPos>,
    first_item_row: u16,
    item_count: usize,
}

impl RenderFrame {
    /// Index of the suggestion item drawn on screen row `row`, if any.
    pub fn item_at_row(&self, row: u16) -> Option<usize> {
        let offset = row.checked_sub(self.first_item_row)? as usize;
        (offset < self.item_count).then_some(offset)
    }
}

/// Draws the input line followed by the results container.
pub fn render(
    prompt: &str,
    element: &InputElement,
    container: &ResultsContainer,
    loading: bool,
) -> RenderFrame {
    let mut lines = Vec::<SpanLine>::new();

    let mut input_line = vec![
        Span::styled(prompt, Style::new().color(Color::Green).bold()),
        Span::new(element.value()),
    ];
    if loading {
        input_line.push(Span::styled(" ...", Style::new().color(Color::DarkGrey)));
    }
    lines.push(input_line);

    let caret_prefix: String = element
        .value()
        .chars()
        .take(element.caret())
        .collect();
    let cursor = CursorPos {
        col: (UnicodeWidthStr::width(prompt) + UnicodeWidthStr::width(caret_prefix.as_str()))
            .min(u16::MAX as usize) as u16,
        row: 0,
    };

    if let Some(heading) = container.markup().heading.as_deref() {
        lines.push(vec![Span::styled(
            heading,
            Style::new().color(Color::DarkGrey),
        )]);
    }

    let first_item_row = lines.len() as u16;
    for item in container.items() {
        if item.active {
            lines.push(vec![
                Span::styled(ACTIVE_MARKER, Style::new().color(Color::Cyan)),
                Span::styled(item.label.as_str(), Style::new().color(Color::Cyan).bold()),
            ]);
        } else {
            lines.push(vec![Span::new(INACTIVE_MARKER), Span::new(item.label.as_str())]);
        }
    }

    lines.push(vec![Span::styled(HINT, Style::new().color(Color::DarkGrey))]);

    RenderFrame {
        lines,
        cursor: Some(cursor),
        first_item_row,
        item_count: container.items().len(),
    }
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::core::markup::{Markup, MarkupItem};
    use crate::ui::span::line_text;
    use crate::widget::container::ResultsContainer;
    use crate::widget::element::InputElement;

    fn container(heading: Option<&str>) -> ResultsContainer {
        let mut markup = Markup::with_items(vec![
            MarkupItem::new("rust", "Rust"),
            MarkupItem::new("ruby", "Ruby"),
        ]);
        if let Some(heading) = heading {
            markup = markup.with_heading(heading);
        }
        let mut container = ResultsContainer::new();
        container.replace(markup);
        container.set_active(Some(1));
        container
    }

    #[test]
    fn draws_input_items_and_active_marker() {
        let element = InputElement::new("q").with_value("ru");
        let frame = render("Search: ", &element, &container(None), false);

        let text = frame.lines.iter().map(line_text).collect::<Vec<_>>();
        assert_eq!(text[0], "Search: ru");
        assert_eq!(text[1], "  Rust");
        assert_eq!(text[2], "> Ruby");
        assert_eq!(frame.cursor.map(|c| (c.col, c.row)), Some((10, 0)));
    }

    #[test]
    fn rows_map_back_to_items_below_heading() {
        let element = InputElement::new("q").with_value("ru");
        let frame = render("> ", &element, &container(Some("Suggestions")), true);

        assert!(line_text(&frame.lines[0]).ends_with(" ..."));
        assert_eq!(frame.item_at_row(0), None);
        assert_eq!(frame.item_at_row(1), None);
        assert_eq!(frame.item_at_row(2), Some(0));
        assert_eq!(frame.item_at_row(3), Some(1));
        assert_eq!(frame.item_at_row(4), None);
    }
}
