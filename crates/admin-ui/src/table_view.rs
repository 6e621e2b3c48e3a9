//! Sortable, searchable resource table.
//!
//! Renders a [`TableView`] as a search line above a bordered
//! [`ratatui::widgets::Table`]. Column headers carry their number key and a
//! sort indicator; an empty derived list renders an explicit placeholder.

use admin_core::table::{SortKey, TableView};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::themes::Theme;

pub const NOTHING_FOUND: &str = "Nothing found";

/// Indicator for `key`: `↕` unsorted, `▼` ascending, `▲` descending.
pub fn sort_indicator(view: &TableView, key: SortKey) -> &'static str {
    match view.sort_key() {
        Some(k) if k == key && view.sort_reversed() => "▲",
        Some(k) if k == key => "▼",
        _ => "↕",
    }
}

/// Header text for `key`, e.g. `"1 Name ▼"`.
pub fn header_label(view: &TableView, key: SortKey, number: usize) -> String {
    format!("{number} {} {}", key.label(), sort_indicator(view, key))
}

fn search_line<'a>(view: &TableView, focused: bool, theme: &Theme) -> Line<'a> {
    let style = if focused {
        theme.input_focused
    } else {
        theme.input
    };
    let mut spans = vec![
        Span::styled("Search: ", theme.label),
        Span::styled(view.filter_text().to_string(), style),
    ];
    if focused {
        spans.push(Span::styled("_", theme.dim));
    } else if view.filter_text().is_empty() {
        spans.push(Span::styled("press / to search", theme.dim));
    }
    spans.push(Span::styled(
        format!("   {} of {}", view.rows().len(), view.source().len()),
        theme.dim,
    ));
    Line::from(spans)
}

/// Render the search line plus either the table or the empty placeholder.
pub fn render_table_page(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    view: &TableView,
    search_focused: bool,
    theme: &Theme,
) {
    let [search_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(search_line(view, search_focused, theme)),
        search_area,
    );

    if view.is_empty() {
        render_no_data(frame, body, title, theme);
    } else {
        render_table_view(frame, body, title, view, theme);
    }
}

/// Render the derived rows with the selected row highlighted.
pub fn render_table_view(frame: &mut Frame, area: Rect, title: &str, view: &TableView, theme: &Theme) {
    let header_cells = SortKey::ALL.iter().enumerate().map(|(i, key)| {
        let style = if view.sort_key() == Some(*key) {
            theme.table_header_sorted
        } else {
            theme.table_header
        };
        Cell::from(header_label(view, *key, i + 1)).style(style)
    });
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = view
        .rows()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Row::new(
                record
                    .fields()
                    .into_iter()
                    .map(|f| Cell::from(f.to_string()))
                    .collect::<Vec<_>>(),
            )
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Percentage(20),
        Constraint::Percentage(14),
        Constraint::Percentage(16),
        Constraint::Percentage(16),
        Constraint::Percentage(20),
        Constraint::Percentage(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {title} ")),
        )
        .style(theme.text)
        .row_highlight_style(theme.table_selected);

    let mut state = TableState::default().with_selected(Some(view.selected()));
    frame.render_stateful_widget(table, area, &mut state);
}

/// Placeholder for an empty derived list.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(NOTHING_FOUND, theme.info)),
        Line::from(""),
        Line::from(Span::styled(
            "Clear the search or press 'r' to reload.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" {title} ")),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use admin_core::table::TableRecord;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn record(id: i64, name: &str, username: &str) -> TableRecord {
        TableRecord {
            id,
            name: name.to_string(),
            username: username.to_string(),
            role: "Formator".to_string(),
            stage: "Novitiate".to_string(),
            location: "Recife".to_string(),
            duration: "N/A".to_string(),
        }
    }

    fn make_view() -> TableView {
        TableView::new(vec![
            record(1, "Bia", "bia"),
            record(2, "Ana", "ana"),
            record(3, "Carla", "carla"),
        ])
    }

    fn draw(view: &TableView, search_focused: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                render_table_page(frame, frame.area(), "Users", view, search_focused, &theme)
            })
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    // ── Indicators ────────────────────────────────────────────────────────────

    #[test]
    fn test_sort_indicator_states() {
        let mut view = make_view();
        assert_eq!(sort_indicator(&view, SortKey::Name), "↕");

        view.toggle_sort(SortKey::Name);
        assert_eq!(sort_indicator(&view, SortKey::Name), "▼");
        assert_eq!(sort_indicator(&view, SortKey::Role), "↕");

        view.toggle_sort(SortKey::Name);
        assert_eq!(sort_indicator(&view, SortKey::Name), "▲");
    }

    #[test]
    fn test_header_label() {
        let view = make_view();
        assert_eq!(header_label(&view, SortKey::Duration, 6), "6 Time ↕");
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_sorted_rows_in_order() {
        let mut view = make_view();
        view.toggle_sort(SortKey::Name);
        let out = draw(&view, false);

        let ana = out.find("Ana").unwrap();
        let bia = out.find("Bia").unwrap();
        let carla = out.find("Carla").unwrap();
        assert!(ana < bia && bia < carla);
        assert!(out.contains("1 Name ▼"));
        assert!(out.contains("3 of 3"));
    }

    #[test]
    fn test_render_empty_filter_result_shows_placeholder() {
        let mut view = make_view();
        view.set_filter("zzz");
        let out = draw(&view, true);

        assert!(out.contains(NOTHING_FOUND));
        assert!(out.contains("Search: zzz_"));
        assert!(out.contains("0 of 3"));
    }

    #[test]
    fn test_render_no_source_shows_placeholder() {
        let view = TableView::default();
        let out = draw(&view, false);
        assert!(out.contains(NOTHING_FOUND));
        assert!(out.contains("press / to search"));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(8, 2)).unwrap();
        let theme = Theme::light();
        let view = make_view();
        terminal
            .draw(|frame| render_table_page(frame, frame.area(), "Roles", &view, false, &theme))
            .unwrap();
    }
}
