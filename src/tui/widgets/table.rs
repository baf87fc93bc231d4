//! Table widget: renders a [`TableView`] with sort indicators, selection
//! highlight and the pagination strip.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table};

use crate::table::{PagerView, TableView};

use super::Styles;

pub fn render_table(frame: &mut Frame, area: Rect, view: &TableView, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    // Body above, one-line pagination strip below.
    let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);

    let headers: Vec<Span> = view
        .headers
        .iter()
        .map(|h| {
            let indicator = match h.sort {
                Some(true) => "▲",
                Some(false) => "▼",
                None => "",
            };
            Span::styled(format!("{}{}", h.title, indicator), Styles::table_header())
        })
        .collect();
    let header = Row::new(headers).style(Styles::table_header()).height(1);

    let rows: Vec<Row> = view
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let style = if view.selected == Some(idx) {
                Styles::selected()
            } else {
                Styles::default()
            };
            Row::new(row.cells.iter().map(|c| Span::raw(c.clone())))
                .style(style)
                .height(1)
        })
        .collect();

    let mut constraints: Vec<Constraint> = view
        .headers
        .iter()
        .map(|h| Constraint::Length(h.width))
        .collect();
    constraints.push(Constraint::Fill(1));

    let table = Table::new(rows, constraints).header(header).column_spacing(1);
    frame.render_widget(table, chunks[0]);

    // Full-span placeholder under the headers instead of a silently empty
    // body.
    if let Some(placeholder) = &view.placeholder
        && chunks[0].height > 1
    {
        let body = Rect::new(
            chunks[0].x,
            chunks[0].y + 1,
            chunks[0].width,
            chunks[0].height - 1,
        );
        frame.render_widget(
            Paragraph::new(placeholder.as_str())
                .style(Styles::dim())
                .centered(),
            body,
        );
    }

    if let Some(pager) = &view.pager {
        frame.render_widget(Paragraph::new(pager_line(pager)).centered(), chunks[1]);
    }
}

/// `◀ prev  1 [2] 3 4 5  next ▶ — N matches`, edges dimmed when disabled.
fn pager_line(pager: &PagerView) -> Line<'static> {
    let mut spans = Vec::new();
    spans.push(Span::styled(
        "◀ prev ",
        if pager.prev_enabled {
            Styles::accent()
        } else {
            Styles::dim()
        },
    ));
    for page in &pager.window {
        if *page == pager.current {
            spans.push(Span::styled(format!(" [{}] ", page), Styles::active_tab()));
        } else {
            spans.push(Span::styled(format!(" {} ", page), Styles::default()));
        }
    }
    spans.push(Span::styled(
        " next ▶",
        if pager.next_enabled {
            Styles::accent()
        } else {
            Styles::dim()
        },
    ));
    spans.push(Span::styled(
        format!("  — {} matches", pager.matched),
        Styles::dim(),
    ));
    Line::from(spans)
}
