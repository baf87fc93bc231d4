//! Reports view: sales, expense and best-seller aggregates as summary
//! lines.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::fmt::format_money;
use crate::tui::state::ReportsData;

use super::Styles;

pub fn render_reports(frame: &mut Frame, area: Rect, reports: Option<&ReportsData>, loading: bool) {
    let block = Block::default()
        .title(" Reports ")
        .borders(Borders::ALL)
        .style(Styles::default());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(data) = reports else {
        let message = if loading { "Loading…" } else { "No data available" };
        frame.render_widget(
            Paragraph::new(message).style(Styles::dim()).centered(),
            inner,
        );
        return;
    };

    let chunks = Layout::horizontal([
        Constraint::Percentage(34),
        Constraint::Percentage(33),
        Constraint::Percentage(33),
    ])
    .split(inner);

    let sales = &data.sales;
    let sales_lines = vec![
        section_title("Sales"),
        stat("revenue (completed)", format_money(sales.total_cents)),
        stat("sales", sales.count.to_string()),
        stat("completed", sales.completed.to_string()),
        stat("pending", sales.pending.to_string()),
        stat("cancelled", sales.cancelled.to_string()),
    ];
    frame.render_widget(Paragraph::new(sales_lines), chunks[0]);

    let mut expense_lines = vec![
        section_title("Expenses"),
        stat("total", format_money(data.expenses.total_cents)),
    ];
    for (category, cents) in &data.expenses.by_category {
        expense_lines.push(stat(category, format_money(*cents)));
    }
    frame.render_widget(Paragraph::new(expense_lines), chunks[1]);

    let mut top_lines = vec![section_title("Best sellers")];
    if data.top_products.is_empty() {
        top_lines.push(Line::from(Span::styled("no completed sales", Styles::dim())));
    }
    for product in &data.top_products {
        top_lines.push(stat(
            &product.name,
            format!("{} sold, {}", product.quantity, format_money(product.revenue_cents)),
        ));
    }
    frame.render_widget(Paragraph::new(top_lines), chunks[2]);
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Styles::table_header(),
    ))
}

fn stat(label: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<22}", label.to_string()), Styles::dim()),
        Span::styled(value.into(), Styles::default()),
    ])
}
