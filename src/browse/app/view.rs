use super::super::Focus;
use super::{App, FilterField, FILTER_FIELDS};
use crate::catalog::Item;
use crate::controls::FilterControls;
use crate::query::QueryPhase;
use crate::render::{Cell, Column, RecommendationCard, COLUMNS, NO_VALUE};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell as TableCell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
    TableState, Wrap,
};
use ratatui::Frame;

const FILTER_PANE_WIDTH: u16 = 30;
const RECOMMENDATION_PANE_HEIGHT: u16 = 9;

impl App {
    pub(in crate::browse) fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(1),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(FILTER_PANE_WIDTH), Constraint::Min(20)])
            .split(layout[1]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(4),
                Constraint::Length(RECOMMENDATION_PANE_HEIGHT),
            ])
            .split(body[1]);

        self.draw_search(frame, layout[0]);
        self.draw_filters(frame, body[0]);
        self.draw_results(frame, right[0]);
        self.draw_recommendations(frame, right[1]);
        self.draw_footer(frame, layout[2]);

        if self.focus == Focus::Search && !self.suggestions.is_empty() {
            self.draw_suggestions(frame, layout[0]);
        }
        if self.show_help {
            self.draw_help(frame);
        }
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Search;
        let mut spans = vec![Span::raw(self.controller().text().to_string())];
        if focused {
            spans.push(Span::styled(
                "_",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        let title = format!(
            "Search ({} items in catalog)",
            self.controller().catalog().len()
        );
        let paragraph = Paragraph::new(Line::from(spans)).block(pane_block(title, focused));
        frame.render_widget(paragraph, area);
    }

    fn draw_suggestions(&self, frame: &mut Frame, anchor: Rect) {
        let screen = frame.area();
        let top = anchor.y + anchor.height;
        let height = (self.suggestions.len() as u16 + 2).min(screen.height.saturating_sub(top));
        if height < 3 {
            return;
        }
        let width = anchor.width.saturating_sub(2).min(60);
        let area = Rect::new(anchor.x + 1, top, width, height);
        let items = self
            .suggestions
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::raw(entry.name.clone()),
                    Span::styled(
                        format!("  {}", entry.company),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Suggestions"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(self.suggestion_cursor);
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_filters(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Filters;
        let controls = self.controller().controls();
        let items = FILTER_FIELDS
            .iter()
            .map(|field| {
                let (label, value) = filter_field_text(*field, controls);
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{label:<13}"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(value),
                ]))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(pane_block("Filters".to_string(), focused))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if focused {
            state.select(Some(self.selection[Focus::Filters.index()]));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_results(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Results;
        let header = Row::new(COLUMNS.iter().map(|column| column.header())).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .table
            .rows()
            .iter()
            .map(|row| Row::new(row.cells.iter().map(table_cell)));
        let widths = COLUMNS.iter().map(|column| column_width(*column));
        let title = format!("Results ({})", self.table.rows().len());
        let mut block = pane_block(title, focused);
        let selected = self.selection[Focus::Results.index()];
        if let Some(item) = self.controller().results().get(selected).filter(|_| focused) {
            block = block.title_bottom(item_detail(item));
        }
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = TableState::default();
        if focused && !self.table.rows().is_empty() {
            state.select(Some(self.selection[Focus::Results.index()]));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_recommendations(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Recommendations;
        let pending = self.controller().pending_lookup();
        let title = recommendation_title(self.controller().recommendation_base(), pending);
        if self.cards.is_empty() {
            let paragraph = Paragraph::new("(none)")
                .style(Style::default().fg(Color::DarkGray))
                .block(pane_block(title, focused));
            frame.render_widget(paragraph, area);
            return;
        }
        let items = self.cards.iter().map(card_item).collect::<Vec<_>>();
        let mut list = List::new(items).block(pane_block(title, focused));
        if self.controller().phase() == QueryPhase::Querying {
            list = list.style(Style::default().add_modifier(Modifier::DIM));
        }
        let list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        if focused {
            state.select(Some(self.selection[Focus::Recommendations.index()]));
        }
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let message = self.message.clone().unwrap_or_else(|| {
            let keys = match self.focus {
                Focus::Search => "type to search | down into suggestions | enter search | esc close list",
                Focus::Filters => {
                    "up/down field | left/right cycle | digits edit range | x reset | enter search"
                }
                Focus::Results | Focus::Recommendations => "up/down move | enter search this item",
            };
            format!("[{}] {keys} | tab focus | esc quit | F1 help", self.focus.label())
        });
        let paragraph =
            Paragraph::new(message).style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_widget(paragraph, area);
    }

    fn draw_help(&self, frame: &mut Frame) {
        let area = centered_rect(70, 70, frame.area());
        let lines = vec![
            Line::from("Keys:"),
            Line::from("  Esc: close help or suggestions, otherwise quit"),
            Line::from("  Ctrl+C: quit"),
            Line::from("  Tab / Shift+Tab: move focus between panes"),
            Line::from("  Up/Down, PageUp/PageDown: move selection"),
            Line::from("  Enter: search the typed text, or the highlighted item"),
            Line::from("  Left/Right (filters): cycle restaurant, category or seal"),
            Line::from("  0-9 . - Backspace (filters): edit a range bound"),
            Line::from("  x (filters): reset all filters"),
            Line::from("  q (outside search): quit"),
            Line::from("  F1: toggle help"),
            Line::from(""),
            Line::from("Filter changes apply on the next search."),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: true });
        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn filter_field_text(field: FilterField, controls: &FilterControls) -> (String, String) {
    let bound = |text: &str| {
        if text.is_empty() {
            "-".to_string()
        } else {
            text.to_string()
        }
    };
    match field {
        FilterField::Restaurant => (
            "Restaurant".to_string(),
            controls.restaurant.clone().unwrap_or_else(|| "all".to_string()),
        ),
        FilterField::Category => (
            "Category".to_string(),
            controls.category.clone().unwrap_or_else(|| "all".to_string()),
        ),
        FilterField::Seal => ("Seal".to_string(), controls.seal.label().to_string()),
        FilterField::Min(nutrient) => (
            format!("{} min", nutrient.label()),
            bound(&controls.range_input(nutrient).min),
        ),
        FilterField::Max(nutrient) => (
            format!("{} max", nutrient.label()),
            bound(&controls.range_input(nutrient).max),
        ),
    }
}

/// Title of the recommendation pane. The base stays on the cards shown
/// until the pending lookup lands.
fn recommendation_title(base: Option<&str>, pending: Option<&str>) -> String {
    let mut title = match base {
        Some(base) => format!("Recommendations for {base}"),
        None => "Recommendations".to_string(),
    };
    if let Some(pending) = pending {
        title.push_str(&format!(" (loading {pending})"));
    }
    title
}

/// Footer of the results pane for the highlighted item.
fn item_detail(item: &Item) -> String {
    let state = item.state.as_deref().unwrap_or(NO_VALUE);
    let mut detail = format!(" {} | state: {state}", item.name);
    if let Some(uri) = item.uri.as_deref() {
        detail.push_str(&format!(" | {uri}"));
    }
    detail.push(' ');
    detail
}

fn table_cell(cell: &Cell) -> TableCell<'static> {
    match cell {
        Cell::Text(text) => TableCell::from(text.clone()),
        Cell::Missing => {
            TableCell::from(NO_VALUE).style(Style::default().fg(Color::DarkGray))
        }
        Cell::Badges(badges) => {
            let mut spans = Vec::new();
            for badge in badges {
                if !spans.is_empty() {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(
                    badge.clone(),
                    Style::default().fg(Color::Black).bg(Color::Yellow),
                ));
            }
            TableCell::from(Line::from(spans))
        }
    }
}

fn column_width(column: Column) -> Constraint {
    match column {
        Column::Company => Constraint::Length(14),
        Column::Name => Constraint::Min(18),
        Column::Category => Constraint::Length(12),
        Column::Seals => Constraint::Min(12),
        _ => Constraint::Length(8),
    }
}

fn card_item(card: &RecommendationCard) -> ListItem<'static> {
    let mut spans = vec![
        Span::styled(
            card.name.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({})", card.company)),
    ];
    for badge in &card.badges {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{}: {}", badge.label, badge.value),
            Style::default().fg(Color::Yellow),
        ));
    }
    if !card.seals.is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", card.seals.join("] [")),
            Style::default().fg(Color::Red),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
