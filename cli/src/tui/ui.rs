use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, Tabs},
    Frame,
};
use tracker_core::service::aggregator::monthly_payroll;
use unicode_width::UnicodeWidthStr;

use crate::report::money;
use crate::tui::app::{App, DailyRow, InputMode, Tab};

fn rounded(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Tabs + date
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input / status
            Constraint::Length(1), // Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    match app.tab {
        Tab::Daily => draw_daily(f, app, main_chunks[1]),
        Tab::Staff => draw_staff(f, app, main_chunks[1]),
        Tab::Items => draw_items(f, app, main_chunks[1]),
    }

    draw_input_bar(f, app, main_chunks[2]);

    let help = match app.input_mode {
        InputMode::Normal => match app.tab {
            Tab::Daily => "tab: Switch | h/l: Day | j/k: Navigate | space: Attendance | +/-: Quantity | s: Save | q: Quit",
            Tab::Staff => "tab: Switch | j/k: Navigate | space: Attendance | a: Add | m: Modify | d: Delete | q: Quit",
            Tab::Items => "tab: Switch | j/k: Navigate | +/-: Quantity | a: Add | m: Modify | d: Delete | q: Quit",
        },
        _ => "enter: Submit | esc: Cancel",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(area);

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(rounded(" Staff & Item Tracker "))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, chunks[0]);

    let date = Paragraph::new(Line::from(vec![
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.date.format("%d %b %Y").to_string(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(" >", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center)
    .block(rounded(""));
    f.render_widget(date, chunks[1]);
}

fn draw_daily(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let roster = &app.workspace.roster;
    let mut rows = Vec::new();
    for index in 0..(roster.staff.len() + roster.items.len()) {
        let row = match app.daily_row(index) {
            Some(DailyRow::Staff(i)) => {
                let s = &roster.staff[i];
                let name = if s.shifts.count() > 1 { format!("{} ×{}", s.name, s.shifts) } else { s.name.clone() };
                let (label, color) = if s.present { ("Present", Color::Green) } else { ("Absent", Color::Red) };
                Row::new(vec![
                    Span::raw(name),
                    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                ])
            }
            Some(DailyRow::Item(i)) => {
                let item = &roster.items[i];
                Row::new(vec![
                    Span::raw(format!("{} ({}/{})", item.name, money(item.price), item.unit)),
                    Span::styled(format!("{} {}", item.quantity, item.unit), Style::default().fg(Color::Yellow)),
                ])
            }
            None => continue,
        };
        rows.push(row);
    }

    let table = Table::new(rows, [Constraint::Min(16), Constraint::Length(16)])
        .header(Row::new(vec!["Attendance / Items", "Today"]).style(Style::default().fg(Color::Yellow)))
        .block(rounded(" Today "))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.state);

    draw_summary(f, app, chunks[1]);
}

fn draw_summary(f: &mut Frame, app: &App, area: Rect) {
    let roster = &app.workspace.roster;
    let report = &app.report;
    let label = Style::default().fg(Color::Blue);
    let staff_cost = roster.daily_staff_cost();
    let items_cost = roster.daily_items_cost();

    let mut lines = vec![
        Line::from(Span::styled("Today's Summary", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![Span::styled("Staff Salaries: ", label), Span::raw(money(staff_cost))]),
        Line::from(vec![Span::styled("Items Cost:     ", label), Span::raw(money(items_cost))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Month-to-Date ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(report.period_label(), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("  {} days recorded", report.summary.days_recorded), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    for line in &report.staff {
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ({} days) ", line.name, line.present_days)),
            Span::raw(money(line.cost)),
        ]));
    }
    lines.push(Line::from(vec![Span::styled("Total Staff: ", label), Span::raw(money(report.summary.staff_cost))]));

    for line in &report.items {
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ({} {}) ", line.name, line.quantity, line.unit)),
            Span::raw(money(line.cost)),
        ]));
    }
    lines.push(Line::from(vec![Span::styled("Total Items: ", label), Span::raw(money(report.summary.items_cost))]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Grand Total: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(money(report.grand_total()), Style::default().add_modifier(Modifier::BOLD)),
    ]));

    f.render_widget(Paragraph::new(lines).block(rounded(" Summary ")), area);
}

fn draw_staff(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let rows: Vec<Row> = app.workspace.roster.staff.iter().map(|s| {
        Row::new(vec![
            Span::raw(s.id.to_string()),
            Span::styled(s.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(money(s.salary)),
            Span::raw(format!("{} shift{}", s.shifts, if s.shifts.count() > 1 { "s" } else { "" })),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),  // ID
            Constraint::Min(10),    // Name
            Constraint::Length(12), // Salary
            Constraint::Length(9),  // Shifts
        ],
    )
    .header(Row::new(vec!["ID", "Name", "Salary", "Shifts"]).style(Style::default().fg(Color::Yellow)))
    .block(rounded(" Staff "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[0], &mut app.state);

    // Salary calculator
    let staff = &app.workspace.roster.staff;
    let mut lines: Vec<Line> = staff
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::raw(format!("{}: {} × {} = ", s.name, money(s.salary), s.shifts)),
                Span::styled(money(s.salary * s.shifts.multiplier()), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total: ", Style::default().fg(Color::Cyan)),
        Span::styled(money(monthly_payroll(staff)), Style::default().add_modifier(Modifier::BOLD)),
    ]));
    f.render_widget(Paragraph::new(lines).block(rounded(" Salary Calculator ")), chunks[1]);
}

fn draw_items(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app.workspace.roster.items.iter().map(|i| {
        Row::new(vec![
            Span::raw(i.id.to_string()),
            Span::styled(i.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}/{}", money(i.price), i.unit)),
            Span::raw(i.quantity.to_string()),
            Span::raw(money(i.cost())),
        ])
    }).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),  // ID
            Constraint::Min(10),    // Name
            Constraint::Length(18), // Price
            Constraint::Length(7),  // Today
            Constraint::Length(12), // Cost
        ],
    )
    .header(Row::new(vec!["ID", "Name", "Price", "Today", "Cost"]).style(Style::default().fg(Color::Yellow)))
    .block(rounded(" Items "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_input_bar(f: &mut Frame, app: &App, area: Rect) {
    let (title, text) = match app.input_mode {
        InputMode::Adding => match app.tab {
            Tab::Staff => (" Add staff: Name salary:5000 shifts:1 ", app.input.as_str()),
            _ => (" Add item: Name price:20 unit:bottles ", app.input.as_str()),
        },
        InputMode::Modifying => match app.tab {
            Tab::Staff => (" Modify staff: salary:5000 shifts:2 ", app.input.as_str()),
            _ => (" Modify item: price:20 unit:bottles quantity:3 ", app.input.as_str()),
        },
        InputMode::Normal => (" Status ", app.status.as_deref().unwrap_or("")),
    };

    let data_dir = format!(" {} ", app.workspace.data_dir.display());
    let block = rounded(title).title_bottom(Line::from(data_dir).right_aligned());
    f.render_widget(Paragraph::new(text).block(block), area);

    if !matches!(app.input_mode, InputMode::Normal) {
        let width = app.input[..app.byte_index()].width() as u16;
        f.set_cursor_position((area.x + 1 + width, area.y + 1));
    }
}
