use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use std::time::Instant;
use crate::api::DashboardApi;
use crate::app::App;
use crate::models::StatusTone;
use crate::notify::ToastKind;
use crate::router::Route;
use crate::views::{DashboardView, FormField, LoadState, LoginField, LoginView, TradeForm};

pub fn ui<A: DashboardApi>(f: &mut Frame, app: &mut App<A>) {
    let user_name = app.session().user().map(|u| u.name).unwrap_or_default();
    match (app.route(), app.dashboard.as_ref()) {
        (Route::Dashboard, Some(view)) => render_dashboard(f, view, &user_name),
        _ => render_login(f, &app.login),
    }
    render_toasts(f, app);
}

pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Affirmative => Color::Green,
        StatusTone::Cautionary => Color::Yellow,
        StatusTone::Negative => Color::Red,
        StatusTone::Neutral => Color::Gray,
    }
}

fn focused(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn render_login(f: &mut Frame, view: &LoginView) {
    let area = centered_rect(50, 60, f.area());
    f.render_widget(Clear, area);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title("Welcome Back 👋")
        .title_alignment(Alignment::Center);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let subtitle = Paragraph::new("Login to Primetrade Dashboard")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[0]);

    let email = Paragraph::new(view.email.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Email")
            .border_style(focused(view.focus == LoginField::Email)),
    );
    f.render_widget(email, chunks[1]);

    let masked = "•".repeat(view.password.chars().count());
    let password = Paragraph::new(masked).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Password")
            .border_style(focused(view.focus == LoginField::Password)),
    );
    f.render_widget(password, chunks[2]);

    let label = if view.is_submitting() { "Logging in..." } else { "[ Login ]" };
    let button = Paragraph::new(label)
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(button, chunks[3]);

    let help = Paragraph::new("Tab: switch field  Enter: login  Esc: quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[4]);
}

fn render_dashboard(f: &mut Frame, view: &DashboardView, user_name: &str) {
    if view.load_state == LoadState::Loading {
        render_loading(f, f.area());
        return;
    }

    let banner_height = if view.last_error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Length(4),
            Constraint::Length(12),
            Constraint::Length(3),
            Constraint::Min(5),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("Welcome, {}!", user_name),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "   a: add  e: edit  d: delete  /: search  s: status  f: filter  l: logout  q: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Primetrade"));
    f.render_widget(header, chunks[0]);

    if let Some(error) = &view.last_error {
        let banner = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Error"));
        f.render_widget(banner, chunks[1]);
    }

    render_stats(f, chunks[2], view);
    render_revenue(f, chunks[3], view);
    render_filters(f, chunks[4], view);
    render_trades(f, chunks[5], view);

    if let Some(form) = &view.modal {
        render_modal(f, form);
    }
    if let Some(id) = &view.pending_delete {
        render_confirm(f, id);
    }
}

fn render_loading(f: &mut Frame, area: Rect) {
    let loading_text = Paragraph::new("Loading Dashboard...")
        .block(Block::default().borders(Borders::ALL).title("Loading"))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);

    f.render_widget(loading_text, area);
}

fn render_stats(f: &mut Frame, area: Rect, view: &DashboardView) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let stats = view.stats.clone().unwrap_or_default();
    let values = [
        ("Total Users", stats.total_users.to_string()),
        ("Total Trades", stats.total_trades.to_string()),
        ("Revenue", format!("${}", stats.total_revenue)),
    ];
    for ((label, value), card) in values.iter().zip(cards.iter()) {
        let text = Paragraph::new(Span::styled(
            value.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(Block::default().borders(Borders::ALL).title(*label));
        f.render_widget(text, *card);
    }
}

fn render_revenue(f: &mut Frame, area: Rect, view: &DashboardView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let data: Vec<(&str, u64)> = view
        .revenue
        .iter()
        .map(|p| (p.month.as_str(), p.revenue.max(0.0).round() as u64))
        .collect();
    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Revenue Trend"))
        .data(data.as_slice())
        .bar_width(7)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Indexed(99)))
        .value_style(Style::default().fg(Color::Black).bg(Color::Indexed(99)));
    f.render_widget(chart, chunks[0]);

    let mut spans = Vec::new();
    for indicator in view.revenue_indicators() {
        let color = if indicator.is_up() { Color::Green } else { Color::Red };
        spans.push(Span::styled(indicator.to_string(), Style::default().fg(color)));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}

fn render_filters(f: &mut Frame, area: Rect, view: &DashboardView) {
    let status = view
        .status_filter
        .as_ref()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "All Status".to_string());
    let search = if view.search.is_empty() && !view.editing_search {
        "Search pair...".to_string()
    } else {
        view.search.clone()
    };
    let line = Line::from(vec![
        Span::styled(format!("Search: {}", search), focused(view.editing_search)),
        Span::raw("   "),
        Span::raw(format!("Status: {}", status)),
    ]);
    let filters = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Filter"));
    f.render_widget(filters, area);
}

fn render_trades(f: &mut Frame, area: Rect, view: &DashboardView) {
    let header = Row::new(vec!["Pair", "Type", "Amount", "Status"])
        .style(Style::default().fg(Color::Black).bg(Color::Gray).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = view
        .trades
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(t.pair.clone()),
                Cell::from(t.trade_type.to_string()),
                Cell::from(t.amount.to_string()),
                Cell::from(Span::styled(
                    format!(" {} ", t.status),
                    Style::default().fg(Color::Black).bg(tone_color(t.status.tone())),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Trades"))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");

    let mut state = TableState::default();
    if !view.trades.is_empty() {
        state.select(Some(view.selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn render_modal(f: &mut Frame, form: &TradeForm) {
    let area = centered_rect(50, 50, f.area());
    f.render_widget(Clear, area);

    let field = |label: &str, value: String, which: FormField| {
        let marker = if form.focus == which { "> " } else { "  " };
        Line::from(vec![
            Span::styled(format!("{}{:<8}", marker, label), focused(form.focus == which)),
            Span::raw(value),
        ])
    };
    let text = Text::from(vec![
        field("Pair", form.pair.clone(), FormField::Pair),
        field("Amount", form.amount.clone(), FormField::Amount),
        field("Type", format!("< {} >", form.trade_type), FormField::Type),
        field("Status", format!("< {} >", form.status), FormField::Status),
        Line::from(""),
        Line::styled(
            "Tab: next field  ←/→: change  Enter: save  Esc: cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let modal = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(form.title()))
        .wrap(Wrap { trim: false });
    f.render_widget(modal, area);
}

fn render_confirm(f: &mut Frame, id: &str) {
    let area = centered_rect(40, 20, f.area());
    f.render_widget(Clear, area);
    let prompt = Paragraph::new(format!("Delete this trade? ({})\n\ny: yes   n: no", id))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm")
                .style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, area);
}

fn render_toasts<A: DashboardApi>(f: &mut Frame, app: &mut App<A>) {
    let area = f.area();
    let width = area.width.min(40);
    let mut y = area.y + 1;
    for toast in app.toasts.active(Instant::now()) {
        if y + 3 > area.bottom() {
            break;
        }
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
            ToastKind::Info => Color::Blue,
        };
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(toast.message.as_str())
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color))),
            rect,
        );
        y += 3;
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
