use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::domain::ScreenState;
use crate::tui::app::TuiApp;
use crate::tui::rows::{HeadlineRow, RowLayout};
use crate::tui::thumbnail::Thumbnail;
use crate::viewer::ViewerStatus;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub const ERROR_MESSAGE: &str = "Something went wrong.";
pub const NOTICE_TITLE: &str = "ERROR!";

pub fn render(frame: &mut Frame, app: &TuiApp, config: &Config) {
    let [body, status] = split(frame.area());
    let colors = &config.colors;

    let block = Block::bordered()
        .title(list_title(app))
        .border_style(Style::default().fg(colors.active_border));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    match app.screen.state() {
        ScreenState::Loading => render_loading(frame, app, colors, inner),
        ScreenState::Error(_) => render_error(frame, config, inner),
        ScreenState::Content(_) => render_list(frame, app, colors, inner),
    }

    render_status_bar(frame, app, config, status);

    if let Some(notice) = app.screen.notice() {
        render_notice(frame, notice, colors);
    }
}

/// The area headline rows are drawn into for a terminal of size `area`.
pub fn list_viewport(area: Rect) -> Rect {
    let [body, _] = split(area);
    Block::bordered().inner(body)
}

fn split(area: Rect) -> [Rect; 2] {
    Layout::vertical([
        Constraint::Min(3),    // Headlines
        Constraint::Length(1), // Status bar
    ])
    .areas(area)
}

fn list_title(app: &TuiApp) -> String {
    match app.screen.state().response() {
        Some(response) => format!(
            " Top Headlines ({}) · {} ",
            response.len(),
            response
                .fetched_at
                .with_timezone(&chrono::Local)
                .format("%H:%M")
        ),
        None => " Top Headlines ".to_string(),
    }
}

fn render_loading(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    let spinner = SPINNER[app.spinner % SPINNER.len()];
    let text = format!("{} Loading top headlines...", spinner);
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(colors.description))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, vertically_centered(area, 1));
}

/// Every failure cause gets the same view; the cause is only logged.
fn render_error(frame: &mut Frame, config: &Config, area: Rect) {
    let retry_key = config
        .keybindings
        .retry
        .first()
        .map(String::as_str)
        .unwrap_or("r");

    let lines = vec![
        Line::from(Span::styled(
            ERROR_MESSAGE,
            Style::default()
                .fg(config.colors.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Press {} to retry", retry_key)),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, vertically_centered(area, 3));
}

fn render_list(frame: &mut Frame, app: &TuiApp, colors: &ColorConfig, area: Rect) {
    if app.row_count() == 0 {
        let paragraph = Paragraph::new("No headlines right now.")
            .style(Style::default().fg(colors.description))
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, vertically_centered(area, 1));
        return;
    }

    let mut y = area.y;
    for index in app.visible_indices() {
        if y >= area.bottom() {
            break;
        }
        let Some(row) = app.rows.row_for_index(index) else {
            continue;
        };

        let height = row.layout.height().min(area.bottom() - y);
        let row_area = Rect::new(area.x, y, area.width, height);
        render_row(frame, row, index == app.selected, colors, row_area);
        y += height;
    }
}

fn render_row(
    frame: &mut Frame,
    row: &HeadlineRow,
    selected: bool,
    colors: &ColorConfig,
    area: Rect,
) {
    let border_color = if selected {
        colors.active_border
    } else {
        colors.inactive_border
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (image_area, text_area) = match row.layout {
        RowLayout::Large => {
            let [image, text] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(4)]).areas(inner);
            (image, text)
        }
        RowLayout::Compact => {
            let [image, _, text] = Layout::horizontal([
                Constraint::Ratio(1, 3),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .areas(inner);
            (image, text)
        }
    };

    frame.render_widget(
        Thumbnail::new(row.image.decoded()).placeholder_color(colors.placeholder),
        image_area,
    );

    let [body_area, byline_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(text_area);

    let title_style = if selected {
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(colors.title)
            .add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![Line::from(Span::styled(row.title.clone(), title_style))];
    if !row.description.is_empty() {
        lines.push(Line::from(Span::styled(
            row.description.clone(),
            Style::default().fg(colors.description),
        )));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
        body_area,
    );
    frame.render_widget(
        Paragraph::new(row.byline.clone())
            .style(Style::default().fg(colors.byline))
            .alignment(Alignment::Right),
        byline_area,
    );
}

fn render_notice(frame: &mut Frame, message: &str, colors: &ColorConfig) {
    let area = centered_rect(40, 5, frame.area());
    let block = Block::bordered()
        .title(format!(" {} ", NOTICE_TITLE))
        .border_style(Style::default().fg(colors.notice_border));

    let text = Text::from(vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key",
            Style::default().fg(colors.placeholder),
        )),
    ]);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, config: &Config, area: Rect) {
    let colors = &config.colors;
    let mut style = Style::default().fg(colors.status_fg).bg(colors.status_bg);

    let status = match &app.article {
        Some(article) if article.failed() => {
            style = style.fg(colors.error);
            let reason = match &article.status {
                ViewerStatus::Failed(reason) => reason.as_str(),
                ViewerStatus::Opened => "",
            };
            format!(
                "Could not open {}: {}  {}:Retry",
                article.url,
                reason,
                config.keybindings.retry.first().map(String::as_str).unwrap_or("r")
            )
        }
        _ => match &app.status_message {
            Some(message) => message.clone(),
            None => config.keybindings.help_line(),
        },
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}

fn vertically_centered(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    Rect::new(area.x, area.y + (area.height - height) / 2, area.width, height)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
