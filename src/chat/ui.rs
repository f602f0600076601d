use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use super::controller::{ChatController, Focus};
use crate::models::message::{Message, Sender};

const TITLE: &str = " Assistente DSM-5 ";
const EMPTY_HINT: &str = "Faça uma pergunta sobre o DSM-5...";
const HELP: &str = "Enter envia · Tab alterna foco · PgUp/PgDn rola · Esc sai";
const WAITING: &str = "Aguardando resposta... envio desativado";

pub fn render(frame: &mut Frame, controller: &mut ChatController) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_history(frame, controller, chunks[0]);
    render_input(frame, controller, chunks[1]);
    render_status(frame, controller, chunks[2]);
}

fn render_history(frame: &mut Frame, controller: &mut ChatController, area: Rect) {
    let focused = controller.focus() == Focus::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(TITLE);

    let text = if controller.messages().is_empty() {
        Text::from(Span::styled(
            EMPTY_HINT,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut lines: Vec<Line> = Vec::new();
        for message in controller.messages() {
            lines.extend(message_lines(message, controller.animation_frame()));
        }
        Text::from(lines)
    };

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    let total = wrapped_height(&text, inner_width);
    controller.update_viewport(total.saturating_sub(inner_height));

    let history = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((controller.scroll(), 0));
    frame.render_widget(history, area);
}

fn message_lines(message: &Message, animation_frame: u8) -> Vec<Line<'static>> {
    let (label, color) = match message.sender() {
        Sender::User => ("Você", Color::Cyan),
        Sender::Assistant => ("IA", Color::Yellow),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{}:", label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", message.rendered_at().format("%H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])];

    if message.is_pending() {
        let dots = ".".repeat(animation_frame as usize + 1);
        lines.push(Line::from(Span::styled(
            format!("{}{}", message.text().trim_end_matches('.'), dots),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        for line in message.text().lines() {
            lines.push(Line::from(line.to_string()));
        }
    }

    lines.push(Line::default());
    lines
}

/// Rows the text occupies once word-wrapped to `width` columns, measured
/// with the same wrapping the history paragraph renders with.
fn wrapped_height(text: &Text, width: u16) -> u16 {
    let rows = Paragraph::new(text.clone())
        .wrap(Wrap { trim: false })
        .line_count(width);
    rows.min(u16::MAX as usize) as u16
}

/// Display column of the cursor, counting wide chars as two cells.
fn cursor_column(input: &str, cursor: usize) -> u16 {
    let prefix: String = input.chars().take(cursor).collect();
    prefix.width().min(u16::MAX as usize) as u16
}

/// Horizontal scroll that keeps the cursor cell inside `inner_width`.
fn input_scroll(cursor_column: u16, inner_width: u16) -> u16 {
    cursor_column.saturating_sub(inner_width.saturating_sub(1))
}

fn render_input(frame: &mut Frame, controller: &ChatController, area: Rect) {
    let focused = controller.focus() == Focus::Input;
    let style = if controller.is_send_enabled() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let column = cursor_column(controller.input(), controller.cursor());
    let scroll = input_scroll(column, area.width.saturating_sub(2));

    let input = Paragraph::new(controller.input().to_string())
        .style(style)
        .scroll((0, scroll))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title(" Pergunta "),
        );
    frame.render_widget(input, area);

    if focused {
        let x = area.x + 1 + (column - scroll);
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_status(frame: &mut Frame, controller: &ChatController, area: Rect) {
    let status = if controller.is_waiting() {
        Span::styled(WAITING, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(HELP, Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(status)), area);
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
