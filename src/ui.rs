use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use itertools::Itertools;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    game::Phase,
    view::{GameView, GridView},
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;
const CELL_GAP: &str = "  ";

/// Full-screen rendering of one [`GameView`] plus the text being typed.
pub struct GameScreen<'a> {
    view: &'a GameView,
    input: &'a str,
}

impl<'a> GameScreen<'a> {
    pub fn new(view: &'a GameView, input: &'a str) -> Self {
        Self { view, input }
    }
}

impl Widget for GameScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.view;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let board_height = match &view.grid {
            GridView::Shown(rows) => rows.len() as u16 + 2,
            _ => 3,
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1),            // title + timer
                Constraint::Length(board_height), // board
                Constraint::Length(3),            // input
                Constraint::Length(1),            // message
                Constraint::Min(3),               // word lists
                Constraint::Length(1),            // legend
            ])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[0]);

        Paragraph::new(Span::styled("Boggle - Solitaire", bold_style)).render(header[0], buf);

        let status_color = if view.phase == Phase::Running {
            Color::Green
        } else {
            Color::Yellow
        };
        Paragraph::new(Line::from(vec![
            Span::styled(view.timer.clone(), bold_style),
            Span::raw(" - "),
            Span::styled(view.status, Style::default().fg(status_color)),
        ]))
        .alignment(Alignment::Right)
        .render(header[1], buf);

        render_board(&view.grid, view.phase, chunks[1], buf);

        let input_line = if view.input_enabled {
            // leave room for the cursor and the borders
            let room = chunks[2].width.saturating_sub(3) as usize;
            Line::from(vec![
                Span::raw(tail_to_width(self.input, room).to_string()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ])
        } else {
            Line::from(Span::styled(start_hint(view.phase), dim_style))
        };
        Paragraph::new(input_line)
            .block(Block::default().borders(Borders::ALL).title("Word"))
            .render(chunks[2], buf);

        if let Some(message) = &view.message {
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Cyan),
            ))
            .render(chunks[3], buf);
        }

        render_word_lists(view, chunks[4], buf);

        let legend = match view.phase {
            Phase::Running => "(enter) submit / (esc) stop / (ctrl+r) restart / (ctrl+c) quit",
            Phase::Idle => "(s)tart / (q)uit",
            Phase::Stopped => "(ctrl+r) new game / (ctrl+c) quit",
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[5], buf);
    }
}

fn start_hint(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "press (s) to start",
        _ => "press (ctrl+r) for a new game",
    }
}

fn render_board(grid: &GridView, phase: Phase, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title("Board");

    let paragraph = match grid {
        GridView::Shown(rows) => {
            let cell_style = Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
            let lines: Vec<Line> = grid_lines(rows)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, cell_style)))
                .collect();
            Paragraph::new(lines)
        }
        GridView::Hidden => Paragraph::new(Span::styled(
            format!("Board hidden - {}.", start_hint(phase)),
            Style::default().fg(Color::Gray),
        )),
        GridView::Unavailable { size } => Paragraph::new(Span::styled(
            format!("No board available for size {size}."),
            Style::default().fg(Color::Red),
        )),
    };

    paragraph
        .alignment(Alignment::Center)
        .block(block)
        .render(area, buf);
}

fn render_word_lists(view: &GameView, area: Rect, buf: &mut Buffer) {
    let columns = if view.reveal.is_some() {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(area)
    };

    let found_title = match view.score {
        Some((found, total)) => format!("Words Found ({found} of {total})"),
        None => format!("Words Found ({})", view.found.len()),
    };
    // keep the newest finds in view
    let rows = columns[0].height.saturating_sub(2) as usize;
    let offset = view.found.len().saturating_sub(rows);
    Paragraph::new(numbered(&view.found))
        .block(Block::default().borders(Borders::ALL).title(found_title))
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
        .render(columns[0], buf);

    if let Some(reveal) = &view.reveal {
        Paragraph::new(numbered(&reveal.words))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Remaining valid words ({})", reveal.total)),
            )
            .style(Style::default().fg(Color::Magenta))
            .render(columns[1], buf);
    }
}

fn numbered(words: &[String]) -> Vec<Line<'static>> {
    words
        .iter()
        .enumerate()
        .map(|(i, w)| Line::from(format!("{}. {}", i + 1, w)))
        .collect()
}

/// One text line per board row, cells separated by a fixed gap.
pub fn grid_lines(rows: &[Vec<char>]) -> Vec<String> {
    rows.iter().map(|row| row.iter().join(CELL_GAP)).collect()
}

/// The longest suffix of `s` that fits in `width` terminal columns.
pub fn tail_to_width(s: &str, width: usize) -> &str {
    if s.width() <= width {
        return s;
    }

    let mut used = 0;
    let mut start = s.len();
    for (idx, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    &s[start..]
}
