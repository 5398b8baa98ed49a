//! Stateless UI rendering and the cell layout shared with hit-testing.

use noughts::{Board, CELLS, GameState, Mark};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::session::GameView;

const CELL_WIDTH: u16 = 12;
const CELL_HEIGHT: u16 = 3;
const BOARD_WIDTH: u16 = CELL_WIDTH * 3 + 2;
const BOARD_HEIGHT: u16 = CELL_HEIGHT * 3 + 2;

/// Splits the screen into title, board and status areas.
fn screen_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(BOARD_HEIGHT),
            Constraint::Length(3), // Status
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Screen rectangles of the 9 cells, in board index order.
pub fn cell_rects(area: Rect) -> [Rect; CELLS] {
    let board_area = center_rect(screen_chunks(area)[1], BOARD_WIDTH, BOARD_HEIGHT);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(CELL_HEIGHT),
        ])
        .split(board_area);

    let mut cells = [Rect::default(); CELLS];
    for (row, row_area) in [rows[0], rows[2], rows[4]].into_iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
                Constraint::Length(1),
                Constraint::Length(CELL_WIDTH),
            ])
            .split(row_area);
        for (col, cell) in [cols[0], cols[2], cols[4]].into_iter().enumerate() {
            cells[row * 3 + col] = cell;
        }
    }
    cells
}

/// Maps a screen coordinate to the cell drawn there, if any.
pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    cell_rects(area).iter().position(|cell| {
        column >= cell.x
            && column < cell.x + cell.width
            && row >= cell.y
            && row < cell.y + cell.height
    })
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, view: &GameView<'_>, cursor: usize) {
    let [title_area, _, status_area] = screen_chunks(frame.area());

    let title = Paragraph::new("Noughts - Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    draw_board(frame, view.board, cursor, view.state);

    let status = Paragraph::new(status_line(view))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, status_area);
}

/// Text of the status bar.
pub fn status_line(view: &GameView<'_>) -> String {
    match (view.state, view.notice) {
        (_, Some(notice)) => format!("{} Press 'r' for a new game or 'q' to quit.", notice),
        (GameState::StartGame, None) => "Tossing a coin for the first move...".to_string(),
        (GameState::PlayerTurn, None) => {
            "Your move: click a cell, or arrows + Enter, or 1-9".to_string()
        }
        (GameState::OpponentTurn, None) => "Computer is thinking...".to_string(),
        (GameState::Winner | GameState::Draw, None) => "Game over.".to_string(),
    }
}

fn draw_board(frame: &mut Frame, board: &Board, cursor: usize, state: GameState) {
    let full = frame.area();
    let rects = cell_rects(full);
    let board_area = center_rect(screen_chunks(full)[1], BOARD_WIDTH, BOARD_HEIGHT);

    for row in 1..3u16 {
        let y = board_area.y + row * (CELL_HEIGHT + 1) - 1;
        if y < board_area.y + board_area.height {
            let line = Rect::new(board_area.x, y, board_area.width, 1);
            let sep = Paragraph::new("─".repeat(board_area.width as usize))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(sep, line);
        }
    }

    let show_cursor = state == GameState::PlayerTurn;
    for (index, rect) in rects.iter().enumerate() {
        let mark = board.mark_at(index).unwrap_or(Mark::Empty);
        draw_cell(frame, *rect, mark, show_cursor && index == cursor);
        if index % 3 < 2 {
            let sep = Rect::new(rect.x + rect.width, rect.y, 1, rect.height);
            frame.render_widget(
                Paragraph::new("│\n│\n│").style(Style::default().fg(Color::DarkGray)),
                sep.intersection(full),
            );
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, mark: Mark, highlighted: bool) {
    let base_style = match mark {
        Mark::Empty => Style::default().fg(Color::DarkGray),
        Mark::Player => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        Mark::Opponent => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };

    let style = if highlighted {
        base_style.bg(Color::White).fg(Color::Black)
    } else {
        base_style
    };

    let symbol = format!(" {} ", mark.symbol());
    let paragraph = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(symbol, style)),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
