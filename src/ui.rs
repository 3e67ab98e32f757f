#![allow(
    // Board coordinates are bounds-checked before narrowing to terminal cells
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::components::GameStatus;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::snapshot::Snapshot;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Each board cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const BOARD_COLS: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2; // +2 for borders
const BOARD_ROWS: u16 = BOARD_HEIGHT as u16 + 2;
const MIN_INFO_WIDTH: u16 = 24;

pub fn render(f: &mut Frame, snapshot: &Snapshot, show_ghost: bool) {
    let area = f.area();
    if area.width < BOARD_COLS + MIN_INFO_WIDTH || area.height < BOARD_ROWS + 2 {
        render_too_small(f, area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_COLS),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(area);

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),          // Title
            Constraint::Length(BOARD_ROWS), // Game board
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("BLOCKDROP")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, snapshot, show_ghost, game_layout[1]);
    render_info(f, snapshot, main_layout[1]);
}

// Uses the whole width so the notice stays readable however narrow the terminal is
fn render_too_small(f: &mut Frame, area: Rect) {
    let warning_text = Paragraph::new(
        "Terminal too small!\nPlease resize your terminal\nto continue playing.",
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::Yellow))
    .wrap(Wrap { trim: true });

    let height = area.height.min(4);
    let warning_area = Rect {
        x: area.x,
        y: area.y + (area.height - height) / 2,
        width: area.width,
        height,
    };
    f.render_widget(warning_text, warning_area);
}

fn render_info(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Score, level, lines
            Constraint::Length(3), // Status
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let stats = format!(
        "Score: {}\nLevel: {}\nLines: {}",
        snapshot.score, snapshot.level, snapshot.lines
    );
    f.render_widget(
        Paragraph::new(stats).wrap(Wrap { trim: true }),
        info_layout[1],
    );

    let status = match snapshot.status {
        GameStatus::NotStarted => {
            Paragraph::new("Press Enter to start").style(Style::default().fg(Color::Yellow))
        }
        GameStatus::Running => Paragraph::new(""),
        GameStatus::GameOver => Paragraph::new("GAME OVER!\nPress Enter to restart")
            .style(Style::default().fg(Color::Red)),
    };
    f.render_widget(status.wrap(Wrap { trim: true }), info_layout[2]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↓: Soft drop\n\
        Space: Hard drop\n\
        ↑/X: Rotate clockwise\n\
        Z: Rotate counter-clockwise\n\
        Enter: Start/restart\n\
        Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[3]);
}

fn render_game_board(f: &mut Frame, snapshot: &Snapshot, show_ghost: bool, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    for (y, row) in snapshot.board.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Some(piece_type) = cell {
                draw_cell(f, inner_area, x as i32, y as i32, "█", piece_type.color());
            }
        }
    }

    if let Some(active) = &snapshot.active {
        let color = active.piece.piece_type.color();

        if show_ghost {
            for (x, y) in snapshot.ghost_cells() {
                draw_cell(f, inner_area, x, y, "░", color);
            }
        }

        for (x, y) in active.piece.cells_at(active.position) {
            draw_cell(f, inner_area, x, y, "█", color);
        }
    }

    if snapshot.is_game_over() {
        let game_over = Paragraph::new("GAME OVER")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

        let game_over_area = Rect {
            x: inner_area.x,
            y: inner_area.y + inner_area.height / 2,
            width: inner_area.width,
            height: 1,
        };
        f.render_widget(game_over, game_over_area);
    }
}

// Draws one board cell; anything outside the visible board (e.g. above row 0) is skipped
fn draw_cell(f: &mut Frame, area: Rect, x: i32, y: i32, symbol: &str, color: Color) {
    if x < 0 || y < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
        return;
    }

    let cell_x = area.left() + x as u16 * CELL_WIDTH;
    let cell_y = area.top() + y as u16;

    for dx in 0..CELL_WIDTH {
        if let Some(cell) = f.buffer_mut().cell_mut((cell_x + dx, cell_y)) {
            cell.set_symbol(symbol);
            cell.set_fg(color);
            cell.set_bg(Color::Black);
        }
    }
}
