use crate::core::{Direction, EngineError, Grid, UserAction};
use crate::models::GameRenderState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const MIN_CELL_WIDTH: usize = 4;

/// Reads a board written as whitespace separated rows, `.` or `0` for empty cells.
pub fn parse_grid(s: &str) -> Result<Grid, EngineError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::new();
        for token in line.split_whitespace() {
            let value = match token {
                "." => 0,
                _ => token.parse::<u32>().map_err(|_| {
                    EngineError::InvalidArgument(format!("'{token}' is not a tile value"))
                })?,
            };
            row.push(value);
        }
        rows.push(row);
    }
    Grid::from_rows(rows)
}

fn cell_width(grid: &Grid) -> usize {
    grid.max_tile().to_string().len().max(MIN_CELL_WIDTH)
}

fn cell_text(value: u32, width: usize) -> String {
    if value == 0 {
        format!("{:>width$}", ".")
    } else {
        format!("{value:>width$}")
    }
}

pub fn render_grid_to_string(grid: &Grid) -> String {
    let width = cell_width(grid);
    let mut result = String::new();
    for row in grid.rows() {
        let cells: Vec<String> = row.iter().map(|&v| cell_text(v, width)).collect();
        result.push_str(&cells.join(" "));
        result.push('\n');
    }
    result
}

fn tile_color(value: u32) -> Color {
    match value {
        0 => Color::DarkGray,
        2 | 4 => Color::White,
        8 | 16 => Color::Yellow,
        32 | 64 => Color::LightRed,
        128 | 256 => Color::Magenta,
        512 | 1024 => Color::LightBlue,
        _ => Color::LightGreen,
    }
}

fn grid_lines(state: &GameRenderState) -> Vec<Line<'static>> {
    let width = cell_width(&state.grid);
    let mut lines = Vec::new();
    for (i, row) in state.grid.rows().enumerate() {
        let mut spans = Vec::new();
        for (j, &value) in row.iter().enumerate() {
            let mut style = Style::default().fg(tile_color(value));
            if state.last_change.iter().any(|c| c.row == i && c.col == j) {
                style = style.add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(cell_text(value, width), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, Box<dyn std::error::Error>>
{
    crossterm::terminal::enable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

pub fn cleanup_terminal() -> Result<(), Box<dyn std::error::Error>> {
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(io::stdout(), crossterm::terminal::LeaveAlternateScreen)?;
    Ok(())
}

pub fn render_game(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &GameRenderState,
) -> Result<(), Box<dyn std::error::Error>> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(f.area());

        let scores = format!(
            "Score: {}    Best: {}    Sound: {}",
            state.score,
            state.best_score,
            if state.speaker_on { "on" } else { "off" }
        );
        let score_paragraph = Paragraph::new(scores)
            .block(Block::default().borders(Borders::ALL).title("2048"))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(score_paragraph, chunks[0]);

        let grid_paragraph = Paragraph::new(grid_lines(state))
            .block(Block::default().borders(Borders::ALL).title("Board"))
            .alignment(Alignment::Center);
        f.render_widget(grid_paragraph, chunks[1]);

        let instructions = if state.game_over {
            "Game over! R to start again, Q to quit"
        } else {
            "Controls: WASD or Arrow keys to move, R reset, M mute, Q quit"
        };

        let instructions = if let Some(err) = &state.error {
            format!("{} | Error: {}", instructions, err)
        } else {
            instructions.to_string()
        };

        let style = if state.game_over {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let instruction_paragraph = Paragraph::new(instructions)
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(instruction_paragraph, chunks[2]);
    })?;
    Ok(())
}

pub enum ConsoleInput {
    UserAction(UserAction),
    Quit,
    Timeout,
    Unknown,
}

pub fn handle_input(timeout: std::time::Duration) -> Result<ConsoleInput, Box<dyn std::error::Error>> {
    if event::poll(timeout)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ConsoleInput::Quit,
                KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Up))
                }
                KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Down))
                }
                KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Left))
                }
                KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                    ConsoleInput::UserAction(UserAction::Move(Direction::Right))
                }
                KeyCode::Char('r') | KeyCode::Char('R') => ConsoleInput::UserAction(UserAction::Reset),
                KeyCode::Char('m') | KeyCode::Char('M') => {
                    ConsoleInput::UserAction(UserAction::ToggleSpeaker)
                }
                _ => ConsoleInput::Unknown,
            });
        }
    }
    Ok(ConsoleInput::Timeout)
}
