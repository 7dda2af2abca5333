use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};

use defprof_terminal::dataset::PlayerRecord;
use defprof_terminal::engine;
use defprof_terminal::metrics::{self, CANONICAL_METRICS, MetricId};
use defprof_terminal::registry::{SeasonRegistry, SeasonStore};
use defprof_terminal::state::{AppState, Screen};

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(store: SeasonStore) -> Self {
        Self {
            state: AppState::new(store),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.screen = Screen::Profile,
            KeyCode::Char('2') => self.state.screen = Screen::Leaderboard,
            KeyCode::Char('b') | KeyCode::Esc => {
                if self.state.help_overlay || self.state.glossary_overlay {
                    self.state.help_overlay = false;
                    self.state.glossary_overlay = false;
                } else {
                    self.state.screen = Screen::Profile;
                }
            }
            KeyCode::Char('s') | KeyCode::Char('S') => self.state.cycle_season(),
            KeyCode::Char('t') | KeyCode::Char('T') => match self.state.screen {
                Screen::Profile => self.state.cycle_profile_team(),
                Screen::Leaderboard => self.state.cycle_lb_team(),
            },
            KeyCode::Char('j') | KeyCode::Down => match self.state.screen {
                Screen::Profile => self.state.select_next_player(),
                Screen::Leaderboard => self.state.scroll_lb_down(),
            },
            KeyCode::Char('k') | KeyCode::Up => match self.state.screen {
                Screen::Profile => self.state.select_prev_player(),
                Screen::Leaderboard => self.state.scroll_lb_up(),
            },
            KeyCode::Char('m') | KeyCode::Char('M') => {
                if self.state.screen == Screen::Leaderboard {
                    self.state.cycle_sort_metric();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if self.state.screen == Screen::Leaderboard {
                    self.state.increase_top_n();
                }
            }
            KeyCode::Char('-') => {
                if self.state.screen == Screen::Leaderboard {
                    self.state.decrease_top_n();
                }
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.state.glossary_overlay = !self.state.glossary_overlay;
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).context("enter alternate screen")?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend).context("create terminal")?;

    let store = SeasonStore::new(SeasonRegistry::discover());
    let mut app = App::new(store);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Profile => render_profile(frame, chunks[1], &app.state),
        Screen::Leaderboard => render_leaderboard(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.glossary_overlay {
        render_glossary_overlay(frame, frame.size());
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let season = state.season_label().unwrap_or("-");
    let title = match state.screen {
        Screen::Profile => format!(
            "DEFPROF | Season {season} | PROFILE | Team: {}",
            state.profile_team.label()
        ),
        Screen::Leaderboard => format!(
            "DEFPROF | Season {season} | LEADERBOARD | {} | Team: {} | Top {}",
            metrics::metric_pct_label(state.sort_metric),
            state.lb_team.label(),
            state.top_n
        ),
    };
    let line1 = format!("  .--.  {title}");
    let line2 = " ( () )  MLB defensive profiles".to_string();
    let line3 = "  `--`".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Profile => {
            "1 Profile | 2 Leaderboard | j/k/↑/↓ Player | t Team | s Season | g Glossary | ? Help | q Quit"
                .to_string()
        }
        Screen::Leaderboard => {
            "1 Profile | 2 Leaderboard | j/k/↑/↓ Scroll | m Metric | t Team | +/- Top N | s Season | ? Help | q Quit"
                .to_string()
        }
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_profile(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(record) = state.selected_record() else {
        let message = if state.player_options().is_empty() {
            "No players for this team"
        } else {
            "No player selected"
        };
        let empty = Paragraph::new(message).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(rows[0]);

    let season = state.season_label().unwrap_or("-");
    let card = Paragraph::new(profile_card_text(record, season))
        .block(Block::default().title("Player").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(card, columns[0]);

    render_percentile_chart(frame, columns[1], record);

    let table = Paragraph::new(raw_vs_pct_text(record)).block(
        Block::default()
            .title("Raw vs Percentiles")
            .borders(Borders::ALL),
    );
    frame.render_widget(table, rows[1]);
}

fn profile_card_text(record: &PlayerRecord, season: &str) -> String {
    let mut lines = vec![
        format!("{} · {} · {}", record.player, record.team, season),
        format!("Innings: {} | Age: {}", record.innings, record.age),
        format!(
            "Disagreement Index: {}",
            record
                .disagreement_index
                .map(|v| format!("{v:.2}"))
                .unwrap_or_else(|| "N/A".to_string())
        ),
        String::new(),
    ];

    let available = engine::available_percentile_metrics(record);
    match engine::best_worst(record, &available) {
        Some((best, worst)) => {
            let best_value = record.percentile(best).unwrap_or(0.0);
            let worst_value = record.percentile(worst).unwrap_or(0.0);
            lines.push(format!(
                "Best metric: {} - {best_value:.0}th",
                metrics::metric_label(best)
            ));
            lines.push(format!(
                "Least favorable: {} - {worst_value:.0}th",
                metrics::metric_label(worst)
            ));
        }
        None => lines.push("No percentile data available for this player.".to_string()),
    }
    lines.join("\n")
}

fn render_percentile_chart(frame: &mut Frame, area: Rect, record: &PlayerRecord) {
    let block = Block::default()
        .title("Global Percentiles (0-100)")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let available = engine::available_percentile_metrics(record);
    if available.is_empty() {
        let empty = Paragraph::new("No percentile metrics to display for this player.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let bars: Vec<Bar> = available
        .iter()
        .map(|id| {
            let value = record.percentile(*id).unwrap_or(0.0);
            Bar::default()
                .value(value.round() as u64)
                .label(Line::from(metrics::metric_label(*id)))
                .text_value(format!("{value:.0}"))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(11)
        .bar_gap(1)
        .max(100);
    frame.render_widget(chart, inner);
}

fn raw_vs_pct_text(record: &PlayerRecord) -> String {
    let mut lines = vec![format!(
        "{:<14} {:>10} {:>18}",
        "Metric", "Raw", "Percentile (0-100)"
    )];
    for id in CANONICAL_METRICS {
        let raw = record
            .raw(id)
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "N/A".to_string());
        let pct = record
            .percentile(id)
            .map(|v| format!("{v:.0}"))
            .unwrap_or_else(|| "N/A".to_string());
        lines.push(format!(
            "{:<14} {:>10} {:>18}",
            metrics::metric_label(id),
            raw,
            pct
        ));
    }
    lines.join("\n")
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = leaderboard_columns();
    render_leaderboard_header(frame, sections[0], &widths, state.sort_metric);

    let list_area = sections[1];
    let rows = state.leaderboard_rows();
    if rows.is_empty() {
        let empty =
            Paragraph::new("Leaderboard is empty").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let total = rows.len();
    let max_start = total.saturating_sub(visible);
    let start = state.lb_scroll.min(max_start);
    let end = (start + visible).min(total);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let row = &rows[idx];
        let rank = format!("{}", idx + 1);
        let value = format!("{:.0}", row.value);
        let disagreement = row
            .disagreement_index
            .map(|v| format!("{v:.2}"))
            .unwrap_or_else(|| "N/A".to_string());

        render_cell_text(frame, cols[0], &rank, Style::default());
        render_cell_text(frame, cols[1], &row.player, Style::default());
        render_cell_text(frame, cols[2], &row.team, Style::default());
        render_cell_text(frame, cols[3], &value, Style::default());
        render_cell_text(frame, cols[4], &disagreement, Style::default());
    }
}

fn leaderboard_columns() -> [Constraint; 5] {
    [
        Constraint::Length(5),
        Constraint::Min(22),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(14),
    ]
}

fn render_leaderboard_header(
    frame: &mut Frame,
    area: Rect,
    widths: &[Constraint],
    sort_metric: MetricId,
) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "#", style);
    render_cell_text(frame, cols[1], "Player", style);
    render_cell_text(frame, cols[2], "Team", style);
    render_cell_text(frame, cols[3], metrics::metric_label(sort_metric), style);
    render_cell_text(frame, cols[4], "Disagreement", style);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn render_glossary_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, popup_area);

    let mut sections: Vec<String> = CANONICAL_METRICS
        .iter()
        .map(|id| metrics::glossary_entry(*id).to_string())
        .collect();
    sections.push(metrics::DISAGREEMENT_GLOSSARY.to_string());
    let text = sections.join("\n\n");

    let glossary = Paragraph::new(text)
        .block(
            Block::default()
                .title("Glossary of defensive metrics")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(glossary, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Defprof Terminal - Help",
        "",
        "Global:",
        "  1            Profile",
        "  2            Leaderboard",
        "  s            Cycle season",
        "  t            Cycle team filter (per screen)",
        "  g            Glossary",
        "  b / Esc      Close overlay / back to profile",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Profile:",
        "  j/k or ↑/↓   Previous/next player",
        "",
        "Leaderboard:",
        "  j/k or ↑/↓   Scroll",
        "  m            Cycle sort metric",
        "  + / -        Top N up/down (5-100)",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
