//! Full-screen result view.
//!
//! Runs an analysis in an alternate screen, redrawing on every state change
//! and every 100 ms. Tabs switch with `1`/`2`/`3` or Tab, `r` re-runs the
//! same request, `q`/Esc/Ctrl-C quit.

use std::io::{self, stdout, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap};

use pluto::models::AnalysisRequest;
use pluto::presenters::{ClusterCard, StatsStrip, SummaryView, WeightedTerm};
use pluto::services::{CompletedAnalysis, LifecycleState, ResultLifecycleController};
use pluto::view::{ResultTab, ResultView, StageRow, StageStatus, TabContent, ViewSession};

use super::helpers::{format_number, truncate_string};

static TUI_ACTIVE: AtomicBool = AtomicBool::new(false);
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Check if the full-screen view currently owns the terminal.
pub fn is_active() -> bool {
    TUI_ACTIVE.load(Ordering::SeqCst)
}

/// Log writer for the tracing subscriber: stderr, except while the
/// full-screen view is up and verbose logging was not requested.
pub fn log_writer() -> Box<dyn io::Write> {
    if is_active() && !VERBOSE.load(Ordering::SeqCst) {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    }
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::SeqCst);
}

/// Visual color for a term level, strongest first.
fn level_color(level: usize) -> Color {
    match level {
        0 => Color::LightCyan,
        1 => Color::Cyan,
        2 => Color::Green,
        3 => Color::Yellow,
        _ => Color::DarkGray,
    }
}

fn palette_color(card: &ClusterCard) -> Color {
    let (r, g, b) = card.color().rgb;
    Color::Rgb(r, g, b)
}

/// Run `request` through `controller` in the full-screen view.
pub async fn run_analysis_tui(
    controller: &ResultLifecycleController,
    request: AnalysisRequest,
) -> anyhow::Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    TUI_ACTIVE.store(true, Ordering::SeqCst);

    let result = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(mut terminal) => run_tui_loop(&mut terminal, controller, request).await,
        Err(e) => Err(e.into()),
    };

    // Restore terminal
    TUI_ACTIVE.store(false, Ordering::SeqCst);
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Start a run in the background. A newer run or `cancel` ends it.
fn spawn_analysis(controller: &ResultLifecycleController, request: &AnalysisRequest) {
    let controller = controller.clone();
    let request = request.clone();
    tokio::spawn(async move { controller.analyze(request).await });
}

/// Main TUI event loop.
async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &ResultLifecycleController,
    request: AnalysisRequest,
) -> anyhow::Result<()> {
    let poll_duration = Duration::from_millis(100);
    let service_url = controller.config().service_url().to_string();
    let mut session = ViewSession::new();
    let mut updates = controller.subscribe();
    spawn_analysis(controller, &request);
    let mut finished_at: Option<String> = None;

    let outcome = loop {
        let state = updates.borrow_and_update().clone();
        session.observe(&state);
        if state.is_settled() && finished_at.is_none() {
            finished_at = Some(Local::now().format("%H:%M:%S").to_string());
        }

        if let Err(e) = terminal.draw(|frame| {
            draw_result(frame, &state, &session, &service_url, finished_at.as_deref())
        }) {
            break Err(e.into());
        }

        // Non-blocking check for keyboard input
        match event::poll(poll_duration) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e.into()),
        }
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break Ok(()),
            KeyCode::Char('1') => session.set_tab(ResultTab::Terms),
            KeyCode::Char('2') => session.set_tab(ResultTab::Clusters),
            KeyCode::Char('3') => session.set_tab(ResultTab::Summary),
            KeyCode::Tab | KeyCode::Right => session.next_tab(),
            KeyCode::BackTab | KeyCode::Left => session.previous_tab(),
            KeyCode::Char('r') => {
                finished_at = None;
                session.set_tab(ResultTab::Terms);
                spawn_analysis(controller, &request);
            }
            _ => {}
        }
    };

    controller.cancel();
    outcome
}

/// Draw the result view.
fn draw_result(
    frame: &mut Frame,
    state: &LifecycleState,
    session: &ViewSession,
    service_url: &str,
    finished_at: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    let status = match state {
        LifecycleState::Idle => "idle".to_string(),
        LifecycleState::Loading { .. } => "running".to_string(),
        LifecycleState::Error(_) => "failed".to_string(),
        LifecycleState::Success(_) => match finished_at {
            Some(at) => format!("done at {}", at),
            None => "done".to_string(),
        },
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("pluto", Style::default().bold()),
        Span::raw("  "),
        Span::styled(service_url.to_string(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(status, Style::default().fg(Color::Cyan)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match session.view(state, service_url) {
        ResultView::Loading {
            stages,
            placeholders,
        } => draw_loading(frame, chunks[1], &stages, placeholders),
        ResultView::Error { message, guidance } => {
            draw_error(frame, chunks[1], message, &guidance)
        }
        ResultView::Empty { steps } => draw_empty(frame, chunks[1], steps),
        ResultView::Success {
            analysis,
            tab,
            content,
        } => draw_success(frame, chunks[1], analysis, tab, content),
    }

    let footer = Paragraph::new("1/2/3 or Tab: switch tab   r: re-run   q: quit")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);
}

fn section(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .title_style(Style::default().fg(Color::Cyan).bold())
        .borders(Borders::TOP)
}

fn draw_loading(frame: &mut Frame, area: Rect, stages: &[StageRow], placeholders: &[u16]) {
    let mut lines: Vec<Line> = stages
        .iter()
        .map(|row| {
            let (marker, style) = match row.status {
                StageStatus::Done => ("✓", Style::default().fg(Color::Green)),
                StageStatus::Active => ("⚙", Style::default().fg(Color::Yellow).bold()),
                StageStatus::Pending => ("○", Style::default().fg(Color::DarkGray)),
            };
            Line::from(vec![
                Span::styled(format!("  {} ", marker), style),
                Span::styled(row.label, style),
            ])
        })
        .collect();

    lines.push(Line::raw(""));
    let width = area.width.saturating_sub(4);
    for percent in placeholders {
        let cells = (u32::from(width) * u32::from(*percent) / 100) as usize;
        lines.push(Line::styled(
            format!("  {}", "░".repeat(cells)),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::raw(""));
    }

    frame.render_widget(
        Paragraph::new(lines).block(section("NLP PIPELINE RUNNING")),
        area,
    );
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str, guidance: &str) {
    let lines = vec![
        Line::styled(format!("  ✗ {}", message), Style::default().fg(Color::Red)),
        Line::raw(""),
        Line::styled(format!("  {}", guidance), Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .title(" ANALYSIS FAILED ")
        .title_style(Style::default().fg(Color::Red).bold())
        .borders(Borders::TOP);
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn draw_empty(frame: &mut Frame, area: Rect, steps: &[&str]) {
    let mut lines = vec![
        Line::styled("  Ready to Analyze", Style::default().bold()),
        Line::styled(
            "  Results will appear here after running the NLP pipeline",
            Style::default().fg(Color::DarkGray),
        ),
        Line::raw(""),
    ];
    lines.extend(steps.iter().enumerate().map(|(i, step)| {
        Line::from(vec![
            Span::styled(format!("  {} ", i + 1), Style::default().fg(Color::Cyan)),
            Span::raw(step.to_string()),
        ])
    }));
    frame.render_widget(Paragraph::new(lines).block(section("ANALYSIS RESULTS")), area);
}

fn draw_success(
    frame: &mut Frame,
    area: Rect,
    analysis: &CompletedAnalysis,
    tab: ResultTab,
    content: TabContent<'_>,
) {
    let notice_height = if analysis.fallback { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(notice_height), // Demo data notice
            Constraint::Length(3),             // Stats strip
            Constraint::Length(2),             // Tabs
            Constraint::Min(3),                // Tab content
        ])
        .split(area);

    if analysis.fallback {
        let notice = Paragraph::new("! Analysis service unreachable, showing demo data")
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(notice, chunks[0]);
    }

    draw_stats(frame, chunks[1], &analysis.view.stats);

    let titles: Vec<Line> = ResultTab::ALL
        .iter()
        .map(|t| Line::from(format!("{} {}", t.index() + 1, t.label())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(tabs, chunks[2]);

    match content {
        TabContent::Terms(terms) => draw_terms(frame, chunks[3], terms),
        TabContent::Clusters(cards) => draw_clusters(frame, chunks[3], cards),
        TabContent::Summary(summary) => draw_summary(frame, chunks[3], summary),
        TabContent::NoData(message) => frame.render_widget(
            Paragraph::new(format!("  {}", message)).style(Style::default().fg(Color::DarkGray)),
            chunks[3],
        ),
    }
}

fn draw_stats(frame: &mut Frame, area: Rect, stats: &StatsStrip) {
    let items = stats.items();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, items.len() as u32); 5])
        .split(area);

    for ((label, value), column) in items.iter().zip(columns.iter()) {
        let cell = Paragraph::new(vec![
            Line::styled(value.clone(), Style::default().bold()),
            Line::styled(*label, Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(cell, *column);
    }
}

fn draw_terms(frame: &mut Frame, area: Rect, terms: &[WeightedTerm]) {
    let header_cells = ["#", "Term", "Score"].map(|h| Cell::from(h).style(Style::default().bold()));
    let header = Row::new(header_cells).height(1);

    let rows = terms.iter().map(|t| {
        let mut style = Style::default().fg(level_color(t.level));
        if t.level == 0 {
            style = style.bold();
        }
        Row::new([
            Cell::from(format!("{:>3}", t.rank + 1)).style(Style::default().fg(Color::DarkGray)),
            Cell::from(truncate_string(&t.term, 48)).style(style),
            Cell::from(t.badge().unwrap_or_default()).style(Style::default().fg(Color::DarkGray)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(20),
            Constraint::Length(8),
        ],
    )
    .header(header);
    frame.render_widget(table, area);
}

fn draw_clusters(frame: &mut Frame, area: Rect, cards: &[ClusterCard]) {
    let mut lines = Vec::with_capacity(cards.len() * 3);
    for card in cards {
        let color = palette_color(card);
        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(color)),
            Span::styled(card.label.clone(), Style::default().fg(color).bold()),
            Span::styled(
                format!("  {}", card.doc_badge()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        if !card.keywords.is_empty() {
            lines.push(Line::raw(format!("    {}", card.keywords.join(" · "))));
        }
        lines.push(Line::raw(""));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn draw_summary(frame: &mut Frame, area: Rect, summary: &SummaryView) {
    let mut lines: Vec<Line> = summary
        .sentences
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(
                    format!("{:>3}. ", s.ordinal),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(s.text.clone()),
            ])
        })
        .collect();

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!(
            "Extracted: {}   ~Words: {}   Source sentences: {}",
            summary.stats.extracted_sentences,
            format_number(summary.stats.approx_words),
            summary.stats.source_sentences
        ),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}
