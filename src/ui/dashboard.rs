//! Dashboard layout and rendering.
//!
//! Composes the full surface each frame: logo/header panel, upload
//! status panel, the data table with one row per metric, and a footer
//! with the color legend. Re-rendering everything per frame keeps the
//! display consistent with the app state without any partial-update
//! bookkeeping.

use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Phase};
use crate::ui::logo::Logo;
use crate::ui::palette::Gradient;

/// Minimum width for the two-column header (logo beside status).
const TWO_COL_MIN_WIDTH: u16 = 80;
/// Minimum terminal size for a usable dashboard.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

const LBL_NEXT: &str = "Next:  ";
const LBL_LAST: &str = "Last:  ";
const LBL_TOTAL: &str = "Total: ";
const LBL_WAITING: &str = "Waiting for next reading …";
const BLANK_TIME: &str = "--:--:--";

const DIM: Style = Style::new().fg(Color::Gray);

/// Render the whole dashboard for one frame.
pub fn render(frame: &mut Frame, app: &App, logo: &Logo) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.rows();
    // Table height: one bordered line per row plus header and edges
    let table_height = (rows.len() as u16 + 1) * 2 + 1;

    if area.width >= TWO_COL_MIN_WIDTH {
        let chunks = Layout::vertical([
            Constraint::Length(logo.rows().max(5)),
            Constraint::Length(table_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        let header = Layout::horizontal([Constraint::Ratio(2, 3), Constraint::Min(26)])
            .split(chunks[0]);
        frame.render_widget(Paragraph::new(logo.text()), header[0]);
        render_status_panel(frame, app, header[1]);
        render_table(frame, &rows, chunks[1]);
        render_footer(frame, logo, chunks[3]);
    } else {
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(table_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        frame.render_widget(Paragraph::new(logo.plain().to_string()), chunks[0]);
        render_status_panel(frame, app, chunks[1]);
        render_table(frame, &rows, chunks[2]);
        render_footer(frame, logo, chunks[4]);
    }
}

/// Upload status panel: next/last upload times, total count, and the
/// current action (or the inter-tick progress gauge).
fn render_status_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .title(" Uploads ")
        .title_alignment(Alignment::Center)
        .border_style(DIM);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let next = app
        .next_upload_due()
        .map_or_else(|| BLANK_TIME.to_string(), format_clock);
    frame.render_widget(
        Paragraph::new(format!("{LBL_NEXT}{next}")).style(DIM),
        lines[0],
    );

    let last_line = match app.last_upload() {
        Some((time, ok)) => {
            let marker = if ok {
                Span::styled("[OK]", Style::default().fg(Color::Green))
            } else {
                Span::styled("[Error]", Style::default().fg(Color::Red))
            };
            Line::from(vec![
                Span::styled(format!("{LBL_LAST}{} ", format_clock(time)), DIM),
                marker,
            ])
        }
        None => Line::from(Span::styled(format!("{LBL_LAST}{BLANK_TIME}"), DIM)),
    };
    frame.render_widget(Paragraph::new(last_line), lines[1]);

    let total = if app.max_uploads() > 0 {
        format!("{LBL_TOTAL}{}/{}", app.num_uploads(), app.max_uploads())
    } else {
        format!("{LBL_TOTAL}{}", app.num_uploads())
    };
    frame.render_widget(Paragraph::new(total).style(DIM), lines[2]);

    match app.phase() {
        Phase::WaitingForSample => {
            let gauge = Gauge::default()
                .label(LBL_WAITING)
                .ratio(app.wait_progress())
                .gauge_style(Style::default().fg(Color::Cyan));
            frame.render_widget(gauge, lines[3]);
        }
        Phase::Init => {
            frame.render_widget(Paragraph::new("Initializing …").style(DIM), lines[3]);
        }
        Phase::Running => {
            frame.render_widget(Paragraph::new("Reading sensors …").style(DIM), lines[3]);
        }
        Phase::Stopped => {
            frame.render_widget(Paragraph::new("Stopped").style(DIM), lines[3]);
        }
    }
}

/// The live data table: label, current value, sparkline history.
fn render_table(frame: &mut Frame, rows: &[crate::ui::row::DataRow], area: Rect) {
    let header = Row::new(vec![
        Cell::from(Span::styled("Description", Style::default().add_modifier(Modifier::BOLD))),
        Cell::from(Span::styled("Current", Style::default().add_modifier(Modifier::BOLD))),
        Cell::from(Span::styled("History", Style::default().add_modifier(Modifier::BOLD))),
    ])
    .height(1);

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.label.clone()),
                Cell::from(row.value_line()),
                Cell::from(row.spark_line()),
            ])
            .height(2)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Min(12),
    ];

    let table = Table::new(table_rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(DIM),
    );

    frame.render_widget(table, area);
}

/// Footer: LOW/NORMAL/HIGH legend plus the plain app name.
fn render_footer(frame: &mut Frame, logo: &Logo, area: Rect) {
    let legend = Gradient::default();
    let name = logo.plain();
    let used = "  LOW NORMAL HIGH".len();
    let pad = (area.width as usize).saturating_sub(used + name.len() + 2);

    let line = Line::from(vec![
        Span::styled("  LOW ", Style::default().fg(Color::from(legend.low))),
        Span::styled("NORMAL ", Style::default().fg(Color::from(legend.normal))),
        Span::styled("HIGH", Style::default().fg(Color::from(legend.high))),
        Span::raw(" ".repeat(pad)),
        Span::styled(name.to_string(), DIM),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn format_clock(t: DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}
