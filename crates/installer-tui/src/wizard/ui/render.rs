use super::super::app::App;
use super::content::{footer_lines, step_lines};
use super::sidebar::build_step_sidebar;
use installer_core::footer::quit_label;
use installer_core::{CriticalFailure, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let os_name = app.wizard.os_release().display_name();
    match app.wizard.view() {
        View::CriticalFailure(failure) => draw_critical(f, app, &failure),
        View::InstallationProgress => {
            let text = format!(
                "Installing {}.\n\nThe installation continues in the background.\nCtrl+C leaves this screen.",
                os_name
            );
            let block = Block::default().borders(Borders::ALL).title("Installation");
            f.render_widget(
                Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
                f.area(),
            );
        }
        View::Wizard { .. } => draw_wizard(f, app, &os_name),
    }
}

fn draw_wizard(f: &mut Frame, app: &App, os_name: &str) {
    let footer = footer_lines(app);
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(footer.len() as u16 + 2),
        ])
        .split(f.area());

    let mode = if app.wizard.is_boot_iso() {
        ("INSTALL MEDIA", Color::Yellow)
    } else {
        ("LIVE", Color::Green)
    };
    let title_line = Line::from(vec![
        Span::styled(format!("{} installation", os_name), Style::default().fg(Color::White)),
        Span::raw(" | "),
        Span::styled(mode.0, Style::default().fg(mode.1)),
    ]);
    f.render_widget(Block::default().borders(Borders::ALL).title(title_line), main_chunks[0]);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_chunks[1]);

    let sidebar = Paragraph::new(build_step_sidebar(app))
        .block(Block::default().borders(Borders::ALL).title("Steps"));
    f.render_widget(sidebar, body_chunks[0]);

    let step = app.current_step();
    let data = app.wizard.current_step_data();
    let items = step_lines(app, step, data.as_ref())
        .into_iter()
        .map(ListItem::new)
        .collect::<Vec<_>>();
    let content = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(step.label()),
    );
    f.render_widget(content, body_chunks[1]);

    let legend = Paragraph::new(footer.join("\n"))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(legend, main_chunks[2]);

    if let Some(modal) = app.wizard.modal_view() {
        let area = centered_rect(60, 40, f.area());
        let color = if modal.destructive { Color::Red } else { Color::Cyan };
        let text = format!(
            "{}\n\n[y/Enter] {}    [n/Esc] {}",
            modal.body, modal.action_label, modal.cancel_label
        );
        let popup = Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(modal.title),
            )
            .wrap(Wrap { trim: true });
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn draw_critical(f: &mut Frame, app: &App, failure: &CriticalFailure) {
    let text = format!(
        "{}\n\n{}\n\nPress q to {}.",
        failure.context,
        failure.error,
        quit_label(app.wizard.is_boot_iso()).to_lowercase()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title("The installer cannot continue");
    f.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: false }), f.area());
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
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
