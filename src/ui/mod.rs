pub mod field;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::game::Phase;

pub fn render(frame: &mut Frame, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(80, 255, 80)))
        .title(" Invaders ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(100, 255, 100))
                .add_modifier(Modifier::BOLD),
        );
    let area = frame.area();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Readouts
            Constraint::Min(4),    // Play field
            Constraint::Length(1), // Help
        ])
        .split(inner);

    render_status(frame, app, chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = field::render_field(&app.surface, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    render_help(frame, app, chunks[2]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let readouts = session.readouts();
    let lives_color = if session.lives() <= 1 {
        Color::Red
    } else {
        Color::White
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", readouts.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} ", readouts.lives),
            Style::default().fg(lives_color).add_modifier(Modifier::BOLD),
        ),
    ];
    if session.is_running() {
        let arrow = if session.alien_direction() > 0 {
            '\u{2192}'
        } else {
            '\u{2190}'
        };
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("Aliens: {} {} ", session.aliens().len(), arrow),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ));
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("Drop in {:.1}s ", session.next_descent_ms() as f32 / 1000.0),
            Style::default().fg(Color::Cyan),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let sep = Style::default().fg(Color::Rgb(60, 60, 60));

    let line = match app.session.phase() {
        Phase::Running => Line::from(vec![
            Span::styled(" \u{2190}\u{2192}/A D Move ", dim),
            Span::styled("| ", sep),
            // One shot at a time: dim the hint while a bullet is in flight.
            Span::styled(
                "Space Shoot ",
                if app.session.bullets().is_empty() { key } else { dim },
            ),
            Span::styled("| ", sep),
            Span::styled("Q Quit", dim),
        ]),
        Phase::Idle => Line::from(vec![
            Span::styled(" Press ENTER to start ", key),
            Span::styled("| ", sep),
            Span::styled("Q Quit", dim),
        ]),
        Phase::Won | Phase::Lost => Line::from(vec![
            Span::styled(" Press ENTER to play again ", key),
            Span::styled("| ", sep),
            Span::styled("Q Quit", dim),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}
