use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::game::{Phase, TIME_BONUS_SECS};
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.game.phase {
            Phase::Idle | Phase::Active => render_round(self, area, buf),
            Phase::Ended => render_game_over(self, area, buf),
        }
    }
}

/// Streak readout color, hotter as the combo grows.
fn combo_color(combo: u32) -> Color {
    if combo >= 10 {
        Color::Red
    } else if combo >= 7 {
        Color::Rgb(255, 138, 0)
    } else if combo >= 4 {
        Color::Yellow
    } else {
        Color::White
    }
}

fn render_round(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Length(1), // score / best / combo
                Constraint::Min(1),
                Constraint::Length(1), // timer
                Constraint::Length(2),
                Constraint::Length(1), // target word
                Constraint::Length(2),
                Constraint::Length(1), // attempt
                Constraint::Length(1), // bonus note
                Constraint::Min(1),
                Constraint::Length(1), // key hints
            ]
            .as_ref(),
        )
        .split(area);

    let mut header = vec![
        Span::styled(format!("SCORE {}", game.score), bold_style),
        Span::raw("   "),
        Span::styled(
            format!("BEST {}", game.high_score),
            Style::default().patch(bold_style).fg(Color::Yellow),
        ),
    ];
    if game.combo > 0 {
        header.push(Span::raw("   "));
        header.push(Span::styled(
            format!("{}x COMBO", game.combo),
            Style::default()
                .patch(bold_style)
                .fg(combo_color(game.combo)),
        ));
    }
    Paragraph::new(Line::from(header))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let timer_style = if game.is_low_time() {
        red_bold_style
    } else {
        Style::default().patch(bold_style).fg(Color::Cyan)
    };
    Paragraph::new(Span::styled(
        format!("time left: {}s", game.time_left),
        timer_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    // Per-letter feedback against the attempt so far, case-insensitively,
    // matching how the attempt will be judged on submit.
    let typed: Vec<char> = game.input.chars().collect();
    let spans = game
        .current_word
        .chars()
        .enumerate()
        .map(|(idx, letter)| {
            let style = match typed.get(idx) {
                Some(t) if t.eq_ignore_ascii_case(&letter) => green_bold_style,
                Some(_) => red_bold_style,
                None => dim_bold_style,
            };
            Span::styled(letter.to_string(), style)
        })
        .collect::<Vec<Span>>();

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2);
    let word_alignment = if game.current_word.width() <= max_chars_per_line as usize {
        Alignment::Center
    } else {
        Alignment::Left
    };
    Paragraph::new(Line::from(spans))
        .alignment(word_alignment)
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);

    let attempt = if game.is_running() {
        Line::from(vec![
            Span::styled("> ", dim_bold_style),
            Span::styled(game.input.clone(), bold_style),
            Span::styled("_", dim_bold_style),
        ])
    } else {
        Line::from(Span::styled("> (paused)", dim_bold_style))
    };
    Paragraph::new(attempt)
        .alignment(Alignment::Center)
        .render(chunks[6], buf);

    Paragraph::new(Span::styled(
        format!("+{}s per correct word", TIME_BONUS_SECS),
        Style::default().fg(Color::Gray).patch(italic_style),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);

    let hints = if game.is_running() {
        "(tab) pause / (enter) submit / (esc) quit"
    } else {
        "(tab) start / (esc) quit"
    };
    Paragraph::new(Span::styled(hints, italic_style))
        .alignment(Alignment::Center)
        .render(chunks[9], buf);
}

fn render_game_over(app: &App, area: Rect, buf: &mut Buffer) {
    let game = &app.game;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1), // title
                Constraint::Length(2),
                Constraint::Length(1), // score
                Constraint::Length(1), // best
                Constraint::Length(1), // medal
                Constraint::Length(1), // max combo
                Constraint::Length(2),
                Constraint::Length(1), // new record badge
                Constraint::Min(1),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(Span::styled(
        "GAME OVER",
        Style::default().patch(bold_style).fg(Color::Red),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("score {}", game.score),
        bold_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        format!("best {}", game.high_score),
        Style::default().patch(bold_style).fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        format!("medal: {}", game.medal()),
        Style::default().patch(bold_style).fg(Color::Cyan),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    Paragraph::new(Span::styled(
        format!("max combo: {}x", game.max_combo),
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);

    if game.is_new_record() {
        Paragraph::new(Span::styled(
            "NEW RECORD!",
            Style::default()
                .patch(bold_style)
                .fg(Color::Rgb(255, 138, 0)),
        ))
        .alignment(Alignment::Center)
        .render(chunks[8], buf);
    }

    Paragraph::new(Span::styled("(r)estart / (esc)ape", italic_style))
        .alignment(Alignment::Center)
        .render(chunks[10], buf);

    if game.celebration.is_active {
        render_confetti(&game.celebration, area, buf);
    }
}

/// Paint confetti pieces on top of the game-over screen
fn render_confetti(confetti: &crate::celebration::Confetti, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
        Color::LightYellow,
    ];

    for piece in &confetti.pieces {
        if piece.x < 0.0 || piece.y < 0.0 {
            continue;
        }
        let x = piece.x as u16;
        let y = piece.y as u16;

        if x < area.width && y < area.height {
            let color = colors[piece.color_index % colors.len()];

            // Fade with age
            let alpha = 1.0 - (piece.age / piece.max_age);
            let style = if alpha > 0.7 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if alpha > 0.3 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&piece.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::score::MemoryScoreStore;
    use crate::words::WordBank;

    fn create_test_app(word: &str) -> App {
        let bank = WordBank {
            name: "test".to_string(),
            words: vec![word.to_string()],
        };
        let game = Game::new(bank, Box::new(MemoryScoreStore::new()));
        App {
            cli: None,
            game,
            second_ticks: 0,
        }
    }

    fn render_to_string(app: &App, width: u16, height: u16) -> String {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_idle_screen_shows_word_and_start_hint() {
        let app = create_test_app("apple");
        let rendered = render_to_string(&app, 80, 24);

        assert!(rendered.contains("apple"));
        assert!(rendered.contains("SCORE 0"));
        assert!(rendered.contains("BEST 0"));
        assert!(rendered.contains("time left: 30s"));
        assert!(rendered.contains("(tab) start"));
        assert!(rendered.contains("(paused)"));
    }

    #[test]
    fn test_active_screen_shows_attempt_and_pause_hint() {
        let mut app = create_test_app("apple");
        app.game.start_pause();
        app.game.write('a');
        app.game.write('p');

        let rendered = render_to_string(&app, 80, 24);

        assert!(rendered.contains("ap"));
        assert!(rendered.contains("(tab) pause"));
        assert!(!rendered.contains("(paused)"));
    }

    #[test]
    fn test_combo_readout_appears_after_first_hit() {
        let mut app = create_test_app("apple");

        let rendered = render_to_string(&app, 80, 24);
        assert!(!rendered.contains("COMBO"));

        app.game.start_pause();
        for c in "apple".chars() {
            app.game.write(c);
        }
        app.game.submit();

        let rendered = render_to_string(&app, 80, 24);
        assert!(rendered.contains("1x COMBO"));
    }

    #[test]
    fn test_game_over_screen_contents() {
        let mut app = create_test_app("apple");
        app.game.start_pause();
        for c in "apple".chars() {
            app.game.write(c);
        }
        app.game.submit();
        app.game.time_left = 1;
        app.game.tick();

        let rendered = render_to_string(&app, 80, 24);

        assert!(rendered.contains("GAME OVER"));
        assert!(rendered.contains("score 1"));
        assert!(rendered.contains("best 1"));
        assert!(rendered.contains("medal: Participant"));
        assert!(rendered.contains("max combo: 1x"));
        assert!(rendered.contains("NEW RECORD!"));
        assert!(rendered.contains("(r)estart"));
    }

    #[test]
    fn test_game_over_without_record_has_no_badge() {
        let mut app = create_test_app("apple");
        app.game.start_pause();
        app.game.time_left = 1;
        app.game.tick();

        let rendered = render_to_string(&app, 80, 24);

        assert!(rendered.contains("GAME OVER"));
        assert!(!rendered.contains("NEW RECORD!"));
    }

    #[test]
    fn test_confetti_overlay_renders() {
        let mut app = create_test_app("apple");
        app.game.start_pause();
        for c in "apple".chars() {
            app.game.write(c);
        }
        app.game.submit();
        app.game.time_left = 1;
        app.game.tick();
        app.game.start_celebration_if_record(80, 24);
        assert!(app.game.celebration.is_active);

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        assert!(!buffer.content().is_empty());
    }

    #[test]
    fn test_low_time_renders() {
        let mut app = create_test_app("apple");
        app.game.time_left = 3;

        let rendered = render_to_string(&app, 80, 24);
        assert!(rendered.contains("time left: 3s"));
    }

    #[test]
    fn test_render_small_area_does_not_panic() {
        let app = create_test_app("apple");

        for (w, h) in [(10, 5), (20, 8), (200, 3), (1, 1)] {
            let area = Rect::new(0, 0, w, h);
            let mut buffer = Buffer::empty(area);
            (&app).render(area, &mut buffer);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn test_long_word_renders() {
        let app = create_test_app("dragonfruit dragonfruit dragonfruit dragonfruit");

        let area = Rect::new(0, 0, 30, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);
        assert_eq!(*buffer.area(), area);
    }

    #[test]
    fn test_combo_color_thresholds() {
        assert_eq!(combo_color(0), Color::White);
        assert_eq!(combo_color(3), Color::White);
        assert_eq!(combo_color(4), Color::Yellow);
        assert_eq!(combo_color(7), Color::Rgb(255, 138, 0));
        assert_eq!(combo_color(10), Color::Red);
        assert_eq!(combo_color(42), Color::Red);
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 5);
        assert_eq!(VERTICAL_MARGIN, 2);
    }
}
