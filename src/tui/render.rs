//! Wizard Rendering
//!
//! Draws the step indicator, progress bar, active panel, navigation hints,
//! toast and success view from the `Screen` projection.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use crate::application::{
    ChoiceGroup, ErrorTarget, FieldKind, StepMarker, TOTAL_STEPS, ToastKind, step_title,
};

use super::app::{App, Control};

const BRAND_BLUE: Color = Color::Rgb(70, 130, 180);
const BRAND_GOLD: Color = Color::Rgb(218, 165, 32);
const ACCENT_GOLD: Color = Color::Rgb(184, 134, 11);
const ERROR_RED: Color = Color::Rgb(220, 80, 80);
const SUCCESS_GREEN: Color = Color::Rgb(80, 180, 110);

/// Render the whole wizard
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let box_width = 78u16.min(area.width.saturating_sub(2));

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .flex(Flex::Center)
        .constraints([Constraint::Length(box_width)])
        .split(area);
    let outer = h_chunks[0];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BRAND_BLUE))
        .title(Span::styled(
            " Partnership Application ",
            Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(outer);
    f.render_widget(block, outer);

    if let Some(reference) = &app.screen.success {
        render_success(f, inner, reference.as_deref());
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(2),
            ])
            .split(inner);

        render_indicator(f, chunks[0], app);
        render_progress(f, chunks[1], app);
        render_panel(f, chunks[2], app);
        render_footer(f, chunks[3], app);
    }

    if let Some(toast) = &app.screen.toast {
        render_toast(f, outer, &toast.message, toast.kind);
    }
}

/// Step circles (numeral, or a tick for validated steps) and their labels
fn render_indicator(f: &mut Frame, area: Rect, app: &App) {
    let screen = &app.screen;
    let mut circles: Vec<Span<'static>> = Vec::new();
    for i in 0..TOTAL_STEPS {
        let glyph = if screen.ticks[i] {
            "✓".to_string()
        } else {
            (i + 1).to_string()
        };
        let style = match screen.markers[i] {
            StepMarker::Active => Style::default()
                .fg(Color::Black)
                .bg(BRAND_GOLD)
                .add_modifier(Modifier::BOLD),
            StepMarker::Completed => Style::default().fg(BRAND_BLUE).add_modifier(Modifier::BOLD),
            StepMarker::Upcoming => Style::default().fg(Color::DarkGray),
        };
        if i > 0 {
            let connector = if screen.markers[i] == StepMarker::Upcoming {
                Color::DarkGray
            } else {
                BRAND_BLUE
            };
            circles.push(Span::styled(" ── ", Style::default().fg(connector)));
        }
        circles.push(Span::styled(format!("({glyph})"), style));
    }

    let active = screen
        .markers
        .iter()
        .position(|m| *m == StepMarker::Active)
        .unwrap_or(0);

    let lines = vec![
        Line::from(circles),
        Line::from(Span::styled(
            screen.labels[active].clone(),
            Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "[F1-F5] jump to step",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(BRAND_BLUE).bg(Color::Rgb(30, 30, 30)))
        .ratio(app.screen.progress / 100.0)
        .label(format!("{:.0}%", app.screen.progress));
    f.render_widget(gauge, area);
}

/// Controls of the active step with their inline errors
fn render_panel(f: &mut Frame, area: Rect, app: &App) {
    let now = Instant::now();
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut focused_line = 0usize;

    for (idx, control) in app.controls().into_iter().enumerate() {
        let focused = idx == app.focus;
        if focused {
            focused_line = lines.len();
        }
        render_control(&mut lines, app, control, focused, area.width as usize);

        if let Some(target) = error_target(control)
            && let Some(message) = app.screen.error(target)
        {
            let mut style = Style::default().fg(ERROR_RED);
            if app.screen.is_flagged(target, now) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(format!("     ! {}", message), style)));
        }
        lines.push(Line::from(""));
    }

    let visible = area.height as usize;
    let scroll = if focused_line + 3 > visible {
        (focused_line + 3 - visible) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let paragraph = if scroll > 0 {
        paragraph.scroll((scroll, 0))
    } else {
        paragraph
    };
    f.render_widget(paragraph, area);
}

fn render_control(
    lines: &mut Vec<Line<'static>>,
    app: &App,
    control: Control,
    focused: bool,
    width: usize,
) {
    let form = &app.wizard.form;
    let pointer = Span::styled(
        if focused { " > " } else { "   " },
        Style::default().fg(ACCENT_GOLD),
    );
    let label_style = if focused {
        Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    match control {
        Control::Field(field) => {
            let label = if field.is_optional() {
                format!("{} (optional)", field.label())
            } else {
                field.label().to_string()
            };
            lines.push(Line::from(vec![pointer, Span::styled(label, label_style)]));

            let value = form.value(field);
            let shown = match field.kind() {
                FieldKind::Select(_) if value.is_empty() => "‹ choose ›".to_string(),
                FieldKind::Select(_) => format!("‹ {} ›", value),
                FieldKind::Text | FieldKind::TextArea => {
                    let room = width.saturating_sub(7);
                    if focused {
                        format!("{}▏", fit_tail(value, room))
                    } else {
                        fit_tail(value, room)
                    }
                }
            };
            lines.push(Line::from(Span::styled(
                format!("     {}", shown),
                Style::default().fg(if value.is_empty() {
                    Color::DarkGray
                } else {
                    Color::Cyan
                }),
            )));
        }
        Control::WhatsApp => {
            lines.push(Line::from(vec![
                pointer,
                checkbox(form.is_whatsapp),
                Span::styled(" This number is on WhatsApp", label_style),
            ]));
        }
        Control::Group(group) => {
            lines.push(Line::from(vec![
                pointer,
                Span::styled(group.label().to_string(), label_style),
            ]));
            match group {
                ChoiceGroup::CurrentEnglishTraining | ChoiceGroup::DemoCall => {
                    let selected = if group == ChoiceGroup::DemoCall {
                        form.demo_call.as_deref()
                    } else {
                        form.current_english_training.as_deref()
                    };
                    let mut spans = vec![Span::raw("     ")];
                    for option in group.options() {
                        let on = selected == Some(*option);
                        spans.push(Span::styled(
                            format!("{} {}   ", if on { "(•)" } else { "( )" }, option),
                            Style::default().fg(if on { BRAND_GOLD } else { Color::DarkGray }),
                        ));
                    }
                    lines.push(Line::from(spans));
                }
                ChoiceGroup::TargetSegments => {
                    for (i, segment) in group.options().iter().enumerate() {
                        let on = form.target_segments.iter().any(|s| s == segment);
                        let cursor = focused && i == app.segment_cursor;
                        lines.push(Line::from(vec![
                            Span::styled(
                                if cursor { "   › " } else { "     " },
                                Style::default().fg(ACCENT_GOLD),
                            ),
                            checkbox(on),
                            Span::styled(
                                format!(" {}", segment),
                                Style::default().fg(if cursor { BRAND_GOLD } else { Color::White }),
                            ),
                        ]));
                    }
                }
                ChoiceGroup::AgreeToTerms | ChoiceGroup::Authority => {
                    lines.push(Line::from(vec![
                        Span::raw("     "),
                        checkbox(form.is_checked(group)),
                    ]));
                }
            }
        }
        Control::Verification => {
            lines.push(Line::from(vec![
                pointer,
                Span::styled("Security verification token", label_style),
            ]));
            let shown = match form.verification_token.as_deref() {
                Some(token) => mask(token),
                None => "paste the token from the verification page".to_string(),
            };
            lines.push(Line::from(Span::styled(
                format!("     {}", shown),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    let text = |t: &'static str| Span::styled(t, Style::default().fg(Color::White));

    let buttons = app.screen.buttons;
    let mut spans: Vec<Span<'static>> = Vec::new();
    if buttons.prev {
        spans.push(key(" [Esc] ", Color::Red));
        spans.push(text("Back  "));
    }
    spans.push(key("[Tab] ", BRAND_BLUE));
    spans.push(text("Next Field  "));
    if buttons.next {
        spans.push(key("[Enter] ", ACCENT_GOLD));
        spans.push(text("Continue  "));
    }
    if buttons.submit {
        if app.screen.loading {
            spans.push(Span::styled(
                "Submitting...",
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(key("[Enter] ", ACCENT_GOLD));
            spans.push(text("Submit Application  "));
        }
    }
    spans.push(key("[Ctrl-C] ", Color::DarkGray));
    spans.push(text("Quit"));

    let lines = vec![Line::from(""), Line::from(spans)];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_success(f: &mut Frame, area: Rect, reference: Option<&str>) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✓ Application submitted",
            Style::default()
                .fg(SUCCESS_GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Thank you. Our partnerships team will be in touch."),
    ];
    if let Some(reference) = reference {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Reference number: "),
            Span::styled(
                reference.to_string(),
                Style::default().fg(BRAND_GOLD).add_modifier(Modifier::BOLD),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Close",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_toast(f: &mut Frame, outer: Rect, message: &str, kind: ToastKind) {
    let color = match kind {
        ToastKind::Error => ERROR_RED,
        ToastKind::Success => SUCCESS_GREEN,
    };
    let width = outer.width.saturating_sub(4);
    let area = Rect {
        x: outer.x + 2,
        y: outer.y + outer.height.saturating_sub(4),
        width,
        height: 3.min(outer.height),
    };
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(message.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
        area,
    );
}

/// Keep the end of `text` within `max` columns, marking the cut with an ellipsis
fn fit_tail(text: &str, max: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if text.width() <= max {
        return text.to_string();
    }
    let mut kept: Vec<char> = Vec::new();
    let mut used = 1;
    for c in text.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        kept.push(c);
    }
    let tail: String = kept.into_iter().rev().collect();
    format!("…{}", tail)
}

fn checkbox(checked: bool) -> Span<'static> {
    if checked {
        Span::styled("[x]", Style::default().fg(BRAND_GOLD))
    } else {
        Span::styled("[ ]", Style::default().fg(Color::DarkGray))
    }
}

/// Show only the tail of the token
fn mask(token: &str) -> String {
    let count = token.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count.min(12) - 4), tail)
}

fn error_target(control: Control) -> Option<ErrorTarget> {
    match control {
        Control::Field(field) => Some(ErrorTarget::Field(field)),
        Control::Group(group) => Some(ErrorTarget::Group(group)),
        Control::Verification => Some(ErrorTarget::Verification),
        Control::WhatsApp => None,
    }
}

/// Plain title of the active step, for the terminal window title
pub fn window_title(step: usize) -> String {
    format!("Partnership Application - {}", step_title(step))
}
