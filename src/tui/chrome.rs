// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
fn stack_sidebar_below_map(area: Rect) -> bool {
    area.width < SIDEBAR_MIN_MAP_WIDTH + SIDEBAR_WIDTH
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Map,
    Chat,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Map => Self::Chat,
            Self::Chat => Self::Map,
        }
    }
}

fn panel_border_style_for_focus(theme: &TuiTheme, active: Focus, panel: Focus) -> Style {
    theme.panel_border_style(active == panel)
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn chat_view_title(context: Option<&str>) -> String {
    let tail = context.map(|name| format!("· О: {name}"));
    view_title(CHAT_TITLE, 'c', tail.as_deref())
}

fn photo_counter_label(panel: &DetailPanel) -> String {
    match panel.counter_label() {
        Some(counter) => format!("[{counter}]"),
        None => "[0/0]".to_owned(),
    }
}

fn clamp_usize_to_u16(value: usize) -> u16 {
    value.min(u16::MAX as usize) as u16
}

/// Greedy word wrap by character count. Words longer than `width` are split.
fn wrap_plain(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                lines.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }
            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }
        lines.push(line);
    }
    lines
}

fn footer_help_line(app: &App, compact: bool) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    if app.help_visible {
        push_footer_entry(&mut spans, "CLOSE", "?/Esc");
    } else {
        match app.focus {
            Focus::Map => {
                push_footer_entry(&mut spans, "ZONE", "Tab");
                push_footer_entry(&mut spans, "OPEN", "⏎");
                if !compact {
                    push_footer_entry_maybe_disabled(
                        &mut spans,
                        "PHOTO",
                        "←/→",
                        !app.panel.has_carousel(),
                    );
                    push_footer_entry_maybe_disabled(
                        &mut spans,
                        "CLOSE",
                        "Esc",
                        !app.panel.is_open(),
                    );
                }
                push_footer_entry(&mut spans, "CHAT", "c");
                push_footer_entry(&mut spans, "HELP", "?");
                push_footer_entry(&mut spans, "QUIT", "q");
            }
            Focus::Chat => {
                push_footer_entry_maybe_disabled(&mut spans, "SEND", "⏎", app.chat.is_pending());
                push_footer_entry(&mut spans, "MAP", "Esc");
            }
        }
    }

    if let Some(toast) = app.toast.as_deref() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(
            "Toast:".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::raw(toast.to_owned()));
    }

    Line::from(spans)
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_MAP_KEYS: &[(&str, &str)] = &[
    ("mouse", "наведите на зону, чтобы увидеть подсказку; щелчок открывает карточку"),
    ("Tab/Shift-Tab", "перейти к следующей/предыдущей зоне"),
    ("Enter/Space", "открыть карточку выделенной зоны"),
    ("←/→, h/l", "листать фотографии"),
    ("Esc", "закрыть карточку"),
    ("c", "открыть чат с гидом"),
    ("q, Ctrl-C", "выход"),
];

const HELP_CHAT_KEYS: &[(&str, &str)] = &[
    ("Enter", "отправить вопрос"),
    ("Backspace", "стереть символ"),
    ("Esc", "вернуться к карте"),
];

fn render_help(frame: &mut Frame<'_>, theme: &TuiTheme, main_area: Rect) {
    let area = centered_rect(76, 70, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = HELP_MAP_KEYS
        .iter()
        .chain(HELP_CHAT_KEYS)
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Карта ---", header_style)));
    for (key, desc) in HELP_MAP_KEYS {
        lines.push(help_kv(key, desc, key_col_width, key_style));
    }
    lines.push(Line::from(String::new()));
    lines.push(Line::from(Span::styled("--- Чат ---", header_style)));
    for (key, desc) in HELP_CHAT_KEYS {
        lines.push(help_kv(key, desc, key_col_width, key_style));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.panel_border_style(true))
        .title(" Справка ");
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(footer_value_span(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_span(value: &str, disabled: bool) -> Span<'static> {
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    Span::styled(
        value.to_owned(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
