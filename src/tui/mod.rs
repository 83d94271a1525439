// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Interactive visitor map (ratatui + crossterm, mouse enabled): the rasterized site plan with
//! hover tooltips, the detail panel for the selected animal and the guide chat. Guide replies are
//! generated on the tokio runtime and handed back to the event loop through a channel.

use std::{error::Error, io, sync::Arc, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::{runtime::Handle, sync::mpsc};

use crate::chat::{generate_with_timeout, ChatRole, ChatSession, GenerateError, TextGenerator};
use crate::layout::layout_zones;
use crate::model::{Catalog, Point};
use crate::panel::{DetailPanel, ImageResolver};
use crate::render::text::truncate_with_ellipsis;
use crate::render::{rasterize, CanvasError, CellKind, MapRaster};
use crate::ui::{place_tooltip, MapInteraction, TOOLTIP_IMAGE_PLACEHOLDER};

mod theme;

use theme::TuiTheme;

const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;

const HEADER_TITLE: &str = "Вольерный комплекс «Лаура»";
const MAP_TITLE: &str = "Карта комплекса";
const LEGEND_HINT: &str = "Нажмите на зеленые зоны, чтобы узнать о животных.";
const CHAT_TITLE: &str = "Гид Заповедника";
const THINKING_TEXT: &str = "Думаю...";
const USER_PREFIX: &str = "Вы: ";
const GUIDE_PREFIX: &str = "Гид: ";

const SIDEBAR_WIDTH: u16 = 44;
const SIDEBAR_MIN_MAP_WIDTH: u16 = 60;
const TOOLTIP_MAX_WIDTH: u16 = 36;
const TOOLTIP_MAX_DESCRIPTION_LINES: usize = 3;
/// Rows between the pointer and the tooltip's bottom edge.
const TOOLTIP_ROW_OFFSET: f64 = 1.0;

type Reply = Result<String, GenerateError>;

/// Runs the interactive visitor map until the visitor quits.
pub fn run(app: App) -> Result<(), Box<dyn Error>> {
    let mut app = app;
    app.theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.drain_replies();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// State of one visitor session in the terminal.
pub struct App {
    catalog: Catalog,
    interaction: MapInteraction,
    panel: DetailPanel,
    chat: ChatSession,
    chat_open: bool,
    focus: Focus,
    help_visible: bool,
    should_quit: bool,
    toast: Option<String>,
    theme: TuiTheme,
    resolver: Box<dyn ImageResolver + Send>,
    generator: Arc<dyn TextGenerator>,
    chat_timeout: Option<Duration>,
    runtime: Handle,
    replies_tx: mpsc::UnboundedSender<Reply>,
    replies_rx: mpsc::UnboundedReceiver<Reply>,
    raster: Option<MapRaster>,
    /// Inner area of the map block from the last draw, for mouse hit-testing.
    map_area: Rect,
}

impl App {
    pub fn new(
        catalog: Catalog,
        generator: Arc<dyn TextGenerator>,
        resolver: Box<dyn ImageResolver + Send>,
        runtime: Handle,
    ) -> Self {
        let (replies_tx, replies_rx) = mpsc::unbounded_channel();
        Self {
            catalog,
            interaction: MapInteraction::default(),
            panel: DetailPanel::default(),
            chat: ChatSession::new(),
            chat_open: false,
            focus: Focus::Map,
            help_visible: false,
            should_quit: false,
            toast: None,
            theme: TuiTheme::default(),
            resolver,
            generator,
            chat_timeout: None,
            runtime,
            replies_tx,
            replies_rx,
            raster: None,
            map_area: Rect::default(),
        }
    }

    pub fn with_chat_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.chat_timeout = timeout;
        self
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return true;
        }
        self.handle_key_code(key.code)
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.help_visible {
            if matches!(code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.help_visible = false;
                return true;
            }
            return false;
        }

        match self.focus {
            Focus::Map => self.handle_map_key(code),
            Focus::Chat => self.handle_chat_key(code),
        }
    }

    fn handle_map_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.help_visible = true,
            KeyCode::Tab => self.cycle_hover(true),
            KeyCode::BackTab => self.cycle_hover(false),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(idx) = self.hovered_zone_index() else {
                    return false;
                };
                self.select_zone(idx);
            }
            KeyCode::Esc => {
                if self.interaction.selection().is_none() {
                    return false;
                }
                self.close_panel();
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(']') => {
                if !self.panel.has_carousel() {
                    return false;
                }
                self.panel.next();
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('[') => {
                if !self.panel.has_carousel() {
                    return false;
                }
                self.panel.previous();
            }
            KeyCode::Char('c') => {
                self.chat_open = true;
                self.focus = self.focus.cycle();
            }
            _ => return false,
        }
        true
    }

    fn handle_chat_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => self.focus = self.focus.cycle(),
            KeyCode::Enter => return self.submit_chat(),
            KeyCode::Backspace => {
                if self.chat.draft_mut().pop().is_none() {
                    return false;
                }
            }
            KeyCode::Char(ch) => self.chat.draft_mut().push(ch),
            _ => return false,
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let cell = self.map_cell_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.hover_cell(cell),
            MouseEventKind::Down(MouseButton::Left) => {
                self.hover_cell(cell);
                if let Some(idx) = cell.and_then(|(col, row)| self.zone_index_at(col, row)) {
                    self.select_zone(idx);
                }
            }
            _ => {}
        }
    }

    /// Map-local cell under the terminal position, if it lies on the map.
    fn map_cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.map_area;
        let inside = column >= area.x
            && column < area.x.saturating_add(area.width)
            && row >= area.y
            && row < area.y.saturating_add(area.height);
        inside.then(|| ((column - area.x) as usize, (row - area.y) as usize))
    }

    fn zone_index_at(&self, col: usize, row: usize) -> Option<usize> {
        self.raster.as_ref()?.zone_at(col, row)
    }

    fn hover_cell(&mut self, cell: Option<(usize, usize)>) {
        let Some((col, row)) = cell else {
            self.interaction.track_hover(None);
            return;
        };
        if let Some(raster) = &self.raster {
            self.interaction
                .pointer_move(raster.cell_to_logical(col, row));
        }
        let hit = self
            .zone_index_at(col, row)
            .and_then(|idx| self.catalog.zones().get(idx))
            .map(|zone| zone.id().clone());
        self.interaction.track_hover(hit.as_ref());
    }

    fn hovered_zone_index(&self) -> Option<usize> {
        let hovered = self.interaction.hovered_zone_id()?;
        self.catalog
            .zones()
            .iter()
            .position(|zone| zone.id() == hovered)
    }

    /// Keyboard hover: moves to the next zone in drawing order and points at its label.
    fn cycle_hover(&mut self, forward: bool) {
        let count = self.catalog.zones().len();
        if count == 0 {
            return;
        }
        let next = match (self.hovered_zone_index(), forward) {
            (Some(idx), true) => (idx + 1) % count,
            (Some(idx), false) => (idx + count - 1) % count,
            (None, true) => 0,
            (None, false) => count - 1,
        };
        let zone = &self.catalog.zones()[next];
        self.interaction.pointer_move(zone.label_anchor());
        self.interaction.track_hover(Some(zone.id()));
    }

    fn select_zone(&mut self, idx: usize) {
        let Some(zone) = self.catalog.zones().get(idx) else {
            return;
        };
        self.interaction.click_zone(zone);
        match self.catalog.animal_for_zone(zone) {
            Some(animal) => {
                tracing::info!(zone = %zone.id(), animal = %animal.id(), "zone selected");
                self.panel.display(animal.clone());
            }
            None => {
                tracing::warn!(
                    zone = %zone.id(),
                    animal = %zone.animal_id(),
                    "zone refers to an unknown animal"
                );
                self.panel.close();
            }
        }
    }

    fn close_panel(&mut self) {
        self.interaction.close();
        self.panel.close();
    }

    /// Name of the animal in the detail panel, sent along with chat questions.
    fn chat_context(&self) -> Option<String> {
        self.panel.animal().map(|animal| animal.name().to_owned())
    }

    fn submit_chat(&mut self) -> bool {
        let context = self.chat_context();
        let Some(request) = self.chat.submit_draft(context.as_deref()) else {
            return false;
        };

        let generator = Arc::clone(&self.generator);
        let replies = self.replies_tx.clone();
        let timeout = self.chat_timeout;
        self.runtime.spawn(async move {
            let outcome = generate_with_timeout(
                generator.as_ref(),
                &request.user_text,
                request.context.as_deref(),
                timeout,
            )
            .await;
            if replies.send(outcome).is_err() {
                tracing::debug!("guide reply arrived after the UI closed");
            }
        });
        true
    }

    fn drain_replies(&mut self) {
        while let Ok(outcome) = self.replies_rx.try_recv() {
            self.chat.complete(outcome);
        }
    }

    fn ensure_raster(&mut self, width: usize, height: usize) -> Result<(), CanvasError> {
        if self
            .raster
            .as_ref()
            .is_some_and(|raster| raster.width() == width && raster.height() == height)
        {
            return Ok(());
        }
        let layouts = layout_zones(&self.catalog, None, None);
        self.raster = Some(rasterize(&layouts, width, height)?);
        Ok(())
    }

    fn map_text(&self) -> Text<'static> {
        let Some(raster) = &self.raster else {
            return Text::default();
        };
        let layouts = layout_zones(
            &self.catalog,
            self.interaction.hovered_zone_id().map(|id| id.as_str()),
            self.interaction.active_zone_id().map(|id| id.as_str()),
        );

        let mut lines = Vec::with_capacity(raster.height());
        for row in 0..raster.height() {
            let mut spans = Vec::<Span<'static>>::new();
            let mut run = String::new();
            let mut run_style: Option<Style> = None;
            for col in 0..raster.width() {
                let style = match raster.kind_at(col, row) {
                    Some(CellKind::River) => self.theme.river_style(),
                    Some(CellKind::Bridge) => self.theme.bridge_style(),
                    Some(CellKind::Zone(idx)) => self.theme.zone_fill_style(&layouts[idx].style),
                    Some(CellKind::Outline(idx)) => {
                        self.theme.zone_outline_style(&layouts[idx].style)
                    }
                    Some(CellKind::Label(idx)) => self.theme.zone_label_style(&layouts[idx].style),
                    Some(CellKind::Ground) | None => self.theme.ground_style(),
                };
                if run_style.is_some_and(|current| current != style) {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
                }
                run_style = Some(style);
                run.push(raster.canvas().get(col, row).unwrap_or(' '));
            }
            if let Some(style) = run_style {
                spans.push(Span::styled(run, style));
            }
            lines.push(Line::from(spans));
        }
        Text::from(lines)
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let (header_area, main_area, footer_area) = (rows[0], rows[1], rows[2]);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(HEADER_TITLE, app.theme.title_style()),
            Span::styled(" · интерактивная карта", app.theme.dim_style()),
        ])),
        header_area,
    );

    let sidebar_visible = app.panel.is_open() || app.chat_open;
    let (map_area, sidebar_area) = if sidebar_visible {
        let panes = if stack_sidebar_below_map(main_area) {
            Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(main_area)
        } else {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(SIDEBAR_WIDTH)])
                .split(main_area)
        };
        (panes[0], Some(panes[1]))
    } else {
        (main_area, None)
    };

    draw_map(frame, app, map_area);

    if let Some(sidebar_area) = sidebar_area {
        match (app.panel.is_open(), app.chat_open) {
            (true, true) => {
                let parts = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .split(sidebar_area);
                draw_panel(frame, app, parts[0]);
                draw_chat(frame, app, parts[1]);
            }
            (true, false) => draw_panel(frame, app, sidebar_area),
            (false, _) => draw_chat(frame, app, sidebar_area),
        }
    }

    let compact = footer_area.width < 80;
    frame.render_widget(Paragraph::new(footer_help_line(app, compact)), footer_area);

    if app.help_visible {
        render_help(frame, &app.theme, main_area);
    }
}

fn draw_map(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style_for_focus(&app.theme, app.focus, Focus::Map))
        .title(view_title(MAP_TITLE, 'm', None))
        .title_bottom(Line::from(Span::styled(
            format!(" {LEGEND_HINT} "),
            app.theme.dim_style(),
        )));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.map_area = inner;

    if let Err(err) = app.ensure_raster(inner.width as usize, inner.height as usize) {
        tracing::error!(error = %err, "map rasterization failed");
        app.toast = Some(format!("Карта недоступна: {err}"));
        return;
    }
    frame.render_widget(Paragraph::new(app.map_text()), inner);
    draw_tooltip(frame, app, inner);
}

fn draw_tooltip(frame: &mut Frame<'_>, app: &App, map: Rect) {
    let Some(raster) = &app.raster else {
        return;
    };
    let Some(tooltip) = app.interaction.tooltip(&app.catalog) else {
        return;
    };
    if map.width < 4 || map.height < 3 {
        return;
    }

    let width = TOOLTIP_MAX_WIDTH.min(map.width);
    let text_width = usize::from(width.saturating_sub(2));
    let mut lines = vec![Line::from(Span::styled(
        truncate_with_ellipsis(tooltip.name, text_width),
        app.theme.title_style(),
    ))];
    lines.extend(
        wrap_plain(tooltip.short_description, text_width)
            .into_iter()
            .filter(|line| !line.is_empty())
            .take(TOOLTIP_MAX_DESCRIPTION_LINES)
            .map(Line::from),
    );
    let image = app
        .resolver
        .resolve_or(tooltip.image, TOOLTIP_IMAGE_PLACEHOLDER);
    lines.push(Line::from(Span::styled(
        truncate_with_ellipsis(&format!("фото: {image}"), text_width),
        app.theme.dim_style(),
    )));

    let height = clamp_usize_to_u16(lines.len() + 2).min(map.height);
    let (col, row) = raster.logical_to_cell(tooltip.anchor);
    let Some(placement) = place_tooltip(
        Point::new(col as f64, row as f64),
        f64::from(width),
        f64::from(height),
        TOOLTIP_ROW_OFFSET,
        f64::from(map.width),
        f64::from(map.height),
    ) else {
        return;
    };
    // Borders plus the name line.
    let height = placement.height as u16;
    if height < 3 {
        return;
    }
    let rect = Rect::new(
        map.x + placement.x as u16,
        map.y + placement.y as u16,
        width,
        height,
    );

    frame.render_widget(Clear, rect);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(true));
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), rect);
}

fn draw_panel(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(animal) = app.panel.animal() else {
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.panel_border_style(app.focus == Focus::Map))
        .title(Span::styled(format!(" {} ", animal.name()), app.theme.title_style()))
        .title_bottom(Line::from(Span::styled(
            format!(" фото {} ", photo_counter_label(&app.panel)),
            app.theme.dim_style(),
        )));
    let inner_width = usize::from(block.inner(area).width);

    let mut lines = Vec::<Line<'static>>::new();
    if !animal.scientific_name().is_empty() {
        lines.push(Line::from(Span::styled(
            animal.scientific_name().to_owned(),
            app.theme.dim_style().add_modifier(Modifier::ITALIC),
        )));
    }
    let status = animal.conservation_status();
    lines.push(Line::from(vec![
        Span::styled(format!(" {} ", status.label()), app.theme.status_badge_style(status)),
        Span::raw(" "),
        Span::styled(status.code().to_owned(), app.theme.dim_style()),
    ]));
    lines.push(Line::from(String::new()));

    if let Some(image) = app.panel.resolved_image(app.resolver.as_ref()) {
        let mut photo = vec![Span::raw(format!("Фото {}", photo_counter_label(&app.panel)))];
        if app.panel.has_carousel() {
            photo.push(Span::styled("  ←/→", help_key_style()));
        }
        lines.push(Line::from(photo));
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(&image, inner_width),
            app.theme.dim_style(),
        )));
        lines.push(Line::from(String::new()));
    }

    lines.push(Line::from(animal.description().to_owned()));

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_chat(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let context = app.chat_context();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(panel_border_style_for_focus(&app.theme, app.focus, Focus::Chat))
        .title(chat_view_title(context.as_deref()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    let (log_area, input_area) = (parts[0], parts[1]);
    let width = usize::from(log_area.width);

    let mut lines = Vec::<Line<'static>>::new();
    for message in app.chat.messages() {
        let (prefix, style) = match (message.role(), message.is_error()) {
            (_, true) => (GUIDE_PREFIX, app.theme.error_style()),
            (ChatRole::User, false) => (USER_PREFIX, app.theme.user_message_style()),
            (ChatRole::Model, false) => (GUIDE_PREFIX, app.theme.model_message_style()),
        };
        for line in wrap_plain(&format!("{prefix}{}", message.text()), width) {
            lines.push(Line::from(Span::styled(line, style)));
        }
    }
    if app.chat.is_pending() {
        lines.push(Line::from(Span::styled(
            format!("{GUIDE_PREFIX}{THINKING_TEXT}"),
            app.theme.dim_style().add_modifier(Modifier::ITALIC),
        )));
    }

    let skip = lines.len().saturating_sub(usize::from(log_area.height));
    let visible: Vec<Line<'static>> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(Text::from(visible)), log_area);

    let cursor = if app.focus == Focus::Chat { "▏" } else { "" };
    let draft = app.chat.draft();
    let room = width.saturating_sub(3);
    let shown: String = {
        let chars: Vec<char> = draft.chars().collect();
        chars[chars.len().saturating_sub(room)..].iter().collect()
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", help_key_style()),
            Span::raw(shown),
            Span::raw(cursor),
        ])),
        input_area,
    );
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}


#[cfg(test)]
mod tests;
