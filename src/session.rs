//! Navigation session: the page runtime as a headless state machine.
//!
//! `static/terminal.js` drives the generated page; this module is the same
//! machine without a DOM. It is what `termfolio replay` runs and what the
//! tests pin down, so the two must move in lockstep.
//!
//! All state lives in one [`Session`]: the input mode, the active view, the
//! single remembered previous view, per-container [`ViewState`]s and the
//! theme that is applied versus the one currently on screen. Only
//! [`Session::handle_key`] and the pointer helpers mutate it, one event at a
//! time.
//!
//! ```text
//!             ':'                      "themes" + Enter
//!   Normal ─────────▶ CommandEntry ─────────────────────▶ ThemePicker
//!     ▲  ◀───────────────┘ Enter / Escape                    │
//!     └──────────────────────────────────────────────────────┘
//!                                          Enter (commit) / Escape (revert)
//! ```

use crate::types::{LineRecord, ViewPayload};
use crate::view::{BLOG_POST_VIEW, ROOT_VIEW, ViewId};
use log::{debug, warn};
use std::collections::HashMap;

/// A key as reported by the browser's `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Parse a DOM key name (`"j"`, `"ArrowDown"`, `"Enter"`, ...).
    pub fn parse(name: &str) -> Option<Key> {
        let key = match name {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            "Backspace" => Key::Backspace,
            "ArrowUp" => Key::Up,
            "ArrowDown" => Key::Down,
            "ArrowLeft" => Key::Left,
            "ArrowRight" => Key::Right,
            "Space" => Key::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    CommandEntry { buffer: String },
    ThemePicker { highlighted: usize },
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::CommandEntry { .. } => "COMMAND",
            Mode::ThemePicker { .. } => "THEMES",
        }
    }
}

/// One realized line of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    /// 1-based, as shown in the gutter.
    pub number: usize,
    pub record: LineRecord,
    /// Where activating this line goes (list views only).
    pub target: Option<ViewId>,
}

/// Session state of one view container.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub lines: Vec<RenderedLine>,
    pub cursor: usize,
    /// The view these lines were built from. A different view rendering into
    /// the same container (another blog post) rebuilds them.
    pub source: Option<ViewId>,
}

impl ViewState {
    fn move_cursor(&mut self, down: bool) {
        let Some(last) = self.lines.len().checked_sub(1) else {
            self.cursor = 0;
            return;
        };
        self.cursor = if down {
            (self.cursor + 1).min(last)
        } else {
            self.cursor.saturating_sub(1)
        };
    }

    pub fn current(&self) -> Option<&RenderedLine> {
        self.lines.get(self.cursor)
    }
}

/// What the status bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub mode: &'static str,
    pub filename: String,
    /// `(line, total)`, or `None` for an empty view (shown as `--`).
    pub position: Option<(usize, usize)>,
    pub extra: &'static str,
    pub username: String,
}

impl StatusLine {
    pub fn indicator(&self) -> String {
        match self.position {
            Some((line, total)) => format!("{line}/{total}"),
            None => "--".to_string(),
        }
    }
}

pub struct Session<'p> {
    payload: &'p ViewPayload,
    mode: Mode,
    active: ViewId,
    previous: Option<ViewId>,
    views: HashMap<String, ViewState>,
    applied_theme: String,
    displayed_theme: String,
    quit: bool,
}

/// Build the lines of `view` from the payload. `None` if the payload has no
/// data for it.
fn materialize(payload: &ViewPayload, view: &ViewId) -> Option<Vec<RenderedLine>> {
    fn numbered(items: Vec<(LineRecord, Option<ViewId>)>) -> Vec<RenderedLine> {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (record, target))| RenderedLine {
                number: i + 1,
                record,
                target,
            })
            .collect()
    }
    fn records(lines: &[LineRecord]) -> Vec<(LineRecord, Option<ViewId>)> {
        lines.iter().map(|l| (l.clone(), None)).collect()
    }

    let lines = match view {
        ViewId::RootMenu => numbered(
            payload
                .navigation
                .iter()
                .map(|e| (LineRecord::literal(e.label.as_str()), Some(e.view.clone())))
                .collect(),
        ),
        ViewId::BlogIndex => numbered(
            payload
                .blog_index
                .iter()
                .map(|b| {
                    (
                        LineRecord::literal(b.title.as_str()),
                        Some(ViewId::BlogPost(b.id.clone())),
                    )
                })
                .collect(),
        ),
        ViewId::BlogPost(id) => numbered(records(payload.blog_bodies.get(id)?)),
        ViewId::Socials => numbered(records(&payload.socials_lines)),
        ViewId::Content(id) => numbered(records(payload.content_views.get(id)?)),
    };
    Some(lines)
}

impl<'p> Session<'p> {
    /// Start on the root menu with the default theme applied.
    pub fn new(payload: &'p ViewPayload) -> Self {
        let mut views = HashMap::new();
        views.insert(ROOT_VIEW.to_string(), ViewState::default());
        views.insert(BLOG_POST_VIEW.to_string(), ViewState::default());
        for entry in &payload.navigation {
            views.insert(entry.view.container().to_string(), ViewState::default());
        }

        let theme = payload.default_theme_class_name.clone();
        let mut session = Self {
            payload,
            mode: Mode::Normal,
            active: ViewId::RootMenu,
            previous: None,
            views,
            applied_theme: theme.clone(),
            displayed_theme: theme,
            quit: false,
        };
        session.switch_view(ViewId::RootMenu);
        session
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn active_view(&self) -> &ViewId {
        &self.active
    }

    pub fn previous_view(&self) -> Option<&ViewId> {
        self.previous.as_ref()
    }

    /// The committed theme.
    pub fn applied_theme(&self) -> &str {
        &self.applied_theme
    }

    /// The theme on screen; differs from the applied one while previewing.
    pub fn displayed_theme(&self) -> &str {
        &self.displayed_theme
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn view_state(&self) -> Option<&ViewState> {
        self.views.get(self.active.container())
    }

    pub fn cursor(&self) -> usize {
        self.view_state().map_or(0, |s| s.cursor)
    }

    pub fn status(&self) -> StatusLine {
        let filename = match &self.active {
            ViewId::Content(_) => self
                .payload
                .entry_for(&self.active)
                .and_then(|e| e.source_file.clone())
                .unwrap_or_else(|| self.active.default_filename()),
            other => other.default_filename(),
        };
        let position = self
            .view_state()
            .filter(|s| !s.lines.is_empty())
            .map(|s| (s.cursor + 1, s.lines.len()));
        StatusLine {
            mode: self.mode.label(),
            filename,
            position,
            extra: self.active.status_extra(),
            username: self.payload.username.clone(),
        }
    }

    /// Activate `target`. Unknown targets redirect to a known-good view.
    pub fn switch_view(&mut self, target: ViewId) {
        let payload = self.payload;
        let (target, lines) = match materialize(payload, &target) {
            Some(lines) => (target, lines),
            None => {
                let fallback = match &target {
                    ViewId::BlogPost(_) => self.active.clone(),
                    _ => ViewId::RootMenu,
                };
                warn!("no data for view '{target}', showing '{fallback}' instead");
                let lines = materialize(payload, &fallback).unwrap_or_default();
                (fallback, lines)
            }
        };

        let state = self.views.entry(target.container().to_string()).or_default();
        if state.source.as_ref() != Some(&target) {
            debug!("populating '{}' from '{target}'", target.container());
            state.lines = lines;
            state.source = Some(target.clone());
        }
        state.cursor = 0;

        self.previous = Some(std::mem::replace(&mut self.active, target));
    }

    /// Feed one key. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        match self.mode {
            Mode::Normal => self.normal_key(key),
            Mode::CommandEntry { .. } => self.command_key(key),
            Mode::ThemePicker { .. } => self.picker_key(key),
        }
    }

    fn normal_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char(':') => {
                self.mode = Mode::CommandEntry {
                    buffer: String::new(),
                };
            }
            Key::Char('j') | Key::Down => self.move_cursor(true),
            Key::Char('k') | Key::Up => self.move_cursor(false),
            Key::Enter => self.activate(),
            Key::Escape => self.go_back(),
            Key::Char('h') | Key::Char('l') | Key::Left | Key::Right => {}
            _ => return false,
        }
        true
    }

    fn command_key(&mut self, key: Key) -> bool {
        let Mode::CommandEntry { buffer } = &mut self.mode else {
            return false;
        };
        match key {
            Key::Char(c) => buffer.push(c),
            Key::Backspace => {
                buffer.pop();
            }
            Key::Escape => self.mode = Mode::Normal,
            Key::Enter => {
                let command = std::mem::take(buffer);
                self.mode = Mode::Normal;
                self.run_command(command.trim());
            }
            _ => return false,
        }
        true
    }

    fn picker_key(&mut self, key: Key) -> bool {
        match key {
            Key::Char('j') | Key::Down => self.step_theme(true),
            Key::Char('k') | Key::Up => self.step_theme(false),
            Key::Enter => self.confirm_theme(),
            Key::Escape => self.cancel_theme(),
            _ => return false,
        }
        true
    }

    fn run_command(&mut self, command: &str) {
        match command {
            "themes" => self.open_theme_picker(),
            "q" | "quit" => self.quit = true,
            "" => {}
            other => debug!("ignoring unknown command ':{other}'"),
        }
    }

    fn move_cursor(&mut self, down: bool) {
        if let Some(state) = self.views.get_mut(self.active.container()) {
            state.move_cursor(down);
        }
    }

    fn activate(&mut self) {
        if !self.active.is_list() {
            return;
        }
        let target = self
            .view_state()
            .and_then(ViewState::current)
            .and_then(|line| line.target.clone());
        if let Some(target) = target {
            self.switch_view(target);
        }
    }

    fn go_back(&mut self) {
        if let Some(target) = self.active.back_target() {
            self.switch_view(target);
        }
    }

    // ------------------------------------------------------------------
    // Theme picker
    // ------------------------------------------------------------------

    fn selectable(&self, index: usize) -> bool {
        self.payload.themes.get(index).is_some_and(|t| !t.disabled)
    }

    fn applied_index(&self) -> Option<usize> {
        self.payload
            .themes
            .iter()
            .position(|t| !t.disabled && t.class_name == self.applied_theme)
    }

    fn preview(&mut self, index: usize) {
        self.displayed_theme = self.payload.themes[index].class_name.clone();
        self.mode = Mode::ThemePicker { highlighted: index };
    }

    fn open_theme_picker(&mut self) {
        let first = self.payload.themes.iter().position(|t| !t.disabled);
        match self.applied_index().or(first) {
            Some(index) => self.preview(index),
            None => warn!("no selectable themes configured"),
        }
    }

    fn step_theme(&mut self, down: bool) {
        let Mode::ThemePicker { highlighted } = self.mode else {
            return;
        };
        let next = if down {
            (highlighted + 1..self.payload.themes.len()).find(|&i| self.selectable(i))
        } else {
            (0..highlighted).rev().find(|&i| self.selectable(i))
        };
        if let Some(index) = next {
            self.preview(index);
        }
    }

    fn confirm_theme(&mut self) {
        if let Mode::ThemePicker { highlighted } = self.mode {
            if self.selectable(highlighted) {
                self.applied_theme = self.payload.themes[highlighted].class_name.clone();
                self.displayed_theme = self.applied_theme.clone();
                self.mode = Mode::Normal;
            }
        }
    }

    fn cancel_theme(&mut self) {
        self.displayed_theme = self.applied_theme.clone();
        self.mode = Mode::Normal;
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Mouse over a list line moves the cursor there.
    pub fn hover_line(&mut self, index: usize) {
        if self.mode != Mode::Normal || !self.active.is_list() {
            return;
        }
        if let Some(state) = self.views.get_mut(self.active.container()) {
            if index < state.lines.len() {
                state.cursor = index;
            }
        }
    }

    /// Clicking a list line activates it.
    pub fn click_line(&mut self, index: usize) {
        if self.mode != Mode::Normal || !self.active.is_list() {
            return;
        }
        self.hover_line(index);
        if self.cursor() == index {
            self.activate();
        }
    }

    /// Mouse over a theme entry previews it.
    pub fn hover_theme(&mut self, index: usize) {
        if matches!(self.mode, Mode::ThemePicker { .. }) && self.selectable(index) {
            self.preview(index);
        }
    }

    pub fn click_theme(&mut self, index: usize) {
        if matches!(self.mode, Mode::ThemePicker { .. }) && self.selectable(index) {
            self.preview(index);
            self.confirm_theme();
        }
    }

    /// Pointer left the theme list: show the committed theme again.
    pub fn leave_theme_list(&mut self) {
        if !matches!(self.mode, Mode::ThemePicker { .. }) {
            return;
        }
        self.displayed_theme = self.applied_theme.clone();
        if let Some(index) = self.applied_index() {
            self.mode = Mode::ThemePicker { highlighted: index };
        }
    }
}
