use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use game_reviews_core::{
    ControllerError, GameActions, GameCard, GameController, GameListView, ReviewLine,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_INPUT_LEN: usize = 64;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Games,
    Reviews,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptKind {
    NewGame,
    ReviewName { game_id: String, title: String },
    ReviewScore { game_id: String, title: String, name: String },
}

/// Single-line text input shown as a modal.
#[derive(Debug, Clone)]
struct InputPrompt {
    kind: PromptKind,
    input: String,
    cursor: usize,
}

impl InputPrompt {
    fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
            cursor: 0,
        }
    }

    fn title(&self) -> String {
        match &self.kind {
            PromptKind::NewGame => "New Game".to_string(),
            PromptKind::ReviewName { title, .. } | PromptKind::ReviewScore { title, .. } => {
                format!("Review - {title}")
            }
        }
    }

    fn instruction(&self) -> String {
        match &self.kind {
            PromptKind::NewGame => "Game name".to_string(),
            PromptKind::ReviewName { .. } => "Review name".to_string(),
            PromptKind::ReviewScore { name, .. } => format!("Score for review \"{name}\""),
        }
    }

    fn move_left(&mut self) {
        if let Some(ch) = self.input[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    fn move_right(&mut self) {
        if let Some(ch) = self.input[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    fn move_home(&mut self) {
        self.cursor = 0;
    }

    fn move_end(&mut self) {
        self.cursor = self.input.len();
    }

    fn insert(&mut self, ch: char) {
        if self.input.chars().count() >= MAX_INPUT_LEN || ch.is_control() {
            return;
        }
        self.input.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.move_left();
            self.input.remove(self.cursor);
        }
    }

    fn delete(&mut self) {
        if self.cursor < self.input.len() {
            self.input.remove(self.cursor);
        }
    }

    /// Column of the cursor in characters.
    fn cursor_column(&self) -> usize {
        self.input[..self.cursor].chars().count()
    }
}

/// A user action waiting to run against the controller.
#[derive(Debug, Clone)]
enum Action {
    Load,
    CreateGame { name: String },
    DeleteGame { game_id: String, title: String },
    AddReview { game_id: String, name: String, score: String },
    DeleteReview { game_id: String, review_id: String, name: String },
}

impl Action {
    fn describe(&self) -> String {
        match self {
            Action::Load => "Loading games".to_string(),
            Action::CreateGame { name } => format!("Creating \"{name}\""),
            Action::DeleteGame { title, .. } => format!("Deleting \"{title}\""),
            Action::AddReview { name, .. } => format!("Adding review \"{name}\""),
            Action::DeleteReview { name, .. } => format!("Deleting review \"{name}\""),
        }
    }

    async fn dispatch(self, controller: &GameController) -> Result<GameListView, ControllerError> {
        match self {
            Action::Load => controller.load().await,
            Action::CreateGame { name } => controller.on_create_game(&name).await,
            Action::DeleteGame { game_id, .. } => controller.on_delete_game(&game_id).await,
            Action::AddReview {
                game_id,
                name,
                score,
            } => controller.on_add_review(&game_id, &name, &score).await,
            Action::DeleteReview {
                game_id,
                review_id,
                ..
            } => controller.on_delete_review(&game_id, &review_id).await,
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
    ActionFinished {
        label: String,
        result: Result<GameListView, ControllerError>,
    },
}

/// Terminal frontend for the games collection.
pub struct GameReviewsApp {
    controller: GameController,
    view: GameListView,
    state: UiState,
    prompt: Option<InputPrompt>,
    pending: usize,
    event_tx: Option<mpsc::Sender<AppEvent>>,
    theme: Theme,
    source: String,
}

impl GameReviewsApp {
    /// `source` describes where the games live, shown in the status bar.
    pub fn new(controller: GameController, source: impl Into<String>) -> Self {
        Self {
            controller,
            view: GameListView::default(),
            state: UiState::default(),
            prompt: None,
            pending: 0,
            event_tx: None,
            theme: Theme::default(),
            source: source.into(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx.clone());
        self.event_tx = Some(event_tx);
        self.spawn_action(Action::Load);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        self.event_tx = None;
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(event)) => {
                if let Event::Key(key) = event {
                    if self.prompt.is_some() {
                        self.handle_prompt_key(key);
                    } else {
                        self.handle_key(key);
                    }
                }
                true
            }
            Some(AppEvent::Tick) => true,
            Some(AppEvent::ActionFinished { label, result }) => {
                self.pending = self.pending.saturating_sub(1);
                self.handle_action_finished(label, result);
                true
            }
            None => false,
        }
    }

    fn handle_action_finished(
        &mut self,
        label: String,
        result: Result<GameListView, ControllerError>,
    ) {
        match result {
            Ok(_) => {
                // The controller snapshot is authoritative; when chains race
                // it already holds whichever refresh landed last.
                let view = self.controller.view();
                info!(action = %label, games = view.len(), "Action completed");
                self.state.apply_view(&self.view, &view);
                self.view = view;
                self.state.set_status(format!(
                    "{label}: done ({} games) at {}",
                    self.view.len(),
                    Local::now().format("%H:%M:%S")
                ));
                self.state.status_is_error = false;
            }
            Err(err) => {
                error!(action = %label, %err, "Action failed");
                self.state.set_status(format!("{label} failed: {err}"));
                self.state.status_is_error = true;
            }
        }
    }

    fn spawn_action(&mut self, action: Action) {
        let Some(sender) = self.event_tx.clone() else {
            return;
        };
        let controller = self.controller.clone();
        let label = action.describe();
        self.pending += 1;
        self.state.set_status(format!("{label}..."));
        self.state.status_is_error = false;

        tokio::spawn(async move {
            let result = action.dispatch(&controller).await;
            let _ = sender.send(AppEvent::ActionFinished { label, result }).await;
        });
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc if key.modifiers.is_empty() => {
                self.state.should_quit = true
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.spawn_action(Action::Load)
            }
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('n') => {
                self.prompt = Some(InputPrompt::new(PromptKind::NewGame));
                self.state.set_status("Enter a name for the new game".to_string());
            }
            KeyCode::Char('a') => self.prompt_review(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_focused(),
            _ => {}
        }
    }

    fn toggle_focus(&mut self) {
        self.state.focus = match self.state.focus {
            Focus::Games if self.selected_card().is_some() => Focus::Reviews,
            _ => Focus::Games,
        };
        if self.state.focus == Focus::Reviews {
            let count = self.selected_card().map_or(0, |card| card.reviews.len());
            self.state
                .review_list
                .select(if count == 0 { None } else { Some(0) });
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        match self.state.focus {
            Focus::Games => {
                let next = step(self.state.game_list.selected(), delta, self.view.len());
                self.state.game_list.select(next);
                self.state.review_list.select(None);
            }
            Focus::Reviews => {
                let count = self.selected_card().map_or(0, |card| card.reviews.len());
                let next = step(self.state.review_list.selected(), delta, count);
                self.state.review_list.select(next);
            }
        }
    }

    fn selected_card(&self) -> Option<&GameCard> {
        self.state
            .game_list
            .selected()
            .and_then(|index| self.view.cards.get(index))
    }

    fn selected_review(&self) -> Option<&ReviewLine> {
        let card = self.selected_card()?;
        self.state
            .review_list
            .selected()
            .and_then(|index| card.reviews.get(index))
    }

    fn prompt_review(&mut self) {
        let Some((game_id, title)) = self
            .selected_card()
            .map(|card| (card.id.clone(), card.title.clone()))
        else {
            self.state.set_status("No game selected".to_string());
            return;
        };
        self.state
            .set_status(format!("Enter a review name for {title}"));
        self.prompt = Some(InputPrompt::new(PromptKind::ReviewName { game_id, title }));
    }

    fn delete_focused(&mut self) {
        let action = match self.state.focus {
            Focus::Games => self.selected_card().map(|card| Action::DeleteGame {
                game_id: card.id.clone(),
                title: card.title.clone(),
            }),
            Focus::Reviews => self.selected_card().and_then(|card| {
                self.selected_review().map(|review| Action::DeleteReview {
                    game_id: card.id.clone(),
                    review_id: review.id.clone(),
                    name: review.name.clone(),
                })
            }),
        };
        match action {
            Some(action) => self.spawn_action(action),
            None => self.state.set_status("Nothing selected to delete".to_string()),
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                self.state.set_status("Cancelled".to_string());
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(prompt);
                }
            }
            KeyCode::Left => prompt.move_left(),
            KeyCode::Right => prompt.move_right(),
            KeyCode::Home => prompt.move_home(),
            KeyCode::End => prompt.move_end(),
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Delete => prompt.delete(),
            KeyCode::Char(ch) => {
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                    prompt.insert(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self, prompt: InputPrompt) {
        let InputPrompt { kind, input, .. } = prompt;
        match kind {
            PromptKind::NewGame => self.spawn_action(Action::CreateGame { name: input }),
            PromptKind::ReviewName { game_id, title } => {
                self.state
                    .set_status(format!("Enter a score for \"{input}\""));
                self.prompt = Some(InputPrompt::new(PromptKind::ReviewScore {
                    game_id,
                    title,
                    name: input,
                }));
            }
            PromptKind::ReviewScore { game_id, name, .. } => {
                self.spawn_action(Action::AddReview {
                    game_id,
                    name,
                    score: input,
                });
            }
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let size = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(4)])
            .split(size);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);

        self.render_game_list(frame, body[0]);
        self.render_reviews(frame, body[1]);
        self.render_status(frame, chunks[1]);
        if let Some(prompt) = &self.prompt {
            self.render_prompt(frame, prompt);
        }
    }

    fn panel_block(&self, title: String, focused: bool) -> Block<'static> {
        let border = if focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.muted)
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title)
    }

    fn render_game_list(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .view
            .cards
            .iter()
            .map(|card| {
                let title = Span::styled(
                    card.title.clone(),
                    Style::default()
                        .fg(self.theme.primary_fg)
                        .add_modifier(Modifier::BOLD),
                );
                let count = Span::styled(
                    format!(" · {} reviews", card.reviews.len()),
                    Style::default().fg(self.theme.muted),
                );
                ListItem::new(Line::from(vec![title, count]))
            })
            .collect();

        let block = self.panel_block(
            format!("Games ({})", self.view.len()),
            self.state.focus == Focus::Games,
        );
        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ")
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut self.state.game_list);
    }

    fn render_reviews(&mut self, frame: &mut Frame, area: Rect) {
        let focused = self.state.focus == Focus::Reviews;
        let (title, items): (String, Vec<ListItem>) = match self.selected_card() {
            Some(card) => (
                format!("{} ({})", card.title, card.id),
                card.reviews
                    .iter()
                    .map(|review| {
                        ListItem::new(Line::from(vec![
                            Span::styled("Name: ", Style::default().fg(self.theme.muted)),
                            Span::raw(review.name.clone()),
                            Span::styled("  Score: ", Style::default().fg(self.theme.muted)),
                            Span::styled(
                                review.score.clone(),
                                Style::default().fg(self.theme.accent),
                            ),
                        ]))
                    })
                    .collect(),
            ),
            None => ("Reviews".to_string(), Vec::new()),
        };

        let block = self.panel_block(title, focused);
        let list = List::new(items)
            .block(block)
            .highlight_symbol("▶ ")
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut self.state.review_list);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Status · {}", self.source));
        let status_style = if self.state.status_is_error {
            Style::default().fg(self.theme.danger)
        } else {
            Style::default().fg(self.theme.success)
        };
        let mut secondary = vec![
            Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" new game  "),
            Span::styled("a", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" add review  "),
            Span::styled("d", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" delete  "),
            Span::styled("Tab", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" focus  "),
            Span::styled("^R", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" reload  "),
            Span::styled("q", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" quit"),
        ];
        if self.pending > 0 {
            secondary.push(Span::styled(
                format!("  ({} in flight)", self.pending),
                Style::default().fg(self.theme.muted),
            ));
        }
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(self.state.status.clone(), status_style)),
            Line::from(secondary),
        ])
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_prompt(&self, frame: &mut Frame, prompt: &InputPrompt) {
        let frame_area = frame.size();
        let width = 60_u16.min(frame_area.width.saturating_sub(4)).max(24_u16);
        let height = 6_u16.min(frame_area.height.saturating_sub(2)).max(5_u16);
        let x = frame_area.x + (frame_area.width.saturating_sub(width)) / 2;
        let y = frame_area.y + (frame_area.height.saturating_sub(height)) / 2;
        let area = Rect::new(x, y, width, height).intersection(frame_area);

        frame.render_widget(Clear, area);

        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(prompt.input.clone()),
        ]);
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" confirm  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]);

        let paragraph = Paragraph::new(vec![
            Line::from(prompt.instruction()),
            input_line,
            Line::from(""),
            helper,
        ])
        .block(Block::default().borders(Borders::ALL).title(prompt.title()))
        .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);

        let cursor_x = (area.x + 3 + prompt.cursor_column() as u16)
            .min(area.x + area.width.saturating_sub(2));
        let cursor_y = area.y + 2;
        frame.set_cursor(cursor_x, cursor_y);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Move a list selection by `delta`, clamped to `len` entries.
fn step(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let current = current.unwrap_or(0) as isize;
    Some((current + delta).clamp(0, len as isize - 1) as usize)
}

/// Pick the selection after a re-render: the same id if it survived,
/// otherwise the same slot clamped to the new length.
fn reselect(
    previous_id: Option<&str>,
    previous_index: Option<usize>,
    ids: &[&str],
) -> Option<usize> {
    if ids.is_empty() {
        return None;
    }
    let surviving = previous_id.and_then(|id| ids.iter().position(|candidate| *candidate == id));
    if let Some(index) = surviving {
        return Some(index);
    }
    Some(previous_index.unwrap_or(0).min(ids.len() - 1))
}

struct UiState {
    focus: Focus,
    game_list: ListState,
    review_list: ListState,
    status: String,
    status_is_error: bool,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: Focus::Games,
            game_list: ListState::default(),
            review_list: ListState::default(),
            status: "Ready".to_string(),
            status_is_error: false,
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        self.status = message;
    }

    /// Carry the current selection from `old` over to `new`.
    fn apply_view(&mut self, old: &GameListView, new: &GameListView) {
        let old_index = self.game_list.selected();
        let old_card = old_index.and_then(|index| old.cards.get(index));
        let game_ids: Vec<&str> = new.cards.iter().map(|card| card.id.as_str()).collect();
        let game_index = reselect(old_card.map(|card| card.id.as_str()), old_index, &game_ids);
        self.game_list.select(game_index);

        let new_card = game_index.and_then(|index| new.cards.get(index));
        let same_card = matches!((old_card, new_card), (Some(a), Some(b)) if a.id == b.id);
        let review_index = match (new_card, same_card) {
            (Some(card), true) => {
                let old_review_index = self.review_list.selected();
                let old_review = old_card
                    .zip(old_review_index)
                    .and_then(|(card, index)| card.reviews.get(index));
                let review_ids: Vec<&str> =
                    card.reviews.iter().map(|review| review.id.as_str()).collect();
                old_review_index.and(reselect(
                    old_review.map(|review| review.id.as_str()),
                    old_review_index,
                    &review_ids,
                ))
            }
            _ => None,
        };
        self.review_list.select(review_index);
        let no_reviews = new_card.map_or(true, |card| card.reviews.is_empty());
        if review_index.is_none() && self.focus == Focus::Reviews && no_reviews {
            self.focus = Focus::Games;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, reviews: &[&str]) -> GameCard {
        GameCard {
            id: id.to_string(),
            title: id.to_uppercase(),
            reviews: reviews
                .iter()
                .map(|review| ReviewLine {
                    id: review.to_string(),
                    name: review.to_string(),
                    score: "5".to_string(),
                })
                .collect(),
        }
    }

    fn view(cards: Vec<GameCard>) -> GameListView {
        GameListView { cards }
    }

    #[test]
    fn prompt_edits_at_the_cursor() {
        let mut prompt = InputPrompt::new(PromptKind::NewGame);
        for ch in "Chss".chars() {
            prompt.insert(ch);
        }
        prompt.move_left();
        prompt.move_left();
        prompt.insert('e');
        assert_eq!(prompt.input, "Chess");
        assert_eq!(prompt.cursor_column(), 3);

        prompt.move_end();
        prompt.backspace();
        prompt.move_home();
        prompt.delete();
        assert_eq!(prompt.input, "hes");
    }

    #[test]
    fn prompt_handles_multibyte_input() {
        let mut prompt = InputPrompt::new(PromptKind::NewGame);
        for ch in "Pokémon".chars() {
            prompt.insert(ch);
        }
        prompt.move_left();
        prompt.move_left();
        prompt.move_left();
        prompt.backspace();
        assert_eq!(prompt.input, "Pokmon");
        assert_eq!(prompt.cursor_column(), 3);
    }

    #[test]
    fn prompt_caps_length() {
        let mut prompt = InputPrompt::new(PromptKind::NewGame);
        for _ in 0..(MAX_INPUT_LEN + 10) {
            prompt.insert('x');
        }
        assert_eq!(prompt.input.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn step_clamps_to_bounds() {
        assert_eq!(step(None, 1, 0), None);
        assert_eq!(step(None, 1, 3), Some(1));
        assert_eq!(step(Some(2), 1, 3), Some(2));
        assert_eq!(step(Some(0), -1, 3), Some(0));
    }

    #[test]
    fn selection_follows_game_id_across_renders() {
        let mut state = UiState::default();
        let old = view(vec![card("g2", &[]), card("g1", &[])]);
        state.game_list.select(Some(1));

        // A new game lands on top; g1 moves down one slot.
        let new = view(vec![card("g3", &[]), card("g2", &[]), card("g1", &[])]);
        state.apply_view(&old, &new);
        assert_eq!(state.game_list.selected(), Some(2));
    }

    #[test]
    fn deleted_selection_falls_back_to_the_same_slot() {
        let mut state = UiState::default();
        let old = view(vec![card("g3", &[]), card("g2", &[]), card("g1", &[])]);
        state.game_list.select(Some(2));

        let new = view(vec![card("g3", &[]), card("g2", &[])]);
        state.apply_view(&old, &new);
        assert_eq!(state.game_list.selected(), Some(1));

        state.apply_view(&new, &view(Vec::new()));
        assert_eq!(state.game_list.selected(), None);
    }

    #[test]
    fn review_focus_returns_to_games_when_reviews_vanish() {
        let mut state = UiState::default();
        let old = view(vec![card("g1", &["r1"])]);
        state.game_list.select(Some(0));
        state.review_list.select(Some(0));
        state.focus = Focus::Reviews;

        state.apply_view(&old, &view(vec![card("g1", &[])]));
        assert_eq!(state.review_list.selected(), None);
        assert_eq!(state.focus, Focus::Games);
    }

    #[test]
    fn review_selection_survives_sibling_removal() {
        let mut state = UiState::default();
        let old = view(vec![card("g1", &["r1", "r2", "r3"])]);
        state.game_list.select(Some(0));
        state.review_list.select(Some(2));
        state.focus = Focus::Reviews;

        state.apply_view(&old, &view(vec![card("g1", &["r1", "r3"])]));
        assert_eq!(state.review_list.selected(), Some(1));
        assert_eq!(state.focus, Focus::Reviews);
    }
}
