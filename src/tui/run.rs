//! TUI effects boundary: event loop, terminal lifecycle, input mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Decisions live in the pure layers.
//!
//! Architecture: a reader thread forwards terminal events into an mpsc
//! channel. The event loop waits on that channel until the nearest timer
//! deadline, then fires due timers through the same pure update.

use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::feedback::key_name;
use crate::timers::Scheduler;

use super::state::{Action, App, AppEvent, Effect, Target, Transition};
use super::update::update;
use super::view::{PageLayout, render};

// ============================================================================
// INPUT MAPPING
// ============================================================================

/// Map a key press to the control action it triggers, if any.
///
/// The page-wide keydown is separate: see [`key_actions`].
pub fn map_key(key: KeyEvent, focus: Option<Target>) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Tab | KeyCode::Down => return Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up => return Some(Action::FocusPrev),
        _ => {}
    }

    match focus {
        // Inputs capture printable keys; Enter submits the form
        Some(Target::Input(_)) => match key.code {
            KeyCode::Char(c) => Some(Action::TypeChar(c)),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Enter => Some(Action::Submit),
            _ => None,
        },
        _ => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Activate),
            KeyCode::Char('+') => Some(Action::Click(Target::Increment)),
            KeyCode::Char('-') => Some(Action::Click(Target::Decrement)),
            _ => None,
        },
    }
}

/// Every key press is first a page-wide keydown, then possibly a control action.
pub fn key_actions(key: KeyEvent, focus: Option<Target>) -> Vec<Action> {
    if key.kind != KeyEventKind::Press {
        return Vec::new();
    }

    let mut actions = vec![Action::KeyDown(key_name(&key))];
    actions.extend(map_key(key, focus));
    actions
}

/// Map a mouse event to an action using the layout of the last frame.
///
/// Pointer movement anywhere reports whether it is over the hover box;
/// the update function ignores reports that do not change anything.
pub fn map_mouse(mouse: MouseEvent, layout: &PageLayout) -> Option<Action> {
    let target = layout.target_at(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => target.map(Action::Click),
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            if target == Some(Target::HoverBox) {
                Some(Action::HoverEnter)
            } else {
                Some(Action::HoverLeave)
            }
        }
        _ => None,
    }
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Run one action through the pure update and apply its timer effects.
///
/// `now` is the time since the event loop started.
pub fn dispatch(app: &mut App, action: &Action, scheduler: &mut Scheduler, now: Duration) {
    let page = std::mem::take(&mut app.page);
    match update(page, action, &app.context) {
        Transition::Page(page) => app.page = page,
        Transition::Effects(page, effects) => {
            app.page = page;
            for effect in effects {
                apply_effect(effect, scheduler, now);
            }
        }
        Transition::Quit => app.should_quit = true,
    }
}

fn apply_effect(effect: Effect, scheduler: &mut Scheduler, now: Duration) {
    match effect {
        Effect::Schedule { key, after } => scheduler.schedule(key, now, after),
        Effect::Cancel(key) => {
            scheduler.cancel(key);
        }
    }
}

/// Fire every timer that is due at `now`, earliest first.
pub fn fire_due(app: &mut App, scheduler: &mut Scheduler, now: Duration) {
    for key in scheduler.take_due(now) {
        tracing::trace!(?key, "timer fired");
        dispatch(app, &Action::TimerFired(key), scheduler, now);
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREAD
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_event_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let forwarded = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Mouse(mouse)) => AppEvent::Mouse(mouse),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue, // focus, paste
                Err(_) => break,
            };
            if tx.send(forwarded).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the page until the user quits.
pub fn run(mut app: App) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    tracing::info!("terminal ready");

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_event_reader(tx);

    let clock = Instant::now();
    let mut scheduler = Scheduler::new();
    let mut layout = PageLayout::default();

    while !app.should_quit {
        terminal.draw(|frame| layout = render(&app, frame))?;

        // Block on the next event, or until the nearest timer is due
        let event = match scheduler.next_deadline() {
            Some(deadline) => match rx.recv_timeout(deadline.saturating_sub(clock.elapsed())) {
                Ok(e) => Some(e),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(e) => Some(e),
                Err(_) => break, // reader thread gone
            },
        };

        let actions = match event {
            Some(AppEvent::Key(key)) => key_actions(key, app.page.focus),
            Some(AppEvent::Mouse(mouse)) => map_mouse(mouse, &layout).into_iter().collect(),
            Some(AppEvent::Resize) | None => Vec::new(),
        };

        for action in &actions {
            dispatch(&mut app, action, &mut scheduler, clock.elapsed());
            if app.should_quit {
                break;
            }
        }
        fire_due(&mut app, &mut scheduler, clock.elapsed());
    }

    restore_terminal()?;
    tracing::info!("terminal restored");
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::timers::TimerKey;
    use crate::types::Field;
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app() -> App {
        App::new(&PageConfig::default()).expect("rules compile")
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Lay out a real frame so mouse mapping sees real rectangles.
    fn layout_for(app: &App) -> PageLayout {
        let mut terminal =
            ratatui::Terminal::new(ratatui::backend::TestBackend::new(150, 45)).unwrap();
        let mut layout = PageLayout::default();
        terminal.draw(|frame| layout = render(app, frame)).unwrap();
        layout
    }

    fn inside(rect: Rect) -> (u16, u16) {
        (rect.x + 1, rect.y + rect.height / 2)
    }

    // -- key mapping --

    #[test]
    fn ctrl_c_maps_to_quit() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key, None), Some(Action::Quit));
    }

    #[test]
    fn esc_maps_to_quit() {
        assert_eq!(map_key(key(KeyCode::Esc), None), Some(Action::Quit));
    }

    #[test]
    fn tab_keys_move_focus() {
        assert_eq!(map_key(key(KeyCode::Tab), None), Some(Action::FocusNext));
        assert_eq!(map_key(key(KeyCode::BackTab), None), Some(Action::FocusPrev));
        assert_eq!(
            map_key(key(KeyCode::Down), Some(Target::Input(Field::Name))),
            Some(Action::FocusNext)
        );
    }

    #[test]
    fn enter_and_space_activate_controls() {
        let focus = Some(Target::ThemeToggle);
        assert_eq!(map_key(key(KeyCode::Enter), focus), Some(Action::Activate));
        assert_eq!(map_key(key(KeyCode::Char(' ')), focus), Some(Action::Activate));
    }

    #[test]
    fn inputs_capture_characters() {
        let focus = Some(Target::Input(Field::Email));
        assert_eq!(map_key(key(KeyCode::Char(' ')), focus), Some(Action::TypeChar(' ')));
        assert_eq!(map_key(key(KeyCode::Char('+')), focus), Some(Action::TypeChar('+')));
        assert_eq!(map_key(key(KeyCode::Backspace), focus), Some(Action::Backspace));
        assert_eq!(map_key(key(KeyCode::Enter), focus), Some(Action::Submit));
    }

    #[test]
    fn counter_shortcuts_outside_inputs() {
        assert_eq!(
            map_key(key(KeyCode::Char('+')), Some(Target::ClickBox)),
            Some(Action::Click(Target::Increment))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('-')), None),
            Some(Action::Click(Target::Decrement))
        );
    }

    #[test]
    fn unmapped_key_returns_none() {
        assert_eq!(map_key(key(KeyCode::Char('z')), Some(Target::ClickBox)), None);
    }

    #[test]
    fn every_key_press_is_a_keydown_first() {
        let actions = key_actions(key(KeyCode::Char('z')), Some(Target::ClickBox));
        assert_eq!(actions, vec![Action::KeyDown("z".into())]);

        let actions = key_actions(key(KeyCode::Char('a')), Some(Target::Input(Field::Name)));
        assert_eq!(
            actions,
            vec![Action::KeyDown("a".into()), Action::TypeChar('a')]
        );
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(key_actions(release, None).is_empty());
    }

    // -- mouse mapping --

    #[test]
    fn left_click_maps_to_target() {
        let app = app();
        let layout = layout_for(&app);
        let (x, y) = inside(layout.rect_of(Target::Increment).unwrap());
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), &layout),
            Some(Action::Click(Target::Increment))
        );
    }

    #[test]
    fn click_on_empty_space_maps_to_nothing() {
        let layout = layout_for(&app());
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), &layout),
            None
        );
    }

    #[test]
    fn pointer_movement_reports_hover() {
        let layout = layout_for(&app());
        let (x, y) = inside(layout.rect_of(Target::HoverBox).unwrap());
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Moved, x, y), &layout),
            Some(Action::HoverEnter)
        );
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Moved, 0, 0), &layout),
            Some(Action::HoverLeave)
        );
    }

    #[test]
    fn right_click_is_ignored() {
        let layout = layout_for(&app());
        let (x, y) = inside(layout.rect_of(Target::ClickBox).unwrap());
        assert_eq!(
            map_mouse(mouse(MouseEventKind::Down(MouseButton::Right), x, y), &layout),
            None
        );
    }

    // -- dispatch and timers --

    #[test]
    fn dispatch_applies_schedule_effects() {
        let mut app = app();
        let mut scheduler = Scheduler::new();
        dispatch(&mut app, &Action::KeyDown("a".into()), &mut scheduler, ms(1000));

        assert!(scheduler.is_pending(TimerKey::KeyHighlight));
        assert_eq!(scheduler.next_deadline(), Some(ms(1300)));
    }

    #[test]
    fn highlight_stays_while_keys_arrive_faster_than_delay() {
        let mut app = app();
        let mut scheduler = Scheduler::new();
        for t in [0, 200, 400] {
            dispatch(&mut app, &Action::KeyDown("k".into()), &mut scheduler, ms(t));
            fire_due(&mut app, &mut scheduler, ms(t));
            assert!(app.page.events.key_highlight.is_some());
        }
        fire_due(&mut app, &mut scheduler, ms(699));
        assert!(app.page.events.key_highlight.is_some());
        fire_due(&mut app, &mut scheduler, ms(700));
        assert!(app.page.events.key_highlight.is_none());
    }

    #[test]
    fn reset_cancels_pending_highlight_clear() {
        let mut app = app();
        let mut scheduler = Scheduler::new();
        dispatch(&mut app, &Action::KeyDown("k".into()), &mut scheduler, ms(0));
        dispatch(&mut app, &Action::Click(Target::ResetEvents), &mut scheduler, ms(100));

        assert!(!scheduler.is_pending(TimerKey::KeyHighlight));
        assert_eq!(app.page.events.last_key, "None");
    }

    #[test]
    fn enter_in_input_submits_and_keeps_focus() {
        let mut app = app();
        let mut scheduler = Scheduler::new();
        app.page.focus = Some(Target::Input(Field::Email));

        for code in [KeyCode::Enter, KeyCode::Char('x')] {
            for action in key_actions(key(code), app.page.focus) {
                dispatch(&mut app, &action, &mut scheduler, ms(0));
            }
        }

        assert_eq!(app.page.focus, Some(Target::Input(Field::Email)));
        assert_eq!(app.page.form.field(Field::Email).value, "x");
        assert!(app.page.form.field(Field::Name).error_visible());
    }

    #[test]
    fn dispatch_quit_sets_flag() {
        let mut app = app();
        let mut scheduler = Scheduler::new();
        dispatch(&mut app, &Action::Quit, &mut scheduler, ms(0));
        assert!(app.should_quit);
    }
}
