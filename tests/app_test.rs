//! App glue: keys, pointer drags in terminal coordinates, toasts, sharing.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use mandarin_ten::app::App;
use mandarin_ten::config::AppConfig;
use mandarin_ten::core::{Grid, MemoryStore};
use mandarin_ten::input::{PointerEvent, PointerKind};
use mandarin_ten::share::{ShareOutcome, ShareTarget};
use mandarin_ten::term::{AnchorY, FrameBuffer, GameView, Viewport};
use mandarin_ten::types::{GameAction, Phase, ROUND_SECONDS};

// Frame at (0,0), board interior at (1,1); tile (r,c) centre is (2 + 3c, 1 + r).
const VP: Viewport = Viewport {
    width: 32,
    height: 13,
};

fn app() -> App {
    App::with_parts(
        Box::new(MemoryStore::new()),
        GameView::default().with_anchor_y(AnchorY::Top),
        ShareTarget::default(),
        7,
    )
}

fn app_with_pair() -> App {
    let mut app = app();
    let mut values = [[9u8; 10]; 10];
    values[0][0] = 4;
    values[0][1] = 6;
    let (w, h) = app.view().layout_size();
    app.round_mut()
        .restart_with(Grid::from_values(w, h, &values).unwrap());
    app
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::from(code)
}

fn pointer(kind: PointerKind, column: u16, row: u16) -> PointerEvent {
    PointerEvent { kind, column, row }
}

fn drag(app: &mut App, from: (u16, u16), to: (u16, u16)) {
    app.handle_pointer(VP, pointer(PointerKind::Down, from.0, from.1));
    app.handle_pointer(VP, pointer(PointerKind::Drag, to.0, to.1));
    app.handle_pointer(VP, pointer(PointerKind::Up, to.0, to.1));
}

#[test]
fn test_enter_starts_and_restarts() {
    let mut app = app();
    assert_eq!(app.round().phase(), Phase::Idle);

    assert!(app.handle_key(key(KeyCode::Enter)));
    assert_eq!(app.round().phase(), Phase::Running);
    assert_eq!(app.round().round_id(), 1);

    app.advance(5_000);
    assert_eq!(app.round().time_remaining(), ROUND_SECONDS - 5);

    // Start while running begins a fresh round.
    app.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(app.round().round_id(), 2);
    assert_eq!(app.round().time_remaining(), ROUND_SECONDS);
}

#[test]
fn test_quit_keys() {
    let mut app = app();
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    assert!(!app.handle_key(key(KeyCode::Esc)));
    assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
}

#[test]
fn test_key_release_is_ignored() {
    let mut app = app();
    let mut release = key(KeyCode::Enter);
    release.kind = KeyEventKind::Release;
    assert!(app.handle_key(release));
    assert_eq!(app.round().phase(), Phase::Idle);
}

#[test]
fn test_terminal_drag_scores_and_toasts() {
    let mut app = app_with_pair();
    app.take_dirty();

    drag(&mut app, (2, 1), (5, 1));
    assert_eq!(app.round().score(), 2);

    let toast = app.toast().unwrap();
    assert_eq!(toast.text, "+2 new best!");
    assert!(toast.highlight);
    assert!(app.take_dirty());

    app.advance(1_199);
    assert!(app.toast().is_some());
    app.advance(1);
    assert!(app.toast().is_none());
}

#[test]
fn test_drag_may_leave_the_board() {
    let mut app = app_with_pair();
    // Released on the left border, left of every tile centre in column 0.
    drag(&mut app, (5, 1), (0, 1));
    assert_eq!(app.round().score(), 2);
}

#[test]
fn test_press_outside_board_does_not_select() {
    let mut app = app_with_pair();
    drag(&mut app, (0, 0), (5, 1));
    assert_eq!(app.round().score(), 0);
    assert!(!app.round().selection().is_dragging());
}

#[test]
fn test_round_end_banner_and_share() {
    let mut app = app_with_pair();
    drag(&mut app, (2, 1), (5, 1));

    // Sharing mid-round does nothing.
    app.handle_action(GameAction::Share);
    assert!(app.last_share().is_none());

    app.advance(ROUND_SECONDS * 1000);
    assert_eq!(app.round().phase(), Phase::Ended);
    let toast = app.toast().unwrap();
    assert_eq!(toast.text, "final score 2");
    assert_eq!(toast.remaining_ms, 4000);

    app.handle_key(key(KeyCode::Char('s')));
    assert_eq!(
        app.last_share(),
        Some(&ShareOutcome::TextOnly("Mandarin 10: 2 pts, best 2".to_string()))
    );
    assert_eq!(app.toast().unwrap().text, "Mandarin 10: 2 pts, best 2");

    // A new round clears the banner.
    app.handle_key(key(KeyCode::Enter));
    assert!(app.toast().is_none());
    assert_eq!(app.round().best_score(), 2);
}

#[test]
fn test_render_shows_toast_row() {
    let mut app = app_with_pair();
    drag(&mut app, (2, 1), (5, 1));

    let mut fb = FrameBuffer::new(0, 0);
    app.render_into(VP, &mut fb);
    let mut text = String::new();
    fb.row_text(12, &mut text);
    assert!(text.contains("+2 new best!"));
}

#[test]
fn test_app_from_config_without_persistence() {
    let mut config = AppConfig::default();
    config.persist = false;
    let app = App::new(&config, 3);
    assert_eq!(app.round().best_score(), 0);
    assert!(!app.round().persistence_degraded());
}
