use mandarin_ten::term::RenderThrottle;

#[test]
fn render_throttle_renders_first_frame() {
    let mut t = RenderThrottle::new(500);
    assert!(t.should_render(0, 1));
}

#[test]
fn render_throttle_renders_on_change() {
    let mut t = RenderThrottle::new(500);
    assert!(t.should_render(0, 1));
    assert!(t.should_render(1, 2));
}

#[test]
fn render_throttle_skips_unchanged_until_heartbeat() {
    let mut t = RenderThrottle::new(500);
    assert!(t.should_render(0, 1));
    assert!(!t.should_render(10, 1));
    assert!(!t.should_render(499, 1));
    assert!(t.should_render(500, 1));
    assert!(!t.should_render(501, 1));
}

#[test]
fn render_throttle_invalidate_forces_next_frame() {
    let mut t = RenderThrottle::new(500);
    assert!(t.should_render(0, 1));
    t.invalidate();
    assert!(t.should_render(1, 1));
    assert!(!t.should_render(2, 1));
}

#[test]
fn render_throttle_follows_round_fingerprint() {
    use mandarin_ten::core::{MemoryStore, RoundController};

    let mut round = RoundController::new(MemoryStore::new(), 30.0, 10.0, 5);
    let mut t = RenderThrottle::new(500);
    assert!(t.should_render(0, round.snapshot().fingerprint()));
    assert!(!t.should_render(16, round.snapshot().fingerprint()));

    round.start();
    assert!(t.should_render(32, round.snapshot().fingerprint()));
    round.advance(999);
    assert!(!t.should_render(48, round.snapshot().fingerprint()));
    round.advance(1);
    assert!(t.should_render(64, round.snapshot().fingerprint()));
}
