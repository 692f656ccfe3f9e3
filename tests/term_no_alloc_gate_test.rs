use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use mandarin_ten::core::{MemoryStore, RoundController};
use mandarin_ten::term::{FrameBuffer, GameView, HudView, Viewport};
use mandarin_ten::types::Point;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn term_game_view_render_is_allocation_free_after_warmup() {
    let view = GameView::default();
    let viewport = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let (w, h) = view.layout_size();
    let mut round = RoundController::new(MemoryStore::new(), w, h, 1);
    round.start();
    round.pointer_down(Point::new(0.5, 0.5));

    let hud = HudView {
        toast: Some("+2"),
        highlight: true,
    };

    // Warm-up (initial clears).
    let mut snap = round.snapshot();
    view.render_into(&snap, Some(&hud), viewport, &mut fb);

    let allocs = with_alloc_counting(|| {
        for i in 0..200u32 {
            round.pointer_move(Point::new((i % 30) as f32 + 0.5, (i % 10) as f32 + 0.5));
            round.snapshot_into(&mut snap);
            let _ = snap.fingerprint();
            view.render_into(&snap, Some(&hud), viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0);
}
