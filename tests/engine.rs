use doodle_engine::draw::fill_background;
use doodle_engine::notification::NoopNotifier;
use doodle_engine::util::Point;
use doodle_engine::{
    Contact, DoodleEngine, EngineOptions, FillOutcome, MemoryDraftStore, Rgba8, Snapshot,
};
use std::time::{Duration, Instant};

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const WHITE: Rgba8 = Rgba8::opaque(255, 255, 255);

fn engine_with_store(width: f64, height: f64, scale: f64, store: MemoryDraftStore) -> DoodleEngine {
    DoodleEngine::new(
        width,
        height,
        scale,
        EngineOptions::default(),
        Box::new(store),
        Box::new(NoopNotifier),
    )
    .unwrap()
}

fn engine(width: f64, height: f64) -> DoodleEngine {
    engine_with_store(width, height, 1.0, MemoryDraftStore::new())
}

fn snapshot(engine: &DoodleEngine) -> Snapshot {
    engine.surface().snapshot().unwrap()
}

fn stroke(engine: &mut DoodleEngine, y: f64) {
    engine.pointer_down(Contact::new(1, 5.0, y));
    engine.pointer_move(Contact::new(1, 55.0, y));
    engine.pointer_up(1);
}

#[test]
fn fill_on_white_buffer_paints_every_pixel_once() {
    let mut engine = engine(4.0, 4.0);
    engine.flood_fill(0.0, 0.0, "#FFFFFF");
    let depth = engine.undo_depth();

    let outcome = engine.flood_fill(0.0, 0.0, "#FF0000");
    assert_eq!(outcome, Some(FillOutcome::Filled { pixels: 16 }));
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(engine.surface().pixel(x, y), Some(RED));
        }
    }
    assert_eq!(engine.undo_depth(), depth + 1);
}

#[test]
fn undo_twice_then_redo_walks_stroke_history() {
    let mut engine = engine(60.0, 60.0);
    stroke(&mut engine, 10.0);
    let after_first = snapshot(&engine);
    stroke(&mut engine, 30.0);
    let after_second = snapshot(&engine);
    stroke(&mut engine, 50.0);
    assert_eq!(engine.undo_depth(), 4);

    engine.undo();
    engine.undo();
    assert_eq!(snapshot(&engine), after_first);

    engine.redo();
    assert_eq!(snapshot(&engine), after_second);
    assert_eq!(engine.redo_depth(), 1);
}

#[test]
fn burst_of_commits_autosaves_latest_snapshot_once() {
    let store = MemoryDraftStore::new();
    let mut engine = engine_with_store(8.0, 8.0, 1.0, store.clone());
    let start = Instant::now();
    let colors = [
        Rgba8::opaque(255, 0, 0),
        Rgba8::opaque(0, 255, 0),
        Rgba8::opaque(0, 0, 255),
        Rgba8::opaque(255, 255, 0),
        Rgba8::opaque(0, 255, 255),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        {
            let ctx = engine.surface().context().unwrap();
            fill_background(&ctx, color).unwrap();
        }
        engine.save_state_at(start + Duration::from_millis(i as u64 * 400));
    }
    // base entry plus one per commit
    assert_eq!(engine.undo_depth(), 6);
    let latest = snapshot(&engine);

    let mut now = start;
    while now < start + Duration::from_secs(10) {
        engine.poll_autosave(now);
        now += Duration::from_millis(100);
    }

    assert_eq!(store.write_count(), 1);
    assert_eq!(store.payload(), Some(latest.to_png().unwrap()));
}

#[test]
fn pinch_to_double_distance_keeps_midpoint_still() {
    let mut engine = engine(400.0, 400.0);
    engine.pointer_down(Contact::new(1, 150.0, 200.0));
    engine.pointer_down(Contact::new(2, 250.0, 200.0));
    let midpoint = Point::new(200.0, 200.0);
    let before = engine.zoom().to_logical(midpoint);

    engine.touches_moved(&[
        Contact::new(1, 100.0, 200.0),
        Contact::new(2, 300.0, 200.0),
    ]);

    assert!((engine.zoom().scale - 2.0).abs() < 1e-9);
    assert_eq!(engine.zoom().to_logical(midpoint), before);
}

#[test]
fn pinch_never_exceeds_zoom_bounds() {
    let mut engine = engine(400.0, 400.0);
    engine.pointer_down(Contact::new(1, 195.0, 200.0));
    engine.pointer_down(Contact::new(2, 205.0, 200.0));
    for spread in [40.0, 120.0, 190.0, 2.0, 1.0, 150.0] {
        engine.touches_moved(&[
            Contact::new(1, 200.0 - spread, 200.0),
            Contact::new(2, 200.0 + spread, 200.0),
        ]);
        let zoom = *engine.zoom();
        assert!((1.0..=5.0).contains(&zoom.scale));
        assert!(zoom.pan.x <= 0.0 && zoom.pan.x >= -400.0 * (zoom.scale - 1.0) - 1e-9);
        assert!(zoom.pan.y <= 0.0 && zoom.pan.y >= -400.0 * (zoom.scale - 1.0) - 1e-9);
    }
}

#[test]
fn scaled_surface_pan_stays_within_physical_bounds() {
    // 100 logical px at 2x => 200 physical px per axis
    let mut engine = engine_with_store(100.0, 100.0, 2.0, MemoryDraftStore::new());
    engine.pointer_down(Contact::new(1, 45.0, 50.0));
    engine.pointer_down(Contact::new(2, 55.0, 50.0));
    engine.touches_moved(&[Contact::new(1, 30.0, 50.0), Contact::new(2, 60.0, 50.0)]);
    engine.touches_moved(&[Contact::new(1, -970.0, -950.0), Contact::new(2, -940.0, -950.0)]);

    let zoom = *engine.zoom();
    assert!((zoom.scale - 3.0).abs() < 1e-9);
    assert!((zoom.pan.x - -400.0).abs() < 1e-9);
    assert!((zoom.pan.y - -400.0).abs() < 1e-9);
}

#[test]
fn unsupported_fill_color_falls_back_to_black() {
    let mut engine = engine(3.0, 3.0);
    engine.flood_fill(1.0, 1.0, "cornflowerblue");
    assert_eq!(engine.surface().pixel(2, 2), Some(Rgba8::opaque(0, 0, 0)));
}

#[test]
fn fractional_scale_fill_covers_physical_buffer() {
    // 3 logical px at 1.5 => floor(4.5) = 4 physical px per axis
    let mut engine = engine_with_store(3.0, 3.0, 1.5, MemoryDraftStore::new());
    assert_eq!(engine.surface().physical_width(), 4);
    assert_eq!(engine.surface().physical_height(), 4);

    assert_eq!(
        engine.flood_fill(0.0, 0.0, "#FFFFFF"),
        Some(FillOutcome::Filled { pixels: 16 })
    );
    assert_eq!(engine.surface().pixel(3, 3), Some(WHITE));
}

#[test]
fn undo_redo_sequence_keeps_stack_accounting() {
    let mut engine = engine(60.0, 60.0);
    let mut committed = vec![snapshot(&engine)];
    let mut cursor = 0usize;

    // deterministic mix of commits, undos and redos
    let script = "cuucrcucuurrrccuuuuu";
    for op in script.chars() {
        match op {
            'c' => {
                stroke(&mut engine, 5.0 + committed.len() as f64 * 3.0);
                committed.truncate(cursor + 1);
                committed.push(snapshot(&engine));
                cursor += 1;
            }
            'u' => {
                let moved = engine.undo();
                assert_eq!(moved, cursor > 0);
                cursor = cursor.saturating_sub(1);
            }
            'r' => {
                let moved = engine.redo();
                assert_eq!(moved, cursor + 1 < committed.len());
                if moved {
                    cursor += 1;
                }
            }
            _ => unreachable!(),
        }
        assert_eq!(snapshot(&engine), committed[cursor]);
        assert_eq!(engine.undo_depth(), cursor + 1);
        assert_eq!(engine.redo_depth(), committed.len() - cursor - 1);
    }
}
