//! Script replay: drives a fresh engine from a JSON list of steps.

use crate::ReplayArgs;
use anyhow::{Context, Result, bail};
use doodle_engine::notification::{DesktopNotifier, LogNotifier, Notifier};
use doodle_engine::session::{self, FileDraftStore};
use doodle_engine::{Config, Contact, DoodleEngine, EngineOptions, PointerId};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// A single scripted event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Step {
    Down { id: PointerId, x: f64, y: f64 },
    Move { id: PointerId, x: f64, y: f64 },
    Up { id: PointerId },
    Cancel { id: PointerId },
    /// Several pointers moved in the same frame
    Touches { points: Vec<Contact> },
    Color { value: String },
    Pen,
    Eraser,
    FillTool,
    Stamp { glyph: String },
    Size { value: f64 },
    Fill { x: f64, y: f64, color: String },
    Undo,
    Redo,
    Clear,
    ResetZoom,
    /// Sleeps, then runs the autosave if it became due
    Wait { ms: u64 },
    /// Runs any pending autosave immediately
    Save,
}

pub fn parse_script(source: &str) -> Result<Vec<Step>> {
    serde_json::from_str(source).context("script must be a JSON array of steps")
}

fn apply(engine: &mut DoodleEngine, step: &Step) {
    match step {
        Step::Down { id, x, y } => engine.pointer_down(Contact::new(*id, *x, *y)),
        Step::Move { id, x, y } => engine.pointer_move(Contact::new(*id, *x, *y)),
        Step::Up { id } => engine.pointer_up(*id),
        Step::Cancel { id } => engine.pointer_cancel(*id),
        Step::Touches { points } => engine.touches_moved(points),
        Step::Color { value } => engine.select_color(value),
        Step::Pen => engine.select_pen(),
        Step::Eraser => {
            engine.toggle_eraser();
        }
        Step::FillTool => {
            engine.toggle_fill();
        }
        Step::Stamp { glyph } => engine.select_stamp(glyph),
        Step::Size { value } => engine.set_brush_size(*value),
        Step::Fill { x, y, color } => {
            if let Some(outcome) = engine.flood_fill(*x, *y, color) {
                debug!("Fill at ({x}, {y}): {outcome:?}");
            }
        }
        Step::Undo => {
            engine.undo();
        }
        Step::Redo => {
            engine.redo();
        }
        Step::Clear => engine.clear(),
        Step::ResetZoom => engine.reset_zoom(),
        Step::Wait { ms } => {
            std::thread::sleep(Duration::from_millis(*ms));
            engine.poll_autosave(Instant::now());
        }
        Step::Save => {
            engine.flush_autosave();
        }
    }
}

pub fn run(args: &ReplayArgs, config: &Config, config_dir: &Path) -> Result<()> {
    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let steps = parse_script(&source)?;

    let storage = session::options_from_config(&config.storage, config_dir)?;
    let store = FileDraftStore::new(storage);

    let runtime = if args.notify {
        Some(tokio::runtime::Runtime::new().context("failed to start notification runtime")?)
    } else {
        None
    };
    let notifier: Box<dyn Notifier> = match &runtime {
        Some(runtime) => Box::new(DesktopNotifier::new(runtime.handle().clone())),
        None => Box::new(LogNotifier),
    };

    let mut engine = DoodleEngine::new(
        args.width,
        args.height,
        args.scale,
        EngineOptions::from_config(config),
        Box::new(store),
        notifier,
    )?;

    if let Some(seed) = &args.seed {
        seed_from_file(&mut engine, seed)?;
    } else if args.restore && !engine.restore_draft() {
        warn!("No usable autosaved draft; starting blank");
    }

    for step in &steps {
        apply(&mut engine, step);
    }
    engine.flush_autosave();
    info!(
        "Replayed {} steps (undo depth {}, redo depth {})",
        steps.len(),
        engine.undo_depth(),
        engine.redo_depth()
    );

    export(&engine, args)?;

    if let Some(runtime) = runtime {
        // let queued notifications reach the bus
        runtime.block_on(tokio::time::sleep(Duration::from_millis(300)));
    }
    Ok(())
}

fn seed_from_file(engine: &mut DoodleEngine, path: &Path) -> Result<()> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read seed {}", path.display()))?;
    if engine.seed_from_encoded(&bytes).is_ok() {
        return Ok(());
    }

    let Ok(text) = std::str::from_utf8(&bytes) else {
        bail!("{} is neither an image nor base64 text", path.display());
    };
    engine
        .seed_from_base64(text)
        .with_context(|| format!("failed to seed from {}", path.display()))
}

fn export(engine: &DoodleEngine, args: &ReplayArgs) -> Result<()> {
    if args.data_url {
        println!("{}", engine.flatten()?.to_data_url());
    }

    match &args.out {
        Some(out) => {
            let exported = engine.flatten()?;
            fs::write(out, &exported.bytes)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Saved {} ({}x{})", out.display(), exported.width, exported.height);
        }
        None if !args.data_url => {
            let path = engine.save_offline_draft()?;
            println!("Saved {}", path.display());
        }
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doodle_engine::session::MemoryDraftStore;
    use doodle_engine::{DrawingState, Tool};

    fn engine() -> DoodleEngine {
        DoodleEngine::new(
            100.0,
            100.0,
            1.0,
            EngineOptions::default(),
            Box::new(MemoryDraftStore::new()),
            Box::new(LogNotifier),
        )
        .unwrap()
    }

    #[test]
    fn parses_tagged_steps() {
        let steps = parse_script(
            r#"[
                {"op": "down", "id": 1, "x": 10, "y": 10},
                {"op": "touches", "points": [{"id": 1, "x": 5, "y": 5}]},
                {"op": "fill-tool"},
                {"op": "reset-zoom"},
                {"op": "fill", "x": 1, "y": 2, "color": "red"}
            ]"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 5);
        assert!(matches!(steps[2], Step::FillTool));
        assert!(matches!(steps[4], Step::Fill { ref color, .. } if color == "red"));
    }

    #[test]
    fn rejects_unknown_ops() {
        assert!(parse_script(r#"[{"op": "teleport"}]"#).is_err());
        assert!(parse_script(r#"{"op": "pen"}"#).is_err());
    }

    #[test]
    fn applied_steps_drive_engine() {
        let mut engine = engine();
        let steps = parse_script(
            r#"[
                {"op": "down", "id": 1, "x": 10, "y": 10},
                {"op": "move", "id": 1, "x": 50, "y": 10},
                {"op": "up", "id": 1},
                {"op": "eraser"},
                {"op": "undo"}
            ]"#,
        )
        .unwrap();
        for step in &steps {
            apply(&mut engine, step);
        }
        assert_eq!(engine.tools().mode, Tool::Eraser);
        assert_eq!(*engine.state(), DrawingState::Idle);
        assert!(engine.can_redo());
    }
}
