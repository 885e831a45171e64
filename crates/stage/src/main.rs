//! Demo entry point: drives a small scripted scene and prints its final state.
use std::path::Path;

use action_scheduler::{ActionContext, ActionManager, ActionTag};
use actions::builder::{call, delay, repeat, repeat_forever, sequence, tagged};
use actions::Easing;
use anyhow::{Context, Result};
use stage::{FrameDriver, NodeRef, Scene, StageConfig, Tween, Vec2, set_visible};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SPIN: ActionTag = ActionTag(1);

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = StageConfig::from_env().context("invalid stage configuration")?;
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let mut scene = Scene::new();
    let mut driver = FrameDriver::new(config.clone());
    populate(&mut scene, driver.manager());

    info!(
        frames = config.frames,
        frame_rate = config.frame_rate,
        actions = driver.manager().number_of_running_actions(),
        "scene ready"
    );
    driver.run(config.frames);
    info!(
        frame = driver.frame(),
        elapsed = driver.elapsed(),
        actions = driver.manager().number_of_running_actions(),
        "run finished"
    );

    let report = scene.report(&driver);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Setup logging to stderr, and to `<log_dir>/stage.log` when a directory is given.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::never(dir, "stage.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        info!("Log file: {}/stage.log", dir.display());
    }
    Ok(guard)
}

/// Builds the demo scene.
///
/// - `hero` walks right, turns around, and reports arrival
/// - `spinner` spins forever until the director stops it by tag
/// - `scout` starts paused and is released by the director
/// - `blinker` toggles visibility three times
/// - `director` scripts the others, then clears its own actions mid-step
fn populate(scene: &mut Scene, manager: &ActionManager<NodeRef>) {
    let hero = scene.spawn("hero");
    hero.run_action(
        manager,
        sequence(vec![
            Tween::move_to(1.0, Vec2::new(120.0, 0.0))
                .with_easing(Easing::QuadInOut)
                .boxed(),
            Tween::rotate_by(0.5, 180.0).boxed(),
            call(|cx: &ActionContext<'_, NodeRef>| {
                info!(node = ?cx.target(), "hero arrived");
            }),
        ]),
    );

    let spinner = scene.spawn("spinner");
    spinner.run_action(
        manager,
        tagged(SPIN, repeat_forever(Tween::rotate_by(1.0, 360.0).boxed())),
    );

    let scout = scene.spawn("scout");
    manager.add_action(Tween::move_by(1.5, Vec2::new(0.0, 60.0)), &scout, true);

    let blinker = scene.spawn("blinker");
    let blink = sequence(vec![
        set_visible(false),
        delay(0.25),
        set_visible(true),
        delay(0.25),
    ]);
    blinker.run_action(manager, repeat(blink, 3));

    let director = scene.spawn("director");
    director.run_action(
        manager,
        sequence(vec![
            delay(1.0),
            call(move |cx: &ActionContext<'_, NodeRef>| {
                let manager = cx.manager();
                let stopped = spinner.stop_action_by_tag(manager, SPIN);
                let released = scout.resume(manager);
                info!(stopped, released, "director cues");
            }),
            delay(1.0),
            call(|cx: &ActionContext<'_, NodeRef>| {
                let cleared = cx.target().stop_all_actions(cx.manager());
                info!(cleared, "director exits");
            }),
            delay(60.0),
        ]),
    );
}
