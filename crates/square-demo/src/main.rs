//! Sample scenes on the headless backend.
//!
//! `square-demo` runs one window with a triangle; `square-demo multi` runs
//! two solid-color windows side by side. Input is scripted, so every window
//! closes on its own.

mod scenes;

use anyhow::Result;
use square_engine::backend::headless::{EventQueue, HeadlessBackend};
use square_engine::input::{Key, KeyEvent, WindowResizeEvent};
use square_engine::logging::{init_logging, LoggingConfig};
use square_engine::renderer::{App, Renderer, RendererProperties};

/// Frames after which a window closes even without Escape.
const MAX_FRAMES: u64 = 120;

fn tap(events: &EventQueue, key: Key) {
    events.push_input(KeyEvent::pressed(key));
    events.push_input(KeyEvent::released(key));
}

fn window(title: &str, width: u32, height: u32) -> (Renderer<HeadlessBackend>, EventQueue) {
    let backend = HeadlessBackend::new().close_after(MAX_FRAMES);
    let events = backend.events();
    let properties = RendererProperties::default()
        .with_title(title)
        .with_size(width, height);
    (Renderer::new(backend, properties), events)
}

fn single_window(app: &mut App) -> Result<()> {
    let (renderer, events) = window("triangle", 1280, 720);
    let aspect = renderer.properties().aspect();
    app.attach_renderer(renderer, scenes::triangle("E67825", aspect)?)?;

    events.push_input(WindowResizeEvent { width: 800, height: 600 });
    tap(&events, Key::Up);
    tap(&events, Key::Up);
    tap(&events, Key::Escape);
    Ok(())
}

fn multi_window(app: &mut App) -> Result<()> {
    let (left, left_events) = window("left", 640, 480);
    let (right, right_events) = window("right", 640, 480);
    app.attach_renderer(left, scenes::solid_color("E67825")?)?;
    app.attach_renderer(right, scenes::solid_color("2578E6")?)?;

    tap(&left_events, Key::Down);
    tap(&left_events, Key::Escape);
    tap(&right_events, Key::Up);
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::with_filter("info"));

    let multi = std::env::args().nth(1).is_some_and(|a| a == "multi");
    let mut app = App::new();
    if multi {
        multi_window(&mut app)?;
    } else {
        single_window(&mut app)?;
    }

    log::info!("running {} window(s)", app.len());
    app.run();
    Ok(())
}
