use anyhow::Result;
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod app;
mod core;
mod engine;
mod game;

use app::App;
use engine::renderer::Renderer;

/// Used when no asset directory is given on the command line
const DEFAULT_ASSET_ROOT: &str = "assets";

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting Ringside...");

    let asset_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT));

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Ringside")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let mut app = App::new(window, renderer, &asset_root);

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    app.resize(physical_size.width, physical_size.height);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if !app.handle_key(&event) {
                        info!("Escape pressed, shutting down...");
                        elwt.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if let Err(e) = app.frame() {
                        error!("Render error: {}", e);
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                app.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
