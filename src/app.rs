// Application state driven by the winit event loop

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use glam::Vec3;
use log::{debug, info, warn};
use winit::event::KeyEvent;
use winit::window::Window;

use crate::engine::assets::{AssetLoader, AsyncLoader};
use crate::engine::frame_clock::FrameClock;
use crate::engine::input::{pressed_key_of, KeyBindings};
use crate::engine::renderer::{PerspectiveCamera, Renderer, SceneView};
use crate::game::arena::Arena;
use crate::game::controls::{default_bindings, Command};

pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 5000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 400.0, 2000.0);

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 300;

pub struct App {
    window: Arc<Window>,
    renderer: Renderer,
    view: SceneView,
    clock: FrameClock,
    loader: AsyncLoader,
    arena: Arena,
    bindings: KeyBindings<Command>,
    /// Cleared once every requested asset has come back
    loading: bool,
}

impl App {
    /// Build the scene and start loading its assets from `asset_root`
    pub fn new(window: Arc<Window>, renderer: Renderer, asset_root: &Path) -> Self {
        let (width, height) = renderer.output_size();

        let mut camera = PerspectiveCamera::new(
            CAMERA_FOV_DEGREES,
            width as f32 / height as f32,
            CAMERA_NEAR,
            CAMERA_FAR,
        );
        camera.set_position(CAMERA_POSITION);
        camera.look_at(Vec3::ZERO);
        let view = SceneView::new(camera, width, height);
        let camera = view.camera();
        let (near, far) = camera.clip_range();
        info!(
            "Camera at {} looking at {}, fov {}, clip {}..{}",
            camera.position,
            camera.target(),
            camera.fov_y_degrees(),
            near,
            far
        );

        let mut loader = AsyncLoader::new(AssetLoader::new(asset_root));
        let base_path = loader.loader().base_path();
        info!("Loading assets from {}", base_path.display());
        if !base_path.is_dir() {
            warn!("{} is not a directory; every load will fail", base_path.display());
        }

        let mut arena = Arena::new();
        arena.load_all(&mut loader);
        for actor in arena.actors().all() {
            info!("{} moves: {:?}", actor.name, actor.move_names());
        }

        let bindings = default_bindings(arena.actors());
        if bindings.is_empty() {
            warn!("No key bindings");
        }
        for (key, command) in bindings.iter() {
            debug!("{:?} -> {:?}", key, command);
        }
        info!("{} keys bound", bindings.len());
        info!("Surface format: {:?}", renderer.surface_format());

        Self {
            window,
            renderer,
            view,
            clock: FrameClock::new(),
            loader,
            arena,
            bindings,
            loading: true,
        }
    }

    /// Handle a keyboard event. Returns false when the app should exit.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let Some(key) = pressed_key_of(event) else {
            return true;
        };

        match self.bindings.command(key) {
            Some(Command::Trigger { actor, action }) => {
                self.arena.handle_trigger(actor, action);
                true
            }
            Some(Command::Quit) => false,
            None => true,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if self.view.resize(width, height) {
            self.renderer.resize(width, height);
            let (width, height) = self.view.output_size();
            debug!(
                "Resized to {}x{}, aspect {:.3}",
                width,
                height,
                self.view.camera().aspect()
            );
        }
    }

    /// Apply finished loads, advance the scene and draw one frame
    pub fn frame(&mut self) -> Result<()> {
        for event in self.loader.poll() {
            self.arena.apply(event);
        }
        if self.loading && self.loader.is_idle() {
            self.loading = false;
            let actors = self.arena.actors();
            let scene = self.arena.scene();
            info!(
                "Loading finished: {}/{} fighters animated, {} nodes, {} shadow-casting lights",
                actors.loaded_count(),
                actors.count(),
                scene.nodes().len(),
                scene.shadow_casting_lights()
            );
        }

        let dt = self.clock.begin_frame();
        self.arena.update(dt);

        if self.clock.frame_count() % FPS_LOG_INTERVAL == 0 {
            let playing: usize = self
                .arena
                .actors()
                .all()
                .iter()
                .filter_map(|actor| actor.mixer())
                .map(|mixer| mixer.playing_count())
                .sum();
            debug!(
                "FPS: {:.1} (last frame {:.1}ms, up {:.0}s), {} loads in flight, {} actions playing, {} reversions pending",
                self.clock.fps(),
                self.clock.delta() * 1000.0,
                self.clock.elapsed().as_secs_f32(),
                self.loader.in_flight(),
                playing,
                self.arena.switcher().pending_reversions()
            );
        }

        self.renderer.set_clear_color(self.arena.clear_color());
        self.renderer.render()
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}
