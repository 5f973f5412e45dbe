use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::camera::Camera;
use crate::config::EngineConfig;
use crate::locomotion::Intents;
use crate::world::{Map, Palette, World};

mod camera;
mod config;
mod locomotion;
mod projector;
mod raycaster;
mod renderer;
mod world;

// One digit per tile: 0 is open space, 1..=3 pick a palette color.
#[rustfmt::skip]
const WORLD_MAP: [[u8; 12]; 11] = [
    [1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 2],
    [1, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 2],
    [2, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 1],
    [1, 2, 3, 2, 0, 0, 2, 0, 0, 0, 0, 2],
    [2, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 2],
    [2, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 2, 3, 0, 0, 0, 2],
    [2, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0, 2],
    [1, 2, 1, 2, 1, 2, 1, 2, 1, 2, 1, 1],
];

const COLORS: [[u8; 3]; 4] = [[0, 0, 0], [105, 20, 14], [164, 66, 0], [213, 137, 54]];

const SPAWN_POS: Vec2 = Vec2::new(3.0, 7.0);
const SPAWN_DIR: Vec2 = Vec2::new(0.0, 1.0);

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    world: World,
    camera: Camera,
    config: EngineConfig,

    frame_counter: u32,
    last_fps_log: Instant,

    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new() -> anyhow::Result<Self> {
        let rows = WORLD_MAP.len();
        let cols = WORLD_MAP[0].len();
        let cells = WORLD_MAP.iter().flatten().copied().collect();
        let map = Map::new(rows, cols, cells)?;
        let world = World::new(map, Palette::new(COLORS.to_vec()))?;

        Ok(Self {
            window: None,
            surface: None,
            world,
            camera: Camera::new(SPAWN_POS, SPAWN_DIR),
            config: EngineConfig::default(),
            frame_counter: 0,
            last_fps_log: Instant::now(),
            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        })
    }

    fn tick(&mut self) {
        // Cap dt so a paused or dragged window doesn't teleport the camera
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_tick);
        self.last_tick = now;
        if dt > Duration::from_millis(100) {
            dt = Duration::from_millis(100);
        }

        let down = |code| self.keys_down.contains(&code);
        let intents = Intents {
            turn_left: down(KeyCode::ArrowLeft) || down(KeyCode::KeyQ),
            turn_right: down(KeyCode::ArrowRight) || down(KeyCode::KeyE),
            move_forward: down(KeyCode::ArrowUp) || down(KeyCode::KeyW),
            move_backward: down(KeyCode::ArrowDown) || down(KeyCode::KeyS),
            strafe_left: down(KeyCode::KeyA),
            strafe_right: down(KeyCode::KeyD),
        };

        locomotion::apply(
            &mut self.camera,
            self.world.map(),
            intents,
            dt.as_secs_f32(),
            &self.config,
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Gridcaster")
            .with_inner_size(LogicalSize::new(1000.0, 800.0));

        let window = Rc::new(event_loop.create_window(attributes).expect("create window"));

        let context = softbuffer::Context::new(window.clone()).expect("softbuffer context");
        let surface =
            softbuffer::Surface::new(&context, window.clone()).expect("softbuffer surface");

        self.surface = Some(surface);
        self.window = Some(window);

        self.last_tick = Instant::now();
        self.window.as_ref().unwrap().request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key,
                        state,
                        ..
                    },
                ..
            } => {
                if let PhysicalKey::Code(code) = physical_key {
                    use winit::event::ElementState;
                    match state {
                        ElementState::Pressed => {
                            if code == KeyCode::Escape {
                                event_loop.exit();
                                return;
                            }
                            self.keys_down.insert(code);
                        }
                        ElementState::Released => {
                            self.keys_down.remove(&code);
                        }
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.tick();

                let (window, surface) = match (&self.window, &mut self.surface) {
                    (Some(w), Some(s)) if w.id() == id => (w, s),
                    _ => return,
                };

                let size = window.inner_size();
                let (width, height) = (size.width as usize, size.height as usize);
                if width == 0 || height == 0 {
                    return; // minimized
                }

                surface
                    .resize(
                        NonZeroU32::new(width as u32).unwrap(),
                        NonZeroU32::new(height as u32).unwrap(),
                    )
                    .expect("resize surface");

                let mut buf = surface.buffer_mut().expect("buffer_mut");
                if let Err(err) = renderer::render_frame(
                    &mut buf,
                    width,
                    height,
                    &self.world,
                    &self.camera,
                    &self.config,
                ) {
                    // Only reachable with a broken map; nothing to recover.
                    log::error!("render failed: {err}");
                    event_loop.exit();
                    return;
                }
                buf.present().expect("present");

                self.frame_counter += 1;
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_fps_log).as_secs_f32();
                if elapsed >= 1.0 {
                    log::info!("fps: {:.1}", self.frame_counter as f32 / elapsed);
                    self.frame_counter = 0;
                    self.last_fps_log = now;
                }

                self.window.as_ref().unwrap().request_redraw();
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new()?;
    // Keep ticking even without OS events; redraws pace the session.
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
