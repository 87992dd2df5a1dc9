use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use crate::audio::AudioContext;
use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::input::{Action, ActionMap, InputState};
use crate::renderer::Renderer;
use crate::scene::{SceneContext, SceneStack};

// ── TickClock ───────────────────────────────────────────────────────────────

/// Fixed-interval tick schedule.
///
/// One simulation step runs per due tick; a late frame does not queue extra
/// steps to catch up.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    next: Option<Instant>,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms.max(1)))
    }

    /// A clock running `rate` ticks per second.
    pub fn per_second(rate: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(rate.max(1))))
    }

    pub fn interval(&self) -> Duration { self.interval }

    /// Instant of the next tick; `None` before the first one.
    pub fn deadline(&self) -> Option<Instant> { self.next }

    pub fn is_due(&self, now: Instant) -> bool {
        self.next.is_none_or(|next| now >= next)
    }

    /// Mark the tick due at `now` as consumed and schedule the next one.
    /// A tick that ran late pushes the schedule back instead of bunching up.
    pub fn consume(&mut self, now: Instant) {
        let on_schedule = self.next.map(|next| next + self.interval).filter(|t| *t > now);
        self.next = Some(on_schedule.unwrap_or(now + self.interval));
    }
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    config: GameConfig,
    debug_enabled: bool,
}

impl EngineBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self { config, debug_enabled: false }
    }

    /// Allow the grid overlay toggle and verbose player logging.
    pub fn with_debug(mut self, enabled: bool) -> Self { self.debug_enabled = enabled; self }

    /// Open the window and run until the player quits. Setup failures
    /// (GPU, textures, sounds) are returned after the loop has shut down.
    pub fn run(self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new().context("creating event loop")?;
        let clock = TickClock::per_second(self.config.window.tick_rate);
        let mut app = App { builder: self, running: None, clock, error: None };
        event_loop.run_app(&mut app).context("event loop failed")?;
        match app.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

/// State that exists once the window is up.
struct Running {
    renderer: Renderer,
    scenes: SceneStack,
    input: InputState,
    actions: ActionMap<Action>,
    audio: AudioContext,
}

struct App {
    builder: EngineBuilder,
    running: Option<Running>,
    clock: TickClock,
    error: Option<anyhow::Error>,
}

impl App {
    fn start(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let cfg = &self.builder.config;
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(&cfg.window.title)
                        .with_inner_size(winit::dpi::PhysicalSize::new(
                            cfg.window.width,
                            cfg.window.height,
                        ))
                        .with_resizable(false),
                )
                .context("creating window")?,
        );
        let mut renderer = pollster::block_on(Renderer::new(window))?;
        let mut audio = AudioContext::new();
        let scenes = crate::game::build_scenes(cfg, &mut renderer, &mut audio)?;

        Ok(Running {
            renderer,
            scenes,
            input: InputState::new(),
            actions: ActionMap::<Action>::default_bindings(),
            audio,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => {
                log::info!("window open, ticking every {:?}", self.clock.interval());
                self.running = Some(running);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = self.running.as_ref() else { return };
        if self.clock.is_due(Instant::now()) {
            running.renderer.window.request_redraw();
        }
        if let Some(deadline) = self.clock.deadline() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else { return };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                event_loop.exit();
            }

            WindowEvent::Resized(size) => running.renderer.resize(size),

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                if !self.clock.is_due(now) {
                    return;
                }
                self.clock.consume(now);

                let mut ctx = SceneContext {
                    input: &running.input,
                    actions: &running.actions,
                    audio: &mut running.audio,
                    debug: self.builder.debug_enabled,
                };
                if !running.scenes.update(&mut ctx) {
                    log::info!("quit requested");
                    event_loop.exit();
                    return;
                }

                running.scenes.draw(&mut running.renderer);
                running.renderer.present();
                running.input.clear_frame_state();
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => running.input.press(code),
                ElementState::Released => running.input.release(code),
            },

            _ => {}
        }
    }
}
