use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Fullscreen, Window, WindowId};

use crate::backend::Canvas;
use crate::core::{step_frame, AppControl, Game, GameCtx};
use crate::device::{CanvasPresenter, Gpu, PresentOutcome, SurfaceOptions};
use crate::display::{Display, DisplayConfig};
use crate::input::platform::WinitEventMapper;
use crate::input::{InputConfig, InputNormalizer};
use crate::time::FrameClock;

/// Everything the runtime needs to open the game window.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub surface: SurfaceOptions,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and drives `game` until the window closes or the game
    /// asks to exit.
    pub fn run<G>(config: RuntimeConfig, game: G) -> Result<()>
    where
        G: Game + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, game);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,
    mapper: WinitEventMapper,
    presenter: CanvasPresenter,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<G: Game> {
    config: RuntimeConfig,
    game: G,
    input: InputNormalizer,

    // Dropped before the window so cached resources go first.
    display: Option<Display<Canvas>>,
    entry: Option<WindowEntry>,

    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<G: Game> AppState<G> {
    fn new(config: RuntimeConfig, game: G) -> Self {
        let input = InputNormalizer::new(&config.input);
        Self {
            config,
            game,
            input,
            display: None,
            entry: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let cfg = &self.config.display;

        let attrs = Window::default_attributes()
            .with_title(cfg.title.clone())
            .with_inner_size(PhysicalSize::new(cfg.width, cfg.height));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let mapper = WinitEventMapper::new((cfg.width, cfg.height), window.inner_size());
        let entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            mapper,
            presenter: CanvasPresenter::new(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, &self.config.surface)),
        }
        .try_build()
        .context("GPU initialization failed")?;

        let canvas = Canvas::new(cfg.width, cfg.height).context("failed to create canvas")?;
        let mut display = Display::new(canvas, cfg);

        self.game
            .init(&mut GameCtx { display: &mut display, input: &mut self.input })
            .context("game init failed")?;

        self.display = Some(display);
        self.entry = Some(entry);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.exit(event_loop);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(entry), Some(display)) = (self.entry.as_mut(), self.display.as_mut()) else {
            return;
        };
        let (game, input) = (&mut self.game, &mut self.input);

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            let time = fields.clock.tick();
            control = step_frame(game, display, input, time);

            let pixels = display.backend().front_buffer();
            if fields.presenter.present(fields.gpu, fields.window, pixels) == PresentOutcome::Fatal {
                control = AppControl::Exit;
            }

            if let Some(on) = display.backend_mut().take_fullscreen_request() {
                log::debug!("fullscreen: {on}");
                fields.window.set_fullscreen(on.then_some(Fullscreen::Borderless(None)));
            }
        });

        if control == AppControl::Exit {
            self.exit(event_loop);
        }
    }
}

impl<G: Game> ApplicationHandler for AppState<G> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.start(event_loop) {
            self.fail(event_loop, e);
            return;
        }

        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Continuous redraw; the surface's FIFO present mode paces it.
        event_loop.set_control_flow(ControlFlow::Wait);
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else { return };

        let raw = entry.with_mapper_mut(|m| m.map(&event));
        if let (Some(raw), Some(display)) = (raw, self.display.as_mut()) {
            display.backend_mut().push_event(raw);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("window closed");
                self.display = None;
                self.entry = None;
                self.exit(event_loop);
            }

            WindowEvent::Resized(size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.with_mapper_mut(|m| m.set_window_size(size));
                entry.with_gpu_mut(|gpu| gpu.resize(size));
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}
