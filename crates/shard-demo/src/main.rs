use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use anyhow::Result;

use shard_engine::core::{AppControl, FrameCtx, Game, GameCtx};
use shard_engine::display::DisplayConfig;
use shard_engine::input::{listener, InputEvent, InputKind, Key};
use shard_engine::logging::{init_logging, LoggingConfig};
use shard_engine::scene::{Transform, TransformRef};
use shard_engine::window::{Runtime, RuntimeConfig};

const SHIP_SPEED: f32 = 240.0;
const MAX_RINGS: usize = 10;

/// Input state written by listeners and read by `update`.
#[derive(Default)]
struct Controls {
    held: HashSet<Key>,
    pointer: (f32, f32),
    clicks: VecDeque<(i32, i32)>,
    fullscreen: bool,
    quit: bool,
}

impl Controls {
    /// Keeps the most recent clicks only; the oldest ring drops off.
    fn record_click(&mut self, x: i32, y: i32) {
        self.clicks.push_back((x, y));
        while self.clicks.len() > MAX_RINGS {
            self.clicks.pop_front();
        }
    }
}

struct Demo {
    controls: Rc<RefCell<Controls>>,
    ship: TransformRef,
    frames: u64,
}

impl Demo {
    fn new() -> Self {
        let ship = Transform::new(600.0, 400.0).with_sprite("assets/ship.png");
        Self {
            controls: Rc::new(RefCell::new(Controls::default())),
            ship: ship.shared(),
            frames: 0,
        }
    }
}

impl Game for Demo {
    fn init(&mut self, ctx: &mut GameCtx<'_>) -> Result<()> {
        let controls = Rc::clone(&self.controls);
        ctx.input.subscribe_all(listener(move |e: &InputEvent| {
            let mut c = controls.borrow_mut();
            match e.kind {
                InputKind::PointerMove => c.pointer = (e.x, e.y),
                InputKind::PointerDown => c.record_click(e.x as i32, e.y as i32),
                InputKind::KeyDown => match e.key {
                    Some(Key::Escape) => c.quit = true,
                    Some(Key::F) => c.fullscreen = true,
                    Some(k) => {
                        c.held.insert(k);
                    }
                    None => {}
                },
                InputKind::KeyUp => {
                    if let Some(k) = e.key {
                        c.held.remove(&k);
                    }
                }
                InputKind::PointerUp | InputKind::PointerWheel => {}
            }
        }));

        log::info!("demo ready: WASD moves, click drops rings, F fullscreen, Esc quits");
        Ok(())
    }

    fn update(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        self.frames += 1;
        let step = SHIP_SPEED * ctx.dt() as f32;

        let mut controls = self.controls.borrow_mut();
        if controls.quit {
            return AppControl::Exit;
        }
        if std::mem::take(&mut controls.fullscreen) {
            ctx.display.set_fullscreen();
        }

        {
            let mut ship = self.ship.borrow_mut();
            let held = |k: Key| controls.held.contains(&k);
            let dx = (held(Key::D) as i32 - held(Key::A) as i32) as f32 * step;
            let dy = (held(Key::S) as i32 - held(Key::W) as i32) as f32 * step;
            ship.translate(dx, dy);
            ship.rotate(90.0 * ctx.dt() as f32);
        }
        ctx.display.add_to_draw(Rc::clone(&self.ship));

        let (w, h) = (ctx.display.width() as i32, ctx.display.height() as i32);
        let (px, py) = (controls.pointer.0 as i32, controls.pointer.1 as i32);
        ctx.display.draw_line(px, 0, px, h, 80, 80, 80, 255);
        ctx.display.draw_line(0, py, w, py, 80, 80, 80, 255);

        // Newest ring brightest.
        for (i, &(x, y)) in controls.clicks.iter().rev().enumerate() {
            let shade = 255 - (i as i32 * 20).min(200);
            ctx.display.draw_circle(x, y, 24, shade, 160, 40, 255);
        }

        let centre = self.ship.borrow().centre();
        ctx.display.draw_circle(centre.x as i32, centre.y as i32, 6, 0, 255, 0, 255);

        ctx.display.show_text(&format!("frame {}", self.frames), 16.0, 16.0, 20, 255, 255, 255);
        ctx.display.show_text(&format!("pointer {px},{py}"), 16.0, 40.0, 16, 200, 200, 200);

        let legend = [['W', ' ', 'u', 'p'], ['S', ' ', 'd', 'n'], ['F', ' ', 'f', 's']];
        ctx.display.show_text_grid(&legend, (w - 80) as f32, 16.0, 18, 255, 220, 120);

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        display: DisplayConfig::from_env(),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, Demo::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_are_capped_to_the_latest_clicks() {
        let mut c = Controls::default();
        for i in 0..25 {
            c.record_click(i, -i);
        }

        assert_eq!(c.clicks.len(), MAX_RINGS);
        assert_eq!(c.clicks.front(), Some(&(15, -15)));
        assert_eq!(c.clicks.back(), Some(&(24, -24)));
    }
}
