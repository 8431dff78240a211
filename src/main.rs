//! Loopy headless runner
//!
//! Loads settings and a level, then drives the simulation with a fixed clock
//! and seeded demo input. Useful as a soak test and for tuning: run with
//! `RUST_LOG=debug` to see landings and platform reversals.

use std::time::Duration;

use anyhow::{Context, Result};

use loopy::platform::{DemoInput, FixedClock};
use loopy::renderer::build_quads;
use loopy::sim::GameEvent;
use loopy::{Game, Level, Settings, Viewport};

const SETTINGS_PATH: &str = "settings.json";
const TICK_RATE_HZ: u32 = 60;
const RUN_SECONDS: u64 = 30;
const DEMO_SEED: u64 = 0x5EED;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Loopy (native) starting...");

    let settings = Settings::load_or_default(SETTINGS_PATH);
    let level = match std::env::args().nth(1) {
        Some(path) => Level::load(&path).with_context(|| format!("loading level {path}"))?,
        None => Level::demo(),
    };

    let world = level.build_world(&settings);
    let clock = FixedClock::new(Duration::from_secs(1) / TICK_RATE_HZ)
        .with_max_delta(settings.display.max_delta);
    let viewport = Viewport::new(
        settings.display.design_width as u32,
        settings.display.design_height as u32,
    );
    let mut game = Game::new(world, clock, viewport);

    let mut input = DemoInput::new(DEMO_SEED);
    let mut vertex_count = 0usize;
    let stats = game.run(
        &mut input,
        Some(RUN_SECONDS * TICK_RATE_HZ as u64),
        |output| {
            for event in &output.events {
                if let GameEvent::Blocked { platform, side } = event {
                    log::trace!("Blocked by platform {platform} ({side:?})");
                }
            }
            vertex_count = build_quads(&output.render_list, viewport, |_| None).len();
        },
    );

    log::info!(
        "Ran {} frames on '{}': {} jumps, {} landings, {} resets",
        stats.frames,
        level.name,
        stats.jumps,
        stats.landings,
        stats.resets
    );
    log::info!(
        "Final player position: ({:.1}, {:.1}), {} vertices per frame",
        game.world.player.rect.x,
        game.world.player.rect.y,
        vertex_count
    );
    Ok(())
}
