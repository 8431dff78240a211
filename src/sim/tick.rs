//! Per-tick simulation pipeline
//!
//! One call advances the world by a single clamped delta. The order is
//! fixed: input, integration, horizontal clamp, collisions (static platforms,
//! moving platforms, hazards), platform motion, grounded carry-over,
//! animation, then the render list.

use super::collision::{Contact, fell_out, first_hazard, resolve_solid, ride};
use super::rect::Rect;
use super::state::{GameEvent, PlatformKind, ResetCause, World};
use crate::renderer::{RenderItem, render_list};
use crate::scaling::Viewport;

/// Logical action levels sampled once for this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Level-triggered; only honoured when grounded last tick
    pub jump: bool,
    /// Acts on the rising edge only
    pub toggle_scale_mode: bool,
    /// Acts on the rising edge only
    pub pause: bool,
}

/// Timing and display context for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Seconds since the previous tick, already clamped
    pub dt: f32,
    /// Monotonic timestamp used for animation
    pub now_ms: u64,
    pub viewport: Viewport,
}

/// Everything a tick produces for the outside world
#[derive(Debug, Clone, Default)]
pub struct TickOutput {
    pub events: Vec<GameEvent>,
    pub render_list: Vec<RenderItem>,
}

/// Advance the world by one tick and produce the render list
pub fn tick(world: &mut World, input: &TickInput, frame: &Frame) -> TickOutput {
    let mut events = Vec::new();

    handle_toggles(world, input, &mut events);

    if !world.paused {
        world.time_ticks += 1;
        apply_input(world, input, &mut events);

        let previous = world.player.rect;
        let mut pos = previous.position();
        world.physics.step(frame.dt, &mut world.player.body, &mut pos);
        world.player.rect.set_position(pos);

        world.clamp_player();
        resolve_collisions(world, &previous, frame.dt, &mut events);
        move_platforms(world, frame.dt, &mut events);

        world.player.was_grounded = world.player.grounded;
        advance_animations(world, frame.now_ms);
    }

    TickOutput {
        events,
        render_list: render_list(world, frame.viewport),
    }
}

/// Edge-detected toggles run even while paused so the game can be resumed
fn handle_toggles(world: &mut World, input: &TickInput, events: &mut Vec<GameEvent>) {
    if world.scale_toggle.rising(input.toggle_scale_mode) {
        let mode = world.scaler.toggle();
        log::info!("Scale mode: {}", mode.as_str());
        events.push(GameEvent::ScaleModeChanged(mode));
    }

    if world.pause_toggle.rising(input.pause) {
        world.paused = !world.paused;
        log::info!("{}", if world.paused { "Paused" } else { "Resumed" });
        events.push(GameEvent::PauseChanged(world.paused));
    }
}

fn apply_input(world: &mut World, input: &TickInput, events: &mut Vec<GameEvent>) {
    let speed = world.tuning.move_speed;
    let jump_velocity = world.tuning.jump_velocity;
    let player = &mut world.player;

    player.body.vel.x = match (input.move_left, input.move_right) {
        (true, false) => -speed,
        (false, true) => speed,
        _ => 0.0,
    };

    if input.jump && player.was_grounded {
        player.body.vel.y = jump_velocity;
        events.push(GameEvent::Jumped);
    }
}

fn resolve_collisions(world: &mut World, previous: &Rect, dt: f32, events: &mut Vec<GameEvent>) {
    let tolerance = world.tuning.landing_tolerance;
    let order = world.resolution_order();

    let player = &mut world.player;
    player.grounded = false;
    player.ground = None;

    for idx in order {
        let platform = &world.platforms[idx];
        let contact = resolve_solid(
            &mut player.rect,
            &mut player.body,
            previous,
            &platform.rect,
            tolerance,
        );
        match contact {
            Contact::Landed => {
                player.grounded = true;
                player.ground = Some(idx);
                if let Some(osc) = platform.oscillator() {
                    ride(&mut player.rect, osc.velocity(), dt);
                }
                if !player.was_grounded {
                    log::debug!("Landed on platform {idx}");
                    events.push(GameEvent::Landed { platform: idx });
                }
            }
            Contact::Blocked(side) => events.push(GameEvent::Blocked { platform: idx, side }),
            Contact::Bumped => events.push(GameEvent::Bumped { platform: idx }),
            Contact::Clear | Contact::Unresolved => {}
        }
    }

    // Hazards last: a reset overrides anything the platforms did this tick
    let cause = match first_hazard(&player.rect, world.hazards.iter().map(|h| &h.rect)) {
        Some(idx) => Some(ResetCause::Hazard(idx)),
        None if fell_out(&player.rect, world.bounds.height, world.tuning.fall_margin) => {
            Some(ResetCause::OutOfBounds)
        }
        None => None,
    };

    let first_contact = world.hazard_contact.rising(cause.is_some());
    if let Some(cause) = cause {
        player.respawn(world.spawn);
        if first_contact {
            log::info!("Player reset: {cause:?}");
            events.push(GameEvent::PlayerReset { cause });
        }
    }
}

fn move_platforms(world: &mut World, dt: f32, events: &mut Vec<GameEvent>) {
    for (idx, platform) in world.platforms.iter_mut().enumerate() {
        let PlatformKind::Oscillating(osc) = &mut platform.kind else {
            continue;
        };
        if osc.advance(&mut platform.rect, dt) {
            log::debug!("Platform {idx} reversed at x={}", platform.rect.x);
            events.push(GameEvent::PlatformReversed { platform: idx });
        }
    }
}

fn advance_animations(world: &mut World, now_ms: u64) {
    let sprites = std::iter::once(&mut world.player.sprite)
        .chain(world.platforms.iter_mut().filter_map(|p| p.sprite.as_mut()))
        .chain(world.hazards.iter_mut().filter_map(|h| h.sprite.as_mut()));
    for sprite in sprites {
        sprite.animation.advance(now_ms);
    }
}
