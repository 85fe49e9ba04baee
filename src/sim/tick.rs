//! Fixed timestep simulation tick
//!
//! The scene controller: one `tick` call per ticker invocation, dispatching
//! on the current scene. Commands from the host UI arrive through
//! [`TickInput`] so the controller never touches UI elements itself.

use super::collision;
use super::state::{GameEvent, GameState, OutcomeKind, OutcomeState, Scene};
use crate::config::GameConfig;

/// Zero-argument triggers originating from host controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the intro frame and start the round
    Start,
    /// Pay the toll: unconditionally halves the score
    PayToll,
    /// Chance the crossing: one draw decides escaped or caught
    AttemptEvasion,
    /// From the finish frame, reset and play again
    Restart,
}

/// Input for a single logical tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Logical tick number. A repeated seq makes the call a no-op, so a
    /// double-fired ticker cannot double-decrement the timer or double-score.
    pub seq: u64,
    /// Held-state of the directional keys at tick time
    pub move_left: bool,
    pub move_right: bool,
    /// At most one command per tick
    pub command: Option<Command>,
}

/// Advance the session by one fixed timestep.
pub fn tick(state: &mut GameState, config: &GameConfig, input: &TickInput, dt: f32) {
    // Re-entrant call for a tick already applied.
    if state.last_seq == Some(input.seq) {
        return;
    }
    state.last_seq = Some(input.seq);
    state.events.clear();

    if let Some(command) = input.command {
        apply_command(state, config, command);
    }

    match state.scene {
        Scene::Playing => tick_playing(state, config, input, dt),
        Scene::Outcome(OutcomeState::Resolving { .. }) => tick_resolving(state, config, dt),
        // Static frames: nothing advances until a command arrives.
        Scene::Start | Scene::Outcome(OutcomeState::Choosing) | Scene::Finish { .. } => {}
    }
}

fn apply_command(state: &mut GameState, config: &GameConfig, command: Command) {
    match (command, state.scene) {
        (Command::Start, Scene::Start) => {
            state.begin_round(config);
            log::info!("Round started (seed {})", state.seed);
        }
        (Command::Restart, Scene::Finish { .. }) => {
            state.begin_round(config);
            log::info!("Restarting round");
        }
        (Command::PayToll, Scene::Outcome(OutcomeState::Choosing)) => {
            let kept = state.score / 2;
            let toll = state.score - kept;
            state.score = kept;
            resolve(state, config, OutcomeKind::Paid { toll });
        }
        (Command::AttemptEvasion, Scene::Outcome(OutcomeState::Choosing)) => {
            use rand::Rng;
            let caught = state.rng.random_bool(config.catch_probability);
            let kind = if caught {
                OutcomeKind::Caught
            } else {
                OutcomeKind::Escaped
            };
            resolve(state, config, kind);
        }
        // A command that does not apply to the current scene is a no-op.
        (command, scene) => {
            log::debug!("Ignoring {command:?} in {scene:?}");
        }
    }
}

/// Enter the resolution sub-scene; the pacing delay to Finish starts here.
fn resolve(state: &mut GameState, config: &GameConfig, kind: OutcomeKind) {
    log::info!("Border outcome: {} (toll {})", kind.label(), kind.toll());
    state.scene = Scene::Outcome(OutcomeState::Resolving {
        kind,
        delay_left: config.outcome_delay_seconds,
        walker_x: config.walk_start_x,
    });
    state.events.push(GameEvent::OutcomeChosen(kind));
}

/// The full gameplay update: move the cart, advance and collect products,
/// run the countdown.
fn tick_playing(state: &mut GameState, config: &GameConfig, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    if input.move_left {
        state.cart.move_left(dt, config);
    }
    if input.move_right {
        state.cart.move_right(dt, config);
    }

    for product in &mut state.products {
        product.advance(dt, config, &mut state.rng);
    }

    for product in &mut state.products {
        if product.collected {
            continue;
        }
        if collision::catches(&state.cart, product) {
            let points = collision::collect(product, &config.score_table, config.surface_height);
            state.score += points;
            state.events.push(GameEvent::ProductCollected {
                variant: product.variant,
                points,
            });
        }
    }

    state.time_left = (state.time_left - dt).max(0.0);
    if state.time_left == 0.0 {
        state.scene = Scene::Outcome(OutcomeState::Choosing);
        state.events.push(GameEvent::TimerExpired);
        log::info!("Time's up, approaching the border with {} points", state.score);
    }
}

/// Play out the resolution sub-scene, then converge on Finish.
fn tick_resolving(state: &mut GameState, config: &GameConfig, dt: f32) {
    if let Scene::Outcome(OutcomeState::Resolving {
        kind,
        ref mut delay_left,
        ref mut walker_x,
    }) = state.scene
    {
        if kind == OutcomeKind::Escaped {
            *walker_x = (*walker_x + config.walk_speed * dt).min(config.surface_width);
        }

        *delay_left -= dt;
        if *delay_left <= 0.0 {
            state.scene = Scene::Finish { outcome: kind };
            state.events.push(GameEvent::Finished);
        }
    }
}
