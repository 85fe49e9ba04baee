//! Game state and core simulation types
//!
//! Everything the per-tick update reads or writes lives here: the two entity
//! kinds, the scene state machine, and the session-wide [`GameState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;

/// Current scene of the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scene {
    /// Static intro frame, waiting for the start signal
    Start,
    /// Active shopping round
    Playing,
    /// At the border: choice prompt, then the resolution sub-scene
    Outcome(OutcomeState),
    /// Terminal frame, waiting for the restart signal
    Finish { outcome: OutcomeKind },
}

/// Sub-state of the border scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutcomeState {
    /// Binary prompt: pay the toll or chance the crossing
    Choosing,
    /// Outcome decided; plays the resolution sub-scene for a fixed delay
    /// before the finish frame. At most one such delay is ever pending.
    Resolving {
        kind: OutcomeKind,
        delay_left: f32,
        /// X of the escaping figure walking into the sunset (Escaped only)
        walker_x: f32,
    },
}

/// How the border crossing resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Paid up; half the haul stays at the booth
    Paid { toll: u32 },
    /// Slipped past the guards with everything
    Escaped,
    /// Caught, but the guards only take you to the jailhouse, not your points
    Caught,
}

impl OutcomeKind {
    /// Points surrendered at the border
    pub fn toll(&self) -> u32 {
        match self {
            OutcomeKind::Paid { toll } => *toll,
            OutcomeKind::Escaped | OutcomeKind::Caught => 0,
        }
    }

    /// Category label reported to the host UI
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeKind::Paid { .. } => "paid",
            OutcomeKind::Escaped => "escaped",
            OutcomeKind::Caught => "caught",
        }
    }
}

/// A product falling toward the bottom of the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Center position
    pub pos: Vec2,
    /// Bounding-square side
    pub size: f32,
    /// Category id; picks the sprite and the score tier
    pub variant: u8,
    /// Set on the first catch of the current fall-cycle
    pub collected: bool,
}

impl Product {
    /// Spawn with a random x and a random y inside the fall corridor, so the
    /// initial wave enters staggered instead of as one row.
    pub fn spawn(config: &GameConfig, rng: &mut Pcg32) -> Self {
        let variant_count = config.score_table.variant_count().max(1);
        Self {
            pos: Vec2::new(
                rng.random_range(0.0..config.surface_width),
                rng.random_range(config.product_start_height..config.surface_height),
            ),
            size: config.product_size,
            variant: rng.random_range(0..variant_count),
            collected: false,
        }
    }

    /// Move down one tick. Past the bottom bound, re-enter from the start
    /// height at a fresh random x with the collected flag cleared; the cycle
    /// is unbounded and restartable.
    pub fn advance(&mut self, dt: f32, config: &GameConfig, rng: &mut Pcg32) {
        self.pos.y += config.product_speed * dt;

        if self.pos.y > config.surface_height + self.size {
            self.pos.y = config.product_start_height;
            self.pos.x = rng.random_range(0.0..config.surface_width);
            self.collected = false;
        }
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size / 2.0
    }
}

/// The player's shopping cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    /// Center position; y is fixed, x moves with input
    pub pos: Vec2,
    /// Bounding-square side
    pub size: f32,
    /// Which way the sprite faces; flipped by the last move direction
    pub facing_left: bool,
}

impl Cart {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.surface_width / 2.0, config.cart_y()),
            size: config.cart_size,
            facing_left: false,
        }
    }

    pub fn move_left(&mut self, dt: f32, config: &GameConfig) {
        self.pos.x -= config.cart_step * dt;
        self.facing_left = true;
        self.clamp_x(config);
    }

    pub fn move_right(&mut self, dt: f32, config: &GameConfig) {
        self.pos.x += config.cart_step * dt;
        self.facing_left = false;
        self.clamp_x(config);
    }

    /// Keep the bounding box inside [0, surface_width].
    fn clamp_x(&mut self, config: &GameConfig) {
        let half = self.half_width();
        self.pos.x = self.pos.x.clamp(half, config.surface_width - half);
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.size / 2.0
    }
}

/// Things that happened during a tick, for the host to react to
/// (audio, HUD flashes). Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProductCollected { variant: u8, points: u32 },
    TimerExpired,
    OutcomeChosen(OutcomeKind),
    Finished,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed, for reproducing a round
    pub seed: u64,
    pub scene: Scene,
    pub score: u32,
    /// Countdown in seconds; floored at 0
    pub time_left: f32,
    /// Playing-state ticks elapsed
    pub time_ticks: u64,
    pub cart: Cart,
    pub products: Vec<Product>,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    /// Last logical tick applied; guards against re-entrant update calls
    pub(crate) last_seq: Option<u64>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh session on the intro scene.
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        Self {
            seed,
            scene: Scene::Start,
            score: config.starting_score,
            time_left: config.round_seconds,
            time_ticks: 0,
            cart: Cart::new(config),
            products: Vec::new(),
            events: Vec::new(),
            last_seq: None,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset score, timer, cart and products and enter the Playing scene.
    /// Used both by the start signal and by restart from the finish scene.
    pub fn begin_round(&mut self, config: &GameConfig) {
        self.score = config.starting_score;
        self.time_left = config.round_seconds;
        self.time_ticks = 0;
        self.cart = Cart::new(config);
        self.products = (0..config.product_count)
            .map(|_| Product::spawn(config, &mut self.rng))
            .collect();
        self.scene = Scene::Playing;
    }

    /// The outcome category once one exists (resolving or finished).
    pub fn outcome(&self) -> Option<OutcomeKind> {
        match self.scene {
            Scene::Outcome(OutcomeState::Resolving { kind, .. }) => Some(kind),
            Scene::Finish { outcome } => Some(outcome),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn new_session_starts_on_intro_scene() {
        let config = config();
        let state = GameState::new(1, &config);
        assert_eq!(state.scene, Scene::Start);
        assert_eq!(state.score, config.starting_score);
        assert!(state.products.is_empty());
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn begin_round_spawns_products_inside_the_corridor() {
        let config = config();
        let mut state = GameState::new(42, &config);
        state.begin_round(&config);

        assert_eq!(state.scene, Scene::Playing);
        assert_eq!(state.products.len(), config.product_count);
        for product in &state.products {
            assert!(product.pos.x >= 0.0 && product.pos.x < config.surface_width);
            assert!(product.pos.y >= config.product_start_height);
            assert!(product.pos.y < config.surface_height);
            assert!(!product.collected);
            assert!(product.variant < config.score_table.variant_count());
        }
    }

    #[test]
    fn cart_clamps_at_both_edges() {
        let config = config();
        let mut cart = Cart::new(&config);

        for _ in 0..10_000 {
            cart.move_left(config.dt(), &config);
        }
        assert_eq!(cart.pos.x, cart.half_width());
        assert!(cart.facing_left);

        for _ in 0..10_000 {
            cart.move_right(config.dt(), &config);
        }
        assert_eq!(cart.pos.x, config.surface_width - cart.half_width());
        assert!(!cart.facing_left);
    }

    #[test]
    fn product_wraps_past_the_bottom_bound() {
        let config = config();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut product = Product::spawn(&config, &mut rng);
        product.collected = true;
        product.pos.y = config.surface_height + product.size;

        // One more advance pushes it past the bound and wraps it.
        product.advance(config.dt(), &config, &mut rng);
        assert_eq!(product.pos.y, config.product_start_height);
        assert!(product.pos.x >= 0.0 && product.pos.x < config.surface_width);
        assert!(!product.collected);
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(OutcomeKind::Paid { toll: 10 }.label(), "paid");
        assert_eq!(OutcomeKind::Escaped.label(), "escaped");
        assert_eq!(OutcomeKind::Caught.label(), "caught");
        assert_eq!(OutcomeKind::Paid { toll: 10 }.toll(), 10);
        assert_eq!(OutcomeKind::Caught.toll(), 0);
    }
}
