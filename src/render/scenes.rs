//! Scene painters
//!
//! One painter per scene of the state machine, dispatched from [`draw`].
//! Painters read state, never mutate it. Sprites fall back to primitive
//! shapes while their assets are still loading.

use glam::Vec2;

use crate::sim::{Cart, GameState, OutcomeKind, OutcomeState, Product, Scene};

use super::{AssetSource, Color, ImageAsset, Surface};

/// Paint the frame for the current scene.
pub fn draw<S, A>(surface: &mut S, state: &GameState, assets: &A)
where
    S: Surface,
    A: AssetSource<S::Image>,
{
    match state.scene {
        Scene::Start => draw_start(surface),
        Scene::Playing => draw_playing(surface, state, assets),
        Scene::Outcome(OutcomeState::Choosing) => draw_border_choice(surface),
        Scene::Outcome(OutcomeState::Resolving { kind, walker_x, .. }) => match kind {
            OutcomeKind::Paid { toll } => draw_toll_paid(surface, toll),
            OutcomeKind::Caught => draw_jailed(surface),
            OutcomeKind::Escaped => draw_escape(surface, walker_x),
        },
        Scene::Finish { outcome } => draw_finish(surface, state.score, outcome),
    }
}

fn clear<S: Surface>(surface: &mut S, color: Color) {
    let (w, h) = (surface.width(), surface.height());
    surface.fill_rect(0.0, 0.0, w, h, color);
}

fn draw_start<S: Surface>(surface: &mut S) {
    clear(surface, Color::WHITE);
    let w = surface.width();

    // A few falling products as decoration, echoing the gameplay.
    surface.fill_circle(w * 0.25, 120.0, 15.0, Color::RED);
    surface.fill_circle(w * 0.55, 60.0, 15.0, Color::RED);
    surface.fill_circle(w * 0.8, 180.0, 15.0, Color::RED);

    surface.text("HARRYTUR", w * 0.35, 240.0, 40.0, Color::BLACK);
    surface.text(
        "Fyll handlevogna før tiden går ut!",
        w * 0.32,
        290.0,
        20.0,
        Color::BLACK,
    );
}

fn draw_playing<S, A>(surface: &mut S, state: &GameState, assets: &A)
where
    S: Surface,
    A: AssetSource<S::Image>,
{
    clear(surface, Color::WHITE);

    for product in &state.products {
        draw_product(surface, product, assets.product_sprite(product.variant));
    }
    draw_cart(surface, &state.cart, assets.cart_sprite());

    // HUD: truncated countdown above the score, top-left.
    surface.text(
        &format!("Time: {}", state.time_left as u32),
        10.0,
        20.0,
        20.0,
        Color::BLACK,
    );
    surface.text(
        &format!("Score: {}", state.score),
        10.0,
        40.0,
        20.0,
        Color::BLACK,
    );
}

fn draw_product<S: Surface>(surface: &mut S, product: &Product, sprite: Option<&S::Image>) {
    let half = product.half_width();
    match sprite {
        Some(image) if image.is_ready() => surface.draw_image(
            image,
            product.pos.x - half,
            product.pos.y - half,
            product.size,
            product.size,
            false,
        ),
        // Asset still loading (or absent): the classic red circle.
        _ => surface.fill_circle(product.pos.x, product.pos.y, half, Color::RED),
    }
}

fn draw_cart<S: Surface>(surface: &mut S, cart: &Cart, sprite: Option<&S::Image>) {
    let half = cart.half_width();
    match sprite {
        Some(image) if image.is_ready() => surface.draw_image(
            image,
            cart.pos.x - half,
            cart.pos.y - half,
            cart.size,
            cart.size,
            cart.facing_left,
        ),
        _ => surface.fill_circle(cart.pos.x, cart.pos.y, half, Color::BLUE),
    }
}

/// The jailhouse, bars from y=250 down to the bottom.
fn draw_jail<S: Surface>(surface: &mut S, left: f32) {
    let h = surface.height();
    surface.text("Kasjotten", left + 40.0, 200.0, 40.0, Color::BLACK);
    let mut x = left + 10.0;
    while x <= left + 250.0 {
        surface.stroke_line(Vec2::new(x, 250.0), Vec2::new(x, h), Color::BLACK);
        x += 20.0;
    }
}

/// The sunset tableau: sky, field, a grey mountain road and a setting sun.
fn draw_sunset<S: Surface>(surface: &mut S, left: f32) {
    let h = surface.height();
    surface.text("Solnedgangen", left + 10.0, 200.0, 40.0, Color::BLACK);
    surface.fill_rect(left, 250.0, 250.0, 100.0, Color::LIGHT_BLUE);
    surface.fill_rect(left, 350.0, 250.0, h - 350.0, Color::GREEN);
    surface.fill_polygon(
        &[
            Vec2::new(left + 20.0, h),
            Vec2::new(left + 100.0, 350.0),
            Vec2::new(left + 140.0, 350.0),
            Vec2::new(left + 220.0, h),
        ],
        Color::GREY,
    );
    // Center line on the road
    surface.stroke_line(
        Vec2::new(left + 120.0, h),
        Vec2::new(left + 120.0, 350.0),
        Color::YELLOW,
    );
    // Half-disc sun on the horizon
    surface.fill_arc(left + 120.0, 250.0, 40.0, 0.0, std::f32::consts::PI, Color::RED);
}

fn draw_border_choice<S: Surface>(surface: &mut S) {
    clear(surface, Color::WHITE);
    let w = surface.width();

    draw_jail(surface, 0.0);
    draw_sunset(surface, w - 250.0);

    surface.text(
        "Du nærmer deg grensa og må ta et valg...",
        10.0,
        30.0,
        25.0,
        Color::BLACK,
    );
    surface.text(
        "1) Du kan velge tollen der du mister halvparten av poengene... eller",
        10.0,
        60.0,
        25.0,
        Color::BLACK,
    );
    surface.text(
        "2) Du kan krysse grensa og beholde alt... eller havne i kasjotten",
        10.0,
        80.0,
        25.0,
        Color::BLACK,
    );
}

fn draw_toll_paid<S: Surface>(surface: &mut S, toll: u32) {
    clear(surface, Color::WHITE);
    let w = surface.width();

    // Toll booth with the barrier down
    surface.fill_rect(w * 0.4, 200.0, 120.0, 180.0, Color::YELLOW);
    surface.stroke_line(
        Vec2::new(w * 0.4 + 120.0, 300.0),
        Vec2::new(w * 0.4 + 320.0, 300.0),
        Color::RED,
    );
    surface.text("Toll", w * 0.4 + 30.0, 260.0, 30.0, Color::BLACK);

    surface.text(
        &format!("Du betalte {toll} poeng i toll."),
        10.0,
        40.0,
        25.0,
        Color::BLACK,
    );
}

fn draw_jailed<S: Surface>(surface: &mut S) {
    clear(surface, Color::WHITE);

    // The figure behind the bars, so the bars paint over it.
    surface.fill_rect(100.0, 340.0, 50.0, 50.0, Color::BLACK);
    draw_jail(surface, 0.0);

    surface.text("Tollerne tok deg i kontrollen!", 10.0, 40.0, 25.0, Color::BLACK);
}

fn draw_escape<S: Surface>(surface: &mut S, walker_x: f32) {
    clear(surface, Color::WHITE);
    let w = surface.width();

    draw_sunset(surface, w - 250.0);
    // The figure walking into the sunset
    surface.fill_rect(walker_x, 340.0, 50.0, 50.0, Color::BLACK);

    surface.text("Du slapp unna med alt!", 10.0, 40.0, 25.0, Color::BLACK);
}

fn draw_finish<S: Surface>(surface: &mut S, score: u32, outcome: OutcomeKind) {
    let w = surface.width();
    let h = surface.height();

    // Home at last: sky, fields and the border station.
    surface.fill_rect(0.0, 0.0, w, 150.0, Color::LIGHT_BLUE);
    surface.fill_rect(0.0, 150.0, w, h - 150.0, Color::GREEN);
    surface.fill_polygon(
        &[
            Vec2::new(50.0, h),
            Vec2::new(125.0, 150.0),
            Vec2::new(175.0, 150.0),
            Vec2::new(250.0, h),
        ],
        Color::GREY,
    );
    surface.fill_rect(w * 0.5, 75.0, 250.0, 200.0, Color::YELLOW);
    surface.stroke_line(
        Vec2::new(w * 0.5, 275.0),
        Vec2::new(w * 0.5, 400.0),
        Color::BLACK,
    );
    surface.stroke_line(
        Vec2::new(w * 0.5 + 250.0, 275.0),
        Vec2::new(w * 0.5 + 250.0, 400.0),
        Color::BLACK,
    );
    surface.text("Norge", w * 0.5 + 70.0, 180.0, 40.0, Color::BLACK);

    let line = match outcome {
        OutcomeKind::Paid { toll } => format!("Du betalte {toll} poeng i toll."),
        OutcomeKind::Escaped => "Du slapp unna tollerne.".to_string(),
        OutcomeKind::Caught => "Du sonet ferdig i kasjotten.".to_string(),
    };
    surface.text(&line, 10.0, 30.0, 25.0, Color::BLACK);
    surface.text(&format!("Sluttsum: {score} poeng"), 10.0, 60.0, 25.0, Color::BLACK);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::render::NoAssets;
    use crate::sim::{Command, GameState, TickInput, tick};

    /// Recorded drawing primitive
    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect,
        Circle { radius: f32, color: Color },
        Arc,
        Line,
        Polygon,
        Text(String),
        Image { mirrored: bool },
    }

    struct TestImage {
        ready: bool,
    }

    impl ImageAsset for TestImage {
        fn is_ready(&self) -> bool {
            self.ready
        }
    }

    struct RecordingSurface {
        w: f32,
        h: f32,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn new(config: &GameConfig) -> Self {
            Self {
                w: config.surface_width,
                h: config.surface_height,
                ops: Vec::new(),
            }
        }

        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        type Image = TestImage;

        fn width(&self) -> f32 {
            self.w
        }

        fn height(&self) -> f32 {
            self.h
        }

        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {
            self.ops.push(Op::Rect);
        }

        fn fill_circle(&mut self, _cx: f32, _cy: f32, radius: f32, color: Color) {
            self.ops.push(Op::Circle { radius, color });
        }

        fn fill_arc(&mut self, _cx: f32, _cy: f32, _r: f32, _s: f32, _e: f32, _color: Color) {
            self.ops.push(Op::Arc);
        }

        fn stroke_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {
            self.ops.push(Op::Line);
        }

        fn fill_polygon(&mut self, _points: &[Vec2], _color: Color) {
            self.ops.push(Op::Polygon);
        }

        fn text(&mut self, s: &str, _x: f32, _y: f32, _size: f32, _color: Color) {
            self.ops.push(Op::Text(s.to_string()));
        }

        fn draw_image(&mut self, _image: &TestImage, _x: f32, _y: f32, _w: f32, _h: f32, mirrored: bool) {
            self.ops.push(Op::Image { mirrored });
        }
    }

    /// Sprite source where every lookup returns the same image.
    struct SingleSprite {
        image: TestImage,
    }

    impl AssetSource<TestImage> for SingleSprite {
        fn product_sprite(&self, _variant: u8) -> Option<&TestImage> {
            Some(&self.image)
        }

        fn cart_sprite(&self) -> Option<&TestImage> {
            Some(&self.image)
        }
    }

    fn playing_state(config: &GameConfig) -> GameState {
        let mut state = GameState::new(1, config);
        let input = TickInput {
            seq: 0,
            command: Some(Command::Start),
            ..TickInput::default()
        };
        tick(&mut state, config, &input, config.dt());
        state
    }

    #[test]
    fn playing_without_assets_falls_back_to_circles() {
        let config = GameConfig::default();
        let state = playing_state(&config);
        let mut surface = RecordingSurface::new(&config);

        draw(&mut surface, &state, &NoAssets);

        let circles = surface
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Circle { .. }))
            .count();
        // One per product plus the cart.
        assert_eq!(circles, config.product_count + 1);
        assert!(surface.texts().iter().any(|t| t.starts_with("Score: ")));
        assert!(surface.texts().iter().any(|t| t.starts_with("Time: ")));
    }

    #[test]
    fn not_ready_assets_still_fall_back() {
        let config = GameConfig::default();
        let state = playing_state(&config);
        let assets = SingleSprite { image: TestImage { ready: false } };
        let mut surface = RecordingSurface::new(&config);

        draw(&mut surface, &state, &assets);

        assert!(!surface.ops.iter().any(|op| matches!(op, Op::Image { .. })));
        assert!(surface.ops.iter().any(|op| matches!(op, Op::Circle { .. })));
    }

    #[test]
    fn ready_assets_blit_and_mirror_the_cart() {
        let config = GameConfig::default();
        let mut state = playing_state(&config);
        state.cart.facing_left = true;
        let assets = SingleSprite { image: TestImage { ready: true } };
        let mut surface = RecordingSurface::new(&config);

        draw(&mut surface, &state, &assets);

        let images: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Image { mirrored } => Some(*mirrored),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), config.product_count + 1);
        // Exactly one mirrored blit: the left-facing cart.
        assert_eq!(images.iter().filter(|m| **m).count(), 1);
    }

    #[test]
    fn every_scene_paints_something() {
        let config = GameConfig::default();
        let mut state = GameState::new(2, &config);

        let scenes = [
            Scene::Start,
            Scene::Outcome(OutcomeState::Choosing),
            Scene::Outcome(OutcomeState::Resolving {
                kind: OutcomeKind::Paid { toll: 50 },
                delay_left: 1.0,
                walker_x: 450.0,
            }),
            Scene::Outcome(OutcomeState::Resolving {
                kind: OutcomeKind::Caught,
                delay_left: 1.0,
                walker_x: 450.0,
            }),
            Scene::Outcome(OutcomeState::Resolving {
                kind: OutcomeKind::Escaped,
                delay_left: 1.0,
                walker_x: 450.0,
            }),
            Scene::Finish { outcome: OutcomeKind::Escaped },
        ];

        for scene in scenes {
            state.scene = scene;
            let mut surface = RecordingSurface::new(&config);
            draw(&mut surface, &state, &NoAssets);
            assert!(!surface.ops.is_empty(), "nothing painted for {scene:?}");
        }
    }

    #[test]
    fn choice_scene_shows_both_options() {
        let config = GameConfig::default();
        let mut state = GameState::new(3, &config);
        state.scene = Scene::Outcome(OutcomeState::Choosing);
        let mut surface = RecordingSurface::new(&config);

        draw(&mut surface, &state, &NoAssets);

        let texts = surface.texts().join("\n");
        assert!(texts.contains("tollen"));
        assert!(texts.contains("kasjotten"));
    }
}
