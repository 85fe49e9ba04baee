//! Catch detection and the collect path
//!
//! Collision is a circle test on center distance against the sum of
//! half-widths, whatever the sprites actually look like. The original game
//! shipped with this approximation in every iteration; it is part of the
//! feel and is kept on purpose.

use crate::config::ScoreTable;

use super::state::{Cart, Product};

/// True iff the cart catches the product this tick.
pub fn catches(cart: &Cart, product: &Product) -> bool {
    let distance = cart.pos.distance(product.pos);
    distance < cart.half_width() + product.half_width()
}

/// Award the product: mark it collected, park it just past the bottom bound
/// so it cannot score again before its natural cycle wraps, and return the
/// tier points. Callers must check the collected flag first; this function
/// assumes the product is live.
pub fn collect(product: &mut Product, table: &ScoreTable, surface_height: f32) -> u32 {
    product.collected = true;
    product.pos.y = surface_height + product.size;
    table.points_for(product.variant)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::config::GameConfig;

    fn product_at(x: f32, y: f32) -> Product {
        Product {
            pos: Vec2::new(x, y),
            size: 30.0,
            variant: 0,
            collected: false,
        }
    }

    fn cart_at(x: f32) -> Cart {
        let config = GameConfig::default();
        let mut cart = Cart::new(&config);
        cart.pos.x = x;
        cart
    }

    #[test]
    fn overlapping_centers_catch() {
        let cart = cart_at(500.0);
        let product = product_at(500.0, cart.pos.y);
        assert!(catches(&cart, &product));
    }

    #[test]
    fn touching_at_exactly_the_sum_of_half_widths_misses() {
        let cart = cart_at(500.0);
        let gap = cart.half_width() + 15.0;
        let product = product_at(500.0 + gap, cart.pos.y);
        // Strict inequality: grazing contact does not score.
        assert!(!catches(&cart, &product));
        let product = product_at(500.0 + gap - 0.1, cart.pos.y);
        assert!(catches(&cart, &product));
    }

    #[test]
    fn vertical_distance_counts_too() {
        let cart = cart_at(500.0);
        let product = product_at(500.0, cart.pos.y - 200.0);
        assert!(!catches(&cart, &product));
    }

    #[test]
    fn collect_parks_the_product_off_surface() {
        let config = GameConfig::default();
        let mut product = product_at(500.0, 400.0);
        let points = collect(&mut product, &config.score_table, config.surface_height);

        assert_eq!(points, config.score_table.points_for(0));
        assert!(product.collected);
        assert!(product.pos.y > config.surface_height);
    }
}
