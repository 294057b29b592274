#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Garden Defence experience.

use garden_defence_core::LawnGeometry;
use garden_defence_world::{query, World};

/// Produces data required to greet the player.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner(&self, world: &World) -> &'static str {
        query::welcome_banner(world)
    }

    /// Exposes the lawn layout adapters need to present the playfield.
    #[must_use]
    pub fn geometry<'world>(&self, world: &'world World) -> &'world LawnGeometry {
        query::geometry(world)
    }
}
