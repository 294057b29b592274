#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that translates player pointer input into world commands.

use garden_defence_core::{
    CellCoord, Command, LawnGeometry, LawnPoint, PlantKind, PlantView, SunView, SUN_PICKUP_RADIUS,
};

/// Pointer input captured by an adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    /// The player clicked the card for the provided plant.
    Card(PlantKind),
    /// The player clicked the playfield at the provided pixel position.
    Click(LawnPoint),
}

/// State of the game required to interpret pointer input.
#[derive(Clone, Copy, Debug)]
pub struct InteractionContext<'a> {
    /// Whether the game has ended.
    pub game_over: bool,
    /// Plant card currently selected in the world.
    pub selected: Option<PlantKind>,
    /// Sun balance available for placements.
    pub sun: u32,
    /// Lawn layout used to resolve clicked cells.
    pub geometry: &'a LawnGeometry,
    /// Plants already standing on the lawn.
    pub plants: &'a PlantView,
    /// Falling suns that may be picked up.
    pub suns: &'a SunView,
}

/// Interaction system converting clicks into selection, placement and
/// collection commands.
#[derive(Debug, Default)]
pub struct Interaction;

impl Interaction {
    /// Creates a new interaction system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits commands for every pointer input in order.
    ///
    /// A card click toggles the selection. A lawn click places the selected
    /// plant in the clicked cell. The card stays selected when the lawn will
    /// refuse the plant for lack of sun or an occupied cell. Any other click
    /// collects every uncollected sun within pickup distance. All input is
    /// ignored once the game is over.
    pub fn handle(
        &mut self,
        inputs: &[PointerInput],
        context: InteractionContext<'_>,
        out: &mut Vec<Command>,
    ) {
        if context.game_over {
            return;
        }

        let mut selected = context.selected;
        let mut sun = context.sun;
        let mut claimed: Vec<CellCoord> = Vec::new();
        for input in inputs {
            match *input {
                PointerInput::Card(kind) => {
                    let next = if selected == Some(kind) {
                        None
                    } else {
                        Some(kind)
                    };
                    out.push(Command::SelectPlant { kind: next });
                    selected = next;
                }
                PointerInput::Click(point) => {
                    let placement = selected.zip(context.geometry.cell_at(point));
                    if let Some((kind, cell)) = placement {
                        out.push(Command::PlacePlant { kind, cell });
                        let cost = kind.stats().cost;
                        let occupied = claimed.contains(&cell)
                            || context.plants.iter().any(|plant| plant.cell == cell);
                        if sun >= cost && !occupied {
                            sun -= cost;
                            claimed.push(cell);
                            selected = None;
                        }
                    } else {
                        collect_suns(point, context.suns, out);
                    }
                }
            }
        }
    }
}

fn collect_suns(point: LawnPoint, suns: &SunView, out: &mut Vec<Command>) {
    out.extend(
        suns.iter()
            .filter(|sun| {
                !sun.collected
                    && (sun.position.x - point.x).abs() < SUN_PICKUP_RADIUS
                    && (sun.position.y - point.y).abs() < SUN_PICKUP_RADIUS
            })
            .map(|sun| Command::CollectSun { sun: sun.id }),
    );
}
