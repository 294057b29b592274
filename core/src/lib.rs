#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Garden Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

mod catalog;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use catalog::{
    AnimationClip, PlantKind, PlantStats, ProjectileKind, UnknownKindError, ZombieAnimation,
    ZombieKind, ZombieStats,
};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Garden Defence.";

/// Fixed duration of a single simulation step.
///
/// Every movement speed expressed "per step" is scaled against this quantum.
pub const LOGIC_STEP: Duration = Duration::from_millis(30);

/// Sun balance granted when a fresh game starts.
pub const STARTING_SUN: u32 = 50;

/// Sun awarded for collecting a single falling sun.
pub const SUN_VALUE: u32 = 25;

/// Time a collected sun remains visible before it is discarded.
pub const SUN_LINGER: Duration = Duration::from_millis(300);

/// Distance on each axis within which a click picks up a sun.
pub const SUN_PICKUP_RADIUS: f32 = 30.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the lawn layout and restarts the game from scratch.
    ConfigureLawn {
        /// Geometry describing the lawn and playfield.
        geometry: LawnGeometry,
        /// Sun balance granted at the start of every game.
        starting_sun: u32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Selects a plant card, or clears the current selection.
    SelectPlant {
        /// Card to select; `None` clears the selection.
        kind: Option<PlantKind>,
    },
    /// Requests that a plant be placed in the provided lawn cell.
    PlacePlant {
        /// Type of plant to place.
        kind: PlantKind,
        /// Lawn cell that should host the plant.
        cell: CellCoord,
    },
    /// Removes a plant from the lawn without any other side effect.
    RemovePlant {
        /// Identifier of the plant to remove.
        plant: PlantId,
    },
    /// Requests that a zombie enter the lawn at the end of a row.
    SpawnZombie {
        /// Type of zombie to spawn.
        kind: ZombieKind,
        /// Zero-based row the zombie walks along.
        row: u32,
    },
    /// Removes a zombie from the lawn without awarding score.
    RemoveZombie {
        /// Identifier of the zombie to remove.
        zombie: ZombieId,
    },
    /// Requests that a shooter plant launch a projectile.
    FireProjectile {
        /// Identifier of the firing plant.
        plant: PlantId,
    },
    /// Removes a projectile in flight.
    RemoveProjectile {
        /// Identifier of the projectile to remove.
        projectile: ProjectileId,
    },
    /// Drops a new sun from the top of the lawn.
    DropSun {
        /// Horizontal position of the sun's centre in playfield pixels.
        x: f32,
        /// Fall speed measured in pixels per logic step.
        speed: f32,
    },
    /// Collects a falling sun and credits its value.
    CollectSun {
        /// Identifier of the sun to collect.
        sun: SunId,
    },
    /// Discards a falling sun immediately.
    RemoveSun {
        /// Identifier of the sun to discard.
        sun: SunId,
    },
    /// Credits the provided amount to the sun balance.
    AddSun {
        /// Amount of sun to add.
        amount: u32,
    },
    /// Forces the game-over flag to the provided value.
    SetGameOver {
        /// Whether the game should be considered over.
        over: bool,
    },
    /// Forces the victory flag to the provided value.
    SetVictory {
        /// Whether the player should be considered victorious.
        victory: bool,
    },
    /// Restores the initial game state while keeping the configured lawn.
    ResetGame,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the lawn was reconfigured and the game restarted.
    LawnConfigured {
        /// Geometry that became active.
        geometry: LawnGeometry,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the selected plant card changed.
    PlantSelected {
        /// Card now selected, if any.
        kind: Option<PlantKind>,
    },
    /// Reports that a card selection was refused.
    PlantSelectionRejected {
        /// Card the player attempted to select.
        kind: PlantKind,
        /// Specific reason the selection failed.
        reason: SelectionError,
    },
    /// Confirms that a plant took root in the lawn.
    PlantPlaced {
        /// Identifier assigned to the plant by the world.
        plant: PlantId,
        /// Type of plant that was placed.
        kind: PlantKind,
        /// Cell occupied by the plant.
        cell: CellCoord,
    },
    /// Reports that a plant placement request was rejected.
    PlantPlacementRejected {
        /// Type of plant requested for placement.
        kind: PlantKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a zombie bit a plant that survived the bite.
    PlantDamaged {
        /// Identifier of the bitten plant.
        plant: PlantId,
        /// Identifier of the biting zombie.
        zombie: ZombieId,
        /// Health left after the bite.
        remaining: f32,
    },
    /// Reports that a plant was eaten.
    PlantDestroyed {
        /// Identifier of the destroyed plant.
        plant: PlantId,
        /// Identifier of the zombie that delivered the final bite.
        zombie: ZombieId,
    },
    /// Confirms that a plant was removed on request.
    PlantRemoved {
        /// Identifier of the removed plant.
        plant: PlantId,
    },
    /// Confirms that a zombie entered the lawn.
    ZombieSpawned {
        /// Identifier assigned to the zombie by the world.
        zombie: ZombieId,
        /// Type of the spawned zombie.
        kind: ZombieKind,
        /// Row the zombie walks along.
        row: u32,
    },
    /// Reports that a projectile struck a zombie that survived the hit.
    ZombieDamaged {
        /// Identifier of the struck zombie.
        zombie: ZombieId,
        /// Identifier of the projectile that hit.
        projectile: ProjectileId,
        /// Health left after the hit.
        remaining: f32,
    },
    /// Reports that a zombie was defeated by the player's plants.
    ZombieDefeated {
        /// Identifier of the defeated zombie.
        zombie: ZombieId,
    },
    /// Confirms that a zombie was removed on request.
    ZombieRemoved {
        /// Identifier of the removed zombie.
        zombie: ZombieId,
    },
    /// Reports that a zombie crossed the house line.
    ZombieReachedHouse {
        /// Identifier of the zombie that reached the house.
        zombie: ZombieId,
    },
    /// Confirms that a plant launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Identifier of the firing plant.
        plant: PlantId,
        /// Type of projectile launched.
        kind: ProjectileKind,
    },
    /// Reports that a projectile left the playfield without hitting anything.
    ProjectileExpired {
        /// Identifier of the expired projectile.
        projectile: ProjectileId,
    },
    /// Confirms that a projectile was removed on request.
    ProjectileRemoved {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
    },
    /// Confirms that a sun started falling.
    SunDropped {
        /// Identifier assigned to the sun.
        sun: SunId,
        /// Horizontal position of the sun's centre.
        x: f32,
    },
    /// Confirms that a sun was collected.
    SunCollected {
        /// Identifier of the collected sun.
        sun: SunId,
        /// Amount credited to the balance.
        amount: u32,
    },
    /// Reports that a sun disappeared from the lawn.
    SunRemoved {
        /// Identifier of the removed sun.
        sun: SunId,
    },
    /// Announces the new sun balance after any credit or debit.
    SunBalanceChanged {
        /// Balance after the change.
        balance: u32,
    },
    /// Announces that the game-over flag changed.
    GameOverChanged {
        /// Whether the game is now over.
        over: bool,
    },
    /// Announces that the victory flag changed.
    VictoryChanged {
        /// Whether the player is now victorious.
        victory: bool,
    },
    /// Confirms that the game returned to its initial state.
    GameReset,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier assigned to a plant.
    PlantId
);
entity_id!(
    /// Unique identifier assigned to a zombie.
    ZombieId
);
entity_id!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);
entity_id!(
    /// Unique identifier assigned to a falling sun.
    SunId
);

/// Location of a single lawn cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new lawn cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Point on the playfield measured in pixels from the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LawnPoint {
    /// Horizontal offset in pixels.
    pub x: f32,
    /// Vertical offset in pixels.
    pub y: f32,
}

impl LawnPoint {
    /// Creates a new playfield point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Describes the lawn grid and the surrounding playfield.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LawnGeometry {
    /// Left edge of the plantable lawn in pixels.
    pub origin_x: f32,
    /// Top edge of the plantable lawn in pixels.
    pub origin_y: f32,
    /// Number of plantable columns.
    pub columns: u32,
    /// Number of rows (lanes).
    pub rows: u32,
    /// Width of a single cell in pixels.
    pub cell_width: f32,
    /// Height of a single cell in pixels.
    pub cell_height: f32,
    /// Width of the visible playfield; zombies enter beyond this edge.
    pub playfield_width: f32,
    /// Height of the visible playfield.
    pub playfield_height: f32,
    /// Zombies at or left of this line have reached the house.
    pub house_x: f32,
    /// Falling suns stop once they reach this height.
    pub sun_floor_y: f32,
}

impl Default for LawnGeometry {
    fn default() -> Self {
        let origin_x = 139.0;
        Self {
            origin_x,
            origin_y: 80.0,
            columns: 7,
            rows: 5,
            cell_width: 80.0,
            cell_height: 100.0,
            playfield_width: 1000.0,
            playfield_height: 600.0,
            house_x: origin_x - 40.0,
            sun_floor_y: 560.0,
        }
    }
}

impl LawnGeometry {
    /// Total width of the plantable lawn in pixels.
    #[must_use]
    pub fn lawn_width(&self) -> f32 {
        self.columns as f32 * self.cell_width
    }

    /// Total height of the plantable lawn in pixels.
    #[must_use]
    pub fn lawn_height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    /// Reports whether the cell lies within the lawn.
    #[must_use]
    pub const fn contains_cell(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the point lies within the plantable lawn.
    #[must_use]
    pub fn contains_point(&self, point: LawnPoint) -> bool {
        point.x >= self.origin_x
            && point.x < self.origin_x + self.lawn_width()
            && point.y >= self.origin_y
            && point.y < self.origin_y + self.lawn_height()
    }

    /// Resolves the cell underneath the provided point, if it lies on the lawn.
    #[must_use]
    pub fn cell_at(&self, point: LawnPoint) -> Option<CellCoord> {
        if !self.contains_point(point) {
            return None;
        }

        let column = ((point.x - self.origin_x) / self.cell_width).floor() as u32;
        let row = ((point.y - self.origin_y) / self.cell_height).floor() as u32;
        let cell = CellCoord::new(column, row);
        self.contains_cell(cell).then_some(cell)
    }

    /// Centre of the provided cell in playfield pixels.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> LawnPoint {
        LawnPoint::new(
            self.origin_x + cell.column() as f32 * self.cell_width + self.cell_width / 2.0,
            self.row_center_y(cell.row()),
        )
    }

    /// Vertical centre of the provided row in playfield pixels.
    #[must_use]
    pub fn row_center_y(&self, row: u32) -> f32 {
        self.origin_y + row as f32 * self.cell_height + self.cell_height / 2.0
    }
}

/// Immutable representation of a single plant's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantSnapshot {
    /// Identifier allocated to the plant by the world.
    pub id: PlantId,
    /// Type of the plant.
    pub kind: PlantKind,
    /// Cell hosting the plant.
    pub cell: CellCoord,
    /// Centre of the plant in playfield pixels.
    pub position: LawnPoint,
    /// Remaining health.
    pub health: f32,
    /// Current animation frame.
    pub frame: u32,
    /// Time until the plant may attack again.
    pub ready_in: Duration,
}

/// Immutable representation of a single zombie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieSnapshot {
    /// Identifier allocated to the zombie by the world.
    pub id: ZombieId,
    /// Type of the zombie.
    pub kind: ZombieKind,
    /// Row the zombie walks along.
    pub row: u32,
    /// Centre of the zombie in playfield pixels.
    pub position: LawnPoint,
    /// Remaining health.
    pub health: f32,
    /// Animation currently playing.
    pub animation: ZombieAnimation,
    /// Current animation frame.
    pub frame: u32,
}

/// Immutable representation of a single projectile used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Type of the projectile.
    pub kind: ProjectileKind,
    /// Plant that launched the projectile.
    pub plant: PlantId,
    /// Top-left corner of the projectile in playfield pixels.
    pub position: LawnPoint,
    /// Damage dealt on impact.
    pub damage: f32,
}

/// Immutable representation of a single falling sun used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunSnapshot {
    /// Identifier allocated to the sun by the world.
    pub id: SunId,
    /// Centre of the sun in playfield pixels.
    pub position: LawnPoint,
    /// Indicates whether the sun was already collected.
    pub collected: bool,
}

macro_rules! snapshot_view {
    ($(#[$meta:meta])* $view:ident, $snapshot:ty) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $view {
            snapshots: Vec<$snapshot>,
        }

        impl $view {
            /// Creates a new view from the provided snapshots.
            #[must_use]
            pub fn from_snapshots(mut snapshots: Vec<$snapshot>) -> Self {
                snapshots.sort_by_key(|snapshot| snapshot.id);
                Self { snapshots }
            }

            /// Iterator over the captured snapshots in deterministic order.
            pub fn iter(&self) -> impl Iterator<Item = &$snapshot> {
                self.snapshots.iter()
            }

            /// Number of captured snapshots.
            #[must_use]
            pub fn len(&self) -> usize {
                self.snapshots.len()
            }

            /// Reports whether the view captured no snapshots.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.snapshots.is_empty()
            }

            /// Consumes the view, yielding the underlying snapshots.
            #[must_use]
            pub fn into_vec(self) -> Vec<$snapshot> {
                self.snapshots
            }
        }
    };
}

snapshot_view!(
    /// Read-only snapshot describing all plants on the lawn.
    PlantView,
    PlantSnapshot
);
snapshot_view!(
    /// Read-only snapshot describing all zombies on the lawn.
    ZombieView,
    ZombieSnapshot
);
snapshot_view!(
    /// Read-only snapshot describing all projectiles in flight.
    ProjectileView,
    ProjectileSnapshot
);
snapshot_view!(
    /// Read-only snapshot describing all falling suns.
    SunView,
    SunSnapshot
);

impl PlantView {
    /// Looks up a plant snapshot by identifier.
    #[must_use]
    pub fn get(&self, plant: PlantId) -> Option<&PlantSnapshot> {
        self.snapshots
            .binary_search_by_key(&plant, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }
}

/// Target assignment computed for a shooter plant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantTarget {
    /// Plant that should fire.
    pub plant: PlantId,
    /// Zombie the plant is aiming at.
    pub zombie: ZombieId,
    /// Horizontal distance between plant and zombie in pixels.
    pub distance: f32,
}

/// Reasons a plant placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The game has ended, so the lawn no longer accepts plants.
    #[error("the game is over")]
    GameOver,
    /// The requested cell lies outside the lawn.
    #[error("the cell lies outside the lawn")]
    OutOfBounds,
    /// The balance cannot cover the plant's cost.
    #[error("not enough sun: need {cost}, have {balance}")]
    InsufficientSun {
        /// Cost of the requested plant.
        cost: u32,
        /// Balance at the time of the request.
        balance: u32,
    },
    /// The requested cell already hosts a plant.
    #[error("the cell is already occupied")]
    Occupied,
}

/// Reasons a plant card selection may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum SelectionError {
    /// The game has ended, so cards can no longer be picked.
    #[error("the game is over")]
    GameOver,
    /// The balance cannot cover the card's cost.
    #[error("not enough sun: need {cost}, have {balance}")]
    InsufficientSun {
        /// Cost of the requested plant.
        cost: u32,
        /// Balance at the time of the request.
        balance: u32,
    },
    /// The card is still recharging from its previous use.
    #[error("the card is recharging for another {remaining:?}")]
    Recharging {
        /// Time left until the card becomes available.
        remaining: Duration,
    },
}
