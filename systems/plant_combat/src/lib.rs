#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits projectile firing commands from targeting data.

use garden_defence_core::{Command, PlantTarget, PlantView};

/// Plant combat system that queues firing commands for ready shooters.
#[derive(Debug, Default)]
pub struct PlantCombat {
    scratch: Vec<Command>,
}

impl PlantCombat {
    /// Creates a new plant combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for targeted plants that are
    /// ready to fire and carry a projectile.
    pub fn handle(&mut self, plants: &PlantView, plant_targets: &[PlantTarget], out: &mut Vec<Command>) {
        if plant_targets.is_empty() || plants.is_empty() {
            return;
        }

        self.scratch.clear();

        for target in plant_targets {
            let Some(snapshot) = plants.get(target.plant) else {
                continue;
            };
            if snapshot.ready_in.is_zero() && snapshot.kind.stats().projectile.is_some() {
                self.scratch.push(Command::FireProjectile {
                    plant: target.plant,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_defence_core::{
        CellCoord, LawnPoint, PlantId, PlantKind, PlantSnapshot, ZombieId,
    };
    use std::time::Duration;

    fn snapshot(id: u32, kind: PlantKind, ready_in: Duration) -> PlantSnapshot {
        PlantSnapshot {
            id: PlantId::new(id),
            kind,
            cell: CellCoord::new(id, 0),
            position: LawnPoint::new(179.0 + id as f32 * 80.0, 130.0),
            health: 300.0,
            frame: 0,
            ready_in,
        }
    }

    fn target(plant: u32) -> PlantTarget {
        PlantTarget {
            plant: PlantId::new(plant),
            zombie: ZombieId::new(0),
            distance: 100.0,
        }
    }

    #[test]
    fn no_targets_is_silent() {
        let mut system = PlantCombat::new();
        let plants = PlantView::from_snapshots(vec![snapshot(
            0,
            PlantKind::Peashooter,
            Duration::ZERO,
        )]);
        let mut commands = Vec::new();
        system.handle(&plants, &[], &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn fires_only_ready_shooters() {
        let mut system = PlantCombat::new();
        let plants = PlantView::from_snapshots(vec![
            snapshot(0, PlantKind::Peashooter, Duration::ZERO),
            snapshot(1, PlantKind::SnowPeashooter, Duration::from_millis(400)),
            snapshot(2, PlantKind::SnowPeashooter, Duration::ZERO),
            snapshot(3, PlantKind::ThreePeashooter, Duration::ZERO),
        ]);
        let targets = [target(0), target(1), target(2), target(3), target(7)];

        let mut commands = Vec::new();
        system.handle(&plants, &targets, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::FireProjectile {
                    plant: PlantId::new(0)
                },
                Command::FireProjectile {
                    plant: PlantId::new(2)
                },
            ]
        );
    }
}
