#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that assigns each shooter plant the closest zombie ahead of it.

use garden_defence_core::{PlantId, PlantTarget, PlantView, ZombieId, ZombieView};

/// Plant targeting system that reuses a scratch buffer between frames.
#[derive(Debug, Default)]
pub struct PlantTargeting {
    zombie_workspace: Vec<ZombieCandidate>,
}

impl PlantTargeting {
    /// Creates a new plant targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes plant targets for the provided snapshots.
    ///
    /// A shooter aims at the zombie in its own row whose centre lies strictly
    /// to the right of the plant's centre and closest to it. Equidistant
    /// zombies resolve to the lowest identifier. The output buffer is cleared
    /// before it is populated.
    pub fn handle(&mut self, plants: &PlantView, zombies: &ZombieView, out: &mut Vec<PlantTarget>) {
        out.clear();

        if plants.is_empty() || zombies.is_empty() {
            return;
        }

        self.prepare_zombie_workspace(zombies);

        for plant in plants.iter().filter(|plant| plant.kind.is_shooter()) {
            let row = plant.cell.row();
            let mut best: Option<BestCandidate> = None;

            for candidate in self.zombie_workspace.iter().filter(|zombie| zombie.row == row) {
                let distance = candidate.x - plant.position.x;
                if distance <= 0.0 {
                    continue;
                }

                let current = BestCandidate {
                    distance,
                    zombie: candidate.id,
                };
                match &mut best {
                    Some(existing) => {
                        if current.precedes(existing) {
                            *existing = current;
                        }
                    }
                    None => best = Some(current),
                }
            }

            if let Some(best) = best {
                out.push(target(plant.id, best));
            }
        }
    }

    fn prepare_zombie_workspace(&mut self, zombies: &ZombieView) {
        self.zombie_workspace.clear();
        self.zombie_workspace.reserve(zombies.len());
        self.zombie_workspace
            .extend(zombies.iter().map(|snapshot| ZombieCandidate {
                id: snapshot.id,
                row: snapshot.row,
                x: snapshot.position.x,
            }));
    }
}

fn target(plant: PlantId, best: BestCandidate) -> PlantTarget {
    PlantTarget {
        plant,
        zombie: best.zombie,
        distance: best.distance,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ZombieCandidate {
    id: ZombieId,
    row: u32,
    x: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct BestCandidate {
    distance: f32,
    zombie: ZombieId,
}

impl BestCandidate {
    fn precedes(&self, other: &Self) -> bool {
        if self.distance != other.distance {
            return self.distance < other.distance;
        }
        self.zombie < other.zombie
    }
}
