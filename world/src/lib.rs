#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Garden Defence.

mod plants;
mod projectiles;
mod sun;
mod zombies;

use std::time::Duration;

use garden_defence_core::{
    CellCoord, Command, Event, LawnGeometry, LawnPoint, PlacementError, PlantId, PlantKind,
    ProjectileId, SelectionError, SunId, ZombieAnimation, ZombieId, ZombieKind, LOGIC_STEP,
    STARTING_SUN, SUN_VALUE, WELCOME_BANNER,
};
use tracing::{debug, info, warn};

use self::{
    plants::Plant,
    projectiles::Projectile,
    sun::FallingSun,
    zombies::{FrameAdvance, Zombie},
};

/// Monotonic identifier counters for every entity family.
#[derive(Debug, Default)]
struct IdAllocator {
    plants: u32,
    zombies: u32,
    projectiles: u32,
    suns: u32,
}

impl IdAllocator {
    fn plant(&mut self) -> PlantId {
        let id = PlantId::new(self.plants);
        self.plants = self.plants.wrapping_add(1);
        id
    }

    fn zombie(&mut self) -> ZombieId {
        let id = ZombieId::new(self.zombies);
        self.zombies = self.zombies.wrapping_add(1);
        id
    }

    fn projectile(&mut self) -> ProjectileId {
        let id = ProjectileId::new(self.projectiles);
        self.projectiles = self.projectiles.wrapping_add(1);
        id
    }

    fn sun(&mut self) -> SunId {
        let id = SunId::new(self.suns);
        self.suns = self.suns.wrapping_add(1);
        id
    }
}

/// Remaining recharge time of every plant card.
#[derive(Debug, Default)]
struct CardRecharge {
    remaining: [Duration; PlantKind::ALL.len()],
}

impl CardRecharge {
    fn remaining(&self, kind: PlantKind) -> Duration {
        self.remaining[kind.index()]
    }

    fn start(&mut self, kind: PlantKind) {
        self.remaining[kind.index()] = kind.stats().card_recharge;
    }

    fn advance(&mut self, dt: Duration) {
        for remaining in &mut self.remaining {
            *remaining = remaining.saturating_sub(dt);
        }
    }
}

/// Represents the authoritative Garden Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    geometry: LawnGeometry,
    starting_sun: u32,
    plants: Vec<Plant>,
    zombies: Vec<Zombie>,
    projectiles: Vec<Projectile>,
    suns: Vec<FallingSun>,
    sun: u32,
    score: u32,
    game_over: bool,
    victory: bool,
    selected: Option<PlantKind>,
    cards: CardRecharge,
    step_accumulator: Duration,
    ids: IdAllocator,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a new Garden Defence world on the default lawn.
    #[must_use]
    pub fn new() -> Self {
        Self::with_geometry(LawnGeometry::default(), STARTING_SUN)
    }

    fn with_geometry(geometry: LawnGeometry, starting_sun: u32) -> Self {
        Self {
            banner: WELCOME_BANNER,
            geometry,
            starting_sun,
            plants: Vec::new(),
            zombies: Vec::new(),
            projectiles: Vec::new(),
            suns: Vec::new(),
            sun: starting_sun,
            score: 0,
            game_over: false,
            victory: false,
            selected: None,
            cards: CardRecharge::default(),
            step_accumulator: Duration::ZERO,
            ids: IdAllocator::default(),
        }
    }

    fn reset(&mut self) {
        *self = Self::with_geometry(self.geometry, self.starting_sun);
    }

    fn set_game_over(&mut self, over: bool, out_events: &mut Vec<Event>) {
        if self.game_over == over {
            return;
        }
        self.game_over = over;
        out_events.push(Event::GameOverChanged { over });
    }

    fn credit(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        self.sun = self.sun.saturating_add(amount);
        out_events.push(Event::SunBalanceChanged { balance: self.sun });
    }

    fn select(&mut self, kind: Option<PlantKind>, out_events: &mut Vec<Event>) {
        let Some(kind) = kind else {
            if self.selected.take().is_some() {
                out_events.push(Event::PlantSelected { kind: None });
            }
            return;
        };

        let rejection = if self.game_over {
            Some(SelectionError::GameOver)
        } else if self.sun < kind.stats().cost {
            Some(SelectionError::InsufficientSun {
                cost: kind.stats().cost,
                balance: self.sun,
            })
        } else {
            let remaining = self.cards.remaining(kind);
            (!remaining.is_zero()).then_some(SelectionError::Recharging { remaining })
        };

        if let Some(reason) = rejection {
            debug!(%kind, %reason, "card selection rejected");
            out_events.push(Event::PlantSelectionRejected { kind, reason });
            return;
        }

        self.cards.start(kind);
        self.selected = Some(kind);
        out_events.push(Event::PlantSelected { kind: Some(kind) });
    }

    fn place(&mut self, kind: PlantKind, cell: CellCoord, out_events: &mut Vec<Event>) {
        let cost = kind.stats().cost;
        let rejection = if self.game_over {
            Some(PlacementError::GameOver)
        } else if !self.geometry.contains_cell(cell) {
            Some(PlacementError::OutOfBounds)
        } else if self.sun < cost {
            Some(PlacementError::InsufficientSun {
                cost,
                balance: self.sun,
            })
        } else if self.plants.iter().any(|plant| plant.cell == cell) {
            Some(PlacementError::Occupied)
        } else {
            None
        };

        if let Some(reason) = rejection {
            debug!(%kind, column = cell.column(), row = cell.row(), %reason, "placement rejected");
            out_events.push(Event::PlantPlacementRejected { kind, cell, reason });
            return;
        }

        let id = self.ids.plant();
        let position = self.geometry.cell_center(cell);
        self.plants.push(Plant::new(id, kind, cell, position));
        self.sun -= cost;
        info!(%kind, column = cell.column(), row = cell.row(), "plant placed");
        out_events.push(Event::PlantPlaced {
            plant: id,
            kind,
            cell,
        });
        out_events.push(Event::SunBalanceChanged { balance: self.sun });

        if self.selected.take().is_some() {
            out_events.push(Event::PlantSelected { kind: None });
        }
    }

    fn spawn_zombie(&mut self, kind: ZombieKind, row: u32, out_events: &mut Vec<Event>) {
        if row >= self.geometry.rows {
            warn!(%kind, row, "zombie spawn outside the lawn ignored");
            return;
        }

        let id = self.ids.zombie();
        let position = LawnPoint::new(
            self.geometry.playfield_width + kind.stats().width / 2.0,
            self.geometry.row_center_y(row),
        );
        self.zombies.push(Zombie::new(id, kind, row, position));
        debug!(%kind, row, "zombie spawned");
        out_events.push(Event::ZombieSpawned {
            zombie: id,
            kind,
            row,
        });
    }

    fn fire(&mut self, plant_id: PlantId, out_events: &mut Vec<Event>) {
        let Some(plant) = self.plants.iter_mut().find(|plant| plant.id == plant_id) else {
            return;
        };
        let stats = plant.kind.stats();
        let (Some(kind), Some(damage), Some(interval)) =
            (stats.projectile, stats.attack_damage, stats.attack_interval)
        else {
            return;
        };
        if !plant.ready_in.is_zero() {
            return;
        }

        plant.ready_in = interval;
        let id = self.ids.projectile();
        self.projectiles
            .push(Projectile::launch(id, kind, plant.id, plant.position, damage));
        out_events.push(Event::ProjectileFired {
            projectile: id,
            plant: plant_id,
            kind,
        });
    }

    fn drop_sun(&mut self, x: f32, speed: f32, out_events: &mut Vec<Event>) {
        let id = self.ids.sun();
        self.suns.push(FallingSun::new(
            id,
            LawnPoint::new(x, self.geometry.origin_y),
            speed,
        ));
        out_events.push(Event::SunDropped { sun: id, x });
    }

    fn collect_sun(&mut self, sun_id: SunId, out_events: &mut Vec<Event>) {
        let Some(sun) = self
            .suns
            .iter_mut()
            .find(|sun| sun.id == sun_id && !sun.collected)
        else {
            return;
        };
        sun.collected = true;
        out_events.push(Event::SunCollected {
            sun: sun_id,
            amount: SUN_VALUE,
        });
        self.credit(SUN_VALUE, out_events);
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        out_events.push(Event::TimeAdvanced { dt });

        self.cards.advance(dt);
        for plant in &mut self.plants {
            plant.cool_down(dt);
        }

        self.step_accumulator = self.step_accumulator.saturating_add(dt);
        while self.step_accumulator >= LOGIC_STEP {
            self.step_accumulator -= LOGIC_STEP;
            self.step(out_events);
        }
    }

    /// Runs a single fixed logic step.
    fn step(&mut self, out_events: &mut Vec<Event>) {
        self.step_suns(out_events);
        if !self.game_over {
            self.step_zombies(out_events);
        }
        for plant in &mut self.plants {
            plant.animate();
        }
        if !self.game_over {
            self.animate_zombies(out_events);
        }
        self.step_projectiles(out_events);
    }

    fn step_suns(&mut self, out_events: &mut Vec<Event>) {
        let floor = self.geometry.sun_floor_y;
        self.suns.retain_mut(|sun| {
            if sun.step(floor) {
                out_events.push(Event::SunRemoved { sun: sun.id });
                false
            } else {
                true
            }
        });
    }

    fn step_zombies(&mut self, out_events: &mut Vec<Event>) {
        let mut reached_house = false;

        for zombie in &mut self.zombies {
            let blocked = self.plants.iter().any(|plant| zombie.can_bite(plant));

            if blocked {
                if zombie.has_clip(ZombieAnimation::Attack) {
                    zombie.play(ZombieAnimation::Attack);
                }
            } else {
                zombie.play(ZombieAnimation::Walk);
                zombie.walk();
            }

            if zombie.position.x <= self.geometry.house_x {
                reached_house = true;
                out_events.push(Event::ZombieReachedHouse { zombie: zombie.id });
            }
        }

        if reached_house && !self.game_over {
            info!("a zombie reached the house");
            self.set_game_over(true, out_events);
        }
    }

    fn animate_zombies(&mut self, out_events: &mut Vec<Event>) {
        let mut eaten: Vec<PlantId> = Vec::new();

        for zombie in &mut self.zombies {
            if zombie.animate() != FrameAdvance::Looped
                || zombie.animation != ZombieAnimation::Attack
            {
                continue;
            }

            let target = self
                .plants
                .iter_mut()
                .find(|plant| !eaten.contains(&plant.id) && zombie.can_bite(plant));
            let Some(plant) = target else {
                zombie.play(ZombieAnimation::Walk);
                continue;
            };

            plant.health -= zombie.damage();
            if plant.health <= 0.0 {
                eaten.push(plant.id);
                debug!(plant = plant.id.get(), zombie = zombie.id.get(), "plant eaten");
                out_events.push(Event::PlantDestroyed {
                    plant: plant.id,
                    zombie: zombie.id,
                });
                zombie.play(ZombieAnimation::Walk);
            } else {
                out_events.push(Event::PlantDamaged {
                    plant: plant.id,
                    zombie: zombie.id,
                    remaining: plant.health,
                });
            }
        }

        if !eaten.is_empty() {
            self.plants.retain(|plant| !eaten.contains(&plant.id));
        }
    }

    fn step_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let mut spent: Vec<ProjectileId> = Vec::new();
        let mut defeated: Vec<ZombieId> = Vec::new();
        let playfield_width = self.geometry.playfield_width;

        for projectile in &mut self.projectiles {
            projectile.advance();

            let target = self
                .zombies
                .iter_mut()
                .find(|zombie| !defeated.contains(&zombie.id) && projectile.hits(zombie));

            if let Some(zombie) = target {
                zombie.health -= projectile.damage;
                spent.push(projectile.id);
                if zombie.health <= 0.0 {
                    defeated.push(zombie.id);
                } else {
                    out_events.push(Event::ZombieDamaged {
                        zombie: zombie.id,
                        projectile: projectile.id,
                        remaining: zombie.health,
                    });
                }
            } else if projectile.is_off_screen(playfield_width) {
                spent.push(projectile.id);
                out_events.push(Event::ProjectileExpired {
                    projectile: projectile.id,
                });
            }
        }

        if !spent.is_empty() {
            self.projectiles
                .retain(|projectile| !spent.contains(&projectile.id));
        }

        if defeated.is_empty() {
            return;
        }
        self.zombies.retain(|zombie| !defeated.contains(&zombie.id));
        for zombie in defeated {
            self.score = self.score.saturating_add(1);
            debug!(zombie = zombie.get(), score = self.score, "zombie defeated");
            out_events.push(Event::ZombieDefeated { zombie });
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLawn {
            geometry,
            starting_sun,
        } => {
            *world = World::with_geometry(geometry, starting_sun);
            out_events.push(Event::LawnConfigured { geometry });
        }
        Command::Tick { dt } => world.advance(dt, out_events),
        Command::SelectPlant { kind } => world.select(kind, out_events),
        Command::PlacePlant { kind, cell } => world.place(kind, cell, out_events),
        Command::RemovePlant { plant } => {
            let before = world.plants.len();
            world.plants.retain(|candidate| candidate.id != plant);
            if world.plants.len() != before {
                out_events.push(Event::PlantRemoved { plant });
            }
        }
        Command::SpawnZombie { kind, row } => world.spawn_zombie(kind, row, out_events),
        Command::RemoveZombie { zombie } => {
            let before = world.zombies.len();
            world.zombies.retain(|candidate| candidate.id != zombie);
            if world.zombies.len() != before {
                out_events.push(Event::ZombieRemoved { zombie });
            }
        }
        Command::FireProjectile { plant } => world.fire(plant, out_events),
        Command::RemoveProjectile { projectile } => {
            let before = world.projectiles.len();
            world
                .projectiles
                .retain(|candidate| candidate.id != projectile);
            if world.projectiles.len() != before {
                out_events.push(Event::ProjectileRemoved { projectile });
            }
        }
        Command::DropSun { x, speed } => world.drop_sun(x, speed, out_events),
        Command::CollectSun { sun } => world.collect_sun(sun, out_events),
        Command::RemoveSun { sun } => {
            let before = world.suns.len();
            world.suns.retain(|candidate| candidate.id != sun);
            if world.suns.len() != before {
                out_events.push(Event::SunRemoved { sun });
            }
        }
        Command::AddSun { amount } => world.credit(amount, out_events),
        Command::SetGameOver { over } => world.set_game_over(over, out_events),
        Command::SetVictory { victory } => {
            if world.victory != victory {
                world.victory = victory;
                out_events.push(Event::VictoryChanged { victory });
            }
        }
        Command::ResetGame => {
            world.reset();
            info!("game reset");
            out_events.push(Event::GameReset);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use garden_defence_core::{
        CellCoord, LawnGeometry, LawnPoint, PlantId, PlantKind, PlantView, ProjectileView, SunId,
        SunView, ZombieView, SUN_PICKUP_RADIUS,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the lawn geometry.
    #[must_use]
    pub fn geometry(world: &World) -> &LawnGeometry {
        &world.geometry
    }

    /// Current sun balance.
    #[must_use]
    pub fn sun_balance(world: &World) -> u32 {
        world.sun
    }

    /// Number of zombies defeated since the game started.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Reports whether the game has ended.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Reports whether the player has been declared victorious.
    #[must_use]
    pub fn is_victory(world: &World) -> bool {
        world.victory
    }

    /// Plant card currently selected, if any.
    #[must_use]
    pub fn selected_plant(world: &World) -> Option<PlantKind> {
        world.selected
    }

    /// Time left until the card for `kind` may be selected again.
    #[must_use]
    pub fn card_recharge(world: &World, kind: PlantKind) -> Duration {
        world.cards.remaining(kind)
    }

    /// Identifier of the plant rooted in `cell`, if any.
    #[must_use]
    pub fn plant_at(world: &World, cell: CellCoord) -> Option<PlantId> {
        world
            .plants
            .iter()
            .find(|plant| plant.cell == cell)
            .map(|plant| plant.id)
    }

    /// First uncollected sun lying within pickup distance of `point`.
    #[must_use]
    pub fn sun_at(world: &World, point: LawnPoint) -> Option<SunId> {
        world
            .suns
            .iter()
            .find(|sun| {
                !sun.collected
                    && (sun.position.x - point.x).abs() < SUN_PICKUP_RADIUS
                    && (sun.position.y - point.y).abs() < SUN_PICKUP_RADIUS
            })
            .map(|sun| sun.id)
    }

    /// Captures a read-only view of the plants on the lawn.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        PlantView::from_snapshots(world.plants.iter().map(|plant| plant.snapshot()).collect())
    }

    /// Captures a read-only view of the zombies on the lawn.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        ZombieView::from_snapshots(
            world
                .zombies
                .iter()
                .map(|zombie| zombie.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Captures a read-only view of the falling suns.
    #[must_use]
    pub fn sun_view(world: &World) -> SunView {
        SunView::from_snapshots(world.suns.iter().map(|sun| sun.snapshot()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(world: &mut World, millis: u64, events: &mut Vec<Event>) {
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            events,
        );
    }

    fn run_for(world: &mut World, seconds: u64, events: &mut Vec<Event>) {
        for _ in 0..seconds {
            tick(world, 1_000, events);
        }
    }

    fn place(world: &mut World, kind: PlantKind, column: u32, row: u32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::PlacePlant {
                kind,
                cell: CellCoord::new(column, row),
            },
            &mut events,
        );
        events
    }

    fn rejection(events: &[Event]) -> Option<PlacementError> {
        events.iter().find_map(|event| match event {
            Event::PlantPlacementRejected { reason, .. } => Some(*reason),
            _ => None,
        })
    }

    #[test]
    fn placement_centres_plant_and_spends_sun() {
        let mut world = World::new();
        let events = place(&mut world, PlantKind::Sunflower, 0, 0);

        assert!(matches!(events[0], Event::PlantPlaced { .. }));
        assert_eq!(query::sun_balance(&world), 0);

        let plant = query::plant_at(&world, CellCoord::new(0, 0)).expect("plant placed");
        let view = query::plant_view(&world);
        let snapshot = view.get(plant).expect("snapshot");
        assert_eq!(snapshot.position, LawnPoint::new(179.0, 130.0));
        assert_eq!(snapshot.health, 300.0);
    }

    #[test]
    fn placement_checks_bounds_then_sun_then_occupancy() {
        let mut world = World::new();
        assert_eq!(
            rejection(&place(&mut world, PlantKind::Peashooter, 7, 0)),
            Some(PlacementError::OutOfBounds)
        );
        assert_eq!(
            rejection(&place(&mut world, PlantKind::Peashooter, 0, 0)),
            Some(PlacementError::InsufficientSun {
                cost: 100,
                balance: 50
            })
        );

        assert!(rejection(&place(&mut world, PlantKind::PotatoMine, 0, 0)).is_none());
        assert_eq!(
            rejection(&place(&mut world, PlantKind::PotatoMine, 0, 0)),
            Some(PlacementError::Occupied)
        );
        assert_eq!(query::sun_balance(&world), 25);
    }

    #[test]
    fn selection_requires_sun_and_finished_recharge() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SelectPlant {
                kind: Some(PlantKind::Sunflower),
            },
            &mut events,
        );
        assert_eq!(query::selected_plant(&world), Some(PlantKind::Sunflower));
        assert_eq!(
            query::card_recharge(&world, PlantKind::Sunflower),
            Duration::from_secs(5)
        );

        let placed = place(&mut world, PlantKind::Sunflower, 2, 2);
        assert!(placed.contains(&Event::PlantSelected { kind: None }));
        assert_eq!(query::selected_plant(&world), None);

        events.clear();
        apply(&mut world, Command::AddSun { amount: 50 }, &mut events);
        apply(
            &mut world,
            Command::SelectPlant {
                kind: Some(PlantKind::Sunflower),
            },
            &mut events,
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::PlantSelectionRejected {
                reason: SelectionError::Recharging { .. },
                ..
            }
        )));

        tick(&mut world, 5_000, &mut events);
        events.clear();
        apply(
            &mut world,
            Command::SelectPlant {
                kind: Some(PlantKind::Sunflower),
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::PlantSelected {
                kind: Some(PlantKind::Sunflower)
            }]
        );
    }

    #[test]
    fn clearing_selection_keeps_recharge_running() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SelectPlant {
                kind: Some(PlantKind::Wallnut),
            },
            &mut events,
        );
        tick(&mut world, 10_000, &mut events);
        apply(&mut world, Command::SelectPlant { kind: None }, &mut events);

        assert_eq!(query::selected_plant(&world), None);
        assert_eq!(
            query::card_recharge(&world, PlantKind::Wallnut),
            Duration::from_secs(20)
        );
    }

    #[test]
    fn zombie_reaching_house_ends_game_and_freezes_zombies() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::Zombie,
                row: 2,
            },
            &mut events,
        );

        let spawned = query::zombie_view(&world).into_vec();
        assert_eq!(spawned[0].position, LawnPoint::new(1_035.0, 330.0));

        run_for(&mut world, 70, &mut events);
        assert!(query::is_game_over(&world));
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::GameOverChanged { over: true }))
                .count(),
            1
        );

        let frozen = query::zombie_view(&world).into_vec();
        run_for(&mut world, 5, &mut events);
        assert_eq!(query::zombie_view(&world).into_vec(), frozen);

        assert_eq!(
            rejection(&place(&mut world, PlantKind::Sunflower, 0, 0)),
            Some(PlacementError::GameOver)
        );
    }

    #[test]
    fn zombie_chews_through_plant_in_its_row() {
        let mut world = World::new();
        let mut events = Vec::new();
        let _ = place(&mut world, PlantKind::Sunflower, 0, 1);
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::Zombie,
                row: 1,
            },
            &mut events,
        );

        run_for(&mut world, 100, &mut events);

        let bites = events
            .iter()
            .filter(|event| matches!(event, Event::PlantDamaged { .. }))
            .count();
        assert_eq!(bites, 14, "300 health takes fifteen 20-point bites");
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::PlantDestroyed { .. })));
        assert!(query::plant_view(&world).is_empty());
    }

    #[test]
    fn plants_in_other_rows_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();
        let _ = place(&mut world, PlantKind::Sunflower, 0, 0);
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::FlagZombie,
                row: 4,
            },
            &mut events,
        );

        run_for(&mut world, 60, &mut events);

        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::PlantDamaged { .. })));
        assert!(query::is_game_over(&world));
        assert_eq!(query::plant_view(&world).len(), 1);
    }

    #[test]
    fn peas_defeat_zombie_and_award_score() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::AddSun { amount: 50 }, &mut events);
        let _ = place(&mut world, PlantKind::Peashooter, 0, 3);
        let plant = query::plant_at(&world, CellCoord::new(0, 3)).expect("peashooter");
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::Zombie,
                row: 3,
            },
            &mut events,
        );

        for _ in 0..1_000 {
            apply(&mut world, Command::FireProjectile { plant }, &mut events);
            tick(&mut world, 30, &mut events);
        }

        let hits = events
            .iter()
            .filter(|event| matches!(event, Event::ZombieDamaged { .. }))
            .count();
        assert_eq!(hits, 4, "the fifth 20-damage pea defeats a 100-health zombie");
        assert!(query::zombie_view(&world).is_empty());
        assert_eq!(query::score(&world), 1);
        assert!(!query::is_game_over(&world));
    }

    #[test]
    fn shooter_respects_fire_interval() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::AddSun { amount: 50 }, &mut events);
        let _ = place(&mut world, PlantKind::Peashooter, 0, 0);
        let plant = query::plant_at(&world, CellCoord::new(0, 0)).expect("peashooter");

        events.clear();
        apply(&mut world, Command::FireProjectile { plant }, &mut events);
        apply(&mut world, Command::FireProjectile { plant }, &mut events);
        assert_eq!(events.len(), 1);

        let projectile = query::projectile_view(&world).into_vec()[0];
        assert_eq!(projectile.position, LawnPoint::new(189.0, 85.0));

        tick(&mut world, 1_400, &mut events);
        events.clear();
        apply(&mut world, Command::FireProjectile { plant }, &mut events);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn non_shooters_never_fire() {
        let mut world = World::new();
        let mut events = Vec::new();
        let _ = place(&mut world, PlantKind::Wallnut, 0, 0);
        let plant = query::plant_at(&world, CellCoord::new(0, 0)).expect("wallnut");
        apply(&mut world, Command::FireProjectile { plant }, &mut events);
        assert!(events.is_empty());
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn stray_projectile_expires_past_playfield() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::AddSun { amount: 50 }, &mut events);
        let _ = place(&mut world, PlantKind::Peashooter, 0, 0);
        let plant = query::plant_at(&world, CellCoord::new(0, 0)).expect("peashooter");
        apply(&mut world, Command::FireProjectile { plant }, &mut events);

        run_for(&mut world, 5, &mut events);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::ProjectileExpired { .. })));
        assert!(query::projectile_view(&world).is_empty());
    }

    #[test]
    fn collected_sun_credits_once_and_lingers() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::DropSun { x: 400.0, speed: 2.0 }, &mut events);
        let sun = query::sun_view(&world).into_vec()[0].id;

        assert_eq!(query::sun_at(&world, LawnPoint::new(420.0, 60.0)), Some(sun));
        assert_eq!(query::sun_at(&world, LawnPoint::new(430.0, 80.0)), None);

        apply(&mut world, Command::CollectSun { sun }, &mut events);
        apply(&mut world, Command::CollectSun { sun }, &mut events);
        assert_eq!(query::sun_balance(&world), 75);
        assert_eq!(query::sun_at(&world, LawnPoint::new(400.0, 80.0)), None);

        tick(&mut world, 270, &mut events);
        assert_eq!(query::sun_view(&world).len(), 1);
        tick(&mut world, 30, &mut events);
        assert!(query::sun_view(&world).is_empty());
        assert!(events.contains(&Event::SunRemoved { sun }));
    }

    #[test]
    fn uncollected_sun_rests_on_floor() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::DropSun { x: 400.0, speed: 2.0 }, &mut events);

        run_for(&mut world, 20, &mut events);

        let suns = query::sun_view(&world).into_vec();
        assert_eq!(suns.len(), 1);
        assert!(suns[0].position.y >= 560.0);
        assert!(suns[0].position.y < 562.0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut world = World::new();
        let mut events = Vec::new();
        let _ = place(&mut world, PlantKind::Sunflower, 0, 0);
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::ConeheadZombie,
                row: 0,
            },
            &mut events,
        );
        apply(&mut world, Command::SetGameOver { over: true }, &mut events);

        events.clear();
        apply(&mut world, Command::ResetGame, &mut events);

        assert_eq!(events, vec![Event::GameReset]);
        assert_eq!(query::sun_balance(&world), STARTING_SUN);
        assert!(!query::is_game_over(&world));
        assert!(query::plant_view(&world).is_empty());
        assert!(query::zombie_view(&world).is_empty());
        assert_eq!(query::score(&world), 0);
    }

    #[test]
    fn configured_lawn_limits_rows() {
        let mut world = World::new();
        let mut events = Vec::new();
        let geometry = LawnGeometry {
            rows: 3,
            ..LawnGeometry::default()
        };
        apply(
            &mut world,
            Command::ConfigureLawn {
                geometry,
                starting_sun: 200,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnZombie {
                kind: ZombieKind::Zombie,
                row: 4,
            },
            &mut events,
        );

        assert_eq!(query::geometry(&world).rows, 3);
        assert_eq!(query::sun_balance(&world), 200);
        assert!(query::zombie_view(&world).is_empty());
        assert_eq!(
            rejection(&place(&mut world, PlantKind::Sunflower, 0, 3)),
            Some(PlacementError::OutOfBounds)
        );
    }

    #[test]
    fn identical_command_streams_replay_identically() {
        fn replay() -> (Vec<Event>, u32) {
            let mut world = World::new();
            let mut events = Vec::new();
            apply(&mut world, Command::AddSun { amount: 500 }, &mut events);
            for (column, row) in [(0, 0), (1, 2), (0, 4)] {
                events.extend(place(&mut world, PlantKind::Peashooter, column, row));
            }
            for row in 0..5 {
                apply(
                    &mut world,
                    Command::SpawnZombie {
                        kind: ZombieKind::BucketheadZombie,
                        row,
                    },
                    &mut events,
                );
            }
            for step in 0..3_000_u32 {
                if step % 40 == 0 {
                    for plant in query::plant_view(&world).iter().map(|plant| plant.id) {
                        apply(&mut world, Command::FireProjectile { plant }, &mut events);
                    }
                }
                tick(&mut world, 16, &mut events);
            }
            (events, query::score(&world))
        }

        let (first, first_score) = replay();
        let (second, second_score) = replay();
        assert_eq!(first, second);
        assert_eq!(first_score, second_score);
    }
}
