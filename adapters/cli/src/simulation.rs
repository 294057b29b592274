//! Fixed-step driver that wires the world and the systems together.

use std::{fmt, time::Duration};

use garden_defence_core::{
    CellCoord, Command, Event, PlacementError, PlantId, PlantKind, PlantTarget,
};
use garden_defence_system_interaction::{Interaction, InteractionContext, PointerInput};
use garden_defence_system_plant_combat::PlantCombat;
use garden_defence_system_plant_targeting::PlantTargeting;
use garden_defence_system_spawning::{self as spawning, Spawning};
use garden_defence_system_sun_fall::{self as sun_fall, SunFall};
use garden_defence_world::{self as world, query, World};
use thiserror::Error;
use tracing::{debug, info};

use crate::{config::SimulationConfig, layout_transfer::GardenLayoutSnapshot};

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Victory,
    GameOver,
}

/// Final report of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Summary {
    pub(crate) outcome: Outcome,
    pub(crate) elapsed: Duration,
    pub(crate) sun: u32,
    pub(crate) score: u32,
    pub(crate) plants: usize,
    pub(crate) zombies: usize,
    pub(crate) suns_collected: u32,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            Outcome::Victory => "victory",
            Outcome::GameOver => "game over",
        };
        writeln!(f, "outcome: {outcome}")?;
        writeln!(f, "elapsed: {:.2}s", self.elapsed.as_secs_f64())?;
        writeln!(f, "sun: {}", self.sun)?;
        writeln!(f, "score: {}", self.score)?;
        writeln!(f, "suns collected: {}", self.suns_collected)?;
        writeln!(f, "plants standing: {}", self.plants)?;
        write!(f, "zombies on the lawn: {}", self.zombies)
    }
}

/// Reasons a scripted placement did not produce a plant.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub(crate) enum PlantingError {
    /// The lawn refused the plant.
    #[error(transparent)]
    Rejected(#[from] PlacementError),
    /// The lawn emitted neither a placement nor a rejection.
    #[error("the lawn did not answer the placement")]
    Unanswered,
}

/// Owns the world and every system, advancing them frame by frame.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    spawning: Spawning,
    sun_fall: SunFall,
    targeting: PlantTargeting,
    combat: PlantCombat,
    interaction: Interaction,
    autoplay: bool,
    pending_input: Vec<PointerInput>,
    pending_events: Vec<Event>,
    targets: Vec<PlantTarget>,
    elapsed: Duration,
    suns_collected: u32,
}

impl Simulation {
    pub(crate) fn new(config: &SimulationConfig, autoplay: bool) -> Self {
        let mut world = World::new();
        let mut pending_events = Vec::new();
        world::apply(
            &mut world,
            Command::ConfigureLawn {
                geometry: config.geometry,
                starting_sun: config.starting_sun,
            },
            &mut pending_events,
        );

        let spawning_config = spawning::Config::new(config.spawn_interval(), config.seed)
            .with_rotation(config.zombie_rotation.clone());
        let sun_config = sun_fall::Config::new(config.sun_interval(), config.seed.rotate_left(32));

        Self {
            world,
            spawning: Spawning::new(spawning_config),
            sun_fall: SunFall::new(sun_config),
            targeting: PlantTargeting::new(),
            combat: PlantCombat::new(),
            interaction: Interaction::new(),
            autoplay,
            pending_input: Vec::new(),
            pending_events,
            targets: Vec::new(),
            elapsed: Duration::ZERO,
            suns_collected: 0,
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Buys and plants `kind` in `cell`, reporting why the lawn refused it.
    pub(crate) fn place(&mut self, kind: PlantKind, cell: CellCoord) -> Result<PlantId, PlantingError> {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::PlacePlant { kind, cell }, &mut events);

        let outcome = events.iter().find_map(|event| match event {
            Event::PlantPlaced { plant, .. } => Some(Ok(*plant)),
            Event::PlantPlacementRejected { reason, .. } => Some(Err(PlantingError::from(*reason))),
            _ => None,
        });
        self.pending_events.append(&mut events);
        outcome.unwrap_or(Err(PlantingError::Unanswered))
    }

    /// Plants every entry of a decoded layout in order.
    pub(crate) fn plant_layout(&mut self, layout: &GardenLayoutSnapshot) -> Result<usize, PlantingError> {
        for plant in &layout.plants {
            let _ = self.place(plant.kind, plant.cell)?;
        }
        Ok(layout.plants.len())
    }

    /// Queues pointer input for the next frame.
    pub(crate) fn push_input(&mut self, input: PointerInput) {
        self.pending_input.push(input);
    }

    /// Advances the simulation by one frame of `dt`.
    pub(crate) fn frame(&mut self, dt: Duration) {
        let mut events = std::mem::take(&mut self.pending_events);
        let carried = events.len();
        world::apply(&mut self.world, Command::Tick { dt }, &mut events);
        self.elapsed = self.elapsed.saturating_add(dt);

        let mut commands = Vec::new();
        let geometry = *query::geometry(&self.world);
        let game_over = query::is_game_over(&self.world);

        self.spawning
            .handle(&events, game_over, geometry.rows, &mut commands);
        self.sun_fall.handle(&events, &geometry, &mut commands);

        let plants = query::plant_view(&self.world);
        let zombies = query::zombie_view(&self.world);
        self.targeting.handle(&plants, &zombies, &mut self.targets);
        self.combat.handle(&plants, &self.targets, &mut commands);

        let suns = query::sun_view(&self.world);
        let inputs = std::mem::take(&mut self.pending_input);
        self.interaction.handle(
            &inputs,
            InteractionContext {
                game_over,
                selected: query::selected_plant(&self.world),
                sun: query::sun_balance(&self.world),
                geometry: &geometry,
                plants: &plants,
                suns: &suns,
            },
            &mut commands,
        );

        let mut produced = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut produced);
        }

        for event in events[carried..].iter().chain(&produced) {
            match event {
                Event::SunCollected { .. } => self.suns_collected += 1,
                Event::GameOverChanged { over: true } => {
                    info!(elapsed = ?self.elapsed, "the zombies reached the house");
                }
                _ => {}
            }
        }
        self.pending_events = produced;

        if self.autoplay {
            self.queue_floor_pickups();
        }
    }

    fn queue_floor_pickups(&mut self) {
        let floor = query::geometry(&self.world).sun_floor_y;
        let landed: Vec<PointerInput> = query::sun_view(&self.world)
            .iter()
            .filter(|sun| !sun.collected && sun.position.y >= floor)
            .map(|sun| PointerInput::Click(sun.position))
            .collect();
        if !landed.is_empty() {
            debug!(count = landed.len(), "collecting landed suns");
        }
        for input in landed {
            self.push_input(input);
        }
    }

    /// Runs frames of `frame` until `duration` elapses or the game ends.
    pub(crate) fn run(&mut self, duration: Duration, frame: Duration) -> Summary {
        while self.elapsed < duration && !query::is_game_over(&self.world) {
            self.frame(frame);
        }

        let outcome = if query::is_game_over(&self.world) {
            Outcome::GameOver
        } else {
            let mut events = Vec::new();
            world::apply(
                &mut self.world,
                Command::SetVictory { victory: true },
                &mut events,
            );
            Outcome::Victory
        };

        self.summary(outcome)
    }

    fn summary(&self, outcome: Outcome) -> Summary {
        Summary {
            outcome,
            elapsed: self.elapsed,
            sun: query::sun_balance(&self.world),
            score: query::score(&self.world),
            plants: query::plant_view(&self.world).len(),
            zombies: query::zombie_view(&self.world).len(),
            suns_collected: self.suns_collected,
        }
    }
}
