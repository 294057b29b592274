//! Zombie entities walking down the lawn rows.

use std::time::Duration;

use garden_defence_core::{
    AnimationClip, LawnPoint, ZombieAnimation, ZombieId, ZombieKind, ZombieSnapshot, LOGIC_STEP,
};

use crate::plants::Plant;

/// Zombie advancing along a single row.
#[derive(Clone, Debug)]
pub(crate) struct Zombie {
    pub(crate) id: ZombieId,
    pub(crate) kind: ZombieKind,
    pub(crate) row: u32,
    pub(crate) position: LawnPoint,
    pub(crate) health: f32,
    pub(crate) animation: ZombieAnimation,
    speed: f32,
    damage: f32,
    frame: u32,
    frame_timer: Duration,
}

/// Outcome of advancing a zombie animation by one logic step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameAdvance {
    /// The frame did not change or advanced mid-clip.
    Continued,
    /// A looping clip wrapped back to its first frame.
    Looped,
}

impl Zombie {
    pub(crate) fn new(id: ZombieId, kind: ZombieKind, row: u32, position: LawnPoint) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            row,
            position,
            health: stats.health,
            animation: ZombieAnimation::Walk,
            speed: stats.speed,
            damage: stats.damage,
            frame: 0,
            frame_timer: Duration::ZERO,
        }
    }

    pub(crate) fn half_width(&self) -> f32 {
        self.kind.stats().width / 2.0
    }

    pub(crate) fn half_height(&self) -> f32 {
        self.kind.stats().height / 2.0
    }

    pub(crate) fn damage(&self) -> f32 {
        self.damage
    }

    /// Reports whether the zombie stands close enough to the plant to bite it.
    ///
    /// The plant must share the row, the horizontal extents must overlap, and
    /// the zombie's centre must not have walked past the plant's right edge.
    pub(crate) fn can_bite(&self, plant: &Plant) -> bool {
        if plant.cell.row() != self.row {
            return false;
        }

        let zombie_half = self.half_width();
        let plant_half = plant.half_width();
        let x = self.position.x;
        let plant_x = plant.position.x;

        x - zombie_half < plant_x + plant_half
            && x + zombie_half > plant_x - plant_half
            && x < plant_x + plant_half
    }

    /// Switches to a different animation, restarting it from the first frame.
    pub(crate) fn play(&mut self, animation: ZombieAnimation) {
        if self.animation == animation {
            return;
        }
        self.animation = animation;
        self.frame = 0;
        self.frame_timer = Duration::ZERO;
    }

    pub(crate) fn has_clip(&self, animation: ZombieAnimation) -> bool {
        self.kind.clip(animation).is_some()
    }

    /// Walks left for one logic step.
    pub(crate) fn walk(&mut self) {
        self.position.x -= self.speed * LOGIC_STEP.as_secs_f32();
    }

    /// Advances the current clip by one logic step.
    pub(crate) fn animate(&mut self) -> FrameAdvance {
        let Some(AnimationClip {
            frame_count,
            frame_duration,
            looping,
        }) = self.kind.clip(self.animation)
        else {
            return FrameAdvance::Continued;
        };
        if frame_count == 0 {
            return FrameAdvance::Continued;
        }

        self.frame_timer += LOGIC_STEP;
        if self.frame_timer < frame_duration {
            return FrameAdvance::Continued;
        }
        self.frame_timer = Duration::ZERO;

        let next = self.frame + 1;
        if next < frame_count {
            self.frame = next;
            return FrameAdvance::Continued;
        }

        if looping {
            self.frame = 0;
            FrameAdvance::Looped
        } else {
            self.frame = frame_count - 1;
            FrameAdvance::Continued
        }
    }

    pub(crate) fn snapshot(&self) -> ZombieSnapshot {
        ZombieSnapshot {
            id: self.id,
            kind: self.kind,
            row: self.row,
            position: self.position,
            health: self.health,
            animation: self.animation,
            frame: self.frame,
        }
    }
}
