//! Static catalogue of plant, zombie, and projectile parameters.

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Plants available on the card bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantKind {
    /// Economy plant.
    Sunflower,
    /// Fires a pea down its row.
    Peashooter,
    /// Sturdy blocker.
    Wallnut,
    /// Fires a frozen pea down its row.
    SnowPeashooter,
    /// Single-use explosive.
    CherryBomb,
    /// Three-headed shooter.
    ThreePeashooter,
    /// Devours a zombie in one bite.
    Chomper,
    /// Buried explosive that needs time to arm.
    PotatoMine,
}

/// Gameplay parameters describing a plant type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantStats {
    /// Sun required to place the plant.
    pub cost: u32,
    /// Health when freshly placed.
    pub health: f32,
    /// Time the card stays unavailable after use.
    pub card_recharge: Duration,
    /// Frames in the idle animation loop.
    pub frame_count: u32,
    /// Time each idle frame is shown.
    pub frame_duration: Duration,
    /// Damage dealt by a single attack, if the plant attacks.
    pub attack_damage: Option<f32>,
    /// Time between two attacks, if the plant attacks on a cadence.
    pub attack_interval: Option<Duration>,
    /// Projectile launched per attack, if the plant shoots.
    pub projectile: Option<ProjectileKind>,
    /// Footprint width in pixels used for bite detection.
    pub width: f32,
    /// Footprint height in pixels.
    pub height: f32,
}

const SHOOTER_INTERVAL: Duration = Duration::from_millis(1_400);
const PEA_DAMAGE: f32 = 20.0;

impl PlantKind {
    /// Every plant kind in card-bar order.
    pub const ALL: [PlantKind; 8] = [
        Self::Sunflower,
        Self::Peashooter,
        Self::Wallnut,
        Self::SnowPeashooter,
        Self::CherryBomb,
        Self::ThreePeashooter,
        Self::Chomper,
        Self::PotatoMine,
    ];

    /// Position of the kind within [`PlantKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Sunflower => 0,
            Self::Peashooter => 1,
            Self::Wallnut => 2,
            Self::SnowPeashooter => 3,
            Self::CherryBomb => 4,
            Self::ThreePeashooter => 5,
            Self::Chomper => 6,
            Self::PotatoMine => 7,
        }
    }

    /// Lower-case identifier used in layouts and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunflower => "sunflower",
            Self::Peashooter => "peashooter",
            Self::Wallnut => "wallnut",
            Self::SnowPeashooter => "snowpeashooter",
            Self::CherryBomb => "cherrybomb",
            Self::ThreePeashooter => "threepeashooter",
            Self::Chomper => "chomper",
            Self::PotatoMine => "potatomine",
        }
    }

    /// Gameplay parameters for the plant.
    #[must_use]
    pub const fn stats(self) -> PlantStats {
        match self {
            Self::Sunflower => PlantStats {
                cost: 50,
                health: 300.0,
                card_recharge: Duration::from_millis(5_000),
                frame_count: 18,
                frame_duration: Duration::from_millis(100),
                attack_damage: None,
                attack_interval: None,
                projectile: None,
                width: 70.0,
                height: 70.0,
            },
            Self::Peashooter => PlantStats {
                cost: 100,
                health: 300.0,
                card_recharge: Duration::from_millis(7_500),
                frame_count: 13,
                frame_duration: Duration::from_millis(120),
                attack_damage: Some(PEA_DAMAGE),
                attack_interval: Some(SHOOTER_INTERVAL),
                projectile: Some(ProjectileKind::Pea),
                width: 65.0,
                height: 70.0,
            },
            Self::Wallnut => PlantStats {
                cost: 50,
                health: 4_000.0,
                card_recharge: Duration::from_millis(30_000),
                frame_count: 16,
                frame_duration: Duration::from_millis(150),
                attack_damage: None,
                attack_interval: None,
                projectile: None,
                width: 65.0,
                height: 75.0,
            },
            Self::SnowPeashooter => PlantStats {
                cost: 175,
                health: 300.0,
                card_recharge: Duration::from_millis(7_500),
                frame_count: 15,
                frame_duration: Duration::from_millis(120),
                attack_damage: Some(PEA_DAMAGE),
                attack_interval: Some(SHOOTER_INTERVAL),
                projectile: Some(ProjectileKind::SnowPea),
                width: 65.0,
                height: 70.0,
            },
            Self::CherryBomb => PlantStats {
                cost: 150,
                health: f32::INFINITY,
                card_recharge: Duration::from_millis(50_000),
                frame_count: 7,
                frame_duration: Duration::from_millis(100),
                attack_damage: None,
                attack_interval: None,
                projectile: None,
                width: 110.0,
                height: 100.0,
            },
            // Aims like a shooter but has no projectile of its own yet.
            Self::ThreePeashooter => PlantStats {
                cost: 325,
                health: 300.0,
                card_recharge: Duration::from_millis(7_500),
                frame_count: 16,
                frame_duration: Duration::from_millis(120),
                attack_damage: Some(PEA_DAMAGE),
                attack_interval: Some(SHOOTER_INTERVAL),
                projectile: None,
                width: 70.0,
                height: 70.0,
            },
            Self::Chomper => PlantStats {
                cost: 150,
                health: 300.0,
                card_recharge: Duration::from_millis(7_500),
                frame_count: 13,
                frame_duration: Duration::from_millis(150),
                attack_damage: Some(f32::INFINITY),
                attack_interval: None,
                projectile: None,
                width: 80.0,
                height: 90.0,
            },
            Self::PotatoMine => PlantStats {
                cost: 25,
                health: 300.0,
                card_recharge: Duration::from_millis(30_000),
                frame_count: 8,
                frame_duration: Duration::from_millis(200),
                attack_damage: None,
                attack_interval: None,
                projectile: None,
                width: 60.0,
                height: 45.0,
            },
        }
    }

    /// Reports whether the plant aims at zombies on a fixed cadence.
    #[must_use]
    pub const fn is_shooter(self) -> bool {
        let stats = self.stats();
        stats.attack_damage.is_some() && stats.attack_interval.is_some()
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlantKind {
    type Err = UnknownKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or(UnknownKindError(wanted))
    }
}

/// Zombies that can walk onto the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZombieKind {
    /// Regular zombie.
    Zombie,
    /// Flag bearer announcing a wave.
    FlagZombie,
    /// Zombie wearing a traffic cone.
    ConeheadZombie,
    /// Zombie wearing a bucket.
    BucketheadZombie,
    /// Zombie hiding behind a newspaper.
    NewspaperZombie,
}

/// Named animation states a zombie can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieAnimation {
    /// Walking toward the house.
    Walk,
    /// Chewing on a plant.
    Attack,
    /// Collapsing after defeat.
    Die,
    /// Charred by an explosion.
    BoomDie,
    /// Walking after losing the head.
    LostHead,
    /// Chewing after losing the head.
    LostHeadAttack,
    /// Walking after losing the newspaper.
    NoPaperWalk,
    /// Chewing after losing the newspaper.
    NoPaperAttack,
}

/// Frame timing of a single zombie animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationClip {
    /// Number of frames in the clip.
    pub frame_count: u32,
    /// Time each frame is shown.
    pub frame_duration: Duration,
    /// Whether the clip restarts after its last frame.
    pub looping: bool,
}

impl AnimationClip {
    const fn looping(frame_count: u32, millis: u64) -> Self {
        Self {
            frame_count,
            frame_duration: Duration::from_millis(millis),
            looping: true,
        }
    }

    const fn once(frame_count: u32, millis: u64) -> Self {
        Self {
            frame_count,
            frame_duration: Duration::from_millis(millis),
            looping: false,
        }
    }
}

/// Gameplay parameters describing a zombie type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZombieStats {
    /// Health when spawned.
    pub health: f32,
    /// Walking speed in pixels per second.
    pub speed: f32,
    /// Damage dealt per completed bite.
    pub damage: f32,
    /// Hitbox width in pixels.
    pub width: f32,
    /// Hitbox height in pixels.
    pub height: f32,
}

impl ZombieKind {
    /// Every zombie kind.
    pub const ALL: [ZombieKind; 5] = [
        Self::Zombie,
        Self::FlagZombie,
        Self::ConeheadZombie,
        Self::BucketheadZombie,
        Self::NewspaperZombie,
    ];

    /// Lower-case identifier used in configuration files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zombie => "zombie",
            Self::FlagZombie => "flagzombie",
            Self::ConeheadZombie => "coneheadzombie",
            Self::BucketheadZombie => "bucketheadzombie",
            Self::NewspaperZombie => "newspaperzombie",
        }
    }

    /// Gameplay parameters for the zombie.
    #[must_use]
    pub const fn stats(self) -> ZombieStats {
        match self {
            Self::Zombie => ZombieStats {
                health: 100.0,
                speed: 15.0,
                damage: 20.0,
                width: 70.0,
                height: 100.0,
            },
            Self::FlagZombie => ZombieStats {
                health: 100.0,
                speed: 20.0,
                damage: 20.0,
                width: 70.0,
                height: 100.0,
            },
            Self::ConeheadZombie => ZombieStats {
                health: 280.0,
                speed: 15.0,
                damage: 20.0,
                width: 75.0,
                height: 105.0,
            },
            Self::BucketheadZombie => ZombieStats {
                health: 500.0,
                speed: 15.0,
                damage: 20.0,
                width: 75.0,
                height: 105.0,
            },
            Self::NewspaperZombie => ZombieStats {
                health: 120.0,
                speed: 16.0,
                damage: 20.0,
                width: 80.0,
                height: 100.0,
            },
        }
    }

    /// Frame timing for the requested animation, if this zombie has one.
    #[must_use]
    pub const fn clip(self, animation: ZombieAnimation) -> Option<AnimationClip> {
        use ZombieAnimation as A;

        let clip = match (self, animation) {
            (Self::Zombie, A::Walk) => AnimationClip::looping(22, 120),
            (Self::Zombie, A::Attack) => AnimationClip::looping(21, 100),
            (Self::Zombie, A::Die) => AnimationClip::once(10, 150),
            (Self::Zombie, A::BoomDie) => AnimationClip::once(20, 100),
            (Self::Zombie, A::LostHead) => AnimationClip::looping(18, 120),
            (Self::Zombie, A::LostHeadAttack) => AnimationClip::looping(11, 100),
            (Self::ConeheadZombie, A::Walk) => AnimationClip::looping(21, 120),
            (Self::ConeheadZombie, A::Attack) => AnimationClip::looping(11, 100),
            (Self::BucketheadZombie, A::Walk) => AnimationClip::looping(15, 120),
            (Self::BucketheadZombie, A::Attack) => AnimationClip::looping(11, 100),
            (Self::FlagZombie, A::Walk) => AnimationClip::looping(12, 100),
            (Self::FlagZombie, A::Attack) => AnimationClip::looping(11, 100),
            (Self::FlagZombie, A::LostHead) => AnimationClip::looping(12, 100),
            (Self::FlagZombie, A::LostHeadAttack) => AnimationClip::looping(11, 100),
            (Self::NewspaperZombie, A::Walk) => AnimationClip::looping(18, 120),
            (Self::NewspaperZombie, A::Attack) => AnimationClip::looping(8, 100),
            (Self::NewspaperZombie, A::Die) => AnimationClip::once(11, 150),
            (Self::NewspaperZombie, A::LostHead) => AnimationClip::looping(16, 120),
            (Self::NewspaperZombie, A::LostHeadAttack) => AnimationClip::looping(7, 100),
            (Self::NewspaperZombie, A::NoPaperWalk) => AnimationClip::looping(14, 100),
            (Self::NewspaperZombie, A::NoPaperAttack) => AnimationClip::looping(7, 90),
            _ => return None,
        };
        Some(clip)
    }
}

impl fmt::Display for ZombieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZombieKind {
    type Err = UnknownKindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or(UnknownKindError(wanted))
    }
}

/// Projectiles launched by shooter plants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectileKind {
    /// Regular pea.
    Pea,
    /// Frozen pea.
    SnowPea,
    /// Spore fired by mushrooms.
    Mushroom,
}

impl ProjectileKind {
    /// Distance travelled per logic step in pixels.
    pub const SPEED: f32 = 7.0;
    /// Hitbox width in pixels.
    pub const WIDTH: f32 = 22.0;
    /// Hitbox height in pixels.
    pub const HEIGHT: f32 = 20.0;
    /// Horizontal offset of the muzzle from the plant centre.
    pub const MUZZLE_OFFSET_X: f32 = 10.0;
    /// Vertical lift of the muzzle above the plant centre, excluding half the projectile height.
    pub const MUZZLE_LIFT_Y: f32 = 35.0;
}

/// Raised when a textual kind does not match any catalogue entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown kind '{0}'")]
pub struct UnknownKindError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_indices_follow_card_bar_order() {
        for (position, kind) in PlantKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), position);
        }
    }

    #[test]
    fn plant_names_parse_back() {
        for kind in PlantKind::ALL {
            assert_eq!(kind.name().parse::<PlantKind>(), Ok(kind));
        }
        assert_eq!(" PeaShooter ".parse::<PlantKind>(), Ok(PlantKind::Peashooter));
        assert!("puffshroom".parse::<PlantKind>().is_err());
    }

    #[test]
    fn only_pea_plants_carry_projectiles() {
        let shooters: Vec<_> = PlantKind::ALL
            .into_iter()
            .filter(|kind| kind.stats().projectile.is_some())
            .collect();
        assert_eq!(shooters, vec![PlantKind::Peashooter, PlantKind::SnowPeashooter]);
        assert!(PlantKind::ThreePeashooter.is_shooter());
        assert!(!PlantKind::Chomper.is_shooter());
    }

    #[test]
    fn every_zombie_walks_and_attacks() {
        for kind in ZombieKind::ALL {
            assert!(kind.clip(ZombieAnimation::Walk).is_some(), "{kind} walks");
            assert!(kind.clip(ZombieAnimation::Attack).is_some(), "{kind} attacks");
        }
        assert_eq!(ZombieKind::ConeheadZombie.clip(ZombieAnimation::Die), None);
    }
}
