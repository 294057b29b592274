//! Projectiles travelling down the lawn rows.

use garden_defence_core::{
    LawnPoint, PlantId, ProjectileId, ProjectileKind, ProjectileSnapshot,
};

use crate::zombies::Zombie;

/// Projectile launched by a shooter plant. The position marks its top-left corner.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) kind: ProjectileKind,
    pub(crate) plant: PlantId,
    pub(crate) position: LawnPoint,
    pub(crate) speed: f32,
    pub(crate) damage: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Projectile {
    /// Launches a projectile from the muzzle of a plant centred at `origin`.
    pub(crate) fn launch(
        id: ProjectileId,
        kind: ProjectileKind,
        plant: PlantId,
        origin: LawnPoint,
        damage: f32,
    ) -> Self {
        let height = ProjectileKind::HEIGHT;
        Self {
            id,
            kind,
            plant,
            position: LawnPoint::new(
                origin.x + ProjectileKind::MUZZLE_OFFSET_X,
                origin.y - height / 2.0 - ProjectileKind::MUZZLE_LIFT_Y,
            ),
            speed: ProjectileKind::SPEED,
            damage,
            width: ProjectileKind::WIDTH,
            height,
        }
    }

    pub(crate) fn advance(&mut self) {
        self.position.x += self.speed;
    }

    /// Axis-aligned overlap test against a zombie hitbox centred on its position.
    pub(crate) fn hits(&self, zombie: &Zombie) -> bool {
        let left = self.position.x;
        let right = left + self.width;
        let top = self.position.y;
        let bottom = top + self.height;

        let zombie_left = zombie.position.x - zombie.half_width();
        let zombie_right = zombie.position.x + zombie.half_width();
        let zombie_top = zombie.position.y - zombie.half_height();
        let zombie_bottom = zombie.position.y + zombie.half_height();

        right > zombie_left && left < zombie_right && bottom > zombie_top && top < zombie_bottom
    }

    /// Reports whether the projectile flew fully past the right edge of the playfield.
    pub(crate) fn is_off_screen(&self, playfield_width: f32) -> bool {
        self.position.x > playfield_width + self.width
    }

    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            kind: self.kind,
            plant: self.plant,
            position: self.position,
            damage: self.damage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_defence_core::{ZombieId, ZombieKind};

    fn pea_from(x: f32, y: f32) -> Projectile {
        Projectile::launch(
            ProjectileId::new(0),
            ProjectileKind::Pea,
            PlantId::new(0),
            LawnPoint::new(x, y),
            20.0,
        )
    }

    #[test]
    fn launch_places_projectile_at_muzzle() {
        let pea = pea_from(179.0, 130.0);
        assert!((pea.position.x - 189.0).abs() < f32::EPSILON);
        assert!((pea.position.y - 85.0).abs() < f32::EPSILON);
    }

    #[test]
    fn projectile_hits_zombie_in_the_same_row() {
        let zombie = Zombie::new(
            ZombieId::new(0),
            ZombieKind::Zombie,
            0,
            LawnPoint::new(250.0, 130.0),
        );
        let mut pea = pea_from(179.0, 130.0);
        assert!(!pea.hits(&zombie), "pea spans 189..211, zombie starts at 215");
        pea.advance();
        assert!(pea.hits(&zombie));
    }

    #[test]
    fn projectile_misses_zombie_in_another_row() {
        let zombie = Zombie::new(
            ZombieId::new(0),
            ZombieKind::Zombie,
            1,
            LawnPoint::new(200.0, 230.0),
        );
        let pea = pea_from(179.0, 130.0);
        assert!(!pea.hits(&zombie));
    }

    #[test]
    fn off_screen_only_after_full_width_past_edge() {
        let mut pea = pea_from(970.0, 130.0);
        assert!(!pea.is_off_screen(1000.0));
        pea.position.x = 1022.5;
        assert!(pea.is_off_screen(1000.0));
    }
}
