/// Game entities: the ship, the alien swarm and the player's shots.
///
/// Every entity shares the same position / velocity / bounds contract; the
/// per-kind policies (wall clamping, swarm edge detection, off-screen
/// cleanup, collision reactions) are a `match` on [`EntityKind`].  Entities
/// never touch the world or the session directly; anything that has to
/// happen outside the entity itself is reported as a [`FrameEvent`] and
/// applied once the frame's scan is over.

use std::rc::Rc;

use crate::consts::{ALIEN_DROP, ALIEN_SPEED, LEFT_WALL, RIGHT_WALL, SHOT_CEILING, SHOT_SPEED};
use crate::sprite::Sprite;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Alien,
    Shot,
}

/// Something an entity asked for during the movement or collision pass.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// An alien hit a wall: the whole swarm must reverse this frame.
    LogicRequired,
    /// Take this entity out of the world at the end of the frame.
    Remove(EntityId),
    /// A shot destroyed this alien.
    AlienKilled(EntityId),
    /// The ship touched an alien.
    ShipDestroyed,
}

#[derive(Clone, Debug)]
pub struct Entity {
    id: EntityId,
    pub kind: EntityKind,
    /// Fractional so slow movers don't lose sub-pixel progress between frames.
    pub x: f64,
    pub y: f64,
    /// Horizontal speed (pixels/sec).
    pub dx: f64,
    /// Vertical speed (pixels/sec).
    pub dy: f64,
    sprite: Rc<Sprite>,
}

impl Entity {
    fn new(kind: EntityKind, sprite: Rc<Sprite>, x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Entity {
            id: EntityId(0),
            kind,
            x,
            y,
            dx,
            dy,
            sprite,
        }
    }

    /// A stationary ship; its velocity comes from player input.
    pub fn ship(sprite: Rc<Sprite>, x: f64, y: f64) -> Self {
        Self::new(EntityKind::Ship, sprite, x, y, 0.0, 0.0)
    }

    /// An alien already marching left at the base speed.
    pub fn alien(sprite: Rc<Sprite>, x: f64, y: f64) -> Self {
        Self::new(EntityKind::Alien, sprite, x, y, -ALIEN_SPEED, 0.0)
    }

    /// A shot travelling straight up.
    pub fn shot(sprite: Rc<Sprite>, x: f64, y: f64) -> Self {
        Self::new(EntityKind::Shot, sprite, x, y, 0.0, SHOT_SPEED)
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }

    pub fn sprite(&self) -> &Rc<Sprite> {
        &self.sprite
    }

    pub fn is(&self, kind: EntityKind) -> bool {
        self.kind == kind
    }

    fn moving_into_wall(&self) -> bool {
        (self.dx < 0.0 && self.x < LEFT_WALL) || (self.dx > 0.0 && self.x > RIGHT_WALL)
    }

    fn integrate(&mut self, delta_ms: u64) {
        let delta = delta_ms as f64;
        self.x += delta * self.dx / 1000.0;
        self.y += delta * self.dy / 1000.0;
    }

    /// Advance by `delta_ms` milliseconds of game time.
    pub fn move_by(&mut self, delta_ms: u64, events: &mut Vec<FrameEvent>) {
        match self.kind {
            EntityKind::Ship => {
                if self.moving_into_wall() {
                    return;
                }
                self.integrate(delta_ms);
            }
            EntityKind::Alien => {
                // Only flag the edge; the swarm turns together in the logic pass.
                if self.moving_into_wall() {
                    events.push(FrameEvent::LogicRequired);
                }
                self.integrate(delta_ms);
            }
            EntityKind::Shot => {
                self.integrate(delta_ms);
                if self.y < SHOT_CEILING {
                    events.push(FrameEvent::Remove(self.id));
                }
            }
        }
    }

    /// Integer-truncated bounding box: (left, top, width, height).
    pub fn bounds(&self) -> (i32, i32, i32, i32) {
        (
            self.x as i32,
            self.y as i32,
            self.sprite.width(),
            self.sprite.height(),
        )
    }

    /// Axis-aligned overlap test.  Edges that only touch do not count.
    pub fn collides_with(&self, other: &Entity) -> bool {
        let (ax, ay, aw, ah) = self.bounds();
        let (bx, by, bw, bh) = other.bounds();
        if aw <= 0 || ah <= 0 || bw <= 0 || bh <= 0 {
            return false;
        }
        ax < bx + bw && bx < ax + aw && ay < by + bh && by < ay + ah
    }

    /// This entity's own reaction to having hit `other`.
    pub fn collided_with(&self, other: &Entity, events: &mut Vec<FrameEvent>) {
        match (self.kind, other.kind) {
            (EntityKind::Ship, EntityKind::Alien) => events.push(FrameEvent::ShipDestroyed),
            (EntityKind::Shot, EntityKind::Alien) => {
                events.push(FrameEvent::Remove(self.id));
                events.push(FrameEvent::Remove(other.id));
                events.push(FrameEvent::AlienKilled(other.id));
            }
            _ => {}
        }
    }

    /// Swarm reversal: turn around and step down.  Only aliens react.
    pub fn do_logic(&mut self) {
        if self.kind == EntityKind::Alien {
            self.dx = -self.dx;
            self.y += ALIEN_DROP;
        }
    }
}
