/// The live entity set and its end-of-frame removal queue.
///
/// Nothing is taken out of `entities` while a pass is iterating over it:
/// removals are queued with [`World::remove`] and applied all at once by
/// [`World::flush_removals`].

use std::collections::HashSet;

use crate::entities::{Entity, EntityId, EntityKind, FrameEvent};

#[derive(Debug, Default)]
pub struct World {
    entities: Vec<Entity>,
    pending: HashSet<EntityId>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and hand back its id.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        entity.set_id(id);
        self.entities.push(entity);
        id
    }

    /// Queue an entity for removal.  Repeated requests are harmless.
    pub fn remove(&mut self, id: EntityId) {
        self.pending.insert(id);
    }

    pub fn is_pending_removal(&self, id: EntityId) -> bool {
        self.pending.contains(&id)
    }

    /// Drop every queued entity and clear the queue.  Returns how many left.
    pub fn flush_removals(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let before = self.entities.len();
        let pending = std::mem::take(&mut self.pending);
        self.entities.retain(|e| !pending.contains(&e.id()));
        before - self.entities.len()
    }

    /// Forget every entity, queued removals included.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.is(kind)).count()
    }

    /// Brute force: test every unordered pair once (p < s) and let both
    /// sides react, `p` first.
    pub fn scan_collisions(&self, events: &mut Vec<FrameEvent>) {
        for p in 0..self.entities.len() {
            for s in (p + 1)..self.entities.len() {
                let me = &self.entities[p];
                let him = &self.entities[s];

                if me.collides_with(him) {
                    me.collided_with(him, events);
                    him.collided_with(me, events);
                }
            }
        }
    }
}
