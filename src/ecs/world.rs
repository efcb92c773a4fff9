//! ECS World - owns digestion components and the solutions they reference

use ahash::AHashMap;

use crate::body::stomach::Stomach;
use crate::chemistry::registry::SolutionRegistry;
use crate::core::config::DigestionConfig;
use crate::core::types::{EntityId, Tick};

/// The simulation world as the digestion layer sees it
///
/// The host engine owns full entity storage and query indexing; this world
/// carries only what digestion needs: the stomach components, each organ's
/// optional parent-body link, and the solution registry. Systems receive it
/// whole and iterate the component maps directly.
pub struct World {
    pub current_tick: Tick,
    pub config: DigestionConfig,
    pub stomachs: AHashMap<EntityId, Stomach>,
    /// Organ -> parent body. An absent entry means the organ is detached
    pub body_links: AHashMap<EntityId, EntityId>,
    pub solutions: SolutionRegistry,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(DigestionConfig::default())
    }

    pub fn with_config(config: DigestionConfig) -> Self {
        Self {
            current_tick: 0,
            config,
            stomachs: AHashMap::new(),
            body_links: AHashMap::new(),
            solutions: SolutionRegistry::new(),
        }
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }

    /// Attach an organ to a parent body
    pub fn set_body_link(&mut self, organ: EntityId, body: EntityId) {
        self.body_links.insert(organ, body);
    }

    /// Detach an organ from its parent body
    pub fn clear_body_link(&mut self, organ: EntityId) {
        self.body_links.remove(&organ);
    }

    pub fn body_of(&self, organ: EntityId) -> Option<EntityId> {
        self.body_links.get(&organ).copied()
    }

    /// Remove an entity and everything it owns
    ///
    /// Organs attached to a despawned body are detached as well.
    pub fn despawn(&mut self, entity: EntityId) {
        self.stomachs.remove(&entity);
        self.body_links.remove(&entity);
        self.body_links.retain(|_, body| *body != entity);
        self.solutions.remove_entity(entity);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
