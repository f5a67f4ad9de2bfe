use crate::ParticleSource;
use avanto_ids::ParticleSourceID;
use avanto_render_bridge::RenderBridge;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub const DEFAULT_MAX_SOURCES: usize = 8;

/// Fixed set of emitter slots. Never grows: when every slot is taken,
/// `acquire` returns `None` and the effect is skipped.
pub struct ParticlePool {
    slots: Vec<Option<ParticleSource>>,
    generations: Vec<u32>,
    free_indices: Vec<usize>,
    rng: StdRng,
}

impl ParticlePool {
    pub fn new(max_sources: usize, seed: u64) -> Self {
        Self {
            slots: (0..max_sources).map(|_| None).collect(),
            generations: vec![0; max_sources],
            // Popped from the back, so slot 0 is handed out first.
            free_indices: (0..max_sources).rev().collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn max_sources(&self) -> usize {
        self.slots.len()
    }

    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free_indices.len()
    }

    /// Claims a free slot with zeroed storage for `capacity` particles.
    pub fn acquire(&mut self, capacity: usize) -> Option<ParticleSourceID> {
        let Some(index) = self.free_indices.pop() else {
            log::warn!(
                "particle pool exhausted ({} sources), effect skipped",
                self.slots.len()
            );
            return None;
        };
        self.slots[index] = Some(ParticleSource::with_capacity(capacity));
        let id = ParticleSourceID::from_parts(index as u32, self.generations[index]);
        log::debug!("particle source {id} acquired, capacity {capacity}");
        Some(id)
    }

    fn live_index(&self, id: ParticleSourceID) -> Option<usize> {
        let index = id.index() as usize;
        if !id.is_valid()
            || index >= self.slots.len()
            || self.generations[index] != id.generation()
            || self.slots[index].is_none()
        {
            return None;
        }
        Some(index)
    }

    /// Frees the slot and bumps its generation. Stale handles return false.
    pub fn release(&mut self, id: ParticleSourceID) -> bool {
        let Some(index) = self.live_index(id) else {
            return false;
        };
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.slots[index] = None;
        self.free_indices.push(index);
        log::debug!("particle source {id} released");
        true
    }

    pub fn release_all(&mut self) {
        let live: Vec<ParticleSourceID> = self.iter().map(|(id, _)| id).collect();
        for id in live {
            self.release(id);
        }
    }

    pub fn contains(&self, id: ParticleSourceID) -> bool {
        self.live_index(id).is_some()
    }

    pub fn get(&self, id: ParticleSourceID) -> Option<&ParticleSource> {
        let index = self.live_index(id)?;
        self.slots[index].as_ref()
    }

    pub fn get_mut(&mut self, id: ParticleSourceID) -> Option<&mut ParticleSource> {
        let index = self.live_index(id)?;
        self.slots[index].as_mut()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParticleSourceID, &ParticleSource)> {
        self.slots
            .iter()
            .zip(self.generations.iter())
            .enumerate()
            .filter_map(|(index, (slot, &generation))| {
                slot.as_ref()
                    .map(|s| (ParticleSourceID::from_parts(index as u32, generation), s))
            })
    }

    /// No-op for stale handles.
    pub fn tick(&mut self, id: ParticleSourceID, delta_time: f32) {
        if let Some(index) = self.live_index(id)
            && let Some(source) = self.slots[index].as_mut()
        {
            source.tick(&mut self.rng, delta_time);
        }
    }

    /// Advances every live source with the same step.
    pub fn tick_all(&mut self, delta_time: f32) {
        for source in self.slots.iter_mut().flatten() {
            source.tick(&mut self.rng, delta_time);
        }
    }

    /// Read-only; hidden sources are skipped.
    pub fn draw(&self, id: ParticleSourceID, renderer: &mut dyn RenderBridge) {
        if let Some(source) = self.get(id)
            && source.visible
        {
            renderer.submit_particles(id, source.transform().to_cols_array_2d(), source.pairs());
        }
    }

    pub fn draw_all(&self, renderer: &mut dyn RenderBridge) {
        for (id, source) in self.iter() {
            if source.visible {
                renderer.submit_particles(id, source.transform().to_cols_array_2d(), source.pairs());
            }
        }
    }
}

impl Default for ParticlePool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SOURCES, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SteamParams;
    use avanto_render_bridge::{NullGraphics, RenderCommand};

    #[test]
    fn acquire_hands_out_distinct_slots() {
        let mut pool = ParticlePool::new(3, 0);
        let a = pool.acquire(8).expect("slot");
        let b = pool.acquire(8).expect("slot");
        let c = pool.acquire(8).expect("slot");
        assert_eq!(a.index(), 0);
        assert_ne!(a.index(), b.index());
        assert_ne!(b.index(), c.index());
        assert_ne!(a.index(), c.index());
        assert_eq!(pool.in_use(), 3);
    }

    #[test]
    fn exhausted_pool_returns_none() {
        let mut pool = ParticlePool::new(2, 0);
        assert!(pool.acquire(4).is_some());
        assert!(pool.acquire(4).is_some());
        assert!(pool.acquire(4).is_none());
        assert_eq!(pool.in_use(), 2);
    }

    #[test]
    fn release_then_acquire_reuses_zeroed_slot() {
        let mut pool = ParticlePool::new(1, 0);
        let first = pool.acquire(16).expect("slot");
        if let Some(source) = pool.get_mut(first) {
            source.init_steam(SteamParams::default());
        }
        pool.tick(first, 0.4);
        assert!(pool.get(first).is_some_and(|s| s.alive_count() > 0));

        assert!(pool.release(first));
        assert!(!pool.release(first));
        let second = pool.acquire(16).expect("slot");
        assert_eq!(second.index(), first.index());
        assert_eq!(second.generation(), first.generation() + 1);

        let source = pool.get(second).expect("live");
        assert_eq!(source.alive_count(), 0);
        assert_eq!(source.y_move_error(), 0.0);
        assert_eq!(source.pending_spawns(), 0.0);
    }

    #[test]
    fn stale_handle_cannot_reach_new_owner() {
        let mut pool = ParticlePool::new(1, 0);
        let stale = pool.acquire(4).expect("slot");
        pool.release(stale);
        let fresh = pool.acquire(4).expect("slot");
        assert!(pool.get(stale).is_none());
        assert!(!pool.contains(stale));
        assert!(pool.contains(fresh));
        assert!(!pool.release(stale));
        assert!(pool.contains(fresh));
    }

    #[test]
    fn tick_all_advances_every_source() {
        let mut pool = ParticlePool::new(4, 11);
        let ids: Vec<_> = (0..3).filter_map(|_| pool.acquire(16)).collect();
        for &id in &ids {
            if let Some(source) = pool.get_mut(id) {
                source.init_steam(SteamParams::default());
            }
        }
        pool.tick_all(0.25);
        for &id in &ids {
            assert!(pool.get(id).is_some_and(|s| s.alive_count() > 0));
        }
    }

    #[test]
    fn same_seed_same_particles() {
        let run = |seed| {
            let mut pool = ParticlePool::new(1, seed);
            let id = pool.acquire(32).expect("slot");
            if let Some(source) = pool.get_mut(id) {
                source.init_steam(SteamParams::default());
            }
            for _ in 0..20 {
                pool.tick_all(1.0 / 30.0);
            }
            pool.get(id).map(|s| s.meta().to_vec()).unwrap_or_default()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn draw_is_read_only_and_respects_visibility() {
        let mut pool = ParticlePool::new(2, 0);
        let shown = pool.acquire(8).expect("slot");
        let hidden = pool.acquire(8).expect("slot");
        for id in [shown, hidden] {
            if let Some(source) = pool.get_mut(id) {
                source.init_steam(SteamParams::default());
            }
        }
        if let Some(source) = pool.get_mut(hidden) {
            source.visible = false;
        }
        pool.tick_all(0.3);
        let before = pool.get(shown).map(|s| s.pairs().to_vec());

        let mut gfx = NullGraphics::new();
        pool.draw_all(&mut gfx);
        pool.draw_all(&mut gfx);
        gfx.present();

        assert_eq!(pool.get(shown).map(|s| s.pairs().to_vec()), before);
        let batches: Vec<_> = gfx
            .last_frame()
            .iter()
            .filter_map(|c| match c {
                RenderCommand::Particles(b) => Some(b.source),
                _ => None,
            })
            .collect();
        assert_eq!(batches, vec![shown, shown]);
    }

    #[test]
    fn odd_capacity_fills_every_requested_particle() {
        let mut pool = ParticlePool::new(2, 0);
        let id = pool.acquire(7).expect("slot");
        if let Some(source) = pool.get_mut(id) {
            source.init_steam(SteamParams::default());
        }
        for _ in 0..90 {
            pool.tick_all(1.0 / 30.0);
        }
        let source = pool.get(id).expect("live");
        assert_eq!(source.capacity(), 7);
        assert_eq!(source.alive_count(), 7);
        assert_eq!(source.pairs().last().map(|p| p.size_b), Some(0));
    }

    #[test]
    fn release_all_frees_everything() {
        let mut pool = ParticlePool::new(3, 0);
        let ids: Vec<_> = (0..3).filter_map(|_| pool.acquire(4)).collect();
        pool.release_all();
        assert_eq!(pool.in_use(), 0);
        assert!(ids.iter().all(|&id| !pool.contains(id)));
        assert!(pool.acquire(4).is_some());
    }
}
