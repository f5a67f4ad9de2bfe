use avanto_render_bridge::{ParticlePair, Rgba8};
use avanto_structs::{Mat4, Transform3D, Vec3};
use rand::Rng;
use std::f32::consts::PI;

/// Particles are born at the bottom of the i8 range and rise from there.
const SPAWN_Y: i32 = -128;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteamParams {
    /// Total rise in local units; particles are culled at `height - 128`.
    pub height: u8,
    /// Seconds a particle takes to rise `height`. Must be positive.
    pub time_to_rise: f32,
    /// Alive cap; `None` uses the whole buffer.
    pub max_particles: Option<usize>,
    pub x_range: i8,
    pub z_range: i8,
    pub movement_amplitude: f32,
    pub particle_size: i8,
    pub color: Rgba8,
}

impl Default for SteamParams {
    fn default() -> Self {
        Self {
            height: 255,
            time_to_rise: 2.0,
            max_particles: None,
            x_range: 16,
            z_range: 16,
            movement_amplitude: 4.0,
            particle_size: 8,
            color: [0xff; 4],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum EffectKind {
    #[default]
    Unconfigured,
    Steam(SteamParams),
}

/// Spawn centre of one particle, kept beside the packed records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ParticleMeta {
    pub cx: i8,
    pub cz: i8,
}

/// One emitter's storage and simulation state.
#[derive(Clone, Debug)]
pub struct ParticleSource {
    kind: EffectKind,
    pairs: Vec<ParticlePair>,
    meta: Vec<ParticleMeta>,
    transform: Mat4,
    y_move_error: f32,
    to_spawn: f32,
    alive: usize,
    capacity: usize,
    max_particles: usize,
    pub paused: bool,
    pub visible: bool,
    pub position: Vec3,
    pub scale: f32,
}

impl ParticleSource {
    /// Zeroed storage for `capacity` particles, two per record. An odd
    /// capacity leaves the B half of the last record unused.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let pairs = capacity.div_ceil(2);
        Self {
            kind: EffectKind::Unconfigured,
            pairs: vec![ParticlePair::default(); pairs],
            meta: vec![ParticleMeta::default(); pairs * 2],
            transform: Mat4::IDENTITY,
            y_move_error: 0.0,
            to_spawn: 0.0,
            alive: 0,
            capacity,
            max_particles: capacity,
            paused: false,
            visible: false,
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    pub fn set_max_particles(&mut self, max: usize) {
        if max > self.capacity() {
            log::warn!(
                "particle max {max} exceeds capacity {}, clamped",
                self.capacity()
            );
        }
        self.max_particles = max.min(self.capacity());
        self.to_spawn = self.to_spawn.min(self.max_particles as f32);
    }

    pub fn alive_count(&self) -> usize {
        self.alive
    }

    pub fn pairs(&self) -> &[ParticlePair] {
        &self.pairs
    }

    pub fn meta(&self) -> &[ParticleMeta] {
        &self.meta
    }

    pub fn transform(&self) -> Mat4 {
        self.transform
    }

    pub fn y_move_error(&self) -> f32 {
        self.y_move_error
    }

    pub fn pending_spawns(&self) -> f32 {
        self.to_spawn
    }

    /// Configures the steam effect and starts it from empty.
    pub fn init_steam(&mut self, params: SteamParams) {
        debug_assert!(params.time_to_rise > 0.0, "time_to_rise must be positive");
        debug_assert!(
            params.x_range >= 0 && params.z_range >= 0,
            "spawn ranges must be non-negative"
        );
        self.reset();
        for pair in &mut self.pairs {
            pair.color_a = params.color;
            pair.color_b = params.color;
        }
        self.kind = EffectKind::Steam(params);
        self.max_particles = self.capacity();
        if let Some(max) = params.max_particles {
            self.set_max_particles(max);
        }
        self.paused = false;
        self.visible = true;
        self.refresh_transform();
    }

    /// Kills every particle and clears the accumulators. Configuration and
    /// colours stay.
    pub fn reset(&mut self) {
        for pair in &mut self.pairs {
            pair.size_a = 0;
            pair.size_b = 0;
        }
        self.y_move_error = 0.0;
        self.to_spawn = 0.0;
        self.alive = 0;
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, delta_time: f32) {
        if self.paused {
            return;
        }
        match self.kind {
            EffectKind::Unconfigured => {}
            EffectKind::Steam(params) => self.tick_steam(&params, rng, delta_time),
        }
    }

    fn tick_steam<R: Rng + ?Sized>(&mut self, params: &SteamParams, rng: &mut R, delta_time: f32) {
        let height = i32::from(params.height);
        self.y_move_error += height as f32 / params.time_to_rise * delta_time;
        let y_move = self.y_move_error as i32;
        self.y_move_error -= y_move as f32;

        let max = self.max_particles;
        self.to_spawn = (self.to_spawn + max as f32 / params.time_to_rise * delta_time).min(max as f32);
        let mut quota = self.to_spawn as usize;
        let mut spawned = 0usize;
        let mut alive = self.alive;
        let ceiling = height + SPAWN_Y;
        let capacity = self.capacity;

        for (index, (pair, metas)) in self
            .pairs
            .iter_mut()
            .zip(self.meta.chunks_exact_mut(2))
            .enumerate()
        {
            let ParticlePair {
                pos_a,
                size_a,
                pos_b,
                size_b,
                ..
            } = pair;
            let [meta_a, meta_b] = metas else {
                continue;
            };

            let slots = [(pos_a, size_a, meta_a), (pos_b, size_b, meta_b)];
            let usable = (capacity - index * 2).min(2);
            for (pos, size, meta) in slots.into_iter().take(usable) {
                if *size != 0 {
                    let y = i32::from(pos[1]) + y_move;
                    if y >= ceiling {
                        *size = 0;
                        alive -= 1;
                    } else {
                        place(pos, meta, y, params.movement_amplitude);
                    }
                }
                if *size == 0 && quota > 0 && alive < max {
                    meta.cx = rng.gen_range(-params.x_range..=params.x_range);
                    meta.cz = rng.gen_range(-params.z_range..=params.z_range);
                    *size = params.particle_size;
                    place(pos, meta, SPAWN_Y, params.movement_amplitude);
                    quota -= 1;
                    spawned += 1;
                    alive += 1;
                }
            }
        }

        self.alive = alive;
        self.to_spawn -= spawned as f32;
        self.refresh_transform();
    }

    fn refresh_transform(&mut self) {
        self.transform = Transform3D::from_uniform_scale(self.position, self.scale).to_mat4();
    }
}

/// Sets the height and the sinusoidal drift around the spawn centre.
fn place(pos: &mut [i8; 3], meta: &ParticleMeta, y: i32, amplitude: f32) {
    let phase = y as f32 / PI;
    pos[0] = (f32::from(meta.cx) + phase.sin() * amplitude) as i8;
    pos[1] = y as i8;
    pos[2] = (f32::from(meta.cz) + phase.cos() * amplitude) as i8;
}
