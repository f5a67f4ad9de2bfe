use crate::roster::{self, MOTION_CLIPS};
use avanto_bark::{AudioBackend, SfxChannels};
use avanto_ids::{ActorID, ControllerPort, MusicID, SoundID};
use avanto_nodes::{Actor, AnimationPlayer, ClipTablePlayer};
use avanto_particles::ParticlePool;
use avanto_project::{GameConfig, MinigameInfo};
use avanto_structs::GroundProfile;
use avanto_timeline::{MotionClips, Progress, TimelineCursor, TimelineHost};

/// Everything one play session owns. Created when the game starts and
/// dropped when it ends; stages borrow it through their context.
pub struct Session {
    pub actors: Vec<Actor>,
    pub animation: ClipTablePlayer,
    pub particles: ParticlePool,
    pub sfx: SfxChannels,
    pub ground: GroundProfile,
    pub info: MinigameInfo,
    players: u8,
    motion: MotionClips,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Self::with_actors(config, roster::player_actors())
    }

    pub fn with_actors(config: &GameConfig, actors: Vec<Actor>) -> Self {
        log::info!(
            "session start: {} ({} human players)",
            config.game.info.name,
            config.game.players
        );
        Self {
            animation: ClipTablePlayer::new(),
            actors,
            particles: ParticlePool::new(config.particles.max_sources, config.particles.seed),
            sfx: SfxChannels::new(config.audio.first_sfx_channel, config.audio.sfx_channels),
            ground: GroundProfile::flat(),
            info: config.game.info.clone(),
            players: config.game.players,
            motion: MOTION_CLIPS,
        }
    }

    /// Number of human-controlled participants.
    pub fn players(&self) -> u8 {
        self.players
    }

    pub fn player_ports(&self) -> impl Iterator<Item = ControllerPort> + use<> {
        (0..self.players).map(ControllerPort)
    }

    pub fn is_human(&self, actor: ActorID) -> bool {
        actor.0 < self.players
    }

    pub fn actor(&self, id: ActorID) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    pub fn actor_mut(&mut self, id: ActorID) -> Option<&mut Actor> {
        self.actors.get_mut(id.index())
    }

    pub fn set_motion_clips(&mut self, motion: MotionClips) {
        self.motion = motion;
    }

    /// Runs `cursor` against its actor. A cursor pointing at a missing
    /// actor reports `Finished`.
    pub fn advance(
        &mut self,
        cursor: &mut TimelineCursor,
        audio: &mut dyn AudioBackend,
        delta_time: f32,
    ) -> Progress {
        let Some(actor) = self.actors.get_mut(cursor.actor().index()) else {
            return Progress::Finished;
        };
        let mut host = SessionHost {
            animation: &mut self.animation,
            sfx: &mut self.sfx,
            audio,
            motion: self.motion,
        };
        cursor.advance(actor, &mut host, delta_time)
    }

    /// Starts a one-shot effect on the next reserved channel.
    pub fn play_sound(&mut self, audio: &mut dyn AudioBackend, sound: SoundID) {
        let channel = self.sfx.next_channel();
        audio.play_sound(sound, channel);
    }

    pub fn ground_height(&self, z: f32) -> f32 {
        self.ground.height_at(z)
    }

    /// Puts every actor's feet on the ground profile.
    pub fn settle_on_ground(&mut self) {
        for actor in &mut self.actors {
            actor.position.y = self.ground.height_at(actor.position.z);
        }
    }

    pub fn alive_players(&self) -> usize {
        self.actors.iter().filter(|a| !a.eliminated).count()
    }
}

struct SessionHost<'a> {
    animation: &'a mut ClipTablePlayer,
    sfx: &'a mut SfxChannels,
    audio: &'a mut dyn AudioBackend,
    motion: MotionClips,
}

impl TimelineHost for SessionHost<'_> {
    fn animation(&mut self) -> &mut dyn AnimationPlayer {
        &mut *self.animation
    }

    fn motion_clips(&self) -> MotionClips {
        self.motion
    }

    fn play_sound(&mut self, sound: SoundID) {
        let channel = self.sfx.next_channel();
        self.audio.play_sound(sound, channel);
    }

    fn play_music(&mut self, music: MusicID, first_channel: u8) {
        self.audio.play_music(music, first_channel);
    }
}
