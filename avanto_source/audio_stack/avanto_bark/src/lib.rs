use avanto_ids::{MusicID, SoundID};

mod channels;

pub use channels::{DEFAULT_FIRST_SFX_CHANNEL, DEFAULT_SFX_CHANNELS, MIXER_CHANNELS, SfxChannels};

/// Audio collaborator. Every call is a trigger; nothing waits on playback.
pub trait AudioBackend {
    fn play_sound(&mut self, sound: SoundID, channel: u8);
    fn play_music(&mut self, music: MusicID, first_channel: u8);
    fn stop_music(&mut self);
    /// 0..=1, applied to every channel.
    fn set_master_volume(&mut self, volume: f32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    Sound { sound: SoundID, channel: u8 },
    Music { music: MusicID, first_channel: u8 },
    StopMusic,
    Volume(f32),
}

/// Silent backend that remembers what it was asked to do.
#[derive(Debug, Clone)]
pub struct NullAudio {
    events: Vec<AudioEvent>,
    master_volume: f32,
    music: Option<MusicID>,
}

impl Default for NullAudio {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            master_volume: 1.0,
            music: None,
        }
    }
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AudioEvent] {
        &self.events
    }

    pub fn drain_events(&mut self, out: &mut Vec<AudioEvent>) {
        out.append(&mut self.events);
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    pub fn music(&self) -> Option<MusicID> {
        self.music
    }

    pub fn sounds(&self) -> impl Iterator<Item = (SoundID, u8)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            AudioEvent::Sound { sound, channel } => Some((sound, channel)),
            _ => None,
        })
    }
}

impl AudioBackend for NullAudio {
    fn play_sound(&mut self, sound: SoundID, channel: u8) {
        self.events.push(AudioEvent::Sound { sound, channel });
    }

    fn play_music(&mut self, music: MusicID, first_channel: u8) {
        self.music = Some(music);
        self.events.push(AudioEvent::Music {
            music,
            first_channel,
        });
    }

    fn stop_music(&mut self) {
        self.music = None;
        self.events.push(AudioEvent::StopMusic);
    }

    fn set_master_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        log::debug!("master volume {volume:.2}");
        self.master_volume = volume;
        self.events.push(AudioEvent::Volume(volume));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let mut audio = NullAudio::new();
        audio.play_music(MusicID::new(0), 0);
        audio.play_sound(SoundID::new(2), 27);
        audio.set_master_volume(0.2);
        audio.stop_music();
        assert_eq!(
            audio.events(),
            &[
                AudioEvent::Music {
                    music: MusicID::new(0),
                    first_channel: 0
                },
                AudioEvent::Sound {
                    sound: SoundID::new(2),
                    channel: 27
                },
                AudioEvent::Volume(0.2),
                AudioEvent::StopMusic,
            ]
        );
        assert_eq!(audio.music(), None);
        assert_eq!(audio.master_volume(), 0.2);
    }

    #[test]
    fn volume_is_clamped() {
        let mut audio = NullAudio::new();
        audio.set_master_volume(3.0);
        assert_eq!(audio.master_volume(), 1.0);
    }

    #[test]
    fn drain_empties_the_log() {
        let mut audio = NullAudio::new();
        audio.play_sound(SoundID::new(1), 28);
        let mut out = Vec::new();
        audio.drain_events(&mut out);
        assert_eq!(out.len(), 1);
        assert!(audio.events().is_empty());
        assert_eq!(audio.sounds().count(), 0);
    }
}
