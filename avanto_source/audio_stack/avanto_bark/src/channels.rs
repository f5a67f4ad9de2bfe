/// Mixer channels available in total; the top of the range is reserved for
/// one-shot effects so music channels never collide with them.
pub const MIXER_CHANNELS: u8 = 32;
pub const DEFAULT_SFX_CHANNELS: u8 = 4;
pub const DEFAULT_FIRST_SFX_CHANNEL: u8 = MIXER_CHANNELS - 1 - DEFAULT_SFX_CHANNELS;

/// Round-robin allocator over the reserved effect channels. The oldest
/// effect is the one cut off when all channels are busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SfxChannels {
    first: u8,
    count: u8,
    next: u8,
}

impl SfxChannels {
    pub fn new(first: u8, count: u8) -> Self {
        debug_assert!(count > 0, "at least one effect channel is required");
        let count = count.max(1);
        Self {
            first,
            count,
            next: first,
        }
    }

    pub fn first(&self) -> u8 {
        self.first
    }

    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn contains(&self, channel: u8) -> bool {
        channel >= self.first && u16::from(channel) < u16::from(self.first) + u16::from(self.count)
    }

    pub fn next_channel(&mut self) -> u8 {
        let channel = self.next;
        let end = u16::from(self.first) + u16::from(self.count);
        self.next = if u16::from(self.next) + 1 >= end {
            self.first
        } else {
            self.next + 1
        };
        channel
    }

    pub fn reset(&mut self) {
        self.next = self.first;
    }
}

impl Default for SfxChannels {
    fn default() -> Self {
        Self::new(DEFAULT_FIRST_SFX_CHANNEL, DEFAULT_SFX_CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_range_is_the_top_four() {
        let channels = SfxChannels::default();
        assert_eq!(channels.first(), 27);
        assert_eq!(channels.count(), 4);
        assert!(channels.contains(30));
        assert!(!channels.contains(31));
        assert!(!channels.contains(26));
    }

    #[test]
    fn wraps_around() {
        let mut channels = SfxChannels::default();
        let handed: Vec<u8> = (0..9).map(|_| channels.next_channel()).collect();
        assert_eq!(handed, vec![27, 28, 29, 30, 27, 28, 29, 30, 27]);
    }

    #[test]
    fn range_at_the_top_of_u8_does_not_overflow() {
        let mut channels = SfxChannels::new(254, 2);
        let handed: Vec<u8> = (0..4).map(|_| channels.next_channel()).collect();
        assert_eq!(handed, vec![254, 255, 254, 255]);
    }

    #[test]
    fn reset_restarts_at_first() {
        let mut channels = SfxChannels::new(10, 3);
        channels.next_channel();
        channels.next_channel();
        channels.reset();
        assert_eq!(channels.next_channel(), 10);
    }
}
