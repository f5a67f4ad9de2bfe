pub mod ids;

pub use ids::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_handle_is_default() {
        let id = ParticleSourceID::default();
        assert!(!id.is_valid());
        assert_eq!(id, ParticleSourceID::INVALID);
    }

    #[test]
    fn generational_parts() {
        let id = ParticleSourceID::from_parts(5, 2);
        assert_eq!(id.index(), 5);
        assert_eq!(id.generation(), 2);
        assert!(id.is_valid());
    }

    #[test]
    fn first_slot_is_a_valid_handle() {
        let id = SoundID::new(0);
        assert!(id.is_valid());
        assert_eq!(id.index(), 0);
        assert_eq!(id.generation(), 0);
    }

    #[test]
    fn generation_bump_changes_identity() {
        let a = ParticleSourceID::from_parts(3, 0);
        let b = ParticleSourceID::from_parts(3, 1);
        assert_ne!(a, b);
        assert_eq!(a.index(), b.index());
    }

    #[test]
    fn debug_format_names_the_type() {
        assert_eq!(
            format!("{:?}", ParticleSourceID::from_parts(1, 4)),
            "ParticleSourceID(1:4)"
        );
        assert_eq!(
            format!("{:?}", MusicID::INVALID),
            "MusicID(invalid)"
        );
    }

    #[test]
    fn index_ids_expose_usize_index() {
        assert_eq!(ActorID(3).index(), 3);
        assert_eq!(ClipID(6).index(), 6);
        assert_eq!(ControllerPort(1).to_string(), "1");
    }
}
