//! Unit tests for rail-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn ordering() {
        assert!(AgentId(0) < AgentId(1));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(AgentId::INVALID.0, u64::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{EPS, is_due};

    #[test]
    fn due_within_tolerance() {
        assert!(is_due(0.0));
        assert!(is_due(-1.0));
        assert!(is_due(EPS / 2.0));
        assert!(!is_due(2.0 * EPS));
        assert!(!is_due(1.0));
    }
}

#[cfg(test)]
mod direction {
    use crate::{Direction, SimRng};

    #[test]
    fn delta_and_flip() {
        assert_eq!(Direction::Fwd.delta(), 1);
        assert_eq!(Direction::Back.delta(), -1);
        assert_eq!(Direction::Fwd.flip(), Direction::Back);
        assert_eq!(-Direction::Back, Direction::Fwd);
    }

    #[test]
    fn random_draws_both() {
        let mut rng = SimRng::seeded(7);
        let mut seen_fwd = false;
        let mut seen_back = false;
        for _ in 0..64 {
            match Direction::random(&mut rng) {
                Direction::Fwd => seen_fwd = true,
                Direction::Back => seen_back = true,
            }
        }
        assert!(seen_fwd && seen_back);
    }
}

#[cfg(test)]
mod kind {
    use crate::kind::{BOUNDARY, COMPOSITE, KindTable, PARTICLE, RANDOM_WALKER, TRACK_END, WALKER};

    #[test]
    fn builtin_lattice() {
        let kinds = KindTable::new();
        assert!(kinds.is_a(TRACK_END, BOUNDARY));
        assert!(kinds.is_a(TRACK_END, PARTICLE));
        assert!(kinds.is_a(RANDOM_WALKER, WALKER));
        assert!(kinds.is_a(WALKER, PARTICLE));
        assert!(!kinds.is_a(WALKER, BOUNDARY));
        assert!(!kinds.is_a(PARTICLE, WALKER));
        assert!(!kinds.is_a(COMPOSITE, PARTICLE));
    }

    #[test]
    fn every_kind_is_itself() {
        let kinds = KindTable::new();
        for raw in 0..kinds.len() as u16 {
            let k = crate::Kind(raw);
            assert!(kinds.is_a(k, k));
        }
    }

    #[test]
    fn registered_kind_inherits_transitively() {
        let mut kinds = KindTable::new();
        let leg = kinds.register("extruder-leg", &[WALKER]);
        let sticky_leg = kinds.register("sticky-leg", &[leg]);
        assert!(kinds.is_a(sticky_leg, leg));
        assert!(kinds.is_a(sticky_leg, WALKER));
        assert!(kinds.is_a(sticky_leg, PARTICLE));
        assert!(!kinds.is_a(leg, sticky_leg));
        assert_eq!(kinds.name(leg), "extruder-leg");
    }

    #[test]
    fn diamond_parents() {
        let mut kinds = KindTable::new();
        let both = kinds.register("anchored-walker", &[WALKER, BOUNDARY]);
        assert!(kinds.is_a(both, WALKER));
        assert!(kinds.is_a(both, BOUNDARY));
        assert!(kinds.is_a(both, PARTICLE));
    }
}

#[cfg(test)]
mod snapshot {
    use crate::Snapshot;

    #[test]
    fn pos_accessors() {
        assert_eq!(Snapshot::Pos(4).pos(), Some(4));
        assert_eq!(Snapshot::Tuple(vec![1, 2]).pos(), None);
        assert_eq!(Snapshot::Tuple(vec![1, 2]).positions(), vec![1, 2]);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn seeded_is_reproducible() {
        let mut a = SimRng::seeded(42);
        let mut b = SimRng::seeded(42);
        for _ in 0..16 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn choose_respects_bounds() {
        let mut rng = SimRng::seeded(1);
        let empty: [i32; 0] = [];
        assert!(rng.choose(&empty).is_none());
        let items = [10, 20, 30];
        for _ in 0..16 {
            assert!(items.contains(rng.choose(&items).unwrap()));
        }
    }
}
