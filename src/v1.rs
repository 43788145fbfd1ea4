//! UUIDv1-related functionality
//!
//! A UUIDv1 packs a 60-bit [`GregorianTime`], a 14-bit clock sequence, and a 48-bit node
//! identifier into the following layout, where the timestamp is split into three fields in
//! reverse order of significance:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The field values come from a [`State`]: [`Sequencer`] for real generation or [`Fixed`] to
//! assemble a UUID from known parts.

mod gregorian;
pub use gregorian::GregorianTime;

mod state;
pub use state::{Fixed, Sequencer, State};

use crate::{uuid::stamp, V1};

impl V1 {
    /// Generates a UUIDv1 object from the timestamp, node, and clock sequence supplied by
    /// `state`, queried in this order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::node::{FromOs, RandomMulticast};
    /// use rfc4122::source::{Adapter, StdSystemTime};
    /// use rfc4122::v1::Sequencer;
    /// use rfc4122::V1;
    ///
    /// let mut state = Sequencer::new(
    ///     Adapter(rand::rngs::OsRng),
    ///     StdSystemTime,
    ///     FromOs::new(RandomMulticast::new(Adapter(rand::rngs::OsRng))),
    /// );
    /// let uuid = V1::generate(&mut state);
    /// println!("{}", uuid); // e.g. "3343a72a-4771-11ee-8001-00b0d063c226"
    /// ```
    pub fn generate<S: State + ?Sized>(state: &mut S) -> Self {
        let t = state.time().to_be_bytes();
        let node = state.node();
        let clock_seq = state.clock_seq();

        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&t[4..8]);
        bytes[4..6].copy_from_slice(&t[2..4]);
        bytes[6..8].copy_from_slice(&t[0..2]);
        bytes[8..10].copy_from_slice(&clock_seq);
        bytes[10..16].copy_from_slice(&node);
        stamp(&mut bytes, 1);
        Self(bytes)
    }

    /// Returns the timestamp reassembled from the `time_low`, `time_mid`, and `time_high`
    /// fields.
    pub const fn time(&self) -> GregorianTime {
        let b = &self.0;
        GregorianTime::from_be_bytes_truncated([
            b[6] & 0x0f,
            b[7],
            b[4],
            b[5],
            b[0],
            b[1],
            b[2],
            b[3],
        ])
    }

    /// Returns the 14-bit clock sequence as 2 big-endian bytes, with the variant bits cleared.
    pub const fn clock_seq(&self) -> [u8; 2] {
        [self.0[8] & 0x3f, self.0[9]]
    }

    /// Returns the 48-bit node identifier.
    pub const fn node(&self) -> [u8; 6] {
        let b = &self.0;
        [b[10], b[11], b[12], b[13], b[14], b[15]]
    }
}

#[cfg(test)]
mod tests {
    use super::{Fixed, GregorianTime, Sequencer};
    use crate::node::RandomMulticast;
    use crate::source::{mock::StepClock, Adapter, StdSystemTime};
    use crate::{ParseError, Uuid, Variant, V1};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = {
        let mut state = Sequencer::new(
            Adapter(rand::thread_rng()),
            StdSystemTime,
            RandomMulticast::new(Adapter(rand::thread_rng())),
        );
        (0..N_SAMPLES).map(|_| V1::generate(&mut state).into()).collect()
    });

    /// Generates prepared cases from fixed fields
    #[test]
    fn generates_prepared_cases_from_fixed_fields() {
        let cases = [
            (
                139127190012012330,
                [0x00, 0x01],
                [0x00, 0xb0, 0xd0, 0x63, 0xc2, 0x26],
                "3343a72a-4771-11ee-8001-00b0d063c226",
            ),
            (
                0x01ee4782395c14c4,
                [0x17, 0xae],
                [0x02, 0x42, 0xac, 0x1b, 0x00, 0x04],
                "395c14c4-4782-11ee-97ae-0242ac1b0004",
            ),
        ];

        for (ticks, clock_seq, node, text) in cases {
            let time = GregorianTime::from_ticks(ticks).unwrap();
            let e = V1::generate(&mut Fixed::new(time, clock_seq, node));
            assert_eq!(e.to_string(), text);
            assert_eq!(V1::parse(text), Ok(e));
            assert_eq!(e.time(), time);
            assert_eq!(e.clock_seq(), clock_seq);
            assert_eq!(e.node(), node);
        }

        let e = V1::parse("3343a72a-4771-11ee-8001-00b0d063c226").unwrap();
        assert_eq!(e.time().to_calendar(), (1693426201, 201233));
        let e = V1::parse("395c14c4-4782-11ee-97ae-0242ac1b0004").unwrap();
        assert_eq!(e.time().to_unix(), (1693433512, 872058000));
    }

    /// Clears variant bits of clock sequence
    #[test]
    fn clears_variant_bits_of_clock_sequence() {
        let time = GregorianTime::from_ticks(0x0fff_ffff_ffff_ffff).unwrap();
        let e = V1::generate(&mut Fixed::new(time, [0xff, 0xff], [0xff; 6]));
        assert_eq!(e.to_string(), "ffffffff-ffff-1fff-bfff-ffffffffffff");
        assert_eq!(e.time(), time);
        assert_eq!(e.clock_seq(), [0x3f, 0xff]);

        let e = V1::generate(&mut Fixed::default());
        assert_eq!(e.to_string(), "00000000-0000-1000-8000-000000000000");
    }

    /// Round-trips random fields through generate and accessors
    #[test]
    fn round_trips_random_fields_through_generate_and_accessors() {
        for _ in 0..10_000 {
            let time = GregorianTime::from_ticks(rand::random::<u64>() >> 4).unwrap();
            let clock_seq = [rand::random::<u8>() & 0x3f, rand::random()];
            let node = rand::random::<[u8; 6]>();
            let e = V1::generate(&mut Fixed::new(time, clock_seq, node));
            assert_eq!((e.time(), e.clock_seq(), e.node()), (time, clock_seq, node));

            let parsed: Uuid = e.to_string().parse().unwrap();
            assert!(matches!(parsed, Uuid::V1(x) if x == e));
        }
    }

    /// Generates distinct UUIDs on a frozen clock
    #[test]
    fn generates_distinct_uuids_on_a_frozen_clock() {
        use std::collections::HashSet;
        let clock = StepClock {
            secs: 1693426201,
            nanos: 201233,
            step: 0,
        };
        let mut state = Sequencer::new(
            Adapter(rand::thread_rng()),
            clock,
            RandomMulticast::new(Adapter(rand::thread_rng())),
        );
        let first = V1::generate(&mut state);
        let mut seen = HashSet::from([first]);
        for _ in 0..1_000 {
            let curr = V1::generate(&mut state);
            assert_eq!(curr.time(), first.time());
            assert_eq!(curr.node(), first.node());
            assert!(seen.insert(curr), "duplicate UUID: {}", curr);
        }
        assert_eq!(seen.len(), 1_001);
    }

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes timestamp close to current time
    #[test]
    fn encodes_timestamp_close_to_current_time() {
        use std::time;
        let before = time::SystemTime::now();
        let e = SAMPLES.with(|samples| V1::parse(&samples[N_SAMPLES - 1]).unwrap());
        let generated = e.time().to_system_time();
        let after = time::SystemTime::now();
        assert!(generated <= after);
        assert!(before.duration_since(generated).unwrap_or_default() < time::Duration::from_secs(60));
    }

    /// Sets constant bits properly
    #[test]
    fn sets_constant_bits_properly() {
        let mut state = Sequencer::new(
            Adapter(rand::thread_rng()),
            StdSystemTime,
            RandomMulticast::new(Adapter(rand::thread_rng())),
        );
        for _ in 0..1_000 {
            let e = Uuid::from(V1::generate(&mut state));
            assert!(matches!(e, Uuid::V1(_)));
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
            assert_eq!(e.as_bytes()[10] & 0x01, 0x01);
        }
    }

    /// Rejects non-version-1 and malformed strings
    #[test]
    fn rejects_non_version_1_and_malformed_strings() {
        let cases = [
            (
                "fa799c4f-e29b-43e0-908d-aae2ee32e549",
                ParseError::VersionMismatch { expected: 1 },
            ),
            (
                "00000000-0000-0000-0000-000000000000",
                ParseError::VersionMismatch { expected: 1 },
            ),
            ("3343a72a-4771-11ee-8001-00b0d063c2", ParseError::InvalidLength),
        ];

        for (text, err) in cases {
            assert_eq!(V1::parse(text), Err(err));
        }
        assert!(matches!(
            V1::parse("3343a72a-4771-11ee-8001-00b0d063c2zz"),
            Err(ParseError::InvalidHex(_))
        ));
    }
}
