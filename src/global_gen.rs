//! Default generator state and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{V1, V4};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator state, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("rfc4122: could not lock global generator")
}

/// Generates a UUIDv1 object.
///
/// This function employs a global state that holds the last timestamp, the clock sequence, and
/// the node, so that UUIDs generated at the same 100-nanosecond tick within the process get
/// distinct clock sequences. The node is the first hardware address of the host or a random
/// multicast address if none is found. On Unix, this function resets the state when the process
/// ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid1();
/// println!("{}", uuid); // e.g., "3343a72a-4771-11ee-8001-00b0d063c226"
/// println!("{}", uuid.time()); // 100-nanosecond intervals since 1582-10-15
///
/// let uuid_string: String = rfc4122::uuid1().to_string();
/// ```
pub fn uuid1() -> V1 {
    V1::generate(lock_global_gen().state_mut())
}

/// Generates a UUIDv4 object.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> V4 {
    V4::generate(lock_global_gen().rng_mut())
}

mod inner {
    use rand::rngs::{adapter::ReseedingRng, OsRng};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Core;

    use crate::node::{FromOs, RandomMulticast};
    use crate::source::{Adapter, RandSource, StdSystemTime};
    use crate::v1::Sequencer;

    /// The random number generator of the global generator.
    ///
    /// The global generator currently employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper to
    /// emulate the strategy used by [`rand::rngs::ThreadRng`].
    #[derive(Debug)]
    pub struct GlobalGenRng(ReseedingRng<ChaCha12Core, OsRng>);

    impl GlobalGenRng {
        fn new() -> Self {
            let core = ChaCha12Core::from_rng(OsRng)
                .expect("rfc4122: could not initialize global generator");
            Self(ReseedingRng::new(core, 1024 * 64, OsRng))
        }
    }

    impl RandSource for GlobalGenRng {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            rand::RngCore::fill_bytes(&mut self.0, dest)
        }
    }

    pub type GlobalState =
        Sequencer<GlobalGenRng, StdSystemTime, FromOs<RandomMulticast<Adapter<OsRng>>>>;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        state: GlobalState,
        rng: GlobalGenRng,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                state: Sequencer::new(
                    GlobalGenRng::new(),
                    StdSystemTime,
                    FromOs::new(RandomMulticast::new(Adapter(OsRng))),
                ),
                rng: GlobalGenRng::new(),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Sequencer`] instance, reseting the state on
        /// Unix if the process ID has changed.
        pub fn state_mut(&mut self) -> &mut GlobalState {
            self.reset_if_forked();
            &mut self.state
        }

        /// Returns a mutable reference to the random number generator for UUIDv4, reseting the
        /// state on Unix if the process ID has changed.
        pub fn rng_mut(&mut self) -> &mut GlobalGenRng {
            self.reset_if_forked();
            &mut self.rng
        }

        fn reset_if_forked(&mut self) {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!("process ID changed; resetting global generator");
                *self = Default::default();
            }
        }
    }
}


#[cfg(test)]
mod tests_v4 {
    use super::uuid4;
    use crate::{Uuid, Variant};

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| uuid4().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
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

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = Uuid::from(uuid4());
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(4));
        }
    }
}
