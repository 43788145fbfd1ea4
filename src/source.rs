//! Random number and clock sources consumed by the generators.

/// A trait that defines the minimum random number generator interface for UUID generation.
///
/// Implementations must be cryptographically secure and must never run out of data.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for UUID generation.
pub trait TimeSource {
    /// Returns the current time as seconds and subsecond nanoseconds since the Unix epoch.
    fn unix_time(&mut self) -> (i64, u32);
}

impl<T: RandSource + ?Sized> RandSource for &mut T {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        (**self).fill_bytes(dest)
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &mut T {
    fn unix_time(&mut self) -> (i64, u32) {
        (**self).unix_time()
    }
}

/// An adapter that implements [`RandSource`] for [`RngCore`](rand::RngCore) types from `rand`
/// (v0.8) crate.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{source::Adapter, V4};
///
/// let uuid = V4::generate(&mut Adapter(rand::rngs::OsRng));
/// println!("{}", uuid);
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`](rand::RngCore) type. */ pub T);

impl<T: rand::RngCore> RandSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_time(&mut self) -> (i64, u32) {
        use std::time;
        match time::SystemTime::now().duration_since(time::UNIX_EPOCH) {
            Ok(d) => (d.as_secs() as i64, d.subsec_nanos()),
            Err(err) => {
                // clock set before 1970; borrow whole seconds so that nanos stay non-negative
                let d = err.duration();
                match d.subsec_nanos() {
                    0 => (-(d.as_secs() as i64), 0),
                    n => (-(d.as_secs() as i64) - 1, 1_000_000_000 - n),
                }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{RandSource, TimeSource};

    /// Replays a fixed byte sequence, wrapping around when exhausted.
    #[derive(Clone, Debug)]
    pub struct Replay(pub Vec<u8>, pub usize);

    impl Replay {
        pub fn new(bytes: &[u8]) -> Self {
            Self(bytes.to_vec(), 0)
        }
    }

    impl RandSource for Replay {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for e in dest {
                *e = self.0[self.1 % self.0.len()];
                self.1 += 1;
            }
        }
    }

    /// Returns the stored time, advanced by `step` nanoseconds after each read.
    #[derive(Clone, Debug)]
    pub struct StepClock {
        pub secs: i64,
        pub nanos: u32,
        pub step: u32,
    }

    impl TimeSource for StepClock {
        fn unix_time(&mut self) -> (i64, u32) {
            let now = (self.secs, self.nanos);
            self.nanos += self.step;
            self.secs += (self.nanos / 1_000_000_000) as i64;
            self.nanos %= 1_000_000_000;
            now
        }
    }
}
