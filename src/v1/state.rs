//! Timestamp, clock sequence, and node state behind UUIDv1 generation

use super::GregorianTime;
use crate::{
    node::{NodeProvider, RandomMulticast},
    source::{RandSource, TimeSource},
};

/// A trait that supplies the three variable fields of a UUIDv1.
///
/// [`V1::generate`](crate::V1::generate) calls [`time`](State::time) first, then
/// [`node`](State::node) and [`clock_seq`](State::clock_seq), so an implementation may update
/// the clock sequence in `time` based on the timestamp it has just read.
pub trait State {
    /// Returns the timestamp of the next UUID.
    fn time(&mut self) -> GregorianTime;

    /// Returns the clock sequence; the two most significant bits are overwritten by the variant.
    fn clock_seq(&mut self) -> [u8; 2];

    /// Returns the node identifier.
    fn node(&mut self) -> [u8; 6];
}

impl<T: State + ?Sized> State for &mut T {
    fn time(&mut self) -> GregorianTime {
        (**self).time()
    }

    fn clock_seq(&mut self) -> [u8; 2] {
        (**self).clock_seq()
    }

    fn node(&mut self) -> [u8; 6] {
        (**self).node()
    }
}

/// A [`State`] that returns the same field values every time.
///
/// # Examples
///
/// ```rust
/// use rfc4122::v1::{Fixed, GregorianTime};
/// use rfc4122::V1;
///
/// let mut state = Fixed::new(
///     GregorianTime::from_ticks(139127190012012330)?,
///     [0x00, 0x01],
///     [0x00, 0xb0, 0xd0, 0x63, 0xc2, 0x26],
/// );
/// let uuid = V1::generate(&mut state);
/// assert_eq!(uuid.to_string(), "3343a72a-4771-11ee-8001-00b0d063c226");
/// # Ok::<(), rfc4122::RangeError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Fixed {
    pub time: GregorianTime,
    pub clock_seq: [u8; 2],
    pub node: [u8; 6],
}

impl Fixed {
    /// Creates a state from field values.
    pub const fn new(time: GregorianTime, clock_seq: [u8; 2], node: [u8; 6]) -> Self {
        Self {
            time,
            clock_seq,
            node,
        }
    }
}

impl State for Fixed {
    fn time(&mut self) -> GregorianTime {
        self.time
    }

    fn clock_seq(&mut self) -> [u8; 2] {
        self.clock_seq
    }

    fn node(&mut self) -> [u8; 6] {
        self.node
    }
}

/// The stateful [`State`] that keeps UUIDs unique when the clock repeats or goes backwards.
///
/// The clock sequence is drawn from `rng` on first use and kept while the clock advances. When
/// the clock reports the same timestamp as the last one observed, the clock sequence is
/// incremented modulo 2^14, so UUIDs sharing a timestamp never share a clock sequence; if all
/// 2^14 values have been used within one timestamp, the call waits for the clock to advance. When
/// the clock moves backwards, a new random clock sequence distinct from the current one is drawn.
/// The node is resolved from `nodes` on first use and kept for the lifetime of the object.
///
/// A `Sequencer` is not thread-safe by itself; wrap it in a [`Mutex`](std::sync::Mutex) to share
/// it, so that the read-compare-update sequence runs under the lock.
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
/// let a = V1::generate(&mut state);
/// let b = V1::generate(&mut state);
/// assert_ne!(a, b);
/// ```
#[derive(Clone, Debug)]
pub struct Sequencer<R, T, N> {
    rng: R,
    clock: T,
    nodes: N,
    last_timestamp: Option<GregorianTime>,
    clock_seq: Option<u16>,
    /// The clock sequence of the first UUID at `last_timestamp`.
    first_seq_in_tick: u16,
    node: Option<[u8; 6]>,
}

const CLOCK_SEQ_MASK: u16 = 0x3fff;

impl<R: RandSource, T: TimeSource, N: NodeProvider> Sequencer<R, T, N> {
    /// Creates a state from a random number generator, a clock, and a node provider.
    pub const fn new(rng: R, clock: T, nodes: N) -> Self {
        Self {
            rng,
            clock,
            nodes,
            last_timestamp: None,
            clock_seq: None,
            first_seq_in_tick: 0,
            node: None,
        }
    }

    fn current_seq(&mut self) -> u16 {
        match self.clock_seq {
            Some(value) => value,
            None => {
                let value = self.draw_clock_seq();
                self.clock_seq = Some(value);
                value
            }
        }
    }

    fn draw_clock_seq(&mut self) -> u16 {
        let mut buffer = [0u8; 2];
        self.rng.fill_bytes(&mut buffer);
        u16::from_be_bytes(buffer) & CLOCK_SEQ_MASK
    }
}

impl<R: RandSource, T: TimeSource, N: NodeProvider> State for Sequencer<R, T, N> {
    fn time(&mut self) -> GregorianTime {
        let mut now = GregorianTime::now(&mut self.clock);
        let current = self.current_seq();
        match self.last_timestamp {
            Some(last) if now == last => {
                let next = (current + 1) & CLOCK_SEQ_MASK;
                if next == self.first_seq_in_tick {
                    tracing::warn!(%now, "clock sequence exhausted; waiting for clock to advance");
                    while now <= last {
                        now = GregorianTime::now(&mut self.clock);
                    }
                    self.first_seq_in_tick = current;
                } else {
                    self.clock_seq = Some(next);
                }
            }
            Some(last) if now < last => {
                let mut next = self.draw_clock_seq();
                if next == current {
                    next = (next + 1) & CLOCK_SEQ_MASK;
                }
                tracing::trace!(%now, %last, "clock moved backwards; clock sequence reseeded");
                self.clock_seq = Some(next);
                self.first_seq_in_tick = next;
            }
            _ => self.first_seq_in_tick = current,
        }
        self.last_timestamp = Some(now);
        now
    }

    fn clock_seq(&mut self) -> [u8; 2] {
        self.current_seq().to_be_bytes()
    }

    fn node(&mut self) -> [u8; 6] {
        match self.node {
            Some(value) => value,
            None => {
                let candidates = self.nodes.nodes();
                debug_assert!(!candidates.is_empty(), "node provider returned no candidate");
                let value = match candidates.first() {
                    Some(value) => *value,
                    None => RandomMulticast::new(&mut self.rng).nodes()[0],
                };
                self.node = Some(value);
                value
            }
        }
    }
}
