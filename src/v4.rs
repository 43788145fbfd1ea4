//! UUIDv4-related functionality

use crate::{source::RandSource, uuid::stamp, V4};

impl V4 {
    /// Generates a UUIDv4 object from 16 bytes read from `rng`.
    ///
    /// The version and variant bits overwrite 6 of the 128 random bits, leaving 122 bits of
    /// randomness.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{source::Adapter, V4};
    ///
    /// let uuid = V4::generate(&mut Adapter(rand::rngs::OsRng));
    /// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
    /// ```
    pub fn generate<R: RandSource>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        stamp(&mut bytes, 4);
        Self(bytes)
    }
}
