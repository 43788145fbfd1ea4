//! Fixed-length byte buffer

use std::{fmt, ops};

use crate::error::{InputError, RangeError};

/// Represents an owned sequence of octets whose length is fixed at construction.
///
/// Indexed reads and writes never resize the buffer. Indexing out of bounds panics, as it always
/// indicates a defect in the caller rather than bad input.
///
/// # Examples
///
/// ```rust
/// use rfc4122::ByteBuf;
///
/// let mut b = ByteBuf::from_hex("00b0d063c226")?;
/// b[0] |= 0x01;
/// assert_eq!(b.to_hex(), "01b0d063c226");
/// assert_eq!(b.slice(4, None).as_slice(), &[0xc2, 0x26]);
/// # Ok::<(), rfc4122::InputError>(())
/// ```
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct ByteBuf(Vec<u8>);

impl ByteBuf {
    /// Creates a buffer taking ownership of `bytes`.
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Decodes a hexadecimal string, accepting both upper and lower case digits.
    pub fn from_hex(src: &str) -> Result<Self, InputError> {
        Ok(Self(hex::decode(src)?))
    }

    /// Creates a buffer from a list of integers, each of which must fit in an unsigned octet.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::ByteBuf;
    ///
    /// assert_eq!(ByteBuf::from_uint8([0x6b, 0xa7])?.to_hex(), "6ba7");
    /// assert!(ByteBuf::from_uint8([256]).is_err());
    /// # Ok::<(), rfc4122::RangeError>(())
    /// ```
    pub fn from_uint8<I>(values: I) -> Result<Self, RangeError>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        values
            .into_iter()
            .map(|e| to_octet(e.into()))
            .collect::<Result<Vec<u8>, _>>()
            .map(Self)
    }

    /// Returns the number of bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the byte at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    /// Overwrites the byte at `index` with `value` after checking that `value` fits in an octet.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: i64) -> Result<(), RangeError> {
        self[index] = to_octet(value)?;
        Ok(())
    }

    /// Returns the lower-case hexadecimal representation without separators.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Returns a copy of `len` bytes starting at `offset`, or of all bytes from `offset` to the
    /// end if `len` is `None`.
    ///
    /// # Panics
    ///
    /// Panics if the requested range exceeds the buffer.
    pub fn slice(&self, offset: usize, len: Option<usize>) -> Self {
        match len {
            Some(len) => Self(self.0[offset..offset + len].to_vec()),
            None => Self(self.0[offset..].to_vec()),
        }
    }

    /// Returns the bytes as a slice of unsigned octets.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the buffer, returning the underlying vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

fn to_octet(value: i64) -> Result<u8, RangeError> {
    u8::try_from(value).map_err(|_| RangeError {
        what: "uint8",
        value: value.into(),
    })
}

impl fmt::Debug for ByteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ByteBuf({})", self.to_hex())
    }
}

impl ops::Index<usize> for ByteBuf {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl ops::IndexMut<usize> for ByteBuf {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl AsRef<[u8]> for ByteBuf {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl From<Vec<u8>> for ByteBuf {
    fn from(src: Vec<u8>) -> Self {
        Self(src)
    }
}

impl From<&[u8]> for ByteBuf {
    fn from(src: &[u8]) -> Self {
        Self(src.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for ByteBuf {
    fn from(src: [u8; N]) -> Self {
        Self(src.to_vec())
    }
}

impl<const N: usize> TryFrom<ByteBuf> for [u8; N] {
    type Error = ByteBuf;

    /// Moves the content into an array, giving the buffer back if the lengths differ.
    fn try_from(src: ByteBuf) -> Result<Self, Self::Error> {
        <[u8; N]>::try_from(src.0).map_err(ByteBuf)
    }
}

#[cfg(test)]
mod tests {
    use super::ByteBuf;
    use crate::error::InputError;

    /// Decodes and encodes hexadecimal strings
    #[test]
    fn decodes_and_encodes_hexadecimal_strings() {
        let b = ByteBuf::from_hex("6BA7b8109dad").unwrap();
        assert_eq!(b.as_slice(), &[0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad]);
        assert_eq!(b.to_hex(), "6ba7b8109dad");
        assert_eq!(ByteBuf::from_hex("").unwrap().len(), 0);
    }

    /// Rejects malformed hexadecimal strings
    #[test]
    fn rejects_malformed_hexadecimal_strings() {
        assert_eq!(ByteBuf::from_hex("abc"), Err(InputError::OddLength));
        assert_eq!(
            ByteBuf::from_hex("0g"),
            Err(InputError::InvalidCharacter { c: 'g', index: 1 })
        );
        assert!(ByteBuf::from_hex("00-11").is_err());
    }

    /// Validates range of uint8 values
    #[test]
    fn validates_range_of_uint8_values() {
        let b = ByteBuf::from_uint8([0u8, 127, 255]).unwrap();
        assert_eq!(b.as_slice(), &[0, 127, 255]);
        assert!(ByteBuf::from_uint8([0i32, 256]).is_err());
        assert!(ByteBuf::from_uint8([-1i32]).is_err());

        let mut b = b;
        assert!(b.set(1, 300).is_err());
        assert!(b.set(1, -3).is_err());
        assert_eq!(b[1], 127);
        b.set(1, 42).unwrap();
        assert_eq!(b[1], 42);
        assert_eq!(b.len(), 3);
    }

    /// Panics on out-of-bounds index
    #[test]
    #[should_panic]
    fn panics_on_out_of_bounds_index() {
        let b = ByteBuf::from([0u8; 16]);
        let _ = b[16];
    }

    /// Returns none from checked get beyond bounds
    #[test]
    fn returns_none_from_checked_get_beyond_bounds() {
        let b = ByteBuf::from([1u8, 2]);
        assert_eq!(b.get(1), Some(2));
        assert_eq!(b.get(2), None);
    }

    /// Compares content byte for byte
    #[test]
    fn compares_content_byte_for_byte() {
        let a = ByteBuf::from([1u8, 2, 3]);
        assert_eq!(a, ByteBuf::from(vec![1, 2, 3]));
        assert_ne!(a, ByteBuf::from([1u8, 2]));
        assert_ne!(a, ByteBuf::from([1u8, 2, 4]));
    }

    /// Slices with and without length
    #[test]
    fn slices_with_and_without_length() {
        let b = ByteBuf::from_hex("000102030405060708090a0b0c0d0e0f").unwrap();
        assert_eq!(b.slice(10, None).to_hex(), "0a0b0c0d0e0f");
        assert_eq!(b.slice(8, Some(2)).to_hex(), "0809");
        assert_eq!(b.slice(16, None).len(), 0);
    }

    /// Converts to fixed-size array only when length matches
    #[test]
    fn converts_to_fixed_size_array_only_when_length_matches() {
        let b = ByteBuf::from([9u8; 6]);
        assert_eq!(<[u8; 6]>::try_from(b.clone()), Ok([9u8; 6]));
        assert_eq!(<[u8; 16]>::try_from(b.clone()), Err(b));
    }
}
