use std::{cmp, fmt, hash, str};

use fstr::FStr;

use crate::{bytes::ByteBuf, error::ParseError};

/// Represents a Universally Unique IDentifier, classified by its version.
///
/// The classification is made once, when the value is parsed or created from bytes:
///
/// 1. all-zero bits make [`Uuid::Nil`] and all-one bits make [`Uuid::Max`];
/// 2. otherwise the high nibble of byte 6 selects [`Uuid::V1`], [`Uuid::V3`], [`Uuid::V4`] or
///    [`Uuid::V5`];
/// 3. anything else is kept as [`Uuid::Unknown`].
///
/// Two UUIDs compare equal if and only if their 16 bytes are identical, whatever wraps them.
///
/// # Examples
///
/// ```rust
/// use rfc4122::Uuid;
///
/// let x = "fa06067f-602d-404a-a34c-45c6a7744011".parse::<Uuid>()?;
/// assert!(matches!(x, Uuid::V4(_)));
/// assert_eq!(x.urn(), "urn:uuid:fa06067f-602d-404a-a34c-45c6a7744011");
/// # Ok::<(), rfc4122::ParseError>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub enum Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    Nil,
    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    Max,
    /// Time-based UUID.
    V1(V1),
    /// Name-based UUID using MD5.
    V3(V3),
    /// Random UUID.
    V4(V4),
    /// Name-based UUID using SHA-1.
    V5(V5),
    /// A 128-bit value with a version this crate does not recognize.
    Unknown(Unknown),
}

/// The variant field of a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// The variant field is `0xxx` (reserved, NCS backward compatibility).
    Var0,
    /// The variant field is `10xx`, which is the one specified by RFC 4122.
    Var10,
    /// The variant field is `110x` (reserved, Microsoft backward compatibility).
    Var110,
    /// The variant field is `111x` (reserved for future definition).
    VarReserved,
    /// The Nil UUID.
    VarNil,
    /// The Max UUID.
    VarMax,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self::Nil;

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self::Max;

    /// Name space for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self::V1(V1(namespace(0x10)));

    /// Name space for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self::V1(V1(namespace(0x11)));

    /// Name space for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self::V1(V1(namespace(0x12)));

    /// Name space for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self::V1(V1(namespace(0x14)));

    /// Classifies 16 bytes as one of the known versions.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        if is_filled_with(&bytes, 0x00) {
            Self::Nil
        } else if is_filled_with(&bytes, 0xff) {
            Self::Max
        } else {
            match bytes[6] & 0xf0 {
                0x10 => Self::V1(V1(bytes)),
                0x30 => Self::V3(V3(bytes)),
                0x40 => Self::V4(V4(bytes)),
                0x50 => Self::V5(V5(bytes)),
                _ => Self::Unknown(Unknown(bytes)),
            }
        }
    }

    /// Parses a UUID of any version from its textual representation.
    ///
    /// Leading and trailing whitespace and every hyphen are ignored, and the digits are read
    /// case-insensitively, so the 8-4-4-4-12 canonical form, the 32-digit simple form and their
    /// upper-case counterparts are all accepted.
    pub fn parse(src: &str) -> Result<Self, ParseError> {
        decode(src).map(Self::from_bytes)
    }

    /// Returns `true` if `src` can be parsed as a UUID.
    pub fn is_valid(src: &str) -> bool {
        Self::parse(src).is_ok()
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        match self {
            Self::Nil => &[0x00; 16],
            Self::Max => &[0xff; 16],
            Self::V1(e) => &e.0,
            Self::V3(e) => &e.0,
            Self::V4(e) => &e.0,
            Self::V5(e) => &e.0,
            Self::Unknown(e) => &e.0,
        }
    }

    /// Returns a copy of the underlying bytes as a [`ByteBuf`].
    pub fn to_buf(&self) -> ByteBuf {
        ByteBuf::from(*self.as_bytes())
    }

    /// Returns the version number, or `None` for the Nil and Max UUIDs.
    pub const fn version(&self) -> Option<u8> {
        match self {
            Self::Nil | Self::Max => None,
            _ => Some(self.as_bytes()[6] >> 4),
        }
    }

    /// Reports the variant field value of the UUID.
    pub const fn variant(&self) -> Variant {
        match self {
            Self::Nil => Variant::VarNil,
            Self::Max => Variant::VarMax,
            _ => match self.as_bytes()[8] >> 4 {
                0x0..=0x7 => Variant::Var0,
                0x8..=0xb => Variant::Var10,
                0xc..=0xd => Variant::Var110,
                _ => Variant::VarReserved,
            },
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = "5FE80E27269A5CCE98C3989DDD181B71".parse::<Uuid>()?;
    /// assert_eq!(&*x.encode(), "5fe80e27-269a-5cce-98c3-989ddd181b71");
    /// # Ok::<(), rfc4122::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        encode(self.as_bytes())
    }

    /// Returns the URN representation (`urn:uuid:` followed by the 8-4-4-4-12 form).
    pub fn urn(&self) -> String {
        urn(self.as_bytes())
    }
}

const fn namespace(last_of_time_low: u8) -> [u8; 16] {
    [
        0x6b, 0xa7, 0xb8, last_of_time_low, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f,
        0xd4, 0x30, 0xc8,
    ]
}

const fn is_filled_with(bytes: &[u8; 16], value: u8) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != value {
            return false;
        }
        i += 1;
    }
    true
}

/// Reads 16 bytes out of a hyphenated or plain hexadecimal string.
fn decode(src: &str) -> Result<[u8; 16], ParseError> {
    let digits = src
        .trim()
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_ascii_lowercase();
    if digits.len() != 32 {
        return Err(ParseError::InvalidLength);
    }
    <[u8; 16]>::try_from(ByteBuf::from_hex(&digits)?).map_err(|_| ParseError::InvalidLength)
}

/// Formats 16 bytes in the 8-4-4-4-12 canonical form.
pub(crate) fn encode(bytes: &[u8; 16]) -> FStr<36> {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";

    let mut buffer = [0u8; 36];
    let mut j = 0;
    for (i, e) in bytes.iter().enumerate() {
        buffer[j] = DIGITS[(e >> 4) as usize];
        buffer[j + 1] = DIGITS[(e & 15) as usize];
        j += 2;
        if i == 3 || i == 5 || i == 7 || i == 9 {
            buffer[j] = b'-';
            j += 1;
        }
    }
    debug_assert!(buffer.is_ascii());
    // SAFETY: every byte written above is an ASCII character
    unsafe { FStr::from_bytes_unchecked(buffer) }
}

fn urn(bytes: &[u8; 16]) -> String {
    format!("urn:uuid:{}", encode(bytes))
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Self::parse(src)
    }
}

impl PartialEq for Uuid {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Uuid {}

impl hash::Hash for Uuid {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state)
    }
}

impl PartialOrd for Uuid {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uuid {
    fn cmp(&self, other: &Self) -> cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Default for Uuid {
    fn default() -> Self {
        Self::Nil
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from_bytes(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = ParseError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 16]>::try_from(src)
            .map(Self::from_bytes)
            .map_err(|_| ParseError::InvalidLength)
    }
}

impl TryFrom<&ByteBuf> for Uuid {
    type Error = ParseError;

    fn try_from(src: &ByteBuf) -> Result<Self, Self::Error> {
        Self::try_from(src.as_slice())
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        *src.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(*src.as_bytes())
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_bytes(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Implements the operations shared by every 16-byte UUID wrapper type.
macro_rules! impl_common {
    ($name:ident) => {
        impl $name {
            /// Returns a reference to the underlying byte array.
            pub const fn as_bytes(&self) -> &[u8; 16] {
                &self.0
            }

            /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a
            /// stack-allocated string type.
            pub fn encode(&self) -> FStr<36> {
                encode(&self.0)
            }

            /// Returns the URN representation (`urn:uuid:` followed by the 8-4-4-4-12 form).
            pub fn urn(&self) -> String {
                urn(&self.0)
            }
        }

        impl fmt::Display for $name {
            /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.encode())
            }
        }

        impl From<$name> for Uuid {
            fn from(src: $name) -> Self {
                Self::$name(src)
            }
        }

        impl From<$name> for [u8; 16] {
            fn from(src: $name) -> Self {
                src.0
            }
        }

        impl From<$name> for String {
            fn from(src: $name) -> Self {
                src.to_string()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl PartialEq<Uuid> for $name {
            fn eq(&self, other: &Uuid) -> bool {
                &self.0 == other.as_bytes()
            }
        }

        impl PartialEq<$name> for Uuid {
            fn eq(&self, other: &$name) -> bool {
                self.as_bytes() == &other.0
            }
        }
    };
}

/// Implements the parsing entry points that only accept one version.
macro_rules! impl_versioned {
    ($name:ident, $version:literal) => {
        impl $name {
            #[doc = concat!("Parses a version ", $version, " UUID, failing with")]
            /// [`ParseError::VersionMismatch`] if the input is a valid UUID of another version.
            pub fn parse(src: &str) -> Result<Self, ParseError> {
                Self::try_from(Uuid::parse(src)?)
            }
        }

        impl str::FromStr for $name {
            type Err = ParseError;

            fn from_str(src: &str) -> Result<Self, Self::Err> {
                Self::parse(src)
            }
        }

        impl TryFrom<Uuid> for $name {
            type Error = ParseError;

            fn try_from(src: Uuid) -> Result<Self, Self::Error> {
                match src {
                    Uuid::$name(e) => Ok(e),
                    _ => Err(ParseError::VersionMismatch { expected: $version }),
                }
            }
        }

        impl TryFrom<[u8; 16]> for $name {
            type Error = ParseError;

            fn try_from(src: [u8; 16]) -> Result<Self, Self::Error> {
                Self::try_from(Uuid::from_bytes(src))
            }
        }

        impl TryFrom<&[u8]> for $name {
            type Error = ParseError;

            fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
                Self::try_from(Uuid::try_from(src)?)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ParseError;

            fn try_from(src: String) -> Result<Self, Self::Error> {
                src.parse()
            }
        }
    };
}

/// Represents a version 1 (time-based) UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct V1(pub(crate) [u8; 16]);

/// Represents a version 3 (name-based, MD5) UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct V3(pub(crate) [u8; 16]);

/// Represents a version 4 (random) UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct V4(pub(crate) [u8; 16]);

/// Represents a version 5 (name-based, SHA-1) UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct V5(pub(crate) [u8; 16]);

/// Represents a UUID whose version nibble is not one this crate knows how to interpret.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Unknown([u8; 16]);

impl_common!(V1);
impl_common!(V3);
impl_common!(V4);
impl_common!(V5);
impl_common!(Unknown);

impl_versioned!(V1, 1);
impl_versioned!(V3, 3);
impl_versioned!(V4, 4);
impl_versioned!(V5, 5);

/// Sets the version nibble of byte 6 and the RFC 4122 variant bits of byte 8.
pub(crate) fn stamp(bytes: &mut [u8; 16], version: u8) {
    bytes[6] = (bytes[6] & 0x0f) | (version << 4);
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for ::uuid::Uuid {
        fn from(src: Uuid) -> Self {
            ::uuid::Uuid::from_bytes(*src.as_bytes())
        }
    }

    impl From<::uuid::Uuid> for Uuid {
        fn from(src: ::uuid::Uuid) -> Self {
            Self::from_bytes(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{encode, fmt, str, Unknown, Uuid, V1, V3, V4, V5};
    use crate::error::ParseError;
    use serde::{de, Deserializer, Serializer};
    use std::marker::PhantomData;

    fn serialize<S: Serializer>(bytes: &[u8; 16], serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&encode(bytes))
        } else {
            serializer.serialize_bytes(bytes)
        }
    }

    struct VisitorImpl<T>(PhantomData<T>);

    impl<'de, T> de::Visitor<'de> for VisitorImpl<T>
    where
        T: str::FromStr<Err = ParseError> + for<'a> TryFrom<&'a [u8], Error = ParseError>,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Self::Value::try_from(value).map_err(de::Error::custom)
        }
    }

    macro_rules! impl_serde {
        ($($name:ty),*) => {
            $(
                impl serde::Serialize for $name {
                    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                        serialize(self.as_bytes(), serializer)
                    }
                }

                impl<'de> serde::Deserialize<'de> for $name {
                    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                        if deserializer.is_human_readable() {
                            deserializer.deserialize_str(VisitorImpl(PhantomData))
                        } else {
                            deserializer.deserialize_bytes(VisitorImpl(PhantomData))
                        }
                    }
                }
            )*
        };
    }

    impl_serde!(Uuid, V1, V3, V4, V5);

    impl serde::Serialize for Unknown {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize(self.as_bytes(), serializer)
        }
    }

}
