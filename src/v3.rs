//! UUIDv3-related functionality

use md5::{Digest, Md5};

use crate::{uuid::stamp, Uuid, V3};

impl V3 {
    /// Creates a UUIDv3 object from the MD5 hash of `namespace` followed by `name`.
    ///
    /// The same pair of `namespace` and `name` always produces the same UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{Uuid, V3};
    ///
    /// let uuid = V3::create(Uuid::NAMESPACE_DNS, "www.example.com");
    /// assert_eq!(uuid.to_string(), "5df41881-3aed-3515-88a7-2f4a814cf09e");
    /// ```
    pub fn create(namespace: impl Into<Uuid>, name: impl AsRef<[u8]>) -> Self {
        let namespace: Uuid = namespace.into();
        let digest = Md5::new()
            .chain_update(namespace.as_bytes())
            .chain_update(name)
            .finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest);
        stamp(&mut bytes, 3);
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Uuid, Variant, V3, V4};

    /// Creates prepared cases correctly
    #[test]
    fn creates_prepared_cases_correctly() {
        let ns = V4::parse("7628f4de-01bd-494b-a84b-d7f900521218").unwrap();
        assert_eq!(
            V3::create(ns, "test").to_string(),
            "a0f6aad0-cdf5-3ddc-a2ac-0bddb3249309"
        );
        assert_eq!(
            V3::create(Uuid::NAMESPACE_DNS, "www.example.com").to_string(),
            "5df41881-3aed-3515-88a7-2f4a814cf09e"
        );
    }

    /// Creates identical UUIDs from identical inputs
    #[test]
    fn creates_identical_uuids_from_identical_inputs() {
        let names = ["", "test", "日本語", "a much longer name than the namespace itself"];
        for ns in [Uuid::NAMESPACE_DNS, Uuid::NAMESPACE_URL, Uuid::NIL] {
            for name in names {
                assert_eq!(V3::create(ns, name), V3::create(ns, name));
                assert_eq!(V3::create(ns, name), V3::create(ns, name.as_bytes()));
                assert_ne!(V3::create(ns, name), V3::create(ns, format!("{}.", name)));
            }
        }
        assert_ne!(
            V3::create(Uuid::NAMESPACE_DNS, "test"),
            V3::create(Uuid::NAMESPACE_URL, "test")
        );
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for i in 0..1_000 {
            let e = Uuid::from(V3::create(Uuid::NAMESPACE_OID, i.to_string()));
            assert!(matches!(e, Uuid::V3(_)));
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(3));
        }
    }

    /// Parses its own output
    #[test]
    fn parses_its_own_output() {
        let e = V3::create(Uuid::NAMESPACE_X500, "CN=test");
        assert_eq!(V3::parse(&e.to_string()), Ok(e));
        assert_eq!(V3::try_from(*e.as_bytes()), Ok(e));
    }
}
