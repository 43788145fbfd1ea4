//! UUIDv5-related functionality

use sha1::{Digest, Sha1};

use crate::{uuid::stamp, Uuid, V5};

impl V5 {
    /// Creates a UUIDv5 object from the SHA-1 hash of `namespace` followed by `name`.
    ///
    /// Only the first 16 of the 20 digest bytes are kept. The same pair of `namespace` and `name`
    /// always produces the same UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{Uuid, V5};
    ///
    /// let uuid = V5::create(Uuid::NAMESPACE_DNS, "www.example.com");
    /// assert_eq!(uuid.to_string(), "2ed6657d-e927-568b-95e1-2665a8aea6a2");
    /// ```
    pub fn create(namespace: impl Into<Uuid>, name: impl AsRef<[u8]>) -> Self {
        let namespace: Uuid = namespace.into();
        let digest = Sha1::new()
            .chain_update(namespace.as_bytes())
            .chain_update(name)
            .finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        stamp(&mut bytes, 5);
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Uuid, Variant, V4, V5};

    /// Creates prepared cases correctly
    #[test]
    fn creates_prepared_cases_correctly() {
        let ns = V4::parse("7628f4de-01bd-494b-a84b-d7f900521218").unwrap();
        assert_eq!(
            V5::create(ns, "test").to_string(),
            "5fe80e27-269a-5cce-98c3-989ddd181b71"
        );
        assert_eq!(
            V5::create(Uuid::NAMESPACE_DNS, "www.example.com").to_string(),
            "2ed6657d-e927-568b-95e1-2665a8aea6a2"
        );
        assert_eq!(
            V5::create(Uuid::NAMESPACE_URL, "https://example.com/").to_string(),
            "dd2c1780-811a-5296-81c5-178a0ef488bc"
        );
    }

    /// Creates identical UUIDs from identical inputs
    #[test]
    fn creates_identical_uuids_from_identical_inputs() {
        let names = ["", "test", "日本語", "a much longer name than the namespace itself"];
        for ns in [Uuid::NAMESPACE_DNS, Uuid::NAMESPACE_URL, Uuid::MAX] {
            for name in names {
                assert_eq!(V5::create(ns, name), V5::create(ns, name));
                assert_eq!(V5::create(ns, name), V5::create(ns, name.as_bytes()));
                assert_ne!(V5::create(ns, name), V5::create(ns, format!("{}.", name)));
            }
        }
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for i in 0..1_000 {
            let e = Uuid::from(V5::create(Uuid::NAMESPACE_OID, i.to_string()));
            assert!(matches!(e, Uuid::V5(_)));
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(5));
        }
    }
}
