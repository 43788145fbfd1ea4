//! Node (IEEE 802 MAC address) providers for UUIDv1
//!
//! A node provider returns one or more 6-byte node candidates, and a correctly composed chain
//! never returns an empty list. [`FromOs`] reads hardware addresses from the host and defers to
//! the next provider when it finds none, while [`RandomMulticast`] terminates the chain with a
//! random address that has the multicast bit set, as RFC 4122 section 4.5 suggests, so that it
//! cannot collide with any address burned into real hardware.
//!
//! ```rust
//! use rfc4122::node::{FromOs, NodeProvider, RandomMulticast};
//! use rfc4122::source::Adapter;
//!
//! let mut nodes = FromOs::new(RandomMulticast::new(Adapter(rand::rngs::OsRng)));
//! assert!(!nodes.nodes().is_empty());
//! ```

use std::{fs, path::Path, process, sync::OnceLock};

use regex::Regex;

use crate::{bytes::ByteBuf, source::RandSource};

/// A trait that defines the source of node candidates for UUIDv1 generation.
pub trait NodeProvider {
    /// Returns node candidates in order of preference.
    ///
    /// Implementors must not return an empty list; a provider that may find nothing should be
    /// composed with [`RandomMulticast`] as its fallback.
    fn nodes(&mut self) -> Vec<[u8; 6]>;
}

impl<T: NodeProvider + ?Sized> NodeProvider for &mut T {
    fn nodes(&mut self) -> Vec<[u8; 6]> {
        (**self).nodes()
    }
}

impl<T: NodeProvider + ?Sized> NodeProvider for Box<T> {
    fn nodes(&mut self) -> Vec<[u8; 6]> {
        (**self).nodes()
    }
}

/// Provides a random node with the least significant bit of the first octet set to one.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct RandomMulticast<R> {
    rng: R,
}

impl<R: RandSource> RandomMulticast<R> {
    /// Creates a provider that draws nodes from `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandSource> NodeProvider for RandomMulticast<R> {
    fn nodes(&mut self) -> Vec<[u8; 6]> {
        let mut node = [0u8; 6];
        self.rng.fill_bytes(&mut node);
        node[0] |= 0x01;
        vec![node]
    }
}

/// Provides the hardware addresses of the host's network interfaces, falling back to `next` if
/// none is found.
///
/// On Linux the addresses are read from `/sys/class/net/*/address`. Elsewhere, or if that
/// fails, the output of `ipconfig /all` (Windows), `ifconfig` (macOS), `netstat -i -f link`
/// (FreeBSD) or `netstat -ie` (others) is scanned. All-zero addresses and addresses with the
/// multicast bit set are ignored.
///
/// The host is inspected on the first call only and the outcome is kept for the lifetime of the
/// provider; interfaces added or removed afterwards are not noticed.
#[derive(Clone, Debug)]
pub struct FromOs<N> {
    next: N,
    cached: Option<Vec<[u8; 6]>>,
}

impl<N: NodeProvider> FromOs<N> {
    /// Creates a provider that defers to `next` when no hardware address is available.
    pub const fn new(next: N) -> Self {
        Self { next, cached: None }
    }
}

impl<N: NodeProvider> NodeProvider for FromOs<N> {
    fn nodes(&mut self) -> Vec<[u8; 6]> {
        let found = self.cached.get_or_insert_with(inspect_host);
        if found.is_empty() {
            tracing::debug!("no hardware address found; using fallback node provider");
            self.next.nodes()
        } else {
            found.clone()
        }
    }
}

/// Inspects the host once, trying the filesystem before console commands.
fn inspect_host() -> Vec<[u8; 6]> {
    let mut found = Vec::new();
    if cfg!(target_os = "linux") {
        found = read_sysfs(Path::new("/sys/class/net"));
    }
    if found.is_empty() {
        found = read_command_output();
    }
    tracing::debug!(count = found.len(), "found hardware addresses");
    found
}

/// Reads `<dir>/<interface>/address` files, in interface name order.
fn read_sysfs(dir: &Path) -> Vec<[u8; 6]> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::trace!(%err, ?dir, "could not list network interfaces");
            return Vec::new();
        }
    };

    let mut paths = entries
        .filter_map(Result::ok)
        .map(|e| e.path().join("address"))
        .collect::<Vec<_>>();
    paths.sort();

    paths
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .filter_map(|text| parse_address(text.trim()))
        .filter(is_hardware_address)
        .collect()
}

fn read_command_output() -> Vec<[u8; 6]> {
    let (program, args): (&str, &[&str]) = if cfg!(windows) {
        ("ipconfig", &["/all"])
    } else if cfg!(target_os = "macos") {
        ("ifconfig", &[])
    } else if cfg!(target_os = "freebsd") {
        ("netstat", &["-i", "-f", "link"])
    } else {
        ("netstat", &["-ie"])
    };

    match process::Command::new(program)
        .args(args)
        .stdin(process::Stdio::null())
        .stderr(process::Stdio::null())
        .output()
    {
        Ok(output) => scan_addresses(&String::from_utf8_lossy(&output.stdout)),
        Err(err) => {
            tracing::trace!(%err, program, "could not run network configuration command");
            Vec::new()
        }
    }
}

/// Picks every standalone `xx:xx:xx:xx:xx:xx` or `xx-xx-xx-xx-xx-xx` token out of free text.
fn scan_addresses(text: &str) -> Vec<[u8; 6]> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\b[0-9a-f]{2}(?:[:-][0-9a-f]{2}){5}\b").expect("invalid address pattern")
    });

    re.find_iter(text)
        .filter(|m| {
            // skip fragments of longer colon- or hyphen-separated sequences (e.g. IPv6)
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            !matches!(before, Some(':' | '-')) && !matches!(after, Some(':' | '-'))
        })
        .filter_map(|m| parse_address(m.as_str()))
        .filter(is_hardware_address)
        .collect()
}

/// Parses `xx:xx:xx:xx:xx:xx` or `xx-xx-xx-xx-xx-xx`, rejecting mixed separators.
fn parse_address(text: &str) -> Option<[u8; 6]> {
    let separator = text.chars().nth(2).filter(|c| *c == ':' || *c == '-')?;
    let groups = text.split(separator).collect::<Vec<_>>();
    if groups.len() != 6 || groups.iter().any(|e| e.len() != 2) {
        return None;
    }
    <[u8; 6]>::try_from(ByteBuf::from_hex(&groups.concat()).ok()?).ok()
}

fn is_hardware_address(node: &[u8; 6]) -> bool {
    node != &[0u8; 6] && node[0] & 0x01 == 0
}
