use anyhow::{Context, Result, bail};
use ipnetwork::IpNetwork;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    pub fn of(address: &IpAddr) -> Self {
        match address {
            IpAddr::V4(_) => AddressFamily::V4,
            IpAddr::V6(_) => AddressFamily::V6,
        }
    }

    /// Prefix bits covered by one reverse label: an octet or a nibble.
    fn bits_per_label(self) -> u8 {
        match self {
            AddressFamily::V4 => 8,
            AddressFamily::V6 => 4,
        }
    }

    fn label_count(self) -> usize {
        match self {
            AddressFamily::V4 => 4,
            AddressFamily::V6 => 32,
        }
    }

    fn arpa_suffix(self) -> &'static str {
        match self {
            AddressFamily::V4 => "in-addr.arpa.",
            AddressFamily::V6 => "ip6.arpa.",
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Number of leading reversed address labels that name a host inside the
/// reverse zone. The remaining labels form the zone's $ORIGIN.
///
/// Only [`compute_mask`] builds one, so `labels` never exceeds the label
/// count of `family`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReverseMask {
    family: AddressFamily,
    labels: usize,
}

impl ReverseMask {
    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn labels(&self) -> usize {
        self.labels
    }
}

/// Parses a reverse zone origin such as `203.0.113.0/24` or `2001:db8::/32`.
pub fn parse_cidr(origin: &str) -> Result<IpNetwork> {
    let origin = origin.trim();
    if !origin.contains('/') {
        bail!("Reverse origin {} has no prefix length", origin);
    }

    IpNetwork::from_str(origin).with_context(|| format!("Invalid reverse origin {}", origin))
}

/// IPv4: `4 - prefix / 8`, IPv6: `32 - prefix / 4`.
///
/// IPv4 prefixes round down to the enclosing octet, so a /25 shares the
/// zone of its /24. IPv6 prefixes must fall on a nibble boundary.
pub fn compute_mask(network: &IpNetwork) -> Result<ReverseMask> {
    let family = AddressFamily::of(&network.ip());
    let prefix = network.prefix();
    let step = family.bits_per_label();

    if family == AddressFamily::V6 && prefix % step != 0 {
        bail!(
            "{} prefix length /{} is not a multiple of {}",
            family,
            prefix,
            step
        );
    }

    let covered = usize::from(prefix / step);
    let total = family.label_count();
    if covered > total {
        bail!("{} prefix length /{} is too long", family, prefix);
    }

    Ok(ReverseMask {
        family,
        labels: total - covered,
    })
}

/// The $ORIGIN of the reverse zone holding `address`.
pub fn origin_domain(address: &IpAddr, mask: ReverseMask) -> Result<String> {
    let (_, network) = split_reversed(address, mask)?;
    let suffix = mask.family.arpa_suffix();

    if network.is_empty() {
        Ok(suffix.to_string())
    } else {
        Ok(format!("{}.{}", network.join("."), suffix))
    }
}

/// The owner name of the PTR record for `address`, relative to the origin.
pub fn reverse_host(address: &IpAddr, mask: ReverseMask) -> Result<String> {
    let (host, _) = split_reversed(address, mask)?;
    Ok(host.join("."))
}

/// Address labels least-significant first: octets for IPv4, nibbles of the
/// fully expanded address for IPv6.
fn reversed_labels(address: &IpAddr) -> Vec<String> {
    match address {
        IpAddr::V4(ipv4) => ipv4.octets().iter().rev().map(|o| o.to_string()).collect(),
        IpAddr::V6(ipv6) => ipv6
            .octets()
            .iter()
            .rev()
            .flat_map(|byte| [byte & 0x0f, byte >> 4])
            .map(|nibble| format!("{:x}", nibble))
            .collect(),
    }
}

fn split_reversed(address: &IpAddr, mask: ReverseMask) -> Result<(Vec<String>, Vec<String>)> {
    let family = AddressFamily::of(address);
    if family != mask.family {
        bail!(
            "{} address {} does not belong to an {} reverse zone",
            family,
            address,
            mask.family
        );
    }

    let mut host = reversed_labels(address);
    let network = host.split_off(mask.labels);
    Ok((host, network))
}
