use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Zone converted by `--example`.
pub const EXAMPLE: &str = r#"
origin: example.com.
ttl: 1h
soa:
  ns: ns1.example.com.
  user: hostmaster.example.com.
records:
  - type: NS
    value: ns1.example.com.
  - type: NS
    value: ns2.example.com.
  - type: MX
    priority: 10
    value: mx.example.com.
  - type: A
    host: ns1
    value: 203.0.113.1
  - type: A
    host: ns2
    value: 203.0.113.2
  - type: AAAA
    host: ns1
    value: "2001:db8::1"
  - type: A
    host: mx
    value: 203.0.113.25
  - type: A
    host: www
    value: 203.0.113.80
  - type: CNAME
    host: ftp
    value: www
"#;

/// The YAML description of a zone as written by the user.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ZoneDocument {
    /// Domain name, or `address/prefix` for reverse zones.
    pub origin: String,

    #[serde(deserialize_with = "scalar_string")]
    pub ttl: String,

    pub soa: SoaDocument,

    #[serde(default, rename = "type")]
    pub zone_type: Option<String>,

    /// Raw record mappings; their shape depends on each record's type.
    pub records: Vec<serde_yaml::Value>,
}

/// Any `serial` given here is ignored; zones are always stamped when
/// generated.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SoaDocument {
    pub ns: String,
    pub user: String,
}

/// Accepts `3600` as well as `1h` for text fields; both are emitted verbatim.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Integer(n) => n.to_string(),
    })
}

impl ZoneDocument {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read zone document")?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let document: ZoneDocument =
            serde_yaml::from_str(content).context("Failed to parse YAML zone document")?;

        Ok(document)
    }

    pub fn example() -> Result<Self> {
        Self::parse(EXAMPLE)
    }

    pub fn is_reverse(&self) -> bool {
        self.zone_type.as_deref() == Some("reverse")
    }

    pub fn validate(&self) -> Result<()> {
        if self.origin.trim().is_empty() {
            anyhow::bail!("Zone origin cannot be empty");
        }

        if self.ttl.trim().is_empty() {
            anyhow::bail!("Zone TTL cannot be empty");
        }

        if self.soa.ns.trim().is_empty() {
            anyhow::bail!("SOA name server cannot be empty");
        }

        if self.soa.user.trim().is_empty() {
            anyhow::bail!("SOA user cannot be empty");
        }

        Ok(())
    }
}
