use crate::document::scalar_string;
use crate::reverse::{self, AddressFamily, ReverseMask};
use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_yaml::Value;
use std::net::IpAddr;

const OWNER_WIDTH: usize = 16;
const TYPE_WIDTH: usize = 6;

/// One entry of the `records` list, checked against the fields its type
/// needs. Types outside the supported set are kept verbatim in `Unknown`
/// so they can be reported in the generated zone file.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Ns { value: String },
    Mx { priority: u16, value: String },
    A { host: String, value: String },
    Aaaa { host: String, value: String },
    Cname { host: String, value: String },
    Ptr { address: IpAddr, host: String },
    Unknown { kind: String, raw: Value },
}

#[derive(Debug, Deserialize)]
struct ValueFields {
    #[serde(deserialize_with = "scalar_string")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct MxFields {
    priority: u16,
    #[serde(deserialize_with = "scalar_string")]
    value: String,
}

#[derive(Debug, Deserialize)]
struct HostFields {
    #[serde(deserialize_with = "scalar_string")]
    host: String,
    #[serde(deserialize_with = "scalar_string")]
    value: String,
}

impl Record {
    /// Builds a record from its YAML mapping. `mask` is the reverse mask of
    /// the enclosing zone, `None` for forward zones.
    pub fn from_value(raw: &Value, mask: Option<ReverseMask>) -> Result<Self> {
        if !raw.is_mapping() {
            bail!("Record must be a mapping, got {}", dump(raw));
        }

        let kind = raw
            .get("type")
            .ok_or_else(|| anyhow!("Record has no type: {}", dump(raw)))?
            .as_str()
            .ok_or_else(|| anyhow!("Record type must be a string: {}", dump(raw)))?;

        let record = match kind.to_ascii_lowercase().as_str() {
            "ns" => {
                let fields: ValueFields = typed_fields(raw, "NS")?;
                Record::Ns {
                    value: fields.value,
                }
            }
            "mx" => {
                let fields: MxFields = typed_fields(raw, "MX")?;
                Record::Mx {
                    priority: fields.priority,
                    value: fields.value,
                }
            }
            "a" => {
                let fields: HostFields = typed_fields(raw, "A")?;
                Record::A {
                    host: fields.host,
                    value: fields.value,
                }
            }
            "aaaa" => {
                let fields: HostFields = typed_fields(raw, "AAAA")?;
                Record::Aaaa {
                    host: fields.host,
                    value: fields.value,
                }
            }
            "cname" => {
                let fields: HostFields = typed_fields(raw, "CNAME")?;
                Record::Cname {
                    host: fields.host,
                    value: fields.value,
                }
            }
            "ptr" => {
                let fields: HostFields = typed_fields(raw, "PTR")?;
                let address: IpAddr = fields
                    .value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid PTR address {}", fields.value))?;

                let Some(mask) = mask else {
                    bail!("PTR record for {} requires a reverse zone", address);
                };
                if AddressFamily::of(&address) != mask.family() {
                    bail!(
                        "PTR address {} does not match the {} reverse zone",
                        address,
                        mask.family()
                    );
                }

                Record::Ptr {
                    address,
                    host: fields.host,
                }
            }
            _ => Record::Unknown {
                kind: kind.to_string(),
                raw: raw.clone(),
            },
        };

        Ok(record)
    }

    /// The record type as written in the zone file.
    pub fn mnemonic(&self) -> &str {
        match self {
            Record::Ns { .. } => "NS",
            Record::Mx { .. } => "MX",
            Record::A { .. } => "A",
            Record::Aaaa { .. } => "AAAA",
            Record::Cname { .. } => "CNAME",
            Record::Ptr { .. } => "PTR",
            Record::Unknown { kind, .. } => kind,
        }
    }
}

fn typed_fields<T: for<'de> Deserialize<'de>>(raw: &Value, kind: &str) -> Result<T> {
    serde_yaml::from_value(raw.clone())
        .with_context(|| format!("Invalid {} record: {}", kind, dump(raw)))
}

/// Compact one-line rendering of a raw record for diagnostics.
fn dump(raw: &Value) -> String {
    serde_json::to_string(raw).unwrap_or_else(|_| format!("{:?}", raw))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    pub line: String,
    /// False when the line is an error comment instead of a record.
    pub recognized: bool,
}

impl FormattedRecord {
    fn error(detail: String) -> Self {
        FormattedRecord {
            line: format!("; error in record: {}", detail),
            recognized: false,
        }
    }
}

/// Formats one record as a zone file line. Unknown types yield a comment
/// line with `recognized` cleared rather than an error.
pub fn format_record(record: &Record, mask: Option<ReverseMask>) -> FormattedRecord {
    let (owner, rdata) = match record {
        Record::Ns { value } => (String::new(), value.clone()),
        Record::Mx { priority, value } => (String::new(), format!("{}  {}", priority, value)),
        Record::A { host, value } | Record::Aaaa { host, value } | Record::Cname { host, value } => {
            (host.clone(), value.clone())
        }
        Record::Ptr { address, host } => {
            match mask.map(|mask| reverse::reverse_host(address, mask)) {
                Some(Ok(owner)) => (owner, host.clone()),
                _ => {
                    let detail = serde_json::json!({
                        "type": "PTR",
                        "host": host,
                        "value": address.to_string(),
                    });
                    return FormattedRecord::error(detail.to_string());
                }
            }
        }
        Record::Unknown { raw, .. } => return FormattedRecord::error(dump(raw)),
    };

    FormattedRecord {
        line: format!(
            "{:<owner_width$} IN  {:<type_width$} {}",
            owner,
            record.mnemonic(),
            rdata,
            owner_width = OWNER_WIDTH,
            type_width = TYPE_WIDTH,
        ),
        recognized: true,
    }
}
