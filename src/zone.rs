use crate::document::ZoneDocument;
use crate::record::{FormattedRecord, Record, format_record};
use crate::render;
use crate::reverse::{self, ReverseMask};
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Zone {
    /// Domain name written as $ORIGIN; resolved to an `.arpa.` name for
    /// reverse zones.
    pub origin: String,
    pub ttl: String,
    pub soa: Soa,
    /// Shared by every PTR record of a reverse zone, `None` otherwise.
    pub mask: Option<ReverseMask>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone)]
pub struct Soa {
    pub ns: String,
    pub user: String,
    pub serial: String,
}

#[derive(Debug, Clone)]
pub struct RenderedZone {
    pub text: String,
    /// Records that could not be formatted and were written as comments.
    pub failures: usize,
}

impl RenderedZone {
    pub fn is_clean(&self) -> bool {
        self.failures == 0
    }
}

impl Zone {
    /// Validates a document and resolves it into a zone stamped with `serial`.
    pub fn from_document(document: ZoneDocument, serial: String) -> Result<Self> {
        document.validate()?;

        let (origin, mask) = if document.is_reverse() {
            let network = reverse::parse_cidr(&document.origin)?;
            let mask = reverse::compute_mask(&network)
                .with_context(|| format!("Invalid reverse origin {}", document.origin))?;
            let origin = reverse::origin_domain(&network.ip(), mask)?;

            tracing::info!(
                "Reverse zone {} resolved to {} ({} host labels per PTR record)",
                document.origin,
                origin,
                mask.labels()
            );
            (origin, Some(mask))
        } else {
            (document.origin, None)
        };

        let records = document
            .records
            .iter()
            .enumerate()
            .map(|(idx, raw)| {
                Record::from_value(raw, mask).context(format!("Invalid record #{}", idx + 1))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Zone {} has {} records, serial {}", origin, records.len(), serial);

        Ok(Zone {
            origin,
            ttl: document.ttl,
            soa: Soa {
                ns: document.soa.ns,
                user: document.soa.user,
                serial,
            },
            mask,
            records,
        })
    }

    pub fn format_records(&self) -> Vec<FormattedRecord> {
        self.records
            .iter()
            .map(|record| {
                let formatted = format_record(record, self.mask);
                if !formatted.recognized {
                    tracing::warn!(
                        "Unsupported record type {} in zone {}",
                        record.mnemonic(),
                        self.origin
                    );
                }
                formatted
            })
            .collect()
    }

    pub fn render(&self) -> RenderedZone {
        let formatted = self.format_records();
        let failures = formatted.iter().filter(|f| !f.recognized).count();
        let lines: Vec<String> = formatted.into_iter().map(|f| f.line).collect();

        RenderedZone {
            text: render::render_zone(self, &lines),
            failures,
        }
    }
}
