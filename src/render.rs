use crate::zone::Zone;

/// Lays out a zone file: directives, the SOA record with fixed timers, then
/// one line per record in input order followed by a blank line.
pub fn render_zone(zone: &Zone, record_lines: &[String]) -> String {
    let mut out = format!(
        "$ORIGIN {origin}
$TTL {ttl}
@             IN  SOA  {ns} {user} (
              {serial} ; serial number of this zone file
              1d             ; slave refresh (1 day)
              2h             ; slave retry time in case of a problem (2 hours)
              4w             ; slave expiration time (4 weeks)
              1h             ; maximum caching time in case of failed lookups (1 hour)
              )

",
        origin = zone.origin,
        ttl = zone.ttl,
        ns = zone.soa.ns,
        user = zone.soa.user,
        serial = zone.soa.serial,
    );

    for line in record_lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    out
}
