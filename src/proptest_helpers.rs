use chrono::{DateTime, Utc};
use proptest::prelude::*;
use serde_yaml::{Mapping, Value};
use std::net::{Ipv4Addr, Ipv6Addr};

pub fn arb_dns_label() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('a', 'z'), 1..=63)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

pub fn arb_dns_name() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_dns_label(), 1..=4)
        .prop_filter("DNS name must be <= 253 chars total", |labels| {
            labels.join(".").len() < 253
        })
        .prop_map(|labels| format!("{}.", labels.join(".")))
}

pub fn arb_ipv4() -> impl Strategy<Value = Ipv4Addr> {
    any::<[u8; 4]>().prop_map(Ipv4Addr::from)
}

pub fn arb_ipv6() -> impl Strategy<Value = Ipv6Addr> {
    any::<[u8; 16]>().prop_map(Ipv6Addr::from)
}

pub fn arb_ipv4_prefix() -> impl Strategy<Value = u8> {
    0u8..=32
}

/// Nibble-aligned IPv6 prefix lengths, /0 through /128.
pub fn arb_ipv6_prefix() -> impl Strategy<Value = u8> {
    (0u8..=32).prop_map(|nibbles| nibbles * 4)
}

fn record_mapping(entries: Vec<(&str, Value)>) -> Value {
    let mut mapping = Mapping::new();
    for (key, value) in entries {
        mapping.insert(Value::from(key), value);
    }
    Value::Mapping(mapping)
}

/// Raw YAML records of the forward-zone types.
pub fn arb_forward_record() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_dns_name().prop_map(|ns| record_mapping(vec![
            ("type", Value::from("NS")),
            ("value", Value::from(ns)),
        ])),
        (any::<u16>(), arb_dns_name()).prop_map(|(priority, mx)| record_mapping(vec![
            ("type", Value::from("mx")),
            ("priority", Value::from(priority)),
            ("value", Value::from(mx)),
        ])),
        (arb_dns_label(), arb_ipv4()).prop_map(|(host, ip)| record_mapping(vec![
            ("type", Value::from("A")),
            ("host", Value::from(host)),
            ("value", Value::from(ip.to_string())),
        ])),
        (arb_dns_label(), arb_ipv6()).prop_map(|(host, ip)| record_mapping(vec![
            ("type", Value::from("AAAA")),
            ("host", Value::from(host)),
            ("value", Value::from(ip.to_string())),
        ])),
        (arb_dns_label(), arb_dns_name()).prop_map(|(host, target)| record_mapping(vec![
            ("type", Value::from("Cname")),
            ("host", Value::from(host)),
            ("value", Value::from(target)),
        ])),
    ]
}

pub fn arb_unknown_type() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("SRV".to_string()),
        Just("TXT".to_string()),
        Just("CAA".to_string()),
        Just("SOA".to_string()),
        "[A-Z]{5,8}".prop_filter("CNAME is a known type", |s| s.as_str() != "CNAME"),
    ]
}

pub fn arb_unknown_record() -> impl Strategy<Value = Value> {
    (arb_unknown_type(), arb_dns_name()).prop_map(|(kind, value)| {
        record_mapping(vec![("type", Value::from(kind)), ("value", Value::from(value))])
    })
}

/// Timestamps whose year fits in four digits.
pub fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..=253_402_300_799)
        .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_default())
}
