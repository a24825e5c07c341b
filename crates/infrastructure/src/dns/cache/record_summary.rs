use hickory_proto::rr::{RData, Record};

/// `name ttl TYPE value` for one record, where value is the address for
/// A/AAAA, the target for CNAME and the presentation form otherwise.
pub fn describe_record(record: &Record) -> String {
    let value = match record.data() {
        RData::A(a) => a.0.to_string(),
        RData::AAAA(aaaa) => aaaa.0.to_string(),
        RData::CNAME(cname) => cname.0.to_string(),
        other => other.to_string(),
    };

    format!(
        "{} {}s {} {}",
        record.name(),
        record.ttl(),
        record.record_type(),
        value
    )
}

pub fn summarize_records(records: &[Record]) -> String {
    records
        .iter()
        .map(describe_record)
        .collect::<Vec<_>>()
        .join(", ")
}
