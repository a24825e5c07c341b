#![allow(dead_code)]

use dnsrelay_domain::{KeyCasePolicy, QuestionKey};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX, NS, NULL, PTR, SOA, SRV, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType};

pub fn name(domain: &str) -> Name {
    Name::from_ascii(domain).unwrap()
}

pub fn key(domain: &str, record_type: RecordType) -> QuestionKey {
    QuestionKey::derive(domain, u16::from(record_type), KeyCasePolicy::Preserve)
}

pub fn build_query(domain: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(fastrand::u16(..))
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .add_query(Query::query(name(domain), record_type));
    message
}

pub fn build_response(query: &Message, answers: Vec<Record>) -> Message {
    let mut message = query.clone();
    message
        .set_message_type(MessageType::Response)
        .set_recursion_available(true)
        .add_answers(answers);
    message
}

pub fn a_record(domain: &str, octets: [u8; 4]) -> Record {
    let [a, b, c, d] = octets;
    Record::from_rdata(name(domain), 300, RData::A(A::new(a, b, c, d)))
}

/// One record of every type the snapshot format has to carry, plus one
/// type hickory has no parser for.
pub fn one_of_each_record_type() -> Vec<Record> {
    let owner = name("example.com.");
    vec![
        a_record("example.com.", [93, 184, 216, 34]),
        Record::from_rdata(
            owner.clone(),
            300,
            RData::AAAA(AAAA::new(0x2606, 0x2800, 0x220, 0x1, 0x248, 0x1893, 0x25c8, 0x1946)),
        ),
        Record::from_rdata(
            name("www.example.com."),
            300,
            RData::CNAME(CNAME(owner.clone())),
        ),
        Record::from_rdata(owner.clone(), 86400, RData::NS(NS(name("a.iana-servers.net.")))),
        Record::from_rdata(
            owner.clone(),
            3600,
            RData::SOA(SOA::new(
                name("ns.icann.org."),
                name("noc.dns.icann.org."),
                2024081401,
                7200,
                3600,
                1209600,
                3600,
            )),
        ),
        Record::from_rdata(
            name("34.216.184.93.in-addr.arpa."),
            300,
            RData::PTR(PTR(owner.clone())),
        ),
        Record::from_rdata(owner.clone(), 300, RData::MX(MX::new(10, name("mail.example.com.")))),
        Record::from_rdata(
            name("_sip._udp.example.com."),
            300,
            RData::SRV(SRV::new(10, 60, 5060, name("sip.example.com."))),
        ),
        Record::from_rdata(
            owner.clone(),
            300,
            RData::TXT(TXT::new(vec!["v=spf1 -all".to_string(), "hello world".to_string()])),
        ),
        Record::from_rdata(
            owner,
            300,
            RData::Unknown {
                code: RecordType::Unknown(65400),
                rdata: NULL::with(vec![0xca, 0xfe, 0xba, 0xbe]),
            },
        ),
    ]
}
