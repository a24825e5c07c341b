#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::{A, CNAME};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use std::net::Ipv4Addr;

/// Case is kept as written so case-variant questions stay distinct.
pub fn name(domain: &str) -> Name {
    Name::from_ascii(domain).unwrap()
}

/// A recursive query with a random ID, as a stub resolver would send it.
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

/// The upstream's answer to `query`, carrying `answers`.
pub fn build_response(query: &Message, answers: Vec<Record>) -> Message {
    let mut message = query.clone();
    message
        .set_message_type(MessageType::Response)
        .set_recursion_available(true)
        .add_answers(answers);
    message
}

pub fn a_record(domain: &str, ip: [u8; 4]) -> Record {
    Record::from_rdata(name(domain), 300, RData::A(A(Ipv4Addr::from(ip))))
}

pub fn cname_record(domain: &str, target: &str) -> Record {
    Record::from_rdata(name(domain), 300, RData::CNAME(CNAME(name(target))))
}

pub fn encode(message: &Message) -> Vec<u8> {
    message.to_vec().unwrap()
}

pub fn decode(bytes: &[u8]) -> Message {
    Message::from_vec(bytes).unwrap()
}
