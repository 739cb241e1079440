use ferrous_resolv_domain::WireError;
use ferrous_resolv_infrastructure::dns::name_codec::NAME_MAX;
use ferrous_resolv_infrastructure::dns::wire::QUERY_CAPACITY;
use ferrous_resolv_infrastructure::dns::{MessageBuilder, Rejection, ResponseValidator};
use std::net::Ipv4Addr;

mod helpers;
use helpers::builders::{wire_name, ResponseBuilder, CLASS_IN, TYPE_A, TYPE_CNAME, TYPE_PTR};

const ID: u16 = 0x4242;
const ADDRESS: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

fn a_query(hostname: &str) -> Vec<u8> {
    let mut buf = [0u8; QUERY_CAPACITY];
    let len = MessageBuilder::a_query(&mut buf, ID, hostname, None).unwrap();
    buf[..len].to_vec()
}

fn ptr_query(address: Ipv4Addr) -> Vec<u8> {
    let mut buf = [0u8; QUERY_CAPACITY];
    let len = MessageBuilder::ptr_query(&mut buf, ID, address).unwrap();
    buf[..len].to_vec()
}

// ============================================================================
// Header and question checks
// ============================================================================

#[test]
fn test_accepts_matching_a_answer() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query).a(ADDRESS).build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Ok(ADDRESS)
    );
}

#[test]
fn test_rejects_header_only_datagram() {
    let query = a_query("example.com");
    let response = &ResponseBuilder::for_query(&query).a(ADDRESS).build()[..12];

    assert_eq!(
        ResponseValidator::address_answer(&query, response, ID),
        Err(Rejection::TooShort(12))
    );
}

#[test]
fn test_rejects_wrong_transaction_id() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .id(ID + 1)
        .a(ADDRESS)
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::IdMismatch {
            expected: ID,
            got: ID + 1
        })
    );
}

#[test]
fn test_rejects_query_echoed_back() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .flags(0x0100)
        .a(ADDRESS)
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::NotResponse)
    );
}

#[test]
fn test_rejects_question_count_other_than_one() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .qdcount(2)
        .a(ADDRESS)
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::QuestionCount(2))
    );
}

#[test]
fn test_rejects_empty_answer_section() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query).build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::NoAnswers)
    );
}

#[test]
fn test_rejects_single_byte_echo_mismatch() {
    let query = a_query("example.com");
    let mut response = ResponseBuilder::for_query(&query).a(ADDRESS).build();
    // flip one letter of the echoed question name
    response[14] ^= 0x20;

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::QuestionMismatch)
    );
}

#[test]
fn test_rejects_different_question_type() {
    let query = a_query("example.com");
    let mut response = ResponseBuilder::for_query(&query).a(ADDRESS).build();
    // QTYPE low byte of the echoed question
    response[query.len() - 3] = 0x1c;

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::QuestionMismatch)
    );
}

#[test]
fn test_rejects_truncated_question() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query).a(ADDRESS).build();
    let cut = &response[..query.len() - 2];

    assert_eq!(
        ResponseValidator::address_answer(&query, cut, ID),
        Err(Rejection::Malformed(WireError::Truncated))
    );
}

// ============================================================================
// Answer records
// ============================================================================

#[test]
fn test_skips_cname_before_address() {
    let query = a_query("www.example.com");
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_CNAME, CLASS_IN, &wire_name("example.com"))
        .a(ADDRESS)
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Ok(ADDRESS)
    );
}

#[test]
fn test_first_address_wins() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .a(ADDRESS)
        .a(Ipv4Addr::new(10, 0, 0, 1))
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Ok(ADDRESS)
    );
}

#[test]
fn test_ignores_address_with_wrong_length() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_A, CLASS_IN, &[10, 0, 0])
        .a(ADDRESS)
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Ok(ADDRESS)
    );
}

#[test]
fn test_ignores_address_in_other_class() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_A, 3, &[10, 0, 0, 1])
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::NoMatchingRecord("A"))
    );
}

#[test]
fn test_rejects_answer_count_beyond_records() {
    let query = a_query("example.com");
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_CNAME, CLASS_IN, &wire_name("example.net"))
        .ancount(2)
        .build();

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::Malformed(WireError::Truncated))
    );
}

#[test]
fn test_rejects_rdata_past_end() {
    let query = a_query("example.com");
    let mut response = ResponseBuilder::for_query(&query).a(ADDRESS).build();
    response.truncate(response.len() - 2);

    assert_eq!(
        ResponseValidator::address_answer(&query, &response, ID),
        Err(Rejection::Malformed(WireError::Truncated))
    );
}

#[test]
fn test_decodes_ptr_answer() {
    let query = ptr_query(ADDRESS);
    let response = ResponseBuilder::for_query(&query).ptr("example.com").build();

    let mut out = [0u8; NAME_MAX];
    let len = ResponseValidator::name_answer(&query, &response, ID, &mut out).unwrap();
    assert_eq!(&out[..len], b"example.com");
}

#[test]
fn test_decodes_compressed_ptr_answer() {
    let query = ptr_query(ADDRESS);
    // "host" followed by a pointer to the "in-addr.arpa" labels of the question
    let suffix_offset = 12 + 3 + 4 + 4 + 3;
    let rdata = [
        0x04,
        b'h',
        b'o',
        b's',
        b't',
        0xc0,
        suffix_offset as u8,
    ];
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_PTR, CLASS_IN, &rdata)
        .build();

    let mut out = [0u8; NAME_MAX];
    let len = ResponseValidator::name_answer(&query, &response, ID, &mut out).unwrap();
    assert_eq!(&out[..len], b"host.in-addr.arpa");
}

#[test]
fn test_ptr_answer_pointing_at_question_name() {
    let query = ptr_query(Ipv4Addr::new(10, 0, 0, 1));
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_PTR, CLASS_IN, &[0xc0, 0x0c])
        .build();

    let mut out = [0u8; NAME_MAX];
    let len = ResponseValidator::name_answer(&query, &response, ID, &mut out).unwrap();
    assert_eq!(&out[..len], b"1.0.0.10.in-addr.arpa");
}

#[test]
fn test_undecodable_ptr_rejects_datagram() {
    let query = ptr_query(ADDRESS);
    let response = ResponseBuilder::for_query(&query)
        .record(TYPE_PTR, CLASS_IN, &[0xc1, 0xff])
        .ptr("example.com")
        .build();

    let mut out = [0u8; NAME_MAX];
    assert_eq!(
        ResponseValidator::name_answer(&query, &response, ID, &mut out),
        Err(Rejection::Malformed(WireError::PointerOutOfRange(0x1ff)))
    );
}

#[test]
fn test_ptr_lookup_ignores_address_records() {
    let query = ptr_query(ADDRESS);
    let response = ResponseBuilder::for_query(&query).a(ADDRESS).build();

    let mut out = [0u8; NAME_MAX];
    assert_eq!(
        ResponseValidator::name_answer(&query, &response, ID, &mut out),
        Err(Rejection::NoMatchingRecord("PTR"))
    );
}
