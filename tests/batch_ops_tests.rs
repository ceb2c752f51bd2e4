//! tests/batch_ops_tests.rs
//! One candidate against many records

mod common;

use common::{vectors, KNOWN_PASSWORD, KNOWN_RECORD};
use pbkdf2_md5_rs::{parse_record, verify_records_batch, CredentialRecord};

#[test]
fn flags_follow_input_order() {
    let records: Vec<CredentialRecord> = vectors()
        .iter()
        .map(|v| parse_record(&v.record).unwrap())
        .collect();

    let flags = verify_records_batch(&records, KNOWN_PASSWORD).unwrap();
    let expected: Vec<bool> = vectors()
        .iter()
        .map(|v| v.password.as_bytes() == KNOWN_PASSWORD)
        .collect();

    assert_eq!(flags, expected);
    assert_eq!(flags.iter().filter(|&&f| f).count(), 2);
}

#[test]
fn candidate_cut_like_a_batch_slot() {
    let long = vec![b'a'; 200];
    let records = vec![
        // over all 200 bytes
        parse_record("$pbkdf2-hmac-md5$10$73616c74$cf74d4e83763ec36a9dc2131f257f951").unwrap(),
        // over the first 125 bytes
        parse_record("$pbkdf2-hmac-md5$10$73616c74$6102f97a3e4a85f9606739545996a094").unwrap(),
    ];
    assert_eq!(verify_records_batch(&records, &long).unwrap(), vec![false, true]);

    let pass =
        parse_record("$pbkdf2-hmac-md5$10$73616c74$cb079a5e3ce3e3eedff3ab4faa1f2b31").unwrap();
    assert_eq!(verify_records_batch(&[pass], b"pass\0word").unwrap(), vec![true]);
}

#[test]
fn empty_record_list() {
    assert!(verify_records_batch(&[], b"anything").unwrap().is_empty());
}

#[test]
fn wrong_candidate_matches_nothing() {
    let records = vec![parse_record(KNOWN_RECORD).unwrap(); 8];
    let flags = verify_records_batch(&records, b"Password").unwrap();
    assert!(flags.iter().all(|&f| !f));
}
