mod common;

use common::*;
use scanforge::error::ScanForgeError;
use scanforge::keyset::{build_keyset, verify_records, Feed, KeyEvent, Keyset, Lookup, Translator};

fn set2_keyset() -> Keyset {
    build_keyset(&set2_records(), &set2_groups()).unwrap()
}

#[test]
fn test_translator_walks_a_byte_stream() {
    let ks = set2_keyset();
    let mut tr = Translator::new(&ks);

    // LGUI down, A down, A up, LGUI up
    let stream = [0xe0, 0x1f, 0x1c, 0xf0, 0x1c, 0xe0, 0xf0, 0x1f];
    let events: Vec<Feed> = stream.iter().map(|&b| tr.feed(b)).collect();

    let key = |key_code, is_break| Feed::Key(KeyEvent { key_code, is_break });
    assert_eq!(
        events,
        vec![
            Feed::Pending,
            key(LGUI, false),
            key(A, false),
            Feed::Pending,
            key(A, true),
            Feed::Pending,
            Feed::Pending,
            key(LGUI, true),
        ]
    );
    assert!(tr.pending().is_empty());
}

#[test]
fn test_unmapped_byte_resets_to_root() {
    let ks = set2_keyset();
    let mut tr = Translator::new(&ks);

    assert_eq!(tr.feed(0xe0), Feed::Pending);
    assert_eq!(tr.pending(), &[0xe0]);
    assert_eq!(tr.feed(0x99), Feed::Unmapped);
    assert!(tr.pending().is_empty());
    assert_eq!(
        tr.feed(0x1c),
        Feed::Key(KeyEvent {
            key_code: A,
            is_break: false
        })
    );
}

#[test]
fn test_lookup_reports_consumed_bytes() {
    let ks = set2_keyset();

    assert_eq!(
        ks.lookup(&[0xe0, 0xf0, 0x27]),
        Lookup::Key {
            event: KeyEvent {
                key_code: RGUI,
                is_break: true
            },
            consumed: 3
        }
    );
    assert_eq!(ks.lookup(&[0xe0, 0xf0]), Lookup::Incomplete);
    assert_eq!(ks.lookup(&[0x55]), Lookup::Unmapped { consumed: 1 });
    // Trailing bytes past a terminal cell are not consumed.
    assert!(matches!(
        ks.lookup(&[0x1c, 0x1c]),
        Lookup::Key { consumed: 1, .. }
    ));
}

#[test]
fn test_verify_accepts_built_keyset() {
    let ks = set2_keyset();
    verify_records(&ks, &set2_records()).unwrap();
}

#[test]
fn test_verify_catches_a_corrupted_image() {
    let ks = set2_keyset();
    let mut image = ks.to_bytes();

    // Flip A's make cell in the root to a break.
    image[0x1c * 2 + 1] = 0x01;
    let tampered = Keyset::from_bytes(&image).unwrap();

    let err = verify_records(&tampered, &set2_records()).unwrap_err();
    match err {
        ScanForgeError::Verification {
            label, sequence, ..
        } => {
            assert_eq!(label, "A");
            assert_eq!(sequence, vec![0x1c]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_image_round_trip_preserves_decoding() {
    let ks = set2_keyset();
    let reparsed = Keyset::from_bytes(&ks.to_bytes()).unwrap();

    assert_eq!(reparsed, ks);
    verify_records(&reparsed, &set2_records()).unwrap();
}

#[test]
fn test_block_index_past_the_image_is_rejected() {
    let ks = set2_keyset();
    assert_eq!(ks.try_block(3).unwrap().index(), 3);
    assert!(matches!(
        ks.try_block(4),
        Err(ScanForgeError::BlockOutOfRange { block: 4, blocks: 4 })
    ));
}
