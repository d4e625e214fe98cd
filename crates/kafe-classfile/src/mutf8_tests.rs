use super::mutf8::{decode, encode};

#[test]
fn ascii_is_unchanged() {
    assert_eq!(encode("hello"), b"hello");
    assert_eq!(decode(b"hello").as_deref(), Some("hello"));
}

#[test]
fn nul_uses_two_byte_form() {
    assert_eq!(encode("a\0b"), vec![b'a', 0xC0, 0x80, b'b']);
    assert_eq!(decode(&[b'a', 0xC0, 0x80, b'b']).as_deref(), Some("a\0b"));
}

#[test]
fn raw_nul_is_rejected() {
    assert_eq!(decode(&[b'a', 0x00]), None);
}

#[test]
fn two_and_three_byte_characters() {
    // U+00E9 and U+20AC encode the same as standard UTF-8.
    assert_eq!(encode("é€"), "é€".as_bytes());
    assert_eq!(decode("é€".as_bytes()).as_deref(), Some("é€"));
}

#[test]
fn supplementary_characters_use_surrogate_pairs() {
    // U+1F600 -> D83D DE00 -> six bytes.
    let bytes = encode("\u{1F600}");
    assert_eq!(bytes, vec![0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]);
    assert_eq!(decode(&bytes).as_deref(), Some("\u{1F600}"));
}

#[test]
fn truncated_sequence_is_rejected() {
    assert_eq!(decode(&[0xE2, 0x82]), None);
    assert_eq!(decode(&[0xC3]), None);
}

#[test]
fn four_byte_standard_utf8_is_rejected() {
    assert_eq!(decode("\u{1F600}".as_bytes()), None);
}
