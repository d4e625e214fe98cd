use super::class_file::ClassFile;
use super::class_file_tests::sample_class;
use super::error::ParseError;

fn sample_bytes() -> Vec<u8> {
    sample_class().to_bytes().unwrap()
}

#[test]
fn parse_written_class() {
    let class = ClassFile::parse(&sample_bytes()).unwrap();
    assert_eq!(class, sample_class());
}

#[test]
fn too_small() {
    assert_eq!(
        ClassFile::parse(&[0xCA, 0xFE]),
        Err(ParseError::FileTooSmall(2))
    );
}

#[test]
fn invalid_magic() {
    let mut bytes = sample_bytes();
    bytes[0] = 0xCB;
    assert_eq!(ClassFile::parse(&bytes), Err(ParseError::InvalidMagic));
}

#[test]
fn truncated() {
    let mut bytes = sample_bytes();
    bytes.pop();
    assert_eq!(
        ClassFile::parse(&bytes),
        Err(ParseError::UnexpectedEof { offset: 102 })
    );
}

#[test]
fn trailing_bytes() {
    let mut bytes = sample_bytes();
    bytes.push(0);
    assert_eq!(ClassFile::parse(&bytes), Err(ParseError::TrailingBytes(1)));
}

#[test]
fn unknown_constant_tag() {
    let mut bytes = sample_bytes();
    bytes[10] = 3;
    assert_eq!(
        ClassFile::parse(&bytes),
        Err(ParseError::UnknownConstantTag { tag: 3, index: 1 })
    );
}

#[test]
fn dangling_pool_reference() {
    let mut bytes = sample_bytes();
    // Class #2 sits right after the 8-byte "Hello" entry.
    assert_eq!(bytes[18], 7);
    bytes[19] = 0x00;
    bytes[20] = 0x09;
    assert_eq!(
        ClassFile::parse(&bytes),
        Err(ParseError::BadConstantIndex { index: 9 })
    );
}

#[test]
fn interfaces_are_unsupported() {
    let mut bytes = sample_bytes();
    bytes[69] = 1;
    assert_eq!(
        ClassFile::parse(&bytes),
        Err(ParseError::UnsupportedSection("interfaces"))
    );
}

#[test]
fn unknown_method_attribute_is_skipped() {
    let mut bytes = sample_bytes();
    // Bump the method attribute count and append a 2-byte attribute named "run" (#6)
    // before the class attribute count.
    bytes[81] = 2;
    let tail = bytes.split_off(bytes.len() - 2);
    bytes.extend_from_slice(&[0x00, 0x06, 0x00, 0x00, 0x00, 0x02, 0xAB, 0xCD]);
    bytes.extend_from_slice(&tail);

    let class = ClassFile::parse(&bytes).unwrap();
    assert_eq!(class.methods[0].code, sample_class().methods[0].code);
}
