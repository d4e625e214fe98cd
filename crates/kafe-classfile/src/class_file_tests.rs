use super::class_file::{ClassFile, Code, MethodInfo};
use super::constant::{Constant, ConstantPool};
use super::error::EncodeError;
use super::format::AccessFlags;

/// `public static run()V { return; }` in class `Hello`.
pub(crate) fn sample_class() -> ClassFile {
    let mut pool = ConstantPool::new();
    let this_name = pool.push(Constant::Utf8("Hello".into())).unwrap();
    let this_class = pool.push(Constant::Class { name: this_name }).unwrap();
    let super_name = pool.push(Constant::Utf8("java/lang/Object".into())).unwrap();
    let super_class = pool.push(Constant::Class { name: super_name }).unwrap();
    let code_name = pool.push(Constant::Utf8("Code".into())).unwrap();
    let name = pool.push(Constant::Utf8("run".into())).unwrap();
    let descriptor = pool.push(Constant::Utf8("()V".into())).unwrap();

    let mut class = ClassFile::new(pool, this_class, super_class);
    class.methods.push(MethodInfo {
        access_flags: AccessFlags::PUBLIC | AccessFlags::STATIC,
        name_index: name,
        descriptor_index: descriptor,
        code: Some(Code {
            name_index: code_name,
            max_stack: 0,
            max_locals: 0,
            code: vec![0xB1],
        }),
    });
    class
}

#[test]
fn header_bytes() {
    let bytes = sample_class().to_bytes().unwrap();
    assert_eq!(
        &bytes[..10],
        &[0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34, 0x00, 0x08]
    );
}

#[test]
fn total_size() {
    // header 10, pool 52, class info 12, method 8, Code attribute 19, attributes 2
    let bytes = sample_class().to_bytes().unwrap();
    assert_eq!(bytes.len(), 103);
}

#[test]
fn code_attribute_layout() {
    let bytes = sample_class().to_bytes().unwrap();
    let method = &bytes[74..];
    assert_eq!(
        method,
        &[
            0x00, 0x09, // public static
            0x00, 0x06, // name #6
            0x00, 0x07, // descriptor #7
            0x00, 0x01, // one attribute
            0x00, 0x05, // "Code"
            0x00, 0x00, 0x00, 0x0D, // attribute length
            0x00, 0x00, // max_stack
            0x00, 0x00, // max_locals
            0x00, 0x00, 0x00, 0x01, // code length
            0xB1, // return
            0x00, 0x00, // exception table
            0x00, 0x00, // code attributes
            0x00, 0x00, // class attributes
        ]
    );
}

#[test]
fn attribute_length_tracks_code() {
    let code = Code {
        code: vec![0; 9],
        ..Code::default()
    };
    assert_eq!(code.attribute_length(), 21);
}

#[test]
fn class_flags_default() {
    let class = sample_class();
    assert_eq!(class.access_flags, AccessFlags::CLASS_DEFAULT);
    assert_eq!(class.access_flags.bits(), 0x0021);
}

#[test]
fn oversized_code_is_rejected() {
    let mut class = sample_class();
    class.methods[0].code.as_mut().unwrap().code = vec![0; 65_536];
    assert_eq!(class.to_bytes(), Err(EncodeError::CodeTooLarge(65_536)));
}

#[test]
fn method_lookup_by_name_and_descriptor() {
    let class = sample_class();
    assert!(class.method("run", "()V").is_some());
    assert!(class.method("run", "(I)V").is_none());
    assert_eq!(class.class_name(), Some("Hello"));
    assert_eq!(class.super_name(), Some("java/lang/Object"));
}
