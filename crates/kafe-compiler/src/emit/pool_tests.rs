use kafe_classfile::Constant;

use super::pool::ConstantPoolBuilder;

#[test]
fn import_class_is_cached() {
    let mut pool = ConstantPoolBuilder::new();
    let a = pool.import_class("A").unwrap();
    let b = pool.import_class("B").unwrap();
    assert_eq!(pool.import_class("A").unwrap(), a);
    assert!(a < b);
    assert_eq!((a, b), (2, 4));
    assert_eq!(pool.len(), 4);
}

#[test]
fn utf8_is_never_deduplicated() {
    let mut pool = ConstantPoolBuilder::new();
    assert_eq!(pool.intern_utf8("x").unwrap(), 1);
    assert_eq!(pool.intern_utf8("x").unwrap(), 2);
}

#[test]
fn import_method_layout() {
    let mut pool = ConstantPoolBuilder::new();
    let index = pool
        .import_method("java/io/PrintStream", "println", "(I)V")
        .unwrap();
    assert_eq!(index, 6);
    let raw = pool.pool();
    assert_eq!(raw.get(5), Some(&Constant::NameAndType { name: 3, descriptor: 4 }));
    assert_eq!(
        raw.get(6),
        Some(&Constant::MethodRef {
            class: 2,
            name_and_type: 5
        })
    );
    let member = raw.member_ref(6).unwrap();
    assert_eq!(
        (member.class, member.name, member.descriptor),
        ("java/io/PrintStream", "println", "(I)V")
    );
}

#[test]
fn reimport_duplicates_but_lookup_takes_first() {
    let mut pool = ConstantPoolBuilder::new();
    let first = pool.import_method("A", "run", "()V").unwrap();
    let second = pool.import_method("A", "run", "()V").unwrap();
    assert_ne!(first, second);
    assert_eq!(pool.methods().len(), 2);
    assert_eq!(pool.find_method("run", Some("A"), Some("()V")), Some(first));
}

#[test]
fn overload_resolution() {
    let mut pool = ConstantPoolBuilder::new();
    let string = pool
        .import_method("java/io/PrintStream", "println", "(Ljava/lang/String;)V")
        .unwrap();
    let int = pool
        .import_method("java/io/PrintStream", "println", "(I)V")
        .unwrap();
    let other = pool.import_method("Other", "println", "(I)V").unwrap();

    assert_eq!(
        pool.find_method("println", Some("java/io/PrintStream"), Some("(I)V")),
        Some(int)
    );
    assert_eq!(pool.find_method("println", None, None), Some(string));
    assert_eq!(pool.find_method("println", Some("Other"), None), Some(other));
    assert_eq!(pool.find_method("println", None, Some("(I)V")), Some(int));
    assert_eq!(pool.find_method("print", None, None), None);
    assert_eq!(pool.find_method("println", Some("Missing"), None), None);
}

#[test]
fn field_import() {
    let mut pool = ConstantPoolBuilder::new();
    let out = pool
        .import_field("java/lang/System", "java/io/PrintStream", "out")
        .unwrap();
    assert_eq!(out, 8);
    assert_eq!(pool.field("out"), Some(8));
    assert_eq!(
        pool.import_field("java/lang/System", "java/io/PrintStream", "out")
            .unwrap(),
        8
    );
    let member = pool.pool().member_ref(out).unwrap();
    assert_eq!(member.class, "java/lang/System");
    assert_eq!(member.name, "out");
    assert_eq!(member.descriptor, "Ljava/io/PrintStream;");
    // The field's type class is imported alongside the owner.
    assert_eq!(pool.import_class("java/io/PrintStream").unwrap(), 4);
}

#[test]
fn string_constants_are_cached() {
    let mut pool = ConstantPoolBuilder::new();
    let hello = pool.intern_string_constant("hello").unwrap();
    let world = pool.intern_string_constant("world").unwrap();
    assert_eq!(pool.intern_string_constant("hello").unwrap(), hello);
    assert_eq!((hello, world), (2, 4));
    assert_eq!(pool.pool().string_value(hello), Some("hello"));
}

#[test]
fn find_or_import_reuses_first_row() {
    let mut pool = ConstantPoolBuilder::new();
    let first = pool.find_or_import_method("A", "run", "()V").unwrap();
    let len = pool.len();
    assert_eq!(pool.find_or_import_method("A", "run", "()V"), Ok(first));
    assert_eq!(pool.len(), len);
    assert_ne!(pool.find_or_import_method("A", "run", "(I)V"), Ok(first));
}
