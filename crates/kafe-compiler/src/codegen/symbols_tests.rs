use super::error::{CodegenError, SymbolKind};
use super::symbols::SymbolResolver;
use crate::ast::Type;
use crate::emit::SlotCategory;

#[test]
fn instance_locals_start_at_one() {
    let mut symbols = SymbolResolver::new("Test", false);
    assert_eq!(symbols.declare_local("x", &Type::Int), Ok(1));
    assert_eq!(symbols.declare_local("s", &Type::String), Ok(2));
    assert_eq!(symbols.max_locals(), 3);
}

#[test]
fn static_locals_start_at_zero() {
    let mut symbols = SymbolResolver::new("Test", true);
    assert_eq!(symbols.declare_local("x", &Type::Int), Ok(0));
    assert_eq!(symbols.max_locals(), 1);
}

#[test]
fn anonymous_reservation_shifts_locals() {
    let mut symbols = SymbolResolver::new("Test", true);
    assert_eq!(symbols.reserve_anonymous(), 0);
    assert_eq!(symbols.declare_local("x", &Type::Int), Ok(1));
}

#[test]
fn categories_share_one_counter() {
    let mut symbols = SymbolResolver::new("Test", true);
    let i = symbols.declare_local("i", &Type::Int).unwrap();
    let t = symbols.declare_object_local("t", "java/lang/Thread").unwrap();
    let c = symbols.declare_local("c", &Type::Char).unwrap();
    assert_eq!((i, t, c), (0, 1, 2));
}

#[test]
fn slot_of_checks_category() {
    let mut symbols = SymbolResolver::new("Test", true);
    symbols.declare_local("n", &Type::Short).unwrap();
    assert_eq!(symbols.slot_of("n", SlotCategory::Int), Ok(0));
    assert_eq!(
        symbols.slot_of("n", SlotCategory::Reference),
        Err(CodegenError::TypeMismatch {
            expected: "reference".into(),
            found: "short".into()
        })
    );
}

#[test]
fn undeclared_variable_is_unresolved() {
    let symbols = SymbolResolver::new("Test", true);
    assert_eq!(
        symbols.slot_of("ghost", SlotCategory::Int),
        Err(CodegenError::UnresolvedSymbol {
            kind: SymbolKind::Variable,
            name: "ghost".into()
        })
    );
}

#[test]
fn class_of_object_local() {
    let mut symbols = SymbolResolver::new("Test", true);
    symbols.declare_local("n", &Type::Int).unwrap();
    symbols.declare_object_local("t", "java/lang/Thread").unwrap();
    assert_eq!(symbols.class_of("t"), Ok(("java/lang/Thread", 1)));
    assert!(matches!(
        symbols.class_of("n"),
        Err(CodegenError::TypeMismatch { .. })
    ));
}

#[test]
fn this_resolves_to_enclosing_class() {
    let symbols = SymbolResolver::new("Test", false);
    assert_eq!(symbols.class_of("this"), Ok(("Test", 0)));

    let symbols = SymbolResolver::new("Test", true);
    assert!(matches!(
        symbols.class_of("this"),
        Err(CodegenError::Unsupported(_))
    ));
}

#[test]
fn int64_is_rejected() {
    let mut symbols = SymbolResolver::new("Test", true);
    assert!(matches!(
        symbols.declare_local("l", &Type::Int64),
        Err(CodegenError::Unsupported(_))
    ));
    assert_eq!(symbols.max_locals(), 0);
}

#[test]
fn slots_past_a_byte_are_rejected() {
    let mut symbols = SymbolResolver::new("Test", true);
    for i in 0..256 {
        symbols.declare_local(&format!("v{i}"), &Type::Int).unwrap();
    }
    assert_eq!(
        symbols.declare_local("overflow", &Type::Int),
        Err(CodegenError::TooManyLocals(256))
    );
}
