use super::class_file::{ClassFile, Code, MethodInfo};
use super::class_file_tests::sample_class;
use super::colors::Colors;
use super::constant::{Constant, ConstantPool};
use super::dump::dump;
use super::format::AccessFlags;

#[test]
fn dump_minimal_class() {
    let out = dump(&sample_class(), Colors::PLAIN);
    insta::assert_snapshot!(out, @r"
    [class]
    name     Hello
    super    java/lang/Object
    version  52.0
    flags    0x0021

    [constant_pool]
    #1  Utf8        Hello
    #2  Class       #1 ; Hello
    #3  Utf8        java/lang/Object
    #4  Class       #3 ; java/lang/Object
    #5  Utf8        Code
    #6  Utf8        run
    #7  Utf8        ()V

    [methods]
    public static run()V
      stack=0 locals=0 code=1
      0000  return
    ");
}

/// Class whose `main` prints a string through `System.out`.
fn printing_class() -> ClassFile {
    fn utf8(pool: &mut ConstantPool, s: &str) -> u16 {
        pool.push(Constant::Utf8(s.into())).unwrap()
    }

    let mut pool = ConstantPool::new();

    let n = utf8(&mut pool, "Greeter");
    let this_class = pool.push(Constant::Class { name: n }).unwrap();
    let n = utf8(&mut pool, "java/lang/Object");
    let super_class = pool.push(Constant::Class { name: n }).unwrap();
    let code = utf8(&mut pool, "Code");

    let n = utf8(&mut pool, "java/lang/System");
    let system = pool.push(Constant::Class { name: n }).unwrap();
    let name = utf8(&mut pool, "out");
    let descriptor = utf8(&mut pool, "Ljava/io/PrintStream;");
    let nt = pool.push(Constant::NameAndType { name, descriptor }).unwrap();
    let out_field = pool
        .push(Constant::FieldRef {
            class: system,
            name_and_type: nt,
        })
        .unwrap();

    let n = utf8(&mut pool, "java/io/PrintStream");
    let stream = pool.push(Constant::Class { name: n }).unwrap();
    let name = utf8(&mut pool, "println");
    let descriptor = utf8(&mut pool, "(Ljava/lang/String;)V");
    let nt = pool.push(Constant::NameAndType { name, descriptor }).unwrap();
    let println = pool
        .push(Constant::MethodRef {
            class: stream,
            name_and_type: nt,
        })
        .unwrap();

    let text = utf8(&mut pool, "hi\n");
    let string = pool.push(Constant::String { utf8: text }).unwrap();
    let main = utf8(&mut pool, "main");
    let main_desc = utf8(&mut pool, "([Ljava/lang/String;)V");

    let [f_hi, f_lo] = out_field.to_be_bytes();
    let [p_hi, p_lo] = println.to_be_bytes();
    let mut class = ClassFile::new(pool, this_class, super_class);
    class.methods.push(MethodInfo {
        access_flags: AccessFlags::PUBLIC | AccessFlags::STATIC,
        name_index: main,
        descriptor_index: main_desc,
        code: Some(Code {
            name_index: code,
            max_stack: 2,
            max_locals: 1,
            code: vec![0xB2, f_hi, f_lo, 0x12, string as u8, 0xB6, p_hi, p_lo, 0xB1],
        }),
    });
    class
}

#[test]
fn dump_resolves_instruction_operands() {
    let out = dump(&printing_class(), Colors::PLAIN);
    assert!(out.contains("public static main([Ljava/lang/String;)V\n"));
    assert!(out.contains("  stack=2 locals=1 code=9\n"));
    assert!(out.contains("  0000  getstatic #11 ; java/lang/System.out:Ljava/io/PrintStream;\n"));
    assert!(out.contains("  0003  ldc #19 ; \"hi\\n\"\n"));
    assert!(out.contains(
        "  0005  invokevirtual #17 ; java/io/PrintStream.println:(Ljava/lang/String;)V\n"
    ));
    assert!(out.contains("  0008  return\n"));
}

#[test]
fn dump_pool_uses_padded_indices() {
    let out = dump(&printing_class(), Colors::PLAIN);
    assert!(out.contains("#1   Utf8        Greeter\n"));
    assert!(out.contains("#11  Fieldref    #7.#10 ; java/lang/System.out:Ljava/io/PrintStream;\n"));
    assert!(out.contains("#10  NameAndType #8:#9 ; out:Ljava/io/PrintStream;\n"));
    assert!(out.contains("#18  Utf8        hi\\n\n"));
}

#[test]
fn dump_reports_undecodable_code() {
    let mut class = sample_class();
    class.methods[0].code.as_mut().unwrap().code = vec![0xFF];
    let out = dump(&class, Colors::PLAIN);
    assert!(out.contains("  <undecodable: unknown opcode 0xff at code offset 0>"));
}

#[test]
fn dump_with_colors() {
    let plain = dump(&sample_class(), Colors::PLAIN);
    let colored = dump(&sample_class(), Colors::ANSI);
    assert!(!plain.contains('\x1b'));
    assert!(colored.contains("\x1b[33mreturn\x1b[0m"));
    assert!(Colors::new(true).is_enabled());
    assert!(!Colors::default().is_enabled());
}
