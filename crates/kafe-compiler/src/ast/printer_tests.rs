use indoc::indoc;

use crate::frontend::parse;

#[test]
fn print_program() {
    let source = indoc! {r#"
        private func area(w: int, h: short) -> int is
            return w * h;
        end

        routine main is
            p: geo.Point;
            n: int := 3 << 1;
            p.move(n, "x\n");
        end
    "#};
    let program = parse(source).unwrap();
    insta::assert_snapshot!(super::print(&program), @r#"
    Program
      private func area(w: int, h: short) -> int
        Return
          Binary *
            Ident w
            Ident h
      public routine main() -> void
        VarDecl p: geo.Point
        VarDecl n: int
          Binary <<
            Int 3
            Int 1
        Call p.move
          Ident n
          Str "x\n"
        Return
    "#);
}

#[test]
fn json_shape() {
    let program = parse("routine main is print(-1); end").unwrap();
    let json = serde_json::to_value(&program).unwrap();
    let function = &json["functions"][0];
    assert_eq!(function["name"], "main");
    assert_eq!(function["kind"], "routine");
    assert_eq!(function["visibility"], "public");
    assert_eq!(function["ret"], serde_json::Value::Null);
    assert_eq!(
        function["body"][0]["kind"]["Call"]["args"][0],
        serde_json::json!({ "Int": -1 })
    );
    assert_eq!(function["body"][1]["kind"]["Return"], serde_json::Value::Null);
}
