use mdxgen::mdx::{
    func, ident, lit_float, lit_int, prefix, property, set, Expr, MemberRef, Name, Segment, Syntax,
};
use mdxgen::parser::{ExpressionParser, MdxParser};

fn normalise(text: &str) -> String {
    MdxParser.parse_expression(text).unwrap().to_mdx()
}

#[test]
fn test_normalises_brackets() {
    assert_eq!(
        normalise("{[Product].[Drink], [Store].[USA].[San Francisco]}"),
        "{Product.Drink, Store.USA.[San Francisco]}"
    );
}

#[test]
fn test_output_parses_back_to_same_tree() {
    let text = "Order(Filter([Product].[Brand].Members, [Measures].[Sales] > 100), [Measures].[Sales], BDESC)";
    let first = MdxParser.parse_expression(text).unwrap();
    let second = MdxParser.parse_expression(&first.to_mdx()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_nested_functions() {
    let expr = MdxParser
        .parse_expression("Hierarchize(CrossJoin({[Time].[2024]}, [Product].Children), POST)")
        .unwrap();
    assert_eq!(
        expr,
        func(
            "Hierarchize",
            vec![
                func(
                    "CrossJoin",
                    vec![
                        set(vec![ident(["Time", "2024"])]),
                        property(ident(["Product"]), "Children"),
                    ]
                ),
                ident(["POST"]),
            ]
        )
    );
}

#[test]
fn test_condition_with_strings_and_functions() {
    assert_eq!(
        normalise("InStr([Product].CurrentMember.Name, 'Beer') > 0 OR [Measures].[Sales] >= 10"),
        "((InStr(Product.CurrentMember.Name, \"Beer\") > 0) OR (Measures.Sales >= 10))"
    );
}

#[test]
fn test_whitespace_is_ignored() {
    assert_eq!(
        normalise("  {  [A] ,\n [B]  }  "),
        "{A, B}"
    );
}

#[test]
fn test_floats_and_negatives() {
    assert_eq!(normalise("-1.5 * [Measures].[Cost]"), "(-1.5 * Measures.Cost)");
}

#[test]
fn test_method_call_syntax() {
    let expr = MdxParser.parse_expression("[Time].[2024].Lead(2)").unwrap();
    let (name, args) = expr.as_call(Syntax::Method).unwrap();
    assert_eq!(name, "Lead");
    assert_eq!(args.len(), 2);
}

#[test]
fn test_errors() {
    for text in ["", "{[A], }", "[A", "Foo(1, 2", "1 +", "{[A]} extra"] {
        let err = MdxParser.parse_expression(text).unwrap_err();
        assert_eq!(err.input, text);
        assert!(err.span.end <= text.len() + 1, "{:?}", err);
    }
}

#[test]
fn test_reserved_word_segments_are_bracketed() {
    let expr = Expr::Identifier(mdxgen::mdx::Name::new(["Axis", "ROWS"]));
    assert_eq!(expr.to_mdx(), "Axis.[ROWS]");
    assert_eq!(MdxParser.parse_expression("[Axis].[ROWS]").unwrap(), expr);
}

#[test]
fn test_navigation_word_member_round_trips() {
    let member: Expr = MemberRef::new(["Product", "Children"]).into();
    let text = set(vec![member]).to_mdx();
    assert_eq!(text, "{Product.[Children]}");
    assert_eq!(
        MdxParser.parse_expression(&text).unwrap(),
        set(vec![ident(["Product", "Children"])])
    );

    let navigation = MdxParser.parse_expression("{Product.Children}").unwrap();
    assert_eq!(navigation, set(vec![property(ident(["Product"]), "Children")]));
}

#[test]
fn test_member_key_references() {
    let expr = MdxParser.parse_expression("{[Time].&[2024], [Time].&[2024].&[Q1]}").unwrap();
    assert_eq!(
        expr,
        set(vec![
            Expr::Identifier(Name::new([Segment::from("Time"), Segment::key("2024")])),
            Expr::Identifier(Name::new([
                Segment::from("Time"),
                Segment::key("2024"),
                Segment::key("Q1"),
            ])),
        ])
    );
    assert_eq!(expr.to_mdx(), "{Time.&[2024], Time.&[2024].&[Q1]}");
    assert_eq!(MdxParser.parse_expression(&expr.to_mdx()).unwrap(), expr);
}

#[test]
fn test_out_of_range_float_is_rejected() {
    let text = format!("1{}.0", "0".repeat(400));
    let err = MdxParser.parse_expression(&text).unwrap_err();
    assert_eq!(err.input, text);
    assert!(MdxParser.parse_expression("1e400").is_err());
}

#[test]
fn test_exponent_and_leading_dot_numbers() {
    assert_eq!(MdxParser.parse_expression("1e5").unwrap(), lit_float(100000.0));
    assert_eq!(MdxParser.parse_expression(".5").unwrap(), lit_float(0.5));
    assert_eq!(normalise("[Measures].[Rate] * 1.5E-2"), "(Measures.Rate * 0.015)");
}

#[test]
fn test_double_negation_is_not_a_comment() {
    let text = normalise("- -3");
    assert_eq!(text, "- -3");
    assert_eq!(
        MdxParser.parse_expression(&text).unwrap(),
        prefix("-", prefix("-", lit_int(3)))
    );
}
