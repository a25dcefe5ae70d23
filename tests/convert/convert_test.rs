use insta::assert_snapshot;
use mdxgen::convert::{convert, to_select, ConvertError, ConvertOptions};
use mdxgen::mdx::{AxisLocation, CubeRef, Expr, LevelRef, MemberRef, Name};
use mdxgen::model::{
    Filter, HierarchizeMode, QueryAxis, QueryHierarchy, QueryLevel, QueryModel, SortOrder,
    SortSpec, TopNFunction,
};
use mdxgen::parser::{ExpressionParser, MdxParser, ParseError};

fn sales() -> QueryModel {
    QueryModel::new(CubeRef::new(["Sales"]))
}

fn single_level(hierarchy: &str, level: &[&str]) -> QueryHierarchy {
    QueryHierarchy::new(hierarchy).level(QueryLevel::new(LevelRef::new(level.iter().copied())))
}

#[test]
fn test_measures_on_columns() {
    let query = sales().with_axis(
        AxisLocation::Columns,
        QueryAxis::new().hierarchy(single_level("Measures", &["Measures"])),
    );

    let stmt = to_select(&query).unwrap();

    assert_eq!(stmt.with.len(), 1);
    assert_eq!(stmt.with[0].name, Name::simple("AxisCOLUMNS"));
    assert_eq!(stmt.with[0].expr.to_mdx(), "{Measures.AllMembers}");
    assert_eq!(stmt.axes.len(), 1);
    assert_eq!(stmt.axes[0].location, AxisLocation::Columns);
    assert_eq!(stmt.axes[0].expr, Expr::Identifier(Name::simple("AxisCOLUMNS")));
    assert!(stmt.axis(AxisLocation::Rows).is_none());
    assert!(stmt.filter.is_none());

    assert_snapshot!(stmt.to_mdx(), @r"
    WITH
    SET AxisCOLUMNS AS {Measures.AllMembers}
    SELECT
    AxisCOLUMNS ON COLUMNS
    FROM Sales
    ");
}

#[test]
fn test_two_hierarchies_on_rows() {
    let query = sales().with_axis(
        AxisLocation::Rows,
        QueryAxis::new()
            .hierarchy(single_level("Product", &["Product"]))
            .hierarchy(single_level("Customer", &["Customer"])),
    );

    let stmt = to_select(&query).unwrap();

    assert_eq!(stmt.with.len(), 1);
    assert_eq!(
        stmt.with[0].expr.to_mdx(),
        "CrossJoin({Product.AllMembers}, {Customer.AllMembers})"
    );
    assert_eq!(stmt.axes.len(), 1);
    assert_eq!(stmt.axes[0].location, AxisLocation::Rows);
    assert!(stmt.axis(AxisLocation::Columns).is_none());
}

#[test]
fn test_full_statement() {
    let rows = QueryAxis::new()
        .non_empty(true)
        .hierarchy(
            QueryHierarchy::new("Product").level(
                QueryLevel::new(LevelRef::new(["Product", "Product Family"]))
                    .include(MemberRef::new(["Product", "Drink"]))
                    .include(MemberRef::new(["Product", "Food"]))
                    .exclude(MemberRef::new(["Product", "Food"])),
            ),
        )
        .hierarchy(single_level("Store", &["Store", "Store Country"]))
        .sorted(SortSpec::new("[Measures].[Unit Sales]", SortOrder::BDesc));

    let query = sales()
        .with_axis(
            AxisLocation::Columns,
            QueryAxis::new()
                .non_empty(true)
                .hierarchy(single_level("Measures", &["Measures"])),
        )
        .with_axis(AxisLocation::Rows, rows)
        .with_axis(AxisLocation::Filter, QueryAxis::new().mdx("[Time].[2024]"));

    let stmt = to_select(&query).unwrap();

    assert_snapshot!(stmt.to_mdx(), @r"
    WITH
    SET AxisCOLUMNS AS {Measures.AllMembers}
    SET AxisROWS AS Order(CrossJoin({Except({Product.Drink, Product.Food}, {Product.Food})}, {Store.[Store Country].AllMembers}), [Measures].[Unit Sales], BDESC)
    SET AxisFILTER AS {Time.[2024]}
    SELECT
    NON EMPTY AxisCOLUMNS ON COLUMNS,
    NON EMPTY AxisROWS ON ROWS
    FROM Sales
    WHERE AxisFILTER
    ");
}

#[test]
fn test_conversion_is_deterministic() {
    let query = sales()
        .with_axis(
            AxisLocation::Rows,
            QueryAxis::new()
                .hierarchy(single_level("Product", &["Product", "Family"]))
                .hierarchy(single_level("Time", &["Time", "Year"]))
                .hierarchized(HierarchizeMode::Post),
        )
        .with_axis(
            AxisLocation::Columns,
            QueryAxis::new().hierarchy(single_level("Measures", &["Measures"])),
        );

    let first = to_select(&query).unwrap();
    let second = to_select(&query).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_mdx(), second.to_mdx());
}

#[test]
fn test_empty_axes_are_omitted() {
    let query = sales()
        .with_axis(AxisLocation::Columns, QueryAxis::new().non_empty(true))
        .with_axis(
            AxisLocation::Rows,
            QueryAxis::new().hierarchy(single_level("Product", &["Product"])),
        )
        .with_axis(AxisLocation::Filter, QueryAxis::new());

    let stmt = to_select(&query).unwrap();

    assert_eq!(stmt.with.len(), 1);
    assert_eq!(stmt.with[0].name, Name::simple("AxisROWS"));
    assert_eq!(stmt.axes.len(), 1);
    assert!(stmt.filter.is_none());
    assert!(stmt.binding(&Name::simple("AxisCOLUMNS")).is_none());
}

#[test]
fn test_exclusions_are_scoped_to_their_level() {
    let hierarchy = QueryHierarchy::new("Product")
        .level(
            QueryLevel::new(LevelRef::new(["Product", "Family"]))
                .include(MemberRef::new(["Product", "A"]))
                .include(MemberRef::new(["Product", "B"]))
                .exclude(MemberRef::new(["Product", "B"])),
        )
        .level(
            QueryLevel::new(LevelRef::new(["Product", "Department"]))
                .include(MemberRef::new(["Product", "B"])),
        );
    let query = sales().with_axis(AxisLocation::Rows, QueryAxis::new().hierarchy(hierarchy));

    let stmt = to_select(&query).unwrap();
    assert_eq!(
        stmt.with[0].expr.to_mdx(),
        "{Except({Product.A, Product.B}, {Product.B}), {Product.B}}"
    );
}

#[test]
fn test_cross_join_nests_to_the_right() {
    let axis = ["A", "B", "C", "D"]
        .into_iter()
        .fold(QueryAxis::new(), |axis, name| {
            axis.hierarchy(single_level(name, &[name]))
        });
    let query = sales().with_axis(AxisLocation::Columns, axis);

    let stmt = to_select(&query).unwrap();
    assert_eq!(
        stmt.with[0].expr.to_mdx(),
        "CrossJoin({A.AllMembers}, CrossJoin({B.AllMembers}, CrossJoin({C.AllMembers}, {D.AllMembers})))"
    );
}

#[test]
fn test_sort_takes_precedence_over_hierarchize() {
    let level = QueryLevel::new(LevelRef::new(["Time", "Year"]))
        .hierarchized(HierarchizeMode::Pre)
        .sorted(SortSpec::new("[Measures].[Sales]", SortOrder::Asc));
    let axis = QueryAxis::new()
        .hierarchy(QueryHierarchy::new("Time").level(level))
        .hierarchized(HierarchizeMode::Post)
        .sorted(SortSpec::new("[Measures].[Cost]", SortOrder::Desc));
    let query = sales().with_axis(AxisLocation::Rows, axis);

    let mdx = to_select(&query).unwrap().with[0].expr.to_mdx();
    assert_eq!(
        mdx,
        "Order({Order(Time.Year.AllMembers, [Measures].[Sales], ASC)}, [Measures].[Cost], DESC)"
    );
    assert!(!mdx.contains("Hierarchize"));
}

#[test]
fn test_identifier_depends_only_on_location() {
    let one = sales().with_axis(
        AxisLocation::Rows,
        QueryAxis::new().hierarchy(single_level("Product", &["Product"])),
    );
    let other = sales().with_axis(
        AxisLocation::Rows,
        QueryAxis::new()
            .mdx("[Time].[2024]")
            .filter(Filter::top_n(TopNFunction::TopCount, 5, None)),
    );

    let a = to_select(&one).unwrap();
    let b = to_select(&other).unwrap();
    assert_eq!(a.with[0].name, b.with[0].name);
    assert_eq!(a.axes[0].expr, b.axes[0].expr);
}

#[test]
fn test_raw_axis_expression() {
    let query = sales().with_axis(
        AxisLocation::Columns,
        QueryAxis::new()
            .mdx("[Measures].[Unit Sales], [Measures].[Store Cost]")
            .hierarchized(HierarchizeMode::Post),
    );

    let stmt = to_select(&query).unwrap();
    assert_eq!(
        stmt.with[0].expr.to_mdx(),
        "Hierarchize({Measures.[Unit Sales], Measures.[Store Cost]}, POST)"
    );
    assert_eq!(stmt.axes[0].expr, Expr::Identifier(Name::simple("AxisCOLUMNS")));
}

#[test]
fn test_filters_apply_in_declared_order() {
    let axis = QueryAxis::new()
        .hierarchy(single_level("Product", &["Product", "Brand"]))
        .filter(Filter::generic("[Measures].[Sales] > 0"))
        .filter(Filter::top_n(TopNFunction::TopCount, 10, Some("[Measures].[Sales]")));
    let query = sales().with_axis(AxisLocation::Rows, axis);

    let stmt = to_select(&query).unwrap();
    assert_eq!(
        stmt.with[0].expr.to_mdx(),
        "TopCount(Filter({Product.Brand.AllMembers}, (Measures.Sales > 0)), 10, Measures.Sales)"
    );
}

#[test]
fn test_level_filters_apply_before_level_sort() {
    let level = QueryLevel::new(LevelRef::new(["Product", "Brand"]))
        .filter(Filter::Name {
            hierarchy: Name::simple("Product"),
            names: vec!["Acme".into()],
            exclude: true,
        })
        .sorted(SortSpec::new("[Measures].[Sales]", SortOrder::Desc));
    let query = sales().with_axis(
        AxisLocation::Rows,
        QueryAxis::new().hierarchy(QueryHierarchy::new("Product").level(level)),
    );

    let stmt = to_select(&query).unwrap();
    assert_eq!(
        stmt.with[0].expr.to_mdx(),
        "{Order(Filter(Product.Brand.AllMembers, NOT (Product.CurrentMember.Name = \"Acme\")), [Measures].[Sales], DESC)}"
    );
}

#[test]
fn test_syntax_error_aborts_conversion() {
    let query = sales()
        .with_axis(
            AxisLocation::Columns,
            QueryAxis::new().hierarchy(single_level("Measures", &["Measures"])),
        )
        .with_axis(AxisLocation::Rows, QueryAxis::new().mdx("[Product].("));

    let err = to_select(&query).unwrap_err();
    assert!(matches!(err, ConvertError::Syntax(_)));
    assert!(err.to_string().starts_with("Syntax error in '{[Product].(}'"));
}

#[test]
fn test_out_of_range_number_is_a_syntax_error() {
    let text = format!("1{}.0", "0".repeat(400));
    let query = sales().with_axis(AxisLocation::Columns, QueryAxis::new().mdx(&text));

    let err = to_select(&query).unwrap_err();
    assert!(matches!(err, ConvertError::Syntax(_)));
}

#[test]
fn test_member_named_like_navigation_keeps_its_meaning() {
    let query = sales().with_axis(
        AxisLocation::Rows,
        QueryAxis::new().hierarchy(
            QueryHierarchy::new("Product").level(
                QueryLevel::new(LevelRef::new(["Product", "Family"]))
                    .include(MemberRef::new(["Product", "Children"])),
            ),
        ),
    );

    let stmt = to_select(&query).unwrap();
    let text = stmt.with[0].expr.to_mdx();
    assert_eq!(text, "{{Product.[Children]}}");

    let reparsed = MdxParser.parse_expression("Product.[Children]").unwrap();
    assert_eq!(reparsed, Expr::Identifier(Name::new(["Product", "Children"])));
}

#[test]
fn test_custom_parser_is_used_for_raw_text() {
    let parser = |text: &str| -> Result<Expr, ParseError> {
        Ok(Expr::Identifier(Name::simple(format!("parsed:{}", text))))
    };
    let query = sales().with_axis(AxisLocation::Rows, QueryAxis::new().mdx("anything"));

    let stmt = convert(&query, &parser, &ConvertOptions::default()).unwrap();
    assert_eq!(
        stmt.with[0].expr,
        Expr::Identifier(Name::simple("parsed:{anything}"))
    );
}

#[test]
fn test_parser_error_is_passed_through_unchanged() {
    let expected = ParseError::new("{x}", 1..2, "unsupported");
    let failing = {
        let expected = expected.clone();
        move |_: &str| -> Result<Expr, ParseError> { Err(expected.clone()) }
    };
    let query = sales().with_axis(AxisLocation::Rows, QueryAxis::new().mdx("x"));

    let err = convert(&query, &failing, &ConvertOptions::default()).unwrap_err();
    assert_eq!(err, ConvertError::Syntax(expected));
}

#[test]
fn test_conversion_from_many_threads() {
    let query = sales().with_axis(
        AxisLocation::Rows,
        QueryAxis::new()
            .hierarchy(single_level("Product", &["Product"]))
            .filter(Filter::generic("[Measures].[Sales] > 0")),
    );
    let expected = to_select(&query).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| to_select(&query).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });

    assert!(MdxParser.parse_expression("{}").is_ok());
}
