use pretty_assertions::assert_eq;
use querycraft::prelude::*;

struct Fixture {
    users: TableIdent,
    articles: TableIdent,
}

fn fixture() -> Fixture {
    let mut schema = Schema::new();
    schema.add_table("users").unwrap();
    for column in ["id", "name", "created_at"] {
        schema.add_column("users", column).unwrap();
    }
    schema.add_table("articles").unwrap();
    schema.add_column("articles", "id").unwrap();
    schema
        .add_reference_column("articles", "author", ForeignRef::new("users", "id"))
        .unwrap();
    Fixture {
        users: schema.try_table("users").unwrap(),
        articles: schema.try_table("articles").unwrap(),
    }
}

/// Every statement the checks below run over, argument-heavy on purpose so
/// PostgreSQL markers reach two digits.
fn statements(f: &Fixture) -> Vec<Statement> {
    let id = f.users.column("id").unwrap();
    let name = f.users.column("name").unwrap().with_alias("n");
    let created = f.users.column("created_at").unwrap();

    let wide = select([
        Projection::from(name.clone()),
        concat_ws("-", [Element::from(&id), Element::from("x")]).with_alias("tag").into(),
        cast(&id, DataType::Char).with_alias("id_text").into(),
        extract(IntervalUnit::Year, created.clone()).into(),
        ltrim_chars(name.clone(), "_").with_alias("clean").into(),
        literal(true).with_alias("flag").into(),
        current_date().into(),
    ])
    .filter(is_in(&id, [1, 2, 3, 4, 5]))
    .filter(not_in(&name, ["a", "b", "c"]))
    .filter(or(like(&name, "%z"), between(&id, 10, 20)))
    .group_by([name.clone()])
    .having(gt(count(&id), 1))
    .order_by([desc(max(&id)), asc(&name)])
    .limit_with_offset(50, 100);

    let joined = select([
        Projection::from(f.articles.column("id").unwrap()),
        Projection::from(name.clone()),
    ])
    .join_on_reference(&f.users)
    .unwrap()
    .filter(is_null(created));

    vec![
        wide.into(),
        joined.into(),
        insert(&f.users).value("id", 1).value("name", "ann").build().unwrap().into(),
        update(&f.users.with_alias("u"))
            .set("name", "bo")
            .filter(ne(&id, 3))
            .build()
            .unwrap()
            .into(),
        delete(&f.users).filter(lte(&id, 9)).unwrap().into(),
    ]
}

#[test]
fn test_size_and_arg_count_agree_with_output() {
    let f = fixture();
    for scanner in [
        Scanner::mysql(),
        Scanner::postgres(),
        Scanner::postgres().with_separator("\n").with_prefix("\n"),
    ] {
        for statement in statements(&f) {
            let (sql, args) = scanner.string_args(&statement);
            assert_eq!(
                sql.len(),
                statement.size(&scanner)
                    + scanner.interpolation_width(statement.arg_count())
                    + scanner.prefix().len()
            );
            assert_eq!(args.len(), statement.arg_count());
        }
    }
}

#[test]
fn test_postgres_markers_are_consecutive() {
    let f = fixture();
    for statement in statements(&f) {
        let (sql, args) = statement.to_sql_with_dialect(Dialect::Postgres);
        let markers: Vec<usize> = sql
            .split('$')
            .skip(1)
            .map(|rest| {
                rest.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
                    .parse()
                    .unwrap()
            })
            .collect();
        let expected: Vec<usize> = (1..=args.len()).collect();
        assert_eq!(markers, expected);
    }
}

#[test]
fn test_values_never_inlined() {
    let f = fixture();
    for statement in statements(&f) {
        let (sql, _) = statement.to_sql();
        assert!(!sql.contains("ann"));
        assert!(!sql.contains("%z"));
        assert!(!sql.contains('\''));
    }
}

#[test]
fn test_alias_only_in_select_list() {
    let f = fixture();
    let name = f.users.column("name").unwrap().with_alias("n");
    let positions: Vec<(String, Vec<Value>)> = vec![
        desc(&name).to_sql(),
        max(&name).to_sql(),
        eq(&name, 1).to_sql(),
        List::new([&name, &name]).to_sql(),
        trim(&name).to_sql(),
        select([&f.users]).group_by([&name]).to_sql(),
        select([&f.users])
            .group_by([&name])
            .having(gt(count(&name), 1))
            .to_sql(),
        select([f.articles.column("id").unwrap()])
            .join(
                &f.users,
                eq(
                    f.articles.column("author").unwrap().with_alias("writer"),
                    f.users.column("id").unwrap().with_alias("uid"),
                ),
            )
            .unwrap()
            .to_sql(),
    ];
    for (sql, _) in positions {
        assert!(!sql.contains(" AS "), "alias leaked into {sql}");
    }

    let (sql, _) = cast(&name, DataType::Char).to_sql();
    assert_eq!(sql, "CAST(users.name AS CHAR)");

    let (sql, _) = select([name]).to_sql();
    assert_eq!(sql, "SELECT users.name AS n FROM users");
}

#[test]
fn test_derived_round_trip() {
    let f = fixture();
    let inner = select([f.users.column("id").unwrap()]).filter(eq(f.users.column("id").unwrap(), 3));
    let (inner_sql, inner_args) = inner.to_sql();

    let derived = inner.with_alias("a");
    let (sql, args) = derived.to_sql();
    assert_eq!(sql, format!("({inner_sql}) AS a"));
    assert_eq!(args, inner_args);
    assert_eq!(derived.select().to_sql(), (inner_sql, inner_args));
}

#[test]
fn test_where_chain_matches_and() {
    let f = fixture();
    let id = f.users.column("id").unwrap();
    let name = f.users.column("name").unwrap();

    let chained = select([&f.users]).filter(eq(&id, 1)).filter(eq(&name, "x")).to_sql();
    let combined = select([&f.users]).filter(and(eq(&id, 1), eq(&name, "x"))).to_sql();

    assert_eq!(
        chained.0,
        "SELECT users.id, users.name, users.created_at FROM users WHERE users.id = ? AND users.name = ?"
    );
    assert_eq!(combined.0.replace(['(', ')'], ""), chained.0);
    assert_eq!(combined.1, chained.1);
}

#[test]
fn test_in_single_value_and_limits() {
    let f = fixture();
    let id = f.users.column("id").unwrap();
    assert_eq!(is_in(&id, [7]).to_sql().0, "users.id IN (?)");

    let (_, args) = select([&id]).limit(3).to_sql();
    assert_eq!(args, vec![Value::UInt(3)]);
    let (_, args) = select([&id]).limit_with_offset(3, 6).to_sql();
    assert_eq!(args, vec![Value::UInt(3), Value::UInt(6)]);
}

#[test]
fn test_insert_and_update_never_alias() {
    let f = fixture();
    let u = f.users.with_alias("u");
    let insert = Insert::new(
        &u,
        vec![u.column("name").unwrap().with_alias("nm")],
        vec![Value::from("ann")],
    )
    .unwrap();
    let update = Update::new(&u, vec![u.column("name").unwrap()], vec![Value::from("bo")]).unwrap();
    for (sql, _) in [insert.to_sql(), update.to_sql()] {
        assert!(!sql.contains(" AS "));
        assert!(!sql.contains("u."));
    }
}

#[test]
fn test_construction_errors() {
    let f = fixture();
    assert!(matches!(
        Insert::new(
            &f.users,
            vec![f.articles.column("id").unwrap()],
            vec![Value::Int(1)]
        ),
        Err(QueryError::ForeignColumn { .. })
    ));
    assert!(matches!(
        Update::new(&f.users, vec![f.users.column("id").unwrap()], vec![]),
        Err(QueryError::NoValues)
    ));
    let u = f.users.with_alias("u");
    assert!(matches!(
        delete(&u).filter(eq(u.column("id").unwrap(), 1)),
        Err(QueryError::ForeignFilter { .. })
    ));
    assert!(matches!(
        update(&u)
            .set("name", "bo")
            .filter(eq(u.column("id").unwrap(), 1))
            .build(),
        Err(QueryError::ForeignFilter { .. })
    ));
    assert!(matches!(
        delete(&f.users).filter(eq(f.articles.column("id").unwrap(), 1)),
        Err(QueryError::ForeignFilter { .. })
    ));
    assert!(select([&f.users]).cross_join(&f.articles).is_ok());
    assert!(matches!(
        select([&f.users]).cross_join(&f.users),
        Err(QueryError::InvalidJoin(_))
    ));
    assert!(matches!(
        Select::default().cross_join(&f.users),
        Err(QueryError::InvalidJoin(_))
    ));
}
