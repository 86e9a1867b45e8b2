use super::*;
use crate::config::BuilderConfig;
use crate::expr::{
    and, arg, as_, contains, equal, has_key, in_, is, is_contained_by, list, name, names,
    not_null, or,
};
use crate::param::Param;
use bytes::BytesMut;
use tokio_postgres::types::Type;

fn arg_strings(b: &Builder) -> Vec<String> {
    b.args().iter().map(|p| format!("{p:?}")).collect()
}

/// Count `$n` tokens and check they run 1..=count in text order.
fn sequential_placeholders(sql: &str) -> usize {
    let mut expected = 1;
    let mut rest = sql;
    while let Some(pos) = rest.find('$') {
        rest = &rest[pos + 1..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        assert_eq!(digits, expected.to_string(), "in {sql}");
        expected += 1;
    }
    expected - 1
}

#[test]
fn test_select_scenario() {
    let mut b = Builder::new();
    b.select(name("*")).from(name("user")).where_(and(vec![
        equal(name("updated_at"), arg(5i32)),
        is(name("updated_at"), not_null()),
        contains(name("roles"), arg(serde_json::json!({"manager": 1}))),
        is_contained_by(name("something"), arg(r#"'{"a":1, "b":2}'"#)),
        has_key(name("something"), arg("key")),
    ]));

    assert_eq!(
        b.to_sql(),
        "SELECT * FROM user WHERE  (updated_at = $1 AND updated_at IS  NOT NULL  AND roles @> $2 AND something <@ $3 AND something ? $4)"
    );

    let args = arg_strings(&b);
    assert_eq!(args.len(), 4);
    assert_eq!(args[0], "5");
    assert_eq!(
        args[1],
        format!("{:?}", serde_json::json!({"manager": 1}))
    );
    assert_eq!(args[2], format!("{:?}", r#"'{"a":1, "b":2}'"#));
    assert_eq!(args[3], "\"key\"");
}

#[test]
fn test_insert_scenario() {
    let mut b = Builder::new();
    b.insert()
        .into_("user")
        .columns(["username", "first_name", "last_name"])
        .values(["john.snow@gmail.com", "John", "Snow"]);

    assert_eq!(
        b.to_sql(),
        "INSERT  INTO user (username, first_name, last_name)  VALUES($1, $2, $3)"
    );
    assert_eq!(
        arg_strings(&b),
        ["\"john.snow@gmail.com\"", "\"John\"", "\"Snow\""]
    );
}

#[test]
fn test_insert_clauses_on_owned_binding() {
    let mut b = Builder::new();
    b.insert();
    b.into_("user");
    b.columns(["username"]);
    b.values(["arya"]);

    assert_eq!(b.to_sql(), "INSERT  INTO user (username)  VALUES($1)");
    assert_eq!(arg_strings(&b), ["\"arya\""]);
}

#[test]
fn test_values_params_mixed_types() {
    let mut b = Builder::new();
    b.insert()
        .into_("events")
        .columns(["id", "name", "payload"])
        .values_params([
            Param::new(1i64),
            Param::new("signup"),
            Param::new(serde_json::json!({"plan": "pro"})),
        ]);

    assert_eq!(
        b.to_sql(),
        "INSERT  INTO events (id, name, payload)  VALUES($1, $2, $3)"
    );
    assert_eq!(b.args().len(), 3);
}

#[test]
fn test_membership_list() {
    let mut b = Builder::new();
    b.select(name("id"))
        .from(name("t"))
        .where_(in_(name("h"), list(vec![arg(1i32), arg(2i32), arg(3i32)])));

    assert_eq!(b.to_sql(), "SELECT id FROM t WHERE h IN $1, $2, $3");
    assert_eq!(arg_strings(&b), ["1", "2", "3"]);
}

#[test]
fn test_subquery_uses_own_numbering() {
    let mut inner = Builder::new();
    inner
        .select(name("id"))
        .from(name("tickets"))
        .where_(equal(name("state"), arg("open")));

    let mut outer = Builder::new();
    outer
        .select(list(vec![name("a"), as_(inner.expr(), "subq")]))
        .from(name("c"))
        .where_(equal(name("f"), arg(2i32)))
        .limit(7);

    assert_eq!(
        outer.to_sql(),
        "SELECT a,  SELECT id FROM tickets WHERE state = $1 AS subq FROM c WHERE f = $1 LIMIT $2"
    );
    assert_eq!(outer.placeholder_count(), 2);
    // Scoped values are listed inline, so args outnumber outer placeholders.
    assert_eq!(arg_strings(&outer), ["\"open\"", "2", "7"]);
    assert_ne!(outer.args().len(), outer.placeholder_count() as usize);

    // The inner builder is untouched.
    assert!(inner.cached_sql().is_none());
    assert_eq!(
        inner.to_sql(),
        "SELECT id FROM tickets WHERE state = $1"
    );
}

#[test]
fn test_complex_select() {
    let mut b = Builder::new();
    b.select(names(["a", "b"]))
        .distinct()
        .from(name("c"))
        .where_(and(vec![
            or(vec![
                equal(name("d"), arg(1i32)),
                equal(name("e"), arg("wat")),
            ]),
            equal(name("f"), arg(2i32)),
            in_(name("h"), list(vec![arg(1i32), arg(2i32), arg(3i32)])),
        ]))
        .group_by(["i", "ii"])
        .having(and(vec![
            equal(name("j"), name("k")),
            equal(name("jj"), arg(1i32)),
        ]))
        .order_by(["l", "ll"])
        .limit(7)
        .offset(8);

    let sql = b.to_sql().to_string();
    assert_eq!(
        sql,
        "SELECT a, b DISTINCT  FROM c WHERE  ( (d = $1 OR e = $2)  AND f = $3 AND h IN $4, $5, $6)  GROUP BY i, ii HAVING  (j = k AND jj = $7)  ORDER BY l, ll LIMIT $8 OFFSET $9"
    );
    assert_eq!(sequential_placeholders(&sql), b.args().len());
    assert_eq!(
        arg_strings(&b),
        ["1", "\"wat\"", "2", "1", "2", "3", "1", "7", "8"]
    );
}

#[test]
fn test_placeholder_count_matches_args() {
    let mut b = Builder::new();
    let conds = (0..25)
        .map(|i| equal(name(format!("col{i}")), arg(i as i64)))
        .collect();
    b.select(name("*")).from(name("t")).where_(and(conds));

    let sql = b.to_sql().to_string();
    assert_eq!(sequential_placeholders(&sql), 25);
    assert_eq!(b.placeholder_count(), 25);

    let args = arg_strings(&b);
    assert_eq!(args.len(), 25);
    for (i, value) in args.iter().enumerate() {
        assert_eq!(value, &i.to_string());
    }
}

#[test]
fn test_render_twice_is_cached() {
    let mut b = Builder::new();
    b.select(name("*")).from(name("t")).where_(equal(name("a"), arg(1i32)));

    let first = b.to_sql().to_string();
    assert_eq!(b.placeholder_count(), 1);
    let second = b.to_sql().to_string();

    assert_eq!(first, second);
    assert_eq!(first, "SELECT * FROM t WHERE a = $1");
    assert_eq!(b.placeholder_count(), 1);
    assert_eq!(b.cached_sql(), Some(first.as_str()));
}

#[test]
fn test_mutation_after_render_keeps_stale_cache() {
    let mut b = Builder::new();
    b.select(name("*")).from(name("t"));
    assert_eq!(b.to_sql(), "SELECT * FROM t");

    // Appending after a render does not invalidate the cache.
    b.limit(10);
    assert_eq!(b.to_sql(), "SELECT * FROM t");
    // Argument collection ignores the cache and sees the new clause.
    assert_eq!(arg_strings(&b), ["10"]);

    b.reset();
    assert_eq!(b.to_sql(), "SELECT * FROM t LIMIT $1");
}

#[test]
fn test_reset_restarts_numbering() {
    let mut b = Builder::new();
    b.select(name("*"))
        .from(name("t"))
        .where_(equal(name("a"), arg(1i32)))
        .limit(5);
    assert_eq!(b.to_sql(), "SELECT * FROM t WHERE a = $1 LIMIT $2");

    b.reset();
    assert!(b.cached_sql().is_none());
    assert_eq!(b.placeholder_count(), 0);
    assert_eq!(b.render_cache(), &RenderCache::NotRendered);

    b.select(name("id"))
        .from(name("u"))
        .where_(equal(name("b"), arg("x")));
    assert_eq!(b.to_sql(), "SELECT id FROM u WHERE b = $1");
    assert_eq!(arg_strings(&b), ["\"x\""]);
}

#[test]
fn test_new_statement_without_reset_is_stale() {
    let mut b = Builder::new();
    b.select(name("a")).from(name("t"));
    assert_eq!(b.to_sql(), "SELECT a FROM t");

    b.select(name("b")).from(name("u"));
    assert_eq!(b.to_sql(), "SELECT a FROM t");
    assert_eq!(b.expr().build().0, " SELECT b FROM u");
}

#[test]
fn test_empty_conjunction() {
    let mut b = Builder::new();
    b.select(name("*")).from(name("t")).where_(and(vec![]));
    assert_eq!(b.to_sql(), "SELECT * FROM t WHERE  ()");
    assert!(b.args().is_empty());
}

#[test]
fn test_empty_builder_is_degenerate() {
    let mut b = Builder::new();
    assert_eq!(b.to_sql(), "");
    assert!(b.args().is_empty());
    assert!(b.params_ref().is_empty());
    assert_eq!(b.expr().build().0, "");
}

#[test]
fn test_clause_without_root_becomes_root() {
    let mut b = Builder::new();
    b.from(name("t")).limit(1);
    assert_eq!(b.to_sql(), "FROM t LIMIT $1");
}

#[test]
fn test_splice_appends_after_wrapper() {
    let mut b = Builder::new();
    b.select(name("*"))
        .from(name("t"))
        .where_(or(vec![equal(name("a"), arg(1i32))]))
        .splice(Expr::text(" FOR UPDATE"));
    assert_eq!(b.to_sql(), "SELECT * FROM t WHERE  (a = $1)  FOR UPDATE");
}

#[test]
fn test_params_ref_binds_in_order() {
    let mut b = Builder::new();
    b.select(name("*"))
        .from(name("t"))
        .where_(equal(name("a"), arg(42i32)))
        .limit(7);

    let refs = b.params_ref();
    assert_eq!(refs.len(), 2);

    let mut buf = BytesMut::new();
    refs[0].to_sql_checked(&Type::INT4, &mut buf).unwrap();
    assert_eq!(&buf[..], &42i32.to_be_bytes());

    buf.clear();
    refs[1].to_sql_checked(&Type::INT8, &mut buf).unwrap();
    assert_eq!(&buf[..], &7i64.to_be_bytes());
}

#[test]
fn test_dump() {
    let mut b = Builder::new();
    b.select(name("*"))
        .from(name("user"))
        .where_(equal(name("id"), arg(42i32)))
        .limit(1);

    assert_eq!(
        b.dump(),
        "query: SELECT * FROM user WHERE id = $1 LIMIT $2 \narg: 1     42 \narg: 2     1 \n"
    );
}

#[test]
fn test_write_to_sinks() {
    let mut b = Builder::new();
    b.select(name("1"));

    let mut bytes = Vec::new();
    b.write_to(&mut bytes).unwrap();
    assert_eq!(bytes, b"SELECT 1");

    let mut text = String::new();
    b.write_fmt_to(&mut text).unwrap();
    assert_eq!(text, "SELECT 1");
}

#[test]
fn test_write_to_propagates_sink_error() {
    struct Broken;
    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let mut b = Builder::new();
    b.select(name("1"));
    let err = b.write_to(Broken).unwrap_err();
    assert!(err.is_io());
    // The render itself succeeded and stays cached.
    assert_eq!(b.cached_sql(), Some("SELECT 1"));
}

#[test]
fn test_unpooled_config_renders_identically() {
    let mut pooled = Builder::new();
    let mut private = Builder::with_config(BuilderConfig::new().disable_pool(32));
    for b in [&mut pooled, &mut private] {
        b.select(name("*")).from(name("t")).where_(equal(name("a"), arg(1i32)));
    }
    assert!(!private.config().use_pool);
    assert_eq!(pooled.to_sql(), private.to_sql());
}
