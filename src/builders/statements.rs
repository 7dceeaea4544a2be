//! Statement factories.

use crate::ast::{
    ColumnIdent, Delete, DerivedColumn, DerivedTable, Function, InsertBuilder, Join, Literal,
    Projection, Select, Selection, TableIdent, Trim, UpdateBuilder,
};

/// One argument of [`select`].
#[derive(Debug, Clone)]
pub enum SelectItem {
    /// Selected as is.
    Projection(Projection),
    /// Expands to every column of the table.
    Table(TableIdent),
    /// Expands to every column of the selection.
    Selection(Selection),
    /// Added to the join list; its sides are added to FROM as needed.
    Join(Join),
}

macro_rules! select_item_from_projection {
    ($($t:ty),*) => {
        $(impl From<$t> for SelectItem {
            fn from(p: $t) -> Self {
                SelectItem::Projection(Projection::from(p))
            }
        })*
    };
}

select_item_from_projection!(Projection, ColumnIdent, DerivedColumn, Literal, Function, Trim);

/// An aliased SELECT becomes a scalar subquery.
impl From<DerivedTable> for SelectItem {
    fn from(d: DerivedTable) -> Self {
        SelectItem::Projection(Projection::Subquery(d))
    }
}

impl From<&ColumnIdent> for SelectItem {
    fn from(c: &ColumnIdent) -> Self {
        SelectItem::Projection(Projection::Column(c.clone()))
    }
}

impl From<TableIdent> for SelectItem {
    fn from(t: TableIdent) -> Self {
        SelectItem::Table(t)
    }
}

impl From<&TableIdent> for SelectItem {
    fn from(t: &TableIdent) -> Self {
        SelectItem::Table(t.clone())
    }
}

impl From<Selection> for SelectItem {
    fn from(s: Selection) -> Self {
        SelectItem::Selection(s)
    }
}

/// A plain SELECT becomes an anonymous derived table in FROM.
impl From<Select> for SelectItem {
    fn from(s: Select) -> Self {
        SelectItem::Selection(Selection::Derived(s.derived()))
    }
}

impl From<Join> for SelectItem {
    fn from(j: Join) -> Self {
        SelectItem::Join(j)
    }
}

/// Build a SELECT from a mix of projections, tables, derived selections and
/// joins.
///
/// Projections keep their order; tables and selections expand to all of their
/// columns. FROM is the union of the projections' sources, the explicit
/// selections and the joins' left sides, minus anything a join brings in on
/// its right. Anonymous derived tables are named `derived0`, `derived1`, ...
/// in order of appearance.
///
/// Use [`select!`](crate::select!) for arguments of mixed types.
pub fn select<I: Into<SelectItem>>(items: impl IntoIterator<Item = I>) -> Select {
    let mut projections = Vec::new();
    let mut selections = Vec::new();
    let mut joins = Vec::new();

    for item in items {
        match item.into() {
            SelectItem::Projection(p) => projections.push(p),
            SelectItem::Table(t) => {
                projections.extend(t.columns().into_iter().map(Projection::from));
                selections.push(Selection::Table(t));
            }
            SelectItem::Selection(s) => {
                projections.extend(s.projections());
                selections.push(s);
            }
            SelectItem::Join(j) => joins.push(j),
        }
    }

    Select::assemble(projections, selections, joins)
}

/// Start an INSERT into `table`.
pub fn insert(table: &TableIdent) -> InsertBuilder {
    InsertBuilder::default().table(table)
}

/// Start an UPDATE of `table`.
pub fn update(table: &TableIdent) -> UpdateBuilder {
    UpdateBuilder::default().table(table)
}

/// A DELETE from `table`; chain [`Delete::filter`] to restrict it.
pub fn delete(table: &TableIdent) -> Delete {
    Delete::new(table)
}

/// [`select`] over arguments of different types.
///
/// ```ignore
/// let query = select![users.column("id")?, count_all(&articles), join];
/// ```
#[macro_export]
macro_rules! select {
    ($($item:expr),* $(,)?) => {
        $crate::builders::select([$($crate::builders::SelectItem::from($item)),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{count_all, eq};
    use crate::scanner::ToSql;
    use crate::schema::Schema;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn schema() -> Schema {
        let mut schema = Schema::new();
        schema.add_table("users").unwrap();
        schema.add_column("users", "id").unwrap();
        schema.add_column("users", "name").unwrap();
        schema.add_table("articles").unwrap();
        schema.add_column("articles", "id").unwrap();
        schema.add_column("articles", "author").unwrap();
        schema
    }

    #[test]
    fn test_table_expands_to_columns() {
        let users = schema().table("users").unwrap();
        let (sql, args) = select([&users]).to_sql();
        assert_eq!(sql, "SELECT users.id, users.name FROM users");
        assert!(args.is_empty());
    }

    #[test]
    fn test_join_item_moves_right_out_of_from() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        let articles = schema.table("articles").unwrap();
        let join = Join::inner(
            &articles,
            &users,
            eq(articles.column("author").unwrap(), users.column("id").unwrap()),
        );
        let query = crate::select![
            articles.column("id").unwrap(),
            users.column("name").unwrap().with_alias("author"),
            join,
        ];
        assert_eq!(
            query.to_sql().0,
            "SELECT articles.id, users.name AS author FROM articles JOIN users ON articles.author = users.id"
        );
    }

    #[test]
    fn test_join_left_added_when_missing() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        let articles = schema.table("articles").unwrap();
        let join = Join::inner(
            &articles,
            &users,
            eq(articles.column("author").unwrap(), users.column("id").unwrap()),
        );
        let query = crate::select![users.column("name").unwrap(), join];
        assert_eq!(
            query.to_sql().0,
            "SELECT users.name FROM articles JOIN users ON articles.author = users.id"
        );
    }

    #[test]
    fn test_join_items_never_empty_from() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        let articles = schema.table("articles").unwrap();
        let id = users.column("id").unwrap();
        let author = articles.column("author").unwrap();
        let query = crate::select![
            id.clone(),
            Join::inner(&users, &articles, eq(author.clone(), id.clone())),
            Join::inner(&articles, &users, eq(id.clone(), author)),
            Join::cross(&users, &users),
        ];
        assert_eq!(
            query.to_sql().0,
            "SELECT users.id FROM users JOIN articles ON articles.author = users.id"
        );
    }

    #[test]
    fn test_anonymous_selects_named_in_order() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        let articles = schema.table("articles").unwrap();
        let query = crate::select![
            select([users.column("id").unwrap()]),
            select([articles.column("author").unwrap()]),
        ];
        assert_eq!(
            query.to_sql().0,
            "SELECT derived0.id, derived1.author FROM (SELECT users.id FROM users) AS derived0, (SELECT articles.author FROM articles) AS derived1"
        );
        // Naming happens at assembly, so rendering twice is stable.
        assert_eq!(query.to_sql(), query.to_sql());
    }

    #[test]
    fn test_aliased_select_is_scalar() {
        let schema = schema();
        let users = schema.table("users").unwrap();
        let articles = schema.table("articles").unwrap();
        let total = select([count_all(&articles)])
            .filter(eq(articles.column("author").unwrap(), users.column("id").unwrap()))
            .with_alias("total");
        let query = crate::select![users.column("name").unwrap(), total];
        assert_eq!(
            query.to_sql().0,
            "SELECT users.name, (SELECT COUNT(*) FROM articles WHERE articles.author = users.id) AS total FROM users"
        );
    }

    #[test]
    fn test_statement_helpers() {
        let users = schema().table("users").unwrap();
        let (sql, args) = insert(&users).value("name", "ann").build().unwrap().to_sql();
        assert_eq!(sql, "INSERT INTO users (name) VALUES (?)");
        assert_eq!(args, vec![Value::Text("ann".to_string())]);

        let (sql, _) = update(&users).set("name", "bo").build().unwrap().to_sql();
        assert_eq!(sql, "UPDATE users SET name = ?");

        let (sql, args) = delete(&users)
            .filter(eq(users.column("id").unwrap(), 4))
            .unwrap()
            .to_sql();
        assert_eq!(sql, "DELETE FROM users WHERE users.id = ?");
        assert_eq!(args, vec![Value::Int(4)]);
    }
}
