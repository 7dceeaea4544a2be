//! Loading schemas from JSON, TOML and the text definition format.
//!
//! Text format:
//! ```text
//! -- comments run to end of line
//! table organizations (id, name)
//! table users as u (
//!     id,
//!     name,
//!     organization_id references organizations.id,
//! )
//! ```

use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::{tag, tag_no_case, take_till, take_while1},
    character::complete::{char, multispace1},
    combinator::{all_consuming, cut, map, opt, recognize},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};

use super::{ForeignRef, Schema};
use crate::error::{QueryError, QueryResult};

/// Serialized form of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDef {
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
}

/// A column given either as a bare name or with a foreign reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDef {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        references: Option<ForeignRef>,
    },
}

impl ColumnDef {
    fn name(&self) -> &str {
        match self {
            ColumnDef::Name(name) | ColumnDef::Full { name, .. } => name,
        }
    }

    fn references(&self) -> Option<&ForeignRef> {
        match self {
            ColumnDef::Name(_) => None,
            ColumnDef::Full { references, .. } => references.as_ref(),
        }
    }
}

impl Schema {
    /// Build a schema from its serialized form.
    ///
    /// Foreign references must point at tables and columns defined in the same
    /// document.
    pub fn from_def(def: &SchemaDef) -> QueryResult<Self> {
        let mut schema = Schema::new();
        for table in &def.tables {
            schema.add_table(&table.name)?;
            if let Some(alias) = &table.alias {
                schema.set_alias(&table.name, alias)?;
            }
            for column in &table.columns {
                match column.references() {
                    Some(r) => {
                        schema.add_reference_column(&table.name, column.name(), r.clone())?
                    }
                    None => schema.add_column(&table.name, column.name())?,
                }
            }
        }

        for table in &def.tables {
            for r in table.columns.iter().filter_map(ColumnDef::references) {
                let target = schema
                    .table_meta(&r.table)
                    .ok_or_else(|| QueryError::UnknownTable(r.table.clone()))?;
                if !target.has_column(&r.column) {
                    return Err(QueryError::unknown_column(&r.table, &r.column));
                }
            }
        }

        tracing::debug!(tables = schema.len(), "schema loaded");
        Ok(schema)
    }

    /// Load schema from a JSON document.
    pub fn from_json(input: &str) -> QueryResult<Self> {
        let def: SchemaDef = serde_json::from_str(input)?;
        Self::from_def(&def)
    }

    /// Load schema from a TOML document (`[[tables]]` array).
    pub fn from_toml(input: &str) -> QueryResult<Self> {
        let def: SchemaDef = toml::from_str(input)?;
        Self::from_def(&def)
    }

    /// Load schema from the text definition format.
    pub fn from_text(input: &str) -> QueryResult<Self> {
        let def = parse_definition(input)?;
        Self::from_def(&def)
    }

    /// Load schema from a file, picking the format by extension:
    /// `.json`, `.toml`, anything else is the text format.
    pub fn from_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&input),
            Some("toml") => Self::from_toml(&input),
            _ => Self::from_text(&input),
        }
    }
}

/// Parse the text definition format into a [`SchemaDef`].
pub fn parse_definition(input: &str) -> QueryResult<SchemaDef> {
    let parser = all_consuming(preceded(ws, many0(terminated(table_def, ws))));
    match map(parser, |tables| SchemaDef { tables })(input) {
        Ok((_, def)) => Ok(def),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let position = input.len() - e.input.len();
            let near: String = e.input.chars().take(24).collect();
            Err(QueryError::schema_parse(
                position,
                format!("unexpected input near '{}'", near),
            ))
        }
        Err(nom::Err::Incomplete(_)) => {
            Err(QueryError::schema_parse(input.len(), "unexpected end of input"))
        }
    }
}

fn comment(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("--"), take_till(|c| c == '\n')))(input)
}

/// Whitespace and comments.
fn ws(input: &str) -> IResult<&str, ()> {
    map(many0(alt((multispace1, comment))), |_| ())(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

/// `table <name> [as <alias>] ( <column>, ... )`
fn table_def(input: &str) -> IResult<&str, TableDef> {
    preceded(tag_no_case("table"), cut(table_body))(input)
}

fn table_body(input: &str) -> IResult<&str, TableDef> {
    let (input, _) = multispace1(input)?;
    let (input, name) = identifier(input)?;
    let (input, alias) = opt(preceded(
        tuple((ws, tag_no_case("as"), multispace1)),
        identifier,
    ))(input)?;
    let (input, _) = tuple((ws, char('('), ws))(input)?;
    let (input, columns) = separated_list1(tuple((ws, char(','), ws)), column_def)(input)?;
    let (input, _) = tuple((ws, opt(char(',')), ws, char(')')))(input)?;

    Ok((
        input,
        TableDef {
            name: name.to_string(),
            alias: alias.map(str::to_string),
            columns,
        },
    ))
}

/// `<name> [references <table>.<column>]`
fn column_def(input: &str) -> IResult<&str, ColumnDef> {
    let (input, name) = identifier(input)?;
    let (input, references) = opt(preceded(
        tuple((ws, tag_no_case("references"), ws)),
        separated_pair(identifier, char('.'), identifier),
    ))(input)?;

    let def = match references {
        Some((table, column)) => ColumnDef::Full {
            name: name.to_string(),
            references: Some(ForeignRef::new(table, column)),
        },
        None => ColumnDef::Name(name.to_string()),
    };
    Ok((input, def))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_definition() {
        let schema = Schema::from_text(
            r#"
            -- tenants
            table organizations (id, name)

            table users as u (
                id,
                name,   -- display name
                organization_id references organizations.id,
            )
            "#,
        )
        .unwrap();

        assert_eq!(schema.len(), 2);
        let users = schema.table_meta("users").unwrap();
        assert_eq!(users.alias(), Some("u"));
        assert_eq!(users.columns().len(), 3);
        let fk = users.column("organization_id").unwrap().references().unwrap();
        assert_eq!(fk, &ForeignRef::new("organizations", "id"));
    }

    #[test]
    fn test_text_parse_error_position() {
        let err = Schema::from_text("table users (id,, name)").unwrap_err();
        match err {
            QueryError::SchemaParse { position, .. } => assert_eq!(position, 16),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_reference_to_unknown_table() {
        let err = Schema::from_text("table users (org_id references orgs.id)").unwrap_err();
        assert!(matches!(err, QueryError::UnknownTable(t) if t == "orgs"));
    }

    #[test]
    fn test_from_json() {
        let schema = Schema::from_json(
            r#"{
                "tables": [
                    { "name": "users", "columns": ["id", "name"] },
                    { "name": "articles", "columns": [
                        "id",
                        { "name": "author", "references": { "table": "users", "column": "id" } }
                    ] }
                ]
            }"#,
        )
        .unwrap();

        let articles = schema.table_meta("articles").unwrap();
        assert!(articles.column("author").unwrap().references().is_some());
        assert!(articles.column("id").unwrap().references().is_none());
    }

    #[test]
    fn test_from_toml() {
        let schema = Schema::from_toml(
            r#"
            [[tables]]
            name = "users"
            alias = "u"
            columns = ["id", "name"]

            [[tables]]
            name = "articles"
            columns = ["id", { name = "author", references = { table = "users", column = "id" } }]
            "#,
        )
        .unwrap();

        assert_eq!(schema.table("users").unwrap().qualifier(), "u");
        assert!(schema.contains("articles"));
    }

    #[test]
    fn test_json_reference_to_unknown_column() {
        let err = Schema::from_json(
            r#"{ "tables": [
                { "name": "users", "columns": ["id"] },
                { "name": "posts", "columns": [
                    { "name": "user_id", "references": { "table": "users", "column": "uid" } }
                ] }
            ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::UnknownColumn { .. }));
    }
}
