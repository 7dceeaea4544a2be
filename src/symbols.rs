//! Fixed catalog of SQL keywords and punctuation.
//!
//! Every byte of SQL text that is not an identifier or a parameter marker comes
//! from this table. Clause keywords carry no leading space: the scanner's clause
//! separator is written in front of them.

/// A keyword or punctuation blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    // Statements and clauses
    Select,
    From,
    Join,
    LeftJoin,
    CrossJoin,
    On,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Desc,
    Limit,
    Offset,
    InsertInto,
    Values,
    DeleteFrom,
    Update,
    Set,
    Star,

    // Operators
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    And,
    Or,
    In,
    NotIn,
    Like,
    Between,
    IsNull,
    IsNotNull,

    // Punctuation
    Comma,
    LeftParen,
    RightParen,
    OpenList,
    Period,
    As,
    Space,

    // Functions
    Max,
    Min,
    Sum,
    Avg,
    Count,
    CountAll,
    CountDistinct,
    Cast,
    CharLength,
    BitLength,
    Ascii,
    Reverse,
    Concat,
    ConcatWs,
    Now,
    CurrentTimestamp,
    CurrentTime,
    CurrentDate,
    Extract,
    FromKeyword,
    Trim,
    LTrim,
    RTrim,
    BTrim,
    Leading,
    Trailing,

    // CAST target types
    TypeBinary,
    TypeChar,
    TypeDate,
    TypeDateTime,
    TypeDecimal,
    TypeInteger,
    TypeJson,
    TypeSigned,
    TypeText,
    TypeTime,
    TypeTimestamp,
    TypeUnsigned,

    // EXTRACT units
    UnitMicrosecond,
    UnitSecond,
    UnitMinute,
    UnitHour,
    UnitDay,
    UnitWeek,
    UnitMonth,
    UnitQuarter,
    UnitYear,
}

impl Symbol {
    /// The exact text of this symbol.
    pub const fn as_str(self) -> &'static str {
        match self {
            Symbol::Select => "SELECT ",
            Symbol::From => "FROM ",
            Symbol::Join => "JOIN ",
            Symbol::LeftJoin => "LEFT JOIN ",
            Symbol::CrossJoin => "CROSS JOIN ",
            Symbol::On => " ON ",
            Symbol::Where => "WHERE ",
            Symbol::GroupBy => "GROUP BY ",
            Symbol::Having => "HAVING ",
            Symbol::OrderBy => "ORDER BY ",
            Symbol::Desc => " DESC",
            Symbol::Limit => "LIMIT ",
            Symbol::Offset => " OFFSET ",
            Symbol::InsertInto => "INSERT INTO ",
            Symbol::Values => ") VALUES (",
            Symbol::DeleteFrom => "DELETE FROM ",
            Symbol::Update => "UPDATE ",
            Symbol::Set => " SET ",
            Symbol::Star => "*",

            Symbol::Equal => " = ",
            Symbol::NotEqual => " != ",
            Symbol::Greater => " > ",
            Symbol::GreaterOrEqual => " >= ",
            Symbol::Less => " < ",
            Symbol::LessOrEqual => " <= ",
            Symbol::And => " AND ",
            Symbol::Or => " OR ",
            Symbol::In => " IN (",
            Symbol::NotIn => " NOT IN (",
            Symbol::Like => " LIKE ",
            Symbol::Between => " BETWEEN ",
            Symbol::IsNull => " IS NULL",
            Symbol::IsNotNull => " IS NOT NULL",

            Symbol::Comma => ", ",
            Symbol::LeftParen => "(",
            Symbol::RightParen => ")",
            Symbol::OpenList => " (",
            Symbol::Period => ".",
            Symbol::As => " AS ",
            Symbol::Space => " ",

            Symbol::Max => "MAX(",
            Symbol::Min => "MIN(",
            Symbol::Sum => "SUM(",
            Symbol::Avg => "AVG(",
            Symbol::Count => "COUNT(",
            Symbol::CountAll => "COUNT(*)",
            Symbol::CountDistinct => "COUNT(DISTINCT ",
            Symbol::Cast => "CAST(",
            Symbol::CharLength => "CHAR_LENGTH(",
            Symbol::BitLength => "BIT_LENGTH(",
            Symbol::Ascii => "ASCII(",
            Symbol::Reverse => "REVERSE(",
            Symbol::Concat => "CONCAT(",
            Symbol::ConcatWs => "CONCAT_WS(",
            Symbol::Now => "NOW()",
            Symbol::CurrentTimestamp => "CURRENT_TIMESTAMP",
            Symbol::CurrentTime => "CURRENT_TIME",
            Symbol::CurrentDate => "CURRENT_DATE",
            Symbol::Extract => "EXTRACT(",
            Symbol::FromKeyword => " FROM ",
            Symbol::Trim => "TRIM(",
            Symbol::LTrim => "LTRIM(",
            Symbol::RTrim => "RTRIM(",
            Symbol::BTrim => "BTRIM(",
            Symbol::Leading => "LEADING",
            Symbol::Trailing => "TRAILING",

            Symbol::TypeBinary => "BINARY",
            Symbol::TypeChar => "CHAR",
            Symbol::TypeDate => "DATE",
            Symbol::TypeDateTime => "DATETIME",
            Symbol::TypeDecimal => "DECIMAL",
            Symbol::TypeInteger => "INTEGER",
            Symbol::TypeJson => "JSON",
            Symbol::TypeSigned => "SIGNED",
            Symbol::TypeText => "TEXT",
            Symbol::TypeTime => "TIME",
            Symbol::TypeTimestamp => "TIMESTAMP",
            Symbol::TypeUnsigned => "UNSIGNED",

            Symbol::UnitMicrosecond => "MICROSECOND",
            Symbol::UnitSecond => "SECOND",
            Symbol::UnitMinute => "MINUTE",
            Symbol::UnitHour => "HOUR",
            Symbol::UnitDay => "DAY",
            Symbol::UnitWeek => "WEEK",
            Symbol::UnitMonth => "MONTH",
            Symbol::UnitQuarter => "QUARTER",
            Symbol::UnitYear => "YEAR",
        }
    }

    /// Byte length of the symbol text.
    pub const fn len(self) -> usize {
        self.as_str().len()
    }

    pub const fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_spelling() {
        assert_eq!(Symbol::Equal.as_str(), " = ");
        assert_eq!(Symbol::NotEqual.as_str(), " != ");
        assert_eq!(Symbol::In.as_str(), " IN (");
        assert_eq!(Symbol::IsNotNull.as_str(), " IS NOT NULL");
        assert_eq!(Symbol::Values.as_str(), ") VALUES (");
    }

    #[test]
    fn test_len_matches_text() {
        assert_eq!(Symbol::GroupBy.len(), "GROUP BY ".len());
        assert_eq!(Symbol::CountAll.len(), 8);
        assert_eq!(Symbol::Period.as_bytes(), b".");
    }
}
