//! Typed filter/order compiler for record queries.
//!
//! Every condition value is bound as a `?` parameter, never interpolated
//! into the SQL text. The only unchecked path is [`TrustedSql`], which a
//! caller must construct explicitly to assert the fragment is safe.

use rusqlite::types::Value;

use super::DatabaseError;

/// One comparison against a column.
#[derive(Debug, Clone)]
pub enum Cond {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Lt(Value),
    Ge(Value),
    Le(Value),
    Like(Value),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    /// `IS NULL` when true, `IS NOT NULL` when false; binds no parameter.
    IsNull(bool),
}

impl Cond {
    fn operator(&self) -> &'static str {
        match self {
            Cond::Eq(_) => "=",
            Cond::Ne(_) => "!=",
            Cond::Gt(_) => ">",
            Cond::Lt(_) => "<",
            Cond::Ge(_) => ">=",
            Cond::Le(_) => "<=",
            Cond::Like(_) => "LIKE",
            Cond::In(_) => "IN",
            Cond::NotIn(_) => "NOT IN",
            Cond::IsNull(_) => unreachable!("IsNull has no binary operator"),
        }
    }
}

/// Conjunction of column conditions, compiled into a parameterized
/// `WHERE` clause.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Cond)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cond(mut self, column: &str, cond: Cond) -> Self {
        self.clauses.push((column.to_string(), cond));
        self
    }

    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.cond(column, Cond::Eq(value.into()))
    }

    pub fn ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.cond(column, Cond::Ne(value.into()))
    }

    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cond(column, Cond::Gt(value.into()))
    }

    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cond(column, Cond::Lt(value.into()))
    }

    pub fn ge(self, column: &str, value: impl Into<Value>) -> Self {
        self.cond(column, Cond::Ge(value.into()))
    }

    pub fn le(self, column: &str, value: impl Into<Value>) -> Self {
        self.cond(column, Cond::Le(value.into()))
    }

    pub fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.cond(column, Cond::Like(pattern.into()))
    }

    pub fn is_in<V: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.cond(column, Cond::In(values.into_iter().map(Into::into).collect()))
    }

    pub fn not_in<V: Into<Value>>(self, column: &str, values: impl IntoIterator<Item = V>) -> Self {
        self.cond(
            column,
            Cond::NotIn(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn is_null(self, column: &str, null: bool) -> Self {
        self.cond(column, Cond::IsNull(null))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Compile into clause text and the parameter list bound alongside it.
    /// Columns are validated against the record's declared fields.
    pub fn compile(
        &self,
        table: &str,
        fields: &[&str],
    ) -> Result<(String, Vec<Value>), DatabaseError> {
        let mut clauses = Vec::with_capacity(self.clauses.len());
        let mut values = Vec::new();
        for (column, cond) in &self.clauses {
            check_column(table, fields, column)?;
            match cond {
                Cond::IsNull(true) => clauses.push(format!("{column} IS NULL")),
                Cond::IsNull(false) => clauses.push(format!("{column} IS NOT NULL")),
                Cond::In(list) | Cond::NotIn(list) => {
                    if list.is_empty() {
                        // IN () is not valid SQLite; an empty list can match
                        // nothing (IN) or everything (NOT IN).
                        clauses.push(match cond {
                            Cond::In(_) => "1 = 0".to_string(),
                            _ => "1 = 1".to_string(),
                        });
                    } else {
                        let marks = vec!["?"; list.len()].join(", ");
                        clauses.push(format!("{column} {} ({marks})", cond.operator()));
                        values.extend(list.iter().cloned());
                    }
                }
                Cond::Eq(v)
                | Cond::Ne(v)
                | Cond::Gt(v)
                | Cond::Lt(v)
                | Cond::Ge(v)
                | Cond::Le(v)
                | Cond::Like(v) => {
                    clauses.push(format!("{column} {} ?", cond.operator()));
                    values.push(v.clone());
                }
            }
        }
        Ok((clauses.join(" AND "), values))
    }
}

/// Result ordering on a single declared column.
#[derive(Debug, Clone)]
pub struct Order {
    column: String,
    descending: bool,
}

impl Order {
    pub fn asc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            descending: false,
        }
    }

    pub fn desc(column: &str) -> Self {
        Self {
            column: column.to_string(),
            descending: true,
        }
    }

    pub fn compile(&self, table: &str, fields: &[&str]) -> Result<String, DatabaseError> {
        check_column(table, fields, &self.column)?;
        let direction = if self.descending { "DESC" } else { "ASC" };
        Ok(format!("{} {direction}", self.column))
    }
}

/// Raw `WHERE` fragment inserted verbatim. Trusted-caller contract: never
/// build one from untrusted input.
#[derive(Debug, Clone)]
pub struct TrustedSql(String);

impl TrustedSql {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Row selection for multi-record queries.
#[derive(Debug, Clone)]
pub enum Where {
    Filter(Filter),
    Trusted(TrustedSql),
}

impl From<Filter> for Where {
    fn from(filter: Filter) -> Self {
        Where::Filter(filter)
    }
}

impl From<TrustedSql> for Where {
    fn from(raw: TrustedSql) -> Self {
        Where::Trusted(raw)
    }
}

fn check_column(table: &str, fields: &[&str], column: &str) -> Result<(), DatabaseError> {
    if fields.contains(&column) {
        Ok(())
    } else {
        Err(DatabaseError::UnknownColumn {
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[&str] = &["id", "status", "site", "amount_cts"];

    #[test]
    fn implicit_equality() {
        let (sql, values) = Filter::new()
            .eq("status", "O".to_string())
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "status = ?");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn in_list_binds_one_parameter_per_element() {
        let (sql, values) = Filter::new()
            .is_in("status", ["O".to_string(), "I".to_string()])
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "status IN (?, ?)");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn isnull_binds_no_parameter() {
        let (sql, values) = Filter::new()
            .is_null("site", true)
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "site IS NULL");
        assert!(values.is_empty());
    }

    #[test]
    fn is_not_null() {
        let (sql, _) = Filter::new()
            .is_null("site", false)
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "site IS NOT NULL");
    }

    #[test]
    fn clauses_join_with_and() {
        let (sql, values) = Filter::new()
            .eq("status", "O".to_string())
            .ge("amount_cts", 500i64)
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "status = ? AND amount_cts >= ?");
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn empty_in_list_matches_nothing() {
        let (sql, values) = Filter::new()
            .is_in("status", Vec::<String>::new())
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "1 = 0");
        assert!(values.is_empty());

        let (sql, _) = Filter::new()
            .not_in("status", Vec::<String>::new())
            .compile("bills", FIELDS)
            .unwrap();
        assert_eq!(sql, "1 = 1");
    }

    #[test]
    fn unknown_column_is_rejected() {
        let err = Filter::new()
            .eq("statuz", "O".to_string())
            .compile("bills", FIELDS)
            .unwrap_err();
        assert!(matches!(err, DatabaseError::UnknownColumn { .. }));
    }

    #[test]
    fn order_validates_and_compiles() {
        assert_eq!(Order::asc("status").compile("bills", FIELDS).unwrap(), "status ASC");
        assert_eq!(Order::desc("id").compile("bills", FIELDS).unwrap(), "id DESC");
        assert!(Order::asc("nope").compile("bills", FIELDS).is_err());
    }
}
