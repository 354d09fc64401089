//! # Database Driver Selection
//!
//! The backend talks to PostgreSQL in production and to SQLite for local
//! runs and tests. Both sit behind sqlx's `Any` pool; this module holds the
//! few places where the SQL dialects differ.

use std::fmt;
use std::str::FromStr;

use crate::error::DbError;

/// A SQL backend the `Any` pool can be pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Postgres,
    Sqlite,
}

impl Driver {
    /// Case-sensitive "column contains parameter" predicate.
    ///
    /// `LIKE` is case-insensitive for ASCII on SQLite, so both dialects use
    /// a position function instead.
    pub fn contains(&self, column: &str, placeholder: &str) -> String {
        match self {
            Driver::Postgres => format!("strpos({column}, {placeholder}) > 0"),
            Driver::Sqlite => format!("instr({column}, {placeholder}) > 0"),
        }
    }

    /// Name used in logs and the `DB_CONNECTION` variable.
    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::Postgres => "postgres",
            Driver::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Driver {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pgsql" => Ok(Driver::Postgres),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(DbError::UnsupportedDriver(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_driver_names() {
        assert_eq!("postgres".parse::<Driver>().unwrap(), Driver::Postgres);
        assert_eq!("PostgreSQL".parse::<Driver>().unwrap(), Driver::Postgres);
        assert_eq!("sqlite3".parse::<Driver>().unwrap(), Driver::Sqlite);
        assert!(matches!(
            "mysql".parse::<Driver>(),
            Err(DbError::UnsupportedDriver(name)) if name == "mysql"
        ));
    }

    #[test]
    fn test_contains_predicate() {
        assert_eq!(Driver::Sqlite.contains("p.name", "$1"), "instr(p.name, $1) > 0");
        assert_eq!(Driver::Postgres.contains("p.name", "$2"), "strpos(p.name, $2) > 0");
    }
}
