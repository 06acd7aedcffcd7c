//! SQL run against the dataset catalog.
//!
//! Every experiment is a user table; SQLite's internal `sqlite_*` tables are
//! never experiments. All catalog queries share that predicate so `keys`,
//! `size` and `contains` always agree.

pub const LIST_TABLES: &str = "
SELECT name FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'
";

/// Zero only for a file with no header yet.
pub const PAGE_COUNT: &str = "PRAGMA page_count";

pub const COUNT_TABLES: &str = "
SELECT COUNT(*) FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\'
";

pub const TABLE_EXISTS: &str = "
SELECT 1 FROM sqlite_master
WHERE type = 'table' AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' AND name = ?1
";

/// Select every row of `table` in storage order.
///
/// The name is quoted as an SQL identifier; embedded double quotes are
/// doubled.
pub fn select_all(table: &str) -> String {
  format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""))
}
