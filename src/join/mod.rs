use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MatchError, Result};
use crate::matcher::MatchTable;

/// Column names the join engine adds for match metadata.
const MATCH_COLUMNS: [&str; 5] = ["from_index", "from", "score", "to_index", "to"];

/// Single table value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Str(v) => f.write_str(v),
        }
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Str(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Str(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

/// Column-ordered in-memory table.
/// Columns keep their insertion order and share one uniform length,
/// enforced at insertion.
///
/// # Examples
/// ```
/// use fuzzy_join::Table;
/// let mut table = Table::new();
/// table.insert_text_column("name", ["cat", "dog"]).unwrap();
/// assert_eq!(table.row_count(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    #[serde(with = "indexmap::map::serde_seq")]
    columns: IndexMap<String, Vec<Cell>>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            columns: IndexMap::new(),
        }
    }

    /// Append a column. Fails on a duplicate name or a length differing
    /// from the existing columns.
    pub fn insert_column<S>(&mut self, name: S, cells: Vec<Cell>) -> Result<&mut Self>
    where
        S: Into<String>,
    {
        let name = name.into();
        if self.columns.contains_key(&name) {
            return Err(MatchError::InvalidInput(format!(
                "duplicate column {name:?}"
            )));
        }
        if !self.columns.is_empty() && cells.len() != self.row_count() {
            return Err(MatchError::InvalidInput(format!(
                "column {name:?} has {} rows, table has {}",
                cells.len(),
                self.row_count()
            )));
        }
        self.columns.insert(name, cells);
        Ok(self)
    }

    /// Append a column of strings.
    pub fn insert_text_column<S, I, T>(&mut self, name: S, values: I) -> Result<&mut Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.insert_column(
            name,
            values.into_iter().map(|v| Cell::Str(v.into())).collect(),
        )
    }

    #[inline]
    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.columns.get(name).map(|cells| cells.as_slice())
    }

    #[inline]
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|name| name.as_str())
    }

    /// Iterate columns as (name, cells) in insertion order.
    #[inline]
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Cell])> {
        self.columns
            .iter()
            .map(|(name, cells)| (name.as_str(), cells.as_slice()))
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, cells)| cells.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Cells of one row in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.values().map(|cells| &cells[index]).collect())
    }

    /// Key column rendered to strings for matching.
    pub(crate) fn key_strings(&self, name: &str) -> Result<Vec<String>> {
        if self.is_empty() {
            return Err(MatchError::InvalidInput("table has no rows".to_string()));
        }
        let cells = self.column(name).ok_or_else(|| {
            MatchError::InvalidInput(format!("missing key column {name:?}"))
        })?;
        Ok(cells.iter().map(|cell| cell.to_string()).collect())
    }
}

/// Combine `left` and `right` along matched row indices.
/// One output row per match-table row, so ties fan out and unmatched left
/// rows are absent (inner join). Output columns: all left columns, the
/// five match columns, then all right columns; right columns colliding
/// with an earlier name get a `_right` suffix.
pub(crate) fn join_tables(left: &Table, right: &Table, matches: &MatchTable) -> Result<Table> {
    for name in MATCH_COLUMNS {
        if left.column(name).is_some() {
            return Err(MatchError::InvalidInput(format!(
                "left column {name:?} collides with a match column"
            )));
        }
    }

    let mut out = Table::new();
    for (name, cells) in left.columns() {
        out.insert_column(
            name,
            matches
                .iter()
                .map(|row| cells[row.from_index].clone())
                .collect(),
        )?;
    }
    out.insert_column(
        "from_index",
        matches
            .iter()
            .map(|row| Cell::Int(row.from_index as i64))
            .collect(),
    )?;
    out.insert_column(
        "from",
        matches.iter().map(|row| Cell::Str(row.from.clone())).collect(),
    )?;
    out.insert_column(
        "score",
        matches.iter().map(|row| Cell::Float(row.score)).collect(),
    )?;
    out.insert_column(
        "to_index",
        matches
            .iter()
            .map(|row| Cell::Int(row.to_index as i64))
            .collect(),
    )?;
    out.insert_column(
        "to",
        matches.iter().map(|row| Cell::Str(row.to.clone())).collect(),
    )?;
    for (name, cells) in right.columns() {
        let name = if out.column(name).is_some() {
            format!("{name}_right")
        } else {
            name.to_string()
        };
        out.insert_column(
            name,
            matches
                .iter()
                .map(|row| cells[row.to_index].clone())
                .collect(),
        )?;
    }
    debug!(
        rows = out.row_count(),
        columns = out.column_count(),
        "joined tables"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::FuzzyMatcher;

    fn left_table() -> Table {
        let mut table = Table::new();
        table
            .insert_text_column("name", ["cat", "dog", "zzz"])
            .unwrap();
        table
            .insert_text_column("size", ["small", "medium", "unknown"])
            .unwrap();
        table
    }

    fn right_table() -> Table {
        let mut table = Table::new();
        table
            .insert_text_column("animal", ["category", "doggy"])
            .unwrap();
        table
            .insert_column("legs", vec![Cell::Int(4), Cell::Int(4)])
            .unwrap();
        table
    }

    #[test]
    fn insert_column_enforces_uniform_length() {
        let mut table = Table::new();
        table.insert_text_column("a", ["x", "y"]).unwrap();
        let err = table.insert_column("b", vec![Cell::Int(1)]);
        assert!(matches!(err, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn insert_column_rejects_duplicates() {
        let mut table = Table::new();
        table.insert_text_column("a", ["x"]).unwrap();
        let err = table.insert_text_column("a", ["y"]);
        assert!(matches!(err, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn row_returns_cells_in_column_order() {
        let table = right_table();
        let row = table.row(1).unwrap();
        assert_eq!(row, vec![&Cell::Str("doggy".to_string()), &Cell::Int(4)]);
        assert!(table.row(2).is_none());
    }

    #[test]
    fn join_has_inner_semantics_and_ordered_columns() {
        let matcher = FuzzyMatcher::new();
        let joined = matcher
            .join(&left_table(), &right_table(), "name", "animal")
            .unwrap();

        let names: Vec<&str> = joined.column_names().collect();
        assert_eq!(
            names,
            vec!["name", "size", "from_index", "from", "score", "to_index", "to", "animal", "legs"]
        );

        // "zzz" shares no trigram with either candidate and is dropped
        assert_eq!(joined.row_count(), 2);
        let from_col = joined.column("from").unwrap();
        assert!(!from_col.contains(&Cell::Str("zzz".to_string())));

        // matched right cells ride along
        assert_eq!(joined.column("animal").unwrap()[0], Cell::Str("category".to_string()));
        assert_eq!(joined.column("legs").unwrap()[0], Cell::Int(4));
        // left row position survives for recovering the fan-out
        assert_eq!(joined.column("from_index").unwrap()[1], Cell::Int(1));
    }

    #[test]
    fn tied_matches_fan_out_into_multiple_rows() {
        let mut left = Table::new();
        left.insert_text_column("name", ["cat"]).unwrap();
        let mut right = Table::new();
        right
            .insert_text_column("alias", ["catalog", "catalog"])
            .unwrap();

        let matcher = FuzzyMatcher::new();
        let joined = matcher.join(&left, &right, "name", "alias").unwrap();
        assert_eq!(joined.row_count(), 2);
        assert_eq!(joined.column("from_index").unwrap()[0], Cell::Int(0));
        assert_eq!(joined.column("from_index").unwrap()[1], Cell::Int(0));
        assert_eq!(joined.column("to_index").unwrap()[0], Cell::Int(0));
        assert_eq!(joined.column("to_index").unwrap()[1], Cell::Int(1));
    }

    #[test]
    fn missing_key_column_is_invalid_input() {
        let matcher = FuzzyMatcher::new();
        let err = matcher.join(&left_table(), &right_table(), "nope", "animal");
        assert!(matches!(err, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn empty_table_is_invalid_input() {
        let matcher = FuzzyMatcher::new();
        let err = matcher.join(&Table::new(), &right_table(), "name", "animal");
        assert!(matches!(err, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn reserved_left_column_is_rejected() {
        let mut left = Table::new();
        left.insert_text_column("name", ["cat"]).unwrap();
        left.insert_column("score", vec![Cell::Float(0.5)]).unwrap();
        let matcher = FuzzyMatcher::new();
        let err = matcher.join(&left, &right_table(), "name", "animal");
        assert!(matches!(err, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn colliding_right_column_gets_suffixed() {
        let mut left = Table::new();
        left.insert_text_column("name", ["cat"]).unwrap();
        let mut right = Table::new();
        right.insert_text_column("name", ["category"]).unwrap();

        let matcher = FuzzyMatcher::new();
        let joined = matcher.join(&left, &right, "name", "name").unwrap();
        let names: Vec<&str> = joined.column_names().collect();
        assert!(names.contains(&"name"));
        assert!(names.contains(&"name_right"));
        assert_eq!(
            joined.column("name_right").unwrap()[0],
            Cell::Str("category".to_string())
        );
    }

    #[test]
    fn integer_key_cells_match_by_rendered_text() {
        let mut left = Table::new();
        left.insert_column("code", vec![Cell::Int(12345)]).unwrap();
        let mut right = Table::new();
        right.insert_text_column("code_text", ["12345"]).unwrap();

        let matcher = FuzzyMatcher::new();
        let joined = matcher.join(&left, &right, "code", "code_text").unwrap();
        assert_eq!(joined.row_count(), 1);
        assert_eq!(joined.column("score").unwrap().len(), 1);
    }

    #[test]
    fn table_serde_round_trip_json_and_cbor() {
        let table = right_table();

        let json = serde_json::to_string(&table).unwrap();
        let from_json: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(from_json, table);

        let bytes = serde_cbor::to_vec(&table).unwrap();
        let from_cbor: Table = serde_cbor::from_slice(&bytes).unwrap();
        assert_eq!(from_cbor, table);
    }
}
