//! Minimal string-celled table for data whose columns are not known ahead of
//! time. The reference CSV arrives with an arbitrary header, and the merged
//! output must carry those columns through unchanged, so a fixed struct per
//! row does not fit. An empty cell means "missing", matching CSV semantics.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column with this exact header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value, or `""` when the row is ragged.
    pub fn cell<'a>(&'a self, row: &'a [String], name: &str) -> &'a str {
        self.column_index(name)
            .and_then(|i| row.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Append a column. `values` must have one entry per row.
    pub fn push_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.headers.push(name.to_string());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
    }

    /// Apply `f` in place to every cell of the named column, if present.
    pub fn map_column(&mut self, name: &str, f: impl Fn(&str) -> String) {
        if let Some(i) = self.column_index(name) {
            for row in &mut self.rows {
                if let Some(cell) = row.get_mut(i) {
                    *cell = f(cell);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into(), "2".into()], vec!["3".into(), "".into()]],
        }
    }

    #[test]
    fn push_and_map_columns() {
        let mut t = sample();
        t.push_column("c", vec!["x".into(), "y".into()]);
        assert_eq!(t.headers, ["a", "b", "c"]);
        assert_eq!(t.rows[1], ["3", "", "y"]);

        t.map_column("a", |s| format!("{}!", s));
        assert_eq!(t.rows[0][0], "1!");
        assert_eq!(t.cell(&t.rows[1], "missing_col"), "");
    }
}
