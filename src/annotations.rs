use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Workbook has no worksheets")]
    NoWorksheet,
    #[error("Row {row}, column {column}: value is not an integer")]
    BadCoordinate { row: usize, column: usize },
}

/// One raw reference-data row. Coordinate cells are kept unconverted so
/// that a corrupt cell only fails the request that matches its row.
#[derive(Debug, Clone)]
pub struct AnnotationRow {
    pub key: String,
    pub label: String,
    pub coords: [Data; 4],
}

/// A bounding box matched for one lookup key. `width` and `height` can be
/// negative when the source row has inverted corners.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub label: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// In-memory copy of the reference table, loaded once at startup and
/// shared read-only across requests.
#[derive(Debug)]
pub struct AnnotationStore {
    rows: Vec<AnnotationRow>,
}

impl AnnotationStore {
    /// Reads the first worksheet of the workbook at `path`, skipping the
    /// header row. Columns are positional: key, label, xmin, ymin, xmax, ymax.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(StoreError::NoWorksheet)??;

        let mut rows = Vec::new();
        for (idx, row) in range.rows().enumerate().skip(1) {
            if row.len() < 6 {
                tracing::warn!("skipping row {}: fewer than 6 columns", idx);
                continue;
            }
            rows.push(AnnotationRow {
                key: cell_to_string(&row[0]),
                label: cell_to_string(&row[1]).trim().to_string(),
                coords: [
                    row[2].clone(),
                    row[3].clone(),
                    row[4].clone(),
                    row[5].clone(),
                ],
            });
        }

        Ok(Self { rows })
    }

    pub fn from_rows(rows: Vec<AnnotationRow>) -> Self {
        Self { rows }
    }

    /// Returns the annotations whose key matches exactly, in row order.
    /// Matching is case- and whitespace-sensitive; no match is not an error.
    pub fn lookup(&self, key: &str) -> Result<Vec<Annotation>, StoreError> {
        let mut matches = Vec::new();
        for (idx, row) in self.rows.iter().enumerate() {
            if row.key != key {
                continue;
            }
            let mut coords = [0i64; 4];
            for (col, cell) in row.coords.iter().enumerate() {
                coords[col] = cell_to_i64(cell).ok_or(StoreError::BadCoordinate {
                    row: idx,
                    column: col + 2,
                })?;
            }
            let [xmin, ymin, xmax, ymax] = coords;
            matches.push(Annotation {
                label: row.label.clone(),
                x: xmin,
                y: ymin,
                width: xmax - xmin,
                height: ymax - ymin,
            });
        }
        Ok(matches)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        other => other.to_string(),
    }
}

fn cell_to_i64(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(*f as i64),
        Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_row(key: &str, label: &str, coords: [i64; 4]) -> AnnotationRow {
        AnnotationRow {
            key: key.to_string(),
            label: label.to_string(),
            coords: coords.map(Data::Int),
        }
    }

    #[test]
    fn lookup_matches_exact_key_only() {
        let store = AnnotationStore::from_rows(vec![
            int_row("IMG001", "Apple leaf", [10, 10, 50, 50]),
            int_row("img001", "grape leaf", [0, 0, 5, 5]),
            int_row("IMG001 ", "Potato leaf", [0, 0, 5, 5]),
        ]);

        let matches = store.lookup("IMG001").unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].label, "Apple leaf");
    }

    #[test]
    fn lookup_computes_width_and_height_from_corners() {
        let store =
            AnnotationStore::from_rows(vec![int_row("IMG001", "Apple leaf", [10, 20, 50, 90])]);

        let matches = store.lookup("IMG001").unwrap();

        assert_eq!(
            matches[0],
            Annotation {
                label: "Apple leaf".to_string(),
                x: 10,
                y: 20,
                width: 40,
                height: 70,
            }
        );
    }

    #[test]
    fn lookup_preserves_negative_extent_from_inverted_corners() {
        let store =
            AnnotationStore::from_rows(vec![int_row("IMG002", "Tomato leaf", [50, 50, 10, 10])]);

        let matches = store.lookup("IMG002").unwrap();

        assert_eq!(matches[0].width, -40);
        assert_eq!(matches[0].height, -40);
    }

    #[test]
    fn lookup_without_match_is_empty_not_error() {
        let store = AnnotationStore::from_rows(vec![int_row("IMG001", "Apple leaf", [0, 0, 1, 1])]);

        assert!(store.lookup("UNKNOWN").unwrap().is_empty());
    }

    #[test]
    fn lookup_converts_numeric_strings_and_floats() {
        let store = AnnotationStore::from_rows(vec![AnnotationRow {
            key: "IMG003".to_string(),
            label: "Cherry leaf".to_string(),
            coords: [
                Data::String("10".to_string()),
                Data::Float(20.0),
                Data::String(" 30 ".to_string()),
                Data::Int(40),
            ],
        }]);

        let matches = store.lookup("IMG003").unwrap();

        assert_eq!(matches[0].x, 10);
        assert_eq!(matches[0].y, 20);
        assert_eq!(matches[0].width, 20);
        assert_eq!(matches[0].height, 20);
    }

    #[test]
    fn lookup_fails_on_non_numeric_coordinate() {
        let store = AnnotationStore::from_rows(vec![AnnotationRow {
            key: "IMG004".to_string(),
            label: "Peach leaf".to_string(),
            coords: [
                Data::Int(1),
                Data::String("not a number".to_string()),
                Data::Int(3),
                Data::Int(4),
            ],
        }]);

        let err = store.lookup("IMG004").unwrap_err();

        assert!(matches!(
            err,
            StoreError::BadCoordinate { row: 0, column: 3 }
        ));
    }

    #[test]
    fn corrupt_row_does_not_affect_other_keys() {
        let store = AnnotationStore::from_rows(vec![
            AnnotationRow {
                key: "BAD".to_string(),
                label: "Corn rust leaf".to_string(),
                coords: [
                    Data::String("x".to_string()),
                    Data::Int(0),
                    Data::Int(0),
                    Data::Int(0),
                ],
            },
            int_row("GOOD", "Strawberry leaf", [1, 2, 3, 4]),
        ]);

        assert!(store.lookup("BAD").is_err());
        assert_eq!(store.lookup("GOOD").unwrap().len(), 1);
    }
}
