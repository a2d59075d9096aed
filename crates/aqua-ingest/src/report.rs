use polars::prelude::DataFrame;
use serde::Serialize;

/// Missing-value count for a single column.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnMissing {
    pub name: String,
    pub missing: usize,
}

/// Per-column missing-value counts for a loaded dataset, in input column order.
#[derive(Debug, Clone, Serialize)]
pub struct MissingReport {
    pub rows: usize,
    pub columns: Vec<ColumnMissing>,
}

impl MissingReport {
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|column| column.missing).sum()
    }

    pub fn has_missing(&self) -> bool {
        self.columns.iter().any(|column| column.missing > 0)
    }

    /// Columns with at least one missing cell.
    pub fn affected(&self) -> impl Iterator<Item = &ColumnMissing> {
        self.columns.iter().filter(|column| column.missing > 0)
    }
}

/// Counts nulls per column. Assumes `NaN` was already normalized to null at
/// load time, so null counts are the complete missing-value picture.
pub fn missing_report(df: &DataFrame) -> MissingReport {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| ColumnMissing {
            name: column.name().to_string(),
            missing: column.null_count(),
        })
        .collect();
    MissingReport {
        rows: df.height(),
        columns,
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    fn frame_with_gaps() -> DataFrame {
        let ph = Series::new("ph".into(), vec![Some(7.0), None, Some(6.5)]).into_column();
        let hardness =
            Series::new("Hardness".into(), vec![120.0, 180.5, 90.0]).into_column();
        let label = Series::new("Potability".into(), vec![1i64, 0, 1]).into_column();
        DataFrame::new(vec![ph, hardness, label]).expect("frame")
    }

    #[test]
    fn counts_follow_input_column_order() {
        let report = missing_report(&frame_with_gaps());
        let names: Vec<&str> = report
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();
        assert_eq!(names, ["ph", "Hardness", "Potability"]);
        assert_eq!(report.rows, 3);
        assert_eq!(report.total_missing(), 1);
        assert!(report.has_missing());
    }

    #[test]
    fn affected_skips_complete_columns() {
        let report = missing_report(&frame_with_gaps());
        let affected: Vec<&str> = report
            .affected()
            .map(|column| column.name.as_str())
            .collect();
        assert_eq!(affected, ["ph"]);
    }

    #[test]
    fn complete_frame_has_no_missing() {
        let df = DataFrame::new(vec![
            Series::new("ph".into(), vec![7.0, 6.8]).into_column(),
            Series::new("Potability".into(), vec![0i64, 1]).into_column(),
        ])
        .expect("frame");
        let report = missing_report(&df);
        assert!(!report.has_missing());
        assert_eq!(report.total_missing(), 0);
    }
}
