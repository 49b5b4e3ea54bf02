//! CSV reader for chart exports

use crate::catalog::RawRow;
use crate::error::Result;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read every row from comma-delimited text with a header row.
///
/// Columns are matched by header name; columns other than the five the
/// catalog needs are ignored. A missing column fails the whole read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let rows = rdr
        .deserialize::<RawRow>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    debug!("Read {} chart rows", rows.len());
    Ok(rows)
}

/// Read rows from a CSV file on disk
pub fn read_rows_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let file = File::open(path)?;
    read_rows(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_read_rows_by_header() {
        let data = "\
chart_week,current_week,title_unused,song,performer,chart_debut,peak_position,time_on_chart
1958-08-04,1,x,Poor Little Fool,Ricky Nelson,1958-08-04,1,1
1958-08-11,2,x,\"Patricia, Mambo\",Perez Prado And His Orchestra,1958-08-04,2,2
";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], RawRow::new("Poor Little Fool", "Ricky Nelson", "1958-08-04", 1, 1));
        assert_eq!(rows[1].song, "Patricia, Mambo");
        assert_eq!(rows[1].peak_position, "2");
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let data = "song,performer,chart_debut,peak_position\nA,X,2020-01,5\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_header_only() {
        let data = "song,performer,chart_debut,peak_position,time_on_chart\n";
        assert!(read_rows(data.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_rows_from_path("/nonexistent/chart.csv").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
