//! Reads the Play Store CSV into raw string records.

use std::fs::File;
use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::error::Result;
use crate::record::RawRecord;

/// Raw rows plus the number of rows that were discarded as malformed.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub records: Vec<RawRecord>,
    pub total_rows: usize,
    pub malformed_rows: usize,
}

/// Loads the CSV at `path`. See [`read_records`].
pub fn load_records(path: &str) -> Result<LoadedTable> {
    let file = File::open(path)?;
    read_records(file)
}

/// Reads header-keyed records, dropping rows whose columns are shifted.
///
/// A row is malformed when its field count differs from the header's, or when
/// its `Rating` is a number above 5 (the value landed in the wrong column).
pub fn read_records<R: Read>(reader: R) -> Result<LoadedTable> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let rating_idx = headers.iter().position(|h| h == "Rating");

    let mut table = LoadedTable::default();

    for (idx, result) in rdr.records().enumerate() {
        let row = result?;
        table.total_rows += 1;

        if is_malformed(&row, &headers, rating_idx) {
            warn!(
                row = idx + 1,
                app = row.get(0).unwrap_or(""),
                fields = row.len(),
                expected = headers.len(),
                "Dropping malformed row"
            );
            table.malformed_rows += 1;
            continue;
        }

        let record: RawRecord = row.deserialize(Some(&headers))?;
        table.records.push(record);
    }

    debug!(
        rows = table.total_rows,
        columns = headers.len(),
        malformed = table.malformed_rows,
        "CSV loaded"
    );

    Ok(table)
}

fn is_malformed(row: &StringRecord, headers: &StringRecord, rating_idx: Option<usize>) -> bool {
    if row.len() != headers.len() {
        return true;
    }

    rating_idx
        .and_then(|i| row.get(i))
        .and_then(|r| r.trim().parse::<f64>().ok())
        .is_some_and(|rating| rating > 5.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "App,Category,Rating,Reviews,Size,Installs,Type,Price,Content Rating,Genres,Last Updated";

    #[test]
    fn test_read_valid_rows() {
        let data = format!(
            "{HEADER}\n\
             Toca Life: City,FAMILY,4.7,31085,24M,\"500,000+\",Paid,$3.99,Everyone,Education;Pretend Play,\"July 6, 2018\"\n\
             Photo Editor,ART_AND_DESIGN,4.1,159,19M,\"10,000+\",Free,0,Everyone,Art & Design,\"January 7, 2018\"\n"
        );

        let table = read_records(data.as_bytes()).unwrap();
        assert_eq!(table.total_rows, 2);
        assert_eq!(table.malformed_rows, 0);
        assert_eq!(table.records.len(), 2);

        let first = &table.records[0];
        assert_eq!(first.app, "Toca Life: City");
        assert_eq!(first.installs, "500,000+");
        assert_eq!(first.price, "$3.99");
        assert_eq!(first.genres, "Education;Pretend Play");
    }

    #[test]
    fn test_drops_short_row() {
        // Category column missing: every later value sits one column left.
        let data = format!(
            "{HEADER}\n\
             Life Made WI-Fi Touchscreen Photo Frame,1.9,19.0,3.0M,\"1,000+\",Free,0,Everyone,,\"February 11, 2018\"\n\
             Toca Life: City,FAMILY,4.7,31085,24M,\"500,000+\",Paid,$3.99,Everyone,Education;Pretend Play,\"July 6, 2018\"\n"
        );

        let table = read_records(data.as_bytes()).unwrap();
        assert_eq!(table.total_rows, 2);
        assert_eq!(table.malformed_rows, 1);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].app, "Toca Life: City");
    }

    #[test]
    fn test_drops_out_of_range_rating() {
        let data = format!(
            "{HEADER}\n\
             Shifted,1.9,19.0,3.0M,\"1,000+\",Free,0,Everyone,,x,\"February 11, 2018\"\n"
        );

        let table = read_records(data.as_bytes()).unwrap();
        assert_eq!(table.malformed_rows, 1);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_records("/nonexistent/googleplaystore.csv").is_err());
    }
}
