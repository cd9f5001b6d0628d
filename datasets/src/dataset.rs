use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use log::info;
use ndarray::{Array2, ArrayBase, Data, Ix2};
use ndarray_csv::{Array2Reader, Array2Writer};

use crate::error::{DatasetError, Result};
use crate::FEATURE_NAMES;

/// Parse a rock table from CSV bytes
///
/// The first line must be the header `UCS,SPZ,DENS`. A table without data rows is valid and
/// results in an array of shape `(0, 3)`.
pub fn array_from_csv<R: Read>(csv: R) -> Result<Array2<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_reader(csv);

    let headers = reader.headers()?;
    if headers.iter().ne(FEATURE_NAMES.iter().copied()) {
        return Err(DatasetError::Header {
            expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            found: headers.iter().map(|s| s.to_string()).collect(),
        });
    }

    // extract ndarray
    let array: Array2<f64> = reader.deserialize_array2_dynamic()?;
    if array.nrows() == 0 {
        return Ok(Array2::zeros((0, FEATURE_NAMES.len())));
    }
    if array.ncols() != FEATURE_NAMES.len() {
        return Err(DatasetError::NColumns {
            expected: FEATURE_NAMES.len(),
            found: array.ncols(),
        });
    }

    Ok(array)
}

/// Serialize a rock table as CSV, header first, one row per sample and no index column
pub fn array_to_csv<W: Write, D: Data<Elem = f64>>(
    records: &ArrayBase<D, Ix2>,
    csv: W,
) -> Result<()> {
    if records.ncols() != FEATURE_NAMES.len() {
        return Err(DatasetError::NColumns {
            expected: FEATURE_NAMES.len(),
            found: records.ncols(),
        });
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_writer(csv);

    writer.write_record(&FEATURE_NAMES)?;
    writer.serialize_array2(&records.to_owned())?;
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Read a rock table written by [`write_rock_csv`]
pub fn read_rock_csv<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = array_from_csv(file)?;
    info!("read {} ({} rows)", path.display(), records.nrows());

    Ok(records)
}

/// Write a rock table to `path`, replacing any existing file
pub fn write_rock_csv<P: AsRef<Path>, D: Data<Elem = f64>>(
    path: P,
    records: &ArrayBase<D, Ix2>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    array_to_csv(records, file)?;
    info!("wrote {} ({} rows)", path.display(), records.nrows());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn header_comes_first_without_index_column() {
        let records = array![[94.5, 9.5, 2.77], [4.86, 2.0, 2.29]];
        let mut buf = Vec::new();
        array_to_csv(&records, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("UCS,SPZ,DENS"));
        assert_eq!(lines.next(), Some("94.5,9.5,2.77"));
        assert_eq!(lines.next(), Some("4.86,2.0,2.29"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn written_table_reads_back() {
        let records = array![[1.25, 0.5, 2.5], [100.0, 12.75, 2.875], [0.0, 0.0, 0.0]];
        let mut buf = Vec::new();
        array_to_csv(&records, &mut buf).unwrap();

        let parsed = array_from_csv(&buf[..]).unwrap();
        assert_abs_diff_eq!(parsed, records);
    }

    #[test]
    fn empty_table_keeps_three_columns() {
        let records = Array2::<f64>::zeros((0, 3));
        let mut buf = Vec::new();
        array_to_csv(&records, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf.clone()).unwrap(), "UCS,SPZ,DENS\n");

        let parsed = array_from_csv(&buf[..]).unwrap();
        assert_eq!(parsed.dim(), (0, 3));
    }

    #[test]
    fn wrong_header_is_rejected() {
        let csv = "UCS,DENS,SPZ\n1.0,2.0,3.0\n";
        let res = array_from_csv(csv.as_bytes());
        assert!(matches!(res, Err(DatasetError::Header { .. })));
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let records = array![[1.0, 2.0], [3.0, 4.0]];
        let res = array_to_csv(&records, Vec::new());
        assert!(matches!(
            res,
            Err(DatasetError::NColumns {
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn missing_file_names_the_path() {
        let path = std::env::temp_dir().join("rockclass-does-not-exist").join("gneiss.csv");
        let err = read_rock_csv(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
        assert!(err.to_string().contains("gneiss.csv"));
    }
}
