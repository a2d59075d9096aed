//! Atomic artifact writes: cleaned CSV and serialized pipeline.
//!
//! Both writers create missing parent directories and go through a sibling
//! temp file followed by a rename, so a crash mid-write never leaves a
//! truncated artifact at the destination path.

use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::debug;

use aqua_model::{PrepError, Result};

/// Writes the serialized pipeline blob to `path`, replacing any existing file.
pub fn write_bytes_atomic(bytes: &[u8], path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);
    if let Err(e) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(PrepError::write(&tmp, e));
    }
    finalize(&tmp, path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote pipeline artifact");
    Ok(())
}

/// Writes `df` to `path` as CSV with a header row and no row index,
/// replacing any existing file. Column order follows the frame; null cells
/// print as empty fields.
pub fn write_csv_atomic(df: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let tmp = temp_sibling(path);
    if let Err(err) = write_csv(df, &tmp) {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }
    finalize(&tmp, path)?;
    debug!(path = %path.display(), rows = df.height(), "wrote cleaned dataset");
    Ok(())
}

fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).map_err(|e| PrepError::write(path, e))?;
    CsvWriter::new(&mut file)
        .finish(&mut df.clone())
        .map_err(PrepError::frame)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| PrepError::write(parent, e))?;
        }
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| std::ffi::OsString::from("artifact"));
    name.push(".tmp");
    path.with_file_name(name)
}

fn finalize(tmp: &Path, path: &Path) -> Result<()> {
    fs::rename(tmp, path).map_err(|e| {
        let _ = fs::remove_file(tmp);
        PrepError::write(path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("ph".into(), vec![7.0, 6.5]).into_column(),
            Series::new("Potability".into(), vec![1i64, 0]).into_column(),
        ])
        .expect("frame")
    }

    #[test]
    fn bytes_writer_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("preprocessing/nested/pipeline.bin");
        write_bytes_atomic(b"fitted", &dest).expect("write");
        assert_eq!(fs::read(&dest).expect("read back"), b"fitted");
    }

    #[test]
    fn rewrites_replace_previous_contents_without_leftover_temp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("pipeline.bin");
        write_bytes_atomic(b"first", &dest).expect("first write");
        write_bytes_atomic(b"second", &dest).expect("second write");
        assert_eq!(fs::read(&dest).expect("read back"), b"second");
        assert!(!temp_sibling(&dest).exists());
    }

    #[test]
    fn failed_write_leaves_existing_destination_intact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("pipeline.bin");
        write_bytes_atomic(b"kept", &dest).expect("seed write");

        // Occupy the temp slot with a directory so the next write fails
        // before it can touch the destination.
        fs::create_dir(temp_sibling(&dest)).expect("block temp path");
        let err = write_bytes_atomic(b"lost", &dest).unwrap_err();
        assert!(matches!(err, PrepError::Write { .. }));
        assert_eq!(fs::read(&dest).expect("read back"), b"kept");
        fs::remove_dir(temp_sibling(&dest)).expect("unblock");
    }

    #[test]
    fn csv_output_has_header_and_input_column_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("out/cleaned.csv");
        write_csv_atomic(&sample_frame(), &dest).expect("write");
        let text = fs::read_to_string(&dest).expect("read back");
        assert_eq!(text, "ph,Potability\n7.0,1\n6.5,0\n");
    }

    #[test]
    fn csv_output_parses_back_with_a_plain_reader() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("cleaned.csv");
        write_csv_atomic(&sample_frame(), &dest).expect("write");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&dest)
            .expect("open");
        let headers: Vec<String> = reader
            .headers()
            .expect("headers")
            .iter()
            .map(str::to_string)
            .collect();
        assert_eq!(headers, ["ph", "Potability"]);
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn null_cells_write_as_empty_fields() {
        let df = DataFrame::new(vec![
            Series::new("ph".into(), vec![Some(7.0), None]).into_column(),
            Series::new("Potability".into(), vec![1i64, 0]).into_column(),
        ])
        .expect("frame");
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("cleaned.csv");
        write_csv_atomic(&df, &dest).expect("write");
        let text = fs::read_to_string(&dest).expect("read back");
        assert_eq!(text, "ph,Potability\n7.0,1\n,0\n");
    }
}
