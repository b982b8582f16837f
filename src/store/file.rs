use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{info, warn};

use crate::models::Book;

use super::error::{StoreError, StoreResult};
use super::line::{decode_line, encode_line, DecodedLine, DELIMITER};

/// Read every record from `path`. A missing file is the first-run case and
/// yields an empty list; rows with the wrong number of fields are skipped.
/// The first non-numeric id or year aborts the whole load.
pub fn load(path: &Path) -> StoreResult<Vec<Book>> {
    Ok(load_existing(path)?.unwrap_or_default())
}

/// Like [`load`], but tells a missing file (`None`) apart from an empty one.
pub fn load_existing(path: &Path) -> StoreResult<Option<Vec<Book>>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(
                "event=store_load status=missing path={} records=0",
                path.display()
            );
            return Ok(None);
        }
        Err(err) => return Err(StoreError::io(path, err)),
    };

    let mut books = Vec::new();
    let mut skipped = 0usize;
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|err| match err.kind() {
            io::ErrorKind::InvalidData => StoreError::Encoding { line: line_no },
            _ => StoreError::io(path, err),
        })?;
        match decode_line(&line, line_no)? {
            DecodedLine::Record(book) => books.push(book),
            DecodedLine::Malformed { fields } => {
                skipped += 1;
                warn!(
                    "event=store_load_skip line={} fields={} path={}",
                    line_no,
                    fields,
                    path.display()
                );
            }
        }
    }

    info!(
        "event=store_load status=ok path={} records={} skipped={}",
        path.display(),
        books.len(),
        skipped
    );
    Ok(Some(books))
}

/// Overwrite `path` with one row per book, in order. The parent directory is
/// created when missing.
pub fn save(path: &Path, books: &[Book]) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }

    let file = File::create(path).map_err(|err| StoreError::io(path, err))?;
    let mut writer = BufWriter::new(file);
    for book in books {
        if !is_delimiter_safe(&book.title) || !is_delimiter_safe(&book.author) {
            warn!(
                "event=store_save_unsafe_field id={} path={}",
                book.id,
                path.display()
            );
        }
        writeln!(writer, "{}", encode_line(book)).map_err(|err| StoreError::io(path, err))?;
    }
    writer.flush().map_err(|err| StoreError::io(path, err))?;

    info!(
        "event=store_save status=ok path={} records={}",
        path.display(),
        books.len()
    );
    Ok(())
}

fn is_delimiter_safe(value: &str) -> bool {
    !value.contains([DELIMITER, '\n', '\r'])
}
