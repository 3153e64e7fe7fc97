//! JSONL writing operations.
//!
//! [`JsonlWriter`] serializes one value per line over any buffered async
//! writer. [`write_jsonl_atomic`] adds crash safety on top: data is
//! written to a sibling `.tmp` file which is then renamed over the
//! target. On POSIX filesystems the rename is atomic, so readers observe
//! either the old file or the complete new one, never a torn write.

use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Async writer for JSONL (JSON Lines) data.
///
/// Wraps an async writer in a [`BufWriter`] and serializes each value to
/// a single JSON line followed by `\n`. Call [`flush`](Self::flush) before
/// dropping the writer, otherwise buffered data may be lost.
pub struct JsonlWriter<W> {
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> JsonlWriter<W> {
    /// Creates a new `JsonlWriter` wrapping the given async writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Serializes a single value and writes it as one line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the underlying write
    /// fails.
    pub async fn write<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut line = serde_json::to_vec(value)?;
        line.push(b'\n');
        self.writer.write_all(&line).await?;
        Ok(())
    }

    /// Writes every value from an iterator, one line each.
    ///
    /// # Errors
    ///
    /// Returns the first serialization or I/O error encountered; values
    /// after the failure are not written.
    pub async fn write_all<T, I>(&mut self, values: I) -> Result<()>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        for value in values {
            self.write(&value).await?;
        }
        Ok(())
    }

    /// Flushes buffered data to the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }
}

/// Writes a slice of values to a JSONL file, creating or truncating it.
///
/// This is a plain (non-atomic) write; prefer [`write_jsonl_atomic`] when
/// the target file may already hold data worth keeping on failure.
///
/// # Errors
///
/// Returns an error if the file cannot be created, any value fails to
/// serialize, or an I/O error occurs.
pub async fn write_jsonl<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref()).await?;
    let mut writer = JsonlWriter::new(file);
    writer.write_all(values.iter()).await?;
    writer.flush().await?;
    Ok(())
}

/// Atomically writes a slice of values to a JSONL file.
///
/// Data is first written to a sibling temp file, which is then renamed
/// over the target path. If anything fails before the rename, the
/// original file is left untouched and the temp file is removed on a
/// best-effort basis.
///
/// # Errors
///
/// Returns an error if the temp file cannot be created, any value fails
/// to serialize, an I/O error occurs during writing, or the final rename
/// fails (for example across filesystems).
pub async fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_jsonl(&temp_path, values).await {
        // Best-effort cleanup; the original file is still intact.
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Atomically writes one value as a pretty-printed JSON document.
///
/// Same temp-and-rename scheme as [`write_jsonl_atomic`], for outputs
/// that are a single JSON document rather than one record per line.
///
/// # Errors
///
/// Returns an error if serialization fails, the temp file cannot be
/// written, or the final rename fails.
pub async fn write_json_atomic<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    let mut document = serde_json::to_vec_pretty(value)?;
    document.push(b'\n');
    if let Err(e) = tokio::fs::write(&temp_path, &document).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e.into());
    }

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Derives the sibling temp path used during atomic writes.
///
/// `data.jsonl` becomes `data.jsonl.tmp`; a path without an extension
/// gets a plain `.tmp` suffix.
fn make_temp_path(path: &Path) -> PathBuf {
    let mut temp_path = path.to_path_buf();
    let new_extension = match path.extension() {
        Some(ext) => {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".tmp");
            new_ext
        }
        None => std::ffi::OsString::from("tmp"),
    };
    temp_path.set_extension(new_extension);
    temp_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_with_extension() {
        let path = Path::new("/data/tasks.jsonl");
        assert_eq!(make_temp_path(path), Path::new("/data/tasks.jsonl.tmp"));
    }

    #[test]
    fn temp_path_without_extension() {
        let path = Path::new("/data/tasks");
        assert_eq!(make_temp_path(path), Path::new("/data/tasks.tmp"));
    }

    #[test]
    fn temp_path_relative() {
        let path = Path::new("tasks.jsonl");
        assert_eq!(make_temp_path(path), Path::new("tasks.jsonl.tmp"));
    }
}
