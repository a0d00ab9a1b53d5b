// drx_core/src/recover.rs
use crate::backend::DecrypterBackend;
use crate::error::{DrxError, Result};

use async_zip::tokio::read::seek::ZipFileReader;
use futures::TryStreamExt;
use std::io::Cursor;
use tokio::io::BufReader;

/// Outcome of one decrypt-and-unpack run, ready to offer for download.
#[derive(Debug, Clone)]
pub enum RecoveredFile {
    /// The first archive entry, under its stored name.
    Original { file_name: String, content: Vec<u8> },
    /// The decrypted payload could not be unpacked; the raw bytes are kept
    /// under a corruption-flagged name so the operator does not lose them.
    RawPayload {
        file_name: String,
        content: Vec<u8>,
        reason: DrxError,
    },
}

impl RecoveredFile {
    pub fn file_name(&self) -> &str {
        match self {
            RecoveredFile::Original { file_name, .. }
            | RecoveredFile::RawPayload { file_name, .. } => file_name,
        }
    }

    pub fn content(&self) -> &[u8] {
        match self {
            RecoveredFile::Original { content, .. }
            | RecoveredFile::RawPayload { content, .. } => content,
        }
    }
}

/// Decrypts one stored file and unpacks the original from the returned
/// archive.
///
/// Chunks are concatenated in arrival order and the stream is consumed to
/// the end before unpacking begins; a failure mid-stream aborts the whole
/// operation, a partial payload is never unpacked.
pub async fn recover(backend: &dyn DecrypterBackend, filename: &str) -> Result<RecoveredFile> {
    if filename.is_empty() {
        return Err(DrxError::EmptyField("filename"));
    }

    let mut chunks = backend.decrypt_file(filename).await?;
    let mut payload: Vec<u8> = Vec::new();
    while let Some(chunk) = chunks.try_next().await? {
        payload.extend_from_slice(&chunk);
    }
    tracing::debug!(filename = %filename, bytes = payload.len(), "decrypted payload assembled");

    unpack(payload, filename).await
}

/// Unpacks the first entry of a zip payload.
///
/// Only the first entry is ever surfaced, even when more exist. A payload
/// that does not parse as an archive downgrades to the raw-bytes fallback;
/// an archive with zero entries is terminal with no fallback.
async fn unpack(payload: Vec<u8>, source_name: &str) -> Result<RecoveredFile> {
    match read_first_entry(&payload).await {
        Ok((file_name, content)) => Ok(RecoveredFile::Original { file_name, content }),
        Err(reason @ DrxError::CorruptedArchive(_)) => {
            tracing::warn!(filename = %source_name, %reason, "keeping payload as raw bytes");
            Ok(RecoveredFile::RawPayload {
                file_name: format!("corrupted_{source_name}"),
                content: payload,
                reason,
            })
        }
        Err(other) => Err(other),
    }
}

async fn read_first_entry(payload: &[u8]) -> Result<(String, Vec<u8>)> {
    let mut zip = ZipFileReader::with_tokio(BufReader::new(Cursor::new(payload)))
        .await
        .map_err(|e| DrxError::CorruptedArchive(e.to_string()))?;

    let entries = zip.file().entries();
    if entries.is_empty() {
        return Err(DrxError::EmptyArchive);
    }
    if entries.len() > 1 {
        tracing::debug!(
            entries = entries.len(),
            "multi-entry archive, surfacing the first only"
        );
    }
    let file_name = entries[0]
        .filename()
        .as_str()
        .map_err(|e| DrxError::CorruptedArchive(e.to_string()))?
        .to_owned();

    let mut reader = zip
        .reader_with_entry(0)
        .await
        .map_err(|e| DrxError::CorruptedArchive(e.to_string()))?;
    let mut content = Vec::new();
    reader
        .read_to_end_checked(&mut content)
        .await
        .map_err(|e| DrxError::CorruptedArchive(e.to_string()))?;

    Ok((file_name, content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockDecrypter;
    use async_zip::tokio::write::ZipFileWriter;
    use async_zip::{Compression, ZipEntryBuilder};
    use bytes::Bytes;

    async fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipFileWriter::with_tokio(Cursor::new(Vec::new()));
        for (name, content) in entries {
            let entry = ZipEntryBuilder::new((*name).into(), Compression::Deflate);
            writer.write_entry_whole(entry, content).await.unwrap();
        }
        writer.close().await.unwrap().into_inner().into_inner()
    }

    #[tokio::test]
    async fn round_trips_single_entry_archive() {
        let payload = zip_of(&[("report.pdf", b"hello world".as_slice())]).await;
        let mock = MockDecrypter::new();
        // Deliver in small chunks to exercise concatenation order.
        let chunks: Vec<Bytes> = payload.chunks(5).map(Bytes::copy_from_slice).collect();
        mock.seed_payload("report.zip", chunks);

        let recovered = recover(&mock, "report.zip").await.unwrap();
        match recovered {
            RecoveredFile::Original { file_name, content } => {
                assert_eq!(file_name, "report.pdf");
                assert_eq!(content, b"hello world");
            }
            other => panic!("expected original file, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn multi_entry_archive_surfaces_first_only() {
        let payload = zip_of(&[
            ("first.txt", b"first body".as_slice()),
            ("second.txt", b"second body".as_slice()),
        ])
        .await;
        let mock = MockDecrypter::new();
        mock.seed_payload("bundle.zip", vec![Bytes::from(payload)]);

        let recovered = recover(&mock, "bundle.zip").await.unwrap();
        match recovered {
            RecoveredFile::Original { file_name, content } => {
                assert_eq!(file_name, "first.txt");
                assert_eq!(content, b"first body");
            }
            other => panic!("expected original file, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_archive_is_terminal() {
        let payload = zip_of(&[]).await;
        let mock = MockDecrypter::new();
        mock.seed_payload("empty.zip", vec![Bytes::from(payload)]);

        let err = recover(&mock, "empty.zip").await.unwrap_err();
        assert!(matches!(err, DrxError::EmptyArchive));
    }

    #[tokio::test]
    async fn unparseable_payload_falls_back_to_raw_bytes() {
        let mock = MockDecrypter::new();
        mock.seed_payload(
            "report.zip",
            vec![Bytes::from_static(b"not a zip archive")],
        );

        let recovered = recover(&mock, "report.zip").await.unwrap();
        match recovered {
            RecoveredFile::RawPayload {
                file_name,
                content,
                reason,
            } => {
                assert_eq!(file_name, "corrupted_report.zip");
                assert_eq!(content, b"not a zip archive");
                assert!(matches!(reason, DrxError::CorruptedArchive(_)));
            }
            other => panic!("expected raw payload fallback, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_filename_issues_no_call() {
        let mock = MockDecrypter::new();
        let err = recover(&mock, "").await.unwrap_err();
        assert!(matches!(err, DrxError::EmptyField("filename")));
        assert_eq!(mock.decrypt_calls(), 0);
    }

    #[tokio::test]
    async fn stream_failure_aborts_without_fallback() {
        let mock = MockDecrypter::new();
        mock.seed_broken_payload(
            "report.zip",
            vec![Bytes::from_static(b"partial")],
            "link dropped",
        );
        let err = recover(&mock, "report.zip").await.unwrap_err();
        assert!(matches!(err, DrxError::Decryption(detail) if detail == "link dropped"));
    }

    #[tokio::test]
    async fn decrypt_call_failure_propagates() {
        let mock = MockDecrypter::new();
        mock.fail_next_decrypt("service unavailable");
        let err = recover(&mock, "report.zip").await.unwrap_err();
        assert!(matches!(err, DrxError::Decryption(detail) if detail == "service unavailable"));
    }
}
