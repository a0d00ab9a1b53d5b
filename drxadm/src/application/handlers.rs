use std::path::Path;

use drx_core::{AdminSession, FileRecord, RecoveredFile};

use crate::error::Result;
use crate::readline::read_flag;

const PURGE_PROMPT: &str =
    "This will delete ALL encrypted files from ALL companies. Proceed (y/n)? ";

pub async fn handle_ls(session: &AdminSession) -> Result<()> {
    let records = session.list_files().await?;
    print_listing(&records);
    Ok(())
}

pub async fn handle_refresh(session: &AdminSession) -> Result<()> {
    let records = session.refresh_files().await?;
    print_listing(&records);
    Ok(())
}

fn print_listing(records: &[FileRecord]) {
    if records.is_empty() {
        println!("No active files in the system.");
        return;
    }
    let width = records
        .iter()
        .map(|r| r.common_name.len())
        .max()
        .unwrap_or(0);
    for record in records {
        println!("{:<width$}  {}", record.common_name, record.file_name);
    }
}

pub async fn handle_get(session: &AdminSession, filename: &str, out: &Path) -> Result<()> {
    let recovered = session.recover_file(filename).await?;
    if let RecoveredFile::RawPayload { reason, .. } = &recovered {
        println!("{reason}; keeping the decrypted payload as is");
    }
    let path = out.join(safe_output_name(recovered.file_name()));
    std::fs::write(&path, recovered.content())?;
    println!("Saved {}", path.display());
    Ok(())
}

pub async fn handle_rm(session: &AdminSession, common_name: &str, filename: &str) -> Result<()> {
    session.remove_file(common_name, filename).await?;
    println!("Deleted {} for {}", filename, common_name);
    Ok(())
}

// Interactive y/n gate for the bulk delete.
pub fn confirm_purge() -> Result<bool> {
    read_flag(PURGE_PROMPT)
}

/// Deletes every file once the gate passes: `yes` records the affirmation up
/// front, otherwise `confirm` is consulted and a refusal aborts before any
/// backend call.
pub async fn handle_purge<F>(session: &AdminSession, yes: bool, confirm: F) -> Result<()>
where
    F: FnOnce() -> Result<bool>,
{
    if !yes && !confirm()? {
        println!("Aborted.");
        return Ok(());
    }
    session.remove_all_files().await?;
    println!("All files have been deleted.");
    Ok(())
}

// The recovered name comes from the archive entry; keep only its final
// component so it cannot point outside the output directory.
fn safe_output_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "recovered.bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drx_core::mock::MockDecrypter;
    use std::sync::Arc;

    fn seeded_session() -> (Arc<MockDecrypter>, AdminSession) {
        let mock = Arc::new(MockDecrypter::new());
        mock.seed_company("acme", &["a.zip"]);
        let session = AdminSession::new(mock.clone());
        (mock, session)
    }

    #[tokio::test]
    async fn declined_purge_issues_no_backend_call() {
        let (mock, session) = seeded_session();
        handle_purge(&session, false, || Ok(false)).await.unwrap();
        assert_eq!(mock.remove_all_calls(), 0);
        assert_eq!(mock.file_count(), 1);
    }

    #[tokio::test]
    async fn yes_flag_purges_without_prompting() {
        let (mock, session) = seeded_session();
        handle_purge(&session, true, || panic!("prompt must not run"))
            .await
            .unwrap();
        assert_eq!(mock.remove_all_calls(), 1);
        assert_eq!(mock.file_count(), 0);
    }

    #[tokio::test]
    async fn confirmed_purge_deletes_everything() {
        let (mock, session) = seeded_session();
        handle_purge(&session, false, || Ok(true)).await.unwrap();
        assert_eq!(mock.remove_all_calls(), 1);
        assert_eq!(mock.file_count(), 0);
    }

    #[test]
    fn output_name_keeps_plain_names() {
        assert_eq!(safe_output_name("report.pdf"), "report.pdf");
        assert_eq!(
            safe_output_name("corrupted_report.zip"),
            "corrupted_report.zip"
        );
    }

    #[test]
    fn output_name_strips_path_components() {
        assert_eq!(safe_output_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_output_name("dir/inner.txt"), "inner.txt");
    }

    #[test]
    fn output_name_falls_back_for_degenerate_input() {
        assert_eq!(safe_output_name(""), "recovered.bin");
        assert_eq!(safe_output_name(".."), "recovered.bin");
        assert_eq!(safe_output_name("/"), "recovered.bin");
    }
}
