//! Mock implementation of the backend trait for tests.

use crate::backend::{ChunkStream, DecrypterBackend};
use crate::catalog::{CompanyFiles, FileRecord, flatten_listing};
use crate::error::{DrxError, Result};

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct MockState {
    companies: Vec<CompanyFiles>,
    payloads: HashMap<String, Vec<Result<Bytes>>>,
    fail_list: Option<String>,
    fail_decrypt: Option<String>,
    fail_remove: Option<String>,
    list_delay: Option<Duration>,
    list_calls: usize,
    decrypt_calls: usize,
    remove_calls: usize,
    remove_all_calls: usize,
}

/// In-memory stand-in for the remote decrypter service.
///
/// Per-operation call counters and one-shot failure switches let tests
/// assert how many remote calls an operation issued and how failures
/// propagate. An optional listing delay holds the fetch open so tests can
/// overlap concurrent readers.
#[derive(Default)]
pub struct MockDecrypter {
    state: Mutex<MockState>,
}

impl MockDecrypter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_company(&self, common_name: &str, filenames: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.companies.push(CompanyFiles {
            common_name: common_name.to_string(),
            filenames: filenames.iter().map(|f| f.to_string()).collect(),
        });
    }

    pub fn seed_payload(&self, filename: &str, chunks: Vec<Bytes>) {
        let mut state = self.state.lock().unwrap();
        state
            .payloads
            .insert(filename.to_string(), chunks.into_iter().map(Ok).collect());
    }

    /// Seeds a payload whose stream fails after yielding `chunks`.
    pub fn seed_broken_payload(&self, filename: &str, chunks: Vec<Bytes>, detail: &str) {
        let mut state = self.state.lock().unwrap();
        let mut outcomes: Vec<Result<Bytes>> = chunks.into_iter().map(Ok).collect();
        outcomes.push(Err(DrxError::Decryption(detail.to_string())));
        state.payloads.insert(filename.to_string(), outcomes);
    }

    pub fn fail_next_list(&self, detail: &str) {
        self.state.lock().unwrap().fail_list = Some(detail.to_string());
    }

    pub fn fail_next_decrypt(&self, detail: &str) {
        self.state.lock().unwrap().fail_decrypt = Some(detail.to_string());
    }

    /// Fails the next remove operation, single or bulk.
    pub fn fail_next_remove(&self, detail: &str) {
        self.state.lock().unwrap().fail_remove = Some(detail.to_string());
    }

    pub fn set_list_delay(&self, delay: Duration) {
        self.state.lock().unwrap().list_delay = Some(delay);
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn decrypt_calls(&self) -> usize {
        self.state.lock().unwrap().decrypt_calls
    }

    pub fn remove_calls(&self) -> usize {
        self.state.lock().unwrap().remove_calls
    }

    pub fn remove_all_calls(&self) -> usize {
        self.state.lock().unwrap().remove_all_calls
    }

    pub fn file_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.companies.iter().map(|c| c.filenames.len()).sum()
    }
}

#[async_trait]
impl DecrypterBackend for MockDecrypter {
    async fn list_files(&self) -> Result<Vec<FileRecord>> {
        let delay = {
            let mut state = self.state.lock().unwrap();
            state.list_calls += 1;
            if let Some(detail) = state.fail_list.take() {
                return Err(DrxError::Retrieval(detail));
            }
            state.list_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.state.lock().unwrap();
        Ok(flatten_listing(state.companies.clone()))
    }

    async fn decrypt_file(&self, filename: &str) -> Result<ChunkStream> {
        let outcomes = {
            let mut state = self.state.lock().unwrap();
            state.decrypt_calls += 1;
            if let Some(detail) = state.fail_decrypt.take() {
                return Err(DrxError::Decryption(detail));
            }
            state
                .payloads
                .get(filename)
                .cloned()
                .ok_or_else(|| DrxError::Decryption(format!("no such file: {filename}")))?
        };
        Ok(futures::stream::iter(outcomes).boxed())
    }

    async fn remove_file(&self, common_name: &str, filename: &str) -> Result<()> {
        let mut guard = self.state.lock().unwrap();
        guard.remove_calls += 1;
        if let Some(detail) = guard.fail_remove.take() {
            return Err(DrxError::Deletion(detail));
        }
        let state = &mut *guard;
        match state
            .companies
            .iter_mut()
            .find(|c| c.common_name == common_name)
        {
            Some(company) => {
                let before = company.filenames.len();
                company.filenames.retain(|f| f != filename);
                if company.filenames.len() == before {
                    return Err(DrxError::Deletion(format!(
                        "no such file: {common_name}/{filename}"
                    )));
                }
                state.payloads.remove(filename);
                Ok(())
            }
            None => Err(DrxError::Deletion(format!(
                "no such company: {common_name}"
            ))),
        }
    }

    async fn remove_all_files(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.remove_all_calls += 1;
        if let Some(detail) = state.fail_remove.take() {
            return Err(DrxError::Deletion(detail));
        }
        state.companies.clear();
        state.payloads.clear();
        Ok(())
    }
}
