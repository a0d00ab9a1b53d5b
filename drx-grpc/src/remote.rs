// drx_grpc/src/remote.rs
use crate::client::DecrypterClient;
use crate::config::DecrypterConfig;
use crate::pb;

use async_trait::async_trait;
use drx_core::{ChunkStream, DecrypterBackend, DrxError, FileRecord, flatten_listing};
use futures::TryStreamExt;
use tonic::transport::Channel;

/// `DecrypterBackend` over a tonic channel to the real service.
///
/// The channel multiplexes one HTTP/2 connection and is cheap to clone, so
/// each call clones the client instead of locking it.
pub struct GrpcDecrypter {
    client: DecrypterClient<Channel>,
}

impl GrpcDecrypter {
    /// Connects eagerly so a bad endpoint surfaces before any command runs.
    pub async fn connect(config: &DecrypterConfig) -> drx_core::Result<Self> {
        let url = config.endpoint_url();
        tracing::debug!(endpoint = %url, "connecting to decrypter service");
        let client = DecrypterClient::connect(url)
            .await
            .map_err(|e| DrxError::Connect(e.to_string()))?;
        Ok(Self { client })
    }
}

fn flatten_response(response: pb::ListActiveFilesResponse) -> Vec<FileRecord> {
    let companies = response
        .company_files
        .into_iter()
        .map(|company| drx_core::CompanyFiles {
            common_name: company.common_name,
            filenames: company.filenames,
        })
        .collect();
    flatten_listing(companies)
}

#[async_trait]
impl DecrypterBackend for GrpcDecrypter {
    async fn list_files(&self) -> drx_core::Result<Vec<FileRecord>> {
        let mut client = self.client.clone();
        let response = client
            .list_active_files(pb::Empty {})
            .await
            .map_err(|status| DrxError::Retrieval(status.message().to_string()))?;
        Ok(flatten_response(response.into_inner()))
    }

    async fn decrypt_file(&self, filename: &str) -> drx_core::Result<ChunkStream> {
        let mut client = self.client.clone();
        tracing::debug!(filename = %filename, "requesting decryption");
        let request = pb::DecryptFileRequest {
            filename: filename.to_string(),
        };
        let response = client
            .decrypt_file(request)
            .await
            .map_err(|status| DrxError::Decryption(status.message().to_string()))?;
        let chunks = response
            .into_inner()
            .map_ok(|chunk| chunk.file_content)
            .map_err(|status| DrxError::Decryption(status.message().to_string()));
        Ok(Box::pin(chunks))
    }

    async fn remove_file(&self, common_name: &str, filename: &str) -> drx_core::Result<()> {
        let mut client = self.client.clone();
        let request = pb::RemoveEncryptedFileRequest {
            common_name: common_name.to_string(),
            filename: filename.to_string(),
        };
        client
            .remove_encrypted_file(request)
            .await
            .map_err(|status| DrxError::Deletion(status.message().to_string()))?;
        Ok(())
    }

    async fn remove_all_files(&self) -> drx_core::Result<()> {
        let mut client = self.client.clone();
        client
            .remove_encrypted_files(pb::Empty {})
            .await
            .map_err(|status| DrxError::Deletion(status.message().to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_response_flattens_in_wire_order() {
        let response = pb::ListActiveFilesResponse {
            company_files: vec![
                pb::CompanyFiles {
                    common_name: "acme".into(),
                    filenames: vec!["a.zip".into(), "b.zip".into()],
                },
                pb::CompanyFiles {
                    common_name: "globex".into(),
                    filenames: vec!["c.zip".into()],
                },
            ],
        };
        let rows = flatten_response(response);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].common_name, "acme");
        assert_eq!(rows[0].file_name, "a.zip");
        assert_eq!(rows[1].file_name, "b.zip");
        assert_eq!(rows[2].common_name, "globex");
    }

    #[test]
    fn empty_listing_flattens_to_no_rows() {
        let response = pb::ListActiveFilesResponse {
            company_files: vec![],
        };
        assert!(flatten_response(response).is_empty());
    }
}
