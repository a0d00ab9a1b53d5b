//! Client for the `decrypter.Decrypter` service.
//!
//! Written in the shape `tonic-build` generates for this service; see
//! `proto/decrypter.proto` for the wire contract.

use crate::pb;
use tonic::codegen::*;

/// Thin wrapper over a gRPC channel speaking the `decrypter.Decrypter`
/// protocol.
#[derive(Debug, Clone)]
pub struct DecrypterClient<T> {
    inner: tonic::client::Grpc<T>,
}

impl DecrypterClient<tonic::transport::Channel> {
    /// Attempt to create a new client by connecting to a given endpoint.
    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
        D: TryInto<tonic::transport::Endpoint>,
        D::Error: Into<StdError>,
    {
        let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
        Ok(Self::new(conn))
    }
}

impl<T> DecrypterClient<T>
where
    T: tonic::client::GrpcService<tonic::body::Body>,
    T::Error: Into<StdError>,
    T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
    <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
{
    pub fn new(inner: T) -> Self {
        let inner = tonic::client::Grpc::new(inner);
        Self { inner }
    }

    pub async fn list_active_files(
        &mut self,
        request: impl tonic::IntoRequest<pb::Empty>,
    ) -> std::result::Result<tonic::Response<pb::ListActiveFilesResponse>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {}", e.into())))?;
        let codec = tonic_prost::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static("/decrypter.Decrypter/ListActiveFiles");
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new("decrypter.Decrypter", "ListActiveFiles"));
        self.inner.unary(req, path, codec).await
    }

    pub async fn decrypt_file(
        &mut self,
        request: impl tonic::IntoRequest<pb::DecryptFileRequest>,
    ) -> std::result::Result<
        tonic::Response<tonic::codec::Streaming<pb::DecryptFileResponse>>,
        tonic::Status,
    > {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {}", e.into())))?;
        let codec = tonic_prost::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static("/decrypter.Decrypter/DecryptFile");
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new("decrypter.Decrypter", "DecryptFile"));
        self.inner.server_streaming(req, path, codec).await
    }

    pub async fn remove_encrypted_file(
        &mut self,
        request: impl tonic::IntoRequest<pb::RemoveEncryptedFileRequest>,
    ) -> std::result::Result<tonic::Response<pb::Empty>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {}", e.into())))?;
        let codec = tonic_prost::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static("/decrypter.Decrypter/RemoveEncryptedFile");
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new("decrypter.Decrypter", "RemoveEncryptedFile"));
        self.inner.unary(req, path, codec).await
    }

    pub async fn remove_encrypted_files(
        &mut self,
        request: impl tonic::IntoRequest<pb::Empty>,
    ) -> std::result::Result<tonic::Response<pb::Empty>, tonic::Status> {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unknown(format!("Service was not ready: {}", e.into())))?;
        let codec = tonic_prost::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static("/decrypter.Decrypter/RemoveEncryptedFiles");
        let mut req = request.into_request();
        req.extensions_mut()
            .insert(GrpcMethod::new("decrypter.Decrypter", "RemoveEncryptedFiles"));
        self.inner.unary(req, path, codec).await
    }
}
