//! Message types for the `decrypter.Decrypter` service.
//!
//! Kept in sync with `proto/decrypter.proto` by hand.

use bytes::Bytes;

/// Local mirror of `google.protobuf.Empty`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CompanyFiles {
    #[prost(string, tag = "1")]
    pub common_name: String,
    #[prost(string, repeated, tag = "2")]
    pub filenames: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ListActiveFilesResponse {
    #[prost(message, repeated, tag = "1")]
    pub company_files: Vec<CompanyFiles>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DecryptFileRequest {
    #[prost(string, tag = "1")]
    pub filename: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DecryptFileResponse {
    #[prost(bytes = "bytes", tag = "1")]
    pub file_content: Bytes,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveEncryptedFileRequest {
    #[prost(string, tag = "1")]
    pub common_name: String,
    #[prost(string, tag = "2")]
    pub filename: String,
}
