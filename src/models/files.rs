use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileAttributes {
    #[serde(rename = "content-type", default)]
    pub content_type: Option<String>,
    #[serde(rename = "sha-256", default)]
    pub sha256: Option<String>,
}

/// A file stored on the server, as returned by an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedFile {
    pub file_id: String,
    #[serde(default)]
    pub attributes: Option<FileAttributes>,
    #[serde(default)]
    pub permissions: Vec<String>,
    /// RFC 3339 timestamp after which the server deletes the file.
    #[serde(default)]
    pub expiration: Option<String>,
}
