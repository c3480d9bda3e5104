//! Image uploads for listings and homepage sections.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use super::{Access, ApiClient};
use crate::errors::ApiError;

#[derive(Deserialize, Debug)]
struct UploadResponse {
    success: bool,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    files: Vec<UploadedFile>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UploadedFile {
    url: String,
}

impl UploadResponse {
    fn into_urls(self) -> Result<Vec<String>, ApiError> {
        if !self.success {
            return Err(ApiError::Status {
                status: StatusCode::OK,
                message: self.message.unwrap_or_else(|| "Upload failed".to_string()),
            });
        }
        let mut urls: Vec<String> = self.url.into_iter().collect();
        urls.extend(self.files.into_iter().map(|f| f.url));
        Ok(urls)
    }
}

impl ApiClient {
    /// Upload one file; returns its public URL.
    pub async fn upload(&self, path: &Path) -> Result<String, ApiError> {
        let form = Form::new().part("file", file_part(path).await?);
        let request = self
            .request(Method::POST, "/api/upload", Access::Protected)
            .multipart(form);
        let response: UploadResponse = self.send_json(request).await?;
        response
            .into_urls()?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::Decode("upload response has no url".to_string()))
    }

    /// Upload a batch in one request; URLs come back in upload order.
    pub async fn upload_many(&self, paths: &[&Path]) -> Result<Vec<String>, ApiError> {
        if paths.is_empty() {
            return Ok(Vec::new());
        }
        let mut form = Form::new();
        for path in paths {
            form = form.part("files", file_part(path).await?);
        }
        let request = self
            .request(Method::POST, "/api/upload/multiple", Access::Protected)
            .multipart(form);
        let response: UploadResponse = self.send_json(request).await?;
        response.into_urls()
    }

    /// Signing parameters for uploading straight to the image host.
    pub async fn upload_auth(&self) -> Result<Value, ApiError> {
        let request = self.request(Method::GET, "/api/upload/auth", Access::Protected);
        self.send_json(request).await
    }
}

async fn file_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime_for(path))?)
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}
