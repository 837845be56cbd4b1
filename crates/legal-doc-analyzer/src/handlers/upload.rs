use crate::document::DocumentParser;
use crate::utils::error::ApiError;
use axum::extract::Multipart;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Debug)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Extract the document text from the uploaded bytes.
    pub fn into_text(self) -> Result<String, ApiError> {
        let parsed = DocumentParser::parse_upload(
            self.file_name.as_deref(),
            self.content_type.as_deref(),
            &self.data,
        )?;

        info!(
            "Extracted {} chars from {} ({:?} pages)",
            parsed.metadata.char_count,
            self.file_name.as_deref().unwrap_or("upload"),
            parsed.metadata.pages
        );

        Ok(parsed.content)
    }
}

/// A parsed multipart form: the `file` part plus any text fields.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))?
        {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    let file_name = field.file_name().map(|s| s.to_string());
                    let content_type = field.content_type().map(|s| s.to_string());
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?
                        .to_vec();

                    debug!(
                        "Received file {:?} ({:?}, {} bytes)",
                        file_name,
                        content_type,
                        data.len()
                    );

                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        data,
                    });
                }
                "" => {}
                _ => {
                    let text = field.text().await.map_err(|e| {
                        ApiError::BadRequest(format!("Invalid field {}: {}", field_name, e))
                    })?;
                    form.fields.insert(field_name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn require_file(&mut self) -> Result<UploadedFile, ApiError> {
        self.file
            .take()
            .ok_or_else(|| ApiError::BadRequest("file required".to_string()))
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }
}
