use serde::Deserialize;

use crate::error::RequestError;
use crate::{ApiClient, Form, Part};

const UPLOAD_PHOTO_ENDPOINT: &str = "/upload-photo";

/// Acknowledgement of a profile photo upload.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PhotoUpload {
    /// Name the server stored the photo under.
    pub filename: String,
    /// Readable confirmation.
    pub message: String,
}

impl ApiClient {
    /// Upload a profile photo for the signed-in user.
    ///
    /// Requires a session.
    ///
    /// # Example
    /// ```rust,ignore
    /// let image = std::fs::read("./me.jpg")?;
    ///
    /// let upload = api.upload_photo("me.jpg", image, "image/jpeg").await?;
    /// println!("{}", upload.message);
    /// ```
    pub async fn upload_photo(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<PhotoUpload, RequestError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|error| RequestError::InvalidInput(format!("invalid mime type `{mime}`: {error}")))?;

        let form = Form::new().part("file", part);
        let request = self.request_post_form(UPLOAD_PHOTO_ENDPOINT, form);

        self.execute_json(UPLOAD_PHOTO_ENDPOINT, request).await
    }
}
