use uuid::Uuid;

/// Allowed content types for report media
pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/heic",
    "video/mp4",
    "video/quicktime",
    "video/webm",
];

/// Check if a media content type is allowed
pub fn is_media_type_allowed(content_type: &str) -> bool {
    ALLOWED_MEDIA_TYPES.contains(&content_type)
}

/// A photo or video attached to a report.
///
/// Owned by exactly one draft or report; replacing or dropping the owner
/// releases the bytes.
#[derive(Debug)]
pub struct MediaAttachment {
    id: Uuid,
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

impl MediaAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}
