use uuid::Uuid;

use crate::reader::FileRef;

/// Request to verify one submitted file.
#[derive(Debug, Clone)]
pub struct VerifyAssignment {
    /// Id given to the stored assignment.
    pub id: Uuid,
    pub file: FileRef,
    /// Declared MIME type.
    pub media_type: String,
    /// `false` stores the submission without comparing it.
    pub verify: bool,
}

impl VerifyAssignment {
    pub fn new(file: FileRef, media_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            file,
            media_type: media_type.into(),
            verify: true,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn without_detection(mut self) -> Self {
        self.verify = false;
        self
    }
}
