use serde::{Deserialize, Serialize};

/// Bucket and object key of one uploaded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
}

impl UploadTarget {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Build a target from an S3 notification, whose object keys arrive
    /// form-encoded.
    pub fn from_notification(bucket: impl Into<String>, raw_key: &str) -> Self {
        Self::new(bucket, decode_object_key(raw_key))
    }
}

/// Decode an object key as delivered in S3 event notifications.
///
/// `+` stands for a space and other reserved characters are percent-encoded.
/// Keys that do not decode to valid UTF-8 are returned with only the `+`
/// substitution applied.
pub fn decode_object_key(raw_key: &str) -> String {
    let spaced = raw_key.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Result of the rotation-and-match loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionReport {
    pub detected: bool,
    /// Detection calls made, including rejected ones
    pub attempts: u32,
    /// Clockwise rotation in degrees of the orientation that matched
    pub matched_rotation: Option<u16>,
}

/// What one invocation hands back to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum InvocationOutcome {
    Success {
        bucket: String,
        key: String,
        detected: bool,
    },
    Failure {
        key: String,
        reason: String,
    },
}

impl InvocationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success { .. })
    }

    /// Detection result, if the invocation succeeded
    pub fn detected(&self) -> Option<bool> {
        match self {
            InvocationOutcome::Success { detected, .. } => Some(*detected),
            InvocationOutcome::Failure { .. } => None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            InvocationOutcome::Success { key, .. } | InvocationOutcome::Failure { key, .. } => key,
        }
    }
}
