use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of a share identifier in characters.
pub const SHARE_ID_LENGTH: usize = 8;

/// One shared file: the identifier handed to the uploader, the original
/// file name, and the remote blob URL the bytes live at.
///
/// Records are created once per successful upload and never mutated or
/// deleted; they vanish with the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShareRecord {
    pub id: String,
    pub file_name: String,
    pub file_url: String,
}

/// Draw a fresh share identifier: 8 characters sampled independently and
/// uniformly from `[A-Za-z0-9]`.
///
/// Not cryptographically secured and not checked for collisions against
/// existing registry keys; at 62^8 possible values the collision
/// probability is treated as negligible.
pub fn generate_share_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SHARE_ID_LENGTH)
        .map(char::from)
        .collect()
}
