use serde::{Deserialize, Serialize};

/// A clinician who owns patient records. Identified by a caller-supplied
/// business id (`specialist_id`), unique across all specialists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareSpecialist {
    pub specialist_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialization: String,
}
