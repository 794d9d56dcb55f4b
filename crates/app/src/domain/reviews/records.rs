//! Review Records

use crate::uuids::TypedUuid;

/// Review Document Record
#[derive(Debug)]
pub struct ReviewDocumentRecord;

/// Opaque identifier of a review document.
pub type ReviewDocumentUuid = TypedUuid<ReviewDocumentRecord>;
