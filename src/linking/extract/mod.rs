//! Extraction of Asana task references from free-form text.
//!
//! Matching is split in two: [`TaskLinkExtractor`] finds links that follow
//! the trigger phrase, and [`LinkShapeTable`] resolves each link URL to a
//! task gid. Resolution is a pure function over an ordered table so that new
//! URL layouts do not touch the matcher or the reconciliation services.

mod extractor;
mod shapes;

pub use extractor::{ExtractorError, MalformedReference, TaskLinkExtractor};
pub use shapes::{LinkShape, LinkShapeTable, TaskLink};
