//! Data models for stored papers and tool payloads.
//!
//! Records validate on construction; stored JSON is read leniently
//! (author strings or objects, ISO dates or datetimes).

mod author;
mod collection;
mod enums;
mod inputs;
mod paper;
mod responses;

pub use author::Author;
pub use collection::{CollectionMetadata, TopicCollection};
pub use enums::ExportFormat;
pub use inputs::*;
pub use paper::PaperRecord;
pub(crate) use paper::parse_iso_date;
pub use responses::{
    DatabaseStats, ErrorResponse, PaperSummary, SearchResult, TitleMatch, TopicListing,
    TopicStats,
};
