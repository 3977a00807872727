pub mod batch;
pub mod io;
pub mod tagging;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use batch::{BatchFailure, BatchReport, BatchRequest, run_batch};
pub use io::{IoError, read_source, scan_sources, write_output};
pub use tagging::{
    ParsedDocument, TagError,
    events::{TagEvent, TagFlags, TagKind},
    parse_document, parse_lines,
    render::{Markers, TagStyle},
    tag_text,
    tree::{NodeId, TextTree, TreeError, TreeNode},
};
