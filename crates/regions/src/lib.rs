//! Tagged-region tokenizer and region registry for slide editor text.
//!
//! Editor text marks metadata-carrying spans with `<Name: id="Id">` and
//! `</Name>` markers. The tokenizer flattens text into literal runs and tag
//! tokens; the registry holds the regions a consumer pairs up from them.

pub mod registry;
pub mod tokenizer;

pub use registry::{RegionMetadata, RegionRegistry, TaggedRegion};
pub use tokenizer::{tokenize, tokenize_areas, Area, CloseTag, OpenTag, Token};
