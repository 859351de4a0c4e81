//! # LBMS dictionary tools
//!
//! Word-reference dictionaries for a low-bit-rate (LoRa) messaging link. Instead of sending a
//! word's characters, a sender transmits a fixed-width reference: a page number and an index
//! within that page. This crate
//!
//! - splits a frequency-ordered vocabulary into numbered, fixed-capacity pages and stores them,
//! - resolves words to references and packs them into hex payloads (and back),
//! - estimates, by simulation, how large dictionary-encoded messages are compared with raw text.
//!
//! Page capacity and reference width are never configured separately. Both come from one
//! [`AddressWidth`], the split of the reference bit budget into page-selector and index bits.
//!
//! ## Quick Start
//!
//! ```rust
//! use lbms_dict::{paginate_for_width, AddressWidth, Shelf, Vocabulary, WordRef};
//!
//! let width = AddressWidth::new(2, 2).unwrap(); // 4 pages of 4 words
//! let vocabulary = Vocabulary::from_words(["the", "of", "and", "a", "to"]);
//!
//! let pages = paginate_for_width(&vocabulary, &width).unwrap();
//! assert_eq!(pages.len(), 2);
//!
//! let shelf = Shelf::from_pages(pages, width).unwrap();
//! assert_eq!(shelf.resolve("to").unwrap(), WordRef::new(1, 0));
//! ```
//!
//! ### Estimating compression
//!
//! ```rust
//! use lbms_dict::{CompressionEstimator, EstimatorConfig, Vocabulary};
//!
//! let vocabulary = Vocabulary::from_words(["help", "water", "bridge", "injured"]);
//! let config = EstimatorConfig::default().with_iterations(1_000).with_seed(1);
//! let estimator = CompressionEstimator::new(&vocabulary, config).unwrap();
//!
//! let report = estimator.run_bin(5).unwrap();
//! println!("dictionary encoding is {:.1}% of raw", report.ratio);
//! ```

pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod estimator;
pub mod pager;
pub mod reference;
pub mod report;
pub mod shelf;
pub mod storage;
pub mod vocabulary;

// Re-export commonly used types for convenience
pub use config::{AddressWidth, DelimiterPolicy, EstimatorConfig};
pub use encoder::{DictionaryEncoder, RawEncoder, SizeEstimator};
pub use error::{LbmsError, Result};
pub use estimator::{BinReport, CompressionEstimator, SizeStats};
pub use pager::{paginate, paginate_for_width, Page};
pub use reference::WordRef;
pub use report::{JsonReport, ReportSink, TableReport};
pub use shelf::Shelf;
pub use storage::{load_pages, JsonDirSink, MemorySink, PageSink};
pub use vocabulary::Vocabulary;

/// Page a vocabulary with the capacity implied by `width` and hand every page to `sink`.
///
/// Nothing is stored unless pagination succeeds as a whole.
pub fn assemble<S: PageSink>(
    vocabulary: &Vocabulary,
    width: &AddressWidth,
    sink: &mut S,
) -> Result<Vec<Page>> {
    let pages = paginate_for_width(vocabulary, width)?;
    sink.store_all(&pages)?;
    log::info!("Assembled {} words into {} pages", vocabulary.len(), pages.len());
    Ok(pages)
}

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
