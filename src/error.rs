use thiserror::Error;

#[derive(Error, Debug)]
pub enum LbmsError {
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid page capacity: {0} (must be positive)")]
	InvalidCapacity(usize),

	#[error("Vocabulary is empty, at least one page is required")]
	EmptyVocabulary,

	#[error("Invalid message: {0}")]
	InvalidMessage(String),

	#[error("Word not in any dictionary: {0}")]
	OutOfVocabulary(String),

	#[error("Page {page} holds {len} words but pages hold at most {capacity}")]
	PageOverflow { page: usize, len: usize, capacity: usize },

	#[error("Vocabulary needs {needed} pages but only {available} are addressable")]
	AddressSpaceExhausted { needed: usize, available: usize },

	#[error("Invalid word reference: {0}")]
	InvalidReference(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),
}

pub type Result<T> = std::result::Result<T, LbmsError>;
