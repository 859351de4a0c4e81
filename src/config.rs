use crate::error::LbmsError;
use std::fmt;
use std::str::FromStr;

/// Largest reference that still packs into a `u32`.
pub const MAX_REFERENCE_BITS: u32 = 32;

/// Message length bins used when none are configured (words per message).
pub const DEFAULT_MESSAGE_LENGTH_BINS: [usize; 9] = [2, 3, 4, 5, 10, 20, 50, 100, 200];

/// Split of the word reference bit budget into a page selector and a within-page index.
///
/// This is the one place page capacity and reference width come from. The pager sizes pages
/// with [`AddressWidth::page_capacity`] and the encoder charges
/// [`AddressWidth::reference_byte_width`] per word, so the two always describe the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWidth {
    page_selector_bits: u32,
    index_bits: u32,
}

impl AddressWidth {
    pub fn new(page_selector_bits: u32, index_bits: u32) -> Result<Self, LbmsError> {
        let in_range = page_selector_bits
            .checked_add(index_bits)
            .is_some_and(|total| (1..=MAX_REFERENCE_BITS).contains(&total));
        if !in_range {
            return Err(LbmsError::ConfigError(format!(
                "reference width must be 1..={} bits, got {}:{}",
                MAX_REFERENCE_BITS, page_selector_bits, index_bits
            )));
        }
        if index_bits >= usize::BITS {
            return Err(LbmsError::ConfigError(format!(
                "index width of {} bits does not fit a page size on this platform",
                index_bits
            )));
        }
        Ok(Self { page_selector_bits, index_bits })
    }

    pub fn page_selector_bits(&self) -> u32 {
        self.page_selector_bits
    }

    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Total width of one reference on the wire.
    pub fn reference_bits(&self) -> u32 {
        self.page_selector_bits + self.index_bits
    }

    /// Fractional bytes per reference (20 bits -> 2.5).
    pub fn reference_byte_width(&self) -> f64 {
        self.reference_bits() as f64 / 8.0
    }

    /// Words per page, `2^index_bits`.
    pub fn page_capacity(&self) -> usize {
        1usize << self.index_bits
    }

    /// Number of pages the selector can address, `2^page_selector_bits`.
    pub fn max_pages(&self) -> u64 {
        1u64 << self.page_selector_bits
    }

    pub fn max_vocabulary(&self) -> u64 {
        1u64 << self.reference_bits()
    }

    /// Hex digits used for one packed reference.
    pub fn hex_digits(&self) -> usize {
        self.reference_bits().div_ceil(4) as usize
    }
}

impl Default for AddressWidth {
    /// 4 selector bits and 16 index bits: 16 pages of 65536 words, 2.5 bytes per reference.
    fn default() -> Self {
        Self { page_selector_bits: 4, index_bits: 16 }
    }
}

impl fmt::Display for AddressWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page_selector_bits, self.index_bits)
    }
}

/// Parses `"<page_selector_bits>:<index_bits>"`, e.g. `"4:16"`.
impl FromStr for AddressWidth {
    type Err = LbmsError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (selector, index) = s
            .split_once(':')
            .ok_or_else(|| LbmsError::ConfigError(format!("Invalid address width: {}", s)))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| LbmsError::ConfigError(format!("Invalid address width: {}", s)))
        };
        AddressWidth::new(parse(selector)?, parse(index)?)
    }
}

/// How the raw baseline treats the gaps between words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterPolicy {
    /// Only word characters are charged.
    #[default]
    Ignore,
    /// One extra character (two hex digits) per gap between words.
    Count,
}

#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    pub width: AddressWidth,
    pub iterations: usize,
    pub message_length_bins: Vec<usize>,
    pub seed: u64,
    pub threads: usize,
    pub delimiters: DelimiterPolicy,
    pub show_progress: bool,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            width: AddressWidth::default(),
            iterations: 100_000,
            message_length_bins: DEFAULT_MESSAGE_LENGTH_BINS.to_vec(),
            seed: 0x4c42_4d53,
            threads: num_cpus::get(),
            delimiters: DelimiterPolicy::Ignore,
            show_progress: false,
        }
    }
}

impl EstimatorConfig {
    pub fn with_width(mut self, width: AddressWidth) -> Self {
        self.width = width;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_bins(mut self, bins: Vec<usize>) -> Self {
        self.message_length_bins = bins;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_delimiters(mut self, delimiters: DelimiterPolicy) -> Self {
        self.delimiters = delimiters;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn validate(&self) -> Result<(), LbmsError> {
        if self.iterations == 0 {
            return Err(LbmsError::ConfigError("iterations must be positive".to_string()));
        }
        if self.threads == 0 {
            return Err(LbmsError::ConfigError("threads must be positive".to_string()));
        }
        if let Some(bad) = self.message_length_bins.iter().find(|&&bin| bin == 0) {
            return Err(LbmsError::ConfigError(format!(
                "message length bins must be positive, got {}",
                bad
            )));
        }
        Ok(())
    }
}
