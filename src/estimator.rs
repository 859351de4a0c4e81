//! Monte Carlo comparison of the word-reference scheme against raw text.
//!
//! Messages are drawn uniformly, with replacement, from the vocabulary. That models
//! vocabulary coverage only; it makes no claim about the word frequencies of real messages,
//! where short common words dominate and the raw baseline would be cheaper than estimated here.
//!
//! Iterations are split into fixed-size batches. Each batch draws from its own ChaCha8 stream
//! keyed by `(seed, max_length, batch)` and fills a private accumulator; batches are merged in
//! order afterwards. Reports are therefore identical for a given seed whatever the thread count.

use crate::config::EstimatorConfig;
use crate::encoder::{DictionaryEncoder, RawEncoder, SizeEstimator};
use crate::error::LbmsError;
use crate::vocabulary::Vocabulary;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

const BATCH_SIZE: usize = 4096;

/// Count, extremes and mean of one encoder's sizes over a bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeStats {
    pub count: u64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinReport {
    pub max_length: usize,
    pub dictionary: SizeStats,
    pub raw: SizeStats,
    /// `mean(dictionary) / mean(raw) * 100`
    pub ratio: f64,
}

/// Running totals for one encoder. Partial accumulators merge by summing counts and totals.
#[derive(Debug, Clone, Copy)]
pub struct Accumulator {
    count: u64,
    min: f64,
    max: f64,
    sum: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self { count: 0, min: f64::INFINITY, max: f64::NEG_INFINITY, sum: 0.0 }
    }

    pub fn push(&mut self, size: f64) {
        self.count += 1;
        self.min = self.min.min(size);
        self.max = self.max.max(size);
        self.sum += size;
    }

    pub fn merge(&mut self, other: &Accumulator) {
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn finish(&self) -> SizeStats {
        if self.count == 0 {
            return SizeStats { count: 0, min: 0.0, max: 0.0, mean: 0.0 };
        }
        SizeStats {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: self.sum / self.count as f64,
        }
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CompressionEstimator<'v> {
    vocabulary: &'v Vocabulary,
    config: EstimatorConfig,
    dictionary: Box<dyn SizeEstimator>,
    baseline: Box<dyn SizeEstimator>,
    pool: rayon::ThreadPool,
}

impl<'v> CompressionEstimator<'v> {
    /// Estimator using the reference width and delimiter policy from `config`.
    pub fn new(vocabulary: &'v Vocabulary, config: EstimatorConfig) -> Result<Self, LbmsError> {
        let dictionary = Box::new(DictionaryEncoder::new(config.width));
        let baseline = Box::new(RawEncoder::new(config.delimiters));
        Self::with_encoders(vocabulary, config, dictionary, baseline)
    }

    /// Estimator comparing two arbitrary schemes; `dictionary` is the numerator of the ratio.
    pub fn with_encoders(
        vocabulary: &'v Vocabulary,
        config: EstimatorConfig,
        dictionary: Box<dyn SizeEstimator>,
        baseline: Box<dyn SizeEstimator>,
    ) -> Result<Self, LbmsError> {
        config.validate()?;
        if vocabulary.is_empty() {
            return Err(LbmsError::EmptyVocabulary);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()
            .map_err(|e| LbmsError::ConfigError(format!("thread pool: {}", e)))?;

        Ok(Self { vocabulary, config, dictionary, baseline, pool })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Draw exactly `max_length` words, uniformly and with replacement.
    pub fn sample_message<R: Rng>(&self, rng: &mut R, max_length: usize) -> Vec<&'v str> {
        let words = self.vocabulary.words();
        (0..max_length)
            .map(|_| words[rng.gen_range(0..words.len())].as_str())
            .collect()
    }

    /// Simulate `iterations` messages of `max_length` words.
    pub fn run_bin(&self, max_length: usize) -> Result<BinReport, LbmsError> {
        let pb = self.progress_bar(self.config.iterations as u64);
        let report = self.simulate_bin(max_length, &pb);
        pb.finish_and_clear();
        report
    }

    /// One report per bin, in the given order.
    pub fn run(&self, bins: &[usize]) -> Result<Vec<BinReport>, LbmsError> {
        if let Some(bad) = bins.iter().find(|&&bin| bin == 0) {
            return Err(LbmsError::ConfigError(format!(
                "message length bins must be positive, got {}",
                bad
            )));
        }
        info!(
            "Estimating {} bins x {} iterations over {} words",
            bins.len(),
            self.config.iterations,
            self.vocabulary.len()
        );

        let pb = self.progress_bar((self.config.iterations * bins.len()) as u64);
        let reports = bins
            .iter()
            .map(|&max_length| self.simulate_bin(max_length, &pb))
            .collect::<Result<Vec<_>, LbmsError>>();
        pb.finish_and_clear();
        reports
    }

    /// Run the bins from the configuration.
    pub fn run_configured(&self) -> Result<Vec<BinReport>, LbmsError> {
        self.run(&self.config.message_length_bins)
    }

    fn simulate_bin(&self, max_length: usize, pb: &ProgressBar) -> Result<BinReport, LbmsError> {
        if max_length == 0 {
            return Err(LbmsError::ConfigError("message length bin must be positive".to_string()));
        }
        let iterations = self.config.iterations;
        let batches = iterations.div_ceil(BATCH_SIZE);

        let partials = self.pool.install(|| {
            (0..batches)
                .into_par_iter()
                .map(|batch| {
                    let start = batch * BATCH_SIZE;
                    let len = BATCH_SIZE.min(iterations - start);
                    let partial = self.simulate_batch(max_length, batch, len);
                    pb.inc(len as u64);
                    partial
                })
                .collect::<Result<Vec<_>, LbmsError>>()
        })?;

        let mut dictionary = Accumulator::new();
        let mut raw = Accumulator::new();
        for (dict_part, raw_part) in &partials {
            dictionary.merge(dict_part);
            raw.merge(raw_part);
        }

        let dictionary = dictionary.finish();
        let raw = raw.finish();
        let ratio = if raw.mean > 0.0 { dictionary.mean / raw.mean * 100.0 } else { 0.0 };
        debug!(
            "Bin {}: {} {:.2} vs {} {:.2} ({:.2}%)",
            max_length,
            self.dictionary.name(),
            dictionary.mean,
            self.baseline.name(),
            raw.mean,
            ratio
        );

        Ok(BinReport { max_length, dictionary, raw, ratio })
    }

    fn simulate_batch(
        &self,
        max_length: usize,
        batch: usize,
        len: usize,
    ) -> Result<(Accumulator, Accumulator), LbmsError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        rng.set_stream(((max_length as u64) << 32) ^ batch as u64);

        let mut dictionary = Accumulator::new();
        let mut raw = Accumulator::new();
        for _ in 0..len {
            let message = self.sample_message(&mut rng, max_length);
            dictionary.push(self.dictionary.encode(&message)?);
            raw.push(self.baseline.encode(&message)?);
        }
        Ok((dictionary, raw))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} messages ({eta})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
