use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::{validate_params, HaltReason, NoopObserver, Odometer, PeptideGenerator, ScanOutcome};
use crate::error::Result;
use crate::scan::{Candidate, SearchStats};

impl PeptideGenerator<'_> {
    /// 并行扫描：按首位残基把搜索空间切成有序分区，每轮并行处理与线程数相同的分区，
    /// 再按分区顺序合并并截断到上限。结果与顺序扫描完全一致。
    ///
    /// `evaluated` 包含同一轮中超出上限后其它分区做的多余工作。
    pub fn generate_parallel(&self, k: usize, max_results: usize) -> Result<(Vec<Candidate>, SearchStats)> {
        validate_params(k, max_results)?;
        let start = Instant::now();
        let radix = self.catalog.len();
        let wave = rayon::current_num_threads().max(1);
        debug!(k, max_results, partitions = radix, wave, "starting parallel peptide scan");

        let mut candidates: Vec<Candidate> = Vec::new();
        let mut evaluated = 0u64;
        let mut halt = HaltReason::Exhausted;

        let mut first = 0usize;
        while first < radix {
            let end = (first + wave).min(radix);
            let remaining = max_results - candidates.len();
            let parts: Vec<ScanOutcome> = (first..end)
                .into_par_iter()
                .map(|head| self.scan(Odometer::with_prefix(k, radix, &[head]), remaining, &mut NoopObserver))
                .collect();

            for part in parts {
                evaluated += part.evaluated;
                candidates.extend(part.candidates);
            }
            if candidates.len() >= max_results {
                candidates.truncate(max_results);
                halt = HaltReason::CapReached;
                break;
            }
            first = end;
        }

        let outcome = ScanOutcome { candidates, evaluated, halt };
        let stats = self.finish_stats(k, max_results, start, &outcome);
        Ok((outcome.candidates, stats))
    }
}
