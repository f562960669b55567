pub mod metrics;
pub mod odometer;
pub mod parallel;
pub mod predicate;

pub use metrics::{Candidate, HaltReason, SearchStats};
pub use odometer::Odometer;
pub use predicate::{first_run_violation, Constraints, Rejection};

use std::time::Instant;

use tracing::{debug, trace};

use crate::catalog::{Catalog, Residue};
use crate::error::{Result, ScanError};

/// 观察者回调的返回值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanControl {
    Continue,
    Stop,
}

/// 扫描过程中的回调钩子，用于进度展示或外部取消。
/// 每评估完一个序列、生成下一个序列之前调用。
pub trait ScanObserver {
    fn on_candidate(&mut self, _candidate: &Candidate, _found: usize) -> ScanControl {
        ScanControl::Continue
    }

    fn on_evaluated(&mut self, _evaluated: u64) -> ScanControl {
        ScanControl::Continue
    }
}

/// 不做任何事的观察者
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}

/// 单个分区的扫描结果
#[derive(Debug)]
pub(crate) struct ScanOutcome {
    pub candidates: Vec<Candidate>,
    pub evaluated: u64,
    pub halt: HaltReason,
}

/// 按字典序生成定长肽序列并逐个过滤。
#[derive(Debug, Clone, Copy)]
pub struct PeptideGenerator<'c> {
    catalog: &'c Catalog,
    constraints: Constraints,
}

impl<'c> PeptideGenerator<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog, constraints: Constraints::default() }
    }

    pub fn with_constraints(catalog: &'c Catalog, constraints: Constraints) -> Result<Self> {
        constraints.validate()?;
        Ok(Self { catalog, constraints })
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// 对任意字符串求值；通过全部约束时返回候选
    pub fn evaluate(&self, sequence: &str) -> Result<Option<Candidate>> {
        if sequence.is_empty() {
            return Err(ScanError::invalid_parameter("sequence", "must not be empty"));
        }
        let seq = sequence
            .chars()
            .map(|c| self.catalog.get(c).copied())
            .collect::<Result<Vec<Residue>>>()?;
        Ok(self.constraints.check(&seq).ok().map(|_| Candidate::from_residues(&seq)))
    }

    pub fn generate(&self, k: usize, max_results: usize) -> Result<(Vec<Candidate>, SearchStats)> {
        self.generate_with_observer(k, max_results, &mut NoopObserver)
    }

    pub fn generate_with_observer<O>(
        &self,
        k: usize,
        max_results: usize,
        observer: &mut O,
    ) -> Result<(Vec<Candidate>, SearchStats)>
    where
        O: ScanObserver + ?Sized,
    {
        validate_params(k, max_results)?;
        let start = Instant::now();
        debug!(k, max_results, alphabet = self.catalog.len(), "starting peptide scan");

        let odo = Odometer::new(k, self.catalog.len());
        let outcome = self.scan(odo, max_results, observer);

        let stats = self.finish_stats(k, max_results, start, &outcome);
        Ok((outcome.candidates, stats))
    }

    /// 扫描一个（可能带固定前缀的）计数器直到结果满、枚举完或被取消。
    pub(crate) fn scan<O>(&self, mut odo: Odometer, max_results: usize, observer: &mut O) -> ScanOutcome
    where
        O: ScanObserver + ?Sized,
    {
        let mut candidates = Vec::new();
        let mut evaluated = 0u64;
        let mut buf: Vec<Residue> = Vec::new();

        let halt = loop {
            let Some(digits) = odo.current() else {
                break HaltReason::Exhausted;
            };
            evaluated += 1;

            // 连续重复在前缀上即可判定，整段前缀一并跳过
            let skip_from = first_run_violation(digits.iter(), self.constraints.max_run);
            if skip_from.is_none() {
                buf.clear();
                buf.extend(digits.iter().map(|&d| *self.catalog.residue_at(d)));
                if self.constraints.check_properties(&buf).is_ok() {
                    let cand = Candidate::from_residues(&buf);
                    trace!(sequence = %cand.sequence, mass = cand.mass, "accepted");
                    candidates.push(cand);
                    if candidates.len() >= max_results {
                        break HaltReason::CapReached;
                    }
                    if let Some(last) = candidates.last() {
                        if observer.on_candidate(last, candidates.len()) == ScanControl::Stop {
                            break HaltReason::Cancelled;
                        }
                    }
                }
            }

            if observer.on_evaluated(evaluated) == ScanControl::Stop {
                break HaltReason::Cancelled;
            }
            match skip_from {
                Some(pos) => odo.bump(pos),
                None => odo.step(),
            }
        };

        ScanOutcome { candidates, evaluated, halt }
    }

    pub(crate) fn finish_stats(
        &self,
        k: usize,
        max_results: usize,
        start: Instant,
        outcome: &ScanOutcome,
    ) -> SearchStats {
        let stats = SearchStats {
            k,
            max_results,
            elapsed: start.elapsed(),
            total_possible: metrics::total_possible_sequences(self.catalog.len(), k),
            valid_count: outcome.candidates.len(),
            evaluated: outcome.evaluated,
            halt: outcome.halt,
        };
        debug!(
            valid = stats.valid_count,
            evaluated = stats.evaluated,
            halt = ?stats.halt,
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "peptide scan finished"
        );
        stats
    }
}

fn validate_params(k: usize, max_results: usize) -> Result<()> {
    if k < 1 {
        return Err(ScanError::invalid_parameter("k", "peptide length must be at least 1"));
    }
    if max_results < 1 {
        return Err(ScanError::invalid_parameter("max_results", "result cap must be at least 1"));
    }
    Ok(())
}

/// 使用默认约束生成前 `max_results` 条候选
pub fn generate_peptides(
    catalog: &Catalog,
    k: usize,
    max_results: usize,
) -> Result<(Vec<Candidate>, SearchStats)> {
    PeptideGenerator::new(catalog).generate(k, max_results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Polarity;

    fn acd_catalog() -> Catalog {
        Catalog::new(vec![
            Residue::new('D', 133.0, -3.5, Polarity::Negative),
            Residue::new('A', 89.0, 1.8, Polarity::Nonpolar),
            Residue::new('C', 121.0, 2.5, Polarity::Polar),
        ])
        .unwrap()
    }

    /// 不做前缀剪枝的朴素扫描，用于对照
    fn naive_scan(cat: &Catalog, c: &Constraints, k: usize, max: usize) -> Vec<Candidate> {
        let mut out = Vec::new();
        let mut odo = Odometer::new(k, cat.len());
        while let Some(d) = odo.current() {
            let seq: Vec<Residue> = d.iter().map(|&i| *cat.residue_at(i)).collect();
            if c.is_valid(&seq) {
                out.push(Candidate::from_residues(&seq));
                if out.len() >= max {
                    break;
                }
            }
            odo.step();
        }
        out
    }

    #[test]
    fn acd_scenario_is_empty() {
        let cat = acd_catalog();
        let (cands, stats) = generate_peptides(&cat, 3, 10).unwrap();
        assert!(cands.is_empty());
        assert_eq!(stats.valid_count, 0);
        assert_eq!(stats.total_possible, Some(27));
        assert_eq!(stats.halt, HaltReason::Exhausted);
        assert_eq!(stats.validation_ratio(), 0.0);
    }

    #[test]
    fn acd_rejections() {
        let cat = acd_catalog();
        let gen = PeptideGenerator::new(&cat);
        assert_eq!(gen.evaluate("AAA").unwrap(), None);
        assert_eq!(gen.evaluate("DDD").unwrap(), None);
        assert_eq!(gen.evaluate("CAC").unwrap(), None);
    }

    #[test]
    fn reference_k7_scenario() {
        let cat = Catalog::reference();
        let (cands, stats) = generate_peptides(&cat, 7, 50).unwrap();
        assert_eq!(cands.len(), 50);
        assert_eq!(stats.halt, HaltReason::CapReached);
        assert_eq!(stats.total_possible, Some(1_280_000_000));
        assert_eq!(stats.validation_ratio(), 1.0);

        assert_eq!(cands[0].sequence, "AACACCD");
        assert_eq!(cands[0].mass, 763.0);
        assert_eq!(cands[0].hydrophobicity, 1.34);
        assert_eq!(cands[0].nonpolar_ratio, 0.43);
        assert_eq!(cands[1].sequence, "AACACCE");

        for c in &cands {
            assert!((500.0..=2000.0).contains(&c.mass), "{:?}", c);
            assert!(c.nonpolar_ratio <= 0.5, "{:?}", c);
            assert_eq!(c.sequence.len(), 7);
            assert!(first_run_violation(c.sequence.chars(), 2).is_none(), "{:?}", c);
            // 未取整的平均值须 > 1.0
            let exact = gen_exact_hydro(&cat, &c.sequence);
            assert!(exact > 1.0, "{:?}", c);
        }
        assert!(cands.windows(2).all(|w| w[0].sequence < w[1].sequence));
    }

    fn gen_exact_hydro(cat: &Catalog, s: &str) -> f64 {
        s.chars().map(|c| cat.get(c).unwrap().hydrophobicity).sum::<f64>() / s.len() as f64
    }

    #[test]
    fn pruned_scan_matches_naive_scan() {
        let cat = Catalog::reference();
        let c = Constraints::default();
        let (fast, _) = generate_peptides(&cat, 5, 200).unwrap();
        let slow = naive_scan(&cat, &c, 5, 200);
        assert_eq!(fast, slow);

        let small = acd_catalog();
        let loose = Constraints { mass_min: 0.0, min_hydrophobicity: -10.0, ..c };
        let gen = PeptideGenerator::with_constraints(&small, loose).unwrap();
        let (fast, stats) = gen.generate(4, 1000).unwrap();
        let slow = naive_scan(&small, &loose, 4, 1000);
        assert_eq!(fast, slow);
        assert_eq!(stats.halt, HaltReason::Exhausted);
        assert!(stats.evaluated < 81);
    }

    #[test]
    fn cap_is_respected() {
        let cat = Catalog::reference();
        for max in [1, 3, 17] {
            let (cands, stats) = generate_peptides(&cat, 6, max).unwrap();
            assert!(cands.len() <= max);
            assert_eq!(stats.valid_count, cands.len());
        }
    }

    #[test]
    fn exhausted_scan_returns_true_count() {
        let small = acd_catalog();
        let loose = Constraints {
            mass_min: 0.0,
            min_hydrophobicity: -10.0,
            max_nonpolar_ratio: 1.0,
            ..Constraints::default()
        };
        let gen = PeptideGenerator::with_constraints(&small, loose).unwrap();
        // 3^3 = 27 个序列中恰有 3 个（AAA/CCC/DDD）违反连续重复
        let (cands, stats) = gen.generate(3, 100).unwrap();
        assert_eq!(cands.len(), 24);
        assert_eq!(stats.halt, HaltReason::Exhausted);
        assert!((stats.validation_ratio() - 0.24).abs() < 1e-12);
    }

    #[test]
    fn short_sequences_skip_run_condition() {
        let cat = Catalog::new(vec![Residue::new('X', 300.0, 2.0, Polarity::Polar)]).unwrap();
        let (cands, _) = generate_peptides(&cat, 2, 5).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].sequence, "XX");
        assert_eq!(cands[0].mass, 600.0);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let cat = Catalog::reference();
        assert!(matches!(
            generate_peptides(&cat, 0, 10),
            Err(ScanError::InvalidParameter { name: "k", .. })
        ));
        assert!(matches!(
            generate_peptides(&cat, 7, 0),
            Err(ScanError::InvalidParameter { name: "max_results", .. })
        ));
        let bad = Constraints { mass_min: 3000.0, ..Constraints::default() };
        assert!(PeptideGenerator::with_constraints(&cat, bad).is_err());
    }

    #[test]
    fn evaluate_propagates_unknown_residue() {
        let cat = Catalog::reference();
        let gen = PeptideGenerator::new(&cat);
        assert!(matches!(gen.evaluate("AACXCCD"), Err(ScanError::UnknownResidue('X'))));
        assert!(gen.evaluate("").is_err());
        let cand = gen.evaluate("AACACCD").unwrap().unwrap();
        assert_eq!(cand.mass, 763.0);
    }

    struct StopAfter {
        limit: usize,
        seen: Vec<String>,
    }

    impl ScanObserver for StopAfter {
        fn on_candidate(&mut self, candidate: &Candidate, found: usize) -> ScanControl {
            self.seen.push(candidate.sequence.clone());
            if found >= self.limit {
                ScanControl::Stop
            } else {
                ScanControl::Continue
            }
        }
    }

    #[test]
    fn observer_can_cancel() {
        let cat = Catalog::reference();
        let gen = PeptideGenerator::new(&cat);
        let mut obs = StopAfter { limit: 3, seen: Vec::new() };
        let (cands, stats) = gen.generate_with_observer(7, 50, &mut obs).unwrap();
        assert_eq!(cands.len(), 3);
        assert_eq!(stats.halt, HaltReason::Cancelled);
        let seqs: Vec<String> = cands.iter().map(|c| c.sequence.clone()).collect();
        assert_eq!(obs.seen, seqs);
    }

    struct Budget(u64);

    impl ScanObserver for Budget {
        fn on_evaluated(&mut self, evaluated: u64) -> ScanControl {
            if evaluated >= self.0 {
                ScanControl::Stop
            } else {
                ScanControl::Continue
            }
        }
    }

    #[test]
    fn observer_budget_limits_evaluations() {
        let cat = Catalog::reference();
        let gen = PeptideGenerator::new(&cat);
        let (_, stats) = gen.generate_with_observer(7, 50, &mut Budget(10)).unwrap();
        assert_eq!(stats.evaluated, 10);
        assert_eq!(stats.halt, HaltReason::Cancelled);
    }
}
