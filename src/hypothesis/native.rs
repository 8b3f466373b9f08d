// Built-in distribution test library
//
// All arithmetic that feeds a decision runs in f64. Benchmark values such as
// nanosecond durations are large relative to their spread and do not survive
// a round trip through f32.
//
// References:
// - Mann & Whitney (1947), tie-corrected normal approximation
// - Hodges (1957), exact two-sample KS distribution by lattice path counting
// - Stephens (1970), effective-size correction for the KS statistic
// - Welch (1947), Satterthwaite (1946), unequal-variance t-test
// - Royston (1992, 1995), Shapiro-Wilk W approximation (algorithm AS R94)

use super::backend::{DistributionTests, TailConvention, TestOutcome};
use super::distributions::{
    kolmogorov_sf, normal_ppf, normal_sf, polyval, students_t_two_tailed_p,
};
use super::error::{Result, StatsError};

/// Largest sample the Shapiro-Wilk approximation is calibrated for
pub const SHAPIRO_MAX_SAMPLE_SIZE: usize = 5000;

/// Smallest sample Shapiro-Wilk can be computed on
pub const SHAPIRO_MIN_SAMPLE_SIZE: usize = 3;

/// KS p-values are exact while n1·n2 stays below this; asymptotic above
pub const KS_EXACT_MAX_PRODUCT: usize = 10_000;

/// Pure-Rust statistical primitives shipped with the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeTests;

impl DistributionTests for NativeTests {
    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn rank_sum_convention(&self) -> TailConvention {
        TailConvention::TwoSided
    }

    fn mann_whitney_u(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<TestOutcome> {
        require_values("Mann-Whitney U", sample_1, 1)?;
        require_values("Mann-Whitney U", sample_2, 1)?;

        let n1 = sample_1.len() as f64;
        let n2 = sample_2.len() as f64;
        let (ranks, tie_term) = rank_with_ties(sample_1.iter().chain(sample_2).copied());

        let rank_sum_1: f64 = ranks[..sample_1.len()].iter().sum();
        let u1 = rank_sum_1 - n1 * (n1 + 1.0) / 2.0;
        let u2 = n1 * n2 - u1;

        let n = n1 + n2;
        let mean_u = n1 * n2 / 2.0;
        let variance = n1 * n2 / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));

        // Every observation tied: no evidence of any shift
        if variance <= 0.0 {
            return Ok(TestOutcome {
                statistic: u1,
                p_value: 1.0,
            });
        }

        let z = (u1.max(u2) - mean_u - 0.5) / variance.sqrt();
        let p_value = (2.0 * normal_sf(z)).clamp(0.0, 1.0);

        tracing::trace!(u1, z, p_value, "mann-whitney");
        Ok(TestOutcome {
            statistic: u1,
            p_value,
        })
    }

    fn ks_2samp(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<TestOutcome> {
        require_values("Kolmogorov-Smirnov", sample_1, 1)?;
        require_values("Kolmogorov-Smirnov", sample_2, 1)?;

        let a = sorted(sample_1);
        let b = sorted(sample_2);
        let (n1, n2) = (a.len(), b.len());

        // D scaled by n1·n2, so the exact distribution works on integers
        let (mut i, mut j) = (0, 0);
        let mut gap: u64 = 0;
        while i < n1 && j < n2 {
            let v = a[i].min(b[j]);
            while i < n1 && a[i] <= v {
                i += 1;
            }
            while j < n2 && b[j] <= v {
                j += 1;
            }
            gap = gap.max(lattice_offset(i, j, n1, n2));
        }

        let d = gap as f64 / (n1 as f64 * n2 as f64);
        let p_value = if n1 * n2 < KS_EXACT_MAX_PRODUCT {
            ks_exact_p_value(n1, n2, gap)
        } else {
            let en = (n1 as f64 * n2 as f64 / (n1 + n2) as f64).sqrt();
            kolmogorov_sf((en + 0.12 + 0.11 / en) * d)
        };

        tracing::trace!(d, p_value, n1, n2, "kolmogorov-smirnov");
        Ok(TestOutcome {
            statistic: d,
            p_value,
        })
    }

    fn welch_ttest(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<TestOutcome> {
        require_values("Welch's t-test", sample_1, 2)?;
        require_values("Welch's t-test", sample_2, 2)?;

        let (mean_1, var_1) = mean_and_variance(sample_1);
        let (mean_2, var_2) = mean_and_variance(sample_2);

        // t is undefined with zero pooled variance; decide on the means alone
        if var_1 == 0.0 && var_2 == 0.0 {
            let equal = mean_1 == mean_2;
            return Ok(TestOutcome {
                statistic: if equal { 0.0 } else { f64::INFINITY },
                p_value: if equal { 1.0 } else { 0.0 },
            });
        }

        let se2_1 = var_1 / sample_1.len() as f64;
        let se2_2 = var_2 / sample_2.len() as f64;
        let se2 = se2_1 + se2_2;
        let t = (mean_1 - mean_2) / se2.sqrt();

        // Welch–Satterthwaite degrees of freedom
        let df = se2 * se2
            / (se2_1 * se2_1 / (sample_1.len() - 1) as f64
                + se2_2 * se2_2 / (sample_2.len() - 1) as f64);

        let p_value = students_t_two_tailed_p(t, df);
        tracing::trace!(t, df, p_value, "welch");
        Ok(TestOutcome {
            statistic: t,
            p_value,
        })
    }

    fn shapiro_wilk(&self, sample: &[f64]) -> Result<TestOutcome> {
        require_values("Shapiro-Wilk", sample, SHAPIRO_MIN_SAMPLE_SIZE)?;
        if sample.len() > SHAPIRO_MAX_SAMPLE_SIZE {
            return Err(StatsError::InvalidSample {
                test: "Shapiro-Wilk",
                reason: format!(
                    "sample size {} exceeds the supported maximum of {}",
                    sample.len(),
                    SHAPIRO_MAX_SAMPLE_SIZE
                ),
            });
        }

        let x = sorted(sample);
        let n = x.len();
        if x[n - 1] - x[0] <= 0.0 {
            // Zero range: W is 1 by convention
            return Ok(TestOutcome {
                statistic: 1.0,
                p_value: 1.0,
            });
        }

        let a = shapiro_coefficients(n);
        let mean = x.iter().sum::<f64>() / n as f64;
        let ssq: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
        // Coefficients sum to zero; centering avoids cancellation at large magnitudes
        let numerator: f64 = a.iter().zip(&x).map(|(ai, xi)| ai * (xi - mean)).sum();
        let w = (numerator * numerator / ssq).min(1.0);

        let p_value = shapiro_p_value(w, n);
        tracing::trace!(w, p_value, n, "shapiro-wilk");
        Ok(TestOutcome {
            statistic: w,
            p_value,
        })
    }
}

fn require_values(test: &'static str, sample: &[f64], min: usize) -> Result<()> {
    if sample.len() < min {
        return Err(StatsError::InvalidSample {
            test,
            reason: format!("need at least {} observations, got {}", min, sample.len()),
        });
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(StatsError::InvalidSample {
            test,
            reason: "sample contains non-finite values".to_string(),
        });
    }
    Ok(())
}

fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut values = sample.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

/// Sample mean and unbiased (n - 1) variance
fn mean_and_variance(sample: &[f64]) -> (f64, f64) {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let ssq: f64 = sample.iter().map(|v| (v - mean).powi(2)).sum();
    (mean, ssq / (n - 1.0))
}

/// |i·n2 - j·n1|: distance of lattice point (i, j) from the diagonal, scaled by n1·n2
fn lattice_offset(i: usize, j: usize, n1: usize, n2: usize) -> u64 {
    (i as i64 * n2 as i64 - j as i64 * n1 as i64).unsigned_abs()
}

/// Exact two-sided P(D ≥ d) for the two-sample KS statistic
///
/// Under the null every interleaving of the two samples is equally likely,
/// i.e. every monotone lattice path from (0, 0) to (n1, n2). The p-value is
/// one minus the share of paths that stay strictly closer to the diagonal
/// than `gap` (d scaled by n1·n2).
fn ks_exact_p_value(n1: usize, n2: usize, gap: u64) -> f64 {
    if gap == 0 {
        return 1.0;
    }

    // paths[j] holds the number of inside paths reaching (i, j) for the current row
    let mut paths = vec![0.0f64; n2 + 1];
    paths[0] = 1.0;
    for i in 0..=n1 {
        for j in 0..=n2 {
            if i == 0 && j == 0 {
                continue;
            }
            let from_left = if j > 0 { paths[j - 1] } else { 0.0 };
            paths[j] = if lattice_offset(i, j, n1, n2) < gap {
                paths[j] + from_left
            } else {
                0.0
            };
        }
    }

    let k = n1.min(n2);
    let total = (1..=k).fold(1.0f64, |acc, r| acc * (n1 + n2 - k + r) as f64 / r as f64);
    (1.0 - paths[n2] / total).clamp(0.0, 1.0)
}

/// Average ranks (1-based) in input order, plus the tie term Σ(t³ - t)
fn rank_with_ties(values: impl Iterator<Item = f64>) -> (Vec<f64>, f64) {
    let mut indexed: Vec<(usize, f64)> = values.enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; indexed.len()];
    let mut tie_term = 0.0;
    let mut start = 0;
    while start < indexed.len() {
        let mut end = start + 1;
        while end < indexed.len() && indexed[end].1 == indexed[start].1 {
            end += 1;
        }
        // Positions start..end share ranks start+1..=end
        let average = (start + 1 + end) as f64 / 2.0;
        for &(original, _) in &indexed[start..end] {
            ranks[original] = average;
        }
        let t = (end - start) as f64;
        tie_term += t * t * t - t;
        start = end;
    }

    (ranks, tie_term)
}

/// Royston's approximation of the Shapiro-Wilk coefficients for sorted data
#[allow(clippy::excessive_precision)]
fn shapiro_coefficients(n: usize) -> Vec<f64> {
    const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
    const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];

    let mut a = vec![0.0; n];
    if n == 3 {
        a[0] = -std::f64::consts::FRAC_1_SQRT_2;
        a[2] = std::f64::consts::FRAC_1_SQRT_2;
        return a;
    }

    let an = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| normal_ppf((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2: f64 = m.iter().map(|v| v * v).sum();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let a_n = m[n - 1] / ssumm2 + polyval(&C1, rsn);
    a[n - 1] = a_n;
    a[0] = -a_n;

    let (outer, fac) = if n > 5 {
        let a_n1 = m[n - 2] / ssumm2 + polyval(&C2, rsn);
        a[n - 2] = a_n1;
        a[1] = -a_n1;
        let fac = ((summ2 - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * a_n.powi(2) - 2.0 * a_n1.powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * a_n.powi(2))).sqrt();
        (1, fac)
    };

    for i in outer..n - outer {
        a[i] = m[i] / fac;
    }
    a
}

/// Royston's normalizing transformation of W into an upper-tail p-value
#[allow(clippy::excessive_precision)]
fn shapiro_p_value(w: f64, n: usize) -> f64 {
    if w >= 1.0 {
        return 1.0;
    }

    let an = n as f64;
    if n == 3 {
        let p = 6.0 / std::f64::consts::PI * (w.sqrt().asin() - (0.75f64).sqrt().asin());
        return p.clamp(0.0, 1.0);
    }

    let y = (1.0 - w).ln();
    let (z, m, s) = if n <= 11 {
        let gamma = polyval(&[-2.273, 0.459], an);
        if y >= gamma {
            return 0.0;
        }
        let y = -(gamma - y).ln();
        let m = polyval(&[0.5440, -0.39978, 0.025054, -6.714e-4], an);
        let s = polyval(&[1.3822, -0.77857, 0.062767, -0.0020322], an).exp();
        (y, m, s)
    } else {
        let xx = an.ln();
        let m = polyval(&[-1.5861, -0.31082, -0.083751, 0.0038915], xx);
        let s = polyval(&[-0.4803, -0.082676, 0.0030302], xx).exp();
        (y, m, s)
    };

    normal_sf((z - m) / s).clamp(0.0, 1.0)
}
