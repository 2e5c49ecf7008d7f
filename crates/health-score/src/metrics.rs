//! Metric extractors: raw numeric series and scalar aggregates pulled out of
//! annual statement records. Every extractor degrades to
//! [`MetricValue::Undefined`] instead of erroring, so one bad fiscal year
//! never sinks a whole evaluation.

use scoring_core::{AnnualRecord, MetricValue};

/// Minimum valid years before any FCF-derived score is meaningful.
const MIN_FCF_YEARS: usize = 3;

/// Per-year values of one field, in series order. Years where the field is
/// missing or non-numeric are dropped, not interpolated.
pub fn field_series(records: &[AnnualRecord], field: &str) -> Vec<f64> {
    records.iter().filter_map(|r| r.field(field)).collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation; needs at least 2 values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.sqrt())
}

/// Ordinary least-squares slope of a series against its year index
/// (0, 1, 2, ...). Undefined with fewer than 2 points.
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;
    let mut num = 0.0;
    let mut den = 0.0;
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }
    Some(num / den)
}

/// OLS trend slope of a metric series.
pub fn trend(values: &[f64]) -> MetricValue {
    ols_slope(values).into()
}

/// Average per-year ratio within one statement series. The numerator counts
/// as 0 when absent (additive context); a year with a missing or zero
/// denominator is skipped outright. All years skipped means no information.
pub fn ratio(records: &[AnnualRecord], numer_field: &str, denom_field: &str) -> MetricValue {
    ratio_of(records, |r| r.field_or_zero(numer_field), denom_field)
}

/// Same as [`ratio`] with a computed numerator (e.g. cash plus short-term
/// investments for the quick ratio).
pub fn ratio_of(
    records: &[AnnualRecord],
    numer: impl Fn(&AnnualRecord) -> f64,
    denom_field: &str,
) -> MetricValue {
    let values: Vec<f64> = records
        .iter()
        .filter_map(|r| match r.field(denom_field) {
            Some(denom) if denom != 0.0 => Some(numer(r) / denom),
            _ => None,
        })
        .collect();
    mean(&values).into()
}

/// Per-year ratio across two statement series, zipped by position.
pub fn paired_ratio(
    numer_records: &[AnnualRecord],
    numer_field: &str,
    denom_records: &[AnnualRecord],
    denom_field: &str,
) -> MetricValue {
    mean(&paired_ratio_series(
        numer_records,
        numer_field,
        denom_records,
        denom_field,
    ))
    .into()
}

/// The underlying per-year series behind [`paired_ratio`], used directly by
/// the consistency metrics that look at dispersion rather than the mean.
pub fn paired_ratio_series(
    numer_records: &[AnnualRecord],
    numer_field: &str,
    denom_records: &[AnnualRecord],
    denom_field: &str,
) -> Vec<f64> {
    numer_records
        .iter()
        .zip(denom_records.iter())
        .filter_map(|(n, d)| match d.field(denom_field) {
            Some(denom) if denom != 0.0 => Some(n.field_or_zero(numer_field) / denom),
            _ => None,
        })
        .collect()
}

/// Average year-over-year relative change of one field. Steps off a zero
/// base year are omitted; fewer than 2 usable values (or no usable steps)
/// is undefined.
pub fn growth(records: &[AnnualRecord], field: &str) -> MetricValue {
    let values = field_series(records, field);
    if values.len() < 2 {
        return MetricValue::Undefined;
    }
    let steps: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0].abs())
        .collect();
    mean(&steps).into()
}

/// Net debt over EBITDA, zipped across balance and income series.
/// `net debt = totalLiabilities - cash`, `EBITDA = ebit + depreciation`.
pub fn net_debt_to_ebitda(balance: &[AnnualRecord], income: &[AnnualRecord]) -> MetricValue {
    let values: Vec<f64> = balance
        .iter()
        .zip(income.iter())
        .filter_map(|(b, i)| {
            let ebitda = i.field_or_zero("ebit") + i.field_or_zero("depreciation");
            if ebitda == 0.0 {
                return None;
            }
            let net_debt = b.field_or_zero("totalLiabilities")
                - b.field_or_zero("cashAndCashEquivalentsAtCarryingValue");
            Some(net_debt / ebitda)
        })
        .collect();
    mean(&values).into()
}

/// Accrual ratio `(netIncome - operatingCashflow) / totalAssets`, zipped
/// across all three statement series. Lower is better.
pub fn accrual_ratio(
    income: &[AnnualRecord],
    cashflow: &[AnnualRecord],
    balance: &[AnnualRecord],
) -> MetricValue {
    let values: Vec<f64> = income
        .iter()
        .zip(cashflow.iter())
        .zip(balance.iter())
        .filter_map(|((i, c), b)| match b.field("totalAssets") {
            Some(assets) if assets != 0.0 => {
                let accruals =
                    i.field_or_zero("netIncome") - c.field_or_zero("operatingCashflow");
                Some(accruals / assets)
            }
            _ => None,
        })
        .collect();
    mean(&values).into()
}

/// Average after-tax return on invested capital, zipped across income and
/// balance series. `NOPAT = operatingIncome * 0.7`, invested capital is
/// equity plus total liabilities.
pub fn roic_mean(income: &[AnnualRecord], balance: &[AnnualRecord]) -> MetricValue {
    let values: Vec<f64> = income
        .iter()
        .zip(balance.iter())
        .filter_map(|(i, b)| {
            let invested = b.field_or_zero("totalShareholderEquity")
                + b.field_or_zero("totalLiabilities");
            if invested > 0.0 {
                Some(i.field_or_zero("operatingIncome") * 0.7 / invested)
            } else {
                None
            }
        })
        .collect();
    mean(&values).into()
}

/// Free-cash-flow block: level flag, trend slope, and revenue margin, all
/// derived from one pass over the cash-flow series (revenue paired
/// positionally from the income series).
#[derive(Debug, Clone, Copy)]
pub struct FcfMetrics {
    /// 100 when FCF is positive and non-decreasing every year, otherwise 50.
    pub level_score: f64,
    /// Raw OLS slope of the FCF series (dollars per year).
    pub slope: MetricValue,
    /// Average FCF / revenue, as a fraction.
    pub margin: MetricValue,
}

impl FcfMetrics {
    fn undefined() -> Self {
        Self {
            level_score: scoring_core::NEUTRAL_SCORE,
            slope: MetricValue::Undefined,
            margin: MetricValue::Undefined,
        }
    }
}

pub fn fcf_metrics(cashflow: &[AnnualRecord], income: &[AnnualRecord]) -> FcfMetrics {
    let mut fcf = Vec::with_capacity(cashflow.len());
    let mut margins = Vec::new();
    for (i, record) in cashflow.iter().enumerate() {
        let Some(ocf) = record.field("operatingCashflow") else {
            continue;
        };
        let value = ocf - record.field_or_zero("capitalExpenditures");
        fcf.push(value);
        if let Some(revenue) = income.get(i).and_then(|r| r.field("totalRevenue")) {
            if revenue != 0.0 {
                margins.push(value / revenue);
            }
        }
    }

    if fcf.len() < MIN_FCF_YEARS {
        return FcfMetrics::undefined();
    }

    let increasing = fcf.windows(2).all(|w| w[0] <= w[1]) && fcf.iter().all(|&v| v > 0.0);
    FcfMetrics {
        level_score: if increasing { 100.0 } else { 50.0 },
        slope: ols_slope(&fcf).into(),
        margin: mean(&margins).into(),
    }
}
