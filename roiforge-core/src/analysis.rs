//! Financial building blocks shared by the projection engine, the
//! sensitivity sweep and the report.

use roiforge_schemas::results::{IrrEstimate, PaybackPeriod};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reported ROI never exceeds this value, whatever the raw ratio.
pub const ROI_CEILING_PCT: f64 = 1000.0;

/// Highest candidate rate (percent) tried by `irr_scan`.
pub const IRR_SCAN_MAX_RATE_PCT: u32 = 100;

/// Share of the unit margin credited to quality improvements.
pub const QUALITY_MARGIN_SHARE: f64 = 0.2;

/// `(1 + rate)^(year - 1)`: year one is expressed in today's money.
pub fn inflation_factor(inflation_rate_pct: f64, year: u32) -> f64 {
    (1.0 + inflation_rate_pct / 100.0).powi(year as i32 - 1)
}

/// Present value of `flow` received at the end of `year`.
pub fn discount(flow: f64, discount_rate_pct: f64, year: u32) -> f64 {
    flow / (1.0 + discount_rate_pct / 100.0).powi(year as i32)
}

/// NPV of `flows` (first element at the end of year one) net of `investment`.
pub fn npv_at(investment: f64, flows: &[f64], rate_pct: f64) -> f64 {
    flows
        .iter()
        .enumerate()
        .fold(-investment, |npv, (t, flow)| {
            npv + discount(*flow, rate_pct, t as u32 + 1)
        })
}

/// First point at which the running sum of `flows` reaches `investment`,
/// interpolated linearly inside the crossing year.
///
/// When the investment is never recovered the result is `horizon` years with
/// `reached == false`.
pub fn payback_period(investment: f64, flows: &[f64], horizon: u32) -> PaybackPeriod {
    let mut cumulative = 0.0;
    for (index, flow) in flows.iter().enumerate() {
        let before = cumulative;
        cumulative += flow;
        if cumulative >= investment {
            return PaybackPeriod {
                years: index as f64 + (investment - before) / flow,
                reached: true,
            };
        }
    }
    PaybackPeriod {
        years: horizon as f64,
        reached: false,
    }
}

/// Integer scan of candidate rates 1..=100 %. Returns the rate just before the
/// first one where NPV turns non-positive.
pub fn irr_scan(investment: f64, flows: &[f64]) -> IrrEstimate {
    for rate in 1..=IRR_SCAN_MAX_RATE_PCT {
        if npv_at(investment, flows, rate as f64) <= 0.0 {
            return IrrEstimate::Bounded {
                rate_pct: (rate - 1) as f64,
            };
        }
    }
    IrrEstimate::AboveScanRange
}

/// `total / investment` in percent, clamped to `ROI_CEILING_PCT`. NaN passes
/// through unclamped.
pub fn capped_roi(total_cash_flow: f64, investment: f64) -> f64 {
    let raw = (total_cash_flow / investment) * 100.0;
    if raw > ROI_CEILING_PCT {
        ROI_CEILING_PCT
    } else {
        raw
    }
}

/// `(new - old) / old` in percent. Follows float division when `old` is zero.
pub fn relative_change_pct(old: f64, new: f64) -> f64 {
    (new - old) / old * 100.0
}

/// Overall assessment printed at the end of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Excellent,
    Good,
    NeedsAdjustment,
}

impl Verdict {
    /// ROI above 100 % with payback under 3 years is excellent, ROI above
    /// 50 % with payback under 5 years is good. An investment that is never
    /// recovered always needs adjustment.
    pub fn assess(roi_pct: f64, payback: &PaybackPeriod) -> Self {
        if !payback.reached {
            return Verdict::NeedsAdjustment;
        }
        let payback_years = payback.years;
        if roi_pct > 100.0 && payback_years < 3.0 {
            Verdict::Excellent
        } else if roi_pct > 50.0 && payback_years < 5.0 {
            Verdict::Good
        } else {
            Verdict::NeedsAdjustment
        }
    }

    pub fn conclusion(&self) -> &'static str {
        match self {
            Verdict::Excellent => {
                "The project shows an excellent return: the investment is recovered quickly and the automation pays for itself several times over its useful life."
            }
            Verdict::Good => {
                "The project shows a good return. The investment is recovered within a reasonable period and remains profitable over the useful life."
            }
            Verdict::NeedsAdjustment => {
                "The project needs adjustment before it is financially attractive. Revisit the investment, the recurring costs or the expected savings."
            }
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Excellent => write!(f, "excellent"),
            Verdict::Good => write!(f, "good"),
            Verdict::NeedsAdjustment => write!(f, "needs adjustment"),
        }
    }
}
