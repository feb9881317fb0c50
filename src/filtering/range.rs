//! Numeric range facets (`price`, `area`, `landArea`, `rooms`).
//!
//! A range travels as a comma-joined pair, `"min,max"`. Zero on either side
//! means that side is unbounded; `"0,0"` means no filter at all.

/// Inclusive numeric range with at least one bounded side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    /// Build a range from optional bounds. Returns `None` when both sides are
    /// unbounded; reversed bounds are swapped.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        match (min, max) {
            (None, None) => None,
            (Some(lo), Some(hi)) if lo > hi => Some(Self {
                min: Some(hi),
                max: Some(lo),
            }),
            (min, max) => Some(Self { min, max }),
        }
    }

    /// Apply split-key bounds over the pair's sides.
    #[must_use]
    pub fn overridden(current: Option<Self>, min: Bound, max: Bound) -> Option<Self> {
        let (cur_min, cur_max) = current.map_or((None, None), |r| (r.min, r.max));
        Self::new(min.apply(cur_min), max.apply(cur_max))
    }
}

/// One side given through a split key such as `priceMin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Key absent or unusable: the pair's side stands.
    Keep,
    /// Zero sentinel: the side becomes unbounded.
    Open,
    At(f64),
}

impl Bound {
    fn apply(self, current: Option<f64>) -> Option<f64> {
        match self {
            Self::Keep => current,
            Self::Open => None,
            Self::At(value) => Some(value),
        }
    }
}

impl From<Option<f64>> for Bound {
    fn from(parsed: Option<f64>) -> Self {
        parsed.map_or(Self::Open, Self::At)
    }
}

/// Parse one bound. `Ok(None)` is the zero sentinel.
///
/// # Errors
///
/// Returns a human-readable reason when the value is not a finite,
/// non-negative number.
pub fn parse_bound(raw: &str) -> Result<Option<f64>, &'static str> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| "must be a number")?;
    if !value.is_finite() || value < 0.0 {
        return Err("must be a non-negative number");
    }
    Ok((value != 0.0).then_some(value))
}

/// Parse a `"min,max"` pair.
///
/// # Errors
///
/// Returns a reason for partial pairs (one element, three elements) or
/// invalid numbers; callers in permissive mode treat that as "absent".
pub fn parse_pair(raw: &str) -> Result<Option<NumericRange>, &'static str> {
    let mut parts = raw.split(',');
    let (Some(lo), Some(hi), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("must be a pair of numbers separated by a comma");
    };
    let min = parse_bound(lo)?;
    let max = parse_bound(hi)?;
    Ok(NumericRange::new(min, max))
}
