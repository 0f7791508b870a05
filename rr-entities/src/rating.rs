use std::fmt;

/// A single rating as submitted by a user.
///
/// The value is stored as given. Restricting it to whole or
/// half stars is the job of the input layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct RatingValue(f64);

impl RatingValue {
    pub const fn new(val: f64) -> Self {
        Self(val)
    }
}

impl From<f64> for RatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<i8> for RatingValue {
    fn from(from: i8) -> Self {
        Self(f64::from(from))
    }
}

impl From<RatingValue> for f64 {
    fn from(from: RatingValue) -> Self {
        from.0
    }
}

impl fmt::Display for RatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The aggregate rating of a recipe.
///
/// `0` doubles as the "no ratings yet" sentinel, see [`AvgRatingValue::NOT_AVAILABLE`].
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct AvgRatingValue(f64);

impl AvgRatingValue {
    pub const NOT_AVAILABLE: Self = Self(0.0);

    pub fn is_available(self) -> bool {
        self != Self::NOT_AVAILABLE
    }

    /// Round to the nearest half unit, i.e. `round(x * 2) / 2`.
    pub fn round_to_half_step(self) -> Self {
        Self((self.0 * 2.0).round() / 2.0)
    }
}

impl From<f64> for AvgRatingValue {
    fn from(from: f64) -> Self {
        Self(from)
    }
}

impl From<AvgRatingValue> for f64 {
    fn from(from: AvgRatingValue) -> Self {
        from.0
    }
}

impl From<RatingValue> for AvgRatingValue {
    fn from(from: RatingValue) -> Self {
        Self(from.0)
    }
}

impl fmt::Display for AvgRatingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_available() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("n/a")
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct AvgRatingValueBuilder {
    acc: f64,
    cnt: usize,
}

impl AvgRatingValueBuilder {
    pub fn add(&mut self, val: RatingValue) {
        self.acc += val.0;
        self.cnt += 1;
    }

    pub const fn count(&self) -> usize {
        self.cnt
    }

    /// The plain arithmetic mean or [`AvgRatingValue::NOT_AVAILABLE`]
    /// if nothing has been added.
    pub fn build(self) -> AvgRatingValue {
        if self.cnt > 0 {
            AvgRatingValue::from(self.acc / self.cnt as f64)
        } else {
            AvgRatingValue::NOT_AVAILABLE
        }
    }
}

impl std::ops::AddAssign<RatingValue> for AvgRatingValueBuilder {
    fn add_assign(&mut self, rhs: RatingValue) {
        self.add(rhs);
    }
}

impl FromIterator<RatingValue> for AvgRatingValueBuilder {
    fn from_iter<I: IntoIterator<Item = RatingValue>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut acc, val| {
            acc += val;
            acc
        })
    }
}

/// Mean and number of the ratings of a recipe.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub avg: AvgRatingValue,
    pub count: usize,
}
