use serde::{Deserialize, Serialize};

/// A single chart observation: epoch milliseconds and a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub timestamp: i64,
    pub value: f64,
}

/// A named, time-ordered sequence of points.
///
/// The one canonical shape every provider payload is normalized into, whether
/// it started life as raw prices, a moving average, or a macro series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<TimePoint>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<TimePoint>) -> Self {
        Series {
            name: name.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
