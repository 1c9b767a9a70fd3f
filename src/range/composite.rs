use serde::{Deserialize, Serialize};

use crate::{Placement, Range, RangeComparator, Version};

/// Alternatives such as `1.x || >=3.0.0`: a version satisfies the range
/// if it satisfies any alternative.
///
/// A version is only above (or below) the composite when it is above (or below) every alternative.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeRange {
    ranges: Vec<Range>,
}

impl CompositeRange {
    /// Combine the alternatives.
    pub fn new(ranges: impl IntoIterator<Item = Range>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    /// The alternatives, in the order they were given.
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}

impl RangeComparator for CompositeRange {
    fn compare(&self, version: &Version) -> Placement {
        let placements = self
            .ranges
            .iter()
            .map(|range| range.compare(version))
            .collect::<Vec<_>>();

        if placements.contains(&Placement::Satisfied) {
            Placement::Satisfied
        } else if placements.iter().all(|p| *p == Placement::Greater) {
            Placement::Greater
        } else if placements.iter().all(|p| *p == Placement::Lower) {
            Placement::Lower
        } else {
            Placement::Excluded
        }
    }
}

impl std::fmt::Display for CompositeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, " || ")?;
            }
            write!(f, "{range}")?;
        }
        Ok(())
    }
}
