// Resume/job matching: skill extraction, hybrid scoring, gap comparison, tailoring.
// Everything here is synchronous and infallible; degraded inputs produce fallback values.

pub mod comparator;
pub mod engine;
pub mod extractor;
pub mod similarity;
pub mod tailor;

use std::collections::BTreeSet;

/// Lowercase skill names, iterated in lexicographic order.
pub type SkillSet = BTreeSet<String>;
