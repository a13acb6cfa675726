pub mod keyword;

use crate::config::JitterRange;
use crate::jitter::Jitter;
use crate::trace::PillarTrace;

pub trait PillarScorer {
    /// Score an already-normalised (lower-cased) transcript.
    fn score(
        &self,
        normalized: &str,
        jitter: &mut dyn Jitter,
        range: &JitterRange,
    ) -> PillarTrace;
}
