pub mod overlay;
mod section;
mod union;

pub use section::PlaneSection;
pub use union::Union;

/// Outcome of a merge step that may fall back to unmerged input.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MergeStatus {
    /// The geometry was merged.
    Merged,
    /// Merging failed and the unmerged input was used instead.
    FellBack { reason: String },
}

impl MergeStatus {
    #[must_use]
    pub fn is_merged(&self) -> bool {
        matches!(self, Self::Merged)
    }
}
