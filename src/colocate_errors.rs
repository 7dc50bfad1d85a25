use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColocateError {
    #[error("probe arrays have mismatched lengths: lon={lon}, lat={lat}, time={time}")]
    ProbeLengthMismatch { lon: usize, lat: usize, time: usize },

    #[error(
        "reference arrays have mismatched lengths: lon={lon}, lat={lat}, time={time}, site={site}"
    )]
    ReferenceLengthMismatch {
        lon: usize,
        lat: usize,
        time: usize,
        site: usize,
    },

    #[error("value array length {values} does not match reference count {references}")]
    ValueLengthMismatch { values: usize, references: usize },
}
