use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinPtError {
    #[error("Not enough tracks to estimate a linearization point: found {found}, need at least {required}")]
    NotEnoughTracks { found: usize, required: usize },

    #[error("Distance matrix does not match the track collection: {0}")]
    MatrixMismatch(String),

    #[error("Invalid track pair: both indices are {0}")]
    InvalidPairCandidate(usize),

    #[error("No usable crossing point among {evaluated} evaluated track pairs")]
    InsufficientEvidence { evaluated: usize },

    #[error("Mode estimation failed: {0}")]
    ModeEstimation(String),

    #[error("Invalid linearization point finder parameter: {0}")]
    InvalidParameter(String),

    #[error("No linearization point finder to try")]
    NoFinders,

    #[error("CSV error while writing estimation record: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for LinPtError {
    fn eq(&self, other: &Self) -> bool {
        use LinPtError::*;
        match (self, other) {
            (
                NotEnoughTracks {
                    found: fa,
                    required: ra,
                },
                NotEnoughTracks {
                    found: fb,
                    required: rb,
                },
            ) => fa == fb && ra == rb,
            (MatrixMismatch(a), MatrixMismatch(b)) => a == b,
            (InvalidPairCandidate(a), InvalidPairCandidate(b)) => a == b,
            (InsufficientEvidence { evaluated: a }, InsufficientEvidence { evaluated: b }) => {
                a == b
            }
            (ModeEstimation(a), ModeEstimation(b)) => a == b,
            (InvalidParameter(a), InvalidParameter(b)) => a == b,

            // Sink errors carry no comparable payload: same variant means equal
            (CsvError(_), CsvError(_)) => true,
            (IoError(_), IoError(_)) => true,

            (NoFinders, NoFinders) => true,

            _ => false,
        }
    }
}
