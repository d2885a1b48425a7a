pub mod identification;

pub use identification::{
    normalize, normalize_at, NormalizedResult, RawClassification, RawDescription, RawDetails,
    RawIdentification, RawIsPlant, RawResultBody, RawSuggestion,
};
