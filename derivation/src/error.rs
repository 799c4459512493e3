use thiserror::Error;

#[derive(Debug, Error)]
pub enum DerivationError {
    /// The requested range runs past the non-hardened index ceiling.
    #[error("derivation range {start}..={end} exceeds the non-hardened index ceiling {max}")]
    IndexRangeExceeded { start: u32, end: u64, max: u32 },

    /// The provider has no address at this index.
    #[error("no address at index {index} (provider {provider})")]
    AddressUnavailable { index: u32, provider: String },

    #[error("address book I/O: {0}")]
    Io(#[from] std::io::Error),
}
