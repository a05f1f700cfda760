use thiserror::Error;

/// An illegal configuration passed to a table constructor.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// The requested capacity was zero.
    #[error("illegal capacity: {0}")]
    Capacity(usize),

    /// The load factor was not a finite, positive number.
    #[error("illegal load factor: {0}")]
    LoadFactor(f64),

    /// The linear probing stride was zero.
    #[error("illegal linear probing constant: {0}")]
    LinearConstant(usize),
}

// Checks that a load factor lies in `(0, inf)`.
pub(crate) fn check_load_factor(load_factor: f64) -> Result<f64, InvalidArgument> {
    if load_factor.is_finite() && load_factor > 0.0 {
        Ok(load_factor)
    } else {
        Err(InvalidArgument::LoadFactor(load_factor))
    }
}
