/// Errors returned when configuring a [`crate::pin_input::PinInput`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PinInputError {
    /// A pin input needs at least one cell.
    #[error("pin length must be at least 1")]
    ZeroLength,
}
