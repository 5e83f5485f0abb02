use thiserror::Error;

/// Wallet operation errors surfaced to users through outcome notifications
///
/// Every failure is caught at the remote-call boundary and rendered as an
/// embed; none of these are fatal to the process. The user retries manually.
#[derive(Debug, Error)]
pub enum WalletError {
    /// No approved wallet session for the invoking user. Recoverable by
    /// prompting the user to connect.
    #[error("Wallet not connected")]
    NotConnected,

    /// The external signer or the bridge rejected/failed the submission.
    /// Carries the underlying message verbatim (e.g. "User declined").
    #[error("{0}")]
    SubmissionFailed(String),

    /// A remote read (balance or history) failed. Swallowed into an empty
    /// snapshot and logged, never shown as a hard failure.
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Rejected before conversion: negative, non-finite or overflowing amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Rejected before submission: empty destination address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
