use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // REGISTRY ERRORS (20-29)
    // ============================================
    /// No startup registered under this id
    UnknownStartup = 20,
    /// Total shares must be positive
    InvalidShareCount = 21,
    /// Initial valuation must be positive
    InvalidValuation = 22,
    /// Startup has not been validated yet
    StartupNotValidated = 23,

    // ============================================
    // SHARE LEDGER ERRORS (30-39)
    // ============================================
    /// Requested shares exceed available_shares
    InsufficientAvailableShares = 30,

    // ============================================
    // VALUATION ERRORS (40-49)
    // ============================================
    /// Valuation must be > 0
    NonPositiveValuation = 40,
    /// at_time must be strictly after the last recorded time
    NonMonotonicTime = 41,
    /// total_shares is zero
    DivisionUndefined = 42,

    // ============================================
    // INVESTMENT ERRORS (50-59)
    // ============================================
    /// Amount must be positive
    ZeroAmount = 50,
    /// Price per share could not be computed (or floors to zero)
    PriceUndefined = 51,
    /// Amount buys less than one share
    ZeroSharesComputed = 52,

    // ============================================
    // PROFIT ERRORS (60-69)
    // ============================================
    /// No profit pool under this id
    UnknownPool = 60,
    /// No shares sold yet, nothing to distribute against
    NoSharesOutstanding = 61,
    /// Deposit is smaller than the number of shares sold
    EntitlementRoundsToZero = 62,
    /// Investor already claimed from this pool
    AlreadyClaimed = 63,
    /// Investor holds no shares at claim time
    NoHolding = 64,
    /// Payout would exceed the remaining pool balance
    PoolExhausted = 65,

    // ============================================
    // ARITHMETIC ERRORS (70-79)
    // ============================================
    /// Checked arithmetic overflowed
    ArithmeticOverflow = 70,

    // ============================================
    // OPERATIONAL ERRORS (80-89)
    // ============================================
    /// Contract is paused
    ContractPaused = 80,
}

/// Coarse classification callers can branch on without matching every code.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    CapacityExceeded,
    StateConflict,
    PreconditionFailed,
    Configuration,
}

impl Error {
    pub fn kind(self) -> ErrorKind {
        match self {
            Error::UnknownStartup | Error::UnknownPool | Error::NoHolding => ErrorKind::NotFound,

            Error::InvalidShareCount
            | Error::InvalidValuation
            | Error::NonPositiveValuation
            | Error::ZeroAmount
            | Error::ZeroSharesComputed
            | Error::EntitlementRoundsToZero
            | Error::ArithmeticOverflow => ErrorKind::InvalidInput,

            Error::InsufficientAvailableShares | Error::PoolExhausted => {
                ErrorKind::CapacityExceeded
            }

            Error::AlreadyClaimed | Error::NonMonotonicTime => ErrorKind::StateConflict,

            Error::StartupNotValidated
            | Error::NoSharesOutstanding
            | Error::DivisionUndefined
            | Error::PriceUndefined => ErrorKind::PreconditionFailed,

            Error::AlreadyInitialized | Error::NotInitialized | Error::ContractPaused => {
                ErrorKind::Configuration
            }
        }
    }
}
