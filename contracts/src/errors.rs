//! Protocol error definitions.

use odra::prelude::*;

/// Token sale / AMM protocol errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IcoError {
    // Access errors (1xx)
    NotAuthorized = 100,
    NotWhitelisted = 101,
    UnauthorizedProtocol = 102,

    // Funding errors (2xx)
    FundingPaused = 200,
    IndividualLimitExceeded = 201,
    InvalidPhaseTransition = 202,

    // AMM errors (3xx)
    InsufficientLiquidity = 300,
    InsufficientShares = 301,
    InvalidSwapDirection = 302,
    RatioMismatch = 303,
    InvariantViolation = 304,

    // Amount / token errors (4xx)
    ZeroAmount = 400,
    AmountOverflow = 401,
    InsufficientTokenBalance = 402,
    SupplyCapExceeded = 403,
    InvalidConfig = 404,
}

impl IcoError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Access
            IcoError::NotAuthorized => "Unauthorized: caller is not the owner",
            IcoError::NotWhitelisted => "Contributor is not whitelisted",
            IcoError::UnauthorizedProtocol => "Unauthorized: caller is not a protocol contract",

            // Funding
            IcoError::FundingPaused => "Funding is paused",
            IcoError::IndividualLimitExceeded => "Individual contribution limit exceeded",
            IcoError::InvalidPhaseTransition => "Phase must advance to its immediate successor",

            // AMM
            IcoError::InsufficientLiquidity => "Insufficient liquidity",
            IcoError::InsufficientShares => "Insufficient pool shares",
            IcoError::InvalidSwapDirection => "Exactly one swap input must be non-zero",
            IcoError::RatioMismatch => "Amounts deviate from the pool reserve ratio",
            IcoError::InvariantViolation => "Constant-product invariant violated",

            // Amounts / token
            IcoError::ZeroAmount => "Amount must be greater than zero",
            IcoError::AmountOverflow => "Amount overflow",
            IcoError::InsufficientTokenBalance => "Insufficient balance",
            IcoError::SupplyCapExceeded => "Token supply cap exceeded",
            IcoError::InvalidConfig => "Invalid configuration parameter",
        }
    }
}

impl core::fmt::Display for IcoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<IcoError> for OdraError {
    fn from(error: IcoError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
