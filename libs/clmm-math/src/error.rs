use thiserror::Error;

/// Input-validation failures of the position math.
///
/// Every variant is deterministic: calling again with the same inputs fails
/// the same way, so none of them is worth retrying without fresher data.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("invalid tick range: lower {lower} must be below upper {upper}")]
    InvalidRange { lower: i32, upper: i32 },

    #[error("tick {0} out of bounds")]
    OutOfBoundsTick(i32),

    #[error("sqrt price out of bounds")]
    SqrtPriceOutOfBounds,

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("pool snapshot has no entry for tick {0}")]
    MissingTick(i32),
}

pub type Result<T> = core::result::Result<T, MathError>;
