pub use crate::errors::AppError;

pub type Result<T, E = AppError> = core::result::Result<T, E>;
