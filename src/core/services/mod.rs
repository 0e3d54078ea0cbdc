pub mod discount_engine;
pub mod finalize_service;

pub use discount_engine::DiscountEngine;
pub use finalize_service::FinalizeService;

use crate::errors::DiscountError;

pub type ServiceResult<T> = Result<T, DiscountError>;
