pub mod documents;
pub mod engine;
pub mod legend;
pub mod processor;
pub mod sort;
pub mod themes;
pub mod tolerance;
pub mod view_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use crate::domain::model::{ExtractParams, ExtractRecord, RealEstateIdentity};
pub use crate::domain::ports::{ExtractReader, MunicipalityLookup, Storage, WmsClient};
pub use crate::utils::error::Result;
