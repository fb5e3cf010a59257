use crate::domain::model::{
    ExtractParams, ExtractRecord, Municipality, RealEstateIdentity, WmsImage,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Builds the raw, unfiltered extract for one real estate.
#[async_trait]
pub trait ExtractReader: Send + Sync {
    async fn read(
        &self,
        params: &ExtractParams,
        real_estate: &RealEstateIdentity,
    ) -> Result<ExtractRecord>;
}

pub trait MunicipalityLookup: Send + Sync {
    fn municipality_by_fosnr(&self, fosnr: u32) -> Result<Municipality>;
}

/// Fetches rendered map images from a WMS.
#[async_trait]
pub trait WmsClient: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<WmsImage>;
}

/// Reorders the restrictions of a processed extract.
pub type SortHook = fn(ExtractRecord) -> ExtractRecord;
