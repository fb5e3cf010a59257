use crate::domain::model::{ExtractParams, ExtractRecord, RealEstateIdentity};
use crate::domain::ports::{ExtractReader, Storage};
use crate::utils::error::{OerebError, Result};
use async_trait::async_trait;

/// Reads raw extracts stored as `<EGRID>.json`.
pub struct JsonExtractReader<S: Storage> {
    storage: S,
}

impl<S: Storage> JsonExtractReader<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> ExtractReader for JsonExtractReader<S> {
    async fn read(
        &self,
        params: &ExtractParams,
        real_estate: &RealEstateIdentity,
    ) -> Result<ExtractRecord> {
        let egrid = &real_estate.egrid;
        if egrid.is_empty() || !egrid.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(OerebError::StoreError {
                egrid: egrid.clone(),
                message: "EGRID must be alphanumeric".to_string(),
            });
        }

        let file_name = format!("{}.json", egrid);
        tracing::debug!("reading raw extract {} (format {:?})", file_name, params.format);
        let data = self
            .storage
            .read_file(&file_name)
            .await
            .map_err(|e| OerebError::StoreError {
                egrid: egrid.clone(),
                message: e.to_string(),
            })?;
        let extract: ExtractRecord = serde_json::from_slice(&data)?;

        if &extract.real_estate.egrid != egrid {
            return Err(OerebError::StoreError {
                egrid: egrid.clone(),
                message: format!(
                    "stored extract belongs to {}",
                    extract.real_estate.egrid
                ),
            });
        }

        tracing::debug!(
            "raw extract of {} holds {} restriction(s)",
            egrid,
            extract.real_estate.public_law_restrictions.len()
        );
        Ok(extract)
    }
}
