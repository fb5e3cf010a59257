use crate::core::processor::ExtractProcessor;
use crate::domain::model::{ExtractParams, ExtractRecord, RealEstateIdentity};
use crate::domain::ports::{ExtractReader, Storage, WmsClient};
use crate::utils::error::Result;

/// Runs the processor for one real estate and stores the finalized extract as JSON.
pub struct ExtractEngine<R: ExtractReader, W: WmsClient, S: Storage> {
    processor: ExtractProcessor<R, W>,
    storage: S,
}

impl<R: ExtractReader, W: WmsClient, S: Storage> ExtractEngine<R, W, S> {
    pub fn new(processor: ExtractProcessor<R, W>, storage: S) -> Self {
        Self { processor, storage }
    }

    pub fn output_file_name(real_estate: &RealEstateIdentity) -> String {
        format!("{}_extract.json", real_estate.egrid)
    }

    pub async fn run(
        &self,
        real_estate: &RealEstateIdentity,
        params: &ExtractParams,
    ) -> Result<String> {
        tracing::info!("🚀 Creating extract for {}", real_estate.egrid);

        let extract = self.processor.process(real_estate, params).await?;
        log_summary(&extract);

        let output_file = Self::output_file_name(real_estate);
        let json = serde_json::to_vec_pretty(&extract)?;
        self.storage.write_file(&output_file, &json).await?;

        tracing::info!("💾 Extract saved: {}", output_file);
        Ok(output_file)
    }
}

fn log_summary(extract: &ExtractRecord) {
    tracing::info!(
        "📊 {} restriction(s), {} concerned theme(s), {} not concerned theme(s)",
        extract.real_estate.public_law_restrictions.len(),
        extract.concerned_theme.len(),
        extract.not_concerned_theme.len()
    );
}
