use crate::domain::model::{BoundingBox, ViewService};
use crate::domain::ports::WmsClient;
use crate::utils::error::{OerebError, Result};
use url::Url;

/// Query parameters replaced when the map extent is applied to a reference WMS URL.
const MAP_PARAMS: [&str; 3] = ["BBOX", "WIDTH", "HEIGHT"];

impl ViewService {
    /// Language used for `language`: the requested one if the service has a URL for it, else
    /// `fallback`, else the first language available.
    pub fn wms_language(&self, language: &str, fallback: &str) -> Option<String> {
        [language, fallback]
            .into_iter()
            .find(|candidate| self.reference_wms.contains_key(*candidate))
            .map(str::to_string)
            .or_else(|| self.reference_wms.keys().next().cloned())
    }

    /// Applies map extent and size to the reference WMS URL of `language` and stores the
    /// result back under that language. Returns the full URL.
    pub fn get_full_wms_url(
        &mut self,
        language: &str,
        fallback_language: &str,
        width: u32,
        height: u32,
        bbox: &BoundingBox,
    ) -> Result<Option<String>> {
        let Some(source_language) = self.wms_language(language, fallback_language) else {
            tracing::warn!("view service {} has no reference WMS", self.view_service_id);
            return Ok(None);
        };
        if source_language != language {
            tracing::warn!(
                "view service {} has no reference WMS in {}, using {}",
                self.view_service_id,
                language,
                source_language
            );
        }

        let reference = &self.reference_wms[&source_language];
        let mut url = Url::parse(reference).map_err(|e| OerebError::ViewServiceError {
            view_service: self.view_service_id.clone(),
            message: format!("invalid reference WMS '{}': {}", reference, e),
        })?;

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| {
                !MAP_PARAMS
                    .iter()
                    .any(|param| key.eq_ignore_ascii_case(param))
            })
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair("BBOX", &bbox.to_wms_param())
            .append_pair("WIDTH", &width.to_string())
            .append_pair("HEIGHT", &height.to_string());

        let full_url = url.to_string();
        self.reference_wms.insert(language.to_string(), full_url.clone());
        Ok(Some(full_url))
    }

    /// Downloads the map image for `language` and keeps it on the view service.
    pub async fn download_wms_content<C: WmsClient + ?Sized>(
        &mut self,
        language: &str,
        client: &C,
    ) -> Result<()> {
        let Some(url) = self.reference_wms.get(language) else {
            tracing::warn!(
                "view service {} has no WMS URL in {}, no image downloaded",
                self.view_service_id,
                language
            );
            return Ok(());
        };
        let image = client.fetch(url).await?;
        tracing::debug!(
            "downloaded {} bytes ({}) for view service {}",
            image.content.len(),
            image.content_type,
            self.view_service_id
        );
        self.images.insert(language.to_string(), image);
        Ok(())
    }
}
