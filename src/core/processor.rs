use crate::config::toml_config::OerebConfig;
use crate::core::documents::{filter_documents_by_fosnr, filter_published_documents};
use crate::core::legend::resolve_legend_entries;
use crate::core::sort::resolve_sort_hook;
use crate::core::themes::reclassify_themes;
use crate::domain::model::{
    Disclaimer, ExtractFormat, ExtractParams, ExtractRecord, Glossary, PlrRecord, RealEstate,
    RealEstateIdentity,
};
use crate::domain::ports::{ExtractReader, MunicipalityLookup, SortHook, WmsClient};
use crate::utils::error::{OerebError, Result};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;

/// Turns the raw extract of a real estate into the finalized extract.
///
/// Use one processor call per request: the extract is owned by the call from the store read
/// until it is returned, and dropped if any step fails.
pub struct ExtractProcessor<R: ExtractReader, W: WmsClient> {
    reader: R,
    wms_client: W,
    config: Arc<OerebConfig>,
    disclaimers: Arc<Vec<Disclaimer>>,
    glossaries: Arc<Vec<Glossary>>,
    sort_hook: Option<SortHook>,
    today: Option<NaiveDate>,
}

impl<R: ExtractReader, W: WmsClient> ExtractProcessor<R, W> {
    /// Fails if the configured sort method is unknown.
    pub fn new(reader: R, wms_client: W, config: Arc<OerebConfig>) -> Result<Self> {
        let sort_hook = config
            .extract
            .sort_within_themes_method
            .as_deref()
            .filter(|name| *name != "none")
            .map(resolve_sort_hook)
            .transpose()?;
        let disclaimers = Arc::new(config.disclaimers.clone());
        let glossaries = Arc::new(config.glossaries.clone());

        Ok(Self {
            reader,
            wms_client,
            config,
            disclaimers,
            glossaries,
            sort_hook,
            today: None,
        })
    }

    /// Replaces the configured sort method.
    pub fn with_sort_hook(mut self, sort_hook: Option<SortHook>) -> Self {
        self.sort_hook = sort_hook;
        self
    }

    /// Fixes the date publication is checked against instead of the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Drops unpublished restrictions and splits the others into those relevant for the real
    /// estate after applying the tolerances and those only visible in the map extent.
    ///
    /// Documents of relevant restrictions are filtered by municipality and publication, themes
    /// without relevant restriction become not concerned, and the legends of the remaining
    /// view services are reduced to the other legend. Only relevant restrictions are kept.
    pub fn plr_tolerance_check(&self, mut extract: ExtractRecord) -> ExtractRecord {
        let restrictions = std::mem::take(&mut extract.real_estate.public_law_restrictions);
        let (inside_plrs, outside_plrs) = self.split_restrictions(
            restrictions,
            extract.real_estate.fosnr,
            extract.real_estate.land_registry_area,
        );

        let inside_theme_codes: HashSet<&str> = inside_plrs
            .iter()
            .map(|plr| plr.theme.code.as_str())
            .collect();
        reclassify_themes(&mut extract, &inside_theme_codes, &self.config.themes);

        let real_estate = &mut extract.real_estate;
        let inside_plrs =
            resolve_legend_entries(inside_plrs, &outside_plrs, &mut real_estate.view_services);
        real_estate.view_services.retain(|theme_code, view_service_id| {
            inside_plrs
                .iter()
                .any(|plr| plr.theme.code == theme_code && plr.view_service_id == view_service_id)
        });
        real_estate.public_law_restrictions = inside_plrs;

        extract
    }

    /// Splits the published restrictions into those relevant for the real estate, with their
    /// documents filtered, and those only visible in the map extent, left as they are.
    /// Unpublished restrictions are dropped.
    fn split_restrictions(
        &self,
        restrictions: Vec<PlrRecord>,
        fosnr: u32,
        land_registry_area: f64,
    ) -> (Vec<PlrRecord>, Vec<PlrRecord>) {
        let today = self.today();
        let mut inside_plrs = Vec::new();
        let mut outside_plrs = Vec::new();
        for mut plr in restrictions {
            if !plr.is_published(today) {
                tracing::debug!(
                    "plr_tolerance_check: dropping restriction {} ({}) published from {}",
                    plr.type_code,
                    plr.theme.code,
                    plr.published_from
                );
                continue;
            }
            plr.check_content_shape();

            if plr.calculate(
                land_registry_area,
                &self.config.geometry_types,
                &self.config.tolerance,
            ) {
                tracing::debug!(
                    "plr_tolerance_check: keeping as potentially concerned restriction {} ({})",
                    plr.type_code,
                    plr.theme.code
                );
                let plr = filter_documents_by_fosnr(plr, fosnr);
                inside_plrs.push(filter_published_documents(plr));
            } else {
                tracing::debug!(
                    "plr_tolerance_check: removing from the concerned restrictions {} ({})",
                    plr.type_code,
                    plr.theme.code
                );
                outside_plrs.push(plr);
            }
        }
        (inside_plrs, outside_plrs)
    }

    /// Completes the WMS URLs of the land register plans and of the restrictions' view services
    /// for the requested map, downloading the images if `images` is set.
    pub async fn view_service_handling(
        &self,
        real_estate: &mut RealEstate,
        images: bool,
        format: ExtractFormat,
        language: Option<&str>,
    ) -> Result<()> {
        let default_language = self.config.default_language();
        let language = language.unwrap_or(default_language);
        let (width, height) = self.config.map_size(format);
        let bbox = self.config.bbox(&real_estate.limit);

        for plr in real_estate.restrictions_without_view_service() {
            tracing::warn!(
                "restriction {} ({}) references unknown view service {}, no map is created for it",
                plr.type_code,
                plr.theme.code,
                plr.view_service_id
            );
        }

        let plans = [
            &mut real_estate.plan_for_land_register,
            &mut real_estate.plan_for_land_register_main_page,
        ];
        for view_service in plans
            .into_iter()
            .chain(real_estate.view_services.iter_mut())
        {
            view_service.get_full_wms_url(language, default_language, width, height, &bbox)?;
            if images {
                view_service
                    .download_wms_content(language, &self.wms_client)
                    .await?;
            }
        }
        Ok(())
    }

    pub async fn process(
        &self,
        real_estate: &RealEstateIdentity,
        params: &ExtractParams,
    ) -> Result<ExtractRecord> {
        tracing::debug!("process() start for {}", real_estate.egrid);
        let extract_raw = self.reader.read(params, real_estate).await?;
        let municipality = self
            .config
            .municipality_by_fosnr(extract_raw.real_estate.fosnr)?;
        tracing::debug!(
            "real estate {} lies in {} ({})",
            real_estate.egrid,
            municipality.name,
            municipality.fosnr
        );
        if !municipality.published {
            return Err(OerebError::MunicipalityNotPublished {
                fosnr: municipality.fosnr,
            });
        }

        let mut extract = self.plr_tolerance_check(extract_raw);

        match self.sort_hook {
            Some(sort_within_themes) => extract = sort_within_themes(extract),
            None => tracing::info!(
                "No configuration is provided for extract sort_within_themes_method; no further sorting is applied."
            ),
        }

        // View services are completed after the tolerance check so that only the services of
        // restrictions that survived it are requested.
        self.view_service_handling(
            &mut extract.real_estate,
            params.images,
            params.format,
            params.language.as_deref(),
        )
        .await?;

        extract.disclaimers = Arc::clone(&self.disclaimers);
        extract.glossaries = Arc::clone(&self.glossaries);
        tracing::debug!("process() done, returning extract.");
        Ok(extract)
    }
}
