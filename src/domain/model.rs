use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Text keyed by language code ("de", "fr", ...).
pub type MultilingualText = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub code: String,
    pub extract_index: i32,
    #[serde(default)]
    pub text: MultilingualText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: MultilingualText,
    pub published: bool,
    #[serde(default)]
    pub only_in_municipality: Option<u32>,
    #[serde(default)]
    pub text_at_web: Option<MultilingualText>,
}

impl Document {
    /// A document without municipality restriction applies everywhere.
    pub fn applies_to(&self, fosnr: u32) -> bool {
        self.only_in_municipality.map_or(true, |only| only == fosnr)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub type_code: String,
    #[serde(default)]
    pub legend_text: MultilingualText,
    #[serde(default, with = "base64_bytes")]
    pub symbol: Vec<u8>,
    #[serde(default)]
    pub type_code_list: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsImage {
    pub content_type: String,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewService {
    pub view_service_id: String,
    /// Reference WMS URL per language. Rewritten in place once the map extent is known.
    pub reference_wms: MultilingualText,
    #[serde(default)]
    pub layer_index: i32,
    #[serde(default = "default_layer_opacity")]
    pub layer_opacity: f64,
    #[serde(default)]
    pub legends: Vec<LegendEntry>,
    #[serde(default)]
    pub images: BTreeMap<String, WmsImage>,
}

fn default_layer_opacity() -> f64 {
    1.0
}

/// View services of the restrictions, owned once per theme and view service id.
///
/// Restrictions only carry the `view_service_id`; every restriction of the same theme that
/// names the same id resolves to the same entry here, so a change to its legend is seen by
/// all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewServiceRegistry {
    services: BTreeMap<String, BTreeMap<String, ViewService>>,
}

impl ViewServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, theme_code: &str, view_service: ViewService) -> Option<ViewService> {
        self.services
            .entry(theme_code.to_string())
            .or_default()
            .insert(view_service.view_service_id.clone(), view_service)
    }

    pub fn get(&self, theme_code: &str, view_service_id: &str) -> Option<&ViewService> {
        self.services.get(theme_code)?.get(view_service_id)
    }

    pub fn get_mut(&mut self, theme_code: &str, view_service_id: &str) -> Option<&mut ViewService> {
        self.services.get_mut(theme_code)?.get_mut(view_service_id)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ViewService> {
        self.services.values_mut().flat_map(|services| services.values_mut())
    }

    pub fn len(&self) -> usize {
        self.services.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keeps only the services for which `keep(theme_code, view_service_id)` holds.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        for (theme_code, services) in self.services.iter_mut() {
            services.retain(|view_service_id, _| keep(theme_code, view_service_id));
        }
        self.services.retain(|_, services| !services.is_empty());
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Geometry type name, e.g. "MultiPolygon".
    pub geometry_type: String,
    /// Whether the geometry touches the real estate at all.
    pub intersects: bool,
    /// Length or area of the part lying on the real estate, pre-computed by the store.
    #[serde(default)]
    pub measure: Option<f64>,
    #[serde(default)]
    pub geo_json: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlrRecord {
    pub theme: Theme,
    pub content: serde_json::Value,
    pub legal_state: String,
    pub type_code: String,
    pub published_from: NaiveDate,
    pub view_service_id: String,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub geometries: Vec<GeometryRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_points: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_in_percent: Option<f64>,
}

impl PlrRecord {
    /// A restriction is published unless it only becomes valid after `today`.
    pub fn is_published(&self, today: NaiveDate) -> bool {
        self.published_from <= today
    }

    /// Logs restrictions whose content is not a per-language object. Processing keeps the value.
    pub fn check_content_shape(&self) {
        if !self.content.is_object() {
            tracing::warn!(
                "Content of restriction {} ({}) should be a multilingual object, got: {}",
                self.type_code,
                self.theme.code,
                self.content
            );
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Comma separated, as expected by the WMS `BBOX` parameter.
    pub fn to_wms_param(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealEstate {
    pub egrid: String,
    pub number: String,
    pub identdn: String,
    pub fosnr: u32,
    pub limit: BoundingBox,
    pub land_registry_area: f64,
    #[serde(default)]
    pub public_law_restrictions: Vec<PlrRecord>,
    #[serde(default)]
    pub view_services: ViewServiceRegistry,
    pub plan_for_land_register: ViewService,
    pub plan_for_land_register_main_page: ViewService,
}

impl RealEstate {
    pub fn view_service_of(&self, plr: &PlrRecord) -> Option<&ViewService> {
        self.view_services.get(&plr.theme.code, &plr.view_service_id)
    }

    /// Restrictions whose view service is missing from `view_services`.
    pub fn restrictions_without_view_service(&self) -> impl Iterator<Item = &PlrRecord> {
        self.public_law_restrictions
            .iter()
            .filter(|plr| self.view_service_of(plr).is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub title: MultilingualText,
    pub content: MultilingualText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glossary {
    pub title: MultilingualText,
    pub content: MultilingualText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub fosnr: u32,
    pub name: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractRecord {
    pub real_estate: RealEstate,
    #[serde(default)]
    pub concerned_theme: Vec<Theme>,
    #[serde(default)]
    pub not_concerned_theme: Vec<Theme>,
    #[serde(default)]
    pub disclaimers: Arc<Vec<Disclaimer>>,
    #[serde(default)]
    pub glossaries: Arc<Vec<Glossary>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealEstateIdentity {
    pub egrid: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ExtractFormat {
    #[default]
    Json,
    Xml,
    Pdf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractParams {
    pub format: ExtractFormat,
    pub images: bool,
    pub language: Option<String>,
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
