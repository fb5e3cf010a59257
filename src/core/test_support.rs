//! Builders for records used across the unit tests.

use crate::config::toml_config::OerebConfig;
use crate::domain::model::{
    BoundingBox, Document, ExtractParams, ExtractRecord, GeometryRecord, LegendEntry,
    MultilingualText, PlrRecord, RealEstate, RealEstateIdentity, Theme, ViewService,
    ViewServiceRegistry, WmsImage,
};
use crate::domain::ports::{ExtractReader, WmsClient};
use crate::utils::error::{OerebError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const TEST_CONFIG: &str = r#"
[app]
default_language = "de"
languages = ["de", "fr", "it"]

[print]
map_size = [500, 300]
pdf_map_size = [1000, 600]
buffer = 10

[[municipalities]]
fosnr = 99
name = "Testwil"

[[disclaimers]]
title = { de = "Haftungsausschluss" }
content = { de = "Ohne Gewähr." }

[[glossaries]]
title = { de = "ÖREB" }
content = { de = "Öffentlich-rechtliche Eigentumsbeschränkung" }
"#;

pub fn test_config() -> OerebConfig {
    OerebConfig::from_toml_str(TEST_CONFIG).unwrap()
}

fn text(value: &str) -> MultilingualText {
    MultilingualText::from([("de".to_string(), value.to_string())])
}

pub fn theme(code: &str, extract_index: i32) -> Theme {
    Theme {
        code: code.to_string(),
        extract_index,
        text: text(code),
    }
}

pub fn document(title: &str, published: bool, only_in_municipality: Option<u32>) -> Document {
    Document {
        title: text(title),
        published,
        only_in_municipality,
        text_at_web: None,
    }
}

pub fn geometry(geometry_type: &str, intersects: bool, measure: Option<f64>) -> GeometryRecord {
    GeometryRecord {
        geometry_type: geometry_type.to_string(),
        intersects,
        measure,
        geo_json: serde_json::Value::Null,
    }
}

pub fn legend_entry(type_code: &str) -> LegendEntry {
    LegendEntry {
        type_code: type_code.to_string(),
        legend_text: text(type_code),
        symbol: Vec::new(),
        type_code_list: None,
    }
}

pub fn view_service(view_service_id: &str, legend_type_codes: &[&str]) -> ViewService {
    ViewService {
        view_service_id: view_service_id.to_string(),
        reference_wms: MultilingualText::new(),
        layer_index: 1,
        layer_opacity: 1.0,
        legends: legend_type_codes.iter().map(|code| legend_entry(code)).collect(),
        images: BTreeMap::new(),
    }
}

pub fn plr(theme_code: &str, type_code: &str, view_service_id: &str) -> PlrRecord {
    PlrRecord {
        theme: theme(theme_code, 0),
        content: serde_json::json!({ "de": type_code }),
        legal_state: "inKraft".to_string(),
        type_code: type_code.to_string(),
        published_from: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        view_service_id: view_service_id.to_string(),
        documents: Vec::new(),
        geometries: Vec::new(),
        area: None,
        length: None,
        n_points: None,
        part_in_percent: None,
    }
}

fn plan(view_service_id: &str) -> ViewService {
    let mut plan = view_service(view_service_id, &[]);
    plan.reference_wms.insert(
        "de".to_string(),
        "https://wms.example.com/grundbuchplan?LAYERS=plan".to_string(),
    );
    plan
}

pub fn empty_extract() -> ExtractRecord {
    ExtractRecord {
        real_estate: RealEstate {
            egrid: "CH1234".to_string(),
            number: "1000".to_string(),
            identdn: "TE0001".to_string(),
            fosnr: 99,
            limit: BoundingBox::new(2600000.0, 1200000.0, 2600040.0, 1200025.0),
            land_registry_area: 1000.0,
            public_law_restrictions: Vec::new(),
            view_services: ViewServiceRegistry::new(),
            plan_for_land_register: plan("plan"),
            plan_for_land_register_main_page: plan("plan_main"),
        },
        concerned_theme: Vec::new(),
        not_concerned_theme: Vec::new(),
        disclaimers: Default::default(),
        glossaries: Default::default(),
    }
}

/// Hands out a copy of the same raw extract for every request.
pub struct StaticReader {
    extract: ExtractRecord,
}

impl StaticReader {
    pub fn new(extract: ExtractRecord) -> Self {
        Self { extract }
    }
}

#[async_trait]
impl ExtractReader for StaticReader {
    async fn read(
        &self,
        _params: &ExtractParams,
        _real_estate: &RealEstateIdentity,
    ) -> Result<ExtractRecord> {
        Ok(self.extract.clone())
    }
}

#[derive(Default)]
pub struct StaticWmsClient {
    fail: bool,
}

impl StaticWmsClient {
    pub fn failing() -> Self {
        Self { fail: true }
    }
}

#[async_trait]
impl WmsClient for StaticWmsClient {
    async fn fetch(&self, url: &str) -> Result<WmsImage> {
        if self.fail {
            return Err(OerebError::WmsDownloadError {
                url: url.to_string(),
                message: "status 503".to_string(),
            });
        }
        Ok(WmsImage {
            content_type: "image/png".to_string(),
            content: vec![0x89, 0x50, 0x4e, 0x47],
        })
    }
}
