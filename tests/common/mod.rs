#![allow(dead_code)]

use async_trait::async_trait;
use oereb_extract::core::{ExtractParams, ExtractReader, ExtractRecord, RealEstateIdentity};
use oereb_extract::domain::model::WmsImage;
use oereb_extract::domain::ports::WmsClient;
use oereb_extract::Result;
use serde_json::{json, Value};

pub const CONFIG: &str = r#"
[app]
default_language = "de"
languages = ["de", "fr"]

[print]
map_size = [493, 280]
pdf_map_size = [1134, 644]
buffer = 10

[tolerance]
min_length = 1.0
min_area = 1.0

[[themes]]
code = "T1"
extract_index = 0

[[themes]]
code = "T2"
extract_index = 1

[[themes]]
code = "T3"
extract_index = 2

[[municipalities]]
fosnr = 99
name = "Testwil"

[[disclaimers]]
title = { de = "Haftungsausschluss" }
content = { de = "Ohne Gewähr." }
"#;

pub fn theme(code: &str, extract_index: i32) -> Value {
    json!({ "code": code, "extract_index": extract_index, "text": { "de": code } })
}

pub fn view_service(id: &str, wms_base: &str, legend_codes: &[&str]) -> Value {
    let legends: Vec<Value> = legend_codes
        .iter()
        .map(|code| json!({ "type_code": code, "legend_text": { "de": code }, "symbol": "iVBORw==" }))
        .collect();
    json!({
        "view_service_id": id,
        "reference_wms": { "de": format!("{}/wms?SERVICE=WMS&REQUEST=GetMap&LAYERS={}", wms_base, id) },
        "legends": legends
    })
}

pub fn restriction(
    theme: Value,
    type_code: &str,
    published_from: &str,
    measure: f64,
    documents: Value,
) -> Value {
    json!({
        "theme": theme,
        "content": { "de": format!("Restriction {}", type_code) },
        "legal_state": "inKraft",
        "type_code": type_code,
        "published_from": published_from,
        "view_service_id": "S",
        "documents": documents,
        "geometries": [
            { "geometry_type": "MultiPolygon", "intersects": true, "measure": measure }
        ]
    })
}

pub fn document(title: &str, published: bool, only_in_municipality: Option<u32>) -> Value {
    json!({
        "title": { "de": title },
        "published": published,
        "only_in_municipality": only_in_municipality
    })
}

/// Raw extract of real estate CH1234 in municipality 99.
///
/// T1: A (intersects, documents of several kinds), B (sliver below tolerance).
/// T2: C (sliver below tolerance). T3: not concerned from the start.
/// F: restriction of T1 published only tomorrow.
pub fn raw_extract(wms_base: &str) -> Value {
    let documents_of_a = json!([
        document("Gesetz", true, None),
        document("Entwurf", false, None),
        document("Nachbargemeinde", true, Some(42)),
        document("Gemeinde", true, Some(99)),
    ]);
    json!({
        "real_estate": {
            "egrid": "CH1234",
            "number": "1000",
            "identdn": "TE0001",
            "fosnr": 99,
            "limit": { "min_x": 2600000.0, "min_y": 1200000.0, "max_x": 2600040.0, "max_y": 1200025.0 },
            "land_registry_area": 1000.0,
            "public_law_restrictions": [
                restriction(theme("T1", 0), "a", "2024-04-30", 250.0, documents_of_a),
                restriction(theme("T1", 0), "b", "2024-04-30", 0.3, json!([document("Entwurf", false, None)])),
                restriction(theme("T2", 1), "c", "2024-04-30", 0.1, json!([])),
                restriction(theme("T1", 0), "f", "2024-05-02", 500.0, json!([])),
            ],
            "view_services": {
                "T1": { "S": view_service("S", wms_base, &["a", "b", "c"]) },
                "T2": { "S": view_service("S", wms_base, &["c"]) }
            },
            "plan_for_land_register": view_service("plan", wms_base, &[]),
            "plan_for_land_register_main_page": view_service("plan_main", wms_base, &[])
        },
        "concerned_theme": [theme("T1", 0), theme("T2", 1)],
        "not_concerned_theme": [theme("T3", 2)]
    })
}

pub struct StaticReader(pub ExtractRecord);

#[async_trait]
impl ExtractReader for StaticReader {
    async fn read(
        &self,
        _params: &ExtractParams,
        _real_estate: &RealEstateIdentity,
    ) -> Result<ExtractRecord> {
        Ok(self.0.clone())
    }
}

pub struct NoWms;

#[async_trait]
impl WmsClient for NoWms {
    async fn fetch(&self, url: &str) -> Result<WmsImage> {
        panic!("unexpected WMS request to {}", url)
    }
}

pub fn identity() -> RealEstateIdentity {
    RealEstateIdentity {
        egrid: "CH1234".to_string(),
    }
}
