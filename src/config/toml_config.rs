use crate::core::sort::resolve_sort_hook;
use crate::domain::model::{
    BoundingBox, Disclaimer, ExtractFormat, Glossary, Municipality, Theme,
};
use crate::domain::ports::MunicipalityLookup;
use crate::utils::error::{OerebError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_positive_number, validate_range,
    validate_unique, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OerebConfig {
    pub app: AppConfig,
    pub print: PrintConfig,
    #[serde(default)]
    pub tolerance: Tolerance,
    #[serde(default)]
    pub geometry_types: GeometryTypes,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub wms: WmsConfig,
    #[serde(default)]
    pub themes: Vec<Theme>,
    #[serde(default)]
    pub municipalities: Vec<Municipality>,
    #[serde(default)]
    pub disclaimers: Vec<Disclaimer>,
    #[serde(default)]
    pub glossaries: Vec<Glossary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub default_language: String,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Map size in pixels (width, height) for every format except PDF.
    pub map_size: (u32, u32),
    pub pdf_map_size: (u32, u32),
    /// Margin in pixels kept free around the real estate.
    #[serde(default = "default_buffer")]
    pub buffer: u32,
}

fn default_buffer() -> u32 {
    10
}

/// Minimal length (m) and area (m²) a restriction must cover on the real estate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub min_length: f64,
    pub min_area: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            min_length: 1.0,
            min_area: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    Line,
    Polygon,
}

/// Geometry type names recognized per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryTypes {
    pub point: Vec<String>,
    pub line: Vec<String>,
    pub polygon: Vec<String>,
}

impl Default for GeometryTypes {
    fn default() -> Self {
        Self {
            point: vec!["Point".to_string(), "MultiPoint".to_string()],
            line: vec!["LineString".to_string(), "MultiLineString".to_string()],
            polygon: vec!["Polygon".to_string(), "MultiPolygon".to_string()],
        }
    }
}

impl GeometryTypes {
    pub fn kind_of(&self, geometry_type: &str) -> Option<GeometryKind> {
        let matches = |names: &[String]| names.iter().any(|name| name == geometry_type);
        if matches(&self.point) {
            Some(GeometryKind::Point)
        } else if matches(&self.line) {
            Some(GeometryKind::Line)
        } else if matches(&self.polygon) {
            Some(GeometryKind::Polygon)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub sort_within_themes_method: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WmsConfig {
    pub timeout_seconds: Option<u64>,
}

impl OerebConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OerebError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OerebError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WMS_HOST})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OerebError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("app.default_language", &self.app.default_language)?;
        validate_one_of(
            "app.default_language",
            &self.app.default_language,
            &self.app.languages,
        )?;

        for (field, (width, height)) in [
            ("print.map_size", self.print.map_size),
            ("print.pdf_map_size", self.print.pdf_map_size),
        ] {
            validate_positive_number(field, width, 1)?;
            validate_positive_number(field, height, 1)?;
        }
        let (width, height) = self.print.map_size;
        let max_buffer = (width.min(height).saturating_sub(1)) / 2;
        validate_range("print.buffer", self.print.buffer, 0, max_buffer)?;

        validate_range("tolerance.min_length", self.tolerance.min_length, 0.0, f64::MAX)?;
        validate_range("tolerance.min_area", self.tolerance.min_area, 0.0, f64::MAX)?;

        validate_unique("themes.code", self.themes.iter().map(|theme| theme.code.as_str()))?;
        validate_unique(
            "municipalities.fosnr",
            self.municipalities.iter().map(|municipality| municipality.fosnr),
        )?;

        if let Some(name) = self
            .extract
            .sort_within_themes_method
            .as_deref()
            .filter(|name| *name != "none")
        {
            resolve_sort_hook(name)?;
        }

        Ok(())
    }

    pub fn default_language(&self) -> &str {
        &self.app.default_language
    }

    pub fn map_size(&self, format: ExtractFormat) -> (u32, u32) {
        match format {
            ExtractFormat::Pdf => self.print.pdf_map_size,
            ExtractFormat::Json | ExtractFormat::Xml => self.print.map_size,
        }
    }

    /// Map extent centred on the real estate, keeping `print.buffer` pixels free on every side
    /// and matching the aspect ratio of `print.map_size`.
    pub fn bbox(&self, limit: &BoundingBox) -> BoundingBox {
        let (map_width, map_height) = self.print.map_size;
        let (map_width, map_height) = (map_width as f64, map_height as f64);
        let buffer = self.print.buffer as f64;
        let inner_width = (map_width - 2.0 * buffer).max(1.0);
        let inner_height = (map_height - 2.0 * buffer).max(1.0);

        let mut units_per_pixel = (limit.width() / inner_width).max(limit.height() / inner_height);
        if !units_per_pixel.is_finite() || units_per_pixel <= 0.0 {
            units_per_pixel = 1.0;
        }

        let (center_x, center_y) = limit.center();
        let half_width = map_width * units_per_pixel / 2.0;
        let half_height = map_height * units_per_pixel / 2.0;
        BoundingBox::new(
            center_x - half_width,
            center_y - half_height,
            center_x + half_width,
            center_y + half_height,
        )
    }
}

impl MunicipalityLookup for OerebConfig {
    fn municipality_by_fosnr(&self, fosnr: u32) -> Result<Municipality> {
        self.municipalities
            .iter()
            .find(|municipality| municipality.fosnr == fosnr)
            .cloned()
            .ok_or(OerebError::MunicipalityNotFound { fosnr })
    }
}

impl Validate for OerebConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
