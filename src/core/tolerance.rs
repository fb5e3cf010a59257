use crate::config::toml_config::{GeometryKind, GeometryTypes, Tolerance};
use crate::domain::model::{GeometryRecord, PlrRecord};

impl PlrRecord {
    /// Trims the geometries to those covering the real estate above the tolerance and updates
    /// the computed length, area, point count and share of the real estate area.
    ///
    /// Returns `true` if any geometry is left.
    pub fn calculate(
        &mut self,
        land_registry_area: f64,
        geometry_types: &GeometryTypes,
        tolerance: &Tolerance,
    ) -> bool {
        let mut length = 0.0;
        let mut area = 0.0;
        let mut n_points = 0;

        let geometries = std::mem::take(&mut self.geometries);
        let mut kept = Vec::with_capacity(geometries.len());
        for geometry in geometries {
            let Some(kind) = geometry_types.kind_of(&geometry.geometry_type) else {
                tracing::warn!(
                    "Dropping geometry of unknown type {} from restriction {}",
                    geometry.geometry_type,
                    self.type_code
                );
                continue;
            };
            if !is_relevant(&geometry, kind, tolerance) {
                continue;
            }
            let measure = geometry.measure.unwrap_or(0.0);
            match kind {
                GeometryKind::Point => n_points += 1,
                GeometryKind::Line => length += measure,
                GeometryKind::Polygon => area += measure,
            }
            kept.push(geometry);
        }
        self.geometries = kept;

        self.length = (length > 0.0).then_some(length);
        self.area = (area > 0.0).then_some(area);
        self.n_points = (n_points > 0).then_some(n_points);
        self.part_in_percent = if area > 0.0 && land_registry_area > 0.0 {
            Some((area / land_registry_area * 1000.0).round() / 10.0)
        } else {
            None
        };

        !self.geometries.is_empty()
    }
}

fn is_relevant(geometry: &GeometryRecord, kind: GeometryKind, tolerance: &Tolerance) -> bool {
    if !geometry.intersects {
        return false;
    }
    let measure = geometry.measure.unwrap_or(0.0);
    match kind {
        GeometryKind::Point => true,
        GeometryKind::Line => measure >= tolerance.min_length,
        GeometryKind::Polygon => measure >= tolerance.min_area,
    }
}
