use crate::domain::model::{PlrRecord, ViewServiceRegistry};
use std::collections::{BTreeMap, BTreeSet};

/// Type codes carried by the intersecting restrictions, per theme code and view service id.
type TypeCodesByService = BTreeMap<String, BTreeMap<String, BTreeSet<String>>>;

/// Prunes the legends of the view services used by the intersecting restrictions so that they
/// only list the "other legend": entries of restrictions visible in the map but not already
/// reported for the real estate.
///
/// A legend entry is removed when an intersecting restriction of the same theme and view
/// service carries its type code. Restrictions outside the real estate never cause a removal,
/// so their entries stay visible. The legend lives once in `view_services`, every restriction
/// of the same theme and view service sees the pruned list. Pruning an already pruned legend
/// removes nothing.
pub fn resolve_legend_entries(
    inside_plrs: Vec<PlrRecord>,
    outside_plrs: &[PlrRecord],
    view_services: &mut ViewServiceRegistry,
) -> Vec<PlrRecord> {
    let mut type_codes_to_remove = TypeCodesByService::new();
    for plr in &inside_plrs {
        type_codes_to_remove
            .entry(plr.theme.code.clone())
            .or_default()
            .entry(plr.view_service_id.clone())
            .or_default()
            .insert(plr.type_code.clone());
    }
    tracing::debug!(
        "resolving legends of {} view service group(s), {} restriction(s) only in the map extent",
        type_codes_to_remove.values().map(BTreeMap::len).sum::<usize>(),
        outside_plrs.len()
    );

    for (theme_code, services) in &type_codes_to_remove {
        for (view_service_id, type_codes) in services {
            let Some(view_service) = view_services.get_mut(theme_code, view_service_id) else {
                tracing::debug!(
                    "no view service {} for theme {}, legend left as is",
                    view_service_id,
                    theme_code
                );
                continue;
            };
            if view_service.legends.is_empty() {
                continue;
            }

            let before = view_service.legends.len();
            view_service
                .legends
                .retain(|entry| !type_codes.contains(&entry.type_code));
            tracing::debug!(
                "view service {} of theme {}: {} legend entries already shown on the real estate removed",
                view_service_id,
                theme_code,
                before - view_service.legends.len()
            );
        }
    }

    inside_plrs
}
