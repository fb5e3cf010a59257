use crate::domain::model::{ExtractRecord, Theme};
use std::collections::HashSet;

/// Moves every concerned theme without an intersecting restriction to the not concerned
/// themes.
///
/// Concerned themes keep their relative order. Configured themes take their `extract_index`
/// from `configured_themes`, and a configured theme missing from both lists is added as not
/// concerned. The not concerned themes are ordered by `extract_index` afterwards, since moved
/// themes would otherwise end up at the back.
pub fn reclassify_themes(
    extract: &mut ExtractRecord,
    inside_theme_codes: &HashSet<&str>,
    configured_themes: &[Theme],
) {
    let (mut concerned, moved): (Vec<Theme>, Vec<Theme>) =
        std::mem::take(&mut extract.concerned_theme)
            .into_iter()
            .partition(|theme| inside_theme_codes.contains(theme.code.as_str()));

    for theme in &moved {
        tracing::debug!(
            "moving theme {} from concerned to not concerned themes",
            theme.code
        );
    }

    let concerned_codes: HashSet<String> =
        concerned.iter().map(|theme| theme.code.clone()).collect();
    let mut seen = HashSet::new();
    let mut not_concerned: Vec<Theme> = std::mem::take(&mut extract.not_concerned_theme)
        .into_iter()
        .chain(moved)
        .filter(|theme| !concerned_codes.contains(&theme.code))
        .filter(|theme| seen.insert(theme.code.clone()))
        .collect();

    for configured in configured_themes {
        if concerned_codes.contains(&configured.code) || seen.contains(&configured.code) {
            continue;
        }
        tracing::debug!(
            "adding configured theme {} to the not concerned themes",
            configured.code
        );
        not_concerned.push(configured.clone());
    }
    for theme in concerned.iter_mut().chain(not_concerned.iter_mut()) {
        if let Some(configured) = configured_themes.iter().find(|c| c.code == theme.code) {
            theme.extract_index = configured.extract_index;
        }
    }
    not_concerned.sort_by_key(|theme| theme.extract_index);

    extract.concerned_theme = concerned;
    extract.not_concerned_theme = not_concerned;
}
