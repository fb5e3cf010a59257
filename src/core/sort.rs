use crate::domain::model::{ExtractRecord, PlrRecord};
use crate::domain::ports::SortHook;
use crate::utils::error::{OerebError, Result};
use std::cmp::Ordering;

/// Names accepted by `extract.sort_within_themes_method`.
pub const SORT_HOOK_NAMES: &[&str] = &["type_code", "part_in_percent"];

pub fn resolve_sort_hook(name: &str) -> Result<SortHook> {
    match name {
        "type_code" => Ok(sort_by_type_code),
        "part_in_percent" => Ok(sort_by_part_in_percent),
        _ => Err(OerebError::UnknownSortHook {
            name: name.to_string(),
        }),
    }
}

/// Orders the restrictions by type code within each theme.
pub fn sort_by_type_code(extract: ExtractRecord) -> ExtractRecord {
    sort_within_themes(extract, |a, b| a.type_code.cmp(&b.type_code))
}

/// Puts the restrictions covering the largest share of the real estate first within each theme.
pub fn sort_by_part_in_percent(extract: ExtractRecord) -> ExtractRecord {
    sort_within_themes(extract, |a, b| {
        let a = a.part_in_percent.unwrap_or(0.0);
        let b = b.part_in_percent.unwrap_or(0.0);
        b.total_cmp(&a)
    })
}

/// Stable sort of the restrictions of each theme. Themes keep the position of their first
/// restriction.
fn sort_within_themes<F>(mut extract: ExtractRecord, compare: F) -> ExtractRecord
where
    F: Fn(&PlrRecord, &PlrRecord) -> Ordering,
{
    let restrictions = std::mem::take(&mut extract.real_estate.public_law_restrictions);

    let mut groups: Vec<(String, Vec<PlrRecord>)> = Vec::new();
    for plr in restrictions {
        match groups.iter().position(|(code, _)| *code == plr.theme.code) {
            Some(index) => groups[index].1.push(plr),
            None => groups.push((plr.theme.code.clone(), vec![plr])),
        }
    }

    extract.real_estate.public_law_restrictions = groups
        .into_iter()
        .flat_map(|(_, mut group)| {
            group.sort_by(&compare);
            group
        })
        .collect();
    extract
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{empty_extract, plr};

    fn type_codes(extract: &ExtractRecord) -> Vec<&str> {
        extract
            .real_estate
            .public_law_restrictions
            .iter()
            .map(|plr| plr.type_code.as_str())
            .collect()
    }

    #[test]
    fn test_sort_by_type_code_within_themes() {
        let mut extract = empty_extract();
        extract.real_estate.public_law_restrictions = vec![
            plr("T2", "z", "1"),
            plr("T1", "c", "1"),
            plr("T2", "a", "1"),
            plr("T1", "b", "1"),
        ];

        let extract = sort_by_type_code(extract);

        assert_eq!(type_codes(&extract), vec!["a", "z", "b", "c"]);
    }

    #[test]
    fn test_sort_by_part_in_percent_descending() {
        let mut extract = empty_extract();
        let mut small = plr("T1", "small", "1");
        small.part_in_percent = Some(2.5);
        let mut large = plr("T1", "large", "1");
        large.part_in_percent = Some(80.0);
        let none = plr("T1", "none", "1");
        extract.real_estate.public_law_restrictions = vec![small, none, large];

        let extract = sort_by_part_in_percent(extract);

        assert_eq!(type_codes(&extract), vec!["large", "small", "none"]);
    }

    #[test]
    fn test_resolve_sort_hook() {
        for name in SORT_HOOK_NAMES {
            assert!(resolve_sort_hook(name).is_ok());
        }
        assert!(matches!(
            resolve_sort_hook("alphabetical"),
            Err(OerebError::UnknownSortHook { .. })
        ));
    }
}
