//! Interviewer dashboard — pure read/derive view over the profile list.
//! Filtering and ordering never mutate stored data.

pub mod handlers;

use std::cmp::Ordering;

use serde::Deserialize;

use crate::models::candidate::CandidateProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    #[default]
    Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Case-insensitive name substring filter. Profiles without a name only
/// match an empty search term.
pub fn filter_by_name<'a>(
    profiles: &'a [CandidateProfile],
    search: &str,
) -> Vec<&'a CandidateProfile> {
    let needle = search.to_lowercase();
    profiles
        .iter()
        .filter(|p| {
            p.details
                .name
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
        })
        .collect()
}

/// Sorts by name or score. Profiles with no score sort after all scored
/// profiles in BOTH directions; the direction only orders the scored ones.
pub fn sort_profiles(profiles: &mut [&CandidateProfile], key: SortKey, order: SortOrder) {
    profiles.sort_by(|a, b| compare(a, b, key, order));
}

fn compare(a: &CandidateProfile, b: &CandidateProfile, key: SortKey, order: SortOrder) -> Ordering {
    let ordering = match key {
        SortKey::Name => {
            let a_name = a.details.name.as_deref().unwrap_or("").to_lowercase();
            let b_name = b.details.name.as_deref().unwrap_or("").to_lowercase();
            a_name.cmp(&b_name)
        }
        SortKey::Score => match (a.final_score, b.final_score) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(x), Some(y)) => x.cmp(&y),
        },
    };
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::CandidateDetails;

    fn profile(name: Option<&str>, score: Option<u32>) -> CandidateProfile {
        CandidateProfile::new(
            CandidateDetails {
                name: name.map(str::to_string),
                email: None,
                phone: None,
            },
            vec![],
            score,
            "summary".to_string(),
        )
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let profiles = vec![
            profile(Some("Ada Lovelace"), Some(90)),
            profile(Some("Grace Hopper"), Some(85)),
            profile(None, Some(50)),
        ];
        let hits = filter_by_name(&profiles, "lOvE");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].details.name.as_deref(), Some("Ada Lovelace"));
    }

    #[test]
    fn test_empty_search_matches_everyone() {
        let profiles = vec![profile(Some("Ada"), None), profile(None, Some(10))];
        assert_eq!(filter_by_name(&profiles, "").len(), 2);
    }

    #[test]
    fn test_score_sort_desc_puts_nulls_last() {
        let profiles = vec![
            profile(Some("a"), None),
            profile(Some("b"), Some(40)),
            profile(Some("c"), Some(90)),
        ];
        let mut refs: Vec<&CandidateProfile> = profiles.iter().collect();
        sort_profiles(&mut refs, SortKey::Score, SortOrder::Desc);
        let scores: Vec<Option<u32>> = refs.iter().map(|p| p.final_score).collect();
        assert_eq!(scores, vec![Some(90), Some(40), None]);
    }

    #[test]
    fn test_score_sort_asc_still_puts_nulls_last() {
        let profiles = vec![
            profile(Some("a"), None),
            profile(Some("b"), Some(40)),
            profile(Some("c"), Some(90)),
        ];
        let mut refs: Vec<&CandidateProfile> = profiles.iter().collect();
        sort_profiles(&mut refs, SortKey::Score, SortOrder::Asc);
        let scores: Vec<Option<u32>> = refs.iter().map(|p| p.final_score).collect();
        assert_eq!(scores, vec![Some(40), Some(90), None]);
    }

    #[test]
    fn test_name_sort_both_directions() {
        let profiles = vec![
            profile(Some("grace"), None),
            profile(Some("Ada"), None),
            profile(None, None),
        ];
        let mut refs: Vec<&CandidateProfile> = profiles.iter().collect();

        sort_profiles(&mut refs, SortKey::Name, SortOrder::Asc);
        let names: Vec<Option<&str>> = refs.iter().map(|p| p.details.name.as_deref()).collect();
        assert_eq!(names, vec![None, Some("Ada"), Some("grace")]);

        sort_profiles(&mut refs, SortKey::Name, SortOrder::Desc);
        let names: Vec<Option<&str>> = refs.iter().map(|p| p.details.name.as_deref()).collect();
        assert_eq!(names, vec![Some("grace"), Some("Ada"), None]);
    }

    #[test]
    fn test_sort_key_defaults_match_dashboard_initial_view() {
        // The dashboard opens sorted by score, descending.
        assert_eq!(SortKey::default(), SortKey::Score);
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }
}
