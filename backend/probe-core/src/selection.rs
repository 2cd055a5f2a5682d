//! Eligibility filtering and priority-based model selection.
//!
//! Pure functions over a fetched catalog and a [`SelectionPolicy`]; no
//! network involvement, so this is where the heuristics are unit-tested.

use crate::policy::SelectionPolicy;

use common::{ModelDescriptor, SelectedModel};

/// Capability tag a model must advertise to be probed with generation.
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

/// Filter the catalog down to models eligible for the generation probe.
///
/// Eligible = advertises content generation AND does not hit the
/// deprecated-name denylist. Catalog order is preserved.
pub fn eligible_models<'a>(
    catalog: &'a [ModelDescriptor],
    policy: &SelectionPolicy,
) -> Vec<&'a ModelDescriptor> {
    catalog
        .iter()
        .filter(|model| {
            model
                .supported_generation_methods
                .iter()
                .any(|method| method == GENERATE_CONTENT_METHOD)
                && !policy.is_denylisted(&model.name)
        })
        .collect()
}

/// Choose the single model to probe generation with.
///
/// Priority substrings are checked in policy order; the first eligible
/// model containing the current substring (case-insensitive) wins. If
/// no substring matches, the first eligible model in catalog order is
/// the fallback. An empty eligible set yields `None`.
pub fn select_model<'a>(
    eligible: &[&'a ModelDescriptor],
    policy: &SelectionPolicy,
) -> Option<&'a ModelDescriptor> {
    for preferred in &policy.priority {
        let preferred_lower = preferred.to_lowercase();
        if let Some(model) = eligible
            .iter()
            .find(|model| model.name.to_lowercase().contains(&preferred_lower))
            .copied()
        {
            return Some(model);
        }
    }

    eligible.first().copied()
}

/// Snapshot the chosen model for the report, recording popularity.
pub fn to_selected(model: &ModelDescriptor, policy: &SelectionPolicy) -> SelectedModel {
    SelectedModel {
        name: model.name.clone(),
        display_name: if model.display_name.is_empty() {
            model.short_name().to_string()
        } else {
            model.display_name.clone()
        },
        description: if model.description.is_empty() {
            String::from("No description available")
        } else {
            model.description.clone()
        },
        is_popular: policy.is_popular(&model.name),
    }
}
