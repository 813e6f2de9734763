//! The filter/sort pipeline.
//!
//! [`compute_visible_venues`] turns the full dataset plus a [`FilterState`]
//! into the ordered list that both the map and the list render. It is a pure
//! function: same inputs, same output, and the dataset is only ever borrowed.
//!
//! # Stage Order
//!
//! 1. **Cuisine**: keep venues in the selected taxonomy bucket
//! 2. **Price**: keep venues whose tier is in the allowed set
//! 3. **Promo**: keep promoted venues
//! 4. **Sub-filter**: near-me and student-approved reorder, budget and
//!    certified narrow
//! 5. **Sort**: apply the selected ordering
//! 6. **Search**: keep venues whose name or cuisine contains the query. The
//!    query is matched as typed, surrounding whitespace included; only the
//!    empty string skips this stage
//!
//! Every sort is stable, so ties keep the order produced by earlier stages
//! (ultimately dataset order).

use super::state::{CuisineFilter, FilterState, SortOption, SubFilter};
use super::taxonomy::CuisineTaxonomy;
use crate::domain::distance::distance_sort_key;
use crate::domain::{Venue, VenueStatus};

/// Positional stride used when the dataset carries no promotion flags.
const PROMO_STRIDE: usize = 3;

/// Computes the visible venues using the built-in cuisine table.
///
/// # Example
///
/// ```
/// use gfradar::filter::{compute_visible_venues, FilterState, SortOption};
/// use gfradar::storage::{BuiltinVenues, VenueSource};
///
/// let venues = BuiltinVenues::new().fetch_venues()?;
/// let mut state = FilterState::default();
/// state.set_sort(SortOption::Rating);
///
/// let visible = compute_visible_venues(&venues, &state);
/// assert_eq!(visible.len(), venues.len());
/// assert!(visible.windows(2).all(|w| w[0].rating >= w[1].rating));
/// # Ok::<(), gfradar::domain::GfRadarError>(())
/// ```
#[must_use]
pub fn compute_visible_venues<'a>(all: &'a [Venue], state: &FilterState) -> Vec<&'a Venue> {
    compute_visible_venues_with(all, state, CuisineTaxonomy::builtin())
}

/// Computes the visible venues against a caller-supplied cuisine table.
#[must_use]
pub fn compute_visible_venues_with<'a>(
    all: &'a [Venue],
    state: &FilterState,
    taxonomy: &CuisineTaxonomy,
) -> Vec<&'a Venue> {
    let _span = tracing::debug_span!(
        "compute_visible_venues",
        total = all.len(),
        cuisine = ?state.cuisine,
        sub_filter = ?state.sub_filter,
        sort = ?state.sort,
        price_tiers = state.price_tiers.len(),
        promo_only = state.promo_only,
        query_len = state.search_query.len()
    )
    .entered();

    let mut venues: Vec<&Venue> = all.iter().collect();

    if let CuisineFilter::Tag(tag) = &state.cuisine {
        venues.retain(|v| taxonomy.matches(tag, &v.cuisine));
    }

    if !state.price_tiers.is_empty() {
        venues.retain(|v| state.price_tiers.contains(&v.price_range));
    }

    if state.promo_only {
        venues = keep_promoted(venues);
    }

    apply_sub_filter(&mut venues, state.sub_filter);
    apply_sort(&mut venues, state.sort);

    let query = state.search_query.to_lowercase();
    if !query.is_empty() {
        venues.retain(|v| v.matches_text(&query));
    }

    tracing::debug!(visible = venues.len(), "filter pipeline applied");
    venues
}

/// Keeps promoted venues.
///
/// When at least one venue in `venues` carries an explicit `has_promo` flag,
/// only venues flagged `true` survive. Otherwise every third venue by
/// position is kept as a stand-in until the dataset carries real flags.
fn keep_promoted(venues: Vec<&Venue>) -> Vec<&Venue> {
    if venues.iter().any(|v| v.has_promo.is_some()) {
        venues
            .into_iter()
            .filter(|v| v.has_promo == Some(true))
            .collect()
    } else {
        venues
            .into_iter()
            .enumerate()
            .filter(|(idx, _)| idx % PROMO_STRIDE == 0)
            .map(|(_, v)| v)
            .collect()
    }
}

fn apply_sub_filter(venues: &mut Vec<&Venue>, sub_filter: SubFilter) {
    match sub_filter {
        SubFilter::None => {}
        SubFilter::NearMe => sort_by_distance(venues),
        SubFilter::Budget => venues.retain(|v| v.price_range.is_budget()),
        SubFilter::StudentApproved => sort_by_rating(venues),
        SubFilter::CertifiedGf => venues.retain(|v| v.status == VenueStatus::Verified),
    }
}

fn apply_sort(venues: &mut [&Venue], sort: SortOption) {
    match sort {
        SortOption::Recommended => {}
        SortOption::Rating => sort_by_rating(venues),
        SortOption::Distance | SortOption::DeliveryTime => sort_by_distance(venues),
    }
}

fn sort_by_rating(venues: &mut [&Venue]) {
    venues.sort_by(|a, b| tie_safe(b.rating).total_cmp(&tie_safe(a.rating)));
}

fn sort_by_distance(venues: &mut [&Venue]) {
    let key = |v: &Venue| tie_safe(distance_sort_key(&v.distance));
    venues.sort_by(|a, b| key(a).total_cmp(&key(b)));
}

/// Folds `-0.0` into `0.0` so equal keys compare as ties under `total_cmp`.
fn tie_safe(key: f64) -> f64 {
    key + 0.0
}
