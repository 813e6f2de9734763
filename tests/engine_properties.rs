//! Properties and scenarios for the filter/sort pipeline.

use gfradar::domain::distance::distance_sort_key;
use gfradar::domain::{PriceTier, Venue, VenueStatus};
use gfradar::filter::{compute_visible_venues, CuisineFilter, FilterState, SortOption, SubFilter};
use gfradar::storage::{decode_dataset, BuiltinVenues, VenueSource};
use proptest::prelude::*;
use proptest::sample::select;

fn venue(id: u32, status: VenueStatus, tier: u8, rating: f64, distance: &str, cuisine: &str) -> Venue {
    Venue {
        id,
        name: format!("Venue {id}"),
        status,
        distance: distance.to_string(),
        price_range: PriceTier::new(tier).unwrap(),
        cuisine: cuisine.to_string(),
        rating,
        review_count: 10,
        gf_option: "GF menu".to_string(),
        image: String::new(),
        lat: 1.35,
        lng: 103.68,
        has_promo: None,
    }
}

fn ids(venues: &[&Venue]) -> Vec<u32> {
    venues.iter().map(|v| v.id).collect()
}

fn arb_status() -> impl Strategy<Value = VenueStatus> {
    prop_oneof![
        Just(VenueStatus::Verified),
        Just(VenueStatus::Check),
        Just(VenueStatus::Unknown),
    ]
}

fn arb_distance() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..2000).prop_map(|m| format!("{m}m")),
        (0u32..100).prop_map(|d| format!("{}.{}km", d / 10, d % 10)),
        Just("abc".to_string()),
        Just(String::new()),
    ]
}

fn arb_cuisine() -> impl Strategy<Value = String> {
    select(vec![
        "Healthy Drinks",
        "Coffee & Snacks",
        "Bakery",
        "Noodles",
        "Local Hawker",
        "Burgers",
        "Mixed",
        "Modern European",
    ])
    .prop_map(String::from)
}

prop_compose! {
    fn arb_venue()(
        id in any::<u32>(),
        status in arb_status(),
        tier in 1u8..=4,
        rating in 0.0f64..=5.0,
        distance in arb_distance(),
        cuisine in arb_cuisine(),
        has_promo in proptest::option::of(any::<bool>()),
    ) -> Venue {
        Venue { has_promo, ..venue(id, status, tier, rating, &distance, &cuisine) }
    }
}

fn arb_venues() -> impl Strategy<Value = Vec<Venue>> {
    proptest::collection::vec(arb_venue(), 0..24)
}

fn arb_state() -> impl Strategy<Value = FilterState> {
    (
        prop_oneof![
            Just(CuisineFilter::All),
            select(vec!["drinks", "bakery", "local", "burgers", "breakfast", "noodles"]).prop_map(CuisineFilter::tag),
        ],
        select(vec![
            SubFilter::None,
            SubFilter::NearMe,
            SubFilter::Budget,
            SubFilter::StudentApproved,
            SubFilter::CertifiedGf,
        ]),
        select(SortOption::ALL.to_vec()),
        proptest::collection::btree_set((1u8..=4).prop_map(|t| PriceTier::new(t).unwrap()), 0..3),
        any::<bool>(),
        select(vec!["", "o", "bowl", "coffee ", "zzz"]),
    )
        .prop_map(|(cuisine, sub_filter, sort, price_tiers, promo_only, query)| FilterState {
            search_query: query.to_string(),
            cuisine,
            sub_filter,
            sort,
            price_tiers,
            promo_only,
        })
}

proptest! {
    #[test]
    fn prop_same_inputs_same_output(venues in arb_venues(), state in arb_state()) {
        let first = ids(&compute_visible_venues(&venues, &state));
        let second = ids(&compute_visible_venues(&venues, &state));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_output_is_subset_of_input(venues in arb_venues(), state in arb_state()) {
        let visible = compute_visible_venues(&venues, &state);
        prop_assert!(visible.len() <= venues.len());
        for v in visible {
            prop_assert!(venues.iter().any(|candidate| std::ptr::eq(candidate, v)));
        }
    }

    #[test]
    fn prop_price_membership(venues in arb_venues(), mut state in arb_state()) {
        let mid = PriceTier::new(2).unwrap();
        state.price_tiers = [mid].into_iter().collect();
        for v in compute_visible_venues(&venues, &state) {
            prop_assert_eq!(v.price_range, mid);
        }
    }

    #[test]
    fn prop_rating_sort_is_descending(venues in arb_venues(), mut state in arb_state()) {
        state.sort = SortOption::Rating;
        let visible = compute_visible_venues(&venues, &state);
        for pair in visible.windows(2) {
            prop_assert!(pair[0].rating >= pair[1].rating);
        }
    }

    #[test]
    fn prop_distance_sort_is_ascending(venues in arb_venues(), mut state in arb_state()) {
        state.sort = SortOption::Distance;
        let visible = compute_visible_venues(&venues, &state);
        for pair in visible.windows(2) {
            prop_assert!(distance_sort_key(&pair[0].distance) <= distance_sort_key(&pair[1].distance));
        }
    }

    #[test]
    fn prop_cuisine_double_toggle_restores_baseline(
        venues in arb_venues(),
        state in arb_state(),
        tag in select(vec!["drinks", "bakery", "noodles"]),
    ) {
        let mut state = state;
        state.cuisine = CuisineFilter::All;
        let baseline = ids(&compute_visible_venues(&venues, &state));

        state.toggle_cuisine(CuisineFilter::tag(tag));
        state.toggle_cuisine(CuisineFilter::tag(tag));

        prop_assert_eq!(&state.cuisine, &CuisineFilter::All);
        prop_assert_eq!(ids(&compute_visible_venues(&venues, &state)), baseline);
    }

    #[test]
    fn prop_sub_filter_double_toggle_restores_baseline(venues in arb_venues(), state in arb_state()) {
        let mut state = state;
        state.sub_filter = SubFilter::None;
        let baseline = ids(&compute_visible_venues(&venues, &state));

        state.toggle_sub_filter(SubFilter::CertifiedGf);
        state.toggle_sub_filter(SubFilter::CertifiedGf);

        prop_assert_eq!(ids(&compute_visible_venues(&venues, &state)), baseline);
    }

    #[test]
    fn prop_empty_dataset_gives_empty_output(state in arb_state()) {
        prop_assert!(compute_visible_venues(&[], &state).is_empty());
    }
}

#[test]
fn rating_sort_scenario() {
    let venues = vec![
        venue(1, VenueStatus::Verified, 1, 3.0, "100m", "Mixed"),
        venue(2, VenueStatus::Verified, 2, 5.0, "200m", "Mixed"),
        venue(3, VenueStatus::Verified, 3, 4.0, "300m", "Mixed"),
    ];
    let state = FilterState {
        sort: SortOption::Rating,
        ..FilterState::default()
    };

    let ratings: Vec<f64> = compute_visible_venues(&venues, &state).iter().map(|v| v.rating).collect();
    assert_eq!(ratings, vec![5.0, 4.0, 3.0]);
}

#[test]
fn certified_gf_scenario_keeps_verified_in_order() {
    let venues = vec![
        venue(1, VenueStatus::Verified, 2, 4.0, "100m", "Mixed"),
        venue(2, VenueStatus::Check, 2, 4.0, "100m", "Mixed"),
        venue(3, VenueStatus::Verified, 2, 4.0, "100m", "Mixed"),
    ];
    let state = FilterState {
        sub_filter: SubFilter::CertifiedGf,
        ..FilterState::default()
    };

    assert_eq!(ids(&compute_visible_venues(&venues, &state)), vec![1, 3]);
}

#[test]
fn search_bowl_excludes_pure_kitchen() {
    let venues = BuiltinVenues::new().fetch_venues().unwrap();
    let state = FilterState {
        search_query: "bowl".to_string(),
        ..FilterState::default()
    };

    let visible = compute_visible_venues(&venues, &state);
    assert!(!visible.is_empty());
    assert!(visible.iter().all(|v| v.name != "Pure Kitchen"));
    assert!(visible
        .iter()
        .all(|v| v.name.to_lowercase().contains("bowl") || v.cuisine.to_lowercase().contains("bowl")));
}

#[test]
fn distance_sort_is_unit_aware_with_malformed_last() {
    let venues = vec![
        venue(1, VenueStatus::Verified, 2, 4.0, "abc", "Mixed"),
        venue(2, VenueStatus::Verified, 2, 4.0, "1.2km", "Mixed"),
        venue(3, VenueStatus::Verified, 2, 4.0, "300m", "Mixed"),
    ];
    let state = FilterState {
        sort: SortOption::Distance,
        ..FilterState::default()
    };

    assert_eq!(ids(&compute_visible_venues(&venues, &state)), vec![3, 2, 1]);
}

#[test]
fn empty_query_does_not_narrow() {
    let venues = BuiltinVenues::new().fetch_venues().unwrap();
    let state = FilterState::default();
    assert_eq!(compute_visible_venues(&venues, &state).len(), venues.len());
}

#[test]
fn trailing_space_in_query_is_matched_literally() {
    let venues = BuiltinVenues::new().fetch_venues().unwrap();
    let state = FilterState {
        search_query: "campus ".to_string(),
        ..FilterState::default()
    };
    let names: Vec<&str> = compute_visible_venues(&venues, &state).iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Campus Bowl"]);

    // Every "bowl" in the dataset ends a name or is followed by "s".
    let state = FilterState {
        search_query: "bowl ".to_string(),
        ..FilterState::default()
    };
    assert!(compute_visible_venues(&venues, &state).is_empty());
}

#[test]
fn decoded_signed_zero_ratings_keep_dataset_order_under_rating_sort() {
    let venues = decode_dataset(
        r#"[
            {"id": 1, "name": "First", "status": "check", "distance": "100m", "priceRange": "$",
             "cuisine": "Mixed", "rating": -0.0, "reviewCount": 0, "gfOption": "", "image": "",
             "lat": 1.35, "lng": 103.68},
            {"id": 2, "name": "Second", "status": "check", "distance": "100m", "priceRange": "$",
             "cuisine": "Mixed", "rating": 0, "reviewCount": 0, "gfOption": "", "image": "",
             "lat": 1.35, "lng": 103.68}
        ]"#,
    )
    .unwrap();
    let mut state = FilterState::default();
    state.set_sort(SortOption::Rating);
    assert_eq!(ids(&compute_visible_venues(&venues, &state)), vec![1, 2]);
}
