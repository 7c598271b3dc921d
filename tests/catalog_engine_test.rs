use travelco::core::filter::Dimension;
use travelco::domain::model::CatalogItem;
use travelco::{Catalog, CatalogView, FilterSchema, FilterState, SortKey};

fn ids(items: &[&CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

fn destinations(state: &FilterState) -> Vec<String> {
    let catalog = Catalog::builtin().unwrap();
    let schema = FilterSchema::destinations();
    ids(&CatalogView::new(&schema).apply(catalog.destinations(), state))
}

fn services(state: &FilterState) -> Vec<String> {
    let catalog = Catalog::builtin().unwrap();
    let schema = FilterSchema::services();
    ids(&CatalogView::new(&schema).apply(catalog.services(), state))
}

#[test]
fn test_destinations_default_order_is_popular_then_rating() {
    assert_eq!(destinations(&FilterState::new()), vec!["1", "2", "3"]);
}

#[test]
fn test_destinations_sort_keys() {
    let mut state = FilterState::new();

    state.set_sort(SortKey::PriceLow);
    assert_eq!(destinations(&state), vec!["2", "1", "3"]);

    state.set_sort(SortKey::PriceHigh);
    assert_eq!(destinations(&state), vec!["3", "1", "2"]);

    state.set_sort(SortKey::Rating);
    assert_eq!(destinations(&state), vec!["3", "1", "2"]);

    state.set_sort(SortKey::Duration);
    assert_eq!(destinations(&state), vec!["1", "3", "2"]);
}

#[test]
fn test_destinations_buckets() {
    let schema = FilterSchema::destinations();
    let mut state = FilterState::new();

    state.select(&schema, Dimension::PriceRange, "Under $1000").unwrap();
    assert_eq!(destinations(&state), vec!["2"]);

    state.select(&schema, Dimension::PriceRange, "Over $2000").unwrap();
    assert_eq!(destinations(&state), vec!["3"]);

    state.clear_all();
    state.select(&schema, Dimension::Duration, "8-10 days").unwrap();
    assert_eq!(destinations(&state), vec!["2", "3"]);

    state.select(&schema, Dimension::Rating, "4.8+").unwrap();
    assert_eq!(destinations(&state), vec!["3"]);
}

#[test]
fn test_destinations_query_searches_description() {
    let mut state = FilterState::new();
    state.set_query("ISLAND");
    assert_eq!(destinations(&state), vec!["1", "2"]);

    state.set_query("matterhorn");
    assert!(destinations(&state).is_empty());
}

#[test]
fn test_services_use_midpoint_for_price_buckets() {
    let schema = FilterSchema::services();
    let mut state = FilterState::new();

    state
        .select(&schema, Dimension::PriceRange, "$1000 - $2000")
        .unwrap();
    assert_eq!(services(&state), vec!["2", "5"]);

    state.select(&schema, Dimension::PriceRange, "All Prices").unwrap();
    assert_eq!(services(&state).len(), 6);
    assert!(!state.has_active_filters());
}

#[test]
fn test_services_category_difficulty_and_tags() {
    let schema = FilterSchema::services();
    let mut state = FilterState::new();

    state.select(&schema, Dimension::Difficulty, "Easy").unwrap();
    assert_eq!(services(&state), vec!["1", "2", "3", "6"]);

    state
        .select(&schema, Dimension::Category, "Family Packages")
        .unwrap();
    assert_eq!(services(&state), vec!["2"]);

    state.clear_all();
    state.set_query("luxury").set_sort(SortKey::PriceLow);
    assert_eq!(services(&state), vec!["3", "1"]);
}

#[test]
fn test_services_popular_sort_is_stable() {
    assert_eq!(services(&FilterState::new()), vec!["1", "2", "5", "3", "6", "4"]);

    let mut state = FilterState::new();
    state.set_sort(SortKey::PriceLow);
    assert_eq!(services(&state), vec!["2", "5", "6", "4", "3", "1"]);
}

#[test]
fn test_flight_destination_picker_has_no_rating_filter() {
    let schema = FilterSchema::flight_destinations();
    let mut state = FilterState::new();

    assert!(state.select(&schema, Dimension::Rating, "4.5+").is_err());
    state.select(&schema, Dimension::Duration, "5-7 days").unwrap();

    let catalog = Catalog::builtin().unwrap();
    let items = CatalogView::new(&schema).apply(catalog.destinations(), &state);
    assert_eq!(ids(&items), vec!["1"]);
}

#[test]
fn test_clear_all_restores_default_view() {
    let schema = FilterSchema::services();
    let baseline = services(&FilterState::new());

    let mut state = FilterState::new();
    state
        .set_query("spa")
        .set_sort(SortKey::Duration)
        .select(&schema, Dimension::Category, "Wellness Tours")
        .unwrap();
    assert_eq!(services(&state), vec!["6"]);

    state.clear_all();
    assert_eq!(services(&state), baseline);
}
