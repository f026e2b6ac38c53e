use delivery_tracker::catalog::{Catalog, StoreId};
use delivery_tracker::directions::{MockDirections, RouteFetchError};
use delivery_tracker::model::{Address, DeparturePolicy, RouteDescription, TravelMode, Waypoint};
use delivery_tracker::order::OrderStatus;
use delivery_tracker::route_cache::{MemoryStore, RouteCache};
use delivery_tracker::session::{DeliverySession, Generation, SessionError};
use delivery_tracker::tracking::Progress;

/// Decodes to (0,0), (1,1), (2,2).
const DIAGONAL: &str = "??_ibE_ibE_ibE_ibE";

type TestSession = DeliverySession<MockDirections, MemoryStore>;

fn session(mock: &MockDirections, store: &MemoryStore) -> TestSession {
    let cache = RouteCache::new(
        mock.clone(),
        store.clone(),
        TravelMode::Driving,
        DeparturePolicy::Now,
    );
    DeliverySession::new(Catalog::default(), cache)
}

fn burger_shop() -> StoreId {
    StoreId::from("Hamburgueria Top")
}

/// Selects Hamburgueria Top for "Rua X" over the diagonal route and confirms a burger.
async fn confirmed_delivery(mock: &MockDirections, store: &MemoryStore) -> (TestSession, Generation) {
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    let mut session = session(mock, store);
    let selection = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .expect("Failed to select store");
    session
        .confirm_order("🍔 Hambúrguer")
        .expect("Failed to confirm order");
    (session, selection.generation)
}

#[tokio::test]
async fn test_three_ticks_reach_the_end_and_invalidate_once() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    let (mut session, generation) = confirmed_delivery(&mock, &store).await;
    let clears_before = store.clears();
    assert!(store.current().is_some());

    let mut cursors = Vec::new();
    for _ in 0..3 {
        cursors.push(session.tick(generation).await.unwrap().cursor);
    }

    assert_eq!(cursors, vec![1, 2, 2]);
    assert_eq!(store.clears(), clears_before + 1);
    assert!(store.current().is_none());
}

#[tokio::test]
async fn test_ticks_after_arrival_change_nothing() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    let (mut session, generation) = confirmed_delivery(&mock, &store).await;

    let mut frames = Vec::new();
    for _ in 0..8 {
        frames.push(session.tick(generation).await.unwrap());
    }
    let arrival = &frames[2];
    assert_eq!(arrival.progress, Progress::JustArrived);
    assert_eq!(arrival.status, OrderStatus::Delivered);
    let clears_after_arrival = store.clears();

    for frame in &frames[3..] {
        assert_eq!(frame.position, arrival.position);
        assert_eq!(frame.traveled, arrival.traveled);
        assert_eq!(frame.progress, Progress::Arrived);
        assert_eq!(frame.status, OrderStatus::Delivered);
    }
    assert_eq!(store.clears(), clears_after_arrival);
    assert_eq!(
        arrival.polyline(),
        vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]
    );
}

#[tokio::test]
async fn test_identical_reselection_reuses_cached_route() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    let mut session = session(&mock, &store);

    let first = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();
    let second = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();

    assert_eq!(mock.calls(), 1);
    assert_eq!(first.waypoints, second.waypoints);
    assert_eq!(second.generation, first.generation.next());
    let request = &mock.requests()[0];
    assert_eq!(
        request.origin,
        Address::from("Rua José Raimundo de Freitas, Juiz de Fora, MG")
    );
    assert_eq!(request.destination, Address::from("Rua X"));
    mock.verify();
}

#[tokio::test]
async fn test_new_pair_invalidates_before_fetching() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    mock.expect_directions()
        .return_ok(RouteDescription::single("??_ibE_ibE"));
    let mut session = session(&mock, &store);

    session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();
    let clears = store.clears();
    let selection = session
        .select_store(&burger_shop(), &Address::from("Rua Y"))
        .await
        .unwrap();

    assert_eq!(mock.calls(), 2);
    assert_eq!(store.clears(), clears + 1);
    assert_eq!(selection.waypoints, 2);
    assert_eq!(store.current().unwrap().destination, Address::from("Rua Y"));
}

#[tokio::test]
async fn test_confirm_without_item_is_rejected() {
    let mock = MockDirections::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    let mut session = session(&mock, &MemoryStore::new());
    let selection = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();

    let err = session.confirm_order("").unwrap_err();

    assert!(matches!(err, SessionError::InvalidSelection(_)));
    let order = session.snapshot().order.unwrap();
    assert!(!order.confirmed);
    assert_eq!(order.item, None);

    // Still gated: the courier does not move.
    let frame = session.tick(selection.generation).await.unwrap();
    assert_eq!(frame.cursor, 0);
}

#[tokio::test]
async fn test_confirm_before_selection_is_rejected() {
    let mut session = session(&MockDirections::new(), &MemoryStore::new());

    let err = session.confirm_order("🍔 Hambúrguer").unwrap_err();

    assert!(matches!(err, SessionError::InvalidSelection(_)));
}

#[tokio::test]
async fn test_empty_geometry_reports_no_position() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single(""));
    let mut session = session(&mock, &store);

    let selection = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();
    session.confirm_order("🍟 Batata Frita").unwrap();

    assert_eq!(selection.waypoints, 0);
    assert!(store.current().is_none());
    for _ in 0..3 {
        let err = session.tick(selection.generation).await.unwrap_err();
        assert!(matches!(err, SessionError::EmptyRoute));
    }
}

#[tokio::test]
async fn test_malformed_geometry_is_refetched_on_reselection() {
    let mock = MockDirections::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single("~"));
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    let mut session = session(&mock, &MemoryStore::new());

    let broken = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();
    let fixed = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();

    assert_eq!(broken.waypoints, 0);
    assert_eq!(fixed.waypoints, 3);
    assert_eq!(mock.calls(), 2);
}

#[tokio::test]
async fn test_unconfirmed_ticks_never_advance() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    let mut session = session(&mock, &store);
    let selection = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();
    let clears = store.clears();

    for _ in 0..10 {
        let frame = session.tick(selection.generation).await.unwrap();
        assert_eq!(frame.cursor, 0);
        assert_eq!(frame.progress, Progress::AwaitingConfirmation);
        assert_eq!(frame.position, Waypoint::new(0.0, 0.0));
    }
    assert_eq!(store.clears(), clears);
    assert!(store.current().is_some());
}

#[tokio::test]
async fn test_ticks_for_replaced_selection_are_stale() {
    let mock = MockDirections::new();
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    mock.expect_directions()
        .return_ok(RouteDescription::single(DIAGONAL));
    let mut session = session(&mock, &MemoryStore::new());

    let old = session
        .select_store(&burger_shop(), &Address::from("Rua X"))
        .await
        .unwrap();
    let new = session
        .select_store(&StoreId::from("Pizza Express"), &Address::from("Rua X"))
        .await
        .unwrap();
    session.confirm_order("🍕 Pizza").unwrap();

    let err = session.tick(old.generation).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::StaleTick { requested, current }
            if requested == old.generation && current == new.generation
    ));
    assert_eq!(session.snapshot().position, Waypoint::new(0.0, 0.0));
    assert_eq!(session.tick(new.generation).await.unwrap().cursor, 1);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_delivery() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    let (mut session, generation) = confirmed_delivery(&mock, &store).await;
    session.tick(generation).await.unwrap();
    mock.expect_directions().return_err(RouteFetchError::Provider {
        status: "NOT_FOUND".into(),
        message: None,
    });

    let err = session
        .select_store(&burger_shop(), &Address::from("Endereço que não existe"))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::RouteFetch(_)));
    assert!(store.current().is_none());
    assert_eq!(session.generation(), generation);
    let frame = session.tick(generation).await.unwrap();
    assert_eq!(frame.cursor, 2);
    assert_eq!(session.menu().len(), 8);
}

#[tokio::test]
async fn test_reconfirming_after_delivery_restarts_tracking() {
    let mock = MockDirections::new();
    let store = MemoryStore::new();
    let (mut session, generation) = confirmed_delivery(&mock, &store).await;
    for _ in 0..3 {
        session.tick(generation).await.unwrap();
    }
    let clears = store.clears();

    let snapshot = session.confirm_order("🍩 Donuts").unwrap();
    assert_eq!(snapshot.label, "🍩 Donuts requested! 📥 Order received");
    assert_eq!(snapshot.position, Waypoint::new(0.0, 0.0));

    let cursors: Vec<_> = [
        session.tick(generation).await.unwrap(),
        session.tick(generation).await.unwrap(),
        session.tick(generation).await.unwrap(),
    ]
    .iter()
    .map(|f| (f.cursor, f.status))
    .collect();

    assert_eq!(
        cursors,
        vec![
            (1, OrderStatus::Received),
            (2, OrderStatus::Received),
            (2, OrderStatus::Delivered),
        ]
    );
    assert_eq!(store.clears(), clears + 1);
}
