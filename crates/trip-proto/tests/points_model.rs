use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use trip_proto::{
    FilterType, ModelError, PointChange, PointId, PointsModel, SortField, TripData, UpdateType,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("trip.json")
}

fn load_model() -> PointsModel {
    let data = TripData::load(&fixture_path()).expect("fixture should parse");
    PointsModel::new(data).expect("fixture ids are unique")
}

#[test]
fn duplicate_point_ids_are_rejected() {
    let point = |price: u32| {
        format!(
            r#"{{"id": "p", "type": "bus", "date_from": "2026-03-18T10:00:00Z",
                "date_to": "2026-03-18T11:00:00Z", "base_price": {price}, "destination": "ams"}}"#
        )
    };
    let json = format!(r#"{{"points": [{}, {}]}}"#, point(10), point(20));
    let data = TripData::from_json(&json).expect("document parses");
    assert_eq!(data.points.len(), 2);

    match PointsModel::new(data) {
        Err(ModelError::DuplicatePoint(id)) => assert_eq!(id.as_str(), "p"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("duplicate ids accepted"),
    }
}

#[test]
fn fixture_loads_reference_data() {
    let model = load_model();
    assert_eq!(model.len(), 5);
    assert_eq!(model.destinations().len(), 3);
    assert_eq!(model.offers().len(), 4);
}

#[test]
fn sort_fields_order_fixture() {
    let model = load_model();

    let mut by_price = model.points();
    SortField::Price.apply(&mut by_price);
    assert!(by_price
        .windows(2)
        .all(|w| w[0].base_price <= w[1].base_price));
    // Equal prices keep model order.
    let drive = by_price
        .iter()
        .position(|p| p.id.as_str() == "pt-chamonix-drive")
        .unwrap();
    assert_eq!(by_price[drive - 1].id.as_str(), "pt-chamonix-flight");

    let mut by_time = model.points();
    SortField::Time.apply(&mut by_time);
    assert!(by_time.windows(2).all(|w| w[0].date_from <= w[1].date_from));

    let mut by_day = model.points();
    SortField::Day.apply(&mut by_day);
    assert_eq!(by_day, model.points());
}

#[test]
fn mutations_notify_in_order() {
    let model = load_model();
    let log: Rc<RefCell<Vec<(UpdateType, &'static str, PointId)>>> = Rc::default();
    let sink = Rc::clone(&log);
    model.add_observer(move |update, change| {
        let kind = match change {
            PointChange::Updated(_) => "updated",
            PointChange::Added(_) => "added",
            PointChange::Deleted(_) => "deleted",
        };
        sink.borrow_mut().push((update, kind, change.point().id.clone()));
        Ok(())
    });

    let mut point = model.points()[0].clone();
    point.is_favorite = !point.is_favorite;
    model.update_point(UpdateType::Patch, point.clone()).unwrap();

    let mut copy = point.clone();
    copy.id = PointId::from("pt-copy");
    model.add_point(UpdateType::Minor, copy.clone()).unwrap();
    model.delete_point(UpdateType::Minor, copy).unwrap();

    let log = log.borrow();
    let kinds: Vec<_> = log.iter().map(|(u, k, _)| (*u, *k)).collect();
    assert_eq!(
        kinds,
        [
            (UpdateType::Patch, "updated"),
            (UpdateType::Minor, "added"),
            (UpdateType::Minor, "deleted"),
        ]
    );
    assert_eq!(log[1].2.as_str(), "pt-copy");
    assert_eq!(model.len(), 5);
}

#[test]
fn filters_split_fixture_by_time() {
    let model = load_model();
    let now = model.points()[2].date_from;
    let count = |f: FilterType| model.points().iter().filter(|p| f.matches(p, now)).count();

    assert_eq!(count(FilterType::Everything), 5);
    assert_eq!(count(FilterType::Past), 2);
    assert_eq!(count(FilterType::Present), 1);
    assert_eq!(count(FilterType::Future), 2);
}
