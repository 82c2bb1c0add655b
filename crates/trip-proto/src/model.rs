//! Observable models.
//!
//! Both models notify their observers synchronously, after the mutation has
//! been applied and every internal borrow released, so an observer is free to
//! read the model it is observing. The first observer error stops the
//! notification and is handed back to whoever triggered the mutation.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, info};

use crate::error::ModelError;
use crate::event::{PointChange, UpdateType};
use crate::filter::FilterType;
use crate::point::{Destination, OfferGroup, Point, PointId, TripData};

type Observer<E> = Rc<dyn Fn(UpdateType, &E) -> anyhow::Result<()>>;

/// Observer list shared by the models.
pub struct Observable<E> {
    observers: RefCell<Vec<Observer<E>>>,
}

impl<E: 'static> Observable<E> {
    pub fn new() -> Self {
        Self {
            observers: RefCell::new(Vec::new()),
        }
    }

    pub fn add_observer(&self, observer: impl Fn(UpdateType, &E) -> anyhow::Result<()> + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn len(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.borrow().is_empty()
    }

    /// Call every observer in registration order.
    pub fn notify(&self, update: UpdateType, event: &E) -> anyhow::Result<()> {
        // Snapshot so observers may register further observers.
        let observers: Vec<Observer<E>> = self.observers.borrow().clone();
        for observer in observers {
            observer(update, event)?;
        }
        Ok(())
    }
}

impl<E: 'static> Default for Observable<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Authoritative list of points plus the read-only reference data.
pub struct PointsModel {
    points: RefCell<Vec<Point>>,
    destinations: Vec<Destination>,
    offers: Vec<OfferGroup>,
    observers: Observable<PointChange>,
}

impl PointsModel {
    /// Point ids must be unique; the first repeated id is reported.
    pub fn new(data: TripData) -> Result<Self, ModelError> {
        let mut seen = HashSet::with_capacity(data.points.len());
        if let Some(dup) = data.points.iter().find(|p| !seen.insert(&p.id)) {
            return Err(ModelError::DuplicatePoint(dup.id.clone()));
        }
        info!(
            "points model: {} points, {} destinations, {} offer groups",
            data.points.len(),
            data.destinations.len(),
            data.offers.len()
        );
        Ok(Self {
            points: RefCell::new(data.points),
            destinations: data.destinations,
            offers: data.offers,
            observers: Observable::new(),
        })
    }

    pub fn points(&self) -> Vec<Point> {
        self.points.borrow().clone()
    }

    pub fn point(&self, id: &PointId) -> Option<Point> {
        self.points.borrow().iter().find(|p| &p.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.points.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.borrow().is_empty()
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn offers(&self) -> &[OfferGroup] {
        &self.offers
    }

    pub fn add_observer(
        &self,
        observer: impl Fn(UpdateType, &PointChange) -> anyhow::Result<()> + 'static,
    ) {
        self.observers.add_observer(observer);
    }

    /// Replace the point with the same id.
    pub fn update_point(&self, update: UpdateType, point: Point) -> Result<(), ModelError> {
        {
            let mut points = self.points.borrow_mut();
            let slot = points
                .iter_mut()
                .find(|p| p.id == point.id)
                .ok_or_else(|| ModelError::PointNotFound(point.id.clone()))?;
            *slot = point.clone();
        }
        debug!("update_point {} ({})", point.id, update.label());
        self.observers
            .notify(update, &PointChange::Updated(point))?;
        Ok(())
    }

    /// New points go to the front of the list.
    pub fn add_point(&self, update: UpdateType, point: Point) -> Result<(), ModelError> {
        {
            let mut points = self.points.borrow_mut();
            if points.iter().any(|p| p.id == point.id) {
                return Err(ModelError::DuplicatePoint(point.id));
            }
            points.insert(0, point.clone());
        }
        info!("add_point {} ({})", point.id, update.label());
        self.observers.notify(update, &PointChange::Added(point))?;
        Ok(())
    }

    pub fn delete_point(&self, update: UpdateType, point: Point) -> Result<(), ModelError> {
        {
            let mut points = self.points.borrow_mut();
            let idx = points
                .iter()
                .position(|p| p.id == point.id)
                .ok_or_else(|| ModelError::PointNotFound(point.id.clone()))?;
            points.remove(idx);
        }
        info!("delete_point {} ({})", point.id, update.label());
        self.observers
            .notify(update, &PointChange::Deleted(point))?;
        Ok(())
    }
}

/// Currently active point filter.
pub struct FilterModel {
    filter: Cell<FilterType>,
    observers: Observable<FilterType>,
}

impl FilterModel {
    pub fn new(filter: FilterType) -> Self {
        Self {
            filter: Cell::new(filter),
            observers: Observable::new(),
        }
    }

    pub fn filter(&self) -> FilterType {
        self.filter.get()
    }

    pub fn add_observer(
        &self,
        observer: impl Fn(UpdateType, &FilterType) -> anyhow::Result<()> + 'static,
    ) {
        self.observers.add_observer(observer);
    }

    pub fn set_filter(&self, update: UpdateType, filter: FilterType) -> Result<(), ModelError> {
        self.filter.set(filter);
        debug!("set_filter {} ({})", filter.label(), update.label());
        self.observers.notify(update, &filter)?;
        Ok(())
    }
}

impl Default for FilterModel {
    fn default() -> Self {
        Self::new(FilterType::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::{DestinationId, PointKind};
    use chrono::{TimeZone, Utc};

    fn point(id: &str, price: u32) -> Point {
        let from = Utc.with_ymd_and_hms(2026, 3, 18, 10, 0, 0).unwrap();
        Point {
            id: PointId::from(id),
            kind: PointKind::Train,
            date_from: from,
            date_to: from + chrono::Duration::hours(2),
            base_price: price,
            destination: DestinationId::from("ams"),
            offers: Vec::new(),
            is_favorite: false,
        }
    }

    fn model(ids: &[&str]) -> PointsModel {
        PointsModel::new(TripData {
            points: ids.iter().map(|id| point(id, 10)).collect(),
            ..TripData::default()
        })
        .unwrap()
    }

    fn recorder<E: Clone + 'static>() -> (
        Rc<RefCell<Vec<(UpdateType, E)>>>,
        impl Fn(UpdateType, &E) -> anyhow::Result<()>,
    ) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |u: UpdateType, e: &E| {
            sink.borrow_mut().push((u, e.clone()));
            Ok(())
        })
    }

    #[test]
    fn test_update_replaces_and_notifies() {
        let model = model(&["a", "b"]);
        let (log, observer) = recorder::<PointChange>();
        model.add_observer(observer);

        model.update_point(UpdateType::Patch, point("b", 99)).unwrap();

        assert_eq!(model.point(&PointId::from("b")).unwrap().base_price, 99);
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].0, UpdateType::Patch);
        assert_eq!(log[0].1, PointChange::Updated(point("b", 99)));
    }

    #[test]
    fn test_update_unknown_point() {
        let model = model(&["a"]);
        let (log, observer) = recorder::<PointChange>();
        model.add_observer(observer);

        let err = model.update_point(UpdateType::Patch, point("zz", 1)).unwrap_err();
        assert!(matches!(err, ModelError::PointNotFound(id) if id.as_str() == "zz"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_new_rejects_duplicate_ids() {
        let data = TripData {
            points: vec![point("p", 10), point("q", 15), point("p", 20)],
            ..TripData::default()
        };
        assert!(matches!(
            PointsModel::new(data),
            Err(ModelError::DuplicatePoint(id)) if id.as_str() == "p"
        ));
    }

    #[test]
    fn test_add_prepends() {
        let model = model(&["a"]);
        model.add_point(UpdateType::Minor, point("new", 5)).unwrap();
        let ids: Vec<_> = model.points().into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, ["new", "a"]);
    }

    #[test]
    fn test_add_duplicate() {
        let model = model(&["a"]);
        let err = model.add_point(UpdateType::Minor, point("a", 5)).unwrap_err();
        assert!(matches!(err, ModelError::DuplicatePoint(_)));
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_delete() {
        let model = model(&["a", "b"]);
        model.delete_point(UpdateType::Minor, point("a", 10)).unwrap();
        assert_eq!(model.len(), 1);
        assert!(model.point(&PointId::from("a")).is_none());
        assert!(model
            .delete_point(UpdateType::Minor, point("a", 10))
            .is_err());
    }

    #[test]
    fn test_observer_can_read_model() {
        let model = Rc::new(model(&["a"]));
        let seen = Rc::new(Cell::new(0));
        let (weak, sink) = (Rc::downgrade(&model), Rc::clone(&seen));
        model.add_observer(move |_, _| {
            let model = weak.upgrade().expect("model alive");
            sink.set(model.len());
            Ok(())
        });

        model.add_point(UpdateType::Minor, point("b", 1)).unwrap();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_observer_error_propagates() {
        let model = model(&["a"]);
        let calls = Rc::new(Cell::new(0));
        let first = Rc::clone(&calls);
        model.add_observer(move |_, _| {
            first.set(first.get() + 1);
            anyhow::bail!("rejected")
        });
        let second = Rc::clone(&calls);
        model.add_observer(move |_, _| {
            second.set(second.get() + 1);
            Ok(())
        });

        let err = model.add_point(UpdateType::Minor, point("b", 1)).unwrap_err();
        assert!(matches!(err, ModelError::Observer(_)));
        assert_eq!(err.to_string(), "rejected");
        // The mutation stands; only the first observer ran.
        assert_eq!(model.len(), 2);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_filter_model_notifies() {
        let filter = FilterModel::default();
        let (log, observer) = recorder::<FilterType>();
        filter.add_observer(observer);

        filter
            .set_filter(UpdateType::Major, FilterType::Past)
            .unwrap();

        assert_eq!(filter.filter(), FilterType::Past);
        assert_eq!(*log.borrow(), vec![(UpdateType::Major, FilterType::Past)]);
    }
}
