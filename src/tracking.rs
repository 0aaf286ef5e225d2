//! Order page: fetch one order and derive its timeline.

use crate::api::StoreApi;
use crate::model::{Order, OrderId};
use crate::notify::{Notice, Route};
use crate::timeline::{build_timeline, Timeline};
use std::sync::Arc;
use tracing::{instrument, warn};

/// An order together with its derived timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order: Order,
    pub timeline: Timeline,
}

impl OrderView {
    pub fn new(order: Order) -> Self {
        let timeline = build_timeline(&order);
        Self { order, timeline }
    }

    /// Swaps in a fresher copy of the order and rebuilds the timeline.
    pub fn refresh(&mut self, order: Order) {
        self.timeline = build_timeline(&order);
        self.order = order;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Tracking {
    Loaded(OrderView),
    /// Nothing to show; go elsewhere and optionally tell the user why.
    Redirect {
        route: Route,
        notice: Option<Notice>,
    },
}

#[derive(Clone)]
pub struct OrderTracker {
    api: Arc<dyn StoreApi>,
}

impl OrderTracker {
    pub fn new(api: Arc<dyn StoreApi>) -> Self {
        Self { api }
    }

    /// Loads the order named by the page's route parameter.
    #[instrument(skip(self))]
    pub async fn open(&self, id: Option<&str>) -> Tracking {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return Tracking::Redirect {
                route: Route::Profile,
                notice: None,
            };
        };
        let id = OrderId::from(id);
        match self.api.get_order(&id).await {
            Ok(order) => Tracking::Loaded(OrderView::new(order)),
            Err(e) => {
                warn!(order = %id, error = %e, "Order lookup failed");
                Tracking::Redirect {
                    route: Route::Profile,
                    notice: Some(Notice::error("Order not found.").titled("Error")),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{ApiCall, MockApi};
    use crate::api::ApiError;
    use crate::model::OrderStatus;
    use crate::timeline::StepStatus;
    use chrono::NaiveDate;

    fn order(status: OrderStatus) -> Order {
        let created = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Order::new("o1", status, created)
    }

    #[tokio::test]
    async fn test_open_builds_timeline() {
        let mock = MockApi::new();
        mock.expect_get_order().return_ok(order(OrderStatus::Preparing));
        let tracker = OrderTracker::new(Arc::new(mock.clone()));

        let Tracking::Loaded(view) = tracker.open(Some("o1")).await else {
            panic!("expected a loaded order");
        };
        assert_eq!(view.timeline.progress, 50.0);
        assert_eq!(mock.calls(), vec![ApiCall::GetOrder(OrderId::from("o1"))]);
    }

    #[tokio::test]
    async fn test_missing_order_redirects_to_profile() {
        let mock = MockApi::new();
        mock.expect_get_order().return_err(ApiError::status("/pedidos/o9", 404));
        let tracker = OrderTracker::new(Arc::new(mock.clone()));

        let outcome = tracker.open(Some("o9")).await;
        assert_eq!(
            outcome,
            Tracking::Redirect {
                route: Route::Profile,
                notice: Some(Notice::error("Order not found.").titled("Error")),
            }
        );
    }

    #[tokio::test]
    async fn test_no_id_redirects_without_request() {
        let mock = MockApi::new();
        let tracker = OrderTracker::new(Arc::new(mock.clone()));
        assert!(matches!(
            tracker.open(None).await,
            Tracking::Redirect { notice: None, .. }
        ));
        assert!(matches!(tracker.open(Some("  ")).await, Tracking::Redirect { .. }));
        assert!(mock.calls().is_empty());
    }

    #[test]
    fn test_refresh_rebuilds_timeline() {
        let mut view = OrderView::new(order(OrderStatus::Paid));
        assert_eq!(view.timeline.steps[1].status, StepStatus::Current);

        view.refresh(order(OrderStatus::Cancelled));
        assert_eq!(view.timeline.steps.len(), 2);
        assert_eq!(view.order.status, OrderStatus::Cancelled);
    }
}
