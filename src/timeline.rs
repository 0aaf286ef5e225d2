//! Order-status timeline.
//!
//! Turns an [`Order`] into the checkpoints shown on the order page, each
//! marked completed, current or pending, plus how far the progress bar is
//! filled. [`build_timeline`] is pure, so it can be rerun on every refresh of
//! the order.

use crate::model::{Order, OrderStatus};
use chrono::NaiveDateTime;
use serde::Serialize;

const DATETIME_FORMAT: &str = "%d/%m/%y %H:%M";
const SHORT_DATE_FORMAT: &str = "%d/%m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// One checkpoint of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineStep {
    pub label: &'static str,
    pub icon: &'static str,
    pub status: StepStatus,
    /// Formatted date or situational text, when there is something to show.
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub steps: Vec<TimelineStep>,
    /// Filled share of the progress bar, 0 to 100.
    pub progress: f64,
    /// Share of the bar representing the leg in progress; 0 once finished.
    pub upcoming: f64,
}

impl Timeline {
    pub fn completed_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| step.status == StepStatus::Completed)
            .count()
    }

    pub fn current(&self) -> Option<&TimelineStep> {
        self.steps.iter().find(|step| step.status == StepStatus::Current)
    }
}

/// The five fixed checkpoints of a live order, in order.
const TRACK: [(&str, &str); 5] = [
    ("Placed", "ph-shopping-cart"),
    ("Payment", "ph-currency-dollar"),
    ("Preparing", "ph-package"),
    ("Shipped", "ph-truck"),
    ("Delivered", "ph-house"),
];

pub fn build_timeline(order: &Order) -> Timeline {
    let Some(ordinal) = order.status.ordinal() else {
        return cancelled_timeline(order);
    };
    let delivered = order.status == OrderStatus::Delivered;

    let steps: Vec<TimelineStep> = TRACK
        .iter()
        .enumerate()
        .map(|(index, &(label, icon))| {
            let status = if index < ordinal || (index == ordinal && delivered) {
                StepStatus::Completed
            } else if index == ordinal {
                StepStatus::Current
            } else {
                StepStatus::Pending
            };
            TimelineStep {
                label,
                icon,
                status,
                detail: step_detail(index, status, order),
            }
        })
        .collect();

    let segments = (steps.len() - 1) as f64;
    let completed = steps
        .iter()
        .filter(|step| step.status == StepStatus::Completed)
        .count() as f64;
    let progress = (completed / segments * 100.0).min(100.0);
    let upcoming = if progress < 100.0 { 100.0 / segments } else { 0.0 };

    Timeline {
        steps,
        progress,
        upcoming,
    }
}

fn cancelled_timeline(order: &Order) -> Timeline {
    Timeline {
        steps: vec![
            TimelineStep {
                label: "Placed",
                icon: "ph-shopping-cart",
                status: StepStatus::Completed,
                detail: Some(format_datetime(order.created_at)),
            },
            TimelineStep {
                label: "Cancelled",
                icon: "ph-x-circle",
                status: StepStatus::Completed,
                detail: Some("Order cancelled".to_string()),
            },
        ],
        progress: 100.0,
        upcoming: 0.0,
    }
}

fn step_detail(index: usize, status: StepStatus, order: &Order) -> Option<String> {
    let payment = order.payment.as_ref();
    let delivery = order.delivery.as_ref();
    match index {
        0 => Some(format_datetime(order.created_at)),
        1 => match payment.and_then(|p| p.paid_at) {
            Some(paid_at) => Some(format_datetime(paid_at)),
            None if status != StepStatus::Completed => Some("Awaiting payment".to_string()),
            None => None,
        },
        2 => (status == StepStatus::Current).then(|| "Being prepared".to_string()),
        3 => match delivery.and_then(|d| d.shipped_at) {
            Some(shipped_at) => Some(format_datetime(shipped_at)),
            None if status == StepStatus::Current => Some("In transit".to_string()),
            None => None,
        },
        _ => {
            let delivery = delivery?;
            if let Some(delivered_at) = delivery.delivered_at {
                Some(format_datetime(delivered_at))
            } else {
                delivery
                    .estimated_delivery
                    .map(|eta| format!("Est. {}", eta.format(SHORT_DATE_FORMAT)))
            }
        }
    }
}

fn format_datetime(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeliveryRecord, PaymentRecord};
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 15, 0)
            .unwrap()
    }

    fn order(status: OrderStatus) -> Order {
        Order::new("o-1", status, at(10, 9))
    }

    fn statuses(timeline: &Timeline) -> Vec<StepStatus> {
        timeline.steps.iter().map(|s| s.status).collect()
    }

    #[test]
    fn test_delivered_completes_every_step() {
        let timeline = build_timeline(&order(OrderStatus::Delivered));
        assert_eq!(timeline.steps.len(), 5);
        assert!(timeline.steps.iter().all(|s| s.status == StepStatus::Completed));
        assert_eq!(timeline.progress, 100.0);
        assert_eq!(timeline.upcoming, 0.0);
    }

    #[test]
    fn test_awaiting_payment_starts_at_first_step() {
        let timeline = build_timeline(&order(OrderStatus::AwaitingPayment));
        assert_eq!(
            statuses(&timeline),
            vec![
                StepStatus::Current,
                StepStatus::Pending,
                StepStatus::Pending,
                StepStatus::Pending,
                StepStatus::Pending,
            ]
        );
        assert_eq!(timeline.progress, 0.0);
        assert_eq!(timeline.upcoming, 25.0);
        assert_eq!(timeline.steps[1].detail.as_deref(), Some("Awaiting payment"));
    }

    #[test]
    fn test_cancelled_is_two_steps_regardless_of_history() {
        let paid = order(OrderStatus::Cancelled).with_payment(PaymentRecord {
            paid_at: Some(at(10, 10)),
            ..Default::default()
        });
        let timeline = build_timeline(&paid);
        assert_eq!(timeline.steps.len(), 2);
        assert_eq!(timeline.steps[0].label, "Placed");
        assert_eq!(timeline.steps[1].label, "Cancelled");
        assert_eq!(timeline.steps[1].icon, "ph-x-circle");
        assert_eq!(timeline.progress, 100.0);
    }

    #[test]
    fn test_progress_never_decreases_along_the_track() {
        let track = [
            OrderStatus::AwaitingPayment,
            OrderStatus::Paid,
            OrderStatus::Preparing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ];
        let progress: Vec<f64> = track
            .iter()
            .map(|status| build_timeline(&order(*status)).progress)
            .collect();
        assert_eq!(progress, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(progress.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_no_completed_step_after_a_pending_one() {
        for status in [
            OrderStatus::AwaitingPayment,
            OrderStatus::Paid,
            OrderStatus::Preparing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Unknown,
        ] {
            let timeline = build_timeline(&order(status));
            let first_pending = timeline
                .steps
                .iter()
                .position(|s| s.status == StepStatus::Pending)
                .unwrap_or(timeline.steps.len());
            assert!(
                timeline.steps[first_pending..]
                    .iter()
                    .all(|s| s.status == StepStatus::Pending),
                "{status} broke monotonicity"
            );
        }
    }

    #[test]
    fn test_unknown_status_behaves_like_awaiting_payment() {
        assert_eq!(
            statuses(&build_timeline(&order(OrderStatus::Unknown))),
            statuses(&build_timeline(&order(OrderStatus::AwaitingPayment)))
        );
    }

    #[test]
    fn test_details_come_from_available_dates() {
        let shipped = order(OrderStatus::Shipped)
            .with_payment(PaymentRecord {
                paid_at: Some(at(10, 11)),
                ..Default::default()
            })
            .with_delivery(DeliveryRecord {
                shipped_at: Some(at(12, 8)),
                estimated_delivery: Some(at(17, 0)),
                ..Default::default()
            });
        let timeline = build_timeline(&shipped);
        let details: Vec<Option<&str>> = timeline.steps.iter().map(|s| s.detail.as_deref()).collect();
        assert_eq!(
            details,
            vec![
                Some("10/03/25 09:15"),
                Some("10/03/25 11:15"),
                None,
                Some("12/03/25 08:15"),
                Some("Est. 17/03"),
            ]
        );
        assert_eq!(timeline.current().map(|s| s.label), Some("Shipped"));
    }

    #[test]
    fn test_situational_text_without_dates() {
        let preparing = build_timeline(&order(OrderStatus::Preparing));
        assert_eq!(preparing.steps[2].detail.as_deref(), Some("Being prepared"));
        assert_eq!(preparing.steps[1].detail, None);

        let shipped = build_timeline(&order(OrderStatus::Shipped));
        assert_eq!(shipped.steps[3].detail.as_deref(), Some("In transit"));
        assert_eq!(shipped.steps[4].detail, None);
    }

    #[test]
    fn test_actual_delivery_date_wins_over_estimate() {
        let delivered = order(OrderStatus::Delivered).with_delivery(DeliveryRecord {
            estimated_delivery: Some(at(17, 0)),
            delivered_at: Some(at(16, 14)),
            ..Default::default()
        });
        let timeline = build_timeline(&delivered);
        assert_eq!(timeline.steps[4].detail.as_deref(), Some("16/03/25 14:15"));
    }
}
