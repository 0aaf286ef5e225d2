use obra_storefront::config::StorefrontConfig;
use obra_storefront::lifecycle::{setup_tracing, Session};
use obra_storefront::timeline::StepStatus;
use obra_storefront::tracking::Tracking;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StorefrontConfig::from_env().map_err(|e| e.to_string())?;
    let session = Session::connect(&config).map_err(|e| e.to_string())?;

    let order_id = std::env::args().nth(1);
    match session.open_order(order_id.as_deref()).await {
        Tracking::Loaded(view) => {
            info!(order = %view.order.id, status = %view.order.status, "Order loaded");
            for step in &view.timeline.steps {
                let marker = match step.status {
                    StepStatus::Completed => "[x]",
                    StepStatus::Current => "[>]",
                    StepStatus::Pending => "[ ]",
                };
                println!(
                    "{marker} {:<10} {}",
                    step.label,
                    step.detail.as_deref().unwrap_or("")
                );
            }
            println!("progress: {}%", view.timeline.progress);
        }
        Tracking::Redirect { route, notice } => {
            let message = notice.map(|n| n.message).unwrap_or_else(|| "no order id given".to_string());
            warn!(?route, "{}", message);
        }
    }

    session.shutdown().await
}
