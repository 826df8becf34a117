//! Poll a dashboard backend and print the latest block card and series sizes
//! after every refresh.
//!
//! Run with:
//! ```bash
//! DASHBOARD_API_URL=http://127.0.0.1:4000 cargo run --example watch
//! ```

use chain_dashboard::prelude::*;
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> Result<(), DashboardError> {
    dotenvy::dotenv().ok();

    let config = DashboardConfig::from_env()?;
    println!(
        "Polling {} every {}s (ctrl-c to quit)",
        config.api_url,
        config.refresh_interval.as_secs_f64()
    );

    let mut dashboard = Dashboard::builder().config(config).build()?;
    dashboard.start();

    {
        let events = dashboard.events();
        tokio::pin!(events);

        loop {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else { break };
                    match event {
                        RefreshEvent::Updated { dataset, len } => {
                            println!("\n[{dataset}] {len} record(s)");
                            print_view(&dashboard.view().await);
                        }
                        RefreshEvent::Failed { dataset, error } => {
                            println!("\n[{dataset}] refresh failed: {error}");
                        }
                        RefreshEvent::Discarded { .. } => {}
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    }

    dashboard.stop().await;
    Ok(())
}

fn print_view(view: &DashboardView) {
    match &view.latest {
        Some(card) => println!("{card}"),
        None => println!("No blocks yet"),
    }

    println!("On-chain series: {} point(s)", view.blocks.len());
    if let (Some(first), Some(last)) = (view.blocks.labels.first(), view.blocks.labels.last()) {
        println!("  heights {first}..={last}");
    }

    println!("Off-chain series: {} point(s)", view.market.len());
    if let (Some(label), Some(usd)) = (view.market.labels.last(), view.market.usd.last()) {
        println!("  {label}  ${usd}");
    }
}
