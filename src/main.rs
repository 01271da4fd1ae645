use swarm_sim::{app, bootstrap};

#[tokio::main]
async fn main() {
    let config = bootstrap::app::setup();

    tokio::select! {
        result = app::run(&config) => {
            match result {
                Ok(report) => app::log_summary(&report),
                Err(err) => {
                    tracing::error!("swarm run failed: {err}");
                    std::process::exit(1);
                }
            }
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("swarm run interrupted");
        }
    }
}
