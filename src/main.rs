use anyhow::Context;
use hotel_reservation_summary::pipeline::{self, PipelineConfig};
use tracing::{info, Level};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let config = PipelineConfig::default();
    let report = pipeline::run(&config)
        .with_context(|| {
            format!(
                "could not turn {} into {}",
                config.input_path.display(),
                config.output_path.display()
            )
        })?;

    info!(
        customer = %report.customer_name,
        reservations = report.reservations,
        total = report.totals.price,
        "done"
    );
    Ok(())
}
