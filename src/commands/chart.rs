use tracing::info;

use crate::config::{ChartConfig, ChartVariant};
use crate::models::SeriesSummary;
use crate::services::{chart_service, loader_service, projection_service};
use crate::services::chart_service::RenderOutcome;
use crate::utils::{ChartError, Table};

/// Load, project and draw the price file for one variant
pub async fn execute(variant: ChartVariant) -> Result<(), ChartError> {
    let config = ChartConfig::from_env(variant)?;
    info!(
        "🎨 Drawing '{}' chart: {} against {}",
        variant.name(),
        config.y_label,
        config.x_field
    );

    let samples = loader_service::load_samples(&config.input).await?;
    let series = projection_service::project(&samples, config.x_field)?;

    match chart_service::render_chart(&series, &config)? {
        RenderOutcome::Written(path) => println!("Chart saved to {}", path.display()),
        RenderOutcome::Displayed | RenderOutcome::Skipped => {}
    }

    match projection_service::summarize(&series, &config.date_format) {
        Some(summary) => println!("{}", summary_table(&summary).render()),
        None => println!("No price samples in {}", config.input.display()),
    }

    Ok(())
}

fn summary_table(summary: &SeriesSummary) -> Table {
    let mut table = Table::new(vec!["Field", "Value"]);
    table.add_row(vec!["samples".to_string(), summary.samples.to_string()]);
    table.add_row(vec!["first".to_string(), summary.first_x.clone()]);
    table.add_row(vec!["last".to_string(), summary.last_x.clone()]);
    table.add_row(vec!["min price".to_string(), format!("{:.6}", summary.min_price)]);
    table.add_row(vec!["max price".to_string(), format!("{:.6}", summary.max_price)]);
    table.add_row(vec!["last price".to_string(), format!("{:.6}", summary.last_price)]);
    table
}
