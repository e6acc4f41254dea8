use crate::config::ChartVariant;
use crate::utils::{ChartError, Table};

/// Usage text for the binary
pub fn usage() -> String {
    let mut variants = Table::new(vec!["Variant", "Chart"]);
    for variant in ChartVariant::ALL {
        variants.add_row(vec![variant.name().to_string(), variant.description().to_string()]);
    }

    format!(
        "📈 price-chart - plot price samples from a JSON file\n\n\
         Usage: price-chart [VARIANT]\n       price-chart help\n\n\
         {}\n\
         Environment (also read from .env):\n  \
         PRICE_FILE           input file (default ./price.json)\n  \
         CHART_OUTPUT         write to this .svg or .png instead of opening a window\n  \
         CHART_TITLE          chart title\n  \
         CHART_X_FIELD        blockNumber or timeStamp\n  \
         CHART_TICK_HOURS     hours between time labels\n  \
         CHART_ROTATE_LABELS  true/false\n  \
         CHART_DATE_FORMAT    strftime pattern for time labels (default %m-%d %H:%M)\n  \
         CHART_WIDTH, CHART_HEIGHT  image size in pixels\n  \
         CHART_MARKERS        draw a dot on every sample",
        variants.render()
    )
}

pub fn execute() -> Result<(), ChartError> {
    println!("{}", usage());
    Ok(())
}
