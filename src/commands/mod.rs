pub mod chart;
pub mod help;

use crate::config::ChartVariant;
use crate::utils::ChartError;

/// Route command line arguments; no argument draws the block chart
pub async fn handle_args(args: &[String]) -> Result<(), ChartError> {
    let command = args.first().map(String::as_str).unwrap_or("block");

    match command {
        "help" | "-h" | "--help" => help::execute(),
        other => {
            let variant: ChartVariant = other.parse()?;
            chart::execute(variant).await
        }
    }
}
