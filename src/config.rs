//! Chart configuration: named presets plus environment overrides

use std::path::PathBuf;
use std::str::FromStr;

use crate::models::XField;
use crate::utils::ChartError;

const DEFAULT_TITLE: &str = "price of WETH/USDC in 24h";
const DEFAULT_Y_LABEL: &str = "weth/usdc price";
const DEFAULT_DATE_FORMAT: &str = "%m-%d %H:%M";

/// Built-in chart presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartVariant {
    /// Price against block number
    Block,
    /// Price against time, hourly ticks, vertical labels
    Time,
    /// Price against time, ticks every 4 hours
    Time4h,
}

impl ChartVariant {
    pub const ALL: [ChartVariant; 3] = [ChartVariant::Block, ChartVariant::Time, ChartVariant::Time4h];

    pub fn name(&self) -> &'static str {
        match self {
            ChartVariant::Block => "block",
            ChartVariant::Time => "time",
            ChartVariant::Time4h => "time-4h",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartVariant::Block => "price against block number",
            ChartVariant::Time => "price against time, a label every hour, rotated",
            ChartVariant::Time4h => "price against time, a label every 4 hours",
        }
    }
}

impl FromStr for ChartVariant {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "block" | "blocks" | "blocknumber" => Ok(ChartVariant::Block),
            "time" | "timestamp" => Ok(ChartVariant::Time),
            "time-4h" | "time4h" => Ok(ChartVariant::Time4h),
            _ => Err(ChartError::UnknownVariant(s.to_string())),
        }
    }
}

/// Everything the loader, projector and renderer need for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub x_field: XField,
    pub tick_interval_hours: u32,
    pub title: String,
    pub rotate_labels: bool,
    pub x_label: String,
    pub y_label: String,
    pub date_format: String,
    pub width: u32,
    pub height: u32,
    pub show_markers: bool,
    pub input: PathBuf,
    /// Image file to write; `None` shows the chart in a window
    pub output: Option<PathBuf>,
}

impl ChartConfig {
    pub fn for_variant(variant: ChartVariant) -> Self {
        let base = ChartConfig {
            x_field: XField::BlockNumber,
            tick_interval_hours: 1,
            title: DEFAULT_TITLE.to_string(),
            rotate_labels: false,
            x_label: "blockNumber".to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            width: 1024,
            height: 768,
            show_markers: false,
            input: PathBuf::from("./price.json"),
            output: None,
        };

        match variant {
            ChartVariant::Block => base,
            ChartVariant::Time => ChartConfig {
                x_field: XField::Timestamp,
                rotate_labels: true,
                x_label: "time".to_string(),
                ..base
            },
            ChartVariant::Time4h => ChartConfig {
                x_field: XField::Timestamp,
                tick_interval_hours: 4,
                x_label: "time".to_string(),
                ..base
            },
        }
    }

    /// Preset for `variant` with overrides from the process environment
    pub fn from_env(variant: ChartVariant) -> Result<Self, ChartError> {
        Self::for_variant(variant).with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `PRICE_FILE`/`CHART_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ChartError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup("PRICE_FILE") {
            self.input = PathBuf::from(input);
        }
        if let Some(output) = lookup("CHART_OUTPUT") {
            self.output = Some(PathBuf::from(output));
        }
        if let Some(title) = lookup("CHART_TITLE") {
            self.title = title;
        }
        if let Some(field) = lookup("CHART_X_FIELD") {
            self.x_field = field.parse()?;
            self.x_label = match self.x_field {
                XField::BlockNumber => "blockNumber".to_string(),
                XField::Timestamp => "time".to_string(),
            };
        }
        if let Some(hours) = lookup("CHART_TICK_HOURS") {
            self.tick_interval_hours = parse_positive("CHART_TICK_HOURS", &hours)?;
        }
        if let Some(rotate) = lookup("CHART_ROTATE_LABELS") {
            self.rotate_labels = parse_flag("CHART_ROTATE_LABELS", &rotate)?;
        }
        if let Some(format) = lookup("CHART_DATE_FORMAT") {
            self.date_format = format;
        }
        if let Some(width) = lookup("CHART_WIDTH") {
            self.width = parse_positive("CHART_WIDTH", &width)?;
        }
        if let Some(height) = lookup("CHART_HEIGHT") {
            self.height = parse_positive("CHART_HEIGHT", &height)?;
        }
        if let Some(markers) = lookup("CHART_MARKERS") {
            self.show_markers = parse_flag("CHART_MARKERS", &markers)?;
        }

        Ok(self)
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u32, ChartError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ChartError::Config(format!(
            "{} must be a positive integer, got '{}'",
            key, value
        ))),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ChartError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ChartError::Config(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_variant_presets() {
        let block = ChartConfig::for_variant(ChartVariant::Block);
        assert_eq!(block.x_field, XField::BlockNumber);
        assert_eq!(block.x_label, "blockNumber");
        assert_eq!(block.title, "price of WETH/USDC in 24h");
        assert_eq!(block.input, PathBuf::from("./price.json"));
        assert_eq!(block.output, None);

        let time = ChartConfig::for_variant(ChartVariant::Time);
        assert_eq!(time.x_field, XField::Timestamp);
        assert_eq!(time.tick_interval_hours, 1);
        assert!(time.rotate_labels);

        let time4h = ChartConfig::for_variant(ChartVariant::Time4h);
        assert_eq!(time4h.tick_interval_hours, 4);
        assert!(!time4h.rotate_labels);
    }

    #[test]
    fn test_variant_names_round_trip() {
        for variant in ChartVariant::ALL {
            assert_eq!(variant.name().parse::<ChartVariant>().unwrap(), variant);
        }
        assert!(matches!(
            "candles".parse::<ChartVariant>(),
            Err(ChartError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = ChartConfig::for_variant(ChartVariant::Block)
            .with_overrides(lookup_from(&[
                ("PRICE_FILE", "data/eth.json"),
                ("CHART_OUTPUT", "out.svg"),
                ("CHART_X_FIELD", "timeStamp"),
                ("CHART_TICK_HOURS", "6"),
                ("CHART_ROTATE_LABELS", "yes"),
                ("CHART_MARKERS", "1"),
            ]))
            .expect("valid overrides");

        assert_eq!(config.input, PathBuf::from("data/eth.json"));
        assert_eq!(config.output, Some(PathBuf::from("out.svg")));
        assert_eq!(config.x_field, XField::Timestamp);
        assert_eq!(config.x_label, "time");
        assert_eq!(config.tick_interval_hours, 6);
        assert!(config.rotate_labels);
        assert!(config.show_markers);
    }

    #[test]
    fn test_no_overrides_keeps_preset() {
        let preset = ChartConfig::for_variant(ChartVariant::Time);
        let config = preset.clone().with_overrides(|_| None).unwrap();
        assert_eq!(config, preset);
    }

    #[test]
    fn test_invalid_overrides() {
        for (key, value) in [
            ("CHART_TICK_HOURS", "0"),
            ("CHART_WIDTH", "-5"),
            ("CHART_MARKERS", "maybe"),
            ("CHART_X_FIELD", "price"),
        ] {
            let result = ChartConfig::for_variant(ChartVariant::Block)
                .with_overrides(lookup_from(&[(key, value)]));
            assert!(matches!(result, Err(ChartError::Config(_))), "{} = {}", key, value);
        }
    }
}
