use chrono::{DateTime, Utc};
use tracing::warn;

use crate::models::{ChartSeries, PriceSample, SeriesSummary, XField};
use crate::utils::ChartError;

/// Project samples to parallel x/y sequences, keeping input order
pub fn project(samples: &[PriceSample], x_field: XField) -> Result<ChartSeries, ChartError> {
    let ys = samples
        .iter()
        .enumerate()
        .map(|(index, s)| s.price.ok_or(ChartError::MissingField { index, field: "price" }))
        .collect::<Result<Vec<f64>, _>>()?;

    let series = match x_field {
        XField::BlockNumber => {
            let xs = samples
                .iter()
                .enumerate()
                .map(|(index, s)| {
                    s.block_number.ok_or(ChartError::MissingField {
                        index,
                        field: "blockNumber",
                    })
                })
                .collect::<Result<Vec<u64>, _>>()?;
            ChartSeries::Blocks { xs, ys }
        }
        XField::Timestamp => {
            let xs = samples
                .iter()
                .enumerate()
                .map(|(index, s)| {
                    let value = s.time_stamp.ok_or(ChartError::MissingField {
                        index,
                        field: "timeStamp",
                    })?;
                    DateTime::<Utc>::from_timestamp(value, 0)
                        .ok_or(ChartError::InvalidTimestamp { index, value })
                })
                .collect::<Result<Vec<DateTime<Utc>>, _>>()?;
            ChartSeries::Times { xs, ys }
        }
    };

    if !series.x_is_sorted() {
        warn!("{} values are not in ascending order; plotting in input order", x_field);
    }

    Ok(series)
}

/// First/last x and price extremes, `None` for an empty series
pub fn summarize(series: &ChartSeries, date_format: &str) -> Option<SeriesSummary> {
    let (min_price, max_price) = series.price_range()?;
    let last_price = *series.prices().last()?;

    let (first_x, last_x) = match series {
        ChartSeries::Blocks { xs, .. } => (xs.first()?.to_string(), xs.last()?.to_string()),
        ChartSeries::Times { xs, .. } => (
            xs.first()?.format(date_format).to_string(),
            xs.last()?.format(date_format).to_string(),
        ),
    };

    Some(SeriesSummary {
        samples: series.len(),
        first_x,
        last_x,
        min_price,
        max_price,
        last_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn samples(json: &str) -> Vec<PriceSample> {
        serde_json::from_str(json).expect("valid samples")
    }

    #[test]
    fn test_block_projection() {
        let data = samples(r#"[{"blockNumber":1,"price":10.0},{"blockNumber":2,"price":20.0}]"#);
        let series = project(&data, XField::BlockNumber).unwrap();

        assert_eq!(
            series,
            ChartSeries::Blocks {
                xs: vec![1, 2],
                ys: vec![10.0, 20.0]
            }
        );
    }

    #[test]
    fn test_timestamp_projection() {
        let data = samples(r#"[{"timeStamp":1700000000,"price":5.5}]"#);
        let series = project(&data, XField::Timestamp).unwrap();

        let expected = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(
            series,
            ChartSeries::Times {
                xs: vec![expected],
                ys: vec![5.5]
            }
        );
    }

    #[test]
    fn test_lengths_and_order_preserved() {
        let data = samples(
            r#"[{"blockNumber":30,"price":3.0},{"blockNumber":10,"price":1.0},{"blockNumber":20,"price":2.0}]"#,
        );
        let series = project(&data, XField::BlockNumber).unwrap();

        assert_eq!(series.len(), data.len());
        match series {
            ChartSeries::Blocks { xs, ys } => {
                assert_eq!(xs, vec![30, 10, 20]);
                assert_eq!(ys, vec![3.0, 1.0, 2.0]);
            }
            other => panic!("unexpected series: {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        for field in [XField::BlockNumber, XField::Timestamp] {
            let series = project(&[], field).unwrap();
            assert!(series.is_empty());
            assert_eq!(summarize(&series, "%m-%d %H:%M"), None);
        }
    }

    #[test]
    fn test_missing_price() {
        let data = samples(r#"[{"blockNumber":1,"price":1.0},{"blockNumber":2}]"#);
        let err = project(&data, XField::BlockNumber).unwrap_err();

        assert!(matches!(err, ChartError::MissingField { index: 1, field: "price" }));
    }

    #[test]
    fn test_missing_x_field() {
        let data = samples(r#"[{"blockNumber":1,"price":1.0}]"#);
        let err = project(&data, XField::Timestamp).unwrap_err();

        assert!(matches!(err, ChartError::MissingField { index: 0, field: "timeStamp" }));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let data = samples(r#"[{"timeStamp":9223372036854775807,"price":1.0}]"#);
        let err = project(&data, XField::Timestamp).unwrap_err();

        assert!(matches!(err, ChartError::InvalidTimestamp { index: 0, .. }));
    }

    #[test]
    fn test_summary() {
        let data = samples(
            r#"[{"timeStamp":1700000000,"price":5.5},{"timeStamp":1700003600,"price":4.0},{"timeStamp":1700007200,"price":6.25}]"#,
        );
        let series = project(&data, XField::Timestamp).unwrap();
        let summary = summarize(&series, "%m-%d %H:%M").unwrap();

        assert_eq!(summary.samples, 3);
        assert_eq!(summary.first_x, "11-14 22:13");
        assert_eq!(summary.last_x, "11-15 00:13");
        assert_eq!(summary.min_price, 4.0);
        assert_eq!(summary.max_price, 6.25);
        assert_eq!(summary.last_price, 6.25);
    }
}
