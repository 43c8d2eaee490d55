use broker_ai::geo::boundary::OutputFormat;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_output_format(raw: &str) -> Result<OutputFormat, String> {
    raw.parse::<OutputFormat>()
}

pub(crate) fn parse_year(raw: &str) -> Result<i32, String> {
    let year = raw
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("failed to parse '{raw}' as a year ({err})"))?;

    if (1900..=2200).contains(&year) {
        Ok(year)
    } else {
        Err(format!("year {year} is outside 1900..=2200"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_output_format_names() {
        assert_eq!(parse_output_format("json"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("ts"), Ok(OutputFormat::TypeScript));
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn rejects_implausible_years() {
        assert_eq!(parse_year(" 2025 "), Ok(2025));
        assert!(parse_year("25000").is_err());
        assert!(parse_year("soon").is_err());
    }
}
