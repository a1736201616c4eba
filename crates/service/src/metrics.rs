use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static PROCEDURE_CALLS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "store_catalog_procedure_calls_total",
        "Stored procedure calls by procedure and outcome",
        &["procedure", "outcome"]
    )
    .expect("register procedure_calls_total")
});

pub static PROCEDURE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "store_catalog_procedure_duration_seconds",
        "Stored procedure call duration in seconds",
        &["procedure"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("register procedure_duration")
});

pub fn observe(procedure: &str, outcome: &str, seconds: f64) {
    PROCEDURE_CALLS_TOTAL.with_label_values(&[procedure, outcome]).inc();
    PROCEDURE_DURATION.with_label_values(&[procedure]).observe(seconds);
}

/// Render the default registry in the Prometheus text format.
pub fn render() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    encoder.encode(&prometheus::gather(), &mut buf).map_err(|e| e.to_string())?;
    String::from_utf8(buf).map_err(|e| e.to_string())
}
