use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static PRODUCT_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "products_ms_operations_total",
        "Product store calls by operation, transport and outcome",
        &["op", "transport", "outcome"]
    )
    .expect("register products_ms_operations_total")
});

/// Count one store call; `outcome` is `ok` or the error's status code.
pub fn record<T, E>(op: &str, transport: &str, result: &Result<T, E>, status: impl Fn(&E) -> u16) {
    let outcome = match result {
        Ok(_) => "ok".to_string(),
        Err(e) => status(e).to_string(),
    };
    PRODUCT_OPS_TOTAL.with_label_values(&[op, transport, &outcome]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
