use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::error::AppError;

pub struct Metrics {
    pub requests: IntCounterVec,
    pub generation_duration: Histogram,
    pub registry: Registry,
}

impl Metrics {
    pub fn new() -> Result<Arc<Self>, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("totp_requests_total", "Total number of TOTP requests by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        let generation_duration_opts = HistogramOpts::new(
            "totp_generation_seconds",
            "Time spent validating parameters and generating a code",
        )
        .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01]);
        let generation_duration = Histogram::with_opts(generation_duration_opts)?;
        registry.register(Box::new(generation_duration.clone()))?;

        Ok(Arc::new(Self {
            requests,
            generation_duration,
            registry,
        }))
    }

    pub fn record<T>(&self, result: &Result<T, AppError>) {
        match result {
            Ok(_) => self.requests.with_label_values(&["success"]).inc(),
            Err(e) => self.record_error(e),
        }
    }

    pub fn record_error(&self, error: &AppError) {
        let outcome = if error.status().is_server_error() { "server_error" } else { "client_error" };
        self.requests.with_label_values(&[outcome]).inc();
    }

    /// Render the registry in the text exposition format.
    pub fn encode(&self) -> Result<String, AppError> {
        let mut buf = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buf)
            .map_err(|e| AppError::Internal(format!("metrics encode: {e}")))?;
        String::from_utf8(buf).map_err(|e| AppError::Internal(format!("metrics encode: {e}")))
    }
}
