use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub orders_created_total: IntCounter,
    pub order_transitions_total: IntCounterVec,
    pub auth_attempts_total: IntCounterVec,
    pub auth_duration_seconds: HistogramVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let orders_created_total =
            IntCounter::new("orders_created_total", "Total delivery orders created")
                .expect("valid orders_created_total metric");

        let order_transitions_total = IntCounterVec::new(
            Opts::new(
                "order_transitions_total",
                "Status transition attempts by transition and outcome",
            ),
            &["transition", "outcome"],
        )
        .expect("valid order_transitions_total metric");

        let auth_attempts_total = IntCounterVec::new(
            Opts::new("auth_attempts_total", "Login attempts by outcome"),
            &["outcome"],
        )
        .expect("valid auth_attempts_total metric");

        let auth_duration_seconds = HistogramVec::new(
            prometheus::HistogramOpts::new(
                "auth_duration_seconds",
                "Latency of login handling in seconds",
            ),
            &["outcome"],
        )
        .expect("valid auth_duration_seconds metric");

        registry
            .register(Box::new(orders_created_total.clone()))
            .expect("register orders_created_total");
        registry
            .register(Box::new(order_transitions_total.clone()))
            .expect("register order_transitions_total");
        registry
            .register(Box::new(auth_attempts_total.clone()))
            .expect("register auth_attempts_total");
        registry
            .register(Box::new(auth_duration_seconds.clone()))
            .expect("register auth_duration_seconds");

        Self {
            registry,
            orders_created_total,
            order_transitions_total,
            auth_attempts_total,
            auth_duration_seconds,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
