use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub ride_requests_total: IntCounterVec,
    pub rides_completed_total: IntCounter,
    pub drivers_on_trip: IntGauge,
    pub revenue_total: IntGauge,
    pub dispatch_latency_seconds: HistogramVec,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let ride_requests_total = IntCounterVec::new(
            Opts::new("ride_requests_total", "Total ride requests by outcome"),
            &["outcome"],
        )
        .expect("valid ride_requests_total metric");

        let rides_completed_total =
            IntCounter::new("rides_completed_total", "Total completed rides")
                .expect("valid rides_completed_total metric");

        let drivers_on_trip = IntGauge::new("drivers_on_trip", "Drivers currently on a trip")
            .expect("valid drivers_on_trip metric");

        let revenue_total = IntGauge::new("revenue_total", "Platform commission earned so far")
            .expect("valid revenue_total metric");

        let dispatch_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "dispatch_latency_seconds",
                "Latency of driver selection and reservation in seconds",
            ),
            &["outcome"],
        )
        .expect("valid dispatch_latency_seconds metric");

        registry
            .register(Box::new(ride_requests_total.clone()))
            .expect("register ride_requests_total");
        registry
            .register(Box::new(rides_completed_total.clone()))
            .expect("register rides_completed_total");
        registry
            .register(Box::new(drivers_on_trip.clone()))
            .expect("register drivers_on_trip");
        registry
            .register(Box::new(revenue_total.clone()))
            .expect("register revenue_total");
        registry
            .register(Box::new(dispatch_latency_seconds.clone()))
            .expect("register dispatch_latency_seconds");

        Self {
            registry,
            ride_requests_total,
            rides_completed_total,
            drivers_on_trip,
            revenue_total,
            dispatch_latency_seconds,
        }
    }

    pub fn record_request(&self, outcome: &str, elapsed_seconds: f64) {
        self.ride_requests_total.with_label_values(&[outcome]).inc();
        self.dispatch_latency_seconds
            .with_label_values(&[outcome])
            .observe(elapsed_seconds);
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

#[cfg(test)]
mod tests {
    use super::Metrics;

    #[test]
    fn encoded_output_names_ride_counters() {
        let metrics = Metrics::new();
        metrics.record_request("assigned", 0.001);
        metrics.revenue_total.set(12);

        let text = metrics.encode().unwrap();
        assert!(text.contains("ride_requests_total{outcome=\"assigned\"} 1"));
        assert!(text.contains("revenue_total 12"));
    }
}
