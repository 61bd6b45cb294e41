use tokio::sync::broadcast;

use crate::config::Config;
use crate::error::AppError;
use crate::models::trip::TripEvent;
use crate::observability::metrics::Metrics;
use crate::seed::load_demo_data;
use crate::service::TaxiService;

pub struct AppState {
    pub service: TaxiService,
    pub trip_events_tx: broadcast::Sender<TripEvent>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let (trip_events_tx, _unused_rx) = broadcast::channel(config.event_buffer_size);
        let service = TaxiService::new(config);

        if config.seed_demo_data {
            let admin = service.authenticate_admin(&config.admin_password)?;
            load_demo_data(&service, &admin)?;
        }

        Ok(Self {
            service,
            trip_events_tx,
            metrics: Metrics::new(),
        })
    }
}
