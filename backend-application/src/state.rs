use std::sync::Arc;

use backend_domain::ports::{ActivityLogRepository, ChartRenderer, Responder};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub activity_log: Arc<dyn ActivityLogRepository>,
    pub responder: Arc<dyn Responder>,
    pub chart_renderer: Arc<dyn ChartRenderer>,
    pub metrics: Arc<Metrics>,
}
