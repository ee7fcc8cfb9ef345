use std::sync::Arc;

use crate::application::context::AppContext;
use crate::interface::relay::RelayService;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub relay: RelayService,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(ctx: Arc<AppContext>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            relay: RelayService::new(ctx.clone()),
            ctx,
            metrics,
        }
    }
}
