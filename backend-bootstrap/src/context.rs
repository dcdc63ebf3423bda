use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use backend_application::{AppState, Metrics};
use backend_domain::ports::ActivityLogRepository;
use backend_infrastructure::{
    sheets_token_provider, AppConfig, SheetsActivityLog, SvgChartRenderer, TelegramResponder,
};

pub struct AppContext {
    pub state: AppState,
    pub telegram: Arc<TelegramResponder>,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config()?;
        let sheets_config = config.to_sheets_config();

        let timeout = Duration::from_secs(runtime_config.request_timeout_seconds);
        let token_provider = sheets_token_provider(&sheets_config)?;
        let activity_log = Arc::new(SheetsActivityLog::new(
            &sheets_config,
            token_provider,
            timeout,
        )?);
        activity_log.ensure_header().await?;

        let telegram = Arc::new(TelegramResponder::new(&runtime_config.bot_token, timeout)?);

        let state = AppState {
            config: runtime_config,
            activity_log,
            responder: telegram.clone(),
            chart_renderer: Arc::new(SvgChartRenderer::new()),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state, telegram })
    }
}
