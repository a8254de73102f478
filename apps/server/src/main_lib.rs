use std::sync::Arc;

use tickergate_market_data::{MarketDataProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Arc<Self> {
        Arc::new(Self { provider })
    }
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn build_state() -> anyhow::Result<Arc<AppState>> {
    let provider = YahooProvider::new()?;
    tracing::info!("Using {} market data provider", provider.id());
    Ok(AppState::new(Arc::new(provider)))
}
