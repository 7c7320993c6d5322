use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};

/// Install the global subscriber. `LOG_FORMAT=json` switches to one JSON object per line.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,tower_http=info"))
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));

    let json = std::env::var("LOG_FORMAT").map(|v| v.eq_ignore_ascii_case("json")).unwrap_or(false);
    let fmt_layer = if json {
        fmt::layer().json().with_target(false).boxed()
    } else {
        fmt::layer().with_target(false).with_level(true).boxed()
    };
    let subscriber = Registry::default().with(env_filter).with(fmt_layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}
