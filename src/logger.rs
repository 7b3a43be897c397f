// Forwards tracing events from the plugin into the OBS log
use std::ffi::c_int;
use std::fmt::{self, Write};

use tracing::field::{Field, Visit};
use tracing::{info, Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::api::ObsApi;
use crate::config::LogConfig;
use crate::ffi::{LOG_DEBUG, LOG_ERROR, LOG_INFO, LOG_WARNING};

pub const PREFIX: &str = "subsampling-detector";

/// Layer writing each event as one prefixed line through `write`.
pub struct BlogLayer<W> {
    write: W,
}

impl<W> BlogLayer<W>
where
    W: Fn(c_int, &str) + Send + Sync + 'static,
{
    pub fn new(write: W) -> Self {
        Self { write }
    }
}

impl<S, W> Layer<S> for BlogLayer<W>
where
    S: Subscriber,
    W: Fn(c_int, &str) + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut line = LineVisitor::default();
        event.record(&mut line);
        (self.write)(obs_level(event.metadata().level()), &line.finish());
    }
}

fn obs_level(level: &Level) -> c_int {
    if *level == Level::ERROR {
        LOG_ERROR
    } else if *level == Level::WARN {
        LOG_WARNING
    } else if *level == Level::INFO {
        LOG_INFO
    } else {
        LOG_DEBUG
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn finish(self) -> String {
        format!("[{PREFIX}] {}{}", self.message, self.fields)
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Install the OBS log bridge as the process-wide subscriber.
pub fn init(api: &'static ObsApi, config: &LogConfig) {
    let subscriber = tracing_subscriber::registry()
        .with(config.level)
        .with(BlogLayer::new(move |level, line: &str| api.log(level, line)));

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        api.log(
            LOG_WARNING,
            &format!("[{PREFIX}] another tracing subscriber is installed, plugin logs are routed there"),
        );
    }

    info!(level = %config.level, "=== session started ===");
}

pub fn finalize() {
    info!("=== session ended ===");
}
