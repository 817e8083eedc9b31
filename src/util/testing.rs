//! Test support: one-time logging setup and reference documents.

use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// The reference order used across tests.
pub const SAMPLE_ORDER: &str = r#"<purchaseOrder orderDate="2024-01-15">
  <shipTo><name>Alice</name><street>1 Main St</street><city>Springfield</city><zip>62704</zip></shipTo>
  <billTo><name>Bob</name><street>2 Oak Ave</street><city>Shelbyville</city><zip>62705</zip></billTo>
  <comment>Rush order</comment>
  <items>
    <item><product>Widget</product><quantity>3</quantity><price>9.99</price></item>
    <item><product>Gadget</product><quantity>1</quantity><price>19.50</price></item>
  </items>
</purchaseOrder>
"#;

/// Install the test subscriber once per process. `RUST_LOG` overrides the default level.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter);

        if tracing::dispatcher::has_been_set() {
            debug!("Tracing subscriber already set");
        } else if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("Error: Failed to set up logging: {}", e);
        }
        info!("Test Setup complete");
    });
}
