use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Install a test logger once per test binary; `RUST_LOG` overrides the level.
pub fn init_test_logger() {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder
            .filter_level(LevelFilter::Info)
            .filter_module("chain_table", LevelFilter::Info)
            .format_timestamp_millis()
            .parse_default_env()
            .is_test(true);
        // Another harness may already have installed a logger.
        let _ = builder.try_init();
    });
}
