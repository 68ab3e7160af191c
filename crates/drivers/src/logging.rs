use env_logger::{Builder, Env};

/// `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    let env = Env::default().default_filter_or("info");
    let _ = Builder::from_env(env)
        .format_target(false)
        .format_timestamp(None)
        .try_init();
}
