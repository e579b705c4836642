#[cfg(feature = "profile-tracy")]
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, Registry};
    let tracy_layer = tracing_tracy::TracyLayer::default();
    let subscriber = Registry::default().with(tracy_layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return;
    }

    tracy_client::set_thread_name!("meshcache-main");
    tracy_client::frame_mark();
}

/// Installs a fmt subscriber filtered by `RUST_LOG`. Safe to call more than once.
#[cfg(not(feature = "profile-tracy"))]
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .try_init();
}
