//! Process-wide provider priority.

use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::info;

/// Current global chain. The value is always a complete sequence; updates
/// replace the whole `Arc`.
fn provider_chain() -> &'static RwLock<Arc<[String]>> {
    static PROVIDER_CHAIN: OnceLock<RwLock<Arc<[String]>>> = OnceLock::new();
    PROVIDER_CHAIN.get_or_init(|| RwLock::new(Arc::from(Vec::new())))
}

/// Replaces the global provider chain. Earlier names take precedence.
///
/// Visible to every `chain()` call made after this returns.
pub fn set_global_provider_chain<I, S>(order: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let order: Arc<[String]> = order.into_iter().map(Into::into).collect();
    info!(chain = ?order, "Provider chain updated");

    let mut current = provider_chain()
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *current = order;
}

/// Snapshot of the global provider chain.
pub fn global_provider_chain() -> Arc<[String]> {
    provider_chain()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
