//! DNS resolver initialization.

use std::sync::Arc;
use std::time::Duration;

use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Initializes the resolver used for ASN origin TXT queries.
///
/// Uses the default upstream configuration with short timeouts so that a
/// dead resolver fails well inside the registry timeout.
pub fn init_resolver() -> Arc<TokioAsyncResolver> {
    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.attempts = DNS_ATTEMPTS;
    // Query names are fully qualified; never append search domains
    opts.ndots = 0;
    // Every lookup is a live query
    opts.cache_size = 0;

    Arc::new(TokioAsyncResolver::tokio(ResolverConfig::default(), opts))
}
