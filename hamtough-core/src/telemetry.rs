//! Counters emitted when the `metrics` feature is enabled. Without the
//! feature every recorder compiles to nothing.

#[cfg(feature = "metrics")]
pub(crate) fn record_hamilton_cache_hit() {
    metrics::counter!("hamilton_cache_hits").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_hamilton_cache_hit() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_cut_cache_hit() {
    metrics::counter!("cut_cache_hits").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_cut_cache_hit() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_hamilton_search() {
    metrics::counter!("hamilton_searches").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_hamilton_search() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_toughness_scan() {
    metrics::counter!("toughness_scans").increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_toughness_scan() {}
