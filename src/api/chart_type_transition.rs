use std::sync::Arc;

use tracing::debug;

use crate::core::ChartFamily;

use super::ChartConfiguration;

/// Switches the global chart family.
///
/// Every series follows the new family (series already on it keep their
/// `Arc`). Entering a single-dimension family turns data labels on; otherwise
/// the flag is left alone. Role map and per-entity options stay in place so
/// switching back restores the prior setup.
#[must_use]
pub fn transition_global_family(
    current: &ChartConfiguration,
    family: ChartFamily,
) -> ChartConfiguration {
    let previous = &current.global_series_type;
    let mut next = current.clone();

    let mut retyped = 0usize;
    for options in next.series_options.values_mut() {
        if options.family != family {
            *options = Arc::new(options.with_family(family.clone()));
            retyped += 1;
        }
    }

    if family.is_single_dimension() && *previous != family {
        next.show_data_labels = true;
    }

    debug!(
        from = %previous,
        to = %family,
        series = next.series_options.len(),
        retyped,
        "global chart family changed"
    );
    next.global_series_type = family;
    next
}
