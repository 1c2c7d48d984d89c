//! Declarative action binding.
//!
//! Walks the action catalog and asks the host page to wire each action's
//! DOM element. Missing elements are expected (a host may render only a
//! verify button and no close button) and leave the action inert.

use tracing::debug;

use kyc_core::domain::fields::ActionCatalog;

use crate::application::ports::HostPage;

/// Binds every catalog action to its current DOM id.
///
/// Returns how many actions were actually bound.
pub fn bind_actions(page: &dyn HostPage, catalog: &ActionCatalog) -> usize {
    let mut bound = 0;
    for descriptor in catalog.iter() {
        if page.bind_action(&descriptor.dom_id, descriptor.name) {
            debug!(action = %descriptor.name, dom_id = %descriptor.dom_id, "action bound");
            bound += 1;
        } else {
            debug!(
                action = %descriptor.name,
                dom_id = %descriptor.dom_id,
                "action element not found, left unbound"
            );
        }
    }
    bound
}
