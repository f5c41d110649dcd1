//! # Cache Invalidation Bus
//!
//! Mutations publish the data scopes they touched; every list screen
//! listens and marks its own cache stale when its scope comes up. The bus
//! only signals staleness; refetching happens on the next refresh, and
//! cached values stay visible until then.
//!
//! The fan-out matters because the server moves data across resources:
//! creating an order changes the orders list, the dashboard aggregates,
//! product stock levels, and the stock ledger all at once.

use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the invalidation channel. Staleness marks are tiny and a
/// lagged receiver just re-invalidates, so the buffer can stay small.
const BUS_CAPACITY: usize = 32;

/// One invalidation domain. Screens subscribe to exactly one scope;
/// mutations may publish several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Products,
    Customers,
    Suppliers,
    Orders,
    Expenses,
    Notes,
    FixedAssets,
    StockMovements,
    Dashboard,
    Reports,
    Profile,
}

/// Broadcast bus carrying invalidation scopes.
#[derive(Debug, Clone)]
pub struct InvalidationBus {
    tx: broadcast::Sender<Scope>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        InvalidationBus { tx }
    }

    /// Subscribes to every scope published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Scope> {
        self.tx.subscribe()
    }

    /// Publishes one scope. Nobody listening is fine.
    pub fn publish(&self, scope: Scope) {
        debug!(?scope, "Publishing invalidation");
        let _ = self.tx.send(scope);
    }

    /// Publishes several scopes in order.
    pub fn publish_all(&self, scopes: &[Scope]) {
        for scope in scopes {
            self.publish(*scope);
        }
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        InvalidationBus::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_published_scopes() {
        let bus = InvalidationBus::new();
        let mut rx = bus.subscribe();

        bus.publish_all(&[Scope::Orders, Scope::Dashboard]);

        assert_eq!(rx.recv().await.unwrap(), Scope::Orders);
        assert_eq!(rx.recv().await.unwrap(), Scope::Dashboard);
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let bus = InvalidationBus::new();
        bus.publish(Scope::Products);
    }
}
