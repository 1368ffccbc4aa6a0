//! Order-update collaborator
//!
//! [`OrderGateway`] is the seam between the conference session and the
//! backend that owns order records. The session reads the latest order
//! through it and writes a whole updated order back, guarded by the version
//! token it read.
//!
//! [`InMemoryGateway`] keeps orders in a `DashMap`. It enforces the version
//! check atomically per order and supports failure injection for tests.

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;
use shared::conference::Order;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::GatewayError;

/// Backend access for order records
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Read the latest stored state of an order
    async fn fetch_order(&self, order_id: &str) -> Result<Order, GatewayError>;

    /// Replace a stored order with `order`
    ///
    /// Fails with `GatewayError::Conflict` when the stored version is no
    /// longer `expected_version`. Returns the stored order after the write.
    async fn replace_order(
        &self,
        order_id: &str,
        order: &Order,
        expected_version: u64,
    ) -> Result<Order, GatewayError>;
}

/// In-process order store
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    orders: DashMap<String, Order>,
    fail_next_replace: Mutex<Option<GatewayError>>,
    replace_count: AtomicUsize,
    latency: Option<Duration>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Store an order, replacing any order with the same ID
    pub fn insert(&self, order: Order) {
        self.orders.insert(order.id.clone(), order);
    }

    /// Current stored state of an order
    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.get(order_id).map(|entry| entry.value().clone())
    }

    /// Make the next `replace_order` call fail with `error`
    pub fn fail_next_replace(&self, error: GatewayError) {
        *self.fail_next_replace.lock() = Some(error);
    }

    /// Number of successful writes
    pub fn replace_count(&self) -> usize {
        self.replace_count.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl OrderGateway for InMemoryGateway {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, GatewayError> {
        self.simulate_latency().await;
        self.get(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))
    }

    async fn replace_order(
        &self,
        order_id: &str,
        order: &Order,
        expected_version: u64,
    ) -> Result<Order, GatewayError> {
        self.simulate_latency().await;

        if let Some(error) = self.fail_next_replace.lock().take() {
            tracing::debug!(order_id, error = %error, "Injected replace failure");
            return Err(error);
        }

        let mut entry = self
            .orders
            .get_mut(order_id)
            .ok_or_else(|| GatewayError::NotFound(order_id.to_string()))?;

        let stored = entry.value_mut();
        if stored.version != expected_version {
            return Err(GatewayError::Conflict {
                expected: expected_version,
                actual: stored.version,
            });
        }

        let mut next = order.clone();
        next.id = order_id.to_string();
        next.version = stored.version + 1;
        *stored = next.clone();
        drop(entry);

        self.replace_count.fetch_add(1, Ordering::SeqCst);
        Ok(next)
    }
}
