//! REST-backed order-update collaborator
//!
//! The API replaces whole orders and has no conditional write, so the
//! version token is checked against a fresh read right before the PUT, and
//! the stored order is read back after it.

use async_trait::async_trait;
use conference::{GatewayError, OrderGateway};
use shared::conference::Order;

use crate::HttpClient;

#[async_trait]
impl OrderGateway for HttpClient {
    async fn fetch_order(&self, order_id: &str) -> Result<Order, GatewayError> {
        Ok(self.fetch_conference(order_id).await?)
    }

    async fn replace_order(
        &self,
        order_id: &str,
        order: &Order,
        expected_version: u64,
    ) -> Result<Order, GatewayError> {
        let current = self.fetch_conference(order_id).await?;
        if current.version != expected_version {
            return Err(GatewayError::Conflict {
                expected: expected_version,
                actual: current.version,
            });
        }

        if let Err(e) = self.replace_conference(order_id, order).await {
            tracing::error!(order_id, error = %e, "Failed to replace order");
            return Err(e.into());
        }

        Ok(self.fetch_conference(order_id).await?)
    }
}
