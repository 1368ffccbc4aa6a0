//! ConferenceSession - one operator conferring one order
//!
//! The session owns the local order snapshot and is the only place that
//! talks to the [`OrderGateway`].
//!
//! # Command Flow
//!
//! ```text
//! execute(cmd)
//!     ├─ 1. Apply action to the snapshot (local errors return here, no network)
//!     ├─ 2. Fetch latest order (cancellable)
//!     ├─ 3. Version differs from snapshot → adopt latest, return Conflict
//!     ├─ 4. Apply action to latest, stamp mapped status ID
//!     ├─ 5. Replace order guarded by the read version (cancellable)
//!     └─ 6. Commit acknowledged order to the snapshot
//! ```
//!
//! The snapshot only changes after the collaborator acknowledges a write, so
//! a failed or cancelled write leaves the session where it was.

use shared::conference::{ConferenceProgress, ConferenceStatus, Order, StatusMapping};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::actions::CommandAction;
use crate::command::ConferenceCommand;
use crate::error::{ConferenceError, ConferenceResult, GatewayError};
use crate::gateway::OrderGateway;
use crate::scan::{ScanDebounceConfig, ScanDebouncer};
use crate::traits::{ActionOutcome, ConferenceAction, Notice};

/// Result of one executed command
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResponse {
    pub notice: Notice,
    pub status: ConferenceStatus,
    pub progress: ConferenceProgress,
    /// Whether the collaborator stored a new order state
    pub persisted: bool,
}

pub struct ConferenceSession<G: OrderGateway> {
    gateway: Arc<G>,
    mapping: StatusMapping,
    snapshot: Order,
    status: ConferenceStatus,
    cancel: CancellationToken,
    debouncer: ScanDebouncer,
    scan_target: Option<usize>,
}

impl<G: OrderGateway> ConferenceSession<G> {
    /// Load an order and start conferring it
    pub async fn open(
        gateway: Arc<G>,
        mapping: StatusMapping,
        order_id: &str,
        debounce: ScanDebounceConfig,
    ) -> ConferenceResult<Self> {
        let cancel = CancellationToken::new();
        let order = with_cancel(&cancel, gateway.fetch_order(order_id)).await?;
        let status = mapping.resolve(order.status.as_deref());

        tracing::info!(
            order_id = %order.id,
            number = order.number().unwrap_or("-"),
            items = order.items.len(),
            status = %status,
            "Conference session opened"
        );

        Ok(Self {
            gateway,
            mapping,
            snapshot: order,
            status,
            cancel,
            debouncer: ScanDebouncer::new(debounce),
            scan_target: None,
        })
    }

    pub fn order(&self) -> &Order {
        &self.snapshot
    }

    pub fn status(&self) -> ConferenceStatus {
        self.status
    }

    pub fn progress(&self) -> ConferenceProgress {
        self.snapshot.progress()
    }

    pub fn mapping(&self) -> &StatusMapping {
        &self.mapping
    }

    /// Token cancelling every in-flight and future call of this session
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Leave the conference screen; pending results are discarded
    pub fn close(&mut self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(order_id = %self.snapshot.id, "Conference session closed");
        }
        self.cancel.cancel();
        self.end_scan();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Replace the snapshot with the latest stored order
    pub async fn refresh(&mut self) -> ConferenceResult<&Order> {
        let latest = with_cancel(&self.cancel, self.gateway.fetch_order(&self.snapshot.id)).await?;
        self.ensure_open()?;
        self.adopt(latest);
        Ok(&self.snapshot)
    }

    /// Execute one operator command
    pub async fn execute(&mut self, command: ConferenceCommand) -> ConferenceResult<SessionResponse> {
        self.ensure_open()?;
        let action = CommandAction::from(&command);

        // 1. Local validation against the snapshot
        if let ActionOutcome::Unchanged { notice } = action.apply(&self.snapshot)? {
            return Ok(self.response(notice, false));
        }

        // 2. Latest stored state
        let order_id = self.snapshot.id.clone();
        let latest = with_cancel(&self.cancel, self.gateway.fetch_order(&order_id)).await?;
        self.ensure_open()?;

        // 3. Someone else wrote since we loaded
        if latest.version != self.snapshot.version {
            let expected = self.snapshot.version;
            let actual = latest.version;
            tracing::warn!(order_id = %order_id, expected, actual, command = command.name(), "Order changed concurrently");
            self.adopt(latest);
            return Err(ConferenceError::Conflict {
                order_id,
                expected,
                actual,
            });
        }

        // 4. Apply to latest and stamp status
        let (reconciled, notice) = match action.apply(&latest)? {
            ActionOutcome::Changed { reconciled, notice } => (reconciled, notice),
            ActionOutcome::Unchanged { notice } => return Ok(self.response(notice, false)),
        };
        let status = reconciled.status;
        let mut next = reconciled.order;
        next.status = Some(self.mapping.id_for(status).to_string());

        if next == latest {
            tracing::debug!(order_id = %order_id, command = command.name(), "Nothing to write");
            return Ok(self.response(notice, false));
        }

        // 5. Guarded write
        let stored = with_cancel(
            &self.cancel,
            self.gateway.replace_order(&order_id, &next, latest.version),
        )
        .await
        .map_err(|e| match e {
            ConferenceError::Gateway(GatewayError::Conflict { expected, actual }) => ConferenceError::Conflict {
                order_id: order_id.clone(),
                expected,
                actual,
            },
            other => other,
        })?;
        self.ensure_open()?;

        // 6. Commit
        self.snapshot = stored;
        self.status = status;

        tracing::info!(
            order_id = %order_id,
            command = command.name(),
            status = %status,
            version = self.snapshot.version,
            "Conference updated"
        );

        Ok(self.response(notice, true))
    }

    /// Open the scanner for one item
    pub fn begin_scan(&mut self, item_index: usize) -> ConferenceResult<()> {
        self.ensure_open()?;
        if self.snapshot.item(item_index).is_none() {
            return Err(ConferenceError::ItemNotFound {
                index: item_index,
                len: self.snapshot.items.len(),
            });
        }
        self.debouncer.reset();
        self.scan_target = Some(item_index);
        Ok(())
    }

    pub fn end_scan(&mut self) {
        self.scan_target = None;
    }

    /// Item the scanner is open for
    pub fn scan_target(&self) -> Option<usize> {
        self.scan_target
    }

    /// Handle one raw scan from the camera
    ///
    /// Returns `Ok(None)` when the scan was suppressed as a repeat.
    pub async fn scan(&mut self, code: &str) -> ConferenceResult<Option<SessionResponse>> {
        self.scan_at(code, Instant::now()).await
    }

    /// [`scan`](Self::scan) with an explicit timestamp
    pub async fn scan_at(&mut self, code: &str, now: Instant) -> ConferenceResult<Option<SessionResponse>> {
        self.ensure_open()?;
        let item_index = self.scan_target.ok_or(ConferenceError::NoScanTarget)?;
        if !self.debouncer.check(code, now).is_accepted() {
            return Ok(None);
        }

        let response = self
            .execute(ConferenceCommand::Scan {
                item_index,
                code: code.to_string(),
            })
            .await?;
        if response.notice.closes_scanner() {
            self.end_scan();
        }
        Ok(Some(response))
    }

    fn ensure_open(&self) -> ConferenceResult<()> {
        if self.cancel.is_cancelled() {
            return Err(ConferenceError::Cancelled);
        }
        Ok(())
    }

    fn adopt(&mut self, latest: Order) {
        self.status = self.mapping.resolve(latest.status.as_deref());
        self.snapshot = latest;
    }

    fn response(&self, notice: Notice, persisted: bool) -> SessionResponse {
        SessionResponse {
            notice,
            status: self.status,
            progress: self.snapshot.progress(),
            persisted,
        }
    }
}

/// Run a gateway call unless the session is cancelled first
async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> ConferenceResult<T>
where
    F: Future<Output = Result<T, GatewayError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ConferenceError::Cancelled),
        result = fut => result.map_err(ConferenceError::from),
    }
}
