//! Actor-based concurrency for the ledger
//!
//! The core [`Ledger`] is a synchronous state machine with no interior
//! locking; intermediate states must never be observable. This module
//! embeds it behind the single-writer pattern using Tokio actors:
//! - One logical writer task serializes every mutation
//! - Reads are answered by the same task, so they always see a committed
//!   snapshot
//! - Async message passing with backpressure (bounded mailbox)
//! - Journal entries fan out to subscribers after the mutation commits
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Host application                      │
//! │        Many tasks holding LedgerHandle clones         │
//! └─────────────────────┬────────────────────────────────┘
//!                       │
//!                       │ mpsc::channel (bounded)
//!                       ▼
//! ┌──────────────────────────────────────────────────────┐
//! │              LedgerActor (Single Task)                │
//! │   owns Ledger, applies one operation at a time        │
//! └─────────────────────┬────────────────────────────────┘
//!                       │
//!                       │ broadcast::channel
//!                       ▼
//! ┌──────────────────────────────────────────────────────┐
//! │        Event subscribers (JournalEntry stream)        │
//! └──────────────────────────────────────────────────────┘
//! ```

use crate::metrics::Metrics;
use crate::types::{Address, Amount, JournalEntry, TokenMetadata};
use crate::{Config, Error, Ledger, Result};
use std::time::Instant;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio_stream::wrappers::BroadcastStream;

/// Message sent to the ledger actor
pub enum LedgerMessage {
    /// Move funds from the caller to a recipient
    Transfer {
        /// Effective caller identity
        caller: Address,
        /// Recipient
        to: Address,
        /// Amount to move
        amount: Amount,
        /// Response channel
        response: oneshot::Sender<Result<bool>>,
    },

    /// Overwrite an allowance entry
    Approve {
        /// Effective caller identity (allowance owner)
        caller: Address,
        /// Authorized spender
        spender: Address,
        /// New allowance
        amount: Amount,
        /// Response channel
        response: oneshot::Sender<Result<bool>>,
    },

    /// Move funds out of a pre-approved account
    TransferFrom {
        /// Effective caller identity (the spender)
        caller: Address,
        /// Account being debited
        from: Address,
        /// Recipient
        to: Address,
        /// Amount to move
        amount: Amount,
        /// Response channel
        response: oneshot::Sender<Result<bool>>,
    },

    /// Query a balance
    BalanceOf {
        /// Account to read
        account: Address,
        /// Response channel
        response: oneshot::Sender<Amount>,
    },

    /// Query a remaining allowance
    Allowance {
        /// Allowance owner
        owner: Address,
        /// Authorized spender
        spender: Address,
        /// Response channel
        response: oneshot::Sender<Amount>,
    },

    /// Query the total supply
    TotalSupply {
        /// Response channel
        response: oneshot::Sender<Amount>,
    },

    /// Query token metadata
    Metadata {
        /// Response channel
        response: oneshot::Sender<TokenMetadata>,
    },

    /// Read journal entries starting at a sequence number
    Events {
        /// First sequence number to include
        since: u64,
        /// Response channel
        response: oneshot::Sender<Vec<JournalEntry>>,
    },

    /// Shutdown actor
    Shutdown,
}

/// Actor that processes ledger messages
pub struct LedgerActor {
    /// The ledger, owned exclusively by this task
    ledger: Ledger,

    /// Mailbox for incoming messages
    mailbox: mpsc::Receiver<LedgerMessage>,

    /// Fan-out channel for committed journal entries
    events: broadcast::Sender<JournalEntry>,

    /// Journal cursor: entries before this index are already published
    published: usize,

    /// Metrics for this embedding
    metrics: Metrics,
}

impl LedgerActor {
    /// Create new actor.
    ///
    /// Entries already in the journal (the construction mint) predate every
    /// subscriber and are not broadcast.
    pub fn new(
        ledger: Ledger,
        mailbox: mpsc::Receiver<LedgerMessage>,
        events: broadcast::Sender<JournalEntry>,
        metrics: Metrics,
    ) -> Self {
        let published = ledger.events().len();
        Self {
            ledger,
            mailbox,
            events,
            published,
            metrics,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.mailbox.recv().await {
            match msg {
                LedgerMessage::Shutdown => break,
                msg => self.handle_message(msg),
            }
        }
        tracing::debug!("Ledger actor stopped");
    }

    /// Handle a single message
    fn handle_message(&mut self, msg: LedgerMessage) {
        match msg {
            LedgerMessage::Transfer {
                caller,
                to,
                amount,
                response,
            } => {
                let started = Instant::now();
                let result = self.ledger.transfer(caller, to, amount);
                self.metrics
                    .record_op_duration(started.elapsed().as_secs_f64());

                match &result {
                    Ok(_) => {
                        self.metrics.record_transfer();
                        tracing::debug!("Transfer applied: {} -> {} ({})", caller, to, amount);
                    }
                    Err(e) => {
                        self.metrics.record_rejection();
                        tracing::debug!("Transfer rejected: {}", e);
                    }
                }

                self.publish_new_entries();
                let _ = response.send(result);
            }

            LedgerMessage::Approve {
                caller,
                spender,
                amount,
                response,
            } => {
                let started = Instant::now();
                let result = self.ledger.approve(caller, spender, amount);
                self.metrics
                    .record_op_duration(started.elapsed().as_secs_f64());

                match &result {
                    Ok(_) => {
                        self.metrics.record_approval();
                        tracing::debug!(
                            "Approval applied: {} allows {} ({})",
                            caller,
                            spender,
                            amount
                        );
                    }
                    Err(e) => {
                        self.metrics.record_rejection();
                        tracing::debug!("Approval rejected: {}", e);
                    }
                }

                self.publish_new_entries();
                let _ = response.send(result);
            }

            LedgerMessage::TransferFrom {
                caller,
                from,
                to,
                amount,
                response,
            } => {
                let started = Instant::now();
                let result = self.ledger.transfer_from(caller, from, to, amount);
                self.metrics
                    .record_op_duration(started.elapsed().as_secs_f64());

                match &result {
                    Ok(_) => {
                        self.metrics.record_transfer();
                        tracing::debug!(
                            "Delegated transfer applied: {} moved {} -> {} ({})",
                            caller,
                            from,
                            to,
                            amount
                        );
                    }
                    Err(e) => {
                        self.metrics.record_rejection();
                        tracing::debug!("Delegated transfer rejected: {}", e);
                    }
                }

                self.publish_new_entries();
                let _ = response.send(result);
            }

            LedgerMessage::BalanceOf { account, response } => {
                let _ = response.send(self.ledger.balance_of(account));
            }

            LedgerMessage::Allowance {
                owner,
                spender,
                response,
            } => {
                let _ = response.send(self.ledger.allowance(owner, spender));
            }

            LedgerMessage::TotalSupply { response } => {
                let _ = response.send(self.ledger.total_supply());
            }

            LedgerMessage::Metadata { response } => {
                let _ = response.send(self.ledger.metadata().clone());
            }

            LedgerMessage::Events { since, response } => {
                let entries = self
                    .ledger
                    .events()
                    .get(since as usize..)
                    .unwrap_or(&[])
                    .to_vec();
                let _ = response.send(entries);
            }

            LedgerMessage::Shutdown => {
                // Handled in main loop
            }
        }
    }

    /// Broadcast journal entries committed since the last publish.
    ///
    /// A send error only means there are no subscribers right now.
    fn publish_new_entries(&mut self) {
        let entries = &self.ledger.events()[self.published..];
        self.metrics.record_events(entries.len());
        for entry in entries {
            let _ = self.events.send(entry.clone());
        }
        self.published = self.ledger.events().len();
    }
}

/// Handle for sending messages to the actor
#[derive(Clone)]
pub struct LedgerHandle {
    sender: mpsc::Sender<LedgerMessage>,
    events: broadcast::Sender<JournalEntry>,
    metrics: Metrics,
}

impl LedgerHandle {
    /// Create new handle
    pub fn new(
        sender: mpsc::Sender<LedgerMessage>,
        events: broadcast::Sender<JournalEntry>,
        metrics: Metrics,
    ) -> Self {
        Self {
            sender,
            events,
            metrics,
        }
    }

    /// Move `amount` from `caller` to `to`
    pub async fn transfer(&self, caller: Address, to: Address, amount: Amount) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::Transfer {
                caller,
                to,
                amount,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Set the allowance of `spender` on `caller` to `amount`
    pub async fn approve(&self, caller: Address, spender: Address, amount: Amount) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::Approve {
                caller,
                spender,
                amount,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Move `amount` from `from` to `to` against `caller`'s allowance
    pub async fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::TransferFrom {
                caller,
                from,
                to,
                amount,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))?
    }

    /// Balance of `account`.
    ///
    /// The query itself never fails; the `Result` covers the transport.
    pub async fn balance_of(&self, account: Address) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::BalanceOf {
                account,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Remaining allowance of `spender` on `owner`
    pub async fn allowance(&self, owner: Address, spender: Address) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::Allowance {
                owner,
                spender,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Total supply
    pub async fn total_supply(&self) -> Result<Amount> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::TotalSupply { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Token metadata
    pub async fn metadata(&self) -> Result<TokenMetadata> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::Metadata { response: tx })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Journal entries with `sequence >= since`, oldest first
    pub async fn events(&self, since: u64) -> Result<Vec<JournalEntry>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(LedgerMessage::Events {
                since,
                response: tx,
            })
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;

        rx.await
            .map_err(|_| Error::Concurrency("Response channel closed".to_string()))
    }

    /// Subscribe to journal entries committed after this call
    pub fn subscribe(&self) -> broadcast::Receiver<JournalEntry> {
        self.events.subscribe()
    }

    /// Subscribe as an async stream
    pub fn event_stream(&self) -> BroadcastStream<JournalEntry> {
        BroadcastStream::new(self.events.subscribe())
    }

    /// Metrics for this embedding
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Shutdown actor
    pub async fn shutdown(&self) -> Result<()> {
        self.sender
            .send(LedgerMessage::Shutdown)
            .await
            .map_err(|_| Error::Concurrency("Actor mailbox closed".to_string()))?;
        Ok(())
    }
}

/// Spawn the ledger actor, taking ownership of the ledger.
pub fn spawn_ledger_actor(ledger: Ledger, config: &Config) -> LedgerHandle {
    let (tx, rx) = mpsc::channel(config.runtime.mailbox_capacity);
    let (events_tx, _) = broadcast::channel(config.runtime.event_capacity);
    let metrics = Metrics::default();
    let actor = LedgerActor::new(ledger, rx, events_tx.clone(), metrics.clone());

    tokio::spawn(async move {
        actor.run().await;
    });

    LedgerHandle::new(tx, events_tx, metrics)
}
