use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info};
use uuid::Uuid;

/// Wrapper around the mpsc sender so services do not deal with channel
/// errors directly.
#[derive(Clone, Debug)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event, logging instead of failing when the receiver is gone.
    /// Event delivery is best-effort; business state is already committed by
    /// the time an event is emitted.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            error!("Failed to publish event: {}", e);
        }
    }
}

/// Events emitted after state changes commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    // Shopper side
    OrderCreated(Uuid),
    OrderStatusChanged {
        order_id: Uuid,
        old_status: String,
        new_status: String,
    },

    // Store side
    StoreSaleRecorded {
        sale_id: Uuid,
        store_id: Uuid,
    },
    StockRequestCreated(Uuid),
    StockRequestStatusChanged {
        request_id: Uuid,
        old_status: String,
        new_status: String,
    },
    StockTransferred {
        saree_id: Uuid,
        store_id: Uuid,
        quantity: i32,
    },
}

/// Consumes events from the channel and logs them. Runs as a background
/// task for the lifetime of the server.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::OrderCreated(order_id) => {
                info!(order_id = %order_id, "order created");
            }
            Event::OrderStatusChanged {
                order_id,
                old_status,
                new_status,
            } => {
                info!(order_id = %order_id, %old_status, %new_status, "order status changed");
            }
            Event::StoreSaleRecorded { sale_id, store_id } => {
                info!(sale_id = %sale_id, store_id = %store_id, "store sale recorded");
            }
            Event::StockRequestCreated(request_id) => {
                info!(request_id = %request_id, "stock request created");
            }
            Event::StockRequestStatusChanged {
                request_id,
                old_status,
                new_status,
            } => {
                info!(request_id = %request_id, %old_status, %new_status, "stock request status changed");
            }
            Event::StockTransferred {
                saree_id,
                store_id,
                quantity,
            } => {
                info!(saree_id = %saree_id, store_id = %store_id, quantity, "stock transferred to store");
            }
        }
    }

    info!("Event processing loop stopped");
}
