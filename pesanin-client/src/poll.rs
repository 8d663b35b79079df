//! Background polling of customer order views
//!
//! A [`Poller`] owns a spawned task that fetches on a fixed interval and
//! publishes the latest result on a `watch` channel. The first fetch happens
//! immediately. A failed fetch keeps the last good data and records the error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shared::models::Order;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::ClientResult;
use crate::flows::OrderGateway;

/// Latest state of a polled resource
#[derive(Debug, Clone)]
pub struct PollSnapshot<T> {
    /// Last successfully fetched value
    pub data: Option<T>,
    /// Message of the most recent failure, cleared by the next success
    pub error: Option<String>,
    /// Completed fetch attempts, successful or not
    pub fetches: u64,
}

impl<T> Default for PollSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            fetches: 0,
        }
    }
}

/// Handle to a running poll loop. Dropping it stops the loop.
pub struct Poller<T> {
    rx: watch::Receiver<PollSnapshot<T>>,
    shutdown: CancellationToken,
    handle: JoinHandle<()>,
    _guard: DropGuard,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn a loop calling `fetch` every `interval` until stopped
    pub fn spawn<F, Fut>(name: &'static str, interval: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ClientResult<T>> + Send,
    {
        let (tx, rx) = watch::channel(PollSnapshot::default());
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        let handle = tokio::spawn(async move {
            tracing::debug!(poller = name, ?interval, "Poller started");
            loop {
                let result = tokio::select! {
                    result = fetch() => result,
                    _ = token.cancelled() => break,
                };

                tx.send_modify(|snapshot| {
                    snapshot.fetches += 1;
                    match result {
                        Ok(data) => {
                            snapshot.data = Some(data);
                            snapshot.error = None;
                        }
                        Err(e) => {
                            tracing::debug!(poller = name, error = %e, "Poll failed");
                            snapshot.error = Some(e.user_message());
                        }
                    }
                });

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    _ = token.cancelled() => break,
                }
            }
            tracing::debug!(poller = name, "Poller stopped");
        });

        Self {
            rx,
            _guard: shutdown.clone().drop_guard(),
            shutdown,
            handle,
        }
    }

    /// Independent receiver of every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot<T>> {
        self.rx.clone()
    }

    /// Wait for the next published snapshot. `None` once the loop has ended.
    pub async fn changed(&mut self) -> Option<PollSnapshot<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the loop and wait for the task to exit
    pub async fn stop(self) {
        self.shutdown.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "Poller task ended abnormally");
        }
    }
}

/// Poll the public status of one order
pub fn watch_order(
    orders: Arc<dyn OrderGateway>,
    order_id: impl Into<String>,
    interval: Duration,
) -> Poller<Order> {
    let order_id: Arc<str> = Arc::from(order_id.into());
    Poller::spawn("order_status", interval, move || {
        let orders = orders.clone();
        let order_id = order_id.clone();
        async move { orders.order_status(&order_id).await }
    })
}

/// Poll every order placed at one table
pub fn watch_table_orders(
    orders: Arc<dyn OrderGateway>,
    table_id: impl Into<String>,
    interval: Duration,
) -> Poller<Vec<Order>> {
    let table_id: Arc<str> = Arc::from(table_id.into());
    Poller::spawn("table_orders", interval, move || {
        let orders = orders.clone();
        let table_id = table_id.clone();
        async move { orders.orders_by_table(&table_id).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::flows::fakes::FakeOrders;
    use async_trait::async_trait;
    use shared::models::{OrderCreate, OrderStatus};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Serves queued status results, repeating the last status once drained
    struct ScriptedOrders {
        script: Mutex<VecDeque<ClientResult<OrderStatus>>>,
        last: Mutex<OrderStatus>,
    }

    impl ScriptedOrders {
        fn new(script: Vec<ClientResult<OrderStatus>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                last: Mutex::new(OrderStatus::Pending),
            })
        }

        fn order(id: &str, status: OrderStatus) -> Order {
            let req = OrderCreate {
                table_id: "t1".into(),
                notes: None,
                items: Vec::new(),
            };
            let mut order = FakeOrders::order_for(&req, id);
            order.status = status;
            order
        }
    }

    #[async_trait]
    impl OrderGateway for ScriptedOrders {
        async fn create_order(&self, _req: &OrderCreate) -> ClientResult<Order> {
            unreachable!()
        }

        async fn order_status(&self, order_id: &str) -> ClientResult<Order> {
            let next = self.script.lock().unwrap().pop_front();
            let status = match next {
                Some(Ok(status)) => status,
                Some(Err(e)) => return Err(e),
                None => *self.last.lock().unwrap(),
            };
            *self.last.lock().unwrap() = status;
            Ok(Self::order(order_id, status))
        }

        async fn orders_by_table(&self, table_id: &str) -> ClientResult<Vec<Order>> {
            Ok(vec![
                Self::order("o1", OrderStatus::Paid),
                Self::order(&format!("{table_id}-o2"), OrderStatus::Pending),
            ])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_each_fetch() {
        let orders = ScriptedOrders::new(vec![
            Ok(OrderStatus::Pending),
            Ok(OrderStatus::Paid),
            Ok(OrderStatus::Cooking),
        ]);
        let mut poller = watch_order(orders, "o7", Duration::from_secs(5));

        let first = poller.changed().await.unwrap();
        assert_eq!(first.fetches, 1);
        assert_eq!(first.data.unwrap().status, OrderStatus::Pending);

        let second = poller.changed().await.unwrap();
        assert_eq!(second.data.unwrap().status, OrderStatus::Paid);

        let third = poller.changed().await.unwrap();
        assert_eq!(third.fetches, 3);
        let order = third.data.unwrap();
        assert_eq!(order.id, "o7");
        assert_eq!(order.status, OrderStatus::Cooking);

        poller.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_keeps_last_data() {
        let orders = ScriptedOrders::new(vec![
            Ok(OrderStatus::Paid),
            Err(ClientError::Api {
                status: 502,
                message: "bad gateway".into(),
            }),
            Ok(OrderStatus::Done),
        ]);
        let mut poller = watch_order(orders, "o1", Duration::from_secs(5));

        poller.changed().await.unwrap();
        let failed = poller.changed().await.unwrap();
        assert_eq!(failed.fetches, 2);
        assert!(failed.error.is_some());
        assert_eq!(failed.data.unwrap().status, OrderStatus::Paid);

        let recovered = poller.changed().await.unwrap();
        assert!(recovered.error.is_none());
        assert_eq!(recovered.data.unwrap().status, OrderStatus::Done);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_the_loop() {
        let orders = ScriptedOrders::new(Vec::new());
        let mut poller = watch_table_orders(orders, "t3", Duration::from_secs(10));
        let snapshot = poller.changed().await.unwrap();
        assert_eq!(snapshot.data.unwrap().len(), 2);

        let mut rx = poller.subscribe();
        assert!(poller.is_running());
        poller.stop().await;

        // sender dropped with the task
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let orders = ScriptedOrders::new(Vec::new());
        let poller = watch_order(orders, "o1", Duration::from_secs(5));
        let mut rx = poller.subscribe();
        drop(poller);

        // drains whatever was published, then observes the closed channel
        while rx.changed().await.is_ok() {}
        assert!(rx.borrow().fetches <= 1);
    }
}
