use std::sync::Arc;

use chatdeck_core::{DeckError, ResponseRequest, Responder};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A request together with what the responder made of it.
pub type Reply = (ResponseRequest, Result<String, DeckError>);

/// Runs the responder off the UI loop so the screen keeps redrawing while a
/// reply is pending. Requests are answered one at a time, in order.
pub struct ResponderWorker {
    tx: mpsc::UnboundedSender<ResponseRequest>,
    rx: mpsc::UnboundedReceiver<Reply>,
    handle: JoinHandle<()>,
    name: String,
}

impl ResponderWorker {
    pub fn spawn(responder: Box<dyn Responder>) -> Self {
        let responder: Arc<dyn Responder> = Arc::from(responder);
        let name = responder.name().to_string();
        let (tx, mut requests) = mpsc::unbounded_channel::<ResponseRequest>();
        let (reply_tx, rx) = mpsc::unbounded_channel::<Reply>();

        let handle = tokio::spawn(async move {
            while let Some(request) = requests.recv().await {
                let reply = responder.respond(&request).await;
                if reply_tx.send((request, reply)).is_err() {
                    break;
                }
            }
            tracing::debug!("responder worker stopped");
        });

        Self { tx, rx, handle, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue a request. Fails only if the worker task has gone away.
    pub fn send(&self, request: ResponseRequest) -> anyhow::Result<()> {
        self.tx
            .send(request)
            .map_err(|_| anyhow::anyhow!("responder worker is not running"))
    }

    /// A finished reply, if one is ready.
    pub fn try_recv(&mut self) -> Option<Reply> {
        self.rx.try_recv().ok()
    }

    /// Wait for the next reply.
    pub async fn recv(&mut self) -> Option<Reply> {
        self.rx.recv().await
    }
}

impl Drop for ResponderWorker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
