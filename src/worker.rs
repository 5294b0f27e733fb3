//! Background lookups
//!
//! Each lookup runs on its own short-lived thread and reports back with a
//! single message. Only the thread that drains the receiver mutates state.

use crate::api::{SearchResponse, TopicApi, TopicDocument};
use crate::error::Result;
use crate::search::LookupTicket;
use crate::topic::TopicTicket;
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Messages from background threads
pub enum BgMessage {
    SearchComplete(LookupTicket, Result<SearchResponse>),
    TopicComplete(TopicTicket, Result<TopicDocument>),
}

pub struct LookupWorker {
    api: Arc<dyn TopicApi>,
    sender: Sender<BgMessage>,
    receiver: Option<Receiver<BgMessage>>,
    closed: Arc<AtomicBool>,
}

impl LookupWorker {
    pub fn new(api: Arc<dyn TopicApi>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            api,
            sender,
            receiver: Some(receiver),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn spawn_search(&self, ticket: LookupTicket) {
        if self.is_closed() {
            return;
        }
        info!(seq = ticket.seq, query = %ticket.query, "search lookup issued");
        let api = self.api.clone();
        let tx = self.sender.clone();
        let closed = self.closed.clone();
        thread::spawn(move || {
            let result = api.search_topics(&ticket.query);
            deliver(&tx, &closed, BgMessage::SearchComplete(ticket, result));
        });
    }

    pub fn spawn_topic(&self, ticket: TopicTicket) {
        if self.is_closed() {
            return;
        }
        info!(url_name = %ticket.url_name, "topic lookup issued");
        let api = self.api.clone();
        let tx = self.sender.clone();
        let closed = self.closed.clone();
        thread::spawn(move || {
            let result = api.get_topic(&ticket.url_name);
            deliver(&tx, &closed, BgMessage::TopicComplete(ticket, result));
        });
    }

    /// Next finished lookup, if any, without blocking
    pub fn try_recv(&self) -> Option<BgMessage> {
        self.receiver.as_ref()?.try_recv().ok()
    }

    /// Block up to `timeout` for the next finished lookup
    pub fn recv_timeout(&self, timeout: Duration) -> Option<BgMessage> {
        match self.receiver.as_ref()?.recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Stop accepting work and drop the receiving end. Lookups still in
    /// flight finish on their own and their results go nowhere.
    pub fn shutdown(&mut self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            info!("lookup worker shut down");
        }
        self.receiver = None;
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

fn deliver(tx: &Sender<BgMessage>, closed: &AtomicBool, msg: BgMessage) {
    if closed.load(Ordering::SeqCst) || tx.send(msg).is_err() {
        debug!("discarding lookup result after teardown");
    }
}
