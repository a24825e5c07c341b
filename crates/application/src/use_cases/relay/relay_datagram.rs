use crate::ports::{AnswerCache, DatagramSender, PendingQueries};
use chrono::Utc;
use dnsrelay_domain::{CachePolicy, DomainError, QuestionKey};
use hickory_proto::op::{Message, MessageType};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What happened to one inbound datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// Not a DNS message; dropped.
    Undecodable,
    /// Decoded but carried no question; dropped.
    NoQuestion,
    /// Request answered from the cache without contacting the upstream.
    CacheHit { key: QuestionKey },
    /// Request registered as pending and relayed upstream. `expired` is set
    /// when a stale answer was evicted on the way.
    Forwarded {
        key: QuestionKey,
        expired: bool,
        sent: bool,
    },
    /// Upstream response relayed to every client waiting on its question.
    FannedOut {
        key: QuestionKey,
        delivered: usize,
        failed: usize,
    },
    /// Response nobody is waiting for; dropped without side effects.
    Unsolicited { key: QuestionKey },
}

/// Drives one datagram through the relay: client requests are answered from
/// the cache or forwarded to the upstream resolver, and upstream responses
/// are fanned out to the waiting clients and cached.
pub struct RelayDatagramUseCase {
    cache: Arc<dyn AnswerCache>,
    pending: Arc<dyn PendingQueries>,
    sender: Arc<dyn DatagramSender>,
    upstream: SocketAddr,
    policy: CachePolicy,
}

impl RelayDatagramUseCase {
    pub fn new(
        cache: Arc<dyn AnswerCache>,
        pending: Arc<dyn PendingQueries>,
        sender: Arc<dyn DatagramSender>,
        upstream: SocketAddr,
    ) -> Self {
        Self {
            cache,
            pending,
            sender,
            upstream,
            policy: CachePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }

    pub async fn execute(&self, datagram: &[u8], from: SocketAddr) -> RelayOutcome {
        let message = match decode_datagram(datagram) {
            Ok(message) => message,
            Err(e) => {
                warn!(client = %from, bytes = datagram.len(), error = %e, "Dropping undecodable datagram");
                return RelayOutcome::Undecodable;
            }
        };

        let Some(question) = message.queries().first() else {
            debug!(client = %from, "Dropping message without questions");
            return RelayOutcome::NoQuestion;
        };

        let key = QuestionKey::derive(
            &question.name().to_ascii(),
            u16::from(question.query_type()),
            self.policy.key_case,
        );

        match message.message_type() {
            MessageType::Response => self.handle_response(key, message, from).await,
            MessageType::Query => self.handle_request(key, message, from).await,
        }
    }

    async fn handle_response(
        &self,
        key: QuestionKey,
        message: Message,
        from: SocketAddr,
    ) -> RelayOutcome {
        let Some(waiting) = self.pending.get(&key) else {
            debug!(key = %key, resolver = %from, "Dropping unsolicited response");
            return RelayOutcome::Unsolicited { key };
        };

        info!(
            key = %key,
            resolver = %from,
            answers = message.answers().len(),
            waiting = waiting.len(),
            "Fanning out upstream response"
        );

        let mut delivered = 0;
        let mut failed = 0;
        for client in waiting {
            debug!(key = %key, client = %client, "Relaying response");
            match self.send(client, &message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(key = %key, client = %client, error = %e, "Failed to relay response");
                    failed += 1;
                }
            }
        }

        self.pending.clear(&key);

        if !self.cache.contains(&key) {
            self.cache.push(&key, message.answers().to_vec());
        }

        RelayOutcome::FannedOut {
            key,
            delivered,
            failed,
        }
    }

    async fn handle_request(
        &self,
        key: QuestionKey,
        mut message: Message,
        from: SocketAddr,
    ) -> RelayOutcome {
        let mut expired = false;

        if let Some(answer) = self.cache.get(&key) {
            if answer.is_expired_at(&self.policy, Utc::now()) {
                info!(
                    key = %key,
                    age_secs = answer.age_at(Utc::now()).as_secs(),
                    "Cached answer expired, evicting"
                );
                self.cache.clear(&key);
                expired = true;
            } else {
                message.set_message_type(MessageType::Response);
                message.add_answers(answer.records);

                info!(key = %key, client = %from, "Answering from cache");
                if let Err(e) = self.send(from, &message).await {
                    warn!(key = %key, client = %from, error = %e, "Failed to send cached answer");
                }
                return RelayOutcome::CacheHit { key };
            }
        }

        info!(key = %key, client = %from, upstream = %self.upstream, "Cache miss, forwarding upstream");
        self.pending.push(&key, from);

        let sent = match self.send(self.upstream, &message).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, upstream = %self.upstream, error = %e, "Failed to forward request");
                false
            }
        };

        RelayOutcome::Forwarded { key, expired, sent }
    }

    /// Encode `message` and write it to `target` as a single datagram.
    pub async fn send(&self, target: SocketAddr, message: &Message) -> Result<(), DomainError> {
        let bytes = message
            .to_vec()
            .map_err(|e| DomainError::MessageEncode(e.to_string()))?;
        self.sender.send_to(&bytes, target).await
    }
}

fn decode_datagram(datagram: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(datagram).map_err(|e| DomainError::MessageDecode(e.to_string()))
}
