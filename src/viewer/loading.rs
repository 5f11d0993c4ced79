use std::task::{Context, Poll};

use futures::{future::BoxFuture, task::noop_waker_ref};

use crate::{error::LoadError, gfx::scene::SceneNode};

/// Identifies one load request
///
/// Sequence numbers increase with every request; only the most recent
/// ticket may install its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub sequence: u64,
    pub name: String,
    pub url: String,
}

/// Where the most recent load request stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    Pending { name: String },
    Loaded { name: String },
    Failed { name: String, message: String },
}

/// What happened to a completed load
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The model replaced the previous one and was framed
    Installed(crate::gfx::FrameReport),
    /// The loader failed; the message is in the status line
    Failed(String),
    /// A newer request was issued meanwhile; the result was released
    Discarded,
}

/// Hands out tickets and decides whether a completion is still wanted
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: u64,
}

impl LoadSequencer {
    pub fn issue(&mut self, name: &str, url: &str) -> LoadTicket {
        self.latest += 1;
        LoadTicket {
            sequence: self.latest,
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    /// True when no newer ticket has been issued since `ticket`
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.sequence == self.latest
    }
}

/// A started load that has not produced a result yet
pub(crate) struct InFlight {
    pub ticket: LoadTicket,
    future: BoxFuture<'static, Result<SceneNode, LoadError>>,
}

impl InFlight {
    pub fn new(ticket: LoadTicket, future: BoxFuture<'static, Result<SceneNode, LoadError>>) -> Self {
        Self { ticket, future }
    }

    /// Poll once without blocking
    ///
    /// Hosts call this from their frame loop, so no waker is registered;
    /// the future is simply polled again next frame.
    pub fn poll_once(&mut self) -> Poll<Result<SceneNode, LoadError>> {
        let mut cx = Context::from_waker(noop_waker_ref());
        self.future.as_mut().poll(&mut cx)
    }

    pub fn into_parts(self) -> (LoadTicket, BoxFuture<'static, Result<SceneNode, LoadError>>) {
        (self.ticket, self.future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut sequencer = LoadSequencer::default();
        let first = sequencer.issue("a.obj", "models/a.obj");
        let second = sequencer.issue("b.obj", "models/b.obj");

        assert!(second.sequence > first.sequence);
        assert!(!sequencer.is_current(&first));
        assert!(sequencer.is_current(&second));
    }

    #[test]
    fn test_poll_ready_future() {
        let mut sequencer = LoadSequencer::default();
        let ticket = sequencer.issue("empty", "empty");
        let future: BoxFuture<'static, Result<SceneNode, LoadError>> =
            Box::pin(futures::future::ready(Ok(SceneNode::group("empty"))));

        let mut in_flight = InFlight::new(ticket, future);
        assert!(matches!(in_flight.poll_once(), Poll::Ready(Ok(_))));
    }

    #[test]
    fn test_poll_pending_future() {
        let mut sequencer = LoadSequencer::default();
        let ticket = sequencer.issue("never", "never");
        let future: BoxFuture<'static, Result<SceneNode, LoadError>> =
            Box::pin(futures::future::pending());

        let mut in_flight = InFlight::new(ticket, future);
        assert!(in_flight.poll_once().is_pending());
    }
}
