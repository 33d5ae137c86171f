//! Command dispatcher: a bounded queue in front of the transport.
//!
//! Exactly one command is in flight at a time; completion (success or
//! failure) starts the next queued command. There is no retry and no
//! cancellation of in-flight requests.

use crate::protocol::{Command, Response};
use crate::transport::{Transport, TransportEvent};
use std::collections::VecDeque;
use thiserror::Error;

/// Upper bound on commands waiting behind the in-flight one.
pub const MAX_PENDING_COMMANDS: usize = 8;

/// Dispatcher errors surfaced to the caller at enqueue time.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("too many pending commands")]
    QueueFull,
}

/// Outcome of a dispatched command, paired with the command it answers.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchEvent {
    /// 2xx reply with a well-formed body.
    Completed { command: Command, response: Response },
    /// Transport failure, non-2xx status, or unparseable body. The backend
    /// may still have reported history flags in an error body.
    Failed {
        command: Command,
        message: String,
        response: Option<Response>,
    },
}

pub struct Dispatcher<T: Transport> {
    transport: T,
    queue: VecDeque<Command>,
    in_flight: Option<Command>,
    pending_events: Vec<DispatchEvent>,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            queue: VecDeque::new(),
            in_flight: None,
            pending_events: Vec::new(),
        }
    }

    /// Queue a command for delivery. It goes out immediately when nothing is
    /// in flight.
    pub fn enqueue(&mut self, command: Command) -> Result<(), DispatchError> {
        if self.queue.len() >= MAX_PENDING_COMMANDS {
            return Err(DispatchError::QueueFull);
        }
        log::debug!("enqueue {}", command.label());
        self.queue.push_back(command);
        self.pump();
        Ok(())
    }

    /// Drain transport outcomes, pair them with their commands, and start
    /// the next queued command. Call once per frame.
    pub fn poll(&mut self) -> Vec<DispatchEvent> {
        let mut events = std::mem::take(&mut self.pending_events);

        for outcome in self.transport.poll() {
            let Some(command) = self.in_flight.take() else {
                log::warn!("transport outcome with no command in flight");
                continue;
            };
            events.push(match outcome {
                TransportEvent::Completed { status, body } => match Response::parse(&body) {
                    Ok(response) if (200..300).contains(&status) && response.error.is_none() => {
                        DispatchEvent::Completed { command, response }
                    }
                    Ok(response) => {
                        let message = response
                            .error
                            .clone()
                            .unwrap_or_else(|| format!("server error (status {status})"));
                        DispatchEvent::Failed {
                            command,
                            message,
                            response: Some(response),
                        }
                    }
                    Err(e) => DispatchEvent::Failed {
                        command,
                        message: format!("invalid server response: {e}"),
                        response: None,
                    },
                },
                TransportEvent::Failed { message } => DispatchEvent::Failed {
                    command,
                    message,
                    response: None,
                },
            });
        }

        self.pump();
        events.append(&mut self.pending_events);
        events
    }

    /// Start the next queued command when idle.
    fn pump(&mut self) {
        while self.in_flight.is_none() {
            let Some(command) = self.queue.pop_front() else {
                return;
            };
            let body = match serde_json::to_string(&command) {
                Ok(body) => body,
                Err(e) => {
                    self.pending_events.push(DispatchEvent::Failed {
                        command,
                        message: format!("failed to encode command: {e}"),
                        response: None,
                    });
                    continue;
                }
            };
            match self.transport.submit(body) {
                Ok(()) => self.in_flight = Some(command),
                Err(e) => self.pending_events.push(DispatchEvent::Failed {
                    command,
                    message: e.to_string(),
                    response: None,
                }),
            }
        }
    }

    /// Whether a command is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn in_flight(&self) -> Option<&Command> {
        self.in_flight.as_ref()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportError;

    /// Scripted transport: records submissions, replays queued outcomes.
    #[derive(Default)]
    struct FakeTransport {
        submitted: Vec<String>,
        outcomes: VecDeque<TransportEvent>,
        reject_submit: bool,
    }

    impl Transport for FakeTransport {
        fn submit(&mut self, body: String) -> Result<(), TransportError> {
            if self.reject_submit {
                return Err(TransportError::Request("offline".into()));
            }
            self.submitted.push(body);
            Ok(())
        }

        fn poll(&mut self) -> Vec<TransportEvent> {
            self.outcomes.drain(..).collect()
        }
    }

    fn ok_body(can_undo: bool, can_redo: bool) -> String {
        format!(
            r#"{{"image_data_url":"data:image/png;base64,AAAA","can_undo":{can_undo},"can_redo":{can_redo}}}"#
        )
    }

    #[test]
    fn test_single_in_flight() {
        let mut d = Dispatcher::new(FakeTransport::default());
        d.enqueue(Command::Undo).unwrap();
        d.enqueue(Command::Redo).unwrap();

        assert!(d.is_busy());
        assert_eq!(d.transport.submitted.len(), 1);
        assert_eq!(d.pending(), 1);
    }

    #[test]
    fn test_completion_starts_next_command() {
        let mut d = Dispatcher::new(FakeTransport::default());
        d.enqueue(Command::Undo).unwrap();
        d.enqueue(Command::Redo).unwrap();

        d.transport.outcomes.push_back(TransportEvent::Completed {
            status: 200,
            body: ok_body(true, false),
        });
        let events = d.poll();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            DispatchEvent::Completed {
                command: Command::Undo,
                ..
            }
        ));
        // The second command went out as part of the same poll.
        assert_eq!(d.transport.submitted.len(), 2);
        assert!(d.is_busy());
        assert_eq!(d.pending(), 0);
    }

    #[test]
    fn test_queue_bound() {
        let mut d = Dispatcher::new(FakeTransport::default());
        // One goes straight in flight, MAX_PENDING_COMMANDS queue up.
        for _ in 0..=MAX_PENDING_COMMANDS {
            d.enqueue(Command::Undo).unwrap();
        }
        assert!(matches!(
            d.enqueue(Command::Undo),
            Err(DispatchError::QueueFull)
        ));
    }

    #[test]
    fn test_server_error_reports_flags() {
        let mut d = Dispatcher::new(FakeTransport::default());
        d.enqueue(Command::Redo).unwrap();
        d.transport.outcomes.push_back(TransportEvent::Completed {
            status: 500,
            body: r#"{"error":"draw failed","can_undo":true,"can_redo":false}"#.into(),
        });
        let events = d.poll();
        match &events[0] {
            DispatchEvent::Failed {
                message, response, ..
            } => {
                assert_eq!(message, "draw failed");
                assert!(response.as_ref().is_some_and(|r| r.can_undo));
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(!d.is_busy());
    }

    #[test]
    fn test_unparseable_body_fails() {
        let mut d = Dispatcher::new(FakeTransport::default());
        d.enqueue(Command::Undo).unwrap();
        d.transport.outcomes.push_back(TransportEvent::Completed {
            status: 200,
            body: "<html>gateway timeout</html>".into(),
        });
        let events = d.poll();
        assert!(matches!(
            &events[0],
            DispatchEvent::Failed { response: None, .. }
        ));
    }

    #[test]
    fn test_transport_failure() {
        let mut d = Dispatcher::new(FakeTransport::default());
        d.enqueue(Command::Undo).unwrap();
        d.transport
            .outcomes
            .push_back(TransportEvent::Failed {
                message: "connection refused".into(),
            });
        let events = d.poll();
        match &events[0] {
            DispatchEvent::Failed { message, .. } => assert_eq!(message, "connection refused"),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_submit_rejection_surfaces_as_failure() {
        let mut d = Dispatcher::new(FakeTransport {
            reject_submit: true,
            ..Default::default()
        });
        d.enqueue(Command::Undo).unwrap();
        let events = d.poll();
        assert!(matches!(&events[0], DispatchEvent::Failed { .. }));
        assert!(!d.is_busy());
    }

    #[test]
    fn test_error_reply_on_2xx_is_failure() {
        // Some backends report failures in a 200 body.
        let mut d = Dispatcher::new(FakeTransport::default());
        d.enqueue(Command::Undo).unwrap();
        d.transport.outcomes.push_back(TransportEvent::Completed {
            status: 200,
            body: r#"{"error":"session expired"}"#.into(),
        });
        let events = d.poll();
        assert!(matches!(&events[0], DispatchEvent::Failed { message, .. } if message == "session expired"));
    }
}
