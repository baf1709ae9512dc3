//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Mutex;

use crate::transport::{Request, Response, Transport, TransportError};

/// Records every request and answers from a queue of canned results. An
/// empty queue answers `200 {}`.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Response, TransportError>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, body: serde_json::Value) -> &Self {
        self.reply(Ok(Response {
            status: 200,
            body: body.to_string().into_bytes(),
        }))
    }

    pub fn reply_bytes(&self, body: &[u8]) -> &Self {
        self.reply(Ok(Response {
            status: 200,
            body: body.to_vec(),
        }))
    }

    pub fn reply_status(&self, status: u16) -> &Self {
        if (200..300).contains(&status) {
            self.reply(Ok(Response {
                status,
                body: b"{}".to_vec(),
            }))
        } else {
            self.reply(Err(TransportError::from_status(status, "scripted failure")))
        }
    }

    pub fn reply_err(&self, err: TransportError) -> &Self {
        self.reply(Err(err))
    }

    fn reply(&self, reply: Result<Response, TransportError>) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self, request: Request) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or(Ok(Response {
            status: 200,
            body: b"{}".to_vec(),
        }))
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: Request) -> Result<Response, TransportError> {
        self.next(request)
    }

    fn download(&self, request: Request, sink: &mut dyn Write) -> Result<u64, TransportError> {
        let response = self.next(request)?;
        sink.write_all(&response.body)?;
        Ok(response.body.len() as u64)
    }
}
