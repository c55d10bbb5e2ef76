// ABOUTME: Marshals work from other threads onto the thread that owns the control
// ABOUTME: Jobs queue on an unbounded channel and run during the owner's pump

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::control::CodeEditor;

/// A unit of work run against the control on its owning thread
pub type Job = Box<dyn FnOnce(&mut CodeEditor) + Send + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the control has been dropped")]
pub struct ControlClosed;

/// Cloneable, `Send` handle for reaching a control from any thread.
#[derive(Clone, Debug)]
pub struct ControlSender {
    tx: mpsc::UnboundedSender<Job>,
}

impl ControlSender {
    pub(crate) fn channel() -> (ControlSender, mpsc::UnboundedReceiver<Job>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ControlSender { tx }, rx)
    }

    /// Queue `job`; it runs on the next pump of the owning thread
    pub fn send<F>(&self, job: F) -> Result<(), ControlClosed>
    where
        F: FnOnce(&mut CodeEditor) + Send + 'static,
    {
        self.tx.send(Box::new(job)).map_err(|_| ControlClosed)
    }

    /// Queue `job` and get its result back through the returned receiver
    pub fn request<F, R>(&self, job: F) -> Result<oneshot::Receiver<R>, ControlClosed>
    where
        F: FnOnce(&mut CodeEditor) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, response) = oneshot::channel();
        self.send(move |editor| {
            // The requester may have given up waiting
            let _ = reply.send(job(editor));
        })?;
        Ok(response)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Owner side of the job queue
pub(crate) struct JobQueue {
    rx: mpsc::UnboundedReceiver<Job>,
}

impl JobQueue {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Job>) -> Self {
        Self { rx }
    }

    /// Everything queued so far, without waiting
    pub(crate) fn drain(&mut self) -> Vec<Job> {
        let mut jobs = Vec::new();
        while let Ok(job) = self.rx.try_recv() {
            jobs.push(job);
        }
        jobs
    }
}
