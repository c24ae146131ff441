use std::io;
use std::pin::pin;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Operator asked to stop (SIGINT, or Ctrl+C while the terminal is raw).
    Interrupt,
    Resize,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl EventHandler {
    /// Listen for interrupts and terminal input. An interrupt cancels `cancel`
    /// before it is forwarded, so the live loop sees it even mid-wait.
    pub fn new(cancel: CancellationToken) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let task = tokio::spawn(forward_events(
            tokio::signal::ctrl_c(),
            event::EventStream::new(),
            tx,
            cancel,
        ));

        Self {
            rx,
            task: Some(task),
        }
    }

    /// Handler fed by hand instead of the terminal and OS signals.
    pub fn channel() -> (mpsc::UnboundedSender<Event>, Self) {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        (tx, Self { rx, task: None })
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Pump `input` into `tx` until `interrupt` resolves or a Ctrl+C key arrives.
/// `interrupt` is polled as one future for the whole loop, so a signal that
/// lands while a terminal event is being handled is still observed.
async fn forward_events<I, S>(
    interrupt: I,
    input: S,
    tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) where
    I: Future<Output = io::Result<()>>,
    S: Stream<Item = io::Result<CrosstermEvent>>,
{
    let mut interrupt = pin!(interrupt);
    let mut input = pin!(input);
    let mut input_open = true;
    let mut signal_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            result = &mut interrupt, if signal_open => {
                match result {
                    Ok(()) => {
                        tracing::info!("interrupt signal received");
                        cancel.cancel();
                        let _ = tx.send(Event::Interrupt);
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "cannot listen for interrupt signal");
                        signal_open = false;
                    }
                }
            }
            maybe_event = input.next(), if input_open => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key)))
                        if key.kind == KeyEventKind::Press
                            && key.code == KeyCode::Char('c')
                            && key.modifiers.contains(KeyModifiers::CONTROL) =>
                    {
                        tracing::info!("ctrl+c key received");
                        cancel.cancel();
                        let _ = tx.send(Event::Interrupt);
                        break;
                    }
                    Some(Ok(CrosstermEvent::Resize(_, _))) => {
                        if tx.send(Event::Resize).is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal input closed");
                        input_open = false;
                    }
                    None => input_open = false,
                }
            }
            else => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use futures::stream;
    use tokio::sync::oneshot;

    fn resizes(n: usize) -> Vec<io::Result<CrosstermEvent>> {
        (0..n).map(|_| Ok(CrosstermEvent::Resize(80, 24))).collect()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn interrupt_raised_during_a_burst_of_input_is_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let (signal_tx, signal_rx) = oneshot::channel::<()>();
        signal_tx.send(()).unwrap();

        let interrupt = async move { signal_rx.await.map_err(io::Error::other) };
        let input = stream::iter(resizes(500)).chain(stream::pending());
        forward_events(interrupt, input, tx, cancel.clone()).await;

        assert!(cancel.is_cancelled());
        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&Event::Interrupt));
        assert_eq!(events.iter().filter(|e| **e == Event::Interrupt).count(), 1);
    }

    #[tokio::test]
    async fn interrupt_still_observed_after_input_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let (signal_tx, signal_rx) = oneshot::channel::<()>();

        let interrupt = async move { signal_rx.await.map_err(io::Error::other) };
        let input = stream::iter(resizes(3));
        let forwarder = tokio::spawn(forward_events(interrupt, input, tx, cancel.clone()));

        tokio::task::yield_now().await;
        signal_tx.send(()).unwrap();
        forwarder.await.unwrap();

        assert!(cancel.is_cancelled());
        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&Event::Interrupt));
    }

    #[tokio::test]
    async fn ctrl_c_key_counts_as_interrupt() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let input = stream::iter(vec![Ok(CrosstermEvent::Key(key))]).chain(stream::pending());

        forward_events(std::future::pending(), input, tx, cancel.clone()).await;

        assert!(cancel.is_cancelled());
        assert_eq!(drain(&mut rx), vec![Event::Interrupt]);
    }

    #[tokio::test]
    async fn cancellation_ends_the_forwarder() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        cancel.cancel();

        forward_events(
            std::future::pending(),
            stream::pending::<io::Result<CrosstermEvent>>(),
            tx,
            cancel,
        )
        .await;

        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn channel_handler_forwards_events_in_order() {
        let (tx, mut handler) = EventHandler::channel();
        tx.send(Event::Resize).unwrap();
        tx.send(Event::Interrupt).unwrap();
        assert_eq!(handler.next().await, Some(Event::Resize));
        assert_eq!(handler.next().await, Some(Event::Interrupt));
    }

    #[tokio::test]
    async fn closed_channel_yields_none() {
        let (tx, mut handler) = EventHandler::channel();
        drop(tx);
        assert_eq!(handler.next().await, None);
    }
}
