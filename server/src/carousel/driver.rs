//! Runs a carousel on a tokio task
//!
//! The task owns the controller. Input events arrive over a channel and
//! timer wake-ups come from `tokio::time`, both handled by the same loop, so
//! a cancelled timer can never fire after the event that cancelled it.

use std::future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use super::controller::Carousel;
use super::schedule::TimerQueue;
use super::types::{CarouselError, CarouselState};
use super::view::CarouselView;

/// User input understood by the carousel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    GestureStart { x: f64 },
    GestureMove { x: f64 },
    GestureEnd { x: f64 },
    DotSelect(usize),
    PointerEnter,
    PointerLeave,
}

/// A request to the driver, with a channel to send the resulting state back
struct DriverRequest {
    event: Option<CarouselEvent>,
    reply: oneshot::Sender<Result<CarouselState, CarouselError>>,
}

/// Handle for sending events to a running carousel
#[derive(Clone)]
pub struct CarouselHandle {
    tx: mpsc::UnboundedSender<DriverRequest>,
}

impl CarouselHandle {
    /// Apply one event and return the state it left the carousel in
    pub async fn dispatch(&self, event: CarouselEvent) -> Result<CarouselState, CarouselError> {
        self.request(Some(event)).await
    }

    /// Current state, after any timers that were due have fired
    pub async fn state(&self) -> Result<CarouselState, CarouselError> {
        self.request(None).await
    }

    async fn request(&self, event: Option<CarouselEvent>) -> Result<CarouselState, CarouselError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(DriverRequest { event, reply })
            .map_err(|_| CarouselError::DriverStopped)?;

        response.await.map_err(|_| CarouselError::DriverStopped)?
    }
}

/// Start `carousel` on its own task.
///
/// The task runs until every handle is dropped and then returns the
/// carousel. Must be called from within a tokio runtime.
pub fn spawn<V>(
    carousel: Carousel<V, TimerQueue>,
) -> (CarouselHandle, JoinHandle<Carousel<V, TimerQueue>>)
where
    V: CarouselView + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run(carousel, rx));
    (CarouselHandle { tx }, task)
}

fn apply<V: CarouselView>(
    carousel: &mut Carousel<V, TimerQueue>,
    event: CarouselEvent,
) -> Result<(), CarouselError> {
    match event {
        CarouselEvent::GestureStart { x } => carousel.on_gesture_start(x),
        CarouselEvent::GestureMove { x } => carousel.on_gesture_move(x),
        CarouselEvent::GestureEnd { x } => {
            carousel.on_gesture_end(x);
        }
        CarouselEvent::DotSelect(index) => carousel.on_dot_select(index)?,
        CarouselEvent::PointerEnter => carousel.on_pointer_enter(),
        CarouselEvent::PointerLeave => carousel.on_pointer_leave(),
    }
    Ok(())
}

/// Fire what is due at `now`. A task that was not polled for several
/// advance periods moves on by one slide, not one per missed period.
fn catch_up<V: CarouselView>(carousel: &mut Carousel<V, TimerQueue>, now: Duration) {
    let skipped = carousel.scheduler_mut().skip_missed_ticks(now);
    if skipped > 0 {
        debug!("Carousel driver skipped {} missed advance ticks", skipped);
    }
    carousel.run_until(now);
}

async fn run<V: CarouselView>(
    mut carousel: Carousel<V, TimerQueue>,
    mut rx: mpsc::UnboundedReceiver<DriverRequest>,
) -> Carousel<V, TimerQueue> {
    // Map the queue's virtual clock onto tokio time.
    let origin = Instant::now();
    let base = carousel.scheduler().now();
    let clock = move || base + origin.elapsed();

    carousel.start();
    debug!(
        "Carousel driver started with {} slides",
        carousel.slide_count()
    );

    loop {
        let wake = carousel
            .scheduler()
            .next_deadline()
            .map(|deadline| origin + deadline.saturating_sub(base));
        let timer = async move {
            match wake {
                Some(at) => time::sleep_until(at).await,
                None => future::pending::<()>().await,
            }
        };

        tokio::select! {
            request = rx.recv() => {
                let Some(request) = request else {
                    break;
                };
                catch_up(&mut carousel, clock());
                let result = match request.event {
                    Some(event) => apply(&mut carousel, event).map(|()| carousel.state()),
                    None => Ok(carousel.state()),
                };
                let _ = request.reply.send(result);
            }
            _ = timer => {
                catch_up(&mut carousel, clock());
            }
        }
    }

    debug!(
        "Carousel driver stopped on slide {}",
        carousel.active_index()
    );
    carousel
}
