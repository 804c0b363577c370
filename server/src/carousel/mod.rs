//! Touch and auto-advancing slide carousel
//!
//! This module provides:
//! - `Carousel`, the state machine behind the landing page slider
//! - `CarouselView` and `Scheduler`, the seams it renders and schedules through
//! - `TimerQueue`, a virtual-clock scheduler usable as a fake clock
//! - `spawn`, which runs a carousel on a tokio task behind a `CarouselHandle`

mod controller;
mod driver;
mod schedule;
mod types;
mod view;

pub use controller::Carousel;
pub use driver::{CarouselEvent, CarouselHandle, spawn};
pub use schedule::{Scheduler, TimerHandle, TimerKind, TimerQueue};
pub use types::{CarouselConfig, CarouselError, CarouselState, GestureSession, Mode, Swipe};
pub use view::{CarouselView, SlideOffset};
