//! Rendering seam between the controller and whatever displays the slides

/// Horizontal position of the slide track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideOffset {
    /// Slide the track is anchored on
    pub index: usize,
    /// Pixel displacement of an in-progress drag, if any
    pub drag_px: Option<f64>,
}

impl SlideOffset {
    /// Track resting on `index`
    pub fn settled(index: usize) -> Self {
        Self {
            index,
            drag_px: None,
        }
    }

    /// Drag preview: `index` shifted by `delta` pixels
    pub fn dragged(index: usize, delta: f64) -> Self {
        Self {
            index,
            drag_px: Some(delta),
        }
    }

    /// CSS `transform` value placing the track at this offset
    pub fn css_transform(&self) -> String {
        let percent = self.index * 100;
        match self.drag_px {
            None => format!("translateX(-{}%)", percent),
            Some(delta) => format!("translateX(calc(-{}% + {}px))", percent, delta),
        }
    }
}

/// Display surface driven by the controller
pub trait CarouselView {
    /// Move the slide track.
    fn translate(&mut self, offset: SlideOffset);

    /// Mark the dot at `index` active and every other dot inactive.
    fn highlight_dot(&mut self, index: usize);
}
