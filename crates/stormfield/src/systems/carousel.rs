//! Headless model of the auto-scrolling image carousel.
//!
//! The host supplies measured image widths and depth tags; the model owns
//! scroll position, pause state and the per-slide decorative layout. The host
//! duplicates its images once, so the loop wraps after one pass over the originals.

use crate::api::config::CarouselConfig;
use super::rng::Rng;

/// Visual depth tier of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Depth {
    #[default]
    Front,
    Mid,
    Back,
}

impl Depth {
    /// Parse a `data-depth` tag. Unknown or missing tags are front slides.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("mid") => Depth::Mid,
            Some("back") => Depth::Back,
            _ => Depth::Front,
        }
    }

    /// Vertical lift in pixels (negative is up).
    pub fn lift(self) -> f32 {
        match self {
            Depth::Front => 0.0,
            Depth::Mid => -20.0,
            Depth::Back => -40.0,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            Depth::Front => 1.0,
            Depth::Mid => 0.9,
            Depth::Back => 0.75,
        }
    }
}

/// One original image as measured by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slide {
    pub width: f32,
    pub depth: Depth,
}

/// Randomized placement for one rendered slide (original or clone).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayout {
    pub offset_y: f32,
    pub rotation_deg: f32,
    pub depth: Depth,
}

impl SlideLayout {
    /// CSS transform for this slide.
    pub fn transform(&self) -> String {
        format!(
            "translateY({:.2}px) scale({}) rotate({:.2}deg)",
            self.depth.lift() + self.offset_y,
            self.depth.scale(),
            self.rotation_deg,
        )
    }
}

pub struct Carousel {
    slides: Vec<Slide>,
    layouts: Vec<SlideLayout>,
    config: CarouselConfig,
    offset: f32,
    hovered: bool,
    touch_held: bool,
    /// Seconds until a released touch resumes scrolling.
    resume_in: Option<f32>,
}

impl Carousel {
    /// Build a carousel over `slides`. Returns `None` when there is nothing to scroll.
    pub fn new(slides: Vec<Slide>, config: CarouselConfig, rng: &mut Rng) -> Option<Self> {
        if slides.is_empty() {
            return None;
        }
        // Originals followed by their clones
        let layouts = slides
            .iter()
            .chain(slides.iter())
            .map(|slide| SlideLayout {
                offset_y: rng.centered(config.jitter_y),
                rotation_deg: rng.centered(config.jitter_rotation_deg),
                depth: slide.depth,
            })
            .collect();
        Some(Self {
            slides,
            layouts,
            config,
            offset: 0.0,
            hovered: false,
            touch_held: false,
            resume_in: None,
        })
    }

    /// Width of one pass over the original slides, gaps included.
    pub fn content_width(&self) -> f32 {
        self.slides.iter().map(|s| s.width + self.config.gap).sum()
    }

    /// Layouts for originals then clones, in DOM order.
    pub fn layouts(&self) -> &[SlideLayout] {
        &self.layouts
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Horizontal translation to apply to the track.
    pub fn translate_x(&self) -> f32 {
        -self.offset
    }

    pub fn is_paused(&self) -> bool {
        self.hovered || self.touch_held
    }

    /// Advance one frame. `dt` only drives the touch-resume delay; scrolling is per frame.
    pub fn tick(&mut self, dt: f32) {
        if let Some(remaining) = self.resume_in.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.resume_in = None;
                self.touch_held = false;
            }
        }

        if self.is_paused() {
            return;
        }

        self.offset += self.config.speed;
        if self.offset >= self.content_width() {
            self.offset = 0.0;
        }
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    pub fn touch_start(&mut self) {
        self.touch_held = true;
        self.resume_in = None;
    }

    pub fn touch_end(&mut self) {
        self.resume_in = Some(self.config.touch_resume_secs);
    }

    /// Re-measure after a viewport resize and fold the offset into the new wrap width.
    pub fn resize(&mut self, widths: &[f32]) {
        for (slide, width) in self.slides.iter_mut().zip(widths) {
            slide.width = *width;
        }
        let total = self.content_width();
        if total > 0.0 {
            self.offset %= total;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn front(width: f32) -> Slide {
        Slide { width, depth: Depth::Front }
    }

    fn carousel(widths: &[f32]) -> Carousel {
        let mut rng = Rng::new(1);
        let slides = widths.iter().map(|w| front(*w)).collect();
        Carousel::new(slides, CarouselConfig::default(), &mut rng).unwrap()
    }

    #[test]
    fn no_images_means_no_carousel() {
        let mut rng = Rng::new(1);
        assert!(Carousel::new(Vec::new(), CarouselConfig::default(), &mut rng).is_none());
    }

    #[test]
    fn content_width_counts_one_gap_per_image() {
        let c = carousel(&[100.0, 50.0, 250.0]);
        assert_eq!(c.content_width(), 400.0 + 3.0 * 48.0);
    }

    #[test]
    fn offset_wraps_exactly_at_content_width() {
        let mut c = carousel(&[100.0, 50.0]);
        // 246 px at 0.5 px per frame
        for _ in 0..491 {
            c.tick(1.0 / 60.0);
        }
        assert_eq!(c.offset(), 245.5);
        c.tick(1.0 / 60.0);
        assert_eq!(c.offset(), 0.0);
    }

    #[test]
    fn hover_pauses_scrolling() {
        let mut c = carousel(&[100.0]);
        c.tick(0.016);
        c.pointer_enter();
        c.tick(0.016);
        c.tick(0.016);
        assert_eq!(c.offset(), 0.5);
        c.pointer_leave();
        c.tick(0.016);
        assert_eq!(c.offset(), 1.0);
    }

    #[test]
    fn touch_resumes_after_delay() {
        let mut c = carousel(&[100.0]);
        c.touch_start();
        c.tick(0.5);
        c.touch_end();
        c.tick(0.5);
        assert!(c.is_paused());
        assert_eq!(c.offset(), 0.0);
        c.tick(0.5);
        assert!(!c.is_paused());
        assert_eq!(c.offset(), 0.5);
    }

    #[test]
    fn new_touch_cancels_pending_resume() {
        let mut c = carousel(&[100.0]);
        c.touch_start();
        c.touch_end();
        c.touch_start();
        c.tick(5.0);
        assert!(c.is_paused());
    }

    #[test]
    fn resize_folds_offset_into_new_width() {
        let mut c = carousel(&[200.0]);
        for _ in 0..200 {
            c.tick(0.016);
        }
        assert_eq!(c.offset(), 100.0);
        c.resize(&[20.0]);
        assert_eq!(c.content_width(), 68.0);
        assert_eq!(c.offset(), 32.0);
    }

    #[test]
    fn layouts_cover_originals_and_clones() {
        let mut rng = Rng::new(2);
        let slides = vec![
            Slide { width: 10.0, depth: Depth::Mid },
            Slide { width: 10.0, depth: Depth::Back },
        ];
        let c = Carousel::new(slides, CarouselConfig::default(), &mut rng).unwrap();
        let depths: Vec<Depth> = c.layouts().iter().map(|l| l.depth).collect();
        assert_eq!(depths, vec![Depth::Mid, Depth::Back, Depth::Mid, Depth::Back]);
        for layout in c.layouts() {
            assert!(layout.offset_y >= -30.0 && layout.offset_y < 30.0);
            assert!(layout.rotation_deg >= -4.0 && layout.rotation_deg < 4.0);
        }
    }

    #[test]
    fn depth_tags_and_transforms() {
        assert_eq!(Depth::from_tag(Some("mid")), Depth::Mid);
        assert_eq!(Depth::from_tag(Some("back")), Depth::Back);
        assert_eq!(Depth::from_tag(None), Depth::Front);
        let layout = SlideLayout { offset_y: 5.0, rotation_deg: -2.0, depth: Depth::Back };
        assert_eq!(layout.transform(), "translateY(-35.00px) scale(0.75) rotate(-2.00deg)");
    }
}
