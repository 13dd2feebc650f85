//! DOM binding for the floating image carousel.

use std::cell::RefCell;
use std::rc::Rc;

use stormfield::{Carousel, CarouselConfig, Depth, Rng, Slide};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement};

const IMAGE_SELECTOR: &str = ".carousel-image";

/// A carousel model attached to its track element and original images.
pub struct CarouselBinding {
    model: Carousel,
    track: HtmlElement,
    originals: Vec<HtmlElement>,
}

impl CarouselBinding {
    /// Find `#container_id`, duplicate its images once, lay them out and hook up hover/touch.
    ///
    /// Returns `Ok(None)` when the container or its images are missing.
    pub fn attach(
        document: &Document,
        container_id: &str,
        config: CarouselConfig,
        rng: &mut Rng,
    ) -> Result<Option<Rc<RefCell<Self>>>, JsValue> {
        let Some(track) = document.get_element_by_id(container_id) else {
            log::warn!("carousel: no #{} element", container_id);
            return Ok(None);
        };
        let track = track.dyn_into::<HtmlElement>()?;
        let originals = images(&track)?;
        if originals.is_empty() {
            log::warn!("carousel: #{} has no images", container_id);
            return Ok(None);
        }

        let slides = originals
            .iter()
            .map(|img| Slide {
                width: img.offset_width() as f32,
                depth: Depth::from_tag(img.dataset().get("depth").as_deref()),
            })
            .collect();
        let Some(model) = Carousel::new(slides, config, rng) else {
            return Ok(None);
        };

        for img in &originals {
            track.append_child(&img.clone_node_with_deep(true)?)?;
        }
        // Originals then clones, matching the model's layout order
        for (img, layout) in images(&track)?.iter().zip(model.layouts()) {
            img.style().set_property("transform", &layout.transform())?;
        }

        log::info!(
            "carousel: {} images, wrap at {:.0}px",
            originals.len(),
            model.content_width()
        );

        let binding = Rc::new(RefCell::new(Self { model, track, originals }));
        listen(&binding, "mouseenter", Carousel::pointer_enter)?;
        listen(&binding, "mouseleave", Carousel::pointer_leave)?;
        listen(&binding, "touchstart", Carousel::touch_start)?;
        listen(&binding, "touchend", Carousel::touch_end)?;
        Ok(Some(binding))
    }

    /// Advance the scroll and move the track.
    pub fn tick(&mut self, dt: f32) -> Result<(), JsValue> {
        self.model.tick(dt);
        self.track
            .style()
            .set_property("transform", &format!("translateX({:.2}px)", self.model.translate_x()))
    }

    /// Re-measure the original images after a viewport change.
    pub fn resize(&mut self) {
        let widths: Vec<f32> = self.originals.iter().map(|img| img.offset_width() as f32).collect();
        self.model.resize(&widths);
    }
}

fn images(track: &HtmlElement) -> Result<Vec<HtmlElement>, JsValue> {
    let list = track.query_selector_all(IMAGE_SELECTOR)?;
    let mut out = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) {
            out.push(el);
        }
    }
    Ok(out)
}

fn listen(
    binding: &Rc<RefCell<CarouselBinding>>,
    event: &str,
    action: fn(&mut Carousel),
) -> Result<(), JsValue> {
    let target = binding.borrow().track.clone();
    let binding = Rc::clone(binding);
    let handler = Closure::wrap(Box::new(move || {
        action(&mut binding.borrow_mut().model);
    }) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
    // Lives as long as the page
    handler.forget();
    Ok(())
}
