//! Browser binding: wires the lightbox to the gallery markup.

use crate::{
    error::{GalleryError, GalleryResult},
    host::{PreloadSlot, is_backdrop_target, observer_support},
    lightbox::{GalleryIndex, Lightbox},
    message::{Command, Message},
    surface::ViewerSurface,
};
use gallery_config::{LightboxConfig, Selectors};
use gallery_image::{
    DeferredThumbnail, LazyThumbnails, LoadRequest, ObserverSupport, ThumbnailAction,
};
use gallery_types::{EntryAttributes, Key};
use gloo::events::{EventListener, EventListenerOptions};
use js_sys::{Array, Reflect};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlImageElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, KeyboardEvent,
    NodeList, TouchEvent,
};

impl From<JsValue> for GalleryError {
    fn from(value: JsValue) -> Self {
        GalleryError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

pub struct DomSurface {
    lightbox: Element,
    image: HtmlImageElement,
    caption: Element,
    counter: Element,
    prev: HtmlButtonElement,
    next: HtmlButtonElement,
    body: Option<HtmlElement>,
    active_class: String,
    loaded_class: String,
}

impl DomSurface {
    fn new(document: &Document, lightbox: Element, selectors: &Selectors) -> GalleryResult<Self> {
        Ok(Self {
            lightbox,
            image: element_as(document, &selectors.image_id, "image")?,
            caption: element(document, &selectors.caption_id)?,
            counter: element(document, &selectors.counter_id)?,
            prev: element_as(document, &selectors.prev_id, "button")?,
            next: element_as(document, &selectors.next_id, "button")?,
            body: document.body(),
            active_class: selectors.active_class.clone(),
            loaded_class: selectors.loaded_class.clone(),
        })
    }
}

fn toggle_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };

    if let Err(err) = result {
        warn!("Failed to toggle class {class}: {err:?}");
    }
}

impl ViewerSurface for DomSurface {
    fn set_active(&mut self, active: bool) {
        toggle_class(&self.lightbox, &self.active_class, active);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = &self.body else {
            return;
        };

        let value = if locked { "hidden" } else { "" };
        if let Err(err) = body.style().set_property("overflow", value) {
            warn!("Failed to set page overflow: {err:?}");
        }
    }

    fn show_image(&mut self, url: &str, alt: &str) {
        self.image.set_src(url);
        self.image.set_alt(alt);
    }

    fn set_image_loaded(&mut self, loaded: bool) {
        toggle_class(&self.image, &self.loaded_class, loaded);
    }

    fn set_caption(&mut self, caption: &str) {
        self.caption.set_text_content(Some(caption));
    }

    fn set_counter(&mut self, text: &str) {
        self.counter.set_text_content(Some(text));
    }

    fn set_nav_disabled(&mut self, prev: bool, next: bool) {
        self.prev.set_disabled(prev);
        self.next.set_disabled(next);
    }
}

struct Preload {
    _image: HtmlImageElement,
    _onload: EventListener,
    _onerror: EventListener,
}

struct Host {
    lightbox: RefCell<Lightbox<DomSurface>>,
    preload: RefCell<PreloadSlot<Preload>>,
}

fn dispatch(host: &Rc<Host>, message: Message) {
    // The borrow ends before the command runs, so load callbacks never
    // observe a live borrow.
    let command = host.lightbox.borrow_mut().update(message);

    match command {
        Command::None => {}
        Command::Preload(request) => preload(host, request),
    }
}

fn preload(host: &Rc<Host>, request: LoadRequest) {
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(err) => {
            warn!("Failed to create preload image: {err:?}");
            return;
        }
    };

    let ticket = request.ticket;
    let weak: Weak<Host> = Rc::downgrade(host);
    let onload = EventListener::once(&image, "load", move |_| {
        if let Some(host) = weak.upgrade() {
            dispatch(&host, Message::ImageLoaded(ticket));
        }
    });

    let weak = Rc::downgrade(host);
    let url = request.url.clone();
    let onerror = EventListener::once(&image, "error", move |_| {
        if let Some(host) = weak.upgrade() {
            let reason = format!("could not fetch {url}");
            dispatch(&host, Message::ImageFailed { ticket, reason });
        }
    });

    image.set_src(&request.url);

    // Load completions never issue a new preload, so a running listener is
    // never dropped here.
    let preload = Preload {
        _image: image,
        _onload: onload,
        _onerror: onerror,
    };
    if host.preload.borrow_mut().replace(ticket, preload).is_some() {
        debug!("Dropped superseded preload for image {}", ticket.index());
    }
}

struct ThumbnailObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ThumbnailObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// A gallery wired to the page. Dropping it closes the viewer and removes
/// every listener.
pub struct MountedGallery {
    host: Rc<Host>,
    _listeners: Vec<EventListener>,
    _observer: Option<ThumbnailObserver>,
}

impl Drop for MountedGallery {
    fn drop(&mut self) {
        // Leave the page scrollable with the viewer hidden so a later mount
        // starts from a closed surface.
        match self.host.lightbox.try_borrow_mut() {
            Ok(mut lightbox) => lightbox.teardown(),
            Err(_) => warn!("Lightbox busy during unmount, viewer left as is"),
        }

        if let Ok(mut preload) = self.host.preload.try_borrow_mut() {
            preload.clear();
        }
        debug!("Gallery unmounted");
    }
}

impl MountedGallery {
    /// Mounts onto `document`. Returns `Ok(None)` when the page has no
    /// gallery grid or no lightbox container.
    pub fn mount(document: &Document, config: &LightboxConfig) -> GalleryResult<Option<Self>> {
        let selectors = &config.selectors;
        let (Some(lightbox), Some(grid)) = (
            document.get_element_by_id(&selectors.lightbox_id),
            document.get_element_by_id(&selectors.grid_id),
        ) else {
            debug!("No gallery on this page");
            return Ok(None);
        };

        let links = entry_links(&grid, selectors)?;
        let entries = links.iter().map(|link| read_entry(link, selectors));
        let index = GalleryIndex::from_entries(entries);
        let slots = index.slots().to_vec();

        let surface = DomSurface::new(document, lightbox.clone(), selectors)?;
        let host = Rc::new(Host {
            lightbox: RefCell::new(Lightbox::new(index.into_items(), surface, config)),
            preload: RefCell::new(PreloadSlot::new()),
        });

        let mut listeners = Vec::new();

        for (link, slot) in links.iter().zip(slots) {
            let Some(idx) = slot else {
                continue;
            };
            let host = Rc::clone(&host);
            listeners.push(EventListener::new_with_options(
                link,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event: &Event| {
                    event.prevent_default();
                    dispatch(&host, Message::Open(idx));
                },
            ));
        }

        for (id, message) in [
            (&selectors.close_id, Message::Close),
            (&selectors.prev_id, Message::Prev),
            (&selectors.next_id, Message::Next),
        ] {
            let control = element(document, id)?;
            let host = Rc::clone(&host);
            listeners.push(EventListener::new(&control, "click", move |_| {
                dispatch(&host, message.clone());
            }));
        }

        let backdrop: EventTarget = lightbox.clone().into();
        let click_host = Rc::clone(&host);
        listeners.push(EventListener::new(&lightbox, "click", move |event: &Event| {
            let on_backdrop = is_backdrop_target(event.target().as_ref(), &backdrop);
            dispatch(&click_host, Message::BackdropClick { on_backdrop });
        }));

        let key_host = Rc::clone(&host);
        listeners.push(EventListener::new(document, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            dispatch(&key_host, Message::Key(Key::from_dom_key(&event.key())));
        }));

        let touch_host = Rc::clone(&host);
        listeners.push(EventListener::new(&lightbox, "touchstart", move |event: &Event| {
            if let Some(x) = touch_screen_x(event) {
                dispatch(&touch_host, Message::TouchStart(x));
            }
        }));

        let touch_host = Rc::clone(&host);
        listeners.push(EventListener::new(&lightbox, "touchend", move |event: &Event| {
            if let Some(x) = touch_screen_x(event) {
                dispatch(&touch_host, Message::TouchEnd(x));
            }
        }));

        let observer = lazy_thumbnails(document, config)?;

        info!("Gallery mounted on #{}", selectors.grid_id);
        Ok(Some(Self {
            host,
            _listeners: listeners,
            _observer: observer,
        }))
    }
}

fn lazy_thumbnails(
    document: &Document,
    config: &LightboxConfig,
) -> GalleryResult<Option<ThumbnailObserver>> {
    let selectors = &config.selectors;
    let thumbs = Rc::new(elements(
        &document.query_selector_all(&selectors.deferred_thumb_selector())?,
    ));
    if thumbs.is_empty() {
        return Ok(None);
    }

    let support = observer_support(has_intersection_observer());
    let lazy = Rc::new(RefCell::new(LazyThumbnails::new(support)));
    let deferred = thumbs.iter().enumerate().map(|(id, thumb)| {
        let src = thumb
            .get_attribute(&selectors.deferred_src_attr)
            .unwrap_or_default();
        DeferredThumbnail::new(id, src)
    });
    let actions = lazy.borrow_mut().register(deferred);

    if support == ObserverSupport::Unavailable {
        for action in actions {
            apply_thumbnail_action(&thumbs, None, &selectors.deferred_src_attr, action);
        }
        return Ok(None);
    }

    let attr = selectors.deferred_src_attr.clone();
    let callback_thumbs = Rc::clone(&thumbs);
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                let target = entry.target();
                let Some(id) = callback_thumbs.iter().position(|thumb| *thumb == target) else {
                    continue;
                };

                let action = lazy.borrow_mut().on_visibility(id, entry.is_intersecting());
                if let Some(action) = action {
                    apply_thumbnail_action(&callback_thumbs, Some(&observer), &attr, action);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_root_margin(&config.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    for action in actions {
        apply_thumbnail_action(&thumbs, Some(&observer), &selectors.deferred_src_attr, action);
    }

    Ok(Some(ThumbnailObserver {
        observer,
        _callback: callback,
    }))
}

fn apply_thumbnail_action(
    thumbs: &[Element],
    observer: Option<&IntersectionObserver>,
    deferred_src_attr: &str,
    action: ThumbnailAction,
) {
    match action {
        ThumbnailAction::Observe(id) => {
            if let (Some(thumb), Some(observer)) = (thumbs.get(id), observer) {
                observer.observe(thumb);
            }
        }
        ThumbnailAction::Promote { id, src } => {
            let Some(thumb) = thumbs.get(id) else {
                return;
            };
            if let Err(err) = thumb.set_attribute("src", &src) {
                warn!("Failed to set thumbnail source {src}: {err:?}");
                return;
            }
            if let Err(err) = thumb.remove_attribute(deferred_src_attr) {
                warn!("Failed to clear deferred source: {err:?}");
            }
            if let Some(observer) = observer {
                observer.unobserve(thumb);
            }
        }
        ThumbnailAction::Unobserve(id) => {
            if let (Some(thumb), Some(observer)) = (thumbs.get(id), observer) {
                observer.unobserve(thumb);
            }
        }
    }
}

fn has_intersection_observer() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };

    Reflect::has(&window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

fn touch_screen_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_x()))
}

fn entry_links(grid: &Element, selectors: &Selectors) -> GalleryResult<Vec<Element>> {
    let items = elements(&grid.query_selector_all(&selectors.item_selector())?);
    let link_selector = selectors.link_selector();
    let mut links = Vec::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        match item.query_selector(&link_selector)? {
            Some(link) => links.push(link),
            None => warn!("Gallery entry {position} has no {link_selector} trigger"),
        }
    }

    Ok(links)
}

fn read_entry(link: &Element, selectors: &Selectors) -> EntryAttributes {
    let Some(link) = link.dyn_ref::<HtmlElement>() else {
        return EntryAttributes::default();
    };

    let dataset = link.dataset();
    EntryAttributes::new(
        dataset.get(&selectors.full_url_key),
        dataset.get(&selectors.caption_key),
    )
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn element(document: &Document, id: &str) -> GalleryResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| GalleryError::MissingElement(id.to_string()))
}

fn element_as<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> GalleryResult<T> {
    element(document, id)?
        .dyn_into::<T>()
        .map_err(|_| GalleryError::UnexpectedElement {
            id: id.to_string(),
            expected,
        })
}

thread_local! {
    static MOUNTED: RefCell<Option<MountedGallery>> = const { RefCell::new(None) };
}

fn mount_page(config: &LightboxConfig) -> GalleryResult<bool> {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return Ok(false);
    };

    // Tear down any earlier mount before wiring the page again
    MOUNTED.with(|mounted| mounted.borrow_mut().take());

    let gallery = MountedGallery::mount(&document, config)?;
    let is_mounted = gallery.is_some();
    MOUNTED.with(|mounted| *mounted.borrow_mut() = gallery);
    Ok(is_mounted)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    mount_page(&LightboxConfig::default())
        .map(|_| ())
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Mounts with an optional JSON config. Resolves to `false` when the page
/// has no gallery.
#[wasm_bindgen(js_name = mountGallery)]
pub fn mount_gallery(config_json: Option<String>) -> Result<bool, JsValue> {
    let config = match config_json {
        Some(json) => LightboxConfig::from_json(&json).map_err(GalleryError::from),
        None => Ok(LightboxConfig::default()),
    };

    config
        .and_then(|config| mount_page(&config))
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen(js_name = unmountGallery)]
pub fn unmount_gallery() {
    MOUNTED.with(|mounted| mounted.borrow_mut().take());
}
