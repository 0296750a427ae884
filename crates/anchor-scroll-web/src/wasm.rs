//! `wasm-bindgen` exports for [`AnchorScroll`].

use std::cell::RefCell;
use std::rc::Rc;

use anchor_scroll_core::{AnchorScrollContext, AnchorSet};
use js_sys::{Function, Object, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, EventTarget, Window};
use web_time::{Duration, Instant};

use crate::LAYOUT_CHANGE_EVENT;
use crate::config::AnchorScrollConfig;
use crate::dom::DomHost;
use crate::throttle::Throttle;

const DEFAULT_THROTTLE: Duration = Duration::from_millis(100);

fn set_js(obj: &Object, key: &str, value: JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), &value);
}

fn install_panic_hook() {
    use std::sync::Once;
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let global = js_sys::global();
            if let Ok(console) = Reflect::get(&global, &"console".into()) {
                if let Ok(error) = Reflect::get(&console, &"error".into()) {
                    if let Ok(f) = error.dyn_into::<Function>() {
                        let _ = f.call1(&console, &JsValue::from_str(&format!("{info}")));
                    }
                }
            }
        }));
    });
}

/// State shared between the exported object and its event listeners.
struct Page {
    context: AnchorScrollContext<DomHost>,
    throttle: Throttle,
    trailing: Option<Function>,
    trailing_scheduled: bool,
}

type SharedPage = Rc<RefCell<Page>>;

impl Page {
    /// Arm the trailing timer for a suppressed scroll, unless one is armed.
    fn schedule_trailing(&mut self, window: &Window, now: Duration) {
        if self.trailing_scheduled {
            return;
        }
        let (Some(trailing), Some(millis)) =
            (self.trailing.as_ref(), self.throttle.pending_delay_millis(now))
        else {
            return;
        };
        let millis = i32::try_from(millis).unwrap_or(i32::MAX);
        if window
            .set_timeout_with_callback_and_timeout_and_arguments_0(trailing, millis)
            .is_ok()
        {
            self.trailing_scheduled = true;
        }
    }
}

/// Snapshot handed to JS `onScroll` callbacks.
fn set_snapshot(set: &AnchorSet<DomHost>) -> JsValue {
    let obj = Object::new();
    set_js(
        &obj,
        "currentIndex",
        set.current_index()
            .map_or(JsValue::UNDEFINED, |i| JsValue::from(i as u32)),
    );
    set_js(
        &obj,
        "currentId",
        set.current_id()
            .map_or(JsValue::UNDEFINED, |id| JsValue::from_str(id.as_str())),
    );
    set_js(
        &obj,
        "scrollNextVisible",
        JsValue::from(set.is_scroll_next_visible()),
    );
    set_js(
        &obj,
        "navigationDisabled",
        JsValue::from(set.is_navigation_disabled()),
    );
    obj.into()
}

/// A registered DOM listener, removed again on [`AnchorScroll::destroy`].
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        passive: bool,
        closure: Closure<dyn FnMut()>,
    ) -> Result<Self, JsValue> {
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Anchor navigation for one page.
///
/// Owns every anchor set created on the page and the window listeners that
/// keep them in sync with scrolling. JS usage:
/// ```js
/// const anchors = new AnchorScroll();
/// const nav = anchors.create(JSON.stringify({ scrollNext: "#scroll-next" }));
/// anchors.setOnScroll(nav, (state) => console.log(state.currentId));
/// ```
#[wasm_bindgen]
pub struct AnchorScroll {
    window: Window,
    page: SharedPage,
    origin: Instant,
    listeners: Vec<Listener>,
    // Keeps the trailing-scroll callback alive for `setTimeout`.
    _trailing: Closure<dyn FnMut()>,
}

impl AnchorScroll {
    fn listen_window(&mut self) -> Result<(), JsValue> {
        let target: EventTarget = self.window.clone().into();

        let scroll = {
            let page = Rc::clone(&self.page);
            let window = self.window.clone();
            let origin = self.origin;
            Closure::<dyn FnMut()>::new(move || {
                let Ok(mut page) = page.try_borrow_mut() else {
                    return;
                };
                let now = origin.elapsed();
                if page.throttle.call(now) {
                    page.context.on_scroll();
                } else {
                    page.schedule_trailing(&window, now);
                }
            })
        };
        self.listeners
            .push(Listener::attach(&target, "scroll", true, scroll)?);

        let events: [(&'static str, fn(&mut AnchorScrollContext<DomHost>)); 3] = [
            ("load", AnchorScrollContext::on_load),
            ("resize", AnchorScrollContext::on_resize),
            (LAYOUT_CHANGE_EVENT, AnchorScrollContext::on_layout_change),
        ];
        for (event, handler) in events {
            let page = Rc::clone(&self.page);
            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Ok(mut page) = page.try_borrow_mut() {
                    handler(&mut page.context);
                }
            });
            self.listeners
                .push(Listener::attach(&target, event, true, closure)?);
        }
        Ok(())
    }

    fn with_set<R>(&self, set: u32, f: impl FnOnce(&mut AnchorSet<DomHost>) -> R) -> Option<R> {
        let Ok(mut page) = self.page.try_borrow_mut() else {
            warn!(set, "anchor scroll re-entered from a callback; call ignored");
            return None;
        };
        let id = page.context.id_at(usize::try_from(set).ok()?)?;
        page.context.get_mut(id).map(f)
    }
}

#[wasm_bindgen]
impl AnchorScroll {
    /// Create the page context and start listening to window events.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AnchorScroll, JsValue> {
        install_panic_hook();
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let origin = Instant::now();
        let page: SharedPage = Rc::new(RefCell::new(Page {
            context: AnchorScrollContext::new(),
            throttle: Throttle::new(DEFAULT_THROTTLE),
            trailing: None,
            trailing_scheduled: false,
        }));

        let trailing = {
            let page = Rc::clone(&page);
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let Ok(mut page) = page.try_borrow_mut() else {
                    return;
                };
                page.trailing_scheduled = false;
                let now = origin.elapsed();
                if page.throttle.flush_due(now) {
                    page.context.on_scroll();
                } else if page.throttle.has_pending() {
                    // Timer fired early; wait for the remainder.
                    page.schedule_trailing(&window, now);
                }
            })
        };
        page.borrow_mut().trailing = Some(trailing.as_ref().unchecked_ref::<Function>().clone());

        let mut this = Self {
            window,
            page,
            origin,
            listeners: Vec::new(),
            _trailing: trailing,
        };
        this.listen_window()?;
        Ok(this)
    }

    /// Build an anchor set from a JSON config and return its handle.
    ///
    /// The set is evaluated immediately, so sets created after `load` start
    /// in the right state.
    pub fn create(&mut self, config_json: &str) -> Result<u32, JsValue> {
        let config = AnchorScrollConfig::from_json(config_json)
            .map_err(|err| js_sys::Error::new(&err.to_string()))?;
        let (host, core_config) = DomHost::build(&self.window, &config)?;

        let bullets: Vec<EventTarget> = host
            .bullet_elements()
            .iter()
            .map(|el| el.clone().into())
            .collect();
        let scroll_next: Option<EventTarget> =
            host.scroll_next_element().map(|el| el.clone().into());

        let id = {
            let mut page = self.page.try_borrow_mut().map_err(|_| {
                JsValue::from_str("create() called from inside an onScroll callback")
            })?;
            let id = page
                .context
                .create(core_config, host)
                .map_err(|err| js_sys::Error::new(&err.to_string()))?;
            let interval = config.throttle_interval();
            if interval < page.throttle.interval() {
                page.throttle = Throttle::new(interval);
            }
            if let Some(set) = page.context.get_mut(id) {
                set.find_current();
                set.check_all_on_screen();
            }
            id
        };

        for (index, target) in bullets.iter().enumerate() {
            let page = Rc::clone(&self.page);
            let closure = Closure::<dyn FnMut()>::new(move || {
                let Ok(mut page) = page.try_borrow_mut() else {
                    return;
                };
                if let Some(set) = page.context.get_mut(id) {
                    set.activate_bullet(index);
                }
            });
            self.listeners
                .push(Listener::attach(target, "click", false, closure)?);
        }
        if let Some(target) = scroll_next {
            let page = Rc::clone(&self.page);
            let closure = Closure::<dyn FnMut()>::new(move || {
                let Ok(mut page) = page.try_borrow_mut() else {
                    return;
                };
                if let Some(set) = page.context.get_mut(id) {
                    set.scroll_to_next();
                }
            });
            self.listeners
                .push(Listener::attach(&target, "click", false, closure)?);
        }

        debug!(set = id.index(), bullets = bullets.len(), "anchor set attached");
        u32::try_from(id.index()).map_err(|_| JsValue::from_str("too many anchor sets"))
    }

    /// Scroll to the section after the current one. Returns the target offset.
    #[wasm_bindgen(js_name = scrollToNext)]
    pub fn scroll_to_next(&self, set: u32) -> Option<f64> {
        self.with_set(set, AnchorSet::scroll_to_next).flatten()
    }

    /// Scroll to the section before the current one. Returns the target offset.
    #[wasm_bindgen(js_name = scrollToPrev)]
    pub fn scroll_to_prev(&self, set: u32) -> Option<f64> {
        self.with_set(set, AnchorSet::scroll_to_prev).flatten()
    }

    /// Scroll to the section at `section` (document order).
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, set: u32, section: u32) -> Option<f64> {
        self.with_set(set, |s| s.go_to(section as usize)).flatten()
    }

    /// Force re-evaluation of one set.
    #[wasm_bindgen(js_name = findCurrent)]
    pub fn find_current(&self, set: u32) {
        self.with_set(set, AnchorSet::find_current);
    }

    /// Re-evaluate every set, as after a layout change.
    pub fn refresh(&self) {
        if let Ok(mut page) = self.page.try_borrow_mut() {
            page.context.on_layout_change();
        }
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self, set: u32) -> Option<u32> {
        self.with_set(set, |s| s.current_index().map(|i| i as u32))
            .flatten()
    }

    #[wasm_bindgen(js_name = currentId)]
    pub fn current_id(&self, set: u32) -> Option<String> {
        self.with_set(set, |s| s.current_id().map(|id| id.as_str().to_owned()))
            .flatten()
    }

    /// Run `callback(state)` after each edge-aware evaluation of `set`.
    ///
    /// `state` is `{ currentIndex, currentId, scrollNextVisible, navigationDisabled }`.
    #[wasm_bindgen(js_name = setOnScroll)]
    pub fn set_on_scroll(&self, set: u32, callback: Function) -> bool {
        self.with_set(set, move |s| {
            s.set_on_scroll(move |set| {
                if let Err(err) = callback.call1(&JsValue::NULL, &set_snapshot(set)) {
                    warn!(error = ?err, "onScroll callback threw");
                }
            });
        })
        .is_some()
    }

    /// Number of anchor sets created so far.
    #[wasm_bindgen(js_name = setCount)]
    pub fn set_count(&self) -> u32 {
        self.page
            .try_borrow()
            .map_or(0, |page| page.context.len() as u32)
    }

    /// Remove every listener. The object is inert afterwards.
    pub fn destroy(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }
}
