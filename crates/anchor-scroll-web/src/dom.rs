//! `web-sys` implementation of [`ScrollHost`].

use anchor_scroll_core::error::ElementKind;
use anchor_scroll_core::pairing::resolve_ids;
use anchor_scroll_core::{
    AnchorSetConfig, BulletSource, RegionMetrics, ScrollHost, ViewportMetrics,
};
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use crate::config::AnchorScrollConfig;

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn query_one(document: &Document, selector: &str, field: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| js_error(&format!("{field}: no element matches `{selector}`")))
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

/// The page elements of one anchor set.
#[derive(Debug)]
pub(crate) struct DomHost {
    window: Window,
    document: Document,
    sections: Vec<Element>,
    bullets: Vec<Element>,
    wrap: Option<Element>,
    scroll_next: Option<Element>,
    current_class: String,
    hidden_class: String,
    disable_class: String,
}

impl DomHost {
    /// Locate (or synthesize) the elements named by `config`.
    ///
    /// Returns the host together with the core configuration describing the
    /// same elements in the same order.
    pub(crate) fn build(
        window: &Window,
        config: &AnchorScrollConfig,
    ) -> Result<(Self, AnchorSetConfig), JsValue> {
        let document = window
            .document()
            .ok_or_else(|| js_error("window has no document"))?;
        let sections = query_all(&document, &config.sections)?;
        let section_ids: Vec<Option<String>> = sections
            .iter()
            .map(|el| el.get_attribute(&config.anchor_attribute))
            .collect();

        let wrap = match &config.wrap {
            Some(selector) => Some(query_one(&document, selector, "wrap")?),
            None => None,
        };
        let (bullets, bullet_source) = match &wrap {
            Some(wrap) => {
                // Reject duplicate section ids before the page is touched.
                let ids = resolve_ids(&section_ids, ElementKind::Section)
                    .map_err(|err| js_error(&err.to_string()))?;
                let mut bullets = Vec::with_capacity(ids.len());
                for id in &ids {
                    let bullet = document.create_element("div")?;
                    bullet.set_class_name(&config.bullet_class);
                    bullet.set_attribute(&config.anchor_attribute, id.as_str())?;
                    wrap.append_child(&bullet)?;
                    bullets.push(bullet);
                }
                (bullets, BulletSource::Synthesized)
            }
            None => {
                let bullets = query_all(&document, &config.bullets)?;
                let ids = bullets
                    .iter()
                    .map(|el| el.get_attribute(&config.anchor_attribute))
                    .collect();
                (bullets, BulletSource::Elements(ids))
            }
        };

        let scroll_next = match &config.scroll_next {
            Some(selector) => {
                let found = document.query_selector(selector)?;
                if found.is_none() {
                    warn!(selector = %selector, "scroll-next control not found; ignoring");
                }
                found
            }
            None => None,
        };

        let core_config = AnchorSetConfig {
            sections: section_ids,
            bullets: bullet_source,
            scroll_next: scroll_next.is_some(),
            policy: config.policy,
        };
        let host = Self {
            window: window.clone(),
            document,
            sections,
            bullets,
            wrap,
            scroll_next,
            current_class: config.current_class.clone(),
            hidden_class: config.hidden_class.clone(),
            disable_class: config.disable_class.clone(),
        };
        Ok((host, core_config))
    }

    pub(crate) fn bullet_elements(&self) -> &[Element] {
        &self.bullets
    }

    pub(crate) fn scroll_next_element(&self) -> Option<&Element> {
        self.scroll_next.as_ref()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

impl ScrollHost for DomHost {
    fn viewport(&self) -> ViewportMetrics {
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .document_element()
            .map_or(viewport_height, |root| f64::from(root.scroll_height()));
        ViewportMetrics::new(self.scroll_y(), viewport_height, document_height)
    }

    fn region(&self, section: usize) -> RegionMetrics {
        let Some(element) = self.sections.get(section) else {
            return RegionMetrics::default();
        };
        let rect = element.get_bounding_client_rect();
        RegionMetrics::new(rect.top() + self.scroll_y(), rect.height())
    }

    fn set_bullet_current(&mut self, bullet: usize, current: bool) {
        if let Some(element) = self.bullets.get(bullet) {
            set_class(element, &self.current_class, current);
        }
    }

    fn set_scroll_next_visible(&mut self, visible: bool) {
        if let Some(element) = &self.scroll_next {
            set_class(element, &self.hidden_class, !visible);
        }
    }

    fn set_navigation_disabled(&mut self, disabled: bool) {
        if let Some(wrap) = &self.wrap {
            set_class(wrap, &self.disable_class, disabled);
        }
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}
