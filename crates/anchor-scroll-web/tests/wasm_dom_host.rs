#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

use anchor_scroll_web::AnchorScroll;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn fixture(root_id: &str, sections: &[Option<&str>], bullets: &[Option<&str>]) -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    root.set_id(root_id);
    for anchor in sections {
        let section = doc.create_element("div").unwrap();
        section.set_class_name(&format!("{root_id}-section"));
        section.set_attribute("style", "height:2000px").unwrap();
        if let Some(anchor) = anchor {
            section.set_attribute("data-anchor", anchor).unwrap();
        }
        root.append_child(&section).unwrap();
    }
    for anchor in bullets {
        let bullet = doc.create_element("span").unwrap();
        bullet.set_class_name(&format!("{root_id}-bullet"));
        if let Some(anchor) = anchor {
            bullet.set_attribute("data-anchor", anchor).unwrap();
        }
        root.append_child(&bullet).unwrap();
    }
    doc.body().unwrap().prepend_with_node_1(&root).unwrap();
    root
}

fn config(root_id: &str) -> String {
    format!(r#"{{"sections":".{root_id}-section","bullets":".{root_id}-bullet","policy":"nearest"}}"#)
}

#[wasm_bindgen_test]
fn create_marks_a_current_bullet() {
    let root = fixture("pairs", &[Some("b"), Some("a")], &[Some("a"), Some("b")]);
    let mut anchors = AnchorScroll::new().unwrap();
    let set = anchors.create(&config("pairs")).unwrap();
    assert!(anchors.current_index(set).is_some());

    let current = root.query_selector_all(".current").unwrap();
    assert_eq!(current.length(), 1);
    anchors.destroy();
    root.remove();
}

#[wasm_bindgen_test]
fn mismatched_bullets_rejected() {
    let root = fixture("broken", &[None, None], &[None]);
    let mut anchors = AnchorScroll::new().unwrap();
    assert!(anchors.create(&config("broken")).is_err());
    assert_eq!(anchors.set_count(), 0);
    anchors.destroy();
    root.remove();
}

#[wasm_bindgen_test]
fn malformed_json_rejected() {
    let mut anchors = AnchorScroll::new().unwrap();
    assert!(anchors.create("{not json").is_err());
    anchors.destroy();
}

#[wasm_bindgen_test]
fn duplicate_sections_leave_wrap_untouched() {
    let root = fixture("dupes", &[Some("x"), Some("x")], &[]);
    let nav = document().create_element("nav").unwrap();
    nav.set_id("dupes-nav");
    root.append_child(&nav).unwrap();

    let mut anchors = AnchorScroll::new().unwrap();
    let config = r##"{"sections":".dupes-section","wrap":"#dupes-nav"}"##;
    assert!(anchors.create(config).is_err());
    assert!(anchors.create(config).is_err());
    assert_eq!(nav.child_element_count(), 0);
    assert_eq!(anchors.set_count(), 0);
    anchors.destroy();
    root.remove();
}
