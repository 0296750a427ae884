#![no_main]

use anchor_scroll_web::AnchorScrollConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = AnchorScrollConfig::from_json(text) {
        assert!(!config.sections.trim().is_empty());
        assert!(!config.bullets.trim().is_empty());
        let _ = config.throttle_interval();
    }
});
