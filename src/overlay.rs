use crate::core::Mode;
use web_sys as web;

/// Show the active mode in the optional `#hint-overlay` element.
pub fn show_mode(document: &web::Document, mode: Mode) {
    if let Some(el) = document.get_element_by_id("hint-overlay") {
        let hint_html = format!(
            "<div style='color: #3a3a3a; font: 13px system-ui; background: rgba(255, 255, 255, 0.6); padding: 6px 10px; border-radius: 6px;'>Mode: {} \u{2022} m toggle \u{2022} 1 major \u{2022} 2 minor</div>",
            mode.name()
        );
        el.set_inner_html(&hint_html);
    }
}
