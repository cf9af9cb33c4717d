#![cfg(target_arch = "wasm32")]

use crate::{create_app, init_logging};
use eframe::WebRunner;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

pub const CANVAS_ID: &str = "bionexas_canvas";

/// Launch the dashboard inside the canvas referenced by `index.html`.
#[wasm_bindgen]
pub async fn start() -> Result<(), JsValue> {
    use web_sys::HtmlCanvasElement;

    init_logging();

    let document = web_sys::window()
        .ok_or("No window")?
        .document()
        .ok_or("No document")?;

    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or("Canvas not found")?
        .dyn_into::<HtmlCanvasElement>()?;

    let web_options = eframe::WebOptions::default();

    WebRunner::new()
        .start(canvas, web_options, Box::new(|cc| Ok(Box::new(create_app(cc)))))
        .await
}
