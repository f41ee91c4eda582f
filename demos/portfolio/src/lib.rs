use wasm_bindgen::prelude::*;

mod phrases;

folio_web::export_page!(phrases::page_config(), "portfolio");
