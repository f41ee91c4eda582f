pub mod dom;
pub mod frame;
pub mod page;
pub mod runner;

pub use page::{boot, resume, stop};
pub use runner::PageRunner;

/// Generate the `#[wasm_bindgen]` exports for a page.
///
/// - `page_start`: the module's start function; mounts the effects once the
///   document is ready
/// - `page_stop` / `page_resume`: pause and resume the typewriter loop
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// folio_web::export_page!(folio_fx::FxConfig::default(), "my-page");
/// ```
///
/// # Arguments
///
/// - `$config`: an expression evaluating to `folio_fx::FxConfig`
/// - `$page_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_page {
    ($config:expr, $page_name:literal) => {
        #[wasm_bindgen(start)]
        pub fn page_start() {
            $crate::boot($config, $page_name);
        }

        #[wasm_bindgen]
        pub fn page_stop() {
            $crate::stop();
        }

        #[wasm_bindgen]
        pub fn page_resume() {
            $crate::resume();
        }
    };
}
