//! Save generated text as a file download.
//!
//! In the browser the text is wrapped in a `Blob`, linked through an object
//! URL and clicked as a temporary `<a download>`. Native builds have no page
//! to download into and report failure.

#[cfg(test)]
#[path = "download_test.rs"]
mod download_test;

/// Offer `contents` to the user as `file_name`. Returns whether the download
/// was started.
pub fn save_text(file_name: &str, mime: &str, contents: &str) -> bool {
    #[cfg(feature = "csr")]
    {
        match browser_download(file_name, mime, contents) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("download: could not save {file_name}: {err:?}");
                false
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        log::debug!("download: {file_name} ({mime}, {} bytes) needs a browser", contents.len());
        false
    }
}

#[cfg(feature = "csr")]
fn browser_download(file_name: &str, mime: &str, contents: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let parts = js_sys::Array::of1(&JsValue::from_str(contents));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime);
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(JsValue::from)?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    web_sys::Url::revoke_object_url(&url)
}
