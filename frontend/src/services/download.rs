use gloo::file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::HtmlAnchorElement;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no document available")]
    NoDocument,

    #[error("could not create download link")]
    Link,
}

/// Hand `bytes` to the browser as a file download
pub fn save_bytes(bytes: &[u8], file_name: &str, mime_type: &str) -> Result<(), DownloadError> {
    let blob = Blob::new_with_options(bytes, Some(mime_type));
    let url = ObjectUrl::from(blob);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DownloadError::NoDocument)?;
    let anchor = document
        .create_element("a")
        .map_err(|_| DownloadError::Link)?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| DownloadError::Link)?;

    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    // the object URL is revoked when `url` drops
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_error_messages() {
        assert_eq!(DownloadError::NoDocument.to_string(), "no document available");
        assert_eq!(DownloadError::Link.to_string(), "could not create download link");
    }

    #[wasm_bindgen_test]
    fn test_link_is_created_in_a_browser_document() {
        assert!(save_bytes(b"id,name\n1,Hope\n", "centres.csv", "text/csv").is_ok());
    }
}
