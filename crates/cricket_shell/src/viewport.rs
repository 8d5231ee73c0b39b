//! Viewport lock injected after every page load.

/// Viewport content forced onto every loaded page.
pub const VIEWPORT_CONTENT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";

/// Fire-and-forget script pinning the page scale to 1.0.
///
/// Pages that ship without a viewport meta tag get one appended to `<head>`.
pub const VIEWPORT_LOCK_SCRIPT: &str = r#"(function () {
  var content = 'width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no';
  var meta = document.querySelector('meta[name=viewport]');
  if (!meta) {
    meta = document.createElement('meta');
    meta.setAttribute('name', 'viewport');
    (document.head || document.documentElement).appendChild(meta);
  }
  meta.setAttribute('content', content);
})();"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_sets_the_exported_content() {
        assert!(VIEWPORT_LOCK_SCRIPT.contains(&format!("'{VIEWPORT_CONTENT}'")));
        assert!(VIEWPORT_LOCK_SCRIPT.contains("meta[name=viewport]"));
    }
}
