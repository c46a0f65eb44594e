//! Host document emission module
//!
//! Renders the minimal HTML shell the embedded web view loads. The script
//! source is emitted protocol-relative so the document works under whichever
//! scheme the web view used to fetch it.

/// Render the DOM component host document.
///
/// Output is byte-identical for identical inputs. The script tag is only
/// emitted when a bundle URL is supplied.
pub fn dom_component_html(src: Option<&str>, title: Option<&str>) -> String {
    let title_tag = title
        .map(|t| format!("\n    <title>{t}</title>"))
        .unwrap_or_default();
    let script_tag = src
        .map(|s| format!("\n    <script crossorigin src=\"{}\"></script>", strip_scheme(s)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1, user-scalable=no" />{title_tag}
    <style>
      html,
      body {{
        height: 100%;
        margin: 0;
        -webkit-overflow-scrolling: touch;
      }}
      #root {{
        display: flex;
        flex: 1;
        height: 100%;
      }}
    </style>
  </head>
  <body>
    <noscript>DOM Components require <code>javaScriptEnabled</code></noscript>
    <div id="root"></div>{script_tag}
  </body>
</html>
"#
    )
}

/// Strip a leading `http:`/`https:` so the reference is protocol-relative
fn strip_scheme(src: &str) -> &str {
    src.strip_prefix("https:")
        .or_else(|| src.strip_prefix("http:"))
        .unwrap_or(src)
}
