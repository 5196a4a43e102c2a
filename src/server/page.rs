//! Minimal HTML page: the form plus an optional result panel.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::resolver::ResolutionResult;

const PAGE_HEAD: &str = r#"<!doctype html>
<html>
<head>
  <meta charset="utf-8">
  <title>Clip Resolver</title>
  <style>
    body{font-family:Arial,sans-serif;max-width:720px;margin:40px auto;padding:0 16px;}
    input[type=text]{width:100%;padding:12px;border-radius:8px;border:1px solid #ccc;margin:8px 0;}
    button{padding:10px 18px;border-radius:8px;background:#1f8ef1;color:#fff;border:none;cursor:pointer;}
    .note{color:#666;font-size:0.9rem;margin-top:8px;}
    .result{margin-top:18px;padding:12px;border-radius:8px;background:#f6f9ff;}
    a.link{display:inline-block;margin:8px 0;padding:8px 12px;background:#2ecc71;color:#fff;border-radius:6px;text-decoration:none;}
    .error{color:#b00020}
  </style>
</head>
<body>
  <h1>Clip Resolver</h1>
  <p class="note">Paste a short-video share link and press Download.</p>
  <form action="/download" method="get">
    <input name="url" type="text" placeholder="https://www.tiktok.com/..." required>
    <label style="display:block;margin:8px 0;">
      <input type="checkbox" name="proxy"> Also offer a server-proxied download
    </label>
    <button type="submit">Download</button>
  </form>
"#;

const PAGE_TAIL: &str = r#"  <p class="note">Respect creators' rights and platform terms.</p>
</body>
</html>
"#;

fn render_result(result: &ResolutionResult) -> String {
    let mut html = String::from("  <div class=\"result\">\n");
    if result.success {
        if let Some(method) = &result.method {
            html.push_str(&format!(
                "    <p><strong>Found:</strong> {}</p>\n",
                encode_text(method)
            ));
        }
        if let Some(media_url) = &result.media_url {
            html.push_str(&format!(
                "    <p><a class=\"link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Direct download</a></p>\n",
                encode_double_quoted_attribute(media_url)
            ));
        }
        if let Some(proxy_url) = &result.proxy_url {
            html.push_str(&format!(
                "    <p><a class=\"link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">Server-proxied download</a></p>\n",
                encode_double_quoted_attribute(proxy_url)
            ));
        }
    } else {
        html.push_str(&format!(
            "    <p class=\"error\"><strong>Error:</strong> {}</p>\n",
            encode_text(result.error.as_deref().unwrap_or("Unknown error"))
        ));
        if let Some(detail) = &result.detail {
            html.push_str(&format!(
                "    <pre style=\"white-space:pre-wrap;font-size:0.9rem;color:#333\">{}</pre>\n",
                encode_text(detail)
            ));
        }
    }
    html.push_str("  </div>\n");
    html
}

/// Renders the page, with a result panel when `result` is given.
pub fn render_page(result: Option<&ResolutionResult>) -> String {
    let mut html = String::from(PAGE_HEAD);
    if let Some(result) = result {
        html.push_str(&render_result(result));
    }
    html.push_str(PAGE_TAIL);
    html
}
