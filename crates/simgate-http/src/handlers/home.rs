//! `GET /`: a static page describing the API.
//!
//! The page holds only fixed text; the developer attribution is reported by
//! the JSON endpoints.

use axum::response::Html;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>SIM &amp; CNIC Lookup API</title>
  <style>
    body { background: #0b0f19; color: #e5e7eb; font-family: Arial, Helvetica, sans-serif; padding: 30px; }
    .box { max-width: 820px; margin: auto; background: #111827; padding: 25px; border-radius: 12px; }
    h1 { color: #38bdf8; }
    code { background: #020617; padding: 5px 8px; border-radius: 6px; color: #38bdf8; }
    a { color: #38bdf8; text-decoration: none; }
  </style>
</head>
<body>
  <div class="box">
    <h1>SIM &amp; CNIC Lookup API</h1>
    <p>Status: <b>LIVE</b></p>
    <h3>Accepted queries</h3>
    <ul>
      <li>Mobile: <code>03XXXXXXXXX</code> or <code>92XXXXXXXXXX</code></li>
      <li>CNIC: 13 digits</li>
    </ul>
    <h3>Endpoints</h3>
    <ul>
      <li>GET <code>/api/lookup?query=03XXXXXXXXX</code> (aliases <code>q</code>, <code>value</code>)<br>
          Example: <a href="/api/lookup?query=03XXXXXXXXX&amp;pretty=1">/api/lookup?query=03XXXXXXXXX&amp;pretty=1</a></li>
      <li>GET <code>/api/lookup/03XXXXXXXXX</code></li>
      <li>POST <code>/api/lookup</code> with JSON <code>{"query":"03XXXXXXXXX"}</code></li>
      <li>GET <a href="/health"><code>/health</code></a></li>
    </ul>
    <p>Add <code>pretty=1</code> for indented JSON.</p>
  </div>
</body>
</html>
"#;

pub async fn handler() -> Html<&'static str> { Html(HOME_PAGE) }
