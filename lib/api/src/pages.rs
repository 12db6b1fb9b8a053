//! Static operational pages served next to the webhook routes.

use concierge_core::Catalog;

pub const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Concierge | Voice Travel Demo</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; color: #1a1a1a; }
        .header { background: #1a1a1a; color: #e91e63; padding: 20px 40px; font-size: 28px; font-weight: 800; }
        .hero { text-align: center; padding: 60px 20px 40px; max-width: 900px; margin: 0 auto; }
        .hero h1 { font-size: 44px; margin-bottom: 20px; }
        .hero p { font-size: 20px; color: #666; line-height: 1.6; }
        .cta { display: inline-block; margin-top: 30px; background: #e91e63; color: white; padding: 14px 28px;
               border-radius: 8px; text-decoration: none; font-weight: 600; }
        .footer { background: #1a1a1a; color: #999; padding: 30px 20px; text-align: center; font-size: 13px; margin-top: 60px; }
    </style>
</head>
<body>
    <div class="header">CONCIERGE</div>
    <div class="hero">
        <h1>AI Voice Concierge for Japan Travel</h1>
        <p>Ask the voice agent where to stay, what guests say, or what is popular right now.</p>
        <a class="cta" href="/details">View Technical Details</a>
    </div>
    <div class="footer">Powered by a conversational voice agent and the concierge webhook</div>
</body>
</html>
"#;

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/recommend", "Intent-aware recommendations from a natural language query (primary)"),
    ("POST", "/search", "Search properties by keyword and destination"),
    ("POST", "/experiences", "Highly rated stays with guest impressions"),
    ("POST", "/gallery", "Random visual showcase, optionally by style"),
    ("POST", "/inspiration", "Most-liked properties, optionally by destination"),
    ("GET", "/health", "Service status and catalog size"),
];

/// Technical details page; reflects the live catalog
pub fn details_page(catalog: &Catalog) -> String {
    let endpoints: String = ENDPOINTS
        .iter()
        .map(|(method, path, purpose)| {
            format!(
                "<div class=\"endpoint\"><h3><span class=\"method\">{}</span> {}</h3><p>{}</p></div>\n",
                method, path, purpose
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Concierge API - Technical Details</title>
    <meta charset="utf-8">
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; background: #f5f5f5; }}
        .container {{ background: white; padding: 30px; border-radius: 8px; }}
        .status {{ display: inline-block; padding: 4px 12px; background: #d4edda; color: #155724; border-radius: 4px; font-weight: bold; }}
        .endpoint {{ background: #f8f9fa; padding: 15px; margin: 10px 0; border-left: 4px solid #007bff; }}
        .method {{ padding: 2px 8px; border-radius: 3px; background: #28a745; color: white; font-size: 12px; }}
    </style>
</head>
<body>
    <div class="container">
        <h1>Concierge API - Technical Documentation</h1>
        <p><span class="status">OPERATIONAL</span> | {count} properties loaded from {origin}</p>
        <h2>API Endpoints</h2>
        {endpoints}
        <p><a href="/">&larr; Back to Demo</a></p>
    </div>
</body>
</html>
"#,
        count = catalog.len(),
        origin = catalog.origin(),
        endpoints = endpoints,
    )
}

/// Path → description map for the health report
pub fn endpoint_summary() -> serde_json::Map<String, serde_json::Value> {
    ENDPOINTS
        .iter()
        .filter(|(method, _, _)| *method == "POST")
        .map(|(_, path, purpose)| (path.to_string(), serde_json::Value::from(*purpose)))
        .collect()
}
