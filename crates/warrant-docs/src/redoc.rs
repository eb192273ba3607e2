//! Redoc HTML page helper.
//!
//! Produces a self-contained HTML page that loads Redoc from its CDN and
//! points it at a served specification. Serving the page (and the spec) is
//! the host's job; this is just the markup.

/// Renders the Redoc page for a spec served at `spec_url`.
#[must_use]
pub fn redoc_html(title: &str, spec_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>{title}</title>
    <meta charset="utf-8"/>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link href="https://fonts.googleapis.com/css?family=Montserrat:300,400,700|Roboto:300,400,700" rel="stylesheet">
    <style>
        body {{
            margin: 0;
            padding: 0;
        }}
    </style>
</head>
<body>
<redoc spec-url='{spec_url}'></redoc>
<script src="https://cdn.redoc.ly/redoc/latest/bundles/redoc.standalone.js"></script>
</body>
</html>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redoc_html_embeds_title_and_url() {
        let html = redoc_html("Pet API", "/docs/openapi.json");
        assert!(html.contains("<title>Pet API</title>"));
        assert!(html.contains("spec-url='/docs/openapi.json'"));
        assert!(html.contains("redoc.standalone.js"));
    }
}
