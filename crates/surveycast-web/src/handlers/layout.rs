//! Page shell shared by both survey pages: header, navigation, styles.

use surveycast_common::Domain;

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
    .site-header { display: flex; justify-content: space-between; align-items: center;
                   padding: 0.75rem 1rem; box-shadow: 0 1px 4px rgba(0,0,0,0.12); background: #fff; }
    .site-header h2 { margin: 0; font-size: 1.25rem; }
    .site-nav a { margin-left: 1rem; color: #475569; text-decoration: none; }
    .site-nav a.active { color: #2563eb; font-weight: 700; }
    .page { width: 100%; max-width: 700px; margin: 1.25rem auto; padding: 0 1rem; box-sizing: border-box; }
    .page-title { text-align: center; font-size: 1.5rem; }
    .form-item { margin-bottom: 1.25rem; }
    .form-item > label { display: block; font-weight: 600; margin-bottom: 0.4rem; }
    .radio-row { display: flex; flex-wrap: wrap; gap: 1rem; }
    .radio-row label { display: flex; align-items: center; gap: 0.35rem; }
    input[type=number] { width: 100%; padding: 0.5rem; border: 1px solid #cbd5e1; border-radius: 6px; }
    .field-error { color: #dc2626; font-size: 0.875rem; margin-top: 0.25rem; }
    button { padding: 0.6rem 1.4rem; border: 0; border-radius: 6px; background: #0f172a; color: #fff; cursor: pointer; }
    button:disabled { opacity: 0.6; cursor: not-allowed; }
    .alert { margin-top: 1rem; padding: 1rem; border-radius: 12px; }
    .alert-error { color: #dc2626; background: #fef2f2; }
    .alert-info { color: #475569; background: #f1f5f9; }
    .prediction { color: #16a34a; font-weight: 800; text-transform: uppercase; background: #f1f5f9;
                  box-shadow: 0 10px 30px rgba(0,0,0,0.15); }
"#;

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&'  => out.push_str("&amp;"),
            '<'  => out.push_str("&lt;"),
            '>'  => out.push_str("&gt;"),
            '"'  => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _    => out.push(c),
        }
    }
    out
}

fn nav(active: Domain) -> String {
    Domain::ALL
        .iter()
        .map(|d| {
            let label = match d {
                Domain::Health => "Health Survey",
                Domain::Bank   => "Bank Survey",
            };
            let class = if *d == active { r#" class="active""# } else { "" };
            format!(r#"<a href="/{}"{}>{}</a>"#, d.slug(), class, label)
        })
        .collect()
}

/// Wrap `body` in the full page shell.
pub fn page(active: Domain, body: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} | SurveyCast</title>
    <style>{style}</style>
</head>
<body>
<header class="site-header">
    <h2>Computation Project</h2>
    <nav class="site-nav">{nav}</nav>
</header>
<main class="page">
    <h1 class="page-title">{title}</h1>
    {body}
</main>
</body>
</html>"#,
        title = active.title(),
        style = STYLE,
        nav = nav(active),
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b a="1">&'"#), "&lt;b a=&quot;1&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_page_marks_active_nav() {
        let html = page(Domain::Bank, "<p>x</p>");
        assert!(html.contains(r#"<a href="/bank" class="active">Bank Survey</a>"#));
        assert!(html.contains(r#"<a href="/health">Health Survey</a>"#));
        assert!(html.contains("Bank Term Deposit Survey"));
        assert!(html.contains("Computation Project"));
    }
}
