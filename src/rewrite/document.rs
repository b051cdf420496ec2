//! Ordered application of the rule set to a decoded document.
//!
//! Order is fixed: CDN strip (blank mode only), dev-client injection, style
//! injection, script injection, then the two published-asset strips. Injected
//! tags never carry the published segment, so the strips cannot remove them.
//!
//! Rewriting is not idempotent: running it twice duplicates injected tags.

use regex::Regex;

use crate::rewrite::rules::RewriteRuleSet;

impl RewriteRuleSet {
    /// Rewrite one decoded HTML document.
    pub fn rewrite(&self, html: &str) -> String {
        let mut html = match &self.cdn_strip {
            Some(re) => re.replace_all(html, "").into_owned(),
            None => html.to_string(),
        };

        insert_before(&mut html, &self.head_close, &self.injection.client_tags);
        insert_before(&mut html, &self.head_close, &self.injection.style_tags);
        insert_before(&mut html, &self.body_close, &self.injection.script_tags);

        if let Some(re) = &self.link_strip {
            html = re.replace_all(&html, "").into_owned();
        }
        if let Some(re) = &self.script_strip {
            html = re.replace_all(&html, "").into_owned();
        }
        html
    }
}

/// Insert `tags` (newline separated) right before the first `anchor` match.
fn insert_before(html: &mut String, anchor: &Regex, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    let Some(at) = anchor.find(html).map(|m| m.start()) else {
        return;
    };
    let mut block = tags.join("\n");
    block.push('\n');
    html.insert_str(at, &block);
}

#[cfg(test)]
mod tests {
    use crate::manifest::BuildManifest;
    use crate::rewrite::rules::RewriteRuleSet;

    const CDN_LINK: &str =
        r#"<link href="https://cdn.myshoptet.com/prj/abc123/master/cms/templates/frontend/css/style.css" rel="stylesheet">"#;

    fn page() -> String {
        format!(
            concat!(
                "<!doctype html><html><head><title>Shop</title>\n",
                "{}\n",
                "<link rel=\"stylesheet\" href=\"https://shop.cz/user/documents/upload/theme/main.min.css?v=3\">\n",
                "</head><body><p>hello</p>\n",
                "<script src=\"https://shop.cz/user/documents/upload/theme/app.min.js\"></script>\n",
                "<script src=\"/other/vendor.js\"></script>\n",
                "</body></html>"
            ),
            CDN_LINK
        )
    }

    fn rules(blank: bool) -> RewriteRuleSet {
        RewriteRuleSet::with_defaults(blank, &BuildManifest::new(["main.css"], ["app.js"])).unwrap()
    }

    #[test]
    fn test_blank_mode_strips_cdn_link() {
        let out = rules(true).rewrite(&page());
        assert!(!out.contains("cdn.myshoptet.com"));

        let out = rules(false).rewrite(&page());
        assert!(out.contains(CDN_LINK));
    }

    #[test]
    fn test_published_assets_replaced_by_local_ones() {
        let out = rules(false).rewrite(&page());

        assert!(!out.contains("/user/documents/upload/theme/main.min.css"));
        assert!(!out.contains("/user/documents/upload/theme/app.min.js"));
        assert!(out.contains(r#"<script src="/other/vendor.js"></script>"#));

        assert_eq!(out.matches(r#"<link rel="stylesheet" href="/src/scss/main.scss">"#).count(), 1);
        assert_eq!(out.matches(r#"<script type="module" src="/src/js/app.js"></script>"#).count(), 1);
        assert_eq!(out.matches(r#"src="/@vite/client""#).count(), 1);
    }

    #[test]
    fn test_injection_order_within_head() {
        let out = rules(false).rewrite("<html><head></head><body></body></html>");
        assert_eq!(
            out,
            concat!(
                "<html><head>",
                "<script type=\"module\" src=\"/@vite/client\"></script>\n",
                "<link rel=\"stylesheet\" href=\"/src/scss/main.scss\">\n",
                "</head><body>",
                "<script type=\"module\" src=\"/src/js/app.js\"></script>\n",
                "</body></html>"
            )
        );
    }

    #[test]
    fn test_only_first_anchor_used() {
        let out = rules(false).rewrite("<head></head><body><pre>&lt;/body&gt;</pre></body></body>");
        assert_eq!(out.matches("/src/js/app.js").count(), 1);
        assert!(out.contains("app.js\"></script>\n</body></body>"));
    }

    #[test]
    fn test_missing_anchors_inject_nothing() {
        let out = rules(false).rewrite("<p>fragment</p>");
        assert_eq!(out, "<p>fragment</p>");
    }

    #[test]
    fn test_minified_single_line_markup() {
        let html = concat!(
            "<html><HEAD><link rel=stylesheet href='/user/documents/t/main.css'/>",
            "<link href=\"/user/documents/t/print.css\"></HEAD><BODY>",
            "<script async src='/user/documents/t/app.js'></script><script>var x=1</script></BODY></html>"
        );
        let out = rules(false).rewrite(html);
        assert!(!out.contains("/user/documents/t/main.css"));
        assert!(out.contains("/user/documents/t/print.css"));
        assert!(!out.contains("/user/documents/t/app.js"));
        assert!(out.contains("<script>var x=1</script>"));
        assert!(out.contains("/src/scss/main.scss"));
    }

    #[test]
    fn test_data_attributes_do_not_trigger_stripping() {
        let html = concat!(
            "<html><head><link data-href=\"/user/documents/x/main.css\" href=\"/keep/vendor.css\">",
            "</head><body><script data-src=\"/user/documents/x/app.js\" src=\"/keep/vendor.js\"></script>",
            "</body></html>"
        );
        let out = rules(false).rewrite(html);
        assert!(out.contains(r#"href="/keep/vendor.css""#));
        assert!(out.contains(r#"src="/keep/vendor.js"></script>"#));
    }

    #[test]
    fn test_rewrite_is_not_idempotent() {
        let r = rules(false);
        let twice = r.rewrite(&r.rewrite(&page()));
        assert_eq!(twice.matches("/src/js/app.js").count(), 2);
    }
}
