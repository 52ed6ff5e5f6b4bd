//! Redirect target construction.
//!
//! Expands the three fixed placeholders of a rule target in a single pass.
//! Substituted values are never rescanned, so a path that happens to contain
//! `{query}` is copied as-is.

use crate::redirect::matcher::RequestContext;

#[derive(Debug, Clone, Copy)]
enum Placeholder {
    Uri,
    Path,
    Query,
}

const PLACEHOLDERS: [(&str, Placeholder); 3] = [
    ("{uri}", Placeholder::Uri),
    ("{path}", Placeholder::Path),
    ("{query}", Placeholder::Query),
];

/// Build the redirect target for `template` against the request context.
pub fn build_target(template: &str, ctx: &RequestContext<'_>) -> String {
    if !template.contains('{') {
        return template.to_owned();
    }

    let mut out = String::with_capacity(template.len() + ctx.path.len() + ctx.query.len() + 1);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match PLACEHOLDERS.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, placeholder)) => {
                expand(*placeholder, ctx, &mut out);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

fn expand(placeholder: Placeholder, ctx: &RequestContext<'_>, out: &mut String) {
    match placeholder {
        Placeholder::Uri => {
            out.push_str(ctx.path);
            if !ctx.query.is_empty() {
                out.push('?');
                out.push_str(ctx.query);
            }
        }
        Placeholder::Path => out.push_str(ctx.path),
        Placeholder::Query => out.push_str(ctx.query),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::matcher::Scheme;

    fn ctx<'a>(path: &'a str, query: &'a str) -> RequestContext<'a> {
        RequestContext::new(Scheme::Http, path, query)
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(build_target("{uri}", &ctx("/a", "b=c")), "/a?b=c");
        assert_eq!(build_target("{uri}", &ctx("/a", "")), "/a");
        assert_eq!(build_target("{path}", &ctx("/a", "b=c")), "/a");
        assert_eq!(build_target("{query}", &ctx("/a", "b=c")), "b=c");
    }

    #[test]
    fn test_embedded_placeholders() {
        assert_eq!(
            build_target("http://example.com{uri}", &ctx("/a", "b=c")),
            "http://example.com/a?b=c"
        );
        assert_eq!(
            build_target("http://example.com/a{path}?b=c&{query}", &ctx("/d", "e=f")),
            "http://example.com/a/d?b=c&e=f"
        );
        assert_eq!(build_target("{path}{path}", &ctx("/x", "")), "/x/x");
    }

    #[test]
    fn test_verbatim_targets() {
        assert_eq!(build_target("https://example.com/", &ctx("/a", "b=c")), "https://example.com/");
        assert_eq!(build_target("/{unknown}/{", &ctx("/a", "")), "/{unknown}/{");
        assert_eq!(build_target("{URI}", &ctx("/a", "")), "{URI}");
    }

    #[test]
    fn test_no_recursive_expansion() {
        assert_eq!(build_target("{path}", &ctx("/{query}", "x=1")), "/{query}");
        assert_eq!(build_target("{query}|{path}", &ctx("/p", "{path}")), "{path}|/p");
    }
}
