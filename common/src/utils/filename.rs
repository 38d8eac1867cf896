use uuid::Uuid;

/// Returns `len` random lowercase hex characters, sourced from v4 UUIDs.
pub fn random_hex(len: usize) -> String {
    let mut out = String::with_capacity(len);
    while out.len() < len {
        out.push_str(&Uuid::new_v4().simple().to_string());
    }
    out.truncate(len);
    out
}

/// Lowercases and reduces a display name to `[a-z0-9-]`, collapsing runs of
/// other characters into single hyphens.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Strips directory components and characters that are unsafe in a filename.
/// Whitespace becomes underscores, leading dots are dropped so the result can
/// never climb out of the scratch directory.
pub fn sanitize_filename(input: &str) -> String {
    let base = input
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let mut name = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            name.push(c);
        } else if c.is_whitespace() {
            name.push('_');
        }
    }

    name.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_hex_has_requested_length_and_charset() {
        for len in [8, 32, 40] {
            let token = random_hex(len);
            assert_eq!(token.len(), len);
            assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn random_hex_is_unique_per_call() {
        assert_ne!(random_hex(32), random_hex(32));
    }

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
        assert_eq!(slugify("  Hello,  World!  "), "hello-world");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }

    #[test]
    fn slugify_drops_leading_and_trailing_separators() {
        assert_eq!(slugify("--Acme--"), "acme");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("..\\..\\boot.ini"), "boot.ini");
        assert_eq!(sanitize_filename("reports/q3 summary.pdf"), "q3_summary.pdf");
    }

    #[test]
    fn sanitize_drops_leading_dots() {
        assert_eq!(sanitize_filename(".hidden.txt"), "hidden.txt");
        assert_eq!(sanitize_filename(".."), "");
    }

    #[test]
    fn sanitize_keeps_ordinary_names() {
        assert_eq!(sanitize_filename("notes.txt"), "notes.txt");
        assert_eq!(sanitize_filename("Q3-report_v2.pdf"), "Q3-report_v2.pdf");
    }
}
