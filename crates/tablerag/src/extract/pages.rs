//! Parses the page-selector string accepted by the extractor orchestrator.

/// Parses a selector like `"all"`, `"1-5,8"`, or `"3"` into 0-based page
/// indices, silently ignoring ranges or singletons outside `1..=page_count`.
pub fn parse_page_selector(selector: &str, page_count: usize) -> Vec<usize> {
    let selector = selector.trim();
    if selector.is_empty() || selector.eq_ignore_ascii_case("all") {
        return (0..page_count).collect();
    }

    let mut pages = Vec::new();
    for part in selector.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start, end)) = part.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>()) else {
                continue;
            };
            if start == 0 || start > end {
                continue;
            }
            for page in start..=end {
                if page <= page_count {
                    pages.push(page - 1);
                }
            }
        } else if let Ok(page) = part.parse::<usize>()
            && page >= 1
            && page <= page_count
        {
            pages.push(page - 1);
        }
    }

    pages.sort_unstable();
    pages.dedup();
    pages
}
