/// Resolve an image path returned by the API.
///
/// Absolute `http(s)://` and protocol-relative URLs pass through unchanged; anything
/// else is joined onto `base`. Blank paths resolve to `None`.
pub fn resolve_image_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_base() {
        assert_eq!(
            resolve_image_url("https://cdn.example.com/", "/media/cars/ev6.jpg").as_deref(),
            Some("https://cdn.example.com/media/cars/ev6.jpg")
        );
        assert_eq!(
            resolve_image_url("https://cdn.example.com", "media/x.png").as_deref(),
            Some("https://cdn.example.com/media/x.png")
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        let url = "https://images.example.org/a.webp";
        assert_eq!(resolve_image_url("https://cdn.example.com", url).as_deref(), Some(url));
        assert_eq!(
            resolve_image_url("https://cdn.example.com", "//img.example.org/b.png").as_deref(),
            Some("//img.example.org/b.png")
        );
    }

    #[test]
    fn blank_path_has_no_url() {
        assert_eq!(resolve_image_url("https://cdn.example.com", "  "), None);
    }
}
