use slug::slugify;

/// Deterministic title to slug transform.
pub trait SlugProvider {
    fn slugify(&self, text: &str) -> String;
}

/// Lowercase, ASCII-folded, dash-separated slugs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleSlugProvider;

impl SlugProvider for TitleSlugProvider {
    fn slugify(&self, text: &str) -> String {
        slugify(text)
    }
}
