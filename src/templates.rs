//! Token substitution for media path templates.
//!
//! Backend media paths are URL templates carrying a small fixed set of
//! placeholder tokens. Substitution replaces the first occurrence of a token
//! only and leaves the template unchanged when the token is absent; the
//! caller supplies concrete values.

/// Placeholder for the requested pixel width in image templates.
pub const WIDTH_TOKEN: &str = "{width}";
/// Placeholder for the requested pixel height in image templates.
pub const HEIGHT_TOKEN: &str = "{height}";
/// Placeholder for the video conversion format identifier.
pub const CONVERSION_FORMAT_TOKEN: &str = "{conversionFormat}";

/// Replaces the first occurrence of `token` in `template` with `value`.
pub fn substitute_first(template: &str, token: &str, value: &str) -> String {
    template.replacen(token, value, 1)
}

/// Resolves an image template against concrete pixel dimensions.
pub fn image_url(template: &str, width: u32, height: u32) -> String {
    let url = substitute_first(template, WIDTH_TOKEN, &width.to_string());
    substitute_first(&url, HEIGHT_TOKEN, &height.to_string())
}

/// Resolves a video template against a conversion format identifier.
pub fn video_url(template: &str, format: &str) -> String {
    substitute_first(template, CONVERSION_FORMAT_TOKEN, format)
}
