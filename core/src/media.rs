// core/src/media.rs

//! Media reference resolution.
//!
//! Product images are stored as paths relative to the media root
//! (`products/shoe.png`). They are served under a media URL prefix and, in
//! representations, upgraded to absolute URLs using the request origin.

use thiserror::Error;
use tracing::warn;
use url::Url;

/// Path rendered when a product has no usable image.
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder.png";

/// Relative path a product image column defaults to.
pub const DEFAULT_PRODUCT_IMAGE: &str = "products/placeholder.png";

pub const DEFAULT_MEDIA_URL: &str = "/media/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MediaError {
  #[error("no file is associated with this image reference")]
  Missing,

  #[error("image reference '{0}' is not a storage-relative path")]
  UnsafePath(String),
}

/// Maps a storage-relative path to its URL path under `media_url`.
pub fn storage_url(media_url: &str, path: Option<&str>) -> Result<String, MediaError> {
  let path = path.map(str::trim).filter(|p| !p.is_empty()).ok_or(MediaError::Missing)?;

  if path.starts_with('/')
    || path.contains('\\')
    || path.chars().any(char::is_control)
    || path.split('/').any(|segment| segment == "..")
  {
    return Err(MediaError::UnsafePath(path.to_string()));
  }

  let encoded = encode_path(path).ok_or_else(|| MediaError::UnsafePath(path.to_string()))?;
  let prefix = media_url.trim_end_matches('/');
  Ok(format!("{}{}", prefix, encoded))
}

/// Percent-encodes each segment of a relative path, returning it with a
/// leading `/`. Reserved characters such as `#` and `?` stay part of the
/// file name.
fn encode_path(path: &str) -> Option<String> {
  let mut scratch = Url::parse("http://media.invalid/").ok()?;
  scratch.path_segments_mut().ok()?.pop_if_empty().extend(path.split('/'));
  Some(scratch.path().to_string())
}

/// Like [`storage_url`] but never fails: any problem with the stored
/// reference yields [`PLACEHOLDER_IMAGE_URL`].
pub fn image_url_or_placeholder(media_url: &str, path: Option<&str>) -> String {
  match storage_url(media_url, path) {
    Ok(url) => url,
    Err(MediaError::Missing) => PLACEHOLDER_IMAGE_URL.to_string(),
    Err(e) => {
      warn!(error = %e, "Unreadable image reference, using placeholder.");
      PLACEHOLDER_IMAGE_URL.to_string()
    }
  }
}

/// Resolves `location` against the request origin. Locations that already
/// carry a scheme are returned untouched; a location that cannot be joined is
/// returned as given.
pub fn build_absolute_uri(origin: &Url, location: &str) -> String {
  if Url::parse(location).is_ok() {
    return location.to_string();
  }
  match origin.join(location) {
    Ok(url) => url.to_string(),
    Err(e) => {
      warn!(error = %e, location, "Could not build absolute URI, returning location as-is.");
      location.to_string()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storage_url_joins_prefix() {
    assert_eq!(
      storage_url("/media/", Some("products/shoe.png")).unwrap(),
      "/media/products/shoe.png"
    );
    assert_eq!(storage_url("/media", Some("a.png")).unwrap(), "/media/a.png");
  }

  #[test]
  fn storage_url_encodes_reserved_characters() {
    assert_eq!(
      storage_url("/media/", Some("products/hat#2 v1.png")).unwrap(),
      "/media/products/hat%232%20v1.png"
    );
    assert_eq!(
      storage_url("/media/", Some("products/what?.png")).unwrap(),
      "/media/products/what%3F.png"
    );
    assert_eq!(storage_url("/media/", Some("100%.png")).unwrap(), "/media/100%25.png");
  }

  #[test]
  fn storage_url_rejects_missing_and_unsafe() {
    assert_eq!(storage_url("/media/", None), Err(MediaError::Missing));
    assert_eq!(storage_url("/media/", Some("  ")), Err(MediaError::Missing));
    assert!(matches!(
      storage_url("/media/", Some("../etc/passwd")),
      Err(MediaError::UnsafePath(_))
    ));
    assert!(matches!(
      storage_url("/media/", Some("/abs.png")),
      Err(MediaError::UnsafePath(_))
    ));
  }

  #[test]
  fn placeholder_on_any_failure() {
    assert_eq!(image_url_or_placeholder("/media/", None), PLACEHOLDER_IMAGE_URL);
    assert_eq!(image_url_or_placeholder("/media/", Some("a/../../b")), PLACEHOLDER_IMAGE_URL);
    assert_eq!(image_url_or_placeholder("/media/", Some("p.png")), "/media/p.png");
  }

  #[test]
  fn absolute_uri_uses_origin() {
    let origin = Url::parse("http://shop.test:8000/api/products/").unwrap();
    assert_eq!(
      build_absolute_uri(&origin, "/media/products/a.png"),
      "http://shop.test:8000/media/products/a.png"
    );
    assert_eq!(
      build_absolute_uri(&origin, "/media/products/hat%232%20v1.png"),
      "http://shop.test:8000/media/products/hat%232%20v1.png"
    );
    assert_eq!(
      build_absolute_uri(&origin, "https://cdn.test/a.png"),
      "https://cdn.test/a.png"
    );
  }
}
