//! Predefined figure catalog.
//!
//! Hand-authored point lists in arbitrary units. Keys are stable; the
//! unknown-key error lists them so a caller can retry with a valid one.

use plotfeed_core::{Image, ImageError, PlotPath};

/// Keys of every predefined figure, in catalog order.
pub fn available_keys() -> Vec<&'static str> {
    vec!["square", "triangle", "diamond", "zigzag", "star", "grid"]
}

/// Look up a predefined figure by key.
///
/// Returns [`ImageError::UnknownImage`] with the list of valid keys when
/// the key does not exist; the caller may retry with a different one.
pub fn predefined(key: &str) -> Result<Image, ImageError> {
    let mut image = Image::new();

    match key {
        "square" => {
            image.insert(
                "outline",
                PlotPath::from_pairs(&[
                    (0.0, 0.0),
                    (10.0, 0.0),
                    (10.0, 10.0),
                    (0.0, 10.0),
                    (0.0, 0.0),
                ]),
            );
        }
        "triangle" => {
            image.insert(
                "outline",
                PlotPath::from_pairs(&[(0.0, 0.0), (10.0, 0.0), (5.0, 10.0), (0.0, 0.0)]),
            );
        }
        "diamond" => {
            image.insert(
                "outline",
                PlotPath::from_pairs(&[
                    (5.0, 0.0),
                    (10.0, 5.0),
                    (5.0, 10.0),
                    (0.0, 5.0),
                    (5.0, 0.0),
                ]),
            );
        }
        "zigzag" => {
            image.insert(
                "stroke",
                PlotPath::from_pairs(&[
                    (0.0, 0.0),
                    (2.0, 8.0),
                    (4.0, 0.0),
                    (6.0, 8.0),
                    (8.0, 0.0),
                    (10.0, 8.0),
                ]),
            );
        }
        "star" => {
            image.insert(
                "outline",
                PlotPath::from_pairs(&[
                    (5.0, 10.0),
                    (6.2, 6.6),
                    (9.8, 6.6),
                    (6.9, 4.4),
                    (8.1, 1.0),
                    (5.0, 3.1),
                    (1.9, 1.0),
                    (3.1, 4.4),
                    (0.2, 6.6),
                    (3.8, 6.6),
                    (5.0, 10.0),
                ]),
            );
        }
        "grid" => {
            // Disjoint strokes; exercises the shared-bounds scaling.
            image.insert(
                "horizontal-1",
                PlotPath::from_pairs(&[(0.0, 3.0), (10.0, 3.0)]),
            );
            image.insert(
                "horizontal-2",
                PlotPath::from_pairs(&[(0.0, 7.0), (10.0, 7.0)]),
            );
            image.insert(
                "vertical-1",
                PlotPath::from_pairs(&[(3.0, 0.0), (3.0, 10.0)]),
            );
            image.insert(
                "vertical-2",
                PlotPath::from_pairs(&[(7.0, 0.0), (7.0, 10.0)]),
            );
        }
        _ => {
            return Err(ImageError::UnknownImage {
                key: key.to_string(),
                available: available_keys().iter().map(|k| k.to_string()).collect(),
            });
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_key_resolves() {
        for key in available_keys() {
            let image = predefined(key).unwrap();
            assert!(!image.is_empty(), "catalog image '{key}' is empty");
            for (name, path) in image.iter() {
                assert!(path.len() >= 2, "path '{name}' of '{key}' is too short");
            }
        }
    }

    #[test]
    fn unknown_key_lists_alternatives() {
        let err = predefined("spiral").unwrap_err();
        match err {
            ImageError::UnknownImage { key, available } => {
                assert_eq!(key, "spiral");
                assert_eq!(available.len(), available_keys().len());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn grid_is_multiple_disjoint_strokes() {
        let image = predefined("grid").unwrap();
        assert_eq!(image.len(), 4);
    }
}
