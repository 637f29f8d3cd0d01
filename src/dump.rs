//! JSON dump of a compiled image.
//!
//! Lets the pipeline be inspected without a device attached: every
//! compiled path is rendered with its name and (first, interior, last)
//! split, in transmission order.

use plotfeed_core::CompiledPath;
use serde::Serialize;

#[derive(Serialize)]
struct PathDump<'a> {
    name: &'a str,
    #[serde(flatten)]
    path: &'a CompiledPath,
}

/// Render a compiled image as pretty-printed JSON.
pub fn render_json(compiled: &[(String, CompiledPath)]) -> serde_json::Result<String> {
    let entries: Vec<PathDump<'_>> = compiled
        .iter()
        .map(|(name, path)| PathDump { name, path })
        .collect();
    serde_json::to_string_pretty(&entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotfeed_core::Step;
    use std::io::Write;

    fn sample() -> Vec<(String, CompiledPath)> {
        vec![(
            "outline".to_string(),
            CompiledPath {
                first: Step::new(0.0, 0.0),
                interior: vec![Step::new(5.0, 0.0)],
                last: Step::new(10.0, 10.0),
            },
        )]
    }

    #[test]
    fn dump_carries_names_and_steps() {
        let json = render_json(&sample()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "outline");
        assert_eq!(parsed[0]["first"]["x"], 0.0);
        assert_eq!(parsed[0]["interior"][0]["x"], 5.0);
        assert_eq!(parsed[0]["last"]["y"], 10.0);
    }

    #[test]
    fn dump_round_trips_through_a_file() {
        let json = render_json(&sample()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let read_back = std::fs::read_to_string(file.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&read_back).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }
}
