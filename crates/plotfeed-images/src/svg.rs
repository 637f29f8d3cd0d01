//! SVG outline extraction.
//!
//! Converts an SVG document into plottable polylines. Non-geometric markup
//! (`<text>` and `<style>` blocks) is stripped before extraction, path
//! data is parsed into a lyon path, and curves are flattened into line
//! segments at a fixed tolerance. Supports the practical subset of SVG
//! path commands: `m/l/h/v/c/s/q/t/z` and their absolute forms; arcs are
//! approximated by straight chords.

use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;
use plotfeed_core::{Image, ImageError, PlotPath, Point};

/// Curve flattening tolerance, in SVG user units.
const FLATTEN_TOLERANCE: f32 = 0.1;

/// Build an [`Image`] from an SVG document.
///
/// Each subpath becomes one named stroke (`path-N-M` for subpath M of the
/// N-th `<path>` element). Returns [`ImageError::SvgParse`] when path data
/// cannot be parsed and [`ImageError::EmptyImage`] when the document
/// contains no drawable geometry.
pub fn image_from_svg(svg: &str) -> Result<Image, ImageError> {
    let cleaned = strip_tag_blocks(&strip_tag_blocks(svg, "text"), "style");

    let mut image = Image::new();
    for (index, data) in extract_path_data(&cleaned).into_iter().enumerate() {
        let path = build_path(&data).ok_or_else(|| ImageError::SvgParse {
            reason: format!("unparseable path data in <path> #{index}"),
        })?;

        for (sub, polyline) in flatten_to_polylines(&path).into_iter().enumerate() {
            if polyline.len() < 2 {
                continue;
            }
            image.insert(format!("path-{index}-{sub}"), PlotPath::from(polyline));
        }
    }

    if image.is_empty() {
        return Err(ImageError::EmptyImage);
    }
    Ok(image)
}

/// Remove every `<tag ...>...</tag>` block from the document.
fn strip_tag_blocks(svg: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut out = String::with_capacity(svg.len());
    let mut rest = svg;

    while let Some(start) = rest.find(&open) {
        out.push_str(&rest[..start]);
        match rest[start..].find(&close) {
            Some(end) => rest = &rest[start + end + close.len()..],
            None => {
                // Unterminated block; drop the remainder.
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collect the `d` attribute of every `<path>` element, in document order.
fn extract_path_data(svg: &str) -> Vec<String> {
    let mut data = Vec::new();
    let mut rest = svg;

    while let Some(start) = rest.find("<path") {
        let element = &rest[start..];
        let end = element.find('>').unwrap_or(element.len());
        if let Some(d) = extract_attribute(&element[..end], "d") {
            data.push(d);
        }
        rest = &element[end..];
        if rest.is_empty() {
            break;
        }
        rest = &rest[1..];
    }

    data
}

/// Pull a quoted attribute value out of one element's tag text.
fn extract_attribute(element: &str, name: &str) -> Option<String> {
    let mut search = element;
    loop {
        let at = search.find(name)?;
        let before_ok = at == 0
            || search[..at]
                .chars()
                .last()
                .map(|c| c.is_whitespace())
                .unwrap_or(false);
        let after = &search[at + name.len()..];
        let after = after.trim_start();
        if before_ok && after.starts_with('=') {
            let after = after[1..].trim_start();
            let quote = after.chars().next()?;
            if quote == '"' || quote == '\'' {
                let value = &after[1..];
                let end = value.find(quote)?;
                return Some(value[..end].to_string());
            }
        }
        search = &search[at + name.len()..];
    }
}

/// Tokenize SVG path data into command letters and numeric strings.
///
/// Handles commas and whitespace, splits on a `+`/`-` that begins a new
/// number, and preserves scientific-notation signs.
fn tokenize(data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(ch.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            '-' | '+' => {
                if current.is_empty() {
                    current.push(ch);
                } else if matches!(current.chars().last(), Some('e' | 'E')) {
                    current.push(ch);
                } else {
                    tokens.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn is_command(token: &str) -> bool {
    token.len() == 1
        && token
            .chars()
            .next()
            .map(|c| c.is_ascii_alphabetic())
            .unwrap_or(false)
}

fn parse_f32(token: &str) -> Option<f32> {
    token.parse::<f32>().ok()
}

fn reflect(p: (f32, f32), around: (f32, f32)) -> (f32, f32) {
    (2.0 * around.0 - p.0, 2.0 * around.1 - p.1)
}

/// Build a lyon path from raw SVG path data.
///
/// Returns `None` on malformed data so the caller can report which
/// element failed.
fn build_path(data: &str) -> Option<Path> {
    let tokens = tokenize(data);
    let mut builder = Path::builder();

    let (mut cx, mut cy) = (0.0f32, 0.0f32);
    let (mut start_x, mut start_y) = (0.0f32, 0.0f32);
    let mut subpath_active = false;
    let mut prev_cubic_ctrl: Option<(f32, f32)> = None;
    let mut prev_quad_ctrl: Option<(f32, f32)> = None;
    let mut prev_cmd: Option<char> = None;
    let mut i = 0usize;

    macro_rules! ensure_subpath {
        () => {
            if !subpath_active {
                builder.begin(point(cx, cy));
                subpath_active = true;
                start_x = cx;
                start_y = cy;
            }
        };
    }

    while i < tokens.len() {
        let token = &tokens[i];
        if !is_command(token) {
            i += 1;
            continue;
        }

        let cmd = token.chars().next()?;
        let relative = cmd.is_ascii_lowercase();
        i += 1;

        match cmd.to_ascii_uppercase() {
            'M' => {
                let mut first = true;
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 1 >= tokens.len() {
                        return None;
                    }
                    let x = parse_f32(&tokens[i])?;
                    let y = parse_f32(&tokens[i + 1])?;
                    i += 2;

                    let nx = if relative { cx + x } else { x };
                    let ny = if relative { cy + y } else { y };

                    if first {
                        if subpath_active {
                            builder.end(false);
                        }
                        builder.begin(point(nx, ny));
                        subpath_active = true;
                        start_x = nx;
                        start_y = ny;
                        first = false;
                    } else {
                        ensure_subpath!();
                        builder.line_to(point(nx, ny));
                    }
                    cx = nx;
                    cy = ny;
                }
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
            }
            'L' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 1 >= tokens.len() {
                        return None;
                    }
                    let x = parse_f32(&tokens[i])?;
                    let y = parse_f32(&tokens[i + 1])?;
                    i += 2;

                    let nx = if relative { cx + x } else { x };
                    let ny = if relative { cy + y } else { y };
                    ensure_subpath!();
                    builder.line_to(point(nx, ny));
                    cx = nx;
                    cy = ny;
                }
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
            }
            'H' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    let x = parse_f32(&tokens[i])?;
                    i += 1;
                    let nx = if relative { cx + x } else { x };
                    ensure_subpath!();
                    builder.line_to(point(nx, cy));
                    cx = nx;
                }
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
            }
            'V' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    let y = parse_f32(&tokens[i])?;
                    i += 1;
                    let ny = if relative { cy + y } else { y };
                    ensure_subpath!();
                    builder.line_to(point(cx, ny));
                    cy = ny;
                }
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
            }
            'C' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 5 >= tokens.len() {
                        return None;
                    }
                    let x1 = parse_f32(&tokens[i])?;
                    let y1 = parse_f32(&tokens[i + 1])?;
                    let x2 = parse_f32(&tokens[i + 2])?;
                    let y2 = parse_f32(&tokens[i + 3])?;
                    let x = parse_f32(&tokens[i + 4])?;
                    let y = parse_f32(&tokens[i + 5])?;
                    i += 6;

                    let (c1x, c1y, c2x, c2y, ex, ey) = if relative {
                        (cx + x1, cy + y1, cx + x2, cy + y2, cx + x, cy + y)
                    } else {
                        (x1, y1, x2, y2, x, y)
                    };

                    ensure_subpath!();
                    builder.cubic_bezier_to(point(c1x, c1y), point(c2x, c2y), point(ex, ey));
                    cx = ex;
                    cy = ey;
                    prev_cubic_ctrl = Some((c2x, c2y));
                    prev_quad_ctrl = None;
                }
            }
            'S' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 3 >= tokens.len() {
                        return None;
                    }
                    let x2 = parse_f32(&tokens[i])?;
                    let y2 = parse_f32(&tokens[i + 1])?;
                    let x = parse_f32(&tokens[i + 2])?;
                    let y = parse_f32(&tokens[i + 3])?;
                    i += 4;

                    let c1 = if matches!(prev_cmd, Some('C' | 'c' | 'S' | 's')) {
                        prev_cubic_ctrl
                            .map(|prev| reflect(prev, (cx, cy)))
                            .unwrap_or((cx, cy))
                    } else {
                        (cx, cy)
                    };

                    let (c2x, c2y, ex, ey) = if relative {
                        (cx + x2, cy + y2, cx + x, cy + y)
                    } else {
                        (x2, y2, x, y)
                    };

                    ensure_subpath!();
                    builder.cubic_bezier_to(point(c1.0, c1.1), point(c2x, c2y), point(ex, ey));
                    cx = ex;
                    cy = ey;
                    prev_cubic_ctrl = Some((c2x, c2y));
                    prev_quad_ctrl = None;
                }
            }
            'Q' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 3 >= tokens.len() {
                        return None;
                    }
                    let x1 = parse_f32(&tokens[i])?;
                    let y1 = parse_f32(&tokens[i + 1])?;
                    let x = parse_f32(&tokens[i + 2])?;
                    let y = parse_f32(&tokens[i + 3])?;
                    i += 4;

                    let (qx, qy, ex, ey) = if relative {
                        (cx + x1, cy + y1, cx + x, cy + y)
                    } else {
                        (x1, y1, x, y)
                    };

                    ensure_subpath!();
                    builder.quadratic_bezier_to(point(qx, qy), point(ex, ey));
                    cx = ex;
                    cy = ey;
                    prev_quad_ctrl = Some((qx, qy));
                    prev_cubic_ctrl = None;
                }
            }
            'T' => {
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 1 >= tokens.len() {
                        return None;
                    }
                    let x = parse_f32(&tokens[i])?;
                    let y = parse_f32(&tokens[i + 1])?;
                    i += 2;

                    let ctrl = if matches!(prev_cmd, Some('Q' | 'q' | 'T' | 't')) {
                        prev_quad_ctrl
                            .map(|prev| reflect(prev, (cx, cy)))
                            .unwrap_or((cx, cy))
                    } else {
                        (cx, cy)
                    };

                    let (ex, ey) = if relative { (cx + x, cy + y) } else { (x, y) };

                    ensure_subpath!();
                    builder.quadratic_bezier_to(point(ctrl.0, ctrl.1), point(ex, ey));
                    cx = ex;
                    cy = ey;
                    prev_quad_ctrl = Some(ctrl);
                    prev_cubic_ctrl = None;
                }
            }
            'A' => {
                // Arcs are approximated by their chord; plotter outlines in
                // practice come pre-flattened from the vectorizer.
                while i < tokens.len() && !is_command(&tokens[i]) {
                    if i + 6 >= tokens.len() {
                        return None;
                    }
                    let x = parse_f32(&tokens[i + 5])?;
                    let y = parse_f32(&tokens[i + 6])?;
                    i += 7;

                    let (ex, ey) = if relative { (cx + x, cy + y) } else { (x, y) };
                    tracing::warn!("approximating SVG arc with a straight segment");
                    ensure_subpath!();
                    builder.line_to(point(ex, ey));
                    cx = ex;
                    cy = ey;
                }
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
            }
            'Z' => {
                if subpath_active {
                    builder.close();
                    subpath_active = false;
                }
                cx = start_x;
                cy = start_y;
                prev_cubic_ctrl = None;
                prev_quad_ctrl = None;
            }
            _ => return None,
        }

        prev_cmd = Some(cmd);
    }

    if subpath_active {
        builder.end(false);
    }
    Some(builder.build())
}

/// Flatten a lyon path into polylines, one per subpath.
///
/// A closed subpath gets its start point appended so the pen returns to
/// where the stroke began.
fn flatten_to_polylines(path: &Path) -> Vec<Vec<Point>> {
    let mut polylines = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for event in path.iter().flattened(FLATTEN_TOLERANCE) {
        match event {
            lyon::path::Event::Begin { at } => {
                current.clear();
                current.push(Point::new(at.x as f64, at.y as f64));
            }
            lyon::path::Event::Line { to, .. } => {
                current.push(Point::new(to.x as f64, to.y as f64));
            }
            lyon::path::Event::End { first, close, .. } => {
                if close {
                    current.push(Point::new(first.x as f64, first.y as f64));
                }
                if !current.is_empty() {
                    polylines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    if !current.is_empty() {
        polylines.push(current);
    }
    polylines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_text_and_style_blocks() {
        let svg = r#"<svg><style>.a{fill:red}</style><path d="M 0 0 L 1 1"/><text x="1">hi</text></svg>"#;
        let cleaned = strip_tag_blocks(&strip_tag_blocks(svg, "text"), "style");
        assert!(!cleaned.contains("style"));
        assert!(!cleaned.contains("hi"));
        assert!(cleaned.contains("<path"));
    }

    #[test]
    fn extracts_d_attributes_in_order() {
        let svg = r#"<svg><path d="M 0 0 L 1 1"/><path fill="red" d='M 2 2 L 3 3'/></svg>"#;
        let data = extract_path_data(svg);
        assert_eq!(data, ["M 0 0 L 1 1", "M 2 2 L 3 3"]);
    }

    #[test]
    fn tokenizer_splits_signs_and_commands() {
        let tokens = tokenize("M10-5l1.5,2.5z");
        assert_eq!(tokens, ["M", "10", "-5", "l", "1.5", "2.5", "z"]);
    }

    #[test]
    fn polyline_from_line_commands() {
        let image = image_from_svg(r#"<svg><path d="M 0 0 L 10 0 L 10 10"/></svg>"#).unwrap();
        assert_eq!(image.len(), 1);
        let (_, path) = image.iter().next().unwrap();
        assert_eq!(path.points()[0], Point::new(0.0, 0.0));
        assert_eq!(path.points()[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn closed_subpath_returns_to_start() {
        let image = image_from_svg(r#"<svg><path d="M 0 0 L 10 0 L 10 10 Z"/></svg>"#).unwrap();
        let (_, path) = image.iter().next().unwrap();
        let points = path.points();
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn curves_flatten_into_many_segments() {
        let image =
            image_from_svg(r#"<svg><path d="M 0 0 C 0 50 100 50 100 0"/></svg>"#).unwrap();
        let (_, path) = image.iter().next().unwrap();
        assert!(path.len() > 4, "curve produced only {} points", path.len());
    }

    #[test]
    fn geometry_free_document_is_empty() {
        let err = image_from_svg(r#"<svg><text>only text</text></svg>"#).unwrap_err();
        assert!(matches!(err, ImageError::EmptyImage));
    }
}
