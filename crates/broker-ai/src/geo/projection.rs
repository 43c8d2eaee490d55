use geo::{coord, BoundingRect, Coord, LineString, MapCoords, MultiPolygon, Rect};
use std::fmt::Write;

/// Smallest rectangle covering every region, or `None` when all are empty.
pub fn combined_bounds<'a, I>(regions: I) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = &'a MultiPolygon<f64>>,
{
    regions
        .into_iter()
        .filter_map(|region| region.bounding_rect())
        .reduce(|acc, rect| {
            Rect::new(
                coord! { x: acc.min().x.min(rect.min().x), y: acc.min().y.min(rect.min().y) },
                coord! { x: acc.max().x.max(rect.max().x), y: acc.max().y.max(rect.max().y) },
            )
        })
}

/// Translate + uniform scale + Y flip from source coordinates into an SVG
/// box whose longer side is `size` (padding included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    bounds: Rect<f64>,
    scale: f64,
    padding: f64,
}

impl Projection {
    pub fn fit(bounds: Rect<f64>, size: f64, padding: f64) -> Self {
        let span = bounds.width().max(bounds.height());
        let usable = (size - 2.0 * padding).max(0.0);
        let scale = if span > 0.0 { usable / span } else { 1.0 };

        Self {
            bounds,
            scale,
            padding,
        }
    }

    pub fn project(&self, point: Coord<f64>) -> Coord<f64> {
        coord! {
            x: (point.x - self.bounds.min().x) * self.scale + self.padding,
            y: (self.bounds.max().y - point.y) * self.scale + self.padding,
        }
    }

    pub fn apply(&self, region: &MultiPolygon<f64>) -> MultiPolygon<f64> {
        region.map_coords(|point| self.project(point))
    }

    pub fn width(&self) -> f64 {
        self.bounds.width() * self.scale + 2.0 * self.padding
    }

    pub fn height(&self) -> f64 {
        self.bounds.height() * self.scale + 2.0 * self.padding
    }

    /// SVG `viewBox` attribute value.
    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", round1(self.width()), round1(self.height()))
    }
}

/// Closed SVG path (`M x,y L x,y … Z`) for an already projected ring, or
/// `None` when fewer than three coordinates remain.
pub fn ring_to_path(ring: &LineString<f64>) -> Option<String> {
    if ring.0.len() < 3 {
        return None;
    }

    let mut path = String::with_capacity(ring.0.len() * 14);
    for (index, point) in ring.coords().enumerate() {
        let command = if index == 0 { "M" } else { " L" };
        let _ = write!(path, "{command}{},{}", round1(point.x), round1(point.y));
    }
    path.push_str(" Z");
    Some(path)
}

fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
