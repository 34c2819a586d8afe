use geo::{MapCoords, Scale, Translate};
use geo_types::Coord;
use crate::{
    error::{FenceError, Result},
    projection::{AnchorPoint, Projector},
    types::{Geographic, Pixel, Planar, Shape},
};

/// Place a pixel shape into the anchor's planar system.
///
/// Both axes are scaled about the coordinate origin `(0, 0)` first, and the
/// result is then shifted by the anchor's easting/northing. Pixel `(0, 0)`
/// therefore lands exactly on the anchor.
pub fn place(shape: &Shape<Pixel>, scale: f64, anchor: &AnchorPoint) -> Result<Shape<Planar>> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FenceError::InvalidScale(scale));
    }

    let placed = shape
        .polygon()
        .scale_around_point(scale, scale, Coord { x: 0.0, y: 0.0 })
        .translate(anchor.easting, anchor.northing);

    Ok(Shape::from_polygon(placed))
}

/// Map every planar vertex back to WGS84, one vertex at a time.
pub fn reproject(shape: &Shape<Planar>, projector: &Projector) -> Result<Shape<Geographic>> {
    let geographic = shape
        .polygon()
        .try_map_coords(|coord| projector.to_geographic(coord))?;

    Ok(Shape::from_polygon(geographic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{resolve_anchor, UtmZone};

    fn anchor(easting: f64, northing: f64) -> AnchorPoint {
        AnchorPoint {
            lat: 0.0,
            lon: 0.0,
            easting,
            northing,
            zone: UtmZone { number: 31, letter: 'N' },
        }
    }

    fn triangle() -> Shape<Pixel> {
        Shape::from_vertices(vec![
            Coord { x: 3.0, y: 4.0 },
            Coord { x: 10.0, y: 4.0 },
            Coord { x: 10.0, y: 12.0 },
        ])
    }

    #[test]
    fn test_scale_about_origin_then_translate() {
        let placed = place(&triangle(), 2.0, &anchor(1000.0, 5000.0)).unwrap();
        assert_eq!(
            placed.vertices(),
            &[
                Coord { x: 1006.0, y: 5008.0 },
                Coord { x: 1020.0, y: 5008.0 },
                Coord { x: 1020.0, y: 5024.0 },
            ]
        );
    }

    #[test]
    fn test_distances_from_anchor_scale_linearly() {
        let anchor = anchor(166_021.443, 12.5);
        let shape = triangle();
        for scale in [0.5, 1.0, 7.0, 40.0] {
            let placed = place(&shape, scale, &anchor).unwrap();
            for (pixel, planar) in shape.vertices().iter().zip(placed.vertices()) {
                let pixel_distance = pixel.x.hypot(pixel.y);
                let planar_distance = (planar.x - anchor.easting).hypot(planar.y - anchor.northing);
                assert!((planar_distance - scale * pixel_distance).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn test_rejects_bad_scale() {
        for scale in [0.0, -1.0, f64::NAN] {
            assert!(matches!(place(&triangle(), scale, &anchor(0.0, 0.0)), Err(FenceError::InvalidScale(_))));
        }
    }

    #[test]
    fn test_reproject_is_per_vertex() {
        let resolved = resolve_anchor(47.554703108406244, 9.086087020816901).unwrap();
        let placed = place(&triangle(), 10.0, &resolved.anchor).unwrap();
        let geographic = reproject(&placed, &resolved.projector).unwrap();

        assert_eq!(geographic.vertex_count(), placed.vertex_count());
        for (planar, lonlat) in placed.vertices().iter().zip(geographic.vertices()) {
            let expected = resolved.projector.to_geographic(*planar).unwrap();
            assert_eq!(*lonlat, expected);
        }
        // 10 m/px keeps a ~100 m triangle within a few thousandths of a degree.
        for vertex in geographic.vertices() {
            assert!((vertex.y - resolved.anchor.lat).abs() < 0.01);
            assert!((vertex.x - resolved.anchor.lon).abs() < 0.01);
        }
    }
}
