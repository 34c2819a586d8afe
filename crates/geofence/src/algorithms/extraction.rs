use imageproc::contours::BorderType;
use crate::{
    traits::ContourExtractor,
    types::{BinaryMask, RawContour},
};

/// Suzuki-Abe border following via imageproc, with straight runs compressed
/// to their end points.
///
/// Every border is reported, outer boundaries and hole boundaries alike.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor;

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_contours<'a>(&'a self, mask: &'a BinaryMask) -> Box<dyn Iterator<Item = RawContour> + 'a> {
        let width = mask.width() as i32;
        let height = mask.height() as i32;
        let contours = imageproc::contours::find_contours::<i32>(mask.as_image());

        Box::new(
            contours
                .into_iter()
                .map(|contour| RawContour {
                    points: compress_chain(contour.points.iter().map(|p| [p.x, p.y]).collect()),
                    is_hole: contour.border_type == BorderType::Hole,
                })
                .filter(move |contour| {
                    if is_image_frame(contour, width, height) {
                        tracing::debug!("Dropping full-frame contour");
                        return false;
                    }
                    !contour.is_empty()
                }),
        )
    }
}

/// A contour whose bounding box spans the whole mask is the frame, not a shape.
pub fn is_image_frame(contour: &RawContour, width: i32, height: i32) -> bool {
    contour
        .bounding_box()
        .is_some_and(|(min, max)| min == [0, 0] && max == [width - 1, height - 1])
}

/// Drop repeated points and interior points of straight or diagonal runs.
///
/// The ring is treated as closed: the first point is also checked against
/// its wrap-around neighbours.
pub fn compress_chain(points: Vec<[i32; 2]>) -> Vec<[i32; 2]> {
    let mut ring: Vec<[i32; 2]> = Vec::with_capacity(points.len());
    for point in points {
        if ring.last() != Some(&point) {
            ring.push(point);
        }
    }
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.len() < 3 {
        return ring;
    }

    let n = ring.len();
    (0..n)
        .filter(|&i| {
            let prev = ring[(i + n - 1) % n];
            let curr = ring[i];
            let next = ring[(i + 1) % n];
            !continues_run(prev, curr, next)
        })
        .map(|i| ring[i])
        .collect()
}

fn continues_run(prev: [i32; 2], curr: [i32; 2], next: [i32; 2]) -> bool {
    let incoming = [curr[0] - prev[0], curr[1] - prev[1]];
    let outgoing = [next[0] - curr[0], next[1] - curr[1]];
    let cross = incoming[0] * outgoing[1] - incoming[1] * outgoing[0];
    let dot = incoming[0] * outgoing[0] + incoming[1] * outgoing[1];
    cross == 0 && dot > 0
}
