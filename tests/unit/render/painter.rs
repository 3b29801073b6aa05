use super::*;
use crate::foundation::core::{Point, Rect, SurfaceSize};
use kurbo::PathEl;

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Rect(Rect, Paint),
    Path(Vec<PathEl>, Paint),
    Flush,
}

struct Recorder {
    size: SurfaceSize,
    paint: Option<Paint>,
    ops: Vec<Op>,
}

impl Recorder {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            paint: None,
            ops: Vec::new(),
        }
    }

    fn wedges(&self) -> Vec<&Vec<PathEl>> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Path(els, _) => Some(els),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for Recorder {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn set_paint(&mut self, paint: Paint) {
        self.paint = Some(paint);
    }

    fn fill_rect(&mut self, rect: &Rect) {
        let paint = self.paint.clone().expect("paint set before fill");
        self.ops.push(Op::Rect(*rect, paint));
    }

    fn fill_path(&mut self, path: &BezPath) {
        let paint = self.paint.clone().expect("paint set before fill");
        self.ops.push(Op::Path(path.elements().to_vec(), paint));
    }

    fn flush(&mut self) {
        self.ops.push(Op::Flush);
    }
}

fn scenario_params() -> RenderParams {
    RenderParams {
        ray_count: 4,
        ray_color_even: Color::parse("#000066").unwrap(),
        ray_color_odd: Color::parse("#444444").unwrap(),
        center_core_radius: 0.01,
        center_shade_radius: 0.5,
        center_color: Color::parse("#ffffff").unwrap(),
    }
}

fn angle_of(p: Point, c: Point) -> f64 {
    (p.y - c.y).atan2(p.x - c.x).rem_euclid(std::f64::consts::TAU)
}

#[test]
fn four_rays_on_600_square_paint_two_quarter_wedges_and_centered_gradient() {
    let params = scenario_params();
    let mut rec = Recorder::new(600, 600);
    paint(&params, &mut rec);

    let full = Rect::new(0.0, 0.0, 600.0, 600.0);
    assert_eq!(rec.ops.len(), 5);
    assert_eq!(rec.ops[0], Op::Rect(full, Paint::Solid(params.ray_color_even)));
    assert_eq!(*rec.ops.last().unwrap(), Op::Flush);

    let wedges = rec.wedges();
    assert_eq!(wedges.len(), 2);
    let center = Point::new(300.0, 300.0);
    for (els, start_quarter) in wedges.iter().zip([0.0, 2.0]) {
        let [PathEl::MoveTo(c), PathEl::LineTo(a), PathEl::LineTo(b), PathEl::ClosePath] =
            els.as_slice()
        else {
            panic!("wedge is not a closed triangle: {els:?}");
        };
        assert_eq!(*c, center);
        let start = start_quarter * std::f64::consts::FRAC_PI_2;
        assert!((angle_of(*a, center) - start).abs() < 1e-9);
        let span = (angle_of(*b, center) - angle_of(*a, center)).rem_euclid(std::f64::consts::TAU);
        assert!((span - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }
    for op in &rec.ops[1..3] {
        let Op::Path(_, paint) = op else {
            panic!("expected wedge path, got {op:?}");
        };
        assert_eq!(*paint, Paint::Solid(params.ray_color_odd));
    }

    let Op::Rect(rect, Paint::Radial(g)) = &rec.ops[3] else {
        panic!("expected gradient fill, got {:?}", rec.ops[3]);
    };
    assert_eq!(*rect, full);
    assert_eq!(g.center, center);
    assert!((g.r0 - 6.0).abs() < 1e-12);
    assert_eq!(g.r1, 300.0);
    assert_eq!(g.inner, Color::WHITE);
    assert_eq!(g.outer, Color::TRANSPARENT);
}

#[test]
fn single_ray_paints_one_full_turn_wedge() {
    let params = RenderParams {
        ray_count: 1,
        ..scenario_params()
    };
    let mut rec = Recorder::new(300, 200);
    paint(&params, &mut rec);

    let wedges = rec.wedges();
    assert_eq!(wedges.len(), 1);
    let els = wedges[0];
    assert_eq!(els.len(), 7);
    assert_eq!(els[0], PathEl::MoveTo(Point::new(150.0, 100.0)));
    assert_eq!(els[6], PathEl::ClosePath);
    let (PathEl::LineTo(first), PathEl::LineTo(last)) = (els[1], els[5]) else {
        panic!("wedge outline is not a polyline: {els:?}");
    };
    assert!(first.distance(last) < 1e-6);
}

#[test]
fn odd_ray_count_paints_ceil_half_wedges() {
    for (rays, painted) in [(3u32, 2usize), (5, 3), (10, 5), (11, 6)] {
        let params = RenderParams {
            ray_count: rays,
            ..scenario_params()
        };
        let mut rec = Recorder::new(64, 64);
        paint(&params, &mut rec);
        assert_eq!(rec.wedges().len(), painted, "ray_count {rays}");
    }
}

#[test]
fn zero_rays_paint_base_and_gradient_only() {
    let params = RenderParams {
        ray_count: 0,
        ..scenario_params()
    };
    let mut rec = Recorder::new(64, 64);
    paint(&params, &mut rec);
    assert!(rec.wedges().is_empty());
    assert_eq!(rec.ops.len(), 3);
}

#[test]
fn gradient_radii_scale_with_the_longer_edge() {
    let params = scenario_params();
    let g = center_gradient(&params, 1920.0, 1080.0);
    assert_eq!(g.center, Point::new(960.0, 540.0));
    assert!((g.r0 - 19.2).abs() < 1e-9);
    assert_eq!(g.r1, 960.0);
}
