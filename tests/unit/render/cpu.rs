use super::*;

fn params(ray_count: u32) -> RenderParams {
    RenderParams {
        ray_count,
        ray_color_even: Color::parse("#000066").unwrap(),
        ray_color_odd: Color::parse("#444444").unwrap(),
        center_core_radius: 0.01,
        center_shade_radius: 0.2,
        center_color: Color::WHITE,
    }
}

fn render(p: &RenderParams, w: u32, h: u32) -> FrameRGBA {
    let mut s = CpuSurface::new(SurfaceSize::new(w, h)).unwrap();
    s.render(p);
    s.readback()
}

fn assert_px_near(frame: &FrameRGBA, x: u32, y: u32, expected: [u8; 4]) {
    let px = frame.pixel(x, y).unwrap();
    for (got, want) in px.iter().zip(expected) {
        assert!(
            (i32::from(*got) - i32::from(want)).abs() <= 2,
            "pixel ({x},{y}) = {px:?}, expected {expected:?}"
        );
    }
}

#[test]
fn rejects_invalid_sizes() {
    assert!(CpuSurface::new(SurfaceSize::new(0, 10)).is_err());
    assert!(CpuSurface::new(SurfaceSize::new(70_000, 10)).is_err());
}

#[test]
fn four_rays_alternate_quadrants() {
    let f = render(&params(4), 200, 200);
    assert_eq!(f.data.len(), 200 * 200 * 4);
    assert!(f.premultiplied);

    // y grows downwards, so wedge 0 (angles 0..pi/2) is the bottom-right quadrant.
    let odd = [0x44, 0x44, 0x44, 255];
    let even = [0, 0, 0x66, 255];
    assert_px_near(&f, 180, 180, odd);
    assert_px_near(&f, 20, 180, even);
    assert_px_near(&f, 20, 20, odd);
    assert_px_near(&f, 180, 20, even);
}

#[test]
fn center_pixel_shows_the_core_color() {
    let f = render(&params(4), 200, 200);
    assert_px_near(&f, 100, 100, [255, 255, 255, 255]);
    assert_px_near(&f, 99, 99, [255, 255, 255, 255]);
}

#[test]
fn single_ray_overpaints_the_whole_base() {
    let f = render(&params(1), 160, 90);
    let odd = [0x44, 0x44, 0x44, 255];
    for (x, y) in [(0, 0), (159, 0), (0, 89), (159, 89), (5, 45), (150, 45)] {
        assert_px_near(&f, x, y, odd);
    }
}

#[test]
fn two_rays_split_the_surface_in_halves() {
    let f = render(&params(2), 120, 120);
    assert_px_near(&f, 60, 110, [0x44, 0x44, 0x44, 255]);
    assert_px_near(&f, 60, 10, [0, 0, 0x66, 255]);
}

#[test]
fn every_pixel_is_opaque_with_opaque_colors() {
    let f = render(&params(7), 64, 48);
    assert!(f.data.chunks_exact(4).all(|px| px[3] >= 254));
}

#[test]
fn equal_radii_skip_the_gradient() {
    let p = RenderParams {
        center_core_radius: 0.2,
        center_shade_radius: 0.2,
        ..params(4)
    };
    let f = render(&p, 100, 100);
    assert_px_near(&f, 90, 90, [0x44, 0x44, 0x44, 255]);
    assert_px_near(&f, 10, 90, [0, 0, 0x66, 255]);
}

#[test]
fn resize_changes_dimensions_and_rerender_fills_them() {
    let mut s = CpuSurface::new(SurfaceSize::new(32, 32)).unwrap();
    assert!(!s.resize(SurfaceSize::new(32, 32)).unwrap());
    assert!(s.resize(SurfaceSize::new(48, 16)).unwrap());
    assert_eq!(s.size(), SurfaceSize::new(48, 16));

    s.render(&params(4));
    let f = s.readback();
    assert_eq!((f.width, f.height), (48, 16));
    assert!(f.data.chunks_exact(4).all(|px| px[3] >= 254));
}

#[test]
fn rerender_replaces_previous_content() {
    let mut s = CpuSurface::new(SurfaceSize::new(64, 64)).unwrap();
    s.render(&params(4));
    let p = RenderParams {
        ray_color_odd: Color::rgb(255, 0, 0),
        ..params(4)
    };
    s.render(&p);
    let f = s.readback();
    assert_px_near(&f, 60, 60, [255, 0, 0, 255]);
    assert_px_near(&f, 4, 60, [0, 0, 0x66, 255]);
}
