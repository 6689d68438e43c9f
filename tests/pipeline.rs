use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use softraster::geometry::{Visibility, classify, interpolate_depth, point_in_triangle};
use softraster::matrix::Mat4;
use softraster::obj::parse_obj;
use softraster::point2d::Point2D;
use softraster::point3d::Point3D;
use softraster::raster::prepare_triangle;
use softraster::screen::{BACKGROUND, EMPTY_DEPTH};
use softraster::transform::project_triangle;
use softraster::triangle::VisibleTriangle;
use softraster::{
    Camera, LoopState, Mesh, Model, PresentError, Presenter, RenderLoop, Renderer, Scene, Texture, Transform, Vertex,
};

fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::new(Point3D::new(x, y, z), Point3D::ZERO, Point2D::default())
}

/// One mesh per triangle, corners given in NDC-ready object space.
fn model_of(triangles: &[[Point3D; 3]]) -> Model {
    let meshes = triangles
        .iter()
        .map(|t| Mesh::new(t.iter().map(|p| vertex(p.x, p.y, p.z)).collect(), vec![0, 1, 2]))
        .collect();
    Model::new(meshes).unwrap()
}

fn random_triangles(rng: &mut StdRng, count: usize) -> Vec<[Point3D; 3]> {
    (0..count)
        .map(|_| {
            let mut corner = || Point3D::new(rng.gen_range(-1.3..1.3), rng.gen_range(-1.3..1.3), rng.gen_range(-1.2..1.2));
            [corner(), corner(), corner()]
        })
        .collect()
}

/// Single-threaded reference: every pixel center against every visible triangle, in order.
fn reference_owners(model: &Model, mvp: &Mat4, width: u32, height: u32) -> Vec<i32> {
    let visible: Vec<VisibleTriangle> = model
        .triangles()
        .iter()
        .enumerate()
        .filter_map(|(i, tri)| match classify(project_triangle(mvp, model.triangle_positions(tri))) {
            Visibility::Visible(ndc) => prepare_triangle(i as i32, ndc, width, height),
            _ => None,
        })
        .collect();

    let mut owners = vec![BACKGROUND; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let p = Point2D { x: x as f32 + 0.5, y: y as f32 + 0.5 };
            let mut best = EMPTY_DEPTH;
            for tri in &visible {
                let mut weights = Point3D::ZERO;
                if !point_in_triangle(&tri.screen, p, &mut weights) {
                    continue;
                }
                let depth = interpolate_depth(tri.screen.depths(), weights);
                if depth.is_finite() && depth >= best {
                    best = depth;
                    owners[(y * width + x) as usize] = tri.index;
                }
            }
        }
    }
    owners
}

#[test]
fn single_triangle_end_to_end() {
    let model = model_of(&[[Point3D::new(-0.5, -0.5, 0.0), Point3D::new(0.5, -0.5, 0.0), Point3D::new(0.0, 0.5, 0.0)]]);
    let mut renderer = Renderer::new(64, 64, 3).unwrap();
    let stats = renderer.render_frame(&model, &Texture::solid(200, 100, 50), &Mat4::IDENTITY);

    assert_eq!(stats.rasterized, 1);
    assert_eq!(stats.covered_pixels, 512);
    let screen = renderer.screen();
    let mut background = 0;
    for y in 0..64 {
        for x in 0..64 {
            match screen.get_owner(x, y).unwrap() {
                BACKGROUND => {
                    background += 1;
                    assert_eq!(screen.get_pixel(x, y), Some((0, 0, 0)));
                }
                owner => {
                    assert_eq!(owner, 0);
                    assert_eq!(screen.get_pixel(x, y), Some((200, 100, 50)));
                }
            }
        }
    }
    assert_eq!(background, 64 * 64 - 512);
}

#[test]
fn repeated_frames_are_identical() {
    let mut rng = StdRng::seed_from_u64(7);
    let model = model_of(&random_triangles(&mut rng, 40));
    let texture = Texture::from_raw(2, 2, 3, vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255]).unwrap();
    let mut renderer = Renderer::new(48, 32, 4).unwrap();

    let first_stats = renderer.render_frame(&model, &texture, &Mat4::IDENTITY);
    let first = renderer.frame().to_vec();
    for _ in 0..3 {
        let stats = renderer.render_frame(&model, &texture, &Mat4::IDENTITY);
        assert_eq!(renderer.frame(), first.as_slice());
        assert_eq!(stats.fragments, first_stats.fragments);
        assert_eq!(stats.covered_pixels, first_stats.covered_pixels);
    }
}

#[test]
fn parallel_bands_match_sequential_depth_resolution() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..8 {
        let model = model_of(&random_triangles(&mut rng, 25));
        let (width, height) = (rng.gen_range(1..70), rng.gen_range(1..70));
        let expected = reference_owners(&model, &Mat4::IDENTITY, width, height);

        for threads in [1, 2, 5, 8] {
            let mut renderer = Renderer::new(width, height, threads).unwrap();
            renderer.render_frame(&model, &Texture::solid(9, 9, 9), &Mat4::IDENTITY);
            assert_eq!(renderer.screen().owner, expected, "{width}x{height} on {threads} threads");
        }
    }
}

#[test]
fn larger_depth_wins_and_ties_go_to_the_later_triangle() {
    let big = |z: f32| [Point3D::new(-0.9, -0.9, z), Point3D::new(0.9, -0.9, z), Point3D::new(0.0, 0.9, z)];
    let model = model_of(&[big(0.2), big(0.6), big(0.4), big(0.6)]);
    let mut renderer = Renderer::new(16, 16, 2).unwrap();
    renderer.render_frame(&model, &Texture::solid(1, 1, 1), &Mat4::IDENTITY);

    let screen = renderer.screen();
    assert_eq!(screen.get_owner(8, 8), Some(3));
    assert!(screen.get_depth(8, 8).unwrap() > 0.5);
}

#[test]
fn triangles_sharing_an_edge_never_claim_the_same_pixel() {
    let (lo, hi) = (-0.8, 0.8);
    let model = model_of(&[
        [Point3D::new(lo, lo, 0.0), Point3D::new(hi, lo, 0.0), Point3D::new(hi, hi, 0.0)],
        [Point3D::new(lo, lo, 0.0), Point3D::new(hi, hi, 0.0), Point3D::new(lo, hi, 0.0)],
    ]);
    let mut renderer = Renderer::new(24, 20, 3).unwrap();
    let stats = renderer.render_frame(&model, &Texture::solid(1, 1, 1), &Mat4::IDENTITY);

    assert_eq!(stats.rasterized, 2);
    // with equal depths any overlap would show up as overdraw
    assert_eq!(stats.fragments, stats.covered_pixels);
    let owners = &renderer.screen().owner;
    assert!(owners.contains(&0) && owners.contains(&1));
}

#[test]
fn visibility_filter_properties_hold_on_random_geometry() {
    let mut rng = StdRng::seed_from_u64(42);
    for tri in random_triangles(&mut rng, 500) {
        let ndc = project_triangle(&Mat4::IDENTITY, tri).unwrap();
        let mirrored = [ndc[0], ndc[2], ndc[1]];
        match classify(Some(ndc)) {
            Visibility::Visible(_) => {
                assert!(ndc.iter().any(|p| p.x.abs() <= 1.0 && p.y.abs() <= 1.0 && p.z.abs() <= 1.0));
                assert_ne!(classify(Some(mirrored)), Visibility::Visible(mirrored));
            }
            Visibility::OutsideFrustum => {
                assert!(ndc.iter().all(|p| p.x.abs() > 1.0 || p.y.abs() > 1.0 || p.z.abs() > 1.0));
            }
            Visibility::BackFacing => assert!(!matches!(classify(Some(mirrored)), Visibility::BackFacing)),
            Visibility::Degenerate => unreachable!("identity keeps w = 1"),
        }
        // same input, same answer
        assert_eq!(classify(Some(ndc)), classify(Some(ndc)));
    }
}

#[test]
fn screen_covering_triangle_without_corners_inside_is_culled() {
    let model = model_of(&[[Point3D::new(-5.0, -5.0, 0.0), Point3D::new(5.0, -5.0, 0.0), Point3D::new(0.0, 5.0, 0.0)]]);
    let mut renderer = Renderer::new(8, 8, 1).unwrap();
    let stats = renderer.render_frame(&model, &Texture::solid(1, 1, 1), &Mat4::IDENTITY);
    assert_eq!(stats.outside_frustum, 1);
    assert_eq!(stats.covered_pixels, 0);
}

#[test]
fn sampling_wraps_at_the_texture_border() {
    #[rustfmt::skip]
    let texture = Texture::from_raw(2, 2, 3, vec![
        0, 0, 0,     100, 0, 0,
        0, 100, 0,   100, 100, 0,
    ])
    .unwrap();
    // both ends of the uv range land between the last and the wrapped first texel
    let low = texture.sample_bilinear(Point2D { x: 0.0, y: 0.0 });
    let high = texture.sample_bilinear(Point2D { x: 1.0, y: 1.0 });
    assert!(low.x.is_finite() && high.x.is_finite());
    assert_eq!(low.x, 50.0);
    assert_eq!(high.x, 50.0);
}

struct CountingPresenter {
    frames: Vec<Vec<u8>>,
    close_after: Option<usize>,
    finished: bool,
}

impl CountingPresenter {
    fn new(close_after: Option<usize>) -> Self {
        Self { frames: Vec::new(), close_after, finished: false }
    }
}

impl Presenter for CountingPresenter {
    fn present(&mut self, frame: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
        assert_eq!(frame.len(), (width * height * 3) as usize);
        self.frames.push(frame.to_vec());
        Ok(())
    }

    fn close_requested(&mut self) -> bool {
        self.close_after.is_some_and(|n| self.frames.len() >= n)
    }

    fn finish(&mut self) -> Result<(), PresentError> {
        assert!(!self.finished, "finished twice");
        self.finished = true;
        Ok(())
    }
}

fn quad_scene() -> Scene {
    let obj = "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nf 1 2 3 4\n";
    Scene {
        model: parse_obj(obj.as_bytes()).unwrap(),
        texture: Texture::solid(30, 60, 90),
        camera: Camera::new(45.0f32.to_radians(), 32.0 / 24.0, 0.1, 100.0),
        placement: Transform {
            position: Point3D::new(0.0, 0.0, -5.0),
            axis: Point3D::new(0.0, 0.0, 1.0),
            angle: 180.0f32.to_radians(),
        },
    }
}

#[test]
fn render_loop_stops_at_the_frame_limit() {
    let scene = quad_scene();
    let renderer = Renderer::new(32, 24, 2).unwrap();
    let mut render_loop = RenderLoop::new(renderer, CountingPresenter::new(None), Some(3));

    assert_eq!(render_loop.run(&scene).unwrap(), LoopState::FrameLimitReached);
    assert_eq!(render_loop.state(), LoopState::Finished);
    assert_eq!(render_loop.frames(), 3);
    assert_eq!(render_loop.summary().frames(), 3);

    let presenter = render_loop.presenter();
    assert!(presenter.finished);
    assert_eq!(presenter.frames.len(), 3);
    assert!(presenter.frames.windows(2).all(|w| w[0] == w[1]));
    // the quad sits in front of the camera; sample just left of its diagonal
    let inside = (12 * 32 + 13) * 3;
    assert_eq!(&presenter.frames[0][inside..inside + 3], &[30, 60, 90]);
    assert_eq!(&presenter.frames[0][..3], &[0, 0, 0]);
    assert!(render_loop.finish().is_ok());
}

#[test]
fn render_loop_honours_close_requests_between_frames() {
    let scene = quad_scene();
    let renderer = Renderer::new(32, 24, 1).unwrap();
    let mut render_loop = RenderLoop::new(renderer, CountingPresenter::new(Some(2)), None);

    assert_eq!(render_loop.step(&scene).unwrap(), LoopState::Running);
    assert_eq!(render_loop.step(&scene).unwrap(), LoopState::CloseRequested);
    // no further frames once a stop state is reached
    assert_eq!(render_loop.step(&scene).unwrap(), LoopState::CloseRequested);
    assert_eq!(render_loop.frames(), 2);
    render_loop.finish().unwrap();
    assert_eq!(render_loop.state(), LoopState::Finished);
}

#[test]
fn zero_frame_limit_presents_nothing() {
    let scene = quad_scene();
    let renderer = Renderer::new(8, 8, 1).unwrap();
    let mut render_loop = RenderLoop::new(renderer, CountingPresenter::new(None), Some(0));
    assert_eq!(render_loop.run(&scene).unwrap(), LoopState::FrameLimitReached);
    assert!(render_loop.presenter().frames.is_empty());
}
