use super::*;

/// Quads around the major circle.
pub const LONGITUDE_STEPS: usize = 36;
/// Quads around the tube.
pub const LATITUDE_STEPS:  usize = 18;

pub const LONGITUDE_ANGLE_STEP: Real =  PI / 18.0;
// negative so the tube is swept clockwise about +Z; 18 steps of 20° close the circle
pub const LATITUDE_ANGLE_STEP:  Real = -PI /  9.0;

/// Tube cross-section point before any rotation.
pub const MINOR_RADIUS: Real = 0.5;
/// Offset of the tube centre from the axis of revolution.
pub const MAJOR_OFFSET: Vec3 = vec3!(1.0, 1.0, 0.0);

pub type ElementIndex = u16;

pub struct TorusMesh {
    positions:      Grid<Point3>,
    centers:        Grid<Point3>,
    normals:        Grid<Vec3>,
    vertex_normals: Grid<Vec3>,
}

/// Closed-form surface point for any `(j, i)`, without reference to a built grid.
///
/// Evaluates `R_y(j·π/18) · T(1, 1, 0) · R_z(−i·π/9)` applied to `(0.5, 0, 0)`.
pub fn torus_point(j: isize, i: isize) -> Point3 {
    let latitude  = Mat4::from_angle_z(Rad(i as Real * LATITUDE_ANGLE_STEP));
    let translate = Mat4::from_translation(MAJOR_OFFSET);
    let longitude = Mat4::from_angle_y(Rad(j as Real * LONGITUDE_ANGLE_STEP));

    (longitude * translate * latitude).transform_point(point3!(MINOR_RADIUS, 0.0, 0.0))
}

pub fn make_torus_mesh() -> TorusMesh {
    let positions = Grid::from_fn(LONGITUDE_STEPS, LATITUDE_STEPS, |j, i| {
        torus_point(j as isize, i as isize)
    });

    let centers = Grid::from_fn(LONGITUDE_STEPS, LATITUDE_STEPS, |j, i| {
        let [a, b, c, d] = quad_corners(&positions, j as isize, i as isize);
        Point3::from_vec((a.to_vec() + b.to_vec() + c.to_vec() + d.to_vec()) / 4.0)
    });

    let normals = Grid::from_fn(LONGITUDE_STEPS, LATITUDE_STEPS, |j, i| {
        let [a, b, c, d] = quad_corners(&positions, j as isize, i as isize);
        (a - c).cross(b - d).normalize()
    });

    // smooth shading: each corner averages the four quads that share it
    let vertex_normals = Grid::from_fn(LONGITUDE_STEPS, LATITUDE_STEPS, |j, i| {
        let (j, i) = (j as isize, i as isize);
        (normals[(j, i)] + normals[(j-1, i)] + normals[(j, i-1)] + normals[(j-1, i-1)])
            .normalize()
    });

    TorusMesh { positions, centers, normals, vertex_normals }
}

/// Corners of quad `(j, i)` in winding order:
/// `p[j][i]`, `p[j][i+1]`, `p[j+1][i+1]`, `p[j+1][i]`.
#[inline]
fn quad_corners(positions: &Grid<Point3>, j: isize, i: isize) -> [Point3; 4] {
    [
        positions[(j,   i  )],
        positions[(j,   i+1)],
        positions[(j+1, i+1)],
        positions[(j+1, i  )],
    ]
}

impl TorusMesh {
    #[inline]
    pub fn position(&self, j: isize, i: isize) -> Point3 {
        self.positions[(j, i)]
    }

    #[inline]
    pub fn center(&self, j: isize, i: isize) -> Point3 {
        self.centers[(j, i)]
    }

    #[inline]
    pub fn normal(&self, j: isize, i: isize) -> Vec3 {
        self.normals[(j, i)]
    }

    #[inline]
    pub fn quad(&self, j: isize, i: isize) -> [Point3; 4] {
        quad_corners(&self.positions, j, i)
    }

    pub fn positions(&self) -> &Grid<Point3> {
        &self.positions
    }

    pub fn centers(&self) -> &Grid<Point3> {
        &self.centers
    }

    pub fn normals(&self) -> &Grid<Vec3> {
        &self.normals
    }

    pub fn vertex_normals(&self) -> &Grid<Vec3> {
        &self.vertex_normals
    }

    #[inline]
    fn element(&self, j: isize, i: isize) -> ElementIndex {
        let (j, i) = self.positions.wrap(j, i);
        (i * self.positions.width() + j) as ElementIndex
    }

    /// Two triangles per quad, indexing into `positions().as_slice()`.
    pub fn triangle_indices(&self) -> Vec<ElementIndex> {
        let mut indices = Vec::with_capacity(6 * self.positions.len());
        for ((j, i), _) in self.positions.iter_indexed() {
            let (j, i) = (j as isize, i as isize);
            let a = self.element(j,   i  );
            let b = self.element(j,   i+1);
            let c = self.element(j+1, i+1);
            let d = self.element(j+1, i  );
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
        indices
    }

    /// Every quad edge exactly once, as a line list. Each quad owns its
    /// `(j,i)-(j,i+1)` and `(j,i)-(j+1,i)` edges; the rest belong to neighbours.
    pub fn edge_indices(&self) -> Vec<ElementIndex> {
        let mut indices = Vec::with_capacity(4 * self.positions.len());
        for ((j, i), _) in self.positions.iter_indexed() {
            let (j, i) = (j as isize, i as isize);
            let a = self.element(j, i);
            indices.extend_from_slice(&[a, self.element(j, i+1), a, self.element(j+1, i)]);
        }
        indices
    }

    /// Segments from each quad centre along its normal, `length` long.
    pub fn normal_segments(&self, length: Real) -> Vec<Point3> {
        self.centers.iter()
            .zip(self.normals.iter())
            .flat_map(|(&center, &normal)| vec![center, center + length * normal])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: Real = 1e-5;

    fn tube_centre_under(point: Point3) -> Point3 {
        // revolution axis is +Y through (0, 1, 0); tube centre sits at distance 1 from it
        let radial = vec3!(point.x, 0.0, point.z).normalize();
        point3!(0.0, MAJOR_OFFSET.y, 0.0) + MAJOR_OFFSET.x * radial
    }

    #[test]
    fn grid_has_fixed_resolution() {
        let mesh = make_torus_mesh();
        assert_eq!(mesh.positions().width(), 36);
        assert_eq!(mesh.positions().height(), 18);
        assert_eq!(mesh.positions().len(), 36 * 18);
        assert_eq!(mesh.centers().len(), 36 * 18);
        assert_eq!(mesh.normals().len(), 36 * 18);
    }

    #[test]
    fn indexing_is_modular() {
        let mesh = make_torus_mesh();
        for j in -72_isize..108 {
            for i in -36_isize..54 {
                let canonical = mesh.position(j.rem_euclid(36), i.rem_euclid(18));
                assert_eq!(mesh.position(j, i), canonical);
            }
        }
    }

    #[test]
    fn closed_form_has_no_seam() {
        let mesh = make_torus_mesh();
        for i in 0..18 {
            for j in 0..36 {
                let unwrapped = torus_point(j + 36, i + 18);
                assert!((unwrapped - mesh.position(j, i)).magnitude() < EPSILON,
                    "seam at ({}, {})", j, i);
            }
        }
    }

    #[test]
    fn last_column_meets_first() {
        let mesh = make_torus_mesh();
        for i in 0..18 {
            let step = (mesh.position(1, i) - mesh.position(0, i)).magnitude();
            let seam = (mesh.position(0, i) - mesh.position(35, i)).magnitude();
            assert!(step > 0.0);
            assert!((seam - step).abs() < EPSILON, "row {}: seam {} vs step {}", i, seam, step);
        }
    }

    #[test]
    fn points_lie_on_the_tube() {
        let mesh = make_torus_mesh();
        for &p in mesh.positions().iter() {
            let distance = (p - tube_centre_under(p)).magnitude();
            assert!((distance - MINOR_RADIUS).abs() < EPSILON);
        }
    }

    #[test]
    fn first_point_matches_construction() {
        let mesh = make_torus_mesh();
        let p = mesh.position(0, 0);
        assert!((p - point3!(1.5, 1.0, 0.0)).magnitude() < EPSILON);

        // a quarter turn of longitude carries +X onto -Z
        let q = mesh.position(9, 0);
        assert!((q - point3!(0.0, 1.0, -1.5)).magnitude() < EPSILON);
    }

    #[test]
    fn quad_normals_are_unit_and_outward() {
        let mesh = make_torus_mesh();
        for ((j, i), &normal) in mesh.normals().iter_indexed() {
            assert!((normal.magnitude() - 1.0).abs() < EPSILON, "quad ({}, {})", j, i);

            let center  = mesh.center(j as isize, i as isize);
            let outward = center - tube_centre_under(center);
            assert!(normal.dot(outward) > 0.0, "quad ({}, {}) faces inward", j, i);
        }
    }

    #[test]
    fn vertex_normals_are_unit_and_outward() {
        let mesh = make_torus_mesh();
        for ((j, i), &normal) in mesh.vertex_normals().iter_indexed() {
            let p = mesh.position(j as isize, i as isize);
            let outward = (p - tube_centre_under(p)).normalize();
            assert!((normal.magnitude() - 1.0).abs() < EPSILON);
            assert!(normal.dot(outward) > 0.99, "vertex ({}, {})", j, i);
        }
    }

    #[test]
    fn centers_average_their_corners_across_the_seam() {
        let mesh = make_torus_mesh();
        let corners = [
            mesh.position(35, 17),
            mesh.position(35, 0),
            mesh.position(0, 0),
            mesh.position(0, 17),
        ];
        let mut sum = VEC3_0;
        for &c in corners.iter() { sum += c.to_vec(); }
        let expected = Point3::from_vec(sum / 4.0);
        assert!((mesh.center(35, 17) - expected).magnitude() < EPSILON);
        assert_eq!(mesh.quad(35, 17), corners);
    }

    #[test]
    fn element_lists_cover_the_grid() {
        let mesh = make_torus_mesh();
        let vertices = mesh.positions().len();

        let triangles = mesh.triangle_indices();
        assert_eq!(triangles.len(), 6 * vertices);
        assert!(triangles.iter().all(|&e| (e as usize) < vertices));

        let edges = mesh.edge_indices();
        assert_eq!(edges.len(), 4 * vertices);
        let mut seen = vec![false; vertices];
        for &e in edges.iter() { seen[e as usize] = true; }
        assert!(seen.iter().all(|&s| s));

        // storage order matches the element numbering
        let (j, i) = (7, 4);
        let element = triangles[6 * (i * 36 + j)] as usize;
        assert_eq!(mesh.positions().as_slice()[element], mesh.position(j as isize, i as isize));
    }

    #[test]
    fn normal_segments_start_at_centers() {
        let mesh = make_torus_mesh();
        let segments = mesh.normal_segments(0.2);
        assert_eq!(segments.len(), 2 * 36 * 18);
        assert_eq!(segments[0], mesh.center(0, 0));
        assert!(((segments[1] - segments[0]).magnitude() - 0.2).abs() < EPSILON);
    }
}
