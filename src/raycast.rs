use glowfield_blocks::{BlockRegistry, GridCoord, PlaceError, RemoveError, SurfaceId};
use glowfield_geom::{Quat, Ray, Vec3};

/// Lift applied to highlight markers so they do not z-fight the surface under them.
pub const MARKER_LIFT: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Vec3,
    /// Face normal, facing back toward the ray.
    pub normal: Vec3,
    pub surface: SurfaceId,
    /// From the avatar's feet to `point`.
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum EditError {
    #[error("target {distance:.2} away, reach is {max:.2}")]
    OutOfRange { distance: f32, max: f32 },
    #[error("nothing under the reticle")]
    NoTarget,
    #[error("scene geometry cannot be removed")]
    ProtectedTarget,
    #[error(transparent)]
    Place(#[from] PlaceError),
    #[error(transparent)]
    Remove(#[from] RemoveError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditAction {
    Place,
    Remove,
}

impl EditAction {
    /// Pointer button mapping: primary places, secondary removes.
    pub fn from_button(button: u8) -> Option<Self> {
        match button {
            0 => Some(EditAction::Place),
            2 => Some(EditAction::Remove),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Placed { coord: GridCoord, slot: u32 },
    Removed { coord: GridCoord },
}

/// Nearest placeable surface along `ray`, with no reach limit.
pub fn nearest_hit(ray: &Ray, registry: &BlockRegistry, origin: Vec3) -> Option<Hit> {
    registry
        .placeable_surfaces()
        .iter()
        .filter_map(|s| s.ray_hit(ray).map(|(t, n)| (t, n, s.id)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(t, n, surface)| {
            let point = ray.at(t);
            let normal = if n.dot(ray.dir) > 0.0 { -n } else { n };
            Hit {
                point,
                normal,
                surface,
                distance: point.distance(origin),
            }
        })
}

/// Edit target under the reticle, or why there is none.
pub fn resolve_edit_target(
    ray: &Ray,
    registry: &BlockRegistry,
    origin: Vec3,
    max_range: f32,
) -> Result<Hit, EditError> {
    let hit = nearest_hit(ray, registry, origin).ok_or(EditError::NoTarget)?;
    if hit.distance > max_range {
        return Err(EditError::OutOfRange {
            distance: hit.distance,
            max: max_range,
        });
    }
    Ok(hit)
}

pub fn resolve_target(
    ray: &Ray,
    registry: &BlockRegistry,
    origin: Vec3,
    max_range: f32,
) -> Option<Hit> {
    resolve_edit_target(ray, registry, origin, max_range).ok()
}

/// Cell a new block would occupy: one step out of the struck face, never below ground.
pub fn place_cell(hit: &Hit) -> GridCoord {
    let mut cell = GridCoord::from_world(hit.point + hit.normal * 0.5);
    cell.y = cell.y.max(0);
    cell
}

pub fn apply_edit(
    registry: &mut BlockRegistry,
    hit: &Hit,
    action: EditAction,
) -> Result<EditOutcome, EditError> {
    match action {
        EditAction::Place => {
            let coord = registry.place(place_cell(hit))?;
            let slot = registry.slot_of(coord).unwrap_or_default();
            Ok(EditOutcome::Placed { coord, slot })
        }
        EditAction::Remove => match hit.surface {
            SurfaceId::Static(_) => Err(EditError::ProtectedTarget),
            SurfaceId::Block(coord) => {
                registry.remove(hit.surface)?;
                Ok(EditOutcome::Removed { coord })
            }
        },
    }
}

/// Flat 1x1 highlight laid on the face under the reticle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceMarker {
    pub position: Vec3,
    pub orientation: Quat,
    pub size: f32,
}

pub fn face_marker(hit: &Hit) -> FaceMarker {
    let position = match hit.surface {
        SurfaceId::Block(_) => {
            let centre = (hit.point - hit.normal * 0.5).floor() + Vec3::splat(0.5);
            centre + hit.normal * (0.5 + MARKER_LIFT)
        }
        SurfaceId::Static(_) => Vec3::new(
            hit.point.x.floor() + 0.5,
            hit.point.y + MARKER_LIFT,
            hit.point.z.floor() + 0.5,
        ),
    };
    FaceMarker {
        position,
        orientation: Quat::from_rotation_arc(Vec3::Z, hit.normal),
        size: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glowfield_scene::Scene;

    fn registry() -> BlockRegistry {
        BlockRegistry::new(Scene::flat(), 64)
    }

    fn down_from(x: f32, y: f32, z: f32) -> Ray {
        Ray::new(Vec3::new(x, y, z), Vec3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn ground_hit_measures_from_the_feet() {
        let reg = registry();
        let ray = down_from(2.3, 5.0, 0.6);
        let hit = resolve_target(&ray, &reg, Vec3::new(2.3, 0.0, 0.6), 10.0).unwrap();
        assert!(hit.surface.is_static());
        assert!((hit.point.y).abs() < 1e-5);
        assert!(hit.distance < 1e-4);
        assert_eq!(hit.normal, Vec3::UP);
    }

    #[test]
    fn far_hit_is_out_of_range() {
        let reg = registry();
        let ray = down_from(0.3, 12.0, 0.7);
        let origin = ray.origin;
        assert!(resolve_target(&ray, &reg, origin, 8.0).is_none());
        match resolve_edit_target(&ray, &reg, origin, 8.0) {
            Err(EditError::OutOfRange { distance, max }) => {
                assert!((distance - 12.0).abs() < 1e-4);
                assert_eq!(max, 8.0);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(resolve_target(&ray, &reg, origin, 12.5).is_some());
    }

    #[test]
    fn reach_boundary_is_inclusive() {
        let reg = registry();
        let ray = down_from(0.3, 8.0, 0.7);
        let origin = ray.origin;
        let hit = resolve_target(&ray, &reg, origin, 8.0).unwrap();
        assert!((hit.distance - 8.0).abs() < 1e-5);
        assert!(resolve_target(&ray, &reg, origin, 8.0 + 1e-4).is_some());
        assert!(resolve_target(&ray, &reg, origin, 8.0 - 1e-4).is_none());
    }

    #[test]
    fn sky_is_no_target() {
        let reg = registry();
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::UP);
        assert_eq!(
            resolve_edit_target(&ray, &reg, Vec3::ZERO, 10.0),
            Err(EditError::NoTarget)
        );
    }

    #[test]
    fn nearest_surface_wins() {
        let mut reg = registry();
        reg.place(GridCoord::new(2, 0, 0)).unwrap();
        let ray = down_from(2.5, 5.0, 0.5);
        let hit = resolve_target(&ray, &reg, ray.origin, 10.0).unwrap();
        assert_eq!(hit.surface, SurfaceId::Block(GridCoord::new(2, 0, 0)));
        assert!((hit.point.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn placing_stacks_on_the_struck_face() {
        let mut reg = registry();
        let ground = resolve_target(&down_from(3.4, 5.0, 5.6), &reg, Vec3::ZERO, 20.0).unwrap();
        assert_eq!(place_cell(&ground), GridCoord::new(3, 0, 5));
        apply_edit(&mut reg, &ground, EditAction::Place).unwrap();

        let top = resolve_target(&down_from(3.4, 5.0, 5.6), &reg, Vec3::ZERO, 20.0).unwrap();
        assert_eq!(place_cell(&top), GridCoord::new(3, 1, 5));

        let side_ray = Ray::new(Vec3::new(0.0, 0.5, 5.5), Vec3::X);
        let side = resolve_target(&side_ray, &reg, Vec3::ZERO, 20.0).unwrap();
        assert_eq!(side.normal, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(place_cell(&side), GridCoord::new(2, 0, 5));
    }

    #[test]
    fn placement_never_goes_below_ground() {
        let hit = Hit {
            point: Vec3::new(0.5, 0.0, 0.5),
            normal: Vec3::new(0.0, -1.0, 0.0),
            surface: SurfaceId::Static(0),
            distance: 1.0,
        };
        assert_eq!(place_cell(&hit).y, 0);
    }

    #[test]
    fn double_place_is_rejected() {
        let mut reg = registry();
        let hit = resolve_target(&down_from(3.5, 5.0, 5.5), &reg, Vec3::ZERO, 20.0).unwrap();
        apply_edit(&mut reg, &hit, EditAction::Place).unwrap();
        // same ground hit again: the cell above the ground is now taken
        assert_eq!(
            apply_edit(&mut reg, &hit, EditAction::Place),
            Err(EditError::Place(PlaceError::AlreadyOccupied(GridCoord::new(3, 0, 5))))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn removing_ground_is_protected() {
        let mut reg = registry();
        let hit = resolve_target(&down_from(1.5, 3.0, 1.2), &reg, Vec3::ZERO, 20.0).unwrap();
        assert_eq!(
            apply_edit(&mut reg, &hit, EditAction::Remove),
            Err(EditError::ProtectedTarget)
        );
    }

    #[test]
    fn removing_a_block_clears_it() {
        let mut reg = registry();
        reg.place(GridCoord::new(0, 0, 0)).unwrap();
        let hit = resolve_target(&down_from(0.5, 3.0, 0.5), &reg, Vec3::ZERO, 20.0).unwrap();
        assert_eq!(
            apply_edit(&mut reg, &hit, EditAction::Remove),
            Ok(EditOutcome::Removed { coord: GridCoord::new(0, 0, 0) })
        );
        assert!(reg.is_empty());
    }

    #[test]
    fn ground_marker_centres_on_the_cell() {
        let hit = Hit {
            point: Vec3::new(3.7, 0.0, -1.2),
            normal: Vec3::UP,
            surface: SurfaceId::Static(0),
            distance: 2.0,
        };
        let m = face_marker(&hit);
        assert!((m.position - Vec3::new(3.5, 0.01, -1.5)).length() < 1e-6);
        assert!((m.orientation.rotate(Vec3::Z) - Vec3::UP).length() < 1e-5);
        assert_eq!(m.size, 1.0);
    }

    #[test]
    fn block_marker_floats_off_the_face() {
        let c = GridCoord::new(2, 0, 5);
        let top = Hit {
            point: Vec3::new(2.2, 1.0, 5.9),
            normal: Vec3::UP,
            surface: SurfaceId::Block(c),
            distance: 2.0,
        };
        let m = face_marker(&top);
        assert!((m.position - Vec3::new(2.5, 1.01, 5.5)).length() < 1e-5);

        let west = Hit {
            point: Vec3::new(2.0, 0.3, 5.4),
            normal: Vec3::new(-1.0, 0.0, 0.0),
            surface: SurfaceId::Block(c),
            distance: 2.0,
        };
        let m = face_marker(&west);
        assert!((m.position - Vec3::new(1.99, 0.5, 5.5)).length() < 1e-5);
    }

    #[test]
    fn buttons_map_to_actions() {
        assert_eq!(EditAction::from_button(0), Some(EditAction::Place));
        assert_eq!(EditAction::from_button(2), Some(EditAction::Remove));
        assert_eq!(EditAction::from_button(1), None);
    }
}
