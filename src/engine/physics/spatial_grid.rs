//! Uniform hash grid over container positions.
//!
//! Rebuilt once per step from the host's containers so the container stage of
//! the candidate search only touches cells overlapping the query sphere.

use std::collections::HashMap;

use glam::{I64Vec3, IVec3, Vec3};

use crate::engine::physics::{candidates::ContainerQuery, physics_world::Container};

/// Configuration for the container grid
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    /// Size of each cell in world units
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 2500.0, // one container range per cell: a query touches at most 27 cells
        }
    }
}

/// Borrowed view of the host's containers, bucketed by cell.
pub struct SpatialGrid<'a> {
    containers: &'a [Container],
    cells: HashMap<IVec3, Vec<usize>>,
    cell_size: f32,
}

impl<'a> SpatialGrid<'a> {
    pub fn build(containers: &'a [Container], config: GridConfig) -> Self {
        // A zero or negative cell would put every container in its own bucket at infinity
        let cell_size = if config.cell_size > 0.0 {
            config.cell_size
        } else {
            GridConfig::default().cell_size
        };

        let mut cells: HashMap<IVec3, Vec<usize>> = HashMap::new();
        for (index, container) in containers.iter().enumerate() {
            cells
                .entry(Self::cell_of(container.position, cell_size))
                .or_default()
                .push(index);
        }

        Self { containers, cells, cell_size }
    }

    fn cell_of(position: Vec3, cell_size: f32) -> IVec3 {
        (position / cell_size).floor().as_ivec3()
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Container indices in the cells overlapping the query box
    fn nearby_indices(&self, center: Vec3, radius: f32) -> Vec<usize> {
        let min = Self::cell_of(center - Vec3::splat(radius), self.cell_size);
        let max = Self::cell_of(center + Vec3::splat(radius), self.cell_size);
        let span = max.as_i64vec3() - min.as_i64vec3() + I64Vec3::ONE;
        let box_cells = span.x.saturating_mul(span.y).saturating_mul(span.z);

        let mut indices = Vec::new();
        if box_cells > self.cells.len() as i64 {
            // Query box is larger than the populated grid, walk the buckets instead
            for (cell, bucket) in &self.cells {
                if cell.cmpge(min).all() && cell.cmple(max).all() {
                    indices.extend_from_slice(bucket);
                }
            }
        } else {
            for x in min.x..=max.x {
                for y in min.y..=max.y {
                    for z in min.z..=max.z {
                        if let Some(bucket) = self.cells.get(&IVec3::new(x, y, z)) {
                            indices.extend_from_slice(bucket);
                        }
                    }
                }
            }
        }

        // Visit in host order, same as a linear scan
        indices.sort_unstable();
        indices
    }
}

impl ContainerQuery for SpatialGrid<'_> {
    fn containers_within(&self, center: Vec3, radius: f32, visit: &mut dyn FnMut(&Container)) {
        if radius.is_nan() || radius <= 0.0 || !center.is_finite() {
            return;
        }

        for index in self.nearby_indices(center, radius) {
            let container = &self.containers[index];
            if center.distance(container.position) < radius {
                visit(container);
            }
        }
    }
}
