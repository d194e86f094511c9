// ============================================
// Decor - Деревья и постройки
// ============================================
// Декорации живут в мировом реестре и каждую кадровую
// компоновку собираются в один меш: точечный фрустум-тест,
// затем CPU-подмешивание тумана, потому что рисуются они
// отдельным пайплайном без туманного uniform-пути.

use crate::gpu::core::config::{SEA_LEVEL, SKY_COLOR, TILE, in_pad_skirt};
use crate::gpu::effects::{fog_blend, fog_range};
use crate::gpu::render::frustum::{ViewPoint, in_frustum};
use crate::gpu::terrain::generation::hash2d;
use crate::gpu::terrain::mesh::{MeshData, TerrainVertex};
use crate::gpu::terrain::Terrain;

/// Радиус размещения декораций в тайлах
const DECOR_RADIUS: i32 = 64;
/// Плотность: доля тайлов с деревом / постройкой
const TREE_CHANCE: f32 = 0.020;
const BUILDING_CHANCE: f32 = 0.004;
/// За дальней границей тумана декорации не рисуем
const CULL_SLACK: f32 = 2.0 * TILE;

const TREE_COLORS: [[f32; 3]; 3] = [
    [0.13, 0.42, 0.17],
    [0.18, 0.50, 0.14],
    [0.10, 0.35, 0.20],
];
const BUILDING_COLORS: [[f32; 3]; 2] = [[0.62, 0.58, 0.52], [0.48, 0.46, 0.50]];

pub struct TreeInstance {
    pub x: f32,
    pub z: f32,
    pub ground: f32,
    pub height: f32,
    pub variant: u8,
}

pub struct BuildingInstance {
    pub x: f32,
    pub z: f32,
    pub ground: f32,
    pub scale: f32,
    pub variant: u8,
}

pub struct DecorRegistry {
    pub trees: Vec<TreeInstance>,
    pub buildings: Vec<BuildingInstance>,
}

impl DecorRegistry {
    /// Детерминированная расстановка по хэшу тайла. Высота
    /// земли берётся у террейна, чтобы декорации стояли ровно
    /// на меше, а не на аналитической высоте.
    pub fn generate(terrain: &mut Terrain) -> Self {
        let mut trees = Vec::new();
        let mut buildings = Vec::new();

        for tz in -DECOR_RADIUS..DECOR_RADIUS {
            for tx in -DECOR_RADIUS..DECOR_RADIUS {
                let cx = (tx as f32 + 0.5) * TILE;
                let cz = (tz as f32 + 0.5) * TILE;
                if in_pad_skirt(cx, cz) {
                    continue;
                }
                let ground = terrain.altitude(cx, cz);
                if ground <= SEA_LEVEL + 1.0 {
                    continue;
                }

                let r = hash2d(tx, tz);
                if r < TREE_CHANCE {
                    trees.push(TreeInstance {
                        x: cx,
                        z: cz,
                        ground,
                        height: 5.0 + hash2d(tz, tx) * 6.0,
                        variant: (hash2d(tx ^ 17, tz) * TREE_COLORS.len() as f32) as u8
                            % TREE_COLORS.len() as u8,
                    });
                } else if r > 1.0 - BUILDING_CHANCE {
                    buildings.push(BuildingInstance {
                        x: cx,
                        z: cz,
                        ground,
                        scale: 3.0 + hash2d(tz, tx) * 3.0,
                        variant: ((hash2d(tx, tz ^ 29) * 2.0) as u8) % 2,
                    });
                }
            }
        }

        log::info!("decor: {} trees, {} buildings", trees.len(), buildings.len());
        Self { trees, buildings }
    }

    #[cfg(test)]
    fn empty() -> Self {
        Self {
            trees: Vec::new(),
            buildings: Vec::new(),
        }
    }

    /// Собрать меш видимых декораций для текущего кадра
    pub fn compose(&self, view: &ViewPoint, view_far: i32) -> MeshData {
        let (fog_near, fog_far) = fog_range(view_far);
        let mut mesh = MeshData::new();

        for tree in &self.trees {
            if let Some(color) = decor_color(
                view,
                tree.x,
                tree.z,
                TREE_COLORS[tree.variant as usize],
                fog_near,
                fog_far,
            ) {
                push_pyramid(&mut mesh, tree.x, tree.z, tree.ground, tree.height, color);
            }
        }
        for b in &self.buildings {
            if let Some(color) = decor_color(
                view,
                b.x,
                b.z,
                BUILDING_COLORS[b.variant as usize],
                fog_near,
                fog_far,
            ) {
                push_box(&mut mesh, b.x, b.z, b.ground, b.scale, color);
            }
        }

        mesh
    }
}

/// Видимость и туман одного элемента: None - не рисовать
fn decor_color(
    view: &ViewPoint,
    x: f32,
    z: f32,
    base: [f32; 3],
    fog_near: f32,
    fog_far: f32,
) -> Option<[f32; 3]> {
    if !in_frustum(view, x, z) {
        return None;
    }
    let dx = x - view.position.x;
    let dz = z - view.position.z;
    let depth = (dx * dx + dz * dz).sqrt();
    if depth > fog_far + CULL_SLACK {
        return None;
    }
    Some(fog_blend(base, depth, fog_near, fog_far, SKY_COLOR))
}

/// Дерево: четырёхгранная пирамида (пайплайн декораций без отсечения
/// граней, порядок обхода не важен)
fn push_pyramid(mesh: &mut MeshData, x: f32, z: f32, ground: f32, height: f32, color: [f32; 3]) {
    let half = 2.0;
    let base = mesh.vertices.len() as u32;
    let corners = [
        [x - half, ground, z - half],
        [x + half, ground, z - half],
        [x + half, ground, z + half],
        [x - half, ground, z + half],
    ];
    for c in corners {
        mesh.vertices.push(TerrainVertex::new(c, color));
    }
    mesh.vertices
        .push(TerrainVertex::new([x, ground + height, z], color));
    let apex = base + 4;
    for i in 0..4u32 {
        mesh.indices
            .extend_from_slice(&[base + i, base + (i + 1) % 4, apex]);
    }
}

/// Постройка: куб со слегка затемнёнными стенами и светлой крышей
fn push_box(mesh: &mut MeshData, x: f32, z: f32, ground: f32, scale: f32, color: [f32; 3]) {
    let wall = [color[0] * 0.85, color[1] * 0.85, color[2] * 0.85];
    let h = scale;
    let base = mesh.vertices.len() as u32;
    let (x0, x1) = (x - scale, x + scale);
    let (z0, z1) = (z - scale, z + scale);
    let (y0, y1) = (ground, ground + h);

    let corners = [
        [x0, y0, z0],
        [x1, y0, z0],
        [x1, y0, z1],
        [x0, y0, z1],
        [x0, y1, z0],
        [x1, y1, z0],
        [x1, y1, z1],
        [x0, y1, z1],
    ];
    for (i, c) in corners.iter().enumerate() {
        let col = if i < 4 { wall } else { color };
        mesh.vertices.push(TerrainVertex::new(*c, col));
    }

    // 4 стены + крыша, без дна
    let quads = [[0, 1, 5, 4], [1, 2, 6, 5], [2, 3, 7, 6], [3, 0, 4, 7], [4, 5, 6, 7]];
    for q in quads {
        mesh.indices.extend_from_slice(&[
            base + q[0],
            base + q[1],
            base + q[2],
            base + q[0],
            base + q[2],
            base + q[3],
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::core::config::in_pad;
    use ultraviolet::Vec3;

    fn view_plus_z() -> ViewPoint {
        ViewPoint::new(Vec3::new(0.0, 30.0, 0.0), 0.0, 16.0 / 9.0)
    }

    #[test]
    fn test_generate_deterministic_and_off_pad() {
        let mut terrain = Terrain::new();
        let a = DecorRegistry::generate(&mut terrain);
        let b = DecorRegistry::generate(&mut terrain);
        assert_eq!(a.trees.len(), b.trees.len());
        assert_eq!(a.buildings.len(), b.buildings.len());
        assert!(!a.trees.is_empty(), "some trees expected on land");
        for t in &a.trees {
            assert!(!in_pad(t.x, t.z), "pad must stay clear of decor");
            assert!(t.ground > SEA_LEVEL);
        }
    }

    #[test]
    fn test_compose_culls_behind() {
        let mut reg = DecorRegistry::empty();
        reg.trees.push(TreeInstance {
            x: 0.0,
            z: 10.0 * TILE,
            ground: 5.0,
            height: 6.0,
            variant: 0,
        });
        reg.trees.push(TreeInstance {
            x: 0.0,
            z: -20.0 * TILE,
            ground: 5.0,
            height: 6.0,
            variant: 0,
        });
        let mesh = reg.compose(&view_plus_z(), 24);
        // Только переднее дерево: 4 грани пирамиды
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_compose_fogs_distant() {
        let mut reg = DecorRegistry::empty();
        reg.trees.push(TreeInstance {
            x: 0.0,
            z: 2.0 * TILE,
            ground: 5.0,
            height: 6.0,
            variant: 0,
        });
        reg.trees.push(TreeInstance {
            x: 0.0,
            z: 23.0 * TILE,
            ground: 5.0,
            height: 6.0,
            variant: 0,
        });
        let mesh = reg.compose(&view_plus_z(), 24);
        let near_color = mesh.vertices[0].color;
        let far_color = mesh.vertices[5].color;
        assert_eq!(near_color, TREE_COLORS[0], "inside fog-free band");
        assert_ne!(far_color, TREE_COLORS[0], "deep in the fog band");
        // Дальний цвет сдвинут к небу
        assert!((far_color[2] - TREE_COLORS[0][2]).abs() > 0.1);
    }

    #[test]
    fn test_compose_drops_beyond_fog() {
        let mut reg = DecorRegistry::empty();
        reg.trees.push(TreeInstance {
            x: 0.0,
            z: 60.0 * TILE,
            ground: 5.0,
            height: 6.0,
            variant: 0,
        });
        let mesh = reg.compose(&view_plus_z(), 24);
        assert!(mesh.is_empty());
    }
}
