// ============================================
// Mesh - Вершины и контейнер геометрии
// ============================================

mod vertex;

pub use vertex::TerrainVertex;

/// Построенная геометрия: вершины + индексы.
/// Пустой меш валиден и может быть отправлен на отрисовку.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Квад тайла двумя треугольниками. Порядок вершин:
    /// v0=(x0,z0) v1=(x1,z0) v2=(x0,z1) v3=(x1,z1), диагональ v1-v2
    /// совпадает с диагональю интерполяции высот. Обход CCW сверху.
    pub fn push_tile_quad(
        &mut self,
        x0: f32,
        z0: f32,
        x1: f32,
        z1: f32,
        heights: [f32; 4],
        color: [f32; 3],
    ) {
        let base = self.vertices.len() as u32;
        let [h00, h10, h01, h11] = heights;
        self.vertices.push(TerrainVertex::new([x0, h00, z0], color));
        self.vertices.push(TerrainVertex::new([x1, h10, z0], color));
        self.vertices.push(TerrainVertex::new([x0, h01, z1], color));
        self.vertices.push(TerrainVertex::new([x1, h11, z1], color));
        self.indices.extend_from_slice(&[
            base,
            base + 2,
            base + 1,
            base + 1,
            base + 2,
            base + 3,
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_counts() {
        let mut mesh = MeshData::new();
        assert!(mesh.is_empty());
        mesh.push_tile_quad(0.0, 0.0, 8.0, 8.0, [1.0, 2.0, 3.0, 4.0], [0.5; 3]);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
