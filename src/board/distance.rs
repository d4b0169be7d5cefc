use super::Hole;

/// Symmetric Euclidean distances between holes, flattened row-major.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_holes(holes: &[Hole]) -> Self {
        let n = holes.len();
        let mut data = vec![0.0; n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = (holes[i].x - holes[j].x) as f64;
                let dy = (holes[i].y - holes[j].y) as f64;
                let d = (dx * dx + dy * dy).sqrt();
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }

        Self { n, data }
    }

    #[inline(always)]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}
