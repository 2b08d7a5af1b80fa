#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub values: Vec<f32>,
}

impl Embedding {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn dimensions(&self) -> usize {
        self.values.len()
    }

    /// Returns 0.0 for mismatched dimensions or zero-length vectors.
    pub fn cosine_similarity(&self, other: &Self) -> f32 {
        if self.values.len() != other.values.len() {
            return 0.0;
        }

        let (dot, norm_a, norm_b) = self.values.iter().zip(other.values.iter()).fold(
            (0.0f32, 0.0f32, 0.0f32),
            |(dot, na, nb), (a, b)| (dot + a * b, na + a * a, nb + b * b),
        );

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}
