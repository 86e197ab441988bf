use crate::Meal;

/// A matched meal with its relevance score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub meal: Meal,
    pub score: f64,
}

impl SearchResult {
    pub(crate) fn new(meal: Meal) -> Self {
        Self { meal, score: 0.0 }
    }

    pub(crate) fn add_score(&mut self, points: f64) {
        self.score += points;
    }
}
