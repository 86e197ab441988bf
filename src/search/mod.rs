use crate::Meal;

mod model;

use model::*;

/// Search a list of meals for the given text, most relevant first.
/// An empty or whitespace-only query matches everything.
pub fn search(meals: &[Meal], query: &str) -> Vec<Meal> {
    let query = query.trim();
    if query.is_empty() {
        return meals.to_vec();
    }

    let query_lower = query.to_lowercase();
    let terms: Vec<String> = query_lower.split_whitespace().map(String::from).collect();

    let mut scored_results = vec![];
    for meal in meals {
        let mut result = SearchResult::new(meal.clone());

        // Score based on name match (using full query)
        let name_score = score_name_match(&result.meal.name, &query_lower);
        result.add_score(name_score);

        // Score based on searchable text matches (using individual terms)
        let text_score = score_text_matches(&result.meal.search_text(), &terms);
        result.add_score(text_score);

        // Include result if it has any score
        if result.score > 0.0 {
            scored_results.push(result);
        }
    }

    // Sort results by score
    sort_results(&mut scored_results);
    // Return only the meals in sorted order
    scored_results.into_iter().map(|r| r.meal).collect()
}

/// Calculate score for meal name matches
fn score_name_match(name: &str, query: &str) -> f64 {
    let name = name.to_lowercase();
    if name == query {
        20.0 // Highest score for exact match
    } else if name.contains(query) {
        10.0 // High score for partial match
    } else {
        0.0
    }
}

/// Calculate score for matches in the searchable text
fn score_text_matches(text: &str, terms: &[String]) -> f64 {
    let text = text.to_lowercase();
    let matches = terms
        .iter()
        .map(|term| text.matches(term.as_str()).count())
        .sum::<usize>();

    if matches > 0 {
        // Base score for having any match
        let mut score = 1.0;
        // Additional score for multiple matches (capped)
        score += (0.1 * matches as f64).min(5.0);
        score
    } else {
        0.0
    }
}

/// Sort search results by score in descending order
fn sort_results(results: &mut [SearchResult]) {
    results.sort_unstable_by(|a, b| {
        // First sort by score (highest first)
        let score_cmp = b
            .score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal);

        if score_cmp != std::cmp::Ordering::Equal {
            return score_cmp;
        }

        // If scores are equal, sort by meal name
        let a_name = a.meal.name.to_lowercase();
        let b_name = b.meal.name.to_lowercase();

        a_name.cmp(&b_name)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ingredient;

    fn meal(id: i64, name: &str) -> Meal {
        Meal::new(id, name)
    }

    fn meal_with_details(id: i64, name: &str, tags: &[&str], ingredients: &[&str]) -> Meal {
        let mut meal = Meal::new(id, name);
        if !tags.is_empty() {
            meal.tags = Some(tags.iter().map(|tag| tag.to_string()).collect());
        }
        if !ingredients.is_empty() {
            meal.ingredients = Some(
                ingredients
                    .iter()
                    .map(|name| Ingredient::new(name, "1 unit"))
                    .collect(),
            );
        }
        meal
    }

    fn setup_test_meals() -> Vec<Meal> {
        vec![
            meal_with_details(
                1,
                "Pancakes",
                &["Breakfast", "Sweet"],
                &["plain flour", "maple syrup"],
            ),
            meal_with_details(2, "Waffles", &["Breakfast"], &["golden syrup"]),
            meal(3, "French Toast"),
            meal_with_details(4, "Cheese Omelette", &[], &["cheese", "mushrooms"]),
        ]
    }

    #[test]
    fn test_search_exact_match() {
        let meals = setup_test_meals();
        let results = search(&meals, "pancakes");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Pancakes");
    }

    #[test]
    fn test_search_partial_match() {
        let meals = setup_test_meals();
        let results = search(&meals, "pancake");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Pancakes");
    }

    #[test]
    fn test_search_ingredient_match() {
        let meals = setup_test_meals();
        let results = search(&meals, "syrup");

        assert_eq!(results.len(), 2);
        let names: Vec<&str> = results.iter().map(|meal| meal.name.as_str()).collect();
        assert!(names.contains(&"Pancakes"));
        assert!(names.contains(&"Waffles"));
    }

    #[test]
    fn test_search_tag_match() {
        let meals = setup_test_meals();
        let results = search(&meals, "breakfast");

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|meal| meal.name != "French Toast"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let meals = setup_test_meals();
        let results = search(&meals, "PANCAKES");

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Pancakes");
    }

    #[test]
    fn test_search_no_matches() {
        let meals = setup_test_meals();
        let results = search(&meals, "nonexistent");

        assert!(results.is_empty());
    }

    #[test]
    fn test_search_empty_query_returns_everything() {
        let meals = setup_test_meals();

        assert_eq!(search(&meals, "").len(), meals.len());
        assert_eq!(search(&meals, "   ").len(), meals.len());
    }

    #[test]
    fn test_search_exact_name_outranks_partial() {
        let meals = vec![meal(1, "Tart Tatin"), meal(2, "Tart")];
        let results = search(&meals, "tart");

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Tart");
        assert_eq!(results[1].name, "Tart Tatin");
    }

    #[test]
    fn test_search_multiple_terms() {
        let meals = setup_test_meals();
        let results = search(&meals, "maple syrup");

        // Both syrup meals match, but pancakes match both terms and rank
        // first.
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Pancakes");
        assert_eq!(results[1].name, "Waffles");
    }

    #[test]
    fn test_search_result_sorting() {
        let mut results = vec![
            SearchResult {
                meal: meal(1, "Waffles"),
                score: 1.0,
            },
            SearchResult {
                meal: meal(2, "Pancakes"),
                score: 1.0,
            },
            SearchResult {
                meal: meal(3, "Omelette"),
                score: 2.0,
            },
        ];

        sort_results(&mut results);

        // Should be sorted by score first (highest first), then by name
        assert_eq!(results[0].meal.name, "Omelette"); // Highest score
        assert_eq!(results[1].meal.name, "Pancakes"); // Same score, alphabetically first
        assert_eq!(results[2].meal.name, "Waffles"); // Same score, alphabetically second
    }

    #[test]
    fn test_search_empty_input() {
        let results = search(&[], "query");
        assert!(results.is_empty());
    }
}
