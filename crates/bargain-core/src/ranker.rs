// Ranking players by cost per even-strength point per 60.

use crate::player::PlayerRecord;

/// Sort records ascending by cost per production per 60, in place.
///
/// The sort is stable: records with equal cost keep their input order.
pub fn sort_by_cost(records: &mut [PlayerRecord]) {
    records.sort_by(|a, b| {
        a.cost_per_production_per_60()
            .total_cmp(&b.cost_per_production_per_60())
    });
}

/// The record with the lowest cost per production per 60.
///
/// Scans the whole slice rather than trusting it to be sorted. Ties go to
/// the earliest record. Returns `None` for an empty slice.
pub fn find_best_value(records: &[PlayerRecord]) -> Option<&PlayerRecord> {
    records.iter().fold(None, |best, candidate| match best {
        Some(current)
            if current.cost_per_production_per_60() <= candidate.cost_per_production_per_60() =>
        {
            Some(current)
        }
        _ => Some(candidate),
    })
}

/// The last record in the given order; after `sort_by_cost` this is the
/// player paid the most per unit of production.
pub fn find_most_overpaid(records: &[PlayerRecord]) -> Option<&PlayerRecord> {
    records.last()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{Position, SeasonStats};

    /// Cost per production per 60 reduces to cap_hit / ev_points, so picking
    /// those two fixes the sort key. 64 minutes of ice time keeps the
    /// intermediate divisions exact, so equal ratios compare equal.
    fn player(name: &str, ev_points: u32, cap_hit: f64) -> PlayerRecord {
        PlayerRecord::new(
            name,
            "TOR",
            Position::Center,
            SeasonStats {
                games_played: 4,
                avg_toi_minutes: 16.0,
                ev_points,
                cap_hit,
            },
        )
        .unwrap()
    }

    fn names(records: &[PlayerRecord]) -> Vec<&str> {
        records.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn sorts_ascending_by_cost() {
        let mut players = vec![
            player("Pricey", 10, 9_000_000.0),
            player("Cheap", 20, 1_000_000.0),
            player("Middling", 20, 4_000_000.0),
        ];
        sort_by_cost(&mut players);
        assert_eq!(names(&players), vec!["Cheap", "Middling", "Pricey"]);

        for pair in players.windows(2) {
            assert!(pair[0].cost_per_production_per_60() <= pair[1].cost_per_production_per_60());
        }
    }

    #[test]
    fn sort_keeps_every_record() {
        let mut players = vec![
            player("A", 5, 500_000.0),
            player("B", 40, 12_000_000.0),
            player("C", 1, 750_000.0),
            player("D", 18, 900_000.0),
        ];
        let mut before = names(&players)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        sort_by_cost(&mut players);
        let mut after = names(&players)
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn equal_costs_keep_input_order() {
        // 10 points at $1M and 20 points at $2M cost the same per point.
        let mut players = vec![
            player("Second", 20, 2_000_000.0),
            player("Pricey", 5, 9_000_000.0),
            player("First", 10, 1_000_000.0),
            player("Third", 30, 3_000_000.0),
        ];
        sort_by_cost(&mut players);
        assert_eq!(names(&players), vec!["Second", "First", "Third", "Pricey"]);
    }

    #[test]
    fn sort_empty_and_single() {
        let mut none: Vec<PlayerRecord> = Vec::new();
        sort_by_cost(&mut none);
        assert!(none.is_empty());

        let mut one = vec![player("Solo", 10, 1_000_000.0)];
        sort_by_cost(&mut one);
        assert_eq!(names(&one), vec!["Solo"]);
    }

    #[test]
    fn best_value_found_in_unsorted_input() {
        let players = vec![
            player("Pricey", 10, 9_000_000.0),
            player("Middling", 20, 4_000_000.0),
            player("Cheap", 20, 1_000_000.0),
        ];
        assert_eq!(find_best_value(&players).unwrap().name(), "Cheap");
    }

    #[test]
    fn best_value_ties_go_to_earliest() {
        let players = vec![
            player("Pricey", 5, 9_000_000.0),
            player("First", 10, 1_000_000.0),
            player("Second", 20, 2_000_000.0),
        ];
        assert_eq!(find_best_value(&players).unwrap().name(), "First");
    }

    #[test]
    fn best_value_of_empty_is_none() {
        assert!(find_best_value(&[]).is_none());
        assert!(find_most_overpaid(&[]).is_none());
    }

    #[test]
    fn most_overpaid_is_last_after_sort() {
        let mut players = vec![
            player("Pricey", 10, 9_000_000.0),
            player("Cheap", 20, 1_000_000.0),
        ];
        sort_by_cost(&mut players);
        assert_eq!(find_most_overpaid(&players).unwrap().name(), "Pricey");
        assert_eq!(find_best_value(&players).unwrap().name(), "Cheap");
    }

    #[test]
    fn best_value_scan_handles_long_inputs() {
        let mut players: Vec<PlayerRecord> = (1..=50_000)
            .map(|i| player(&format!("P{i}"), 10, 1_000_000.0 + f64::from(i)))
            .collect();
        players.reverse();
        assert_eq!(find_best_value(&players).unwrap().name(), "P1");
    }
}
