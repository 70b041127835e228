use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::MeasureMap;
use crate::data::measure::distinct_value_count;

/// Strategy used to spread degenerate measure values into a legible
/// gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VariationMethod {
    #[default]
    #[serde(alias = "byName")]
    ByName,
    Alphabetical,
    Random,
}

/// True when every value rounds to the same three-decimal value, or when
/// variation is forced. An empty map never needs variation.
#[must_use]
pub fn needs_variation(values: &MeasureMap, force: bool) -> bool {
    !values.is_empty() && (force || distinct_value_count(values) <= 1)
}

/// Builds the fill-only replacement map. Returns `None` for an empty input.
///
/// `ByName` and `Alphabetical` are deterministic; `Random` draws from `rng`.
pub fn synthesize_variation<G: Rng>(
    values: &MeasureMap,
    method: VariationMethod,
    rng: &mut G,
) -> Option<MeasureMap> {
    if values.is_empty() {
        return None;
    }
    let varied = match method {
        VariationMethod::ByName => values
            .iter()
            .map(|(name, &value)| {
                let factor = 0.5 + f64::from(name_seed(name) % 1000) / 1000.0;
                (name.clone(), value * factor)
            })
            .collect(),
        VariationMethod::Alphabetical => {
            let mut names: Vec<&String> = values.keys().collect();
            names.sort();
            let count = names.len() as f64;
            names
                .into_iter()
                .enumerate()
                .map(|(index, name)| {
                    let value = values.get(name).copied().unwrap_or_default();
                    (name.clone(), value * (0.5 + index as f64 / count))
                })
                .collect()
        }
        VariationMethod::Random => values
            .iter()
            .map(|(name, &value)| (name.clone(), value * (0.5 + rng.gen_range(0.0..1.0))))
            .collect(),
    };
    Some(varied)
}

/// Sum of the UTF-16 code units of `name`.
fn name_seed(name: &str) -> u32 {
    name.encode_utf16().map(u32::from).sum()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{VariationMethod, name_seed, needs_variation, synthesize_variation};
    use crate::data::MeasureMap;

    fn flat(names: &[&str], value: f64) -> MeasureMap {
        names.iter().map(|name| ((*name).to_owned(), value)).collect()
    }

    #[test]
    fn by_name_seed_matches_char_code_sum() {
        assert_eq!(name_seed("AB"), 65 + 66);
    }

    #[test]
    fn alphabetical_is_monotonic_in_sorted_order() {
        let values = flat(&["GAMMA", "ALPHA", "BETA"], 10.0);
        let mut rng = StdRng::seed_from_u64(7);
        let varied = synthesize_variation(&values, VariationMethod::Alphabetical, &mut rng)
            .expect("varied");
        assert_eq!(varied.get("ALPHA"), Some(&5.0));
        assert!(varied["ALPHA"] < varied["BETA"]);
        assert!(varied["BETA"] < varied["GAMMA"]);
    }

    #[test]
    fn random_stays_within_half_to_one_and_a_half() {
        let values = flat(&["ALPHA", "BETA", "GAMMA"], 100.0);
        let mut rng = StdRng::seed_from_u64(11);
        let varied =
            synthesize_variation(&values, VariationMethod::Random, &mut rng).expect("varied");
        assert!(varied.values().all(|value| (50.0..150.0).contains(value)));
    }

    #[test]
    fn variation_trigger_rules() {
        assert!(needs_variation(&flat(&["A", "B"], 3.0), false));
        let mut spread = flat(&["A"], 3.0);
        spread.insert("B".to_owned(), 4.0);
        assert!(!needs_variation(&spread, false));
        assert!(needs_variation(&spread, true));
        assert!(!needs_variation(&MeasureMap::new(), true));
    }
}
