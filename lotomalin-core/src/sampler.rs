use anyhow::{Result, bail};
use rand::Rng;
use rand::SeedableRng;
use rand::distr::weighted::WeightedIndex;
use rand::prelude::Distribution;
use rand::rngs::StdRng;

use crate::balance::is_balanced;
use crate::config::EngineConfig;
use crate::models::{Pool, Prediction, PredictionBatch};
use crate::stats::WindowSummary;

/// Assemble un lot de `batch_size` grilles équilibrées par échantillonnage
/// répété des sources de signaux. Les grilles déséquilibrées sont rejetées
/// et retirées ; au-delà de `max_attempts` essais le lot entier échoue,
/// aucun résultat partiel n'est retourné.
pub fn generate_batch(
    summary: &WindowSummary,
    config: &EngineConfig,
    seed: Option<u64>,
) -> Result<PredictionBatch> {
    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut entries = Vec::with_capacity(config.batch_size);
    let mut attempts = 0usize;

    while entries.len() < config.batch_size {
        attempts += 1;
        if attempts > config.max_attempts {
            bail!(
                "Impossible d'assembler {} grilles équilibrées en {} essais",
                config.batch_size,
                config.max_attempts
            );
        }

        let Some(numbers) = draw_candidate(summary, config, &mut rng) else {
            continue;
        };
        let strong = pick_strong(&summary.hot_strong, &mut rng)?;
        entries.push(Prediction { numbers, strong });
    }

    Ok(PredictionBatch { entries })
}

/// Une tentative de grille : constitution du vivier par quotas, puis
/// déduplication, complément, tri décroissant et contrôle d'équilibre.
fn draw_candidate(
    summary: &WindowSummary,
    config: &EngineConfig,
    rng: &mut StdRng,
) -> Option<[u8; 6]> {
    let mut pool: Vec<u8> = Vec::new();
    pool.extend(sample_unique(&summary.hot, config.hot_quota, rng));
    pool.extend(sample_unique(&summary.medium, config.medium_quota, rng));
    pool.extend(sample_unique(&summary.cold, config.cold_quota, rng));
    pool.extend(sample_unique(&summary.followers, config.follower_quota, rng));
    pool.extend(sample_unique(&summary.momentum, config.momentum_quota, rng));
    pool.extend(sample_unique(&summary.rebound, config.rebound_quota, rng));
    pool.extend(sample_unique(&summary.skip_two, config.skip_two_quota, rng));
    if let Some(&(a, b)) = pick_pair(&summary.consecutive_pairs, rng) {
        pool.push(a);
        pool.push(b);
    }
    if let Some(&(a, b)) = pick_pair(&summary.spaced_pairs, rng) {
        pool.push(a);
        pool.push(b);
    }

    // Déduplication en conservant l'ordre de première apparition.
    let pick_count = Pool::Mains.pick_count();
    let mut picked: Vec<u8> = Vec::with_capacity(pick_count);
    for n in pool {
        if !picked.contains(&n) {
            picked.push(n);
        }
    }
    picked.truncate(pick_count);

    // Complément depuis le palier moyen, repli sur tout le domaine si le
    // moyen est épuisé.
    while picked.len() < pick_count {
        let mut available: Vec<u8> = summary
            .medium
            .iter()
            .copied()
            .filter(|n| !picked.contains(n))
            .collect();
        if available.is_empty() {
            available = (1..=Pool::Mains.size() as u8)
                .filter(|n| !picked.contains(n))
                .collect();
        }
        if available.is_empty() {
            return None;
        }
        picked.push(available[rng.random_range(0..available.len())]);
    }

    let mut numbers = [0u8; 6];
    numbers.copy_from_slice(&picked);
    // Convention d'affichage : ordre décroissant.
    numbers.sort_by(|a, b| b.cmp(a));

    if is_balanced(&numbers) { Some(numbers) } else { None }
}

/// Tire `n` éléments uniques uniformément dans `source`, ou toute la source
/// si elle est plus petite que son quota.
fn sample_unique(source: &[u8], n: usize, rng: &mut StdRng) -> Vec<u8> {
    let mut available = source.to_vec();
    let take = n.min(available.len());
    let mut picked = Vec::with_capacity(take);
    for _ in 0..take {
        let idx = rng.random_range(0..available.len());
        picked.push(available.swap_remove(idx));
    }
    picked
}

fn pick_pair<'a>(pairs: &'a [(u8, u8)], rng: &mut StdRng) -> Option<&'a (u8, u8)> {
    if pairs.is_empty() {
        None
    } else {
        Some(&pairs[rng.random_range(0..pairs.len())])
    }
}

/// Choix pondéré du numéro fort : chaque numéro fort fréquent pèse 6, un
/// tirage uniforme frais pèse 2. Si aucun numéro fort n'est fréquent, le
/// tirage frais est choisi d'office.
fn pick_strong(hot_strong: &[u8], rng: &mut StdRng) -> Result<u8> {
    let fallback: u8 = rng.random_range(1..=Pool::Strong.size() as u8);
    let mut choices: Vec<(u8, u32)> = hot_strong.iter().map(|&n| (n, 6)).collect();
    choices.push((fallback, 2));

    let dist = WeightedIndex::new(choices.iter().map(|&(_, w)| w))?;
    Ok(choices[dist.sample(rng)].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Draw;
    use crate::stats::{WindowSummary, filter_window};
    use chrono::{NaiveDate, Weekday};

    fn saturday_draw(week: u32, numbers: [u8; 6], strong: u8) -> Draw {
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap()
            + chrono::Duration::days(7 * week as i64);
        Draw::new(date, numbers, strong)
    }

    fn fixture_summary() -> WindowSummary {
        let mut draws: Vec<Draw> = (0..30)
            .map(|w| {
                let base = (w % 5) as u8;
                saturday_draw(
                    w,
                    [
                        base + 1,
                        base + 8,
                        base + 15,
                        base + 21,
                        base + 27,
                        base + 32,
                    ],
                    (w % 7) as u8 + 1,
                )
            })
            .collect();
        draws.sort_by(|a, b| b.date.cmp(&a.date));
        let window = filter_window(&draws, Weekday::Sat, None);
        WindowSummary::compute(&window, &EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_batch_has_exactly_fourteen_entries() {
        let config = EngineConfig::default();
        let batch = generate_batch(&fixture_summary(), &config, Some(42)).unwrap();
        assert_eq!(batch.len(), 14);
    }

    #[test]
    fn test_all_entries_respect_invariants() {
        let config = EngineConfig::default();
        let batch = generate_batch(&fixture_summary(), &config, Some(7)).unwrap();
        for entry in &batch.entries {
            // Numéros distincts, dans le domaine, triés en ordre décroissant.
            for pair in entry.numbers.windows(2) {
                assert!(pair[0] > pair[1], "grille non décroissante : {:?}", entry.numbers);
            }
            for &n in &entry.numbers {
                assert!(Pool::Mains.contains(n));
            }
            assert!(is_balanced(&entry.numbers), "grille déséquilibrée : {:?}", entry.numbers);
            assert!(Pool::Strong.contains(entry.strong));
        }
    }

    #[test]
    fn test_same_seed_same_batch() {
        let config = EngineConfig::default();
        let summary = fixture_summary();
        let a = generate_batch(&summary, &config, Some(1234)).unwrap();
        let b = generate_batch(&summary, &config, Some(1234)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_pair_signals_do_not_block_generation() {
        // Aucune valeur consécutive dans l'historique : le signal de paires
        // consécutives est vide et la génération doit quand même aboutir.
        let mut draws: Vec<Draw> = (0..12)
            .map(|w| saturday_draw(w, [1, 5, 11, 20, 28, 36], (w % 7) as u8 + 1))
            .collect();
        draws.sort_by(|a, b| b.date.cmp(&a.date));
        let summary = WindowSummary::compute(&draws, &EngineConfig::default()).unwrap();
        assert!(summary.consecutive_pairs.is_empty());

        let batch = generate_batch(&summary, &EngineConfig::default(), Some(99)).unwrap();
        assert_eq!(batch.len(), 14);
    }

    #[test]
    fn test_single_draw_window_still_generates() {
        let draws = vec![saturday_draw(0, [3, 9, 14, 22, 28, 35], 4)];
        let summary = WindowSummary::compute(&draws, &EngineConfig::default()).unwrap();
        let batch = generate_batch(&summary, &EngineConfig::default(), Some(5)).unwrap();
        assert_eq!(batch.len(), 14);
    }

    #[test]
    fn test_attempt_cap_exceeded_fails() {
        let config = EngineConfig {
            max_attempts: 0,
            ..EngineConfig::default()
        };
        assert!(generate_batch(&fixture_summary(), &config, Some(1)).is_err());
    }

    #[test]
    fn test_sample_unique_handles_undersized_source() {
        let mut rng = StdRng::seed_from_u64(0);
        let picked = sample_unique(&[4, 9], 5, &mut rng);
        assert_eq!(picked.len(), 2);
        assert!(picked.contains(&4) && picked.contains(&9));
    }

    #[test]
    fn test_pick_strong_falls_back_when_no_hot_strong() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let strong = pick_strong(&[], &mut rng).unwrap();
            assert!(Pool::Strong.contains(strong));
        }
    }
}
