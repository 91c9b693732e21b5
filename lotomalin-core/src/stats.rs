use std::collections::HashMap;

use anyhow::{Result, bail};
use chrono::Weekday;

use crate::config::EngineConfig;
use crate::models::{Draw, Pool};

/// Fenêtre d'analyse : les tirages du jour demandé, tronquée aux `limit`
/// plus récents.
///
/// Précondition : `draws` est trié du plus récent au plus ancien. Les
/// opérations de tête (dernier tirage, momentum) en dépendent.
pub fn filter_window(draws: &[Draw], weekday: Weekday, limit: Option<usize>) -> Vec<Draw> {
    let mut window: Vec<Draw> = draws
        .iter()
        .filter(|d| d.weekday == weekday)
        .copied()
        .collect();
    if let Some(limit) = limit {
        window.truncate(limit);
    }
    window
}

/// Résumé statistique d'une fenêtre : fréquences, paliers et signaux de
/// motifs. Entièrement recalculé à chaque appel, aucun état partagé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSummary {
    /// Fréquences des numéros principaux, triées par ordre décroissant
    /// (égalités départagées par ordre de première rencontre).
    pub main_counts: Vec<(u8, u32)>,
    /// Fréquences des numéros forts, même ordre.
    pub strong_counts: Vec<(u8, u32)>,
    pub hot: Vec<u8>,
    pub cold: Vec<u8>,
    pub medium: Vec<u8>,
    /// Paires de valeurs consécutives (écart de 1) répétées dans la fenêtre.
    pub consecutive_pairs: Vec<(u8, u8)>,
    /// Paires espacées d'au moins deux positions dans un tirage trié.
    pub spaced_pairs: Vec<(u8, u8)>,
    pub momentum: Vec<u8>,
    pub rebound: Vec<u8>,
    pub skip_two: Vec<u8>,
    pub hot_strong: Vec<u8>,
    pub followers: Vec<u8>,
    pub last_draw: [u8; 6],
}

impl WindowSummary {
    pub fn compute(window: &[Draw], config: &EngineConfig) -> Result<Self> {
        if window.is_empty() {
            bail!("Aucun tirage ne correspond au jour demandé (fenêtre vide)");
        }

        let main_counts = ranked_counts(window.iter().flat_map(|d| d.numbers.iter().copied()));
        let strong_counts = ranked_counts(window.iter().map(|d| d.strong));

        let (hot, cold, medium) = compute_tiers(&main_counts, config.tier_size);
        let (consecutive_pairs, spaced_pairs) =
            compute_pair_signals(window, config.pair_min_repeats);
        let momentum = compute_momentum(window, config.momentum_window, config.momentum_min);
        let (rebound, skip_two) = compute_spacing_signals(window, config);
        let hot_strong = compute_hot_strong(&strong_counts, config);
        let last_draw = window[0].numbers;
        let followers = compute_followers(window, &last_draw, config.follower_count);

        Ok(Self {
            main_counts,
            strong_counts,
            hot,
            cold,
            medium,
            consecutive_pairs,
            spaced_pairs,
            momentum,
            rebound,
            skip_two,
            hot_strong,
            followers,
            last_draw,
        })
    }
}

/// Comptage façon `most_common` : tri stable par fréquence décroissante,
/// les égalités restent dans l'ordre de première rencontre.
fn ranked_counts(values: impl Iterator<Item = u8>) -> Vec<(u8, u32)> {
    let mut counts: Vec<(u8, u32)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(n, _)| *n == v) {
            Some((_, c)) => *c += 1,
            None => counts.push((v, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Découpe le classement en paliers chaud / froid / moyen.
///
/// Le palier froid est pris dans la queue du classement, hors palier chaud,
/// et ne couvre que les numéros observés : un numéro jamais sorti dans la
/// fenêtre n'est pas forcé dans le froid, il reste dans le moyen.
fn compute_tiers(main_counts: &[(u8, u32)], tier_size: usize) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let hot_cut = main_counts.len().min(tier_size);
    let hot: Vec<u8> = main_counts[..hot_cut]
        .iter()
        .map(|&(n, _)| n)
        .filter(|&n| Pool::Mains.contains(n))
        .collect();

    let remaining = &main_counts[hot_cut..];
    let cold_skip = remaining.len().saturating_sub(tier_size);
    let cold: Vec<u8> = remaining[cold_skip..]
        .iter()
        .map(|&(n, _)| n)
        .filter(|&n| Pool::Mains.contains(n))
        .collect();

    let medium: Vec<u8> = (1..=Pool::Mains.size() as u8)
        .filter(|n| !hot.contains(n) && !cold.contains(n))
        .collect();

    (hot, cold, medium)
}

/// Paires répétées à l'intérieur d'un même tirage : valeurs consécutives
/// (écart de 1) et paires non adjacentes en position triée.
fn compute_pair_signals(window: &[Draw], min_repeats: u32) -> (Vec<(u8, u8)>, Vec<(u8, u8)>) {
    let mut consecutive: HashMap<(u8, u8), u32> = HashMap::new();
    let mut spaced: HashMap<(u8, u8), u32> = HashMap::new();

    for draw in window {
        let mut sorted = draw.numbers;
        sorted.sort();
        for i in 0..sorted.len() {
            for j in (i + 1)..sorted.len() {
                let pair = (sorted[i], sorted[j]);
                if sorted[j] - sorted[i] == 1 {
                    *consecutive.entry(pair).or_insert(0) += 1;
                }
                if j - i >= 2 {
                    *spaced.entry(pair).or_insert(0) += 1;
                }
            }
        }
    }

    (
        qualify_pairs(consecutive, min_repeats),
        qualify_pairs(spaced, min_repeats),
    )
}

fn qualify_pairs(counts: HashMap<(u8, u8), u32>, min_repeats: u32) -> Vec<(u8, u8)> {
    let mut pairs: Vec<(u8, u8)> = counts
        .into_iter()
        .filter(|&(_, c)| c >= min_repeats)
        .map(|(p, _)| p)
        .filter(|&(a, b)| Pool::Mains.contains(a) && Pool::Mains.contains(b))
        .collect();
    // Ordre déterministe : la HashMap n'en garantit aucun.
    pairs.sort();
    pairs
}

/// Numéros en momentum : au moins `min` apparitions dans les `sub` tirages
/// les plus récents de la fenêtre.
fn compute_momentum(window: &[Draw], sub: usize, min: u32) -> Vec<u8> {
    let head = &window[..window.len().min(sub)];
    let mut momentum: Vec<u8> = ranked_counts(head.iter().flat_map(|d| d.numbers.iter().copied()))
        .into_iter()
        .filter(|&(n, c)| c >= min && Pool::Mains.contains(n))
        .map(|(n, _)| n)
        .collect();
    momentum.sort();
    momentum
}

/// Signaux d'espacement : pour chaque numéro du domaine, les écarts entre
/// positions d'apparition successives dans la fenêtre. Un écart d'au moins
/// `rebound_gap_min` classe le numéro en rebond ; au moins `skip_two_min`
/// écarts exactement égaux à `skip_two_gap` le classent en saut de deux.
fn compute_spacing_signals(window: &[Draw], config: &EngineConfig) -> (Vec<u8>, Vec<u8>) {
    let mut rebound = Vec::new();
    let mut skip_two = Vec::new();

    for n in 1..=Pool::Mains.size() as u8 {
        let positions: Vec<usize> = window
            .iter()
            .enumerate()
            .filter(|(_, d)| d.numbers.contains(&n))
            .map(|(i, _)| i)
            .collect();

        let mut has_rebound = false;
        let mut skip_hits = 0usize;
        for pair in positions.windows(2) {
            let gap = pair[1] - pair[0];
            if gap >= config.rebound_gap_min {
                has_rebound = true;
            }
            if gap == config.skip_two_gap {
                skip_hits += 1;
            }
        }

        if has_rebound {
            rebound.push(n);
        }
        if skip_hits >= config.skip_two_min {
            skip_two.push(n);
        }
    }

    (rebound, skip_two)
}

fn compute_hot_strong(strong_counts: &[(u8, u32)], config: &EngineConfig) -> Vec<u8> {
    strong_counts
        .iter()
        .filter(|&&(n, c)| Pool::Strong.contains(n) && c >= config.hot_strong_min)
        .take(config.hot_strong_count)
        .map(|&(n, _)| n)
        .collect()
}

/// Suiveurs : cumule les transitions numéro-du-tirage-précédent vers
/// numéro-du-tirage-suivant sur toute la fenêtre, puis retourne les `count`
/// numéros ayant le plus souvent suivi un numéro du dernier tirage.
fn compute_followers(window: &[Draw], last_draw: &[u8; 6], count: usize) -> Vec<u8> {
    // window[i] est plus récent que window[i + 1] : la transition va de
    // l'ancien tirage vers celui qui l'a suivi.
    let mut transitions: HashMap<(u8, u8), u32> = HashMap::new();
    for pair in window.windows(2) {
        let (later, earlier) = (&pair[0], &pair[1]);
        for &from in &earlier.numbers {
            for &to in &later.numbers {
                *transitions.entry((from, to)).or_insert(0) += 1;
            }
        }
    }

    let mut weights: HashMap<u8, u32> = HashMap::new();
    for (&(from, to), &c) in &transitions {
        if last_draw.contains(&from) && Pool::Mains.contains(to) {
            *weights.entry(to).or_insert(0) += c;
        }
    }

    let mut ranked: Vec<(u8, u32)> = weights.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(count).map(|(n, _)| n).collect()
}
