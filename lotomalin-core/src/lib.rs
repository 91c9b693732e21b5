pub mod balance;
pub mod config;
pub mod models;
pub mod sampler;
pub mod stats;

use anyhow::Result;
use chrono::Weekday;

use crate::config::EngineConfig;
use crate::models::{Draw, PredictionBatch};
use crate::sampler::generate_batch;
use crate::stats::{WindowSummary, filter_window};

/// Point d'entrée du moteur : filtre l'historique sur le jour demandé,
/// calcule le résumé statistique de la fenêtre puis échantillonne un lot
/// de grilles équilibrées.
///
/// Précondition : `draws` est trié du plus récent au plus ancien. Un seed
/// fixé rend le lot entièrement reproductible.
pub fn predict(
    draws: &[Draw],
    weekday: Weekday,
    config: &EngineConfig,
    seed: Option<u64>,
) -> Result<PredictionBatch> {
    let window = filter_window(draws, weekday, config.history_limit);
    let summary = WindowSummary::compute(&window, config)?;
    generate_batch(&summary, config, seed)
}
