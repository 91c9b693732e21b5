/// Tous les seuils du moteur regroupés en une seule configuration.
/// Un quota à zéro désactive la source de signaux correspondante.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Nombre maximum de tirages analysés (None = tout l'historique).
    pub history_limit: Option<usize>,
    /// Taille des paliers chaud et froid (top-K / bottom-K).
    pub tier_size: usize,
    /// Répétitions minimum pour qu'une paire soit retenue.
    pub pair_min_repeats: u32,
    /// Sous-fenêtre des tirages les plus récents pour le momentum.
    pub momentum_window: usize,
    /// Apparitions minimum dans la sous-fenêtre momentum.
    pub momentum_min: u32,
    /// Écart de positions minimum pour un rebond.
    pub rebound_gap_min: usize,
    /// Écart de positions exact du motif « saut de deux ».
    pub skip_two_gap: usize,
    /// Occurrences minimum de cet écart.
    pub skip_two_min: usize,
    /// Nombre de numéros forts retenus.
    pub hot_strong_count: usize,
    /// Occurrences minimum d'un numéro fort.
    pub hot_strong_min: u32,
    /// Nombre de suiveurs retenus après le dernier tirage.
    pub follower_count: usize,
    /// Quotas de tirage par source (0 = source désactivée).
    pub hot_quota: usize,
    pub medium_quota: usize,
    pub cold_quota: usize,
    pub follower_quota: usize,
    pub momentum_quota: usize,
    pub rebound_quota: usize,
    pub skip_two_quota: usize,
    /// Nombre de grilles par lot.
    pub batch_size: usize,
    /// Plafond d'essais du rééchantillonnage avant abandon.
    pub max_attempts: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: None,
            tier_size: 20,
            pair_min_repeats: 2,
            momentum_window: 10,
            momentum_min: 3,
            rebound_gap_min: 3,
            skip_two_gap: 2,
            skip_two_min: 2,
            hot_strong_count: 3,
            hot_strong_min: 3,
            follower_count: 5,
            hot_quota: 3,
            medium_quota: 1,
            cold_quota: 1,
            follower_quota: 1,
            momentum_quota: 1,
            rebound_quota: 1,
            skip_two_quota: 1,
            batch_size: 14,
            max_attempts: 10_000,
        }
    }
}
