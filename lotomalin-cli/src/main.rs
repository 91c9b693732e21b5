mod display;
mod import;

use std::path::PathBuf;

use anyhow::Result;
use chrono::Weekday;
use clap::{Parser, Subcommand, ValueEnum};

use crate::display::{
    display_draws, display_import_summary, display_predictions, display_summary, weekday_label,
};
use crate::import::load_csv;
use lotomalin_core::config::EngineConfig;
use lotomalin_core::predict;
use lotomalin_core::stats::{WindowSummary, filter_window};

/// Jours de tirage du Loto israélien.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DrawDay {
    Mardi,
    Jeudi,
    Samedi,
}

impl DrawDay {
    fn weekday(self) -> Weekday {
        match self {
            DrawDay::Mardi => Weekday::Tue,
            DrawDay::Jeudi => Weekday::Thu,
            DrawDay::Samedi => Weekday::Sat,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "lotomalin",
    about = "Générateur de grilles statistiques pour le Loto israélien"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les tirages importés
    List {
        /// Chemin vers le fichier CSV des tirages
        #[arg(short, long)]
        file: PathBuf,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Afficher les statistiques de la fenêtre d'analyse
    Stats {
        /// Chemin vers le fichier CSV des tirages
        #[arg(short, long)]
        file: PathBuf,

        /// Jour de tirage analysé
        #[arg(short, long, value_enum)]
        jour: DrawDay,

        /// Fenêtre d'analyse (nombre de tirages, tout l'historique par défaut)
        #[arg(short = 'n', long)]
        fenetre: Option<usize>,
    },

    /// Générer un lot de 14 grilles pour le prochain tirage
    Predict {
        /// Chemin vers le fichier CSV des tirages
        #[arg(short, long)]
        file: PathBuf,

        /// Jour du tirage visé
        #[arg(short, long, value_enum)]
        jour: DrawDay,

        /// Fenêtre d'analyse (nombre de tirages, tout l'historique par défaut)
        #[arg(short = 'n', long)]
        fenetre: Option<usize>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::List { file, last } => cmd_list(&file, last),
        Command::Stats {
            file,
            jour,
            fenetre,
        } => cmd_stats(&file, jour, fenetre),
        Command::Predict {
            file,
            jour,
            fenetre,
            seed,
        } => cmd_predict(&file, jour, fenetre, seed),
    }
}

fn cmd_list(file: &PathBuf, last: usize) -> Result<()> {
    let result = load_csv(file)?;
    display_import_summary(&result);
    let shown = result.draws.len().min(last);
    display_draws(&result.draws[..shown]);
    Ok(())
}

fn cmd_stats(file: &PathBuf, jour: DrawDay, fenetre: Option<usize>) -> Result<()> {
    let result = load_csv(file)?;
    display_import_summary(&result);

    let config = EngineConfig {
        history_limit: fenetre,
        ..EngineConfig::default()
    };
    let window = filter_window(&result.draws, jour.weekday(), config.history_limit);
    let summary = WindowSummary::compute(&window, &config)?;
    display_summary(&summary, window.len(), weekday_label(jour.weekday()));
    Ok(())
}

fn cmd_predict(file: &PathBuf, jour: DrawDay, fenetre: Option<usize>, seed: Option<u64>) -> Result<()> {
    let result = load_csv(file)?;
    display_import_summary(&result);

    let config = EngineConfig {
        history_limit: fenetre,
        ..EngineConfig::default()
    };
    let batch = predict(&result.draws, jour.weekday(), &config, seed)?;
    display_predictions(&batch);
    Ok(())
}
