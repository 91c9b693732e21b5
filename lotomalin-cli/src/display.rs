use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::import::ImportResult;
use lotomalin_core::models::{Draw, Pool, PredictionBatch};
use lotomalin_core::stats::WindowSummary;

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Lignes lues       : {}", result.total_records);
    println!("  Tirages retenus   : {}", result.parsed);
    if result.errors > 0 {
        println!("  Lignes rejetées   : {}", result.errors);
    }
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Jour", "Numéros", "Fort"]);

    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort();
        let numbers_str = sorted
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![
            &draw.date.format("%d/%m/%Y").to_string(),
            &weekday_label(draw.weekday).to_string(),
            &numbers_str,
            &draw.strong.to_string(),
        ]);
    }

    println!("{table}");
}

pub fn display_summary(summary: &WindowSummary, window_len: usize, day_label: &str) {
    println!(
        "\n📊 Statistiques sur {} tirages du {}\n",
        window_len, day_label
    );

    println!("── Numéros principaux (1-{}) ──", Pool::Mains.size());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Palier"]);

    for &(n, count) in &summary.main_counts {
        let (label, color) = if summary.hot.contains(&n) {
            ("CHAUD", Color::Green)
        } else if summary.cold.contains(&n) {
            ("FROID", Color::Red)
        } else {
            ("MOYEN", Color::White)
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", n)),
            Cell::new(count.to_string()),
            Cell::new(label).fg(color),
        ]);
    }
    println!("{table}");

    println!("\n── Numéros forts (1-{}) ──", Pool::Strong.size());
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", ""]);

    for &(n, count) in &summary.strong_counts {
        let marker = if summary.hot_strong.contains(&n) {
            Cell::new("FORT").fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", n)),
            Cell::new(count.to_string()),
            marker,
        ]);
    }
    println!("{table}");

    println!("\n── Signaux de motifs ──");
    println!("  Paires consécutives : {}", format_pairs(&summary.consecutive_pairs));
    println!("  Paires espacées     : {}", format_pairs(&summary.spaced_pairs));
    println!("  Momentum            : {}", format_numbers(&summary.momentum));
    println!("  Rebond              : {}", format_numbers(&summary.rebound));
    println!("  Saut de deux        : {}", format_numbers(&summary.skip_two));
    println!("  Suiveurs            : {}", format_numbers(&summary.followers));
}

pub fn display_predictions(batch: &PredictionBatch) {
    println!("\n🎯 Grilles proposées\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéros", "Fort"]);

    for (i, prediction) in batch.entries.iter().enumerate() {
        let numbers_str = prediction
            .numbers
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![
            Cell::new(format!("{}", i + 1)),
            Cell::new(numbers_str),
            Cell::new(prediction.strong.to_string()).fg(Color::Yellow),
        ]);
    }

    println!("{table}");
}

fn format_numbers(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        "—".to_string()
    } else {
        numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn format_pairs(pairs: &[(u8, u8)]) -> String {
    if pairs.is_empty() {
        "—".to_string()
    } else {
        pairs
            .iter()
            .map(|(a, b)| format!("({}, {})", a, b))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn weekday_label(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "lundi",
        chrono::Weekday::Tue => "mardi",
        chrono::Weekday::Wed => "mercredi",
        chrono::Weekday::Thu => "jeudi",
        chrono::Weekday::Fri => "vendredi",
        chrono::Weekday::Sat => "samedi",
        chrono::Weekday::Sun => "dimanche",
    }
}
