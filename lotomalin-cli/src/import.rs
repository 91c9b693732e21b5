use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;

use lotomalin_core::models::{Draw, validate_draw};

/// Indices des colonnes utiles dans le fichier exporté par le Mifal HaPais.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub date: usize,
    pub numbers: [usize; 6],
    pub strong: usize,
}

pub struct ImportResult {
    pub draws: Vec<Draw>,
    pub total_records: u32,
    pub parsed: u32,
    pub errors: u32,
}

/// Repère les colonnes par leur en-tête hébreu (`תאריך`, `1`..`6`, colonne
/// contenant `חזק`), avec repli sur la disposition standard de l'export
/// officiel (identifiant, date, six numéros, numéro fort) si les en-têtes
/// ne sont pas reconnus.
pub fn resolve_columns(headers: &StringRecord) -> ColumnLayout {
    let find = |pred: &dyn Fn(&str) -> bool| headers.iter().position(|h| pred(h.trim()));

    let date = find(&|h| h.contains("תאריך"));
    let strong = find(&|h| h.contains("חזק"));
    let mut numbers = [0usize; 6];
    let mut all_found = true;
    for (i, slot) in numbers.iter_mut().enumerate() {
        let label = (i + 1).to_string();
        match find(&|h| h == label) {
            Some(idx) => *slot = idx,
            None => all_found = false,
        }
    }

    match (date, strong, all_found) {
        (Some(date), Some(strong), true) => ColumnLayout {
            date,
            numbers,
            strong,
        },
        _ => ColumnLayout {
            date: 1,
            numbers: [2, 3, 4, 5, 6, 7],
            strong: 8,
        },
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .with_context(|| format!("Format de date invalide : '{}'", raw))
}

pub fn parse_record(record: &StringRecord, layout: &ColumnLayout) -> Result<Draw> {
    let get = |idx: usize| -> Result<&str> {
        record
            .get(idx)
            .map(|s| s.trim())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let date = parse_date(get(layout.date)?)?;

    let mut numbers = [0u8; 6];
    for (slot, &idx) in numbers.iter_mut().zip(layout.numbers.iter()) {
        *slot = get_u8(idx)?;
    }
    let strong = get_u8(layout.strong)?;

    // Les enregistrements mal formés sont rejetés à l'ingestion, le moteur
    // suppose des tirages valides.
    validate_draw(&numbers, strong)?;

    Ok(Draw::new(date, numbers, strong))
}

/// Charge le CSV des tirages, ligne par ligne : les lignes illisibles sont
/// comptées et signalées sans interrompre l'import. Les tirages retenus
/// sont retriés du plus récent au plus ancien, comme l'exige le moteur.
pub fn load_csv(path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let layout = resolve_columns(reader.headers().context("En-têtes illisibles")?);

    let mut result = ImportResult {
        draws: Vec::new(),
        total_records: 0,
        parsed: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record, &layout) {
                Ok(draw) => {
                    result.draws.push(draw);
                    result.parsed += 1;
                }
                Err(e) => {
                    eprintln!("Erreur parsing ligne {} : {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur lecture ligne {} : {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    if result.draws.is_empty() {
        bail!("Aucun tirage exploitable dans {:?}", path);
    }

    result.draws.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hebrew_headers() -> StringRecord {
        StringRecord::from(vec![
            "הגרלה",
            "תאריך",
            "1",
            "2",
            "3",
            "4",
            "5",
            "6",
            "המספר החזק/נוסף",
        ])
    }

    #[test]
    fn test_resolve_columns_by_hebrew_headers() {
        let layout = resolve_columns(&hebrew_headers());
        assert_eq!(layout.date, 1);
        assert_eq!(layout.numbers, [2, 3, 4, 5, 6, 7]);
        assert_eq!(layout.strong, 8);
    }

    #[test]
    fn test_resolve_columns_positional_fallback() {
        let headers = StringRecord::from(vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
        let layout = resolve_columns(&headers);
        assert_eq!(layout.date, 1);
        assert_eq!(layout.numbers, [2, 3, 4, 5, 6, 7]);
        assert_eq!(layout.strong, 8);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("17/02/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 17).unwrap());
        assert!(parse_date("2024-02-17").is_err());
    }

    #[test]
    fn test_parse_record_ok() {
        let layout = resolve_columns(&hebrew_headers());
        let record = StringRecord::from(vec![
            "3710", "06/01/2024", "3", "9", "14", "22", "28", "35", "4",
        ]);
        let draw = parse_record(&record, &layout).unwrap();
        assert_eq!(draw.numbers, [3, 9, 14, 22, 28, 35]);
        assert_eq!(draw.strong, 4);
        assert_eq!(draw.weekday, chrono::Weekday::Sat);
    }

    #[test]
    fn test_parse_record_rejects_out_of_domain() {
        let layout = resolve_columns(&hebrew_headers());
        let record = StringRecord::from(vec![
            "3710", "06/01/2024", "38", "9", "14", "22", "28", "35", "4",
        ]);
        assert!(parse_record(&record, &layout).is_err());
    }

    #[test]
    fn test_parse_record_rejects_bad_date() {
        let layout = resolve_columns(&hebrew_headers());
        let record = StringRecord::from(vec![
            "3710", "pas-une-date", "3", "9", "14", "22", "28", "35", "4",
        ]);
        assert!(parse_record(&record, &layout).is_err());
    }
}
