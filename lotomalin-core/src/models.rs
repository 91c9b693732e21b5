use anyhow::{Result, bail};
use chrono::{Datelike, NaiveDate, Weekday};

/// Un tirage historique du Loto israélien : six numéros principaux (1-37)
/// et un numéro fort (1-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub numbers: [u8; 6],
    pub strong: u8,
}

impl Draw {
    pub fn new(date: NaiveDate, numbers: [u8; 6], strong: u8) -> Self {
        Self {
            date,
            weekday: date.weekday(),
            numbers,
            strong,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Mains,
    Strong,
}

impl Pool {
    pub fn size(&self) -> usize {
        match self {
            Pool::Mains => 37,
            Pool::Strong => 7,
        }
    }

    pub fn pick_count(&self) -> usize {
        match self {
            Pool::Mains => 6,
            Pool::Strong => 1,
        }
    }

    pub fn contains(&self, n: u8) -> bool {
        n >= 1 && n as usize <= self.size()
    }
}

pub fn validate_draw(numbers: &[u8; 6], strong: u8) -> Result<()> {
    for &n in numbers {
        if !Pool::Mains.contains(n) {
            bail!("Numéro {} hors limites (1-37)", n);
        }
    }
    if !Pool::Strong.contains(strong) {
        bail!("Numéro fort {} hors limites (1-7)", strong);
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

/// Une grille proposée : six numéros distincts triés en ordre décroissant
/// (convention d'affichage) et un numéro fort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prediction {
    pub numbers: [u8; 6],
    pub strong: u8,
}

/// Lot de grilles retourné à l'appelant. Immuable une fois produit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionBatch {
    pub entries: Vec<Prediction>,
}

impl PredictionBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_draw_ok() {
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6], 1).is_ok());
        assert!(validate_draw(&[37, 36, 35, 34, 33, 32], 7).is_ok());
    }

    #[test]
    fn test_validate_draw_number_out_of_range() {
        assert!(validate_draw(&[0, 2, 3, 4, 5, 6], 1).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5, 38], 1).is_err());
    }

    #[test]
    fn test_validate_draw_strong_out_of_range() {
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6], 0).is_err());
        assert!(validate_draw(&[1, 2, 3, 4, 5, 6], 8).is_err());
    }

    #[test]
    fn test_validate_draw_duplicate() {
        assert!(validate_draw(&[1, 1, 3, 4, 5, 6], 1).is_err());
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(Pool::Mains.size(), 37);
        assert_eq!(Pool::Strong.size(), 7);
    }

    #[test]
    fn test_pool_pick_count() {
        assert_eq!(Pool::Mains.pick_count(), 6);
        assert_eq!(Pool::Strong.pick_count(), 1);
    }

    #[test]
    fn test_weekday_derived_from_date() {
        // Le 6 janvier 2024 était un samedi.
        let date = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
        let draw = Draw::new(date, [1, 2, 3, 4, 5, 6], 3);
        assert_eq!(draw.weekday, Weekday::Sat);
    }
}
