/// Frontière entre numéros bas et hauts (1-19 contre 20-37).
const LOW_MAX: u8 = 19;

/// Prédicat d'équilibre structurel d'une grille : les six numéros doivent
/// se répartir entre bas / hauts et pairs / impairs, chaque groupe comptant
/// entre 2 et 4 numéros. Écarte les grilles dégénérées (tout-bas, tout-pair).
pub fn is_balanced(numbers: &[u8; 6]) -> bool {
    let low = numbers.iter().filter(|&&n| n <= LOW_MAX).count();
    let high = numbers.len() - low;
    let even = numbers.iter().filter(|&&n| n % 2 == 0).count();
    let odd = numbers.len() - even;

    (2..=4).contains(&low)
        && (2..=4).contains(&high)
        && (2..=4).contains(&even)
        && (2..=4).contains(&odd)
}
