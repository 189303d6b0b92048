/// Amounts closer than this to an integer are treated as integral.
const INTEGRAL_TOLERANCE: f64 = 1e-8;

/// Element amounts of a structure, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    amounts: Vec<(String, f64)>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` of `element`, merging with an existing entry.
    pub fn add(&mut self, element: &str, amount: f64) {
        match self.amounts.iter_mut().find(|(el, _)| el == element) {
            Some((_, total)) => *total += amount,
            None => self.amounts.push((element.to_string(), amount)),
        }
    }

    pub fn amounts(&self) -> &[(String, f64)] {
        &self.amounts
    }

    pub fn amount(&self, element: &str) -> f64 {
        self.amounts
            .iter()
            .find(|(el, _)| el == element)
            .map(|(_, n)| *n)
            .unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn num_atoms(&self) -> f64 {
        self.amounts.iter().map(|(_, n)| n).sum()
    }

    /// Full formula with explicit amounts, e.g. `Si4 O8`.
    pub fn formula(&self) -> String {
        self.amounts
            .iter()
            .map(|(el, n)| format!("{}{}", el, format_amount(*n)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Number of formula units: the gcd of the amounts when all are integral, else 1.
    pub fn formula_units(&self) -> u64 {
        let mut factor = 0u64;
        for (_, n) in &self.amounts {
            match as_integral(*n) {
                Some(k) if k > 0 => factor = gcd(factor, k),
                _ => return 1,
            }
        }
        factor.max(1)
    }

    /// Reduced formula with unit amounts omitted, e.g. `SiO2`.
    pub fn reduced_formula(&self) -> String {
        let units = self.formula_units() as f64;
        let mut out = String::new();
        for (el, n) in &self.amounts {
            let reduced = n / units;
            out.push_str(el);
            if (reduced - 1.0).abs() > INTEGRAL_TOLERANCE {
                out.push_str(&format_amount(reduced));
            }
        }
        out
    }
}

fn as_integral(n: f64) -> Option<u64> {
    let rounded = n.round();
    ((n - rounded).abs() < INTEGRAL_TOLERANCE && rounded >= 0.0).then_some(rounded as u64)
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub(crate) fn format_amount(n: f64) -> String {
    match as_integral(n) {
        Some(k) => k.to_string(),
        None => {
            let text = format!("{:.6}", n);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composition(entries: &[(&str, f64)]) -> Composition {
        let mut comp = Composition::new();
        for (el, n) in entries {
            comp.add(el, *n);
        }
        comp
    }

    #[test]
    fn test_formula_keeps_first_appearance_order() {
        let comp = composition(&[("Si", 1.0), ("O", 1.0), ("O", 1.0), ("Si", 1.0), ("O", 2.0)]);
        assert_eq!(comp.formula(), "Si2 O4");
        assert_eq!(comp.reduced_formula(), "SiO2");
        assert_eq!(comp.formula_units(), 2);
    }

    #[test]
    fn test_single_element() {
        let comp = composition(&[("C", 8.0)]);
        assert_eq!(comp.formula(), "C8");
        assert_eq!(comp.reduced_formula(), "C");
        assert_eq!(comp.formula_units(), 8);
        assert_eq!(comp.num_atoms(), 8.0);
    }

    #[test]
    fn test_fractional_occupancy_is_not_reduced() {
        let comp = composition(&[("Fe", 0.5), ("Ni", 0.5)]);
        assert_eq!(comp.formula(), "Fe0.5 Ni0.5");
        assert_eq!(comp.formula_units(), 1);
        assert_eq!(comp.reduced_formula(), "Fe0.5Ni0.5");
    }

    #[test]
    fn test_amount_lookup() {
        let comp = composition(&[("C", 2.0)]);
        assert_eq!(comp.amount("C"), 2.0);
        assert_eq!(comp.amount("H"), 0.0);
        assert!(Composition::new().is_empty());
    }
}
