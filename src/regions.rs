//! Federative units (UFs) shown as orientation markers on the map.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub code: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn region(code: &'static str, lat: f64, lon: f64) -> Region {
    Region { code, lat, lon }
}

/// Region the map centers on when none is selected.
pub const DEFAULT_REGION: &str = "RN";

pub const REGIONS: [Region; 27] = [
    region("AC", -8.77, -70.55),
    region("AL", -9.62, -36.82),
    region("AM", -3.47, -65.10),
    region("AP", 1.41, -51.77),
    region("BA", -13.29, -41.71),
    region("CE", -5.20, -39.53),
    region("DF", -15.83, -47.86),
    region("ES", -19.19, -40.34),
    region("GO", -15.98, -49.86),
    region("MA", -5.42, -45.44),
    region("MT", -12.64, -55.42),
    region("MS", -20.51, -54.54),
    region("MG", -18.10, -44.38),
    region("PA", -3.79, -52.48),
    region("PB", -7.28, -36.72),
    region("PR", -24.89, -51.55),
    region("PE", -8.38, -37.86),
    region("PI", -6.60, -42.28),
    region("RJ", -22.25, -42.66),
    region("RN", -5.81, -36.59),
    region("RO", -10.83, -63.34),
    region("RS", -30.17, -53.50),
    region("RR", 1.99, -61.33),
    region("SC", -27.45, -50.95),
    region("SE", -10.57, -37.45),
    region("SP", -22.19, -48.79),
    region("TO", -9.46, -48.26),
];

/// Case-insensitive lookup by two-letter code.
pub fn find(code: &str) -> Option<&'static Region> {
    let code = code.trim();
    REGIONS
        .iter()
        .find(|region| region.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let sp = find(" sp ").expect("SP should exist");
        assert_eq!(sp.code, "SP");
        assert_eq!(sp.lat, -22.19);
        assert!(find("XX").is_none());
    }

    #[test]
    fn default_region_exists() {
        assert!(find(DEFAULT_REGION).is_some());
    }
}
